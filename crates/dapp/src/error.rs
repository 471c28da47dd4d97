//! Errors returned by [`ChainClient`](crate::ChainClient).

use alloy_primitives::TxHash;
use coffee_wallets::WalletError;
use std::fmt;

/// The wallet interaction an error came from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Operation {
    CheckAccounts,
    Connect,
    SubmitTip,
    FetchMemos,
    Subscribe,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::CheckAccounts => "account check",
            Self::Connect => "connect",
            Self::SubmitTip => "tip",
            Self::FetchMemos => "memo fetch",
            Self::Subscribe => "memo subscription",
        })
    }
}

/// Coarse classification of a [`ClientError`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// No wallet is available at all.
    WalletAbsent,
    /// The user declined to authorize an account.
    UserDeclined,
    /// The tip transaction was rejected, failed to submit, or reverted.
    TransactionFailed,
    /// A read or subscription failed.
    ReadFailed,
}

#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("no wallet available")]
    WalletUnavailable,
    #[error("{operation} rejected: {reason}")]
    Rejected { operation: Operation, reason: String },
    #[error("{operation} failed: {source}")]
    Wallet {
        operation: Operation,
        #[source]
        source: WalletError,
    },
    #[error("transaction {0} reverted")]
    Reverted(TxHash),
    #[error("failed to decode {operation} response: {source}")]
    Decode {
        operation: Operation,
        #[source]
        source: alloy_sol_types::Error,
    },
}

impl ClientError {
    pub(crate) fn wallet(operation: Operation, err: WalletError) -> Self {
        match err {
            WalletError::Unavailable => Self::WalletUnavailable,
            WalletError::Rejected(reason) => Self::Rejected { operation, reason },
            source => Self::Wallet { operation, source },
        }
    }

    /// Returns the operation that failed, if the error came from one.
    pub fn operation(&self) -> Option<Operation> {
        match self {
            Self::Rejected { operation, .. }
            | Self::Wallet { operation, .. }
            | Self::Decode { operation, .. } => Some(*operation),
            Self::Reverted(_) => Some(Operation::SubmitTip),
            Self::WalletUnavailable => None,
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::WalletUnavailable => ErrorKind::WalletAbsent,
            Self::Rejected { operation: Operation::CheckAccounts | Operation::Connect, .. }
            | Self::Wallet {
                operation: Operation::CheckAccounts | Operation::Connect,
                source: WalletError::NoAccounts,
            } => ErrorKind::UserDeclined,
            Self::Rejected { operation: Operation::SubmitTip, .. }
            | Self::Wallet { operation: Operation::SubmitTip, .. }
            | Self::Reverted(_) => ErrorKind::TransactionFailed,
            Self::Rejected { .. } | Self::Wallet { .. } | Self::Decode { .. } => {
                ErrorKind::ReadFailed
            }
        }
    }
}
