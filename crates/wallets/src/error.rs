use alloy_signer_local::LocalSignerError;
use alloy_transport::TransportError;

/// [EIP-1193](https://eips.ethereum.org/EIPS/eip-1193#provider-errors) error code for a request
/// the user declined.
pub const USER_REJECTED_REQUEST: i64 = 4001;

pub type WalletResult<T, E = WalletError> = Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum PrivateKeyError {
    #[error("Failed to create wallet from private key. Private key is invalid hex: {0}")]
    InvalidHex(#[from] alloy_primitives::hex::FromHexError),
    #[error(
        "Failed to create wallet from private key. Invalid private key. But env var {0} exists. Is the `$` anchor missing?"
    )]
    ExistsAsEnvVar(String),
}

/// Errors returned by a [`WalletProvider`](crate::WalletProvider).
#[derive(Debug, thiserror::Error)]
pub enum WalletError {
    #[error("no wallet available")]
    Unavailable,
    #[error("user rejected the request: {0}")]
    Rejected(String),
    #[error("wallet has no authorized accounts")]
    NoAccounts,
    #[error(transparent)]
    Transport(TransportError),
    #[error(transparent)]
    Signer(#[from] LocalSignerError),
}

impl WalletError {
    /// Returns `true` if the user declined the request.
    pub fn is_rejection(&self) -> bool {
        matches!(self, Self::Rejected(_))
    }
}

impl From<TransportError> for WalletError {
    fn from(err: TransportError) -> Self {
        if let Some(payload) = err.as_error_resp()
            && payload.code == USER_REJECTED_REQUEST
        {
            return Self::Rejected(payload.message.to_string());
        }
        Self::Transport(err)
    }
}
