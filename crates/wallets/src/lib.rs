//! # coffee-wallets
//!
//! The wallet capability the client talks to, modeled after the
//! [EIP-1193](https://eips.ethereum.org/EIPS/eip-1193) provider API that browser wallets expose:
//! list authorized accounts, request account access, sign and submit transactions, read contract
//! state and follow contract logs.
//!
//! [`RpcWallet`] implements it on top of a JSON-RPC endpoint and an optional local signer.

#![cfg_attr(not(test), warn(unused_crate_dependencies))]

#[macro_use]
extern crate tracing;

use alloy_primitives::{Address, Bytes, TxHash};
use alloy_rpc_types::{Filter, Log, TransactionRequest};
use async_trait::async_trait;
use futures::stream::BoxStream;
use std::sync::Arc;

pub mod error;
pub use error::{PrivateKeyError, WalletError, WalletResult};

mod opts;
pub use opts::WalletOpts;

mod rpc;
pub use rpc::RpcWallet;

pub mod utils;

/// Stream of logs matching a filter, in the order the node delivers them.
pub type LogStream = BoxStream<'static, Log>;

/// Outcome of waiting for a submitted transaction.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Inclusion {
    pub tx_hash: TxHash,
    pub block_number: Option<u64>,
    /// Whether the transaction executed successfully, `false` if it reverted.
    pub success: bool,
}

/// The wallet capability set.
///
/// Methods map onto the JSON-RPC calls a browser-injected provider answers:
///
/// | method                 | request                  |
/// |------------------------|--------------------------|
/// | [`accounts`]           | `eth_accounts`           |
/// | [`request_accounts`]   | `eth_requestAccounts`    |
/// | [`send_transaction`]   | `eth_sendTransaction`    |
/// | [`wait_for_inclusion`] | `eth_getTransactionReceipt` |
/// | [`call`]               | `eth_call`               |
/// | [`watch_logs`]         | `eth_newFilter` + polling |
///
/// [`accounts`]: WalletProvider::accounts
/// [`request_accounts`]: WalletProvider::request_accounts
/// [`send_transaction`]: WalletProvider::send_transaction
/// [`wait_for_inclusion`]: WalletProvider::wait_for_inclusion
/// [`call`]: WalletProvider::call
/// [`watch_logs`]: WalletProvider::watch_logs
#[async_trait]
pub trait WalletProvider: Send + Sync + 'static {
    /// Returns the accounts the user already authorized, without prompting.
    async fn accounts(&self) -> WalletResult<Vec<Address>>;

    /// Asks the user for account access. May prompt.
    async fn request_accounts(&self) -> WalletResult<Vec<Address>>;

    /// Signs and submits the transaction, returning once the network accepted it.
    async fn send_transaction(&self, tx: TransactionRequest) -> WalletResult<TxHash>;

    /// Waits until the transaction is included in a block.
    async fn wait_for_inclusion(&self, tx_hash: TxHash) -> WalletResult<Inclusion>;

    /// Executes a read-only call against the latest block.
    async fn call(&self, tx: TransactionRequest) -> WalletResult<Bytes>;

    /// Follows new logs matching `filter`.
    async fn watch_logs(&self, filter: Filter) -> WalletResult<LogStream>;
}

#[async_trait]
impl<W: WalletProvider + ?Sized> WalletProvider for Arc<W> {
    async fn accounts(&self) -> WalletResult<Vec<Address>> {
        (**self).accounts().await
    }

    async fn request_accounts(&self) -> WalletResult<Vec<Address>> {
        (**self).request_accounts().await
    }

    async fn send_transaction(&self, tx: TransactionRequest) -> WalletResult<TxHash> {
        (**self).send_transaction(tx).await
    }

    async fn wait_for_inclusion(&self, tx_hash: TxHash) -> WalletResult<Inclusion> {
        (**self).wait_for_inclusion(tx_hash).await
    }

    async fn call(&self, tx: TransactionRequest) -> WalletResult<Bytes> {
        (**self).call(tx).await
    }

    async fn watch_logs(&self, filter: Filter) -> WalletResult<LogStream> {
        (**self).watch_logs(filter).await
    }
}
