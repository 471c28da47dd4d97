use crate::{Inclusion, LogStream, WalletError, WalletOpts, WalletProvider, WalletResult};
use alloy_network::{EthereumWallet, ReceiptResponse};
use alloy_primitives::{Address, Bytes, TxHash};
use alloy_provider::{DynProvider, Provider, ProviderBuilder};
use alloy_rpc_types::{Filter, TransactionRequest};
use alloy_signer_local::PrivateKeySigner;
use async_trait::async_trait;
use coffee_config::Config;
use futures::StreamExt;
use std::time::Duration;

/// A wallet backed by a JSON-RPC endpoint.
///
/// With a local signer, the signer's address is the only account and transactions are signed
/// before submission. Without one, accounts and signing are left to the node, i.e.
/// `eth_accounts` and `eth_sendTransaction` against unlocked accounts.
#[derive(Clone)]
pub struct RpcWallet {
    provider: DynProvider,
    signer: Option<Address>,
    poll_interval: Duration,
}

impl RpcWallet {
    /// Connects to `url`, signing with `signer` if given.
    pub async fn connect(
        url: &str,
        signer: Option<PrivateKeySigner>,
        poll_interval: Duration,
    ) -> WalletResult<Self> {
        let (provider, signer) = match signer {
            Some(signer) => {
                let address = signer.address();
                let provider = ProviderBuilder::new()
                    .wallet(EthereumWallet::from(signer))
                    .connect(url)
                    .await?
                    .erased();
                (provider, Some(address))
            }
            None => (ProviderBuilder::new().connect(url).await?.erased(), None),
        };
        provider.client().set_poll_interval(poll_interval);
        debug!(%url, ?signer, "connected rpc wallet");
        Ok(Self { provider, signer, poll_interval })
    }

    /// Opens the wallet described by `config` and `opts`.
    ///
    /// Returns `None` if no RPC endpoint is configured: there is no wallet to talk to.
    pub async fn from_config(config: &Config, opts: &WalletOpts) -> eyre::Result<Option<Self>> {
        let Some(url) = config.rpc_url() else {
            debug!("no rpc url configured");
            return Ok(None);
        };
        let signer = opts.signer()?;
        let wallet = Self::connect(url, signer, config.poll_interval()?).await?;
        Ok(Some(wallet))
    }

    /// Returns the local signer's address, if any.
    pub fn signer(&self) -> Option<Address> {
        self.signer
    }

    /// Returns the underlying provider.
    pub fn provider(&self) -> &DynProvider {
        &self.provider
    }
}

#[async_trait]
impl WalletProvider for RpcWallet {
    async fn accounts(&self) -> WalletResult<Vec<Address>> {
        if let Some(signer) = self.signer {
            return Ok(vec![signer]);
        }
        Ok(self.provider.get_accounts().await?)
    }

    async fn request_accounts(&self) -> WalletResult<Vec<Address>> {
        let accounts = self.accounts().await?;
        if accounts.is_empty() {
            return Err(WalletError::NoAccounts);
        }
        Ok(accounts)
    }

    async fn send_transaction(&self, mut tx: TransactionRequest) -> WalletResult<TxHash> {
        if tx.from.is_none() {
            tx.from = self.request_accounts().await?.first().copied();
        }
        let pending = self.provider.send_transaction(tx).await?;
        let tx_hash = *pending.tx_hash();
        trace!(%tx_hash, "transaction submitted");
        Ok(tx_hash)
    }

    async fn wait_for_inclusion(&self, tx_hash: TxHash) -> WalletResult<Inclusion> {
        loop {
            if let Some(receipt) = self.provider.get_transaction_receipt(tx_hash).await? {
                return Ok(Inclusion {
                    tx_hash,
                    block_number: ReceiptResponse::block_number(&receipt),
                    success: ReceiptResponse::status(&receipt),
                });
            }
            trace!(%tx_hash, "waiting for receipt");
            tokio::time::sleep(self.poll_interval).await;
        }
    }

    async fn call(&self, tx: TransactionRequest) -> WalletResult<Bytes> {
        Ok(self.provider.call(tx).await?)
    }

    async fn watch_logs(&self, filter: Filter) -> WalletResult<LogStream> {
        let poller =
            self.provider.watch_logs(&filter).await?.with_poll_interval(self.poll_interval);
        Ok(poller.into_stream().flat_map(futures::stream::iter).boxed())
    }
}

impl std::fmt::Debug for RpcWallet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RpcWallet")
            .field("signer", &self.signer)
            .field("poll_interval", &self.poll_interval)
            .finish_non_exhaustive()
    }
}
