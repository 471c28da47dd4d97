//! Terminal approval of wallet requests.

use alloy_primitives::{Address, Bytes, TxHash, utils::format_ether};
use alloy_rpc_types::{Filter, TransactionRequest};
use async_trait::async_trait;
use coffee_wallets::{Inclusion, LogStream, WalletError, WalletProvider, WalletResult};
use dialoguer::Confirm;

/// Asks on the terminal before account access is granted or a transaction is signed, the way a
/// browser wallet pops up a confirmation.
///
/// Declining is reported as [`WalletError::Rejected`].
#[derive(Debug)]
pub struct ConfirmingWallet<W> {
    inner: W,
    skip: bool,
}

impl<W: WalletProvider> ConfirmingWallet<W> {
    /// Wraps `inner`. With `skip` set every request is approved without asking.
    pub fn new(inner: W, skip: bool) -> Self {
        Self { inner, skip }
    }

    pub fn into_inner(self) -> W {
        self.inner
    }

    async fn confirm(&self, prompt: String) -> WalletResult<()> {
        if self.skip {
            return Ok(());
        }
        let approved = tokio::task::spawn_blocking(move || {
            Confirm::new().with_prompt(prompt).default(false).interact()
        })
        .await
        .map_err(|err| WalletError::Rejected(err.to_string()))?
        .map_err(|err| WalletError::Rejected(err.to_string()))?;
        if !approved {
            return Err(WalletError::Rejected("User denied the request.".to_string()));
        }
        Ok(())
    }
}

fn describe(tx: &TransactionRequest) -> String {
    let value = format_ether(tx.value.unwrap_or_default());
    match tx.to.as_ref().and_then(|kind| kind.to()) {
        Some(to) => format!("Send {value} ETH to {to}?"),
        None => format!("Deploy a contract with {value} ETH?"),
    }
}

#[async_trait]
impl<W: WalletProvider> WalletProvider for ConfirmingWallet<W> {
    async fn accounts(&self) -> WalletResult<Vec<Address>> {
        self.inner.accounts().await
    }

    async fn request_accounts(&self) -> WalletResult<Vec<Address>> {
        let accounts = self.inner.request_accounts().await?;
        if let Some(account) = accounts.first() {
            self.confirm(format!("Connect with account {account}?")).await?;
        }
        Ok(accounts)
    }

    async fn send_transaction(&self, tx: TransactionRequest) -> WalletResult<TxHash> {
        self.confirm(describe(&tx)).await?;
        self.inner.send_transaction(tx).await
    }

    async fn wait_for_inclusion(&self, tx_hash: TxHash) -> WalletResult<Inclusion> {
        self.inner.wait_for_inclusion(tx_hash).await
    }

    async fn call(&self, tx: TransactionRequest) -> WalletResult<Bytes> {
        self.inner.call(tx).await
    }

    async fn watch_logs(&self, filter: Filter) -> WalletResult<LogStream> {
        self.inner.watch_logs(filter).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_primitives::{TxKind, U256, address};
    use coffee_test_utils::MockWallet;

    #[test]
    fn describes_transfers() {
        let tx = TransactionRequest {
            to: Some(TxKind::Call(address!("0x538d713e477C0A18469F0e0Dd13304dDE1979522"))),
            value: Some(U256::from(1_000_000_000_000_000u64)),
            ..Default::default()
        };
        assert_eq!(
            describe(&tx),
            "Send 0.001000000000000000 ETH to 0x538d713e477C0A18469F0e0Dd13304dDE1979522?"
        );
    }

    #[tokio::test]
    async fn skipping_approves_everything() {
        let alice = address!("0xf39Fd6e51aad88F6F4ce6aB8827279cffFb92266");
        let wallet =
            ConfirmingWallet::new(MockWallet::new().with_unauthorized_accounts([alice]), true);
        assert_eq!(wallet.request_accounts().await.unwrap(), vec![alice]);
        wallet.send_transaction(TransactionRequest::default()).await.unwrap();
        assert_eq!(wallet.into_inner().sent_transactions().len(), 1);
    }
}
