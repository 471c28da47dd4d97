//! Wallet calls against the tip contract.

use crate::{ClientError, Memo, Operation};
use alloy_network::TransactionBuilder;
use alloy_primitives::{Address, U256};
use alloy_rpc_types::{Filter, TransactionRequest};
use alloy_sol_types::{SolCall, SolEvent};
use coffee_bindings::{NewMemo, buyCoffeeCall, getMemosCall};
use coffee_config::{Config, InvalidSettingError};
use coffee_wallets::{Inclusion, WalletProvider};
use futures::StreamExt;
use parking_lot::Mutex;
use std::sync::Arc;
use tokio::task::JoinHandle;

/// Substitutes for empty form fields.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TipDefaults {
    pub name: String,
    pub message: String,
}

impl Default for TipDefaults {
    fn default() -> Self {
        Self { name: "anon".to_string(), message: "Enjoy your coffee!".to_string() }
    }
}

/// Talks to the tip contract through a wallet.
///
/// The wallet is optional: without one every operation fails with
/// [`ClientError::WalletUnavailable`].
#[derive(Debug)]
pub struct ChainClient<W> {
    wallet: Option<Arc<W>>,
    contract: Address,
    tip_value: U256,
    defaults: TipDefaults,
}

impl<W> Clone for ChainClient<W> {
    fn clone(&self) -> Self {
        Self {
            wallet: self.wallet.clone(),
            contract: self.contract,
            tip_value: self.tip_value,
            defaults: self.defaults.clone(),
        }
    }
}

impl<W: WalletProvider> ChainClient<W> {
    pub fn new(wallet: Option<W>, contract: Address, tip_value: U256) -> Self {
        Self { wallet: wallet.map(Arc::new), contract, tip_value, defaults: TipDefaults::default() }
    }

    /// Creates a client with the contract, tip amount and defaults from `config`.
    pub fn from_config(wallet: Option<W>, config: &Config) -> Result<Self, InvalidSettingError> {
        Ok(Self::new(wallet, config.contract, config.tip_value()?).with_defaults(TipDefaults {
            name: config.default_name.clone(),
            message: config.default_message.clone(),
        }))
    }

    pub fn with_defaults(mut self, defaults: TipDefaults) -> Self {
        self.defaults = defaults;
        self
    }

    pub fn has_wallet(&self) -> bool {
        self.wallet.is_some()
    }

    pub fn wallet(&self) -> Option<&Arc<W>> {
        self.wallet.as_ref()
    }

    pub fn contract(&self) -> Address {
        self.contract
    }

    /// The wei attached to every tip.
    pub fn tip_value(&self) -> U256 {
        self.tip_value
    }

    pub fn defaults(&self) -> &TipDefaults {
        &self.defaults
    }

    fn require_wallet(&self) -> Result<&Arc<W>, ClientError> {
        self.wallet.as_ref().ok_or(ClientError::WalletUnavailable)
    }

    /// Returns the first already authorized account, without prompting the user.
    pub async fn check_wallet_connected(&self) -> Result<Option<Address>, ClientError> {
        let wallet = self.require_wallet()?;
        let accounts = wallet
            .accounts()
            .await
            .map_err(|err| ClientError::wallet(Operation::CheckAccounts, err))?;
        Ok(accounts.first().copied())
    }

    /// Asks the wallet for account access and returns the first granted account.
    pub async fn connect(&self) -> Result<Address, ClientError> {
        let wallet = self.require_wallet()?;
        let accounts = wallet
            .request_accounts()
            .await
            .map_err(|err| ClientError::wallet(Operation::Connect, err))?;
        accounts.first().copied().ok_or_else(|| {
            ClientError::wallet(Operation::Connect, coffee_wallets::WalletError::NoAccounts)
        })
    }

    /// Builds the `buyCoffee` transaction, substituting defaults for empty fields.
    pub fn tip_request(
        &self,
        from: Option<Address>,
        name: &str,
        message: &str,
    ) -> TransactionRequest {
        let call = buyCoffeeCall {
            _name: or_default(name, &self.defaults.name),
            _message: or_default(message, &self.defaults.message),
        };
        let tx = TransactionRequest::default()
            .with_to(self.contract)
            .with_value(self.tip_value)
            .with_input(call.abi_encode());
        match from {
            Some(from) => tx.with_from(from),
            None => tx,
        }
    }

    /// Sends a tip and waits until it is mined.
    ///
    /// A mined transaction that reverted is an error.
    pub async fn submit_tip(
        &self,
        from: Option<Address>,
        name: &str,
        message: &str,
    ) -> Result<Inclusion, ClientError> {
        let wallet = self.require_wallet()?;
        let tx = self.tip_request(from, name, message);
        info!(contract = %self.contract, value = %self.tip_value, "buying coffee..");
        let tx_hash = wallet
            .send_transaction(tx)
            .await
            .map_err(|err| ClientError::wallet(Operation::SubmitTip, err))?;
        debug!(%tx_hash, "tip submitted, waiting for inclusion");
        let inclusion = wallet
            .wait_for_inclusion(tx_hash)
            .await
            .map_err(|err| ClientError::wallet(Operation::SubmitTip, err))?;
        if !inclusion.success {
            return Err(ClientError::Reverted(tx_hash));
        }
        info!(%tx_hash, block = ?inclusion.block_number, "mined");
        Ok(inclusion)
    }

    /// Reads every stored memo, oldest first.
    pub async fn fetch_memos(&self) -> Result<Vec<Memo>, ClientError> {
        let wallet = self.require_wallet()?;
        debug!("fetching memos from the blockchain..");
        let tx = TransactionRequest::default()
            .with_to(self.contract)
            .with_input(getMemosCall {}.abi_encode());
        let output =
            wallet.call(tx).await.map_err(|err| ClientError::wallet(Operation::FetchMemos, err))?;
        let memos = getMemosCall::abi_decode_returns(&output)
            .map_err(|source| ClientError::Decode { operation: Operation::FetchMemos, source })?;
        debug!(count = memos.len(), "fetched memos");
        Ok(memos.into_iter().map(Memo::from).collect())
    }

    /// Calls `handler` with every `NewMemo` the contract emits until the returned
    /// [`Subscription`] is cancelled or dropped.
    ///
    /// Logs that fail to decode are skipped. `handler` must not cancel its own subscription.
    pub async fn subscribe_new_memos<F>(&self, mut handler: F) -> Result<Subscription, ClientError>
    where
        F: FnMut(Memo) + Send + 'static,
    {
        let wallet = self.require_wallet()?;
        let filter = Filter::new().address(self.contract).event_signature(NewMemo::SIGNATURE_HASH);
        let mut logs = wallet
            .watch_logs(filter)
            .await
            .map_err(|err| ClientError::wallet(Operation::Subscribe, err))?;

        let active = Arc::new(Mutex::new(true));
        let task = tokio::spawn({
            let active = Arc::clone(&active);
            async move {
                while let Some(log) = logs.next().await {
                    let memo = match NewMemo::decode_log_data(log.data()) {
                        Ok(event) => {
                            trace!(from = %event.from, name = %event.name, "memo received");
                            Memo::from(event)
                        }
                        Err(err) => {
                            warn!(%err, "skipping undecodable NewMemo log");
                            continue;
                        }
                    };
                    // held for the whole handler call so that `cancel` waits for it
                    let running = active.lock();
                    if !*running {
                        break;
                    }
                    handler(memo);
                }
                trace!("memo subscription ended");
            }
        });
        debug!(contract = %self.contract, "subscribed to NewMemo");
        Ok(Subscription { active, task: Some(task) })
    }
}

fn or_default(value: &str, default: &str) -> String {
    if value.is_empty() { default } else { value }.to_string()
}

/// A live `NewMemo` subscription.
///
/// [`unsubscribe`](Self::unsubscribe) waits for a handler call in progress, and no handler runs
/// once it returns. Dropping the subscription also cancels it.
#[derive(Debug)]
#[must_use = "the subscription is cancelled when dropped"]
pub struct Subscription {
    active: Arc<Mutex<bool>>,
    task: Option<JoinHandle<()>>,
}

impl Subscription {
    pub fn unsubscribe(mut self) {
        self.cancel();
    }

    pub fn is_active(&self) -> bool {
        *self.active.lock()
    }

    fn cancel(&mut self) {
        *self.active.lock() = false;
        if let Some(task) = self.task.take() {
            task.abort();
            trace!("unsubscribed from NewMemo");
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_fields_fall_back_to_defaults() {
        assert_eq!(or_default("", "anon"), "anon");
        assert_eq!(or_default(" ", "anon"), " ");
        assert_eq!(or_default("bob", "anon"), "bob");
    }
}
