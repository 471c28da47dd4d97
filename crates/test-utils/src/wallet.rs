use alloy_primitives::{Address, Bytes, TxHash, TxKind, U256, keccak256};
use alloy_rpc_types::{Filter, Log, TransactionRequest};
use alloy_sol_types::{SolCall, SolEvent};
use alloy_transport::TransportErrorKind;
use async_trait::async_trait;
use coffee_bindings::{BUY_ME_A_COFFEE, Memo, NewMemo, buyCoffeeCall, getMemosCall};
use coffee_wallets::{Inclusion, LogStream, WalletError, WalletProvider, WalletResult};
use futures::{StreamExt, channel::mpsc};
use parking_lot::Mutex;
use std::collections::HashMap;

/// Block timestamp the mock stamps on memos it mines.
pub const DEFAULT_BLOCK_TIMESTAMP: u64 = 1_700_000_000;

/// A decoded `buyCoffee` transaction.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SubmittedTip {
    pub from: Option<Address>,
    pub name: String,
    pub message: String,
    pub value: U256,
}

/// An in-memory wallet and tip contract.
///
/// Mirrors what a browser wallet connected to the real contract does: `getMemos` returns the
/// stored memos, a mined `buyCoffee` stores a memo and emits `NewMemo` to every log watcher.
#[derive(Debug)]
pub struct MockWallet {
    state: Mutex<State>,
}

#[derive(Debug)]
struct State {
    contract: Address,
    accounts: Vec<Address>,
    authorized: bool,
    reject_account_requests: bool,
    reject_transactions: bool,
    revert_transactions: bool,
    fail_reads: bool,
    memos: Vec<Memo>,
    sent: Vec<TransactionRequest>,
    pending: HashMap<TxHash, TransactionRequest>,
    watchers: Vec<mpsc::UnboundedSender<Log>>,
    block_number: u64,
    block_timestamp: u64,
}

impl Default for MockWallet {
    fn default() -> Self {
        Self::new()
    }
}

impl MockWallet {
    /// A wallet with no accounts watching the default deployment.
    pub fn new() -> Self {
        Self {
            state: Mutex::new(State {
                contract: BUY_ME_A_COFFEE,
                accounts: Vec::new(),
                authorized: true,
                reject_account_requests: false,
                reject_transactions: false,
                revert_transactions: false,
                fail_reads: false,
                memos: Vec::new(),
                sent: Vec::new(),
                pending: HashMap::new(),
                watchers: Vec::new(),
                block_number: 1,
                block_timestamp: DEFAULT_BLOCK_TIMESTAMP,
            }),
        }
    }

    /// Accounts that are already authorized.
    pub fn with_accounts(mut self, accounts: impl IntoIterator<Item = Address>) -> Self {
        let state = self.state.get_mut();
        state.accounts = accounts.into_iter().collect();
        state.authorized = true;
        self
    }

    /// Accounts that only become visible once the user grants access.
    pub fn with_unauthorized_accounts(
        mut self,
        accounts: impl IntoIterator<Item = Address>,
    ) -> Self {
        let state = self.state.get_mut();
        state.accounts = accounts.into_iter().collect();
        state.authorized = false;
        self
    }

    /// Memos already stored by the contract.
    pub fn with_memos(mut self, memos: impl IntoIterator<Item = Memo>) -> Self {
        self.state.get_mut().memos = memos.into_iter().collect();
        self
    }

    /// Address the mock contract is deployed at.
    pub fn with_contract(mut self, contract: Address) -> Self {
        self.state.get_mut().contract = contract;
        self
    }

    /// Timestamp stamped on memos mined from now on.
    pub fn with_block_timestamp(mut self, timestamp: u64) -> Self {
        self.state.get_mut().block_timestamp = timestamp;
        self
    }

    /// The user declines every account request.
    pub fn rejecting_account_requests(mut self) -> Self {
        self.state.get_mut().reject_account_requests = true;
        self
    }

    /// The user declines every transaction.
    pub fn rejecting_transactions(mut self) -> Self {
        self.state.get_mut().reject_transactions = true;
        self
    }

    /// Transactions are mined but revert.
    pub fn reverting_transactions(mut self) -> Self {
        self.state.get_mut().revert_transactions = true;
        self
    }

    /// Every `eth_call` fails with a transport error.
    pub fn failing_reads(mut self) -> Self {
        self.state.get_mut().fail_reads = true;
        self
    }

    /// Toggles transaction rejection on a shared wallet.
    pub fn set_reject_transactions(&self, reject: bool) {
        self.state.lock().reject_transactions = reject;
    }

    /// Every transaction submitted so far.
    pub fn sent_transactions(&self) -> Vec<TransactionRequest> {
        self.state.lock().sent.clone()
    }

    /// Every `buyCoffee` call submitted so far, decoded.
    pub fn submitted_tips(&self) -> Vec<SubmittedTip> {
        self.state
            .lock()
            .sent
            .iter()
            .filter_map(|tx| {
                let call = buyCoffeeCall::abi_decode(tx.input.input()?).ok()?;
                Some(SubmittedTip {
                    from: tx.from,
                    name: call._name,
                    message: call._message,
                    value: tx.value.unwrap_or_default(),
                })
            })
            .collect()
    }

    /// Memos currently stored by the contract.
    pub fn memos(&self) -> Vec<Memo> {
        self.state.lock().memos.clone()
    }

    /// Number of log watchers that are still listening.
    pub fn watcher_count(&self) -> usize {
        let mut state = self.state.lock();
        state.watchers.retain(|tx| !tx.is_closed());
        state.watchers.len()
    }

    /// Stores a memo and emits `NewMemo`, as if another user had tipped.
    ///
    /// Returns the number of watchers the event was delivered to.
    pub fn emit_new_memo(
        &self,
        from: Address,
        timestamp: u64,
        name: impl Into<String>,
        message: impl Into<String>,
    ) -> usize {
        let memo = Memo {
            from,
            timestamp: U256::from(timestamp),
            name: name.into(),
            message: message.into(),
        };
        self.state.lock().store_and_emit(memo)
    }
}

impl State {
    fn store_and_emit(&mut self, memo: Memo) -> usize {
        let event = NewMemo {
            from: memo.from,
            timestamp: memo.timestamp,
            name: memo.name.clone(),
            message: memo.message.clone(),
        };
        let log = Log {
            inner: alloy_primitives::Log { address: self.contract, data: event.encode_log_data() },
            block_number: Some(self.block_number),
            ..Default::default()
        };
        self.memos.push(memo);
        self.watchers.retain(|tx| tx.unbounded_send(log.clone()).is_ok());
        trace!(watchers = self.watchers.len(), "emitted NewMemo");
        self.watchers.len()
    }

    fn targets_contract(&self, tx: &TransactionRequest) -> bool {
        tx.to == Some(TxKind::Call(self.contract))
    }
}

fn transport_error(msg: &'static str) -> WalletError {
    WalletError::Transport(TransportErrorKind::custom_str(msg))
}

#[async_trait]
impl WalletProvider for MockWallet {
    async fn accounts(&self) -> WalletResult<Vec<Address>> {
        let state = self.state.lock();
        Ok(if state.authorized { state.accounts.clone() } else { Vec::new() })
    }

    async fn request_accounts(&self) -> WalletResult<Vec<Address>> {
        let mut state = self.state.lock();
        if state.reject_account_requests {
            return Err(WalletError::Rejected("User rejected the request.".to_string()));
        }
        if state.accounts.is_empty() {
            return Err(WalletError::NoAccounts);
        }
        state.authorized = true;
        Ok(state.accounts.clone())
    }

    async fn send_transaction(&self, tx: TransactionRequest) -> WalletResult<TxHash> {
        let mut state = self.state.lock();
        if state.reject_transactions {
            return Err(WalletError::Rejected(
                "MetaMask Tx Signature: User denied transaction signature.".to_string(),
            ));
        }
        state.sent.push(tx.clone());
        let tx_hash = keccak256(state.sent.len().to_be_bytes());
        state.pending.insert(tx_hash, tx);
        Ok(tx_hash)
    }

    async fn wait_for_inclusion(&self, tx_hash: TxHash) -> WalletResult<Inclusion> {
        let mut state = self.state.lock();
        let Some(tx) = state.pending.remove(&tx_hash) else {
            return Err(transport_error("transaction not found"));
        };
        state.block_number += 1;
        let block_number = Some(state.block_number);
        if state.revert_transactions {
            return Ok(Inclusion { tx_hash, block_number, success: false });
        }
        if state.targets_contract(&tx)
            && let Some(call) =
                tx.input.input().and_then(|input| buyCoffeeCall::abi_decode(input).ok())
        {
            let memo = Memo {
                from: tx.from.unwrap_or_default(),
                timestamp: U256::from(state.block_timestamp),
                name: call._name,
                message: call._message,
            };
            state.store_and_emit(memo);
        }
        Ok(Inclusion { tx_hash, block_number, success: true })
    }

    async fn call(&self, tx: TransactionRequest) -> WalletResult<Bytes> {
        let state = self.state.lock();
        if state.fail_reads {
            return Err(transport_error("connection refused"));
        }
        let input = tx.input.input().cloned().unwrap_or_default();
        if !state.targets_contract(&tx) || !input.starts_with(&getMemosCall::SELECTOR) {
            return Err(transport_error("execution reverted"));
        }
        Ok(getMemosCall::abi_encode_returns(&state.memos).into())
    }

    async fn watch_logs(&self, _filter: Filter) -> WalletResult<LogStream> {
        let (tx, rx) = mpsc::unbounded();
        self.state.lock().watchers.push(tx);
        Ok(rx.boxed())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_primitives::address;

    const ALICE: Address = address!("0xf39Fd6e51aad88F6F4ce6aB8827279cffFb92266");

    fn tip_tx(name: &str, message: &str) -> TransactionRequest {
        let input = buyCoffeeCall { _name: name.into(), _message: message.into() }.abi_encode();
        TransactionRequest {
            from: Some(ALICE),
            to: Some(TxKind::Call(BUY_ME_A_COFFEE)),
            value: Some(U256::from(1)),
            input: Bytes::from(input).into(),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn mined_tip_is_stored_and_emitted() {
        let wallet = MockWallet::new().with_accounts([ALICE]);
        let mut logs = wallet.watch_logs(Filter::new()).await.unwrap();

        let hash = wallet.send_transaction(tip_tx("bob", "thanks")).await.unwrap();
        let inclusion = wallet.wait_for_inclusion(hash).await.unwrap();
        assert!(inclusion.success);

        let log = logs.next().await.unwrap();
        let event = NewMemo::decode_log_data(log.data()).unwrap();
        assert_eq!(event.from, ALICE);
        assert_eq!(event.name, "bob");
        assert_eq!(wallet.memos().len(), 1);
        assert_eq!(wallet.submitted_tips()[0].value, U256::from(1));
    }

    #[tokio::test]
    async fn unauthorized_accounts_need_a_request() {
        let wallet = MockWallet::new().with_unauthorized_accounts([ALICE]);
        assert!(wallet.accounts().await.unwrap().is_empty());
        assert_eq!(wallet.request_accounts().await.unwrap(), vec![ALICE]);
        assert_eq!(wallet.accounts().await.unwrap(), vec![ALICE]);
    }

    #[tokio::test]
    async fn dropped_watchers_are_pruned() {
        let wallet = MockWallet::new();
        let logs = wallet.watch_logs(Filter::new()).await.unwrap();
        assert_eq!(wallet.watcher_count(), 1);
        drop(logs);
        assert_eq!(wallet.watcher_count(), 0);
        assert_eq!(wallet.emit_new_memo(ALICE, 1, "a", "b"), 0);
    }
}
