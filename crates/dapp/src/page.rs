//! The tip jar page.
//!
//! [`TipJar`] owns the page state and turns user intents into [`ChainClient`] calls. Failed wallet
//! calls are logged and handed to the [`Notifier`], they never reach the caller.

use crate::{ChainClient, ClientError, DraftTip, MemoList, Session, Subscription, view};
use alloy_primitives::{Address, TxHash};
use coffee_wallets::WalletProvider;
use parking_lot::Mutex;
use std::sync::Arc;
use tokio::sync::Notify;

/// Shown when the page loads and no account is authorized.
pub const CONNECT_WALLET_NOTICE: &str = "Make sure your wallet is connected";

/// Shown when the user tries to connect without a wallet.
pub const INSTALL_WALLET_NOTICE: &str = "Please install a wallet";

/// Surfaces messages to the user.
pub trait Notifier: Send + Sync + 'static {
    /// Shows a blocking notice.
    fn alert(&self, message: &str);

    /// Called for every failed wallet call after it has been logged.
    fn error(&self, _error: &ClientError) {}
}

/// A [`Notifier`] that only logs.
#[derive(Clone, Copy, Debug, Default)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn alert(&self, message: &str) {
        warn!(target: "coffee::alert", "{message}");
    }
}

impl<N: Notifier + ?Sized> Notifier for Arc<N> {
    fn alert(&self, message: &str) {
        (**self).alert(message)
    }

    fn error(&self, error: &ClientError) {
        (**self).error(error)
    }
}

/// Everything the page shows.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PageState {
    pub session: Session,
    pub memos: MemoList,
    pub draft: DraftTip,
}

/// The single page of the dapp.
pub struct TipJar<W, N = LogNotifier> {
    client: ChainClient<W>,
    notifier: N,
    state: Arc<Mutex<PageState>>,
    changed: Arc<Notify>,
    subscription: Mutex<Option<Subscription>>,
}

impl<W: WalletProvider> TipJar<W> {
    pub fn new(client: ChainClient<W>) -> Self {
        Self::with_notifier(client, LogNotifier)
    }
}

impl<W: WalletProvider, N: Notifier> TipJar<W, N> {
    pub fn with_notifier(client: ChainClient<W>, notifier: N) -> Self {
        Self {
            client,
            notifier,
            state: Default::default(),
            changed: Arc::new(Notify::new()),
            subscription: Mutex::new(None),
        }
    }

    pub fn client(&self) -> &ChainClient<W> {
        &self.client
    }

    /// Loads the page: checks for an authorized account, reads every memo and starts listening
    /// for new ones.
    pub async fn mount(&self) {
        self.check_wallet_connected().await;
        self.refresh().await;
        self.subscribe().await;
    }

    /// Stops listening for new memos.
    ///
    /// Once this returns the feed no longer changes on `NewMemo`.
    pub fn unmount(&self) {
        if let Some(subscription) = self.subscription.lock().take() {
            subscription.unsubscribe();
            debug!("page unmounted");
        }
    }

    /// Whether the page is listening for new memos.
    pub fn is_subscribed(&self) -> bool {
        self.subscription.lock().as_ref().is_some_and(Subscription::is_active)
    }

    async fn check_wallet_connected(&self) {
        match self.client.check_wallet_connected().await {
            Ok(Some(account)) => info!(%account, "wallet is connected"),
            Ok(None) => {
                info!("no authorized account");
                self.notifier.alert(CONNECT_WALLET_NOTICE);
            }
            Err(err) => self.report(&err),
        }
    }

    /// Asks the wallet for an account and records it in the session.
    pub async fn connect(&self) -> Option<Address> {
        match self.client.connect().await {
            Ok(account) => {
                self.update(|state| state.session.connect(account));
                info!(%account, "connected");
                Some(account)
            }
            Err(err) => {
                if matches!(err, ClientError::WalletUnavailable) {
                    self.notifier.alert(INSTALL_WALLET_NOTICE);
                }
                self.report(&err);
                None
            }
        }
    }

    /// Sends the draft as a tip.
    ///
    /// Clears the draft once the tip is mined. On failure the draft is kept.
    pub async fn submit_tip(&self) -> Option<TxHash> {
        let (from, draft) = {
            let state = self.state.lock();
            (state.session.account(), state.draft.clone())
        };
        match self.client.submit_tip(from, &draft.name, &draft.message).await {
            Ok(inclusion) => {
                info!(tx_hash = %inclusion.tx_hash, "coffee purchased!");
                self.update(|state| state.draft.clear());
                Some(inclusion.tx_hash)
            }
            Err(err) => {
                self.report(&err);
                None
            }
        }
    }

    /// Replaces the feed with a fresh read of every memo.
    pub async fn refresh(&self) {
        match self.client.fetch_memos().await {
            Ok(memos) => self.update(|state| state.memos.replace(memos)),
            Err(err) => self.report(&err),
        }
    }

    async fn subscribe(&self) {
        if !self.client.has_wallet() {
            debug!("no wallet, not subscribing to new memos");
            return;
        }
        if self.is_subscribed() {
            return;
        }
        let state = Arc::clone(&self.state);
        let changed = Arc::clone(&self.changed);
        let handler = move |memo| {
            state.lock().memos.push(memo);
            changed.notify_one();
        };
        match self.client.subscribe_new_memos(handler).await {
            Ok(subscription) => *self.subscription.lock() = Some(subscription),
            Err(err) => self.report(&err),
        }
    }

    pub fn set_name(&self, name: impl Into<String>) {
        let name = name.into();
        self.update(|state| state.draft.name = name);
    }

    pub fn set_message(&self, message: impl Into<String>) {
        let message = message.into();
        self.update(|state| state.draft.message = message);
    }

    /// Returns a copy of the current state.
    pub fn snapshot(&self) -> PageState {
        self.state.lock().clone()
    }

    /// Renders the current state.
    pub fn render(&self) -> String {
        let defaults = self.client.defaults();
        let tip = view::format_tip(self.client.tip_value());
        let ctx = view::ViewContext {
            tip: &tip,
            default_name: &defaults.name,
            default_message: &defaults.message,
        };
        view::render(&self.snapshot(), &ctx)
    }

    /// Notified whenever the state changes.
    pub fn changed(&self) -> Arc<Notify> {
        Arc::clone(&self.changed)
    }

    fn update(&self, f: impl FnOnce(&mut PageState)) {
        f(&mut self.state.lock());
        self.changed.notify_one();
    }

    fn report(&self, err: &ClientError) {
        error!(%err, kind = ?err.kind(), "wallet call failed");
        self.notifier.error(err);
    }
}

impl<W, N> std::fmt::Debug for TipJar<W, N> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TipJar").field("state", &*self.state.lock()).finish_non_exhaustive()
    }
}
