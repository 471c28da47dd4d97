//! # coffee-dapp
//!
//! Wallet session and memo synchronization for the Buy Me A Coffee client.
//!
//! [`ChainClient`] turns user intents into wallet calls against the tip contract. [`TipJar`] is
//! the page: it owns the session, the memo feed and the draft tip, keeps the feed in sync with
//! `NewMemo` events while mounted, and logs failures instead of returning them.

#![cfg_attr(not(test), warn(unused_crate_dependencies))]

#[macro_use]
extern crate tracing;

pub mod client;
pub use client::{ChainClient, Subscription, TipDefaults};

pub mod error;
pub use error::{ClientError, ErrorKind, Operation};

mod memo;
pub use memo::{Memo, MemoList};

pub mod page;
pub use page::{LogNotifier, Notifier, PageState, TipJar};

mod session;
pub use session::{DraftTip, Session};

pub mod view;

pub use coffee_wallets::{Inclusion, WalletProvider};
