//! Utilities for testing the Buy Me A Coffee client without a node.

#![warn(unused_crate_dependencies, unreachable_pub)]

#[macro_use]
extern crate tracing;

mod wallet;
pub use wallet::{DEFAULT_BLOCK_TIMESTAMP, MockWallet, SubmittedTip};

// re-exports for convenience
pub use coffee_bindings;

/// Initializes tracing for tests.
pub fn init_tracing() {
    let _ = tracing_subscriber::FmtSubscriber::builder()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .try_init();
}
