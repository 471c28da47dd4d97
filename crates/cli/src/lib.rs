//! # coffee-cli
//!
//! Shared pieces of the `coffee` binary: error reporting, global options and the terminal side
//! of the wallet.

#![cfg_attr(not(test), warn(unused_crate_dependencies))]

#[macro_use]
extern crate tracing;

pub mod confirm;
pub mod handler;
pub mod opts;
pub mod shell;
pub mod utils;

// `coffee memos --json`
use serde_json as _;
