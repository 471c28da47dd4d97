//! Plain text rendering of [`PageState`].

use crate::{Memo, PageState};
use alloy_primitives::{U256, utils::format_ether};
use std::fmt::Write;

pub struct ViewContext<'a> {
    /// Tip amount in ether.
    pub tip: &'a str,
    pub default_name: &'a str,
    pub default_message: &'a str,
}

/// Formats wei as ether without trailing zeros, e.g. `0.001`.
pub fn format_tip(value: U256) -> String {
    let ether = format_ether(value);
    match ether.split_once('.') {
        Some((int, frac)) => {
            let frac = frac.trim_end_matches('0');
            if frac.is_empty() { int.to_string() } else { format!("{int}.{frac}") }
        }
        None => ether,
    }
}

/// Renders the page.
///
/// Disconnected sessions only get a connect prompt. Once connected the form and the feed are
/// shown, the feed newest first.
pub fn render(state: &PageState, ctx: &ViewContext<'_>) -> String {
    let mut out = String::from("Buy me a coffee!\n\n");
    let Some(account) = state.session.account() else {
        out.push_str("Connect your wallet to send a tip.\n");
        return out;
    };

    let _ = writeln!(out, "Connected as {account}");
    let _ = writeln!(out, "  Name:    {}", field(&state.draft.name, ctx.default_name));
    let _ = writeln!(out, "  Message: {}", field(&state.draft.message, ctx.default_message));
    let _ = writeln!(out, "  Send 1 coffee for {} ETH", ctx.tip);

    out.push_str("\nMemos received\n");
    if state.memos.is_empty() {
        out.push_str("  (none yet)\n");
    }
    for memo in state.memos.newest_first() {
        render_memo(&mut out, memo);
    }
    out
}

fn field(value: &str, placeholder: &str) -> String {
    if value.is_empty() { format!("({placeholder})") } else { value.to_string() }
}

fn render_memo(out: &mut String, memo: &Memo) {
    let _ = writeln!(out, "  \"{}\"", memo.message);
    let _ = writeln!(out, "    From: {} at {}", memo.name, memo.timestamp);
}
