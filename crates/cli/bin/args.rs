use crate::cmd::tip::TipArgs;
use clap::{Parser, Subcommand};
use coffee_cli::opts::{CoffeeOpts, ShellOpts};
use coffee_wallets::WalletOpts;

/// Buy a creator a coffee on Ethereum and read the memos supporters left.
#[derive(Parser)]
#[command(
    name = "coffee",
    version,
    after_help = "Settings are read from coffee.toml and COFFEE_* environment variables.",
    next_display_order = None,
)]
pub struct Coffee {
    #[command(subcommand)]
    pub cmd: CoffeeSubcommand,

    #[command(flatten)]
    pub shell: ShellOpts,

    #[command(flatten)]
    pub opts: CoffeeOpts,

    #[command(flatten)]
    pub wallet: WalletOpts,

    /// Approve account and transaction requests without asking.
    #[arg(long, short, global = true)]
    pub yes: bool,
}

#[derive(Subcommand)]
pub enum CoffeeSubcommand {
    /// Request account access and print the connected account.
    Connect,

    /// Print every memo, newest first.
    #[command(visible_alias = "m")]
    Memos {
        /// Print the memos as JSON, in the order they were stored.
        #[arg(long, short)]
        json: bool,
    },

    /// Buy a coffee.
    #[command(visible_alias = "t")]
    Tip(TipArgs),

    /// Print new memos as they arrive.
    #[command(visible_alias = "w")]
    Watch,

    /// Open the interactive tip jar.
    App,
}
