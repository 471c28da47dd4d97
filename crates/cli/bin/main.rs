#[macro_use]
extern crate tracing;

use clap::Parser;
use coffee_cli::{handler, utils};
use eyre::Result;

mod args;
mod cmd;

use args::{Coffee, CoffeeSubcommand};
use cmd::Context;

fn main() -> Result<()> {
    handler::install();
    utils::load_dotenv();
    let args = Coffee::parse();
    utils::subscriber(args.shell);
    utils::enable_paint();
    main_args(args)
}

#[tokio::main]
async fn main_args(args: Coffee) -> Result<()> {
    let ctx = Context::load(&args.opts, &args.wallet).await?;
    match args.cmd {
        CoffeeSubcommand::Connect => cmd::connect::run(ctx.confirming_client(args.yes)?).await,
        CoffeeSubcommand::Memos { json } => cmd::memos::run(ctx.client()?, json).await,
        CoffeeSubcommand::Tip(tip) => tip.run(ctx.confirming_client(args.yes)?).await,
        CoffeeSubcommand::Watch => cmd::watch::run(ctx.client()?).await,
        CoffeeSubcommand::App => cmd::app::run(ctx.client()?).await,
    }
}
