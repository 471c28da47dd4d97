use super::report;
use clap::Parser;
use coffee_dapp::{ChainClient, WalletProvider, view::format_tip};
use eyre::Result;
use yansi::Paint;

/// CLI arguments for `coffee tip`.
#[derive(Clone, Debug, Parser)]
pub struct TipArgs {
    /// Your name. Left empty, the configured default name is sent.
    #[arg(long, short, default_value = "")]
    pub name: String,

    /// A message for the creator. Left empty, the configured default message is sent.
    #[arg(long, short, default_value = "")]
    pub message: String,
}

impl TipArgs {
    pub async fn run<W: WalletProvider>(self, client: ChainClient<W>) -> Result<()> {
        let from = client.connect().await.map_err(report)?;
        eprintln!("Buying a coffee for {} ETH from {from}..", format_tip(client.tip_value()));
        let inclusion =
            client.submit_tip(Some(from), &self.name, &self.message).await.map_err(report)?;
        println!("{} {}", "Coffee purchased!".green(), inclusion.tx_hash);
        if let Some(block) = inclusion.block_number {
            println!("Mined in block {block}");
        }
        Ok(())
    }
}
