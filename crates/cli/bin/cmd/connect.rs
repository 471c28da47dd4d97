use super::report;
use coffee_dapp::{ChainClient, WalletProvider};
use eyre::Result;

pub async fn run<W: WalletProvider>(client: ChainClient<W>) -> Result<()> {
    match client.check_wallet_connected().await.map_err(report)? {
        Some(account) => debug!(%account, "already authorized"),
        None => debug!("no authorized account, requesting access"),
    }
    let account = client.connect().await.map_err(report)?;
    println!("{account}");
    Ok(())
}
