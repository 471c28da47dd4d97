use coffee_cli::{confirm::ConfirmingWallet, opts::CoffeeOpts};
use coffee_config::Config;
use coffee_dapp::{ChainClient, ClientError, ErrorKind};
use coffee_wallets::{RpcWallet, WalletOpts};
use eyre::Result;

pub mod app;
pub mod connect;
pub mod memos;
pub mod tip;
pub mod watch;

/// The config and wallet every command starts from.
pub struct Context {
    pub config: Config,
    pub wallet: Option<RpcWallet>,
}

impl Context {
    pub async fn load(opts: &CoffeeOpts, wallet: &WalletOpts) -> Result<Self> {
        let config = opts.load_config()?;
        let wallet = RpcWallet::from_config(&config, wallet).await?;
        if wallet.is_none() {
            debug!("no rpc url configured, running without a wallet");
        }
        Ok(Self { config, wallet })
    }

    pub fn client(self) -> Result<ChainClient<RpcWallet>> {
        Ok(ChainClient::from_config(self.wallet, &self.config)?)
    }

    /// A client that asks before granting accounts or signing, unless `yes` is set.
    pub fn confirming_client(self, yes: bool) -> Result<ChainClient<ConfirmingWallet<RpcWallet>>> {
        let wallet = self.wallet.map(|wallet| ConfirmingWallet::new(wallet, yes));
        Ok(ChainClient::from_config(wallet, &self.config)?)
    }
}

/// Converts a client error into a report, telling the user how to configure a missing wallet.
pub fn report(err: ClientError) -> eyre::Report {
    match err.kind() {
        ErrorKind::WalletAbsent => {
            eyre::eyre!("{err}: pass --rpc-url or set ETH_RPC_URL to use a wallet")
        }
        _ => err.into(),
    }
}
