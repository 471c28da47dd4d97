use alloy_primitives::Address;
use clap::Parser;
use coffee_config::{
    Config,
    figment::{
        self, Figment, Metadata, Profile,
        value::{Dict, Map, Value},
    },
};

/// Settings that can be given on the command line.
///
/// Merged on top of [`Config::figment`], so a flag beats both `coffee.toml` and the environment.
#[derive(Clone, Debug, Default, Parser)]
#[command(next_help_heading = "Contract options")]
pub struct CoffeeOpts {
    /// The JSON-RPC endpoint of the wallet.
    #[arg(long, short = 'r', global = true, value_name = "URL")]
    pub rpc_url: Option<String>,

    /// The address of the tip contract.
    #[arg(long, global = true, value_name = "ADDRESS")]
    pub contract: Option<Address>,

    /// The amount of ether attached to every tip.
    #[arg(long, global = true, value_name = "ETHER")]
    pub amount: Option<String>,
}

impl CoffeeOpts {
    pub fn dict(&self) -> Dict {
        let mut dict = Dict::new();
        if let Some(url) = &self.rpc_url {
            dict.insert("eth_rpc_url".into(), Value::from(url.clone()));
        }
        if let Some(contract) = self.contract {
            dict.insert("contract".into(), Value::from(contract.to_string()));
        }
        if let Some(amount) = &self.amount {
            dict.insert("tip_amount".into(), Value::from(amount.clone()));
        }
        dict
    }

    pub fn figment(&self) -> Figment {
        Config::figment().merge(self.clone())
    }

    /// Loads and validates the config with these options applied.
    pub fn load_config(&self) -> eyre::Result<Config> {
        let config = Config::try_from(self.figment())?;
        config.validate()?;
        Ok(config)
    }
}

impl figment::Provider for CoffeeOpts {
    fn metadata(&self) -> Metadata {
        Metadata::named("CoffeeOpts")
    }

    fn data(&self) -> Result<Map<Profile, Dict>, figment::Error> {
        // env settings are global, flags have to be as well to take precedence
        Ok(Map::from([(Profile::Global, self.dict())]))
    }
}

/// Global logging options.
#[derive(Clone, Copy, Debug, Default, Parser)]
pub struct ShellOpts {
    /// Verbosity level of the log messages.
    ///
    /// Pass multiple times to increase the verbosity (e.g. -v, -vv, -vvv).
    ///
    /// Overridden by `RUST_LOG`.
    #[arg(long, short, global = true, action = clap::ArgAction::Count, conflicts_with = "quiet")]
    pub verbosity: u8,

    /// Do not print log messages.
    #[arg(long, short, global = true, alias = "silent")]
    pub quiet: bool,
}

impl ShellOpts {
    /// The default log filter for this verbosity.
    pub fn log_directive(self) -> &'static str {
        if self.quiet {
            return "off";
        }
        match self.verbosity {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    }
}
