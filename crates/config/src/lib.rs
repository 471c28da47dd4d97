//! # coffee-config
//!
//! Configuration of the Buy Me A Coffee client.
//!
//! Settings are layered with [`figment`], lowest precedence first:
//!
//! 1. [`Config::default`]
//! 2. `coffee.toml` (or the file named by `COFFEE_CONFIG`), nested by profile
//! 3. `ETH_RPC_URL`
//! 4. `COFFEE_*` environment variables
//!
//! Binaries merge their command line options on top of [`Config::figment`].

#![cfg_attr(not(test), warn(unused_crate_dependencies))]

#[macro_use]
extern crate tracing;

use alloy_primitives::{
    Address, U256,
    utils::{format_ether, parse_ether},
};
use figment::{
    Error, Figment, Metadata, Profile, Provider,
    providers::{Env, Format, Serialized, Toml},
    value::{Dict, Map},
};
use serde::{Deserialize, Serialize};
use std::time::Duration;

pub mod error;
pub use error::{ExtractConfigError, InvalidSettingError};

mod utils;

// reexport so cli types can implement `figment::Provider` to easily merge compiler arguments
pub use figment;

/// Coffee configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// The selected profile. **(default: _default_ `default`)**
    ///
    /// **Note:** This field is never serialized nor deserialized. When a `Config` is merged into
    /// a `Figment` as a `Provider`, this profile is selected on the `Figment`. When a `Config` is
    /// extracted, this field is set to the extracting Figment's selected `Profile`.
    #[serde(skip)]
    pub profile: Profile,
    /// Address of the tip contract.
    pub contract: Address,
    /// JSON-RPC endpoint of the wallet. No endpoint means no wallet.
    pub eth_rpc_url: Option<String>,
    /// Amount attached to every tip, in ether.
    #[serde(deserialize_with = "utils::deserialize_stringified_amount")]
    pub tip_amount: String,
    /// Name sent when the form's name is left empty.
    pub default_name: String,
    /// Message sent when the form's message is left empty.
    pub default_message: String,
    /// Interval in milliseconds between log filter and receipt polls.
    pub poll_interval: u64,
}

impl Config {
    /// The default profile: "default"
    pub const DEFAULT_PROFILE: Profile = Profile::Default;

    /// File name of config toml file
    pub const FILE_NAME: &'static str = "coffee.toml";

    /// Environment variable prefix of all settings.
    pub const ENV_PREFIX: &'static str = "COFFEE_";

    /// Returns the current `Config`.
    ///
    /// See [`Config::figment`] for the providers that are merged.
    pub fn load() -> Result<Self, ExtractConfigError> {
        Self::try_from(Self::figment())
    }

    /// Attempts to extract a `Config` from `provider`, returning the result.
    ///
    /// # Example
    ///
    /// ```rust
    /// use coffee_config::Config;
    /// use figment::providers::{Format, Toml};
    ///
    /// let figment = Config::figment().merge(Toml::file("other.toml").nested());
    /// let config = Config::try_from(figment);
    /// ```
    pub fn try_from<T: Provider>(provider: T) -> Result<Self, ExtractConfigError> {
        let figment = Figment::from(provider);
        let mut config = figment.extract::<Self>().map_err(ExtractConfigError::new)?;
        config.profile = figment.profile().clone();
        trace!(profile = %config.profile, contract = %config.contract, "loaded config");
        Ok(config)
    }

    /// Returns the default figment.
    ///
    /// The returned figment selects [`Config::selected_profile`].
    pub fn figment() -> Figment {
        Figment::from(Self::default())
            .merge(Toml::file(Env::var_or("COFFEE_CONFIG", Self::FILE_NAME)).nested())
            .merge(Env::raw().only(&["ETH_RPC_URL"]).global())
            .merge(
                Env::prefixed(Self::ENV_PREFIX)
                    .ignore(&["PROFILE", "CONFIG", "PRIVATE_KEY", "KEYSTORE", "PASSWORD"])
                    .global(),
            )
            .select(Self::selected_profile())
    }

    /// Returns the selected profile.
    ///
    /// If the `COFFEE_PROFILE` env variable is not set, this returns the `DEFAULT_PROFILE`.
    pub fn selected_profile() -> Profile {
        Profile::from_env_or("COFFEE_PROFILE", Self::DEFAULT_PROFILE)
    }

    /// Returns the tip amount in wei.
    pub fn tip_value(&self) -> Result<U256, InvalidSettingError> {
        let value = parse_ether(self.tip_amount.trim()).map_err(|source| {
            InvalidSettingError::TipAmount { amount: self.tip_amount.clone(), source }
        })?;
        if value.is_zero() {
            return Err(InvalidSettingError::ZeroTip);
        }
        Ok(value)
    }

    /// Returns the tip amount formatted as ether, e.g. `0.001000000000000000`.
    pub fn tip_ether(&self) -> Result<String, InvalidSettingError> {
        self.tip_value().map(format_ether)
    }

    /// Returns the poll interval used for log filters and receipts.
    pub fn poll_interval(&self) -> Result<Duration, InvalidSettingError> {
        if self.poll_interval == 0 {
            return Err(InvalidSettingError::ZeroPollInterval);
        }
        Ok(Duration::from_millis(self.poll_interval))
    }

    /// Returns the configured RPC endpoint, ignoring blank values.
    pub fn rpc_url(&self) -> Option<&str> {
        self.eth_rpc_url.as_deref().map(str::trim).filter(|url| !url.is_empty())
    }

    /// Checks every setting that can be extracted but not used.
    pub fn validate(&self) -> Result<(), InvalidSettingError> {
        self.tip_value()?;
        self.poll_interval()?;
        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            profile: Self::DEFAULT_PROFILE,
            contract: coffee_bindings::BUY_ME_A_COFFEE,
            eth_rpc_url: None,
            tip_amount: "0.001".to_string(),
            default_name: "anon".to_string(),
            default_message: "Enjoy your coffee!".to_string(),
            poll_interval: 1_000,
        }
    }
}

impl Provider for Config {
    fn metadata(&self) -> Metadata {
        Metadata::named("Coffee Config")
    }

    fn data(&self) -> Result<Map<Profile, Dict>, Error> {
        Serialized::defaults(self).data()
    }

    fn profile(&self) -> Option<Profile> {
        Some(self.profile.clone())
    }
}
