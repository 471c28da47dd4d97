use crate::utils;
use alloy_signer_local::PrivateKeySigner;
use clap::Parser;
use eyre::Result;
use std::path::PathBuf;

/// Options for the local signer.
///
/// Without any of them the node's own accounts are used, which only works against endpoints with
/// unlocked accounts such as a local dev node.
#[derive(Clone, Debug, Default, Parser)]
#[command(next_help_heading = "Wallet options")]
pub struct WalletOpts {
    /// Use the provided private key.
    #[arg(long, value_name = "RAW_PRIVATE_KEY", env = "COFFEE_PRIVATE_KEY")]
    pub private_key: Option<String>,

    /// Use the keystore at the given path.
    #[arg(
        long,
        value_name = "PATH",
        env = "COFFEE_KEYSTORE",
        conflicts_with = "private_key"
    )]
    pub keystore: Option<PathBuf>,

    /// The keystore password.
    ///
    /// Prompted for when omitted.
    #[arg(long, requires = "keystore", value_name = "PASSWORD", env = "COFFEE_PASSWORD")]
    pub password: Option<String>,

    /// File containing the keystore password.
    #[arg(long, requires = "keystore", conflicts_with = "password", value_name = "PASSWORD_FILE")]
    pub password_file: Option<PathBuf>,
}

impl WalletOpts {
    /// Builds the local signer, if one was configured.
    pub fn signer(&self) -> Result<Option<PrivateKeySigner>> {
        if let Some(private_key) = &self.private_key {
            trace!("using private key signer");
            return utils::create_private_key_signer(private_key).map(Some);
        }
        if let Some(path) = &self.keystore {
            trace!(?path, "using keystore signer");
            return utils::create_keystore_signer(
                path,
                self.password.as_deref(),
                self.password_file.as_deref(),
            )
            .map(Some);
        }
        Ok(None)
    }

    /// Returns `true` if a local signer was configured.
    pub fn has_signer(&self) -> bool {
        self.private_key.is_some() || self.keystore.is_some()
    }
}
