//! Helpers to build a local signer from user input.

use crate::error::PrivateKeyError;
use alloy_primitives::{B256, hex::FromHex};
use alloy_signer_local::PrivateKeySigner;
use eyre::{Context, Result};
use std::{
    fs,
    path::{Path, PathBuf},
};

fn ensure_pk_not_env(pk: &str) -> Result<()> {
    if !pk.starts_with("0x") && std::env::var(pk).is_ok() {
        return Err(PrivateKeyError::ExistsAsEnvVar(pk.to_string()).into());
    }
    Ok(())
}

/// Validates and sanitizes user inputs, returning the configured [PrivateKeySigner].
pub fn create_private_key_signer(private_key_str: &str) -> Result<PrivateKeySigner> {
    let private_key_str = private_key_str.trim();
    let Ok(private_key) = B256::from_hex(private_key_str) else {
        ensure_pk_not_env(private_key_str)?;
        eyre::bail!("Failed to decode private key")
    };
    match PrivateKeySigner::from_bytes(&private_key) {
        Ok(pk) => Ok(pk),
        Err(err) => {
            ensure_pk_not_env(private_key_str)?;
            eyre::bail!("Failed to create wallet from private key: {err}")
        }
    }
}

/// Decrypts the keystore at `path`.
///
/// The password is taken from `maybe_password`, then from the file at `maybe_password_file`,
/// and finally read from the terminal.
pub fn create_keystore_signer(
    path: &PathBuf,
    maybe_password: Option<&str>,
    maybe_password_file: Option<&Path>,
) -> Result<PrivateKeySigner> {
    if !path.exists() {
        eyre::bail!("Keystore file `{path:?}` does not exist")
    }

    if path.is_dir() {
        eyre::bail!(
            "Keystore path `{path:?}` is a directory. Please specify the keystore file directly."
        )
    }

    let password = match (maybe_password, maybe_password_file) {
        (Some(password), _) => password.to_string(),
        (_, Some(password_file)) => {
            if !password_file.is_file() {
                eyre::bail!("Keystore password file `{password_file:?}` does not exist")
            }
            fs::read_to_string(password_file)
                .wrap_err_with(|| {
                    format!("Failed to read keystore password file at {password_file:?}")
                })?
                .trim_end()
                .to_string()
        }
        (None, None) => rpassword::prompt_password("Enter keystore password:")?,
    };

    PrivateKeySigner::decrypt_keystore(path, password)
        .wrap_err_with(|| format!("Failed to decrypt keystore {path:?}"))
}
