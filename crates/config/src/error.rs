//! Errors raised while building or validating the [`Config`](crate::Config).

use alloy_primitives::utils::UnitsError;
use std::{collections::HashSet, error::Error, fmt};

/// The message shown when the config could not be extracted from the figment.
pub const FAILED_TO_EXTRACT_CONFIG_MSG: &str = "failed to extract coffee config:";

/// Failed to extract a [`Config`](crate::Config). Lists every distinct problem once, naming the
/// setting it concerns.
#[derive(Clone, Debug, PartialEq)]
pub struct ExtractConfigError {
    pub(crate) error: figment::Error,
}

impl ExtractConfigError {
    pub fn new(error: figment::Error) -> Self {
        Self { error }
    }
}

impl fmt::Display for ExtractConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut seen = HashSet::with_capacity(self.error.count());
        writeln!(f, "{FAILED_TO_EXTRACT_CONFIG_MSG}")?;
        for err in self.error.clone() {
            let mut line = err.to_string();
            if !err.path.is_empty() {
                line.push_str(&format!(" for setting `{}`", err.path.join(".")));
            }
            if seen.insert(line.clone()) {
                writeln!(f, "{line}")?;
            }
        }
        Ok(())
    }
}

impl Error for ExtractConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        Error::source(&self.error)
    }
}

/// A setting that was extracted fine but holds an unusable value.
#[derive(Debug, thiserror::Error)]
pub enum InvalidSettingError {
    #[error("invalid `tip_amount` {amount:?}: {source}")]
    TipAmount {
        amount: String,
        #[source]
        source: UnitsError,
    },
    #[error("`tip_amount` must be greater than zero")]
    ZeroTip,
    #[error("`poll_interval` must be at least 1ms")]
    ZeroPollInterval,
}
