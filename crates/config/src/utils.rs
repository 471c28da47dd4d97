//! Serde helpers for config values.

use serde::{Deserialize, Deserializer};

/// Deserializes an amount that may arrive as a string or as a number.
///
/// Environment variables such as `COFFEE_TIP_AMOUNT=0.01` are parsed by figment into numbers,
/// while `coffee.toml` usually holds a quoted string.
pub(crate) fn deserialize_stringified_amount<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Amount {
        Str(String),
        Int(u64),
        Float(f64),
    }

    Ok(match Amount::deserialize(deserializer)? {
        Amount::Str(s) => s,
        Amount::Int(n) => n.to_string(),
        Amount::Float(f) => f.to_string(),
    })
}
