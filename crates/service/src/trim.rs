//! Serde helpers that trim incoming strings before validation sees them.

use serde::{Deserialize, Deserializer};

pub fn string<'de, D>(de: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(String::deserialize(de)?.trim().to_string())
}

pub fn option<'de, D>(de: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(de)?.map(|s| s.trim().to_string()))
}

/// Pair with `#[serde(default)]`: absent -> `None`, `null` -> `Some(None)`.
pub fn double_option<'de, D>(de: D) -> Result<Option<Option<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    option(de).map(Some)
}
