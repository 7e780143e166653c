//! Serde helpers for ICON integer literals.
//!
//! SCORE read calls return integers as `0x`-prefixed hex strings. Decimal
//! strings and plain JSON numbers are accepted too, since the off-chain
//! services re-emit the same records in those forms.

use serde::{Deserialize, Deserializer};

use crate::error::TypeError;

#[derive(Deserialize)]
#[serde(untagged)]
enum RawInt {
    Str(String),
    Num(u64),
}

/// Parse an integer literal in hex (`0x…`) or decimal form.
pub fn parse_u128(s: &str) -> Result<u128, TypeError> {
    let s = s.trim();
    let parsed = match s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        Some(hex) if hex.is_empty() => Ok(0),
        Some(hex) => u128::from_str_radix(hex, 16),
        None if s.is_empty() => Ok(0),
        None => s.parse::<u128>(),
    };
    parsed.map_err(|_| TypeError::InvalidInteger(s.to_string()))
}

/// Format an integer the way ICON expects it in call parameters.
pub fn to_hex(value: u128) -> String {
    format!("{:#x}", value)
}

pub fn deserialize_u128<'de, D>(deserializer: D) -> Result<u128, D::Error>
where
    D: Deserializer<'de>,
{
    match RawInt::deserialize(deserializer)? {
        RawInt::Str(s) => parse_u128(&s).map_err(serde::de::Error::custom),
        RawInt::Num(n) => Ok(n as u128),
    }
}

pub fn deserialize_u64<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = deserialize_u128(deserializer)?;
    u64::try_from(value).map_err(|_| serde::de::Error::custom("integer does not fit in u64"))
}
