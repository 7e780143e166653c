//! ICON account address type (`hx` wallets, `cx` contracts).

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::TypeError;

/// An ICON address, either a wallet (`hx…`) or a contract (`cx…`).
///
/// Addresses are 20 bytes, hex encoded after a two-letter prefix.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Address(String);

impl Address {
    pub const WALLET_PREFIX: &'static str = "hx";
    pub const CONTRACT_PREFIX: &'static str = "cx";

    /// Parse and validate an address.
    pub fn parse(raw: impl Into<String>) -> Result<Self, TypeError> {
        let s = raw.into().to_ascii_lowercase();
        let body = s
            .strip_prefix(Self::WALLET_PREFIX)
            .or_else(|| s.strip_prefix(Self::CONTRACT_PREFIX))
            .ok_or_else(|| TypeError::InvalidAddress(s.clone()))?;
        if body.len() != 40 || !body.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(TypeError::InvalidAddress(s));
        }
        Ok(Self(s))
    }

    /// Return the raw address string.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_contract(&self) -> bool {
        self.0.starts_with(Self::CONTRACT_PREFIX)
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<String> for Address {
    type Error = TypeError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::parse(s)
    }
}

impl From<Address> for String {
    fn from(a: Address) -> Self {
        a.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_wallet_and_contract_addresses() {
        let wallet = Address::parse(format!("hx{}", "ab".repeat(20))).unwrap();
        let contract = Address::parse(format!("CX{}", "01".repeat(20))).unwrap();
        assert!(!wallet.is_contract());
        assert!(contract.is_contract());
        assert!(contract.as_str().starts_with("cx"));
    }

    #[test]
    fn rejects_bad_prefix_and_length() {
        assert!(Address::parse(format!("0x{}", "ab".repeat(20))).is_err());
        assert!(Address::parse("hx1234").is_err());
        assert!(Address::parse(format!("hx{}", "zz".repeat(20))).is_err());
    }
}
