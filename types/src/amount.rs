//! Token amounts.
//!
//! Amounts are fixed-point integers (u128) with 18 decimal places, the way the
//! CPS contracts store ICX and bnUSD. The smallest unit is 1 loop.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::iter::Sum;
use std::ops::Add;

use crate::hex_int;

/// Number of decimal places in an on-chain amount.
pub const DECIMALS: u32 = 18;

/// 10^18, one whole token in loop.
pub const ONE_TOKEN: u128 = 10u128.pow(DECIMALS);

/// A token amount in loop (10^-18 of a token).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TokenAmount(u128);

impl TokenAmount {
    pub const ZERO: Self = Self(0);

    pub fn new(loop_units: u128) -> Self {
        Self(loop_units)
    }

    /// Amount of whole tokens, e.g. `from_tokens(5)` is 5 * 10^18 loop.
    pub fn from_tokens(tokens: u128) -> Self {
        Self(tokens.saturating_mul(ONE_TOKEN))
    }

    pub fn raw(&self) -> u128 {
        self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0 == 0
    }

    pub fn saturating_sub(self, other: Self) -> Self {
        Self(self.0.saturating_sub(other.0))
    }

    /// `percent`% of this amount, rounded down.
    pub fn percent(self, percent: u128) -> Self {
        Self(self.0 / 100 * percent + self.0 % 100 * percent / 100)
    }

    /// Whole-token value rounded half-up to two decimal places, e.g. `"1234.57"`.
    ///
    /// This is the form every budget and fund figure takes before it leaves the
    /// core.
    pub fn to_decimal_string(&self) -> String {
        let cent = ONE_TOKEN / 100;
        let mut cents = self.0 / cent;
        if self.0 % cent >= cent / 2 {
            cents += 1;
        }
        format!("{}.{:02}", cents / 100, cents % 100)
    }
}

impl Add for TokenAmount {
    type Output = Self;
    fn add(self, rhs: Self) -> Self {
        Self(self.0.saturating_add(rhs.0))
    }
}

impl Sum for TokenAmount {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, Add::add)
    }
}

impl From<u128> for TokenAmount {
    fn from(raw: u128) -> Self {
        Self(raw)
    }
}

impl fmt::Display for TokenAmount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_decimal_string())
    }
}

impl Serialize for TokenAmount {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&hex_int::to_hex(self.0))
    }
}

impl<'de> Deserialize<'de> for TokenAmount {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        hex_int::deserialize_u128(deserializer).map(Self)
    }
}
