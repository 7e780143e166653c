//! Governance periods.
//!
//! The CPS contract cycles Application → Voting → Application, passing through
//! a short Transition period while it settles the previous one.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::TypeError;
use crate::hex_int;

/// Named governance phase.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum PeriodName {
    /// Proposals and progress reports are submitted and sponsored.
    Application,
    /// Registered PReps vote on pending proposals and reports.
    Voting,
    /// The contract is settling the previous period.
    Transition,
}

impl PeriodName {
    pub const ALL: [PeriodName; 3] = [Self::Application, Self::Voting, Self::Transition];

    /// Name as reported by `period_check`.
    pub fn as_wire(&self) -> &'static str {
        match self {
            Self::Application => "Application Period",
            Self::Voting => "Voting Period",
            Self::Transition => "Transition Period",
        }
    }

    /// Short form used by the dashboard (`APPLICATION`, `VOTING`, `TRANSITION`).
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Application => "APPLICATION",
            Self::Voting => "VOTING",
            Self::Transition => "TRANSITION",
        }
    }
}

impl FromStr for PeriodName {
    type Err = TypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase();
        match normalized.trim_end_matches(" period") {
            "application" => Ok(Self::Application),
            "voting" => Ok(Self::Voting),
            "transition" => Ok(Self::Transition),
            _ => Err(TypeError::UnknownPeriod(s.to_string())),
        }
    }
}

impl TryFrom<String> for PeriodName {
    type Error = TypeError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<PeriodName> for String {
    fn from(p: PeriodName) -> Self {
        p.as_wire().to_string()
    }
}

impl fmt::Display for PeriodName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_wire())
    }
}

/// The current period and the seconds left in it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Period {
    #[serde(rename = "period_name")]
    pub name: PeriodName,
    #[serde(deserialize_with = "hex_int::deserialize_u64")]
    pub remaining_time: u64,
}

impl Period {
    pub fn new(name: PeriodName, remaining_time: u64) -> Self {
        Self {
            name,
            remaining_time,
        }
    }

    /// The period has run out and the contract is waiting for `update_period`.
    pub fn is_due(&self) -> bool {
        self.remaining_time == 0
    }

    /// Whether `name` is the current period and it still has time left.
    pub fn is_open(&self, name: PeriodName) -> bool {
        self.name == name && self.remaining_time > 0
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({}s left)", self.name, self.remaining_time)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_wire_and_short_names() {
        assert_eq!("Application Period".parse::<PeriodName>().unwrap(), PeriodName::Application);
        assert_eq!("VOTING".parse::<PeriodName>().unwrap(), PeriodName::Voting);
        assert_eq!("transition period".parse::<PeriodName>().unwrap(), PeriodName::Transition);
        assert!("Cooldown".parse::<PeriodName>().is_err());
    }

    #[test]
    fn decodes_period_check_response() {
        let json =
            r#"{"period_name": "Voting Period", "remaining_time": "0x3c", "period_span": "0x1"}"#;
        let period: Period = serde_json::from_str(json).unwrap();
        assert_eq!(period, Period::new(PeriodName::Voting, 60));
        assert!(!period.is_due());
        assert!(period.is_open(PeriodName::Voting));
        assert!(!period.is_open(PeriodName::Application));
    }
}
