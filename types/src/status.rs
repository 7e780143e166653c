//! Raw lifecycle statuses as stored by the CPS contract.

use serde::{Deserialize, Serialize};
use std::fmt;

/// On-chain status of a proposal.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum ProposalStatus {
    Pending,
    Active,
    Paused,
    Completed,
    Disqualified,
    Rejected,
}

impl ProposalStatus {
    pub const ALL: [ProposalStatus; 6] = [
        Self::Pending,
        Self::Active,
        Self::Paused,
        Self::Completed,
        Self::Disqualified,
        Self::Rejected,
    ];

    /// Parse a contract status string. Accepts both `_active` and `active`.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().trim_start_matches('_') {
            "pending" | "sponsor_pending" => Some(Self::Pending),
            "active" => Some(Self::Active),
            "paused" => Some(Self::Paused),
            "completed" => Some(Self::Completed),
            "disqualified" => Some(Self::Disqualified),
            "rejected" => Some(Self::Rejected),
            _ => None,
        }
    }

    /// Status key used by the contract's read methods.
    pub fn as_wire(&self) -> &'static str {
        match self {
            Self::Pending => "_pending",
            Self::Active => "_active",
            Self::Paused => "_paused",
            Self::Completed => "_completed",
            Self::Disqualified => "_disqualified",
            Self::Rejected => "_rejected",
        }
    }

    /// No further transitions happen from this status.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Completed | Self::Disqualified | Self::Rejected)
    }
}

impl TryFrom<String> for ProposalStatus {
    type Error = String;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::parse(&s).ok_or_else(|| format!("unknown proposal status: {s}"))
    }
}

impl From<ProposalStatus> for String {
    fn from(s: ProposalStatus) -> Self {
        s.as_wire().to_string()
    }
}

impl fmt::Display for ProposalStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_wire())
    }
}

/// On-chain status of a progress report.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum ProgressReportStatus {
    Waiting,
    Approved,
    Rejected,
}

impl ProgressReportStatus {
    pub const ALL: [ProgressReportStatus; 3] = [Self::Waiting, Self::Approved, Self::Rejected];

    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().trim_start_matches('_') {
            "waiting" => Some(Self::Waiting),
            "approved" => Some(Self::Approved),
            "rejected" | "progress_report_rejected" => Some(Self::Rejected),
            _ => None,
        }
    }

    pub fn as_wire(&self) -> &'static str {
        match self {
            Self::Waiting => "_waiting",
            Self::Approved => "_approved",
            Self::Rejected => "_progress_report_rejected",
        }
    }

    pub fn is_terminal(&self) -> bool {
        !matches!(self, Self::Waiting)
    }
}

impl TryFrom<String> for ProgressReportStatus {
    type Error = String;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::parse(&s).ok_or_else(|| format!("unknown progress report status: {s}"))
    }
}

impl From<ProgressReportStatus> for String {
    fn from(s: ProgressReportStatus) -> Self {
        s.as_wire().to_string()
    }
}

impl fmt::Display for ProgressReportStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_wire())
    }
}
