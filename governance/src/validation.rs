//! Required-field checks for the sponsor and voting forms.
//!
//! Reasons come from a rich-text editor, so markup and `&nbsp;` padding are
//! ignored when deciding whether a reason was given.

use cps_types::VoteChoice;
use serde::Serialize;

pub const MISSING_CHOICE: &str = "Please cast your vote";
pub const MISSING_REASON: &str = "Please type a reason for your decision.";

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum Field {
    SponsorChoice,
    SponsorReason,
    Vote,
    VoteReason,
    BudgetChangeVote,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: Field,
    pub message: &'static str,
}

/// Outcome of validating one form.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct Validation {
    pub errors: Vec<FieldError>,
}

impl Validation {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn error_for(&self, field: Field) -> Option<&FieldError> {
        self.errors.iter().find(|e| e.field == field)
    }

    fn require(&mut self, ok: bool, field: Field, message: &'static str) {
        if !ok {
            self.errors.push(FieldError { field, message });
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum SponsorChoice {
    Accept,
    Deny,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SponsorDecisionForm {
    pub choice: Option<SponsorChoice>,
    pub reason: String,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct VoteForm {
    pub choice: Option<VoteChoice>,
    pub reason: String,
    /// Set when the progress report carries a project term revision.
    pub requires_budget_change_vote: bool,
    pub budget_change_choice: Option<VoteChoice>,
}

/// Reason text with `&nbsp;` entities replaced by spaces.
pub fn normalize_reason(raw: &str) -> String {
    raw.replace("&nbsp;", " ")
}

/// Whether `raw` has any visible text once tags and padding are removed.
pub fn has_text(raw: &str) -> bool {
    let mut in_tag = false;
    normalize_reason(raw).chars().any(|c| match c {
        '<' => {
            in_tag = true;
            false
        }
        '>' => {
            in_tag = false;
            false
        }
        c => !in_tag && !c.is_whitespace(),
    })
}

pub fn validate_sponsor_decision(form: &SponsorDecisionForm) -> Validation {
    let mut v = Validation::default();
    v.require(form.choice.is_some(), Field::SponsorChoice, MISSING_CHOICE);
    v.require(has_text(&form.reason), Field::SponsorReason, MISSING_REASON);
    v
}

pub fn validate_vote(form: &VoteForm) -> Validation {
    let mut v = Validation::default();
    v.require(form.choice.is_some(), Field::Vote, MISSING_CHOICE);
    v.require(has_text(&form.reason), Field::VoteReason, MISSING_REASON);
    if form.requires_budget_change_vote {
        v.require(form.budget_change_choice.is_some(), Field::BudgetChangeVote, MISSING_CHOICE);
    }
    v
}
