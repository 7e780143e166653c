//! Errors raised while decoding CPS values from their wire form.

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TypeError {
    #[error("invalid address: {0}")]
    InvalidAddress(String),

    #[error("invalid integer literal: {0}")]
    InvalidInteger(String),

    #[error("unknown period name: {0}")]
    UnknownPeriod(String),
}
