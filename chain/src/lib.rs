//! Client for the CPS governance contract.
//!
//! Everything the governance core needs from the chain goes through the
//! [`ChainClient`] trait: period reads, the `update_period` transaction, and
//! the proposal/treasury queries behind the period statistics. [`IconRpcClient`]
//! is the JSON-RPC implementation; tests use the in-memory double from
//! `cps-nullables`.

pub mod client;
pub mod error;
pub mod icon;

pub use client::{ChainClient, ProjectAmounts};
pub use error::ChainError;
pub use icon::{IconRpcClient, IconRpcConfig};
