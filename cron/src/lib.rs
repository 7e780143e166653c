//! The scheduled CPS job.
//!
//! One invocation reads the contract's period, advances it when it has run
//! out, and announces the closed period to webhook subscribers. Nothing is
//! kept between invocations; every run starts from a fresh chain read.

pub mod config;
pub mod error;
pub mod orchestrator;
pub mod watch;

pub use config::{CronConfig, Network};
pub use error::CronError;
pub use orchestrator::{CronContext, RunReport, RunSettings};
pub use watch::{run_every, ShutdownController};
