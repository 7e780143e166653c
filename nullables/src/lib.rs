//! Nullable infrastructure for deterministic testing.
//!
//! Inspired by the "A-frame architecture" pattern from RsNano.
//! Every external dependency of the governance core (clock, chain, content
//! store, webhook subscribers) sits behind a trait. This crate provides
//! in-memory implementations that:
//! - Return scripted values
//! - Record every call for assertions
//! - Never touch the network
//!
//! Usage: swap real implementations for nullables in tests. The HTTP
//! adapters themselves are tested against [`StubHttpServer`].

pub mod chain;
pub mod clock;
pub mod content;
pub mod http;
pub mod webhook;

pub use chain::NullChain;
pub use clock::NullClock;
pub use content::NullContentStore;
pub use http::{StubHttpServer, StubRequest, StubResponse};
pub use webhook::NullWebhook;
