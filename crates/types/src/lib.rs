//! Shared type definitions for vigil.
//!
//! This crate holds the data model that the API client and the TUI exchange:
//! the backend-reported [`HealthPayload`], the poller's externally observable
//! [`StatusSnapshot`], and the message/effect types that drive the TUI's
//! update loop.

mod health;
mod msg;
mod snapshot;

pub use health::{ApiHealth, DatabaseHealth, HealthLevel, HealthPayload};
pub use msg::{Effect, Msg, PollOutcome};
pub use snapshot::{ConnectionState, StatusSnapshot};
