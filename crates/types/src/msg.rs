//! Messages and effects exchanged between the TUI update loop and runtime.

use chrono::{DateTime, Local};

use crate::HealthPayload;

/// Result of a single completed health check.
///
/// The check task normalizes every failure (transport, HTTP status, GraphQL
/// errors, malformed JSON) into a human-readable message before it reaches
/// the update loop; nothing typed propagates past this point.
#[derive(Debug, Clone)]
pub struct PollOutcome {
    pub result: Result<HealthPayload, String>,
    /// When the attempt finished, successful or not.
    pub checked_at: DateTime<Local>,
}

/// Messages that update the application state.
#[derive(Debug, Clone)]
pub enum Msg {
    /// Start a new health check (scheduled tick or manual refresh).
    Refresh,
    /// Periodic UI tick (throbber animation).
    Tick,
    /// Terminal resized.
    Resize(u16, u16),
    /// A background health check finished.
    CheckCompleted(PollOutcome),
}

/// Side effects the runtime performs on behalf of the update loop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Spawn a health check against the configured endpoint.
    CheckRequested,
}
