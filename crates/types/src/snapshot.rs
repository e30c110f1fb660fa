//! The poller's externally observable state.

use chrono::{DateTime, Local};

use crate::HealthPayload;

/// Whether the most recent completed poll reached a healthy backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConnectionState {
    /// No poll has completed yet.
    #[default]
    Unknown,
    /// The last poll succeeded and the overall status was ok.
    Connected,
    /// The last poll failed, or succeeded with a non-ok overall status.
    Disconnected,
}

/// Current status of the health poller, replaced atomically per poll.
///
/// Only the poller mutates a snapshot; the status card renders it read-only.
/// `error` and `health` are outcomes of the most recent attempt: `error` is
/// cleared at the start of every attempt and set only on failure, while a
/// failed poll retains the previously fetched `health` payload.
#[derive(Debug, Clone)]
pub struct StatusSnapshot {
    pub connection: ConnectionState,
    /// True only while a request is in flight.
    pub loading: bool,
    pub error: Option<String>,
    pub last_checked_at: Option<DateTime<Local>>,
    /// The resolved URL the health query is posted to, rendered verbatim.
    pub endpoint_url: String,
    pub health: Option<HealthPayload>,
}

impl StatusSnapshot {
    pub fn new(endpoint_url: String) -> Self {
        Self {
            connection: ConnectionState::default(),
            loading: false,
            error: None,
            last_checked_at: None,
            endpoint_url,
            health: None,
        }
    }
}
