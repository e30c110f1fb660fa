//! Application state and update logic for the vigil dashboard.
//!
//! [`App`] owns the status poller's state: the current [`StatusSnapshot`] and
//! the throbber animation frame. All mutation happens in [`App::update`], so
//! the poller's transitions are testable without a terminal or a network.

use vigil_types::{ConnectionState, Effect, HealthLevel, Msg, StatusSnapshot};

/// Animation frames for the in-flight check throbber.
pub const THROBBER_FRAMES: &[&str] = &["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

/// The poller's state container. One instance per dashboard; instances are
/// independent and nothing here is process-wide.
#[derive(Debug)]
pub struct App {
    /// Current externally observable poller state, replaced per poll.
    pub snapshot: StatusSnapshot,
    /// Animation frame for the check throbber.
    pub throbber_idx: usize,
}

impl App {
    pub fn new(endpoint_url: String) -> Self {
        Self {
            snapshot: StatusSnapshot::new(endpoint_url),
            throbber_idx: 0,
        }
    }

    /// Applies a message to the snapshot and reports side effects.
    ///
    /// Transitions:
    /// - `Refresh` marks a new attempt: `loading` set, `error` cleared, one
    ///   `CheckRequested` effect emitted. Overlapping attempts are not
    ///   coordinated; a scheduled tick may start while a manual refresh is
    ///   still in flight and the snapshot reflects whichever completes last.
    /// - `CheckCompleted` records the outcome: a successful poll replaces the
    ///   health payload wholesale and derives the connection state from the
    ///   overall status; a failed poll sets `error` and keeps the previous
    ///   payload.
    /// - `Tick` advances the throbber only while a check is in flight.
    pub fn update(&mut self, msg: Msg) -> Vec<Effect> {
        match msg {
            Msg::Refresh => {
                self.snapshot.loading = true;
                self.snapshot.error = None;
                return vec![Effect::CheckRequested];
            }
            Msg::Tick => {
                if self.snapshot.loading {
                    self.throbber_idx = (self.throbber_idx + 1) % THROBBER_FRAMES.len();
                }
            }
            Msg::Resize(_, _) => {
                // Layout is recomputed every frame; nothing to invalidate.
            }
            Msg::CheckCompleted(outcome) => {
                self.snapshot.loading = false;
                self.snapshot.last_checked_at = Some(outcome.checked_at);
                match outcome.result {
                    Ok(health) => {
                        self.snapshot.connection = if health.status == HealthLevel::Ok {
                            ConnectionState::Connected
                        } else {
                            ConnectionState::Disconnected
                        };
                        self.snapshot.health = Some(health);
                        self.snapshot.error = None;
                    }
                    Err(message) => {
                        self.snapshot.connection = ConnectionState::Disconnected;
                        self.snapshot.error = Some(message);
                    }
                }
                self.throbber_idx = 0;
            }
        }
        Vec::new()
    }
}
