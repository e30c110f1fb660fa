//! # Vigil status dashboard
//!
//! Terminal user interface for monitoring a GraphQL backend's health. The
//! dashboard polls the health endpoint on a fixed interval, renders the
//! result in a status card, and supports a manual refresh.
//!
//! ## Architecture
//!
//! The TUI follows a message/effect loop: key presses and timer ticks become
//! [`vigil_types::Msg`] values, [`App::update`] applies them to the status
//! snapshot, and returned [`vigil_types::Effect`]s are executed by the
//! runtime (spawning background health checks).

mod app;
mod runtime;
mod theme;
mod ui;

use std::time::Duration;

use anyhow::Result;
use vigil_api::VigilClient;

pub use app::App;

/// Runs the dashboard event loop until the user quits.
///
/// Sets up the terminal (raw mode, alternate screen), drives input, the poll
/// interval, and background check tasks, and restores the terminal on exit.
///
/// # Errors
///
/// Returns an error for terminal setup failures or event loop runtime errors.
pub async fn run(client: VigilClient, poll_interval: Duration) -> Result<()> {
    runtime::run_app(client, poll_interval).await
}
