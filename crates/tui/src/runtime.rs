//! Runtime: event loop and input routing for the dashboard.
//!
//! Responsibilities
//! - Own the terminal lifecycle (enter/leave alternate screen, raw mode).
//! - Drive a single event loop multiplexing input, the poll interval, the
//!   animation ticker, and completed check tasks.
//! - Execute `Effect`s by spawning health checks on the Tokio runtime.
//!
//! The poll interval fires immediately on startup, which doubles as the
//! initial on-mount check, and then every period thereafter. The interval is
//! dropped when the loop exits, so no timer outlives the dashboard. Checks
//! already in flight are not cancelled by a newer one; the snapshot reflects
//! whichever completes last.

use std::time::Duration;

use anyhow::Result;
use chrono::Local;
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind, KeyModifiers},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use futures_util::{StreamExt, stream::FuturesUnordered};
use ratatui::{Terminal, prelude::*};
use tokio::task::JoinHandle;
use tokio::{
    signal,
    sync::mpsc,
    time::{self, MissedTickBehavior},
};
use vigil_api::VigilClient;
use vigil_types::{Effect, Msg, PollOutcome};

use crate::app::App;
use crate::ui;

/// Spawn a dedicated input task that blocks on terminal input and forwards
/// `crossterm` events over a Tokio channel.
///
/// Keeping `poll()` and `read()` on the same thread avoids lost or delayed
/// events in some terminals.
fn spawn_input_task() -> mpsc::Receiver<Event> {
    let (sender, receiver) = mpsc::channel(100);

    tokio::spawn(async move {
        let poll_window = Duration::from_millis(16);
        loop {
            if matches!(event::poll(poll_window), Ok(true)) {
                match event::read() {
                    Ok(event) => {
                        if sender.send(event).await.is_err() {
                            break;
                        }
                    }
                    Err(error) => {
                        tracing::warn!(%error, "failed to read terminal event");
                        break;
                    }
                }
            }
        }
    });
    receiver
}

/// Put the terminal into raw mode and enter the alternate screen.
fn setup_terminal() -> Result<Terminal<CrosstermBackend<std::io::Stdout>>> {
    enable_raw_mode()?;
    let mut stdout = std::io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend)?;
    Ok(terminal)
}

/// Restore terminal settings and leave the alternate screen.
fn cleanup_terminal(terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>) -> Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    Ok(())
}

/// Outcome of routing one input event.
enum InputFlow {
    Continue,
    Exit,
}

/// Route a raw crossterm event to messages. `r` requests a manual refresh
/// unless a check is already in flight (the refresh affordance is disabled
/// while loading); `q`, Esc, and Ctrl+C exit.
fn handle_input_event(app: &mut App, input_event: Event, effects: &mut Vec<Effect>) -> InputFlow {
    match input_event {
        Event::Key(key) if key.kind == KeyEventKind::Press => match key.code {
            KeyCode::Char('q') | KeyCode::Esc => InputFlow::Exit,
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => InputFlow::Exit,
            KeyCode::Char('r') => {
                if !app.snapshot.loading {
                    effects.extend(app.update(Msg::Refresh));
                }
                InputFlow::Continue
            }
            _ => InputFlow::Continue,
        },
        Event::Resize(width, height) => {
            effects.extend(app.update(Msg::Resize(width, height)));
            InputFlow::Continue
        }
        _ => InputFlow::Continue,
    }
}

/// Spawn one health check per requested effect, collecting join handles so
/// completions can be folded back into the update loop.
fn process_effects(
    client: &VigilClient,
    effects: &mut Vec<Effect>,
    pending_checks: &mut FuturesUnordered<JoinHandle<PollOutcome>>,
) {
    for effect in effects.drain(..) {
        match effect {
            Effect::CheckRequested => {
                let client = client.clone();
                pending_checks.push(tokio::spawn(async move {
                    let result = client.check_health().await.map_err(|error| error.to_string());
                    PollOutcome {
                        result,
                        checked_at: Local::now(),
                    }
                }));
            }
        }
    }
}

/// Entry point for the dashboard runtime: sets up the terminal, runs the
/// async event loop, and performs cleanup on exit.
pub async fn run_app(client: VigilClient, poll_interval: Duration) -> Result<()> {
    let mut input_receiver = spawn_input_task();
    let mut app = App::new(client.endpoint_url());
    let mut terminal = setup_terminal()?;

    let mut pending_checks: FuturesUnordered<JoinHandle<PollOutcome>> = FuturesUnordered::new();
    let mut effects: Vec<Effect> = Vec::new();

    // First tick completes immediately: the on-mount initial check.
    let mut poll_ticker = time::interval(poll_interval);
    poll_ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    // Ticking strategy: fast while a check animates, slow when idle.
    let fast_interval = Duration::from_millis(125);
    let idle_interval = Duration::from_millis(5000);
    let mut current_interval = idle_interval;
    let mut anim_ticker = time::interval(current_interval);
    anim_ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    terminal.draw(|frame| ui::draw(frame, &app))?;

    loop {
        let target_interval = if app.snapshot.loading { fast_interval } else { idle_interval };
        if target_interval != current_interval {
            current_interval = target_interval;
            anim_ticker = time::interval(current_interval);
            anim_ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        }

        tokio::select! {
            maybe_event = input_receiver.recv() => {
                match maybe_event {
                    Some(input_event) => {
                        if matches!(handle_input_event(&mut app, input_event, &mut effects), InputFlow::Exit) {
                            break;
                        }
                    }
                    // Input channel closed; shut down cleanly.
                    None => break,
                }
            }

            _ = poll_ticker.tick() => {
                effects.extend(app.update(Msg::Refresh));
            }

            _ = anim_ticker.tick() => {
                effects.extend(app.update(Msg::Tick));
            }

            Some(joined) = pending_checks.next(), if !pending_checks.is_empty() => {
                let outcome = joined.unwrap_or_else(|error| PollOutcome {
                    result: Err(format!("Check task failed: {error}")),
                    checked_at: Local::now(),
                });
                effects.extend(app.update(Msg::CheckCompleted(outcome)));
            }

            _ = signal::ctrl_c() => { break; }
        }

        process_effects(&client, &mut effects, &mut pending_checks);
        terminal.draw(|frame| ui::draw(frame, &app))?;
    }

    cleanup_terminal(&mut terminal)?;
    Ok(())
}
