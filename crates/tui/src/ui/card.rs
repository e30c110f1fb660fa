//! The status card: a pure render of the current [`StatusSnapshot`].
//!
//! Mapping rules for the overall badge:
//!
//! | health.status  | badge label | color   |
//! |----------------|-------------|---------|
//! | ok             | Healthy     | green   |
//! | degraded       | Degraded    | yellow  |
//! | error          | Error       | red     |
//! | absent/other   | Unknown     | muted   |
//!
//! While a check is in flight the badge shows "Checking..." regardless of the
//! last payload.

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Wrap};

use vigil_types::{ApiHealth, DatabaseHealth, HealthLevel, HealthPayload, StatusSnapshot};

use crate::app::{App, THROBBER_FRAMES};
use crate::theme;

/// Renders the status card into `area`.
pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let snapshot = &app.snapshot;
    let block = Block::bordered()
        .title(Span::styled(" GraphQL API Status ", theme::title_style()))
        .border_style(Style::default().fg(theme::ACCENT));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let has_health = snapshot.health.is_some();
    let has_details = snapshot
        .health
        .as_ref()
        .is_some_and(|health| health.database.details.is_some());
    let has_error = snapshot.error.is_some();
    // The banner tracks the last payload even while a refresh is in flight.
    let has_banner = snapshot
        .health
        .as_ref()
        .is_some_and(|health| matches!(health.status, HealthLevel::Ok | HealthLevel::Degraded));

    let constraints = [
        Constraint::Length(1),                                  // description
        Constraint::Length(1),                                  // overall badge
        Constraint::Length(1),                                  // endpoint
        Constraint::Length(1),                                  // last checked
        Constraint::Length(if has_health { 1 } else { 0 }),    // section header
        Constraint::Length(if has_health { 3 } else { 0 }),    // service grid
        Constraint::Length(if has_details { 1 } else { 0 }),   // db details
        Constraint::Length(if has_health { 1 } else { 0 }),    // server time
        Constraint::Length(if has_error { 2 } else { 0 }),     // error panel
        Constraint::Length(if has_banner { 1 } else { 0 }),    // banner
        Constraint::Min(0),
    ];
    let areas = Layout::vertical(constraints).split(inner);

    frame.render_widget(
        Paragraph::new(Span::styled(
            "Monitor the health of your API services",
            theme::text_muted(),
        )),
        areas[0],
    );

    let mut badge_line = vec![Span::styled("Status: ", theme::text_muted())];
    if snapshot.loading {
        badge_line.push(Span::styled(
            format!("{} ", THROBBER_FRAMES[app.throbber_idx]),
            Style::default().fg(theme::ACCENT),
        ));
    }
    badge_line.push(status_badge(snapshot));
    frame.render_widget(Paragraph::new(Line::from(badge_line)), areas[1]);

    frame.render_widget(
        Paragraph::new(Line::from(vec![
            Span::styled("Endpoint: ", theme::text_muted()),
            Span::styled(snapshot.endpoint_url.clone(), theme::text_style()),
        ])),
        areas[2],
    );

    if let Some(checked_at) = snapshot.last_checked_at {
        frame.render_widget(
            Paragraph::new(Line::from(vec![
                Span::styled("Last checked: ", theme::text_muted()),
                Span::styled(checked_at.format("%H:%M:%S").to_string(), theme::text_style()),
            ])),
            areas[3],
        );
    }

    if let Some(health) = &snapshot.health {
        frame.render_widget(
            Paragraph::new(Span::styled("Service Status", theme::title_style())),
            areas[4],
        );
        render_service_grid(frame, areas[5], health);

        if let Some(details) = &health.database.details {
            frame.render_widget(
                Paragraph::new(Line::from(vec![
                    Span::styled("DB details: ", theme::text_muted()),
                    Span::styled(details.clone(), theme::text_style()),
                ])),
                areas[6],
            );
        }

        frame.render_widget(
            Paragraph::new(Line::from(vec![
                Span::styled("Server time: ", theme::text_muted()),
                Span::styled(health.timestamp.clone(), theme::text_muted()),
            ])),
            areas[7],
        );
    }

    if let Some(error) = &snapshot.error {
        frame.render_widget(
            Paragraph::new(Line::from(vec![
                Span::styled("Error: ", theme::badge_style(theme::ERR)),
                Span::styled(error.clone(), Style::default().fg(theme::ERR)),
            ]))
            .wrap(Wrap { trim: true }),
            areas[8],
        );
    }

    if has_banner
        && let Some(banner) = snapshot.health.as_ref().and_then(|health| banner_line(health.status))
    {
        frame.render_widget(Paragraph::new(banner), areas[9]);
    }
}

/// Two-cell grid: API status on the left, database connection on the right.
fn render_service_grid(frame: &mut Frame, area: Rect, health: &HealthPayload) {
    let [api_area, db_area] =
        Layout::horizontal([Constraint::Percentage(50), Constraint::Percentage(50)]).areas(area);

    let api_block = Block::bordered()
        .title(Span::styled(" API ", theme::text_muted()))
        .border_style(Style::default().fg(theme::BORDER));
    let api_inner = api_block.inner(api_area);
    frame.render_widget(api_block, api_area);
    frame.render_widget(Paragraph::new(api_badge(&health.api)), api_inner);

    let db_block = Block::bordered()
        .title(Span::styled(" Database ", theme::text_muted()))
        .border_style(Style::default().fg(theme::BORDER));
    let db_inner = db_block.inner(db_area);
    frame.render_widget(db_block, db_area);
    frame.render_widget(Paragraph::new(database_badge(&health.database)), db_inner);
}

/// Overall badge for the snapshot: "Checking..." while loading, otherwise the
/// label and color derived from the last payload's overall status.
fn status_badge(snapshot: &StatusSnapshot) -> Span<'static> {
    if snapshot.loading {
        return Span::styled("Checking...", theme::text_muted());
    }
    match snapshot.health.as_ref().map(|health| health.status) {
        Some(HealthLevel::Ok) => Span::styled("Healthy", theme::badge_style(theme::OK)),
        Some(HealthLevel::Degraded) => Span::styled("Degraded", theme::badge_style(theme::WARN)),
        Some(HealthLevel::Error) => Span::styled("Error", theme::badge_style(theme::ERR)),
        Some(HealthLevel::Unknown) | None => Span::styled("Unknown", theme::badge_style(theme::FG_MUTED)),
    }
}

/// API cell badge: the backend's status string verbatim.
fn api_badge(api: &ApiHealth) -> Span<'static> {
    let color = if api.status == "ok" { theme::OK } else { theme::ERR };
    Span::styled(api.status.clone(), theme::badge_style(color))
}

/// Database cell badge: labelled by the connection boolean, colored by the
/// status string.
fn database_badge(database: &DatabaseHealth) -> Span<'static> {
    let label = if database.connection { "Connected" } else { "Disconnected" };
    let color = match database.status.as_str() {
        "ok" => theme::OK,
        "error" => theme::ERR,
        _ => theme::WARN,
    };
    Span::styled(label, theme::badge_style(color))
}

/// Success/warning banner keyed off the overall status.
fn banner_line(level: HealthLevel) -> Option<Line<'static>> {
    match level {
        HealthLevel::Ok => Some(Line::from(Span::styled(
            "✓ All systems operational",
            Style::default().fg(theme::OK),
        ))),
        HealthLevel::Degraded => Some(Line::from(Span::styled(
            "⚠ Some services may be experiencing issues",
            Style::default().fg(theme::WARN),
        ))),
        HealthLevel::Error | HealthLevel::Unknown => None,
    }
}
