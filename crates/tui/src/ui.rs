//! Top-level layout for the vigil dashboard.
//!
//! A single screen: the status card fills the frame with a one-line hint bar
//! underneath showing the available key bindings.

pub mod card;

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::app::App;
use crate::theme;

/// Renders one frame: status card plus hint bar.
pub fn draw(frame: &mut Frame, app: &App) {
    let [card_area, hint_area] = Layout::vertical([Constraint::Min(3), Constraint::Length(1)]).areas(frame.area());
    card::render(frame, card_area, app);
    draw_hints(frame, hint_area, app);
}

/// Single-line hints strip with the key bindings. The refresh hint is dimmed
/// while a check is in flight, mirroring a disabled refresh button.
fn draw_hints(frame: &mut Frame, area: ratatui::layout::Rect, app: &App) {
    let refresh_style = if app.snapshot.loading {
        theme::text_muted()
    } else {
        theme::text_style()
    };
    let hints = Line::from(vec![
        Span::styled(" r ", refresh_style),
        Span::styled("refresh", theme::text_muted()),
        Span::styled("  q ", theme::text_style()),
        Span::styled("quit", theme::text_muted()),
    ]);
    frame.render_widget(Paragraph::new(hints), area);
}
