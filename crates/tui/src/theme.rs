//! Theme and styling for the vigil dashboard.
//!
//! Defines the color scheme and styling helpers used throughout the
//! interface: a dark theme with a cyan accent and the three health colors.

use ratatui::style::{Color, Modifier, Style};

/// Accent color for the card border and highlighted values.
pub const ACCENT: Color = Color::Rgb(80, 200, 220);

/// Primary foreground color for normal text.
pub const FG: Color = Color::Rgb(224, 224, 230);

/// Muted foreground color for labels and secondary text.
pub const FG_MUTED: Color = Color::Rgb(150, 150, 158);

/// Default border color for unemphasized blocks.
pub const BORDER: Color = Color::Rgb(72, 72, 80);

/// Positive color for healthy states.
pub const OK: Color = Color::Rgb(92, 200, 120);

/// Warning color for degraded states.
pub const WARN: Color = Color::Rgb(226, 192, 90);

/// Destructive color for error states.
pub const ERR: Color = Color::Rgb(220, 96, 110);

pub fn title_style() -> Style {
    Style::default().fg(FG_MUTED).add_modifier(Modifier::BOLD)
}

pub fn text_style() -> Style {
    Style::default().fg(FG)
}

pub fn text_muted() -> Style {
    Style::default().fg(FG_MUTED)
}

/// Bold badge style in the given health color.
pub fn badge_style(color: Color) -> Style {
    Style::default().fg(color).add_modifier(Modifier::BOLD)
}
