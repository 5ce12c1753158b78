//! Palette and semantic styles for the console.

use ratatui::style::{Color, Modifier, Style};

use nfconsole_core::NotificationLevel;

// ── Palette ───────────────────────────────────────────────────────────

pub const ACCENT: Color = Color::Rgb(225, 53, 255); // #e135ff
pub const CYAN: Color = Color::Rgb(128, 255, 234); // #80ffea
pub const SUCCESS_GREEN: Color = Color::Rgb(80, 250, 123); // #50fa7b
pub const ERROR_RED: Color = Color::Rgb(255, 99, 99); // #ff6363
pub const DIM_WHITE: Color = Color::Rgb(189, 193, 207); // #bdc1cf
pub const BORDER_GRAY: Color = Color::Rgb(98, 114, 164); // #6272a4
pub const BG_HIGHLIGHT: Color = Color::Rgb(40, 42, 54); // #282a36
pub const BG_DARK: Color = Color::Rgb(30, 31, 41); // #1e1f29

// ── Semantic Styles ───────────────────────────────────────────────────

/// Title text for blocks/panels.
pub fn title_style() -> Style {
    Style::default().fg(CYAN).add_modifier(Modifier::BOLD)
}

/// Border for the panel holding input focus.
pub fn border_focused() -> Style {
    Style::default().fg(ACCENT)
}

pub fn table_header() -> Style {
    Style::default()
        .fg(CYAN)
        .add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
}

pub fn table_row() -> Style {
    Style::default().fg(DIM_WHITE)
}

pub fn table_selected() -> Style {
    Style::default()
        .fg(ACCENT)
        .bg(BG_HIGHLIGHT)
        .add_modifier(Modifier::BOLD)
}

pub fn tab_active() -> Style {
    Style::default().fg(ACCENT).add_modifier(Modifier::BOLD)
}

pub fn tab_inactive() -> Style {
    Style::default().fg(DIM_WHITE)
}

/// Field label in detail and form screens.
pub fn field_label() -> Style {
    Style::default().fg(CYAN)
}

/// Read-only form field (natural key while editing).
pub fn field_locked() -> Style {
    Style::default().fg(BORDER_GRAY).add_modifier(Modifier::ITALIC)
}

/// Placeholder shown in an empty input.
pub fn placeholder() -> Style {
    Style::default().fg(BORDER_GRAY)
}

/// Empty-state or failure text shown in place of rows.
pub fn placeholder_text(is_error: bool) -> Style {
    if is_error {
        Style::default().fg(ERROR_RED)
    } else {
        Style::default().fg(DIM_WHITE).add_modifier(Modifier::ITALIC)
    }
}

/// Key hint text (e.g., "q quit  r refresh").
pub fn key_hint() -> Style {
    Style::default().fg(BORDER_GRAY)
}

pub fn key_hint_key() -> Style {
    Style::default().fg(CYAN).add_modifier(Modifier::BOLD)
}

pub fn notification(level: NotificationLevel) -> Style {
    let fg = match level {
        NotificationLevel::Success => SUCCESS_GREEN,
        NotificationLevel::Error => ERROR_RED,
        NotificationLevel::Info => CYAN,
    };
    Style::default().fg(fg).add_modifier(Modifier::BOLD)
}

/// Confirmation popup body.
pub fn popup() -> Style {
    Style::default().fg(DIM_WHITE).bg(BG_DARK)
}
