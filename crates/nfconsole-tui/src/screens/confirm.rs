//! Delete confirmation popup.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::text::{Line, Span, Text};
use tui_popup::Popup;

use nfconsole_core::PendingDelete;

use crate::theme;

pub fn render(frame: &mut Frame, area: Rect, pending: &PendingDelete) {
    let body = Text::from(vec![
        Line::from(""),
        Line::from(format!("  {}  ", pending.prompt)),
        Line::from(""),
        Line::from(vec![
            Span::styled("  y ", theme::key_hint_key()),
            Span::styled("delete   ", theme::key_hint()),
            Span::styled("n/Esc ", theme::key_hint_key()),
            Span::styled("keep", theme::key_hint()),
        ]),
    ]);
    let popup = Popup::new(body)
        .title(Line::from(Span::styled(" Confirm delete ", theme::title_style())))
        .style(theme::popup());
    frame.render_widget(&popup, area);
}
