//! Component trait: the building block for every screen.

use crossterm::event::KeyEvent;
use ratatui::{Frame, layout::Rect};

use crate::action::Action;

/// Every screen implements Component.
///
/// Keys reach the front-most screen only; whatever it returns is queued on
/// the app's action channel.
pub trait Component {
    /// Handle a keyboard event. Return an Action to dispatch, or None.
    fn handle_key_event(&mut self, key: KeyEvent) -> Option<Action>;

    /// Render into the provided frame area.
    fn render(&self, frame: &mut Frame, area: Rect);

    /// Key hints shown in the status bar while this screen is in front.
    fn key_hints(&self) -> &'static [(&'static str, &'static str)];
}
