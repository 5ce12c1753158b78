//! Terminal input for the console.
//!
//! A background task turns crossterm's `EventStream` into the few events the
//! console reacts to: key presses, a redraw after resize, and a slow tick
//! that expires notifications. Frames are drawn on demand by the app, so
//! there is no render clock here.

use std::time::Duration;

use crossterm::event::{Event as CrosstermEvent, EventStream, KeyEvent, KeyEventKind};
use futures::StreamExt;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::warn;

#[derive(Debug)]
pub enum Event {
    Key(KeyEvent),
    /// The terminal changed size; the current frame must be redrawn.
    Redraw,
    Tick,
}

impl Event {
    /// The console event for a raw terminal event, if it cares about it.
    fn from_terminal(event: CrosstermEvent) -> Option<Self> {
        match event {
            CrosstermEvent::Key(key) if key.kind == KeyEventKind::Press => Some(Self::Key(key)),
            CrosstermEvent::Resize(..) | CrosstermEvent::FocusGained => Some(Self::Redraw),
            _ => None,
        }
    }
}

/// Owns the input task; dropping it stops the task.
pub struct EventReader {
    rx: mpsc::UnboundedReceiver<Event>,
    cancel: CancellationToken,
}

impl EventReader {
    pub fn spawn(tick_rate: Duration) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        let cancel = CancellationToken::new();
        tokio::spawn(read_terminal(tx, tick_rate, cancel.clone()));
        Self { rx, cancel }
    }

    /// Next event, or `None` once the terminal stream has ended.
    pub async fn next(&mut self) -> Option<Event> {
        self.rx.recv().await
    }
}

impl Drop for EventReader {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}

async fn read_terminal(tx: mpsc::UnboundedSender<Event>, tick_rate: Duration, cancel: CancellationToken) {
    let mut stream = EventStream::new();
    let mut tick = tokio::time::interval(tick_rate);
    tick.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);

    loop {
        let event = tokio::select! {
            () = cancel.cancelled() => return,
            _ = tick.tick() => Event::Tick,
            next = stream.next() => match next {
                Some(Ok(raw)) => match Event::from_terminal(raw) {
                    Some(event) => event,
                    None => continue,
                },
                Some(Err(e)) => {
                    warn!(error = %e, "terminal read failed");
                    continue;
                }
                None => return,
            },
        };
        if tx.send(event).is_err() {
            return;
        }
    }
}

#[cfg(test)]
mod tests {
    use crossterm::event::{KeyCode, KeyEventState, KeyModifiers};

    use super::*;

    fn key_event(kind: KeyEventKind) -> CrosstermEvent {
        CrosstermEvent::Key(KeyEvent {
            code: KeyCode::Char('j'),
            modifiers: KeyModifiers::NONE,
            kind,
            state: KeyEventState::NONE,
        })
    }

    #[test]
    fn only_key_presses_reach_the_app() {
        assert!(matches!(
            Event::from_terminal(key_event(KeyEventKind::Press)),
            Some(Event::Key(k)) if k.code == KeyCode::Char('j')
        ));
        assert!(Event::from_terminal(key_event(KeyEventKind::Release)).is_none());
        assert!(Event::from_terminal(key_event(KeyEventKind::Repeat)).is_none());
    }

    #[test]
    fn resize_asks_for_a_redraw() {
        assert!(matches!(Event::from_terminal(CrosstermEvent::Resize(120, 40)), Some(Event::Redraw)));
        assert!(Event::from_terminal(CrosstermEvent::FocusLost).is_none());
        assert!(Event::from_terminal(CrosstermEvent::Paste("x".into())).is_none());
    }
}
