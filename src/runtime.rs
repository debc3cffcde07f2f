use std::sync::mpsc::{self, Receiver, RecvError};

use crossterm::event::{self, Event as CtEvent, KeyEvent};

/// Unified event type consumed by the app runner. Every session operation is
/// driven by one of these; there is no timer and no background work.
#[derive(Clone, Debug)]
pub enum AppEvent {
    Key(KeyEvent),
    Resize,
}

/// Source of terminal events (keyboard, resize, etc.)
pub trait EventSource: Send + 'static {
    /// Block until the next event arrives. Err means the source is gone and
    /// the app should shut down.
    fn next(&self) -> Result<AppEvent, RecvError>;
}

/// Production event source using crossterm
pub struct CrosstermEventSource {
    rx: Receiver<AppEvent>,
}

impl CrosstermEventSource {
    pub fn new() -> Self {
        let (tx, rx) = mpsc::channel();

        std::thread::spawn(move || loop {
            match event::read() {
                Ok(CtEvent::Key(key)) => {
                    if tx.send(AppEvent::Key(key)).is_err() {
                        break;
                    }
                }
                Ok(CtEvent::Resize(_, _)) => {
                    if tx.send(AppEvent::Resize).is_err() {
                        break;
                    }
                }
                Ok(_) => {}
                Err(_) => break,
            }
        });

        Self { rx }
    }
}

impl Default for CrosstermEventSource {
    fn default() -> Self {
        Self::new()
    }
}

impl EventSource for CrosstermEventSource {
    fn next(&self) -> Result<AppEvent, RecvError> {
        self.rx.recv()
    }
}

/// Test event source for unit and headless integration tests
pub struct TestEventSource {
    rx: Receiver<AppEvent>,
}

impl TestEventSource {
    pub fn new(rx: Receiver<AppEvent>) -> Self {
        Self { rx }
    }
}

impl EventSource for TestEventSource {
    fn next(&self) -> Result<AppEvent, RecvError> {
        self.rx.recv()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyModifiers};
    use std::sync::mpsc;

    #[test]
    fn test_source_passes_through_events() {
        let (tx, rx) = mpsc::channel();
        tx.send(AppEvent::Resize).unwrap();
        tx.send(AppEvent::Key(KeyEvent::new(
            KeyCode::Char('a'),
            KeyModifiers::NONE,
        )))
        .unwrap();
        let es = TestEventSource::new(rx);

        assert!(matches!(es.next(), Ok(AppEvent::Resize)));
        match es.next() {
            Ok(AppEvent::Key(key)) => assert_eq!(key.code, KeyCode::Char('a')),
            other => panic!("expected key event, got {:?}", other.ok()),
        }
    }

    #[test]
    fn test_source_errors_once_disconnected() {
        let (tx, rx) = mpsc::channel::<AppEvent>();
        drop(tx);
        let es = TestEventSource::new(rx);
        assert!(es.next().is_err());
    }
}
