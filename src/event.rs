use std::time::Duration;

use crossterm::event::{self, Event as CrosstermEvent, KeyEvent};
use tokio::sync::mpsc;

use crate::api::node::Node;
use crate::browse::columns::ColumnRequest;
use crate::error::Result;

/// Which mutation a `MutationComplete` event reports on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MutationKind {
    Delete { path: String },
    CreateFolder { parent: String, name: String },
}

/// Application events.
///
/// Fetch and mutation tasks run detached; their outcomes arrive here as
/// plain data (errors flattened to display strings) so the event loop owns
/// all state transitions.
#[derive(Debug)]
pub enum Event {
    /// A key press event.
    Key(KeyEvent),
    /// A periodic tick for rendering.
    Tick,
    /// Terminal resize event.
    Resize(u16, u16),
    /// Full-tree fetch finished (recursive variant resync).
    TreeLoaded(std::result::Result<Vec<Node>, String>),
    /// One column's sibling list resolved (lazy variant).
    ColumnLoaded {
        request: ColumnRequest,
        result: std::result::Result<Vec<Node>, String>,
    },
    /// A delete/create call against the remote store finished.
    MutationComplete {
        kind: MutationKind,
        result: std::result::Result<(), String>,
    },
}

/// Async event handler that polls crossterm events and forwards them via a
/// channel, alongside completion events posted by spawned fetch tasks.
pub struct EventHandler {
    rx: mpsc::UnboundedReceiver<Event>,
    tx: mpsc::UnboundedSender<Event>,
}

impl EventHandler {
    /// Create a new EventHandler with the given tick rate.
    pub fn new(tick_rate: Duration) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        let event_tx = tx.clone();

        tokio::spawn(async move {
            loop {
                if event::poll(tick_rate).unwrap_or(false) {
                    match event::read() {
                        Ok(CrosstermEvent::Key(key)) => {
                            if event_tx.send(Event::Key(key)).is_err() {
                                break;
                            }
                        }
                        Ok(CrosstermEvent::Resize(w, h)) => {
                            if event_tx.send(Event::Resize(w, h)).is_err() {
                                break;
                            }
                        }
                        _ => {}
                    }
                } else if event_tx.send(Event::Tick).is_err() {
                    break;
                }
            }
        });

        Self { rx, tx }
    }

    /// Get a sender clone for spawned tasks to post completion events.
    pub fn sender(&self) -> mpsc::UnboundedSender<Event> {
        self.tx.clone()
    }

    /// Receive the next event (blocks until available).
    pub async fn next(&mut self) -> Result<Event> {
        self.rx
            .recv()
            .await
            .ok_or_else(|| crate::error::AppError::Terminal("Event channel closed".into()))
    }
}
