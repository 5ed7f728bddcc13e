//! Typed observer list for session events
//!
//! UI panels and debug views register callbacks; the session fires events
//! after every state transition and score change. The core never listens to
//! its own events.

use std::fmt;

use crate::types::{RunState, Score};

/// Something observers may want to react to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    StateChange { state: RunState, is_game_over: bool },
    ScoreUpdate(Score),
}

type Listener = Box<dyn FnMut(&GameEvent)>;

/// Register/fire callback list
#[derive(Default)]
pub struct EventBus {
    listeners: Vec<Listener>,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a listener; it receives every event fired afterwards
    pub fn register(&mut self, listener: impl FnMut(&GameEvent) + 'static) {
        self.listeners.push(Box::new(listener));
    }

    /// Deliver `event` to every listener in registration order
    pub fn fire(&mut self, event: &GameEvent) {
        for listener in &mut self.listeners {
            listener(event);
        }
    }

    pub fn len(&self) -> usize {
        self.listeners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }
}

impl fmt::Debug for EventBus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventBus")
            .field("listeners", &self.listeners.len())
            .finish()
    }
}
