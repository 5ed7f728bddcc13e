//! Command queue - serializes player input
//!
//! Commands are applied strictly one at a time. While a command's animation
//! is playing the queue is busy and holds everything behind it, so no command
//! ever observes a half-applied piece.

use std::collections::VecDeque;

use crate::types::Command;

#[derive(Debug, Clone, Default)]
pub struct CommandQueue {
    pending: VecDeque<Command>,
    busy: bool,
}

impl CommandQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a command behind everything already queued
    pub fn push(&mut self, command: Command) {
        self.pending.push_back(command);
    }

    /// Next command to apply, or `None` while busy or empty
    pub fn next_ready(&mut self) -> Option<Command> {
        if self.busy {
            return None;
        }
        self.pending.pop_front()
    }

    /// Hold the queue until [`CommandQueue::finish`]
    pub fn begin(&mut self) {
        self.busy = true;
    }

    /// Release the queue after the running command completed
    pub fn finish(&mut self) {
        self.busy = false;
    }

    pub fn is_busy(&self) -> bool {
        self.busy
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Drop all pending commands and release the queue
    pub fn clear(&mut self) {
        self.pending.clear();
        self.busy = false;
    }
}
