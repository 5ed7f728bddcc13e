//! Fall scheduler - resettable interval timer for gravity
//!
//! The scheduler never owns a clock or a thread. The host loop polls
//! [`FallScheduler::tick`] once per frame with the elapsed time, and acts on
//! the returned flag (the "callback").

/// Interval timer state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchedulerState {
    Running,
    Stopped,
}

/// Accumulates frame time and fires once per interval
#[derive(Debug, Clone, PartialEq)]
pub struct FallScheduler {
    interval: f32,
    elapsed: f32,
    state: SchedulerState,
}

impl FallScheduler {
    /// Create a stopped scheduler with `interval` seconds between steps
    pub fn new(interval: f32) -> Self {
        Self {
            interval,
            elapsed: 0.0,
            state: SchedulerState::Stopped,
        }
    }

    pub fn interval(&self) -> f32 {
        self.interval
    }

    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    pub fn state(&self) -> SchedulerState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == SchedulerState::Running
    }

    /// Change the threshold without touching accumulated progress
    pub fn update_interval(&mut self, interval: f32) {
        self.interval = interval;
    }

    /// Reset progress and start counting
    pub fn start(&mut self) {
        self.state = SchedulerState::Running;
        self.elapsed = 0.0;
    }

    /// Halt counting (progress and interval are kept)
    pub fn stop(&mut self) {
        self.state = SchedulerState::Stopped;
    }

    /// Advance by `delta` seconds.
    ///
    /// Returns true exactly once when the accumulated time exceeds the
    /// interval; the accumulator is then reset.
    pub fn tick(&mut self, delta: f32) -> bool {
        if self.state == SchedulerState::Stopped {
            return false;
        }

        self.elapsed += delta;
        if self.elapsed > self.interval {
            self.elapsed = 0.0;
            return true;
        }
        false
    }
}
