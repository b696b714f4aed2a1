//! Simulated clock.

/// Monotonic simulated time in milliseconds.
///
/// Starts at 0 and moves only when a handler emits a step.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord)]
pub struct Clock {
    now: u64,
}

impl Clock {
    /// Creates a clock at time 0.
    pub const fn new() -> Self {
        Self { now: 0 }
    }

    /// Current simulated time.
    pub const fn now(&self) -> u64 {
        self.now
    }

    /// Moves the clock forward by `by` milliseconds.
    pub const fn advance(&mut self, by: u64) {
        self.now = self.now.saturating_add(by);
    }
}
