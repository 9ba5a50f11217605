//! Trailing-edge debounce state machine.
//!
//! The session owns a [`Debouncer`] and drives it from `tokio::select!`:
//! every processed event re-arms it, and the write runs once the deadline
//! passes without further events.

use std::time::Duration;
use tokio::time::Instant;

#[derive(Debug, Clone)]
pub struct Debouncer {
    delay: Duration,
    deadline: Option<Instant>,
}

impl Debouncer {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            deadline: None,
        }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Arm, or push an armed deadline back to `delay` from now.
    pub fn arm(&mut self) {
        self.deadline = Some(Instant::now() + self.delay);
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    pub fn is_armed(&self) -> bool {
        self.deadline.is_some()
    }

    /// Disarm, returning whether a write was pending.
    pub fn fire(&mut self) -> bool {
        self.deadline.take().is_some()
    }
}
