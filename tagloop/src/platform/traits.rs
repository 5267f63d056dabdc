// tagloop/src/platform/traits.rs

use crate::types::Led;

/// Millisecond deadline created by [`Platform::timer_create`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Timer {
    deadline_ms: u64,
}

impl Timer {
    pub const fn at(deadline_ms: u64) -> Self {
        Self { deadline_ms }
    }

    pub fn deadline_ms(&self) -> u64 {
        self.deadline_ms
    }
}

/// Board services used by the discovery loop
pub trait Platform {
    /// Block for `ms` milliseconds
    fn delay_ms(&mut self, ms: u32);

    /// Monotonic millisecond clock
    fn now_ms(&self) -> u64;

    fn timer_create(&self, ms: u32) -> Timer {
        Timer::at(self.now_ms() + u64::from(ms))
    }

    fn timer_expired(&self, timer: Timer) -> bool {
        self.now_ms() >= timer.deadline_ms
    }

    /// User button level; the button is active-low.
    fn button_is_low(&mut self) -> bool;

    fn led_on(&mut self, led: Led);

    fn led_off(&mut self, led: Led);

    /// Whether a debug probe is attached. Enables verbose dumps.
    fn debugger_attached(&self) -> bool {
        false
    }
}
