//! Clock configuration.

use crate::Ticks;

/// Clock that drives a machine's CPU.
///
/// Everything the scheduler does is expressed in cycles of this clock, so
/// frame budgets derive from its frequency and the display refresh rate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MasterClock {
    /// Frequency in Hz (e.g., `2_000_000` for a 2 MHz 8080).
    pub frequency_hz: u64,
}

impl MasterClock {
    #[must_use]
    pub const fn new(frequency_hz: u64) -> Self {
        Self { frequency_hz }
    }

    /// Cycles per frame at the given frame rate (integer division).
    #[must_use]
    pub const fn ticks_per_frame(&self, frames_per_second: u64) -> Ticks {
        Ticks::new(self.frequency_hz / frames_per_second)
    }
}
