//! Interrupt and cycle scheduling.
//!
//! The video hardware raises RST 1 when the beam reaches the middle of the
//! screen and RST 2 at vertical blank. One external tick therefore runs two
//! bursts of half a frame's cycles each, and ends each burst with its
//! interrupt.
//!
//! The CPU's cycle counter is never zeroed between bursts: the budget is
//! subtracted from it, so an instruction that runs past the end of one
//! burst shortens the next by the same amount and long-run timing holds.

use emu_core::{IoBus, MasterClock, Ticks};
use intel_8080::I8080;

/// RST 1: mid-screen interrupt.
pub const MID_SCREEN_VECTOR: u16 = 0x0008;

/// RST 2: vertical blank interrupt.
pub const VBLANK_VECTOR: u16 = 0x0010;

/// Runs the CPU in two interrupt-terminated bursts per tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Scheduler {
    burst: Ticks,
    vectors: [u16; 2],
}

impl Scheduler {
    /// Scheduler for `cycles_per_tick`, split into two equal bursts.
    #[must_use]
    pub const fn new(cycles_per_tick: Ticks, vectors: [u16; 2]) -> Self {
        Self {
            burst: cycles_per_tick.split(2),
            vectors,
        }
    }

    /// Scheduler for a CPU clock and a tick rate, with the arcade vectors.
    #[must_use]
    pub const fn from_clock(clock: MasterClock, tick_rate_hz: u64) -> Self {
        Self::new(
            clock.ticks_per_frame(tick_rate_hz),
            [MID_SCREEN_VECTOR, VBLANK_VECTOR],
        )
    }

    /// Cycles per burst.
    #[must_use]
    pub const fn burst(&self) -> Ticks {
        self.burst
    }

    /// Run one tick: two bursts, each ended by its interrupt.
    ///
    /// Returns the cycles executed during the tick.
    pub fn run_tick<B: IoBus>(&self, cpu: &mut I8080, bus: &mut B) -> u64 {
        let budget = self.burst.get();
        let mut executed = 0;

        for vector in self.vectors {
            let start = cpu.cycles();
            while cpu.cycles() < budget {
                if cpu.regs.halted {
                    // Nothing runs until the interrupt; let the clock catch up.
                    cpu.set_cycles(budget);
                    break;
                }
                cpu.execute_instruction(bus);
            }
            executed += cpu.cycles().saturating_sub(start);
            cpu.consume_cycles(budget);

            log::trace!("interrupt {vector:#06X} at pc={:#06X}", cpu.regs.pc);
            cpu.interrupt(bus, vector);
        }

        executed
    }
}

impl Default for Scheduler {
    fn default() -> Self {
        Self::from_clock(
            MasterClock::new(crate::config::CPU_FREQUENCY),
            crate::config::TICK_RATE_HZ,
        )
    }
}
