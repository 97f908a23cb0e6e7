//! Core traits and types for instruction-stepped emulation.
//!
//! Machines own a bus and a CPU. The CPU borrows the bus for the duration
//! of one instruction; the machine decides when interrupts happen and how
//! many cycles make up a frame.

mod bus;
mod clock;
mod cpu;
mod observable;
mod ticks;

pub use bus::{Bus, IoBus, SimpleBus};
pub use clock::MasterClock;
pub use cpu::Cpu;
pub use observable::{Observable, Value, parse_address};
pub use ticks::Ticks;
