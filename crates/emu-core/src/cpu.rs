//! CPU core trait.

use crate::IoBus;

/// A CPU that executes whole instructions.
///
/// The bus is passed in, not owned, so the machine can keep the same bus
/// for its own devices between instructions. The type parameter `B` is the
/// bus type this CPU operates on.
pub trait Cpu<B: IoBus> {
    /// Execute one instruction. Returns cycles consumed.
    fn step(&mut self, bus: &mut B) -> u32;

    /// Enter the interrupt handler at `vector`.
    fn interrupt(&mut self, bus: &mut B, vector: u16);

    /// Reset the CPU to its initial state.
    fn reset(&mut self);

    /// Get the current program counter.
    fn pc(&self) -> u16;

    /// Returns true if the CPU is halted.
    fn is_halted(&self) -> bool;
}
