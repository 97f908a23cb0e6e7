//! Per-instruction trace records.

use std::fmt;

use crate::disasm::format_instruction;
use crate::registers::Registers;

/// Callback invoked before each instruction executes.
pub type Tracer = Box<dyn FnMut(&TraceEntry) + Send>;

/// CPU state captured just before an instruction executes.
///
/// `regs.pc` is the address of the opcode; `cycles` is the counter before
/// the instruction's cost is added.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TraceEntry {
    pub regs: Registers,
    pub opcode: u8,
    pub operand: u16,
    pub cycles: u64,
}

impl TraceEntry {
    /// Disassembly of the traced instruction.
    #[must_use]
    pub fn disassembly(&self) -> String {
        format_instruction(self.opcode, self.operand)
    }
}

impl fmt::Display for TraceEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let r = &self.regs;
        write!(
            f,
            "{:04X}  {:02X}  {:<14} AF={:04X} BC={:04X} DE={:04X} HL={:04X} SP={:04X} {} CYC={}",
            r.pc,
            self.opcode,
            self.disassembly(),
            r.af(),
            r.bc(),
            r.de(),
            r.hl(),
            r.sp,
            r.f,
            self.cycles,
        )
    }
}

/// A tracer that writes every instruction to the `log` crate at trace level.
#[must_use]
pub fn log_tracer() -> Tracer {
    Box::new(|entry| log::trace!(target: "intel_8080::trace", "{entry}"))
}
