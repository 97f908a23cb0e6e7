//! Intel 8080 CPU interpreter.
//!
//! Each call to [`I8080::execute_instruction`] runs exactly one whole
//! instruction against a caller-supplied [`emu_core::IoBus`] and adds its
//! cycle cost to an internal counter. Decoding goes through the static
//! [`OPCODES`] table, so every one of the 256 byte values, including the
//! undocumented aliases, has a defined meaning.

pub mod alu;
mod cpu;
mod disasm;
mod flags;
pub mod opcode;
mod registers;
mod trace;

pub use cpu::I8080;
pub use disasm::{disassemble, format_instruction};
pub use flags::{CARRY, Flags, HALF_CARRY, PARITY, RESERVED, SIGN, ZERO, parity_check};
pub use opcode::{Instruction, OPCODES};
pub use registers::{Reg, Registers};
pub use trace::{TraceEntry, Tracer, log_tracer};
