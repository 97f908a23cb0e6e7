//! Intel 8080 CPU core, one whole instruction per step.

mod execute;

use std::fmt;

use emu_core::{Bus, Cpu, IoBus, Observable, Value};

use crate::opcode::{Mode, OPCODES};
use crate::registers::Registers;
use crate::trace::{TraceEntry, Tracer};

/// Intel 8080 CPU.
///
/// The CPU does not own the bus; it is passed to
/// [`execute_instruction`](Self::execute_instruction) on every call so the
/// machine can share it with its own devices. Cycles accumulate in an
/// internal counter that the caller reads and trims with
/// [`consume_cycles`](Self::consume_cycles).
pub struct I8080 {
    /// Register file, exposed for test setup and inspection.
    pub regs: Registers,
    cycles: u64,
    tracer: Option<Tracer>,
}

impl I8080 {
    /// Create a CPU in power-on state.
    #[must_use]
    pub fn new() -> Self {
        Self {
            regs: Registers::new(),
            cycles: 0,
            tracer: None,
        }
    }

    /// Cycles accumulated since reset (minus any consumed).
    #[must_use]
    pub const fn cycles(&self) -> u64 {
        self.cycles
    }

    /// Overwrite the cycle counter.
    pub fn set_cycles(&mut self, cycles: u64) {
        self.cycles = cycles;
    }

    /// Remove `n` cycles from the counter, keeping any remainder.
    ///
    /// Callers only consume what has already run; the counter never goes
    /// below zero.
    pub fn consume_cycles(&mut self, n: u64) {
        debug_assert!(
            self.cycles >= n,
            "consuming {n} cycles with only {} on the counter",
            self.cycles
        );
        self.cycles -= n;
    }

    /// Install a per-instruction trace callback, or remove it with `None`.
    pub fn set_tracer(&mut self, tracer: Option<Tracer>) {
        self.tracer = tracer;
    }

    /// Fetch, decode and execute one instruction.
    ///
    /// A halted CPU does nothing and charges nothing; only an interrupt or a
    /// reset gets it going again.
    pub fn execute_instruction<B: IoBus>(&mut self, bus: &mut B) {
        if self.regs.halted {
            return;
        }

        let start = self.regs;
        let opcode = bus.read(start.pc);
        let inst = &OPCODES[opcode as usize];
        let operand = match inst.mode {
            Mode::Implied => 0,
            Mode::Immediate8 => u16::from(bus.read(start.pc.wrapping_add(1))),
            Mode::Immediate16 => bus.read16(start.pc.wrapping_add(1)),
        };
        self.regs.pc = start.pc.wrapping_add(inst.size());

        if let Some(tracer) = self.tracer.as_mut() {
            tracer(&TraceEntry {
                regs: start,
                opcode,
                operand,
                cycles: self.cycles,
            });
        }

        let cost = self.execute(bus, inst, operand);
        self.cycles += u64::from(cost);
    }

    /// Enter the interrupt handler at `vector`.
    ///
    /// Pushes the return address, jumps to `vector` and clears the
    /// interrupt-enable flag. The flag is not consulted: the board raises
    /// its interrupts unconditionally, and a program that never executes EI
    /// is still interrupted. A halted CPU has PC parked on its HLT; it wakes
    /// up and returns to the instruction after it. No cycles are charged.
    pub fn interrupt<B: Bus>(&mut self, bus: &mut B, vector: u16) {
        if self.regs.halted {
            self.regs.halted = false;
            self.regs.pc = self.regs.pc.wrapping_add(1);
        }
        let pc = self.regs.pc;
        self.push(bus, pc);
        self.regs.pc = vector;
        self.regs.inte = false;
    }

    /// Return to power-on state: registers cleared, counter zeroed.
    ///
    /// The tracer, if any, stays installed.
    pub fn reset(&mut self) {
        log::debug!("8080 reset");
        self.regs = Registers::new();
        self.cycles = 0;
    }

    /// Push a word: SP decrements by two, high byte lands at the higher address.
    pub fn push<B: Bus>(&mut self, bus: &mut B, value: u16) {
        self.regs.sp = self.regs.sp.wrapping_sub(2);
        bus.write16(self.regs.sp, value);
    }

    /// Pop a word pushed by [`push`](Self::push).
    pub fn pop<B: Bus>(&mut self, bus: &mut B) -> u16 {
        let value = bus.read16(self.regs.sp);
        self.regs.sp = self.regs.sp.wrapping_add(2);
        value
    }
}

impl Default for I8080 {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for I8080 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("I8080")
            .field("regs", &self.regs)
            .field("cycles", &self.cycles)
            .field("tracing", &self.tracer.is_some())
            .finish()
    }
}

impl<B: IoBus> Cpu<B> for I8080 {
    fn step(&mut self, bus: &mut B) -> u32 {
        let before = self.cycles;
        self.execute_instruction(bus);
        (self.cycles - before) as u32
    }

    fn interrupt(&mut self, bus: &mut B, vector: u16) {
        I8080::interrupt(self, bus, vector);
    }

    fn reset(&mut self) {
        I8080::reset(self);
    }

    fn pc(&self) -> u16 {
        self.regs.pc
    }

    fn is_halted(&self) -> bool {
        self.regs.halted
    }
}

impl Observable for I8080 {
    fn query(&self, path: &str) -> Option<Value> {
        let r = &self.regs;
        match path {
            "a" => Some(r.a.into()),
            "f" => Some(r.f.bits().into()),
            "b" => Some(r.b.into()),
            "c" => Some(r.c.into()),
            "d" => Some(r.d.into()),
            "e" => Some(r.e.into()),
            "h" => Some(r.h.into()),
            "l" => Some(r.l.into()),

            "af" => Some(r.af().into()),
            "bc" => Some(r.bc().into()),
            "de" => Some(r.de().into()),
            "hl" => Some(r.hl().into()),
            "sp" => Some(r.sp.into()),
            "pc" => Some(r.pc.into()),

            "flags.s" => Some(r.f.sign().into()),
            "flags.z" => Some(r.f.zero().into()),
            "flags.h" => Some(r.f.half_carry().into()),
            "flags.p" => Some(r.f.parity().into()),
            "flags.c" => Some(r.f.carry().into()),

            "inte" => Some(r.inte.into()),
            "halted" => Some(r.halted.into()),
            "cycles" => Some(self.cycles.into()),
            _ => None,
        }
    }

    fn query_paths(&self) -> &'static [&'static str] {
        &[
            "a", "f", "b", "c", "d", "e", "h", "l", "af", "bc", "de", "hl", "sp", "pc", "flags.s",
            "flags.z", "flags.h", "flags.p", "flags.c", "inte", "halted", "cycles",
        ]
    }
}
