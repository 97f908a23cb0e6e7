//! Instruction execution for the 8080.

use emu_core::{Bus, IoBus};

use crate::alu;
use crate::opcode::{AluOp, Condition, Instruction, Op, Operand, Pair};

use super::I8080;

impl I8080 {
    /// Execute a decoded instruction whose operand bytes have already been
    /// fetched and whose PC already points past it. Returns the cycle cost.
    pub(super) fn execute<B: IoBus>(&mut self, bus: &mut B, inst: &Instruction, operand: u16) -> u8 {
        let mut taken = true;

        match inst.op {
            Op::Nop => {}

            Op::Lxi(pair) => self.set_pair(pair, operand),
            Op::Stax(pair) => bus.write(self.pair(pair), self.regs.a),
            Op::Ldax(pair) => self.regs.a = bus.read(self.pair(pair)),
            Op::Inx(pair) => self.set_pair(pair, self.pair(pair).wrapping_add(1)),
            Op::Dcx(pair) => self.set_pair(pair, self.pair(pair).wrapping_sub(1)),
            Op::Dad(pair) => {
                let (hl, value) = (self.regs.hl(), self.pair(pair));
                let sum = alu::dad(&mut self.regs.f, hl, value);
                self.regs.set_hl(sum);
            }

            Op::Inr(r) => {
                let value = self.read_operand(bus, r);
                let result = alu::inr(&mut self.regs.f, value);
                self.write_operand(bus, r, result);
            }
            Op::Dcr(r) => {
                let value = self.read_operand(bus, r);
                let result = alu::dcr(&mut self.regs.f, value);
                self.write_operand(bus, r, result);
            }
            Op::Mvi(r) => self.write_operand(bus, r, operand as u8),
            Op::Mov(dst, src) => {
                let value = self.read_operand(bus, src);
                self.write_operand(bus, dst, value);
            }

            Op::Rlc => self.regs.a = alu::rlc(&mut self.regs.f, self.regs.a),
            Op::Rrc => self.regs.a = alu::rrc(&mut self.regs.f, self.regs.a),
            Op::Ral => self.regs.a = alu::ral(&mut self.regs.f, self.regs.a),
            Op::Rar => self.regs.a = alu::rar(&mut self.regs.f, self.regs.a),

            Op::Shld => bus.write16(operand, self.regs.hl()),
            Op::Lhld => {
                let value = bus.read16(operand);
                self.regs.set_hl(value);
            }
            Op::Sta => bus.write(operand, self.regs.a),
            Op::Lda => self.regs.a = bus.read(operand),

            Op::Daa => self.regs.a = alu::daa(&mut self.regs.f, self.regs.a),
            Op::Cma => self.regs.a = !self.regs.a,
            Op::Stc => self.regs.f.set_carry(true),
            Op::Cmc => {
                let carry = self.regs.f.carry();
                self.regs.f.set_carry(!carry);
            }

            // PC stays on the HLT until an interrupt moves it on.
            Op::Hlt => {
                self.regs.halted = true;
                self.regs.pc = self.regs.pc.wrapping_sub(1);
            }

            Op::Alu(op, src) => {
                let data = self.read_operand(bus, src);
                self.accumulate(op, data);
            }
            Op::AluImm(op) => self.accumulate(op, operand as u8),

            Op::Ret => self.regs.pc = self.pop(bus),
            Op::RetIf(cond) => {
                taken = self.condition(cond);
                if taken {
                    self.regs.pc = self.pop(bus);
                }
            }
            Op::Jmp => self.regs.pc = operand,
            Op::JmpIf(cond) => {
                taken = self.condition(cond);
                if taken {
                    self.regs.pc = operand;
                }
            }
            Op::Call => self.call(bus, operand),
            Op::CallIf(cond) => {
                taken = self.condition(cond);
                if taken {
                    self.call(bus, operand);
                }
            }
            Op::Rst(n) => self.call(bus, u16::from(n) * 8),

            Op::Push(pair) => {
                let value = self.pair(pair);
                self.push(bus, value);
            }
            Op::Pop(pair) => {
                let value = self.pop(bus);
                self.set_pair(pair, value);
            }

            Op::Out => bus.write_io(operand as u8, self.regs.a),
            Op::In => self.regs.a = bus.read_io(operand as u8),

            Op::Xthl => {
                let top = bus.read16(self.regs.sp);
                bus.write16(self.regs.sp, self.regs.hl());
                self.regs.set_hl(top);
            }
            Op::Xchg => {
                let de = self.regs.de();
                self.regs.set_de(self.regs.hl());
                self.regs.set_hl(de);
            }
            Op::Sphl => self.regs.sp = self.regs.hl(),
            Op::Pchl => self.regs.pc = self.regs.hl(),

            Op::Di => self.regs.inte = false,
            Op::Ei => self.regs.inte = true,
        }

        inst.cycles.resolve(taken)
    }

    fn call<B: Bus>(&mut self, bus: &mut B, target: u16) {
        let ret = self.regs.pc;
        self.push(bus, ret);
        self.regs.pc = target;
    }

    /// Apply an accumulator operation. CMP discards the result.
    fn accumulate(&mut self, op: AluOp, data: u8) {
        let f = &mut self.regs.f;
        let a = self.regs.a;
        self.regs.a = match op {
            AluOp::Add => alu::add(f, a, data, false),
            AluOp::Adc => {
                let carry = f.carry();
                alu::add(f, a, data, carry)
            }
            AluOp::Sub => alu::sub(f, a, data, false),
            AluOp::Sbb => {
                let borrow = f.carry();
                alu::sub(f, a, data, borrow)
            }
            AluOp::Ana => alu::ana(f, a, data),
            AluOp::Xra => alu::xra(f, a, data),
            AluOp::Ora => alu::ora(f, a, data),
            AluOp::Cmp => {
                let _ = alu::sub(f, a, data, false);
                a
            }
        };
    }

    fn condition(&self, cond: Condition) -> bool {
        let f = self.regs.f;
        match cond {
            Condition::NotZero => !f.zero(),
            Condition::Zero => f.zero(),
            Condition::NoCarry => !f.carry(),
            Condition::Carry => f.carry(),
            Condition::ParityOdd => !f.parity(),
            Condition::ParityEven => f.parity(),
            Condition::Plus => !f.sign(),
            Condition::Minus => f.sign(),
        }
    }

    fn read_operand<B: Bus>(&self, bus: &mut B, operand: Operand) -> u8 {
        match operand {
            Operand::B => self.regs.b,
            Operand::C => self.regs.c,
            Operand::D => self.regs.d,
            Operand::E => self.regs.e,
            Operand::H => self.regs.h,
            Operand::L => self.regs.l,
            Operand::M => bus.read(self.regs.hl()),
            Operand::A => self.regs.a,
        }
    }

    fn write_operand<B: Bus>(&mut self, bus: &mut B, operand: Operand, value: u8) {
        match operand {
            Operand::B => self.regs.b = value,
            Operand::C => self.regs.c = value,
            Operand::D => self.regs.d = value,
            Operand::E => self.regs.e = value,
            Operand::H => self.regs.h = value,
            Operand::L => self.regs.l = value,
            Operand::M => bus.write(self.regs.hl(), value),
            Operand::A => self.regs.a = value,
        }
    }

    fn pair(&self, pair: Pair) -> u16 {
        match pair {
            Pair::BC => self.regs.bc(),
            Pair::DE => self.regs.de(),
            Pair::HL => self.regs.hl(),
            Pair::SP => self.regs.sp,
            Pair::PSW => self.regs.af(),
        }
    }

    fn set_pair(&mut self, pair: Pair, value: u16) {
        match pair {
            Pair::BC => self.regs.set_bc(value),
            Pair::DE => self.regs.set_de(value),
            Pair::HL => self.regs.set_hl(value),
            Pair::SP => self.regs.sp = value,
            Pair::PSW => self.regs.set_af(value),
        }
    }
}
