//! Static 8080 opcode table.
//!
//! Every byte value decodes to an [`Instruction`]: an operation tag with its
//! register/pair/condition operands, the addressing mode that says how many
//! operand bytes follow, and the cycle cost. The table is built at compile
//! time by [`decode`], whose match over `u8` has no wildcard arm, so a
//! missing opcode is a compile error rather than a silent no-op.
//!
//! Twelve encodings are undocumented aliases of documented instructions:
//! `$08 $10 $18 $20 $28 $30 $38` (NOP), `$CB` (JMP), `$D9` (RET) and
//! `$DD $ED $FD` (CALL). They decode to the same operation and cost as the
//! primary opcode and are marked with `documented: false`.

/// 8-bit operand: a register or the memory byte at HL (`M`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operand {
    B,
    C,
    D,
    E,
    H,
    L,
    M,
    A,
}

impl Operand {
    /// Decode the 3-bit register field used by MOV, MVI, INR, DCR and ALU ops.
    #[must_use]
    pub const fn from_bits(bits: u8) -> Self {
        match bits & 0x07 {
            0 => Self::B,
            1 => Self::C,
            2 => Self::D,
            3 => Self::E,
            4 => Self::H,
            5 => Self::L,
            6 => Self::M,
            _ => Self::A,
        }
    }

    /// True for the memory operand, which costs extra cycles.
    #[must_use]
    pub const fn is_memory(self) -> bool {
        matches!(self, Self::M)
    }
}

/// 16-bit register pair operand.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pair {
    BC,
    DE,
    HL,
    SP,
    /// A and flags, only used by PUSH and POP.
    PSW,
}

impl Pair {
    /// Decode bits 4-5 where 3 means SP (LXI, INX, DCX, DAD).
    const fn with_sp(opcode: u8) -> Self {
        match (opcode >> 4) & 0x03 {
            0 => Self::BC,
            1 => Self::DE,
            2 => Self::HL,
            _ => Self::SP,
        }
    }

    /// Decode bits 4-5 where 3 means PSW (PUSH, POP).
    const fn with_psw(opcode: u8) -> Self {
        match (opcode >> 4) & 0x03 {
            0 => Self::BC,
            1 => Self::DE,
            2 => Self::HL,
            _ => Self::PSW,
        }
    }
}

/// Branch condition for conditional jumps, calls and returns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Condition {
    NotZero,
    Zero,
    NoCarry,
    Carry,
    ParityOdd,
    ParityEven,
    Plus,
    Minus,
}

impl Condition {
    /// Decode the 3-bit condition field (bits 3-5).
    const fn from_opcode(opcode: u8) -> Self {
        match (opcode >> 3) & 0x07 {
            0 => Self::NotZero,
            1 => Self::Zero,
            2 => Self::NoCarry,
            3 => Self::Carry,
            4 => Self::ParityOdd,
            5 => Self::ParityEven,
            6 => Self::Plus,
            _ => Self::Minus,
        }
    }
}

/// Accumulator operation shared by the register and immediate ALU groups.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AluOp {
    Add,
    Adc,
    Sub,
    Sbb,
    Ana,
    Xra,
    Ora,
    Cmp,
}

impl AluOp {
    /// Decode bits 3-5.
    const fn from_opcode(opcode: u8) -> Self {
        match (opcode >> 3) & 0x07 {
            0 => Self::Add,
            1 => Self::Adc,
            2 => Self::Sub,
            3 => Self::Sbb,
            4 => Self::Ana,
            5 => Self::Xra,
            6 => Self::Ora,
            _ => Self::Cmp,
        }
    }
}

/// Operation tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Op {
    Nop,
    Lxi(Pair),
    Stax(Pair),
    Ldax(Pair),
    Inx(Pair),
    Dcx(Pair),
    Dad(Pair),
    Inr(Operand),
    Dcr(Operand),
    Mvi(Operand),
    Mov(Operand, Operand),
    Rlc,
    Rrc,
    Ral,
    Rar,
    Shld,
    Lhld,
    Sta,
    Lda,
    Daa,
    Cma,
    Stc,
    Cmc,
    Hlt,
    Alu(AluOp, Operand),
    AluImm(AluOp),
    Ret,
    RetIf(Condition),
    Jmp,
    JmpIf(Condition),
    Call,
    CallIf(Condition),
    Push(Pair),
    Pop(Pair),
    Rst(u8),
    Out,
    In,
    Xthl,
    Xchg,
    Sphl,
    Pchl,
    Di,
    Ei,
}

/// How many operand bytes follow the opcode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// No operand bytes.
    Implied,
    /// One byte: immediate data or a port number.
    Immediate8,
    /// Two bytes, little-endian: immediate data or an address.
    Immediate16,
}

/// Cycle cost of an instruction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cycles {
    Fixed(u8),
    /// Conditional branches cost `taken` when the condition holds.
    Conditional { taken: u8, not_taken: u8 },
}

impl Cycles {
    /// Resolve the cost given whether the condition held.
    #[must_use]
    pub const fn resolve(self, taken: bool) -> u8 {
        match self {
            Self::Fixed(n) => n,
            Self::Conditional { taken: t, not_taken: n } => {
                if taken {
                    t
                } else {
                    n
                }
            }
        }
    }
}

/// One opcode table entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Instruction {
    pub op: Op,
    pub mode: Mode,
    pub cycles: Cycles,
    pub mnemonic: &'static str,
    pub documented: bool,
}

impl Instruction {
    /// Instruction length in bytes, including the opcode.
    #[must_use]
    pub const fn size(&self) -> u16 {
        match self.mode {
            Mode::Implied => 1,
            Mode::Immediate8 => 2,
            Mode::Immediate16 => 3,
        }
    }
}

/// The 256-entry dispatch table.
pub static OPCODES: [Instruction; 256] = build_table();

const fn build_table() -> [Instruction; 256] {
    let mut table = [decode(0x00); 256];
    let mut i = 0;
    while i < 256 {
        table[i] = decode(i as u8);
        i += 1;
    }
    table
}

/// Decode one opcode byte.
#[must_use]
pub const fn decode(opcode: u8) -> Instruction {
    use Cycles::{Conditional, Fixed};
    use Mode::{Immediate8, Immediate16, Implied};

    let mut documented = true;

    let (op, mode, cycles) = match opcode {
        0x00 => (Op::Nop, Implied, Fixed(4)),
        0x08 | 0x10 | 0x18 | 0x20 | 0x28 | 0x30 | 0x38 => {
            documented = false;
            (Op::Nop, Implied, Fixed(4))
        }

        0x01 | 0x11 | 0x21 | 0x31 => (Op::Lxi(Pair::with_sp(opcode)), Immediate16, Fixed(10)),
        0x02 | 0x12 => (Op::Stax(Pair::with_sp(opcode)), Implied, Fixed(7)),
        0x0A | 0x1A => (Op::Ldax(Pair::with_sp(opcode)), Implied, Fixed(7)),
        0x03 | 0x13 | 0x23 | 0x33 => (Op::Inx(Pair::with_sp(opcode)), Implied, Fixed(5)),
        0x0B | 0x1B | 0x2B | 0x3B => (Op::Dcx(Pair::with_sp(opcode)), Implied, Fixed(5)),
        0x09 | 0x19 | 0x29 | 0x39 => (Op::Dad(Pair::with_sp(opcode)), Implied, Fixed(10)),

        0x04 | 0x0C | 0x14 | 0x1C | 0x24 | 0x2C | 0x34 | 0x3C => {
            let r = Operand::from_bits(opcode >> 3);
            (Op::Inr(r), Implied, Fixed(if r.is_memory() { 10 } else { 5 }))
        }
        0x05 | 0x0D | 0x15 | 0x1D | 0x25 | 0x2D | 0x35 | 0x3D => {
            let r = Operand::from_bits(opcode >> 3);
            (Op::Dcr(r), Implied, Fixed(if r.is_memory() { 10 } else { 5 }))
        }
        0x06 | 0x0E | 0x16 | 0x1E | 0x26 | 0x2E | 0x36 | 0x3E => {
            let r = Operand::from_bits(opcode >> 3);
            (Op::Mvi(r), Immediate8, Fixed(if r.is_memory() { 10 } else { 7 }))
        }

        0x07 => (Op::Rlc, Implied, Fixed(4)),
        0x0F => (Op::Rrc, Implied, Fixed(4)),
        0x17 => (Op::Ral, Implied, Fixed(4)),
        0x1F => (Op::Rar, Implied, Fixed(4)),

        0x22 => (Op::Shld, Immediate16, Fixed(16)),
        0x2A => (Op::Lhld, Immediate16, Fixed(16)),
        0x32 => (Op::Sta, Immediate16, Fixed(13)),
        0x3A => (Op::Lda, Immediate16, Fixed(13)),

        0x27 => (Op::Daa, Implied, Fixed(4)),
        0x2F => (Op::Cma, Implied, Fixed(4)),
        0x37 => (Op::Stc, Implied, Fixed(4)),
        0x3F => (Op::Cmc, Implied, Fixed(4)),

        0x76 => (Op::Hlt, Implied, Fixed(7)),
        0x40..=0x75 | 0x77..=0x7F => {
            let dst = Operand::from_bits(opcode >> 3);
            let src = Operand::from_bits(opcode);
            let cost = if dst.is_memory() || src.is_memory() { 7 } else { 5 };
            (Op::Mov(dst, src), Implied, Fixed(cost))
        }

        0x80..=0xBF => {
            let src = Operand::from_bits(opcode);
            let cost = if src.is_memory() { 7 } else { 4 };
            (Op::Alu(AluOp::from_opcode(opcode), src), Implied, Fixed(cost))
        }

        0xC0 | 0xC8 | 0xD0 | 0xD8 | 0xE0 | 0xE8 | 0xF0 | 0xF8 => (
            Op::RetIf(Condition::from_opcode(opcode)),
            Implied,
            Conditional { taken: 11, not_taken: 5 },
        ),
        0xC2 | 0xCA | 0xD2 | 0xDA | 0xE2 | 0xEA | 0xF2 | 0xFA => (
            Op::JmpIf(Condition::from_opcode(opcode)),
            Immediate16,
            Conditional { taken: 10, not_taken: 10 },
        ),
        0xC4 | 0xCC | 0xD4 | 0xDC | 0xE4 | 0xEC | 0xF4 | 0xFC => (
            Op::CallIf(Condition::from_opcode(opcode)),
            Immediate16,
            Conditional { taken: 17, not_taken: 11 },
        ),

        0xC1 | 0xD1 | 0xE1 | 0xF1 => (Op::Pop(Pair::with_psw(opcode)), Implied, Fixed(10)),
        0xC5 | 0xD5 | 0xE5 | 0xF5 => (Op::Push(Pair::with_psw(opcode)), Implied, Fixed(11)),

        0xC6 | 0xCE | 0xD6 | 0xDE | 0xE6 | 0xEE | 0xF6 | 0xFE => {
            (Op::AluImm(AluOp::from_opcode(opcode)), Immediate8, Fixed(7))
        }
        0xC7 | 0xCF | 0xD7 | 0xDF | 0xE7 | 0xEF | 0xF7 | 0xFF => {
            (Op::Rst((opcode >> 3) & 0x07), Implied, Fixed(11))
        }

        0xC3 => (Op::Jmp, Immediate16, Fixed(10)),
        0xCB => {
            documented = false;
            (Op::Jmp, Immediate16, Fixed(10))
        }
        0xC9 => (Op::Ret, Implied, Fixed(10)),
        0xD9 => {
            documented = false;
            (Op::Ret, Implied, Fixed(10))
        }
        0xCD => (Op::Call, Immediate16, Fixed(17)),
        0xDD | 0xED | 0xFD => {
            documented = false;
            (Op::Call, Immediate16, Fixed(17))
        }

        0xD3 => (Op::Out, Immediate8, Fixed(10)),
        0xDB => (Op::In, Immediate8, Fixed(10)),
        0xE3 => (Op::Xthl, Implied, Fixed(18)),
        0xE9 => (Op::Pchl, Implied, Fixed(5)),
        0xEB => (Op::Xchg, Implied, Fixed(5)),
        0xF3 => (Op::Di, Implied, Fixed(4)),
        0xF9 => (Op::Sphl, Implied, Fixed(5)),
        0xFB => (Op::Ei, Implied, Fixed(4)),
    };

    Instruction {
        op,
        mode,
        cycles,
        mnemonic: MNEMONICS[opcode as usize],
        documented,
    }
}

/// Mnemonics without their immediate operand; the disassembler appends it.
#[rustfmt::skip]
const MNEMONICS: [&str; 256] = [
    // 0x00
    "NOP", "LXI B", "STAX B", "INX B", "INR B", "DCR B", "MVI B", "RLC",
    "NOP", "DAD B", "LDAX B", "DCX B", "INR C", "DCR C", "MVI C", "RRC",
    // 0x10
    "NOP", "LXI D", "STAX D", "INX D", "INR D", "DCR D", "MVI D", "RAL",
    "NOP", "DAD D", "LDAX D", "DCX D", "INR E", "DCR E", "MVI E", "RAR",
    // 0x20
    "NOP", "LXI H", "SHLD", "INX H", "INR H", "DCR H", "MVI H", "DAA",
    "NOP", "DAD H", "LHLD", "DCX H", "INR L", "DCR L", "MVI L", "CMA",
    // 0x30
    "NOP", "LXI SP", "STA", "INX SP", "INR M", "DCR M", "MVI M", "STC",
    "NOP", "DAD SP", "LDA", "DCX SP", "INR A", "DCR A", "MVI A", "CMC",
    // 0x40
    "MOV B,B", "MOV B,C", "MOV B,D", "MOV B,E", "MOV B,H", "MOV B,L", "MOV B,M", "MOV B,A",
    "MOV C,B", "MOV C,C", "MOV C,D", "MOV C,E", "MOV C,H", "MOV C,L", "MOV C,M", "MOV C,A",
    // 0x50
    "MOV D,B", "MOV D,C", "MOV D,D", "MOV D,E", "MOV D,H", "MOV D,L", "MOV D,M", "MOV D,A",
    "MOV E,B", "MOV E,C", "MOV E,D", "MOV E,E", "MOV E,H", "MOV E,L", "MOV E,M", "MOV E,A",
    // 0x60
    "MOV H,B", "MOV H,C", "MOV H,D", "MOV H,E", "MOV H,H", "MOV H,L", "MOV H,M", "MOV H,A",
    "MOV L,B", "MOV L,C", "MOV L,D", "MOV L,E", "MOV L,H", "MOV L,L", "MOV L,M", "MOV L,A",
    // 0x70
    "MOV M,B", "MOV M,C", "MOV M,D", "MOV M,E", "MOV M,H", "MOV M,L", "HLT", "MOV M,A",
    "MOV A,B", "MOV A,C", "MOV A,D", "MOV A,E", "MOV A,H", "MOV A,L", "MOV A,M", "MOV A,A",
    // 0x80
    "ADD B", "ADD C", "ADD D", "ADD E", "ADD H", "ADD L", "ADD M", "ADD A",
    "ADC B", "ADC C", "ADC D", "ADC E", "ADC H", "ADC L", "ADC M", "ADC A",
    // 0x90
    "SUB B", "SUB C", "SUB D", "SUB E", "SUB H", "SUB L", "SUB M", "SUB A",
    "SBB B", "SBB C", "SBB D", "SBB E", "SBB H", "SBB L", "SBB M", "SBB A",
    // 0xA0
    "ANA B", "ANA C", "ANA D", "ANA E", "ANA H", "ANA L", "ANA M", "ANA A",
    "XRA B", "XRA C", "XRA D", "XRA E", "XRA H", "XRA L", "XRA M", "XRA A",
    // 0xB0
    "ORA B", "ORA C", "ORA D", "ORA E", "ORA H", "ORA L", "ORA M", "ORA A",
    "CMP B", "CMP C", "CMP D", "CMP E", "CMP H", "CMP L", "CMP M", "CMP A",
    // 0xC0
    "RNZ", "POP B", "JNZ", "JMP", "CNZ", "PUSH B", "ADI", "RST 0",
    "RZ", "RET", "JZ", "JMP", "CZ", "CALL", "ACI", "RST 1",
    // 0xD0
    "RNC", "POP D", "JNC", "OUT", "CNC", "PUSH D", "SUI", "RST 2",
    "RC", "RET", "JC", "IN", "CC", "CALL", "SBI", "RST 3",
    // 0xE0
    "RPO", "POP H", "JPO", "XTHL", "CPO", "PUSH H", "ANI", "RST 4",
    "RPE", "PCHL", "JPE", "XCHG", "CPE", "CALL", "XRI", "RST 5",
    // 0xF0
    "RP", "POP PSW", "JP", "DI", "CP", "PUSH PSW", "ORI", "RST 6",
    "RM", "SPHL", "JM", "EI", "CM", "CALL", "CPI", "RST 7",
];
