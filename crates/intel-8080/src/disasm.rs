//! Single-instruction disassembler.

use emu_core::Bus;

use crate::opcode::{Mode, OPCODES, Op};

/// Format one instruction given its opcode and operand.
///
/// `operand` is the little-endian value of the bytes following the opcode;
/// it is ignored for implied instructions and truncated for 8-bit ones.
#[must_use]
pub fn format_instruction(opcode: u8, operand: u16) -> String {
    let inst = &OPCODES[opcode as usize];
    // A mnemonic that already names a register takes the operand after a comma.
    let sep = if inst.mnemonic.contains(' ') { ',' } else { ' ' };

    match (inst.mode, inst.op) {
        (Mode::Implied, _) => inst.mnemonic.to_string(),
        (Mode::Immediate8, Op::In | Op::Out) => format!("{} ${:02X}", inst.mnemonic, operand as u8),
        (Mode::Immediate8, _) => format!("{}{sep}#${:02X}", inst.mnemonic, operand as u8),
        (Mode::Immediate16, Op::Lxi(_)) => format!("{}{sep}#${operand:04X}", inst.mnemonic),
        (Mode::Immediate16, _) => format!("{} ${operand:04X}", inst.mnemonic),
    }
}

/// Disassemble the instruction at `addr`, returning its text and length.
///
/// Reads go through the bus, so this should only be pointed at memory
/// without read side effects.
pub fn disassemble<B: Bus>(bus: &mut B, addr: u16) -> (String, u16) {
    let opcode = bus.read(addr);
    let inst = &OPCODES[opcode as usize];
    let operand = match inst.mode {
        Mode::Implied => 0,
        Mode::Immediate8 => u16::from(bus.read(addr.wrapping_add(1))),
        Mode::Immediate16 => bus.read16(addr.wrapping_add(1)),
    };
    (format_instruction(opcode, operand), inst.size())
}

#[cfg(test)]
mod tests {
    use super::*;
    use emu_core::SimpleBus;

    #[test]
    fn formats_each_mode() {
        assert_eq!(format_instruction(0x00, 0), "NOP");
        assert_eq!(format_instruction(0x7E, 0), "MOV A,M");
        assert_eq!(format_instruction(0x3E, 0x42), "MVI A,#$42");
        assert_eq!(format_instruction(0xFE, 0x10), "CPI #$10");
        assert_eq!(format_instruction(0xDB, 0x01), "IN $01");
        assert_eq!(format_instruction(0xD3, 0x06), "OUT $06");
        assert_eq!(format_instruction(0x31, 0x2400), "LXI SP,#$2400");
        assert_eq!(format_instruction(0xC3, 0x18D4), "JMP $18D4");
        assert_eq!(format_instruction(0x32, 0x20C0), "STA $20C0");
        assert_eq!(format_instruction(0xCF, 0), "RST 1");
    }

    #[test]
    fn disassemble_reads_operands_from_bus() {
        let mut bus = SimpleBus::new();
        bus.load(0x0000, &[0x00, 0x00, 0x00, 0xC3, 0xD4, 0x18]);
        assert_eq!(disassemble(&mut bus, 0x0000), ("NOP".to_string(), 1));
        assert_eq!(disassemble(&mut bus, 0x0003), ("JMP $18D4".to_string(), 3));
    }

    #[test]
    fn alias_disassembles_as_primary() {
        assert_eq!(format_instruction(0xDD, 0x1234), "CALL $1234");
        assert_eq!(format_instruction(0x08, 0), "NOP");
    }
}
