//! Tests for individual 8080 instructions and short programs.

use emu_core::{Bus, Cpu, SimpleBus};
use intel_8080::I8080;

/// Load `program` at 0x0000 with SP at the top of the 8 KiB RAM window.
fn setup(program: &[u8]) -> (I8080, SimpleBus) {
    let mut bus = SimpleBus::new();
    bus.load(0x0000, program);
    let mut cpu = I8080::new();
    cpu.regs.sp = 0x2400;
    (cpu, bus)
}

/// Run until HLT, return instruction count.
fn run_until_halt(cpu: &mut I8080, bus: &mut SimpleBus) -> u64 {
    let mut count = 0;
    while !cpu.regs.halted && count < 10_000 {
        cpu.execute_instruction(bus);
        count += 1;
    }
    count
}

#[test]
fn test_mvi_a_after_reset() {
    let (mut cpu, mut bus) = setup(&[0x3E, 0x42]); // MVI A,42
    cpu.reset();

    let cost = cpu.step(&mut bus);

    assert_eq!(cpu.regs.a, 0x42);
    assert_eq!(cpu.regs.pc, 0x0002);
    assert_eq!(cpu.cycles(), 7);
    assert_eq!(cost, 7);
}

#[test]
fn test_dcr_a_from_zero() {
    let (mut cpu, mut bus) = setup(&[0x3D]); // DCR A
    cpu.regs.a = 0x00;
    cpu.regs.f.set_carry(true);

    cpu.execute_instruction(&mut bus);

    assert_eq!(cpu.regs.a, 0xFF);
    assert!(!cpu.regs.f.zero());
    assert!(cpu.regs.f.sign());
    assert!(cpu.regs.f.half_carry());
    assert!(cpu.regs.f.carry());
    assert_eq!(cpu.cycles(), 5);
}

#[test]
fn test_memory_operand() {
    let (mut cpu, mut bus) = setup(&[
        0x21, 0x00, 0x20, // LXI H,2000
        0x36, 0x55, // MVI M,55
        0x7E, // MOV A,M
        0x76, // HLT
    ]);

    run_until_halt(&mut cpu, &mut bus);

    assert_eq!(cpu.regs.a, 0x55);
    assert_eq!(bus.peek(0x2000), 0x55);
    assert_eq!(cpu.cycles(), 10 + 10 + 7 + 7);
}

#[test]
fn test_mov_m_from_register_costs_seven() {
    let (mut cpu, mut bus) = setup(&[0x72]); // MOV M,D
    cpu.regs.set_hl(0x2100);
    cpu.regs.d = 0xA5;

    cpu.execute_instruction(&mut bus);

    assert_eq!(bus.peek(0x2100), 0xA5);
    assert_eq!(cpu.cycles(), 7);
}

#[test]
fn test_inx_dcx_are_sixteen_bit() {
    let (mut cpu, mut bus) = setup(&[
        0x01, 0xFF, 0x00, // LXI B,00FF
        0x03, // INX B
        0x11, 0x00, 0x00, // LXI D,0000
        0x1B, // DCX D
        0x31, 0xFF, 0xFF, // LXI SP,FFFF
        0x33, // INX SP
        0x76,
    ]);

    run_until_halt(&mut cpu, &mut bus);

    assert_eq!(cpu.regs.bc(), 0x0100);
    assert_eq!(cpu.regs.de(), 0xFFFF);
    assert_eq!(cpu.regs.sp, 0x0000);
}

#[test]
fn test_call_and_ret() {
    let mut program = vec![0u8; 0x20];
    program[..7].copy_from_slice(&[
        0x31, 0x00, 0x24, // LXI SP,2400
        0xCD, 0x10, 0x00, // CALL 0010
        0x76, // HLT
    ]);
    program[0x10..0x13].copy_from_slice(&[0x3E, 0x99, 0xC9]); // MVI A,99; RET
    let (mut cpu, mut bus) = setup(&program);

    run_until_halt(&mut cpu, &mut bus);

    assert_eq!(cpu.regs.a, 0x99);
    assert_eq!(cpu.regs.sp, 0x2400);
    assert_eq!(cpu.regs.pc, 0x0006);
    assert_eq!(cpu.cycles(), 10 + 17 + 7 + 10 + 7);
}

#[test]
fn test_conditional_call_costs() {
    let (mut cpu, mut bus) = setup(&[
        0xAF, // XRA A (Z set)
        0xC4, 0x10, 0x00, // CNZ 0010 (not taken)
        0xCC, 0x10, 0x00, // CZ 0010 (taken)
    ]);

    cpu.execute_instruction(&mut bus);
    cpu.execute_instruction(&mut bus);
    assert_eq!(cpu.regs.pc, 0x0004);
    assert_eq!(cpu.cycles(), 4 + 11);
    assert_eq!(cpu.regs.sp, 0x2400);

    cpu.execute_instruction(&mut bus);
    assert_eq!(cpu.regs.pc, 0x0010);
    assert_eq!(cpu.cycles(), 4 + 11 + 17);
    assert_eq!(cpu.pop(&mut bus), 0x0007);
}

#[test]
fn test_conditional_return_costs() {
    let mut program = vec![0u8; 0x20];
    program[..7].copy_from_slice(&[0x31, 0x00, 0x24, 0xCD, 0x10, 0x00, 0x76]);
    program[0x10..0x13].copy_from_slice(&[
        0xAF, // XRA A
        0xC0, // RNZ (not taken)
        0xC8, // RZ (taken)
    ]);
    let (mut cpu, mut bus) = setup(&program);

    run_until_halt(&mut cpu, &mut bus);

    assert_eq!(cpu.regs.pc, 0x0006);
    assert_eq!(cpu.cycles(), 10 + 17 + 4 + 5 + 11 + 7);
}

#[test]
fn test_conditional_jump_consumes_operand() {
    let (mut cpu, mut bus) = setup(&[
        0x37, // STC
        0xD2, 0x00, 0x01, // JNC 0100 (not taken)
        0xDA, 0x00, 0x01, // JC 0100 (taken)
    ]);

    cpu.execute_instruction(&mut bus);
    cpu.execute_instruction(&mut bus);
    assert_eq!(cpu.regs.pc, 0x0004);

    cpu.execute_instruction(&mut bus);
    assert_eq!(cpu.regs.pc, 0x0100);
    assert_eq!(cpu.cycles(), 4 + 10 + 10);
}

#[test]
fn test_push_psw_pop_b() {
    let (mut cpu, mut bus) = setup(&[
        0x3E, 0x12, // MVI A,12
        0x37, // STC
        0xF5, // PUSH PSW
        0xC1, // POP B
        0x76,
    ]);

    run_until_halt(&mut cpu, &mut bus);

    assert_eq!(cpu.regs.b, 0x12);
    assert_eq!(cpu.regs.c, 0x03);
    assert_eq!(cpu.regs.sp, 0x2400);
    assert_eq!(bus.peek(0x23FE), 0x03);
    assert_eq!(bus.peek(0x23FF), 0x12);
}

#[test]
fn test_pop_psw_forces_fixed_flag_bits() {
    let (mut cpu, mut bus) = setup(&[
        0x01, 0xFF, 0x00, // LXI B,00FF
        0xC5, // PUSH B
        0xF1, // POP PSW
        0x76,
    ]);

    run_until_halt(&mut cpu, &mut bus);

    assert_eq!(cpu.regs.a, 0x00);
    assert_eq!(cpu.regs.f.bits(), 0xD7);
}

#[test]
fn test_rst_pushes_return_address() {
    let (mut cpu, mut bus) = setup(&[]);
    bus.load(0x0100, &[0xCF]); // RST 1
    cpu.regs.pc = 0x0100;

    cpu.execute_instruction(&mut bus);

    assert_eq!(cpu.regs.pc, 0x0008);
    assert_eq!(cpu.cycles(), 11);
    assert_eq!(cpu.pop(&mut bus), 0x0101);
}

#[test]
fn test_in_out() {
    let (mut cpu, mut bus) = setup(&[
        0xDB, 0x01, // IN 1
        0xD3, 0x03, // OUT 3
    ]);
    bus.set_port(1, 0x5A);

    cpu.execute_instruction(&mut bus);
    assert_eq!(cpu.regs.a, 0x5A);

    cpu.execute_instruction(&mut bus);
    assert_eq!(bus.port_writes(), &[(3, 0x5A)]);
    assert_eq!(cpu.cycles(), 20);
}

#[test]
fn test_exchanges() {
    let (mut cpu, mut bus) = setup(&[
        0xEB, // XCHG
        0xE3, // XTHL
        0xF9, // SPHL
    ]);
    cpu.regs.set_hl(0x1111);
    cpu.regs.set_de(0x2222);
    bus.write16(0x2400, 0x3333);

    cpu.execute_instruction(&mut bus);
    assert_eq!(cpu.regs.hl(), 0x2222);
    assert_eq!(cpu.regs.de(), 0x1111);

    cpu.execute_instruction(&mut bus);
    assert_eq!(cpu.regs.hl(), 0x3333);
    assert_eq!(bus.read16(0x2400), 0x2222);

    cpu.execute_instruction(&mut bus);
    assert_eq!(cpu.regs.sp, 0x3333);
    assert_eq!(cpu.cycles(), 5 + 18 + 5);
}

#[test]
fn test_pchl() {
    let (mut cpu, mut bus) = setup(&[0xE9]);
    cpu.regs.set_hl(0x18D4);
    cpu.execute_instruction(&mut bus);
    assert_eq!(cpu.regs.pc, 0x18D4);
}

#[test]
fn test_direct_addressing() {
    let (mut cpu, mut bus) = setup(&[
        0x3E, 0x77, // MVI A,77
        0x32, 0x00, 0x21, // STA 2100
        0x21, 0xCD, 0xAB, // LXI H,ABCD
        0x22, 0x02, 0x21, // SHLD 2102
        0x3A, 0x03, 0x21, // LDA 2103
        0x2A, 0x02, 0x21, // LHLD 2102
        0x76,
    ]);

    run_until_halt(&mut cpu, &mut bus);

    assert_eq!(bus.peek(0x2100), 0x77);
    assert_eq!(bus.peek(0x2102), 0xCD);
    assert_eq!(bus.peek(0x2103), 0xAB);
    assert_eq!(cpu.regs.a, 0xAB);
    assert_eq!(cpu.regs.hl(), 0xABCD);
}

#[test]
fn test_daa_after_adi() {
    let (mut cpu, mut bus) = setup(&[
        0x3E, 0x19, // MVI A,19
        0xC6, 0x28, // ADI 28
        0x27, // DAA
        0x76,
    ]);

    run_until_halt(&mut cpu, &mut bus);

    assert_eq!(cpu.regs.a, 0x47);
    assert!(!cpu.regs.f.carry());
}

#[test]
fn test_sbi_borrow_ignores_carry_in() {
    let (mut cpu, mut bus) = setup(&[
        0x3E, 0x05, // MVI A,05
        0x37, // STC
        0xDE, 0x05, // SBI 05
        0x76,
    ]);

    run_until_halt(&mut cpu, &mut bus);

    assert_eq!(cpu.regs.a, 0xFF);
    assert!(!cpu.regs.f.carry());
    assert!(cpu.regs.f.sign());
}

#[test]
fn test_cpi_leaves_accumulator() {
    let (mut cpu, mut bus) = setup(&[
        0x3E, 0x10, // MVI A,10
        0xFE, 0x20, // CPI 20
        0x76,
    ]);

    run_until_halt(&mut cpu, &mut bus);

    assert_eq!(cpu.regs.a, 0x10);
    assert!(cpu.regs.f.carry());
    assert!(!cpu.regs.f.zero());
}

#[test]
fn test_dad_sets_carry_only() {
    let (mut cpu, mut bus) = setup(&[
        0xAF, // XRA A (Z set)
        0x21, 0xFF, 0xFF, // LXI H,FFFF
        0x01, 0x01, 0x00, // LXI B,0001
        0x09, // DAD B
        0x76,
    ]);

    run_until_halt(&mut cpu, &mut bus);

    assert_eq!(cpu.regs.hl(), 0x0000);
    assert!(cpu.regs.f.carry());
    assert!(cpu.regs.f.zero());
}

#[test]
fn test_dad_reads_every_pair() {
    let (mut cpu, mut bus) = setup(&[
        0x21, 0x34, 0x12, // LXI H,1234
        0x29, // DAD H
        0x39, // DAD SP
        0x11, 0x01, 0x00, // LXI D,0001
        0x19, // DAD D
        0x76,
    ]);

    cpu.execute_instruction(&mut bus);
    cpu.execute_instruction(&mut bus);
    assert_eq!(cpu.regs.hl(), 0x2468);

    cpu.execute_instruction(&mut bus);
    assert_eq!(cpu.regs.hl(), 0x4868);
    assert!(!cpu.regs.f.carry());

    run_until_halt(&mut cpu, &mut bus);
    assert_eq!(cpu.regs.hl(), 0x4869);
    assert_eq!(cpu.cycles(), 10 + 10 + 10 + 10 + 10 + 7);
}

#[test]
fn test_rotate_program() {
    let (mut cpu, mut bus) = setup(&[
        0x3E, 0x81, // MVI A,81
        0x07, // RLC -> 03, C=1
        0x1F, // RAR -> 81, C=1
        0x17, // RAL -> 03, C=1
        0x0F, // RRC -> 81, C=1
        0x76,
    ]);

    run_until_halt(&mut cpu, &mut bus);

    assert_eq!(cpu.regs.a, 0x81);
    assert!(cpu.regs.f.carry());
}

#[test]
fn test_cma_stc_cmc() {
    let (mut cpu, mut bus) = setup(&[0x3E, 0x0F, 0x2F, 0x37, 0x3F, 0x76]);

    run_until_halt(&mut cpu, &mut bus);

    assert_eq!(cpu.regs.a, 0xF0);
    assert!(!cpu.regs.f.carry());
}

#[test]
fn test_undocumented_aliases() {
    let mut program = vec![0u8; 0x40];
    program[..8].copy_from_slice(&[
        0x08, // *NOP
        0xDD, 0x20, 0x00, // *CALL 0020
        0xCB, 0x30, 0x00, // *JMP 0030
        0x76,
    ]);
    program[0x20..0x22].copy_from_slice(&[0x3E, 0x5A]); // MVI A,5A
    program[0x22] = 0xD9; // *RET
    program[0x30] = 0x76;
    let (mut cpu, mut bus) = setup(&program);

    run_until_halt(&mut cpu, &mut bus);

    assert_eq!(cpu.regs.a, 0x5A);
    assert_eq!(cpu.regs.pc, 0x0030);
    assert_eq!(cpu.regs.sp, 0x2400);
    assert_eq!(cpu.cycles(), 4 + 17 + 7 + 10 + 10 + 7);
}

#[test]
fn test_ei_di_toggle_enable_flag() {
    let (mut cpu, mut bus) = setup(&[0xFB, 0xF3]); // EI; DI

    cpu.execute_instruction(&mut bus);
    assert!(cpu.regs.inte);
    cpu.execute_instruction(&mut bus);
    assert!(!cpu.regs.inte);

    // The enable flag does not mask the interrupt itself.
    Cpu::interrupt(&mut cpu, &mut bus, 0x0008);
    assert_eq!(cpu.regs.pc, 0x0008);
    assert_eq!(cpu.pop(&mut bus), 0x0002);
}

#[test]
fn test_halt_then_interrupt_resumes_after_hlt() {
    let mut program = vec![0u8; 0x10];
    program[..3].copy_from_slice(&[0xFB, 0x76, 0x3C]); // EI; HLT; INR A
    program[0x08] = 0xFB; // EI
    program[0x09] = 0xC9; // RET
    let (mut cpu, mut bus) = setup(&program);

    run_until_halt(&mut cpu, &mut bus);
    let halted_at = cpu.cycles();
    for _ in 0..5 {
        assert_eq!(cpu.step(&mut bus), 0);
    }
    assert_eq!(cpu.cycles(), halted_at);

    Cpu::interrupt(&mut cpu, &mut bus, 0x0008);
    assert!(!cpu.regs.halted);
    cpu.execute_instruction(&mut bus); // EI
    cpu.execute_instruction(&mut bus); // RET
    cpu.execute_instruction(&mut bus); // INR A

    assert_eq!(cpu.regs.a, 0x01);
    assert_eq!(cpu.regs.pc, 0x0003);
}

#[test]
fn test_pc_wraps_at_top_of_memory() {
    let (mut cpu, mut bus) = setup(&[]);
    bus.load(0xFFFF, &[0x00]);
    cpu.regs.pc = 0xFFFF;
    cpu.execute_instruction(&mut bus);
    assert_eq!(cpu.regs.pc, 0x0000);
}
