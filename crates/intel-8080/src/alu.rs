//! ALU operations for the 8080.
//!
//! Each operation takes the current flags by mutable reference and touches
//! only the flags that instruction defines; everything else is left alone.
//! `inr`/`dcr` never touch Carry, `dad` touches only Carry.

#![allow(clippy::cast_possible_truncation)] // Intentional truncation for low byte extraction.
#![allow(clippy::verbose_bit_mask)] // Clearer to read mask comparisons.

use crate::flags::Flags;

/// Add with optional carry-in.
///
/// Half-carry is the carry out of bit 3 of the two operands; the carry-in
/// does not take part in it.
#[must_use]
pub fn add(flags: &mut Flags, a: u8, data: u8, carry_in: bool) -> u8 {
    let sum = u16::from(a) + u16::from(data) + u16::from(carry_in);
    let result = sum as u8;

    flags.set_carry(sum >= 0x100);
    flags.set_half_carry((a & 0x0F) + (data & 0x0F) > 0x0F);
    flags.update_szp(result);
    result
}

/// Subtract with optional borrow-in.
///
/// Carry is `a < data` and half-carry is the 8080 auxiliary carry of the
/// complement-add (set when the low nibble does not borrow). Neither test
/// looks at the borrow-in; SBB relies on exactly this behaviour.
#[must_use]
pub fn sub(flags: &mut Flags, a: u8, data: u8, borrow_in: bool) -> u8 {
    let result = a.wrapping_sub(data).wrapping_sub(u8::from(borrow_in));

    flags.set_carry(a < data);
    flags.set_half_carry((a & 0x0F) >= (data & 0x0F));
    flags.update_szp(result);
    result
}

/// Increment. Carry is unaffected.
#[must_use]
pub fn inr(flags: &mut Flags, value: u8) -> u8 {
    let result = value.wrapping_add(1);
    flags.set_half_carry(value & 0x0F == 0x0F);
    flags.update_szp(result);
    result
}

/// Decrement. Carry is unaffected.
#[must_use]
pub fn dcr(flags: &mut Flags, value: u8) -> u8 {
    let result = value.wrapping_sub(1);
    flags.set_half_carry(value & 0x0F == 0x00);
    flags.update_szp(result);
    result
}

/// AND. Half-carry is the OR of bit 3 of both operands.
#[must_use]
pub fn ana(flags: &mut Flags, a: u8, data: u8) -> u8 {
    let result = a & data;
    flags.set_carry(false);
    flags.set_half_carry((a | data) & 0x08 != 0);
    flags.update_szp(result);
    result
}

/// OR.
#[must_use]
pub fn ora(flags: &mut Flags, a: u8, data: u8) -> u8 {
    let result = a | data;
    flags.set_carry(false);
    flags.set_half_carry(false);
    flags.update_szp(result);
    result
}

/// Exclusive OR.
#[must_use]
pub fn xra(flags: &mut Flags, a: u8, data: u8) -> u8 {
    let result = a ^ data;
    flags.set_carry(false);
    flags.set_half_carry(false);
    flags.update_szp(result);
    result
}

/// Decimal adjust the accumulator.
///
/// The low-nibble correction is carried in 16 bits, so a low correction that
/// overflows the byte still counts as "exceeds 0x9F" for the high correction.
/// Carry is only ever set here, never cleared.
#[must_use]
pub fn daa(flags: &mut Flags, a: u8) -> u8 {
    let mut value = u16::from(a);

    if value & 0x0F > 9 || flags.half_carry() {
        value += 0x06;
        flags.set_half_carry(true);
    } else {
        flags.set_half_carry(false);
    }

    if value > 0x9F || flags.carry() {
        value += 0x60;
        flags.set_carry(true);
    }

    let result = value as u8;
    flags.update_szp(result);
    result
}

/// 16-bit add into HL. Only Carry is affected.
#[must_use]
pub fn dad(flags: &mut Flags, hl: u16, value: u16) -> u16 {
    let sum = u32::from(hl) + u32::from(value);
    flags.set_carry(sum > 0xFFFF);
    sum as u16
}

/// Rotate left; Carry takes bit 7.
#[must_use]
pub fn rlc(flags: &mut Flags, a: u8) -> u8 {
    flags.set_carry(a & 0x80 != 0);
    a.rotate_left(1)
}

/// Rotate right; Carry takes bit 0.
#[must_use]
pub fn rrc(flags: &mut Flags, a: u8) -> u8 {
    flags.set_carry(a & 0x01 != 0);
    a.rotate_right(1)
}

/// Rotate left through Carry.
#[must_use]
pub fn ral(flags: &mut Flags, a: u8) -> u8 {
    let result = (a << 1) | u8::from(flags.carry());
    flags.set_carry(a & 0x80 != 0);
    result
}

/// Rotate right through Carry.
#[must_use]
pub fn rar(flags: &mut Flags, a: u8) -> u8 {
    let result = (a >> 1) | (u8::from(flags.carry()) << 7);
    flags.set_carry(a & 0x01 != 0);
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    fn flags_with_carry(carry: bool) -> Flags {
        let mut f = Flags::new();
        f.set_carry(carry);
        f
    }

    #[test]
    fn add_sets_carry_and_half_carry() {
        let mut f = Flags::new();
        assert_eq!(add(&mut f, 0xFF, 0x01, false), 0x00);
        assert!(f.carry());
        assert!(f.half_carry());
        assert!(f.zero());
        assert!(f.parity());
        assert!(!f.sign());

        assert_eq!(add(&mut f, 0x3A, 0x05, false), 0x3F);
        assert!(!f.carry());
        assert!(!f.half_carry());
    }

    #[test]
    fn add_carry_in_counts_for_carry_not_half_carry() {
        let mut f = Flags::new();
        assert_eq!(add(&mut f, 0xFE, 0x01, true), 0x00);
        assert!(f.carry());

        assert_eq!(add(&mut f, 0x0E, 0x01, true), 0x10);
        assert!(!f.half_carry());
    }

    #[test]
    fn sub_borrow_ignores_borrow_in() {
        let mut f = Flags::new();
        assert_eq!(sub(&mut f, 0x05, 0x05, true), 0xFF);
        assert!(!f.carry());
        assert!(f.sign());

        assert_eq!(sub(&mut f, 0x04, 0x05, false), 0xFF);
        assert!(f.carry());
    }

    #[test]
    fn sub_half_carry_set_without_nibble_borrow() {
        let mut f = Flags::new();
        let _ = sub(&mut f, 0x3E, 0x0E, false);
        assert!(f.half_carry());
        let _ = sub(&mut f, 0x30, 0x01, false);
        assert!(!f.half_carry());
    }

    #[test]
    fn inr_dcr_leave_carry_alone() {
        let mut f = flags_with_carry(true);
        assert_eq!(inr(&mut f, 0xFF), 0x00);
        assert!(f.carry());
        assert!(f.zero());
        assert!(f.half_carry());

        let mut f = flags_with_carry(false);
        assert_eq!(dcr(&mut f, 0x00), 0xFF);
        assert!(!f.carry());
        assert!(f.sign());
        assert!(f.half_carry());
        assert!(!f.zero());

        assert_eq!(dcr(&mut f, 0x11), 0x10);
        assert!(!f.half_carry());
    }

    #[test]
    fn ana_half_carry_is_or_of_bit3() {
        let mut f = flags_with_carry(true);
        assert_eq!(ana(&mut f, 0x08, 0x00), 0x00);
        assert!(f.half_carry());
        assert!(!f.carry());
        assert!(f.zero());

        assert_eq!(ana(&mut f, 0xF0, 0x30), 0x30);
        assert!(!f.half_carry());
    }

    #[test]
    fn ora_xra_clear_carry_and_half_carry() {
        let mut f = flags_with_carry(true);
        f.set_half_carry(true);
        assert_eq!(ora(&mut f, 0x0F, 0xF0), 0xFF);
        assert!(!f.carry() && !f.half_carry());
        assert!(f.sign() && f.parity());

        let mut f = flags_with_carry(true);
        assert_eq!(xra(&mut f, 0x5A, 0x5A), 0x00);
        assert!(!f.carry() && f.zero());
    }

    #[test]
    fn daa_corrects_both_nibbles() {
        let mut f = Flags::new();
        // 0x19 + 0x28 = 0x41 with half carry -> 47
        let sum = add(&mut f, 0x19, 0x28, false);
        assert_eq!(daa(&mut f, sum), 0x47);
        assert!(!f.carry());

        let sum = add(&mut f, 0x99, 0x61, false);
        assert_eq!(daa(&mut f, sum), 0x60);
        assert!(f.carry());
    }

    #[test]
    fn daa_low_correction_overflowing_the_byte() {
        // 0xFA + 0x06 passes 0xFF; wrapping to 0x00 would skip the high
        // correction and turn 99 + 61 into 00 with no carry.
        let mut f = Flags::new();
        assert_eq!(daa(&mut f, 0xFA), 0x60);
        assert!(f.carry());
        assert!(f.half_carry());
    }

    #[test]
    fn daa_keeps_existing_carry() {
        let mut f = flags_with_carry(true);
        assert_eq!(daa(&mut f, 0x00), 0x60);
        assert!(f.carry());
    }

    #[test]
    fn dad_only_touches_carry() {
        let mut f = Flags::new();
        f.set_zero(true);
        assert_eq!(dad(&mut f, 0xFFFF, 0x0002), 0x0001);
        assert!(f.carry());
        assert!(f.zero());
        assert_eq!(dad(&mut f, 0x1000, 0x0234), 0x1234);
        assert!(!f.carry());
    }

    #[test]
    fn rotates() {
        let mut f = Flags::new();
        assert_eq!(rlc(&mut f, 0x81), 0x03);
        assert!(f.carry());
        assert_eq!(rrc(&mut f, 0x02), 0x01);
        assert!(!f.carry());

        let mut f = flags_with_carry(true);
        assert_eq!(ral(&mut f, 0x40), 0x81);
        assert!(!f.carry());
        let mut f = flags_with_carry(true);
        assert_eq!(rar(&mut f, 0x01), 0x80);
        assert!(f.carry());
    }
}
