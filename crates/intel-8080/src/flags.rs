//! 8080 flag register (F).
//!
//! The layout is fixed: bit 1 always reads 1, bits 3 and 5 always read 0.
//! Those bits survive `POP PSW` untouched, so every conversion from a raw
//! byte goes through [`Flags::from_byte`].

/// Carry flag (bit 0) - carry out of bit 7, or borrow.
pub const CARRY: u8 = 0b0000_0001;

/// Reserved bit 1 - always 1.
pub const RESERVED: u8 = 0b0000_0010;

/// Parity flag (bit 2) - set if the result has even parity.
pub const PARITY: u8 = 0b0000_0100;

/// Auxiliary (half) carry flag (bit 4) - carry out of bit 3.
pub const HALF_CARRY: u8 = 0b0001_0000;

/// Zero flag (bit 6) - set if result is zero.
pub const ZERO: u8 = 0b0100_0000;

/// Sign flag (bit 7) - copy of bit 7 of the result.
pub const SIGN: u8 = 0b1000_0000;

/// Bits that are never set (3 and 5).
const ALWAYS_CLEAR: u8 = 0b0010_1000;

/// Returns true iff `value` has an even number of set bits.
#[must_use]
pub const fn parity_check(value: u8) -> bool {
    value.count_ones().is_multiple_of(2)
}

/// Processor flag register.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Flags(u8);

impl Default for Flags {
    fn default() -> Self {
        Self::new()
    }
}

impl Flags {
    /// Flags in reset state: only the reserved bit set.
    #[must_use]
    pub const fn new() -> Self {
        Self(RESERVED)
    }

    /// Create flags from a raw byte, forcing the fixed bits.
    #[must_use]
    pub const fn from_byte(value: u8) -> Self {
        Self((value | RESERVED) & !ALWAYS_CLEAR)
    }

    /// Raw register value.
    #[must_use]
    pub const fn bits(self) -> u8 {
        self.0
    }

    /// Check if a flag is set.
    #[must_use]
    pub const fn is_set(self, flag: u8) -> bool {
        self.0 & flag != 0
    }

    /// Set or clear a flag based on condition.
    pub fn set_if(&mut self, flag: u8, condition: bool) {
        if condition {
            self.0 |= flag;
        } else {
            self.0 &= !flag;
        }
        self.0 = (self.0 | RESERVED) & !ALWAYS_CLEAR;
    }

    #[must_use]
    pub const fn carry(self) -> bool {
        self.is_set(CARRY)
    }

    #[must_use]
    pub const fn parity(self) -> bool {
        self.is_set(PARITY)
    }

    #[must_use]
    pub const fn half_carry(self) -> bool {
        self.is_set(HALF_CARRY)
    }

    #[must_use]
    pub const fn zero(self) -> bool {
        self.is_set(ZERO)
    }

    #[must_use]
    pub const fn sign(self) -> bool {
        self.is_set(SIGN)
    }

    pub fn set_carry(&mut self, value: bool) {
        self.set_if(CARRY, value);
    }

    pub fn set_parity(&mut self, value: bool) {
        self.set_if(PARITY, value);
    }

    pub fn set_half_carry(&mut self, value: bool) {
        self.set_if(HALF_CARRY, value);
    }

    pub fn set_zero(&mut self, value: bool) {
        self.set_if(ZERO, value);
    }

    pub fn set_sign(&mut self, value: bool) {
        self.set_if(SIGN, value);
    }

    /// Update Sign, Zero and Parity from a result byte.
    pub fn update_szp(&mut self, value: u8) {
        self.set_sign(value & 0x80 != 0);
        self.set_zero(value == 0);
        self.set_parity(parity_check(value));
    }
}

impl std::fmt::Display for Flags {
    /// Renders as `zspac`, with `.` for each clear flag.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let pick = |flag, ch| if self.is_set(flag) { ch } else { '.' };
        write!(
            f,
            "{}{}{}{}{}",
            pick(ZERO, 'z'),
            pick(SIGN, 's'),
            pick(PARITY, 'p'),
            pick(HALF_CARRY, 'a'),
            pick(CARRY, 'c'),
        )
    }
}
