//! Fujitsu MB14241 shift register.
//!
//! A 16-bit two-stage latch with a 3-bit offset, wired to the CPU's port
//! space so software can shift sprite data by 0-7 pixels in one IN
//! instruction instead of a loop of rotates.
//!
//! # Operations
//!
//! | Operation | Effect                                                  |
//! |-----------|---------------------------------------------------------|
//! | data      | low latch <- high latch, high latch <- value            |
//! | offset    | offset <- value & 7                                     |
//! | result    | bits `15-offset ..= 8-offset` of `high:low`             |
//!
//! Which port numbers reach each operation is up to the machine.

#![allow(clippy::cast_possible_truncation)]

use emu_core::{Observable, Value};

/// Fujitsu MB14241 shift register.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Mb14241 {
    /// Most recently written byte.
    high: u8,
    /// The byte written before that.
    low: u8,
    /// Shift amount, 0-7.
    offset: u8,
}

impl Mb14241 {
    /// Create a shift register with both latches and the offset cleared.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Push a byte into the register.
    pub fn write_data(&mut self, value: u8) {
        self.low = self.high;
        self.high = value;
    }

    /// Set the shift amount. Only the low three bits are kept.
    pub fn write_offset(&mut self, value: u8) {
        self.offset = value & 0x07;
    }

    /// The eight bits of `high:low` starting `offset` bits below the top.
    #[must_use]
    pub fn read_result(&self) -> u8 {
        let value = (u16::from(self.high) << 8) | u16::from(self.low);
        (value >> (8 - self.offset)) as u8
    }

    /// Clear latches and offset.
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// Current `(high, low)` latch contents.
    #[must_use]
    pub fn latches(&self) -> (u8, u8) {
        (self.high, self.low)
    }

    /// Current shift offset.
    #[must_use]
    pub fn offset(&self) -> u8 {
        self.offset
    }
}

impl Observable for Mb14241 {
    fn query(&self, path: &str) -> Option<Value> {
        match path {
            "high" => Some(self.high.into()),
            "low" => Some(self.low.into()),
            "offset" => Some(self.offset.into()),
            "result" => Some(self.read_result().into()),
            _ => None,
        }
    }

    fn query_paths(&self) -> &'static [&'static str] {
        &["high", "low", "offset", "result"]
    }
}
