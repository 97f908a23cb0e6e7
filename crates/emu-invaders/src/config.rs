//! Machine configuration and ROM validation.

use std::fmt;

use emu_core::MasterClock;

/// Size of the ROM window at the bottom of the address space.
pub const ROM_WINDOW: usize = 0x2000;

/// CPU clock of the arcade board.
pub const CPU_FREQUENCY: u64 = 2_000_000;

/// Display refresh rate; the scheduler runs one tick per refresh.
pub const TICK_RATE_HZ: u64 = 60;

/// Operator dip switches, presented on input port 2.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DipSwitches {
    /// Ships per game, 3-6.
    pub ships: u8,
    /// Award the extra ship at 1000 points instead of 1500.
    pub extra_ship_at_1000: bool,
    /// Hide the coin information on the attract screen.
    pub coin_info_hidden: bool,
}

impl DipSwitches {
    /// Switch bits as read on port 2: ships in bits 0-1, extra-ship bit 3,
    /// coin-info bit 7.
    #[must_use]
    pub fn bits(&self) -> u8 {
        let ships = self.ships.clamp(3, 6) - 3;
        let mut value = ships & 0x03;
        if self.extra_ship_at_1000 {
            value |= 0x08;
        }
        if self.coin_info_hidden {
            value |= 0x80;
        }
        value
    }
}

impl Default for DipSwitches {
    fn default() -> Self {
        Self {
            ships: 3,
            extra_ship_at_1000: false,
            coin_info_hidden: false,
        }
    }
}

/// Configuration for creating an [`Invaders`](crate::Invaders) instance.
#[derive(Debug, Clone)]
pub struct InvadersConfig {
    /// Program ROM, loaded at address 0. At most 8 KiB.
    pub rom: Vec<u8>,
    pub dip_switches: DipSwitches,
    pub clock: MasterClock,
    /// External ticks per second; each tick raises two interrupts.
    pub tick_rate_hz: u64,
}

impl InvadersConfig {
    /// Stock arcade settings for the given ROM.
    #[must_use]
    pub fn new(rom: Vec<u8>) -> Self {
        Self {
            rom,
            dip_switches: DipSwitches::default(),
            clock: MasterClock::new(CPU_FREQUENCY),
            tick_rate_hz: TICK_RATE_HZ,
        }
    }
}

/// Why a ROM image was rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RomError {
    /// No bytes at all.
    Empty,
    /// Larger than the ROM window.
    TooLarge { len: usize, max: usize },
}

impl fmt::Display for RomError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "ROM image is empty"),
            Self::TooLarge { len, max } => {
                write!(f, "ROM image is {len} bytes; the ROM window holds {max}")
            }
        }
    }
}

impl std::error::Error for RomError {}

/// Check that `rom` fits the ROM window.
pub fn validate_rom(rom: &[u8]) -> Result<(), RomError> {
    if rom.is_empty() {
        return Err(RomError::Empty);
    }
    if rom.len() > ROM_WINDOW {
        return Err(RomError::TooLarge {
            len: rom.len(),
            max: ROM_WINDOW,
        });
    }
    Ok(())
}
