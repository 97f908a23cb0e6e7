//! Space Invaders address and port decoding.
//!
//! # Memory map
//!
//! | Range         | Contents                                   |
//! |---------------|--------------------------------------------|
//! | $0000-$1FFF   | Program ROM (reads past the image: $FF)    |
//! | $2000-$23FF   | Work RAM                                   |
//! | $2400-$3FFF   | Video RAM, 1 bit per pixel                 |
//! | $4000-$FFFF   | Unmapped: reads $FF, writes ignored        |
//!
//! # Ports
//!
//! Only the low three bits of the port number are decoded.
//!
//! | Port | IN                       | OUT                     |
//! |------|--------------------------|-------------------------|
//! | 0    | Fixed bits + P1 mirror   | -                       |
//! | 1    | Coin, starts, P1         | -                       |
//! | 2    | Dips, tilt, P2           | Shift offset            |
//! | 3    | Shift result             | Sound latch 1           |
//! | 4    | -                        | Shift data              |
//! | 5    | -                        | Sound latch 2           |
//! | 6    | -                        | Watchdog                |
//!
//! Reads of the ports marked `-` return the last value written to that
//! port register.

#![allow(clippy::cast_possible_truncation)]

use emu_core::{Bus, IoBus};
use fujitsu_mb14241::Mb14241;

use crate::config::{DipSwitches, ROM_WINDOW};
use crate::input::InputState;
use crate::sound::SoundLatch;

/// Start of the RAM window.
pub const RAM_START: u16 = 0x2000;

/// Size of the RAM window (work RAM plus video RAM).
pub const RAM_SIZE: usize = 0x2000;

/// Start of video RAM.
pub const VRAM_START: u16 = 0x2400;

/// Value read from unmapped addresses.
pub const OPEN_BUS: u8 = 0xFF;

/// The machine's bus: ROM, RAM, inputs, shift register and sound latches.
#[derive(Debug, Clone)]
pub struct InvadersBus {
    rom: Vec<u8>,
    ram: Vec<u8>,
    /// Last value written to each of the eight port registers.
    ports: [u8; 8],
    pub shifter: Mb14241,
    pub input: InputState,
    pub dip_switches: DipSwitches,
    pub sound: SoundLatch,
}

impl InvadersBus {
    /// Create a bus around `rom`. Bytes past the ROM window are never visible.
    #[must_use]
    pub fn new(rom: &[u8], dip_switches: DipSwitches) -> Self {
        let len = rom.len().min(ROM_WINDOW);
        Self {
            rom: rom[..len].to_vec(),
            ram: vec![0; RAM_SIZE],
            ports: [0; 8],
            shifter: Mb14241::new(),
            input: InputState::new(),
            dip_switches,
            sound: SoundLatch::new(),
        }
    }

    /// Read memory without side effects.
    #[must_use]
    pub fn peek(&self, addr: u16) -> u8 {
        if let Some(offset) = ram_offset(addr) {
            self.ram[offset]
        } else if let Some(&byte) = self.rom.get(addr as usize) {
            byte
        } else {
            OPEN_BUS
        }
    }

    /// The full 8 KiB RAM window.
    #[must_use]
    pub fn ram(&self) -> &[u8] {
        &self.ram
    }

    /// Video RAM: 224 rows of 32 bytes, least significant bit leftmost.
    #[must_use]
    pub fn video_ram(&self) -> &[u8] {
        &self.ram[(VRAM_START - RAM_START) as usize..]
    }

    /// Length of the mapped ROM image.
    #[must_use]
    pub fn rom_len(&self) -> usize {
        self.rom.len()
    }

    /// Clear RAM, port registers and devices. Inputs and dips are kept.
    pub fn reset(&mut self) {
        self.ram.fill(0);
        self.ports = [0; 8];
        self.shifter.reset();
        self.sound.reset();
    }
}

fn ram_offset(addr: u16) -> Option<usize> {
    let offset = addr.wrapping_sub(RAM_START) as usize;
    (offset < RAM_SIZE).then_some(offset)
}

impl Bus for InvadersBus {
    fn read(&mut self, addr: u16) -> u8 {
        self.peek(addr)
    }

    fn write(&mut self, addr: u16, value: u8) {
        if let Some(offset) = ram_offset(addr) {
            self.ram[offset] = value;
        }
    }
}

impl IoBus for InvadersBus {
    fn read_io(&mut self, port: u8) -> u8 {
        match port & 0x07 {
            0 => self.input.port0(),
            1 => self.input.port1(),
            2 => self.input.port2(self.dip_switches.bits()),
            3 => self.shifter.read_result(),
            p => self.ports[p as usize],
        }
    }

    fn write_io(&mut self, port: u8, value: u8) {
        let port = port & 0x07;
        self.ports[port as usize] = value;
        match port {
            2 => self.shifter.write_offset(value),
            3 => self.sound.write_port3(value),
            4 => self.shifter.write_data(value),
            5 => self.sound.write_port5(value),
            // 6 is the watchdog; nothing resets the machine here.
            _ => {}
        }
    }
}
