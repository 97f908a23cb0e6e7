//! Top-level Space Invaders system.
//!
//! # Frame loop
//!
//! `run_frame()` applies any scripted input due this frame, then runs one
//! scheduler tick: 2 MHz / 60 Hz = 33,333 cycles split into two bursts,
//! each ended by an interrupt (RST 1 mid-screen, RST 2 at vertical blank).

use emu_core::{Observable, Value, parse_address};
use intel_8080::I8080;

use crate::bus::{InvadersBus, RAM_START};
use crate::config::{InvadersConfig, ROM_WINDOW, RomError, validate_rom};
use crate::input::{Button, InputQueue};
use crate::scheduler::Scheduler;
use crate::sound::SoundEvent;

/// Framebuffer width after rotating the monitor upright.
pub const FB_WIDTH: u32 = 224;

/// Framebuffer height after rotating the monitor upright.
pub const FB_HEIGHT: u32 = 256;

/// Lit pixel colour (ARGB32).
const FG: u32 = 0xFFFF_FFFF;

/// Unlit pixel colour (ARGB32).
const BG: u32 = 0xFF00_0000;

/// Space Invaders system.
#[derive(Debug)]
pub struct Invaders {
    cpu: I8080,
    bus: InvadersBus,
    scheduler: Scheduler,
    /// Completed frame counter.
    frame_count: u64,
    /// Timed input event queue for scripted sessions.
    input_queue: InputQueue,
}

impl Invaders {
    /// Create a machine from the given configuration.
    pub fn new(config: &InvadersConfig) -> Result<Self, RomError> {
        validate_rom(&config.rom)?;
        if config.rom.len() < ROM_WINDOW {
            log::warn!(
                "ROM is {} bytes; the full set is {ROM_WINDOW}, the rest reads as open bus",
                config.rom.len()
            );
        }

        let scheduler = Scheduler::from_clock(config.clock, config.tick_rate_hz);
        log::debug!(
            "invaders: {} byte ROM, {} Hz CPU, {} cycles per burst",
            config.rom.len(),
            config.clock.frequency_hz,
            scheduler.burst().get()
        );

        Ok(Self {
            cpu: I8080::new(),
            bus: InvadersBus::new(&config.rom, config.dip_switches),
            scheduler,
            frame_count: 0,
            input_queue: InputQueue::new(),
        })
    }

    /// Run one tick of the external clock.
    ///
    /// Returns the number of CPU cycles executed.
    pub fn run_frame(&mut self) -> u64 {
        self.input_queue
            .process(self.frame_count, &mut self.bus.input);
        self.frame_count += 1;
        self.scheduler.run_tick(&mut self.cpu, &mut self.bus)
    }

    /// Power-cycle the CPU and board. Held buttons, dips and queued input
    /// survive.
    pub fn reset(&mut self) {
        log::debug!("invaders reset at frame {}", self.frame_count);
        self.cpu.reset();
        self.bus.reset();
    }

    /// Press a button immediately (stays pressed until released).
    pub fn press(&mut self, button: Button) {
        self.bus.input.set(button, true);
    }

    /// Release a button.
    pub fn release(&mut self, button: Button) {
        self.bus.input.set(button, false);
    }

    /// Video RAM as the hardware scans it: 224 lines of 256 pixels.
    #[must_use]
    pub fn video_ram(&self) -> &[u8] {
        self.bus.video_ram()
    }

    /// Render video RAM as an upright ARGB32 image, `FB_WIDTH` x `FB_HEIGHT`.
    ///
    /// The monitor is mounted rotated 90 degrees counter-clockwise, so scan
    /// line `y` becomes screen column `y` and pixel `x` along it becomes
    /// screen row `255 - x`.
    #[must_use]
    pub fn framebuffer(&self) -> Vec<u32> {
        let width = FB_WIDTH as usize;
        let mut fb = vec![BG; width * FB_HEIGHT as usize];
        for (i, &byte) in self.video_ram().iter().enumerate() {
            let line = i / 32;
            let x0 = (i % 32) * 8;
            for bit in 0..8 {
                if byte & (1 << bit) != 0 {
                    let row = 255 - (x0 + bit);
                    fb[row * width + line] = FG;
                }
            }
        }
        fb
    }

    /// Drain the sound triggers recorded since the last call.
    pub fn take_sound_events(&mut self) -> Vec<SoundEvent> {
        self.bus.sound.take_events()
    }

    /// Reference to the CPU.
    #[must_use]
    pub fn cpu(&self) -> &I8080 {
        &self.cpu
    }

    /// Mutable reference to the CPU.
    pub fn cpu_mut(&mut self) -> &mut I8080 {
        &mut self.cpu
    }

    /// Reference to the bus.
    #[must_use]
    pub fn bus(&self) -> &InvadersBus {
        &self.bus
    }

    /// Mutable reference to the bus.
    pub fn bus_mut(&mut self) -> &mut InvadersBus {
        &mut self.bus
    }

    /// Completed frame count.
    #[must_use]
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// Mutable reference to the timed input queue.
    pub fn input_queue(&mut self) -> &mut InputQueue {
        &mut self.input_queue
    }
}

impl Observable for Invaders {
    fn query(&self, path: &str) -> Option<Value> {
        if let Some(rest) = path.strip_prefix("cpu.") {
            self.cpu.query(rest)
        } else if let Some(rest) = path.strip_prefix("shift.") {
            self.bus.shifter.query(rest)
        } else if let Some(rest) = path.strip_prefix("memory.") {
            parse_address(rest).map(|addr| Value::U8(self.bus.peek(addr)))
        } else {
            match path {
                "frame" => Some(self.frame_count.into()),
                "ram_start" => Some(RAM_START.into()),
                "ufo_sound" => Some(self.bus.sound.ufo_active().into()),
                _ => self.cpu.query(path),
            }
        }
    }

    fn query_paths(&self) -> &'static [&'static str] {
        &[
            "cpu.<8080_paths>",
            "shift.high",
            "shift.low",
            "shift.offset",
            "shift.result",
            "memory.<address>",
            "frame",
            "ram_start",
            "ufo_sound",
        ]
    }
}
