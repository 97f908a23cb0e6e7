//! Space Invaders arcade machine.
//!
//! An Intel 8080 at 2 MHz, 8 KiB of ROM, 8 KiB of RAM of which 7 KiB is a
//! 1-bit video bitmap, an MB14241 shift register for sprite alignment and
//! two interrupts per 60 Hz frame. The machine runs one frame per call to
//! [`Invaders::run_frame`]; pacing against wall-clock time is the caller's job.

mod bus;
pub mod capture;
mod config;
pub mod input;
mod invaders;
mod scheduler;
mod sound;

pub use bus::{InvadersBus, OPEN_BUS, RAM_SIZE, RAM_START, VRAM_START};
pub use config::{CPU_FREQUENCY, DipSwitches, InvadersConfig, ROM_WINDOW, RomError, TICK_RATE_HZ};
pub use input::{Button, InputQueue, InputState};
pub use invaders::{FB_HEIGHT, FB_WIDTH, Invaders};
pub use scheduler::{MID_SCREEN_VECTOR, Scheduler, VBLANK_VECTOR};
pub use sound::{SoundEvent, SoundLatch};
