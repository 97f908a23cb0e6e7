//! Headless Space Invaders runner.
//!
//! Runs the machine for a fixed number of frames with optional scripted
//! coin/start presses, then reports what happened and optionally saves a
//! screenshot. No window, no audio: sound triggers are logged.

use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::Parser;
use emu_invaders::capture::{load_rom, save_screenshot};
use emu_invaders::{Button, DipSwitches, Invaders, InvadersConfig};

/// How long a scripted button press is held, in frames.
const HOLD_FRAMES: u64 = 5;

#[derive(Parser, Debug)]
#[command(name = "emu-invaders", about = "Run Space Invaders headless.")]
struct Args {
    /// ROM image, or a directory holding invaders.h/.g/.f/.e.
    #[arg(long, value_name = "PATH")]
    rom: PathBuf,

    /// Number of frames to run.
    #[arg(long, default_value_t = 600)]
    frames: u64,

    /// Ships per game (3-6).
    #[arg(long, default_value_t = 3)]
    ships: u8,

    /// Frame at which to drop a coin.
    #[arg(long, value_name = "FRAME")]
    coin_at: Option<u64>,

    /// Frame at which to press 1P start.
    #[arg(long, value_name = "FRAME")]
    start_at: Option<u64>,

    /// Save a PNG of the final frame.
    #[arg(long, value_name = "FILE")]
    screenshot: Option<PathBuf>,

    /// Log every executed instruction (very verbose).
    #[arg(long)]
    trace: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let mut logger = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"));
    if args.trace {
        logger.filter_module("intel_8080::trace", log::LevelFilter::Trace);
    }
    logger.init();

    if !(3..=6).contains(&args.ships) {
        bail!("--ships must be between 3 and 6, got {}", args.ships);
    }

    let rom = load_rom(&args.rom)?;
    let mut config = InvadersConfig::new(rom);
    config.dip_switches = DipSwitches {
        ships: args.ships,
        ..DipSwitches::default()
    };

    let mut invaders = Invaders::new(&config).context("building machine")?;
    if args.trace {
        invaders.cpu_mut().set_tracer(Some(intel_8080::log_tracer()));
    }
    if let Some(frame) = args.coin_at {
        invaders.input_queue().enqueue_press(Button::Coin, frame, HOLD_FRAMES);
    }
    if let Some(frame) = args.start_at {
        invaders.input_queue().enqueue_press(Button::P1Start, frame, HOLD_FRAMES);
    }

    let mut cycles = 0;
    for _ in 0..args.frames {
        cycles += invaders.run_frame();
        for event in invaders.take_sound_events() {
            log::info!("frame {}: sound {event:?}", invaders.frame_count());
        }
    }

    log::info!(
        "ran {} frames, {cycles} cycles, pc={:04X}",
        invaders.frame_count(),
        invaders.cpu().regs.pc
    );

    if let Some(path) = &args.screenshot {
        save_screenshot(&invaders, path)?;
        log::info!("screenshot saved to {}", path.display());
    }

    Ok(())
}
