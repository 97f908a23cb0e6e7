//! Headless capture: PNG screenshots and ROM set loading.

#![allow(clippy::cast_possible_truncation)]

use std::fs;
use std::io::BufWriter;
use std::path::Path;

use anyhow::{Context, Result};

use crate::{FB_HEIGHT, FB_WIDTH, Invaders};

/// The four 2 KiB chips of the arcade ROM set, in address order.
pub const ROM_SET: [&str; 4] = ["invaders.h", "invaders.g", "invaders.f", "invaders.e"];

/// Save the current screen as a PNG file.
///
/// The framebuffer is ARGB32; this converts it to RGBA bytes for the encoder.
pub fn save_screenshot(invaders: &Invaders, path: &Path) -> Result<()> {
    let file = fs::File::create(path)
        .with_context(|| format!("creating {}", path.display()))?;
    let mut encoder = png::Encoder::new(BufWriter::new(file), FB_WIDTH, FB_HEIGHT);
    encoder.set_color(png::ColorType::Rgba);
    encoder.set_depth(png::BitDepth::Eight);
    let mut writer = encoder.write_header()?;

    let mut rgba = Vec::with_capacity((FB_WIDTH * FB_HEIGHT * 4) as usize);
    for pixel in invaders.framebuffer() {
        rgba.push((pixel >> 16) as u8);
        rgba.push((pixel >> 8) as u8);
        rgba.push(pixel as u8);
        rgba.push(0xFF);
    }

    writer.write_image_data(&rgba)?;
    Ok(())
}

/// Load a ROM image from a file, or from a directory holding the split set.
pub fn load_rom(path: &Path) -> Result<Vec<u8>> {
    if !path.is_dir() {
        return fs::read(path).with_context(|| format!("reading ROM {}", path.display()));
    }

    let mut rom = Vec::new();
    for name in ROM_SET {
        let chip = path.join(name);
        let bytes = fs::read(&chip).with_context(|| format!("reading ROM {}", chip.display()))?;
        log::debug!("{}: {} bytes", chip.display(), bytes.len());
        rom.extend_from_slice(&bytes);
    }
    Ok(rom)
}
