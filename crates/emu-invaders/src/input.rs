//! Cabinet controls.
//!
//! Three layers, as on the other machines:
//! 1. `Button` names each switch and where it appears in the port space.
//! 2. `InputState` holds the live bitmasks read by IN 0/1/2.
//! 3. `InputQueue` schedules presses and releases on frame numbers for
//!    headless runs.
//!
//! All buttons are active-high.

use std::collections::VecDeque;

/// A cabinet switch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Button {
    Coin,
    P1Start,
    P2Start,
    P1Fire,
    P1Left,
    P1Right,
    P2Fire,
    P2Left,
    P2Right,
    Tilt,
}

impl Button {
    /// Input port and bit mask for this button.
    #[must_use]
    pub const fn port_bit(self) -> (u8, u8) {
        match self {
            Self::Coin => (1, 0x01),
            Self::P2Start => (1, 0x02),
            Self::P1Start => (1, 0x04),
            Self::P1Fire => (1, 0x10),
            Self::P1Left => (1, 0x20),
            Self::P1Right => (1, 0x40),

            Self::Tilt => (2, 0x04),
            Self::P2Fire => (2, 0x10),
            Self::P2Left => (2, 0x20),
            Self::P2Right => (2, 0x40),
        }
    }
}

/// Port 0 bits 1-3 are tied high.
const PORT0_FIXED: u8 = 0x0E;

/// Port 1 bit 3 is tied high.
const PORT1_FIXED: u8 = 0x08;

/// Player-1 fire/left/right, mirrored on port 0.
const P1_CONTROLS: u8 = 0x70;

/// Live button bitmasks.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InputState {
    port1: u8,
    port2: u8,
}

impl InputState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Press or release a button.
    pub fn set(&mut self, button: Button, pressed: bool) {
        let (port, mask) = button.port_bit();
        let bits = if port == 1 {
            &mut self.port1
        } else {
            &mut self.port2
        };
        if pressed {
            *bits |= mask;
        } else {
            *bits &= !mask;
        }
    }

    /// Whether a button is currently held.
    #[must_use]
    pub fn is_pressed(&self, button: Button) -> bool {
        let (port, mask) = button.port_bit();
        let bits = if port == 1 { self.port1 } else { self.port2 };
        bits & mask != 0
    }

    /// Release everything.
    pub fn release_all(&mut self) {
        *self = Self::new();
    }

    /// Value read on port 0.
    #[must_use]
    pub fn port0(&self) -> u8 {
        PORT0_FIXED | (self.port1 & P1_CONTROLS)
    }

    /// Value read on port 1.
    #[must_use]
    pub fn port1(&self) -> u8 {
        self.port1 | PORT1_FIXED
    }

    /// Value read on port 2, given the dip switch bits.
    #[must_use]
    pub fn port2(&self, dip_bits: u8) -> u8 {
        self.port2 | dip_bits
    }
}

/// A timed button event.
#[derive(Debug, Clone)]
pub struct InputEvent {
    /// Frame number at which this event fires.
    pub frame: u64,
    pub button: Button,
    /// True = press, false = release.
    pub pressed: bool,
}

/// Timed input queue for scripted sessions.
///
/// Events are sorted by frame number and processed at the start of each frame.
#[derive(Debug, Default)]
pub struct InputQueue {
    events: VecDeque<InputEvent>,
}

impl InputQueue {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Enqueue a raw input event.
    pub fn push(&mut self, event: InputEvent) {
        // Insert after any event for the same frame so order is kept.
        let pos = self
            .events
            .iter()
            .position(|e| e.frame > event.frame)
            .unwrap_or(self.events.len());
        self.events.insert(pos, event);
    }

    /// Press `button` at `at_frame` and release it `hold_frames` later.
    pub fn enqueue_press(&mut self, button: Button, at_frame: u64, hold_frames: u64) {
        self.push(InputEvent {
            frame: at_frame,
            button,
            pressed: true,
        });
        self.push(InputEvent {
            frame: at_frame + hold_frames,
            button,
            pressed: false,
        });
    }

    /// Apply every event due at or before `frame`.
    pub fn process(&mut self, frame: u64, input: &mut InputState) {
        while self.events.front().is_some_and(|e| e.frame <= frame) {
            if let Some(event) = self.events.pop_front() {
                input.set(event.button, event.pressed);
            }
        }
    }

    /// Number of pending events.
    #[must_use]
    pub fn len(&self) -> usize {
        self.events.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Drop all pending events.
    pub fn clear(&mut self) {
        self.events.clear();
    }
}
