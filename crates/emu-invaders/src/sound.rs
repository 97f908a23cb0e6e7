//! Sound trigger latches on OUT 3 and OUT 5.
//!
//! The board's discrete sound circuits fire on a rising edge of each latch
//! bit. The emulator does not synthesise audio; it turns edges into
//! [`SoundEvent`]s for whoever plays the samples.
//!
//! | Port | Bit | Sound                         |
//! |------|-----|-------------------------------|
//! | 3    | 0   | UFO (loops while held)        |
//! | 3    | 1   | Shot                          |
//! | 3    | 2   | Player death                  |
//! | 3    | 3   | Invader death                 |
//! | 3    | 4   | Extra life                    |
//! | 5    | 0-3 | Fleet movement, notes 1-4     |
//! | 5    | 4   | UFO hit                       |

/// A sound trigger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SoundEvent {
    Ufo,
    Shot,
    PlayerDeath,
    InvaderDeath,
    ExtraLife,
    /// Fleet movement note, 1-4.
    FleetMove(u8),
    UfoHit,
}

const PORT3_SOUNDS: [SoundEvent; 5] = [
    SoundEvent::Ufo,
    SoundEvent::Shot,
    SoundEvent::PlayerDeath,
    SoundEvent::InvaderDeath,
    SoundEvent::ExtraLife,
];

const PORT5_SOUNDS: [SoundEvent; 5] = [
    SoundEvent::FleetMove(1),
    SoundEvent::FleetMove(2),
    SoundEvent::FleetMove(3),
    SoundEvent::FleetMove(4),
    SoundEvent::UfoHit,
];

/// The two sound latches plus the edges seen since the last drain.
#[derive(Debug, Clone, Default)]
pub struct SoundLatch {
    port3: u8,
    port5: u8,
    events: Vec<SoundEvent>,
}

impl SoundLatch {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Latch a write to port 3.
    pub fn write_port3(&mut self, value: u8) {
        Self::latch(&mut self.port3, value, &PORT3_SOUNDS, &mut self.events);
    }

    /// Latch a write to port 5.
    pub fn write_port5(&mut self, value: u8) {
        Self::latch(&mut self.port5, value, &PORT5_SOUNDS, &mut self.events);
    }

    fn latch(current: &mut u8, value: u8, sounds: &[SoundEvent; 5], events: &mut Vec<SoundEvent>) {
        let rising = value & !*current;
        *current = value;
        for (bit, &sound) in sounds.iter().enumerate() {
            if rising & (1 << bit) != 0 {
                log::trace!("sound: {sound:?}");
                events.push(sound);
            }
        }
    }

    /// Drain the events recorded since the last call.
    pub fn take_events(&mut self) -> Vec<SoundEvent> {
        std::mem::take(&mut self.events)
    }

    /// Whether the looping UFO sound is currently held on.
    #[must_use]
    pub fn ufo_active(&self) -> bool {
        self.port3 & 0x01 != 0
    }

    /// Last values written to ports 3 and 5.
    #[must_use]
    pub fn latches(&self) -> (u8, u8) {
        (self.port3, self.port5)
    }

    /// Clear latches and pending events.
    pub fn reset(&mut self) {
        *self = Self::new();
    }
}
