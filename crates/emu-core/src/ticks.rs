//! A count of clock cycles.

/// A count of clock cycles.
///
/// Used for budgets (cycles per frame, cycles per interrupt burst) so they
/// don't get confused with addresses or port numbers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Ticks(pub u64);

impl Ticks {
    #[must_use]
    pub const fn new(count: u64) -> Self {
        Self(count)
    }

    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }

    /// Split the count into `parts` equal shares (integer division).
    #[must_use]
    pub const fn split(self, parts: u64) -> Self {
        Self(self.0 / parts)
    }
}
