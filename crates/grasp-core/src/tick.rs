// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
/// Discrete update tick within a grab session.
///
/// Sessions advance in integer ticks, one per `update_transform`. The newtype
/// keeps tick indices from being confused with grab-point counts.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Tick {
    index: u64,
}

impl Tick {
    /// Creates a new tick with the given index.
    #[must_use]
    pub const fn new(index: u64) -> Self {
        Self { index }
    }

    /// Returns the tick index.
    #[must_use]
    pub const fn index(&self) -> u64 {
        self.index
    }

    /// Returns the following tick (saturating at `u64::MAX`).
    #[must_use]
    pub const fn next(&self) -> Self {
        Self::new(self.index.saturating_add(1))
    }
}
