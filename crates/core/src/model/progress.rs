use serde::{Deserialize, Serialize};
use std::fmt;

/// An integer percentage that always lies in `0..=100`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ProgressValue(u8);

impl ProgressValue {
    pub const MIN: Self = Self(0);
    pub const MAX: Self = Self(100);

    /// Clamp any integer into the percentage range.
    #[must_use]
    pub fn clamped(value: i64) -> Self {
        let clamped = value.clamp(0, 100);
        // 0..=100 always fits in u8.
        Self(u8::try_from(clamped).unwrap_or(100))
    }

    /// Percentage of `done` out of `total`, rounded half up. Zero total yields 0.
    #[must_use]
    pub fn from_ratio(done: usize, total: usize) -> Self {
        if total == 0 {
            return Self::MIN;
        }
        let done = done.min(total) as u128;
        let total = total as u128;
        let pct = (done * 100 + total / 2) / total;
        Self::clamped(i64::try_from(pct).unwrap_or(100))
    }

    #[must_use]
    pub fn get(self) -> u8 {
        self.0
    }
}

impl fmt::Display for ProgressValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.0)
    }
}
