use std::fmt;

use crate::config::GameConfig;

/// Calendar position of the simulation. Day 1 is the first day of the game.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GameDate(pub u32);

impl GameDate {
    pub const FIRST_DAY: Self = Self(1);

    pub fn new(day: u32) -> Self {
        Self(day.max(1))
    }

    /// Days elapsed since the start, counting the first day as 1.
    #[inline]
    pub const fn day(self) -> u32 {
        self.0
    }

    /// 1 (first day of the week) through 7.
    pub const fn day_of_week(self) -> u32 {
        (self.0.saturating_sub(1)) % GameConfig::DAYS_PER_WEEK + 1
    }

    /// 1-based week number.
    pub const fn week(self) -> u32 {
        (self.0.saturating_sub(1)) / GameConfig::DAYS_PER_WEEK + 1
    }

    #[must_use]
    pub const fn next(self) -> Self {
        Self(self.0 + 1)
    }
}

impl Default for GameDate {
    fn default() -> Self {
        Self::FIRST_DAY
    }
}

impl fmt::Display for GameDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "day {} (week {}, day {})",
            self.0,
            self.week(),
            self.day_of_week()
        )
    }
}
