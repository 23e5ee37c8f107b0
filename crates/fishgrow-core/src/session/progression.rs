//! Fish growth: cumulative food eaten and the level it unlocks.

use serde::{Deserialize, Serialize};

pub const MIN_LEVEL: u8 = 1;
pub const MAX_LEVEL: u8 = 3;

/// Clamp an arbitrary level value into `MIN_LEVEL..=MAX_LEVEL`
pub fn clamp_level(level: i64) -> u8 {
    level.clamp(MIN_LEVEL as i64, MAX_LEVEL as i64) as u8
}

/// Result of feeding that crossed one or more thresholds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LevelUp {
    pub from: u8,
    pub to: u8,
}

impl LevelUp {
    /// Every level reached, in order (one per threshold crossed)
    pub fn levels(&self) -> impl Iterator<Item = u8> {
        (self.from + 1)..=self.to
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Progression {
    level: u8,
    food_eaten: u32,
    food_to_level2: u32,
    food_to_level3: u32,
}

impl Progression {
    /// Thresholds are normalized so that `1 <= T2 < T3`.
    pub fn new(food_to_level2: u32, food_to_level3: u32) -> Self {
        let food_to_level2 = food_to_level2.clamp(1, u32::MAX - 1);
        let food_to_level3 = food_to_level3.max(food_to_level2 + 1);
        Self {
            level: MIN_LEVEL,
            food_eaten: 0,
            food_to_level2,
            food_to_level3,
        }
    }

    pub fn level(&self) -> u8 {
        self.level
    }

    pub fn food_eaten(&self) -> u32 {
        self.food_eaten
    }

    pub fn thresholds(&self) -> (u32, u32) {
        (self.food_to_level2, self.food_to_level3)
    }

    /// Set the level and forget all food eaten so far.
    pub fn reset(&mut self, start_level: u8) {
        self.level = clamp_level(start_level as i64);
        self.food_eaten = 0;
    }

    /// Add food and apply the level-up rule. Zero is ignored.
    pub fn add_food(&mut self, amount: u32) -> Option<LevelUp> {
        if amount == 0 {
            return None;
        }
        self.food_eaten = self.food_eaten.saturating_add(amount);

        let from = self.level;
        if self.level == 1 && self.food_eaten >= self.food_to_level2 {
            self.level = 2;
        }
        if self.level == 2 && self.food_eaten >= self.food_to_level3 {
            self.level = 3;
        }

        (self.level > from).then_some(LevelUp {
            from,
            to: self.level,
        })
    }

    /// Fraction of the way to the next level, `1.0` at max level
    pub fn progress01(&self) -> f32 {
        let (start, end) = match self.level {
            1 => (0, self.food_to_level2),
            2 => (self.food_to_level2, self.food_to_level3),
            _ => return 1.0,
        };
        let span = end.saturating_sub(start).max(1) as f32;
        let done = self.food_eaten.saturating_sub(start) as f32;
        (done / span).clamp(0.0, 1.0)
    }

    /// Food still needed for the next level, `None` at max level
    pub fn remaining_food_count(&self) -> Option<u32> {
        match self.level {
            1 => Some(self.food_to_level2.saturating_sub(self.food_eaten)),
            2 => Some(self.food_to_level3.saturating_sub(self.food_eaten)),
            _ => None,
        }
    }
}

impl Default for Progression {
    fn default() -> Self {
        Self::new(5, 12)
    }
}
