use serde::{Deserialize, Serialize};

/// Points awarded for eating an enemy, by enemy level tier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoreTable {
    pub tier1: u32,
    pub tier2: u32,
    pub tier3: u32,
}

impl Default for ScoreTable {
    fn default() -> Self {
        Self {
            tier1: 100,
            tier2: 300,
            tier3: 500,
        }
    }
}

impl ScoreTable {
    /// Level 1 or below maps to tier 1, level 3 or above to tier 3.
    pub fn points_for_level(&self, level: i64) -> u32 {
        match level {
            i64::MIN..=1 => self.tier1,
            2 => self.tier2,
            _ => self.tier3,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_points_for_level() {
        let table = ScoreTable::default();
        assert_eq!(table.points_for_level(-3), 100);
        assert_eq!(table.points_for_level(0), 100);
        assert_eq!(table.points_for_level(1), 100);
        assert_eq!(table.points_for_level(2), 300);
        assert_eq!(table.points_for_level(3), 500);
        assert_eq!(table.points_for_level(7), 500);
    }
}
