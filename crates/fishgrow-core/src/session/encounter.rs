//! Who eats whom when the fish touches an enemy.

/// Outcome of the fish meeting an enemy
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Encounter {
    /// The fish ate the enemy
    Ate {
        enemy_level: u8,
        /// Progression units gained
        food: u32,
    },
    /// A bigger enemy ate the fish; the round is lost
    Eaten { enemy_level: u8 },
}

impl Encounter {
    /// An enemy is edible iff `fish_level >= enemy_level`. Eating is worth
    /// `max(1, enemy_level)` food.
    pub fn resolve(fish_level: u8, enemy_level: u8) -> Self {
        if fish_level >= enemy_level {
            Self::Ate {
                enemy_level,
                food: u32::from(enemy_level.max(1)),
            }
        } else {
            Self::Eaten { enemy_level }
        }
    }

    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::Eaten { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_level_is_edible() {
        assert_eq!(
            Encounter::resolve(2, 2),
            Encounter::Ate {
                enemy_level: 2,
                food: 2
            }
        );
    }

    #[test]
    fn test_smaller_enemy_food_value() {
        assert_eq!(
            Encounter::resolve(3, 1),
            Encounter::Ate {
                enemy_level: 1,
                food: 1
            }
        );
    }

    #[test]
    fn test_bigger_enemy_is_fatal() {
        let outcome = Encounter::resolve(1, 3);
        assert!(outcome.is_fatal());
        assert_eq!(outcome, Encounter::Eaten { enemy_level: 3 });
    }
}
