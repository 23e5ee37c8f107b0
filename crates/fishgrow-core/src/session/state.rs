use serde::{Deserialize, Serialize};
use strum::{Display, EnumString, IntoStaticStr};

/// Top-level screen the game is on
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    EnumString,
    IntoStaticStr,
    Display,
)]
pub enum GameState {
    #[default]
    Menu,
    NameEntry,
    Game,
    Win,
    Lose,
    Rankings,
}

impl GameState {
    /// States a new round may be started from (menu, name entry, or a restart)
    pub fn can_start(&self) -> bool {
        matches!(
            self,
            Self::Menu | Self::NameEntry | Self::Game | Self::Win | Self::Lose
        )
    }

    /// States that return to the menu via `go_to_menu` / `reset_game`
    pub fn can_return_to_menu(&self) -> bool {
        matches!(
            self,
            Self::Menu | Self::Win | Self::Lose | Self::Rankings | Self::NameEntry
        )
    }

    pub fn can_show_rankings(&self) -> bool {
        matches!(self, Self::Menu | Self::Win | Self::Lose | Self::Rankings)
    }

    pub fn is_round_over(&self) -> bool {
        matches!(self, Self::Win | Self::Lose)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_default_is_menu() {
        assert_eq!(GameState::default(), GameState::Menu);
    }

    #[test]
    fn test_parse_and_display() {
        assert_eq!(GameState::from_str("NameEntry").unwrap(), GameState::NameEntry);
        assert_eq!(GameState::Rankings.to_string(), "Rankings");
        assert!(GameState::from_str("Paused").is_err());
    }

    #[test]
    fn test_transition_guards() {
        assert!(GameState::Menu.can_start());
        assert!(GameState::Lose.can_start());
        assert!(!GameState::Rankings.can_start());

        assert!(GameState::Rankings.can_return_to_menu());
        assert!(!GameState::Game.can_return_to_menu());

        assert!(!GameState::Game.can_show_rankings());
        assert!(GameState::Win.is_round_over());
    }
}
