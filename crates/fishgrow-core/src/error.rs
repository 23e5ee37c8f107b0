use thiserror::Error;

use crate::session::GameState;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Invalid state transition: cannot {action} from {from}")]
    InvalidStateTransition {
        from: GameState,
        action: &'static str,
    },

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Check if this error is a rejected session command
    pub fn is_invalid_transition(&self) -> bool {
        matches!(self, Error::InvalidStateTransition { .. })
    }
}
