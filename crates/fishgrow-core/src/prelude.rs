//! Prelude module for convenient imports
//!
//! ```ignore
//! use fishgrow_core::prelude::*;
//! ```
//!
//! This brings the following into scope:
//!
//! - Application context: `GameApp`, `Config`
//! - Session: `GameSession`, `GameState`, `SessionEvent`, `Encounter`
//! - Leaderboard: `RankingStore`, `ScoreEntry`, preference stores
//! - Error handling: `Error`, `Result`

// Application context
pub use crate::app::GameApp;
pub use crate::config::Config;

// Error handling
pub use crate::error::{Error, Result};

// Session types
pub use crate::session::{Encounter, GameSession, GameState, SessionEvent};

// Leaderboard types
pub use crate::ranking::{
    FilePreferences, MemoryPreferences, PreferenceStore, RankingStore, ScoreEntry,
};

// Spawning
pub use crate::spawner::{EnemySpawner, SpawnRequest};
