//! # fishgrow-core
//!
//! Engine-independent rules for the fish growth game.
//!
//! This crate provides:
//! - Round state machine with countdown, score and fish progression
//! - Encounter rule deciding who eats whom
//! - Weighted-random enemy spawning
//! - Persistent best-score-per-player leaderboard
//!
//! Rendering, input, audio and physics live in the embedding application,
//! which drives [`GameApp`] once per frame and observes [`SessionEvent`]s.

pub mod app;
pub mod config;
pub mod error;
pub mod prelude;
pub mod ranking;
pub mod session;
pub mod spawner;

pub use app::GameApp;
pub use config::{Config, ConfigBuilder, RankingConfig, SessionConfig, SpawnerConfig};
pub use error::{Error, Result};
pub use ranking::{
    FilePreferences, MemoryPreferences, PLAYER_NAME_MAX_LENGTH, PreferenceStore, RankingStore,
    ScoreData, ScoreEntry, sanitize_name,
};
pub use session::{
    Encounter, GameSession, GameState, ListenerId, MAX_LEVEL, MIN_LEVEL, Progression,
    ScoreTable, SessionEvent,
};
pub use spawner::{Direction, EnemySpawner, EnemyVariant, SpawnRequest};
