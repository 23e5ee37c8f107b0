//! Tunable parameters for the session, leaderboard and spawner.
//!
//! All sections deserialize with `#[serde(default)]`, so a config file only
//! needs the keys it wants to override.

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::{Error, Result};
use crate::session::{MAX_LEVEL, MIN_LEVEL, ScoreTable};
use crate::spawner::EnemyVariant;

pub const DEFAULT_PLAYER_NAME: &str = "Guest";
pub const DEFAULT_PREFS_KEY: &str = "RANKING_DATA";

/// Round rules
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    pub game_duration_secs: f32,
    pub start_level: u8,
    pub food_to_level2: u32,
    pub food_to_level3: u32,
    pub points: ScoreTable,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            game_duration_secs: 90.0,
            start_level: 1,
            food_to_level2: 5,
            food_to_level3: 12,
            points: ScoreTable::default(),
        }
    }
}

impl SessionConfig {
    /// Bring thresholds and start level into range.
    ///
    /// Out-of-range values are repaired and logged rather than rejected.
    pub fn normalize(&mut self) {
        if !(MIN_LEVEL..=MAX_LEVEL).contains(&self.start_level) {
            warn!(
                "start_level {} out of range, clamping to {}..={}",
                self.start_level, MIN_LEVEL, MAX_LEVEL
            );
            self.start_level = self.start_level.clamp(MIN_LEVEL, MAX_LEVEL);
        }
        if self.food_to_level2 == 0 {
            warn!("food_to_level2 must be at least 1, using 1");
            self.food_to_level2 = 1;
        }
        if self.food_to_level2 == u32::MAX {
            warn!("food_to_level2 leaves no room for level 3, using {}", u32::MAX - 1);
            self.food_to_level2 = u32::MAX - 1;
        }
        if self.food_to_level3 <= self.food_to_level2 {
            warn!(
                "food_to_level3 ({}) must exceed food_to_level2 ({}), using {}",
                self.food_to_level3,
                self.food_to_level2,
                self.food_to_level2 + 1
            );
            self.food_to_level3 = self.food_to_level2 + 1;
        }
    }

    pub fn validate(&self) -> Result<()> {
        if !self.game_duration_secs.is_finite() || self.game_duration_secs <= 0.0 {
            return Err(Error::InvalidConfig(format!(
                "game_duration_secs must be positive, got {}",
                self.game_duration_secs
            )));
        }
        Ok(())
    }
}

/// Leaderboard persistence
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RankingConfig {
    /// Entries kept after each insert; `0` keeps everything
    pub max_entries: usize,
    /// Key the leaderboard JSON is stored under
    pub prefs_key: String,
    pub default_player_name: String,
}

impl Default for RankingConfig {
    fn default() -> Self {
        Self {
            max_entries: 100,
            prefs_key: DEFAULT_PREFS_KEY.to_string(),
            default_player_name: DEFAULT_PLAYER_NAME.to_string(),
        }
    }
}

/// Enemy spawning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpawnerConfig {
    pub interval_secs: f32,
    pub variants: Vec<EnemyVariant>,
}

impl Default for SpawnerConfig {
    fn default() -> Self {
        Self {
            interval_secs: 1.5,
            variants: EnemyVariant::defaults(),
        }
    }
}

impl SpawnerConfig {
    pub fn validate(&self) -> Result<()> {
        if !self.interval_secs.is_finite() || self.interval_secs <= 0.0 {
            return Err(Error::InvalidConfig(format!(
                "interval_secs must be positive, got {}",
                self.interval_secs
            )));
        }
        for (i, v) in self.variants.iter().enumerate() {
            if !v.weight.is_finite() || !v.speed_min.is_finite() || !v.speed_max.is_finite() {
                return Err(Error::InvalidConfig(format!(
                    "variant {}: weight and speeds must be finite",
                    i
                )));
            }
            if v.speed_min > v.speed_max {
                return Err(Error::InvalidConfig(format!(
                    "variant {}: speed_min {} exceeds speed_max {}",
                    i, v.speed_min, v.speed_max
                )));
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub session: SessionConfig,
    pub ranking: RankingConfig,
    pub spawner: SpawnerConfig,
}

impl Config {
    /// Create a new configuration builder
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }

    /// Normalize repairable values, then reject the rest.
    pub fn validate(mut self) -> Result<Self> {
        self.session.normalize();
        self.session.validate()?;
        self.spawner.validate()?;
        Ok(self)
    }
}

/// Builder for Config
#[derive(Debug, Clone, Default)]
pub struct ConfigBuilder {
    game_duration_secs: Option<f32>,
    start_level: Option<u8>,
    thresholds: Option<(u32, u32)>,
    points: Option<ScoreTable>,
    max_entries: Option<usize>,
    prefs_key: Option<String>,
    spawn_interval_secs: Option<f32>,
    variants: Option<Vec<EnemyVariant>>,
}

impl ConfigBuilder {
    /// Set the countdown length of a round
    pub fn game_duration_secs(mut self, secs: f32) -> Self {
        self.game_duration_secs = Some(secs);
        self
    }

    pub fn start_level(mut self, level: u8) -> Self {
        self.start_level = Some(level);
        self
    }

    /// Set the food counts needed to reach level 2 and level 3
    pub fn level_thresholds(mut self, to_level2: u32, to_level3: u32) -> Self {
        self.thresholds = Some((to_level2, to_level3));
        self
    }

    pub fn points(mut self, points: ScoreTable) -> Self {
        self.points = Some(points);
        self
    }

    /// Set the leaderboard size cap
    pub fn max_entries(mut self, max: usize) -> Self {
        self.max_entries = Some(max);
        self
    }

    pub fn prefs_key<S: Into<String>>(mut self, key: S) -> Self {
        self.prefs_key = Some(key.into());
        self
    }

    pub fn spawn_interval_secs(mut self, secs: f32) -> Self {
        self.spawn_interval_secs = Some(secs);
        self
    }

    pub fn variants(mut self, variants: Vec<EnemyVariant>) -> Self {
        self.variants = Some(variants);
        self
    }

    /// Build and validate the configuration
    pub fn build(self) -> Result<Config> {
        let mut config = Config::default();
        if let Some(secs) = self.game_duration_secs {
            config.session.game_duration_secs = secs;
        }
        if let Some(level) = self.start_level {
            config.session.start_level = level;
        }
        if let Some((t2, t3)) = self.thresholds {
            config.session.food_to_level2 = t2;
            config.session.food_to_level3 = t3;
        }
        if let Some(points) = self.points {
            config.session.points = points;
        }
        if let Some(max) = self.max_entries {
            config.ranking.max_entries = max;
        }
        if let Some(key) = self.prefs_key {
            config.ranking.prefs_key = key;
        }
        if let Some(secs) = self.spawn_interval_secs {
            config.spawner.interval_secs = secs;
        }
        if let Some(variants) = self.variants {
            config.spawner.variants = variants;
        }
        config.validate()
    }
}
