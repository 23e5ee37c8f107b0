//! Timed, weighted-random enemy spawning.
//!
//! The spawner only decides *what* to spawn and *when*; placing and moving
//! the enemy is left to the caller.

use rand::Rng;
use rand::distributions::{Distribution, WeightedIndex};
use serde::{Deserialize, Serialize};
use strum::{Display, IntoStaticStr};
use tracing::debug;

use crate::config::SpawnerConfig;
use crate::session::clamp_level;

/// Most enemies a single tick may produce, however long the frame was
pub const MAX_SPAWNS_PER_TICK: usize = 8;

/// A kind of enemy the spawner can produce
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnemyVariant {
    /// Relative spawn probability; non-positive weights never spawn
    pub weight: f32,
    pub speed_min: f32,
    pub speed_max: f32,
    pub level: u8,
}

impl EnemyVariant {
    pub fn new(level: u8, speed_min: f32, speed_max: f32) -> Self {
        Self {
            weight: 1.0,
            speed_min,
            speed_max,
            level,
        }
    }

    pub fn with_weight(mut self, weight: f32) -> Self {
        self.weight = weight;
        self
    }

    /// One variant per level, faster as they grow
    pub fn defaults() -> Vec<Self> {
        vec![
            Self::new(1, 150.0, 250.0),
            Self::new(2, 200.0, 320.0),
            Self::new(3, 260.0, 380.0),
        ]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, IntoStaticStr, Display)]
pub enum Direction {
    LeftToRight,
    RightToLeft,
}

/// Instruction to put one enemy on screen
#[derive(Debug, Clone, PartialEq)]
pub struct SpawnRequest {
    pub variant: usize,
    pub level: u8,
    pub direction: Direction,
    pub speed: f32,
    /// Display scale for the enemy's level
    pub scale: f32,
}

/// Display scale of an enemy at `level`
pub fn scale_for_level(level: u8) -> f32 {
    match clamp_level(level as i64) {
        1 => 0.9,
        2 => 1.0,
        _ => 1.25,
    }
}

#[derive(Debug, Clone)]
pub struct EnemySpawner {
    interval_secs: f32,
    variants: Vec<EnemyVariant>,
    running: bool,
    elapsed: f32,
}

impl EnemySpawner {
    pub fn new(config: SpawnerConfig) -> Self {
        Self {
            interval_secs: config.interval_secs,
            variants: config.variants,
            running: false,
            elapsed: 0.0,
        }
    }

    pub fn variants(&self) -> &[EnemyVariant] {
        &self.variants
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Start spawning; the first enemy comes on the next tick. No-op if
    /// already running.
    pub fn start(&mut self) {
        if self.running {
            return;
        }
        debug!("Spawner started (interval {}s)", self.interval_secs);
        self.running = true;
        self.elapsed = self.interval_secs;
    }

    pub fn stop(&mut self) {
        if !self.running {
            return;
        }
        debug!("Spawner stopped");
        self.running = false;
        self.elapsed = 0.0;
    }

    /// Advance the spawn clock, returning one request per elapsed interval.
    ///
    /// At most [`MAX_SPAWNS_PER_TICK`] requests come back; intervals beyond
    /// that are dropped, not queued.
    pub fn tick<R: Rng + ?Sized>(&mut self, delta_secs: f32, rng: &mut R) -> Vec<SpawnRequest> {
        let mut spawned = Vec::new();
        if !self.running || !self.interval_secs.is_finite() || self.interval_secs <= 0.0 {
            return spawned;
        }

        if delta_secs.is_finite() && delta_secs > 0.0 {
            self.elapsed += delta_secs;
        }
        if !self.elapsed.is_finite() {
            self.elapsed = self.interval_secs;
        }
        if self.elapsed < self.interval_secs {
            return spawned;
        }

        let due = (self.elapsed / self.interval_secs).floor();
        self.elapsed %= self.interval_secs;
        let count = (due as usize).clamp(1, MAX_SPAWNS_PER_TICK);
        if due as usize > MAX_SPAWNS_PER_TICK {
            debug!("Dropping {} overdue spawns", due as usize - MAX_SPAWNS_PER_TICK);
        }
        for _ in 0..count {
            if let Some(request) = self.spawn_random(rng) {
                spawned.push(request);
            }
        }
        spawned
    }

    /// Pick a variant index with probability proportional to its weight.
    pub fn pick_variant<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<usize> {
        let weights = self.variants.iter().map(|v| v.weight.max(0.0));
        let dist = WeightedIndex::new(weights).ok()?;
        Some(dist.sample(rng))
    }

    /// Spawn a random variant with a random direction and speed.
    pub fn spawn_random<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<SpawnRequest> {
        let index = self.pick_variant(rng)?;
        let direction = if rng.gen_bool(0.5) {
            Direction::LeftToRight
        } else {
            Direction::RightToLeft
        };
        let variant = &self.variants[index];
        let speed = if variant.speed_max > variant.speed_min {
            rng.gen_range(variant.speed_min..variant.speed_max)
        } else {
            variant.speed_min
        };
        self.spawn_of_type(index, direction, speed)
    }

    /// Spawn a specific variant. `None` if the index is out of range.
    pub fn spawn_of_type(
        &self,
        index: usize,
        direction: Direction,
        speed: f32,
    ) -> Option<SpawnRequest> {
        let variant = self.variants.get(index)?;
        let level = clamp_level(variant.level as i64);
        Some(SpawnRequest {
            variant: index,
            level,
            direction,
            speed,
            scale: scale_for_level(level),
        })
    }
}

impl Default for EnemySpawner {
    fn default() -> Self {
        Self::new(SpawnerConfig::default())
    }
}
