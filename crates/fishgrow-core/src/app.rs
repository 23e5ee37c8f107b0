//! Application-owned context wiring the session, leaderboard and spawner.
//!
//! The session and the leaderboard do not know about each other; this type
//! is where a won round turns into a leaderboard entry and where spawning is
//! started and stopped with the round.
//!
//! ## Example
//!
//! ```ignore
//! use fishgrow_core::{Config, GameApp, MemoryPreferences};
//!
//! let mut app: GameApp<_, ()> = GameApp::new(Config::default(), MemoryPreferences::new())?;
//! app.go_to_name_entry()?;
//! app.confirm_name_entry("Ann")?;
//! loop {
//!     let spawns = app.update(frame_delta, &mut rng);
//!     // place enemies, resolve collisions, render ...
//! }
//! ```

use rand::Rng;
use tracing::{info, warn};

use crate::config::Config;
use crate::error::{Error, Result};
use crate::ranking::{PreferenceStore, RankingStore};
use crate::session::{Encounter, GameSession, GameState};
use crate::spawner::{EnemySpawner, SpawnRequest};

pub struct GameApp<P, S = ()> {
    session: GameSession<S>,
    ranking: RankingStore<P>,
    spawner: EnemySpawner,
}

impl<P: PreferenceStore, S> GameApp<P, S> {
    /// Validate `config` and wire up a fresh session, leaderboard and spawner.
    pub fn new(config: Config, prefs: P) -> Result<Self> {
        let config = config.validate()?;
        Ok(Self {
            session: GameSession::new(config.session),
            ranking: RankingStore::with_config(prefs, config.ranking),
            spawner: EnemySpawner::new(config.spawner),
        })
    }

    pub fn session(&self) -> &GameSession<S> {
        &self.session
    }

    /// Direct access, e.g. to subscribe listeners
    pub fn session_mut(&mut self) -> &mut GameSession<S> {
        &mut self.session
    }

    pub fn ranking(&self) -> &RankingStore<P> {
        &self.ranking
    }

    pub fn ranking_mut(&mut self) -> &mut RankingStore<P> {
        &mut self.ranking
    }

    pub fn spawner(&self) -> &EnemySpawner {
        &self.spawner
    }

    pub fn state(&self) -> GameState {
        self.session.state()
    }

    pub fn start_game(&mut self) -> Result<()> {
        self.session.start_game()?;
        self.spawner.stop();
        self.spawner.start();
        Ok(())
    }

    pub fn restart_game(&mut self) -> Result<()> {
        self.start_game()
    }

    pub fn go_to_name_entry(&mut self) -> Result<()> {
        self.session.go_to_name_entry()
    }

    /// Store the player's name and start the round.
    pub fn confirm_name_entry(&mut self, raw_name: &str) -> Result<()> {
        if self.session.state() != GameState::NameEntry {
            return Err(Error::InvalidStateTransition {
                from: self.session.state(),
                action: "confirm name",
            });
        }
        self.ranking.set_player_name(raw_name);
        info!("Player {:?} starting", self.ranking.player_name());
        self.start_game()
    }

    /// Finish the round as won and record the score.
    ///
    /// The session is in `Win` even if saving the leaderboard fails; the save
    /// error is returned for the platform layer to retry.
    pub fn win_game(&mut self, snapshot: S) -> Result<()> {
        self.session.win_game(snapshot)?;
        self.spawner.stop();

        let score = self.session.score();
        info!("Round won with score {}", score);
        if let Err(e) = self.ranking.record_win_score(i64::from(score)) {
            warn!("Win score not persisted: {}", e);
            return Err(e);
        }
        Ok(())
    }

    pub fn lose_game(&mut self) -> Result<()> {
        self.session.lose_game()?;
        self.spawner.stop();
        Ok(())
    }

    pub fn go_to_menu(&mut self) -> Result<()> {
        self.session.go_to_menu()?;
        self.spawner.stop();
        Ok(())
    }

    pub fn go_to_rankings(&mut self) -> Result<()> {
        self.session.go_to_rankings()
    }

    pub fn eat_food(&mut self) -> Result<()> {
        self.session.eat_food()
    }

    /// Resolve a fish/enemy collision; a fatal one stops spawning.
    pub fn encounter_enemy(&mut self, enemy_level: i32) -> Result<Encounter> {
        let outcome = self.session.encounter_enemy(enemy_level)?;
        if outcome.is_fatal() {
            self.spawner.stop();
        }
        Ok(outcome)
    }

    /// Per-frame update: counts down the round and returns enemies to spawn.
    ///
    /// Spawning pauses once time has expired.
    pub fn update<R: Rng + ?Sized>(&mut self, delta_secs: f32, rng: &mut R) -> Vec<SpawnRequest> {
        self.session.tick(delta_secs);
        if self.session.is_clearing() {
            self.spawner.stop();
        }
        self.spawner.tick(delta_secs, rng)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ranking::MemoryPreferences;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn app() -> GameApp<MemoryPreferences, u8> {
        GameApp::new(Config::default(), MemoryPreferences::new()).unwrap()
    }

    #[test]
    fn test_new_rejects_invalid_config() {
        let mut config = Config::default();
        config.spawner.interval_secs = f32::NAN;
        assert!(GameApp::<_, u8>::new(config, MemoryPreferences::new()).is_err());

        let mut config = Config::default();
        config.session.start_level = 0;
        config.session.food_to_level3 = 0;
        let app = GameApp::<_, u8>::new(config, MemoryPreferences::new()).unwrap();
        assert_eq!(app.session().level(), 1);
        assert_eq!(app.session().remaining_food_count(), Some(5));
    }

    #[test]
    fn test_start_runs_spawner() {
        let mut app = app();
        assert!(!app.spawner().is_running());
        app.start_game().unwrap();
        assert!(app.spawner().is_running());

        let mut rng = StdRng::seed_from_u64(0);
        assert_eq!(app.update(0.016, &mut rng).len(), 1);
    }

    #[test]
    fn test_confirm_name_requires_name_entry() {
        let mut app = app();
        app.start_game().unwrap();
        assert!(app.confirm_name_entry("Ann").is_err());
        assert_eq!(app.ranking().player_name(), "Guest");
    }

    #[test]
    fn test_confirm_name_starts_round() {
        let mut app = app();
        app.go_to_name_entry().unwrap();
        app.confirm_name_entry("  Ann\n").unwrap();
        assert_eq!(app.ranking().player_name(), "Ann");
        assert_eq!(app.state(), GameState::Game);
    }

    #[test]
    fn test_win_records_score_for_player() {
        let mut app = app();
        app.go_to_name_entry().unwrap();
        app.confirm_name_entry("Ann").unwrap();
        app.encounter_enemy(1).unwrap();
        app.win_game(2).unwrap();

        assert!(!app.spawner().is_running());
        let top = app.ranking().get_top_scores(1);
        assert_eq!(top[0].name, "Ann");
        assert_eq!(top[0].score, 100);
        assert_eq!(app.session().final_snapshot(), Some(&2));
    }

    #[test]
    fn test_fatal_encounter_stops_spawner() {
        let mut app = app();
        app.start_game().unwrap();
        assert!(app.encounter_enemy(2).unwrap().is_fatal());
        assert_eq!(app.state(), GameState::Lose);
        assert!(!app.spawner().is_running());
        assert!(app.ranking().is_empty());
    }

    #[test]
    fn test_expiry_pauses_spawning() {
        let mut app = app();
        let mut rng = StdRng::seed_from_u64(0);
        app.start_game().unwrap();
        app.update(100.0, &mut rng);
        assert!(app.session().is_clearing());
        assert!(app.update(5.0, &mut rng).is_empty());
    }
}
