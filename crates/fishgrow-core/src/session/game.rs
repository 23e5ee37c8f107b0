use tracing::{debug, info};

use crate::config::SessionConfig;
use crate::error::{Error, Result};
use crate::session::{
    Encounter, EventBus, GameState, ListenerId, Progression, SessionEvent, clamp_level,
};

/// One player's game: screen state, countdown, score and fish growth.
///
/// `S` is an opaque snapshot captured when a round is won (for example the
/// final fish sprite and size); the session only stores it.
///
/// All mutation happens on the caller's thread. `tick` is meant to be called
/// once per frame with the time elapsed since the previous frame.
#[derive(Debug)]
pub struct GameSession<S = ()> {
    config: SessionConfig,
    state: GameState,
    score: u32,
    remaining_time: f32,
    is_clearing: bool,
    final_snapshot: Option<S>,
    progression: Progression,
    events: EventBus,
}

impl<S> GameSession<S> {
    pub fn new(config: SessionConfig) -> Self {
        let mut progression = Progression::new(config.food_to_level2, config.food_to_level3);
        progression.reset(config.start_level);

        Self {
            remaining_time: config.game_duration_secs.max(0.0),
            config,
            state: GameState::Menu,
            score: 0,
            is_clearing: false,
            final_snapshot: None,
            progression,
            events: EventBus::new(),
        }
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn remaining_time(&self) -> f32 {
        self.remaining_time
    }

    /// Countdown hit zero and the round is waiting for `win_game`
    pub fn is_clearing(&self) -> bool {
        self.is_clearing
    }

    pub fn final_snapshot(&self) -> Option<&S> {
        self.final_snapshot.as_ref()
    }

    pub fn progression(&self) -> &Progression {
        &self.progression
    }

    pub fn level(&self) -> u8 {
        self.progression.level()
    }

    pub fn subscribe<F>(&mut self, listener: F) -> ListenerId
    where
        F: FnMut(&SessionEvent) + 'static,
    {
        self.events.subscribe(listener)
    }

    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        self.events.unsubscribe(id)
    }

    // ---- state transitions ----

    /// Begin a fresh round. Also used to restart from Game, Win or Lose.
    pub fn start_game(&mut self) -> Result<()> {
        self.guard(self.state.can_start(), "start game")?;

        self.reset_score();
        self.reset_progress(self.config.start_level, false);
        self.remaining_time = self.config.game_duration_secs.max(0.0);
        self.is_clearing = false;
        self.final_snapshot = None;
        self.events.emit(SessionEvent::TimeChanged(self.remaining_time));

        self.set_state(GameState::Game);
        Ok(())
    }

    pub fn restart_game(&mut self) -> Result<()> {
        self.start_game()
    }

    pub fn win_game(&mut self, snapshot: S) -> Result<()> {
        self.guard(self.state == GameState::Game, "win")?;

        self.final_snapshot = Some(snapshot);
        self.set_state(GameState::Win);
        self.events.emit(SessionEvent::WinScore(self.score));
        Ok(())
    }

    pub fn lose_game(&mut self) -> Result<()> {
        self.guard(self.state == GameState::Game, "lose")?;
        self.set_state(GameState::Lose);
        Ok(())
    }

    pub fn go_to_menu(&mut self) -> Result<()> {
        self.guard(self.state.can_return_to_menu(), "go to menu")?;
        self.set_state(GameState::Menu);
        Ok(())
    }

    pub fn reset_game(&mut self) -> Result<()> {
        self.go_to_menu()
    }

    pub fn go_to_name_entry(&mut self) -> Result<()> {
        self.guard(
            matches!(self.state, GameState::Menu | GameState::NameEntry),
            "enter name",
        )?;
        self.set_state(GameState::NameEntry);
        Ok(())
    }

    pub fn go_to_rankings(&mut self) -> Result<()> {
        self.guard(self.state.can_show_rankings(), "show rankings")?;
        self.set_state(GameState::Rankings);
        Ok(())
    }

    // ---- per-frame ----

    /// Advance the countdown. Ignored outside a running round and after the
    /// countdown has expired. Negative or non-finite deltas count as zero.
    pub fn tick(&mut self, delta_secs: f32) {
        if self.state != GameState::Game || self.is_clearing {
            return;
        }

        let delta = if delta_secs.is_finite() {
            delta_secs.max(0.0)
        } else {
            0.0
        };
        self.remaining_time = (self.remaining_time - delta).max(0.0);
        self.events.emit(SessionEvent::TimeChanged(self.remaining_time));

        if self.remaining_time <= 0.0 {
            self.remaining_time = 0.0;
            self.is_clearing = true;
            info!("Time expired with score {}", self.score);
            self.events.emit(SessionEvent::TimeExpired);
        }
    }

    // ---- score ----

    /// Add the tier points for eating an enemy of `level`.
    pub fn add_score_for_enemy_level(&mut self, level: i32) {
        let points = self.config.points.points_for_level(level as i64);
        self.score = self.score.saturating_add(points);
        debug!("Score +{} (enemy level {}) -> {}", points, level, self.score);
        self.events.emit(SessionEvent::ScoreChanged(self.score));
    }

    pub fn reset_score(&mut self) {
        self.score = 0;
        self.events.emit(SessionEvent::ScoreChanged(0));
    }

    // ---- progression ----

    /// Feed the fish `amount` units, emitting one `LevelChanged` per level
    /// reached.
    pub fn add_food(&mut self, amount: u32) {
        if let Some(level_up) = self.progression.add_food(amount) {
            for level in level_up.levels() {
                info!("Fish grew to level {}", level);
                self.events.emit(SessionEvent::LevelChanged(level));
            }
        }
    }

    /// Set the fish level and zero food eaten. With `notify` false no
    /// `LevelChanged` is emitted (used when a round is reset).
    pub fn reset_progress(&mut self, start_level: u8, notify: bool) {
        self.progression.reset(start_level);
        if notify {
            self.events
                .emit(SessionEvent::LevelChanged(self.progression.level()));
        }
    }

    pub fn progress01(&self) -> f32 {
        self.progression.progress01()
    }

    pub fn remaining_food_count(&self) -> Option<u32> {
        self.progression.remaining_food_count()
    }

    // ---- gameplay events ----

    /// Food pickup: one progression unit, no score.
    pub fn eat_food(&mut self) -> Result<()> {
        self.guard(self.state == GameState::Game, "eat food")?;
        self.add_food(1);
        Ok(())
    }

    /// The fish touched an enemy of `enemy_level` (clamped to 1..=3).
    pub fn encounter_enemy(&mut self, enemy_level: i32) -> Result<Encounter> {
        self.guard(self.state == GameState::Game, "encounter enemy")?;

        let enemy_level = clamp_level(enemy_level as i64);
        let outcome = Encounter::resolve(self.progression.level(), enemy_level);
        match outcome {
            Encounter::Ate { enemy_level, food } => {
                self.add_food(food);
                self.add_score_for_enemy_level(i32::from(enemy_level));
                self.events.emit(SessionEvent::EnemyEaten { level: enemy_level });
            }
            Encounter::Eaten { enemy_level } => {
                info!(
                    "Eaten by level {} enemy at fish level {}",
                    enemy_level,
                    self.progression.level()
                );
                self.lose_game()?;
            }
        }
        Ok(outcome)
    }

    fn guard(&self, allowed: bool, action: &'static str) -> Result<()> {
        if allowed {
            Ok(())
        } else {
            Err(Error::InvalidStateTransition {
                from: self.state,
                action,
            })
        }
    }

    fn set_state(&mut self, next: GameState) {
        if self.state == next {
            return;
        }
        debug!("Game state changed: {:?} -> {:?}", self.state, next);
        self.state = next;
        self.events.emit(SessionEvent::StateChanged(next));
    }
}

impl<S> Default for GameSession<S> {
    fn default() -> Self {
        Self::new(SessionConfig::default())
    }
}
