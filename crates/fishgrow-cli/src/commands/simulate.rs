//! Headless auto-played round.
//!
//! Drives a `GameApp` frame by frame without a renderer: every spawned enemy
//! may reach the fish, food drifts by at a fixed rate, and the round ends on
//! time expiry (win) or on meeting a bigger enemy (lose).

use anyhow::{Result, bail};
use fishgrow_core::{
    Config, Encounter, GameApp, GameState, PreferenceStore, SessionEvent, SpawnRequest,
};
use rand::Rng;
use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::{debug, info};

/// Chance that an edible enemy reaches the fish
const EDIBLE_CONTACT_CHANCE: f64 = 0.5;
/// Chance that the fish fails to dodge a bigger enemy
const DANGER_CONTACT_CHANCE: f64 = 0.04;
/// Food pickups per second, on average
const FOOD_PER_SECOND: f64 = 0.8;

/// How a simulated round ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoundSummary {
    pub state: GameState,
    pub score: u32,
    pub level: u8,
    pub frames: u64,
}

pub fn run<P: PreferenceStore>(
    config: Config,
    prefs: P,
    name: &str,
    seed: Option<u64>,
    fps: u32,
) -> Result<()> {
    if fps == 0 {
        bail!("fps must be at least 1");
    }

    let seed = seed.unwrap_or_else(rand::random);
    info!("Simulating round (seed {}, {} fps)", seed, fps);
    let mut rng = StdRng::seed_from_u64(seed);

    let mut app: GameApp<P, u8> = GameApp::new(config, prefs)?;
    app.session_mut().subscribe(|event| match event {
        SessionEvent::LevelChanged(level) => info!("Fish grew to level {}", level),
        SessionEvent::TimeExpired => info!("Time up"),
        SessionEvent::StateChanged(state) => debug!("State -> {}", state),
        SessionEvent::ScoreChanged(score) => debug!("Score {}", score),
        _ => {}
    });

    app.go_to_name_entry()?;
    app.confirm_name_entry(name)?;

    let summary = play_round(&mut app, &mut rng, fps)?;

    println!(
        "{} with score {} at level {} after {} frames",
        summary.state, summary.score, summary.level, summary.frames
    );
    if summary.state == GameState::Win {
        let player = app.ranking().player_name();
        if let Some(rank) = app.ranking().rank_of(player) {
            println!("{} is rank {} of {}", player, rank, app.ranking().len());
        }
    }
    Ok(())
}

/// Play until the round is won or lost.
pub fn play_round<P: PreferenceStore, R: Rng>(
    app: &mut GameApp<P, u8>,
    rng: &mut R,
    fps: u32,
) -> Result<RoundSummary> {
    let dt = 1.0 / fps as f32;
    let mut frames = 0u64;

    while app.state() == GameState::Game {
        frames += 1;

        if app.session().is_clearing() {
            let level = app.session().level();
            app.win_game(level)?;
            break;
        }

        let spawned = app.update(dt, rng);
        for enemy in spawned {
            if resolve_contact(app, rng, &enemy)? {
                break;
            }
        }

        let food_chance = (FOOD_PER_SECOND * dt as f64).min(1.0);
        if app.state() == GameState::Game && rng.gen_bool(food_chance) {
            app.eat_food()?;
        }
    }

    Ok(RoundSummary {
        state: app.state(),
        score: app.session().score(),
        level: app.session().level(),
        frames,
    })
}

/// Returns `true` if the contact ended the round.
fn resolve_contact<P: PreferenceStore, R: Rng>(
    app: &mut GameApp<P, u8>,
    rng: &mut R,
    enemy: &SpawnRequest,
) -> Result<bool> {
    let chance = if enemy.level > app.session().level() {
        DANGER_CONTACT_CHANCE
    } else {
        EDIBLE_CONTACT_CHANCE
    };
    if !rng.gen_bool(chance) {
        return Ok(false);
    }

    match app.encounter_enemy(i32::from(enemy.level))? {
        Encounter::Ate { enemy_level, .. } => {
            debug!("Ate level {} enemy ({})", enemy_level, enemy.direction);
            Ok(false)
        }
        Encounter::Eaten { enemy_level } => {
            info!("Eaten by level {} enemy", enemy_level);
            Ok(true)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fishgrow_core::MemoryPreferences;

    fn short_round() -> Config {
        Config::builder()
            .game_duration_secs(10.0)
            .spawn_interval_secs(0.5)
            .build()
            .unwrap()
    }

    #[test]
    fn test_round_always_finishes() {
        for seed in 0..20 {
            let mut app: GameApp<MemoryPreferences, u8> =
                GameApp::new(short_round(), MemoryPreferences::new()).unwrap();
            let mut rng = StdRng::seed_from_u64(seed);
            app.start_game().unwrap();

            let summary = play_round(&mut app, &mut rng, 30).unwrap();
            assert!(summary.state.is_round_over(), "seed {}", seed);
            // 10 seconds at 30 fps plus the frame that declares the win
            assert!(summary.frames <= 305, "seed {}", seed);

            match summary.state {
                GameState::Win => {
                    assert_eq!(app.ranking().get_all_scores()[0].score, summary.score);
                    assert_eq!(app.session().final_snapshot(), Some(&summary.level));
                }
                _ => assert!(app.ranking().is_empty()),
            }
        }
    }

    #[test]
    fn test_zero_fps_rejected() {
        let err = run(short_round(), MemoryPreferences::new(), "Ann", Some(1), 0).unwrap_err();
        assert!(err.to_string().contains("fps"));
    }
}
