use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "fishgrow")]
#[command(version, about = "Fish growth game: leaderboard maintenance and headless rounds")]
pub struct Args {
    /// TOML configuration file
    #[arg(short, long, default_value = "fishgrow.toml", env = "FISHGROW_CONFIG")]
    pub config: PathBuf,

    /// Preference file holding the leaderboard (defaults to the user data dir)
    #[arg(long, env = "FISHGROW_PREFS")]
    pub prefs: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Inspect or edit the leaderboard
    #[command(subcommand)]
    Ranking(RankingCommand),

    /// Auto-play one round and record the result
    Simulate {
        /// Seed for a reproducible round
        #[arg(long)]
        seed: Option<u64>,

        /// Simulated frames per second
        #[arg(long, default_value_t = 60)]
        fps: u32,

        /// Player name the score is recorded under
        #[arg(short, long, default_value = "Guest")]
        name: String,
    },
}

#[derive(Subcommand)]
pub enum RankingCommand {
    /// Print the leaderboard
    List {
        /// Only show the first N entries
        #[arg(short, long)]
        top: Option<usize>,
    },

    /// Record a score for a player
    Record {
        #[arg(short, long)]
        name: String,

        #[arg(short, long, allow_negative_numbers = true)]
        score: i64,
    },

    /// Remove every entry
    Clear,
}
