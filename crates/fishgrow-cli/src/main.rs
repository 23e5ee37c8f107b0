mod cli;
mod commands;
mod config;

use anyhow::Result;
use clap::Parser;
use fishgrow_core::{FilePreferences, RankingStore};
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::cli::{Args, Command, RankingCommand};

fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging
    let level = if args.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env()
                .add_directive(format!("fishgrow={}", level).parse()?)
                .add_directive(format!("fishgrow_core={}", level).parse()?),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = config::load_config(&args.config);
    let prefs_path = args.prefs.unwrap_or_else(config::default_prefs_path);
    info!("Using preferences at {:?}", prefs_path);
    let prefs = FilePreferences::open(&prefs_path);

    match args.command {
        Command::Ranking(cmd) => {
            let mut store = RankingStore::with_config(prefs, config.ranking);
            match cmd {
                RankingCommand::List { top } => commands::ranking::list(&store, top),
                RankingCommand::Record { name, score } => {
                    commands::ranking::record(&mut store, &name, score)
                }
                RankingCommand::Clear => commands::ranking::clear(&mut store),
            }
        }
        Command::Simulate { seed, fps, name } => {
            commands::simulate::run(config, prefs, &name, seed, fps)
        }
    }
}
