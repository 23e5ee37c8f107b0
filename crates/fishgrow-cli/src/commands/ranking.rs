//! Leaderboard maintenance commands.

use anyhow::Result;
use fishgrow_core::{PreferenceStore, RankingStore, ScoreEntry};
use owo_colors::OwoColorize;

/// Print the leaderboard, optionally only the first `top` entries
pub fn list<P: PreferenceStore>(store: &RankingStore<P>, top: Option<usize>) -> Result<()> {
    let entries = match top {
        Some(n) => store.get_top_scores(n),
        None => store.get_all_scores(),
    };

    if entries.is_empty() {
        println!("Leaderboard is empty");
        return Ok(());
    }

    println!(
        "{:>4}  {:<10}  {:>8}  {}",
        "#".bold(),
        "Name".bold(),
        "Score".bold(),
        "Recorded".bold()
    );
    for (i, entry) in entries.iter().enumerate() {
        println!("{}", format_row(i + 1, entry));
    }
    Ok(())
}

fn format_row(rank: usize, entry: &ScoreEntry) -> String {
    let recorded = entry
        .recorded_at()
        .map(|t| t.format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_else(|| "-".to_string());
    format!(
        "{:>4}  {:<10}  {:>8}  {}",
        rank, entry.name, entry.score, recorded
    )
}

pub fn record<P: PreferenceStore>(
    store: &mut RankingStore<P>,
    name: &str,
    score: i64,
) -> Result<()> {
    store.record_score(score, name)?;
    let name = fishgrow_core::sanitize_name(name);
    match store.rank_of(&name) {
        Some(rank) => println!("{} is rank {} of {}", name.green(), rank, store.len()),
        None => println!("{} did not make the leaderboard", name.yellow()),
    }
    Ok(())
}

pub fn clear<P: PreferenceStore>(store: &mut RankingStore<P>) -> Result<()> {
    let removed = store.len();
    store.clear()?;
    println!("Removed {} entries", removed);
    Ok(())
}
