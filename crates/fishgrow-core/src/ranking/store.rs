use std::cell::OnceCell;

use chrono::Utc;
use tracing::{debug, info, warn};

use crate::config::RankingConfig;
use crate::error::Result;
use crate::ranking::entry::RawScoreData;
use crate::ranking::{PreferenceStore, ScoreData, ScoreEntry, sanitize_name};

/// Best score per player, persisted as JSON under one preference key.
///
/// The list is loaded lazily on first access and cached for the lifetime of
/// the store. It is always sorted (score descending, older first on ties),
/// holds at most one entry per name and never exceeds `max_entries`.
///
/// Not synchronized; callers sharing a store across threads must wrap it in a
/// lock.
#[derive(Debug)]
pub struct RankingStore<P> {
    prefs: P,
    config: RankingConfig,
    player_name: String,
    cached: OnceCell<Vec<ScoreEntry>>,
}

impl<P: PreferenceStore> RankingStore<P> {
    pub fn new(prefs: P) -> Self {
        Self::with_config(prefs, RankingConfig::default())
    }

    pub fn with_config(prefs: P, config: RankingConfig) -> Self {
        let player_name = sanitize_name(&config.default_player_name);
        Self {
            prefs,
            config,
            player_name,
            cached: OnceCell::new(),
        }
    }

    pub fn config(&self) -> &RankingConfig {
        &self.config
    }

    pub fn prefs(&self) -> &P {
        &self.prefs
    }

    pub fn player_name(&self) -> &str {
        &self.player_name
    }

    /// Set the name used by [`record_win_score`](Self::record_win_score).
    pub fn set_player_name(&mut self, raw: &str) {
        self.player_name = sanitize_name(raw);
        debug!("Player name set to {:?}", self.player_name);
    }

    /// Record a won round under the current player name.
    pub fn record_win_score(&mut self, score: i64) -> Result<()> {
        let name = self.player_name.clone();
        self.record_score(score, &name)
    }

    /// Record `raw_score` for `raw_name` at the current time.
    pub fn record_score(&mut self, raw_score: i64, raw_name: &str) -> Result<()> {
        self.record_score_at(raw_score, raw_name, Utc::now().timestamp())
    }

    /// Record `raw_score` for `raw_name` as of `unix_time`.
    ///
    /// Negative scores are stored as zero and the name is sanitized. An
    /// existing entry is only replaced by a strictly higher score. The list
    /// is re-sorted, capped and persisted; a failed save is reported but the
    /// in-memory list keeps the new state.
    pub fn record_score_at(
        &mut self,
        raw_score: i64,
        raw_name: &str,
        unix_time: i64,
    ) -> Result<()> {
        let score = clamp_score(raw_score);
        let name = sanitize_name(raw_name);

        let mut entries = self.take_entries();
        match entries.iter().position(|e| e.name == name) {
            Some(i) if score > entries[i].score => {
                debug!("Updated score for {} -> {}", name, score);
                entries[i].score = score;
                entries[i].unix_time = unix_time;
            }
            Some(i) => {
                debug!(
                    "Kept existing higher/equal score for {} ({} >= {})",
                    name, entries[i].score, score
                );
            }
            None => {
                debug!("Added score={} name={}", score, name);
                entries.push(ScoreEntry::new(score, name, unix_time));
            }
        }

        sort_and_cap(&mut entries, self.config.max_entries);
        self.cached = OnceCell::from(entries);
        self.persist()
    }

    /// Highest `n` entries in leaderboard order
    pub fn get_top_scores(&self, n: usize) -> &[ScoreEntry] {
        let entries = self.entries();
        &entries[..n.min(entries.len())]
    }

    pub fn get_all_scores(&self) -> &[ScoreEntry] {
        self.entries()
    }

    /// 1-based leaderboard position of `raw_name`
    pub fn rank_of(&self, raw_name: &str) -> Option<usize> {
        let name = sanitize_name(raw_name);
        self.entries()
            .iter()
            .position(|e| e.name == name)
            .map(|i| i + 1)
    }

    pub fn len(&self) -> usize {
        self.entries().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries().is_empty()
    }

    /// Drop every entry and persist the empty list.
    pub fn clear(&mut self) -> Result<()> {
        self.cached = OnceCell::from(Vec::new());
        info!("Cleared leaderboard");
        self.persist()
    }

    fn entries(&self) -> &[ScoreEntry] {
        self.cached.get_or_init(|| load_entries(&self.prefs, &self.config))
    }

    fn take_entries(&mut self) -> Vec<ScoreEntry> {
        match self.cached.take() {
            Some(entries) => entries,
            None => load_entries(&self.prefs, &self.config),
        }
    }

    fn persist(&mut self) -> Result<()> {
        let data = ScoreData {
            entries: self.entries().to_vec(),
        };
        let json = serde_json::to_string(&data)?;
        self.prefs.set_string(&self.config.prefs_key, json);

        if let Err(e) = self.prefs.save() {
            warn!("Failed to save leaderboard: {}", e);
            return Err(e);
        }
        debug!("Saved entries={}", data.entries.len());
        Ok(())
    }
}

fn clamp_score(raw: i64) -> u32 {
    raw.clamp(0, u32::MAX as i64) as u32
}

fn sort_and_cap(entries: &mut Vec<ScoreEntry>, max_entries: usize) {
    entries.sort_by(ScoreEntry::rank_cmp);
    if max_entries > 0 && entries.len() > max_entries {
        entries.truncate(max_entries);
        debug!("Trimmed to {}", max_entries);
    }
}

/// Read and normalize the persisted list. Never fails: missing or malformed
/// data yields an empty leaderboard.
fn load_entries<P: PreferenceStore>(prefs: &P, config: &RankingConfig) -> Vec<ScoreEntry> {
    let json = match prefs.get_string(&config.prefs_key) {
        Some(json) if !json.trim().is_empty() => json,
        _ => {
            debug!("No save found. Starting fresh.");
            return Vec::new();
        }
    };

    let raw = match serde_json::from_str::<RawScoreData>(&json) {
        Ok(raw) => raw,
        Err(e) => {
            warn!("Leaderboard load failed ({}). Resetting.", e);
            return Vec::new();
        }
    };

    let mut entries: Vec<ScoreEntry> = Vec::with_capacity(raw.entries.len());
    for r in raw.entries {
        let candidate = ScoreEntry::new(clamp_score(r.score), sanitize_name(&r.name), r.unix_time);
        match entries.iter().position(|e| e.name == candidate.name) {
            Some(i) => {
                if candidate.rank_cmp(&entries[i]).is_lt() {
                    entries[i] = candidate;
                }
            }
            None => entries.push(candidate),
        }
    }
    sort_and_cap(&mut entries, config.max_entries);

    info!("Loaded {} leaderboard entries", entries.len());
    entries
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::ranking::{FilePreferences, MemoryPreferences};
    use tempfile::tempdir;

    fn store() -> RankingStore<MemoryPreferences> {
        RankingStore::new(MemoryPreferences::new())
    }

    fn store_with_max(max_entries: usize) -> RankingStore<MemoryPreferences> {
        let config = RankingConfig {
            max_entries,
            ..RankingConfig::default()
        };
        RankingStore::with_config(MemoryPreferences::new(), config)
    }

    fn names(entries: &[ScoreEntry]) -> Vec<&str> {
        entries.iter().map(|e| e.name.as_str()).collect()
    }

    #[test]
    fn test_lower_score_is_ignored() {
        let mut store = store();
        store.record_score_at(50, "Ann", 100).unwrap();
        store.record_score_at(30, "Ann", 200).unwrap();

        let all = store.get_all_scores();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].score, 50);
        assert_eq!(all[0].unix_time, 100);
    }

    #[test]
    fn test_equal_score_keeps_timestamp() {
        let mut store = store();
        store.record_score_at(50, "Ann", 100).unwrap();
        store.record_score_at(50, "Ann", 200).unwrap();
        assert_eq!(store.get_all_scores()[0].unix_time, 100);
    }

    #[test]
    fn test_higher_score_updates_timestamp() {
        let mut store = store();
        store.record_score_at(50, "Ann", 100).unwrap();
        store.record_score_at(80, "Ann", 200).unwrap();

        let all = store.get_all_scores();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].score, 80);
        assert_eq!(all[0].unix_time, 200);
    }

    #[test]
    fn test_names_match_after_sanitizing() {
        let mut store = store();
        store.record_score_at(10, "  Ann ", 1).unwrap();
        store.record_score_at(20, "Ann", 2).unwrap();
        store.record_score_at(5, "ann", 3).unwrap();

        assert_eq!(store.len(), 2);
        assert_eq!(store.rank_of("Ann"), Some(1));
        assert_eq!(store.rank_of("ann"), Some(2));
        assert_eq!(store.rank_of("Bob"), None);
    }

    #[test]
    fn test_negative_score_and_blank_name() {
        let mut store = store();
        store.record_score_at(-40, "   ", 1).unwrap();

        let all = store.get_all_scores();
        assert_eq!(all[0].score, 0);
        assert_eq!(all[0].name, "Guest");
    }

    #[test]
    fn test_sort_order_with_tie_break() {
        let mut store = store();
        store.record_score_at(100, "late", 30).unwrap();
        store.record_score_at(300, "top", 20).unwrap();
        store.record_score_at(100, "early", 10).unwrap();

        assert_eq!(names(store.get_all_scores()), vec!["top", "early", "late"]);
    }

    #[test]
    fn test_truncates_to_max_keeping_best() {
        let mut store = store_with_max(3);
        for (i, score) in [10, 50, 30, 40, 20].into_iter().enumerate() {
            store
                .record_score_at(score, &format!("p{}", i), i as i64)
                .unwrap();
        }

        let scores: Vec<u32> = store.get_all_scores().iter().map(|e| e.score).collect();
        assert_eq!(scores, vec![50, 40, 30]);
    }

    #[test]
    fn test_zero_max_keeps_everything() {
        let mut store = store_with_max(0);
        for i in 0..150 {
            store.record_score_at(i, &format!("p{}", i), 0).unwrap();
        }
        assert_eq!(store.len(), 150);
    }

    #[test]
    fn test_top_scores() {
        let mut store = store();
        for (i, score) in [10, 50, 30, 40, 20].into_iter().enumerate() {
            store
                .record_score_at(score, &format!("p{}", i), i as i64)
                .unwrap();
        }

        let top = store.get_top_scores(3);
        assert_eq!(names(top), vec!["p1", "p3", "p2"]);
        assert_eq!(store.get_top_scores(3), top);
        assert_eq!(store.get_top_scores(99).len(), 5);
        assert!(store.get_top_scores(0).is_empty());
    }

    #[test]
    fn test_persists_on_record() {
        let mut store = store();
        store.record_score_at(70, "Ann", 5).unwrap();

        assert_eq!(store.prefs().save_count(), 1);
        let json = store.prefs().get_string("RANKING_DATA").unwrap();
        assert_eq!(
            json,
            r#"{"entries":[{"score":70,"name":"Ann","unixTime":5}]}"#
        );
    }

    #[test]
    fn test_loads_persisted_data_lazily() {
        let mut prefs = MemoryPreferences::new();
        prefs.set_string(
            "RANKING_DATA",
            r#"{"entries":[{"score":5,"name":"Bob","unixTime":2},{"score":9,"name":"Ann","unixTime":1}]}"#
                .to_string(),
        );
        let store = RankingStore::new(prefs);

        assert_eq!(names(store.get_all_scores()), vec!["Ann", "Bob"]);
    }

    #[test]
    fn test_load_normalizes_hand_edited_data() {
        let mut prefs = MemoryPreferences::new();
        prefs.set_string(
            "RANKING_DATA",
            r#"{"entries":[
                {"score":-5,"name":"  Cat\n","unixTime":3},
                {"score":40,"name":"Ann","unixTime":9},
                {"score":60,"name":"Ann","unixTime":4},
                {"score":60,"name":"Ann ","unixTime":2}
            ]}"#
            .to_string(),
        );
        let store = RankingStore::new(prefs);

        let all = store.get_all_scores();
        assert_eq!(all.len(), 2);
        assert_eq!(all[0], ScoreEntry::new(60, "Ann".into(), 2));
        assert_eq!(all[1], ScoreEntry::new(0, "Cat".into(), 3));
    }

    #[test]
    fn test_corrupt_data_starts_empty() {
        let mut prefs = MemoryPreferences::new();
        prefs.set_string("RANKING_DATA", "{ definitely not json".to_string());
        let mut store = RankingStore::new(prefs);

        assert!(store.is_empty());
        store.record_score_at(10, "Ann", 1).unwrap();
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_player_name_and_win_score() {
        let mut store = store();
        assert_eq!(store.player_name(), "Guest");

        store.set_player_name("  Dory the fish  ");
        assert_eq!(store.player_name(), "Dory the f");

        store.record_win_score(1200).unwrap();
        assert_eq!(store.rank_of("Dory the f"), Some(1));
    }

    #[test]
    fn test_clear() {
        let mut store = store();
        store.record_score_at(10, "Ann", 1).unwrap();
        store.clear().unwrap();
        assert!(store.is_empty());
        assert_eq!(
            store.prefs().get_string("RANKING_DATA").as_deref(),
            Some(r#"{"entries":[]}"#)
        );
    }

    #[test]
    fn test_file_backed_round_trip() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("prefs.json");

        let mut store = RankingStore::new(FilePreferences::open(&path));
        store.record_score_at(300, "Ann", 10).unwrap();
        store.record_score_at(200, "Bob", 11).unwrap();

        let reloaded = RankingStore::new(FilePreferences::open(&path));
        assert_eq!(names(reloaded.get_all_scores()), vec!["Ann", "Bob"]);
    }

    struct FailingPreferences;

    impl PreferenceStore for FailingPreferences {
        fn get_string(&self, _key: &str) -> Option<String> {
            None
        }

        fn set_string(&mut self, _key: &str, _value: String) {}

        fn save(&mut self) -> Result<()> {
            Err(Error::Io(std::io::Error::new(
                std::io::ErrorKind::PermissionDenied,
                "read-only",
            )))
        }
    }

    #[test]
    fn test_failed_save_keeps_memory_state() {
        let mut store = RankingStore::new(FailingPreferences);
        let err = store.record_score_at(10, "Ann", 1).unwrap_err();
        assert!(matches!(err, Error::Io(_)));
        assert_eq!(store.len(), 1);
    }
}
