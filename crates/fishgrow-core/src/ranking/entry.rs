use std::cmp::Ordering;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One player's best score
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreEntry {
    pub score: u32,
    pub name: String,
    /// When the score was recorded (Unix seconds)
    #[serde(rename = "unixTime")]
    pub unix_time: i64,
}

impl ScoreEntry {
    pub fn new(score: u32, name: String, unix_time: i64) -> Self {
        Self {
            score,
            name,
            unix_time,
        }
    }

    pub fn recorded_at(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.unix_time, 0)
    }

    /// Leaderboard order: higher score first, older entry first on ties
    pub fn rank_cmp(&self, other: &Self) -> Ordering {
        other
            .score
            .cmp(&self.score)
            .then(self.unix_time.cmp(&other.unix_time))
    }
}

/// Persisted leaderboard document
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreData {
    #[serde(default)]
    pub entries: Vec<ScoreEntry>,
}

/// Entry as it may appear in a persisted document that predates or bypasses
/// sanitization; negative scores are tolerated on read.
#[derive(Debug, Deserialize)]
pub(crate) struct RawScoreEntry {
    #[serde(default)]
    pub score: i64,
    #[serde(default)]
    pub name: String,
    #[serde(default, rename = "unixTime")]
    pub unix_time: i64,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct RawScoreData {
    #[serde(default)]
    pub entries: Vec<RawScoreEntry>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_field_names() {
        let data = ScoreData {
            entries: vec![ScoreEntry::new(120, "Ann".to_string(), 1_700_000_000)],
        };
        let json = serde_json::to_string(&data).unwrap();
        assert_eq!(
            json,
            r#"{"entries":[{"score":120,"name":"Ann","unixTime":1700000000}]}"#
        );
    }

    #[test]
    fn test_rank_cmp() {
        let high = ScoreEntry::new(200, "a".into(), 50);
        let low = ScoreEntry::new(100, "b".into(), 10);
        let tie_old = ScoreEntry::new(200, "c".into(), 10);

        assert_eq!(high.rank_cmp(&low), Ordering::Less);
        assert_eq!(tie_old.rank_cmp(&high), Ordering::Less);
        assert_eq!(high.rank_cmp(&high.clone()), Ordering::Equal);
    }

    #[test]
    fn test_recorded_at() {
        let entry = ScoreEntry::new(1, "x".into(), 0);
        assert_eq!(entry.recorded_at().unwrap().timestamp(), 0);
    }
}
