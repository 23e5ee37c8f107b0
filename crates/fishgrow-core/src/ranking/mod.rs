//! Persistent leaderboard.
//!
//! - **Entries**: one best score per sanitized player name
//! - **Sanitization**: single-line, length-limited display names
//! - **Preferences**: key-value backing store the JSON document lives in
//!
//! ## Stored format
//!
//! ```json
//! { "entries": [ { "score": 500, "name": "Ann", "unixTime": 1700000000 } ] }
//! ```

mod entry;
mod prefs;
mod sanitize;
mod store;

pub use entry::{ScoreData, ScoreEntry};
pub use prefs::*;
pub use sanitize::*;
pub use store::*;
