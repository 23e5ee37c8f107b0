//! Key-value preference storage backing the leaderboard.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use crate::error::Result;

/// String key-value store with an explicit commit step
pub trait PreferenceStore {
    fn get_string(&self, key: &str) -> Option<String>;

    fn set_string(&mut self, key: &str, value: String);

    /// Persist all pending writes
    fn save(&mut self) -> Result<()>;
}

/// In-memory store, never touches disk
#[derive(Debug, Clone, Default)]
pub struct MemoryPreferences {
    values: BTreeMap<String, String>,
    saves: usize,
}

impl MemoryPreferences {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of times `save` has been called
    pub fn save_count(&self) -> usize {
        self.saves
    }
}

impl PreferenceStore for MemoryPreferences {
    fn get_string(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set_string(&mut self, key: &str, value: String) {
        self.values.insert(key.to_string(), value);
    }

    fn save(&mut self) -> Result<()> {
        self.saves += 1;
        Ok(())
    }
}

/// Store persisted as one JSON object of string values
#[derive(Debug, Clone)]
pub struct FilePreferences {
    path: PathBuf,
    values: BTreeMap<String, String>,
}

impl FilePreferences {
    /// Open the store at `path`.
    ///
    /// A missing file is an empty store. An unreadable or corrupt file is
    /// logged and also treated as empty; it is overwritten on the next save.
    pub fn open<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref().to_path_buf();

        let values = match fs::read_to_string(&path) {
            Ok(content) => match serde_json::from_str::<BTreeMap<String, String>>(&content) {
                Ok(values) => {
                    debug!("Loaded {} preference keys from {}", values.len(), path.display());
                    values
                }
                Err(e) => {
                    warn!("Failed to parse preferences {}: {}", path.display(), e);
                    BTreeMap::new()
                }
            },
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!("No preferences at {}, starting fresh", path.display());
                BTreeMap::new()
            }
            Err(e) => {
                warn!("Failed to read preferences {}: {}", path.display(), e);
                BTreeMap::new()
            }
        };

        Self { path, values }
    }
}

impl PreferenceStore for FilePreferences {
    fn get_string(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set_string(&mut self, key: &str, value: String) {
        self.values.insert(key.to_string(), value);
    }

    fn save(&mut self) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(&self.values)?;
        fs::write(&self.path, content)?;
        info!("Saved preferences to {}", self.path.display());
        Ok(())
    }
}
