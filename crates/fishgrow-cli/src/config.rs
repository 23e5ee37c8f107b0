//! Config file loading for the CLI.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use fishgrow_core::Config;
use tracing::{debug, info, warn};

/// Parse and validate a TOML config document
pub fn parse_config(content: &str) -> Result<Config> {
    let config: Config = toml::from_str(content).context("Failed to parse config")?;
    Ok(config.validate()?)
}

/// Load the config at `path`, falling back to defaults if it is missing or
/// invalid.
pub fn load_config(path: &Path) -> Config {
    let content = match fs::read_to_string(path) {
        Ok(c) => c,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            debug!("No config at {:?}, using defaults", path);
            return Config::default();
        }
        Err(e) => {
            warn!("Failed to read config {:?}: {}, using defaults", path, e);
            return Config::default();
        }
    };

    match parse_config(&content) {
        Ok(config) => {
            info!("Loaded config from {:?}", path);
            config
        }
        Err(e) => {
            warn!("Invalid config {:?}: {:#}, using defaults", path, e);
            Config::default()
        }
    }
}

/// Default leaderboard location: `<data dir>/fishgrow/prefs.json`
pub fn default_prefs_path() -> PathBuf {
    dirs::data_dir()
        .map(|dir| dir.join("fishgrow").join("prefs.json"))
        .unwrap_or_else(|| PathBuf::from("fishgrow-prefs.json"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_partial_config() {
        let config = parse_config(
            r#"
            [session]
            game_duration_secs = 45.0
            food_to_level2 = 3

            [ranking]
            max_entries = 10
            "#,
        )
        .unwrap();
        assert_eq!(config.session.game_duration_secs, 45.0);
        assert_eq!(config.session.food_to_level2, 3);
        assert_eq!(config.session.food_to_level3, 12);
        assert_eq!(config.ranking.max_entries, 10);
        assert_eq!(config.ranking.prefs_key, "RANKING_DATA");
    }

    #[test]
    fn test_parse_variants() {
        let config = parse_config(
            r#"
            [spawner]
            interval_secs = 0.5

            [[spawner.variants]]
            weight = 3.0
            speed_min = 100.0
            speed_max = 150.0
            level = 1
            "#,
        )
        .unwrap();
        assert_eq!(config.spawner.interval_secs, 0.5);
        assert_eq!(config.spawner.variants.len(), 1);
        assert_eq!(config.spawner.variants[0].weight, 3.0);
    }

    #[test]
    fn test_parse_rejects_bad_duration() {
        assert!(parse_config("[session]\ngame_duration_secs = -1.0\n").is_err());
    }

    #[test]
    fn test_load_invalid_file_falls_back() {
        let temp_file = NamedTempFile::new().unwrap();
        fs::write(temp_file.path(), "this is = = not toml").unwrap();
        assert_eq!(load_config(temp_file.path()), Config::default());
    }

    #[test]
    fn test_load_missing_file_falls_back() {
        let config = load_config(Path::new("/definitely/not/here/fishgrow.toml"));
        assert_eq!(config, Config::default());
    }
}
