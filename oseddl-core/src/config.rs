//! User configuration.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_ENDPOINT, DEFAULT_MIN_SIMILARITY, DEFAULT_TIMEOUT_SECS};
use crate::error::{DeadlineError, DeadlineResult};

const APP_DIR: &str = "oseddl";

fn default_endpoint() -> String {
    DEFAULT_ENDPOINT.to_string()
}

fn default_min_similarity() -> f64 {
    DEFAULT_MIN_SIMILARITY
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

/// Configuration at ~/.config/oseddl/config.toml
///
/// Every field is optional in the file; a missing file means all defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    /// Fuzzy search strictness in `[0, 1]`. Higher is stricter.
    #[serde(default = "default_min_similarity")]
    pub search_min_similarity: f64,

    /// Where persisted entries (favorites) live. Defaults to the platform data dir.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_dir: Option<PathBuf>,

    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            endpoint: default_endpoint(),
            search_min_similarity: default_min_similarity(),
            data_dir: None,
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl Config {
    pub fn config_path() -> DeadlineResult<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| DeadlineError::Config("Could not determine config directory".into()))?
            .join(APP_DIR);

        Ok(config_dir.join("config.toml"))
    }

    /// Load from the default location, falling back to defaults when absent.
    pub fn load() -> DeadlineResult<Self> {
        Self::load_from(&Self::config_path()?)
    }

    pub fn load_from(path: &Path) -> DeadlineResult<Self> {
        if !path.exists() {
            return Ok(Config::default());
        }

        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content).map_err(|e| DeadlineError::Config(e.to_string()))?;

        if !(0.0..=1.0).contains(&config.search_min_similarity) {
            return Err(DeadlineError::Config(format!(
                "search_min_similarity must be between 0 and 1, got {}",
                config.search_min_similarity
            )));
        }

        Ok(config)
    }

    /// Resolved directory for persisted entries.
    pub fn data_dir(&self) -> DeadlineResult<PathBuf> {
        if let Some(dir) = &self.data_dir {
            return Ok(dir.clone());
        }

        dirs::data_dir()
            .map(|d| d.join(APP_DIR))
            .ok_or_else(|| DeadlineError::Config("Could not determine data directory".into()))
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Create a default config file with all options commented out.
    pub fn create_default_config(path: &Path) -> DeadlineResult<()> {
        let contents = format!(
            "\
# oseddl configuration

# Catalogue endpoint (JSON array of deadline items):
# endpoint = \"{}\"

# Fuzzy search strictness between 0 and 1 (higher = fewer, closer matches):
# search_min_similarity = {}

# Where favorites are stored:
# data_dir = \"~/.local/share/oseddl\"

# HTTP timeout in seconds:
# timeout_secs = {}
",
            DEFAULT_ENDPOINT, DEFAULT_MIN_SIMILARITY, DEFAULT_TIMEOUT_SECS
        );

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                DeadlineError::Config(format!("Could not create config directory: {e}"))
            })?;
        }

        std::fs::write(path, contents)
            .map_err(|e| DeadlineError::Config(format!("Could not write config file: {e}")))?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_yields_defaults() {
        let tmp = tempfile::tempdir().unwrap();
        let config = Config::load_from(&tmp.path().join("config.toml")).unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.endpoint, DEFAULT_ENDPOINT);
    }

    #[test]
    fn default_template_parses_to_defaults() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("sub/config.toml");
        Config::create_default_config(&path).unwrap();
        assert_eq!(Config::load_from(&path).unwrap(), Config::default());
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("config.toml");
        std::fs::write(&path, "search_min_similarity = 0.9\ndata_dir = \"/tmp/oseddl\"\n").unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.search_min_similarity, 0.9);
        assert_eq!(config.data_dir().unwrap(), PathBuf::from("/tmp/oseddl"));
        assert_eq!(config.timeout(), Duration::from_secs(DEFAULT_TIMEOUT_SECS));
    }

    #[test]
    fn out_of_range_similarity_is_rejected() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("config.toml");
        std::fs::write(&path, "search_min_similarity = 1.5\n").unwrap();
        assert!(matches!(Config::load_from(&path), Err(DeadlineError::Config(_))));
    }
}
