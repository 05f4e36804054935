// Application configuration
//
// Loaded from an optional JSON file; every field has a default so an empty
// file (or none at all) gives a working setup.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::RewardsError;
use crate::ranking::DEFAULT_TOP_N;

pub const DEFAULT_CONFIG_FILE: &str = "card-rewards.json";
pub const DEFAULT_MATRIX_FILE: &str = "card_rewards_matrix.csv";
pub const DEFAULT_API_KEY_ENV: &str = "GOOGLE_PLACES_API_KEY";

/// Cards ranked when the config doesn't list any
pub const DEFAULT_CARDS: &[&str] = &[
    "Target REDcard",
    "Capital One Venture X Rewards Credit Card",
    "American Express® Gold Card",
    "Chase Sapphire Reserve®",
    "U.S. Bank Altitude® Go",
];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Rewards matrix CSV
    pub matrix_path: PathBuf,

    /// Cards the user holds; empty ranks every card in the matrix
    pub cards: Vec<String>,

    pub top_n: usize,

    /// Category rules JSON replacing the built-in tables
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rules_path: Option<PathBuf>,

    /// Environment variable holding the place lookup API key
    pub api_key_env: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub places_endpoint: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub nearby_endpoint: Option<String>,

    /// HTTP timeout for place lookup
    pub timeout_secs: u64,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            matrix_path: PathBuf::from(DEFAULT_MATRIX_FILE),
            cards: DEFAULT_CARDS.iter().map(|c| c.to_string()).collect(),
            top_n: DEFAULT_TOP_N,
            rules_path: None,
            api_key_env: DEFAULT_API_KEY_ENV.to_string(),
            places_endpoint: None,
            nearby_endpoint: None,
            timeout_secs: 10,
        }
    }
}

impl AppConfig {
    /// Load config; a missing file means defaults
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Ok(AppConfig::default());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    /// Explicit path must exist; otherwise fall back to ./card-rewards.json
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) if !path.exists() => Err(RewardsError::config(format!(
                "config file not found: {}",
                path.display()
            ))
            .into()),
            Some(path) => Self::load(path),
            None => Self::load(DEFAULT_CONFIG_FILE),
        }
    }

    /// Place lookup API key from the environment
    pub fn api_key(&self) -> Result<String, RewardsError> {
        std::env::var(&self.api_key_env)
            .ok()
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| RewardsError::missing_credential(&self.api_key_env))
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();

        assert_eq!(config.matrix_path, PathBuf::from("card_rewards_matrix.csv"));
        assert_eq!(config.cards.len(), 5);
        assert_eq!(config.cards[0], "Target REDcard");
        assert_eq!(config.top_n, 20);
        assert_eq!(config.timeout_secs, 10);
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempdir().unwrap();
        let config = AppConfig::load(dir.path().join("nope.json")).unwrap();

        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn test_partial_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, r#"{"cards": ["Amex Gold"], "top_n": 3}"#).unwrap();

        let config = AppConfig::load(&path).unwrap();
        assert_eq!(config.cards, vec!["Amex Gold"]);
        assert_eq!(config.top_n, 3);
        assert_eq!(config.api_key_env, "GOOGLE_PLACES_API_KEY");
    }

    #[test]
    fn test_invalid_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, "{not json").unwrap();

        let err = AppConfig::load(&path).unwrap_err();
        assert!(err.to_string().contains("Failed to parse config file"));
    }

    #[test]
    fn test_explicit_path_must_exist() {
        let dir = tempdir().unwrap();
        let missing = dir.path().join("missing.json");

        assert!(AppConfig::load_or_default(Some(&missing)).is_err());
    }

    #[test]
    fn test_api_key_missing() {
        let config = AppConfig {
            api_key_env: "CARD_REWARDS_TEST_UNSET_KEY".to_string(),
            ..AppConfig::default()
        };

        let err = config.api_key().unwrap_err();
        assert_eq!(err.to_string(), "Set CARD_REWARDS_TEST_UNSET_KEY first.");
    }
}
