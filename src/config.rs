//! Configuration system using TOML files.
//!
//! Config is stored in the OS-standard config directory:
//! - Windows: %APPDATA%\skiptrace\config.toml
//! - macOS: ~/Library/Application Support/skiptrace/config.toml
//! - Linux: ~/.config/skiptrace/config.toml
//!
//! Every field has a default, so a partial file (or none at all) is fine.
//! Command-line flags override whatever the file says.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::enrichment::{EmailPreference, EnrichmentConfig, NameCase, PhonePolicy};

/// Application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Lookup source settings
    pub lookup: LookupConfig,

    /// Candidate matching and contact selection
    pub matching: MatchingConfig,
}

/// Lookup source settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LookupConfig {
    /// People-search service base URL
    pub base_url: Option<String>,

    /// API key for the people-search service
    pub api_key: Option<String>,

    /// Per-request timeout in seconds
    pub timeout_secs: u64,

    /// Pause between leads in milliseconds (0 = none)
    pub record_delay_ms: u64,
}

impl Default for LookupConfig {
    fn default() -> Self {
        Self {
            base_url: None,
            api_key: None,
            timeout_secs: 30,
            record_delay_ms: 0,
        }
    }
}

/// Matching settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchingConfig {
    /// Fold case when comparing names
    pub case_insensitive_names: bool,

    /// 1-based position of the lead's own number in a listing's phone list
    pub phone_position: usize,

    /// Email domains in order of preference
    pub email_domains: Vec<String>,
}

impl Default for MatchingConfig {
    fn default() -> Self {
        Self {
            case_insensitive_names: false,
            phone_position: PhonePolicy::DEFAULT_POSITION,
            email_domains: EmailPreference::default().domains().to_vec(),
        }
    }
}

impl Config {
    /// Validate and turn into service settings.
    pub fn enrichment_config(&self) -> Result<EnrichmentConfig, ConfigError> {
        if self.lookup.timeout_secs == 0 {
            return Err(ConfigError::Invalid(
                "lookup.timeout_secs must be at least 1".to_string(),
            ));
        }
        let phone_policy = PhonePolicy::at_position(self.matching.phone_position).ok_or_else(|| {
            ConfigError::Invalid("matching.phone_position is 1-based and must be at least 1".to_string())
        })?;

        Ok(EnrichmentConfig {
            call_timeout: Duration::from_secs(self.lookup.timeout_secs),
            record_delay: Duration::from_millis(self.lookup.record_delay_ms),
            name_case: if self.matching.case_insensitive_names {
                NameCase::Insensitive
            } else {
                NameCase::Exact
            },
            phone_policy,
            email_preference: EmailPreference::new(self.matching.email_domains.iter().cloned()),
        })
    }
}

// ============================================================================
// Config File Operations
// ============================================================================

/// Get the config directory path
pub fn config_dir() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("skiptrace"))
}

/// Get the full path to the config file
pub fn config_path() -> Option<PathBuf> {
    config_dir().map(|d| d.join("config.toml"))
}

/// Load configuration from the default location
///
/// Returns default config if file doesn't exist or can't be parsed.
/// Logs warnings but doesn't fail - we always return a usable config.
pub fn load() -> Config {
    let Some(path) = config_path() else {
        tracing::warn!("Could not determine config directory, using defaults");
        return Config::default();
    };

    if !path.exists() {
        tracing::debug!("No config file found at {:?}, using defaults", path);
        return Config::default();
    }

    match load_from(&path) {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("{}", e);
            tracing::warn!("Using default configuration");
            Config::default()
        }
    }
}

/// Load configuration from an explicit path. Errors are not swallowed.
pub fn load_from(path: &Path) -> Result<Config, ConfigError> {
    let contents =
        std::fs::read_to_string(path).map_err(|e| ConfigError::Read(path.to_path_buf(), e))?;
    let config = toml::from_str(&contents).map_err(|e| ConfigError::Parse(path.to_path_buf(), e))?;
    tracing::info!("Loaded config from {:?}", path);
    Ok(config)
}

/// Save configuration to the default location
pub fn save(config: &Config) -> Result<PathBuf, ConfigError> {
    let path = config_path().ok_or(ConfigError::NoConfigDir)?;
    save_to(config, &path)?;
    Ok(path)
}

/// Save configuration to `path`
///
/// Creates the parent directory if it doesn't exist.
pub fn save_to(config: &Config, path: &Path) -> Result<(), ConfigError> {
    if let Some(dir) = path.parent() {
        std::fs::create_dir_all(dir).map_err(|e| ConfigError::CreateDir(dir.to_path_buf(), e))?;
    }

    // Serialize to pretty TOML
    let contents = toml::to_string_pretty(config).map_err(ConfigError::Serialize)?;

    // Write atomically (write to temp, then rename)
    let temp_path = path.with_extension("toml.tmp");
    std::fs::write(&temp_path, &contents).map_err(|e| ConfigError::Write(temp_path.clone(), e))?;
    std::fs::rename(&temp_path, path)
        .map_err(|e| ConfigError::Rename(temp_path, path.to_path_buf(), e))?;

    tracing::info!("Saved config to {:?}", path);
    Ok(())
}

// ============================================================================
// Error Types
// ============================================================================

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Could not determine config directory")]
    NoConfigDir,

    #[error("Failed to read config {0}: {1}")]
    Read(PathBuf, std::io::Error),

    #[error("Failed to parse config {0}: {1}")]
    Parse(PathBuf, toml::de::Error),

    #[error("Failed to create config directory {0}: {1}")]
    CreateDir(PathBuf, std::io::Error),

    #[error("Failed to serialize config: {0}")]
    Serialize(toml::ser::Error),

    #[error("Failed to write config to {0}: {1}")]
    Write(PathBuf, std::io::Error),

    #[error("Failed to rename temp file {0} to {1}: {2}")]
    Rename(PathBuf, PathBuf, std::io::Error),

    #[error("Invalid setting: {0}")]
    Invalid(String),
}

// ============================================================================
// Tests
// ============================================================================
