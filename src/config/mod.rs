//! Configuration loading and validation.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;
use url::Url;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("Invalid configuration: {0}")]
    ValidationError(String),
}

/// Which teams count as the tracked club.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClubConfig {
    /// Substrings identifying the club in a team name, matched case-insensitively
    #[serde(default = "default_name_variants")]
    pub name_variants: Vec<String>,

    /// Prefix of the club's team codes (`TTSH` in `TTSH3`)
    #[serde(default = "default_team_code_prefix")]
    pub team_code_prefix: String,
}

fn default_name_variants() -> Vec<String> {
    vec!["HERBLAIN".to_string(), "TTSH".to_string()]
}

fn default_team_code_prefix() -> String {
    "TTSH".to_string()
}

impl Default for ClubConfig {
    fn default() -> Self {
        Self {
            name_variants: default_name_variants(),
            team_code_prefix: default_team_code_prefix(),
        }
    }
}

/// Ranking thresholds.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RankingConfig {
    /// Minimum matches to appear in the all-journées leaderboard
    #[serde(default = "default_all_time_min_matches")]
    pub all_time_min_matches: f64,

    /// Minimum matches to appear in a single-journée ranking
    #[serde(default = "default_journee_min_matches")]
    pub journee_min_matches: f64,

    /// Size of the MVP podium
    #[serde(default = "default_top_n")]
    pub top_n: usize,
}

fn default_all_time_min_matches() -> f64 {
    3.0
}

fn default_journee_min_matches() -> f64 {
    1.0
}

fn default_top_n() -> usize {
    3
}

impl Default for RankingConfig {
    fn default() -> Self {
        Self {
            all_time_min_matches: default_all_time_min_matches(),
            journee_min_matches: default_journee_min_matches(),
            top_n: default_top_n(),
        }
    }
}

/// Server configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    #[serde(default = "default_cors_origin")]
    pub cors_origin: String,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_cors_origin() -> String {
    "*".to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            cors_origin: default_cors_origin(),
        }
    }
}

/// Main application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Local directory holding the documents
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,

    /// Remote location of the documents; takes precedence over `data_dir`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<Url>,

    /// Baseline document, relative to the source root
    #[serde(default = "default_baseline")]
    pub baseline: String,

    /// Journée identifiers to load; discovered under `data_dir` when empty
    #[serde(default)]
    pub journees: Vec<String>,

    #[serde(default = "default_log_level")]
    pub log_level: String,

    #[serde(default)]
    pub club: ClubConfig,

    #[serde(default)]
    pub ranking: RankingConfig,

    #[serde(default)]
    pub server: ServerConfig,
}

fn default_data_dir() -> PathBuf {
    PathBuf::from("./data")
}

fn default_baseline() -> String {
    "statistiques.json".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            base_url: None,
            baseline: default_baseline(),
            journees: Vec::new(),
            log_level: default_log_level(),
            club: ClubConfig::default(),
            ranking: RankingConfig::default(),
            server: ServerConfig::default(),
        }
    }
}

impl AppConfig {
    /// Load configuration from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        let config: AppConfig = toml::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Load `path` if it exists, defaults otherwise.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::from_file(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.server.port == 0 {
            return Err(ConfigError::ValidationError(
                "Server port must be greater than 0".to_string(),
            ));
        }

        if self.club.name_variants.iter().all(|v| v.trim().is_empty()) {
            return Err(ConfigError::ValidationError(
                "At least one club name variant is required".to_string(),
            ));
        }

        if self.baseline.trim().is_empty() {
            return Err(ConfigError::ValidationError(
                "Baseline document path must not be empty".to_string(),
            ));
        }

        let ranking = &self.ranking;
        if ranking.all_time_min_matches < 0.0 || ranking.journee_min_matches < 0.0 {
            return Err(ConfigError::ValidationError(
                "Minimum match thresholds must not be negative".to_string(),
            ));
        }

        if ranking.top_n == 0 {
            return Err(ConfigError::ValidationError(
                "MVP podium size must be greater than 0".to_string(),
            ));
        }

        Ok(())
    }
}
