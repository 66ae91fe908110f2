//! Configuration loading and types for dictumdl
//!
//! Configuration is loaded in layers:
//! 1. Built-in defaults
//! 2. Config file (~/.config/dictumdl/config.toml)
//! 3. Environment variables (DICTUMDL_*)
//! 4. CLI arguments (highest priority)

use crate::error::DictumdlError;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Default configuration file content
pub const DEFAULT_CONFIG: &str = r#"# dictumdl Configuration
#
# Location: ~/.config/dictumdl/config.toml
# All settings can be overridden via CLI flags

[feed]
# Release-metadata API endpoint. Must serve a JSON array of release records.
endpoint = "https://releases.dictum.app/api/releases"

# Request timeout in seconds
timeout_secs = 10

# Optional API key for authenticated feeds.
# Can also be set via DICTUMDL_FEED_API_KEY.
# api_key = ""

[download]
# Explicit architecture preference for the smart-download pick, most
# preferred first. Applied before selection so the result never depends on
# incidental feed ordering. Architectures not listed sort last.
arch_preference = ["arm64", "x64"]

[routes]
# Directory of materialized use-case pages (file stems and directory names
# count as routes; entries starting with '.' or '_' are ignored)
pages_dir = "src/pages/use-cases"

# TOML file declaring use cases under a [use_cases] table
config_file = "use-cases.toml"
"#;

/// Root configuration structure
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub feed: FeedConfig,

    #[serde(default)]
    pub download: DownloadConfig,

    #[serde(default)]
    pub routes: RoutesConfig,
}

/// Release feed configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct FeedConfig {
    /// Release-metadata API endpoint
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Optional API key (also DICTUMDL_FEED_API_KEY)
    #[serde(default)]
    pub api_key: Option<String>,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            timeout_secs: default_timeout_secs(),
            api_key: None,
        }
    }
}

/// Smart-download selection configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DownloadConfig {
    /// Architecture preference order, most preferred first
    #[serde(default = "default_arch_preference")]
    pub arch_preference: Vec<String>,
}

impl Default for DownloadConfig {
    fn default() -> Self {
        Self {
            arch_preference: default_arch_preference(),
        }
    }
}

/// Route check configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RoutesConfig {
    /// Directory of materialized use-case pages
    #[serde(default = "default_pages_dir")]
    pub pages_dir: PathBuf,

    /// TOML file with the [use_cases] declaration table
    #[serde(default = "default_routes_config_file")]
    pub config_file: PathBuf,
}

impl Default for RoutesConfig {
    fn default() -> Self {
        Self {
            pages_dir: default_pages_dir(),
            config_file: default_routes_config_file(),
        }
    }
}

fn default_endpoint() -> String {
    "https://releases.dictum.app/api/releases".to_string()
}

fn default_timeout_secs() -> u64 {
    10
}

fn default_arch_preference() -> Vec<String> {
    vec!["arm64".to_string(), "x64".to_string()]
}

fn default_pages_dir() -> PathBuf {
    PathBuf::from("src/pages/use-cases")
}

fn default_routes_config_file() -> PathBuf {
    PathBuf::from("use-cases.toml")
}

impl Config {
    /// Get the default config file path
    pub fn default_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("", "", "dictumdl")
            .map(|dirs| dirs.config_dir().join("config.toml"))
    }
}

/// Load configuration from file, with defaults for missing values
pub fn load_config(path: Option<&Path>) -> Result<Config, DictumdlError> {
    // Start with defaults
    let mut config = Config::default();

    // Determine config file path
    let config_path = path.map(PathBuf::from).or_else(Config::default_path);

    // Load from file if it exists
    if let Some(ref path) = config_path {
        if path.exists() {
            tracing::debug!("Loading config from {:?}", path);
            let contents = std::fs::read_to_string(path)
                .map_err(|e| DictumdlError::Config(format!("Failed to read config: {}", e)))?;

            config = toml::from_str(&contents)
                .map_err(|e| DictumdlError::Config(format!("Invalid config: {}", e)))?;
        } else {
            tracing::debug!("Config file not found at {:?}, using defaults", path);
        }
    }

    // Override from environment variables
    if let Ok(endpoint) = std::env::var("DICTUMDL_FEED_ENDPOINT") {
        config.feed.endpoint = endpoint;
    }
    if let Ok(pages_dir) = std::env::var("DICTUMDL_PAGES_DIR") {
        config.routes.pages_dir = PathBuf::from(pages_dir);
    }
    if let Ok(config_file) = std::env::var("DICTUMDL_USE_CASES") {
        config.routes.config_file = PathBuf::from(config_file);
    }

    Ok(config)
}
