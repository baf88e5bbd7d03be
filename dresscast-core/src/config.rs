use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use reqwest::Url;
use serde::{Deserialize, Serialize};
use std::{
    env, fs,
    path::{Path, PathBuf},
};

/// Base URL used when neither the environment nor the config file sets one.
pub const DEFAULT_API_URL: &str = "http://localhost:3002";

/// Environment variable that overrides the configured base URL.
pub const API_URL_ENV: &str = "WEATHER_API_URL";

/// Settings stored on disk.
///
/// Example TOML:
/// ```toml
/// api_url = "https://weather.example.com"
/// log_level = "info"
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct Config {
    /// Base URL of the weather backend.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_url: Option<String>,

    /// Default tracing filter when `RUST_LOG` is not set, e.g. "info".
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub log_level: Option<String>,
}

impl Config {
    /// Base URL to use: `WEATHER_API_URL`, then the config file, then the default.
    pub fn resolved_api_url(&self) -> String {
        self.api_url_with_override(env::var(API_URL_ENV).ok())
    }

    /// Same as [`Config::resolved_api_url`] with the environment value passed in.
    pub fn api_url_with_override(&self, env_value: Option<String>) -> String {
        env_value
            .filter(|v| !v.trim().is_empty())
            .or_else(|| self.api_url.clone())
            .unwrap_or_else(|| DEFAULT_API_URL.to_string())
    }

    /// Validate and store the backend base URL.
    pub fn set_api_url(&mut self, url: &str) -> Result<()> {
        let trimmed = url.trim();
        let parsed = Url::parse(trimmed)
            .with_context(|| format!("Invalid backend URL: '{trimmed}'"))?;

        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(anyhow!(
                "Unsupported URL scheme '{}'. Use http:// or https://.",
                parsed.scheme()
            ));
        }

        self.api_url = Some(trimmed.to_string());
        Ok(())
    }

    /// Load config from disk, or return an empty default if it doesn't exist yet.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_file_path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            // First run: no config file, return empty.
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let cfg: Config = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(cfg)
    }

    /// Save config to disk, creating parent directories as needed.
    pub fn save(&self) -> Result<PathBuf> {
        let path = Self::config_file_path()?;
        self.save_to(&path)?;
        Ok(path)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let toml =
            toml::to_string_pretty(self).context("Failed to serialize configuration to TOML")?;

        fs::write(path, toml)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("dev", "dresscast", "dresscast")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }
}
