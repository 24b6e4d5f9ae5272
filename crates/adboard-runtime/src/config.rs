use adboard_types::DateRange;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use url::Url;

use crate::{Error, Result};

pub const DEFAULT_BASE_URL: &str = "http://go-dev.greedygame.com/v3/dummy";
pub const BASE_URL_ENV: &str = "ADBOARD_BASE_URL";
pub const PATH_ENV: &str = "ADBOARD_PATH";
pub const CONFIG_FILE: &str = "config.toml";

/// Resolve the data directory path based on priority:
/// 1. Explicit path (with tilde expansion)
/// 2. ADBOARD_PATH environment variable (with tilde expansion)
/// 3. XDG data directory
/// 4. ~/.adboard (fallback for systems without XDG)
pub fn resolve_workspace_path(explicit_path: Option<&str>) -> Result<PathBuf> {
    if let Some(path) = explicit_path {
        return Ok(expand_tilde(path));
    }

    if let Ok(env_path) = std::env::var(PATH_ENV) {
        return Ok(expand_tilde(&env_path));
    }

    if let Some(data_dir) = dirs::data_dir() {
        return Ok(data_dir.join("adboard"));
    }

    if let Some(home) = std::env::var_os("HOME") {
        return Ok(PathBuf::from(home).join(".adboard"));
    }

    Err(Error::Config(
        "Could not determine data path: no HOME directory or XDG data directory found"
            .to_string(),
    ))
}

/// Expand tilde (~) in paths to the user's home directory
pub fn expand_tilde(path: &str) -> PathBuf {
    if let Some(stripped) = path.strip_prefix("~/")
        && let Some(home) = std::env::var_os("HOME")
    {
        return PathBuf::from(home).join(stripped);
    }
    PathBuf::from(path)
}

/// What to do with a fetch result that belongs to an older `load` call
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StalePolicy {
    /// Ignore results of superseded calls
    #[default]
    Discard,
    /// Last completion wins per fetch family, whatever call it belongs to
    Apply,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    pub base_url: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    pub default_start: NaiveDate,
    pub default_end: NaiveDate,
    pub stale_results: StalePolicy,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            default_start: NaiveDate::from_ymd_opt(2021, 6, 1).unwrap_or_default(),
            default_end: NaiveDate::from_ymd_opt(2021, 6, 7).unwrap_or_default(),
            stale_results: StalePolicy::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub dashboard: DashboardConfig,
}

impl Config {
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn path_in(data_dir: &Path) -> PathBuf {
        data_dir.join(CONFIG_FILE)
    }

    /// Apply a base URL given on the command line or in `ADBOARD_BASE_URL`.
    /// The explicit value wins over the environment.
    pub fn with_base_url_override(mut self, explicit: Option<String>) -> Result<Self> {
        if let Some(base_url) = explicit.or_else(|| std::env::var(BASE_URL_ENV).ok()) {
            self.api.base_url = base_url;
        }
        self.validate()?;
        Ok(self)
    }

    pub fn base_url(&self) -> Result<Url> {
        Ok(Url::parse(&self.api.base_url)?)
    }

    pub fn default_range(&self) -> Result<DateRange> {
        Ok(DateRange::new(
            self.dashboard.default_start,
            self.dashboard.default_end,
        )?)
    }

    fn validate(&self) -> Result<()> {
        let url = self.base_url()?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(Error::Config(format!(
                "base URL must be http or https, got '{}'",
                url.scheme()
            )));
        }
        self.default_range()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert_eq!(config.api.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.dashboard.stale_results, StalePolicy::Discard);
        assert!(config.default_range().is_ok());
    }

    #[test]
    fn test_config_save_and_load() -> Result<()> {
        let temp_dir = TempDir::new()?;
        let config_path = Config::path_in(temp_dir.path());

        let mut config = Config::default();
        config.api.base_url = "https://reports.example.com/v3".to_string();
        config.dashboard.stale_results = StalePolicy::Apply;

        config.save_to(&config_path)?;
        assert!(config_path.exists());

        let loaded = Config::load_from(&config_path)?;
        assert_eq!(loaded, config);

        Ok(())
    }

    #[test]
    fn test_load_nonexistent_returns_default() -> Result<()> {
        let temp_dir = TempDir::new()?;
        let config_path = temp_dir.path().join("nonexistent.toml");

        let config = Config::load_from(&config_path)?;
        assert_eq!(config, Config::default());

        Ok(())
    }

    #[test]
    fn test_partial_file_fills_defaults() -> Result<()> {
        let temp_dir = TempDir::new()?;
        let config_path = Config::path_in(temp_dir.path());
        std::fs::write(&config_path, "[api]\nbase_url = \"http://localhost:8080\"\n")?;

        let config = Config::load_from(&config_path)?;
        assert_eq!(config.api.base_url, "http://localhost:8080");
        assert_eq!(config.dashboard, DashboardConfig::default());

        Ok(())
    }

    #[test]
    fn test_load_rejects_inverted_default_range() -> Result<()> {
        let temp_dir = TempDir::new()?;
        let config_path = Config::path_in(temp_dir.path());
        std::fs::write(
            &config_path,
            "[dashboard]\ndefault_start = \"2023-02-01\"\ndefault_end = \"2023-01-01\"\n",
        )?;

        let err = Config::load_from(&config_path).unwrap_err();
        assert!(err.to_string().contains("Invalid date range"));

        Ok(())
    }

    #[test]
    fn test_override_rejects_non_http_scheme() {
        let err = Config::default()
            .with_base_url_override(Some("ftp://reports.example.com".to_string()))
            .unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn test_expand_tilde_leaves_absolute_paths() {
        assert_eq!(expand_tilde("/tmp/adboard"), PathBuf::from("/tmp/adboard"));
    }
}
