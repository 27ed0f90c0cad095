//! Application configuration management.
//!
//! Configuration is stored at `~/.config/recipebox/config.json`. Every field
//! has a default, so a missing file or a partial one is fine.

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use url::Url;

use crate::loader::FetchMode;

/// Application name used for config/storage directory paths
const APP_NAME: &str = "recipebox";

/// Config file name
const CONFIG_FILE: &str = "config.json";

const DEFAULT_PAGE_URL: &str = "http://localhost:8080/";

const DEFAULT_OUTPUT: &str = "index.html";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Where the page is served from; decides storage origin and worker support
    pub page_url: String,
    /// Where the rendered page is written
    pub output: PathBuf,
    pub fetch_mode: FetchMode,
    /// No timeout unless set
    pub request_timeout_secs: Option<u64>,
    /// Overrides the platform cache directory
    pub storage_dir: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            page_url: DEFAULT_PAGE_URL.to_string(),
            output: PathBuf::from(DEFAULT_OUTPUT),
            fetch_mode: FetchMode::default(),
            request_timeout_secs: None,
            storage_dir: None,
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not find config directory"))?;
        Ok(config_dir.join(APP_NAME).join(CONFIG_FILE))
    }

    pub fn page_url(&self) -> Result<Url> {
        Url::parse(&self.page_url).with_context(|| format!("Invalid page_url: {}", self.page_url))
    }

    /// Base directory for origin-scoped storage
    pub fn storage_dir(&self) -> Result<PathBuf> {
        if let Some(ref dir) = self.storage_dir {
            return Ok(dir.clone());
        }
        let cache_dir =
            dirs::cache_dir().ok_or_else(|| anyhow::anyhow!("Could not find cache directory"))?;
        Ok(cache_dir.join(APP_NAME))
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs.map(Duration::from_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = TempDir::new().unwrap();
        let config = Config::load_from(&dir.path().join("config.json")).unwrap();

        assert_eq!(config.page_url, DEFAULT_PAGE_URL);
        assert_eq!(config.output, PathBuf::from(DEFAULT_OUTPUT));
        assert_eq!(config.fetch_mode, FetchMode::Sequential);
        assert_eq!(config.request_timeout(), None);
    }

    #[test]
    fn test_partial_file_keeps_other_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(
            &path,
            r#"{"fetch_mode": "concurrent", "request_timeout_secs": 15, "storage_dir": "/tmp/rb"}"#,
        )
        .unwrap();

        let config = Config::load_from(&path).unwrap();

        assert_eq!(config.fetch_mode, FetchMode::Concurrent);
        assert_eq!(config.request_timeout(), Some(Duration::from_secs(15)));
        assert_eq!(config.storage_dir().unwrap(), PathBuf::from("/tmp/rb"));
        assert_eq!(config.page_url, DEFAULT_PAGE_URL);
    }

    #[test]
    fn test_invalid_file_is_an_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, "{ nope").unwrap();
        assert!(Config::load_from(&path).is_err());
    }

    #[test]
    fn test_page_url() {
        let config = Config::default();
        assert_eq!(config.page_url().unwrap().host_str(), Some("localhost"));

        let config = Config {
            page_url: "not a url".to_string(),
            ..Config::default()
        };
        assert!(config.page_url().is_err());
    }
}
