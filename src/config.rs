use crate::error::AppError;
use image_feed::{DownloadConfig, FeedConfig, InputConfig, ServiceConfig};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Environment variable naming the config file
pub const CONFIG_PATH_ENV: &str = "CLOUD_GALLERY_CONFIG";
/// Environment variable overriding `service.base_url`
pub const API_URL_ENV: &str = "CLOUD_GALLERY_API_URL";
pub const DEFAULT_CONFIG_PATH: &str = "cloud-gallery.toml";

/// App settings, read from a TOML file with one table per concern
///
/// ```toml
/// [service]
/// base_url = "https://gallery.example.com/api"
///
/// [feed]
/// lookahead = 5
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub service: ServiceConfig,
    pub feed: FeedConfig,
    pub input: InputConfig,
    pub download: DownloadConfig,
    /// How long the like acknowledgment stays visible
    pub like_ack_ms: u64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            service: ServiceConfig::default(),
            feed: FeedConfig::default(),
            input: InputConfig::default(),
            download: DownloadConfig::default(),
            like_ack_ms: 800,
        }
    }
}

impl AppConfig {
    pub fn from_toml(s: &str) -> Result<Self, AppError> {
        Ok(toml::from_str(s)?)
    }

    /// Reads `path`; a missing file yields the defaults
    pub fn load(path: &Path) -> Result<Self, AppError> {
        match std::fs::read_to_string(path) {
            Ok(contents) => {
                log::info!("Loading config from {}", path.display());
                Self::from_toml(&contents)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                log::info!("No config at {}, using defaults", path.display());
                Ok(Self::default())
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Loads the file named by the environment and applies overrides
    pub fn from_env() -> Result<Self, AppError> {
        let path = std::env::var_os(CONFIG_PATH_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH));
        let mut config = Self::load(&path)?;
        config.apply_api_url(std::env::var(API_URL_ENV).ok());
        Ok(config)
    }

    fn apply_api_url(&mut self, url: Option<String>) {
        if let Some(url) = url.filter(|u| !u.trim().is_empty()) {
            log::debug!("Base URL overridden from {}", API_URL_ENV);
            self.service.base_url = url.trim().to_string();
        }
    }
}
