use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Number of unseen records ahead of the cursor at which the next page is prefetched
pub const DEFAULT_LOOKAHEAD: usize = 3;
/// Horizontal displacement a swipe must exceed
pub const DEFAULT_SWIPE_THRESHOLD: f64 = 50.0;
/// Two taps closer together than this count as a double-tap
pub const DEFAULT_DOUBLE_TAP_MS: u64 = 300;

/// Configuration for the feed state machine
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FeedConfig {
    pub lookahead: usize,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            lookahead: DEFAULT_LOOKAHEAD,
        }
    }
}

/// Thresholds for turning raw input into commands
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InputConfig {
    pub swipe_threshold: f64,
    pub double_tap_ms: u64,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            swipe_threshold: DEFAULT_SWIPE_THRESHOLD,
            double_tap_ms: DEFAULT_DOUBLE_TAP_MS,
        }
    }
}

/// Configuration for the HTTP Image Service client
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceConfig {
    /// Base URL, e.g. `https://gallery.example.com` or `https://host/api`
    pub base_url: String,
    /// Overall request timeout. `None` means requests may hang indefinitely.
    pub request_timeout_secs: Option<u64>,
    pub connect_timeout_secs: u64,
    pub user_agent: String,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:5000".to_string(),
            request_timeout_secs: None,
            connect_timeout_secs: 10,
            user_agent: concat!("ImageFeed/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

/// Configuration for saving images locally
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DownloadConfig {
    pub target_dir: PathBuf,
    /// Used when the URL has no usable file name
    pub fallback_name: String,
}

impl Default for DownloadConfig {
    fn default() -> Self {
        Self {
            target_dir: PathBuf::from("./downloads"),
            fallback_name: "image.jpg".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_config_keeps_defaults() {
        let cfg: InputConfig = serde_json::from_str(r#"{"swipe_threshold": 80.0}"#).unwrap();
        assert_eq!(cfg.swipe_threshold, 80.0);
        assert_eq!(cfg.double_tap_ms, DEFAULT_DOUBLE_TAP_MS);
    }
}
