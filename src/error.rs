use image_feed::FeedError;
use std::fmt;

/// Errors raised while starting the gallery app
#[derive(Debug)]
pub enum AppError {
    /// Config file could not be read
    Filesystem(std::io::Error),
    /// Config file is not valid TOML for [`crate::config::AppConfig`]
    Config(toml::de::Error),
    /// Setting up the Image Service client or downloader failed
    Feed(FeedError),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            AppError::Filesystem(e) => write!(f, "Filesystem error: {}", e),
            AppError::Config(e) => write!(f, "Config error: {}", e),
            AppError::Feed(e) => write!(f, "Feed error: {}", e),
        }
    }
}

impl std::error::Error for AppError {}

impl From<std::io::Error> for AppError {
    fn from(e: std::io::Error) -> Self {
        AppError::Filesystem(e)
    }
}

impl From<toml::de::Error> for AppError {
    fn from(e: toml::de::Error) -> Self {
        AppError::Config(e)
    }
}

impl From<FeedError> for AppError {
    fn from(e: FeedError) -> Self {
        AppError::Feed(e)
    }
}

impl AppError {
    pub fn user_message(&self) -> String {
        match self {
            AppError::Filesystem(_) => "Could not read the configuration file.".to_string(),
            AppError::Config(e) => format!("Invalid configuration: {}", e.message()),
            AppError::Feed(e) => e.user_message(),
        }
    }
}
