//! Saving images to local disk
//!
//! Downloads go straight to the image URL and never through the Image
//! Service. Existing files are never overwritten; a numbered name is picked
//! instead.

use crate::config::DownloadConfig;
use crate::error::{FeedError, FeedResult};
use crate::models::ImageId;
use crate::state::{AlertKind, Effect, FeedState};
use reqwest::Url;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Fetches image bytes and stores them in the download directory
#[derive(Debug, Clone)]
pub struct ImageDownloader {
    config: DownloadConfig,
    client: reqwest::Client,
}

impl ImageDownloader {
    pub fn new(config: DownloadConfig) -> FeedResult<Self> {
        let client = reqwest::Client::builder()
            .connect_timeout(std::time::Duration::from_secs(10))
            .build()
            .map_err(|e| FeedError::NetworkError(format!("Client build failed: {}", e)))?;
        Ok(Self { config, client })
    }

    pub fn target_dir(&self) -> &Path {
        &self.config.target_dir
    }

    /// Downloads `url` and returns the path it was saved to
    pub async fn download(&self, url: &str) -> FeedResult<PathBuf> {
        log::info!("Downloading {}", url);
        let response = self.client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(FeedError::HttpStatus {
                status: status.as_u16(),
                body: String::new(),
            });
        }
        let bytes = response.bytes().await?;

        let name = file_name_from_url(url, &self.config.fallback_name);
        let dir = self.config.target_dir.clone();
        let path = tokio::task::spawn_blocking(move || save_unique(&dir, &name, &bytes))
            .await
            .map_err(|e| FeedError::IoError(std::io::Error::other(e)))??;

        log::info!("Saved {} to {}", url, path.display());
        Ok(path)
    }
}

/// Last path segment of `url`, or `fallback` when there is none
pub fn file_name_from_url(url: &str, fallback: &str) -> String {
    let name = Url::parse(url).ok().and_then(|u| {
        u.path_segments()
            .and_then(|mut segments| segments.next_back().map(str::to_string))
    });

    match name {
        Some(name) if !name.is_empty() => name
            .chars()
            .map(|c| match c {
                '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' | '%' => '_',
                c => c,
            })
            .collect(),
        _ => fallback.to_string(),
    }
}

/// Writes `bytes` to `dir/name`, or `dir/stem (n).ext` if that is taken
pub fn save_unique(dir: &Path, name: &str, bytes: &[u8]) -> FeedResult<PathBuf> {
    std::fs::create_dir_all(dir)?;

    let (stem, ext) = match name.rsplit_once('.') {
        Some((stem, ext)) if !stem.is_empty() => (stem, Some(ext)),
        _ => (name, None),
    };

    let mut attempt = 0u32;
    loop {
        let candidate = match (attempt, ext) {
            (0, _) => name.to_string(),
            (n, Some(ext)) => format!("{} ({}).{}", stem, n, ext),
            (n, None) => format!("{} ({})", stem, n),
        };
        let path = dir.join(candidate);

        match OpenOptions::new().write(true).create_new(true).open(&path) {
            Ok(mut file) => {
                file.write_all(bytes)?;
                return Ok(path);
            }
            Err(e) if e.kind() == std::io::ErrorKind::AlreadyExists => attempt += 1,
            Err(e) => return Err(e.into()),
        }
    }
}

impl FeedState {
    /// Saves the image `id` locally
    pub fn download(&mut self, id: &ImageId) -> Option<Effect> {
        let Some(record) = self.image(id) else {
            log::warn!("Download for unknown image {}", id);
            return None;
        };
        Some(Effect::Download {
            id: id.clone(),
            url: record.url.clone(),
            generation: self.generation,
        })
    }

    pub(crate) fn downloaded(&mut self, id: &ImageId, generation: u64, result: FeedResult<PathBuf>) {
        if generation != self.generation {
            return;
        }
        if let Err(e) = result {
            log::warn!("Download of {} failed: {}", id, e);
            self.raise(
                AlertKind::Download,
                format!("Download failed: {}", e.user_message()),
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ImageRecord;

    #[test]
    fn test_file_name_from_url() {
        assert_eq!(
            file_name_from_url("https://cdn.example.com/u/abc/photo.png?x=1", "image.jpg"),
            "photo.png"
        );
        assert_eq!(file_name_from_url("https://cdn.example.com/", "image.jpg"), "image.jpg");
        assert_eq!(file_name_from_url("not a url", "image.jpg"), "image.jpg");
    }

    #[test]
    fn test_save_unique_never_overwrites() {
        let dir = tempfile::tempdir().unwrap();

        let first = save_unique(dir.path(), "cat.jpg", b"one").unwrap();
        let second = save_unique(dir.path(), "cat.jpg", b"two").unwrap();
        let third = save_unique(dir.path(), "cat.jpg", b"three").unwrap();

        assert_eq!(first, dir.path().join("cat.jpg"));
        assert_eq!(second, dir.path().join("cat (1).jpg"));
        assert_eq!(third, dir.path().join("cat (2).jpg"));
        assert_eq!(std::fs::read(&first).unwrap(), b"one");
        assert_eq!(std::fs::read(&third).unwrap(), b"three");
    }

    #[test]
    fn test_save_unique_creates_directory() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("a").join("b");
        let path = save_unique(&nested, "noext", b"x").unwrap();
        assert_eq!(path, nested.join("noext"));
    }

    #[test]
    fn test_download_failure_raises_alert() {
        let mut state = FeedState::default();
        state.merge(vec![ImageRecord::new("a", "https://cdn/a.jpg")]);
        let id = ImageId::new("a");

        let Some(Effect::Download { url, generation, .. }) = state.download(&id) else {
            panic!("expected download");
        };
        assert_eq!(url, "https://cdn/a.jpg");

        state.downloaded(&id, generation, Err(FeedError::NetworkError("offline".into())));
        assert_eq!(state.alert().unwrap().kind, AlertKind::Download);
    }
}
