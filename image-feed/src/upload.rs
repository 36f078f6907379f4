//! Uploading new images into the feed
//!
//! Files go out in a single multipart request through
//! [`ImageService::upload`](crate::service::ImageService::upload). Records
//! returned by the service are merged like any appended page, so an image
//! that later shows up in a fetched page is not listed twice.

use crate::error::FeedResult;
use crate::models::{ImageRecord, UploadFile};
use crate::state::{AlertKind, Effect, FeedState};

impl FeedState {
    /// Starts an upload. An empty selection is rejected before any request,
    /// and only one upload runs at a time.
    pub fn upload(&mut self, files: Vec<UploadFile>) -> Option<Effect> {
        if files.is_empty() {
            self.raise(AlertKind::Validation, "Please select an image to upload.");
            return None;
        }
        if self.uploading {
            log::debug!("Upload already running, ignoring new selection");
            return None;
        }

        log::info!("Uploading {} image(s)", files.len());
        self.uploading = true;
        Some(Effect::Upload {
            files,
            generation: self.generation,
        })
    }

    pub(crate) fn uploaded(&mut self, generation: u64, result: FeedResult<Vec<ImageRecord>>) {
        if generation != self.generation {
            return;
        }
        self.uploading = false;

        match result {
            Ok(records) => {
                let added = self.merge(records);
                log::info!("Upload finished, {} new image(s) in the feed", added);
            }
            Err(e) => {
                self.raise(
                    AlertKind::Upload,
                    format!("Upload error: {}", e.user_message()),
                );
            }
        }
    }
}
