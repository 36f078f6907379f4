//! Feed state and the effects it asks the outside world to perform
//!
//! `FeedState` is a plain value owned by one controller. Every transition is
//! a method that mutates it and returns the [`Effect`]s to run; the results
//! come back as [`Outcome`]s. Nothing in here performs I/O.

use crate::config::FeedConfig;
use crate::error::FeedResult;
use crate::models::{FeedPage, FetchMode, ImageId, ImageRecord, UploadFile};
use std::path::PathBuf;

/// Identifies one page request. Only the ticket currently in flight is applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchTicket {
    pub seq: u64,
    pub page: u32,
    pub mode: FetchMode,
}

/// Work the state machine wants done
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    FetchPage(FetchTicket),
    ConfirmLike {
        id: ImageId,
        generation: u64,
        listing: u64,
    },
    SubmitComment {
        id: ImageId,
        text: String,
        generation: u64,
        listing: u64,
    },
    Upload {
        files: Vec<UploadFile>,
        generation: u64,
    },
    Download {
        id: ImageId,
        url: String,
        generation: u64,
    },
}

/// Result of an executed [`Effect`]
#[derive(Debug)]
pub enum Outcome {
    PageFetched {
        ticket: FetchTicket,
        result: FeedResult<FeedPage>,
    },
    LikeConfirmed {
        id: ImageId,
        generation: u64,
        listing: u64,
        result: FeedResult<()>,
    },
    CommentSubmitted {
        id: ImageId,
        text: String,
        generation: u64,
        listing: u64,
        result: FeedResult<()>,
    },
    Uploaded {
        generation: u64,
        result: FeedResult<Vec<ImageRecord>>,
    },
    Downloaded {
        id: ImageId,
        generation: u64,
        result: FeedResult<PathBuf>,
    },
}

/// What failed, for alerts the user has to acknowledge
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlertKind {
    Upload,
    Mutation,
    Validation,
    Download,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alert {
    pub kind: AlertKind,
    pub message: String,
}

impl Alert {
    pub fn new(kind: AlertKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// Everything the feed knows, from mount to unmount
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FeedState {
    pub(crate) config: FeedConfig,
    pub(crate) images: Vec<ImageRecord>,
    pub(crate) current_page: u32,
    pub(crate) total_pages: u32,
    pub(crate) cursor: Option<usize>,
    pub(crate) active_id: Option<ImageId>,
    pub(crate) pending_advance: bool,
    pub(crate) in_flight: Option<FetchTicket>,
    pub(crate) next_seq: u64,
    pub(crate) last_failed: Option<(u32, FetchMode)>,
    pub(crate) generation: u64,
    /// Bumped whenever a `Replace` fetch installs fresh server copies
    pub(crate) listing: u64,
    pub(crate) error_message: Option<String>,
    pub(crate) alert: Option<Alert>,
    pub(crate) comment_draft: String,
    pub(crate) like_ack: Option<ImageId>,
    pub(crate) uploading: bool,
}

impl FeedState {
    pub fn new(config: FeedConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    /// Drops all loaded data and abandons every outstanding request.
    ///
    /// Results of requests issued before the reset are ignored when they arrive.
    pub fn reset(&mut self) {
        log::debug!("Resetting feed (generation {})", self.generation + 1);
        let config = std::mem::take(&mut self.config);
        let next_seq = self.next_seq;
        let generation = self.generation + 1;
        *self = Self {
            config,
            next_seq,
            generation,
            ..Self::default()
        };
    }

    pub fn images(&self) -> &[ImageRecord] {
        &self.images
    }

    pub fn image(&self, id: &ImageId) -> Option<&ImageRecord> {
        self.images.iter().find(|r| &r.id == id)
    }

    pub fn len(&self) -> usize {
        self.images.len()
    }

    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }

    pub fn current_page(&self) -> u32 {
        self.current_page
    }

    pub fn total_pages(&self) -> u32 {
        self.total_pages
    }

    pub fn has_more_pages(&self) -> bool {
        self.current_page < self.total_pages
    }

    pub fn cursor(&self) -> Option<usize> {
        self.cursor
    }

    pub fn is_preview_open(&self) -> bool {
        self.cursor.is_some()
    }

    /// The record shown in the preview
    pub fn active(&self) -> Option<&ImageRecord> {
        self.cursor.and_then(|i| self.images.get(i))
    }

    pub fn active_id(&self) -> Option<&ImageId> {
        self.active_id.as_ref()
    }

    pub fn pending_advance(&self) -> bool {
        self.pending_advance
    }

    pub fn is_fetching(&self) -> bool {
        self.in_flight.is_some()
    }

    pub fn in_flight(&self) -> Option<FetchTicket> {
        self.in_flight
    }

    pub fn can_retry(&self) -> bool {
        self.last_failed.is_some()
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn error_message(&self) -> Option<&str> {
        self.error_message.as_deref()
    }

    pub fn alert(&self) -> Option<&Alert> {
        self.alert.as_ref()
    }

    pub fn comment_draft(&self) -> &str {
        &self.comment_draft
    }

    pub fn like_ack(&self) -> Option<&ImageId> {
        self.like_ack.as_ref()
    }

    pub fn is_uploading(&self) -> bool {
        self.uploading
    }

    pub(crate) fn position(&self, id: &ImageId) -> Option<usize> {
        self.images.iter().position(|r| &r.id == id)
    }

    pub(crate) fn record_mut(&mut self, id: &ImageId) -> Option<&mut ImageRecord> {
        self.images.iter_mut().find(|r| &r.id == id)
    }

    pub(crate) fn raise(&mut self, kind: AlertKind, message: impl Into<String>) {
        let alert = Alert::new(kind, message);
        log::warn!("{:?} alert: {}", alert.kind, alert.message);
        self.alert = Some(alert);
    }

    pub(crate) fn dismiss_alert(&mut self) {
        self.alert = None;
    }

    pub(crate) fn dismiss_error(&mut self) {
        self.error_message = None;
    }
}
