//! # Image Feed
//!
//! Client-side controller for a paginated image gallery backed by a REST
//! Image Service.
//!
//! This crate provides:
//! - A page store with idempotent, id-keyed merging of fetched pages
//! - A lightbox navigation cursor with next-page prefetching
//! - Optimistic likes with rollback, and comments
//! - An input adapter turning keys, swipes and double-taps into commands
//! - Upload and download of images
//!
//! ## Separation of Concerns
//!
//! [`FeedState`] performs no I/O. Every transition returns the [`Effect`]s it
//! needs; hosts run them with [`execute`] and feed the [`Outcome`] back through
//! [`FeedState::resolve`]. UI frameworks can therefore own the state in their
//! own reactive container and spawn effects however they like.
//!
//! ## Example Usage
//!
//! ```rust,ignore
//! use image_feed::{Command, FeedController, FeedState, HttpImageService, ImageDownloader};
//!
//! let service = HttpImageService::new(&ServiceConfig::default())?;
//! let downloader = ImageDownloader::new(DownloadConfig::default())?;
//! let mut feed = FeedController::new(FeedState::default(), service, downloader, InputConfig::default());
//!
//! feed.dispatch(Command::Refresh).await;
//! feed.open_at(0).await;
//! feed.next().await;
//! ```

pub mod config;
pub mod controller;
mod cursor;
pub mod download;
pub mod error;
pub mod input;
pub mod models;
mod mutation;
pub mod service;
pub mod state;
mod store;
mod upload;

#[cfg(test)]
mod testing;

pub use config::{DownloadConfig, FeedConfig, InputConfig, ServiceConfig};
pub use controller::{execute, Command, FeedController};
pub use download::{file_name_from_url, save_unique, ImageDownloader};
pub use error::{FeedError, FeedResult};
pub use input::{InputAdapter, InputEvent, Key};
pub use models::{Comment, FeedPage, FetchMode, ImageId, ImageRecord, UploadFile};
pub use service::{HttpImageService, ImageService};
pub use state::{Alert, AlertKind, Effect, FeedState, FetchTicket, Outcome};
