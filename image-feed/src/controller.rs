//! Feed controller: command dispatch and effect execution
//!
//! [`FeedState::apply`] is the single entry point for user intent and
//! [`FeedState::resolve`] for finished requests. Both return follow-up
//! [`Effect`]s, which [`execute`] runs against an [`ImageService`].
//! [`FeedController`] ties the pieces together for hosts that simply want to
//! await each command to completion.

use crate::config::InputConfig;
use crate::download::ImageDownloader;
use crate::input::{InputAdapter, InputEvent};
use crate::models::{FetchMode, ImageId, UploadFile};
use crate::service::ImageService;
use crate::state::{Effect, FeedState, Outcome};
use std::collections::VecDeque;

/// Everything a user can ask the feed to do
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Load page 1, replacing whatever is loaded
    Refresh,
    /// Append the next page (infinite scroll)
    LoadMore,
    /// Re-issue the last failed page fetch
    Retry,
    OpenAt(usize),
    Next,
    Previous,
    Close,
    /// Like the image in the preview
    Like,
    LikeImage(ImageId),
    /// Update the comment input buffer
    EditComment(String),
    /// Comment on the image in the preview
    Comment(String),
    CommentOn(ImageId, String),
    Upload(Vec<UploadFile>),
    Download(ImageId),
    DismissAlert,
    DismissError,
    /// Hide the like acknowledgment once it has been shown
    ClearLikeAck,
}

impl FeedState {
    pub fn apply(&mut self, command: Command) -> Vec<Effect> {
        log::trace!("apply {:?}", command);
        match command {
            Command::Refresh => self.fetch_page(1, FetchMode::Replace).into_iter().collect(),
            Command::LoadMore => self.fetch_next_page().into_iter().collect(),
            Command::Retry => self.retry().into_iter().collect(),
            Command::OpenAt(index) => self.open_at(index),
            Command::Next => self.next(),
            Command::Previous => self.previous(),
            Command::Close => {
                self.close();
                Vec::new()
            }
            Command::Like => match self.active_id.clone() {
                Some(id) => self.like(&id).into_iter().collect(),
                None => Vec::new(),
            },
            Command::LikeImage(id) => self.like(&id).into_iter().collect(),
            Command::EditComment(text) => {
                self.set_comment_draft(text);
                Vec::new()
            }
            Command::Comment(text) => match self.active_id.clone() {
                Some(id) => self.comment(&id, &text).into_iter().collect(),
                None => Vec::new(),
            },
            Command::CommentOn(id, text) => self.comment(&id, &text).into_iter().collect(),
            Command::Upload(files) => self.upload(files).into_iter().collect(),
            Command::Download(id) => self.download(&id).into_iter().collect(),
            Command::DismissAlert => {
                self.dismiss_alert();
                Vec::new()
            }
            Command::DismissError => {
                self.dismiss_error();
                Vec::new()
            }
            Command::ClearLikeAck => {
                self.like_ack = None;
                Vec::new()
            }
        }
    }

    pub fn resolve(&mut self, outcome: Outcome) -> Vec<Effect> {
        match outcome {
            Outcome::PageFetched { ticket, result } => self.page_fetched(ticket, result),
            Outcome::LikeConfirmed {
                id,
                generation,
                listing,
                result,
            } => {
                self.like_confirmed(&id, generation, listing, result);
                Vec::new()
            }
            Outcome::CommentSubmitted {
                id,
                text,
                generation,
                listing,
                result,
            } => {
                self.comment_submitted(&id, text, generation, listing, result);
                Vec::new()
            }
            Outcome::Uploaded { generation, result } => {
                self.uploaded(generation, result);
                Vec::new()
            }
            Outcome::Downloaded {
                id,
                generation,
                result,
            } => {
                self.downloaded(&id, generation, result);
                Vec::new()
            }
        }
    }
}

/// Runs one effect and packages its result
pub async fn execute<S: ImageService>(
    service: &S,
    downloader: &ImageDownloader,
    effect: Effect,
) -> Outcome {
    match effect {
        Effect::FetchPage(ticket) => Outcome::PageFetched {
            ticket,
            result: service.fetch_page(ticket.page).await,
        },
        Effect::ConfirmLike {
            id,
            generation,
            listing,
        } => {
            let result = service.like(&id).await;
            Outcome::LikeConfirmed {
                id,
                generation,
                listing,
                result,
            }
        }
        Effect::SubmitComment {
            id,
            text,
            generation,
            listing,
        } => {
            let result = service.comment(&id, &text).await;
            Outcome::CommentSubmitted {
                id,
                text,
                generation,
                listing,
                result,
            }
        }
        Effect::Upload { files, generation } => Outcome::Uploaded {
            generation,
            result: service.upload(files).await,
        },
        Effect::Download {
            id,
            url,
            generation,
        } => Outcome::Downloaded {
            id,
            generation,
            result: downloader.download(&url).await,
        },
    }
}

/// Headless controller that owns the state and awaits every effect
pub struct FeedController<S> {
    state: FeedState,
    service: S,
    downloader: ImageDownloader,
    input: InputAdapter,
}

impl<S: ImageService> FeedController<S> {
    pub fn new(
        state: FeedState,
        service: S,
        downloader: ImageDownloader,
        input: InputConfig,
    ) -> Self {
        Self {
            state,
            service,
            downloader,
            input: InputAdapter::new(input),
        }
    }

    pub fn state(&self) -> &FeedState {
        &self.state
    }

    pub fn service(&self) -> &S {
        &self.service
    }

    /// Applies `command` and runs every resulting effect, including follow-ups
    pub async fn dispatch(&mut self, command: Command) {
        let effects = self.state.apply(command);
        self.run(effects).await;
    }

    /// Translates raw input and dispatches the resulting command, if any
    pub async fn handle_input(&mut self, event: InputEvent, now_ms: u64) {
        let preview_open = self.state.is_preview_open();
        if let Some(command) = self.input.translate(event, preview_open, now_ms) {
            self.dispatch(command).await;
        }
    }

    pub async fn fetch_page(&mut self, page: u32, mode: FetchMode) {
        let effects = self.state.fetch_page(page, mode).into_iter().collect();
        self.run(effects).await;
    }

    pub async fn open_at(&mut self, index: usize) {
        self.dispatch(Command::OpenAt(index)).await;
    }

    pub async fn next(&mut self) {
        self.dispatch(Command::Next).await;
    }

    pub async fn previous(&mut self) {
        self.dispatch(Command::Previous).await;
    }

    pub fn close(&mut self) {
        self.state.close();
    }

    pub async fn like(&mut self, id: &ImageId) {
        self.dispatch(Command::LikeImage(id.clone())).await;
    }

    pub async fn comment(&mut self, id: &ImageId, text: &str) {
        self.dispatch(Command::CommentOn(id.clone(), text.to_string()))
            .await;
    }

    /// Abandons outstanding work and starts over
    pub fn reset(&mut self) {
        self.state.reset();
    }

    async fn run(&mut self, effects: Vec<Effect>) {
        let mut queue: VecDeque<Effect> = effects.into();
        while let Some(effect) = queue.pop_front() {
            let outcome = execute(&self.service, &self.downloader, effect).await;
            queue.extend(self.state.resolve(outcome));
        }
    }
}
