//! Test fixtures: record builders and an in-memory Image Service

use crate::error::{FeedError, FeedResult};
use crate::models::{FeedPage, ImageId, ImageRecord, UploadFile};
use crate::service::ImageService;
use std::cell::{Cell, RefCell};
use std::collections::HashSet;

/// `count` records with ids `img-{start}`, `img-{start + 1}`, ...
pub(crate) fn records(start: usize, count: usize) -> Vec<ImageRecord> {
    (start..start + count)
        .map(|i| ImageRecord::new(format!("img-{}", i), format!("https://cdn.test/img-{}.jpg", i)))
        .collect()
}

pub(crate) fn page(records: Vec<ImageRecord>, page_number: u32, total_pages: u32) -> FeedPage {
    FeedPage {
        records,
        page_number,
        total_pages,
    }
}

/// Serves fixed pages and records every call
#[derive(Default)]
pub(crate) struct MemoryImageService {
    pages: Vec<Vec<ImageRecord>>,
    requested: RefCell<Vec<u32>>,
    like_calls: Cell<usize>,
    comment_calls: Cell<usize>,
    rejected_likes: RefCell<HashSet<String>>,
    fetch_failure: RefCell<Option<FeedError>>,
}

impl MemoryImageService {
    pub(crate) fn with_pages(pages: Vec<Vec<ImageRecord>>) -> Self {
        Self {
            pages,
            ..Self::default()
        }
    }

    pub(crate) fn reject_likes_for(&self, id: &str) {
        self.rejected_likes.borrow_mut().insert(id.to_string());
    }

    pub(crate) fn fail_next_fetch(&self, error: FeedError) {
        *self.fetch_failure.borrow_mut() = Some(error);
    }

    pub(crate) fn requested_pages(&self) -> Vec<u32> {
        self.requested.borrow().clone()
    }

    pub(crate) fn like_calls(&self) -> usize {
        self.like_calls.get()
    }

    pub(crate) fn comment_calls(&self) -> usize {
        self.comment_calls.get()
    }
}

impl ImageService for MemoryImageService {
    async fn fetch_page(&self, page_number: u32) -> FeedResult<FeedPage> {
        self.requested.borrow_mut().push(page_number);
        if let Some(error) = self.fetch_failure.borrow_mut().take() {
            return Err(error);
        }
        let records = self
            .pages
            .get(page_number as usize - 1)
            .cloned()
            .ok_or(FeedError::HttpStatus {
                status: 404,
                body: String::new(),
            })?;
        Ok(page(records, page_number, self.pages.len() as u32))
    }

    async fn like(&self, id: &ImageId) -> FeedResult<()> {
        self.like_calls.set(self.like_calls.get() + 1);
        if self.rejected_likes.borrow().contains(id.as_str()) {
            return Err(FeedError::Rejected("Already liked".to_string()));
        }
        Ok(())
    }

    async fn comment(&self, _id: &ImageId, _text: &str) -> FeedResult<()> {
        self.comment_calls.set(self.comment_calls.get() + 1);
        Ok(())
    }

    async fn upload(&self, files: Vec<UploadFile>) -> FeedResult<Vec<ImageRecord>> {
        Ok(files
            .into_iter()
            .map(|f| ImageRecord::from_url(format!("https://cdn.test/uploads/{}", f.file_name)))
            .collect())
    }
}
