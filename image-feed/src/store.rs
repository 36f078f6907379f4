//! Page store: requesting pages and merging them into the loaded images

use crate::error::FeedResult;
use crate::models::{FeedPage, FetchMode, ImageId, ImageRecord};
use crate::state::{Effect, FeedState, FetchTicket};
use std::collections::HashSet;

impl FeedState {
    /// Requests `page` from the Image Service.
    ///
    /// `Replace` always supersedes an outstanding fetch. `Append` is refused
    /// while another fetch is in flight.
    pub fn fetch_page(&mut self, page: u32, mode: FetchMode) -> Option<Effect> {
        if page == 0 {
            log::warn!("Ignoring fetch of page 0 (pages are 1-based)");
            return None;
        }
        if mode == FetchMode::Append {
            if let Some(ticket) = self.in_flight {
                log::debug!(
                    "Fetch of page {} skipped, page {} already in flight",
                    page,
                    ticket.page
                );
                return None;
            }
        }

        let ticket = FetchTicket {
            seq: self.next_seq,
            page,
            mode,
        };
        self.next_seq += 1;
        self.in_flight = Some(ticket);
        log::debug!("Fetching page {} ({:?})", page, mode);
        Some(Effect::FetchPage(ticket))
    }

    /// Appends the page after the last loaded one, unless a fetch is in flight
    pub(crate) fn fetch_next_page(&mut self) -> Option<Effect> {
        if self.in_flight.is_some() || !self.has_more_pages() {
            return None;
        }
        self.fetch_page(self.current_page + 1, FetchMode::Append)
    }

    /// Re-issues the last failed fetch
    pub fn retry(&mut self) -> Option<Effect> {
        let (page, mode) = self.last_failed?;
        log::info!("Retrying fetch of page {}", page);
        self.fetch_page(page, mode)
    }

    /// Applies the result of a page fetch.
    ///
    /// Failures leave the loaded images untouched and only set the banner.
    pub(crate) fn page_fetched(
        &mut self,
        ticket: FetchTicket,
        result: FeedResult<FeedPage>,
    ) -> Vec<Effect> {
        if self.in_flight != Some(ticket) {
            log::debug!("Discarding stale result for page {}", ticket.page);
            return Vec::new();
        }
        self.in_flight = None;
        let advance = std::mem::take(&mut self.pending_advance);

        let page = match result {
            Ok(page) => page,
            Err(e) => {
                log::warn!("Fetching page {} failed: {}", ticket.page, e);
                self.error_message = Some(e.user_message());
                self.last_failed = Some((ticket.page, ticket.mode));
                return Vec::new();
            }
        };

        self.error_message = None;
        self.last_failed = None;

        let added = match ticket.mode {
            FetchMode::Replace => {
                self.images.clear();
                self.listing += 1;
                self.close();
                self.current_page = page.page_number;
                self.merge(page.records)
            }
            FetchMode::Append => {
                // A server echoing a stale page number must not stall pagination
                self.current_page = page.page_number.max(ticket.page);
                self.merge(page.records)
            }
        };
        self.total_pages = page.total_pages;
        log::info!(
            "Loaded page {}/{} ({} new images, {} total)",
            self.current_page,
            self.total_pages,
            added,
            self.images.len()
        );

        if advance {
            if let Some(index) = self.cursor {
                if index + 1 < self.images.len() {
                    self.move_cursor(index + 1);
                }
            }
        }

        self.prefetch().into_iter().collect()
    }

    /// Idempotent append keyed by id. Records already present keep their
    /// local copy. Returns the number of records added.
    pub(crate) fn merge(&mut self, records: Vec<ImageRecord>) -> usize {
        let mut seen: HashSet<ImageId> = self.images.iter().map(|r| r.id.clone()).collect();
        let before = self.images.len();
        for record in records {
            if seen.insert(record.id.clone()) {
                self.images.push(record);
            } else {
                log::debug!("Skipping duplicate image {}", record.id);
            }
        }
        self.images.len() - before
    }
}
