//! Navigation cursor and prefetch policy for the lightbox
//!
//! `next()` stops at the last loaded image and pulls in the next page
//! instead of wrapping; `previous()` wraps around the loaded images.

use crate::state::{Effect, FeedState};

impl FeedState {
    /// Opens the preview on `index`. Out-of-range indices are rejected.
    pub fn open_at(&mut self, index: usize) -> Vec<Effect> {
        if index >= self.images.len() {
            log::warn!(
                "Cannot open preview at {} ({} images loaded)",
                index,
                self.images.len()
            );
            return Vec::new();
        }
        self.pending_advance = false;
        self.move_cursor(index);
        self.prefetch().into_iter().collect()
    }

    pub fn next(&mut self) -> Vec<Effect> {
        let Some(index) = self.cursor else {
            return Vec::new();
        };

        if index + 1 < self.images.len() {
            self.pending_advance = false;
            self.move_cursor(index + 1);
            return self.prefetch().into_iter().collect();
        }

        if !self.has_more_pages() {
            return Vec::new();
        }

        // Advance once the next page arrives; a prefetch may already be on its way
        self.pending_advance = true;
        self.fetch_next_page().into_iter().collect()
    }

    pub fn previous(&mut self) -> Vec<Effect> {
        let Some(index) = self.cursor else {
            return Vec::new();
        };
        let len = self.images.len();
        if len == 0 {
            return Vec::new();
        }

        let target = if index == 0 { len - 1 } else { index - 1 };
        self.pending_advance = false;
        self.move_cursor(target);
        self.prefetch().into_iter().collect()
    }

    pub fn close(&mut self) {
        self.cursor = None;
        self.active_id = None;
        self.pending_advance = false;
        self.like_ack = None;
        self.comment_draft.clear();
    }

    /// Fetches the next page when the preview is within `lookahead` images
    /// of the end of the loaded data.
    pub(crate) fn prefetch(&mut self) -> Option<Effect> {
        let index = self.cursor?;
        let ahead = self.images.len().saturating_sub(index + 1);
        if ahead > self.config.lookahead {
            return None;
        }
        let effect = self.fetch_next_page();
        if effect.is_some() {
            log::debug!("Prefetching page {} ({} images ahead)", self.current_page + 1, ahead);
        }
        effect
    }

    pub(crate) fn move_cursor(&mut self, index: usize) {
        self.cursor = Some(index);
        self.active_id = self.images.get(index).map(|r| r.id.clone());
        self.like_ack = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::FeedConfig;
    use crate::models::{FetchMode, ImageRecord};
    use crate::testing::{page, records};

    fn loaded(count: usize, total_pages: u32) -> FeedState {
        let mut state = FeedState::new(FeedConfig::default());
        let Some(Effect::FetchPage(ticket)) = state.fetch_page(1, FetchMode::Replace) else {
            panic!("expected fetch");
        };
        state.page_fetched(ticket, Ok(page(records(0, count), 1, total_pages)));
        state
    }

    fn fetches(effects: &[Effect]) -> Vec<(u32, FetchMode)> {
        effects
            .iter()
            .filter_map(|e| match e {
                Effect::FetchPage(t) => Some((t.page, t.mode)),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_next_increases_until_last_then_stops() {
        let mut state = loaded(10, 1);
        state.open_at(0);
        let mut last = 0;
        for _ in 0..20 {
            let effects = state.next();
            assert!(effects.is_empty());
            let now = state.cursor().unwrap();
            assert!(now > last || now == 9);
            last = now;
        }
        assert_eq!(state.cursor(), Some(9));
        assert!(!state.pending_advance());
    }

    #[test]
    fn test_previous_wraps_from_first_to_last() {
        let mut state = loaded(5, 1);
        state.open_at(0);
        state.previous();
        assert_eq!(state.cursor(), Some(4));
        state.previous();
        assert_eq!(state.cursor(), Some(3));
        assert_eq!(state.active_id().unwrap().as_str(), "img-3");
    }

    #[test]
    fn test_single_image_wraps_onto_itself() {
        let mut state = FeedState::default();
        let Some(Effect::FetchPage(ticket)) = state.fetch_page(1, FetchMode::Replace) else {
            panic!("expected fetch");
        };
        state.page_fetched(
            ticket,
            Ok(page(vec![ImageRecord::new("a", "u1").with_like_count(0)], 1, 1)),
        );

        state.open_at(0);
        assert!(state.previous().is_empty());
        assert_eq!(state.cursor(), Some(0));
        assert!(state.next().is_empty());
        assert_eq!(state.cursor(), Some(0));
    }

    #[test]
    fn test_open_out_of_range_is_rejected() {
        let mut state = loaded(3, 1);
        assert!(state.open_at(3).is_empty());
        assert_eq!(state.cursor(), None);
    }

    #[test]
    fn test_navigation_without_preview_is_noop() {
        let mut state = loaded(3, 2);
        assert!(state.next().is_empty());
        assert!(state.previous().is_empty());
        assert_eq!(state.cursor(), None);
    }

    #[test]
    fn test_end_of_page_fetches_exactly_once_then_advances() {
        let mut state = loaded(20, 3);

        let mut issued = fetches(&state.open_at(19));
        issued.extend(fetches(&state.next()));
        assert_eq!(issued, vec![(2, FetchMode::Append)]);
        assert!(state.pending_advance());
        assert_eq!(state.cursor(), Some(19));

        // More presses while waiting do not issue more requests
        assert!(state.next().is_empty());

        let ticket = state.in_flight().unwrap();
        let effects = state.page_fetched(ticket, Ok(page(records(20, 20), 2, 3)));

        assert!(effects.is_empty());
        assert_eq!(state.cursor(), Some(20));
        assert!(!state.pending_advance());
        assert_eq!(state.current_page(), 2);
    }

    #[test]
    fn test_zero_lookahead_prefetches_at_last_image() {
        let mut state = FeedState::new(FeedConfig { lookahead: 0 });
        let Some(Effect::FetchPage(ticket)) = state.fetch_page(1, FetchMode::Replace) else {
            panic!("expected fetch");
        };
        state.page_fetched(ticket, Ok(page(records(0, 4), 1, 2)));

        state.open_at(2);
        assert!(!state.is_fetching());
        let effects = state.next();
        assert_eq!(state.cursor(), Some(3));
        assert_eq!(fetches(&effects), vec![(2, FetchMode::Append)]);

        let effects = state.next();
        assert!(effects.is_empty());
        assert!(state.pending_advance());
    }

    #[test]
    fn test_failed_fetch_clears_pending_without_moving() {
        let mut state = loaded(5, 2);
        state.open_at(4);
        state.next();
        assert!(state.pending_advance());

        let ticket = state.in_flight().unwrap();
        state.page_fetched(
            ticket,
            Err(crate::error::FeedError::NetworkError("offline".into())),
        );
        assert!(!state.pending_advance());
        assert_eq!(state.cursor(), Some(4));
    }

    #[test]
    fn test_page_without_new_records_does_not_advance() {
        let mut state = loaded(5, 2);
        state.open_at(4);
        state.next();
        let ticket = state.in_flight().unwrap();
        state.page_fetched(ticket, Ok(page(records(0, 5), 2, 2)));
        assert_eq!(state.cursor(), Some(4));
        assert!(!state.pending_advance());
    }

    #[test]
    fn test_prefetch_triggers_within_lookahead() {
        let mut state = loaded(10, 2);
        assert!(state.open_at(5).is_empty());
        assert!(!state.is_fetching());

        let effects = state.next();
        assert_eq!(state.cursor(), Some(6));
        assert_eq!(fetches(&effects), vec![(2, FetchMode::Append)]);
        assert!(!state.pending_advance());

        assert!(state.next().is_empty(), "one prefetch at a time");
        assert_eq!(state.cursor(), Some(7));
    }

    #[test]
    fn test_no_prefetch_on_last_page() {
        let mut state = loaded(4, 1);
        assert!(state.open_at(3).is_empty());
        assert!(!state.is_fetching());
    }

    #[test]
    fn test_close_clears_preview() {
        let mut state = loaded(5, 2);
        state.open_at(4);
        state.next();
        state.comment_draft = "draft".into();
        state.close();
        assert_eq!(state.cursor(), None);
        assert_eq!(state.active_id(), None);
        assert!(!state.pending_advance());
        assert_eq!(state.comment_draft(), "");
    }
}
