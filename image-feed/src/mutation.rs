//! Optimistic likes and comments
//!
//! A like is applied locally first and compensated if the service refuses
//! it. Comments are only appended once the service accepted them.
//!
//! Both carry the listing they were issued against. Once a `Replace` fetch
//! has installed fresh server copies, a refused like no longer compensates
//! (the fresh copy never saw the local increment) and an accepted comment is
//! only appended if the fresh copy does not already list it.

use crate::error::FeedResult;
use crate::models::{Comment, ImageId};
use crate::state::{AlertKind, Effect, FeedState};

impl FeedState {
    /// Likes `id` locally and asks the service to confirm.
    ///
    /// Returns `None` without touching anything when the image is unknown or
    /// was already liked in this session.
    pub fn like(&mut self, id: &ImageId) -> Option<Effect> {
        let generation = self.generation;
        let listing = self.listing;
        let Some(record) = self.record_mut(id) else {
            log::warn!("Like for unknown image {}", id);
            return None;
        };
        if record.liked {
            log::debug!("Image {} already liked, ignoring", id);
            return None;
        }

        record.like_count = record.like_count.saturating_add(1);
        record.liked = true;
        self.like_ack = Some(id.clone());

        Some(Effect::ConfirmLike {
            id: id.clone(),
            generation,
            listing,
        })
    }

    pub(crate) fn like_confirmed(
        &mut self,
        id: &ImageId,
        generation: u64,
        listing: u64,
        result: FeedResult<()>,
    ) {
        if generation != self.generation {
            return;
        }
        let Err(e) = result else {
            log::debug!("Like on {} confirmed", id);
            return;
        };

        if listing == self.listing {
            log::warn!("Like on {} failed, rolling back: {}", id, e);
            if let Some(record) = self.record_mut(id) {
                record.like_count = record.like_count.saturating_sub(1);
                record.liked = false;
            }
            if self.like_ack.as_ref() == Some(id) {
                self.like_ack = None;
            }
        } else {
            log::warn!("Like on {} failed after a refresh, nothing to roll back: {}", id, e);
        }
        self.raise(
            AlertKind::Mutation,
            format!("Like failed: {}", e.user_message()),
        );
    }

    /// Submits a comment on `id`. Blank text is rejected before any request.
    pub fn comment(&mut self, id: &ImageId, text: &str) -> Option<Effect> {
        let text = text.trim();
        if text.is_empty() {
            self.raise(AlertKind::Validation, "Please enter a comment first.");
            return None;
        }
        if self.position(id).is_none() {
            log::warn!("Comment for unknown image {}", id);
            return None;
        }

        Some(Effect::SubmitComment {
            id: id.clone(),
            text: text.to_string(),
            generation: self.generation,
            listing: self.listing,
        })
    }

    pub(crate) fn comment_submitted(
        &mut self,
        id: &ImageId,
        text: String,
        generation: u64,
        listing: u64,
        result: FeedResult<()>,
    ) {
        if generation != self.generation {
            return;
        }
        let refreshed = listing != self.listing;
        match result {
            Ok(()) => {
                if let Some(record) = self.record_mut(id) {
                    if refreshed && record.comments.iter().any(|c| c.text == text) {
                        log::debug!("Comment on {} already in the refreshed copy", id);
                    } else {
                        record.comments.push(Comment::new(text));
                    }
                }
                self.comment_draft.clear();
            }
            Err(e) => {
                self.raise(
                    AlertKind::Mutation,
                    format!("Comment failed: {}", e.user_message()),
                );
            }
        }
    }

    pub(crate) fn set_comment_draft(&mut self, text: String) {
        self.comment_draft = text;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FeedError;
    use crate::models::FetchMode;
    use crate::testing::{page, records};

    fn loaded(count: usize) -> FeedState {
        let mut state = FeedState::default();
        let Some(Effect::FetchPage(ticket)) = state.fetch_page(1, FetchMode::Replace) else {
            panic!("expected fetch");
        };
        state.page_fetched(ticket, Ok(page(records(0, count), 1, 1)));
        state
    }

    #[test]
    fn test_second_like_is_rejected_locally() {
        let mut state = loaded(3);
        let id = ImageId::new("img-1");

        assert!(state.like(&id).is_some());
        assert!(state.like(&id).is_none());

        let record = state.image(&id).unwrap();
        assert_eq!(record.like_count, 1);
        assert!(record.liked);
        assert_eq!(state.like_ack(), Some(&id));
    }

    #[test]
    fn test_failed_like_rolls_back() {
        let mut state = loaded(3);
        let id = ImageId::new("img-2");
        state.images[2].like_count = 7;

        let Some(Effect::ConfirmLike {
            generation,
            listing,
            ..
        }) = state.like(&id)
        else {
            panic!("expected confirmation");
        };
        state.like_confirmed(&id, generation, listing, Err(FeedError::Rejected("nope".into())));

        let record = state.image(&id).unwrap();
        assert_eq!(record.like_count, 7);
        assert!(!record.liked);
        assert_eq!(state.alert().unwrap().kind, AlertKind::Mutation);
        assert_eq!(state.like_ack(), None);
        // Unrelated records are untouched
        assert_eq!(state.images()[0].like_count, 0);

        // A retry is allowed after the rollback
        assert!(state.like(&id).is_some());
    }

    #[test]
    fn test_confirmed_like_is_kept() {
        let mut state = loaded(1);
        let id = ImageId::new("img-0");
        state.like(&id);
        state.like_confirmed(&id, 0, 1, Ok(()));
        assert_eq!(state.image(&id).unwrap().like_count, 1);
        assert!(state.alert().is_none());
    }

    #[test]
    fn test_empty_comment_never_requests() {
        let mut state = loaded(1);
        let id = ImageId::new("img-0");
        assert!(state.comment(&id, "").is_none());
        assert!(state.comment(&id, "   ").is_none());
        assert!(state.image(&id).unwrap().comments.is_empty());
        assert_eq!(state.alert().unwrap().kind, AlertKind::Validation);
    }

    #[test]
    fn test_comment_appends_on_success_and_clears_draft() {
        let mut state = loaded(2);
        let id = ImageId::new("img-1");
        state.set_comment_draft("  lovely  ".into());

        let draft = state.comment_draft().to_string();
        let Some(Effect::SubmitComment {
            text,
            generation,
            listing,
            ..
        }) = state.comment(&id, &draft)
        else {
            panic!("expected submission");
        };
        assert_eq!(text, "lovely");
        assert!(state.image(&id).unwrap().comments.is_empty());

        state.comment_submitted(&id, text, generation, listing, Ok(()));
        assert_eq!(
            state.image(&id).unwrap().comments,
            vec![Comment::new("lovely")]
        );
        assert_eq!(state.comment_draft(), "");
    }

    #[test]
    fn test_failed_comment_keeps_draft() {
        let mut state = loaded(1);
        let id = ImageId::new("img-0");
        state.set_comment_draft("hello".into());

        state.comment_submitted(
            &id,
            "hello".into(),
            0,
            1,
            Err(FeedError::NetworkError("offline".into())),
        );
        assert!(state.image(&id).unwrap().comments.is_empty());
        assert_eq!(state.comment_draft(), "hello");
        assert_eq!(state.alert().unwrap().kind, AlertKind::Mutation);
    }

    fn refresh(state: &mut FeedState, records: Vec<crate::models::ImageRecord>) {
        let Some(Effect::FetchPage(ticket)) = state.fetch_page(1, FetchMode::Replace) else {
            panic!("expected fetch");
        };
        state.page_fetched(ticket, Ok(page(records, 1, 1)));
    }

    #[test]
    fn test_refused_like_after_refresh_keeps_server_count() {
        let mut state = FeedState::default();
        let id = ImageId::new("a");
        let server_copy = || vec![crate::models::ImageRecord::new("a", "u").with_like_count(5)];
        refresh(&mut state, server_copy());

        let Some(Effect::ConfirmLike {
            generation,
            listing,
            ..
        }) = state.like(&id)
        else {
            panic!("expected confirmation");
        };
        assert_eq!(state.image(&id).unwrap().like_count, 6);

        refresh(&mut state, server_copy());
        state.like_confirmed(&id, generation, listing, Err(FeedError::Rejected("nope".into())));

        let record = state.image(&id).unwrap();
        assert_eq!(record.like_count, 5);
        assert!(!record.liked);
        assert_eq!(state.alert().unwrap().kind, AlertKind::Mutation);
    }

    #[test]
    fn test_refused_like_from_before_refresh_leaves_new_like_alone() {
        let mut state = FeedState::default();
        let id = ImageId::new("a");
        let server_copy = || vec![crate::models::ImageRecord::new("a", "u").with_like_count(5)];
        refresh(&mut state, server_copy());

        let Some(Effect::ConfirmLike {
            generation,
            listing,
            ..
        }) = state.like(&id)
        else {
            panic!("expected confirmation");
        };
        refresh(&mut state, server_copy());
        assert!(state.like(&id).is_some());

        state.like_confirmed(&id, generation, listing, Err(FeedError::Rejected("late".into())));

        let record = state.image(&id).unwrap();
        assert_eq!(record.like_count, 6);
        assert!(record.liked);
    }

    #[test]
    fn test_comment_after_refresh_is_not_listed_twice() {
        let mut state = loaded(1);
        let id = ImageId::new("img-0");

        let Some(Effect::SubmitComment {
            text,
            generation,
            listing,
            ..
        }) = state.comment(&id, "nice")
        else {
            panic!("expected submission");
        };

        let mut server_copy = records(0, 1);
        server_copy[0].comments.push(Comment::new("nice"));
        refresh(&mut state, server_copy);
        state.comment_submitted(&id, text, generation, listing, Ok(()));

        assert_eq!(state.image(&id).unwrap().comments, vec![Comment::new("nice")]);
    }

    #[test]
    fn test_repeated_comment_without_refresh_is_kept() {
        let mut state = loaded(1);
        let id = ImageId::new("img-0");
        for _ in 0..2 {
            let Some(Effect::SubmitComment {
                text,
                generation,
                listing,
                ..
            }) = state.comment(&id, "nice")
            else {
                panic!("expected submission");
            };
            state.comment_submitted(&id, text, generation, listing, Ok(()));
        }
        assert_eq!(state.image(&id).unwrap().comments.len(), 2);
    }

    #[test]
    fn test_outcomes_from_before_reset_are_ignored() {
        let mut state = loaded(1);
        let id = ImageId::new("img-0");
        state.like(&id);
        state.reset();
        state.like_confirmed(&id, 0, 1, Err(FeedError::Rejected("late".into())));
        assert!(state.alert().is_none());
    }
}
