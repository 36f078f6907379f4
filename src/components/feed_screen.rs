use crate::config::AppConfig;
use dioxus::prelude::*;
use dioxus_gallery::{ErrorBanner, Gallery, Lightbox, UploadBox};
use image_feed::{
    execute, AlertKind, Command, Effect, FeedState, HttpImageService, ImageDownloader, ImageId,
    InputAdapter, InputEvent,
};
use std::time::{Duration, Instant};

/// Clients shared by every spawned effect, provided as context by the app
#[derive(Clone)]
pub struct FeedServices {
    pub service: HttpImageService,
    pub downloader: ImageDownloader,
}

/// Spawns each effect and feeds its outcome back into the state
fn run_effects(mut feed: Signal<FeedState>, services: FeedServices, effects: Vec<Effect>) {
    for effect in effects {
        let services = services.clone();
        spawn(async move {
            let outcome = execute(&services.service, &services.downloader, effect).await;
            let follow_up = feed.write().resolve(outcome);
            run_effects(feed, services, follow_up);
        });
    }
}

#[component]
pub fn FeedScreen(config: AppConfig) -> Element {
    let services = use_context::<FeedServices>();
    let mut feed = use_signal(|| FeedState::new(config.feed.clone()));
    let mut input = use_signal(|| InputAdapter::new(config.input.clone()));
    let started = use_hook(Instant::now);
    let like_ack_ms = config.like_ack_ms;

    let dispatch = use_callback(move |command: Command| {
        let effects = feed.write().apply(command);
        run_effects(feed, services.clone(), effects);
    });

    // Load the first page on mount
    use_effect(move || dispatch.call(Command::Refresh));

    // Hide the like acknowledgment after a moment, one timer per ack
    let like_ack = use_memo(move || feed.read().like_ack().cloned());
    use_effect(move || {
        if let Some(id) = like_ack() {
            spawn(async move {
                tokio::time::sleep(Duration::from_millis(like_ack_ms)).await;
                if ack_still_shown(&feed.peek(), &id) {
                    dispatch.call(Command::ClearLikeAck);
                }
            });
        }
    });

    let on_input = move |event: InputEvent| {
        let now_ms = started.elapsed().as_millis() as u64;
        let preview_open = feed.read().is_preview_open();
        let command = input.write().translate(event, preview_open, now_ms);
        if let Some(command) = command {
            dispatch.call(command);
        }
    };

    let state = feed.read();
    let images = state.images().to_vec();
    let error_message = state.error_message().map(str::to_string);
    let can_retry = state.can_retry();
    let alert = state.alert().cloned();
    let active = state.active().cloned();
    let cursor = state.cursor().unwrap_or(0);
    let total_loaded = state.len();
    let pending = state.pending_advance();
    let show_like_ack = active.as_ref().is_some_and(|r| state.like_ack() == Some(&r.id));
    let comment_draft = state.comment_draft().to_string();
    let has_more = state.has_more_pages();
    let loading = state.is_fetching();
    let uploading = state.is_uploading();
    drop(state);

    rsx! {
        div { style: "padding: 16px; max-width: 960px; margin: 0 auto; min-height: 100vh; background: #fafafa;",
            div { style: "display: flex; align-items: center; justify-content: space-between; margin-bottom: 16px;",
                h1 { style: "color: #0066cc; margin: 0; font-size: 26px; font-weight: 700;", "📷 Cloud Gallery" }
                button {
                    style: "padding: 8px 16px; background: #e0e0e0; border-radius: 8px; border: none; cursor: pointer;",
                    disabled: loading,
                    onclick: move |_| dispatch.call(Command::Refresh),
                    "🔄 Refresh"
                }
            }

            UploadBox { uploading, on_upload: move |files| dispatch.call(Command::Upload(files)) }

            if let Some(message) = error_message {
                ErrorBanner {
                    message,
                    can_retry,
                    on_retry: move |_| dispatch.call(Command::Retry),
                    on_dismiss: move |_| dispatch.call(Command::DismissError),
                }
            }

            Gallery {
                images,
                has_more,
                loading,
                on_open: move |index| dispatch.call(Command::OpenAt(index)),
                on_like: move |id| dispatch.call(Command::LikeImage(id)),
                on_download: move |id| dispatch.call(Command::Download(id)),
                on_load_more: move |_| dispatch.call(Command::LoadMore),
            }

            if let Some(record) = active {
                Lightbox {
                    record,
                    index: cursor,
                    total_loaded,
                    pending,
                    show_like_ack,
                    comment_draft,
                    on_input,
                    on_next: move |_| dispatch.call(Command::Next),
                    on_previous: move |_| dispatch.call(Command::Previous),
                    on_close: move |_| dispatch.call(Command::Close),
                    on_like: move |id| dispatch.call(Command::LikeImage(id)),
                    on_comment_input: move |text| dispatch.call(Command::EditComment(text)),
                    on_comment_submit: move |text| dispatch.call(Command::Comment(text)),
                    on_download: move |id| dispatch.call(Command::Download(id)),
                }
            }

            if let Some(alert) = alert {
                AlertDialog {
                    title: alert_title(alert.kind),
                    message: alert.message,
                    on_dismiss: move |_| dispatch.call(Command::DismissAlert),
                }
            }
        }
    }
}

/// A timer only clears the ack it was started for
fn ack_still_shown(state: &FeedState, id: &ImageId) -> bool {
    state.like_ack() == Some(id)
}

fn alert_title(kind: AlertKind) -> String {
    match kind {
        AlertKind::Upload => "Upload",
        AlertKind::Mutation => "Something went wrong",
        AlertKind::Validation => "Check your input",
        AlertKind::Download => "Download",
    }
    .to_string()
}

/// Modal notice shown above everything, including the lightbox
#[component]
fn AlertDialog(title: String, message: String, on_dismiss: EventHandler<()>) -> Element {
    rsx! {
        div {
            style: "position: fixed; top: 0; left: 0; right: 0; bottom: 0; background: rgba(0, 0, 0, 0.5); z-index: 2000; display: flex; align-items: center; justify-content: center;",
            div {
                style: "background: white; border-radius: 12px; padding: 24px; max-width: 360px; width: 90%;",
                h2 { style: "margin: 0 0 12px 0; font-size: 18px; color: #333;", "{title}" }
                p { style: "font-size: 14px; color: #555; margin: 0 0 20px 0;", "{message}" }
                button {
                    style: "width: 100%; padding: 12px; background: #0066cc; color: white; border-radius: 8px; border: none; font-size: 16px; cursor: pointer;",
                    onclick: move |_| on_dismiss.call(()),
                    "OK"
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_old_ack_timer_leaves_newer_ack() {
        let mut state = FeedState::default();
        state.apply(Command::Upload(vec![image_feed::UploadFile::new("a.jpg", vec![1])]));
        state.resolve(image_feed::Outcome::Uploaded {
            generation: 0,
            result: Ok(vec![
                image_feed::ImageRecord::new("a", "https://cdn.test/a.jpg"),
                image_feed::ImageRecord::new("b", "https://cdn.test/b.jpg"),
            ]),
        });

        let (a, b) = (ImageId::new("a"), ImageId::new("b"));
        state.apply(Command::LikeImage(a.clone()));
        assert!(ack_still_shown(&state, &a));

        state.apply(Command::LikeImage(b.clone()));
        assert!(!ack_still_shown(&state, &a));
        assert!(ack_still_shown(&state, &b));

        state.apply(Command::ClearLikeAck);
        assert!(!ack_still_shown(&state, &b));
    }

    #[test]
    fn test_every_alert_kind_has_a_title() {
        for kind in [
            AlertKind::Upload,
            AlertKind::Mutation,
            AlertKind::Validation,
            AlertKind::Download,
        ] {
            assert!(!alert_title(kind).is_empty());
        }
    }
}
