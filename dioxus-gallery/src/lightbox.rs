use dioxus::prelude::*;
use image_feed::{ImageId, ImageRecord, InputEvent};

const NAV_BUTTON: &str = "position: absolute; width: 50px; height: 50px; background: rgba(255, 255, 255, 0.3); color: white; border-radius: 50%; font-size: 24px; cursor: pointer; border: none;";

/// Fullscreen preview of one feed image
///
/// Raw keyboard and pointer input is forwarded untranslated through
/// `on_input`; the parent owns the gesture state and decides what it means.
/// Buttons call the explicit handlers directly.
#[component]
pub fn Lightbox(
    /// Image under the cursor
    record: ImageRecord,
    /// Cursor position, zero based
    index: usize,
    /// Number of images loaded so far
    total_loaded: usize,
    /// A next-page fetch is running and the cursor will advance when it lands
    #[props(default)]
    pending: bool,
    /// Show the short "liked" acknowledgment
    #[props(default)]
    show_like_ack: bool,
    #[props(default)] comment_draft: String,
    on_input: EventHandler<InputEvent>,
    on_next: EventHandler<()>,
    on_previous: EventHandler<()>,
    on_close: EventHandler<()>,
    on_like: EventHandler<ImageId>,
    on_comment_input: EventHandler<String>,
    on_comment_submit: EventHandler<String>,
    on_download: EventHandler<ImageId>,
) -> Element {
    let position = index + 1;
    let like_id = record.id.clone();
    let download_id = record.id.clone();
    let like_label = if record.liked { "♥ Liked" } else { "♡ Like" };
    let submit_draft = comment_draft.clone();

    rsx! {
        div {
            style: "position: fixed; top: 0; left: 0; right: 0; bottom: 0; background: rgba(0, 0, 0, 0.95); z-index: 1000; display: flex; flex-direction: column; outline: none;",
            tabindex: "0",
            onmounted: move |evt| async move {
                if let Err(e) = evt.set_focus(true).await {
                    log::debug!("Lightbox could not take focus: {:?}", e);
                }
            },
            onkeydown: move |evt: KeyboardEvent| {
                let name = evt.key().to_string();
                on_input.call(InputEvent::KeyDown(image_feed::Key::from_name(&name)));
            },
            onclick: move |_| on_close.call(()),

            // Header
            div {
                style: "display: flex; justify-content: space-between; align-items: center; padding: 16px; background: rgba(0, 0, 0, 0.7);",
                onclick: move |evt| evt.stop_propagation(),
                div { style: "color: white; font-size: 16px;",
                    "{position} / {total_loaded}"
                    if pending {
                        span { style: "margin-left: 12px; color: #aaa;", "Loading more..." }
                    }
                }
                button {
                    style: "width: 40px; height: 40px; background: rgba(255, 255, 255, 0.2); color: white; border-radius: 50%; font-size: 24px; cursor: pointer; border: none;",
                    onclick: move |_| on_close.call(()),
                    "×"
                }
            }

            // Image area
            div {
                style: "flex: 1; display: flex; align-items: center; justify-content: center; padding: 20px; position: relative; min-height: 0;",
                button {
                    style: "{NAV_BUTTON} left: 20px;",
                    onclick: move |evt| {
                        evt.stop_propagation();
                        on_previous.call(());
                    },
                    "‹"
                }
                img {
                    src: "{record.url}",
                    style: "max-width: 100%; max-height: 100%; object-fit: contain; touch-action: pan-y; user-select: none;",
                    draggable: "false",
                    onclick: move |evt| evt.stop_propagation(),
                    onpointerdown: move |evt: PointerEvent| {
                        let x = evt.client_coordinates().x;
                        on_input.call(InputEvent::PointerDown { x });
                    },
                    onpointerup: move |evt: PointerEvent| {
                        let x = evt.client_coordinates().x;
                        let touch = evt.pointer_type() == "touch";
                        on_input.call(InputEvent::PointerUp { x, touch });
                    },
                    ondoubleclick: move |_| on_input.call(InputEvent::DoubleClick),
                }
                if show_like_ack {
                    div {
                        style: "position: absolute; color: #ff3366; font-size: 96px; pointer-events: none;",
                        "♥"
                    }
                }
                button {
                    style: "{NAV_BUTTON} right: 20px;",
                    onclick: move |evt| {
                        evt.stop_propagation();
                        on_next.call(());
                    },
                    "›"
                }
            }

            // Footer: likes and comments
            div {
                style: "display: flex; flex-direction: column; gap: 12px; padding: 16px; background: rgba(0, 0, 0, 0.7); color: white; max-height: 35vh; overflow-y: auto;",
                onclick: move |evt| evt.stop_propagation(),
                div { style: "display: flex; gap: 16px; align-items: center;",
                    button {
                        style: "padding: 10px 20px; background: #cc0044; color: white; border-radius: 8px; font-size: 16px; cursor: pointer; border: none;",
                        disabled: record.liked,
                        onclick: move |_| on_like.call(like_id.clone()),
                        "{like_label} ({record.like_count})"
                    }
                    button {
                        style: "padding: 10px 20px; background: #555; color: white; border-radius: 8px; font-size: 16px; cursor: pointer; border: none;",
                        onclick: move |_| on_download.call(download_id.clone()),
                        "Download"
                    }
                }
                if record.comments.is_empty() {
                    div { style: "color: #aaa; font-size: 14px;", "No comments yet" }
                } else {
                    ul { style: "margin: 0; padding-left: 18px; font-size: 14px;",
                        for (i, comment) in record.comments.iter().enumerate() {
                            li { key: "{i}", "{comment.text}" }
                        }
                    }
                }
                div { style: "display: flex; gap: 8px;",
                    input {
                        style: "flex: 1; padding: 8px; border-radius: 6px; border: 1px solid #666; background: #222; color: white;",
                        r#type: "text",
                        placeholder: "Write a comment...",
                        value: "{comment_draft}",
                        oninput: move |evt| on_comment_input.call(evt.value()),
                        onkeydown: move |evt: KeyboardEvent| {
                            let key = image_feed::Key::from_name(&evt.key().to_string());
                            if key.moves_caret() {
                                evt.stop_propagation();
                            }
                        },
                    }
                    button {
                        style: "padding: 8px 16px; background: #0066cc; color: white; border-radius: 6px; border: none; cursor: pointer;",
                        onclick: move |_| on_comment_submit.call(submit_draft.clone()),
                        "Send"
                    }
                }
            }
        }
    }
}
