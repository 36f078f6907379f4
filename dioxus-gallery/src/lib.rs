use dioxus::prelude::*;
use image_feed::{ImageId, ImageRecord};

mod lightbox;
mod upload;

pub use lightbox::Lightbox;
pub use upload::UploadBox;

/// A grid of feed images with like, download and zoom actions
///
/// This component only renders; every action is delegated to the parent via
/// callbacks.
///
/// # Example
/// ```rust,ignore
/// Gallery {
///     images: feed.read().images().to_vec(),
///     has_more: feed.read().has_more_pages(),
///     loading: feed.read().is_fetching(),
///     on_open: move |index| dispatch(Command::OpenAt(index)),
///     on_like: move |id| dispatch(Command::LikeImage(id)),
///     on_download: move |id| dispatch(Command::Download(id)),
///     on_load_more: move |_| dispatch(Command::LoadMore),
/// }
/// ```
#[component]
pub fn Gallery(
    images: Vec<ImageRecord>,
    #[props(default)] has_more: bool,
    #[props(default)] loading: bool,
    on_open: EventHandler<usize>,
    on_like: EventHandler<ImageId>,
    on_download: EventHandler<ImageId>,
    on_load_more: EventHandler<()>,
) -> Element {
    if images.is_empty() {
        return rsx! {
            div {
                style: "padding: 24px; text-align: center; background: #f5f5f5; border-radius: 8px; color: #999;",
                if loading { "Loading images..." } else { "No images uploaded yet" }
            }
        };
    }

    rsx! {
        div {
            style: "display: grid; grid-template-columns: repeat(auto-fill, minmax(180px, 1fr)); gap: 12px;",
            for (index, image) in images.into_iter().enumerate() {
                ImageCard {
                    key: "{image.id}",
                    image,
                    index,
                    on_open,
                    on_like,
                    on_download,
                }
            }
        }
        if has_more {
            div { style: "display: flex; justify-content: center; padding: 16px;",
                button {
                    style: "padding: 10px 24px; background: #0066cc; color: white; border-radius: 8px; border: none; font-size: 15px; cursor: pointer;",
                    disabled: loading,
                    onclick: move |_| on_load_more.call(()),
                    if loading { "Loading..." } else { "Load more" }
                }
            }
        }
    }
}

/// A single image card in the grid
#[component]
fn ImageCard(
    image: ImageRecord,
    index: usize,
    on_open: EventHandler<usize>,
    on_like: EventHandler<ImageId>,
    on_download: EventHandler<ImageId>,
) -> Element {
    let like_label = if image.liked { "♥" } else { "♡" };
    let like_color = if image.liked { "#cc0044" } else { "#333" };
    let comment_count = image.comments.len();
    let like_id = image.id.clone();
    let download_id = image.id.clone();

    rsx! {
        div {
            style: "border-radius: 8px; overflow: hidden; border: 1px solid #e0e0e0; background: white;",
            img {
                src: "{image.url}",
                alt: "upload-{index}",
                style: "width: 100%; height: 180px; object-fit: cover; cursor: pointer; display: block;",
                onclick: move |_| on_open.call(index),
            }
            div {
                style: "display: flex; align-items: center; gap: 8px; padding: 8px;",
                button {
                    style: "background: none; border: none; font-size: 18px; cursor: pointer; color: {like_color};",
                    disabled: image.liked,
                    onclick: move |_| on_like.call(like_id.clone()),
                    "{like_label} {image.like_count}"
                }
                span { style: "color: #666; font-size: 14px;", "💬 {comment_count}" }
                div { style: "flex: 1;" }
                button {
                    style: "padding: 4px 10px; background: #e0e0e0; border-radius: 6px; border: none; cursor: pointer;",
                    onclick: move |_| on_download.call(download_id.clone()),
                    "Download"
                }
                button {
                    style: "padding: 4px 10px; background: #e0e0e0; border-radius: 6px; border: none; cursor: pointer;",
                    onclick: move |_| on_open.call(index),
                    "Zoom"
                }
            }
        }
    }
}

/// Dismissible error banner, e.g. for failed page fetches
#[component]
pub fn ErrorBanner(
    message: String,
    #[props(default)] can_retry: bool,
    on_retry: EventHandler<()>,
    on_dismiss: EventHandler<()>,
) -> Element {
    rsx! {
        div {
            style: "display: flex; align-items: center; gap: 12px; background: #fee; border: 1px solid #fcc; color: #c33; padding: 12px; margin-bottom: 16px; border-radius: 8px; font-size: 14px;",
            span { style: "flex: 1;", "⚠️ {message}" }
            if can_retry {
                button {
                    style: "padding: 6px 12px; background: #c33; color: white; border-radius: 6px; border: none; cursor: pointer;",
                    onclick: move |_| on_retry.call(()),
                    "Retry"
                }
            }
            button {
                style: "background: none; border: none; color: #c33; font-size: 18px; cursor: pointer;",
                onclick: move |_| on_dismiss.call(()),
                "×"
            }
        }
    }
}
