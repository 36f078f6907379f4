use dioxus::prelude::*;
use image_feed::UploadFile;

/// File picker that hands the selected images to the parent in one batch
#[component]
pub fn UploadBox(
    #[props(default)] uploading: bool,
    on_upload: EventHandler<Vec<UploadFile>>,
) -> Element {
    let mut selected = use_signal(Vec::<UploadFile>::new);

    let count = selected.read().len();
    let label = match (uploading, count) {
        (true, _) => "Uploading...".to_string(),
        (false, 0) => "Upload".to_string(),
        (false, 1) => "Upload 1 image".to_string(),
        (false, n) => format!("Upload {} images", n),
    };

    rsx! {
        div {
            style: "display: flex; gap: 12px; align-items: center; padding: 12px; margin-bottom: 16px; background: #f5f5f5; border-radius: 8px;",
            input {
                r#type: "file",
                accept: "image/*",
                multiple: true,
                disabled: uploading,
                onchange: move |evt: FormEvent| async move {
                    let mut files = Vec::new();
                    for file in evt.files() {
                        let name = file.name();
                        match file.read_bytes().await {
                            Ok(bytes) => {
                                let mut upload = UploadFile::new(name, bytes.to_vec());
                                upload.mime_type = file.content_type();
                                files.push(upload);
                            }
                            Err(e) => log::warn!("Could not read {}: {:?}", name, e),
                        }
                    }
                    log::debug!("{} file(s) selected for upload", files.len());
                    selected.set(files);
                },
            }
            button {
                style: "padding: 8px 20px; background: #0066cc; color: white; border-radius: 8px; border: none; font-size: 15px; cursor: pointer;",
                disabled: uploading,
                onclick: move |_| {
                    // Empty selections go through too so the feed can warn about them
                    let files = selected.take();
                    on_upload.call(files);
                },
                "{label}"
            }
        }
    }
}
