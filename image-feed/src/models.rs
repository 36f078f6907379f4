use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque identifier of an image record
///
/// The Image Service may send ids as strings or numbers (or as `_id`);
/// both are normalized to their string form.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ImageId(String);

impl ImageId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ImageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ImageId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for ImageId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// A single comment on an image
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Comment {
    pub text: String,
}

impl Comment {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

/// An image shown in the feed
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(from = "WireImage", rename_all = "camelCase")]
pub struct ImageRecord {
    pub id: ImageId,
    pub url: String,
    pub like_count: u32,
    /// Local-only: set once the user liked this image in the current session
    #[serde(skip)]
    pub liked: bool,
    pub comments: Vec<Comment>,
}

impl ImageRecord {
    pub fn new(id: impl Into<ImageId>, url: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            url: url.into(),
            like_count: 0,
            liked: false,
            comments: Vec::new(),
        }
    }

    /// Record for a bare URL (older backends return plain URL lists)
    pub fn from_url(url: impl Into<String>) -> Self {
        let url = url.into();
        Self::new(url.clone(), url)
    }

    pub fn with_like_count(mut self, like_count: u32) -> Self {
        self.like_count = like_count;
        self
    }
}

/// Accepted wire forms of an image record
#[derive(Deserialize)]
#[serde(untagged)]
enum WireImage {
    Url(String),
    Record(WireRecord),
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct WireRecord {
    #[serde(default, alias = "_id")]
    id: Option<WireId>,
    url: String,
    #[serde(default, alias = "likes")]
    like_count: u32,
    #[serde(default)]
    comments: Vec<Comment>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum WireId {
    Text(String),
    Number(serde_json::Number),
}

impl From<WireImage> for ImageRecord {
    fn from(wire: WireImage) -> Self {
        match wire {
            WireImage::Url(url) => ImageRecord::from_url(url),
            WireImage::Record(r) => {
                let id = match r.id {
                    Some(WireId::Text(s)) => ImageId(s),
                    Some(WireId::Number(n)) => ImageId(n.to_string()),
                    // Without an id the URL is the only stable key
                    None => ImageId(r.url.clone()),
                };
                ImageRecord {
                    id,
                    url: r.url,
                    like_count: r.like_count,
                    liked: false,
                    comments: r.comments,
                }
            }
        }
    }
}

/// One page of the feed as returned by the Image Service
#[derive(Debug, Clone, PartialEq)]
pub struct FeedPage {
    pub records: Vec<ImageRecord>,
    /// 1-based page number
    pub page_number: u32,
    pub total_pages: u32,
}

/// How a fetched page is applied to the loaded images
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchMode {
    Replace,
    Append,
}

/// A file picked for upload
#[derive(Debug, Clone, PartialEq)]
pub struct UploadFile {
    pub file_name: String,
    pub mime_type: Option<String>,
    pub bytes: Vec<u8>,
}

impl UploadFile {
    pub fn new(file_name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            file_name: file_name.into(),
            mime_type: None,
            bytes,
        }
    }
}
