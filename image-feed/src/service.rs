//! Image Service client
//!
//! The feed talks to the backend only through the [`ImageService`] trait.
//! [`HttpImageService`] is the REST implementation:
//!
//! - `GET  /images?page=N`  -> `{ images, currentPage, totalPages }`
//! - `POST /upload`         -> `{ images }` or `{ url: string | string[] }`
//! - `POST /like/:id`       -> `{ success, error? }`
//! - `POST /comment/:id`    -> `{ success, error? }` (JSON body `{ text }`)

use crate::config::ServiceConfig;
use crate::error::{FeedError, FeedResult};
use crate::models::{FeedPage, ImageId, ImageRecord, UploadFile};
use reqwest::Url;
use serde::{Deserialize, Serialize};

/// Backend operations used by the feed
#[allow(async_fn_in_trait)]
pub trait ImageService {
    /// Fetch one page (1-based)
    async fn fetch_page(&self, page: u32) -> FeedResult<FeedPage>;

    /// Confirm a like. `Err(FeedError::Rejected)` when the service refuses it.
    async fn like(&self, id: &ImageId) -> FeedResult<()>;

    /// Submit a comment
    async fn comment(&self, id: &ImageId, text: &str) -> FeedResult<()>;

    /// Upload files, returning the records the service created for them
    async fn upload(&self, files: Vec<UploadFile>) -> FeedResult<Vec<ImageRecord>>;
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct PageResponse {
    images: Vec<ImageRecord>,
    #[serde(default)]
    current_page: Option<u32>,
    #[serde(default)]
    total_pages: Option<u32>,
}

#[derive(Deserialize)]
struct MutationResponse {
    success: bool,
    #[serde(default)]
    error: Option<String>,
}

#[derive(Deserialize)]
struct UploadResponse {
    #[serde(default)]
    images: Option<Vec<ImageRecord>>,
    #[serde(default)]
    url: Option<OneOrMany>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum OneOrMany {
    One(String),
    Many(Vec<String>),
}

#[derive(Serialize)]
struct CommentRequest<'a> {
    text: &'a str,
}

/// Parse a `GET /images` body
///
/// `images` must be present and a sequence. Missing pagination fields mean a
/// single, unpaginated page.
pub fn parse_page(body: &str, requested_page: u32) -> FeedResult<FeedPage> {
    let response: PageResponse = serde_json::from_str(body)?;
    let page_number = response.current_page.unwrap_or(requested_page);
    let total_pages = response.total_pages.unwrap_or(page_number);

    Ok(FeedPage {
        records: response.images,
        page_number,
        total_pages,
    })
}

/// Parse a `{ success, error? }` body
pub fn parse_mutation(body: &str) -> FeedResult<()> {
    let response: MutationResponse = serde_json::from_str(body)?;
    if response.success {
        Ok(())
    } else {
        Err(FeedError::Rejected(
            response
                .error
                .unwrap_or_else(|| "The request was rejected".to_string()),
        ))
    }
}

/// Parse a `POST /upload` body in either of its forms
pub fn parse_upload(body: &str) -> FeedResult<Vec<ImageRecord>> {
    let response: UploadResponse = serde_json::from_str(body)?;

    let records = match (response.images, response.url) {
        (Some(images), _) if !images.is_empty() => images,
        (_, Some(OneOrMany::One(url))) => vec![ImageRecord::from_url(url)],
        (_, Some(OneOrMany::Many(urls))) => urls.into_iter().map(ImageRecord::from_url).collect(),
        _ => Vec::new(),
    };

    if records.is_empty() {
        return Err(FeedError::Rejected(
            "Upload failed: No URL returned".to_string(),
        ));
    }
    Ok(records)
}

/// REST client for the Image Service
#[derive(Debug, Clone)]
pub struct HttpImageService {
    base_url: Url,
    client: reqwest::Client,
}

impl HttpImageService {
    pub fn new(config: &ServiceConfig) -> FeedResult<Self> {
        let base_url = Url::parse(&config.base_url).map_err(|e| {
            FeedError::Validation(format!("Invalid base URL '{}': {}", config.base_url, e))
        })?;

        let mut builder = reqwest::Client::builder()
            .connect_timeout(std::time::Duration::from_secs(config.connect_timeout_secs))
            .tcp_keepalive(std::time::Duration::from_secs(30))
            .user_agent(config.user_agent.clone());
        if let Some(secs) = config.request_timeout_secs {
            builder = builder.timeout(std::time::Duration::from_secs(secs));
        }
        let client = builder
            .build()
            .map_err(|e| FeedError::NetworkError(format!("Client build failed: {}", e)))?;

        Ok(Self { base_url, client })
    }

    /// Appends path segments to the base URL, percent-encoding each one
    fn endpoint(&self, segments: &[&str]) -> FeedResult<Url> {
        let mut url = self.base_url.clone();
        {
            let mut path = url.path_segments_mut().map_err(|_| {
                FeedError::Validation(format!("Base URL cannot be a base: {}", self.base_url))
            })?;
            path.pop_if_empty();
            for segment in segments {
                path.push(segment);
            }
        }
        Ok(url)
    }

    /// Returns the body text of a successful response, or the status error
    async fn read_body(response: reqwest::Response) -> FeedResult<String> {
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(FeedError::HttpStatus {
                status: status.as_u16(),
                body,
            });
        }
        Ok(response.text().await?)
    }
}

impl ImageService for HttpImageService {
    async fn fetch_page(&self, page: u32) -> FeedResult<FeedPage> {
        let url = self.endpoint(&["images"])?;
        log::debug!("GET {} page={}", url, page);

        let response = self.client.get(url).query(&[("page", page)]).send().await?;
        let body = Self::read_body(response).await?;
        parse_page(&body, page)
    }

    async fn like(&self, id: &ImageId) -> FeedResult<()> {
        let url = self.endpoint(&["like", id.as_str()])?;
        log::debug!("POST {}", url);

        let response = self.client.post(url).send().await?;
        let body = Self::read_body(response).await?;
        parse_mutation(&body)
    }

    async fn comment(&self, id: &ImageId, text: &str) -> FeedResult<()> {
        let url = self.endpoint(&["comment", id.as_str()])?;
        log::debug!("POST {}", url);

        let response = self
            .client
            .post(url)
            .json(&CommentRequest { text })
            .send()
            .await?;
        let body = Self::read_body(response).await?;
        parse_mutation(&body)
    }

    async fn upload(&self, files: Vec<UploadFile>) -> FeedResult<Vec<ImageRecord>> {
        let url = self.endpoint(&["upload"])?;
        log::info!("Uploading {} file(s) to {}", files.len(), url);

        let mut form = reqwest::multipart::Form::new();
        for file in files {
            let mut part = reqwest::multipart::Part::bytes(file.bytes).file_name(file.file_name);
            if let Some(mime) = &file.mime_type {
                part = part.mime_str(mime)?;
            }
            form = form.part("image", part);
        }

        let response = self.client.post(url).multipart(form).send().await?;
        let body = Self::read_body(response).await?;
        parse_upload(&body)
    }
}
