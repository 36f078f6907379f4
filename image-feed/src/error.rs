/// Result type for feed operations
pub type FeedResult<T> = Result<T, FeedError>;

/// Errors that can occur while talking to the Image Service or saving files
#[derive(Debug)]
pub enum FeedError {
    /// Transport failure (connection refused, DNS, TLS, ...)
    NetworkError(String),
    /// Non-success HTTP status, with the response body if any
    HttpStatus { status: u16, body: String },
    /// Response body was not the expected JSON shape
    MalformedResponse(String),
    /// The service answered `success: false`
    Rejected(String),
    /// Input rejected before any request was made
    Validation(String),
    IoError(std::io::Error),
}

impl std::fmt::Display for FeedError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FeedError::NetworkError(msg) => write!(f, "Network error: {}", msg),
            FeedError::HttpStatus { status, body } if body.is_empty() => {
                write!(f, "Server returned status: {}", status)
            }
            FeedError::HttpStatus { status, body } => {
                write!(f, "Server returned status {}: {}", status, body)
            }
            FeedError::MalformedResponse(msg) => write!(f, "Malformed response: {}", msg),
            FeedError::Rejected(msg) => write!(f, "Rejected: {}", msg),
            FeedError::Validation(msg) => write!(f, "Validation error: {}", msg),
            FeedError::IoError(e) => write!(f, "IO error: {}", e),
        }
    }
}

impl std::error::Error for FeedError {}

impl From<reqwest::Error> for FeedError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            FeedError::MalformedResponse(err.to_string())
        } else {
            FeedError::NetworkError(err.to_string())
        }
    }
}

impl From<serde_json::Error> for FeedError {
    fn from(err: serde_json::Error) -> Self {
        FeedError::MalformedResponse(err.to_string())
    }
}

impl From<std::io::Error> for FeedError {
    fn from(err: std::io::Error) -> Self {
        FeedError::IoError(err)
    }
}

impl FeedError {
    /// Short text suitable for a banner or alert
    pub fn user_message(&self) -> String {
        match self {
            FeedError::NetworkError(_) => {
                "Could not reach the image server. Please try again.".to_string()
            }
            FeedError::HttpStatus { status, body } if body.is_empty() => {
                format!("The image server answered with status {}.", status)
            }
            FeedError::HttpStatus { body, .. } => body.clone(),
            FeedError::MalformedResponse(_) => {
                "The image server sent an unexpected response.".to_string()
            }
            FeedError::Rejected(msg) => msg.clone(),
            FeedError::Validation(msg) => msg.clone(),
            FeedError::IoError(e) => format!("Could not save the file: {}", e),
        }
    }
}
