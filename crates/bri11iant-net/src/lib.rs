//! bri11iant Networking
//!
//! Loads the stylesheets and scripts a document links to, from disk or over
//! HTTP, and carries outbound requests such as telemetry posts.

pub mod loader;

pub use loader::{Method, Request, ResourceLoader};
pub use url::Url;

/// Fetch a URL with a default loader
pub async fn fetch(url: &str) -> Result<Response, NetError> {
    ResourceLoader::new().fetch(url).await
}

/// Fetched resource
#[derive(Debug, Clone)]
pub struct Response {
    pub status: u16,
    pub content_type: Option<String>,
    pub body: Vec<u8>,
}

impl Response {
    /// Body decoded as UTF-8
    pub fn text(&self) -> Result<String, NetError> {
        String::from_utf8(self.body.clone()).map_err(|e| NetError::InvalidEncoding(e.to_string()))
    }

    /// Body decoded as JSON
    pub fn json<T: serde::de::DeserializeOwned>(&self) -> Result<T, NetError> {
        serde_json::from_slice(&self.body).map_err(|e| NetError::InvalidEncoding(e.to_string()))
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Network error
#[derive(Debug, thiserror::Error)]
pub enum NetError {
    #[error("HTTP error: {status}")]
    HttpError { status: u16 },

    #[error("Network error: {0}")]
    Network(String),

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("Unsupported URL scheme: {0}")]
    UnsupportedScheme(String),

    #[error("Failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid encoding: {0}")]
    InvalidEncoding(String),
}
