//! Resource Loader
//!
//! `file:` URLs are read with `smol::fs`; `http(s):` requests go through
//! reqwest's blocking client on smol's blocking thread pool.

use std::collections::HashMap;
use std::time::Duration;

use url::Url;

use crate::{NetError, Response};

/// Default timeout for a single HTTP request
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// HTTP method
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Method {
    #[default]
    Get,
    Post,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
        }
    }
}

/// Request configuration
#[derive(Debug, Default, Clone)]
pub struct Request {
    pub method: Method,
    pub url: String,
    pub headers: HashMap<String, String>,
    pub body: Option<Vec<u8>>,
}

impl Request {
    pub fn get(url: &str) -> Self {
        Self {
            method: Method::Get,
            url: url.to_string(),
            ..Default::default()
        }
    }

    pub fn post(url: &str) -> Self {
        Self {
            method: Method::Post,
            url: url.to_string(),
            ..Default::default()
        }
    }

    pub fn with_header(mut self, key: &str, value: &str) -> Self {
        self.headers.insert(key.to_string(), value.to_string());
        self
    }

    pub fn with_body(mut self, body: Vec<u8>) -> Self {
        self.body = Some(body);
        self
    }

    pub fn with_json(self, json: &str) -> Self {
        self.with_header("Content-Type", "application/json")
            .with_body(json.as_bytes().to_vec())
    }
}

/// Load resources from disk or network
#[derive(Debug, Clone)]
pub struct ResourceLoader {
    user_agent: String,
    timeout: Duration,
}

impl ResourceLoader {
    pub fn new() -> Self {
        Self {
            user_agent: format!("bri11iant/{}", env!("CARGO_PKG_VERSION")),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn user_agent(&self) -> &str {
        &self.user_agent
    }

    /// Fetch a URL with GET
    pub async fn fetch(&self, url: &str) -> Result<Response, NetError> {
        self.request(Request::get(url)).await
    }

    /// Fetch a URL and decode it as UTF-8 text
    pub async fn fetch_text(&self, url: &str) -> Result<String, NetError> {
        self.fetch(url).await?.text()
    }

    /// Perform a request
    pub async fn request(&self, req: Request) -> Result<Response, NetError> {
        let parsed = Url::parse(&req.url).map_err(|e| NetError::InvalidUrl(format!("{}: {}", req.url, e)))?;

        match parsed.scheme() {
            "file" if req.method == Method::Get => self.read_file(&parsed).await,
            "http" | "https" => self.send(req).await,
            other => Err(NetError::UnsupportedScheme(other.to_string())),
        }
    }

    async fn read_file(&self, url: &Url) -> Result<Response, NetError> {
        let path = url
            .to_file_path()
            .map_err(|_| NetError::InvalidUrl(url.to_string()))?;
        tracing::debug!("Reading {}", path.display());

        let body = smol::fs::read(&path).await.map_err(|source| NetError::Io {
            path: path.display().to_string(),
            source,
        })?;

        let content_type = match path.extension().and_then(|e| e.to_str()) {
            Some("css") => Some("text/css".to_string()),
            Some("js" | "mjs") => Some("text/javascript".to_string()),
            Some("html" | "htm") => Some("text/html".to_string()),
            _ => None,
        };

        Ok(Response {
            status: 200,
            content_type,
            body,
        })
    }

    async fn send(&self, req: Request) -> Result<Response, NetError> {
        tracing::info!("HTTP {} {}", req.method.as_str(), req.url);

        let user_agent = self.user_agent.clone();
        let timeout = self.timeout;

        smol::unblock(move || {
            let client = reqwest::blocking::Client::builder()
                .user_agent(user_agent)
                .timeout(timeout)
                .build()
                .map_err(|e| NetError::Network(e.to_string()))?;

            let mut builder = match req.method {
                Method::Get => client.get(&req.url),
                Method::Post => client.post(&req.url),
            };
            for (key, value) in &req.headers {
                builder = builder.header(key.as_str(), value.as_str());
            }
            if let Some(body) = req.body {
                builder = builder.body(body);
            }

            let response = builder.send().map_err(|e| NetError::Network(e.to_string()))?;
            let status = response.status().as_u16();
            if !response.status().is_success() {
                return Err(NetError::HttpError { status });
            }

            let content_type = response
                .headers()
                .get("content-type")
                .and_then(|v| v.to_str().ok())
                .map(|s| s.to_string());

            let body = response
                .bytes()
                .map_err(|e| NetError::Network(e.to_string()))?
                .to_vec();

            Ok(Response {
                status,
                content_type,
                body,
            })
        })
        .await
    }
}

impl Default for ResourceLoader {
    fn default() -> Self {
        Self::new()
    }
}
