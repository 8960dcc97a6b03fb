//! Page source abstraction
//!
//! The fetcher talks to the web through the `PageSource` trait so tests can
//! swap in `MockPageSource` and assert on exactly which requests were made.

use std::collections::{HashMap, HashSet};
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;

use crate::error::{PitwallError, Result};

/// Request timeout for a single page fetch
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Browser User-Agent; the source site serves a reduced page to unknown agents
pub const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
     AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";

/// Something that can GET a URL and return the response body.
///
/// A non-success HTTP status is `Unavailable` (the page for that year does not
/// exist yet); transport failures are `Transport` and are never treated as
/// missing data.
#[async_trait]
pub trait PageSource: Send + Sync {
    async fn get(&self, url: &str) -> std::result::Result<String, PageError>;
}

/// Failure modes of a single page request
#[derive(Debug)]
pub enum PageError {
    /// Connection/timeout failure
    Transport(String),
    /// The server answered with a non-success status
    Unavailable(u16),
}

impl PageError {
    pub fn into_fetch_error(self, url: &str) -> PitwallError {
        match self {
            PageError::Transport(msg) => {
                PitwallError::Fetch(format!("request to {} failed: {}", url, msg))
            }
            PageError::Unavailable(status) => {
                PitwallError::Fetch(format!("{} answered with status {}", url, status))
            }
        }
    }
}

/// Live page source backed by reqwest
pub struct HttpPageSource {
    client: Client,
}

impl HttpPageSource {
    /// Build a client with a bounded timeout and browser User-Agent
    pub fn new(timeout: Duration, user_agent: Option<&str>) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(user_agent.unwrap_or(USER_AGENT))
            .build()
            .map_err(|e| PitwallError::Fetch(format!("failed to create HTTP client: {}", e)))?;

        Ok(Self { client })
    }
}

#[async_trait]
impl PageSource for HttpPageSource {
    async fn get(&self, url: &str) -> std::result::Result<String, PageError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| PageError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(PageError::Unavailable(status.as_u16()));
        }

        response
            .text()
            .await
            .map_err(|e| PageError::Transport(e.to_string()))
    }
}

/// In-memory page source for tests.
///
/// Maps URLs to canned bodies and counts every request so tests can assert
/// that the cache and validation paths issue no network calls.
#[derive(Default)]
pub struct MockPageSource {
    pages: Mutex<HashMap<String, String>>,
    broken: Mutex<HashSet<String>>,
    calls: Mutex<Vec<String>>,
}

impl MockPageSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a canned body for a URL
    pub fn insert(&self, url: impl Into<String>, body: impl Into<String>) {
        self.pages.lock().unwrap().insert(url.into(), body.into());
    }

    /// Make requests for this URL fail at the transport level
    pub fn fail_transport(&self, url: impl Into<String>) {
        self.broken.lock().unwrap().insert(url.into());
    }

    /// Number of requests made so far
    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    /// Every URL requested, in order
    pub fn requested_urls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl PageSource for MockPageSource {
    async fn get(&self, url: &str) -> std::result::Result<String, PageError> {
        self.calls.lock().unwrap().push(url.to_string());
        if self.broken.lock().unwrap().contains(url) {
            return Err(PageError::Transport("connection reset".to_string()));
        }
        match self.pages.lock().unwrap().get(url) {
            Some(body) => Ok(body.clone()),
            None => Err(PageError::Unavailable(404)),
        }
    }
}
