//! Stylesheet retrieval.
//!
//! The inliner only needs "URL in, CSS text out". `HttpFetcher` does that over
//! `reqwest`; `StaticFetcher` serves stylesheets the host already holds (a
//! browser cache dump, a test fixture) and reports everything else as 404.

use std::collections::HashMap;
use std::future::Future;

use reqwest::Client;

use crate::error::Error;
use crate::options::Options;

/// Failure to retrieve one stylesheet.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FetchError {
    /// The server answered with a non-2xx status.
    #[error("Failed to load stylesheet: {url} (status {status})")]
    Status {
        /// Requested URL.
        url: String,
        /// HTTP status code.
        status: u16,
    },

    /// The request never produced a usable response.
    #[error("Failed to load stylesheet: {url} ({message})")]
    Transport {
        /// Requested URL.
        url: String,
        /// Underlying transport error.
        message: String,
    },
}

impl FetchError {
    /// URL the failed request was for.
    #[must_use]
    pub fn url(&self) -> &str {
        match self {
            Self::Status { url, .. } | Self::Transport { url, .. } => url,
        }
    }
}

impl From<FetchError> for Error {
    fn from(err: FetchError) -> Self {
        let message = err.to_string();
        Self::Fetch {
            url: err.url().to_string(),
            message,
        }
    }
}

/// Source of stylesheet text.
pub trait StylesheetFetcher {
    /// Fetch the stylesheet at an absolute URL.
    ///
    /// Non-2xx responses are errors; the body of an error page is never
    /// returned as CSS.
    fn fetch(&self, url: &str) -> impl Future<Output = Result<String, FetchError>> + Send;
}

/// `reqwest`-backed fetcher.
#[derive(Debug, Clone, Default)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    /// Fetcher with reqwest's default client (no timeout).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Wrap an already configured client.
    #[must_use]
    pub fn with_client(client: Client) -> Self {
        Self { client }
    }

    /// Build a client honoring `fetch_timeout` and `user_agent`.
    pub fn from_options(options: &Options) -> Result<Self, Error> {
        let mut builder = Client::builder();
        if let Some(timeout) = options.fetch_timeout {
            builder = builder.timeout(timeout);
        }
        if let Some(user_agent) = &options.user_agent {
            builder = builder.user_agent(user_agent.clone());
        }

        let client = builder.build().map_err(|e| Error::Fetch {
            url: String::new(),
            message: format!("HTTP client setup failed: {e}"),
        })?;

        Ok(Self { client })
    }
}

impl StylesheetFetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<String, FetchError> {
        let transport = |e: reqwest::Error| FetchError::Transport {
            url: url.to_string(),
            message: e.to_string(),
        };

        let response = self.client.get(url).send().await.map_err(transport)?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        response.text().await.map_err(transport)
    }
}

/// Fetcher over an in-memory URL → CSS map.
#[derive(Debug, Clone, Default)]
pub struct StaticFetcher {
    sheets: HashMap<String, String>,
}

impl StaticFetcher {
    /// Empty fetcher: every request fails with status 404.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register stylesheet text for a URL.
    #[must_use]
    pub fn with(mut self, url: impl Into<String>, css: impl Into<String>) -> Self {
        self.sheets.insert(url.into(), css.into());
        self
    }
}

impl StylesheetFetcher for StaticFetcher {
    async fn fetch(&self, url: &str) -> Result<String, FetchError> {
        self.sheets.get(url).cloned().ok_or_else(|| FetchError::Status {
            url: url.to_string(),
            status: 404,
        })
    }
}
