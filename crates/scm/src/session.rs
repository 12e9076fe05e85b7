//! Authenticated connection to an SCM server.

use std::fmt;
use std::time::Duration;

use reqwest::Client;

use crate::error::ScmError;

/// Default timeout for API requests.
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Base URL, access token and HTTP client for one SCM server.
///
/// Capability services hold no state of their own; every call receives the
/// session it should use.
#[derive(Clone)]
pub struct ScmSession {
    base_url: String,
    token: String,
    http: Client,
}

impl ScmSession {
    /// Create a session for `base_url` (e.g. `https://gitlab.example.com`).
    ///
    /// # Errors
    /// Returns error if HTTP client cannot be created.
    pub fn new(base_url: impl Into<String>, token: impl Into<String>) -> Result<Self, ScmError> {
        let http = Client::builder()
            .timeout(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
            .user_agent(concat!("scm/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self::with_client(base_url, token, http))
    }

    /// Create a session that reuses an existing HTTP client.
    pub fn with_client(base_url: impl Into<String>, token: impl Into<String>, http: Client) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            base_url,
            token: token.into(),
            http,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn token(&self) -> &str {
        &self.token
    }

    pub(crate) fn http(&self) -> &Client {
        &self.http
    }
}

impl fmt::Debug for ScmSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScmSession")
            .field("base_url", &self.base_url)
            .field("token", &"[REDACTED]")
            .finish_non_exhaustive()
    }
}
