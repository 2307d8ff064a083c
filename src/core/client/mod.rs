//! Public client surface + builder.
//! Internals are split into `auth` (cookie/crumb), `retry` (request retry policy)
//! and `constants` (UA + defaults).

mod auth;
mod constants;
mod retry;

pub use retry::{Backoff, RetryConfig};

use crate::core::ScreenerError;
use constants::{DEFAULT_BASE_QUOTE_API, DEFAULT_COOKIE_URL, DEFAULT_CRUMB_URL, USER_AGENT};
use reqwest::Client;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{Mutex, RwLock};
use url::Url;

#[derive(Debug, Default)]
struct ClientState {
    cookie: Option<String>,
    crumb: Option<String>,
}

/// Yahoo Finance client: a configured HTTP client, base URLs, and shared credentials.
///
/// Cloning is cheap and clones share the cookie/crumb, so one handshake serves every
/// concurrent lookup of a batch.
#[derive(Debug, Clone)]
pub struct YfClient {
    http: Client,
    base_quote_api: Url,
    cookie_url: Url,
    crumb_url: Url,
    retry: RetryConfig,

    state: Arc<RwLock<ClientState>>,
    credential_fetch_lock: Arc<Mutex<()>>,
}

impl YfClient {
    /// Create a new builder.
    pub fn builder() -> YfClientBuilder {
        YfClientBuilder::default()
    }

    /* -------- internal getters used by other modules -------- */

    pub(crate) fn http(&self) -> &Client {
        &self.http
    }
    pub(crate) fn base_quote_api(&self) -> &Url {
        &self.base_quote_api
    }
}

/* ----------------------- Builder ----------------------- */

#[derive(Default)]
pub struct YfClientBuilder {
    user_agent: Option<String>,
    base_quote_api: Option<Url>,
    cookie_url: Option<Url>,
    crumb_url: Option<Url>,
    retry: Option<RetryConfig>,

    timeout: Option<Duration>,
    connect_timeout: Option<Duration>,
}

impl YfClientBuilder {
    /// Override the User-Agent.
    #[must_use]
    pub fn user_agent(mut self, ua: impl Into<String>) -> Self {
        self.user_agent = Some(ua.into());
        self
    }

    /// Override the quoteSummary API base (e.g., `https://query1.finance.yahoo.com/v10/finance/quoteSummary/`).
    #[must_use]
    pub fn base_quote_api(mut self, url: Url) -> Self {
        self.base_quote_api = Some(url);
        self
    }

    /// Override the cookie bootstrap URL.
    #[must_use]
    pub fn cookie_url(mut self, url: Url) -> Self {
        self.cookie_url = Some(url);
        self
    }

    /// Override the crumb URL.
    #[must_use]
    pub fn crumb_url(mut self, url: Url) -> Self {
        self.crumb_url = Some(url);
        self
    }

    /// Override the default retry policy.
    #[must_use]
    pub fn retry_config(mut self, cfg: RetryConfig) -> Self {
        self.retry = Some(cfg);
        self
    }

    /// Set a global request timeout (overall). Default: none.
    #[must_use]
    pub const fn timeout(mut self, dur: Duration) -> Self {
        self.timeout = Some(dur);
        self
    }

    /// Set a connect timeout. Default: none.
    #[must_use]
    pub const fn connect_timeout(mut self, dur: Duration) -> Self {
        self.connect_timeout = Some(dur);
        self
    }

    /// Builds the client.
    ///
    /// # Errors
    ///
    /// Returns an error if a default URL fails to parse or the HTTP client cannot be built.
    pub fn build(self) -> Result<YfClient, ScreenerError> {
        let base_quote_api = match self.base_quote_api {
            Some(u) => u,
            None => Url::parse(DEFAULT_BASE_QUOTE_API)?,
        };
        let cookie_url = match self.cookie_url {
            Some(u) => u,
            None => Url::parse(DEFAULT_COOKIE_URL)?,
        };
        let crumb_url = match self.crumb_url {
            Some(u) => u,
            None => Url::parse(DEFAULT_CRUMB_URL)?,
        };

        let mut httpb = reqwest::Client::builder()
            .user_agent(self.user_agent.as_deref().unwrap_or(USER_AGENT))
            .cookie_store(true);

        if let Some(t) = self.timeout {
            httpb = httpb.timeout(t);
        }
        if let Some(ct) = self.connect_timeout {
            httpb = httpb.connect_timeout(ct);
        }

        let http = httpb.build()?;

        Ok(YfClient {
            http,
            base_quote_api,
            cookie_url,
            crumb_url,
            retry: self.retry.unwrap_or_default(),
            state: Arc::new(RwLock::new(ClientState::default())),
            credential_fetch_lock: Arc::new(Mutex::new(())),
        })
    }
}
