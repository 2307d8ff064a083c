use std::time::Duration;

use reqwest::Client;
use serde::Deserialize;
use url::Url;

use crate::core::{ScreenerError, net};
use crate::index::{IndexConfig, table};

/// English Wikipedia's MediaWiki action API.
const DEFAULT_WIKI_API: &str = "https://en.wikipedia.org/w/api.php";

/// Wikipedia asks API clients to identify themselves.
const WIKI_USER_AGENT: &str = concat!(
    "dividend-screener/",
    env!("CARGO_PKG_VERSION"),
    " (index constituent lookup)"
);

#[derive(Deserialize)]
struct QueryEnvelope {
    query: Option<QueryNode>,
}

#[derive(Deserialize)]
struct QueryNode {
    #[serde(default)]
    pages: Vec<PageNode>,
}

#[derive(Deserialize)]
struct PageNode {
    #[serde(default)]
    missing: bool,
    #[serde(default)]
    invalid: bool,
    fullurl: Option<String>,
}

/// Turns an index ticker into its constituent symbols using the configured mapping and
/// the index's Wikipedia page.
#[derive(Debug, Clone)]
pub struct IndexResolver {
    http: Client,
    api_base: Url,
    config: IndexConfig,
}

impl IndexResolver {
    /// Create a new builder.
    pub fn builder(config: IndexConfig) -> IndexResolverBuilder {
        IndexResolverBuilder {
            config,
            api_base: None,
            user_agent: None,
            timeout: None,
        }
    }

    #[must_use]
    pub const fn config(&self) -> &IndexConfig {
        &self.config
    }

    /// Resolves `ticker` end to end: mapping, page URL, then the page's symbol table.
    ///
    /// # Errors
    ///
    /// Returns [`ScreenerError::IndexNotFound`] for unmapped tickers and missing pages,
    /// [`ScreenerError::SymbolColumnNotFound`] when the page has no symbol table, and
    /// transport errors otherwise.
    #[tracing::instrument(skip(self), err)]
    pub async fn resolve(&self, ticker: &str) -> Result<Vec<String>, ScreenerError> {
        let title = self
            .config
            .page_title(ticker)
            .ok_or_else(|| ScreenerError::IndexNotFound(ticker.to_string()))?;
        let url = self.page_url(title).await?;
        let symbols = self.fetch_symbols(&url).await?;
        tracing::info!(ticker, %url, count = symbols.len(), "resolved index constituents");
        Ok(symbols)
    }

    /// Looks up the canonical URL of the page titled `title`, following redirects.
    ///
    /// # Errors
    ///
    /// Returns [`ScreenerError::IndexNotFound`] if the page does not exist.
    pub async fn page_url(&self, title: &str) -> Result<Url, ScreenerError> {
        let mut url = self.api_base.clone();
        url.query_pairs_mut()
            .append_pair("action", "query")
            .append_pair("format", "json")
            .append_pair("formatversion", "2")
            .append_pair("prop", "info")
            .append_pair("inprop", "url")
            .append_pair("redirects", "1")
            .append_pair("titles", title);

        let resp = net::ensure_success(self.http.get(url).send().await?)?;
        let text = net::get_text(resp, "wiki_query", title).await?;
        let env: QueryEnvelope = serde_json::from_str(&text)
            .map_err(|e| ScreenerError::Data(format!("wiki query json parse: {e}")))?;

        let page = env
            .query
            .and_then(|q| q.pages.into_iter().next())
            .filter(|p| !p.missing && !p.invalid)
            .ok_or_else(|| ScreenerError::IndexNotFound(title.to_string()))?;

        let full = page
            .fullurl
            .ok_or_else(|| ScreenerError::Data("wiki page has no fullurl".into()))?;
        Ok(Url::parse(&full)?)
    }

    /// Downloads `url` and extracts the symbol column of its first qualifying table.
    ///
    /// # Errors
    ///
    /// Returns [`ScreenerError::SymbolColumnNotFound`] if no table qualifies, or a
    /// transport/status error if the page cannot be fetched.
    pub async fn fetch_symbols(&self, url: &Url) -> Result<Vec<String>, ScreenerError> {
        let resp = net::ensure_success(self.http.get(url.clone()).send().await?)?;
        let html = net::get_text(resp, "wiki_page", url.path()).await?;
        table::extract_symbols(&html)
    }
}

pub struct IndexResolverBuilder {
    config: IndexConfig,
    api_base: Option<Url>,
    user_agent: Option<String>,
    timeout: Option<Duration>,
}

impl IndexResolverBuilder {
    /// Override the MediaWiki API endpoint (e.g., `https://en.wikipedia.org/w/api.php`).
    #[must_use]
    pub fn api_base(mut self, url: Url) -> Self {
        self.api_base = Some(url);
        self
    }

    /// Override the User-Agent.
    #[must_use]
    pub fn user_agent(mut self, ua: impl Into<String>) -> Self {
        self.user_agent = Some(ua.into());
        self
    }

    /// Set a global request timeout (overall). Default: none.
    #[must_use]
    pub const fn timeout(mut self, dur: Duration) -> Self {
        self.timeout = Some(dur);
        self
    }

    /// Builds the resolver.
    ///
    /// # Errors
    ///
    /// Returns an error if the default URL fails to parse or the HTTP client cannot be built.
    pub fn build(self) -> Result<IndexResolver, ScreenerError> {
        let api_base = match self.api_base {
            Some(u) => u,
            None => Url::parse(DEFAULT_WIKI_API)?,
        };

        let mut httpb =
            Client::builder().user_agent(self.user_agent.as_deref().unwrap_or(WIKI_USER_AGENT));
        if let Some(t) = self.timeout {
            httpb = httpb.timeout(t);
        }

        Ok(IndexResolver {
            http: httpb.build()?,
            api_base,
            config: self.config,
        })
    }
}
