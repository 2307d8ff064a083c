//! Cookie & crumb acquisition for Yahoo endpoints.
//!
//! A batch shares one client, so the handshake below runs once per client and every
//! concurrent lookup reuses its crumb.

use crate::core::error::ScreenerError;
use reqwest::header::SET_COOKIE;

impl super::YfClient {
    pub(crate) async fn ensure_credentials(&self) -> Result<(), ScreenerError> {
        // Fast path: check if a crumb exists with a read lock.
        if self.state.read().await.crumb.is_some() {
            return Ok(());
        }

        // Slow path: the fetch lock admits one handshake at a time.
        let _guard = self.credential_fetch_lock.lock().await;

        // Double-check: a sibling lookup may have completed the handshake while we waited.
        if self.state.read().await.crumb.is_some() {
            return Ok(());
        }

        tracing::debug!(cookie_url = %self.cookie_url, "acquiring yahoo cookie and crumb");
        self.fetch_cookie().await?;
        self.fetch_crumb().await
    }

    /// Drops the crumb so the next `ensure_credentials` repeats the handshake.
    pub(crate) async fn clear_crumb(&self) {
        self.state.write().await.crumb = None;
    }

    pub(crate) async fn crumb(&self) -> Option<String> {
        self.state.read().await.crumb.clone()
    }

    async fn fetch_cookie(&self) -> Result<(), ScreenerError> {
        let req = self.http.get(self.cookie_url.clone());
        let resp = self.send_with_retry(req, None).await?;

        let cookie = resp
            .headers()
            .get(SET_COOKIE)
            .ok_or_else(|| {
                ScreenerError::Auth(format!("no cookie received from {}", self.cookie_url))
            })?
            .to_str()
            .map_err(|_| ScreenerError::Auth("invalid cookie header format".into()))?
            .to_string();

        self.state.write().await.cookie = Some(cookie);
        Ok(())
    }

    async fn fetch_crumb(&self) -> Result<(), ScreenerError> {
        if self.state.read().await.cookie.is_none() {
            return Err(ScreenerError::Auth("cookie is missing, cannot get crumb".into()));
        }

        let req = self.http.get(self.crumb_url.clone());
        let resp = self.send_with_retry(req, None).await?;
        let status = resp.status();
        if !status.is_success() {
            return Err(ScreenerError::Auth(format!(
                "crumb endpoint answered {}",
                status.as_u16()
            )));
        }

        let body = resp.text().await?;
        let crumb = body.trim();
        // An HTML consent page or a JSON error body means no usable crumb.
        if crumb.is_empty() || crumb.contains('{') || crumb.contains('<') {
            return Err(ScreenerError::Auth(format!("received invalid crumb: {crumb}")));
        }

        self.state.write().await.crumb = Some(crumb.to_string());
        Ok(())
    }
}
