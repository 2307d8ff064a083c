use crate::core::ScreenerError;

/// Read the response body as text, logging its size against the endpoint that produced it.
pub(crate) async fn get_text(
    resp: reqwest::Response,
    endpoint: &str,
    symbol: &str,
) -> Result<String, ScreenerError> {
    let text = resp.text().await?;
    tracing::trace!(endpoint, symbol, bytes = text.len(), "response body read");
    Ok(text)
}

/// Map a non-success status into [`ScreenerError::Status`], passing successful responses through.
pub(crate) fn ensure_success(resp: reqwest::Response) -> Result<reqwest::Response, ScreenerError> {
    if resp.status().is_success() {
        Ok(resp)
    } else {
        Err(ScreenerError::Status {
            status: resp.status().as_u16(),
            url: resp.url().to_string(),
        })
    }
}
