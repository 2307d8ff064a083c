use crate::core::{ScreenerError, YfClient, client::RetryConfig, net};
use serde::Deserialize;

#[derive(Deserialize)]
pub struct V10Envelope {
    #[serde(rename = "quoteSummary")]
    pub(crate) quote_summary: Option<V10QuoteSummary>,
}

#[derive(Deserialize)]
pub struct V10QuoteSummary {
    pub(crate) result: Option<Vec<serde_json::Value>>,
    pub(crate) error: Option<V10Error>,
}

#[derive(Deserialize)]
pub struct V10Error {
    pub(crate) description: String,
}

enum Attempt {
    Envelope(V10Envelope),
    CrumbRejected,
}

async fn attempt_fetch(
    client: &YfClient,
    symbol: &str,
    modules: &str,
    retry_override: Option<&RetryConfig>,
) -> Result<Attempt, ScreenerError> {
    client.ensure_credentials().await?;

    let crumb = client
        .crumb()
        .await
        .ok_or_else(|| ScreenerError::Auth("Crumb is not set".into()))?;

    let mut url = client.base_quote_api().join(symbol)?;
    {
        let mut qp = url.query_pairs_mut();
        qp.append_pair("modules", modules);
        qp.append_pair("crumb", &crumb);
    }

    let req = client.http().get(url.clone());
    let resp = client.send_with_retry(req, retry_override).await?;
    let status = resp.status();

    if status.as_u16() == 401 {
        return Ok(Attempt::CrumbRejected);
    }

    let text = net::get_text(resp, "quoteSummary", symbol).await?;

    match serde_json::from_str::<V10Envelope>(&text) {
        Ok(env) => Ok(Attempt::Envelope(env)),
        // Yahoo answers 404 with a JSON error body; anything else non-2xx is a bare status.
        Err(_) if !status.is_success() => Err(ScreenerError::Status {
            status: status.as_u16(),
            url: url.to_string(),
        }),
        Err(e) => Err(ScreenerError::Data(format!("quoteSummary json parse: {e}"))),
    }
}

pub async fn fetch(
    client: &YfClient,
    symbol: &str,
    modules: &str,
    retry_override: Option<&RetryConfig>,
) -> Result<V10Envelope, ScreenerError> {
    for attempt in 0..=1 {
        let env = match attempt_fetch(client, symbol, modules, retry_override).await? {
            Attempt::Envelope(env) => env,
            Attempt::CrumbRejected if attempt == 0 => {
                tracing::debug!(symbol, "crumb rejected with 401; refreshing and retrying");
                client.clear_crumb().await;
                continue;
            }
            Attempt::CrumbRejected => {
                return Err(ScreenerError::Auth("crumb rejected after refresh".into()));
            }
        };

        if let Some(error) = env.quote_summary.as_ref().and_then(|qs| qs.error.as_ref()) {
            let desc = error.description.to_ascii_lowercase();
            if desc.contains("invalid crumb") && attempt == 0 {
                tracing::debug!(symbol, "invalid crumb; refreshing and retrying");
                client.clear_crumb().await;
                continue;
            }
            return Err(ScreenerError::Data(format!("yahoo error: {}", error.description)));
        }

        return Ok(env);
    }

    Err(ScreenerError::Data(
        "quoteSummary API call failed after retry".into(),
    ))
}

pub async fn fetch_module_result<T>(
    client: &YfClient,
    symbol: &str,
    modules: &str,
    retry_override: Option<&RetryConfig>,
) -> Result<T, ScreenerError>
where
    T: for<'de> serde::Deserialize<'de>,
{
    let env = fetch(client, symbol, modules, retry_override).await?;

    let result_val = env
        .quote_summary
        .and_then(|qs| qs.result)
        .and_then(|mut v| v.pop())
        .ok_or_else(|| ScreenerError::Data("empty quoteSummary result".into()))?;

    serde_json::from_value(result_val)
        .map_err(|e| ScreenerError::Data(format!("quoteSummary result parse: {e}")))
}
