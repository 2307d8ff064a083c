use std::time::Duration;

use reqwest::{RequestBuilder, Response};

use crate::core::ScreenerError;

/// Specifies the backoff strategy for retrying failed requests.
#[derive(Clone, Debug)]
pub enum Backoff {
    /// Uses a fixed delay between retries.
    Fixed(Duration),
    /// Uses an exponential delay between retries.
    /// The delay is calculated as `base * (factor ^ attempt)`.
    Exponential {
        /// The initial backoff duration.
        base: Duration,
        /// The multiplicative factor for each subsequent retry.
        factor: f64,
        /// The maximum duration to wait between retries.
        max: Duration,
    },
}

impl Backoff {
    fn delay(&self, attempt: u32) -> Duration {
        match self {
            Self::Fixed(d) => *d,
            Self::Exponential { base, factor, max } => {
                let exp = i32::try_from(attempt).unwrap_or(i32::MAX);
                let scaled = base.as_secs_f64() * factor.powi(exp);
                if scaled.is_finite() && scaled < max.as_secs_f64() {
                    Duration::from_secs_f64(scaled)
                } else {
                    *max
                }
            }
        }
    }
}

/// Configuration for the provider client's automatic retry mechanism.
#[derive(Clone, Debug)]
pub struct RetryConfig {
    /// Enables or disables the retry mechanism.
    pub enabled: bool,
    /// The maximum number of retries to attempt. The total number of attempts will be `max_retries + 1`.
    pub max_retries: u32,
    /// The backoff strategy to use between retries.
    pub backoff: Backoff,
    /// A list of HTTP status codes that should trigger a retry.
    pub retry_on_status: Vec<u16>,
    /// Whether to retry on request timeouts.
    pub retry_on_timeout: bool,
    /// Whether to retry on connection errors.
    pub retry_on_connect: bool,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            max_retries: 2,
            backoff: Backoff::Exponential {
                base: Duration::from_millis(200),
                factor: 2.0,
                max: Duration::from_secs(3),
            },
            retry_on_status: vec![408, 429, 500, 502, 503, 504],
            retry_on_timeout: true,
            retry_on_connect: true,
        }
    }
}

impl RetryConfig {
    /// A policy that sends every request exactly once.
    #[must_use]
    pub fn disabled() -> Self {
        Self {
            enabled: false,
            ..Self::default()
        }
    }

    fn should_retry_error(&self, e: &reqwest::Error) -> bool {
        (self.retry_on_timeout && e.is_timeout()) || (self.retry_on_connect && e.is_connect())
    }
}

impl super::YfClient {
    /// Sends `req`, retrying according to the client's policy (or `retry_override`).
    ///
    /// The final response is returned whatever its status; callers decide how to map
    /// non-success codes.
    pub(crate) async fn send_with_retry(
        &self,
        req: RequestBuilder,
        retry_override: Option<&RetryConfig>,
    ) -> Result<Response, ScreenerError> {
        let cfg = retry_override.unwrap_or(&self.retry);
        let max_retries = if cfg.enabled { cfg.max_retries } else { 0 };

        let mut attempt = 0u32;
        loop {
            // Bodies are never streamed here, so cloning always succeeds.
            let this_try = req
                .try_clone()
                .ok_or_else(|| ScreenerError::Data("request body is not cloneable".into()))?;

            match this_try.send().await {
                Ok(resp) => {
                    let status = resp.status().as_u16();
                    if attempt < max_retries && cfg.retry_on_status.contains(&status) {
                        tracing::debug!(status, attempt, url = %resp.url(), "retrying after status");
                    } else {
                        return Ok(resp);
                    }
                }
                Err(e) => {
                    if attempt < max_retries && cfg.should_retry_error(&e) {
                        tracing::debug!(error = %e, attempt, "retrying after transport error");
                    } else {
                        return Err(e.into());
                    }
                }
            }

            tokio::time::sleep(cfg.backoff.delay(attempt)).await;
            attempt += 1;
        }
    }
}
