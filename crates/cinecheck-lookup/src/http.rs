//! GET-with-retry shared by the HTTP backends.
//!
//! Timeouts, connect errors, 429 and 5xx are retried with exponential
//! backoff; 404 maps to `NotFound`; any other status fails at once.

use cinecheck_core::LookupError;
use reqwest::{RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::warn;

/// Retry schedule of one backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total attempts per request, including the first
    pub max_attempts: u32,
    /// Delay before the first retry; doubles on each further retry
    pub backoff: Duration,
    /// Upper bound on a single delay
    pub max_backoff: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            backoff: Duration::from_millis(600),
            max_backoff: Duration::from_secs(10),
        }
    }
}

impl RetryPolicy {
    /// Delay after failed attempt `attempt` (1-based), capped at `max_backoff`.
    pub fn delay(&self, attempt: u32) -> Duration {
        let factor = 2u32.checked_pow(attempt.saturating_sub(1)).unwrap_or(u32::MAX);
        self.backoff
            .checked_mul(factor)
            .map_or(self.max_backoff, |d| d.min(self.max_backoff))
    }
}

/// Send the request built by `request` until it succeeds or the policy gives
/// up. `source` and `what` only label errors and logs. URLs are stripped from
/// transport errors since some backends carry their key in the query string.
pub(crate) async fn get_json<T, F>(
    source: &str,
    what: &str,
    policy: &RetryPolicy,
    request: F,
) -> Result<T, LookupError>
where
    T: DeserializeOwned,
    F: Fn() -> RequestBuilder,
{
    let mut attempt: u32 = 0;
    loop {
        attempt = attempt.saturating_add(1);
        let failure = match request().send().await {
            Ok(resp) if resp.status().is_success() => {
                return resp.json::<T>().await.map_err(|e| {
                    LookupError::Unavailable(format!(
                        "malformed {} response for {}: {}",
                        source,
                        what,
                        e.without_url()
                    ))
                });
            }
            Ok(resp) if resp.status() == StatusCode::NOT_FOUND => {
                return Err(LookupError::NotFound(format!("{} {}", source, what)));
            }
            Ok(resp) => {
                let status = resp.status();
                let err = LookupError::Unavailable(format!("{} {} returned {}", source, what, status));
                if !(status.is_server_error() || status == StatusCode::TOO_MANY_REQUESTS) {
                    return Err(err);
                }
                err
            }
            Err(e) if e.is_timeout() => LookupError::Timeout(format!("{} {}", source, what)),
            Err(e) if e.is_connect() => {
                LookupError::Unavailable(format!("{} unreachable: {}", source, e.without_url()))
            }
            Err(e) => {
                return Err(LookupError::Unavailable(format!(
                    "{} request failed: {}",
                    source,
                    e.without_url()
                )))
            }
        };

        if attempt >= policy.max_attempts {
            return Err(failure);
        }
        let delay = policy.delay(attempt);
        warn!(source, error = %failure, attempt, delay_ms = delay.as_millis() as u64, "retrying request");
        tokio::time::sleep(delay).await;
    }
}
