//! Generic HTTP client tools
//!
//! Sends a prepared `RequestBuilder`, logs it, turns transport failures and
//! throttling responses into [`ProviderError`]s and retries the transient ones.
//! Authentication and URL layout stay with each provider.

use reqwest::RequestBuilder;
use serde::de::DeserializeOwned;
use std::time::Duration;

use crate::error::ProviderError;
use crate::utils::log_sanitizer::truncate_for_log;

/// Upper bound for a server-provided `Retry-After`.
const MAX_RETRY_AFTER_SECS: u64 = 30;
/// Upper bound for exponential backoff.
const MAX_BACKOFF_MS: u64 = 10_000;

/// HTTP tool function set
pub struct HttpUtils;

impl HttpUtils {
    /// Performs an HTTP request once and returns `(status_code, response_text)`.
    ///
    /// HTTP 429 becomes [`ProviderError::RateLimited`] and 502/503/504 become
    /// [`ProviderError::NetworkError`]; every other status is handed back to the
    /// caller for provider-specific mapping.
    pub async fn execute_request(
        request_builder: RequestBuilder,
        provider_name: &str,
        method_name: &str,
        url_or_action: &str,
    ) -> Result<(u16, String), ProviderError> {
        log::debug!("[{provider_name}] {method_name} {url_or_action}");

        let response = request_builder.send().await.map_err(|e| {
            if e.is_timeout() {
                ProviderError::Timeout {
                    provider: provider_name.to_string(),
                    detail: e.to_string(),
                }
            } else {
                ProviderError::NetworkError {
                    provider: provider_name.to_string(),
                    detail: e.to_string(),
                }
            }
        })?;

        let status_code = response.status().as_u16();
        log::debug!("[{provider_name}] Response Status: {status_code}");

        let retry_after = response
            .headers()
            .get("retry-after")
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.trim().parse::<u64>().ok());

        let response_text = response
            .text()
            .await
            .map_err(|e| ProviderError::NetworkError {
                provider: provider_name.to_string(),
                detail: format!("Failed to read response body: {e}"),
            })?;

        log::debug!(
            "[{provider_name}] Response Body: {}",
            truncate_for_log(&response_text)
        );

        if let Some(err) = classify_status(status_code, retry_after, &response_text, provider_name)
        {
            log::warn!("[{provider_name}] {method_name} {url_or_action}: {err}");
            return Err(err);
        }

        Ok((status_code, response_text))
    }

    /// Parse JSON response
    pub fn parse_json<T>(response_text: &str, provider_name: &str) -> Result<T, ProviderError>
    where
        T: DeserializeOwned,
    {
        serde_json::from_str(response_text).map_err(|e| {
            log::error!("[{provider_name}] JSON parse failed: {e}");
            log::error!(
                "[{provider_name}] Raw response: {}",
                truncate_for_log(response_text)
            );
            ProviderError::ParseError {
                provider: provider_name.to_string(),
                detail: e.to_string(),
            }
        })
    }

    /// Performs an HTTP request, retrying transient failures.
    ///
    /// `max_retries = 0` sends exactly once. Only [`is_retryable`] errors are
    /// retried; the last error is returned once attempts are exhausted.
    pub async fn execute_request_with_retry(
        request_builder: RequestBuilder,
        provider_name: &str,
        method_name: &str,
        url_or_action: &str,
        max_retries: u32,
    ) -> Result<(u16, String), ProviderError> {
        let mut attempt = 0;
        loop {
            let Some(req) = request_builder.try_clone() else {
                // Streaming bodies cannot be replayed
                log::warn!("[{provider_name}] Cannot clone request, disabling retry");
                return Self::execute_request(
                    request_builder,
                    provider_name,
                    method_name,
                    url_or_action,
                )
                .await;
            };

            match Self::execute_request(req, provider_name, method_name, url_or_action).await {
                Err(e) if attempt < max_retries && is_retryable(&e) => {
                    let delay = retry_delay(&e, attempt);
                    log::warn!(
                        "[{}] Request failed (attempt {}/{}), retrying in {:.1}s: {}",
                        provider_name,
                        attempt + 1,
                        max_retries + 1,
                        delay.as_secs_f32(),
                        e
                    );
                    tokio::time::sleep(delay).await;
                    attempt += 1;
                }
                result => return result,
            }
        }
    }
}

/// Maps throttling / gateway statuses to transient errors.
fn classify_status(
    status_code: u16,
    retry_after: Option<u64>,
    body: &str,
    provider_name: &str,
) -> Option<ProviderError> {
    match status_code {
        429 => Some(ProviderError::RateLimited {
            provider: provider_name.to_string(),
            retry_after,
            raw_message: Some(truncate_for_log(body)),
        }),
        502..=504 => Some(ProviderError::NetworkError {
            provider: provider_name.to_string(),
            detail: format!("HTTP {status_code}: {}", truncate_for_log(body)),
        }),
        _ => None,
    }
}

/// Network errors, timeouts and throttling are worth another attempt;
/// authentication or validation failures are not.
fn is_retryable(error: &ProviderError) -> bool {
    matches!(
        error,
        ProviderError::NetworkError { .. }
            | ProviderError::Timeout { .. }
            | ProviderError::RateLimited { .. }
    )
}

fn retry_delay(error: &ProviderError, attempt: u32) -> Duration {
    if let ProviderError::RateLimited {
        retry_after: Some(secs),
        ..
    } = error
    {
        Duration::from_secs((*secs).min(MAX_RETRY_AFTER_SECS))
    } else {
        backoff_delay(attempt)
    }
}

/// 100ms, 200ms, 400ms, ... capped at 10s
fn backoff_delay(attempt: u32) -> Duration {
    let capped_attempt = attempt.min(20);
    let delay_ms = 100_u64.saturating_mul(1_u64 << capped_attempt);
    Duration::from_millis(delay_ms.min(MAX_BACKOFF_MS))
}
