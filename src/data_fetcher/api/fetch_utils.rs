//! Generic HTTP fetching with retry logic and error classification

use rand::Rng;
use reqwest::Client;
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::{debug, error, info, instrument, warn};

use crate::constants::retry;
use crate::error::AppError;

/// Adds up to a quarter of the delay as random jitter.
fn with_jitter(delay: Duration) -> Duration {
    let max_jitter_ms = u64::try_from(delay.as_millis() / 4).unwrap_or(0);
    if max_jitter_ms == 0 {
        return delay;
    }
    delay + Duration::from_millis(rand::rng().random_range(0..=max_jitter_ms))
}

fn classify_status(status_code: u16, reason: &str, url: &str) -> AppError {
    match status_code {
        404 => AppError::api_not_found(url),
        429 => AppError::api_rate_limit(reason, url),
        400..=499 => AppError::api_client_error(status_code, reason, url),
        502 | 503 => AppError::api_service_unavailable(status_code, reason, url),
        _ => AppError::api_server_error(status_code, reason, url),
    }
}

fn classify_parse_failure(body: &str, parse_error: serde_json::Error, url: &str) -> AppError {
    let trimmed = body.trim_start();
    if trimmed.is_empty() {
        AppError::api_no_data("Response body is empty", url)
    } else if !trimmed.starts_with('{') && !trimmed.starts_with('[') {
        AppError::api_malformed_json("Response is not valid JSON", url)
    } else {
        AppError::api_unexpected_structure(parse_error.to_string(), url)
    }
}

fn classify_transport(e: reqwest::Error, url: &str) -> AppError {
    let e = e.without_url();
    if e.is_timeout() {
        AppError::network_timeout(url)
    } else if e.is_connect() {
        AppError::network_connection(url, e.to_string())
    } else {
        AppError::ApiFetch(e)
    }
}

/// `url` with credential query values masked, for logs and error messages.
pub(super) fn loggable_url(url: &str) -> String {
    let Ok(mut parsed) = reqwest::Url::parse(url) else {
        return url.to_string();
    };
    if !parsed.query_pairs().any(|(key, _)| SECRET_QUERY_KEYS.contains(&key.as_ref())) {
        return url.to_string();
    }
    let pairs: Vec<(String, String)> = parsed
        .query_pairs()
        .map(|(key, value)| {
            let value = if SECRET_QUERY_KEYS.contains(&key.as_ref()) {
                "***".to_string()
            } else {
                value.into_owned()
            };
            (key.into_owned(), value)
        })
        .collect();
    parsed.query_pairs_mut().clear().extend_pairs(pairs);
    parsed.to_string()
}

const SECRET_QUERY_KEYS: &[&str] = &["appid", "api_key", "apikey", "key"];

/// How long to wait before retrying `error`, or `None` if it should not be retried.
///
/// The jittered backoff is capped by the error's own suggested delay. A server
/// supplied `Retry-After` wins over both, up to [`retry::MAX_DELAY_SECONDS`].
fn retry_wait(error: &AppError, backoff: Duration, retry_after: Option<Duration>) -> Option<Duration> {
    if !error.is_retryable() {
        return None;
    }
    let max_delay = Duration::from_secs(retry::MAX_DELAY_SECONDS);
    let wait = match retry_after {
        Some(requested) => requested,
        None => {
            let cap = error
                .retry_delay_seconds()
                .map_or(max_delay, Duration::from_secs);
            with_jitter(backoff).min(cap)
        }
    };
    Some(wait.min(max_delay))
}

/// GETs `url` and decodes the JSON body into `T`.
///
/// - Retries whatever [`AppError::is_retryable`] accepts, up to
///   [`retry::MAX_ATTEMPTS`] times, with jittered exponential backoff
/// - Honors `Retry-After` (seconds) when the server sends it
/// - Maps other failures onto the specific [`AppError`] variants
#[instrument(skip_all, fields(url = %loggable_url(url)))]
pub(super) async fn fetch<T: DeserializeOwned>(client: &Client, url: &str) -> Result<T, AppError> {
    let shown_url = loggable_url(url);
    info!("Fetching data from URL: {shown_url}");

    let mut attempt = 0u32;
    let mut backoff = Duration::from_millis(retry::BASE_DELAY_MS);

    let response = loop {
        let (error, retry_after) = match client.get(url).send().await {
            Ok(resp) if resp.status().is_success() => break resp,
            Ok(resp) => {
                let status = resp.status();
                let retry_after = resp
                    .headers()
                    .get(reqwest::header::RETRY_AFTER)
                    .and_then(|h| h.to_str().ok())
                    .and_then(|s| s.trim().parse::<u64>().ok())
                    .map(Duration::from_secs);
                let reason = status.canonical_reason().unwrap_or("Unknown error");
                (
                    classify_status(status.as_u16(), reason, &shown_url),
                    retry_after,
                )
            }
            Err(e) => (classify_transport(e, &shown_url), None),
        };

        match retry_wait(&error, backoff, retry_after) {
            Some(wait) if attempt < retry::MAX_ATTEMPTS => {
                warn!(
                    "{error}. Retrying in {:?} (attempt {}/{})",
                    wait,
                    attempt + 1,
                    retry::MAX_ATTEMPTS
                );
                tokio::time::sleep(wait).await;
                attempt += 1;
                backoff = backoff.saturating_mul(2);
            }
            _ => {
                error!("Request failed: {error}");
                return Err(error);
            }
        }
    };

    debug!("Response status: {}", response.status());

    let response_text = match response.text().await {
        Ok(text) => text,
        Err(e) => {
            let e = e.without_url();
            error!("Failed to read response text from URL {}: {}", shown_url, e);
            return Err(AppError::ApiFetch(e));
        }
    };

    debug!("Response length: {} bytes", response_text.len());
    let preview: String = response_text.chars().take(512).collect();
    debug!("Response text (first 512 chars): {preview}");

    serde_json::from_str::<T>(&response_text).map_err(|e| {
        error!("Failed to parse API response: {} (URL: {})", e, shown_url);
        classify_parse_failure(&response_text, e, &shown_url)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_status() {
        let url = "http://localhost:8080/games/football";
        assert!(matches!(classify_status(404, "Not Found", url), AppError::ApiNotFound { .. }));
        assert!(matches!(classify_status(429, "Too Many", url), AppError::ApiRateLimit { .. }));
        assert!(matches!(
            classify_status(401, "Unauthorized", url),
            AppError::ApiClientError { status: 401, .. }
        ));
        assert!(matches!(
            classify_status(503, "Unavailable", url),
            AppError::ApiServiceUnavailable { status: 503, .. }
        ));
        assert!(matches!(
            classify_status(500, "Internal", url),
            AppError::ApiServerError { status: 500, .. }
        ));
    }

    #[test]
    fn test_classify_parse_failure() {
        let err = serde_json::from_str::<serde_json::Value>("x").unwrap_err();
        assert!(matches!(classify_parse_failure("", err, "u"), AppError::ApiNoData { .. }));

        let err = serde_json::from_str::<serde_json::Value>("x").unwrap_err();
        assert!(matches!(
            classify_parse_failure("<html>", err, "u"),
            AppError::ApiMalformedJson { .. }
        ));

        let err = serde_json::from_str::<Vec<u8>>("{}").unwrap_err();
        assert!(matches!(
            classify_parse_failure("{}", err, "u"),
            AppError::ApiUnexpectedStructure { .. }
        ));
    }

    #[test]
    fn test_retry_wait_follows_error_classification() {
        let url = "http://localhost:8080/games/basketball";
        let backoff = Duration::from_millis(400);

        assert_eq!(retry_wait(&AppError::api_not_found(url), backoff, None), None);
        assert_eq!(
            retry_wait(&AppError::api_client_error(401, "Unauthorized", url), backoff, None),
            None
        );

        let wait = retry_wait(&AppError::api_server_error(500, "Internal", url), backoff, None)
            .expect("server errors are retried");
        assert!(wait >= backoff && wait <= backoff + Duration::from_millis(100));
    }

    #[test]
    fn test_retry_wait_is_capped_by_suggested_delay() {
        let timeout = AppError::network_timeout("http://localhost:8080");
        let cap = Duration::from_secs(timeout.retry_delay_seconds().unwrap());
        assert_eq!(retry_wait(&timeout, Duration::from_secs(60), None), Some(cap));
    }

    #[test]
    fn test_retry_after_header_wins_but_is_bounded() {
        let limited = AppError::api_rate_limit("Too Many Requests", "u");
        assert_eq!(
            retry_wait(&limited, Duration::from_millis(250), Some(Duration::ZERO)),
            Some(Duration::ZERO)
        );
        assert_eq!(
            retry_wait(&limited, Duration::from_millis(250), Some(Duration::from_secs(3600))),
            Some(Duration::from_secs(retry::MAX_DELAY_SECONDS))
        );
    }

    #[test]
    fn test_loggable_url_masks_credentials() {
        assert_eq!(
            loggable_url("https://weather.example.com/weather?q=Houston&appid=s3cret&units=imperial"),
            "https://weather.example.com/weather?q=Houston&appid=***&units=imperial"
        );
        let plain = "http://localhost:8080/games/football?t=1";
        assert_eq!(loggable_url(plain), plain);
    }

    #[test]
    fn test_jitter_stays_within_quarter() {
        let base = Duration::from_millis(400);
        for _ in 0..50 {
            let delay = with_jitter(base);
            assert!(delay >= base);
            assert!(delay <= base + Duration::from_millis(100));
        }
        assert_eq!(with_jitter(Duration::ZERO), Duration::ZERO);
    }
}
