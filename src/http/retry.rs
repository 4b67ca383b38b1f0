//! Rate-limit retry
//!
//! The Web API answers 429 Too Many Requests when a client exceeds its
//! rolling quota, usually with a `Retry-After` header in seconds. The policy
//! waits that long and resubmits, for as long as the server keeps saying 429.
//! The wait is recorded on the client's [`Throttle`] so concurrent callers
//! hold off too. There is no attempt budget: the only way out of a persistent
//! 429 loop is for the caller to drop the future (e.g. via `tokio::time::timeout`).

use super::rate_limit::Throttle;
use reqwest::header::{HeaderMap, RETRY_AFTER};
use reqwest::{Response, StatusCode};
use std::future::Future;
use std::time::Duration;

/// Wait used when a 429 arrives without a usable `Retry-After` value
pub const DEFAULT_RETRY_DURATION: Duration = Duration::from_secs(5);

/// Wait duration requested by a rate-limited response.
///
/// Missing, non-numeric or negative values yield `fallback`.
pub fn retry_duration(headers: &HeaderMap, fallback: Duration) -> Duration {
    headers
        .get(RETRY_AFTER)
        .and_then(|v| v.to_str().ok())
        .and_then(|s| s.trim().parse::<u64>().ok())
        .map_or(fallback, Duration::from_secs)
}

/// Retry policy for 429 responses
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Whether 429 responses are retried at all
    pub enabled: bool,
    /// Wait used when `Retry-After` is absent or malformed
    pub fallback: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            enabled: true,
            fallback: DEFAULT_RETRY_DURATION,
        }
    }
}

impl RetryPolicy {
    /// A policy that hands 429 responses straight back
    pub fn disabled() -> Self {
        Self {
            enabled: false,
            ..Self::default()
        }
    }

    /// Run `attempt` until it yields something other than a 429.
    ///
    /// Every attempt, the first included, waits for `throttle` first.
    ///
    /// Each call of `attempt` must send the same request. Errors are returned
    /// immediately and never retried.
    ///
    /// The resubmitted request is byte-identical, credentials included. A
    /// bearer token is not re-fetched between attempts, so a `Retry-After`
    /// longer than the token's remaining lifetime resends an expired token
    /// and the server's 401 is returned as-is.
    pub async fn run<F, Fut, E>(
        &self,
        throttle: &Throttle,
        mut attempt: F,
    ) -> Result<Response, E>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<Response, E>>,
    {
        loop {
            throttle.ready().await;
            let response = attempt().await?;
            if !self.enabled || response.status() != StatusCode::TOO_MANY_REQUESTS {
                return Ok(response);
            }

            throttle.pause_for(retry_duration(response.headers(), self.fallback));
        }
    }
}

#[cfg(test)]
mod retry_tests {
    use super::*;
    use reqwest::header::HeaderValue;
    use test_case::test_case;

    fn headers_with(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(RETRY_AFTER, HeaderValue::from_str(value).unwrap());
        headers
    }

    #[test_case("0", 0 ; "zero")]
    #[test_case("1", 1 ; "one second")]
    #[test_case("30", 30 ; "thirty seconds")]
    #[test_case(" 7 ", 7 ; "surrounding whitespace")]
    fn test_retry_duration_valid(value: &str, seconds: u64) {
        assert_eq!(
            retry_duration(&headers_with(value), DEFAULT_RETRY_DURATION),
            Duration::from_secs(seconds)
        );
    }

    #[test_case("" ; "empty")]
    #[test_case("soon" ; "non numeric")]
    #[test_case("-3" ; "negative")]
    #[test_case("1.5" ; "fractional")]
    #[test_case("Wed, 21 Oct 2015 07:28:00 GMT" ; "http date")]
    fn test_retry_duration_malformed_uses_fallback(value: &str) {
        assert_eq!(
            retry_duration(&headers_with(value), DEFAULT_RETRY_DURATION),
            Duration::from_secs(5)
        );
    }

    #[test]
    fn test_retry_duration_missing_header() {
        assert_eq!(
            retry_duration(&HeaderMap::new(), DEFAULT_RETRY_DURATION),
            DEFAULT_RETRY_DURATION
        );
        assert_eq!(
            retry_duration(&HeaderMap::new(), Duration::from_millis(10)),
            Duration::from_millis(10)
        );
    }

    #[test]
    fn test_policy_defaults() {
        let policy = RetryPolicy::default();
        assert!(policy.enabled);
        assert_eq!(policy.fallback, Duration::from_secs(5));
        assert!(!RetryPolicy::disabled().enabled);
    }
}
