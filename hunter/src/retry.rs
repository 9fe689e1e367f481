//! Backoff for transient HTTP failures inside the fetch adapters.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// How a failed request should be treated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Timeout,
    Connection,
    /// 429 or 503.
    Throttled,
    Http5xx(u16),
    /// Anything else; never retried.
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RetryDecision {
    NoRetry,
    RetryAfter(Duration),
}

/// Retry parameters (`[http.retry]` in config.toml).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RetryPolicy {
    /// Total attempts including the first.
    pub max_attempts: u32,
    pub base_delay_ms: u64,
    pub max_delay_secs: u64,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            base_delay_ms: 500,
            max_delay_secs: 10,
        }
    }
}

impl RetryPolicy {
    /// Single attempt, no backoff.
    pub fn none() -> Self {
        Self {
            max_attempts: 1,
            ..Self::default()
        }
    }

    /// `attempt` is 1-based.
    pub fn decide(&self, attempt: u32, kind: ErrorKind) -> RetryDecision {
        if attempt >= self.max_attempts {
            return RetryDecision::NoRetry;
        }
        match kind {
            ErrorKind::Other => RetryDecision::NoRetry,
            ErrorKind::Timeout
            | ErrorKind::Connection
            | ErrorKind::Throttled
            | ErrorKind::Http5xx(_) => {
                let exp = 1u32 << attempt.saturating_sub(1).min(8);
                let raw = Duration::from_millis(self.base_delay_ms).saturating_mul(exp);
                RetryDecision::RetryAfter(raw.min(Duration::from_secs(self.max_delay_secs)))
            }
        }
    }
}

/// Maps an HTTP status to a retry kind.
pub fn classify_status(status: u16) -> ErrorKind {
    match status {
        429 | 503 => ErrorKind::Throttled,
        500..=599 => ErrorKind::Http5xx(status),
        _ => ErrorKind::Other,
    }
}

/// Runs `f` until it succeeds or the policy gives up, sleeping between attempts.
pub fn run_with_retry<T, E, F, C>(policy: &RetryPolicy, classify: C, mut f: F) -> Result<T, E>
where
    F: FnMut() -> Result<T, E>,
    C: Fn(&E) -> ErrorKind,
{
    let mut attempt = 1u32;
    loop {
        match f() {
            Ok(value) => return Ok(value),
            Err(e) => match policy.decide(attempt, classify(&e)) {
                RetryDecision::NoRetry => return Err(e),
                RetryDecision::RetryAfter(delay) => {
                    tracing::warn!("attempt {} failed, retrying in {:?}", attempt, delay);
                    std::thread::sleep(delay);
                    attempt += 1;
                }
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_retry_for_other() {
        let p = RetryPolicy::default();
        assert_eq!(p.decide(1, ErrorKind::Other), RetryDecision::NoRetry);
    }

    #[test]
    fn test_backoff_grows_and_is_capped() {
        let p = RetryPolicy {
            max_attempts: 20,
            ..RetryPolicy::default()
        };
        let delay = |attempt| match p.decide(attempt, ErrorKind::Timeout) {
            RetryDecision::RetryAfter(d) => d,
            RetryDecision::NoRetry => panic!("expected retry"),
        };
        assert_eq!(delay(1), Duration::from_millis(500));
        assert_eq!(delay(2), Duration::from_millis(1000));
        assert_eq!(delay(12), Duration::from_secs(10));
    }

    #[test]
    fn test_respects_max_attempts() {
        let p = RetryPolicy::default();
        assert!(matches!(
            p.decide(2, ErrorKind::Throttled),
            RetryDecision::RetryAfter(_)
        ));
        assert_eq!(p.decide(3, ErrorKind::Throttled), RetryDecision::NoRetry);
        assert_eq!(RetryPolicy::none().decide(1, ErrorKind::Timeout), RetryDecision::NoRetry);
    }

    #[test]
    fn test_classify_status() {
        assert_eq!(classify_status(429), ErrorKind::Throttled);
        assert_eq!(classify_status(502), ErrorKind::Http5xx(502));
        assert_eq!(classify_status(404), ErrorKind::Other);
    }

    #[test]
    fn test_run_with_retry_stops_after_success() {
        let policy = RetryPolicy {
            max_attempts: 3,
            base_delay_ms: 1,
            max_delay_secs: 1,
        };
        let mut calls = 0;
        let result: Result<u32, u16> = run_with_retry(&policy, |s: &u16| classify_status(*s), || {
            calls += 1;
            if calls < 2 { Err(503) } else { Ok(calls) }
        });
        assert_eq!(result, Ok(2));

        let mut calls = 0;
        let result: Result<(), u16> = run_with_retry(&policy, |s: &u16| classify_status(*s), || {
            calls += 1;
            Err(404)
        });
        assert_eq!(result, Err(404));
        assert_eq!(calls, 1);
    }
}
