use std::future::Future;
use std::time::Duration;

use tokio::time::sleep;

use crate::{FaithcheckError, ProviderError};

pub const DEFAULT_MAX_ATTEMPTS: usize = 3;
pub const DEFAULT_INITIAL_DELAY: Duration = Duration::from_secs(1);

/// Bounded exponential backoff for transient provider failures.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_attempts: usize,
    pub initial_delay: Duration,
    /// Treat HTTP 5xx responses as transient. Off by default: server faults
    /// surface immediately as [`FaithcheckError::UpstreamFault`].
    pub retry_server_errors: bool,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            initial_delay: DEFAULT_INITIAL_DELAY,
            retry_server_errors: false,
        }
    }
}

impl RetryPolicy {
    pub fn new(max_attempts: usize) -> Self {
        Self {
            max_attempts,
            ..Self::default()
        }
    }

    pub fn with_initial_delay(mut self, delay: Duration) -> Self {
        self.initial_delay = delay;
        self
    }

    pub fn with_retry_server_errors(mut self, enabled: bool) -> Self {
        self.retry_server_errors = enabled;
        self
    }

    pub fn should_retry(&self, error: &ProviderError) -> bool {
        error.is_transient() || (self.retry_server_errors && error.is_server_error())
    }
}

/// Attempt counter and pending delay for one resilient call.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RetryState {
    pub attempt: usize,
    pub delay: Duration,
}

impl RetryState {
    fn new(policy: &RetryPolicy) -> Self {
        Self {
            attempt: 0,
            delay: policy.initial_delay,
        }
    }

    /// How long to wait before the next attempt; doubles the base delay.
    fn next_pause(&mut self, error: &ProviderError) -> Duration {
        let pause = match error {
            ProviderError::RateLimited {
                retry_after: Some(after),
            } => (*after).max(self.delay),
            _ => self.delay,
        };
        self.delay = self.delay.saturating_mul(2);
        pause
    }
}

/// Runs `operation` until it succeeds, fails permanently, or the attempt
/// ceiling is reached. The closure receives the 1-based attempt number.
pub async fn retry_with_backoff<T, F, Fut>(
    policy: &RetryPolicy,
    mut operation: F,
) -> Result<T, FaithcheckError>
where
    F: FnMut(usize) -> Fut,
    Fut: Future<Output = Result<T, ProviderError>>,
{
    if policy.max_attempts == 0 {
        return Err(FaithcheckError::InvalidConfig(
            "max_attempts must be at least 1".to_string(),
        ));
    }

    let mut state = RetryState::new(policy);
    loop {
        state.attempt += 1;
        let error = match operation(state.attempt).await {
            Ok(output) => return Ok(output),
            Err(error) => error,
        };

        if !policy.should_retry(&error) {
            tracing::error!(
                attempt = state.attempt,
                error = %error,
                "non-retriable provider failure"
            );
            return Err(permanent_failure(error));
        }

        if state.attempt >= policy.max_attempts {
            tracing::error!(
                attempts = state.attempt,
                error = %error,
                "giving up after reaching the retry ceiling"
            );
            return Err(FaithcheckError::RetryExhausted {
                attempts: state.attempt,
                last_error: error,
            });
        }

        let pause = state.next_pause(&error);
        tracing::warn!(
            attempt = state.attempt,
            max_attempts = policy.max_attempts,
            delay_ms = pause.as_millis() as u64,
            error = %error,
            "transient provider failure, retrying"
        );
        sleep(pause).await;
    }
}

fn permanent_failure(error: ProviderError) -> FaithcheckError {
    match error {
        ProviderError::InvalidResponse(message) => FaithcheckError::UnknownFailure(message),
        other => FaithcheckError::UpstreamFault(other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pauses_double_from_initial_delay() {
        let policy = RetryPolicy::default();
        let mut state = RetryState::new(&policy);
        let error = ProviderError::Timeout(Duration::from_secs(30));
        let pauses: Vec<_> = (0..3).map(|_| state.next_pause(&error)).collect();
        assert_eq!(
            pauses,
            vec![
                Duration::from_secs(1),
                Duration::from_secs(2),
                Duration::from_secs(4)
            ]
        );
    }

    #[test]
    fn retry_after_only_stretches_a_single_pause() {
        let policy = RetryPolicy::default();
        let mut state = RetryState::new(&policy);
        let limited = ProviderError::RateLimited {
            retry_after: Some(Duration::from_secs(5)),
        };
        assert_eq!(state.next_pause(&limited), Duration::from_secs(5));
        assert_eq!(
            state.next_pause(&ProviderError::Connection("reset".to_string())),
            Duration::from_secs(2)
        );
    }

    #[test]
    fn server_errors_retry_only_when_enabled() {
        let fault = ProviderError::Http {
            status: 503,
            message: "overloaded".to_string(),
        };
        assert!(!RetryPolicy::default().should_retry(&fault));
        assert!(RetryPolicy::default()
            .with_retry_server_errors(true)
            .should_retry(&fault));
    }
}
