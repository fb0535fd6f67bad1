use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Arc, Mutex,
};
use std::time::Duration;

use tokio::time::Instant;

use faithcheck_core::{retry_with_backoff, FaithcheckError, ProviderError, RetryPolicy};

struct Flaky {
    failures_before_success: usize,
    attempts: AtomicUsize,
    started_at: Mutex<Vec<Instant>>,
}

impl Flaky {
    fn new(failures_before_success: usize) -> Self {
        Self {
            failures_before_success,
            attempts: AtomicUsize::new(0),
            started_at: Mutex::new(Vec::new()),
        }
    }

    async fn call(&self) -> Result<String, ProviderError> {
        self.started_at.lock().unwrap().push(Instant::now());
        let attempt = self.attempts.fetch_add(1, Ordering::SeqCst) + 1;
        if attempt <= self.failures_before_success {
            return Err(ProviderError::RateLimited { retry_after: None });
        }
        Ok(format!("ok after {attempt}"))
    }

    fn gaps(&self) -> Vec<Duration> {
        let starts = self.started_at.lock().unwrap();
        starts.windows(2).map(|w| w[1] - w[0]).collect()
    }
}

#[tokio::test(start_paused = true)]
async fn succeeds_after_transient_failures_below_ceiling() {
    let flaky = Arc::new(Flaky::new(2));
    let policy = RetryPolicy::default();

    let output = retry_with_backoff(&policy, |_| flaky.call()).await.unwrap();

    assert_eq!(output, "ok after 3");
    assert_eq!(flaky.attempts.load(Ordering::SeqCst), 3);
    assert_eq!(
        flaky.gaps(),
        vec![Duration::from_secs(1), Duration::from_secs(2)]
    );
}

#[tokio::test(start_paused = true)]
async fn exhausts_after_exactly_ceiling_attempts() {
    let flaky = Flaky::new(10);
    let policy = RetryPolicy::new(4);

    let err = retry_with_backoff(&policy, |_| flaky.call())
        .await
        .unwrap_err();

    assert_eq!(flaky.attempts.load(Ordering::SeqCst), 4);
    assert_eq!(
        flaky.gaps(),
        vec![
            Duration::from_secs(1),
            Duration::from_secs(2),
            Duration::from_secs(4)
        ]
    );
    match err {
        FaithcheckError::RetryExhausted {
            attempts,
            last_error,
        } => {
            assert_eq!(attempts, 4);
            assert_eq!(last_error, ProviderError::RateLimited { retry_after: None });
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test(start_paused = true)]
async fn retry_after_stretches_only_the_next_pause() {
    let starts = Mutex::new(Vec::new());
    let policy = RetryPolicy::default();

    let output = retry_with_backoff(&policy, |attempt| {
        starts.lock().unwrap().push(Instant::now());
        async move {
            match attempt {
                1 => Err(ProviderError::RateLimited {
                    retry_after: Some(Duration::from_secs(5)),
                }),
                2 => Err(ProviderError::Timeout(Duration::from_secs(30))),
                _ => Ok(attempt),
            }
        }
    })
    .await
    .unwrap();

    assert_eq!(output, 3);
    let starts = starts.lock().unwrap();
    let gaps: Vec<_> = starts.windows(2).map(|w| w[1] - w[0]).collect();
    assert_eq!(gaps, vec![Duration::from_secs(5), Duration::from_secs(2)]);
}

#[tokio::test(start_paused = true)]
async fn http_faults_are_not_retried() {
    let attempts = AtomicUsize::new(0);
    let policy = RetryPolicy::default();

    let err = retry_with_backoff(&policy, |_| {
        attempts.fetch_add(1, Ordering::SeqCst);
        async {
            Err::<(), _>(ProviderError::Http {
                status: 400,
                message: "bad request".to_string(),
            })
        }
    })
    .await
    .unwrap_err();

    assert_eq!(attempts.load(Ordering::SeqCst), 1);
    assert!(matches!(
        err,
        FaithcheckError::UpstreamFault(ProviderError::Http { status: 400, .. })
    ));
}

#[tokio::test(start_paused = true)]
async fn undecodable_responses_surface_as_unknown_failures() {
    let policy = RetryPolicy::default();
    let err = retry_with_backoff(&policy, |_| async {
        Err::<(), _>(ProviderError::InvalidResponse("no choices".to_string()))
    })
    .await
    .unwrap_err();

    assert!(
        matches!(err, FaithcheckError::UnknownFailure(message) if message == "no choices")
    );
}

#[tokio::test(start_paused = true)]
async fn server_errors_are_retried_when_opted_in() {
    let attempts = AtomicUsize::new(0);
    let policy = RetryPolicy::new(2).with_retry_server_errors(true);

    let err = retry_with_backoff(&policy, |_| {
        attempts.fetch_add(1, Ordering::SeqCst);
        async {
            Err::<(), _>(ProviderError::Http {
                status: 502,
                message: "bad gateway".to_string(),
            })
        }
    })
    .await
    .unwrap_err();

    assert_eq!(attempts.load(Ordering::SeqCst), 2);
    assert!(matches!(err, FaithcheckError::RetryExhausted { attempts: 2, .. }));
}

#[tokio::test]
async fn zero_attempts_is_rejected() {
    let policy = RetryPolicy::new(0);
    let err = retry_with_backoff(&policy, |_| async { Ok::<_, ProviderError>(()) })
        .await
        .unwrap_err();
    assert!(matches!(err, FaithcheckError::InvalidConfig(_)));
}
