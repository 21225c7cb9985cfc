//! Tests for the retry policy.

use moodcomic_error::{ModelsError, ModelsErrorKind, RetryableError};
use moodcomic_rate_limit::RetryPolicy;
use std::sync::Arc;
use std::sync::atomic::{AtomicU32, Ordering};
use std::time::Duration;
use tokio::time::Instant;

fn rate_limited() -> ModelsError {
    ModelsError::new(ModelsErrorKind::Api {
        status_code: 429,
        message: "Too Many Requests".to_string(),
    })
}

fn server_error() -> ModelsError {
    ModelsError::new(ModelsErrorKind::Api {
        status_code: 500,
        message: "boom".to_string(),
    })
}

#[test]
fn test_rate_limit_is_the_only_retryable_signal() {
    assert!(rate_limited().is_retryable());
    assert!(!server_error().is_retryable());
    assert!(!ModelsError::new(ModelsErrorKind::Timeout(15_000)).is_retryable());
}

#[tokio::test(start_paused = true)]
async fn test_rate_limit_once_then_success_waits_one_backoff() {
    let policy = RetryPolicy::default();
    let calls = Arc::new(AtomicU32::new(0));
    let start = Instant::now();

    let result: Result<&str, ModelsError> = policy
        .with_retry(|| {
            let calls = calls.clone();
            async move {
                if calls.fetch_add(1, Ordering::SeqCst) == 0 {
                    Err(rate_limited())
                } else {
                    Ok("done")
                }
            }
        })
        .await;

    let elapsed = start.elapsed();
    assert_eq!(result.unwrap(), "done");
    assert_eq!(calls.load(Ordering::SeqCst), 2);
    assert!(elapsed >= Duration::from_millis(1000), "elapsed {elapsed:?}");
    assert!(elapsed < Duration::from_millis(3000), "elapsed {elapsed:?}");
}

#[tokio::test(start_paused = true)]
async fn test_non_retryable_error_returns_immediately() {
    let policy = RetryPolicy::default();
    let calls = Arc::new(AtomicU32::new(0));
    let start = Instant::now();

    let result: Result<(), ModelsError> = policy
        .with_retry(|| {
            let calls = calls.clone();
            async move {
                calls.fetch_add(1, Ordering::SeqCst);
                Err(server_error())
            }
        })
        .await;

    let err = result.unwrap_err();
    assert!(matches!(err.kind, ModelsErrorKind::Api { status_code: 500, .. }));
    assert_eq!(calls.load(Ordering::SeqCst), 1);
    assert_eq!(start.elapsed(), Duration::ZERO);
}

#[tokio::test(start_paused = true)]
async fn test_exhausted_retries_return_last_error() {
    let policy = RetryPolicy::default();
    let calls = Arc::new(AtomicU32::new(0));
    let start = Instant::now();

    let result: Result<(), ModelsError> = policy
        .with_retry(|| {
            let calls = calls.clone();
            async move {
                calls.fetch_add(1, Ordering::SeqCst);
                Err(rate_limited())
            }
        })
        .await;

    assert!(result.unwrap_err().kind.is_rate_limited());
    assert_eq!(calls.load(Ordering::SeqCst), 3);
    // 1000ms + 2000ms
    assert!(start.elapsed() >= Duration::from_millis(3000));
}

#[tokio::test(start_paused = true)]
async fn test_no_retry_policy_makes_single_attempt() {
    let calls = Arc::new(AtomicU32::new(0));

    let result: Result<(), ModelsError> = RetryPolicy::no_retry()
        .with_retry(|| {
            let calls = calls.clone();
            async move {
                calls.fetch_add(1, Ordering::SeqCst);
                Err(rate_limited())
            }
        })
        .await;

    assert!(result.is_err());
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[test]
fn test_delays_double_from_base() {
    let policy = RetryPolicy::default()
        .with_max_attempts(4)
        .with_base_delay_ms(250);
    let delays: Vec<u128> = policy.delays().map(|d| d.as_millis()).collect();
    assert_eq!(delays, vec![250, 500, 1000]);
}
