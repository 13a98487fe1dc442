mod common;

use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::{Duration, Instant};

use common::{FakeSpotify, Failure, USER, curator};
use monthlify::CurateError;
use monthlify::curate::RetryPolicy;
use reqwest::StatusCode;

#[test]
fn test_default_policy() {
    let policy = RetryPolicy::default();

    assert_eq!(policy.attempts, 5);
    assert_eq!(policy.min_delay, Duration::from_secs(1));
    assert_eq!(policy.max_delay, Duration::from_secs(30));
}

#[test]
fn test_status_classification() {
    let rate_limited = CurateError::from_status(StatusCode::TOO_MANY_REQUESTS, Some(3), String::new());
    assert!(matches!(
        rate_limited,
        CurateError::RateLimited {
            retry_after: Some(3)
        }
    ));
    assert!(rate_limited.is_transient());

    assert!(CurateError::from_status(StatusCode::BAD_GATEWAY, None, String::new()).is_transient());
    assert!(
        CurateError::from_status(StatusCode::SERVICE_UNAVAILABLE, None, String::new())
            .is_transient()
    );

    for status in [StatusCode::BAD_REQUEST, StatusCode::UNAUTHORIZED, StatusCode::NOT_FOUND] {
        let err = CurateError::from_status(status, None, "nope".to_string());
        assert!(!err.is_transient(), "{}", status);
    }
}

#[tokio::test]
async fn test_run_retries_transient_until_success() {
    let counter = AtomicUsize::new(0);
    let calls = &counter;

    let value = RetryPolicy::immediate(5)
        .run("flaky", move || async move {
            match calls.fetch_add(1, Ordering::SeqCst) {
                0 | 1 => Err(CurateError::Transient("boom".to_string())),
                _ => Ok(42),
            }
        })
        .await
        .unwrap();

    assert_eq!(value, 42);
    assert_eq!(counter.load(Ordering::SeqCst), 3);
}

#[tokio::test]
async fn test_run_gives_up_after_attempts() {
    let counter = AtomicUsize::new(0);
    let calls = &counter;

    let err = RetryPolicy::immediate(5)
        .run("always down", move || async move {
            calls.fetch_add(1, Ordering::SeqCst);
            Err::<(), _>(CurateError::RateLimited { retry_after: None })
        })
        .await
        .unwrap_err();

    assert!(matches!(err, CurateError::RateLimited { .. }));
    assert_eq!(counter.load(Ordering::SeqCst), 5);
}

#[test]
fn test_rate_limit_delay_honours_retry_after() {
    let policy = RetryPolicy::default();
    let limited = |secs| CurateError::RateLimited {
        retry_after: Some(secs),
    };

    // Server hint beats a shorter backoff
    assert_eq!(
        policy.delay_for(&limited(4), Duration::from_secs(1)),
        Duration::from_secs(4)
    );

    // A longer backoff is kept
    assert_eq!(
        policy.delay_for(&limited(4), Duration::from_secs(8)),
        Duration::from_secs(8)
    );

    // Hint is capped at max_delay
    assert_eq!(
        policy.delay_for(&limited(120), Duration::from_secs(2)),
        Duration::from_secs(30)
    );

    // No hint, or another transient error, keeps the backoff
    let no_hint = CurateError::RateLimited { retry_after: None };
    assert_eq!(
        policy.delay_for(&no_hint, Duration::from_secs(2)),
        Duration::from_secs(2)
    );
    let transient = CurateError::Transient("boom".to_string());
    assert_eq!(
        policy.delay_for(&transient, Duration::from_secs(2)),
        Duration::from_secs(2)
    );
}

#[tokio::test]
async fn test_run_waits_for_retry_after() {
    let counter = AtomicUsize::new(0);
    let calls = &counter;
    let policy = RetryPolicy {
        attempts: 2,
        min_delay: Duration::ZERO,
        max_delay: Duration::from_secs(1),
    };

    let started = Instant::now();
    let value = policy
        .run("rate limited", move || async move {
            match calls.fetch_add(1, Ordering::SeqCst) {
                0 => Err(CurateError::RateLimited {
                    retry_after: Some(1),
                }),
                _ => Ok(7),
            }
        })
        .await
        .unwrap();

    assert_eq!(value, 7);
    assert_eq!(counter.load(Ordering::SeqCst), 2);
    assert!(started.elapsed() >= Duration::from_secs(1));
}

#[tokio::test]
async fn test_run_does_not_retry_terminal() {
    let counter = AtomicUsize::new(0);
    let calls = &counter;

    let err = RetryPolicy::immediate(5)
        .run("forbidden", move || async move {
            calls.fetch_add(1, Ordering::SeqCst);
            Err::<(), _>(CurateError::Remote {
                status: 403,
                message: "forbidden".to_string(),
            })
        })
        .await
        .unwrap_err();

    assert!(matches!(err, CurateError::Remote { status: 403, .. }));
    assert_eq!(counter.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_single_attempt_policy() {
    let counter = AtomicUsize::new(0);
    let calls = &counter;

    let result = RetryPolicy::none()
        .run("once", move || async move {
            calls.fetch_add(1, Ordering::SeqCst);
            Err::<(), _>(CurateError::Transient("boom".to_string()))
        })
        .await;

    assert!(result.is_err());
    assert_eq!(counter.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_curator_recovers_from_transient_failures() {
    let api = FakeSpotify::new();
    api.fail_next(&[Failure::Transient, Failure::Transient]);
    let curator = curator(api);

    let id = curator.ensure_playlist("Monthly 2025-09", false).await.unwrap();

    // Two failed listings, one good listing, one create
    assert_eq!(curator.api().calls(), 4);
    assert_eq!(curator.api().playlist_named("Monthly 2025-09").unwrap().id, id);
}

#[tokio::test]
async fn test_curator_stops_on_terminal_failure() {
    let api = FakeSpotify::new().with_playlist("Archive", USER, &[]);
    api.fail_next(&[Failure::Terminal]);
    let curator = curator(api);

    let err = curator.ensure_playlist("Archive", false).await.unwrap_err();

    assert!(matches!(err, CurateError::Remote { status: 403, .. }));
    assert_eq!(curator.api().calls(), 1);
}

#[tokio::test]
async fn test_curator_exhausts_attempts() {
    let api = FakeSpotify::new();
    api.fail_next(&[Failure::Transient; 5]);
    let curator = curator(api);

    let err = curator.ensure_playlist("Archive", false).await.unwrap_err();

    assert!(err.is_transient());
    assert_eq!(curator.api().calls(), 5);
    assert!(curator.api().created().is_empty());
}

#[tokio::test]
async fn test_add_retry_does_not_duplicate() {
    let api = FakeSpotify::new().with_playlist("Archive", USER, &["A"]);
    let curator = curator(api);
    let id = curator.api().playlists()[0].id.clone();

    // First attempt fails while reading the playlist, second one succeeds
    curator.api().fail_next(&[Failure::Transient]);
    let added = curator
        .add_tracks_dedup(&id, &["A", "B", "C"])
        .await
        .unwrap();

    assert_eq!(added, 2);
    assert_eq!(curator.api().playlists()[0].tracks, vec!["A", "B", "C"]);
}
