use std::cell::Cell;
use std::time::Duration;

use realsense_smoke::{Error, RetryPolicy, Rs2Error, retry, retry_with};

fn busy() -> Error {
    Error::Device(Rs2Error::new("setting emitter", "Device or resource busy"))
}

fn fast_policy() -> RetryPolicy {
    RetryPolicy::new(5, Duration::ZERO)
}

/// Run an op that fails `k` times before succeeding; return (succeeded, attempts).
fn run_failing(k: u32) -> (bool, u32) {
    let attempts = Cell::new(0u32);
    let result = retry_with(&fast_policy(), "setting emitter", || {
        attempts.set(attempts.get() + 1);
        if attempts.get() <= k { Err(busy()) } else { Ok(attempts.get()) }
    });
    (result.is_ok(), attempts.get())
}

#[test]
fn succeeds_iff_at_most_five_failures() {
    for k in 0..=9 {
        let (ok, attempts) = run_failing(k);
        assert_eq!(ok, k <= 5, "k = {k}");
        assert_eq!(attempts, (k + 1).min(6), "attempts for k = {k}");
    }
}

#[test]
fn exhausted_retries_report_operation() {
    let err = retry_with(&fast_policy(), "setting laser power", || -> realsense_smoke::Result<()> {
        Err(busy())
    })
    .unwrap_err();

    match err {
        Error::RetriesExhausted { operation, attempts, source } => {
            assert_eq!(operation, "setting laser power");
            assert_eq!(attempts, 6);
            assert!(source.is_transient());
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn non_sdk_errors_are_not_retried() {
    let attempts = Cell::new(0u32);
    let err = retry_with(&fast_policy(), "setting laser power", || -> realsense_smoke::Result<()> {
        attempts.set(attempts.get() + 1);
        Err(Error::Verification("read back 150".to_string()))
    })
    .unwrap_err();

    assert_eq!(attempts.get(), 1);
    assert!(matches!(err, Error::Verification(_)));
}

#[test]
fn default_policy_matches_device_busy_budget() {
    let policy = RetryPolicy::default();
    assert_eq!(policy.max_retries, 5);
    assert_eq!(policy.max_attempts(), 6);
    assert_eq!(policy.delay, Duration::from_millis(200));
}

#[test]
fn delay_is_applied_between_attempts() {
    let policy = RetryPolicy::new(2, Duration::from_millis(10));
    let started = std::time::Instant::now();
    let calls = Cell::new(0u32);
    let value = retry_with(&policy, "setting emitter", || {
        calls.set(calls.get() + 1);
        if calls.get() < 3 { Err(busy()) } else { Ok(7) }
    })
    .expect("third attempt should succeed");

    assert_eq!(value, 7);
    assert!(started.elapsed() >= Duration::from_millis(20));
}

#[test]
fn default_retry_returns_first_success() -> realsense_smoke::Result<()> {
    let calls = Cell::new(0u32);
    let value = retry("reading laser power", || {
        calls.set(calls.get() + 1);
        Ok(360.0f32)
    })?;
    assert_eq!(value, 360.0);
    assert_eq!(calls.get(), 1);
    Ok(())
}
