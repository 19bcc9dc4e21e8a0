use super::*;

fn fast_policy(attempts: u32) -> RetryPolicy {
    RetryPolicy::default()
        .with_attempts(attempts)
        .with_base_delay(Duration::from_millis(1))
}

#[test]
fn backoff_doubles_each_attempt() {
    let policy = RetryPolicy::default();
    assert_eq!(policy.delay_after(1), Duration::from_millis(1000));
    assert_eq!(policy.delay_after(2), Duration::from_millis(2000));
    assert_eq!(policy.delay_after(3), Duration::from_millis(4000));
}

#[test]
fn zero_attempts_is_clamped_to_one() {
    assert_eq!(RetryPolicy::default().with_attempts(0).attempts, 1);
}

#[test]
fn server_errors_are_retried() {
    let mut calls = 0;
    let result = fast_policy(3).run("test", || {
        calls += 1;
        if calls < 3 {
            Err(ureq::Error::StatusCode(503))
        } else {
            Ok("done".to_string())
        }
    });
    assert_eq!(result.expect("third attempt succeeds"), "done");
    assert_eq!(calls, 3);
}

#[test]
fn client_errors_fail_immediately() {
    let mut calls = 0;
    let result = fast_policy(3).run("test", || {
        calls += 1;
        Err(ureq::Error::StatusCode(404))
    });
    assert!(result.is_err());
    assert_eq!(calls, 1);
}

#[test]
fn gives_up_after_all_attempts() {
    let mut calls = 0;
    let result = fast_policy(2).run("test", || {
        calls += 1;
        Err(ureq::Error::ConnectionFailed)
    });
    let error = result.expect_err("all attempts fail");
    assert!(error.to_string().contains("Request error"));
    assert_eq!(calls, 2);
}
