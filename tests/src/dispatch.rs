#![cfg(test)]
use std::time::Duration;

use mailr_common::config::RunConfig;
use mailr_common::message::Outbound;
use mailr_common::report::Outcome;
use mailr_core::dispatch::Dispatcher;
use mailr_core::MailError;

use crate::support::{outbound, MockTransport};

fn dispatcher(limit: usize, retry_delay_secs: u64, max_attempts: u32) -> Dispatcher {
    Dispatcher::new(&RunConfig {
        limit,
        retry_delay: Duration::from_secs(retry_delay_secs),
        max_attempts,
        ..RunConfig::default()
    })
}

fn batch(n: usize) -> Vec<Outbound> {
    (0..n).map(|i| outbound(&format!("r{i}@example.com"))).collect()
}

#[tokio::test]
async fn sends_every_message_in_order() {
    let transport = MockTransport::accepting();
    let messages = batch(3);

    let report = dispatcher(450, 60, 5)
        .run(&transport, &messages, None)
        .await
        .unwrap();

    assert_eq!(report.sent(), 3);
    assert_eq!(report.failed(), 0);
    assert_eq!(report.not_attempted(), 0);

    let attempted: Vec<String> = transport.attempts().iter().map(|m| m.to.clone()).collect();
    assert_eq!(
        attempted,
        ["r0@example.com", "r1@example.com", "r2@example.com"]
    );
}

#[tokio::test]
async fn cap_stops_the_run_and_reports_the_rest() {
    let transport = MockTransport::accepting();
    let messages = batch(5);

    let report = dispatcher(2, 60, 5)
        .run(&transport, &messages, None)
        .await
        .unwrap();

    assert_eq!(report.sent(), 2);
    assert_eq!(report.not_attempted(), 3);
    // The third message is never handed to the transport.
    assert_eq!(transport.attempts().len(), 2);

    assert!(matches!(
        report.outcomes()[2],
        Outcome::NotAttempted { ref to } if to == "r2@example.com"
    ));
}

#[tokio::test(start_paused = true)]
async fn failed_send_retries_after_the_configured_delay() {
    let transport = MockTransport::scripted(vec![
        Err("connection reset".to_string()),
        Ok("250 2.0.0 OK id=1".to_string()),
    ]);
    let messages = batch(1);

    let started = tokio::time::Instant::now();
    let report = dispatcher(450, 60, 5)
        .run(&transport, &messages, None)
        .await
        .unwrap();

    assert_eq!(started.elapsed(), Duration::from_secs(60));
    assert_eq!(report.sent(), 1);

    // Same descriptor content on both attempts.
    let attempts = transport.attempts();
    assert_eq!(attempts.len(), 2);
    assert_eq!(attempts[0], attempts[1]);

    assert!(matches!(
        report.outcomes()[0],
        Outcome::Sent { attempts: 2, .. }
    ));
}

#[tokio::test(start_paused = true)]
async fn retry_ceiling_caps_the_attempts() {
    let transport = MockTransport::scripted(vec![
        Err("535 bad credentials".to_string()),
        Err("535 bad credentials".to_string()),
        Err("535 bad credentials".to_string()),
        // Would succeed on a fourth attempt, which must never happen.
        Ok("250 2.0.0 OK".to_string()),
    ]);
    let messages = batch(1);

    let report = dispatcher(450, 60, 3)
        .run(&transport, &messages, None)
        .await
        .unwrap();

    assert_eq!(transport.attempts().len(), 3);
    assert_eq!(report.sent(), 0);
    assert!(matches!(
        report.outcomes()[0],
        Outcome::Failed { attempts: 3, .. }
    ));
}

#[tokio::test(start_paused = true)]
async fn permanent_failure_does_not_consume_the_cap() {
    let transport = MockTransport::scripted(vec![
        Err("mailbox unavailable".to_string()),
        Err("mailbox unavailable".to_string()),
        Ok("250 2.0.0 OK".to_string()),
    ]);
    let messages = batch(2);

    let report = dispatcher(1, 60, 2)
        .run(&transport, &messages, None)
        .await
        .unwrap();

    // First message burned its two attempts; the second still fit
    // under the cap of one successful send.
    assert_eq!(report.failed(), 1);
    assert_eq!(report.sent(), 1);
    assert_eq!(report.not_attempted(), 0);
}

#[tokio::test(start_paused = true)]
async fn quota_scenario_with_recovering_second_message() {
    // limit=2, five messages; the second message fails twice and then
    // goes through. The cap is reached after two successes.
    let transport = MockTransport::scripted(vec![
        Ok("250 2.0.0 OK id=1".to_string()),
        Err("421 service unavailable".to_string()),
        Err("421 service unavailable".to_string()),
        Ok("250 2.0.0 OK id=2".to_string()),
    ]);
    let messages = batch(5);

    let report = dispatcher(2, 60, 3)
        .run(&transport, &messages, None)
        .await
        .unwrap();

    assert_eq!(report.sent(), 2);
    assert_eq!(report.failed(), 0);
    assert_eq!(report.not_attempted(), 3);
    assert_eq!(report.total(), 5);
    assert_eq!(transport.attempts().len(), 4);
}

#[tokio::test]
async fn transport_is_closed_after_a_clean_run() {
    let transport = MockTransport::accepting();
    dispatcher(450, 60, 5)
        .run(&transport, &batch(2), None)
        .await
        .unwrap();

    assert_eq!(transport.verify_count(), 1);
    assert_eq!(transport.close_count(), 1);
}

#[tokio::test(start_paused = true)]
async fn transport_is_closed_after_failures_and_caps() {
    let transport = MockTransport::scripted(vec![
        Err("x".to_string()),
        Err("x".to_string()),
    ]);
    dispatcher(1, 60, 2)
        .run(&transport, &batch(3), None)
        .await
        .unwrap();

    assert_eq!(transport.close_count(), 1);
}

#[tokio::test]
async fn failed_health_check_aborts_before_any_send() {
    let transport = MockTransport::rejecting_verify("530 authentication required");
    let result = dispatcher(450, 60, 5)
        .run(&transport, &batch(3), None)
        .await;

    assert!(matches!(result, Err(MailError::Transport(_))));
    assert!(transport.attempts().is_empty());
    // Released even though nothing was sent.
    assert_eq!(transport.close_count(), 1);
}

#[tokio::test]
async fn progress_callback_sees_the_running_count() {
    use std::sync::{Arc, Mutex};

    let transport = MockTransport::accepting();
    let seen: Arc<Mutex<Vec<usize>>> = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&seen);

    dispatcher(450, 60, 5)
        .run(
            &transport,
            &batch(3),
            Some(Box::new(move |sent| sink.lock().unwrap().push(sent))),
        )
        .await
        .unwrap();

    assert_eq!(*seen.lock().unwrap(), [1, 2, 3]);
}
