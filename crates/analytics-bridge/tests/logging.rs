//! Log output must name what happened without leaking values.

mod common;

use analytics_bridge::{dispatch, AnalyticsBridge, HostCall, UserProfiles};
use common::RecordingEngine;
use serde_json::json;
use std::io;
use std::sync::{Arc, Mutex};
use tracing_subscriber::fmt::format::FmtSpan;

/// Writer appending every formatted line to a shared buffer.
#[derive(Clone, Default)]
struct Captured(Arc<Mutex<Vec<u8>>>);

impl Captured {
    fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
    }
}

impl io::Write for Captured {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

fn capture() -> (Captured, impl tracing::Subscriber + Send + Sync) {
    let captured = Captured::default();
    let writer = captured.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::TRACE)
        .with_span_events(FmtSpan::NEW | FmtSpan::CLOSE)
        .with_ansi(false)
        .with_writer(move || writer.clone())
        .finish();
    (captured, subscriber)
}

#[tokio::test]
async fn test_logs_omit_profile_and_param_values() {
    let (captured, subscriber) = capture();
    let _guard = tracing::subscriber::set_default(subscriber);

    let profiles = UserProfiles::from([("favorite_genre".to_string(), "sci-fi".to_string())]);
    let bridge = AnalyticsBridge::new(RecordingEngine::with_profiles(profiles));

    bridge.log_event("purchase", json!({"item": "rare-book-title"}));
    bridge.set_user_profile("favorite_genre", Some("noir-thrillers"));
    bridge.set_user_id("usr-private-7731");
    bridge.add_default_event_params(
        json!({"channel": "partner-store-x"}).as_object().unwrap().clone(),
    );
    bridge.get_user_profiles(false).await.unwrap();

    for host_call in [
        json!({"method": "logEvent", "args": ["checkout", {"coupon": "SECRET-COUPON"}]}),
        json!({"method": "setUserProfile", "args": ["tier", "platinum-hidden"]}),
        json!({"method": "getUserProfiles", "args": [false]}),
    ] {
        let call: HostCall = serde_json::from_value(host_call).unwrap();
        dispatch(&bridge, &call).await.unwrap();
    }

    let logs = captured.contents();

    // Names and counts are logged.
    assert!(logs.contains("purchase"), "logs: {logs}");
    assert!(logs.contains("favorite_genre"), "logs: {logs}");
    assert!(logs.contains("setUserProfile"), "logs: {logs}");

    for secret in [
        "rare-book-title",
        "noir-thrillers",
        "usr-private-7731",
        "partner-store-x",
        "sci-fi",
        "SECRET-COUPON",
        "platinum-hidden",
    ] {
        assert!(!logs.contains(secret), "leaked {secret:?} in logs: {logs}");
    }
}

#[test]
fn test_dropped_policy_records_are_logged_not_raised() {
    let (captured, subscriber) = capture();

    tracing::subscriber::with_default(subscriber, || {
        let bridge = AnalyticsBridge::new(RecordingEngine::new());
        bridge.set_report_policies(&[json!({"reportPolicyType": "scheduledTime"})]);
        assert!(bridge.engine().calls().is_empty());
    });

    assert!(captured
        .contents()
        .contains("skipping undecodable report policy record"));
}
