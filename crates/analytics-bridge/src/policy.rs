//! Decoding of loosely-typed report-policy records sent by the host.

use crate::types::{ReportPolicy, ReportPolicyType};
use serde_json::Value;
use tracing::debug;

/// Record key carrying the policy tag.
pub const POLICY_TYPE_KEY: &str = "reportPolicyType";

/// Record key carrying the scheduled-time interval.
pub const SECONDS_KEY: &str = "seconds";

/// Record key carrying the cache threshold.
pub const THRESHOLD_KEY: &str = "threshold";

/// Coerce a JSON value to an integer.
///
/// Integers and floats without a fractional part are accepted; anything
/// else (strings, booleans, null, fractional numbers) is not.
fn as_integer(value: &Value) -> Option<i64> {
    if let Some(n) = value.as_i64() {
        return Some(n);
    }
    let f = value.as_f64()?;
    if f.fract() == 0.0 && f >= i64::MIN as f64 && f < i64::MAX as f64 {
        Some(f as i64)
    } else {
        None
    }
}

/// Decode a single record.
///
/// Returns `None` when the record is not an object, carries an unknown
/// tag, or lacks the integer parameter its tag requires.
pub fn decode_policy(record: &Value) -> Option<ReportPolicy> {
    let map = record.as_object()?;
    let tag: ReportPolicyType = map.get(POLICY_TYPE_KEY)?.as_str()?.parse().ok()?;

    match tag {
        ReportPolicyType::ScheduledTime => map
            .get(SECONDS_KEY)
            .and_then(as_integer)
            .map(|seconds| ReportPolicy::ScheduledTime { seconds }),
        ReportPolicyType::AppLaunch => Some(ReportPolicy::AppLaunch),
        ReportPolicyType::MoveBackground => Some(ReportPolicy::MoveBackground),
        ReportPolicyType::CacheThreshold => map
            .get(THRESHOLD_KEY)
            .and_then(as_integer)
            .map(|threshold| ReportPolicy::CacheThreshold { threshold }),
    }
}

/// Decode a batch of records, skipping the ones that do not decode.
///
/// Surviving policies keep their relative order.
pub fn decode_policies(records: &[Value]) -> Vec<ReportPolicy> {
    records
        .iter()
        .enumerate()
        .filter_map(|(index, record)| {
            let policy = decode_policy(record);
            if policy.is_none() {
                debug!(index, "skipping undecodable report policy record");
            }
            policy
        })
        .collect()
}
