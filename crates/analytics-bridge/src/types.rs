//! Value types shared between the host, the bridge and the engine.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

/// Event parameters, as handed over by the host.
pub type EventParams = serde_json::Map<String, serde_json::Value>;

/// User profile attributes returned by the engine, keyed by attribute name.
pub type UserProfiles = HashMap<String, String>;

/// Tag selecting which report policy variant to configure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ReportPolicyType {
    ScheduledTime,
    AppLaunch,
    MoveBackground,
    CacheThreshold,
}

impl ReportPolicyType {
    /// The host-side tag string.
    pub fn as_str(&self) -> &'static str {
        match self {
            ReportPolicyType::ScheduledTime => "scheduledTime",
            ReportPolicyType::AppLaunch => "appLaunch",
            ReportPolicyType::MoveBackground => "moveBackground",
            ReportPolicyType::CacheThreshold => "cacheThreshold",
        }
    }
}

impl fmt::Display for ReportPolicyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ReportPolicyType {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "scheduledTime" => Ok(ReportPolicyType::ScheduledTime),
            "appLaunch" => Ok(ReportPolicyType::AppLaunch),
            "moveBackground" => Ok(ReportPolicyType::MoveBackground),
            "cacheThreshold" => Ok(ReportPolicyType::CacheThreshold),
            _ => Err(()),
        }
    }
}

/// A rule controlling when buffered events are flushed to the backend.
///
/// Serializes to the host record form, e.g.
/// `{"reportPolicyType": "scheduledTime", "seconds": 120}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "reportPolicyType", rename_all = "camelCase")]
pub enum ReportPolicy {
    /// Report on a timer.
    ScheduledTime { seconds: i64 },
    /// Report when the app is launched.
    AppLaunch,
    /// Report when the app moves to the background.
    MoveBackground,
    /// Report once this many events are cached.
    CacheThreshold { threshold: i64 },
}

impl ReportPolicy {
    /// The tag of this policy.
    pub fn policy_type(&self) -> ReportPolicyType {
        match self {
            ReportPolicy::ScheduledTime { .. } => ReportPolicyType::ScheduledTime,
            ReportPolicy::AppLaunch => ReportPolicyType::AppLaunch,
            ReportPolicy::MoveBackground => ReportPolicyType::MoveBackground,
            ReportPolicy::CacheThreshold { .. } => ReportPolicyType::CacheThreshold,
        }
    }
}
