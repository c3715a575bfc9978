//! Recording engine shared by the integration tests.

#![allow(dead_code)]

use analytics_bridge::{AnalyticsEngine, EventParams, ReportPolicy, UserProfiles};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

/// A call observed by the engine.
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    Initialize,
    SetReportPolicies(Vec<ReportPolicy>),
    OnEvent(String, EventParams),
    SetUserProfile(String, Option<String>),
    AddDefaultEventParams(EventParams),
    UserProfiles(bool),
    SetAnalyticsEnabled(bool),
    SetRestrictionEnabled(bool),
    SetUserId(String),
    SetSessionDuration(u64),
    ClearCachedData,
    PageStart(String, String),
    PageEnd(String),
}

/// Engine that records every call and answers queries from canned state.
#[derive(Debug, Default)]
pub struct RecordingEngine {
    calls: Mutex<Vec<Call>>,
    profiles: Mutex<Option<UserProfiles>>,
    restricted: AtomicBool,
    analytics_id: String,
}

impl RecordingEngine {
    pub fn new() -> Self {
        Self {
            analytics_id: "aaid-0001".into(),
            ..Default::default()
        }
    }

    pub fn with_profiles(profiles: UserProfiles) -> Self {
        let engine = Self::new();
        *engine.profiles.lock().unwrap() = Some(profiles);
        engine
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn policy_calls(&self) -> Vec<Vec<ReportPolicy>> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                Call::SetReportPolicies(policies) => Some(policies),
                _ => None,
            })
            .collect()
    }

    fn record(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
    }
}

impl AnalyticsEngine for RecordingEngine {
    fn initialize(&self) {
        self.record(Call::Initialize);
    }

    fn set_report_policies(&self, policies: &[ReportPolicy]) {
        self.record(Call::SetReportPolicies(policies.to_vec()));
    }

    fn on_event(&self, event_id: &str, params: EventParams) {
        self.record(Call::OnEvent(event_id.into(), params));
    }

    fn set_user_profile(&self, name: &str, value: Option<&str>) {
        self.record(Call::SetUserProfile(name.into(), value.map(String::from)));
    }

    fn add_default_event_params(&self, params: EventParams) {
        self.record(Call::AddDefaultEventParams(params));
    }

    fn user_profiles(&self, predefined: bool) -> Option<UserProfiles> {
        self.record(Call::UserProfiles(predefined));
        self.profiles.lock().unwrap().clone()
    }

    fn set_analytics_enabled(&self, enabled: bool) {
        self.record(Call::SetAnalyticsEnabled(enabled));
    }

    fn set_restriction_enabled(&self, enabled: bool) {
        self.restricted.store(enabled, Ordering::SeqCst);
        self.record(Call::SetRestrictionEnabled(enabled));
    }

    fn is_restriction_enabled(&self) -> bool {
        self.restricted.load(Ordering::SeqCst)
    }

    fn analytics_id(&self) -> String {
        self.analytics_id.clone()
    }

    fn set_user_id(&self, user_id: &str) {
        self.record(Call::SetUserId(user_id.into()));
    }

    fn set_session_duration(&self, milliseconds: u64) {
        self.record(Call::SetSessionDuration(milliseconds));
    }

    fn clear_cached_data(&self) {
        self.record(Call::ClearCachedData);
    }

    fn page_start(&self, page_name: &str, page_class_override: &str) {
        self.record(Call::PageStart(page_name.into(), page_class_override.into()));
    }

    fn page_end(&self, page_name: &str) {
        self.record(Call::PageEnd(page_name.into()));
    }
}
