//! The analytics engine the bridge delegates to.

use crate::types::{EventParams, ReportPolicy, UserProfiles};
use std::sync::Arc;

/// An analytics engine: session tracking, batching, delivery and local
/// caching all live behind this trait.
///
/// Implementations own their state and take `&self`, so one engine can be
/// shared between threads. The bridge performs no validation of its own;
/// length and character rules on event ids and profile names are the
/// engine's to enforce.
pub trait AnalyticsEngine: Send + Sync {
    /// One-time engine setup.
    fn initialize(&self);

    /// Apply report policies. Called with at least one policy.
    fn set_report_policies(&self, policies: &[ReportPolicy]);

    /// Record a custom event.
    fn on_event(&self, event_id: &str, params: EventParams);

    /// Set a user profile attribute. `None` deletes the attribute.
    fn set_user_profile(&self, name: &str, value: Option<&str>);

    /// Add parameters attached to every subsequent event.
    fn add_default_event_params(&self, params: EventParams);

    /// Fetch user profile attributes, predefined or custom.
    fn user_profiles(&self, predefined: bool) -> Option<UserProfiles>;

    /// Enable or disable collection.
    fn set_analytics_enabled(&self, enabled: bool);

    /// Toggle the persistent data-restriction flag.
    fn set_restriction_enabled(&self, enabled: bool);

    /// Whether data restriction is on.
    fn is_restriction_enabled(&self) -> bool;

    /// The app-instance identifier issued by the backend.
    fn analytics_id(&self) -> String;

    /// Set the user id. Switching between two non-empty ids starts a new session.
    fn set_user_id(&self, user_id: &str);

    /// Session inactivity timeout, in milliseconds.
    fn set_session_duration(&self, milliseconds: u64);

    /// Purge the local cache of undelivered events.
    fn clear_cached_data(&self);

    /// Mark the start of a page view.
    fn page_start(&self, page_name: &str, page_class_override: &str);

    /// Mark the end of a page view.
    fn page_end(&self, page_name: &str);
}

macro_rules! forward_engine {
    ($ptr:ty) => {
        impl<E: AnalyticsEngine + ?Sized> AnalyticsEngine for $ptr {
            fn initialize(&self) {
                (**self).initialize()
            }

            fn set_report_policies(&self, policies: &[ReportPolicy]) {
                (**self).set_report_policies(policies)
            }

            fn on_event(&self, event_id: &str, params: EventParams) {
                (**self).on_event(event_id, params)
            }

            fn set_user_profile(&self, name: &str, value: Option<&str>) {
                (**self).set_user_profile(name, value)
            }

            fn add_default_event_params(&self, params: EventParams) {
                (**self).add_default_event_params(params)
            }

            fn user_profiles(&self, predefined: bool) -> Option<UserProfiles> {
                (**self).user_profiles(predefined)
            }

            fn set_analytics_enabled(&self, enabled: bool) {
                (**self).set_analytics_enabled(enabled)
            }

            fn set_restriction_enabled(&self, enabled: bool) {
                (**self).set_restriction_enabled(enabled)
            }

            fn is_restriction_enabled(&self) -> bool {
                (**self).is_restriction_enabled()
            }

            fn analytics_id(&self) -> String {
                (**self).analytics_id()
            }

            fn set_user_id(&self, user_id: &str) {
                (**self).set_user_id(user_id)
            }

            fn set_session_duration(&self, milliseconds: u64) {
                (**self).set_session_duration(milliseconds)
            }

            fn clear_cached_data(&self) {
                (**self).clear_cached_data()
            }

            fn page_start(&self, page_name: &str, page_class_override: &str) {
                (**self).page_start(page_name, page_class_override)
            }

            fn page_end(&self, page_name: &str) {
                (**self).page_end(page_name)
            }
        }
    };
}

forward_engine!(Arc<E>);
forward_engine!(Box<E>);
