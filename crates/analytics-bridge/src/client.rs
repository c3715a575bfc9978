//! Analytics bridge implementation.

use crate::config::{BridgeBuilder, Config};
use crate::engine::AnalyticsEngine;
use crate::error::{Error, Result};
use crate::pending::CompletionTable;
use crate::policy::decode_policies;
use crate::types::{EventParams, ReportPolicy, UserProfiles};
use serde_json::Value;
use std::time::Duration;
use tokio::sync::oneshot;
use tracing::{debug, info, instrument};

/// Facade forwarding host calls to an analytics engine.
///
/// Loosely-typed host input (policy records, event parameters) is coerced
/// here; everything else is passed through untouched.
///
/// # Example
///
/// ```rust,ignore
/// use analytics_bridge::{AnalyticsBridge, ReportPolicy};
/// use serde_json::json;
///
/// let bridge = AnalyticsBridge::builder(engine)
///     .report_policy(ReportPolicy::AppLaunch)
///     .build()?;
/// bridge.initialize();
///
/// bridge.log_event("purchase", json!({"item": "book", "qty": 2}));
/// let profiles = bridge.get_user_profiles(false).await?;
/// ```
#[derive(Debug)]
pub struct AnalyticsBridge<E> {
    engine: E,
    config: Config,
    pending: CompletionTable,
}

impl<E: AnalyticsEngine> AnalyticsBridge<E> {
    /// Create a new builder around the given engine.
    pub fn builder(engine: E) -> BridgeBuilder<E> {
        BridgeBuilder::new(engine)
    }

    /// Create a bridge with no startup options.
    pub fn new(engine: E) -> Self {
        Self::from_parts(engine, Config::default())
    }

    pub(crate) fn from_parts(engine: E, config: Config) -> Self {
        Self {
            engine,
            config,
            pending: CompletionTable::new(),
        }
    }

    /// Get the bridge configuration.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Get the underlying engine.
    pub fn engine(&self) -> &E {
        &self.engine
    }

    /// Number of attribute fetches still awaiting delivery.
    pub async fn pending_request_count(&self) -> usize {
        self.pending.len().await
    }

    // ============================================
    // LIFECYCLE
    // ============================================

    /// Run the engine's setup, then apply the configured startup options.
    #[instrument(skip(self))]
    pub fn initialize(&self) {
        info!("initializing analytics engine");
        self.engine.initialize();

        let config = &self.config;
        if !config.report_policies.is_empty() {
            self.apply_report_policies(&config.report_policies);
        }
        if let Some(timeout) = config.session_timeout {
            self.set_session_timeout(timeout);
        }
        if let Some(enabled) = config.analytics_enabled {
            self.set_analytics_enabled(enabled);
        }
        if let Some(enabled) = config.restriction_enabled {
            self.set_restriction_enabled(enabled);
        }
        if !config.default_event_params.is_empty() {
            self.add_default_event_params(config.default_event_params.clone());
        }
    }

    // ============================================
    // REPORT POLICIES
    // ============================================

    /// Apply report policies from loosely-typed host records.
    ///
    /// Records that are not objects, carry an unknown tag, or lack their
    /// integer parameter are skipped without error. When nothing survives
    /// the engine is not called.
    #[instrument(skip(self, records), fields(record_count = records.len()))]
    pub fn set_report_policies(&self, records: &[Value]) {
        let policies = decode_policies(records);
        if policies.is_empty() {
            debug!("no applicable report policies");
            return;
        }
        self.apply_report_policies(&policies);
    }

    /// Apply already-typed report policies.
    pub fn apply_report_policies(&self, policies: &[ReportPolicy]) {
        if policies.is_empty() {
            return;
        }
        debug!(policy_count = policies.len(), "applying report policies");
        self.engine.set_report_policies(policies);
    }

    // ============================================
    // EVENTS
    // ============================================

    /// Log a custom event.
    ///
    /// `params` must be a JSON object; anything else makes the call a no-op.
    #[instrument(skip(self, params))]
    pub fn log_event(&self, event_id: &str, params: impl Into<Value>) {
        let Value::Object(params) = params.into() else {
            debug!("event params are not an object, dropping event");
            return;
        };
        debug!(param_count = params.len(), "logging event");
        self.engine.on_event(event_id, params);
    }

    /// Add parameters attached to every subsequent event.
    #[instrument(skip(self, params), fields(param_count = params.len()))]
    pub fn add_default_event_params(&self, params: EventParams) {
        self.engine.add_default_event_params(params);
    }

    /// Mark the start of a page view.
    #[instrument(skip(self))]
    pub fn page_start(&self, page_name: &str, page_class_override: &str) {
        self.engine.page_start(page_name, page_class_override);
    }

    /// Mark the end of a page view.
    #[instrument(skip(self))]
    pub fn page_end(&self, page_name: &str) {
        self.engine.page_end(page_name);
    }

    // ============================================
    // USER PROFILES
    // ============================================

    /// Set a user profile attribute. `None` deletes it.
    #[instrument(skip(self, value), fields(delete = value.is_none()))]
    pub fn set_user_profile(&self, name: &str, value: Option<&str>) {
        self.engine.set_user_profile(name, value);
    }

    /// Delete a user profile attribute.
    pub fn delete_user_profile(&self, name: &str) {
        self.set_user_profile(name, None);
    }

    /// Fetch user profile attributes.
    ///
    /// Fails with [`Error::UserAttributesNil`] when the engine has none.
    pub async fn get_user_profiles(&self, predefined: bool) -> Result<UserProfiles> {
        let (tx, rx) = oneshot::channel();
        self.get_user_profiles_with(predefined, move |result| {
            let _ = tx.send(result);
        })
        .await;
        rx.await.map_err(|_| Error::Cancelled)?
    }

    /// Fetch user profile attributes, delivering the outcome to `handler`.
    ///
    /// The handler fires exactly once with either the attributes or
    /// [`Error::UserAttributesNil`]. Overlapping calls each get their own
    /// answer. Dropping the returned future before it resolves drops the
    /// handler unfired and leaves nothing pending.
    #[instrument(skip(self, handler))]
    pub async fn get_user_profiles_with<F>(&self, predefined: bool, handler: F)
    where
        F: FnOnce(Result<UserProfiles>) + Send + 'static,
    {
        let result = self
            .engine
            .user_profiles(predefined)
            .ok_or(Error::UserAttributesNil);
        match &result {
            Ok(profiles) => debug!(count = profiles.len(), "user profiles fetched"),
            Err(_) => debug!("engine returned no user profiles"),
        }

        let id = self.pending.deliver(Box::new(handler), result).await;
        debug!(request_id = %id, "user profiles delivered");
    }

    // ============================================
    // SETTINGS
    // ============================================

    /// Enable or disable collection.
    #[instrument(skip(self))]
    pub fn set_analytics_enabled(&self, enabled: bool) {
        self.engine.set_analytics_enabled(enabled);
    }

    /// Toggle data restriction.
    #[instrument(skip(self))]
    pub fn set_restriction_enabled(&self, enabled: bool) {
        self.engine.set_restriction_enabled(enabled);
    }

    /// Whether data restriction is on.
    pub fn is_restriction_enabled(&self) -> bool {
        self.engine.is_restriction_enabled()
    }

    /// The app-instance identifier.
    pub fn analytics_id(&self) -> String {
        self.engine.analytics_id()
    }

    /// Set the user id.
    #[instrument(skip(self, user_id))]
    pub fn set_user_id(&self, user_id: &str) {
        self.engine.set_user_id(user_id);
    }

    /// Set the session inactivity timeout.
    #[instrument(skip(self))]
    pub fn set_session_timeout(&self, timeout: Duration) {
        let millis = u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX);
        self.engine.set_session_duration(millis);
    }

    /// Purge locally cached, undelivered events.
    #[instrument(skip(self))]
    pub fn clear_cached_data(&self) {
        info!("clearing cached analytics data");
        self.engine.clear_cached_data();
    }
}

impl<E: AnalyticsEngine> BridgeBuilder<E> {
    /// Build the bridge.
    pub fn build(self) -> Result<AnalyticsBridge<E>> {
        let (engine, config) = self.into_parts()?;
        Ok(AnalyticsBridge::from_parts(engine, config))
    }
}
