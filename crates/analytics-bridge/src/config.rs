//! Bridge configuration.

use crate::types::{EventParams, ReportPolicy};
use std::time::Duration;

/// Options applied to the engine by `initialize`.
#[derive(Debug, Clone, Default)]
pub struct Config {
    pub(crate) report_policies: Vec<ReportPolicy>,
    pub(crate) session_timeout: Option<Duration>,
    pub(crate) analytics_enabled: Option<bool>,
    pub(crate) restriction_enabled: Option<bool>,
    pub(crate) default_event_params: EventParams,
}

impl Config {
    /// Report policies applied at startup.
    pub fn report_policies(&self) -> &[ReportPolicy] {
        &self.report_policies
    }

    /// Session timeout applied at startup.
    pub fn session_timeout(&self) -> Option<Duration> {
        self.session_timeout
    }

    /// Collection switch applied at startup.
    pub fn analytics_enabled(&self) -> Option<bool> {
        self.analytics_enabled
    }

    /// Restriction switch applied at startup.
    pub fn restriction_enabled(&self) -> Option<bool> {
        self.restriction_enabled
    }

    /// Default event parameters applied at startup.
    pub fn default_event_params(&self) -> &EventParams {
        &self.default_event_params
    }
}

/// Builder for an analytics bridge.
#[derive(Debug)]
pub struct BridgeBuilder<E> {
    engine: E,
    report_policies: Vec<ReportPolicy>,
    session_timeout: Option<Duration>,
    analytics_enabled: Option<bool>,
    restriction_enabled: Option<bool>,
    default_event_params: EventParams,
}

impl<E> BridgeBuilder<E> {
    /// Create a new builder around the given engine.
    pub fn new(engine: E) -> Self {
        Self {
            engine,
            report_policies: Vec::new(),
            session_timeout: None,
            analytics_enabled: None,
            restriction_enabled: None,
            default_event_params: EventParams::new(),
        }
    }

    /// Add a report policy. Can be called repeatedly.
    pub fn report_policy(mut self, policy: ReportPolicy) -> Self {
        self.report_policies.push(policy);
        self
    }

    /// Set the session timeout.
    pub fn session_timeout(mut self, timeout: Duration) -> Self {
        self.session_timeout = Some(timeout);
        self
    }

    /// Enable or disable collection at startup.
    pub fn analytics_enabled(mut self, enabled: bool) -> Self {
        self.analytics_enabled = Some(enabled);
        self
    }

    /// Enable or disable data restriction at startup.
    pub fn restriction_enabled(mut self, enabled: bool) -> Self {
        self.restriction_enabled = Some(enabled);
        self
    }

    /// Add a default event parameter.
    pub fn default_event_param(
        mut self,
        key: impl Into<String>,
        value: impl Into<serde_json::Value>,
    ) -> Self {
        self.default_event_params.insert(key.into(), value.into());
        self
    }

    /// Validate the options and split off the engine.
    pub(crate) fn into_parts(self) -> Result<(E, Config), crate::Error> {
        if self.session_timeout == Some(Duration::ZERO) {
            return Err(crate::Error::Config(
                "session_timeout must be greater than zero".into(),
            ));
        }

        for policy in &self.report_policies {
            match policy {
                ReportPolicy::ScheduledTime { seconds } if *seconds <= 0 => {
                    return Err(crate::Error::Config(format!(
                        "scheduledTime seconds must be positive, got {seconds}"
                    )));
                }
                ReportPolicy::CacheThreshold { threshold } if *threshold <= 0 => {
                    return Err(crate::Error::Config(format!(
                        "cacheThreshold threshold must be positive, got {threshold}"
                    )));
                }
                _ => {}
            }
        }

        let config = Config {
            report_policies: self.report_policies,
            session_timeout: self.session_timeout,
            analytics_enabled: self.analytics_enabled,
            restriction_enabled: self.restriction_enabled,
            default_event_params: self.default_event_params,
        };

        Ok((self.engine, config))
    }
}
