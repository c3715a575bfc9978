//! Method-name dispatch for hybrid hosts.
//!
//! A host delivers calls as `{"method": "logEvent", "args": ["purchase", {...}]}`
//! and receives a JSON reply. Void operations reply `null`.

use crate::client::AnalyticsBridge;
use crate::engine::AnalyticsEngine;
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, instrument};

/// A call made by the host.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HostCall {
    pub method: String,
    #[serde(default)]
    pub args: Vec<Value>,
}

impl HostCall {
    /// Create a call.
    pub fn new(method: impl Into<String>, args: Vec<Value>) -> Self {
        Self {
            method: method.into(),
            args,
        }
    }

    /// Parse a call from its JSON form.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    fn arg(&self, index: usize) -> Option<&Value> {
        self.args.get(index)
    }

    fn invalid(&self, reason: impl Into<String>) -> Error {
        Error::InvalidArgument {
            method: self.method.clone(),
            reason: reason.into(),
        }
    }

    fn str_arg(&self, index: usize, name: &str) -> Result<&str> {
        self.arg(index)
            .and_then(Value::as_str)
            .ok_or_else(|| self.invalid(format!("{name} must be a string")))
    }

    fn bool_arg(&self, index: usize, name: &str) -> Result<bool> {
        self.arg(index)
            .and_then(Value::as_bool)
            .ok_or_else(|| self.invalid(format!("{name} must be a boolean")))
    }

    fn millis_arg(&self, index: usize, name: &str) -> Result<u64> {
        let value = self
            .arg(index)
            .ok_or_else(|| self.invalid(format!("{name} is required")))?;
        if let Some(ms) = value.as_u64() {
            return Ok(ms);
        }
        match value.as_f64() {
            Some(f) if f >= 0.0 && f.fract() == 0.0 && f < u64::MAX as f64 => Ok(f as u64),
            _ => Err(self.invalid(format!("{name} must be a non-negative integer"))),
        }
    }
}

/// Route a host call to the bridge and encode the reply.
#[instrument(skip(bridge, call), fields(method = %call.method))]
pub async fn dispatch<E: AnalyticsEngine>(
    bridge: &AnalyticsBridge<E>,
    call: &HostCall,
) -> Result<Value> {
    debug!(arg_count = call.args.len(), "dispatching host call");

    match call.method.as_str() {
        "initialize" => bridge.initialize(),
        "setReportPolicies" => match call.arg(0) {
            Some(Value::Array(records)) => bridge.set_report_policies(records),
            _ => debug!("report policies argument is not an array, ignoring"),
        },
        "logEvent" => {
            let event_id = call.str_arg(0, "eventId")?;
            let params = call.arg(1).cloned().unwrap_or(Value::Null);
            bridge.log_event(event_id, params);
        }
        "setUserProfile" => {
            let name = call.str_arg(0, "name")?;
            let value = match call.arg(1) {
                None | Some(Value::Null) => None,
                Some(Value::String(value)) => Some(value.as_str()),
                Some(_) => return Err(call.invalid("value must be a string or null")),
            };
            bridge.set_user_profile(name, value);
        }
        "deleteUserProfile" => bridge.delete_user_profile(call.str_arg(0, "name")?),
        "addDefaultEventParams" => match call.arg(0) {
            Some(Value::Object(params)) => bridge.add_default_event_params(params.clone()),
            _ => return Err(call.invalid("params must be an object")),
        },
        "getUserProfiles" => {
            let predefined = call.bool_arg(0, "predefined")?;
            let profiles = bridge.get_user_profiles(predefined).await?;
            return Ok(serde_json::to_value(profiles)?);
        }
        "setAnalyticsEnabled" => bridge.set_analytics_enabled(call.bool_arg(0, "enabled")?),
        "setRestrictionEnabled" => bridge.set_restriction_enabled(call.bool_arg(0, "enabled")?),
        "isRestrictionEnabled" => return Ok(Value::Bool(bridge.is_restriction_enabled())),
        "getAnalyticsId" => return Ok(Value::String(bridge.analytics_id())),
        "setUserId" => bridge.set_user_id(call.str_arg(0, "userId")?),
        "setSessionTimeout" => {
            let millis = call.millis_arg(0, "milliseconds")?;
            bridge.set_session_timeout(Duration::from_millis(millis));
        }
        "clearCachedData" => bridge.clear_cached_data(),
        "pageStart" => {
            let page_name = call.str_arg(0, "pageName")?;
            let page_class_override = call.str_arg(1, "pageClassOverride")?;
            bridge.page_start(page_name, page_class_override);
        }
        "pageEnd" => bridge.page_end(call.str_arg(0, "pageName")?),
        other => return Err(Error::UnknownMethod(other.to_string())),
    }

    Ok(Value::Null)
}
