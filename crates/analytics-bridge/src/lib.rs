//! Hybrid-app bridge over an analytics engine.
//!
//! The bridge exposes a small, loosely-typed surface to a cross-platform
//! host and forwards every call to an [`AnalyticsEngine`]. Session tracking,
//! batching, delivery and caching belong to the engine.
//!
//! # Example
//!
//! ```rust,ignore
//! use analytics_bridge::{AnalyticsBridge, ReportPolicy};
//! use serde_json::json;
//! use std::time::Duration;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), analytics_bridge::Error> {
//!     let bridge = AnalyticsBridge::builder(MyEngine::default())
//!         .report_policy(ReportPolicy::ScheduledTime { seconds: 120 })
//!         .session_timeout(Duration::from_secs(30 * 60))
//!         .build()?;
//!     bridge.initialize();
//!
//!     bridge.log_event("purchase", json!({"item": "book", "qty": 2}));
//!     bridge.set_user_profile("favorite_genre", Some("sci-fi"));
//!
//!     let profiles = bridge.get_user_profiles(false).await?;
//!     println!("{profiles:?}");
//!     Ok(())
//! }
//! ```

mod client;
mod config;
mod engine;
mod error;
mod host;
mod pending;
pub mod policy;
pub mod types;

pub use client::AnalyticsBridge;
pub use config::{BridgeBuilder, Config};
pub use engine::AnalyticsEngine;
pub use error::{Error, Result};
pub use host::{dispatch, HostCall};
pub use pending::{Completion, CompletionTable, RequestId};
pub use types::{EventParams, ReportPolicy, ReportPolicyType, UserProfiles};
