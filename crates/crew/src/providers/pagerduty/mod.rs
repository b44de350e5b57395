//! PagerDuty on-call schedule client.
//!
//! Queries the REST API v2 `/oncalls` endpoint for one escalation policy,
//! optionally scoped to a single instant.
//!
//! ## Authentication
//!
//! Uses a static REST API key sent as `Authorization: Token token=<key>`.
//!
//! ## Example
//!
//! ```rust,ignore
//! use crew::providers::{PagerDutyClient, ScheduleSource};
//!
//! let client = PagerDutyClient::new("u+abcdef")?;
//! let entries = client.fetch_on_call("PABC123", Some(chrono::Utc::now())).await?;
//! ```

mod client;
mod models;

pub use client::{PagerDutyClient, DEFAULT_PAGERDUTY_API_URL};
pub use models::*;
