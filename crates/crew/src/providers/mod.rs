//! Upstream data sources.
//!
//! This module provides integrations with:
//!
//! - PagerDuty - on-call schedules per escalation policy
//! - Slack - channel membership and user profiles

pub mod pagerduty;
pub mod slack;
mod traits;

pub use pagerduty::PagerDutyClient;
pub use slack::SlackClient;
pub use traits::{DirectoryLookup, DirectoryMember, DirectorySource, OnCallEntry, ScheduleSource};
