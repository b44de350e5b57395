#![allow(clippy::doc_markdown)] // Allow brand names like PagerDuty, Slack without backticks

//! Daily on-call roster notifications.
//!
//! This crate combines who-is-on-call data from PagerDuty with member
//! profiles from Slack and renders plain-text reports for CI pipelines:
//!
//! - **PagerDuty** - on-call entries per escalation policy for a target date
//! - **Slack** - channel members keyed by display name
//!
//! Each on-call person is listed with a Slack mention when their PagerDuty
//! name exactly matches a Slack display name, and with their email otherwise.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use crew::{Config, Pipeline};
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::from_env()?;
//!     let now = crew::input::read_time("input".as_ref())?;
//!
//!     let reports = Pipeline::from_config(config)?.run(now).await?;
//!     reports.write_to(".".as_ref())?;
//!     Ok(())
//! }
//! ```
//!
//! ## Output
//!
//! - `private.txt`: `"<label> on-call users for <date>:"` followed by one
//!   `- <name> ( <contact> )` line per person, one section per policy
//! - `wings.txt`: greeting, the primary roster, and an issue tracker reminder

pub mod config;
pub mod error;
pub mod input;
pub mod pipeline;
pub mod providers;
pub mod render;
pub mod report;
pub mod roster;
pub mod schedule;

pub use config::{Audience, Config, PolicyTarget};
pub use error::{CrewError, Result};
pub use pipeline::Pipeline;
pub use providers::{
    DirectoryLookup, DirectoryMember, DirectorySource, OnCallEntry, PagerDutyClient,
    ScheduleSource, SlackClient,
};
pub use render::{render, ContactMethod, ReportBody};
pub use report::{Reports, Section};
pub use roster::Roster;
pub use schedule::{resolve_target_date, Timeframe};
