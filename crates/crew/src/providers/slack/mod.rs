//! Slack Web API directory client.
//!
//! Resolves a private channel (group) into its members, then fetches each
//! member's profile to build a display-name keyed [`DirectoryLookup`].
//!
//! [`DirectoryLookup`]: crate::providers::DirectoryLookup

mod client;
mod models;

pub use client::{SlackClient, DEFAULT_SLACK_API_URL};
pub use models::*;
