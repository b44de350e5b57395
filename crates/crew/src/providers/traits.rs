//! Source traits and the records they produce.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::Result;

// ============================================================================
// Schedule side
// ============================================================================

/// A single on-call assignment as reported by the schedule service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OnCallEntry {
    /// Person's display name.
    pub name: String,
    /// Contact address. Identity of the person for deduplication.
    pub email: String,
}

impl OnCallEntry {
    #[must_use]
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
        }
    }
}

/// Anything that can list who is on call for an escalation policy.
#[async_trait]
pub trait ScheduleSource: Send + Sync {
    /// Name of the backing service, for logs.
    fn name(&self) -> &'static str;

    /// Fetch raw on-call entries, in response order, duplicates included.
    ///
    /// When `date` is given the query is scoped to that single instant.
    async fn fetch_on_call(
        &self,
        escalation_policy: &str,
        date: Option<DateTime<Utc>>,
    ) -> Result<Vec<OnCallEntry>>;
}

// ============================================================================
// Directory side
// ============================================================================

/// A chat-service member profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DirectoryMember {
    /// Full display name, the join key against on-call entries.
    pub display_name: String,
    /// Login / short user name.
    pub login_name: String,
    /// Identifier used to build a mention.
    pub mention_handle: String,
}

impl DirectoryMember {
    /// Mention token for this member, e.g. `<@U123>`.
    #[must_use]
    pub fn mention(&self) -> String {
        format!("<@{}>", self.mention_handle)
    }
}

/// Display name to member profile.
///
/// On duplicate display names the later member wins.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DirectoryLookup {
    members: HashMap<String, DirectoryMember>,
}

impl DirectoryLookup {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a member, replacing any earlier member with the same display name.
    ///
    /// Members without a display name are skipped; they could only ever match
    /// an on-call entry with an empty name.
    pub fn insert(&mut self, member: DirectoryMember) {
        if member.display_name.is_empty() {
            return;
        }
        self.members.insert(member.display_name.clone(), member);
    }

    /// Exact, case-sensitive lookup.
    #[must_use]
    pub fn get(&self, display_name: &str) -> Option<&DirectoryMember> {
        self.members.get(display_name)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.members.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}

impl FromIterator<DirectoryMember> for DirectoryLookup {
    fn from_iter<I: IntoIterator<Item = DirectoryMember>>(iter: I) -> Self {
        let mut lookup = Self::new();
        for member in iter {
            lookup.insert(member);
        }
        lookup
    }
}

/// Anything that can resolve a channel into a name-keyed member directory.
#[async_trait]
pub trait DirectorySource: Send + Sync {
    /// Name of the backing service, for logs.
    fn name(&self) -> &'static str;

    /// Fetch every member of `channel` and key them by display name.
    async fn fetch_directory(&self, channel: &str) -> Result<DirectoryLookup>;
}
