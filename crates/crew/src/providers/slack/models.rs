//! Slack Web API response models.

use serde::Deserialize;

use crate::providers::DirectoryMember;

/// Status fields present on every Slack Web API response.
///
/// Slack reports most failures as HTTP 200 with `ok: false`.
#[derive(Debug, Clone, Deserialize)]
pub struct SlackStatus {
    #[serde(default)]
    pub ok: Option<bool>,
    #[serde(default)]
    pub error: Option<String>,
}

impl SlackStatus {
    /// A missing `ok` flag counts as success.
    #[must_use]
    pub fn is_ok(&self) -> bool {
        self.ok.unwrap_or(true)
    }
}

/// Response from `groups.info`.
#[derive(Debug, Clone, Deserialize)]
pub struct GroupInfoResponse {
    pub group: SlackGroup,
}

/// Private channel details.
#[derive(Debug, Clone, Deserialize)]
pub struct SlackGroup {
    /// Member user ids, in channel order.
    #[serde(default)]
    pub members: Vec<String>,
}

/// Response from `users.info`.
#[derive(Debug, Clone, Deserialize)]
pub struct UserInfoResponse {
    pub user: SlackUser,
}

/// User profile.
#[derive(Debug, Clone, Deserialize)]
pub struct SlackUser {
    /// Full name. Bots and deactivated users may omit it; such members are
    /// left out of the directory lookup.
    #[serde(default)]
    pub real_name: String,
    pub name: String,
    pub id: String,
}

impl From<SlackUser> for DirectoryMember {
    fn from(user: SlackUser) -> Self {
        Self {
            display_name: user.real_name,
            login_name: user.name,
            mention_handle: user.id,
        }
    }
}
