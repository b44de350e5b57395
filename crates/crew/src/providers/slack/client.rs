//! Slack Web API client.

use async_trait::async_trait;
use futures::stream::{self, StreamExt, TryStreamExt};
use reqwest::Client;
use serde::de::DeserializeOwned;
use tracing::{debug, instrument, warn};

use super::models::{GroupInfoResponse, SlackStatus, UserInfoResponse};
use crate::error::{CrewError, Result};
use crate::providers::{DirectoryLookup, DirectoryMember, DirectorySource};

/// Production Slack Web API root.
pub const DEFAULT_SLACK_API_URL: &str = "https://slack.com/api";

const SERVICE: &str = "Slack";

/// Slack directory client.
#[derive(Debug, Clone)]
pub struct SlackClient {
    client: Client,
    token: String,
    base_url: String,
    concurrency: usize,
}

impl SlackClient {
    /// Create a new client against the production API.
    ///
    /// Member lookups run one at a time unless [`Self::with_concurrency`] is used.
    ///
    /// # Errors
    ///
    /// Returns an error if the token is empty or the HTTP client cannot be built.
    pub fn new(token: impl Into<String>) -> Result<Self> {
        let token = token.into();
        if token.is_empty() {
            return Err(CrewError::Config("Slack token is required".to_string()));
        }

        let client = Client::builder()
            .user_agent(concat!("crew/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client,
            token,
            base_url: DEFAULT_SLACK_API_URL.to_string(),
            concurrency: 1,
        })
    }

    /// Point the client at a different API root (mock servers, proxies).
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    /// Allow up to `concurrency` profile lookups in flight. Zero is treated as one.
    #[must_use]
    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency.max(1);
        self
    }

    /// Make a GET request to a Web API method and decode the typed payload.
    async fn get<T>(&self, method: &str, query: &[(&str, &str)]) -> Result<T>
    where
        T: DeserializeOwned,
    {
        let url = format!("{}/{method}", self.base_url);
        debug!(url = %url, "Making Slack API request");

        let response = self
            .client
            .get(&url)
            .bearer_auth(&self.token)
            .query(query)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            warn!(status = %status, method, "Slack API request failed");
            return Err(CrewError::Upstream {
                service: SERVICE,
                status: status.as_u16(),
                body,
            });
        }

        let api_status: SlackStatus = decode(&body)?;
        if !api_status.is_ok() {
            let error = api_status.error.unwrap_or_else(|| "unknown_error".to_string());
            warn!(method, error = %error, "Slack API returned an error");
            return Err(CrewError::Upstream {
                service: SERVICE,
                status: status.as_u16(),
                body: error,
            });
        }

        decode(&body)
    }

    /// Member ids of a private channel, in channel order.
    async fn channel_members(&self, channel: &str) -> Result<Vec<String>> {
        let response: GroupInfoResponse = self.get("groups.info", &[("channel", channel)]).await?;
        Ok(response.group.members)
    }

    /// Profile for a single member id.
    async fn member_profile(&self, user_id: &str) -> Result<DirectoryMember> {
        let response: UserInfoResponse = self.get("users.info", &[("user", user_id)]).await?;
        Ok(response.user.into())
    }
}

fn decode<T: DeserializeOwned>(body: &str) -> Result<T> {
    serde_json::from_str(body).map_err(|source| CrewError::Decode {
        service: SERVICE,
        source,
    })
}

#[async_trait]
impl DirectorySource for SlackClient {
    fn name(&self) -> &'static str {
        "slack"
    }

    #[instrument(skip(self), fields(provider = "slack"))]
    async fn fetch_directory(&self, channel: &str) -> Result<DirectoryLookup> {
        if channel.is_empty() {
            return Err(CrewError::Config("Slack channel id is required".to_string()));
        }

        let members = self.channel_members(channel).await?;
        debug!(
            members = members.len(),
            concurrency = self.concurrency,
            "Resolving channel members"
        );

        // `buffered` yields in input order, so later members still overwrite
        // earlier ones on duplicate display names.
        let profiles: Vec<DirectoryMember> = stream::iter(members)
            .map(|id| async move { self.member_profile(&id).await })
            .buffered(self.concurrency)
            .try_collect()
            .await?;

        let lookup: DirectoryLookup = profiles.into_iter().collect();
        debug!(entries = lookup.len(), "Built directory lookup");

        Ok(lookup)
    }
}
