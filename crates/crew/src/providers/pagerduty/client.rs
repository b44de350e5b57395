//! PagerDuty REST API v2 client.

use async_trait::async_trait;
use chrono::{DateTime, SecondsFormat, Utc};
use reqwest::Client;
use tracing::{debug, instrument, warn};

use super::models::OnCallsResponse;
use crate::error::{CrewError, Result};
use crate::providers::{OnCallEntry, ScheduleSource};

/// Production PagerDuty API endpoint.
pub const DEFAULT_PAGERDUTY_API_URL: &str = "https://api.pagerduty.com";

const SERVICE: &str = "PagerDuty";
const ACCEPT_HEADER: &str = "application/vnd.pagerduty+json;version=2";

/// PagerDuty on-call schedule client.
#[derive(Debug, Clone)]
pub struct PagerDutyClient {
    client: Client,
    api_key: String,
    base_url: String,
}

impl PagerDutyClient {
    /// Create a new client against the production API.
    ///
    /// # Errors
    ///
    /// Returns an error if the API key is empty or the HTTP client cannot be built.
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        let api_key = api_key.into();
        if api_key.is_empty() {
            return Err(CrewError::Config(
                "PagerDuty API key is required".to_string(),
            ));
        }

        let client = Client::builder()
            .user_agent(concat!("crew/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client,
            api_key,
            base_url: DEFAULT_PAGERDUTY_API_URL.to_string(),
        })
    }

    /// Point the client at a different API root (mock servers, proxies).
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    /// Query parameters for `/oncalls`.
    ///
    /// `since` and `until` carry the same instant, giving a point-in-time view.
    fn build_query(
        escalation_policy: &str,
        date: Option<DateTime<Utc>>,
    ) -> Vec<(&'static str, String)> {
        let mut params = vec![
            ("time_zone", "UTC".to_string()),
            ("include[]", "users".to_string()),
            ("escalation_policy_ids[]", escalation_policy.to_string()),
        ];

        if let Some(date) = date {
            let stamp = date.to_rfc3339_opts(SecondsFormat::Secs, true);
            params.push(("since", stamp.clone()));
            params.push(("until", stamp));
        }

        params
    }
}

#[async_trait]
impl ScheduleSource for PagerDutyClient {
    fn name(&self) -> &'static str {
        "pagerduty"
    }

    #[instrument(skip(self), fields(provider = "pagerduty"))]
    async fn fetch_on_call(
        &self,
        escalation_policy: &str,
        date: Option<DateTime<Utc>>,
    ) -> Result<Vec<OnCallEntry>> {
        if escalation_policy.is_empty() {
            return Err(CrewError::Config(
                "escalation policy id is required".to_string(),
            ));
        }

        let url = format!("{}/oncalls", self.base_url);
        let query = Self::build_query(escalation_policy, date);
        debug!(url = %url, "Requesting on-call schedule");

        let response = self
            .client
            .get(&url)
            .header("Accept", ACCEPT_HEADER)
            .header("Authorization", format!("Token token={}", self.api_key))
            .query(&query)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            warn!(status = %status, "PagerDuty API request failed");
            return Err(CrewError::Upstream {
                service: SERVICE,
                status: status.as_u16(),
                body,
            });
        }

        let decoded: OnCallsResponse =
            serde_json::from_str(&body).map_err(|source| CrewError::Decode {
                service: SERVICE,
                source,
            })?;

        let entries: Vec<OnCallEntry> = decoded.oncalls.into_iter().map(Into::into).collect();
        debug!(count = entries.len(), "Received on-call entries");

        Ok(entries)
    }
}
