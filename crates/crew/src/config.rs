//! Run configuration.
//!
//! Everything is read from the environment exactly once, before any network
//! or file I/O, and then passed into the pipeline by reference.

use std::fmt;

use crate::error::{CrewError, Result};
use crate::providers::pagerduty::DEFAULT_PAGERDUTY_API_URL;
use crate::providers::slack::DEFAULT_SLACK_API_URL;
use crate::report::DEFAULT_ISSUES_URL;
use crate::schedule::Timeframe;

pub const ENV_PAGERDUTY_API_KEY: &str = "PAGERDUTY_API_KEY";
pub const ENV_PAGERDUTY_ESCALATION_POLICY: &str = "PAGERDUTY_ESCALATION_POLICY";
pub const ENV_PAGERDUTY_EXTERNAL_ESCALATION_POLICY: &str = "PAGERDUTY_EXTERNAL_ESCALATION_POLICY";
pub const ENV_PAGERDUTY_API_URL: &str = "PAGERDUTY_API_URL";
pub const ENV_SLACK_TOKEN: &str = "SLACK_TOKEN";
pub const ENV_SLACK_CHANNEL: &str = "SLACK_CHANNEL";
pub const ENV_SLACK_API_URL: &str = "SLACK_API_URL";
pub const ENV_SLACK_LOOKUP_CONCURRENCY: &str = "SLACK_LOOKUP_CONCURRENCY";
pub const ENV_CREW_TIMEFRAME: &str = "CREW_TIMEFRAME";
pub const ENV_WINGS_ISSUES_URL: &str = "WINGS_ISSUES_URL";

/// Who an escalation policy's roster is for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Audience {
    Internal,
    External,
}

impl Audience {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Internal => "internal",
            Self::External => "external",
        }
    }
}

/// An escalation policy to report on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PolicyTarget {
    pub audience: Audience,
    pub id: String,
}

/// Validated run configuration.
#[derive(Clone)]
pub struct Config {
    /// PagerDuty REST API key.
    pub pagerduty_api_key: String,
    /// PagerDuty API root.
    pub pagerduty_api_url: String,
    /// Internal policy first, then the optional external one.
    pub policies: Vec<PolicyTarget>,
    /// Slack bot/user token.
    pub slack_token: String,
    /// Slack API root.
    pub slack_api_url: String,
    /// Private channel whose members form the directory.
    pub slack_channel: String,
    /// Maximum in-flight Slack profile lookups.
    pub lookup_concurrency: usize,
    /// Which day the roster is for.
    pub timeframe: Timeframe,
    /// Issue tracker linked from the audience report.
    pub issues_url: String,
}

impl Config {
    /// Build configuration from process environment variables.
    ///
    /// # Required Environment Variables
    /// - `PAGERDUTY_API_KEY`
    /// - `PAGERDUTY_ESCALATION_POLICY`
    /// - `SLACK_TOKEN`
    /// - `SLACK_CHANNEL`
    /// - `CREW_TIMEFRAME`: `Current` or `Next`
    ///
    /// # Optional Environment Variables
    /// - `PAGERDUTY_EXTERNAL_ESCALATION_POLICY`: second roster section
    /// - `WINGS_ISSUES_URL`: link in the audience report
    /// - `SLACK_LOOKUP_CONCURRENCY`: profile lookups in flight (default: 1)
    /// - `PAGERDUTY_API_URL`, `SLACK_API_URL`: API root overrides
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup.
    ///
    /// Empty values are treated the same as unset ones.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let optional = |key: &str| lookup(key).filter(|v| !v.is_empty());
        let required = |key: &str| {
            optional(key).ok_or_else(|| {
                CrewError::Config(format!("Empty or unset environment variable {key}"))
            })
        };

        let pagerduty_api_key = required(ENV_PAGERDUTY_API_KEY)?;
        let internal_policy = required(ENV_PAGERDUTY_ESCALATION_POLICY)?;
        let slack_token = required(ENV_SLACK_TOKEN)?;
        let slack_channel = required(ENV_SLACK_CHANNEL)?;
        let timeframe: Timeframe = required(ENV_CREW_TIMEFRAME)?.parse()?;

        let mut policies = vec![PolicyTarget {
            audience: Audience::Internal,
            id: internal_policy,
        }];
        if let Some(id) = optional(ENV_PAGERDUTY_EXTERNAL_ESCALATION_POLICY) {
            policies.push(PolicyTarget {
                audience: Audience::External,
                id,
            });
        }

        let lookup_concurrency = match optional(ENV_SLACK_LOOKUP_CONCURRENCY) {
            Some(raw) => raw
                .parse::<usize>()
                .ok()
                .filter(|n| *n > 0)
                .ok_or_else(|| {
                    CrewError::Config(format!(
                        "{ENV_SLACK_LOOKUP_CONCURRENCY} must be a positive integer, got {raw:?}"
                    ))
                })?,
            None => 1,
        };

        Ok(Self {
            pagerduty_api_key,
            pagerduty_api_url: optional(ENV_PAGERDUTY_API_URL)
                .unwrap_or_else(|| DEFAULT_PAGERDUTY_API_URL.to_string()),
            policies,
            slack_token,
            slack_api_url: optional(ENV_SLACK_API_URL)
                .unwrap_or_else(|| DEFAULT_SLACK_API_URL.to_string()),
            slack_channel,
            lookup_concurrency,
            timeframe,
            issues_url: optional(ENV_WINGS_ISSUES_URL)
                .unwrap_or_else(|| DEFAULT_ISSUES_URL.to_string()),
        })
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("pagerduty_api_key", &"<redacted>")
            .field("pagerduty_api_url", &self.pagerduty_api_url)
            .field("policies", &self.policies)
            .field("slack_token", &"<redacted>")
            .field("slack_api_url", &self.slack_api_url)
            .field("slack_channel", &self.slack_channel)
            .field("lookup_concurrency", &self.lookup_concurrency)
            .field("timeframe", &self.timeframe)
            .field("issues_url", &self.issues_url)
            .finish()
    }
}
