//! On-call pipeline - orchestrates the full fetch-dedupe-render-assemble flow.

use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::config::{Config, PolicyTarget};
use crate::error::Result;
use crate::providers::{DirectorySource, PagerDutyClient, ScheduleSource, SlackClient};
use crate::render::render;
use crate::report::{audience_report, internal_report, Reports, Section};
use crate::roster::Roster;
use crate::schedule::{format_report_date, resolve_target_date, Timeframe};

/// On-call pipeline for a single run.
pub struct Pipeline {
    config: Config,
    schedule: Arc<dyn ScheduleSource>,
    directory: Arc<dyn DirectorySource>,
}

impl Pipeline {
    /// Create a pipeline over explicit sources.
    #[must_use]
    pub fn new(
        config: Config,
        schedule: Arc<dyn ScheduleSource>,
        directory: Arc<dyn DirectorySource>,
    ) -> Self {
        Self {
            config,
            schedule,
            directory,
        }
    }

    /// Create a pipeline backed by the PagerDuty and Slack HTTP clients.
    pub fn from_config(config: Config) -> Result<Self> {
        let schedule = PagerDutyClient::new(config.pagerduty_api_key.clone())?
            .with_base_url(config.pagerduty_api_url.clone());
        let directory = SlackClient::new(config.slack_token.clone())?
            .with_base_url(config.slack_api_url.clone())
            .with_concurrency(config.lookup_concurrency);

        Ok(Self::new(config, Arc::new(schedule), Arc::new(directory)))
    }

    /// Build both reports for the instant `now`.
    ///
    /// Any upstream failure aborts the run; no partial reports are produced.
    pub async fn run(&self, now: DateTime<Utc>) -> Result<Reports> {
        let timeframe = self.config.timeframe;
        let target = resolve_target_date(now, timeframe);
        let date = format_report_date(target);

        tracing::info!(
            now = %now,
            timeframe = %timeframe,
            target = %target,
            policies = self.config.policies.len(),
            "Starting on-call run"
        );

        let directory = self
            .directory
            .fetch_directory(&self.config.slack_channel)
            .await?;
        tracing::info!(
            source = self.directory.name(),
            members = directory.len(),
            "Loaded directory"
        );

        let multiple = self.config.policies.len() > 1;
        let mut sections = Vec::with_capacity(self.config.policies.len());

        for policy in &self.config.policies {
            let raw = self.schedule.fetch_on_call(&policy.id, Some(target)).await?;
            let fetched = raw.len();
            let roster = Roster::dedupe(raw);

            tracing::info!(
                source = self.schedule.name(),
                policy = %policy.id,
                audience = policy.audience.as_str(),
                fetched,
                unique = roster.len(),
                "Resolved roster"
            );

            let body = render(&roster, &directory);
            sections.push(Section::new(section_label(timeframe, policy, multiple), body));
        }

        let primary = sections
            .first()
            .map(|s| s.body.clone())
            .unwrap_or_default();

        Ok(Reports {
            internal: internal_report(&sections, &date),
            audience: audience_report(&primary, &self.config.issues_url),
        })
    }
}

/// A lone policy is labelled by the timeframe; several also name their audience.
fn section_label(timeframe: Timeframe, policy: &PolicyTarget, multiple: bool) -> String {
    if multiple {
        format!("{timeframe} {}", policy.audience.as_str())
    } else {
        timeframe.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Audience;
    use crate::error::CrewError;
    use crate::providers::{DirectoryLookup, DirectoryMember, OnCallEntry};
    use async_trait::async_trait;
    use chrono::TimeZone;
    use std::collections::HashMap;
    use std::sync::Mutex;

    struct FakeSchedule {
        by_policy: HashMap<String, Vec<OnCallEntry>>,
        requested: Mutex<Vec<(String, Option<DateTime<Utc>>)>>,
    }

    #[async_trait]
    impl ScheduleSource for FakeSchedule {
        fn name(&self) -> &'static str {
            "fake-schedule"
        }

        async fn fetch_on_call(
            &self,
            escalation_policy: &str,
            date: Option<DateTime<Utc>>,
        ) -> Result<Vec<OnCallEntry>> {
            self.requested
                .lock()
                .unwrap()
                .push((escalation_policy.to_string(), date));
            self.by_policy
                .get(escalation_policy)
                .cloned()
                .ok_or_else(|| CrewError::Upstream {
                    service: "fake",
                    status: 404,
                    body: escalation_policy.to_string(),
                })
        }
    }

    struct FakeDirectory(Vec<DirectoryMember>);

    #[async_trait]
    impl DirectorySource for FakeDirectory {
        fn name(&self) -> &'static str {
            "fake-directory"
        }

        async fn fetch_directory(&self, _channel: &str) -> Result<DirectoryLookup> {
            Ok(self.0.iter().cloned().collect())
        }
    }

    fn config(timeframe: Timeframe, policies: &[(Audience, &str)]) -> Config {
        Config {
            pagerduty_api_key: "key".to_string(),
            pagerduty_api_url: "http://unused".to_string(),
            policies: policies
                .iter()
                .map(|(audience, id)| PolicyTarget {
                    audience: *audience,
                    id: (*id).to_string(),
                })
                .collect(),
            slack_token: "token".to_string(),
            slack_api_url: "http://unused".to_string(),
            slack_channel: "G1".to_string(),
            lookup_concurrency: 1,
            timeframe,
            issues_url: "https://issues.example".to_string(),
        }
    }

    fn schedule(entries: &[(&str, &[(&str, &str)])]) -> Arc<FakeSchedule> {
        Arc::new(FakeSchedule {
            by_policy: entries
                .iter()
                .map(|(policy, list)| {
                    (
                        (*policy).to_string(),
                        list.iter().map(|(n, e)| OnCallEntry::new(*n, *e)).collect(),
                    )
                })
                .collect(),
            requested: Mutex::new(Vec::new()),
        })
    }

    fn alice_directory() -> Arc<FakeDirectory> {
        Arc::new(FakeDirectory(vec![DirectoryMember {
            display_name: "Alice".to_string(),
            login_name: "alice".to_string(),
            mention_handle: "U1".to_string(),
        }]))
    }

    #[tokio::test]
    async fn test_single_policy_run() {
        let sched = schedule(&[(
            "PINT",
            &[("Alice", "alice@x"), ("Bob", "bob@x"), ("Alice", "alice@x")],
        )]);
        let pipeline = Pipeline::new(
            config(Timeframe::Next, &[(Audience::Internal, "PINT")]),
            sched.clone(),
            alice_directory(),
        );

        // Friday
        let now = Utc.with_ymd_and_hms(2024, 1, 5, 9, 0, 0).unwrap();
        let reports = pipeline.run(now).await.unwrap();

        assert_eq!(
            reports.internal,
            "Next on-call users for Mon, Jan 08:\n- Alice ( <@U1> )\n- Bob ( bob@x )\n"
        );
        assert_eq!(
            reports.audience,
            "Good morning, your pilots (interrupt pair) for today are:\n\
             - Alice ( <@U1> )\n- Bob ( bob@x )\n\
             Reminder, you can also submit issues to https://issues.example"
        );

        let requested = sched.requested.lock().unwrap();
        assert_eq!(
            *requested,
            vec![(
                "PINT".to_string(),
                Some(Utc.with_ymd_and_hms(2024, 1, 8, 9, 0, 0).unwrap())
            )]
        );
    }

    #[tokio::test]
    async fn test_two_policies_concatenate_sections() {
        let pipeline = Pipeline::new(
            config(
                Timeframe::Current,
                &[(Audience::Internal, "PINT"), (Audience::External, "PEXT")],
            ),
            schedule(&[("PINT", &[("Alice", "alice@x")]), ("PEXT", &[("Carol", "carol@x")])]),
            alice_directory(),
        );

        let now = Utc.with_ymd_and_hms(2024, 1, 4, 9, 0, 0).unwrap();
        let reports = pipeline.run(now).await.unwrap();

        assert_eq!(
            reports.internal,
            "Current internal on-call users for Thu, Jan 04:\n- Alice ( <@U1> )\n\
             Current external on-call users for Thu, Jan 04:\n- Carol ( carol@x )\n"
        );
        assert!(reports.audience.contains("- Alice ( <@U1> )\n"));
        assert!(!reports.audience.contains("Carol"));
    }

    #[tokio::test]
    async fn test_empty_schedule_keeps_headers() {
        let pipeline = Pipeline::new(
            config(Timeframe::Current, &[(Audience::Internal, "PINT")]),
            schedule(&[("PINT", &[])]),
            alice_directory(),
        );

        let now = Utc.with_ymd_and_hms(2024, 1, 4, 9, 0, 0).unwrap();
        let reports = pipeline.run(now).await.unwrap();

        assert_eq!(reports.internal, "Current on-call users for Thu, Jan 04:\n");
    }

    #[tokio::test]
    async fn test_schedule_failure_aborts_run() {
        let pipeline = Pipeline::new(
            config(
                Timeframe::Current,
                &[(Audience::Internal, "PINT"), (Audience::External, "PMISSING")],
            ),
            schedule(&[("PINT", &[("Alice", "alice@x")])]),
            alice_directory(),
        );

        let now = Utc.with_ymd_and_hms(2024, 1, 4, 9, 0, 0).unwrap();
        let err = pipeline.run(now).await.unwrap_err();
        assert!(matches!(err, CrewError::Upstream { status: 404, .. }));
    }
}
