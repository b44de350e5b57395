//! PagerDuty API response models.

use serde::Deserialize;

use crate::providers::OnCallEntry;

/// Envelope returned by `GET /oncalls`.
#[derive(Debug, Clone, Deserialize)]
pub struct OnCallsResponse {
    /// On-call assignments in response order.
    #[serde(default)]
    pub oncalls: Vec<OnCall>,
}

/// One on-call assignment.
#[derive(Debug, Clone, Deserialize)]
pub struct OnCall {
    /// Assigned user, expanded via `include[]=users`.
    pub user: PagerDutyUser,
}

/// User object embedded in an on-call assignment.
#[derive(Debug, Clone, Deserialize)]
pub struct PagerDutyUser {
    pub name: String,
    pub email: String,
}

impl From<OnCall> for OnCallEntry {
    fn from(oncall: OnCall) -> Self {
        Self {
            name: oncall.user.name,
            email: oncall.user.email,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_envelope() {
        let body = r#"{
            "oncalls": [
                {"escalation_level": 1, "user": {"id": "P1", "name": "Alice", "email": "alice@example.com"}},
                {"user": {"name": "Bob", "email": "bob@example.com"}}
            ],
            "limit": 25,
            "more": false
        }"#;

        let response: OnCallsResponse = serde_json::from_str(body).unwrap();
        let entries: Vec<OnCallEntry> = response.oncalls.into_iter().map(Into::into).collect();

        assert_eq!(
            entries,
            vec![
                OnCallEntry::new("Alice", "alice@example.com"),
                OnCallEntry::new("Bob", "bob@example.com"),
            ]
        );
    }

    #[test]
    fn test_missing_oncalls_is_empty() {
        let response: OnCallsResponse = serde_json::from_str("{}").unwrap();
        assert!(response.oncalls.is_empty());
    }

    #[test]
    fn test_user_without_email_is_rejected() {
        let body = r#"{"oncalls": [{"user": {"name": "Alice"}}]}"#;
        assert!(serde_json::from_str::<OnCallsResponse>(body).is_err());
    }
}
