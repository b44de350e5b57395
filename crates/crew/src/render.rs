//! Contact resolution and roster rendering.

use std::fmt;

use crate::providers::{DirectoryLookup, OnCallEntry};
use crate::roster::Roster;

/// How to reach an on-call person.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContactMethod {
    /// Chat mention token, e.g. `<@U123>`.
    Mention(String),
    /// Raw contact address from the schedule.
    Email(String),
}

impl ContactMethod {
    /// Prefer a directory mention, falling back to the entry's email.
    #[must_use]
    pub fn resolve(entry: &OnCallEntry, directory: &DirectoryLookup) -> Self {
        match directory.get(&entry.name) {
            Some(member) => Self::Mention(member.mention()),
            None => Self::Email(entry.email.clone()),
        }
    }
}

impl fmt::Display for ContactMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Mention(token) | Self::Email(token) => f.write_str(token),
        }
    }
}

/// Rendered roster lines, one per entry, roster order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReportBody {
    lines: Vec<String>,
}

impl ReportBody {
    #[must_use]
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

/// Every line carries its own terminator; an empty body renders as "".
impl fmt::Display for ReportBody {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for line in &self.lines {
            writeln!(f, "{line}")?;
        }
        Ok(())
    }
}

/// Join a roster against the directory and render one line per entry.
#[must_use]
pub fn render(roster: &Roster, directory: &DirectoryLookup) -> ReportBody {
    let lines = roster
        .iter()
        .map(|entry| {
            let contact = ContactMethod::resolve(entry, directory);
            format!("- {} ( {contact} )", entry.name)
        })
        .collect();

    ReportBody { lines }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::providers::DirectoryMember;

    fn directory(members: &[(&str, &str)]) -> DirectoryLookup {
        members
            .iter()
            .map(|(name, id)| DirectoryMember {
                display_name: (*name).to_string(),
                login_name: name.to_lowercase(),
                mention_handle: (*id).to_string(),
            })
            .collect()
    }

    fn roster(entries: &[(&str, &str)]) -> Roster {
        Roster::dedupe(entries.iter().map(|(n, e)| OnCallEntry::new(*n, *e)))
    }

    #[test]
    fn test_matched_name_uses_mention() {
        let body = render(
            &roster(&[("Alice", "alice@x")]),
            &directory(&[("Alice", "U1")]),
        );
        assert_eq!(body.to_string(), "- Alice ( <@U1> )\n");
    }

    #[test]
    fn test_unmatched_name_uses_email() {
        let body = render(&roster(&[("Alice", "alice@x")]), &DirectoryLookup::new());
        assert_eq!(body.to_string(), "- Alice ( alice@x )\n");
    }

    #[test]
    fn test_match_is_case_sensitive() {
        let contact = ContactMethod::resolve(
            &OnCallEntry::new("alice", "alice@x"),
            &directory(&[("Alice", "U1")]),
        );
        assert_eq!(contact, ContactMethod::Email("alice@x".to_string()));
    }

    #[test]
    fn test_lines_follow_roster_order() {
        let body = render(
            &roster(&[("Bob", "bob@x"), ("Alice", "alice@x"), ("Carol", "carol@x")]),
            &directory(&[("Carol", "U3"), ("Alice", "U1")]),
        );
        assert_eq!(
            body.to_string(),
            "- Bob ( bob@x )\n- Alice ( <@U1> )\n- Carol ( <@U3> )\n"
        );
    }

    #[test]
    fn test_empty_roster_renders_nothing() {
        let body = render(&Roster::default(), &directory(&[("Alice", "U1")]));
        assert!(body.is_empty());
        assert_eq!(body.to_string(), "");
    }

    #[test]
    fn test_render_is_idempotent() {
        let r = roster(&[("Alice", "alice@x"), ("Bob", "bob@x")]);
        let d = directory(&[("Bob", "U2")]);
        assert_eq!(render(&r, &d).to_string(), render(&r, &d).to_string());
    }
}
