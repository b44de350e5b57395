//! Deduplicated on-call roster.

use std::collections::HashSet;

use crate::providers::OnCallEntry;

/// Ordered on-call entries, unique by email.
///
/// Order is first appearance in the source response. Identity is the email,
/// so two different names sharing an address collapse to the first one.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Roster {
    entries: Vec<OnCallEntry>,
}

impl Roster {
    /// Build a roster from raw entries, keeping the first entry per email.
    #[must_use]
    pub fn dedupe(raw: impl IntoIterator<Item = OnCallEntry>) -> Self {
        let raw = raw.into_iter();
        let mut seen = HashSet::with_capacity(raw.size_hint().0);
        let entries = raw
            .filter(|entry| seen.insert(entry.email.clone()))
            .collect();

        Self { entries }
    }

    #[must_use]
    pub fn entries(&self) -> &[OnCallEntry] {
        &self.entries
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, OnCallEntry> {
        self.entries.iter()
    }
}

impl<'a> IntoIterator for &'a Roster {
    type Item = &'a OnCallEntry;
    type IntoIter = std::slice::Iter<'a, OnCallEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
