//! Per-instance presence log for plain-value fields.

use std::collections::BTreeSet;

/// Names of the plain-value fields a caller assigned through setters.
///
/// The log only grows: there is no way to remove an entry. An option struct
/// reused across requests keeps everything it was ever given, so callers that
/// want a clean slate build a fresh instance.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Presence {
    fields: BTreeSet<&'static str>,
}

impl Presence {
    /// Empty log.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record that `field` was assigned. Marking twice is the same as once.
    pub fn mark(&mut self, field: &'static str) {
        self.fields.insert(field);
    }

    /// Whether `field` was assigned.
    pub fn contains(&self, field: &str) -> bool {
        self.fields.contains(field)
    }

    /// Logged field names, sorted.
    pub fn iter(&self) -> impl Iterator<Item = &'static str> {
        self.fields.iter().copied()
    }

    /// Number of logged fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// True if nothing was logged.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}
