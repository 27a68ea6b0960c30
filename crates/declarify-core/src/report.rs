//! Per-run outcome of every keyword

use indexmap::IndexSet;
use std::fmt;

/// Three-way partition of a call's keywords
///
/// The sets are disjoint and keep source order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MigrationReport {
    migrated: IndexSet<String>,
    opaque: IndexSet<String>,
    unrecognized: IndexSet<String>,
}

impl MigrationReport {
    /// Create empty report
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn record_migrated(&mut self, keyword: &str) {
        self.migrated.insert(keyword.to_string());
    }

    pub(crate) fn record_opaque(&mut self, keyword: &str) {
        self.opaque.insert(keyword.to_string());
    }

    pub(crate) fn record_unrecognized(&mut self, keyword: &str) {
        self.unrecognized.insert(keyword.to_string());
    }

    /// Keywords moved into the document
    #[inline]
    #[must_use]
    pub fn migrated(&self) -> &IndexSet<String> {
        &self.migrated
    }

    /// Known keywords left in the call because their value is not literal
    #[inline]
    #[must_use]
    pub fn opaque(&self) -> &IndexSet<String> {
        &self.opaque
    }

    /// Keywords with no document field
    #[inline]
    #[must_use]
    pub fn unrecognized(&self) -> &IndexSet<String> {
        &self.unrecognized
    }

    /// Check if nothing was migrated
    #[inline]
    #[must_use]
    pub fn is_noop(&self) -> bool {
        self.migrated.is_empty()
    }

    /// Check if nothing was recorded at all
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.migrated.is_empty() && self.opaque.is_empty() && self.unrecognized.is_empty()
    }

    /// Check that the three sets are disjoint and together hold exactly `keywords`
    pub fn is_partition_of<'a>(&self, keywords: impl IntoIterator<Item = &'a str>) -> bool {
        let expected: IndexSet<&str> = keywords.into_iter().collect();
        let total = self.migrated.len() + self.opaque.len() + self.unrecognized.len();
        total == expected.len()
            && self
                .migrated
                .iter()
                .chain(&self.opaque)
                .chain(&self.unrecognized)
                .all(|k| expected.contains(k.as_str()))
    }
}

impl fmt::Display for MigrationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let groups = [
            ("migrated", &self.migrated),
            ("too complicated", &self.opaque),
            ("unrecognized", &self.unrecognized),
        ];
        for (label, keywords) in groups {
            if keywords.is_empty() {
                writeln!(f, "{label}: -")?;
            } else {
                let list: Vec<&str> = keywords.iter().map(String::as_str).collect();
                writeln!(f, "{label}: {}", list.join(", "))?;
            }
        }
        Ok(())
    }
}
