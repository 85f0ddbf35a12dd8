//! Effort estimation from difficulty labels.
//!
//! Issues carry a `D-` prefixed label describing how long they should take,
//! measured against an eight hour working day:
//!
//! | label          | estimate                  | hours |
//! |----------------|---------------------------|-------|
//! | `D-Super Easy` | less than an hour         | 1     |
//! | `D-Easy`       | half a day                | 4     |
//! | `D-Average`    | a full day                | 8     |
//! | `D-Hard`       | two to three days         | 24    |
//! | `D-Super Hard` | more than a working week  | 40    |
//!
//! Labels that are not in the table (renamed, misspelled) resolve to the
//! closest entry by edit distance instead of failing.

use crate::fuzzy;
use tracing::debug;

/// Prefix shared by every difficulty label.
pub const DIFFICULTY_PREFIX: &str = "D-";

const STANDARD_TABLE: [(&str, u32); 5] = [
    ("D-Super Easy", 1),
    ("D-Easy", 4),
    ("D-Average", 8),
    ("D-Hard", 24),
    ("D-Super Hard", 40),
];

/// Ordered mapping from difficulty label to estimated hours.
///
/// Order matters: when two entries are equally close to an unknown label the
/// earlier one wins.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DifficultyTable {
    entries: Vec<(String, u32)>,
}

impl DifficultyTable {
    /// The five canonical difficulty labels.
    pub fn standard() -> Self {
        Self::from_entries(STANDARD_TABLE)
    }

    /// Build a table from `(label, hours)` pairs, preserving their order.
    pub fn from_entries<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = (S, u32)>,
        S: Into<String>,
    {
        Self {
            entries: entries
                .into_iter()
                .map(|(label, hours)| (label.into(), hours))
                .collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Labels in table order.
    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(label, _)| label.as_str())
    }

    /// Exact lookup, no fuzzy fallback.
    pub fn get(&self, label: &str) -> Option<u32> {
        self.entries
            .iter()
            .find(|(known, _)| known == label)
            .map(|(_, hours)| *hours)
    }

    /// The canonical label `label` stands for.
    ///
    /// Exact matches resolve to themselves; anything else resolves to the
    /// closest entry. Only an empty table yields `None`.
    pub fn resolve(&self, label: &str) -> Option<&str> {
        if let Some((known, _)) = self.entries.iter().find(|(known, _)| known == label) {
            return Some(known.as_str());
        }

        let closest = fuzzy::closest_match(self.labels(), label);
        if let Some(closest) = closest {
            debug!(label, resolved = closest, "fuzzy-matched unknown difficulty label");
        }
        closest
    }

    /// Estimated hours for `label`, falling back to the closest entry.
    ///
    /// Returns 0 when the table is empty.
    pub fn hours(&self, label: &str) -> u32 {
        self.resolve(label)
            .and_then(|canonical| self.get(canonical))
            .unwrap_or(0)
    }

    /// Per-person work over `(difficulty label, assignee count)` pairs.
    ///
    /// Each issue contributes its hours divided by the number of people
    /// sharing it. Pairs with no assignees contribute nothing.
    pub fn compute_work<S: AsRef<str>>(&self, diffs: &[(S, usize)]) -> f64 {
        diffs
            .iter()
            .filter(|(_, assigned)| *assigned > 0)
            .map(|(label, assigned)| f64::from(self.hours(label.as_ref())) / *assigned as f64)
            .sum()
    }
}

impl Default for DifficultyTable {
    fn default() -> Self {
        Self::standard()
    }
}

/// [`DifficultyTable::compute_work`] against the standard table.
///
/// # Examples
///
/// ```
/// use issue_mgmnt::difficulty::compute_work;
///
/// assert_eq!(compute_work(&[("D-Easy", 1)]), 4.0);
/// assert_eq!(compute_work(&[("D-Easy", 2), ("D-Hard", 1)]), 26.0);
/// ```
pub fn compute_work<S: AsRef<str>>(diffs: &[(S, usize)]) -> f64 {
    DifficultyTable::standard().compute_work(diffs)
}
