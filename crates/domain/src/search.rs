//! Search history records

use serde::{Deserialize, Serialize};

/// One remembered search.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchRecord {
    /// The searched term, trimmed.
    pub keyword: String,
    /// Display date, preformatted as `MM. DD.`.
    pub date: String,
}

impl SearchRecord {
    /// Creates a record, trimming the keyword.
    #[must_use]
    pub fn new(keyword: &str, date: impl Into<String>) -> Self {
        Self {
            keyword: keyword.trim().to_string(),
            date: date.into(),
        }
    }
}

/// Removes the record at the given *reverse* index.
///
/// History screens render newest-first, so deletion arrives with the
/// on-screen index, which counts from the end of the stored list.
/// Out-of-range indices leave the list untouched.
pub fn remove_at_reverse_index(records: &mut Vec<SearchRecord>, reverse_index: usize) {
    let len = records.len();
    if reverse_index < len {
        records.remove(len - 1 - reverse_index);
    }
}
