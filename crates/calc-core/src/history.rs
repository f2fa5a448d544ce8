//! # History
//!
//! Append-only list of successful calculations.
//!
//! Entries are addressed by position, the way the history panel shows them.
//! The only invariant is index validity: removing a position that does not
//! exist is an error and leaves the list untouched.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

use crate::dispatch::Calculation;
use crate::error::{CoreError, CoreResult};

/// Formats a request the way history shows it: `op(a, b)`.
///
/// Empty fields are shown as `0`.
///
/// ```rust
/// use calc_core::history::expression;
///
/// assert_eq!(expression("add", "2", "3"), "add(2, 3)");
/// assert_eq!(expression("fact", "5", ""), "fact(5, 0)");
/// ```
pub fn expression(op: &str, a: &str, b: &str) -> String {
    let or_zero = |text: &str| if text.is_empty() { "0".to_string() } else { text.to_string() };
    format!("{}({}, {})", op, or_zero(a), or_zero(b))
}

/// One line of the history panel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct HistoryEntry {
    /// Unique identifier (UUID v4), used as the list key in the WebView.
    pub id: String,

    /// Request as typed, e.g. `div(10, 4)`.
    pub expression: String,

    pub value: f64,

    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
}

impl HistoryEntry {
    pub fn new(expression: impl Into<String>, value: f64) -> Self {
        HistoryEntry {
            id: Uuid::new_v4().to_string(),
            expression: expression.into(),
            value,
            created_at: Utc::now(),
        }
    }
}

impl From<&Calculation> for HistoryEntry {
    fn from(calc: &Calculation) -> Self {
        HistoryEntry::new(calc.expression.clone(), calc.value)
    }
}

/// The calculation history, oldest first.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct History {
    entries: Vec<HistoryEntry>,
}

impl History {
    pub fn new() -> Self {
        History::default()
    }

    /// Appends an entry and returns it.
    pub fn push(&mut self, entry: HistoryEntry) -> &HistoryEntry {
        self.entries.push(entry);
        &self.entries[self.entries.len() - 1]
    }

    /// Appends a successful calculation.
    pub fn record(&mut self, calc: &Calculation) -> &HistoryEntry {
        self.push(HistoryEntry::from(calc))
    }

    /// Removes the entry at `index`.
    ///
    /// ## Errors
    /// `HistoryIndexOutOfRange` when `index >= len`.
    pub fn remove(&mut self, index: usize) -> CoreResult<HistoryEntry> {
        if index >= self.entries.len() {
            return Err(CoreError::HistoryIndexOutOfRange {
                index,
                len: self.entries.len(),
            });
        }
        Ok(self.entries.remove(index))
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn history_of(values: &[f64]) -> History {
        let mut history = History::new();
        for (i, value) in values.iter().enumerate() {
            history.push(HistoryEntry::new(format!("inc({i}, 0)"), *value));
        }
        history
    }

    #[test]
    fn test_push_keeps_order() {
        let history = history_of(&[1.0, 2.0, 3.0]);
        let values: Vec<f64> = history.entries().iter().map(|e| e.value).collect();
        assert_eq!(values, vec![1.0, 2.0, 3.0]);
    }

    #[test]
    fn test_remove_by_position() {
        let mut history = history_of(&[1.0, 2.0, 3.0]);
        let removed = history.remove(1).unwrap();
        assert_eq!(removed.value, 2.0);
        assert_eq!(history.len(), 2);
        assert_eq!(history.entries()[1].value, 3.0);
    }

    #[test]
    fn test_remove_out_of_range_leaves_list_intact() {
        let mut history = history_of(&[1.0]);
        let err = history.remove(1).unwrap_err();
        assert_eq!(err, CoreError::HistoryIndexOutOfRange { index: 1, len: 1 });
        assert_eq!(history.len(), 1);
    }

    #[test]
    fn test_clear() {
        let mut history = history_of(&[1.0, 2.0]);
        history.clear();
        assert!(history.is_empty());
    }

    #[test]
    fn test_entries_get_distinct_ids() {
        let history = history_of(&[1.0, 1.0]);
        assert_ne!(history.entries()[0].id, history.entries()[1].id);
    }

    #[test]
    fn test_record_calculation() {
        let calc = Calculation {
            operation: crate::Operation::Pow,
            expression: expression("pow", "2", "10"),
            value: 1024.0,
        };
        let mut history = History::new();
        let entry = history.record(&calc);
        assert_eq!(entry.expression, "pow(2, 10)");
        assert_eq!(entry.value, 1024.0);
    }

    #[test]
    fn test_entry_serializes_camel_case() {
        let entry = HistoryEntry::new("add(2, 3)", 5.0);
        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(json["expression"], "add(2, 3)");
        assert!(json.get("createdAt").is_some());
    }
}
