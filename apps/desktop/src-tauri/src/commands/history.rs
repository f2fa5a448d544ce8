//! # History Commands
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  History panel (toggled from the keypad)                                │
//! │                                                                         │
//! │  ┌────────────────────────────────────────────────────────────────┐    │
//! │  │  add(2, 3) = 5                                          [🗑]   │    │
//! │  │  sin(30, 0) = 0.5                                       [🗑]   │    │
//! │  │  fact(5, 0) = 120                                       [🗑]   │    │
//! │  ├────────────────────────────────────────────────────────────────┤    │
//! │  │                      [ Clear All ]                             │    │
//! │  └────────────────────────────────────────────────────────────────┘    │
//! │                                                                         │
//! │  get_history()            → HistoryEntry[]                              │
//! │  delete_history_entry(i)  → HistoryEntry[]   (by position)              │
//! │  clear_history()          → []                                          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use calc_core::HistoryEntry;
use tauri::State;
use tracing::debug;

use crate::error::ApiError;
use crate::state::HistoryState;

/// Gets all entries, oldest first.
#[tauri::command]
pub fn get_history(history: State<'_, HistoryState>) -> Vec<HistoryEntry> {
    debug!("get_history command");
    history.with_history(|h| h.entries().to_vec())
}

/// Removes the entry at `index` and returns the remaining list.
///
/// ## Errors
/// `NOT_FOUND` if `index` is past the end of the list.
#[tauri::command]
pub fn delete_history_entry(
    history: State<'_, HistoryState>,
    index: usize,
) -> Result<Vec<HistoryEntry>, ApiError> {
    debug!(index, "delete_history_entry command");
    delete_entry(&history, index)
}

/// Removes every entry.
#[tauri::command]
pub fn clear_history(history: State<'_, HistoryState>) -> Vec<HistoryEntry> {
    debug!("clear_history command");
    history.with_history_mut(|h| h.clear());
    Vec::new()
}

fn delete_entry(history: &HistoryState, index: usize) -> Result<Vec<HistoryEntry>, ApiError> {
    history.with_history_mut(|h| -> Result<Vec<HistoryEntry>, ApiError> {
        h.remove(index)?;
        Ok(h.entries().to_vec())
    })
}
