//! # History State
//!
//! Session history of successful calculations. Nothing is persisted;
//! the list starts empty on every launch.

use std::sync::Mutex;

use calc_core::History;

#[derive(Debug, Default)]
pub struct HistoryState {
    history: Mutex<History>,
}

impl HistoryState {
    pub fn new() -> Self {
        HistoryState::default()
    }

    /// Executes a function with read access to the history.
    pub fn with_history<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&History) -> R,
    {
        let history = self.history.lock().expect("History mutex poisoned");
        f(&history)
    }

    /// Executes a function with write access to the history.
    pub fn with_history_mut<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&mut History) -> R,
    {
        let mut history = self.history.lock().expect("History mutex poisoned");
        f(&mut history)
    }
}
