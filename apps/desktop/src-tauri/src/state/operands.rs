//! # Operands State
//!
//! The two input fields plus the result display.
//!
//! ## Thread Safety
//! The screen is wrapped in `Arc<Mutex<T>>` because:
//! 1. Keypad commands and `calculate` all touch it
//! 2. The delayed reset runs on a background task and needs its own handle
//! 3. Tauri commands can run concurrently
//!
//! ## Screen Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Screen State Operations                              │
//! │                                                                         │
//! │  Frontend Action          Tauri Command           Screen Change         │
//! │  ───────────────          ─────────────           ─────────────         │
//! │                                                                         │
//! │  Focus input A/B ────────► focus_field() ───────► active = field        │
//! │                                                                         │
//! │  Digit / "." key ────────► press_key() ─────────► active.push(key)      │
//! │                                                                         │
//! │  Type in input ──────────► set_operand() ───────► field = text          │
//! │                                                                         │
//! │  DEL ────────────────────► backspace() ─────────► active.pop()          │
//! │                                                                         │
//! │  AC ─────────────────────► clear_all() ─────────► a, b, result cleared  │
//! │                                                                         │
//! │  Operation succeeds ─────► calculate() ─────────► result = value        │
//! │                             └─ 300 ms later ────► a, b cleared          │
//! │                                (skipped if edited in between)           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::sync::{Arc, Mutex};
use std::time::Duration;

use calc_core::Operands;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// What the calculator shows: the fields being edited and the last result.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Screen {
    pub operands: Operands,

    /// Value of the last successful calculation, `None` after AC.
    pub result: Option<f64>,
}

impl Screen {
    /// AC: empties both fields and the result display.
    pub fn clear_all(&mut self) {
        self.operands.clear();
        self.result = None;
    }
}

/// Wrapper around the screen for Tauri state management.
#[derive(Debug, Clone, Default)]
pub struct OperandsState {
    screen: Arc<Mutex<Screen>>,
}

impl OperandsState {
    /// Creates empty fields with A active.
    pub fn new() -> Self {
        OperandsState::default()
    }

    /// Executes a function with read access to the screen.
    pub fn with_screen<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&Screen) -> R,
    {
        let screen = self.screen.lock().expect("Screen mutex poisoned");
        f(&screen)
    }

    /// Executes a function with write access to the screen.
    ///
    /// ## Usage
    /// ```rust,ignore
    /// let screen = operands.with_screen_mut(|s| { s.operands.push("7"); s.clone() });
    /// ```
    pub fn with_screen_mut<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&mut Screen) -> R,
    {
        let mut screen = self.screen.lock().expect("Screen mutex poisoned");
        f(&mut screen)
    }

    /// Returns a copy of the current screen.
    pub fn snapshot(&self) -> Screen {
        self.with_screen(Screen::clone)
    }

    /// Clears the fields after `delay` unless they were edited since
    /// `revision` was read.
    ///
    /// The result display is left alone. Returns whether the reset happened.
    pub async fn reset_after(&self, revision: u64, delay: Duration) -> bool {
        tokio::time::sleep(delay).await;
        let reset = self.with_screen_mut(|s| s.operands.reset_if_unchanged(revision));
        debug!(revision, reset, "Delayed operand reset");
        reset
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use calc_core::Field;

    #[test]
    fn test_clear_all_drops_result() {
        let state = OperandsState::new();
        state.with_screen_mut(|s| {
            s.operands = Operands::with_values("2", "3");
            s.result = Some(5.0);
        });

        state.with_screen_mut(Screen::clear_all);

        let screen = state.snapshot();
        assert_eq!(screen.operands.a, "");
        assert_eq!(screen.operands.b, "");
        assert_eq!(screen.result, None);
    }

    #[test]
    fn test_clones_share_the_screen() {
        let state = OperandsState::new();
        let task_handle = state.clone();
        task_handle.with_screen_mut(|s| s.operands.push("9"));
        assert_eq!(state.snapshot().operands.a, "9");
    }

    #[tokio::test]
    async fn test_reset_after_clears_fields_keeps_result() {
        let state = OperandsState::new();
        let revision = state.with_screen_mut(|s| {
            s.operands = Operands::with_values("2", "3");
            s.result = Some(5.0);
            s.operands.revision
        });

        assert!(state.reset_after(revision, Duration::from_millis(1)).await);

        let screen = state.snapshot();
        assert_eq!(screen.operands.a, "");
        assert_eq!(screen.operands.b, "");
        assert_eq!(screen.result, Some(5.0));
    }

    #[tokio::test]
    async fn test_reset_skipped_after_edit() {
        let state = OperandsState::new();
        let revision = state.with_screen_mut(|s| {
            s.operands.set(Field::A, "4");
            s.operands.revision
        });

        let task = {
            let state = state.clone();
            tokio::spawn(async move { state.reset_after(revision, Duration::from_millis(50)).await })
        };
        state.with_screen_mut(|s| s.operands.push("2"));

        assert!(!task.await.unwrap());
        assert_eq!(state.snapshot().operands.a, "42");
    }
}
