//! # Backend State
//!
//! Holds the numeric module once the background load finishes.
//!
//! ## Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Backend State Transitions                            │
//! │                                                                         │
//! │  app start ──► NotLoaded ──┬── load Ok ──► Ready(WasmBackend)           │
//! │                            │                                            │
//! │                            └── load Err ─► Failed(reason)               │
//! │                                                                         │
//! │  Both outcomes are final for the session. Until Ready, every            │
//! │  calculate() is rejected with BACKEND_UNAVAILABLE.                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Thread Safety
//! Calls into the module need `&mut Store`, so the handle sits behind a
//! `Mutex`. Calculations are short and serialized by the UI anyway.

use std::fmt::Display;
use std::sync::Mutex;

use calc_core::{BackendHandle, BackendStatus};
use calc_engine::WasmBackend;

/// Wrapper around the module handle for Tauri state management.
#[derive(Debug)]
pub struct BackendState<B = WasmBackend> {
    handle: Mutex<BackendHandle<B>>,
}

impl<B> BackendState<B> {
    /// Creates the state in the `NotLoaded` phase.
    pub fn new() -> Self {
        BackendState {
            handle: Mutex::new(BackendHandle::NotLoaded),
        }
    }

    /// Executes a function with exclusive access to the handle.
    ///
    /// ## Usage
    /// ```rust,ignore
    /// let calc = backend.with_handle(|h| dispatcher.evaluate(h, "add", "2", "3"))?;
    /// ```
    pub fn with_handle<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&mut BackendHandle<B>) -> R,
    {
        let mut handle = self.handle.lock().expect("Backend mutex poisoned");
        f(&mut handle)
    }

    /// Records the load outcome. Only the first call has any effect.
    pub fn complete<E: Display>(&self, outcome: Result<B, E>) -> bool {
        self.with_handle(|h| h.complete(outcome))
    }

    /// Current load phase, as reported to the frontend.
    pub fn status(&self) -> BackendStatus {
        self.with_handle(|h| h.status())
    }
}

impl<B> Default for BackendState<B> {
    fn default() -> Self {
        Self::new()
    }
}
