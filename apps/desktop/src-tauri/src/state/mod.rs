//! # State Module
//!
//! Manages application state for the Tauri desktop app.
//!
//! ## Why Multiple State Types? (Option B)
//! Instead of a single `AppState` struct containing everything,
//! we use separate state types. Each command declares exactly the state
//! it needs, and typing into a field never waits on a module call.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    State Architecture                                   │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                      Tauri Runtime                              │   │
//! │  │  app.manage(BackendState::new());                               │   │
//! │  │  app.manage(OperandsState::new());                              │   │
//! │  │  app.manage(HistoryState::new());                               │   │
//! │  │  app.manage(ConfigState::from_env());                           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                              │                                          │
//! │     ┌────────────────┬───────┴────────┬──────────────────┐             │
//! │     ▼                ▼                ▼                  ▼              │
//! │  ┌────────────┐ ┌──────────────┐ ┌──────────────┐ ┌──────────────┐     │
//! │  │BackendState│ │OperandsState │ │ HistoryState │ │ ConfigState  │     │
//! │  │            │ │              │ │              │ │              │     │
//! │  │ Mutex<     │ │ Arc<Mutex<   │ │ Mutex<       │ │ decimals     │     │
//! │  │  Backend   │ │   Screen     │ │   History    │ │ reset delay  │     │
//! │  │  Handle>>  │ │ >>           │ │ >>           │ │ policy       │     │
//! │  └────────────┘ └──────────────┘ └──────────────┘ └──────────────┘     │
//! │                                                                         │
//! │  THREAD SAFETY:                                                        │
//! │  • BackendState: module calls need &mut Store, so a Mutex              │
//! │  • OperandsState: Arc so the delayed reset task can hold a handle      │
//! │  • HistoryState: Mutex, appended by calculate()                        │
//! │  • ConfigState: Read-only after initialization                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

mod backend;
mod config;
mod history;
mod operands;

pub use backend::BackendState;
pub use config::ConfigState;
pub use history::HistoryState;
pub use operands::{OperandsState, Screen};

#[cfg(test)]
pub(crate) use backend::tests::Native;
