//! # Tauri Commands Module
//!
//! All commands exposed to the WebView frontend.
//!
//! ## Command Organization
//! ```text
//! commands/
//! ├── mod.rs        ◄─── You are here (exports)
//! ├── calculate.rs  ◄─── Run an operation, record history, schedule reset
//! ├── operands.rs   ◄─── Keypad, field focus, DEL, AC
//! ├── history.rs    ◄─── List, delete, clear
//! └── config.rs     ◄─── Configuration and module load status
//! ```
//!
//! ## How Commands Work
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Tauri Command Flow                                   │
//! │                                                                         │
//! │  WebView Frontend                                                       │
//! │  ────────────────                                                       │
//! │  const { invoke } = window.__TAURI__.core;                              │
//! │                                                                         │
//! │  const out = await invoke('calculate', { op: 'sin' });                  │
//! │         │                                                               │
//! │         │ (IPC via WebView)                                             │
//! │         ▼                                                               │
//! │  Rust Backend                                                           │
//! │  ────────────                                                           │
//! │  #[tauri::command]                                                      │
//! │  fn calculate(                                                          │
//! │      backend: State<'_, BackendState>,   ◄── Injected by Tauri         │
//! │      operands: State<'_, OperandsState>,                                │
//! │      ...                                                                │
//! │      op: String,                         ◄── From invoke params         │
//! │  ) -> Result<CalculateResponse, ApiError>                               │
//! │         │                                                               │
//! │         │ (JSON serialization)                                          │
//! │         ▼                                                               │
//! │  Frontend receives: { calculation, message, screen }                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## State Injection (Option B)
//! Each command declares only the state it needs:
//! ```rust,ignore
//! // Only needs the fields
//! fn press_key(operands: State<'_, OperandsState>, key: String)
//!
//! // Only needs history
//! fn get_history(history: State<'_, HistoryState>)
//!
//! // Needs everything
//! fn calculate(backend, operands, history, config, op)
//! ```

pub mod calculate;
pub mod config;
pub mod history;
pub mod operands;
