//! # calc-core: Pure Calculator Logic
//!
//! This crate is the decision layer of the calculator. It decides whether an
//! operation may run on the operands the user typed, and it shapes the call
//! into the numeric backend. It never performs I/O.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Calculator Architecture                          │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    WebView (keypad, fields A/B)                 │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ Tauri IPC                              │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                    Tauri Commands                               │   │
//! │  │    press_key, calculate, get_history, ...                       │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ calc-core (THIS CRATE) ★                        │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │ operation │  │validation │  │ dispatch  │  │  history  │  │   │
//! │  │   │  arity    │  │  Verdict  │  │ Backend   │  │  entries  │  │   │
//! │  │   │  ids      │  │  rules    │  │ rounding  │  │           │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO LOGGING • NO GLOBAL STATE • PURE FUNCTIONS       │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │ Backend trait                          │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │              calc-engine (calc.wasm via wasmer)                 │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`operation`] - The closed set of operations and their arity classes
//! - [`operand`] - Operand fields A/B, numeric conversion, keystroke editing
//! - [`validation`] - The validator: `validate(op, ready, a, b) -> Verdict`
//! - [`dispatch`] - Backend trait, backend handle, dispatcher
//! - [`history`] - Append-only calculation history
//! - [`error`] - Rejection kinds and domain errors
//!
//! ## Example Usage
//!
//! ```rust
//! use calc_core::validation::{validate, Verdict};
//! use calc_core::RejectionKind;
//!
//! assert_eq!(validate("add", true, "2", "3"), Verdict::Accepted);
//! assert_eq!(
//!     validate("div", true, "10", "0"),
//!     Verdict::Rejected(RejectionKind::DivisionByZero)
//! );
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod dispatch;
pub mod error;
pub mod history;
pub mod operand;
pub mod operation;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use dispatch::{Backend, BackendHandle, BackendStatus, Calculation, Dispatcher};
pub use error::{BackendError, CoreError, CoreResult, RejectionKind};
pub use history::{History, HistoryEntry};
pub use operand::{Field, NumericPolicy, Operands};
pub use operation::{Arity, Operation};
pub use validation::{validate, Validator, Verdict};

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Decimal digits kept on transcendental results (sin, ln, ...).
///
/// Arithmetic results are never rounded; only functions whose float output
/// carries visible noise (`sin 30° = 0.49999999999999994`) are.
pub const TRANSCENDENTAL_DECIMALS: u32 = 6;

/// Delay before the operand fields are cleared after a successful operation.
pub const OPERAND_RESET_DELAY_MS: u64 = 300;
