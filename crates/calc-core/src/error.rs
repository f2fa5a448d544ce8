//! # Error Types
//!
//! Domain-specific error types for calc-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  calc-core errors (this file)                                          │
//! │  ├── RejectionKind  - Why the validator refused an operation           │
//! │  ├── BackendError   - A call into the numeric backend failed           │
//! │  └── CoreError      - Everything `Dispatcher::evaluate` can return     │
//! │                                                                         │
//! │  calc-engine errors (separate crate)                                   │
//! │  └── EngineError    - Module read/compile/instantiate/call failures    │
//! │                                                                         │
//! │  Tauri API errors (in app)                                             │
//! │  └── ApiError       - What the WebView sees (serialized)               │
//! │                                                                         │
//! │  Flow: EngineError → BackendError → CoreError → ApiError → WebView     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Rejections are a closed enum; the app maps each one to notification text
//! 3. Nothing here is fatal: operands stay as typed after any error

use serde::{Deserialize, Serialize};
use thiserror::Error;
use ts_rs::TS;

// =============================================================================
// Rejection Kind
// =============================================================================

/// Why the validator refused an operation.
///
/// Every rejection is terminal for that invocation and recoverable by the
/// user (edit the fields, press the operation again).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error, Serialize, Deserialize, TS)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[ts(export)]
pub enum RejectionKind {
    /// The numeric module has not finished loading, or failed to load.
    #[error("numeric backend is not available")]
    BackendUnavailable,

    /// A required operand field is empty.
    #[error("a required operand is missing")]
    MissingOperand,

    /// A single-operand operation was given its operand in field B.
    #[error("single-operand operations read field A only")]
    WrongOperandField,

    /// A single-operand operation was given both fields.
    #[error("single-operand operations take exactly one operand")]
    ExtraOperand,

    /// Division with a zero divisor.
    #[error("division by zero")]
    DivisionByZero,

    /// The operand is outside the operation's domain (negative factorial).
    #[error("operand outside the operation's domain")]
    InvalidDomain,

    /// Operand text does not convert to a finite number.
    #[error("operand is not a number")]
    NotANumber,
}

// =============================================================================
// Backend Error
// =============================================================================

/// A call into the numeric backend failed (trap, missing function, ...).
///
/// Only the message survives; the user is shown a generic failure.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{0}")]
pub struct BackendError(pub String);

impl BackendError {
    pub fn new(message: impl Into<String>) -> Self {
        BackendError(message.into())
    }
}

// =============================================================================
// Core Error
// =============================================================================

/// Errors returned by the dispatcher and the history list.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CoreError {
    /// The validator refused the operation.
    #[error("Operation rejected: {0}")]
    Rejected(#[from] RejectionKind),

    /// The validator let an unrecognized identifier through, but there is
    /// no backend function to call for it.
    #[error("Unknown operation: {0}")]
    UnknownOperation(String),

    /// The backend failed or produced an unusable value.
    ///
    /// ## When This Occurs
    /// - The module trapped during the call
    /// - The result is NaN
    /// - Non-numeric operand text reached the dispatcher (lenient mode)
    #[error("Computation failed: {0}")]
    Computation(String),

    /// History position does not exist.
    #[error("History entry {index} does not exist ({len} entries)")]
    HistoryIndexOutOfRange { index: usize, len: usize },
}

impl From<BackendError> for CoreError {
    fn from(err: BackendError) -> Self {
        CoreError::Computation(err.0)
    }
}

impl CoreError {
    /// Returns the rejection kind when this error is a validator rejection.
    pub fn rejection(&self) -> Option<RejectionKind> {
        match self {
            CoreError::Rejected(kind) => Some(*kind),
            _ => None,
        }
    }
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================
