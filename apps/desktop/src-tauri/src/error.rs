//! # API Error Type
//!
//! Unified error type for Tauri commands.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in Degree Calc                            │
//! │                                                                         │
//! │  Frontend                    Rust Backend                               │
//! │  ────────                    ────────────                               │
//! │                                                                         │
//! │  invoke('calculate', { op: 'div' })                                     │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  ┌──────────────────────────────────────────────────────────────────┐  │
//! │  │  Command Function                                                │  │
//! │  │  Result<T, ApiError>                                             │  │
//! │  │         │                                                        │  │
//! │  │         ▼                                                        │  │
//! │  │  Rejected? ──── CoreError::Rejected(DivisionByZero) ──┐          │  │
//! │  │         │                                              │          │  │
//! │  │         ▼                                              ▼          │  │
//! │  │  Module trap? ── EngineError → CoreError::Computation ─ ApiError ►│  │
//! │  │         │                                                        │  │
//! │  │         ▼                                                        │  │
//! │  │  Success ──────────────────────────────────────────────────────►│  │
//! │  └──────────────────────────────────────────────────────────────────┘  │
//! │                                                                         │
//! │  ◄────────────────────────────────────────────────────────────────────  │
//! │                                                                         │
//! │  try {                                                                  │
//! │    await invoke('calculate', { op: 'div' })                             │
//! │  } catch (e) {                                                          │
//! │    // e.message = "Cannot divide by zero"                               │
//! │    // e.code = "DIVISION_BY_ZERO"                                       │
//! │  }                                                                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Tauri Error Serialization
//! Tauri requires errors to be serializable. We implement `Serialize`
//! and include both a machine-readable `code` and human-readable `message`.

use calc_core::{CoreError, RejectionKind};
use serde::Serialize;

/// API error returned from Tauri commands.
///
/// ## Serialization
/// This is what the frontend receives when a command fails:
/// ```json
/// {
///   "code": "MISSING_OPERAND",
///   "message": "Two inputs required for this operation"
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiError {
    /// Machine-readable error code for programmatic handling
    pub code: ErrorCode,

    /// Human-readable error message for display
    pub message: String,
}

/// Error codes for API responses.
///
/// Rejections map one-to-one onto [`RejectionKind`] so the frontend can pick
/// a toast style (error vs warning) from the code alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Module still loading or failed to load
    BackendUnavailable,

    /// A required field is empty
    MissingOperand,

    /// Single-input operation typed into field B
    WrongOperandField,

    /// Single-input operation with both fields filled
    ExtraOperand,

    /// Divisor is zero
    DivisionByZero,

    /// Negative factorial
    InvalidDomain,

    /// Field text is not a number
    NotANumber,

    /// No backend function for the requested operation
    UnknownOperation,

    /// The module failed or returned NaN
    ComputationError,

    /// Keypad sent a key outside digits, `.` and `-`
    InvalidKey,

    /// History entry does not exist
    NotFound,
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        ApiError {
            code,
            message: message.into(),
        }
    }

    /// Creates a not found error.
    pub fn not_found(resource: &str, id: &str) -> Self {
        ApiError::new(
            ErrorCode::NotFound,
            format!("{} not found: {}", resource, id),
        )
    }

    /// Creates an invalid keypad key error.
    pub fn invalid_key(key: &str) -> Self {
        ApiError::new(ErrorCode::InvalidKey, format!("Unknown key: {}", key))
    }
}

/// Converts validator rejections to the messages shown in the toast.
impl From<RejectionKind> for ApiError {
    fn from(kind: RejectionKind) -> Self {
        let (code, message) = match kind {
            RejectionKind::BackendUnavailable => {
                (ErrorCode::BackendUnavailable, "WASM module not loaded yet")
            }
            RejectionKind::MissingOperand => (
                ErrorCode::MissingOperand,
                "Enter the required inputs for this operation",
            ),
            RejectionKind::WrongOperandField => (
                ErrorCode::WrongOperandField,
                "Single-input operations use field A only",
            ),
            RejectionKind::ExtraOperand => (
                ErrorCode::ExtraOperand,
                "Single-input operations cannot use both fields",
            ),
            RejectionKind::DivisionByZero => (ErrorCode::DivisionByZero, "Cannot divide by zero"),
            RejectionKind::InvalidDomain => (
                ErrorCode::InvalidDomain,
                "Factorial not defined for negative numbers",
            ),
            RejectionKind::NotANumber => (ErrorCode::NotANumber, "Inputs must be numbers"),
        };
        ApiError::new(code, message)
    }
}

/// Converts core errors to API errors.
impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::Rejected(kind) => ApiError::from(kind),
            CoreError::UnknownOperation(op) => ApiError::new(
                ErrorCode::UnknownOperation,
                format!("Invalid operation: {}", op),
            ),
            CoreError::Computation(detail) => {
                // Log the actual error but return a generic message
                tracing::error!("Calculation failed: {}", detail);
                ApiError::new(ErrorCode::ComputationError, "Error while calculating")
            }
            CoreError::HistoryIndexOutOfRange { index, .. } => {
                ApiError::not_found("History entry", &index.to_string())
            }
        }
    }
}

/// Makes ApiError work as a Tauri command error.
///
/// Tauri requires the error type to implement `Into<tauri::ipc::InvokeError>`.
/// Since we implement `Serialize`, we can convert to JSON string.
impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{:?}] {}", self.code, self.message)
    }
}

impl std::error::Error for ApiError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejection_messages() {
        let err = ApiError::from(CoreError::Rejected(RejectionKind::DivisionByZero));
        assert_eq!(err.code, ErrorCode::DivisionByZero);
        assert_eq!(err.message, "Cannot divide by zero");

        let err = ApiError::from(RejectionKind::BackendUnavailable);
        assert_eq!(err.code, ErrorCode::BackendUnavailable);
    }

    #[test]
    fn test_single_input_field_messages() {
        let err = ApiError::from(RejectionKind::WrongOperandField);
        assert_eq!(err.code, ErrorCode::WrongOperandField);
        assert_eq!(err.message, "Single-input operations use field A only");

        let err = ApiError::from(RejectionKind::ExtraOperand);
        assert_eq!(err.message, "Single-input operations cannot use both fields");
    }

    #[test]
    fn test_invalid_key_code() {
        let json = serde_json::to_value(ApiError::invalid_key("x")).unwrap();
        assert_eq!(json["code"], "INVALID_KEY");
        assert_eq!(json["message"], "Unknown key: x");
    }

    #[test]
    fn test_computation_detail_is_hidden() {
        let err = ApiError::from(CoreError::Computation("trap at 0x2a".to_string()));
        assert_eq!(err.code, ErrorCode::ComputationError);
        assert_eq!(err.message, "Error while calculating");
    }

    #[test]
    fn test_history_index_is_not_found() {
        let err = ApiError::from(CoreError::HistoryIndexOutOfRange { index: 4, len: 2 });
        assert_eq!(err.code, ErrorCode::NotFound);
        assert_eq!(err.message, "History entry not found: 4");
    }

    #[test]
    fn test_serialized_shape() {
        let err = ApiError::from(RejectionKind::MissingOperand);
        let json = serde_json::to_value(&err).unwrap();
        assert_eq!(json["code"], "MISSING_OPERAND");
        assert_eq!(json["message"], "Enter the required inputs for this operation");
    }
}
