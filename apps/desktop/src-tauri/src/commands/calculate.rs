//! # Calculate Command
//!
//! Runs one operation on the current fields.
//!
//! ## Calculation Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    calculate(op)                                        │
//! │                                                                         │
//! │  1. Snapshot fields ──────── OperandsState (a, b, revision)             │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  2. Dispatcher::evaluate ─── BackendState (validate, call module)       │
//! │         │                                                               │
//! │         ├── Err ──────────► ApiError (toast, nothing else changes)      │
//! │         ▼                                                               │
//! │  3. Record history ───────── HistoryState  "op(a, b)" = value           │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  4. Show result ──────────── OperandsState.result = value               │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  5. Spawn reset ──────────── after reset_delay: clear a, b              │
//! │                              unless revision moved                      │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  { calculation, entry, message: "op successful!", screen }             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use calc_core::{Backend, Calculation, HistoryEntry};
use serde::Serialize;
use tauri::State;
use tracing::{debug, info};

use crate::error::ApiError;
use crate::state::{BackendState, ConfigState, HistoryState, OperandsState, Screen};

/// Successful calculation, everything the frontend needs to re-render.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CalculateResponse {
    pub calculation: Calculation,

    /// The history line that was appended.
    pub entry: HistoryEntry,

    /// Success toast text, e.g. `"add successful!"`.
    pub message: String,

    /// Fields and result after the calculation (before the delayed reset).
    pub screen: Screen,
}

/// Runs `op` on the current fields.
///
/// ## Arguments
/// * `op` - Operation identifier (`add`, `sub`, `mul`, `div`, `pow`, `mod`,
///   `inc`, `dec`, `fact`, `sin`, `cos`, `tan`, `asin`, `acos`, `atan`,
///   `exp`, `ln`)
///
/// ## Errors
/// Any validator rejection, `UNKNOWN_OPERATION`, or `COMPUTATION_ERROR`.
/// Fields, result and history are untouched on error.
#[tauri::command]
pub fn calculate(
    backend: State<'_, BackendState>,
    operands: State<'_, OperandsState>,
    history: State<'_, HistoryState>,
    config: State<'_, ConfigState>,
    op: String,
) -> Result<CalculateResponse, ApiError> {
    debug!(%op, "calculate command");

    let (response, revision) = perform(
        backend.inner(),
        operands.inner(),
        history.inner(),
        config.inner(),
        &op,
    )?;

    let pending = operands.inner().clone();
    let delay = config.reset_delay();
    tauri::async_runtime::spawn(async move {
        pending.reset_after(revision, delay).await;
    });

    Ok(response)
}

/// Steps 1-4. Returns the response and the field revision the delayed
/// reset should compare against.
fn perform<B: Backend>(
    backend: &BackendState<B>,
    operands: &OperandsState,
    history: &HistoryState,
    config: &ConfigState,
    op: &str,
) -> Result<(CalculateResponse, u64), ApiError> {
    let before = operands.snapshot();
    let dispatcher = config.dispatcher();

    let calculation = backend
        .with_handle(|h| dispatcher.evaluate(h, op, &before.operands.a, &before.operands.b))
        .map_err(|err| {
            debug!(%op, error = %err, "Calculation refused");
            ApiError::from(err)
        })?;

    info!(
        expression = %calculation.expression,
        value = calculation.value,
        "Calculation succeeded"
    );

    let entry = history.with_history_mut(|h| h.record(&calculation).clone());
    let screen = operands.with_screen_mut(|s| {
        s.result = Some(calculation.value);
        s.clone()
    });

    let message = format!("{} successful!", calculation.operation);
    let response = CalculateResponse {
        calculation,
        entry,
        message,
        screen,
    };
    Ok((response, before.operands.revision))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    use calc_core::{Field, Operands};

    use crate::error::ErrorCode;
    use crate::state::Native;

    struct Fixture {
        backend: BackendState<Native>,
        operands: OperandsState,
        history: HistoryState,
        config: ConfigState,
    }

    impl Fixture {
        fn ready() -> Self {
            let backend = BackendState::new();
            backend.complete(Ok::<_, String>(Native));
            Fixture {
                backend,
                operands: OperandsState::new(),
                history: HistoryState::new(),
                config: ConfigState::default(),
            }
        }

        fn type_in(&self, a: &str, b: &str) {
            self.operands
                .with_screen_mut(|s| s.operands = Operands::with_values(a, b));
        }

        fn run(&self, op: &str) -> Result<(CalculateResponse, u64), ApiError> {
            perform(&self.backend, &self.operands, &self.history, &self.config, op)
        }
    }

    #[test]
    fn test_success_records_history_and_result() {
        let fx = Fixture::ready();
        fx.type_in("2", "3");

        let (response, _) = fx.run("add").unwrap();

        assert_eq!(response.calculation.value, 5.0);
        assert_eq!(response.message, "add successful!");
        assert_eq!(response.entry.expression, "add(2, 3)");
        assert_eq!(response.screen.result, Some(5.0));
        assert_eq!(fx.history.with_history(|h| h.len()), 1);
    }

    #[test]
    fn test_unary_history_shows_zero_for_empty_b() {
        let fx = Fixture::ready();
        fx.type_in("30", "");

        let (response, _) = fx.run("sin").unwrap();

        assert_eq!(response.calculation.value, 0.5);
        assert_eq!(response.entry.expression, "sin(30, 0)");
    }

    #[test]
    fn test_rejection_changes_nothing() {
        let fx = Fixture::ready();
        fx.type_in("10", "0");

        let err = fx.run("div").unwrap_err();

        assert_eq!(err.code, ErrorCode::DivisionByZero);
        assert!(fx.history.with_history(|h| h.is_empty()));
        let screen = fx.operands.snapshot();
        assert_eq!(screen.operands.a, "10");
        assert_eq!(screen.result, None);
    }

    #[test]
    fn test_loading_backend_is_unavailable() {
        let fx = Fixture::ready();
        let loading = BackendState::<Native>::new();
        fx.type_in("2", "3");

        let err = perform(&loading, &fx.operands, &fx.history, &fx.config, "add").unwrap_err();
        assert_eq!(err.code, ErrorCode::BackendUnavailable);
    }

    #[test]
    fn test_lenient_config_lets_text_through() {
        let mut fx = Fixture::ready();
        fx.config.strict_numeric = false;
        fx.type_in("abc", "1");

        let err = fx.run("add").unwrap_err();
        assert_eq!(err.code, ErrorCode::ComputationError);
    }

    #[tokio::test]
    async fn test_fields_reset_after_success() {
        let fx = Fixture::ready();
        fx.type_in("4", "");

        let (_, revision) = fx.run("fact").unwrap();
        assert!(fx.operands.reset_after(revision, Duration::ZERO).await);

        let screen = fx.operands.snapshot();
        assert_eq!(screen.operands.a, "");
        assert_eq!(screen.operands.b, "");
        assert_eq!(screen.result, Some(24.0));
    }

    #[tokio::test]
    async fn test_edit_before_reset_keeps_fields() {
        let fx = Fixture::ready();
        fx.type_in("4", "");

        let (_, revision) = fx.run("inc").unwrap();
        fx.operands.with_screen_mut(|s| s.operands.set(Field::B, "7"));

        assert!(!fx.operands.reset_after(revision, Duration::ZERO).await);
        assert_eq!(fx.operands.snapshot().operands.b, "7");
    }
}
