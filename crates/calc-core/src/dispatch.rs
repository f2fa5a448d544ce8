//! # Dispatch Module
//!
//! Routes an accepted operation into the numeric backend.
//!
//! ## Call Path
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Dispatcher::evaluate(handle, "sin", "30", "")                          │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Validator ──── Rejected(kind)? ──────────────► Err(Rejected(kind))     │
//! │       │                                         (backend never called)  │
//! │       ▼ Accepted                                                        │
//! │  parse operands ("30" → 30.0)                                           │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  degrees → radians (sin/cos/tan only): 30 * π / 180                     │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  backend.sin(0.5235987755982988) = 0.49999999999999994                  │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  round to 6 decimals (transcendental only) ──► Ok(0.5)                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Backend Handle
//! The loaded backend is never held in a global slot. The app owns a
//! [`BackendHandle`] that starts as `NotLoaded` and ends in exactly one of
//! `Ready` or `Failed`, and passes it in on every call.

use std::f64::consts::PI;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::{BackendError, CoreError, CoreResult, RejectionKind};
use crate::history;
use crate::operand::NumericPolicy;
use crate::operation::Operation;
use crate::validation::Validator;
use crate::TRANSCENDENTAL_DECIMALS;

/// Result type for backend calls.
pub type BackendResult = Result<f64, BackendError>;

// =============================================================================
// Backend Trait
// =============================================================================

/// The numeric backend contract.
///
/// The eight required functions mirror the compiled module's mandatory
/// exports. Modulo and the transcendental functions have standard-library
/// defaults; a backend overrides them when it ships its own.
///
/// Angles passed to and returned from `sin`/`cos`/`tan`/`asin`/`acos`/`atan`
/// are radians; degree handling is the dispatcher's job.
pub trait Backend {
    fn add(&mut self, x: f64, y: f64) -> BackendResult;
    fn sub(&mut self, x: f64, y: f64) -> BackendResult;
    fn mul(&mut self, x: f64, y: f64) -> BackendResult;
    fn div(&mut self, x: f64, y: f64) -> BackendResult;
    fn power(&mut self, x: f64, y: f64) -> BackendResult;
    fn inc(&mut self, x: f64) -> BackendResult;
    fn dec(&mut self, x: f64) -> BackendResult;
    fn factorial(&mut self, x: f64) -> BackendResult;

    fn modulo(&mut self, x: f64, y: f64) -> BackendResult {
        Ok(floor_mod(x, y))
    }

    fn sin(&mut self, radians: f64) -> BackendResult {
        Ok(radians.sin())
    }

    fn cos(&mut self, radians: f64) -> BackendResult {
        Ok(radians.cos())
    }

    fn tan(&mut self, radians: f64) -> BackendResult {
        Ok(radians.tan())
    }

    fn exp(&mut self, x: f64) -> BackendResult {
        Ok(x.exp())
    }

    fn ln(&mut self, x: f64) -> BackendResult {
        Ok(x.ln())
    }

    fn asin(&mut self, x: f64) -> BackendResult {
        Ok(x.asin())
    }

    fn acos(&mut self, x: f64) -> BackendResult {
        Ok(x.acos())
    }

    fn atan(&mut self, x: f64) -> BackendResult {
        Ok(x.atan())
    }
}

/// Floored modulo: the result takes the sign of the divisor.
///
/// ```rust
/// use calc_core::dispatch::floor_mod;
///
/// assert_eq!(floor_mod(7.0, 3.0), 1.0);
/// assert_eq!(floor_mod(-7.0, 3.0), 2.0);
/// assert_eq!(floor_mod(7.0, -3.0), -2.0);
/// ```
pub fn floor_mod(x: f64, y: f64) -> f64 {
    x - (x / y).floor() * y
}

/// Rounds to a fixed number of decimal digits.
///
/// Non-finite values are returned unchanged.
pub fn round_to(value: f64, decimals: u32) -> f64 {
    if !value.is_finite() {
        return value;
    }
    let factor = 10f64.powi(decimals as i32);
    let scaled = value * factor;
    if !scaled.is_finite() {
        return value;
    }
    scaled.round() / factor
}

// =============================================================================
// Backend Handle
// =============================================================================

/// Load state of the numeric backend.
#[derive(Debug)]
pub enum BackendHandle<B> {
    /// Load still in flight.
    NotLoaded,
    /// Load failed; stays this way for the session.
    Failed(String),
    /// Loaded and callable.
    Ready(B),
}

/// Serializable view of a [`BackendHandle`] for the WebView.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(tag = "state", rename_all = "camelCase")]
#[ts(export)]
pub enum BackendStatus {
    Loading,
    Ready,
    Failed { reason: String },
}

impl<B> Default for BackendHandle<B> {
    fn default() -> Self {
        BackendHandle::NotLoaded
    }
}

impl<B> BackendHandle<B> {
    #[inline]
    pub fn is_ready(&self) -> bool {
        matches!(self, BackendHandle::Ready(_))
    }

    pub fn status(&self) -> BackendStatus {
        match self {
            BackendHandle::NotLoaded => BackendStatus::Loading,
            BackendHandle::Failed(reason) => BackendStatus::Failed {
                reason: reason.clone(),
            },
            BackendHandle::Ready(_) => BackendStatus::Ready,
        }
    }

    pub fn backend_mut(&mut self) -> Option<&mut B> {
        match self {
            BackendHandle::Ready(backend) => Some(backend),
            _ => None,
        }
    }

    /// Records the outcome of the one-time load.
    ///
    /// A handle only leaves `NotLoaded` once; later outcomes are ignored and
    /// `false` is returned.
    pub fn complete<E: std::fmt::Display>(&mut self, outcome: Result<B, E>) -> bool {
        if !matches!(self, BackendHandle::NotLoaded) {
            return false;
        }
        *self = match outcome {
            Ok(backend) => BackendHandle::Ready(backend),
            Err(err) => BackendHandle::Failed(err.to_string()),
        };
        true
    }
}

// =============================================================================
// Dispatcher
// =============================================================================

/// A successful calculation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Calculation {
    pub operation: Operation,
    /// History form of the request, e.g. `add(2, 3)`.
    pub expression: String,
    pub value: f64,
}

/// Validates and dispatches operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dispatcher {
    validator: Validator,
    decimals: u32,
}

impl Default for Dispatcher {
    fn default() -> Self {
        Dispatcher::new(Validator::default())
    }
}

impl Dispatcher {
    pub const fn new(validator: Validator) -> Self {
        Dispatcher {
            validator,
            decimals: TRANSCENDENTAL_DECIMALS,
        }
    }

    /// Sets how many decimals transcendental results keep.
    pub const fn decimals(mut self, decimals: u32) -> Self {
        self.decimals = decimals;
        self
    }

    pub const fn validator(&self) -> &Validator {
        &self.validator
    }

    /// Validates, then calls the backend.
    ///
    /// The backend is only touched when the validator accepts.
    ///
    /// ## Example
    /// ```rust
    /// use calc_core::dispatch::{Backend, BackendHandle, BackendResult, Dispatcher};
    /// use calc_core::{CoreError, RejectionKind};
    ///
    /// struct Native;
    ///
    /// impl Backend for Native {
    ///     fn add(&mut self, x: f64, y: f64) -> BackendResult { Ok(x + y) }
    ///     fn sub(&mut self, x: f64, y: f64) -> BackendResult { Ok(x - y) }
    ///     fn mul(&mut self, x: f64, y: f64) -> BackendResult { Ok(x * y) }
    ///     fn div(&mut self, x: f64, y: f64) -> BackendResult { Ok(x / y) }
    ///     fn power(&mut self, x: f64, y: f64) -> BackendResult { Ok(x.powf(y)) }
    ///     fn inc(&mut self, x: f64) -> BackendResult { Ok(x + 1.0) }
    ///     fn dec(&mut self, x: f64) -> BackendResult { Ok(x - 1.0) }
    ///     fn factorial(&mut self, x: f64) -> BackendResult {
    ///         Ok((1..=x as u64).map(|n| n as f64).product())
    ///     }
    /// }
    ///
    /// let dispatcher = Dispatcher::default();
    ///
    /// let mut loading: BackendHandle<Native> = BackendHandle::NotLoaded;
    /// let err = dispatcher.evaluate(&mut loading, "add", "2", "3").unwrap_err();
    /// assert_eq!(err, CoreError::Rejected(RejectionKind::BackendUnavailable));
    ///
    /// let mut ready = BackendHandle::Ready(Native);
    /// let calc = dispatcher.evaluate(&mut ready, "sin", "30", "").unwrap();
    /// assert_eq!(calc.value, 0.5);
    /// ```
    pub fn evaluate<B: Backend>(
        &self,
        handle: &mut BackendHandle<B>,
        op: &str,
        a: &str,
        b: &str,
    ) -> CoreResult<Calculation> {
        self.validator.validate(op, handle.is_ready(), a, b).into_result()?;

        let operation =
            Operation::parse(op).ok_or_else(|| CoreError::UnknownOperation(op.to_string()))?;
        let backend = handle
            .backend_mut()
            .ok_or(CoreError::Rejected(RejectionKind::BackendUnavailable))?;

        let value = self.dispatch(backend, operation, a, b)?;

        Ok(Calculation {
            operation,
            expression: history::expression(operation.id(), a, b),
            value,
        })
    }

    /// Calls the backend for an operation the validator already accepted.
    pub fn dispatch<B: Backend + ?Sized>(
        &self,
        backend: &mut B,
        op: Operation,
        a: &str,
        b: &str,
    ) -> CoreResult<f64> {
        let policy = self.validator.policy();
        let x = operand_value(policy, a, "A")?;
        let y = || operand_value(policy, b, "B");
        let radians = x * PI / 180.0;

        let raw = match op {
            Operation::Add => backend.add(x, y()?),
            Operation::Sub => backend.sub(x, y()?),
            Operation::Mul => backend.mul(x, y()?),
            Operation::Div => backend.div(x, y()?),
            Operation::Pow => backend.power(x, y()?),
            Operation::Mod => backend.modulo(x, y()?),
            Operation::Inc => backend.inc(x),
            Operation::Dec => backend.dec(x),
            Operation::Fact => backend.factorial(x),
            Operation::Sin => backend.sin(radians),
            Operation::Cos => backend.cos(radians),
            Operation::Tan => backend.tan(radians),
            Operation::Exp => backend.exp(x),
            Operation::Ln => backend.ln(x),
            Operation::Asin => backend.asin(x),
            Operation::Acos => backend.acos(x),
            Operation::Atan => backend.atan(x),
        }?;

        let value = if op.returns_degrees() {
            raw * 180.0 / PI
        } else {
            raw
        };

        if value.is_nan() {
            return Err(CoreError::Computation(format!("{} returned NaN", op.id())));
        }

        if op.is_transcendental() {
            Ok(round_to(value, self.decimals))
        } else {
            Ok(value)
        }
    }
}

/// Reads operand text with the same policy the validator applied.
fn operand_value(policy: NumericPolicy, text: &str, field: &str) -> CoreResult<f64> {
    policy
        .value_of(text)
        .filter(|value| !value.is_nan())
        .ok_or_else(|| CoreError::Computation(format!("operand {field} is not a number: {text:?}")))
}

// =============================================================================
// Unit Tests
// =============================================================================
