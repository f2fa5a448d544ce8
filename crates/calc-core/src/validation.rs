//! # Validation Module
//!
//! Decides whether an operation may run on the operands as typed.
//!
//! ## Rule Precedence
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  validate(op, backend_ready, a, b)        first matching rule wins      │
//! │                                                                         │
//! │  1. backend not ready ───────────────────────► BackendUnavailable       │
//! │                                                                         │
//! │  2. binary op                                                           │
//! │     ├── a or b empty ────────────────────────► MissingOperand           │
//! │     ├── a or b not a number (strict) ────────► NotANumber               │
//! │     ├── div and b == 0 ──────────────────────► DivisionByZero           │
//! │     └── otherwise ───────────────────────────► Accepted                 │
//! │                                                                         │
//! │  3. unary op                                                            │
//! │     ├── a and b empty ───────────────────────► MissingOperand           │
//! │     ├── only b filled ───────────────────────► WrongOperandField        │
//! │     ├── a and b filled ──────────────────────► ExtraOperand             │
//! │     ├── a not a number (strict) ─────────────► NotANumber               │
//! │     ├── fact and a < 0 ──────────────────────► InvalidDomain            │
//! │     └── otherwise ───────────────────────────► Accepted                 │
//! │                                                                         │
//! │  4. unrecognized op ─────────────────────────► Accepted                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Non-integer factorials, overflow and trigonometric domains are the
//! backend's business, not the validator's.
//!
//! ## Usage
//! ```rust
//! use calc_core::validation::{validate, Verdict};
//! use calc_core::RejectionKind;
//!
//! assert_eq!(validate("fact", true, "5", ""), Verdict::Accepted);
//! assert_eq!(
//!     validate("fact", true, "", "5"),
//!     Verdict::Rejected(RejectionKind::WrongOperandField)
//! );
//! ```

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::RejectionKind;
use crate::operand::NumericPolicy;
use crate::operation::{Arity, Operation};

/// Outcome of validating one operation request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(tag = "status", content = "reason", rename_all = "camelCase")]
#[ts(export)]
pub enum Verdict {
    Accepted,
    Rejected(RejectionKind),
}

impl Verdict {
    #[inline]
    pub fn is_accepted(&self) -> bool {
        matches!(self, Verdict::Accepted)
    }

    /// Converts to a `Result` so callers can use `?`.
    pub fn into_result(self) -> Result<(), RejectionKind> {
        match self {
            Verdict::Accepted => Ok(()),
            Verdict::Rejected(kind) => Err(kind),
        }
    }
}

/// The operand/operation validator.
///
/// Holds only its numeric policy; validating never mutates it, so the same
/// inputs always produce the same verdict.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Validator {
    policy: NumericPolicy,
}

impl Validator {
    pub const fn new(policy: NumericPolicy) -> Self {
        Validator { policy }
    }

    pub const fn policy(&self) -> NumericPolicy {
        self.policy
    }

    /// Validates a request by keypad identifier.
    ///
    /// Unrecognized identifiers are accepted once the backend is ready.
    pub fn validate(&self, op: &str, backend_ready: bool, a: &str, b: &str) -> Verdict {
        if !backend_ready {
            return Verdict::Rejected(RejectionKind::BackendUnavailable);
        }

        match Operation::parse(op) {
            Some(op) => self.check(op, a, b),
            None => Verdict::Accepted,
        }
    }

    /// Validates a request for an already-parsed operation.
    pub fn validate_operation(
        &self,
        op: Operation,
        backend_ready: bool,
        a: &str,
        b: &str,
    ) -> Verdict {
        if !backend_ready {
            return Verdict::Rejected(RejectionKind::BackendUnavailable);
        }
        self.check(op, a, b)
    }

    fn check(&self, op: Operation, a: &str, b: &str) -> Verdict {
        let result = match op.arity() {
            Arity::Binary => self.check_binary(op, a, b),
            Arity::Unary => self.check_unary(op, a, b),
        };

        match result {
            Ok(()) => Verdict::Accepted,
            Err(kind) => Verdict::Rejected(kind),
        }
    }

    fn check_binary(&self, op: Operation, a: &str, b: &str) -> Result<(), RejectionKind> {
        if a.is_empty() || b.is_empty() {
            return Err(RejectionKind::MissingOperand);
        }

        let _x = self.numeric(a)?;
        let y = self.numeric(b)?;

        if op == Operation::Div && y == 0.0 {
            return Err(RejectionKind::DivisionByZero);
        }

        Ok(())
    }

    fn check_unary(&self, op: Operation, a: &str, b: &str) -> Result<(), RejectionKind> {
        match (a.is_empty(), b.is_empty()) {
            (true, true) => return Err(RejectionKind::MissingOperand),
            (true, false) => return Err(RejectionKind::WrongOperandField),
            (false, false) => return Err(RejectionKind::ExtraOperand),
            (false, true) => {}
        }

        let x = self.numeric(a)?;

        if op == Operation::Fact && x < 0.0 {
            return Err(RejectionKind::InvalidDomain);
        }

        Ok(())
    }

    fn numeric(&self, text: &str) -> Result<f64, RejectionKind> {
        self.policy.value_of(text).ok_or(RejectionKind::NotANumber)
    }
}

/// Validates with the default (strict) numeric policy.
///
/// ## Example
/// ```rust
/// use calc_core::validation::{validate, Verdict};
/// use calc_core::RejectionKind;
///
/// // Readiness is checked before arity.
/// assert_eq!(
///     validate("add", false, "", ""),
///     Verdict::Rejected(RejectionKind::BackendUnavailable)
/// );
/// ```
pub fn validate(op: &str, backend_ready: bool, a: &str, b: &str) -> Verdict {
    Validator::default().validate(op, backend_ready, a, b)
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    const BINARY: [&str; 6] = ["add", "sub", "mul", "div", "pow", "mod"];
    const UNARY: [&str; 11] = [
        "inc", "dec", "fact", "sin", "cos", "tan", "exp", "ln", "asin", "acos", "atan",
    ];

    fn rejected(kind: RejectionKind) -> Verdict {
        Verdict::Rejected(kind)
    }

    #[test]
    fn test_backend_not_ready_wins_over_everything() {
        for op in BINARY.iter().chain(UNARY.iter()).chain(["noop", ""].iter()) {
            assert_eq!(
                validate(op, false, "", ""),
                rejected(RejectionKind::BackendUnavailable),
                "op {op}"
            );
            assert_eq!(
                validate(op, false, "2", "3"),
                rejected(RejectionKind::BackendUnavailable)
            );
        }
    }

    #[test]
    fn test_binary_requires_both_fields() {
        for op in BINARY {
            assert_eq!(validate(op, true, "", "3"), rejected(RejectionKind::MissingOperand));
            assert_eq!(validate(op, true, "2", ""), rejected(RejectionKind::MissingOperand));
            assert_eq!(validate(op, true, "", ""), rejected(RejectionKind::MissingOperand));
        }
    }

    #[test]
    fn test_binary_accepts_two_numbers() {
        for op in BINARY {
            assert_eq!(validate(op, true, "2", "3"), Verdict::Accepted);
        }
    }

    #[test]
    fn test_zero_counts_as_supplied() {
        assert_eq!(validate("add", true, "0", "0"), Verdict::Accepted);
        assert_eq!(validate("inc", true, "0", ""), Verdict::Accepted);
    }

    #[test]
    fn test_division_by_zero() {
        assert_eq!(validate("div", true, "10", "0"), rejected(RejectionKind::DivisionByZero));
        assert_eq!(validate("div", true, "10", "-0"), rejected(RejectionKind::DivisionByZero));
        assert_eq!(validate("div", true, "10", "0.000"), rejected(RejectionKind::DivisionByZero));
        assert_eq!(validate("div", true, "0", "10"), Verdict::Accepted);
        // Only division checks the divisor.
        assert_eq!(validate("mod", true, "10", "0"), Verdict::Accepted);
    }

    #[test]
    fn test_unary_field_combinations() {
        for op in UNARY {
            assert_eq!(validate(op, true, "", ""), rejected(RejectionKind::MissingOperand));
            assert_eq!(validate(op, true, "", "4"), rejected(RejectionKind::WrongOperandField));
            assert_eq!(validate(op, true, "4", "4"), rejected(RejectionKind::ExtraOperand));
            assert_eq!(validate(op, true, "4", ""), Verdict::Accepted);
        }
    }

    #[test]
    fn test_factorial_domain() {
        assert_eq!(validate("fact", true, "-3", ""), rejected(RejectionKind::InvalidDomain));
        assert_eq!(validate("fact", true, "5", ""), Verdict::Accepted);
        assert_eq!(validate("fact", true, "-0", ""), Verdict::Accepted);
        // Non-integer arguments are the backend's concern.
        assert_eq!(validate("fact", true, "2.5", ""), Verdict::Accepted);
        // Negative operands are fine for every other unary op.
        assert_eq!(validate("dec", true, "-3", ""), Verdict::Accepted);
    }

    #[test]
    fn test_unrecognized_operation_passes_through() {
        assert_eq!(validate("sqrt", true, "", ""), Verdict::Accepted);
        assert_eq!(validate("", true, "abc", "1"), Verdict::Accepted);
    }

    #[test]
    fn test_strict_rejects_non_numeric_text() {
        assert_eq!(validate("add", true, "abc", "1"), rejected(RejectionKind::NotANumber));
        assert_eq!(validate("div", true, "1", "zero"), rejected(RejectionKind::NotANumber));
        assert_eq!(validate("fact", true, "x", ""), rejected(RejectionKind::NotANumber));
        // Arity problems are reported before the text is looked at.
        assert_eq!(validate("fact", true, "x", "y"), rejected(RejectionKind::ExtraOperand));
    }

    #[test]
    fn test_lenient_lets_non_numeric_text_through() {
        let validator = Validator::new(NumericPolicy::Lenient);
        assert_eq!(validator.validate("add", true, "abc", "1"), Verdict::Accepted);
        assert_eq!(validator.validate("div", true, "1", "abc"), Verdict::Accepted);
        assert_eq!(validator.validate("fact", true, "abc", ""), Verdict::Accepted);
        // Blank text reads as zero, like a numeric input field would.
        assert_eq!(
            validator.validate("div", true, "1", " "),
            rejected(RejectionKind::DivisionByZero)
        );
    }

    #[test]
    fn test_validate_is_idempotent() {
        let validator = Validator::default();
        let cases = [
            ("div", true, "10", "0"),
            ("fact", true, "-3", ""),
            ("sin", true, "30", ""),
            ("add", false, "", ""),
        ];
        for (op, ready, a, b) in cases {
            let first = validator.validate(op, ready, a, b);
            for _ in 0..3 {
                assert_eq!(validator.validate(op, ready, a, b), first);
            }
        }
    }

    #[test]
    fn test_validate_operation_matches_identifier_path() {
        let validator = Validator::default();
        for op in Operation::ALL {
            for (a, b) in [("", ""), ("1", ""), ("", "1"), ("1", "1"), ("-1", "0")] {
                assert_eq!(
                    validator.validate_operation(op, true, a, b),
                    validator.validate(op.id(), true, a, b)
                );
            }
        }
    }

    #[test]
    fn test_verdict_into_result() {
        assert_eq!(Verdict::Accepted.into_result(), Ok(()));
        assert_eq!(
            Verdict::Rejected(RejectionKind::ExtraOperand).into_result(),
            Err(RejectionKind::ExtraOperand)
        );
    }
}
