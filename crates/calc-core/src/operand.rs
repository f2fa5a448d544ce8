//! # Operands
//!
//! The two operand fields (A and B) and how their text becomes a number.
//!
//! ## Supplied vs. Numeric
//! A field is *supplied* when its text is non-empty. `"0"` is supplied.
//! Whether the text is a valid number is a separate question, answered by
//! [`parse_number`] and governed by [`NumericPolicy`].
//!
//! ## Editing Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Key press            Operands change                                   │
//! │  ─────────            ───────────────                                   │
//! │  "7"          ──────► active field += "7"                               │
//! │  DEL          ──────► active field loses its last character             │
//! │  AC           ──────► A = "", B = ""                                    │
//! │  focus B      ──────► active = B                                        │
//! │  success      ──────► A = "", B = "" (after a short delay)              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Converts operand text to a finite number.
///
/// Surrounding whitespace is ignored. Returns `None` for empty text, for
/// text that is not a decimal number, and for `inf`/`NaN` spellings.
///
/// ## Example
/// ```rust
/// use calc_core::operand::parse_number;
///
/// assert_eq!(parse_number("-2.5"), Some(-2.5));
/// assert_eq!(parse_number(" 1e3 "), Some(1000.0));
/// assert_eq!(parse_number("abc"), None);
/// assert_eq!(parse_number("NaN"), None);
/// ```
pub fn parse_number(text: &str) -> Option<f64> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }
    text.parse::<f64>().ok().filter(|value| value.is_finite())
}

/// How the validator treats operand text that is not a number.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "lowercase")]
#[ts(export)]
pub enum NumericPolicy {
    /// Non-numeric text is rejected with `NotANumber`.
    #[default]
    Strict,

    /// Non-numeric text counts as NaN: never zero, never negative.
    /// Blank text counts as zero. The dispatcher still refuses NaN operands.
    Lenient,
}

impl NumericPolicy {
    /// The numeric value the validator's domain checks see.
    ///
    /// `None` means "reject as not a number" and only happens in strict mode.
    pub fn value_of(self, text: &str) -> Option<f64> {
        match (self, parse_number(text)) {
            (_, Some(value)) => Some(value),
            (NumericPolicy::Strict, None) => None,
            (NumericPolicy::Lenient, None) if text.trim().is_empty() => Some(0.0),
            (NumericPolicy::Lenient, None) => Some(f64::NAN),
        }
    }
}

/// One of the two operand fields.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "lowercase")]
#[ts(export)]
pub enum Field {
    #[default]
    A,
    B,
}

/// The operand fields as the user is editing them.
///
/// ## Invariants
/// - Text is stored exactly as typed; nothing is trimmed or normalized
/// - `revision` increases on every edit, so a delayed reset can tell whether
///   the fields changed after it was scheduled
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Operands {
    pub a: String,
    pub b: String,
    pub active: Field,
    #[ts(type = "number")]
    pub revision: u64,
}

impl Operands {
    pub fn new() -> Self {
        Operands::default()
    }

    /// Creates operands with both fields filled, field A active.
    pub fn with_values(a: impl Into<String>, b: impl Into<String>) -> Self {
        Operands {
            a: a.into(),
            b: b.into(),
            ..Operands::default()
        }
    }

    /// Returns the text of a field.
    pub fn get(&self, field: Field) -> &str {
        match field {
            Field::A => &self.a,
            Field::B => &self.b,
        }
    }

    fn field_mut(&mut self, field: Field) -> &mut String {
        match field {
            Field::A => &mut self.a,
            Field::B => &mut self.b,
        }
    }

    /// Replaces a field's text (typing directly into the input).
    pub fn set(&mut self, field: Field, text: impl Into<String>) {
        *self.field_mut(field) = text.into();
        self.revision += 1;
    }

    /// Chooses which field keypad presses go to.
    pub fn focus(&mut self, field: Field) {
        self.active = field;
    }

    /// Appends a key label to the active field.
    pub fn push(&mut self, key: &str) {
        let active = self.active;
        self.field_mut(active).push_str(key);
        self.revision += 1;
    }

    /// Deletes the last character of the active field (DEL).
    pub fn backspace(&mut self) {
        let active = self.active;
        if self.field_mut(active).pop().is_some() {
            self.revision += 1;
        }
    }

    /// Empties both fields (AC). The active field is kept.
    pub fn clear(&mut self) {
        self.a.clear();
        self.b.clear();
        self.revision += 1;
    }

    /// Clears both fields unless they were edited after `revision`.
    ///
    /// Returns whether the reset happened.
    pub fn reset_if_unchanged(&mut self, revision: u64) -> bool {
        if self.revision != revision {
            return false;
        }
        self.clear();
        true
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_number() {
        assert_eq!(parse_number("0"), Some(0.0));
        assert_eq!(parse_number("-0"), Some(-0.0));
        assert_eq!(parse_number(".5"), Some(0.5));
        assert_eq!(parse_number("42."), Some(42.0));
        assert_eq!(parse_number(""), None);
        assert_eq!(parse_number("   "), None);
        assert_eq!(parse_number("12abc"), None);
        assert_eq!(parse_number("inf"), None);
        assert_eq!(parse_number("-infinity"), None);
    }

    #[test]
    fn test_policy_values() {
        assert_eq!(NumericPolicy::Strict.value_of("3"), Some(3.0));
        assert_eq!(NumericPolicy::Strict.value_of("abc"), None);
        assert_eq!(NumericPolicy::Lenient.value_of(" "), Some(0.0));
        assert!(NumericPolicy::Lenient.value_of("abc").unwrap().is_nan());
    }

    #[test]
    fn test_keypad_editing_targets_active_field() {
        let mut ops = Operands::new();
        ops.push("1");
        ops.push("2");
        ops.focus(Field::B);
        ops.push("7");
        assert_eq!(ops.get(Field::A), "12");
        assert_eq!(ops.get(Field::B), "7");

        ops.backspace();
        assert_eq!(ops.b, "");
        assert_eq!(ops.a, "12");
    }

    #[test]
    fn test_backspace_on_empty_field_is_not_an_edit() {
        let mut ops = Operands::new();
        let before = ops.revision;
        ops.backspace();
        assert_eq!(ops.revision, before);
    }

    #[test]
    fn test_clear_keeps_active_field() {
        let mut ops = Operands::with_values("5", "6");
        ops.focus(Field::B);
        ops.clear();
        assert_eq!(ops.a, "");
        assert_eq!(ops.b, "");
        assert_eq!(ops.active, Field::B);
    }

    #[test]
    fn test_reset_skipped_after_new_edit() {
        let mut ops = Operands::with_values("2", "3");
        let scheduled_at = ops.revision;
        ops.push("9");
        assert!(!ops.reset_if_unchanged(scheduled_at));
        assert_eq!(ops.a, "29");

        let scheduled_at = ops.revision;
        assert!(ops.reset_if_unchanged(scheduled_at));
        assert_eq!(ops.a, "");
        assert_eq!(ops.b, "");
    }
}
