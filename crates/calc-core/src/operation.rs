//! # Operations
//!
//! The closed set of operations the keypad can invoke.
//!
//! ## Arity Classes
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Operation Set                                   │
//! │                                                                         │
//! │  Binary (fields A and B)          Unary (field A only)                  │
//! │  ─────────────────────────        ─────────────────────────────         │
//! │  add  sub  mul  div               inc  dec  fact                        │
//! │  pow  mod                         sin  cos  tan   (degrees in)          │
//! │                                   asin acos atan  (degrees out)         │
//! │                                   exp  ln                               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Identifiers are the short keypad names (`"fact"`, `"pow"`). Long names
//! (`"factorial"`, `"power"`) parse as aliases. Anything else is
//! unrecognized, which the validator lets through on purpose.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::CoreError;

/// How many operand fields an operation consumes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "lowercase")]
#[ts(export)]
pub enum Arity {
    /// Fields A and B are both required.
    Binary,
    /// Field A only.
    Unary,
}

/// An operation the numeric backend can perform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "lowercase")]
#[ts(export)]
pub enum Operation {
    Add,
    Sub,
    Mul,
    Div,
    Pow,
    Mod,
    Inc,
    Dec,
    Fact,
    Sin,
    Cos,
    Tan,
    Exp,
    Ln,
    Asin,
    Acos,
    Atan,
}

impl Operation {
    /// Every operation, binary ones first.
    pub const ALL: [Operation; 17] = [
        Operation::Add,
        Operation::Sub,
        Operation::Mul,
        Operation::Div,
        Operation::Pow,
        Operation::Mod,
        Operation::Inc,
        Operation::Dec,
        Operation::Fact,
        Operation::Sin,
        Operation::Cos,
        Operation::Tan,
        Operation::Exp,
        Operation::Ln,
        Operation::Asin,
        Operation::Acos,
        Operation::Atan,
    ];

    /// Parses a keypad identifier or one of its long aliases.
    ///
    /// Returns `None` for unrecognized identifiers.
    ///
    /// ## Example
    /// ```rust
    /// use calc_core::Operation;
    ///
    /// assert_eq!(Operation::parse("fact"), Some(Operation::Fact));
    /// assert_eq!(Operation::parse("factorial"), Some(Operation::Fact));
    /// assert_eq!(Operation::parse("sqrt"), None);
    /// ```
    pub fn parse(id: &str) -> Option<Self> {
        let op = match id {
            "add" => Operation::Add,
            "sub" | "subtract" => Operation::Sub,
            "mul" | "multiply" => Operation::Mul,
            "div" | "divide" => Operation::Div,
            "pow" | "power" => Operation::Pow,
            "mod" | "modulo" => Operation::Mod,
            "inc" | "increment" => Operation::Inc,
            "dec" | "decrement" => Operation::Dec,
            "fact" | "factorial" => Operation::Fact,
            "sin" | "sine" => Operation::Sin,
            "cos" | "cosine" => Operation::Cos,
            "tan" | "tangent" => Operation::Tan,
            "exp" | "exponential" => Operation::Exp,
            "ln" | "natural-log" | "natural_log" => Operation::Ln,
            "asin" | "arcsine" => Operation::Asin,
            "acos" | "arccosine" => Operation::Acos,
            "atan" | "arctangent" => Operation::Atan,
            _ => return None,
        };
        Some(op)
    }

    /// The keypad identifier (`"fact"`, `"pow"`, ...).
    pub const fn id(self) -> &'static str {
        match self {
            Operation::Add => "add",
            Operation::Sub => "sub",
            Operation::Mul => "mul",
            Operation::Div => "div",
            Operation::Pow => "pow",
            Operation::Mod => "mod",
            Operation::Inc => "inc",
            Operation::Dec => "dec",
            Operation::Fact => "fact",
            Operation::Sin => "sin",
            Operation::Cos => "cos",
            Operation::Tan => "tan",
            Operation::Exp => "exp",
            Operation::Ln => "ln",
            Operation::Asin => "asin",
            Operation::Acos => "acos",
            Operation::Atan => "atan",
        }
    }

    pub const fn arity(self) -> Arity {
        match self {
            Operation::Add
            | Operation::Sub
            | Operation::Mul
            | Operation::Div
            | Operation::Pow
            | Operation::Mod => Arity::Binary,
            _ => Arity::Unary,
        }
    }

    #[inline]
    pub const fn is_binary(self) -> bool {
        matches!(self.arity(), Arity::Binary)
    }

    /// `sin`, `cos`, `tan`: the operand is an angle in degrees.
    pub const fn takes_degrees(self) -> bool {
        matches!(self, Operation::Sin | Operation::Cos | Operation::Tan)
    }

    /// `asin`, `acos`, `atan`: the result is an angle, reported in degrees.
    pub const fn returns_degrees(self) -> bool {
        matches!(self, Operation::Asin | Operation::Acos | Operation::Atan)
    }

    /// Results of these operations are rounded before being shown.
    pub const fn is_transcendental(self) -> bool {
        matches!(
            self,
            Operation::Sin
                | Operation::Cos
                | Operation::Tan
                | Operation::Exp
                | Operation::Ln
                | Operation::Asin
                | Operation::Acos
                | Operation::Atan
        )
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for Operation {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Operation::parse(s).ok_or_else(|| CoreError::UnknownOperation(s.to_string()))
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
