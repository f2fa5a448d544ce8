//! # Operand Commands
//!
//! Keypad and input-field commands. Every command returns the full screen
//! so the frontend re-renders from a single source of truth.

use calc_core::Field;
use tauri::State;
use tracing::debug;

use crate::error::ApiError;
use crate::state::{OperandsState, Screen};

/// Labels the keypad is allowed to append.
const KEYPAD_KEYS: &[&str] = &["0", "1", "2", "3", "4", "5", "6", "7", "8", "9", ".", "-"];

/// Gets the current fields and result.
#[tauri::command]
pub fn get_operands(operands: State<'_, OperandsState>) -> Screen {
    debug!("get_operands command");
    operands.snapshot()
}

/// Appends a keypad key to the active field.
///
/// ## Arguments
/// * `key` - One of `0`-`9`, `.` or `-`
#[tauri::command]
pub fn press_key(operands: State<'_, OperandsState>, key: String) -> Result<Screen, ApiError> {
    debug!(%key, "press_key command");
    press(&operands, &key)
}

/// Deletes the last character of the active field (DEL).
#[tauri::command]
pub fn backspace(operands: State<'_, OperandsState>) -> Screen {
    debug!("backspace command");
    operands.with_screen_mut(|s| {
        s.operands.backspace();
        s.clone()
    })
}

/// Clears both fields and the result (AC).
#[tauri::command]
pub fn clear_all(operands: State<'_, OperandsState>) -> Screen {
    debug!("clear_all command");
    operands.with_screen_mut(|s| {
        s.clear_all();
        s.clone()
    })
}

/// Routes subsequent key presses to `field`.
#[tauri::command]
pub fn focus_field(operands: State<'_, OperandsState>, field: Field) -> Screen {
    debug!(?field, "focus_field command");
    operands.with_screen_mut(|s| {
        s.operands.focus(field);
        s.clone()
    })
}

/// Replaces a field's text (the user typed into the input directly).
///
/// Text is stored as typed; validation happens when an operation runs.
#[tauri::command]
pub fn set_operand(operands: State<'_, OperandsState>, field: Field, text: String) -> Screen {
    debug!(?field, %text, "set_operand command");
    operands.with_screen_mut(|s| {
        s.operands.set(field, text);
        s.clone()
    })
}

fn press(operands: &OperandsState, key: &str) -> Result<Screen, ApiError> {
    if !KEYPAD_KEYS.contains(&key) {
        return Err(ApiError::invalid_key(key));
    }
    Ok(operands.with_screen_mut(|s| {
        s.operands.push(key);
        s.clone()
    }))
}
