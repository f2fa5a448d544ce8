//! # Config Commands
//!
//! Tauri commands for retrieving application configuration and the
//! numeric module's load status.

use calc_core::BackendStatus;
use tauri::State;
use tracing::debug;

use crate::state::{BackendState, ConfigState};

/// Gets the current application configuration.
///
/// ## Returns
/// Complete configuration state (read-only)
#[tauri::command]
pub fn get_config(config: State<'_, ConfigState>) -> ConfigState {
    debug!("get_config command");
    (*config).clone()
}

/// Gets the module load phase.
///
/// The frontend calls this once on mount in case the `backend-status`
/// event fired before its listener was attached.
#[tauri::command]
pub fn get_backend_status(backend: State<'_, BackendState>) -> BackendStatus {
    debug!("get_backend_status command");
    backend.status()
}
