//! # Degree Calc Desktop Library
//!
//! Core library for the Degree Calc desktop application.
//! This is the main entry point that configures and runs the Tauri app.
//!
//! ## Module Organization
//! ```text
//! calc_desktop_lib/
//! ├── lib.rs            ◄─── You are here (Tauri setup & run)
//! ├── state/
//! │   ├── mod.rs        ◄─── State type exports
//! │   ├── backend.rs    ◄─── Numeric module handle
//! │   ├── operands.rs   ◄─── Input fields + result display
//! │   ├── history.rs    ◄─── Calculation history
//! │   └── config.rs     ◄─── Configuration state
//! ├── commands/
//! │   ├── mod.rs        ◄─── Command exports
//! │   ├── calculate.rs  ◄─── Run an operation
//! │   ├── operands.rs   ◄─── Keypad / field editing
//! │   ├── history.rs    ◄─── History panel
//! │   └── config.rs     ◄─── Config + load status
//! └── error.rs          ◄─── API error type for commands
//! ```
//!
//! ## State Management (Option B: Multiple State Types)
//! Instead of a single `AppState` struct, we use multiple focused state types.
//! See [`state`] for the layout.

pub mod commands;
pub mod error;
pub mod state;

use std::path::PathBuf;

use calc_engine::{EngineConfig, WasmBackend};
use tauri::path::BaseDirectory;
use tauri::{AppHandle, Emitter, Manager};
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use state::{BackendState, ConfigState, HistoryState, OperandsState};

/// Event emitted once the module load settles (`BackendStatus` payload).
pub const BACKEND_STATUS_EVENT: &str = "backend-status";

/// Runs the Tauri application.
///
/// ## Startup Sequence
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │                       Application Startup                               │
/// │                                                                         │
/// │  1. Initialize Logging ───────────────────────────────────────────────► │
/// │     • tracing-subscriber with env filter                                │
/// │     • Default: INFO, can be overridden with RUST_LOG                    │
/// │                                                                         │
/// │  2. Load Configuration ───────────────────────────────────────────────► │
/// │     • CALC_* environment variables over defaults                        │
/// │                                                                         │
/// │  3. Initialize State Objects ─────────────────────────────────────────► │
/// │     • BackendState: NotLoaded (calculate() rejects until Ready)         │
/// │     • OperandsState: empty fields, A active                             │
/// │     • HistoryState: empty                                               │
/// │                                                                         │
/// │  4. Start Module Load (background, fire-and-forget) ──────────────────► │
/// │     • CALC_MODULE_PATH or bundled resource calc.wasm                    │
/// │     • Outcome stored in BackendState, "backend-status" event emitted    │
/// │                                                                         │
/// │  5. Build & Run Tauri App ────────────────────────────────────────────► │
/// │     • Register all commands                                             │
/// │     • Launch window (usable while the module loads)                     │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
pub fn run() {
    init_tracing();

    info!("Starting Degree Calc");

    tauri::Builder::default()
        .setup(|app| {
            let config = ConfigState::from_env();
            info!(?config, "Configuration loaded");

            let module_path = get_module_path(app, &config)?;
            info!(?module_path, "Module path determined");

            app.manage(BackendState::<WasmBackend>::new());
            app.manage(OperandsState::new());
            app.manage(HistoryState::new());
            app.manage(config);

            info!("State initialized");

            spawn_module_load(app.handle().clone(), EngineConfig::new(module_path));
            Ok(())
        })
        .invoke_handler(tauri::generate_handler![
            // Calculation
            commands::calculate::calculate,
            // Operand editing
            commands::operands::get_operands,
            commands::operands::press_key,
            commands::operands::backspace,
            commands::operands::clear_all,
            commands::operands::focus_field,
            commands::operands::set_operand,
            // History
            commands::history::get_history,
            commands::history::delete_history_entry,
            commands::history::clear_history,
            // Config commands
            commands::config::get_config,
            commands::config::get_backend_status,
        ])
        .run(tauri::generate_context!())
        .expect("error while running tauri application");
}

/// Initializes the tracing subscriber for structured logging.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=calc=trace` - Show trace for calc crates only
/// - Default: INFO level
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,calc=debug,wasmer=warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .init();
}

/// Determines where `calc.wasm` lives.
///
/// ## Resolution Order
/// 1. `CALC_MODULE_PATH` (via [`ConfigState::module_path`])
/// 2. `calc.wasm` in the app's resource directory
///
/// `build.rs` compiles `calc-module` to wasm32 and places the result next to
/// `tauri.conf.json`, which bundles it as a resource.
fn get_module_path(
    app: &tauri::App,
    config: &ConfigState,
) -> Result<PathBuf, Box<dyn std::error::Error>> {
    if let Some(path) = &config.module_path {
        return Ok(path.clone());
    }

    Ok(app.path().resolve("calc.wasm", BaseDirectory::Resource)?)
}

/// Loads the module in the background and publishes the outcome.
///
/// There is no retry: a failed load leaves every calculation rejected
/// until the app restarts.
fn spawn_module_load(app: AppHandle, engine: EngineConfig) {
    tauri::async_runtime::spawn(async move {
        let outcome = calc_engine::load(&engine).await;
        if let Err(e) = &outcome {
            error!(error = %e, "Failed to load numeric module");
        }

        let backend = app.state::<BackendState>();
        backend.complete(outcome);

        let status = backend.status();
        if let Err(e) = app.emit(BACKEND_STATUS_EVENT, &status) {
            warn!(error = %e, "Failed to emit backend status");
        }
    });
}
