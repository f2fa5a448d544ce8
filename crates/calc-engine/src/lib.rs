//! # calc-engine: WebAssembly Host for Degree Calc
//!
//! Loads the numeric module (`calc.wasm`) and makes it callable through
//! [`calc_core::Backend`].
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Degree Calc Data Flow                            │
//! │                                                                         │
//! │  Tauri Command (calculate)                                              │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  calc-core Dispatcher ── validate ── degrees→radians ── round           │
//! │       │ Backend trait                                                   │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                   calc-engine (THIS CRATE)                      │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌───────────────┐    ┌──────────────┐  │   │
//! │  │   │ EngineConfig  │    │  WasmBackend  │    │  EngineError │  │   │
//! │  │   │ (loader.rs)   │───►│  (wasm.rs)    │    │  (error.rs)  │  │   │
//! │  │   │ path, limits  │    │ Store+exports │    │              │  │   │
//! │  │   └───────────────┘    └───────────────┘    └──────────────┘  │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  calc.wasm (add, sub, mul, div, power, inc, dec, factorial, ...)       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use calc_core::{BackendHandle, Dispatcher};
//! use calc_engine::{load, EngineConfig};
//!
//! let mut handle = BackendHandle::NotLoaded;
//! handle.complete(load(&EngineConfig::new("resources/calc.wasm")).await);
//!
//! let calc = Dispatcher::default().evaluate(&mut handle, "fact", "5", "")?;
//! assert_eq!(calc.value, 120.0);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod loader;
pub mod wasm;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{EngineError, EngineResult};
pub use loader::{load, EngineConfig};
pub use wasm::WasmBackend;
