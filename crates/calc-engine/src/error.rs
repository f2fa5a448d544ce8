//! # Engine Error Types
//!
//! Error types for loading and calling the numeric module.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Propagation                                    │
//! │                                                                         │
//! │  io::Error / wasmer::{CompileError, InstantiationError,                 │
//! │                       ExportError, RuntimeError}                        │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  EngineError (this module) ← Adds context (path, export name)          │
//! │       │                                                                 │
//! │       ├── load failure → BackendHandle::Failed(message)                 │
//! │       │                                                                 │
//! │       └── call failure → calc_core::BackendError → CoreError            │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::path::PathBuf;

use calc_core::BackendError;
use thiserror::Error;

/// Numeric module errors.
#[derive(Debug, Error)]
pub enum EngineError {
    /// The module file could not be read.
    ///
    /// ## When This Occurs
    /// - `calc.wasm` was not bundled with the app
    /// - `CALC_MODULE_PATH` points at a missing file
    #[error("Failed to read module {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The module file is larger than the configured limit.
    #[error("Module is {size} bytes, limit is {limit}")]
    TooLarge { size: usize, limit: usize },

    /// The bytes are neither valid WebAssembly nor valid WAT.
    #[error("Failed to compile module: {0}")]
    Compile(#[from] wasmer::CompileError),

    /// The module compiled but could not be instantiated (it asked for
    /// imports, or its start function trapped).
    #[error("Failed to instantiate module: {0}")]
    Instantiate(#[source] Box<wasmer::InstantiationError>),

    /// A required export is absent or has the wrong signature.
    #[error("Module export `{name}` is missing or has the wrong type: {source}")]
    MissingExport {
        name: &'static str,
        #[source]
        source: wasmer::ExportError,
    },

    /// An exported function trapped.
    #[error("Module function `{function}` failed: {source}")]
    Call {
        function: &'static str,
        #[source]
        source: wasmer::RuntimeError,
    },

    /// Background compilation task died.
    #[error("Internal engine error: {0}")]
    Internal(String),
}

impl From<wasmer::InstantiationError> for EngineError {
    fn from(err: wasmer::InstantiationError) -> Self {
        EngineError::Instantiate(Box::new(err))
    }
}

/// Call failures surface to the dispatcher as generic backend errors.
impl From<EngineError> for BackendError {
    fn from(err: EngineError) -> Self {
        BackendError::new(err.to_string())
    }
}

/// Convenience type alias for Results with EngineError.
pub type EngineResult<T> = Result<T, EngineError>;
