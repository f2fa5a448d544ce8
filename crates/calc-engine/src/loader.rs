//! # Module Loading
//!
//! One-time load of `calc.wasm` at startup.
//!
//! ## Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Module Load (once per session)                     │
//! │                                                                         │
//! │  EngineConfig::new(path) ← Configure path and size limit                │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  load(&config).await                                                    │
//! │       │                                                                 │
//! │       ├── tokio::fs::read(path)           (async I/O)                   │
//! │       ├── size check                                                    │
//! │       └── WasmBackend::from_bytes(bytes)  (blocking pool: compilation)  │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Ok(WasmBackend) / Err(EngineError)                                     │
//! │                                                                         │
//! │  No retry and no cancellation: the caller records the outcome in its   │
//! │  BackendHandle and lives with it for the rest of the session.          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::path::PathBuf;
use std::time::Instant;

use tracing::{debug, info};

use crate::error::{EngineError, EngineResult};
use crate::wasm::WasmBackend;

// =============================================================================
// Configuration
// =============================================================================

/// Module loading configuration.
///
/// ## Example
/// ```rust
/// use calc_engine::EngineConfig;
///
/// let config = EngineConfig::new("resources/calc.wasm").max_module_bytes(1 << 20);
/// assert_eq!(config.max_module_bytes, 1 << 20);
/// ```
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Path to the compiled module.
    pub module_path: PathBuf,

    /// Largest module accepted, in bytes.
    /// Default: 16 MiB (the real module is a few kilobytes)
    pub max_module_bytes: usize,
}

impl EngineConfig {
    /// Default size limit.
    pub const DEFAULT_MAX_MODULE_BYTES: usize = 16 * 1024 * 1024;

    pub fn new(path: impl Into<PathBuf>) -> Self {
        EngineConfig {
            module_path: path.into(),
            max_module_bytes: Self::DEFAULT_MAX_MODULE_BYTES,
        }
    }

    /// Sets the size limit.
    pub fn max_module_bytes(mut self, limit: usize) -> Self {
        self.max_module_bytes = limit;
        self
    }
}

// =============================================================================
// Loading
// =============================================================================

/// Reads, compiles and instantiates the module.
///
/// Compilation runs on tokio's blocking pool so the async runtime stays
/// responsive while Cranelift works.
pub async fn load(config: &EngineConfig) -> EngineResult<WasmBackend> {
    let started = Instant::now();
    let path = &config.module_path;
    debug!(path = %path.display(), "Reading numeric module");

    let bytes = tokio::fs::read(path).await.map_err(|source| EngineError::Read {
        path: path.clone(),
        source,
    })?;

    if bytes.len() > config.max_module_bytes {
        return Err(EngineError::TooLarge {
            size: bytes.len(),
            limit: config.max_module_bytes,
        });
    }

    let size = bytes.len();
    let backend = tokio::task::spawn_blocking(move || WasmBackend::from_bytes(bytes))
        .await
        .map_err(|e| EngineError::Internal(e.to_string()))??;

    info!(
        path = %path.display(),
        bytes = size,
        elapsed_ms = started.elapsed().as_millis() as u64,
        "Numeric module loaded"
    );
    Ok(backend)
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wasm::tests::{module, ADD};
    use calc_core::Backend;

    fn temp_module(name: &str, contents: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!(
            "calc-engine-{}-{}.wat",
            std::process::id(),
            name
        ));
        std::fs::write(&path, contents).unwrap();
        path
    }

    #[tokio::test]
    async fn test_load_from_file() {
        let path = temp_module("ok", &module(ADD, ""));
        let mut backend = load(&EngineConfig::new(&path)).await.unwrap();
        assert_eq!(backend.add(40.0, 2.0).unwrap(), 42.0);
        std::fs::remove_file(path).ok();
    }

    #[tokio::test]
    async fn test_missing_file() {
        let config = EngineConfig::new("/nonexistent/calc.wasm");
        let err = load(&config).await.unwrap_err();
        assert!(matches!(err, EngineError::Read { .. }));
    }

    #[tokio::test]
    async fn test_size_limit() {
        let path = temp_module("big", &module(ADD, ""));
        let config = EngineConfig::new(&path).max_module_bytes(8);
        let err = load(&config).await.unwrap_err();
        assert!(matches!(err, EngineError::TooLarge { limit: 8, .. }));
        std::fs::remove_file(path).ok();
    }

    #[tokio::test]
    async fn test_invalid_module_file() {
        let path = temp_module("bad", "(module (func (export \"add\")");
        let err = load(&EngineConfig::new(&path)).await.unwrap_err();
        assert!(matches!(err, EngineError::Compile(_)));
        std::fs::remove_file(path).ok();
    }
}
