//! Build script for the desktop app.
//!
//! Compiles `calc-module` for `wasm32-unknown-unknown` and places the result
//! next to `tauri.conf.json` as `calc.wasm`, the bundled resource the app
//! loads at startup. `tauri_build` checks that every declared resource
//! exists, so the module must be in place before it runs.
//!
//! The nested build uses its own target dir under `$OUT_DIR` so it never
//! waits on the lock held by the outer build.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

const MODULE_TARGET: &str = "wasm32-unknown-unknown";

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let manifest_dir = PathBuf::from(env::var("CARGO_MANIFEST_DIR")?);
    let workspace_root = manifest_dir.join("../../..");

    println!("cargo:rerun-if-changed=../../../crates/calc-module/src");
    println!("cargo:rerun-if-changed=../../../crates/calc-module/Cargo.toml");

    let wasm = build_module(&workspace_root)?;
    fs::copy(&wasm, manifest_dir.join("calc.wasm"))?;

    tauri_build::build();
    Ok(())
}

/// Runs `cargo build -p calc-module --target wasm32-unknown-unknown --release`.
fn build_module(workspace_root: &Path) -> Result<PathBuf, Box<dyn std::error::Error>> {
    let cargo = env::var("CARGO").unwrap_or_else(|_| "cargo".to_string());
    let target_dir = PathBuf::from(env::var("OUT_DIR")?).join("calc-module");

    let status = Command::new(cargo)
        .current_dir(workspace_root)
        .args(["build", "-p", "calc-module", "--release", "--target", MODULE_TARGET])
        .arg("--target-dir")
        .arg(&target_dir)
        // Flags meant for the host build must not leak into the wasm build
        .env_remove("CARGO_ENCODED_RUSTFLAGS")
        .env_remove("RUSTFLAGS")
        .env_remove("CARGO_BUILD_TARGET")
        .status()?;

    if !status.success() {
        return Err(format!(
            "building calc-module for {MODULE_TARGET} failed \
             (is the target installed? `rustup target add {MODULE_TARGET}`)"
        )
        .into());
    }

    Ok(target_dir
        .join(MODULE_TARGET)
        .join("release")
        .join("calc_module.wasm"))
}
