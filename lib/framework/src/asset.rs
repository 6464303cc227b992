use std::env::current_exe;
use std::path::Path;
use std::path::PathBuf;

use crate::exception;
use crate::exception::CoreRsResult;

/// Resolves a file shipped next to the binary, e.g. `assets/conf.json`.
pub fn asset_path(path: &str) -> CoreRsResult<PathBuf> {
    let exe_path = current_exe()?;
    let asset_path = find_asset_path(&exe_path, path);
    if asset_path.exists() {
        return Ok(asset_path);
    }
    Err(exception!(
        message = format!(
            "asset not found, asset={}, exe={}",
            asset_path.to_string_lossy(),
            exe_path.to_string_lossy()
        )
    ))
}

// `cargo run` places the binary under target/debug, fall back to the crate folder
#[cfg(debug_assertions)]
fn find_asset_path(exe_path: &Path, path: &str) -> PathBuf {
    let beside_exe = exe_path.with_file_name(path);
    if beside_exe.exists() {
        return beside_exe;
    }
    let built_by_cargo = exe_path
        .parent()
        .is_some_and(|dir| dir.ends_with("target/debug"));
    if built_by_cargo && let Ok(manifest_dir) = std::env::var("CARGO_MANIFEST_DIR") {
        let in_source = PathBuf::from(manifest_dir).join(path);
        if in_source.exists() {
            tracing::info!("load asset from source folder, asset={}", in_source.to_string_lossy());
            return in_source;
        }
    }
    beside_exe
}

#[cfg(not(debug_assertions))]
fn find_asset_path(exe_path: &Path, path: &str) -> PathBuf {
    exe_path.with_file_name(path)
}
