//! UniFFI export layer for the dictionary engine.
//!
//! Each public type here maps to a generated foreign class, struct, or enum.

mod catalog;
mod types;

pub use catalog::EdxCatalog;
pub use types::{EdxDictionaryKind, EdxError, EdxWord};

use std::path::Path;

// ---------------------------------------------------------------------------
// Top-level functions
// ---------------------------------------------------------------------------

#[uniffi::export]
fn engine_version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

/// Replace the built-in settings. Must run before the first catalog is
/// created.
#[uniffi::export]
fn load_settings(path: String) -> Result<(), EdxError> {
    let content = std::fs::read_to_string(&path).map_err(|e| EdxError::Unavailable {
        msg: format!("{path}: {e}"),
    })?;
    edx_core::settings::init_custom(content).map_err(|e| EdxError::Internal {
        msg: e.to_string(),
    })?;
    Ok(())
}

#[uniffi::export]
fn settings_default_config() -> String {
    edx_core::settings::default_toml().to_string()
}

#[uniffi::export]
fn trace_init(log_dir: String) {
    crate::trace_init::init_tracing(Path::new(&log_dir));
}
