//! Crate error type.
//!
//! Page behavior itself never fails: missing elements are skipped and bad
//! form input is reported inline. `FxError` covers the programmer-facing
//! failures around it.

use std::path::PathBuf;

/// Errors from selector parsing and configuration loading.
#[derive(Debug, thiserror::Error)]
pub enum FxError {
    #[error("invalid selector: {0:?}")]
    InvalidSelector(String),

    #[error("failed to read config {path}: {source}")]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    ConfigParse(#[from] toml::de::Error),
}
