//! Error types for the foliage pipeline
//!
//! The density pipeline itself never fails: degenerate geometry and
//! unresolvable references collapse to zero contributions. Errors only come
//! from the outer surfaces (settings and scene files).

use thiserror::Error;

/// Main error type for the crate
#[derive(Debug, Error)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid settings: {0}")]
    InvalidSettings(String),

    #[error("Scene error: {0}")]
    Scene(String),
}
