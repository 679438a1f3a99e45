//! Crate error type
//!
//! Only programmer errors and fatal I/O surface here. Unparseable source fragments
//! and references that resolve to nothing are expected outcomes of heuristic
//! extraction and never produce an error.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PdgError {
    /// A visibility was built from an integer rank that maps to no visibility
    #[error("invalid visibility code: {0}")]
    InvalidVisibility(i32),

    /// An operation that the definition kind does not support (e.g. an abstract enum)
    #[error("unsupported operation '{operation}' on {kind}")]
    Unsupported {
        operation: &'static str,
        kind: &'static str,
    },

    #[error("source root does not exist or is not a directory: {}", .0.display())]
    RootNotFound(PathBuf),

    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to serialize project model: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, PdgError>;
