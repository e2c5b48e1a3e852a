//! # Application Errors
//!
//! Failures of the binary layer: file I/O, JSON decoding, the listener, and
//! core errors passed through unchanged.

use growth_core::GrowthError;
use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("cannot access {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid JSON in {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("output encoding failed: {0}")]
    Encode(#[from] serde_json::Error),

    #[error(transparent)]
    Growth(#[from] GrowthError),

    #[error("server error: {0}")]
    Server(#[from] std::io::Error),
}

impl AppError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn json(path: impl Into<PathBuf>, source: serde_json::Error) -> Self {
        Self::Json {
            path: path.into(),
            source,
        }
    }
}
