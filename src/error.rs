// src/error.rs
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CruiseError {
    #[error("I/O error: {source} (path: {path})")]
    Io {
        source: std::io::Error,
        path: PathBuf,
    },

    #[error("Malformed report: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Malformed config: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Formatting error: {0}")]
    Fmt(#[from] std::fmt::Error),

    #[error("Regex error: {0}")]
    Regex(#[from] regex::Error),

    #[error("Generic error: {0}")]
    Other(String),
}

pub type Result<T> = std::result::Result<T, CruiseError>;

// Allow `?` on std::io::Error by converting to CruiseError::Io with unknown path.
impl From<std::io::Error> for CruiseError {
    fn from(source: std::io::Error) -> Self {
        CruiseError::Io {
            source,
            path: PathBuf::from("<unknown>"),
        }
    }
}

impl CruiseError {
    /// Wraps an I/O error with the path that produced it.
    #[must_use]
    pub fn io(source: std::io::Error, path: impl Into<PathBuf>) -> Self {
        CruiseError::Io {
            source,
            path: path.into(),
        }
    }
}
