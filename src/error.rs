//! Error types for the content pipeline

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while reading the content store
#[derive(Debug, Error)]
pub enum ContentError {
    #[error("failed to read {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid site configuration: {0}")]
    Config(String),

    #[error("unsupported locale `{0}`")]
    UnsupportedLocale(String),

    #[error("slug `{slug}` is defined more than once in `{scope}`: {paths:?}")]
    DuplicateSlug {
        scope: String,
        slug: String,
        paths: Vec<PathBuf>,
    },
}

impl ContentError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ContentError::Io {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, ContentError>;
