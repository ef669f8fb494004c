use std::path::PathBuf;

use thiserror::Error;

use crate::components::BookId;

pub type Result<T> = std::result::Result<T, ReaderError>;

#[derive(Debug, Error)]
pub enum ReaderError {
    #[error("unsupported format `{0}`: use PDF, EPUB or TXT")]
    UnsupportedFormat(String),

    #[error("book {0} is not in the library")]
    NotFound(BookId),

    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid library data: {0}")]
    Json(#[from] serde_json::Error),

    #[error("failed to open EPUB: {0}")]
    Epub(String),

    #[error("EPUB has no readable chapters")]
    EmptyEpub,
}

impl ReaderError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ReaderError::Io { path: path.into(), source }
    }
}
