//! Error types shared by the scanner and the report writers

use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, InventoryError>;

#[derive(Debug, Error)]
pub enum InventoryError {
    /// The directory to scan does not exist or is not a directory.
    #[error("path '{}' does not exist or is not a directory", .0.display())]
    InvalidRoot(PathBuf),

    /// The report target cannot be written to.
    #[error("invalid report path '{}': {reason}", .path.display())]
    InvalidReport { path: PathBuf, reason: String },

    /// The format is known but has no writer.
    #[error("unsupported format: {0}")]
    UnsupportedFormat(String),

    #[error("parent folder of '{0}' was not visited before it")]
    MissingParent(String),

    #[error("duplicate entry '{0}'")]
    DuplicateEntry(String),

    #[error("cannot read archive '{path}': {source}")]
    Archive {
        path: String,
        #[source]
        source: zip::result::ZipError,
    },

    #[error("archive '{path}' nests more than {limit} archives deep")]
    ArchiveTooDeep { path: String, limit: usize },

    #[error("cannot write document: {0}")]
    Document(#[from] zip::result::ZipError),

    #[error("walk error: {0}")]
    Walk(#[from] ignore::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

impl InventoryError {
    pub(crate) fn archive(path: impl Into<String>, source: zip::result::ZipError) -> Self {
        InventoryError::Archive {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn invalid_report(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        InventoryError::InvalidReport {
            path: path.into(),
            reason: reason.into(),
        }
    }
}
