// Typed errors for the punch list core. Every failure mode is a variant
// here; all of them are recovered at the operation boundary and none is
// fatal to the process.

use thiserror::Error;

/// Errors surfaced by the punch list core.
#[derive(Debug, Error)]
pub enum Error {
    /// The task file could not be read or parsed at load time. The store
    /// falls back to an empty collection.
    #[error("failed to read task file {path}: {reason}")]
    StorageRead { path: String, reason: String },

    /// The task file could not be written. The in-memory collection is
    /// retained, not rolled back.
    #[error("failed to write task file {path}: {reason}")]
    StorageWrite { path: String, reason: String },

    /// Import was requested against a column the dataset does not have.
    #[error("dataset has no column named '{0}'")]
    InvalidColumn(String),

    /// Import selected a row index past the end of the dataset.
    #[error("row {index} is out of range for a dataset with {rows} rows")]
    RowOutOfRange { index: usize, rows: usize },

    /// An update or delete referenced a task id that is not in the store.
    #[error("no task with id {0}")]
    NotFound(u64),

    /// A field was given a value outside its allowed range.
    #[error("invalid value '{value}' for {field}")]
    InvalidFieldValue { field: &'static str, value: String },
}

impl Error {
    pub(crate) fn storage_read(path: &std::path::Path, err: &anyhow::Error) -> Self {
        Error::StorageRead {
            path: path.display().to_string(),
            reason: format!("{:#}", err),
        }
    }

    pub(crate) fn storage_write(path: &std::path::Path, err: &anyhow::Error) -> Self {
        Error::StorageWrite {
            path: path.display().to_string(),
            reason: format!("{:#}", err),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
