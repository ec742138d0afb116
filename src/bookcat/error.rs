use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Record not found: {0}")]
    NotFound(String),

    #[error("Record id already in use: {0}")]
    DuplicateId(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Could not access {}: {source}", path.display())]
    Persistence {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Malformed record file {file}: {reason}")]
    MalformedRecord { file: String, reason: String },

    #[error("Failed to render record {id}: {reason}")]
    Render { id: String, reason: String },

    #[error("Store error: {0}")]
    Store(String),
}

impl CatalogError {
    pub fn persistence(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        CatalogError::Persistence {
            path: path.into(),
            source,
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, CatalogError::NotFound(_))
    }
}

pub type Result<T> = std::result::Result<T, CatalogError>;
