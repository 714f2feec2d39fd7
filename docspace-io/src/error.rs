//! Error types for I/O operations

use thiserror::Error;

/// Errors that can occur while reading datasets
#[derive(Error, Debug)]
pub enum IoError {
    #[error("File not found: {path}")]
    FileNotFound { path: String },
    
    #[error("Parse error: {message}")]
    ParseError { message: String },
    
    #[error("Duplicate document id {id}")]
    DuplicateId { id: u64 },
    
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<serde_json::Error> for IoError {
    fn from(e: serde_json::Error) -> Self {
        IoError::ParseError { message: e.to_string() }
    }
}

impl From<IoError> for docspace_core::Error {
    fn from(e: IoError) -> Self {
        match e {
            IoError::Io(io) => docspace_core::Error::Io(io),
            other => docspace_core::Error::InvalidData(other.to_string()),
        }
    }
}
