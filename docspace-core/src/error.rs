//! Error types for docspace

use thiserror::Error;

/// Main error type for docspace operations
#[derive(Error, Debug)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    
    #[error("Failed to fetch dataset '{source_id}': {message}")]
    Fetch { source_id: String, message: String },
    
    #[error("Invalid data: {0}")]
    InvalidData(String),
    
    #[error("Invalid configuration: {0}")]
    Config(String),
    
    #[error("Unknown dataset profile: {0}")]
    UnknownProfile(String),
}

impl Error {
    /// Build a fetch failure for the given source
    pub fn fetch(source_id: impl Into<String>, message: impl Into<String>) -> Self {
        Error::Fetch {
            source_id: source_id.into(),
            message: message.into(),
        }
    }
}

/// Result type alias for docspace operations
pub type Result<T> = std::result::Result<T, Error>;
