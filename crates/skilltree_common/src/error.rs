//! Error types for the progression backend.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum LedgerError {
    #[error("No account found for '{0}'")]
    AccountNotFound(String),

    #[error("An account already exists for '{0}'")]
    AccountExists(String),

    #[error("No active course with id '{0}'")]
    CourseNotFound(String),

    #[error("Invalid email address: '{0}'")]
    InvalidEmail(String),

    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    #[error("Storage error: {0}")]
    Storage(#[from] rusqlite::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, LedgerError>;
