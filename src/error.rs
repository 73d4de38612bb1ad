//! Error types for the cricket scoring engine

use crate::cli::types::MatchId;
use thiserror::Error;

#[cfg(test)]
mod tests;

pub type Result<T> = std::result::Result<T, ScoreError>;

/// Coarse classification a caller maps onto its own status codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    NotFound,
    InvalidState,
    Validation,
    Conflict,
    Storage,
}

#[derive(Error, Debug)]
pub enum ScoreError {
    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: String },

    #[error("Invalid state: {message}")]
    InvalidState { message: String },

    #[error("Validation failed: {message}")]
    Validation { message: String },

    #[error("Match {match_id} was modified concurrently")]
    Conflict { match_id: MatchId },

    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("JSON parsing failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("System clock error: {0}")]
    SystemTime(#[from] std::time::SystemTimeError),

    #[error("Failed to parse identifier: {0}")]
    InvalidId(#[from] std::num::ParseIntError),

    #[error("Configuration error: {message}")]
    Config { message: String },
}

impl ScoreError {
    pub fn not_found(entity: &'static str, id: impl ToString) -> Self {
        ScoreError::NotFound {
            entity,
            id: id.to_string(),
        }
    }

    pub fn invalid_state(message: impl Into<String>) -> Self {
        ScoreError::InvalidState {
            message: message.into(),
        }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        ScoreError::Validation {
            message: message.into(),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            ScoreError::NotFound { .. } => ErrorKind::NotFound,
            ScoreError::InvalidState { .. } => ErrorKind::InvalidState,
            ScoreError::Validation { .. } | ScoreError::InvalidId(_) => ErrorKind::Validation,
            ScoreError::Conflict { .. } => ErrorKind::Conflict,
            ScoreError::Database(_)
            | ScoreError::Json(_)
            | ScoreError::Io(_)
            | ScoreError::SystemTime(_)
            | ScoreError::Config { .. } => ErrorKind::Storage,
        }
    }
}
