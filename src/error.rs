//! Error types for booking operations.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, BookingError>;

/// Errors surfaced by the booking core.
///
/// Every variant maps to a distinct category a caller can render:
/// validation, not found, conflict, or storage.
#[derive(Debug, Error)]
pub enum BookingError {
    /// Malformed or out-of-range input. Detected before storage is touched.
    #[error("invalid {field}: {message}")]
    Validation { field: String, message: String },

    /// Unknown room name or reservation id.
    #[error("{0} not found")]
    NotFound(String),

    /// The requested interval overlaps an existing reservation.
    #[error("{0}")]
    Conflict(String),

    #[error("storage error: {0}")]
    Storage(#[from] rusqlite::Error),

    #[error("storage error: connection lock poisoned")]
    LockPoisoned,
}

impl BookingError {
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Short category name used by the HTTP layer and CLI output.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Validation { .. } => "validation",
            Self::NotFound(_) => "not_found",
            Self::Conflict(_) => "conflict",
            Self::Storage(_) | Self::LockPoisoned => "storage",
        }
    }
}
