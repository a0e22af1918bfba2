//! Error types for the student registry
//!
//! Validation failures never escape a session as fatal conditions: their
//! `Display` text is what ends up in a field's error message. Gateway and
//! session errors are returned to the caller of an operation.

use thiserror::Error;

use crate::form::gate::Operation;

/// Why a piece of raw field text was rejected
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationFailure {
    #[error("The ID field is empty")]
    EmptyId,

    #[error("The ID must be 24 hexadecimal characters")]
    MalformedId,

    #[error("The name may only contain letters and spaces")]
    InvalidName,

    #[error("The phone number must have exactly 10 digits")]
    InvalidPhone,

    #[error("The age must be a whole number")]
    NotANumber,

    #[error("The age must be greater than zero")]
    NonPositiveAge,

    #[error("The age is too large")]
    AgeOutOfRange,
}

/// Failures reported by a record store
#[derive(Error, Debug)]
pub enum GatewayError {
    #[error("No student found with ID {id}")]
    NotFound { id: String },

    #[error("Record store unavailable: {reason}")]
    Unavailable { reason: String },

    #[error("Stored student {id} is invalid: {reason}")]
    InvalidDocument {
        id: String,
        reason: ValidationFailure,
    },

    #[error("Record store I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Record store serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl GatewayError {
    pub fn not_found(id: impl Into<String>) -> Self {
        GatewayError::NotFound { id: id.into() }
    }

    /// True when the store itself could not be reached or written
    pub fn is_connectivity(&self) -> bool {
        matches!(self, GatewayError::Unavailable { .. } | GatewayError::Io(_))
    }
}

/// Failures of a session-level operation (create/update/delete/search)
#[derive(Error, Debug)]
pub enum SessionError {
    #[error("All fields are required")]
    AllFieldsRequired,

    #[error("{operation} is not available with the current field values")]
    OperationDisabled { operation: Operation },

    #[error(transparent)]
    Gateway(#[from] GatewayError),
}

impl SessionError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, SessionError::Gateway(GatewayError::NotFound { .. }))
    }
}

pub type GatewayResult<T> = std::result::Result<T, GatewayError>;
pub type SessionResult<T> = std::result::Result<T, SessionError>;
