//! Unified error type for the dealership service.
//!
//! Every failure is scoped to a single request; the web layer turns these variants into
//! HTTP responses (see [`crate::web::error`]).

use crate::core::record::RecordKind;
use crate::forms::FormErrors;
use thiserror::Error;

/// All errors produced by the core, the form layer and configuration loading.
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration could not be read or parsed
    #[error("Configuration error: {message}")]
    Config {
        /// Description of the problem
        message: String,
    },

    /// The record store failed
    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    /// Filesystem or socket failure
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Submitted form fields failed validation; nothing was persisted
    #[error("Invalid submission: {0}")]
    Validation(FormErrors),

    /// Unknown or malformed record identifier
    #[error("{kind} not found: {id}")]
    NotFound {
        /// Kind of record looked up
        kind: RecordKind,
        /// Identifier as supplied by the caller
        id: String,
    },

    /// The requester does not own the record they tried to modify
    #[error("Not allowed to modify {kind} {id}")]
    Forbidden {
        /// Kind of record
        kind: RecordKind,
        /// Identifier of the record
        id: String,
    },
}

impl From<FormErrors> for Error {
    fn from(errors: FormErrors) -> Self {
        Self::Validation(errors)
    }
}

/// Convenience `Result` type
pub type Result<T> = std::result::Result<T, Error>;
