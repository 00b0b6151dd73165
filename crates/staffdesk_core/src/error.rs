//! Application error types for the domain layer.
use crate::validation::ValidationErrors;
use thiserror::Error;

/// Top-level application error type.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Employee not found")]
    NotFound,

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Validation failed: {0}")]
    Validation(#[from] ValidationErrors),

    #[error("Server error: {0}")]
    Server(String),

    #[error("Internal server error")]
    Internal,
}
