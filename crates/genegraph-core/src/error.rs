//! Error types for Genegraph Core

use thiserror::Error;

/// Result type alias using Genegraph's Error
pub type Result<T> = std::result::Result<T, Error>;

/// Genegraph core error types
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// A domain record was constructed with an empty required field
    #[error("Validation error: {0}")]
    Validation(String),

    /// A query addressed an entity id that is not in the graph
    #[error("Entity not found: {0}")]
    NotFound(String),
}

impl Error {
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }
}

impl From<crate::limits::ValidationError> for Error {
    fn from(err: crate::limits::ValidationError) -> Self {
        Self::Validation(err.to_string())
    }
}
