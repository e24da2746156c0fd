//! Routing error definitions.

use thiserror::Error;

/// Errors raised while registering or matching routes.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TrieError {
    /// A value is already registered at the path and overwrite was not requested.
    #[error("Route conflict: a value already exists at '{path}'")]
    Conflict { path: String },

    /// Two captures along one matched path share a parameter name.
    #[error("Duplicate parameter '{name}' in route matched by '{path}'")]
    DuplicateParam { name: String, path: String },
}

/// Result type for routing operations.
pub type TrieResult<T> = Result<T, TrieError>;
