//! Error types for the dugout graph engine

use thiserror::Error;

/// Result type alias using dugout's Error
pub type Result<T> = std::result::Result<T, Error>;

/// Dugout error types
///
/// Build-phase errors (`DuplicateKey`, `Validation`) are resolved or
/// escalated before any query runs; query-phase errors are returned to the
/// caller and never poison the index.
#[derive(Error, Debug)]
pub enum Error {
    /// A query referenced an unknown entity id
    #[error("{kind} not found: {id}")]
    NodeNotFound { kind: &'static str, id: String },

    /// Primary-key collision on an entity record. Fatal to the build.
    #[error("duplicate {kind} key: {id}")]
    DuplicateKey { kind: &'static str, id: String },

    /// Malformed record surfaced during the build barrier
    #[error("validation error: {0}")]
    Validation(String),

    /// Invalid query parameter (negative limit, hop bound over the cap, ...)
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// A work-bounded query exceeded its budget before completing
    #[error("work budget exceeded: spent {spent} of {budget}")]
    BudgetExceeded { spent: usize, budget: usize },

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    pub fn node_not_found(kind: &'static str, id: impl std::fmt::Display) -> Self {
        Self::NodeNotFound {
            kind,
            id: id.to_string(),
        }
    }

    pub fn duplicate_key(kind: &'static str, id: impl std::fmt::Display) -> Self {
        Self::DuplicateKey {
            kind,
            id: id.to_string(),
        }
    }
}
