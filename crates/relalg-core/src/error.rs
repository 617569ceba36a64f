use thiserror::Error;

use crate::schema::Domain;

/// Canonical result for core.
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    #[error("unknown attribute '{0}'")]
    UnknownAttribute(String),

    #[error("parse error: {0}")]
    Parse(String),

    #[error("type mismatch: expected {expected} values, found {found}")]
    Arity { expected: usize, found: usize },

    #[error("type mismatch at position {position}: expected {expected}, found {found}")]
    TypeMismatch {
        position: usize,
        expected: Domain,
        found: Domain,
    },

    #[error("duplicate key {key} in table '{table}'")]
    DuplicateKey { table: String, key: String },

    #[error("cannot compare {left} with {right}")]
    DomainMismatch { left: Domain, right: Domain },

    #[error("schema error: {0}")]
    Schema(String),
}

impl Error {
    /// True for both flavours of a rejected tuple shape (arity or domain).
    pub fn is_type_mismatch(&self) -> bool {
        matches!(self, Error::Arity { .. } | Error::TypeMismatch { .. })
    }
}
