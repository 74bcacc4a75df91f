//! Error types for permit-chain core primitives.

use thiserror::Error;

/// Errors raised while constructing or parsing core values.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    #[error("a permit needs at least one domain")]
    EmptyDomainSet,

    #[error("unknown domain: {0}")]
    UnknownDomain(String),

    #[error("invalid permit id: {0}")]
    InvalidPermitId(String),

    #[error("invalid key length: expected 16 bytes, got {0}")]
    InvalidKeyLength(usize),
}

/// Result type for core operations.
pub type Result<T> = std::result::Result<T, CoreError>;
