//! Error types for the facade.

use permit_chain_core::CoreError;
use permit_chain_list::ListError;
use thiserror::Error;

/// Errors surfaced by the demo driver and reports.
#[derive(Debug, Error)]
pub enum PermitError {
    /// List operation failed.
    #[error("list error: {0}")]
    List(#[from] ListError),

    /// Core error.
    #[error("core error: {0}")]
    Core(#[from] CoreError),

    /// Writing output failed.
    #[error("output error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for facade operations.
pub type Result<T> = std::result::Result<T, PermitError>;
