//! Error types for the permit list.

use permit_chain_core::{CoreError, PermitId};
use thiserror::Error;

/// Errors returned by permit list operations.
///
/// Every error leaves the list exactly as it was before the call.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ListError {
    /// No live node has this identifier.
    #[error("permit not found: {0}")]
    NotFound(PermitId),

    /// Position outside the valid range for the operation.
    #[error("invalid position {position}: list size is {size}")]
    InvalidPosition { position: usize, size: usize },

    /// Revoke on a permit that is already revoked.
    #[error("permit already revoked: {0}")]
    AlreadyRevoked(PermitId),

    /// Restore on a permit that is not revoked.
    #[error("permit is not revoked: {0}")]
    NotRevoked(PermitId),

    /// Update or key rotation on a revoked permit.
    #[error("permit {0} is revoked and cannot be modified")]
    Immutable(PermitId),

    /// The entropy source kept returning identifiers already in use.
    #[error("no unused permit id after {attempts} attempts")]
    IdSpaceExhausted { attempts: u32 },

    /// Core error.
    #[error("core error: {0}")]
    Core(#[from] CoreError),
}

/// A broken structural invariant of the linked chain.
///
/// These indicate a bug in the list itself, never bad caller input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvariantViolation {
    #[error("size {size} disagrees with index ({indexed}) or chain ({reachable})")]
    SizeMismatch {
        size: usize,
        indexed: usize,
        reachable: usize,
    },

    #[error("head and tail disagree on emptiness")]
    BoundaryMismatch,

    #[error("head {0} has a prev link")]
    HeadHasPrev(PermitId),

    #[error("tail {0} has a next link")]
    TailHasNext(PermitId),

    #[error("link to {0} does not resolve in the index")]
    DanglingLink(PermitId),

    #[error("{next}.prev does not point back to {node}")]
    BrokenBackLink { node: PermitId, next: PermitId },

    #[error("forward walk ended at {found:?}, tail is {expected:?}")]
    TailMismatch {
        expected: Option<PermitId>,
        found: Option<PermitId>,
    },

    #[error("chain revisits a node")]
    Cycle,

    #[error("backward walk is not the reverse of the forward walk")]
    ReverseMismatch,
}

/// Result type for permit list operations.
pub type Result<T> = std::result::Result<T, ListError>;
