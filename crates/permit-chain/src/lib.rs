//! # Permit Chain
//!
//! The unified API for permit chains: revocable, domain-tagged access
//! permits held in an ordered, id-indexed list.
//!
//! ## Overview
//!
//! - **Permits**: a set of domains, a random 128-bit key, a timestamp and a
//!   revocation flag
//! - **List**: permits in caller-controlled order with O(1) lookup by id
//! - **Revocation**: revoked permits keep their position and freeze until
//!   restored
//! - **Reports**: text rendering of the list and its statistics
//!
//! ## Usage
//!
//! ```rust
//! use permit_chain::{Domain, DomainSet, PermitList};
//! use permit_chain::report::render_list;
//!
//! let mut list = PermitList::new();
//! let id = list.create_permit(DomainSet::single(Domain::Finance)).unwrap();
//! list.revoke(&id).unwrap();
//!
//! assert!(render_list(&list, true).contains("Status: REVOKED"));
//! assert!(!render_list(&list, false).contains("Status: REVOKED"));
//! ```
//!
//! ## Re-exports
//!
//! This crate re-exports the component crates for convenience:
//!
//! - `permit_chain::core` - Domains, ids, keys, entropy, clock, generators
//! - `permit_chain::list` - The permit list and its statistics

pub mod demo;
pub mod error;
pub mod report;

// Re-export component crates
pub use permit_chain_core as core;
pub use permit_chain_list as list;

// Re-export main types for convenience
pub use demo::{run_demo, DemoOutcome};
pub use error::{PermitError, Result};

// Re-export commonly used types
pub use permit_chain_core::{
    Clock, Domain, DomainSet, DomainSetSource, EntropySource, PermitId, PermitKey,
};
pub use permit_chain_list::{
    ListConfig, ListError, Permit, PermitList, PermitSnapshot, SharedPermitList, Statistics,
};
