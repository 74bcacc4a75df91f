//! # Permit Chain List
//!
//! The ordered permit container. Permits sit in a doubly linked chain whose
//! nodes are owned by an identifier-keyed map, giving O(1) access by id while
//! keeping list order for positional operations.
//!
//! ## Key Types
//!
//! - [`PermitList`] - The container: create, insert, read, update, rotate,
//!   revoke, restore, delete, query
//! - [`Permit`] - A permit record, mutated only through the list
//! - [`Statistics`] - Aggregate counts from one traversal
//! - [`SharedPermitList`] - The list behind an `RwLock`
//!
//! ## Usage
//!
//! ```rust
//! use permit_chain_core::{Domain, DomainSet};
//! use permit_chain_list::PermitList;
//!
//! let mut list = PermitList::new();
//! let id = list
//!     .create_permit(DomainSet::new([Domain::Finance, Domain::AiMl]).unwrap())
//!     .unwrap();
//! list.insert_at(DomainSet::single(Domain::Hr), 0).unwrap();
//!
//! assert_eq!(list.position_of(&id), Some(1));
//! list.revoke(&id).unwrap();
//! assert!(list.rotate_key(&id).is_err());
//! assert_eq!(list.list_active().count(), 1);
//! ```
//!
//! ## Design Notes
//!
//! - **Complete or nothing**: a failed call leaves the list untouched
//! - **Revocation is explicit**: only `revoke`/`restore` change the flag;
//!   revoked permits reject domain updates and key rotation
//! - **Monotonic timestamps**: each successful mutation stamps the permit with
//!   a time no earlier than any previous stamp

pub mod config;
pub mod error;
pub mod iter;
pub mod list;
pub mod permit;
pub mod shared;
pub mod stats;

pub use config::ListConfig;
pub use error::{InvariantViolation, ListError, Result};
pub use iter::{Entry, Iter};
pub use list::PermitList;
pub use permit::{Permit, PermitSnapshot, PermitStatus};
pub use shared::SharedPermitList;
pub use stats::Statistics;
