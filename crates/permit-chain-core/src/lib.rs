//! # Permit Chain Core
//!
//! Pure primitives for permit-chain: business domains, permit identifiers,
//! key material, and the capabilities that produce them.
//!
//! This crate contains no container logic. The ordered permit list lives in
//! `permit-chain-list` and consumes the capabilities defined here.
//!
//! ## Key Types
//!
//! - [`Domain`] - One of ten fixed business domains
//! - [`DomainSet`] - A non-empty set of domains attached to a permit
//! - [`PermitId`] - Random 8-byte node identifier, hex encoded
//! - [`PermitKey`] - 16 bytes of random key material
//!
//! ## Capabilities
//!
//! Randomness and time are injected rather than read from process-wide state:
//!
//! - [`EntropySource`] - produces keys and identifiers ([`OsEntropy`], [`SeededEntropy`])
//! - [`Clock`] - produces fractional Unix timestamps ([`SystemClock`])
//! - [`DomainSetSource`] - produces domain sets ([`RandomDomains`], [`FakeDepartments`])

pub mod domain;
pub mod entropy;
pub mod error;
pub mod generate;
pub mod types;

pub use domain::{Domain, DomainSet};
pub use entropy::{Clock, EntropySource, OsEntropy, SeededEntropy, SystemClock};
pub use error::{CoreError, Result};
pub use generate::{department_domain, DomainSetConfig, DomainSetSource, FakeDepartments, RandomDomains};
pub use types::{PermitId, PermitKey, KEY_LEN, PERMIT_ID_LEN};
