//! # Permit Chain Testkit
//!
//! Testing utilities for permit-chain.
//!
//! ## Overview
//!
//! This crate provides:
//!
//! - **Fixtures**: deterministic entropy and a hand-driven clock bundled with a list
//! - **Scenarios**: scripted operation sequences with a known final order
//! - **Generators**: proptest strategies plus a `Vec` reference model
//!
//! ## Scenarios
//!
//! ```rust
//! use permit_chain_testkit::scenarios::verify_all_scenarios;
//!
//! for (name, passed, _) in verify_all_scenarios() {
//!     assert!(passed, "{name}");
//! }
//! ```
//!
//! ## Property Testing
//!
//! Drive random workloads through the list and the model in lockstep:
//!
//! ```rust,ignore
//! use proptest::prelude::*;
//! use permit_chain_testkit::{ListOp, Model, PermitFixture};
//!
//! proptest! {
//!     #[test]
//!     fn list_matches_model(ops in prop::collection::vec(any::<ListOp>(), 1..50)) {
//!         let mut fixture = PermitFixture::new();
//!         let mut model = Model::new();
//!         for op in &ops {
//!             model.step(&mut fixture.list, op)?;
//!         }
//!     }
//! }
//! ```

pub mod fixtures;
pub mod generators;
pub mod scenarios;

pub use fixtures::{domain_set, ManualClock, PermitFixture, SequentialEntropy, TestList};
pub use generators::{ListOp, Model, ModelEntry};
pub use scenarios::{all_scenarios, run_scenario, verify_all_scenarios, Scenario, Step};
