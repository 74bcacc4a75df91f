//! Test fixtures and helpers.
//!
//! Deterministic stand-ins for the entropy and clock capabilities, and a
//! fixture bundling them with a list.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use permit_chain_core::{Clock, Domain, DomainSet, EntropySource, PermitId, PermitKey};
use permit_chain_list::{ListConfig, PermitList};

/// Entropy that counts: ids are 1, 2, 3, ... big-endian, and each key is
/// filled with a counter byte pattern.
#[derive(Debug, Clone, Default)]
pub struct SequentialEntropy {
    next_id: u64,
    next_key: u64,
}

impl SequentialEntropy {
    pub fn new() -> Self {
        Self::default()
    }

    /// The id the `n`th draw produces (1-based).
    pub fn nth_id(n: u64) -> PermitId {
        PermitId::from_bytes(n.to_be_bytes())
    }
}

impl EntropySource for SequentialEntropy {
    fn permit_key(&mut self) -> PermitKey {
        self.next_key += 1;
        let mut bytes = [0u8; 16];
        bytes[..8].copy_from_slice(&self.next_key.to_be_bytes());
        bytes[8..].copy_from_slice(&self.next_key.to_le_bytes());
        PermitKey::from_bytes(bytes)
    }

    fn permit_id(&mut self) -> PermitId {
        self.next_id += 1;
        Self::nth_id(self.next_id)
    }
}

/// A clock the test moves by hand. Clones share the same time.
#[derive(Debug, Clone)]
pub struct ManualClock {
    bits: Arc<AtomicU64>,
}

impl ManualClock {
    pub fn new(start: f64) -> Self {
        Self {
            bits: Arc::new(AtomicU64::new(start.to_bits())),
        }
    }

    pub fn set(&self, now: f64) {
        self.bits.store(now.to_bits(), Ordering::SeqCst);
    }

    pub fn advance(&self, secs: f64) {
        self.set(self.now() + secs);
    }
}

impl Default for ManualClock {
    fn default() -> Self {
        // 2025-10-09T19:32:03Z
        Self::new(1_760_038_323.0)
    }
}

impl Clock for ManualClock {
    fn now(&self) -> f64 {
        f64::from_bits(self.bits.load(Ordering::SeqCst))
    }
}

/// The list type every fixture builds.
pub type TestList = PermitList<SequentialEntropy, ManualClock>;

/// A list with deterministic ids, keys, and time.
pub struct PermitFixture {
    pub list: TestList,
    pub clock: ManualClock,
}

impl PermitFixture {
    /// Empty list with invariant checking switched on.
    pub fn new() -> Self {
        let clock = ManualClock::default();
        let config = ListConfig::default().with_verify_invariants(true);
        Self {
            list: PermitList::with_config(SequentialEntropy::new(), clock.clone(), config),
            clock,
        }
    }

    /// List pre-populated with one permit per domain slice, in order.
    pub fn with_permits(sets: &[&[Domain]]) -> Self {
        let mut fixture = Self::new();
        for domains in sets {
            fixture.create(domains);
        }
        fixture
    }

    /// Append a permit, advancing the clock one second first.
    pub fn create(&mut self, domains: &[Domain]) -> PermitId {
        self.clock.advance(1.0);
        self.list
            .create_permit(domain_set(domains))
            .expect("sequential ids never collide")
    }

    /// Ids in list order.
    pub fn ids(&self) -> Vec<PermitId> {
        self.list.iter().map(|entry| entry.id).collect()
    }

    /// Domain sets in list order.
    pub fn domain_order(&self) -> Vec<DomainSet> {
        self.list
            .iter()
            .map(|entry| entry.permit.domains().clone())
            .collect()
    }
}

impl Default for PermitFixture {
    fn default() -> Self {
        Self::new()
    }
}

/// Build a domain set from a non-empty slice.
///
/// # Panics
///
/// Panics on an empty slice.
pub fn domain_set(domains: &[Domain]) -> DomainSet {
    DomainSet::new(domains.iter().copied()).expect("fixture domain sets are non-empty")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sequential_ids() {
        let mut entropy = SequentialEntropy::new();
        assert_eq!(entropy.permit_id(), SequentialEntropy::nth_id(1));
        assert_eq!(entropy.permit_id().to_hex(), "0000000000000002");
        assert_ne!(entropy.permit_key(), entropy.permit_key());
    }

    #[test]
    fn test_manual_clock_shared_between_clones() {
        let clock = ManualClock::new(10.0);
        let handle = clock.clone();
        handle.advance(2.5);
        assert_eq!(clock.now(), 12.5);
    }

    #[test]
    fn test_fixture_with_permits() {
        let fixture = PermitFixture::with_permits(&[&[Domain::Finance], &[Domain::Hr, Domain::It]]);

        assert_eq!(fixture.list.len(), 2);
        assert_eq!(
            fixture.ids(),
            vec![SequentialEntropy::nth_id(1), SequentialEntropy::nth_id(2)]
        );
        assert_eq!(fixture.domain_order()[1].len(), 2);
    }
}
