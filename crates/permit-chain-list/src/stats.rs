//! Aggregate statistics over a permit list.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use permit_chain_core::Domain;

use crate::iter::Entry;

/// Counts gathered in one full traversal.
///
/// The domain distribution and the average include revoked permits; only the
/// active/revoked split looks at revocation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Statistics {
    pub total_permits: usize,
    pub active_permits: usize,
    pub revoked_permits: usize,
    /// Occurrences of each domain across all permits, in name order.
    pub domain_distribution: BTreeMap<Domain, usize>,
    /// Mean domain-set size; 0 for an empty list.
    pub average_domains_per_permit: f64,
}

impl Statistics {
    /// Fold a traversal into statistics.
    pub fn collect<'a>(entries: impl IntoIterator<Item = Entry<'a>>) -> Self {
        let mut stats = Statistics::default();
        let mut total_domains = 0usize;

        for entry in entries {
            stats.total_permits += 1;
            if entry.permit.is_revoked() {
                stats.revoked_permits += 1;
            } else {
                stats.active_permits += 1;
            }

            let domains = entry.permit.domains();
            total_domains += domains.len();
            for domain in domains.iter() {
                *stats.domain_distribution.entry(domain).or_default() += 1;
            }
        }

        if stats.total_permits > 0 {
            stats.average_domains_per_permit = total_domains as f64 / stats.total_permits as f64;
        }

        stats
    }

    /// How many permits carry `domain`.
    pub fn count_for(&self, domain: Domain) -> usize {
        self.domain_distribution.get(&domain).copied().unwrap_or(0)
    }
}
