//! Domain-set generators.
//!
//! Two sources of domain sets for bulk permit creation:
//!
//! - [`RandomDomains`] draws distinct domains uniformly from [`Domain::ALL`].
//! - [`FakeDepartments`] draws department-ish words, maps the ones it
//!   recognizes through [`department_domain`], and substitutes a random
//!   domain for the rest.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

use crate::domain::{Domain, DomainSet};

/// Produces a non-empty domain set per call.
pub trait DomainSetSource {
    fn domain_set(&mut self) -> DomainSet;
}

/// How many domains a generated set draws.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DomainSetConfig {
    /// Minimum draws per set.
    pub min_domains: usize,
    /// Maximum draws per set.
    pub max_domains: usize,
}

impl DomainSetConfig {
    /// Create a config, clamped to `1..=10` with `min <= max`.
    pub fn new(min_domains: usize, max_domains: usize) -> Self {
        let min_domains = min_domains.clamp(1, Domain::ALL.len());
        let max_domains = max_domains.clamp(min_domains, Domain::ALL.len());
        Self {
            min_domains,
            max_domains,
        }
    }

    fn draw_count<R: Rng>(&self, rng: &mut R) -> usize {
        rng.gen_range(self.min_domains..=self.max_domains)
    }
}

impl Default for DomainSetConfig {
    fn default() -> Self {
        Self::new(1, 3)
    }
}

/// Uniformly random distinct domains.
#[derive(Debug, Clone)]
pub struct RandomDomains<R = StdRng> {
    rng: R,
    config: DomainSetConfig,
}

impl<R: Rng> RandomDomains<R> {
    pub fn new(rng: R, config: DomainSetConfig) -> Self {
        Self { rng, config }
    }
}

impl RandomDomains<StdRng> {
    /// Seeded generator with the default config.
    pub fn seeded(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed), DomainSetConfig::default())
    }

    /// Generator seeded from OS entropy with the default config.
    pub fn from_entropy() -> Self {
        Self::new(StdRng::from_entropy(), DomainSetConfig::default())
    }
}

impl<R: Rng> DomainSetSource for RandomDomains<R> {
    fn domain_set(&mut self) -> DomainSet {
        let count = self.config.draw_count(&mut self.rng);
        let picked: Vec<Domain> = Domain::ALL
            .choose_multiple(&mut self.rng, count)
            .copied()
            .collect();
        DomainSet::new(picked).unwrap_or_else(|_| DomainSet::single(random_domain(&mut self.rng)))
    }
}

/// Map a department name to its domain, case-insensitively.
pub fn department_domain(name: &str) -> Option<Domain> {
    let domain = match name.trim().to_lowercase().as_str() {
        "finance" | "accounting" => Domain::Finance,
        "human resources" | "hr" => Domain::Hr,
        "information technology" | "it" => Domain::It,
        "marketing" => Domain::Marketing,
        "sales" => Domain::Sales,
        "operations" => Domain::Operations,
        "legal" => Domain::Legal,
        "research" => Domain::Research,
        "development" => Domain::Development,
        "ai" | "machine learning" | "data science" => Domain::AiMl,
        _ => return None,
    };
    Some(domain)
}

/// Vocabulary the fake department generator draws from. Mostly filler, with
/// a handful of words that map to real departments.
const DEPARTMENT_WORDS: &[&str] = &[
    "lorem", "ipsum", "dolor", "amet", "consectetur", "adipisci", "velit", "quia",
    "numquam", "eius", "modi", "tempora", "magnam", "aliquam", "quaerat", "voluptatem",
    "finance", "accounting", "hr", "it", "marketing", "sales", "operations", "legal",
    "research", "development", "ai",
];

/// Fake department names mapped to domains.
#[derive(Debug, Clone)]
pub struct FakeDepartments<R = StdRng> {
    rng: R,
    config: DomainSetConfig,
}

impl<R: Rng> FakeDepartments<R> {
    pub fn new(rng: R, config: DomainSetConfig) -> Self {
        Self { rng, config }
    }

    /// Draw one department word.
    pub fn word(&mut self) -> &'static str {
        DEPARTMENT_WORDS[self.rng.gen_range(0..DEPARTMENT_WORDS.len())]
    }

    /// Draw `count` department domains. Duplicates are kept.
    pub fn departments(&mut self, count: usize) -> Vec<Domain> {
        (0..count)
            .map(|_| {
                let word = self.word();
                department_domain(word).unwrap_or_else(|| random_domain(&mut self.rng))
            })
            .collect()
    }
}

impl FakeDepartments<StdRng> {
    /// Seeded generator with the default config.
    pub fn seeded(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed), DomainSetConfig::default())
    }

    /// Generator seeded from OS entropy with the default config.
    pub fn from_entropy() -> Self {
        Self::new(StdRng::from_entropy(), DomainSetConfig::default())
    }
}

impl<R: Rng> DomainSetSource for FakeDepartments<R> {
    fn domain_set(&mut self) -> DomainSet {
        let count = self.config.draw_count(&mut self.rng);
        let departments = self.departments(count);
        DomainSet::new(departments).unwrap_or_else(|_| DomainSet::single(random_domain(&mut self.rng)))
    }
}

fn random_domain<R: Rng>(rng: &mut R) -> Domain {
    Domain::ALL[rng.gen_range(0..Domain::ALL.len())]
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_department_mapping() {
        assert_eq!(department_domain("Accounting"), Some(Domain::Finance));
        assert_eq!(department_domain("human resources"), Some(Domain::Hr));
        assert_eq!(department_domain("Data Science"), Some(Domain::AiMl));
        assert_eq!(department_domain("information technology"), Some(Domain::It));
        assert_eq!(department_domain("lorem"), None);
    }

    #[test]
    fn test_config_clamps() {
        let config = DomainSetConfig::new(0, 40);
        assert_eq!(config.min_domains, 1);
        assert_eq!(config.max_domains, 10);

        let config = DomainSetConfig::new(5, 2);
        assert_eq!((config.min_domains, config.max_domains), (5, 5));
    }

    #[test]
    fn test_random_domains_respects_bounds() {
        let mut source = RandomDomains::seeded(42);
        for _ in 0..200 {
            let set = source.domain_set();
            assert!((1..=3).contains(&set.len()));
        }
    }

    #[test]
    fn test_random_domains_exact_count() {
        let mut source = RandomDomains::new(StdRng::seed_from_u64(3), DomainSetConfig::new(4, 4));
        for _ in 0..50 {
            assert_eq!(source.domain_set().len(), 4);
        }
    }

    #[test]
    fn test_fake_departments_bounds() {
        let mut source = FakeDepartments::seeded(9);
        for _ in 0..200 {
            let set = source.domain_set();
            // Duplicate draws collapse, so the set may be smaller than the draw.
            assert!((1..=3).contains(&set.len()));
        }
        assert_eq!(source.departments(5).len(), 5);
    }

    #[test]
    fn test_seeded_generators_reproducible() {
        let mut a = FakeDepartments::seeded(11);
        let mut b = FakeDepartments::seeded(11);
        for _ in 0..20 {
            assert_eq!(a.domain_set(), b.domain_set());
        }
    }

    proptest! {
        #[test]
        fn test_generated_sets_within_config(min in 0usize..12, max in 0usize..12, seed in any::<u64>()) {
            let config = DomainSetConfig::new(min, max);
            prop_assert!(config.min_domains >= 1);
            prop_assert!(config.min_domains <= config.max_domains);
            prop_assert!(config.max_domains <= Domain::ALL.len());

            let mut random = RandomDomains::new(StdRng::seed_from_u64(seed), config);
            let set = random.domain_set();
            prop_assert!(set.len() >= config.min_domains && set.len() <= config.max_domains);

            let mut fake = FakeDepartments::new(StdRng::seed_from_u64(seed), config);
            let set = fake.domain_set();
            prop_assert!(set.len() >= 1 && set.len() <= config.max_domains);
        }
    }
}
