//! Business domains and domain sets.
//!
//! A [`Domain`] is a tag from a closed set of ten. A permit carries a
//! [`DomainSet`], which is never empty and orders its members by name so
//! listings are deterministic.

use std::cmp::Ordering;
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, Result};

/// A business domain a permit applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Domain {
    Finance,
    AiMl,
    Hr,
    It,
    Marketing,
    Sales,
    Operations,
    Legal,
    Research,
    Development,
}

impl Domain {
    /// Every domain, in declaration order.
    pub const ALL: [Domain; 10] = [
        Domain::Finance,
        Domain::AiMl,
        Domain::Hr,
        Domain::It,
        Domain::Marketing,
        Domain::Sales,
        Domain::Operations,
        Domain::Legal,
        Domain::Research,
        Domain::Development,
    ];

    /// The lowercase tag for this domain.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Domain::Finance => "finance",
            Domain::AiMl => "ai_ml",
            Domain::Hr => "hr",
            Domain::It => "it",
            Domain::Marketing => "marketing",
            Domain::Sales => "sales",
            Domain::Operations => "operations",
            Domain::Legal => "legal",
            Domain::Research => "research",
            Domain::Development => "development",
        }
    }
}

// Ordered by tag so sets and distributions list alphabetically.
impl Ord for Domain {
    fn cmp(&self, other: &Self) -> Ordering {
        self.as_str().cmp(other.as_str())
    }
}

impl PartialOrd for Domain {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for Domain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Domain {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self> {
        Domain::ALL
            .into_iter()
            .find(|d| d.as_str() == s)
            .ok_or_else(|| CoreError::UnknownDomain(s.to_string()))
    }
}

/// A non-empty set of domains.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "Vec<Domain>", into = "Vec<Domain>")]
pub struct DomainSet(BTreeSet<Domain>);

impl DomainSet {
    /// Build a set from any collection of domains. Duplicates collapse.
    ///
    /// Fails with [`CoreError::EmptyDomainSet`] if no domain is given.
    pub fn new(domains: impl IntoIterator<Item = Domain>) -> Result<Self> {
        let set: BTreeSet<Domain> = domains.into_iter().collect();
        if set.is_empty() {
            return Err(CoreError::EmptyDomainSet);
        }
        Ok(Self(set))
    }

    /// A set holding exactly one domain.
    pub fn single(domain: Domain) -> Self {
        Self(BTreeSet::from([domain]))
    }

    /// Check membership.
    pub fn contains(&self, domain: Domain) -> bool {
        self.0.contains(&domain)
    }

    /// Number of domains. Always at least one.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Iterate in name order.
    pub fn iter(&self) -> impl Iterator<Item = Domain> + '_ {
        self.0.iter().copied()
    }

    /// Tags in name order.
    pub fn names(&self) -> Vec<&'static str> {
        self.iter().map(|d| d.as_str()).collect()
    }
}

impl From<Domain> for DomainSet {
    fn from(domain: Domain) -> Self {
        Self::single(domain)
    }
}

impl TryFrom<Vec<Domain>> for DomainSet {
    type Error = CoreError;

    fn try_from(domains: Vec<Domain>) -> Result<Self> {
        Self::new(domains)
    }
}

impl From<DomainSet> for Vec<Domain> {
    fn from(set: DomainSet) -> Self {
        set.0.into_iter().collect()
    }
}

impl fmt::Display for DomainSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}]", self.names().join(" "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_domain_parse_roundtrip() {
        for domain in Domain::ALL {
            assert_eq!(domain.as_str().parse::<Domain>().unwrap(), domain);
        }
        assert_eq!(
            "payroll".parse::<Domain>(),
            Err(CoreError::UnknownDomain("payroll".into()))
        );
    }

    #[test]
    fn test_domain_set_rejects_empty() {
        assert_eq!(DomainSet::new([]), Err(CoreError::EmptyDomainSet));
    }

    #[test]
    fn test_domain_set_dedups_and_sorts_by_name() {
        let set = DomainSet::new([Domain::Sales, Domain::Finance, Domain::AiMl, Domain::Sales])
            .unwrap();
        assert_eq!(set.len(), 3);
        assert_eq!(set.names(), vec!["ai_ml", "finance", "sales"]);
        assert_eq!(set.to_string(), "[ai_ml finance sales]");
    }

    #[test]
    fn test_domain_set_serde() {
        let set = DomainSet::new([Domain::Hr, Domain::It]).unwrap();
        let json = serde_json::to_string(&set).unwrap();
        assert_eq!(json, r#"["hr","it"]"#);

        let back: DomainSet = serde_json::from_str(&json).unwrap();
        assert_eq!(back, set);

        assert!(serde_json::from_str::<DomainSet>("[]").is_err());
    }
}
