//! The permit record.
//!
//! A [`Permit`] is owned by exactly one node of a
//! [`PermitList`](crate::PermitList). Callers read it through accessors;
//! every mutation goes through the list so the revocation rules and
//! timestamps stay consistent.

use std::fmt;

use serde::{Deserialize, Serialize};

use permit_chain_core::{Domain, DomainSet, PermitId, PermitKey};

/// Lifecycle state of a permit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PermitStatus {
    Active,
    Revoked,
}

impl fmt::Display for PermitStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PermitStatus::Active => f.write_str("ACTIVE"),
            PermitStatus::Revoked => f.write_str("REVOKED"),
        }
    }
}

/// A revocable access permit.
#[derive(Debug, Clone, PartialEq)]
pub struct Permit {
    domains: DomainSet,
    key: PermitKey,
    /// Seconds since the Unix epoch of creation or last successful mutation.
    timestamp: f64,
    revoked: bool,
}

impl Permit {
    pub(crate) fn new(domains: DomainSet, key: PermitKey, timestamp: f64) -> Self {
        Self {
            domains,
            key,
            timestamp,
            revoked: false,
        }
    }

    /// The domains this permit applies to.
    pub fn domains(&self) -> &DomainSet {
        &self.domains
    }

    /// Check whether the permit covers a domain.
    pub fn covers(&self, domain: Domain) -> bool {
        self.domains.contains(domain)
    }

    /// Current key material.
    pub fn key(&self) -> &PermitKey {
        &self.key
    }

    /// Timestamp of creation or the last successful mutation.
    pub fn timestamp(&self) -> f64 {
        self.timestamp
    }

    pub fn is_revoked(&self) -> bool {
        self.revoked
    }

    pub fn is_active(&self) -> bool {
        !self.revoked
    }

    pub fn status(&self) -> PermitStatus {
        if self.revoked {
            PermitStatus::Revoked
        } else {
            PermitStatus::Active
        }
    }

    pub(crate) fn replace_domains(&mut self, domains: DomainSet, at: f64) {
        self.domains = domains;
        self.timestamp = at;
    }

    pub(crate) fn replace_key(&mut self, key: PermitKey, at: f64) {
        self.key = key;
        self.timestamp = at;
    }

    pub(crate) fn set_revoked(&mut self, revoked: bool, at: f64) {
        self.revoked = revoked;
        self.timestamp = at;
    }

    /// Flatten into an exportable record.
    pub fn snapshot(&self, id: PermitId) -> PermitSnapshot {
        PermitSnapshot {
            node_id: id.to_hex(),
            domains: self.domains.clone(),
            key: self.key.to_hex(),
            timestamp: self.timestamp,
            revoked: self.revoked,
        }
    }
}

/// Serializable view of one list node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PermitSnapshot {
    pub node_id: String,
    pub domains: DomainSet,
    /// Full key, hex encoded.
    pub key: String,
    pub timestamp: f64,
    pub revoked: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn permit() -> Permit {
        Permit::new(
            DomainSet::new([Domain::Finance, Domain::AiMl]).unwrap(),
            PermitKey::from_bytes([0x11; 16]),
            100.5,
        )
    }

    #[test]
    fn test_new_permit_is_active() {
        let p = permit();
        assert!(p.is_active());
        assert_eq!(p.status(), PermitStatus::Active);
        assert!(p.covers(Domain::Finance));
        assert!(!p.covers(Domain::Legal));
        assert_eq!(p.timestamp(), 100.5);
    }

    #[test]
    fn test_status_display() {
        let mut p = permit();
        assert_eq!(p.status().to_string(), "ACTIVE");
        p.set_revoked(true, 101.0);
        assert_eq!(p.status().to_string(), "REVOKED");
        assert_eq!(p.timestamp(), 101.0);
    }

    #[test]
    fn test_snapshot_json() {
        let p = permit();
        let id = PermitId::from_bytes([0x01; 8]);
        let snap = p.snapshot(id);

        assert_eq!(snap.node_id, "0101010101010101");
        assert_eq!(snap.key, "11".repeat(16));

        let json = serde_json::to_value(&snap).unwrap();
        assert_eq!(json["domains"], serde_json::json!(["ai_ml", "finance"]));
        assert_eq!(json["revoked"], serde_json::json!(false));
    }
}
