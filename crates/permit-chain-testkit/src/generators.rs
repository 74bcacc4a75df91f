//! Proptest generators and a reference model for property-based testing.
//!
//! [`ListOp`] sequences are applied both to a real [`PermitList`] and to
//! [`Model`], a plain `Vec` that implements the same semantics the slow
//! obvious way. After every step the two must agree.

use proptest::prelude::*;
use proptest::test_runner::TestCaseError;

use permit_chain_core::{Clock, Domain, DomainSet, EntropySource, PermitId, PermitKey};
use permit_chain_list::{ListError, PermitList};

/// Generate a domain.
pub fn domain() -> impl Strategy<Value = Domain> {
    prop::sample::select(Domain::ALL.to_vec())
}

/// Generate a domain set of 1 to 4 domains.
pub fn domain_set() -> impl Strategy<Value = DomainSet> {
    prop::collection::btree_set(domain(), 1..=4).prop_map(|set| {
        DomainSet::new(set).expect("btree_set strategy yields at least one domain")
    })
}

/// One step of a random workload.
///
/// `usize` selectors pick a live node by `selector % len`; an empty list
/// turns them into operations on an unknown id.
#[derive(Debug, Clone)]
pub enum ListOp {
    Create(DomainSet),
    InsertAt(DomainSet, usize),
    Read(usize),
    Update(usize, DomainSet),
    Rotate(usize),
    Revoke(usize),
    Restore(usize),
    BulkRotate(Option<Domain>),
    Delete(usize),
    DeleteAt(usize),
    DeleteUnknown,
}

impl Arbitrary for ListOp {
    type Parameters = ();
    type Strategy = BoxedStrategy<Self>;

    fn arbitrary_with(_: Self::Parameters) -> Self::Strategy {
        prop_oneof![
            3 => domain_set().prop_map(ListOp::Create),
            2 => (domain_set(), 0usize..12).prop_map(|(d, p)| ListOp::InsertAt(d, p)),
            1 => any::<usize>().prop_map(ListOp::Read),
            1 => (any::<usize>(), domain_set()).prop_map(|(s, d)| ListOp::Update(s, d)),
            1 => any::<usize>().prop_map(ListOp::Rotate),
            2 => any::<usize>().prop_map(ListOp::Revoke),
            1 => any::<usize>().prop_map(ListOp::Restore),
            1 => proptest::option::of(domain()).prop_map(ListOp::BulkRotate),
            1 => any::<usize>().prop_map(ListOp::Delete),
            1 => (0usize..12).prop_map(ListOp::DeleteAt),
            1 => Just(ListOp::DeleteUnknown),
        ]
        .boxed()
    }
}

/// A node as the model sees it.
#[derive(Debug, Clone, PartialEq)]
pub struct ModelEntry {
    pub id: PermitId,
    pub domains: DomainSet,
    pub key: PermitKey,
    pub revoked: bool,
}

/// Reference implementation of list semantics over a `Vec`.
#[derive(Debug, Clone, Default)]
pub struct Model {
    pub entries: Vec<ModelEntry>,
}

/// An id no entropy source in this crate ever produces.
pub const UNKNOWN_ID: PermitId = PermitId::from_bytes([0xff; 8]);

impl Model {
    pub fn new() -> Self {
        Self::default()
    }

    fn select(&self, selector: usize) -> PermitId {
        if self.entries.is_empty() {
            UNKNOWN_ID
        } else {
            self.entries[selector % self.entries.len()].id
        }
    }

    fn index_of(&self, id: &PermitId) -> Option<usize> {
        self.entries.iter().position(|e| e.id == *id)
    }

    /// Apply `op` to `list` and to the model, then check that they agree.
    pub fn step<E, C>(&mut self, list: &mut PermitList<E, C>, op: &ListOp) -> Result<(), TestCaseError>
    where
        E: EntropySource,
        C: Clock,
    {
        match op {
            ListOp::Create(domains) => {
                let id = list
                    .create_permit(domains.clone())
                    .map_err(|e| TestCaseError::fail(e.to_string()))?;
                let key = *list.read(&id).map_err(|e| TestCaseError::fail(e.to_string()))?.key();
                self.entries.push(ModelEntry {
                    id,
                    domains: domains.clone(),
                    key,
                    revoked: false,
                });
            }
            ListOp::InsertAt(domains, position) => {
                let result = list.insert_at(domains.clone(), *position);
                if *position > self.entries.len() {
                    prop_assert_eq!(
                        result,
                        Err(ListError::InvalidPosition {
                            position: *position,
                            size: self.entries.len()
                        })
                    );
                } else {
                    let id = result.map_err(|e| TestCaseError::fail(e.to_string()))?;
                    let key = *list.read(&id).map_err(|e| TestCaseError::fail(e.to_string()))?.key();
                    self.entries.insert(
                        *position,
                        ModelEntry {
                            id,
                            domains: domains.clone(),
                            key,
                            revoked: false,
                        },
                    );
                }
            }
            ListOp::Read(selector) => {
                let id = self.select(*selector);
                match self.index_of(&id) {
                    Some(i) => {
                        let permit = list.read(&id).map_err(|e| TestCaseError::fail(e.to_string()))?;
                        prop_assert_eq!(permit.domains(), &self.entries[i].domains);
                    }
                    None => prop_assert_eq!(list.read(&id).err(), Some(ListError::NotFound(id))),
                }
            }
            ListOp::Update(selector, domains) => {
                let id = self.select(*selector);
                let result = list.update_domains(&id, domains.clone());
                match self.index_of(&id) {
                    None => prop_assert_eq!(result, Err(ListError::NotFound(id))),
                    Some(i) if self.entries[i].revoked => {
                        prop_assert_eq!(result, Err(ListError::Immutable(id)))
                    }
                    Some(i) => {
                        prop_assert_eq!(result, Ok(()));
                        self.entries[i].domains = domains.clone();
                    }
                }
            }
            ListOp::Rotate(selector) => {
                let id = self.select(*selector);
                let result = list.rotate_key(&id);
                match self.index_of(&id) {
                    None => prop_assert_eq!(result, Err(ListError::NotFound(id))),
                    Some(i) if self.entries[i].revoked => {
                        prop_assert_eq!(result, Err(ListError::Immutable(id)))
                    }
                    Some(i) => {
                        prop_assert_eq!(result, Ok(()));
                        let key = *list.read(&id).map_err(|e| TestCaseError::fail(e.to_string()))?.key();
                        prop_assert_ne!(key, self.entries[i].key);
                        self.entries[i].key = key;
                    }
                }
            }
            ListOp::Revoke(selector) => {
                let id = self.select(*selector);
                let result = list.revoke(&id);
                match self.index_of(&id) {
                    None => prop_assert_eq!(result, Err(ListError::NotFound(id))),
                    Some(i) if self.entries[i].revoked => {
                        prop_assert_eq!(result, Err(ListError::AlreadyRevoked(id)))
                    }
                    Some(i) => {
                        prop_assert_eq!(result, Ok(()));
                        self.entries[i].revoked = true;
                    }
                }
            }
            ListOp::Restore(selector) => {
                let id = self.select(*selector);
                let result = list.restore(&id);
                match self.index_of(&id) {
                    None => prop_assert_eq!(result, Err(ListError::NotFound(id))),
                    Some(i) if !self.entries[i].revoked => {
                        prop_assert_eq!(result, Err(ListError::NotRevoked(id)))
                    }
                    Some(i) => {
                        prop_assert_eq!(result, Ok(()));
                        self.entries[i].revoked = false;
                    }
                }
            }
            ListOp::BulkRotate(filter) => {
                let rotated = list.bulk_rotate_keys(*filter);
                let mut expected = 0;
                for entry in &mut self.entries {
                    let selected = filter.map_or(true, |d| entry.domains.contains(d));
                    let key = *list
                        .read(&entry.id)
                        .map_err(|e| TestCaseError::fail(e.to_string()))?
                        .key();
                    if !entry.revoked && selected {
                        prop_assert_ne!(key, entry.key);
                        entry.key = key;
                        expected += 1;
                    } else {
                        prop_assert_eq!(key, entry.key);
                    }
                }
                prop_assert_eq!(rotated, expected);
            }
            ListOp::Delete(selector) => {
                let id = self.select(*selector);
                let result = list.delete(&id).map(|_| ());
                match self.index_of(&id) {
                    None => prop_assert_eq!(result, Err(ListError::NotFound(id))),
                    Some(i) => {
                        prop_assert_eq!(result, Ok(()));
                        self.entries.remove(i);
                        prop_assert_eq!(list.read(&id).err(), Some(ListError::NotFound(id)));
                    }
                }
            }
            ListOp::DeleteAt(position) => {
                let result = list.delete_at(*position).map(|(id, _)| id);
                if *position >= self.entries.len() {
                    prop_assert_eq!(
                        result,
                        Err(ListError::InvalidPosition {
                            position: *position,
                            size: self.entries.len()
                        })
                    );
                } else {
                    let removed = self.entries.remove(*position);
                    prop_assert_eq!(result, Ok(removed.id));
                }
            }
            ListOp::DeleteUnknown => {
                prop_assert_eq!(list.delete(&UNKNOWN_ID).err(), Some(ListError::NotFound(UNKNOWN_ID)));
            }
        }

        self.check(list)
    }

    /// Compare the list against the model, both directions.
    pub fn check<E, C>(&self, list: &PermitList<E, C>) -> Result<(), TestCaseError> {
        prop_assert_eq!(list.check_invariants(), Ok(()));
        prop_assert_eq!(list.len(), self.entries.len());

        let forward: Vec<ModelEntry> = list
            .iter()
            .map(|entry| ModelEntry {
                id: entry.id,
                domains: entry.permit.domains().clone(),
                key: *entry.permit.key(),
                revoked: entry.permit.is_revoked(),
            })
            .collect();
        prop_assert_eq!(&forward, &self.entries);

        let backward: Vec<PermitId> = list.iter().rev().map(|entry| entry.id).collect();
        let expected: Vec<PermitId> = self.entries.iter().rev().map(|e| e.id).collect();
        prop_assert_eq!(backward, expected);

        Ok(())
    }
}
