//! A permit list behind a lock.
//!
//! The list's invariants span the whole chain, so the whole list is one
//! exclusion scope: every call takes the lock once and releases it on return.

use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use permit_chain_core::{Clock, DomainSet, EntropySource, PermitId};

use crate::error::Result;
use crate::list::PermitList;
use crate::permit::{Permit, PermitSnapshot};
use crate::stats::Statistics;

/// Thread-safe wrapper around a [`PermitList`].
pub struct SharedPermitList<E, C> {
    inner: RwLock<PermitList<E, C>>,
}

impl<E, C> SharedPermitList<E, C> {
    pub fn new(list: PermitList<E, C>) -> Self {
        Self {
            inner: RwLock::new(list),
        }
    }

    /// Run a read-only closure under the read lock.
    pub fn read<R>(&self, f: impl FnOnce(&PermitList<E, C>) -> R) -> R {
        f(&self.read_guard())
    }

    /// Run a closure under the write lock.
    pub fn write<R>(&self, f: impl FnOnce(&mut PermitList<E, C>) -> R) -> R {
        f(&mut self.write_guard())
    }

    pub fn len(&self) -> usize {
        self.read_guard().len()
    }

    pub fn is_empty(&self) -> bool {
        self.read_guard().is_empty()
    }

    /// Clone of the permit stored under `id`.
    pub fn get(&self, id: &PermitId) -> Option<Permit> {
        self.read_guard().get(id).cloned()
    }

    pub fn statistics(&self) -> Statistics {
        self.read_guard().statistics()
    }

    pub fn snapshot(&self) -> Vec<PermitSnapshot> {
        self.read_guard().snapshot()
    }

    /// Unwrap the list.
    pub fn into_inner(self) -> PermitList<E, C> {
        self.inner.into_inner().unwrap_or_else(PoisonError::into_inner)
    }

    // Mutations finish relinking before anything that can panic, so a
    // poisoned lock still guards a consistent list.
    fn read_guard(&self) -> RwLockReadGuard<'_, PermitList<E, C>> {
        self.inner.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write_guard(&self) -> RwLockWriteGuard<'_, PermitList<E, C>> {
        self.inner.write().unwrap_or_else(PoisonError::into_inner)
    }
}

impl<E: EntropySource, C: Clock> SharedPermitList<E, C> {
    pub fn create_permit(&self, domains: DomainSet) -> Result<PermitId> {
        self.write_guard().create_permit(domains)
    }

    pub fn insert_at(&self, domains: DomainSet, position: usize) -> Result<PermitId> {
        self.write_guard().insert_at(domains, position)
    }

    pub fn revoke(&self, id: &PermitId) -> Result<()> {
        self.write_guard().revoke(id)
    }

    pub fn restore(&self, id: &PermitId) -> Result<()> {
        self.write_guard().restore(id)
    }

    pub fn delete(&self, id: &PermitId) -> Result<Permit> {
        self.write_guard().delete(id)
    }
}

impl<E, C> From<PermitList<E, C>> for SharedPermitList<E, C> {
    fn from(list: PermitList<E, C>) -> Self {
        Self::new(list)
    }
}
