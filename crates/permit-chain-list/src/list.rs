//! The permit list: an ordered chain of permits with an identifier index.
//!
//! Nodes live in a single map keyed by [`PermitId`]. The map is both the
//! arena that owns the nodes and the O(1) index used for lookups; the chain
//! order is carried by `prev`/`next` links stored as ids inside each node.
//! Every mutation relinks neighbors, moves `head`/`tail`, adjusts `size`, and
//! updates the map within the same call, so no caller ever observes a
//! half-linked chain.

use std::collections::{HashMap, HashSet};

use permit_chain_core::{
    Clock, Domain, DomainSet, DomainSetSource, EntropySource, OsEntropy, PermitId, SystemClock,
};

use crate::config::ListConfig;
use crate::error::{InvariantViolation, ListError, Result};
use crate::iter::{Entry, Iter};
use crate::permit::{Permit, PermitSnapshot};
use crate::stats::Statistics;

/// A chain node. Links are ids, not references, so ownership stays with the map.
#[derive(Debug, Clone)]
pub(crate) struct Node {
    pub(crate) permit: Permit,
    pub(crate) prev: Option<PermitId>,
    pub(crate) next: Option<PermitId>,
}

/// Ordered, revocable permits with O(1) access by id.
///
/// Head/tail insertion and removal are O(1); positional operations walk from
/// the head and cost O(position).
pub struct PermitList<E = OsEntropy, C = SystemClock> {
    nodes: HashMap<PermitId, Node>,
    head: Option<PermitId>,
    tail: Option<PermitId>,
    size: usize,
    entropy: E,
    clock: C,
    /// Last timestamp handed out; keeps timestamps non-decreasing.
    last_stamp: f64,
    config: ListConfig,
}

impl PermitList {
    /// Create an empty list backed by OS entropy and the system clock.
    pub fn new() -> Self {
        Self::with_sources(OsEntropy, SystemClock)
    }
}

impl Default for PermitList {
    fn default() -> Self {
        Self::new()
    }
}

impl<E, C> PermitList<E, C> {
    /// Create an empty list with the given entropy and clock.
    pub fn with_sources(entropy: E, clock: C) -> Self {
        Self::with_config(entropy, clock, ListConfig::default())
    }

    /// Create an empty list with explicit configuration.
    pub fn with_config(entropy: E, clock: C, config: ListConfig) -> Self {
        Self {
            nodes: HashMap::new(),
            head: None,
            tail: None,
            size: 0,
            entropy,
            clock,
            last_stamp: 0.0,
            config,
        }
    }

    pub fn config(&self) -> &ListConfig {
        &self.config
    }

    /// Number of live permits.
    pub fn len(&self) -> usize {
        self.size
    }

    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    pub fn contains(&self, id: &PermitId) -> bool {
        self.nodes.contains_key(id)
    }

    /// Look up a permit by id.
    pub fn get(&self, id: &PermitId) -> Option<&Permit> {
        self.nodes.get(id).map(|node| &node.permit)
    }

    /// Read a permit by id, reporting `NotFound` for unknown ids.
    pub fn read(&self, id: &PermitId) -> Result<&Permit> {
        self.get(id).ok_or(ListError::NotFound(*id))
    }

    /// Read a permit by its hex id.
    pub fn read_hex(&self, id: &str) -> Result<&Permit> {
        let id = PermitId::from_hex(id)?;
        self.read(&id)
    }

    /// Traverse all permits head to tail. Reverse with `.rev()`.
    pub fn iter(&self) -> Iter<'_> {
        Iter::new(&self.nodes, self.head, self.tail, self.size)
    }

    pub fn front(&self) -> Option<Entry<'_>> {
        self.iter().next()
    }

    pub fn back(&self) -> Option<Entry<'_>> {
        self.iter().next_back()
    }

    /// The entry at `position`, counting from the head.
    pub fn get_at(&self, position: usize) -> Option<Entry<'_>> {
        self.iter().nth(position)
    }

    /// Position of `id` in list order.
    pub fn position_of(&self, id: &PermitId) -> Option<usize> {
        if !self.contains(id) {
            return None;
        }
        self.iter().position(|entry| entry.id == *id)
    }

    /// Active permits in list order.
    pub fn list_active(&self) -> impl Iterator<Item = Entry<'_>> + '_ {
        self.iter().filter(|entry| entry.permit.is_active())
    }

    /// Active permits covering `domain`, in list order.
    pub fn find_by_domain(&self, domain: Domain) -> impl Iterator<Item = Entry<'_>> + '_ {
        self.iter()
            .filter(move |entry| entry.permit.is_active() && entry.permit.covers(domain))
    }

    /// Counts over the whole list in a single traversal.
    pub fn statistics(&self) -> Statistics {
        Statistics::collect(self.iter())
    }

    /// Every node, in list order, as exportable records.
    pub fn snapshot(&self) -> Vec<PermitSnapshot> {
        self.iter()
            .map(|entry| entry.permit.snapshot(entry.id))
            .collect()
    }

    /// Walk the chain both ways and check it against the index and size.
    pub fn check_invariants(&self) -> std::result::Result<(), InvariantViolation> {
        match (self.head, self.tail) {
            (None, None) => {}
            (Some(_), Some(_)) if self.size > 0 => {}
            _ => return Err(InvariantViolation::BoundaryMismatch),
        }

        if let Some(head) = self.head {
            let node = self
                .nodes
                .get(&head)
                .ok_or(InvariantViolation::DanglingLink(head))?;
            if node.prev.is_some() {
                return Err(InvariantViolation::HeadHasPrev(head));
            }
        }
        if let Some(tail) = self.tail {
            let node = self
                .nodes
                .get(&tail)
                .ok_or(InvariantViolation::DanglingLink(tail))?;
            if node.next.is_some() {
                return Err(InvariantViolation::TailHasNext(tail));
            }
        }

        let mut forward = Vec::with_capacity(self.nodes.len());
        let mut seen = HashSet::with_capacity(self.nodes.len());
        let mut cursor = self.head;
        while let Some(id) = cursor {
            if !seen.insert(id) {
                return Err(InvariantViolation::Cycle);
            }
            let node = self
                .nodes
                .get(&id)
                .ok_or(InvariantViolation::DanglingLink(id))?;
            if let Some(next) = node.next {
                let next_node = self
                    .nodes
                    .get(&next)
                    .ok_or(InvariantViolation::DanglingLink(next))?;
                if next_node.prev != Some(id) {
                    return Err(InvariantViolation::BrokenBackLink { node: id, next });
                }
            }
            forward.push(id);
            cursor = node.next;
        }

        if forward.last().copied() != self.tail {
            return Err(InvariantViolation::TailMismatch {
                expected: self.tail,
                found: forward.last().copied(),
            });
        }

        if self.size != self.nodes.len() || self.size != forward.len() {
            return Err(InvariantViolation::SizeMismatch {
                size: self.size,
                indexed: self.nodes.len(),
                reachable: forward.len(),
            });
        }

        let mut backward = Vec::with_capacity(forward.len());
        let mut cursor = self.tail;
        while let Some(id) = cursor {
            if backward.len() > forward.len() {
                return Err(InvariantViolation::Cycle);
            }
            backward.push(id);
            cursor = self.nodes.get(&id).and_then(|node| node.prev);
        }
        backward.reverse();
        if backward != forward {
            return Err(InvariantViolation::ReverseMismatch);
        }

        Ok(())
    }

    /// The id at `position`. O(1) at either end, otherwise walks from the head.
    fn id_at(&self, position: usize) -> Option<PermitId> {
        if position >= self.size {
            return None;
        }
        if position == 0 {
            return self.head;
        }
        if position == self.size - 1 {
            return self.tail;
        }
        self.iter().nth(position).map(|entry| entry.id)
    }

    /// Link a new node between `prev` and `next`, which must be adjacent.
    fn attach(&mut self, id: PermitId, permit: Permit, prev: Option<PermitId>, next: Option<PermitId>) {
        match prev.and_then(|p| self.nodes.get_mut(&p)) {
            Some(prev_node) => prev_node.next = Some(id),
            None => self.head = Some(id),
        }
        match next.and_then(|n| self.nodes.get_mut(&n)) {
            Some(next_node) => next_node.prev = Some(id),
            None => self.tail = Some(id),
        }
        self.nodes.insert(id, Node { permit, prev, next });
        self.size += 1;
    }

    /// Unlink and drop a node from the chain and the index.
    fn detach(&mut self, id: &PermitId) -> Option<Permit> {
        let node = self.nodes.remove(id)?;

        match node.prev.and_then(|p| self.nodes.get_mut(&p)) {
            Some(prev_node) => prev_node.next = node.next,
            None => self.head = node.next,
        }
        match node.next.and_then(|n| self.nodes.get_mut(&n)) {
            Some(next_node) => next_node.prev = node.prev,
            None => self.tail = node.prev,
        }

        self.size -= 1;
        Some(node.permit)
    }

    fn verify(&self) {
        if !self.config.verify_invariants {
            return;
        }
        if let Err(violation) = self.check_invariants() {
            tracing::error!(%violation, "permit list invariant violated");
            if cfg!(debug_assertions) {
                panic!("permit list invariant violated: {violation}");
            }
        }
    }
}

impl<E: EntropySource, C: Clock> PermitList<E, C> {
    /// Append a new permit at the tail.
    pub fn create_permit(&mut self, domains: DomainSet) -> Result<PermitId> {
        let id = self.fresh_id()?;
        let permit = self.new_permit(domains);
        self.attach(id, permit, self.tail, None);

        tracing::debug!(%id, position = self.size - 1, "created permit");
        self.verify();
        Ok(id)
    }

    /// Insert a new permit so it ends up at `position`.
    ///
    /// `0` inserts at the head and `len()` appends at the tail. Anything larger
    /// fails with [`ListError::InvalidPosition`].
    pub fn insert_at(&mut self, domains: DomainSet, position: usize) -> Result<PermitId> {
        if position > self.size {
            tracing::warn!(position, size = self.size, "rejected insert at invalid position");
            return Err(ListError::InvalidPosition {
                position,
                size: self.size,
            });
        }

        // The current occupant of `position` becomes our successor.
        let next = self.id_at(position);
        let prev = match next {
            Some(occupant) => self.nodes.get(&occupant).and_then(|node| node.prev),
            None => self.tail,
        };

        let id = self.fresh_id()?;
        let permit = self.new_permit(domains);
        self.attach(id, permit, prev, next);

        tracing::debug!(%id, position, "inserted permit");
        self.verify();
        Ok(id)
    }

    /// Append `count` permits with domain sets drawn from `source`.
    ///
    /// Either all permits are created or none are.
    pub fn create_many<S>(&mut self, source: &mut S, count: usize) -> Result<Vec<PermitId>>
    where
        S: DomainSetSource + ?Sized,
    {
        let mut created = Vec::with_capacity(count);
        for _ in 0..count {
            match self.create_permit(source.domain_set()) {
                Ok(id) => created.push(id),
                Err(e) => {
                    for id in created.iter().rev() {
                        self.detach(id);
                    }
                    self.verify();
                    return Err(e);
                }
            }
        }
        Ok(created)
    }

    /// Replace the domain set of an active permit.
    pub fn update_domains(&mut self, id: &PermitId, domains: DomainSet) -> Result<()> {
        let Self {
            nodes,
            clock,
            last_stamp,
            ..
        } = self;
        let node = nodes.get_mut(id).ok_or(ListError::NotFound(*id))?;
        if node.permit.is_revoked() {
            return Err(ListError::Immutable(*id));
        }

        tracing::debug!(%id, domains = %domains, "updated permit domains");
        node.permit.replace_domains(domains, next_stamp(clock, last_stamp));
        Ok(())
    }

    /// Draw a fresh key for an active permit.
    pub fn rotate_key(&mut self, id: &PermitId) -> Result<()> {
        let Self {
            nodes,
            entropy,
            clock,
            last_stamp,
            ..
        } = self;
        let node = nodes.get_mut(id).ok_or(ListError::NotFound(*id))?;
        if node.permit.is_revoked() {
            return Err(ListError::Immutable(*id));
        }

        node.permit
            .replace_key(entropy.permit_key(), next_stamp(clock, last_stamp));
        tracing::debug!(%id, "rotated permit key");
        Ok(())
    }

    /// Mark an active permit revoked.
    pub fn revoke(&mut self, id: &PermitId) -> Result<()> {
        let Self {
            nodes,
            clock,
            last_stamp,
            ..
        } = self;
        let node = nodes.get_mut(id).ok_or(ListError::NotFound(*id))?;
        if node.permit.is_revoked() {
            return Err(ListError::AlreadyRevoked(*id));
        }

        node.permit.set_revoked(true, next_stamp(clock, last_stamp));
        tracing::debug!(%id, "revoked permit");
        Ok(())
    }

    /// Clear the revocation on a revoked permit.
    pub fn restore(&mut self, id: &PermitId) -> Result<()> {
        let Self {
            nodes,
            clock,
            last_stamp,
            ..
        } = self;
        let node = nodes.get_mut(id).ok_or(ListError::NotFound(*id))?;
        if node.permit.is_active() {
            return Err(ListError::NotRevoked(*id));
        }

        node.permit.set_revoked(false, next_stamp(clock, last_stamp));
        tracing::debug!(%id, "restored permit");
        Ok(())
    }

    /// Rotate the key of every active permit, optionally only those covering
    /// `filter`. Visits nodes in list order and returns how many rotated.
    pub fn bulk_rotate_keys(&mut self, filter: Option<Domain>) -> usize {
        let Self {
            nodes,
            head,
            entropy,
            clock,
            last_stamp,
            ..
        } = self;

        let mut rotated = 0;
        let mut cursor = *head;
        while let Some(id) = cursor {
            let Some(node) = nodes.get_mut(&id) else {
                break;
            };
            cursor = node.next;

            let selected = filter.map_or(true, |domain| node.permit.covers(domain));
            if node.permit.is_active() && selected {
                node.permit
                    .replace_key(entropy.permit_key(), next_stamp(clock, last_stamp));
                rotated += 1;
            }
        }

        tracing::debug!(?filter, rotated, "bulk rotated permit keys");
        rotated
    }

    /// Remove a permit by id, returning it.
    pub fn delete(&mut self, id: &PermitId) -> Result<Permit> {
        let Some(permit) = self.detach(id) else {
            tracing::debug!(%id, "permit not found for deletion");
            return Err(ListError::NotFound(*id));
        };

        tracing::debug!(%id, "deleted permit");
        self.verify();
        Ok(permit)
    }

    /// Remove the permit at `position`, returning its id and the permit.
    pub fn delete_at(&mut self, position: usize) -> Result<(PermitId, Permit)> {
        let Some(id) = self.id_at(position) else {
            tracing::warn!(position, size = self.size, "rejected delete at invalid position");
            return Err(ListError::InvalidPosition {
                position,
                size: self.size,
            });
        };

        let permit = self.delete(&id)?;
        Ok((id, permit))
    }

    /// Draw an id not currently in use.
    fn fresh_id(&mut self) -> Result<PermitId> {
        let attempts = self.config.max_id_attempts.max(1);
        for _ in 0..attempts {
            let id = self.entropy.permit_id();
            if !self.nodes.contains_key(&id) {
                return Ok(id);
            }
            tracing::warn!(%id, "permit id collision, drawing again");
        }
        Err(ListError::IdSpaceExhausted { attempts })
    }

    fn new_permit(&mut self, domains: DomainSet) -> Permit {
        let key = self.entropy.permit_key();
        let at = next_stamp(&self.clock, &mut self.last_stamp);
        Permit::new(domains, key, at)
    }
}

/// Read the clock, never going backwards from the last stamp handed out.
fn next_stamp<C: Clock>(clock: &C, last: &mut f64) -> f64 {
    let now = clock.now();
    if now > *last {
        *last = now;
    }
    *last
}
