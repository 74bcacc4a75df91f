//! Ordered traversal over the chain.

use std::collections::HashMap;
use std::iter::FusedIterator;

use permit_chain_core::PermitId;

use crate::list::Node;
use crate::permit::Permit;

/// One node of the list as seen by readers.
#[derive(Debug, Clone, Copy)]
pub struct Entry<'a> {
    pub id: PermitId,
    pub permit: &'a Permit,
}

/// Walks the chain head to tail, or tail to head from the back.
///
/// Forward steps follow `next` links and backward steps follow `prev` links;
/// the two ends meet after `len` entries.
pub struct Iter<'a> {
    nodes: &'a HashMap<PermitId, Node>,
    front: Option<PermitId>,
    back: Option<PermitId>,
    remaining: usize,
}

impl<'a> Iter<'a> {
    pub(crate) fn new(
        nodes: &'a HashMap<PermitId, Node>,
        head: Option<PermitId>,
        tail: Option<PermitId>,
        len: usize,
    ) -> Self {
        Self {
            nodes,
            front: head,
            back: tail,
            remaining: len,
        }
    }
}

impl<'a> Iterator for Iter<'a> {
    type Item = Entry<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let id = self.front?;
        let node = self.nodes.get(&id)?;
        self.front = node.next;
        self.remaining -= 1;
        Some(Entry {
            id,
            permit: &node.permit,
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl DoubleEndedIterator for Iter<'_> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let id = self.back?;
        let node = self.nodes.get(&id)?;
        self.back = node.prev;
        self.remaining -= 1;
        Some(Entry {
            id,
            permit: &node.permit,
        })
    }
}

impl ExactSizeIterator for Iter<'_> {}

impl FusedIterator for Iter<'_> {}
