// Copyright 2025 the Thicket Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Symmetric node connections and their canonical edge keys.

use alloc::vec::Vec;

use hashbrown::HashSet;

use crate::{NodeId, Page};

/// Canonical key for an undirected connection between two nodes.
///
/// A connection is stored symmetrically on both endpoints, so enumerating
/// raw `connections` lists would visit each edge twice. `EdgeKey` orders the
/// endpoints (`lo < hi`) to give every edge exactly one identity for
/// rendering and removal.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EdgeKey {
    lo: NodeId,
    hi: NodeId,
}

impl EdgeKey {
    /// Builds the canonical key for an edge between `a` and `b`.
    ///
    /// Returns `None` for a self-edge, which the model never stores.
    #[must_use]
    pub fn new(a: NodeId, b: NodeId) -> Option<Self> {
        if a == b {
            return None;
        }
        let (lo, hi) = if a < b { (a, b) } else { (b, a) };
        Some(Self { lo, hi })
    }

    /// The smaller endpoint.
    #[must_use]
    pub const fn lo(self) -> NodeId {
        self.lo
    }

    /// The larger endpoint.
    #[must_use]
    pub const fn hi(self) -> NodeId {
        self.hi
    }

    /// Both endpoints as `(lo, hi)`.
    #[must_use]
    pub const fn endpoints(self) -> (NodeId, NodeId) {
        (self.lo, self.hi)
    }
}

impl Page {
    fn connections_mut(&mut self, id: NodeId) -> Option<&mut Vec<NodeId>> {
        if let Some(m) = self.memos.iter_mut().find(|m| m.id == id) {
            return Some(&mut m.connections);
        }
        self.categories
            .iter_mut()
            .find(|c| c.id == id)
            .map(|c| &mut c.connections)
    }

    /// Returns `true` if `a` and `b` are connected.
    ///
    /// The relation is symmetric; either endpoint's list is authoritative.
    #[must_use]
    pub fn are_connected(&self, a: NodeId, b: NodeId) -> bool {
        self.node(a)
            .is_some_and(|n| n.connections().contains(&b))
    }

    /// Connects `a` and `b` symmetrically.
    ///
    /// Self-connections, duplicates, and missing endpoints are silent no-ops.
    /// Returns `true` if the page changed.
    pub fn connect(&mut self, a: NodeId, b: NodeId) -> bool {
        if EdgeKey::new(a, b).is_none() || !self.contains(a) || !self.contains(b) {
            return false;
        }
        if self.are_connected(a, b) {
            return false;
        }
        // Both lookups succeed: existence was checked above.
        if let Some(list) = self.connections_mut(a) {
            list.push(b);
        }
        if let Some(list) = self.connections_mut(b) {
            list.push(a);
        }
        true
    }

    /// Removes the connection between `a` and `b` from both endpoints.
    ///
    /// Returns `true` if the page changed.
    pub fn disconnect(&mut self, a: NodeId, b: NodeId) -> bool {
        let mut changed = false;
        if let Some(list) = self.connections_mut(a)
            && let Some(idx) = list.iter().position(|&peer| peer == b)
        {
            list.remove(idx);
            changed = true;
        }
        if let Some(list) = self.connections_mut(b)
            && let Some(idx) = list.iter().position(|&peer| peer == a)
        {
            list.remove(idx);
            changed = true;
        }
        changed
    }

    /// Enumerates every connection exactly once, in canonical order.
    ///
    /// Connections referencing a missing endpoint are skipped with a
    /// diagnostic rather than surfaced; the store is expected to scrub them
    /// on deletion, but a stale snapshot must not break enumeration.
    #[must_use]
    pub fn connection_keys(&self) -> Vec<EdgeKey> {
        let mut seen: HashSet<EdgeKey> = HashSet::new();
        for node in self.nodes() {
            for &peer in node.connections() {
                if !self.contains(peer) {
                    log::debug!("dangling connection {} -> {peer}; skipping", node.id());
                    continue;
                }
                if let Some(key) = EdgeKey::new(node.id(), peer) {
                    seen.insert(key);
                }
            }
        }
        let mut keys: Vec<EdgeKey> = seen.into_iter().collect();
        keys.sort_unstable();
        keys
    }

    /// Removes a node and scrubs every reference to it.
    ///
    /// Children of a removed category become top-level and connections to the
    /// removed node are dropped from their peers. Deletion is an external
    /// store operation; this helper exists so hosts keep the invariants the
    /// engines rely on.
    ///
    /// Returns `true` if a node was removed.
    pub fn remove_node(&mut self, id: NodeId) -> bool {
        let before = self.memos.len() + self.categories.len();
        self.memos.retain(|m| m.id != id);
        self.categories.retain(|c| c.id != id);
        if self.memos.len() + self.categories.len() == before {
            return false;
        }
        for m in &mut self.memos {
            if m.parent_id == Some(id) {
                m.parent_id = None;
            }
            m.connections.retain(|&peer| peer != id);
        }
        for c in &mut self.categories {
            if c.parent_id == Some(id) {
                c.parent_id = None;
            }
            c.connections.retain(|&peer| peer != id);
        }
        true
    }
}
