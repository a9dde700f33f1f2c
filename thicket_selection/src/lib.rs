// Copyright 2025 the Thicket Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=thicket_selection --heading-base-level=0

//! Thicket Selection: which nodes are currently selected.
//!
//! This crate does the *bookkeeping* of a canvas selection: the set of
//! selected node ids, an optional **primary** (the most recently
//! interacted-with node), and a monotonically increasing **revision**
//! counter that bumps only when the selection semantically changes. It knows
//! nothing about geometry; the interaction layer decides which ids a click
//! or marquee gesture affects and calls in with the result.
//!
//! Keys are stored in a small `Vec` with uniqueness enforced by equality,
//! which keeps iteration order stable and avoids imposing hashing on
//! observers.
//!
//! ## Minimal example
//!
//! ```
//! use thicket_model::NodeId;
//! use thicket_selection::Selection;
//!
//! let mut selection = Selection::new();
//!
//! // Plain click on a node.
//! selection.select_only(NodeId::new(10));
//! assert_eq!(selection.primary(), Some(NodeId::new(10)));
//!
//! // Extend-click toggles membership.
//! selection.toggle(NodeId::new(10));
//! assert!(selection.is_empty());
//!
//! // Marquee release: replace with everything the rectangle hit.
//! selection.apply_marquee([NodeId::new(1), NodeId::new(2)], false);
//! assert_eq!(selection.len(), 2);
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

use alloc::vec::Vec;

use thicket_model::NodeId;

/// The set of selected nodes plus primary and a change revision.
///
/// The revision is bumped only by mutations that change the semantic state
/// (contents or primary); no-op calls leave it untouched, so observers can
/// use it as a cheap "did anything actually change?" marker.
#[derive(Clone, Debug, Default)]
pub struct Selection {
    items: Vec<NodeId>,
    primary: Option<usize>,
    revision: u64,
}

impl Selection {
    /// Creates an empty selection.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            items: Vec::new(),
            primary: None,
            revision: 0,
        }
    }

    /// Returns `true` if nothing is selected.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Returns the number of selected nodes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns the selected ids in their stable internal order.
    #[must_use]
    pub fn items(&self) -> &[NodeId] {
        &self.items
    }

    /// Returns `true` if `id` is selected.
    #[must_use]
    pub fn contains(&self, id: NodeId) -> bool {
        self.items.contains(&id)
    }

    /// Returns the primary node, if any.
    #[must_use]
    pub fn primary(&self) -> Option<NodeId> {
        self.primary.map(|idx| self.items[idx])
    }

    /// Returns the current revision counter.
    #[must_use]
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Empties the selection.
    pub fn clear(&mut self) {
        if self.items.is_empty() && self.primary.is_none() {
            return;
        }
        self.items.clear();
        self.primary = None;
        self.bump();
    }

    /// Replaces the selection with a single node (plain click).
    pub fn select_only(&mut self, id: NodeId) {
        if self.items.as_slice() == [id] && self.primary == Some(0) {
            return;
        }
        self.items.clear();
        self.items.push(id);
        self.primary = Some(0);
        self.bump();
    }

    /// Toggles a node's membership (extend-click).
    ///
    /// A newly added node becomes primary; removing the primary clears it.
    pub fn toggle(&mut self, id: NodeId) {
        if let Some(idx) = self.position_of(id) {
            self.remove_at(idx);
        } else {
            self.items.push(id);
            self.primary = Some(self.items.len() - 1);
        }
        self.bump();
    }

    /// Removes a node from the selection if present.
    pub fn remove(&mut self, id: NodeId) {
        if let Some(idx) = self.position_of(id) {
            self.remove_at(idx);
            self.bump();
        }
    }

    /// Replaces the selection with `ids`, ignoring duplicates.
    ///
    /// The first unique id becomes primary. A replacement that reproduces
    /// the current state exactly is a no-op.
    pub fn replace_with<I>(&mut self, ids: I)
    where
        I: IntoIterator<Item = NodeId>,
    {
        let mut new_items: Vec<NodeId> = Vec::new();
        for id in ids {
            if !new_items.contains(&id) {
                new_items.push(id);
            }
        }
        let new_primary = if new_items.is_empty() { None } else { Some(0) };
        if new_items == self.items && new_primary == self.primary {
            return;
        }
        self.items = new_items;
        self.primary = new_primary;
        self.bump();
    }

    /// Extends the selection with `ids`; existing members stay selected.
    ///
    /// The last id actually added becomes primary. Adding nothing new is a
    /// no-op.
    pub fn extend_with<I>(&mut self, ids: I)
    where
        I: IntoIterator<Item = NodeId>,
    {
        let mut last_added = None;
        for id in ids {
            if self.position_of(id).is_none() {
                self.items.push(id);
                last_added = Some(self.items.len() - 1);
            }
        }
        if let Some(idx) = last_added {
            self.primary = Some(idx);
            self.bump();
        }
    }

    /// Commits a marquee gesture's hit set.
    ///
    /// With `extend` the hits union into the existing selection (the
    /// secondary-modifier behavior); otherwise they replace it.
    pub fn apply_marquee<I>(&mut self, hits: I, extend: bool)
    where
        I: IntoIterator<Item = NodeId>,
    {
        if extend {
            self.extend_with(hits);
        } else {
            self.replace_with(hits);
        }
    }

    fn position_of(&self, id: NodeId) -> Option<usize> {
        self.items.iter().position(|&k| k == id)
    }

    fn remove_at(&mut self, idx: usize) {
        self.items.remove(idx);
        self.primary = match self.primary {
            Some(p) if p == idx => None,
            Some(p) if p > idx => Some(p - 1),
            other => other,
        };
        if self.items.is_empty() {
            self.primary = None;
        }
    }

    fn bump(&mut self) {
        self.revision = self.revision.wrapping_add(1);
    }
}
