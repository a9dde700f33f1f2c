// Copyright 2025 the Thicket Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The page snapshot and its containment queries.

use alloc::vec::Vec;

use kurbo::Rect;
use smallvec::SmallVec;

use crate::{Category, Memo, NodeId, NodeKind, NodeRef};

/// Inline capacity for ancestor chains; nesting deeper than this is rare.
pub(crate) type AncestorChain = SmallVec<[NodeId; 8]>;

/// An immutable snapshot of one canvas page.
///
/// The page is the sole source of truth per evaluation: engines receive a
/// `&Page` on every call and never retain a private copy across evaluations.
/// Children of a category are derived by scanning for matching `parent_id`
/// references rather than stored as a list, so containment cannot drift out
/// of sync with the nodes themselves.
///
/// All queries fail open: a `parent_id` pointing at a missing or non-category
/// node is treated as "no parent", and parent-chain cycles terminate every
/// walk instead of recursing forever.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Page {
    /// All memos on the page.
    pub memos: Vec<Memo>,
    /// All categories on the page.
    pub categories: Vec<Category>,
}

impl Page {
    /// Creates an empty page.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Iterates every node on the page, memos first, in page order.
    pub fn nodes(&self) -> impl Iterator<Item = NodeRef<'_>> {
        self.memos
            .iter()
            .map(NodeRef::Memo)
            .chain(self.categories.iter().map(NodeRef::Category))
    }

    /// Looks up a memo by id.
    #[must_use]
    pub fn memo(&self, id: NodeId) -> Option<&Memo> {
        self.memos.iter().find(|m| m.id == id)
    }

    /// Looks up a category by id.
    #[must_use]
    pub fn category(&self, id: NodeId) -> Option<&Category> {
        self.categories.iter().find(|c| c.id == id)
    }

    /// Looks up either node kind by id.
    #[must_use]
    pub fn node(&self, id: NodeId) -> Option<NodeRef<'_>> {
        self.memo(id)
            .map(NodeRef::Memo)
            .or_else(|| self.category(id).map(NodeRef::Category))
    }

    /// Returns the kind of the node with `id`, if it exists.
    #[must_use]
    pub fn node_kind(&self, id: NodeId) -> Option<NodeKind> {
        self.node(id).map(|n| n.kind())
    }

    /// Returns `true` if a node with `id` exists on the page.
    #[must_use]
    pub fn contains(&self, id: NodeId) -> bool {
        self.node(id).is_some()
    }

    /// Returns the block rectangle of the node with `id`, if it exists.
    #[must_use]
    pub fn block_rect(&self, id: NodeId) -> Option<Rect> {
        self.node(id).map(|n| n.block_rect())
    }

    /// Returns the stored `parent_id` of a node, without validation.
    #[must_use]
    pub fn stored_parent(&self, id: NodeId) -> Option<NodeId> {
        self.node(id).and_then(|n| n.parent_id())
    }

    /// Returns the node's parent category id, degrading dangling references.
    ///
    /// A `parent_id` that does not resolve to an existing category on this
    /// page is treated as "no parent". This keeps the rest of the canvas
    /// functional when the store deletes a category without scrubbing every
    /// child reference first.
    #[must_use]
    pub fn resolved_parent(&self, id: NodeId) -> Option<NodeId> {
        let stored = self.stored_parent(id)?;
        if stored == id {
            log::debug!("node {id} is its own parent; treating as top-level");
            return None;
        }
        if self.category(stored).is_some() {
            Some(stored)
        } else {
            log::debug!("dangling parent {stored} on node {id}; treating as top-level");
            None
        }
    }

    /// Returns `true` if the node exists and has no resolvable parent.
    #[must_use]
    pub fn is_top_level(&self, id: NodeId) -> bool {
        self.contains(id) && self.resolved_parent(id).is_none()
    }

    /// Iterates the memos directly contained in `parent`.
    pub fn child_memos(&self, parent: NodeId) -> impl Iterator<Item = &Memo> {
        self.memos
            .iter()
            .filter(move |m| m.parent_id == Some(parent))
    }

    /// Iterates the categories directly contained in `parent`.
    pub fn child_categories(&self, parent: NodeId) -> impl Iterator<Item = &Category> {
        self.categories
            .iter()
            .filter(move |c| c.parent_id == Some(parent) && c.id != parent)
    }

    /// Returns `true` if `parent` directly contains any node.
    #[must_use]
    pub fn has_children(&self, parent: NodeId) -> bool {
        self.child_memos(parent).next().is_some() || self.child_categories(parent).next().is_some()
    }

    /// Returns the node's ancestor chain, nearest parent first.
    ///
    /// The walk is cycle-guarded: revisiting any id already on the chain (or
    /// the starting node itself) stops the walk with a diagnostic, so a
    /// corrupted parent graph can never hang an evaluation.
    #[must_use]
    pub fn ancestors(&self, id: NodeId) -> SmallVec<[NodeId; 8]> {
        let mut chain = AncestorChain::new();
        let mut current = id;
        while let Some(parent) = self.resolved_parent(current) {
            if parent == id || chain.contains(&parent) {
                log::warn!("parent chain cycle at {parent} while walking ancestors of {id}");
                break;
            }
            chain.push(parent);
            current = parent;
        }
        chain
    }

    /// Returns the nesting depth of a node: 0 for top-level nodes.
    #[must_use]
    pub fn depth(&self, id: NodeId) -> usize {
        self.ancestors(id).len()
    }

    /// Returns `true` if `ancestor` appears in `node`'s ancestor chain.
    #[must_use]
    pub fn is_ancestor(&self, ancestor: NodeId, node: NodeId) -> bool {
        self.ancestors(node).contains(&ancestor)
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec::Vec;

    use kurbo::Point;

    use super::*;

    fn id(raw: u64) -> NodeId {
        NodeId::new(raw)
    }

    fn nested_page() -> Page {
        // root > mid > (leaf memo), plus one top-level memo.
        let mut page = Page::new();
        page.categories
            .push(Category::new(id(1), Point::new(0.0, 0.0)));
        page.categories
            .push(Category::new(id(2), Point::new(50.0, 50.0)).with_parent(id(1)));
        page.memos
            .push(Memo::new(id(3), Point::new(60.0, 60.0)).with_parent(id(2)));
        page.memos.push(Memo::new(id(4), Point::new(500.0, 0.0)));
        page
    }

    #[test]
    fn lookup_and_kinds() {
        let page = nested_page();
        assert_eq!(page.node_kind(id(1)), Some(NodeKind::Category));
        assert_eq!(page.node_kind(id(3)), Some(NodeKind::Memo));
        assert_eq!(page.node_kind(id(99)), None);
        assert!(page.contains(id(4)));
    }

    #[test]
    fn children_are_derived_from_parent_refs() {
        let page = nested_page();
        let mids: Vec<NodeId> = page.child_categories(id(1)).map(|c| c.id).collect();
        assert_eq!(mids, [id(2)]);
        let leaves: Vec<NodeId> = page.child_memos(id(2)).map(|m| m.id).collect();
        assert_eq!(leaves, [id(3)]);
        assert!(!page.has_children(id(3)));
    }

    #[test]
    fn ancestors_and_depth() {
        let page = nested_page();
        assert_eq!(page.ancestors(id(3)).as_slice(), [id(2), id(1)]);
        assert_eq!(page.depth(id(3)), 2);
        assert_eq!(page.depth(id(4)), 0);
        assert!(page.is_ancestor(id(1), id(3)));
        assert!(!page.is_ancestor(id(2), id(4)));
    }

    #[test]
    fn dangling_parent_degrades_to_top_level() {
        let mut page = Page::new();
        page.memos
            .push(Memo::new(id(1), Point::ZERO).with_parent(id(42)));
        assert_eq!(page.stored_parent(id(1)), Some(id(42)));
        assert_eq!(page.resolved_parent(id(1)), None);
        assert!(page.is_top_level(id(1)));
    }

    #[test]
    fn parent_pointing_at_memo_degrades() {
        let mut page = Page::new();
        page.memos.push(Memo::new(id(1), Point::ZERO));
        page.memos
            .push(Memo::new(id(2), Point::ZERO).with_parent(id(1)));
        assert_eq!(page.resolved_parent(id(2)), None);
    }

    #[test]
    fn cyclic_parent_chain_terminates() {
        let mut page = Page::new();
        page.categories
            .push(Category::new(id(1), Point::ZERO).with_parent(id(2)));
        page.categories
            .push(Category::new(id(2), Point::ZERO).with_parent(id(1)));

        let chain = page.ancestors(id(1));
        assert_eq!(chain.as_slice(), [id(2)]);
        // Both directions terminate.
        assert_eq!(page.ancestors(id(2)).as_slice(), [id(1)]);
    }

    #[test]
    fn self_parent_terminates() {
        let mut page = Page::new();
        page.categories
            .push(Category::new(id(1), Point::ZERO).with_parent(id(1)));
        assert!(page.ancestors(id(1)).is_empty());
        assert_eq!(page.depth(id(1)), 0);
    }
}
