// Copyright 2025 the Thicket Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Drop-target resolution and reparent validation.

use core::fmt;

use kurbo::{Point, Rect};
use thicket_area::AreaCache;
use thicket_model::{NodeId, Page};

/// Error describing why a reparent request was rejected.
///
/// The interaction layer converts every rejection into a silent no-op; the
/// enum exists so hosts and tests can assert on the reason.
#[derive(Copy, Clone, PartialEq, Eq)]
pub enum ReparentError {
    /// The node would become its own parent.
    IntoSelf {
        /// The node being reparented.
        node: NodeId,
    },
    /// The target sits inside the node's own subtree, so the change would
    /// make the node its own ancestor.
    WouldCreateCycle {
        /// The node being reparented.
        node: NodeId,
        /// The requested target container.
        target: NodeId,
    },
    /// The target is not a category on this page.
    TargetMissing {
        /// The requested target container.
        target: NodeId,
    },
}

impl fmt::Debug for ReparentError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::IntoSelf { node } => write!(f, "IntoSelf {{ node: {node} }}"),
            Self::WouldCreateCycle { node, target } => {
                write!(f, "WouldCreateCycle {{ node: {node}, target: {target} }}")
            }
            Self::TargetMissing { target } => write!(f, "TargetMissing {{ target: {target} }}"),
        }
    }
}

impl fmt::Display for ReparentError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::IntoSelf { node } => write!(f, "cannot nest {node} inside itself"),
            Self::WouldCreateCycle { node, target } => write!(
                f,
                "nesting {node} under {target} would make it its own ancestor"
            ),
            Self::TargetMissing { target } => {
                write!(f, "reparent target {target} is not a category on this page")
            }
        }
    }
}

impl core::error::Error for ReparentError {}

/// Inclusive point-in-rect test: boundary points count as inside.
fn contains_inclusive(rect: Rect, p: Point) -> bool {
    p.x >= rect.x0 && p.x <= rect.x1 && p.y >= rect.y0 && p.y <= rect.y1
}

/// Resolves which category the pointer is hovering as a drop target.
///
/// Candidates are the expanded categories on the page, read through the
/// cache so an active reparent snapshot stays authoritative for the whole
/// gesture. The dragged node itself and its *current* parent are excluded:
/// dropping on the current parent would change nothing, and the node can
/// never nest inside itself. When several areas contain the pointer the
/// deepest (most specific) container wins; ties keep the first match in
/// page order.
///
/// The result is an affordance: nothing is mutated until the gesture
/// releases and the choice passes [`validate_reparent`].
#[must_use]
pub fn resolve_drop_target(
    page: &Page,
    cache: &AreaCache,
    pointer: Point,
    dragged: NodeId,
) -> Option<NodeId> {
    let current_parent = page.resolved_parent(dragged);
    let mut best: Option<(NodeId, usize)> = None;

    for category in &page.categories {
        if !category.is_expanded
            || category.id == dragged
            || Some(category.id) == current_parent
        {
            continue;
        }
        let Some(area) = cache.display_area(page, category.id) else {
            continue;
        };
        if !contains_inclusive(area, pointer) {
            continue;
        }
        let depth = page.depth(category.id);
        match best {
            Some((_, best_depth)) if depth <= best_depth => {}
            _ => best = Some((category.id, depth)),
        }
    }

    best.map(|(id, _)| id)
}

/// Checks that setting `node`'s parent to `target` keeps the forest a forest.
///
/// Walks the target's ancestor chain (cycle-guarded by the page) and rejects
/// the change if `node` appears on it or `target` is `node` itself.
pub fn validate_reparent(page: &Page, node: NodeId, target: NodeId) -> Result<(), ReparentError> {
    if node == target {
        return Err(ReparentError::IntoSelf { node });
    }
    if page.category(target).is_none() {
        return Err(ReparentError::TargetMissing { target });
    }
    if page.is_ancestor(node, target) {
        return Err(ReparentError::WouldCreateCycle { node, target });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use thicket_model::{Category, Memo};

    use super::*;

    fn id(raw: u64) -> NodeId {
        NodeId::new(raw)
    }

    /// Outer category containing an inner one, both expanded with content,
    /// plus a free memo to drag around.
    fn nested_page() -> Page {
        let mut page = Page::new();
        page.categories.push(Category::new(id(1), Point::ZERO));
        page.categories
            .push(Category::new(id(2), Point::new(60.0, 60.0)).with_parent(id(1)));
        page.memos
            .push(Memo::new(id(3), Point::new(80.0, 80.0)).with_parent(id(2)));
        page.memos
            .push(Memo::new(id(4), Point::new(900.0, 0.0)));
        page
    }

    fn snapshot(page: &Page) -> AreaCache {
        let mut cache = AreaCache::new();
        cache.begin_reparent_snapshot(page);
        cache
    }

    #[test]
    fn deepest_containing_category_wins() {
        let page = nested_page();
        let cache = snapshot(&page);
        // A point inside the inner category's area is inside the outer's
        // area too; the inner (deeper) one is the more specific target.
        let inner = cache.display_area(&page, id(2)).unwrap();
        let target = resolve_drop_target(&page, &cache, inner.center(), id(4));
        assert_eq!(target, Some(id(2)));
    }

    #[test]
    fn outer_ring_resolves_to_outer_category() {
        let page = nested_page();
        let cache = snapshot(&page);
        let outer = cache.display_area(&page, id(1)).unwrap();
        // Just inside the outer area's top-left corner, far from the inner.
        let probe = Point::new(outer.x0 + 1.0, outer.y0 + 1.0);
        assert_eq!(resolve_drop_target(&page, &cache, probe, id(4)), Some(id(1)));
    }

    #[test]
    fn empty_space_resolves_to_none() {
        let page = nested_page();
        let cache = snapshot(&page);
        assert_eq!(
            resolve_drop_target(&page, &cache, Point::new(5000.0, 5000.0), id(4)),
            None,
        );
    }

    #[test]
    fn current_parent_is_excluded() {
        let page = nested_page();
        let cache = snapshot(&page);
        // Dragging the memo that already lives in the inner category: a
        // pointer inside the inner area falls through to the outer one.
        let inner = cache.display_area(&page, id(2)).unwrap();
        let target = resolve_drop_target(&page, &cache, inner.center(), id(3));
        assert_eq!(target, Some(id(1)));
    }

    #[test]
    fn dragged_category_is_not_its_own_target() {
        let page = nested_page();
        let cache = snapshot(&page);
        let inner = cache.display_area(&page, id(2)).unwrap();
        // Dragging the inner category over its own area: itself and its
        // current parent (the outer category) are both excluded, leaving no
        // candidate at this point.
        assert_eq!(resolve_drop_target(&page, &cache, inner.center(), id(2)), None);
    }

    #[test]
    fn area_boundary_is_inclusive() {
        let page = nested_page();
        let cache = snapshot(&page);
        let outer = cache.display_area(&page, id(1)).unwrap();
        let on_edge = Point::new(outer.x1, outer.y0);
        assert_eq!(
            resolve_drop_target(&page, &cache, on_edge, id(4)),
            Some(id(1)),
        );
    }

    #[test]
    fn validate_rejects_self() {
        let page = nested_page();
        assert_eq!(
            validate_reparent(&page, id(1), id(1)),
            Err(ReparentError::IntoSelf { node: id(1) }),
        );
    }

    #[test]
    fn validate_rejects_descendant_target() {
        let page = nested_page();
        // Nesting the outer category under its own child.
        assert_eq!(
            validate_reparent(&page, id(1), id(2)),
            Err(ReparentError::WouldCreateCycle {
                node: id(1),
                target: id(2),
            }),
        );
    }

    #[test]
    fn validate_rejects_missing_target() {
        let page = nested_page();
        assert_eq!(
            validate_reparent(&page, id(4), id(42)),
            Err(ReparentError::TargetMissing { target: id(42) }),
        );
    }

    #[test]
    fn validate_accepts_lateral_moves() {
        let page = nested_page();
        assert_eq!(validate_reparent(&page, id(4), id(2)), Ok(()));
        assert_eq!(validate_reparent(&page, id(2), id(1)), Ok(()));
    }
}
