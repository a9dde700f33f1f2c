// Copyright 2025 the Thicket Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=thicket_route --heading-base-level=0

//! Thicket Route: connection anchors between moving rectangles.
//!
//! Every node exposes four anchor points: the edge midpoints of its
//! *effective* rectangle (a category showing an area uses the area rect,
//! everything else its block rect). An edge between two nodes picks one
//! anchor on each side with a deterministic dominant-axis rule, so lines
//! leave nodes from the side that faces their peer.
//!
//! Routes are recomputed from live rectangles on every evaluation and never
//! cached: as endpoints move or resize, edges continuously re-route.
//!
//! ## Anchor selection
//!
//! With `d = center_b − center_a`:
//!
//! - `|d.x| > |d.y|`: horizontal, `right/left` when `d.x > 0`, else
//!   `left/right`.
//! - otherwise vertical, `bottom/top` when `d.y > 0`, else `top/bottom`.
//!
//! ```
//! use kurbo::Rect;
//! use thicket_route::{AnchorSide, select_anchors};
//!
//! let a = Rect::new(-50.0, -50.0, 50.0, 50.0); // center (0, 0)
//! let b = Rect::new(50.0, -40.0, 150.0, 60.0); // center (100, 10)
//! assert_eq!(select_anchors(a, b), (AnchorSide::Right, AnchorSide::Left));
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

use alloc::vec::Vec;

use kurbo::{Point, Rect};
use thicket_area::{AreaCache, effective_rect};
use thicket_model::{EdgeKey, NodeId, Page};

/// One of the four cardinal attachment points on a node's effective rect.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum AnchorSide {
    /// Midpoint of the top edge.
    Top,
    /// Midpoint of the bottom edge.
    Bottom,
    /// Midpoint of the left edge.
    Left,
    /// Midpoint of the right edge.
    Right,
}

impl AnchorSide {
    /// The opposite side.
    #[must_use]
    pub const fn opposite(self) -> Self {
        match self {
            Self::Top => Self::Bottom,
            Self::Bottom => Self::Top,
            Self::Left => Self::Right,
            Self::Right => Self::Left,
        }
    }
}

/// Returns the anchor point for `side` on `rect`.
#[must_use]
pub fn anchor_point(rect: Rect, side: AnchorSide) -> Point {
    let center = rect.center();
    match side {
        AnchorSide::Top => Point::new(center.x, rect.y0),
        AnchorSide::Bottom => Point::new(center.x, rect.y1),
        AnchorSide::Left => Point::new(rect.x0, center.y),
        AnchorSide::Right => Point::new(rect.x1, center.y),
    }
}

/// Picks the anchor sides for an edge from `a` to `b`.
///
/// The dominant center-to-center axis decides horizontal vs. vertical; an
/// exact tie routes vertically. The two returned sides always face each
/// other.
#[must_use]
pub fn select_anchors(a: Rect, b: Rect) -> (AnchorSide, AnchorSide) {
    let d = b.center() - a.center();
    if d.x.abs() > d.y.abs() {
        if d.x > 0.0 {
            (AnchorSide::Right, AnchorSide::Left)
        } else {
            (AnchorSide::Left, AnchorSide::Right)
        }
    } else if d.y > 0.0 {
        (AnchorSide::Bottom, AnchorSide::Top)
    } else {
        (AnchorSide::Top, AnchorSide::Bottom)
    }
}

/// A routed connection between two nodes, ready to draw as a line.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ConnectionRoute {
    /// Canonical identity of the underlying edge.
    pub key: EdgeKey,
    /// Anchor point on the `key.lo()` endpoint.
    pub from: Point,
    /// Anchor side on the `key.lo()` endpoint.
    pub from_side: AnchorSide,
    /// Anchor point on the `key.hi()` endpoint.
    pub to: Point,
    /// Anchor side on the `key.hi()` endpoint.
    pub to_side: AnchorSide,
}

/// Routes the connection between two nodes from their current rects.
///
/// Returns `None` when either endpoint no longer exists on the page.
#[must_use]
pub fn route_connection(
    page: &Page,
    cache: &AreaCache,
    a: NodeId,
    b: NodeId,
) -> Option<ConnectionRoute> {
    let key = EdgeKey::new(a, b)?;
    let rect_lo = effective_rect(page, cache, key.lo())?;
    let rect_hi = effective_rect(page, cache, key.hi())?;
    let (from_side, to_side) = select_anchors(rect_lo, rect_hi);
    Some(ConnectionRoute {
        key,
        from: anchor_point(rect_lo, from_side),
        from_side,
        to: anchor_point(rect_hi, to_side),
        to_side,
    })
}

/// Routes every connection on the page exactly once, in canonical order.
///
/// Symmetric storage on both endpoints collapses to a single route per
/// edge; edges with a missing endpoint are skipped.
#[must_use]
pub fn route_all(page: &Page, cache: &AreaCache) -> Vec<ConnectionRoute> {
    page.connection_keys()
        .into_iter()
        .filter_map(|key| route_connection(page, cache, key.lo(), key.hi()))
        .collect()
}

#[cfg(test)]
mod tests {
    use kurbo::{Point, Size};
    use thicket_model::{Category, Memo};

    use super::*;

    fn id(raw: u64) -> NodeId {
        NodeId::new(raw)
    }

    fn centered_rect(center: Point) -> Rect {
        Rect::from_center_size(center, Size::new(20.0, 20.0))
    }

    #[test]
    fn horizontal_dominance_picks_right_left() {
        let a = centered_rect(Point::new(0.0, 0.0));
        let b = centered_rect(Point::new(100.0, 10.0));
        assert_eq!(select_anchors(a, b), (AnchorSide::Right, AnchorSide::Left));
        // And mirrored when the peer sits to the left.
        assert_eq!(select_anchors(b, a), (AnchorSide::Left, AnchorSide::Right));
    }

    #[test]
    fn vertical_dominance_picks_bottom_top() {
        let a = centered_rect(Point::new(0.0, 0.0));
        let b = centered_rect(Point::new(10.0, 100.0));
        assert_eq!(select_anchors(a, b), (AnchorSide::Bottom, AnchorSide::Top));
        assert_eq!(select_anchors(b, a), (AnchorSide::Top, AnchorSide::Bottom));
    }

    #[test]
    fn exact_tie_routes_vertically() {
        let a = centered_rect(Point::new(0.0, 0.0));
        let b = centered_rect(Point::new(50.0, 50.0));
        assert_eq!(select_anchors(a, b), (AnchorSide::Bottom, AnchorSide::Top));
    }

    #[test]
    fn anchor_points_are_edge_midpoints() {
        let r = Rect::new(0.0, 0.0, 100.0, 60.0);
        assert_eq!(anchor_point(r, AnchorSide::Top), Point::new(50.0, 0.0));
        assert_eq!(anchor_point(r, AnchorSide::Bottom), Point::new(50.0, 60.0));
        assert_eq!(anchor_point(r, AnchorSide::Left), Point::new(0.0, 30.0));
        assert_eq!(anchor_point(r, AnchorSide::Right), Point::new(100.0, 30.0));
    }

    #[test]
    fn route_uses_block_rects_for_memos() {
        let mut page = Page::new();
        page.memos
            .push(Memo::new(id(1), Point::ZERO).with_size(Size::new(100.0, 50.0)));
        page.memos.push(
            Memo::new(id(2), Point::new(300.0, 0.0)).with_size(Size::new(100.0, 50.0)),
        );
        page.connect(id(1), id(2));

        let cache = AreaCache::new();
        let route = route_connection(&page, &cache, id(2), id(1)).unwrap();
        // Canonicalized to lo = 1, hi = 2 regardless of argument order.
        assert_eq!(route.key.endpoints(), (id(1), id(2)));
        assert_eq!(route.from, Point::new(100.0, 25.0));
        assert_eq!(route.to, Point::new(300.0, 25.0));
    }

    #[test]
    fn expanded_category_routes_from_its_area() {
        let mut page = Page::new();
        page.categories.push(Category::new(id(1), Point::ZERO));
        page.memos.push(
            Memo::new(id(2), Point::ZERO)
                .with_size(Size::new(100.0, 100.0))
                .with_parent(id(1)),
        );
        page.memos.push(
            Memo::new(id(3), Point::new(400.0, 20.0)).with_size(Size::new(100.0, 60.0)),
        );
        page.connect(id(1), id(3));

        let cache = AreaCache::new();
        let route = route_connection(&page, &cache, id(1), id(3)).unwrap();
        // The category's area spans [-20, -20]..[120, 120]; its right anchor
        // sits on the area edge, not the block edge.
        assert_eq!(route.from, Point::new(120.0, 50.0));
        assert_eq!(route.from_side, AnchorSide::Right);
    }

    #[test]
    fn route_all_dedups_symmetric_connections() {
        let mut page = Page::new();
        page.memos.push(Memo::new(id(1), Point::ZERO));
        page.memos.push(Memo::new(id(2), Point::new(300.0, 0.0)));
        page.memos.push(Memo::new(id(3), Point::new(0.0, 300.0)));
        page.connect(id(1), id(2));
        page.connect(id(1), id(3));

        let routes = route_all(&page, &AreaCache::new());
        assert_eq!(routes.len(), 2);
    }

    #[test]
    fn missing_endpoint_is_skipped() {
        let mut page = Page::new();
        page.memos.push(Memo::new(id(1), Point::ZERO));
        assert!(route_connection(&page, &AreaCache::new(), id(1), id(9)).is_none());
    }

    #[test]
    fn routes_follow_moving_endpoints() {
        let mut page = Page::new();
        page.memos
            .push(Memo::new(id(1), Point::ZERO).with_size(Size::new(100.0, 50.0)));
        page.memos.push(
            Memo::new(id(2), Point::new(300.0, 0.0)).with_size(Size::new(100.0, 50.0)),
        );
        page.connect(id(1), id(2));
        let cache = AreaCache::new();

        let before = route_connection(&page, &cache, id(1), id(2)).unwrap();
        // Move the peer below: the route flips from horizontal to vertical.
        page.memos[1].position = Point::new(10.0, 400.0);
        let after = route_connection(&page, &cache, id(1), id(2)).unwrap();

        assert_eq!(before.from_side, AnchorSide::Right);
        assert_eq!(after.from_side, AnchorSide::Bottom);
    }
}
