// Copyright 2025 the Thicket Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Movement restriction against foreign category areas.

use kurbo::{Point, Rect};
use smallvec::SmallVec;
use thicket_area::AreaCache;
use thicket_model::{NodeId, Page};

bitflags::bitflags! {
    /// Movement directions currently blocked by a foreign area boundary.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    pub struct Directions: u8 {
        /// Decreasing x is blocked.
        const LEFT = 0b0000_0001;
        /// Increasing x is blocked.
        const RIGHT = 0b0000_0010;
        /// Decreasing y is blocked.
        const UP = 0b0000_0100;
        /// Increasing y is blocked.
        const DOWN = 0b0000_1000;
    }
}

/// Outcome of one movement-restriction evaluation.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct RestrictedMove {
    /// The position to actually apply, with blocked axes clamped.
    pub position: Point,
    /// Which directions were blocked for this move.
    pub directions: Directions,
}

impl RestrictedMove {
    fn free(position: Point) -> Self {
        Self {
            position,
            directions: Directions::empty(),
        }
    }
}

/// Strict overlap: shared edges do not count, so a node may slide flush
/// along an area boundary.
fn overlaps(a: Rect, b: Rect) -> bool {
    !a.intersect(b).is_zero_area()
}

/// Clamps a proposed move of a top-level node against foreign areas.
///
/// The restriction is evaluated fresh on every move; nothing is sticky.
/// Each axis is probed independently (`x` at `(proposed.x, prev.y)`, `y` at
/// `(prev.x, proposed.y)`) and blocked only when the probe *newly* overlaps
/// an area the node was not already overlapping at `prev`; a node that
/// starts out overlapping keeps its freedom to move out. A diagonal move
/// whose axes are individually clear but which lands in an area corner
/// blocks both moving axes.
///
/// Nodes that are not top-level pass through untouched: membership changes
/// for contained nodes go through explicit category operations, never
/// implicit collision. The reparent-modifier bypass lives in the engine; by
/// the time this function runs, the move is known to be a plain drag.
#[must_use]
pub fn restrict_movement(
    page: &Page,
    cache: &AreaCache,
    node_id: NodeId,
    prev: Point,
    proposed: Point,
) -> RestrictedMove {
    let Some(node) = page.node(node_id) else {
        return RestrictedMove::free(proposed);
    };
    if !page.is_top_level(node_id) {
        return RestrictedMove::free(proposed);
    }

    let size = node.block_rect().size();
    let rect_at = |p: Point| Rect::from_origin_size(p, size);

    // Areas the node could collide with: every expanded category except the
    // node itself and its own descendants (their areas travel with it).
    let mut foreign: SmallVec<[Rect; 8]> = SmallVec::new();
    for category in &page.categories {
        if category.id == node_id || !category.is_expanded {
            continue;
        }
        if page.is_ancestor(node_id, category.id) {
            continue;
        }
        if let Some(area) = cache.display_area(page, category.id) {
            foreign.push(area);
        }
    }
    if foreign.is_empty() {
        return RestrictedMove::free(proposed);
    }

    let prev_rect = rect_at(prev);
    let newly_hits = |probe: Rect| {
        foreign
            .iter()
            .any(|&area| overlaps(probe, area) && !overlaps(prev_rect, area))
    };

    let dx = proposed.x - prev.x;
    let dy = proposed.y - prev.y;

    let x_blocked = dx != 0.0 && newly_hits(rect_at(Point::new(proposed.x, prev.y)));
    let y_blocked = dy != 0.0 && newly_hits(rect_at(Point::new(prev.x, proposed.y)));

    let mut directions = Directions::empty();
    if x_blocked {
        directions |= if dx > 0.0 {
            Directions::RIGHT
        } else {
            Directions::LEFT
        };
    }
    if y_blocked {
        directions |= if dy > 0.0 {
            Directions::DOWN
        } else {
            Directions::UP
        };
    }

    let mut position = Point::new(
        if x_blocked { prev.x } else { proposed.x },
        if y_blocked { prev.y } else { proposed.y },
    );

    // Diagonal corner case: each axis alone is clear but the combined move
    // still lands inside an area. Block both moving axes.
    if directions.is_empty() && position != prev && newly_hits(rect_at(position)) {
        if dx > 0.0 {
            directions |= Directions::RIGHT;
        } else if dx < 0.0 {
            directions |= Directions::LEFT;
        }
        if dy > 0.0 {
            directions |= Directions::DOWN;
        } else if dy < 0.0 {
            directions |= Directions::UP;
        }
        position = prev;
    }

    RestrictedMove {
        position,
        directions,
    }
}
