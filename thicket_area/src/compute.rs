// Copyright 2025 the Thicket Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Recursive area derivation.

use hashbrown::HashSet;
use kurbo::Rect;
use thicket_model::{Category, NodeId, NodeKind, Page};

use crate::AreaCache;

/// Padding added to every side of a non-empty area union, in world units.
pub const AREA_PADDING: f64 = 20.0;

/// Marker for a parent-chain cycle discovered mid-traversal.
struct CycleDetected;

/// Computes the bounding area of a category, if it has one.
///
/// The union gathers, for the category's direct children: memo block rects,
/// child category block rects, and each child category's own recursively
/// computed area. A non-empty union is inflated by [`AREA_PADDING`] on all
/// four sides. A collapsed category gathers nothing (its contents are not
/// visible), so it only ever contributes its block rect to an ancestor.
///
/// Returns `None` when there is nothing to bound, with one exception: a
/// *nested* category (one whose `parent_id` resolves) reports its block rect
/// as a minimal tag-sized footprint, so it stays visible inside its expanded
/// ancestor even when empty.
///
/// The traversal carries an explicit visited set. Because every node has at
/// most one parent, re-entering a visited category proves the starting
/// category itself sits on a parent cycle, so the whole call degrades to
/// `None` with a diagnostic rather than returning a half-built union.
#[must_use]
pub fn compute_area(page: &Page, category_id: NodeId) -> Option<Rect> {
    let category = page.category(category_id)?;
    let mut visited: HashSet<NodeId> = HashSet::new();
    match area_of(page, category, &mut visited) {
        Ok(area) => area,
        Err(CycleDetected) => {
            log::warn!("containment cycle through {category_id}; area degraded to none");
            None
        }
    }
}

fn area_of(
    page: &Page,
    category: &Category,
    visited: &mut HashSet<NodeId>,
) -> Result<Option<Rect>, CycleDetected> {
    if !visited.insert(category.id) {
        return Err(CycleDetected);
    }

    let mut union: Option<Rect> = None;
    if category.is_expanded {
        for memo in page.child_memos(category.id) {
            accumulate(&mut union, memo.block_rect());
        }
        for child in page.child_categories(category.id) {
            accumulate(&mut union, child.block_rect());
            if let Some(area) = area_of(page, child, visited)? {
                accumulate(&mut union, area);
            }
        }
    }

    Ok(match union {
        Some(u) => Some(u.inflate(AREA_PADDING, AREA_PADDING)),
        None if page.resolved_parent(category.id).is_some() => Some(category.block_rect()),
        None => None,
    })
}

fn accumulate(union: &mut Option<Rect>, rect: Rect) {
    *union = Some(match *union {
        Some(u) => u.union(rect),
        None => rect,
    });
}

/// Returns the rectangle a node currently occupies for interaction purposes.
///
/// An expanded category with a (cached or live) area occupies that area;
/// every other node occupies its block rect. Anchor routing, marquee hit
/// testing, and hover resolution all read this rect.
#[must_use]
pub fn effective_rect(page: &Page, cache: &AreaCache, id: NodeId) -> Option<Rect> {
    match page.node_kind(id)? {
        NodeKind::Memo => page.block_rect(id),
        NodeKind::Category => cache
            .display_area(page, id)
            .or_else(|| page.block_rect(id)),
    }
}
