// Copyright 2025 the Thicket Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Gesture-scoped area caching.

use hashbrown::HashMap;
use kurbo::{Point, Rect};
use thicket_model::{NodeId, Page};

use crate::compute_area;

/// A plain-drag entry: the area as it looked at drag start, plus the
/// position it was captured at.
#[derive(Copy, Clone, Debug)]
struct FrozenArea {
    rect: Option<Rect>,
    origin: Point,
}

/// Drag stabilizer for category areas.
///
/// Without caching, dragging a node recomputes its category's area on every
/// move, the recomputed area shifts the layout, and the shifted layout moves
/// the node under the pointer: a visible feedback loop. The cache breaks it
/// with two gesture-scoped modes:
///
/// - **Plain-drag entries** ([`AreaCache::begin_drag`]): the dragged
///   category's area is captured once and afterwards only *translated* by
///   the category's position delta. Its size cannot change mid-drag.
/// - **Reparent snapshot** ([`AreaCache::begin_reparent_snapshot`]): on
///   entering a modifier drag, the areas of *all* expanded categories are
///   captured at once, because a reparent can change any sibling
///   container's membership. The snapshot is authoritative for the rest of
///   the gesture.
///
/// Resolution order for [`AreaCache::display_area`] is plain entry, then
/// snapshot, then a live [`compute_area`] call. Both modes are cleared
/// atomically by [`AreaCache::commit`] when the gesture ends; there are no
/// timers involved. Switching the modifier mid-gesture only adds or drops
/// the snapshot; plain entries survive, so the in-progress drag delta is
/// never lost.
#[derive(Clone, Debug, Default)]
pub struct AreaCache {
    plain: HashMap<NodeId, FrozenArea>,
    snapshot: Option<HashMap<NodeId, Rect>>,
}

impl AreaCache {
    /// Creates an empty cache.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` if neither cache mode holds any entry.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.plain.is_empty() && self.snapshot.is_none()
    }

    /// Returns `true` if a reparent snapshot is active.
    #[must_use]
    pub fn has_snapshot(&self) -> bool {
        self.snapshot.is_some()
    }

    /// Freezes a category's area for a plain drag.
    ///
    /// A second call for the same id during a gesture is a no-op: the first
    /// capture stays authoritative until [`AreaCache::commit`] or
    /// [`AreaCache::invalidate`].
    pub fn begin_drag(&mut self, page: &Page, id: NodeId) {
        if self.plain.contains_key(&id) {
            return;
        }
        let Some(category) = page.category(id) else {
            return;
        };
        self.plain.insert(
            id,
            FrozenArea {
                rect: compute_area(page, id),
                origin: category.position,
            },
        );
    }

    /// Captures the areas of every expanded category for a modifier drag.
    ///
    /// Replaces any previous snapshot. Categories without an area are simply
    /// absent from the snapshot.
    pub fn begin_reparent_snapshot(&mut self, page: &Page) {
        let mut snap = HashMap::new();
        for category in &page.categories {
            if !category.is_expanded {
                continue;
            }
            if let Some(rect) = compute_area(page, category.id) {
                snap.insert(category.id, rect);
            }
        }
        self.snapshot = Some(snap);
    }

    /// Drops the reparent snapshot (modifier released mid-gesture).
    ///
    /// Plain entries are untouched, so a drag that continues without the
    /// modifier keeps its frozen rect and accumulated delta.
    pub fn drop_snapshot(&mut self) {
        self.snapshot = None;
    }

    /// Iterates the snapshot's `(category, area)` pairs, if one is active.
    pub fn snapshot_areas(&self) -> Option<impl Iterator<Item = (NodeId, Rect)> + '_> {
        self.snapshot
            .as_ref()
            .map(|snap| snap.iter().map(|(&id, &rect)| (id, rect)))
    }

    /// Returns the area to display for a category right now.
    ///
    /// Falls back to a live computation for categories in neither cache, so
    /// idle rendering needs no bookkeeping at all.
    #[must_use]
    pub fn display_area(&self, page: &Page, id: NodeId) -> Option<Rect> {
        if let Some(entry) = self.plain.get(&id) {
            let position = page.category(id).map_or(entry.origin, |c| c.position);
            return entry.rect.map(|r| r + (position - entry.origin));
        }
        if let Some(snap) = &self.snapshot
            && let Some(&rect) = snap.get(&id)
        {
            return Some(rect);
        }
        compute_area(page, id)
    }

    /// Drops a single plain entry, forcing live recomputation for that id.
    pub fn invalidate(&mut self, id: NodeId) {
        self.plain.remove(&id);
    }

    /// Clears both cache modes atomically.
    ///
    /// Called once when the owning gesture releases; the next evaluation
    /// sees live areas everywhere.
    pub fn commit(&mut self) {
        self.plain.clear();
        self.snapshot = None;
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec::Vec;

    use kurbo::{Size, Vec2};
    use thicket_model::{Category, Memo};

    use super::*;

    fn id(raw: u64) -> NodeId {
        NodeId::new(raw)
    }

    /// One expanded category holding one memo, so it has a live area.
    fn page_with_area() -> Page {
        let mut page = Page::new();
        page.categories.push(Category::new(id(1), Point::ZERO));
        page.memos.push(
            Memo::new(id(2), Point::new(0.0, 0.0))
                .with_size(Size::new(100.0, 50.0))
                .with_parent(id(1)),
        );
        page
    }

    #[test]
    fn uncached_category_resolves_live() {
        let page = page_with_area();
        let cache = AreaCache::new();
        assert_eq!(cache.display_area(&page, id(1)), compute_area(&page, id(1)));
    }

    #[test]
    fn plain_drag_translates_without_resizing() {
        let mut page = page_with_area();
        let mut cache = AreaCache::new();
        cache.begin_drag(&page, id(1));
        let frozen = cache.display_area(&page, id(1)).unwrap();

        // The category moves; a child memo also wanders far away, which
        // would grow a live area. The displayed rect only translates.
        page.categories[0].position = Point::new(30.0, -10.0);
        page.memos[0].position = Point::new(900.0, 900.0);

        let shown = cache.display_area(&page, id(1)).unwrap();
        assert_eq!(shown.size(), frozen.size());
        assert_eq!(shown.origin(), frozen.origin() + Vec2::new(30.0, -10.0));
    }

    #[test]
    fn begin_drag_is_idempotent_per_gesture() {
        let mut page = page_with_area();
        let mut cache = AreaCache::new();
        cache.begin_drag(&page, id(1));
        let first = cache.display_area(&page, id(1)).unwrap();

        // A repeated begin with the page mid-mutation must not recapture.
        page.memos[0].position = Point::new(500.0, 500.0);
        cache.begin_drag(&page, id(1));
        assert_eq!(cache.display_area(&page, id(1)).unwrap().size(), first.size());
    }

    #[test]
    fn commit_restores_live_resolution() {
        let mut page = page_with_area();
        let mut cache = AreaCache::new();
        cache.begin_drag(&page, id(1));
        page.memos[0].position = Point::new(400.0, 0.0);

        cache.commit();
        assert!(cache.is_empty());
        assert_eq!(cache.display_area(&page, id(1)), compute_area(&page, id(1)));
    }

    #[test]
    fn snapshot_covers_all_expanded_categories() {
        let mut page = page_with_area();
        page.categories.push(Category::new(id(3), Point::new(600.0, 0.0)));
        page.memos
            .push(Memo::new(id(4), Point::new(600.0, 0.0)).with_parent(id(3)));
        // Collapsed categories are excluded.
        page.categories
            .push(Category::new(id(5), Point::new(1200.0, 0.0)).expanded(false));
        page.memos
            .push(Memo::new(id(6), Point::new(1200.0, 0.0)).with_parent(id(5)));

        let mut cache = AreaCache::new();
        cache.begin_reparent_snapshot(&page);
        let ids: Vec<NodeId> = cache.snapshot_areas().unwrap().map(|(id, _)| id).collect();
        assert!(ids.contains(&id(1)));
        assert!(ids.contains(&id(3)));
        assert!(!ids.contains(&id(5)));
    }

    #[test]
    fn snapshot_is_authoritative_until_dropped() {
        let mut page = page_with_area();
        let mut cache = AreaCache::new();
        cache.begin_reparent_snapshot(&page);
        let before = cache.display_area(&page, id(1)).unwrap();

        page.memos[0].position = Point::new(700.0, 700.0);
        assert_eq!(cache.display_area(&page, id(1)).unwrap(), before);

        cache.drop_snapshot();
        assert_ne!(cache.display_area(&page, id(1)).unwrap(), before);
    }

    #[test]
    fn plain_entry_wins_over_snapshot() {
        let mut page = page_with_area();
        let mut cache = AreaCache::new();
        cache.begin_drag(&page, id(1));
        cache.begin_reparent_snapshot(&page);

        page.categories[0].position = Point::new(50.0, 0.0);
        let shown = cache.display_area(&page, id(1)).unwrap();
        // Snapshot rects do not translate; the plain entry does, proving it
        // resolved first.
        assert_eq!(shown.origin().x, compute_area(&page_with_area(), id(1)).unwrap().x0 + 50.0);
    }

    #[test]
    fn dragged_category_without_area_stays_arealess() {
        let mut page = Page::new();
        page.categories.push(Category::new(id(1), Point::ZERO));
        let mut cache = AreaCache::new();
        cache.begin_drag(&page, id(1));
        page.categories[0].position = Point::new(10.0, 10.0);
        assert_eq!(cache.display_area(&page, id(1)), None);
    }
}
