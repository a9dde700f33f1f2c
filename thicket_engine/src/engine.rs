// Copyright 2025 the Thicket Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The gesture state machine and mutation emission.

use alloc::vec::Vec;

use kurbo::{Point, Rect, Size, Vec2};
use thicket_area::{AreaCache, compute_area, effective_rect};
use thicket_containment::{
    Directions, resolve_drop_target, restrict_movement, validate_reparent,
};
use thicket_gesture::{DragTracker, DragUpdate, Marquee, Modifiers, Tool, ToolState};
use thicket_model::{NodeId, Page};
use thicket_route::{ConnectionRoute, route_all, route_connection};
use thicket_selection::Selection;
use thicket_view::Viewport;

use crate::events::{EngineEvent, PointerEvent};

/// Hover recomputation is bounded to once per this many milliseconds while
/// the pointer streams move events. Throttling bounds work, not behavior:
/// the cached target stays exposed between evaluations.
const HOVER_THROTTLE_MS: u64 = 50;

/// Inclusive point-in-rect test; area boundaries count as inside.
fn point_in_rect(rect: Rect, p: Point) -> bool {
    p.x >= rect.x0 && p.x <= rect.x1 && p.y >= rect.y0 && p.y <= rect.y1
}

/// What a pointer-down landed on.
enum Hit {
    /// A memo block or a category block/tag.
    Node(NodeId),
    /// The background of an expanded category's area (not a block inside it).
    AreaBackground(NodeId),
    /// Empty canvas.
    Empty,
}

/// Live state of a node drag.
#[derive(Copy, Clone, Debug)]
struct DragNode {
    id: NodeId,
    start_position: Point,
    tracker: DragTracker,
    reparent_mode: bool,
    /// The position last emitted (or the start position): restriction
    /// clamps against this, not against whatever the store applied.
    last_applied: Point,
}

/// The currently owning gesture, if any.
enum Gesture {
    Idle,
    /// Button down on a node; click until the drag threshold is crossed.
    ArmedNode {
        id: NodeId,
        start_position: Point,
        down_modifiers: Modifiers,
        tracker: DragTracker,
    },
    /// A node drag in progress (plain or reparent mode).
    DragNode(DragNode),
    /// Button down on background; click-clears until the threshold is crossed.
    ArmedCanvas { tracker: DragTracker, extend: bool },
    /// Rubber-band selection in progress.
    Marquee { marquee: Marquee, hits: Vec<NodeId> },
    /// Viewport pan in progress.
    Pan { last_screen: Point },
    /// Drag-zoom in progress, anchored where the gesture started.
    ZoomDrag { last_screen: Point, anchor: Point },
}

/// The canvas interaction engine.
///
/// One engine instance owns the tool state, the single active gesture, the
/// area cache, and the selection. Everything else (the page, the viewport,
/// and the application of emitted mutations) belongs to the host.
pub struct Engine {
    tools: ToolState,
    gesture: Gesture,
    cache: AreaCache,
    selection: Selection,
    modifiers: Modifiers,
    drop_target: Option<NodeId>,
    restricted: Directions,
    last_hover_ms: Option<u64>,
}

impl Default for Engine {
    fn default() -> Self {
        Self::new()
    }
}

impl Engine {
    /// Creates an idle engine with the select tool active.
    #[must_use]
    pub fn new() -> Self {
        Self {
            tools: ToolState::new(Tool::Select),
            gesture: Gesture::Idle,
            cache: AreaCache::new(),
            selection: Selection::new(),
            modifiers: Modifiers::empty(),
            drop_target: None,
            restricted: Directions::empty(),
            last_hover_ms: None,
        }
    }

    // -------------------------------------------------------------------
    // Query surface
    // -------------------------------------------------------------------

    /// The tool currently in effect, transient overrides included.
    #[must_use]
    pub fn tool(&self) -> Tool {
        self.tools.effective()
    }

    /// The persisted base tool.
    #[must_use]
    pub fn base_tool(&self) -> Tool {
        self.tools.base()
    }

    /// Sets the persisted base tool.
    pub fn set_base_tool(&mut self, tool: Tool) {
        self.tools.set_base(tool);
    }

    /// The current selection.
    #[must_use]
    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    /// The category currently resolved as the reparent drop target.
    #[must_use]
    pub fn drop_target(&self) -> Option<NodeId> {
        self.drop_target
    }

    /// Directions currently blocked for a node being plainly dragged.
    ///
    /// Empty for every node except the one owning the active drag.
    #[must_use]
    pub fn restricted_directions(&self, id: NodeId) -> Directions {
        match &self.gesture {
            Gesture::DragNode(drag) if drag.id == id => self.restricted,
            _ => Directions::empty(),
        }
    }

    /// The marquee rectangle, while a marquee gesture is active.
    #[must_use]
    pub fn marquee_rect(&self) -> Option<Rect> {
        match &self.gesture {
            Gesture::Marquee { marquee, .. } => Some(marquee.rect()),
            _ => None,
        }
    }

    /// The ids the active marquee currently covers, for live affordance.
    #[must_use]
    pub fn marquee_preview(&self) -> &[NodeId] {
        match &self.gesture {
            Gesture::Marquee { hits, .. } => hits,
            _ => &[],
        }
    }

    /// Returns `true` while any gesture owns the pointer.
    #[must_use]
    pub fn is_gesture_active(&self) -> bool {
        !matches!(self.gesture, Gesture::Idle)
    }

    /// The area to display for a category, stabilized during gestures.
    #[must_use]
    pub fn display_area(&self, page: &Page, id: NodeId) -> Option<Rect> {
        self.cache.display_area(page, id)
    }

    /// A category's live area, bypassing gesture stabilization.
    #[must_use]
    pub fn live_area(&self, page: &Page, id: NodeId) -> Option<Rect> {
        compute_area(page, id)
    }

    /// The rectangle a node occupies for routing and hit testing.
    #[must_use]
    pub fn effective_rect(&self, page: &Page, id: NodeId) -> Option<Rect> {
        effective_rect(page, &self.cache, id)
    }

    /// Routes the connection between two nodes from current rects.
    #[must_use]
    pub fn connection_route(
        &self,
        page: &Page,
        a: NodeId,
        b: NodeId,
    ) -> Option<ConnectionRoute> {
        route_connection(page, &self.cache, a, b)
    }

    /// Routes every connection on the page, deduplicated.
    #[must_use]
    pub fn routes(&self, page: &Page) -> Vec<ConnectionRoute> {
        route_all(page, &self.cache)
    }

    // -------------------------------------------------------------------
    // Commands outside the gesture state machine
    // -------------------------------------------------------------------

    /// Proposes a new block size for a node.
    ///
    /// Degenerate sizes (non-finite, zero, or negative extents) are dropped
    /// with a diagnostic instead of propagating.
    #[must_use]
    pub fn resize_node(&self, page: &Page, id: NodeId, size: Size) -> Vec<EngineEvent> {
        let mut events = Vec::new();
        if !page.contains(id) {
            return events;
        }
        if !(size.width.is_finite() && size.height.is_finite())
            || size.width <= 0.0
            || size.height <= 0.0
        {
            log::debug!("ignoring degenerate resize of {id} to {size:?}");
            return events;
        }
        events.push(EngineEvent::SizeChanged { id, size });
        events
    }

    /// Toggles the connection between two nodes.
    ///
    /// Self-connections and missing endpoints are silent no-ops.
    #[must_use]
    pub fn toggle_connection(&self, page: &Page, a: NodeId, b: NodeId) -> Vec<EngineEvent> {
        let mut events = Vec::new();
        if a == b || !page.contains(a) || !page.contains(b) {
            return events;
        }
        if page.are_connected(a, b) {
            events.push(EngineEvent::ConnectionRemoved { a, b });
        } else {
            events.push(EngineEvent::ConnectionAdded { a, b });
        }
        events
    }

    // -------------------------------------------------------------------
    // Event entry points
    // -------------------------------------------------------------------

    /// Records a modifier-state change from the keyboard.
    ///
    /// Space/alt feed the tool overrides; flipping the reparent modifier
    /// mid-drag switches the active drag between plain and reparent mode
    /// without losing the accumulated movement.
    pub fn key_modifiers(
        &mut self,
        page: &Page,
        modifiers: Modifiers,
        time_ms: u64,
    ) -> Vec<EngineEvent> {
        self.apply_modifiers(modifiers);

        match core::mem::replace(&mut self.gesture, Gesture::Idle) {
            Gesture::DragNode(mut drag) => {
                let world = drag.tracker.last_world();
                self.sync_reparent_mode(page, &mut drag, world, time_ms);
                self.gesture = Gesture::DragNode(drag);
            }
            other => self.gesture = other,
        }
        Vec::new()
    }

    /// Handles a pointer-down.
    ///
    /// Ignored while another gesture is active: exactly one drag-affecting
    /// gesture may own the pointer at a time.
    pub fn pointer_down(
        &mut self,
        page: &Page,
        view: &Viewport,
        ev: PointerEvent,
    ) -> Vec<EngineEvent> {
        if self.is_gesture_active() {
            return Vec::new();
        }
        self.apply_modifiers(ev.modifiers);

        let screen = ev.screen;
        let world = view.screen_to_world_point(screen);
        match self.tool() {
            Tool::Pan => {
                self.gesture = Gesture::Pan {
                    last_screen: screen,
                };
            }
            Tool::Zoom => {
                self.gesture = Gesture::ZoomDrag {
                    last_screen: screen,
                    anchor: screen,
                };
            }
            Tool::Select => {
                let tracker = DragTracker::arm(screen, world);
                match self.hit_test(page, world) {
                    Hit::Node(id) => self.arm_node(page, id, ev.modifiers, tracker),
                    // A selected category's area background drags the
                    // category; an unselected one is marquee territory.
                    Hit::AreaBackground(id) if self.selection.contains(id) => {
                        self.arm_node(page, id, ev.modifiers, tracker);
                    }
                    Hit::AreaBackground(_) | Hit::Empty => {
                        self.gesture = Gesture::ArmedCanvas {
                            tracker,
                            extend: ev.modifiers.contains(Modifiers::EXTEND),
                        };
                    }
                }
            }
        }
        Vec::new()
    }

    /// Handles a pointer move.
    pub fn pointer_move(
        &mut self,
        page: &Page,
        view: &Viewport,
        ev: PointerEvent,
    ) -> Vec<EngineEvent> {
        self.apply_modifiers(ev.modifiers);

        let mut events = Vec::new();
        let screen = ev.screen;
        let world = view.screen_to_world_point(screen);

        match core::mem::replace(&mut self.gesture, Gesture::Idle) {
            Gesture::Idle => {}
            Gesture::Pan { last_screen } => {
                let delta = screen - last_screen;
                if delta != Vec2::ZERO {
                    events.push(EngineEvent::ViewportChanged {
                        offset: view.offset + delta,
                        scale: view.scale,
                    });
                }
                self.gesture = Gesture::Pan {
                    last_screen: screen,
                };
            }
            Gesture::ZoomDrag {
                last_screen,
                anchor,
            } => {
                let dy = screen.y - last_screen.y;
                if dy != 0.0 {
                    let mut next = *view;
                    let factor = (1.0 - dy * 0.005).clamp(0.2, 5.0);
                    next.zoom_about_screen_point(anchor, factor);
                    if next != *view {
                        events.push(EngineEvent::ViewportChanged {
                            offset: next.offset,
                            scale: next.scale,
                        });
                    }
                }
                self.gesture = Gesture::ZoomDrag {
                    last_screen: screen,
                    anchor,
                };
            }
            Gesture::ArmedNode {
                id,
                start_position,
                down_modifiers,
                mut tracker,
            } => match tracker.update(screen, world) {
                DragUpdate::Armed => {
                    self.gesture = Gesture::ArmedNode {
                        id,
                        start_position,
                        down_modifiers,
                        tracker,
                    };
                }
                DragUpdate::Started { .. } | DragUpdate::Moved { .. } => {
                    // The gesture became a drag: freeze the dragged
                    // category's area now, and the whole board if the
                    // reparent modifier is engaged.
                    if page.category(id).is_some() {
                        self.cache.begin_drag(page, id);
                    }
                    let reparent_mode = self.modifiers.contains(Modifiers::REPARENT);
                    if reparent_mode {
                        self.cache.begin_reparent_snapshot(page);
                        self.last_hover_ms = None;
                    }
                    let mut drag = DragNode {
                        id,
                        start_position,
                        tracker,
                        reparent_mode,
                        last_applied: start_position,
                    };
                    self.apply_drag_move(page, &mut drag, world, ev.time_ms, &mut events);
                    self.gesture = Gesture::DragNode(drag);
                }
            },
            Gesture::DragNode(mut drag) => {
                let _ = drag.tracker.update(screen, world);
                self.sync_reparent_mode(page, &mut drag, world, ev.time_ms);
                self.apply_drag_move(page, &mut drag, world, ev.time_ms, &mut events);
                self.gesture = Gesture::DragNode(drag);
            }
            Gesture::ArmedCanvas { mut tracker, extend } => {
                match tracker.update(screen, world) {
                    DragUpdate::Armed => {
                        self.gesture = Gesture::ArmedCanvas { tracker, extend };
                    }
                    DragUpdate::Started { .. } | DragUpdate::Moved { .. } => {
                        let mut marquee = Marquee::new(tracker.start_world(), extend);
                        marquee.update(world);
                        let hits = marquee_hits(page, &self.cache, marquee.rect());
                        self.gesture = Gesture::Marquee { marquee, hits };
                    }
                }
            }
            Gesture::Marquee { mut marquee, .. } => {
                marquee.update(world);
                let hits = marquee_hits(page, &self.cache, marquee.rect());
                self.gesture = Gesture::Marquee { marquee, hits };
            }
        }
        events
    }

    /// Handles a pointer release, committing whatever the gesture proposed.
    pub fn pointer_up(
        &mut self,
        page: &Page,
        view: &Viewport,
        ev: PointerEvent,
    ) -> Vec<EngineEvent> {
        self.apply_modifiers(ev.modifiers);

        let mut events = Vec::new();
        let world = view.screen_to_world_point(ev.screen);

        match core::mem::replace(&mut self.gesture, Gesture::Idle) {
            Gesture::Idle | Gesture::Pan { .. } | Gesture::ZoomDrag { .. } => {}
            Gesture::ArmedNode {
                id, down_modifiers, ..
            } => {
                // Released while still armed: a click.
                let before = self.selection.revision();
                if down_modifiers.contains(Modifiers::EXTEND) {
                    self.selection.toggle(id);
                } else {
                    self.selection.select_only(id);
                }
                self.push_selection_if_changed(before, &mut events);
            }
            Gesture::DragNode(drag) => {
                if drag.reparent_mode {
                    self.commit_reparent(page, &drag, world, &mut events);
                }
                self.finish_drag();
            }
            Gesture::ArmedCanvas { extend, .. } => {
                // A click on empty background clears the selection unless
                // the extend modifier asks to keep it.
                if !extend {
                    let before = self.selection.revision();
                    self.selection.clear();
                    self.push_selection_if_changed(before, &mut events);
                }
            }
            Gesture::Marquee { marquee, hits } => {
                let before = self.selection.revision();
                self.selection
                    .apply_marquee(hits, marquee.extends_selection());
                self.push_selection_if_changed(before, &mut events);
            }
        }
        events
    }

    /// Zooms about the cursor with the wheel, regardless of active tool.
    pub fn wheel(&mut self, view: &Viewport, screen: Point, delta_y: f64) -> Vec<EngineEvent> {
        let mut events = Vec::new();
        if !delta_y.is_finite() || delta_y == 0.0 {
            return events;
        }
        let mut next = *view;
        let factor = (1.0 - delta_y * 0.0015).clamp(0.5, 2.0);
        next.zoom_about_screen_point(screen, factor);
        if next != *view {
            events.push(EngineEvent::ViewportChanged {
                offset: next.offset,
                scale: next.scale,
            });
        }
        events
    }

    /// Terminates any in-progress gesture (pointer left the window, window
    /// lost focus, or the host cancelled).
    ///
    /// Position changes already emitted stand; a pending reparent is *not*
    /// committed, since containment only changes on an explicit release.
    /// The engine is guaranteed idle afterwards.
    pub fn cancel(&mut self, _page: &Page) -> Vec<EngineEvent> {
        self.gesture = Gesture::Idle;
        self.finish_drag();
        Vec::new()
    }

    // -------------------------------------------------------------------
    // Internals
    // -------------------------------------------------------------------

    fn apply_modifiers(&mut self, modifiers: Modifiers) {
        self.modifiers = modifiers;
        self.tools.set_space(modifiers.contains(Modifiers::SPACE));
        self.tools.set_alt(modifiers.contains(Modifiers::ALT));
    }

    fn arm_node(&mut self, page: &Page, id: NodeId, modifiers: Modifiers, tracker: DragTracker) {
        let Some(node) = page.node(id) else {
            return;
        };
        self.gesture = Gesture::ArmedNode {
            id,
            start_position: node.position(),
            down_modifiers: modifiers,
            tracker,
        };
    }

    /// Classifies what lies under a world-space point.
    ///
    /// Memos sit above category blocks, which sit above area backgrounds;
    /// within a kind the later node in page order wins (painter's order).
    /// Overlapping area backgrounds resolve to the deepest category.
    fn hit_test(&self, page: &Page, world: Point) -> Hit {
        for memo in page.memos.iter().rev() {
            if point_in_rect(memo.block_rect(), world) {
                return Hit::Node(memo.id);
            }
        }
        for category in page.categories.iter().rev() {
            if point_in_rect(category.block_rect(), world) {
                return Hit::Node(category.id);
            }
        }
        let mut best: Option<(NodeId, usize)> = None;
        for category in &page.categories {
            if !category.is_expanded {
                continue;
            }
            if let Some(area) = self.cache.display_area(page, category.id)
                && point_in_rect(area, world)
            {
                let depth = page.depth(category.id);
                match best {
                    Some((_, best_depth)) if depth <= best_depth => {}
                    _ => best = Some((category.id, depth)),
                }
            }
        }
        match best {
            Some((id, _)) => Hit::AreaBackground(id),
            None => Hit::Empty,
        }
    }

    /// Applies one move of an active node drag, emitting a position change
    /// when the (possibly clamped) position differs from the last one.
    fn apply_drag_move(
        &mut self,
        page: &Page,
        drag: &mut DragNode,
        pointer_world: Point,
        time_ms: u64,
        events: &mut Vec<EngineEvent>,
    ) {
        let proposed = drag.start_position + drag.tracker.total_offset(pointer_world);

        if drag.reparent_mode {
            // Restriction is bypassed entirely; containment is about to be
            // decided explicitly by the drop target instead.
            self.restricted = Directions::empty();
            if proposed != drag.last_applied {
                drag.last_applied = proposed;
                events.push(EngineEvent::PositionChanged {
                    id: drag.id,
                    position: proposed,
                });
            }
            self.resolve_hover_throttled(page, pointer_world, drag.id, time_ms);
            return;
        }

        let result = restrict_movement(page, &self.cache, drag.id, drag.last_applied, proposed);
        self.restricted = result.directions;
        self.drop_target = None;
        if result.position != drag.last_applied {
            drag.last_applied = result.position;
            events.push(EngineEvent::PositionChanged {
                id: drag.id,
                position: result.position,
            });
        }
    }

    /// Brings the drag's reparent mode in line with the current modifiers.
    fn sync_reparent_mode(
        &mut self,
        page: &Page,
        drag: &mut DragNode,
        pointer_world: Point,
        time_ms: u64,
    ) {
        let engaged = self.modifiers.contains(Modifiers::REPARENT);
        if engaged == drag.reparent_mode {
            return;
        }
        drag.reparent_mode = engaged;
        if engaged {
            self.cache.begin_reparent_snapshot(page);
            self.last_hover_ms = None;
            self.resolve_hover_throttled(page, pointer_world, drag.id, time_ms);
        } else {
            self.cache.drop_snapshot();
            self.drop_target = None;
        }
    }

    fn resolve_hover_throttled(
        &mut self,
        page: &Page,
        pointer_world: Point,
        dragged: NodeId,
        time_ms: u64,
    ) {
        if let Some(last) = self.last_hover_ms
            && time_ms.saturating_sub(last) < HOVER_THROTTLE_MS
        {
            return;
        }
        self.last_hover_ms = Some(time_ms);
        self.drop_target = resolve_drop_target(page, &self.cache, pointer_world, dragged);
    }

    /// Commits the containment outcome of a released modifier drag.
    fn commit_reparent(
        &mut self,
        page: &Page,
        drag: &DragNode,
        pointer_world: Point,
        events: &mut Vec<EngineEvent>,
    ) {
        // The release position decides; bypass the throttle for the final
        // resolution.
        let target = resolve_drop_target(page, &self.cache, pointer_world, drag.id);
        match target {
            Some(target) => match validate_reparent(page, drag.id, target) {
                Ok(()) => {
                    if page.resolved_parent(drag.id) != Some(target) {
                        events.push(EngineEvent::Reparented {
                            id: drag.id,
                            parent: Some(target),
                        });
                    }
                }
                Err(err) => log::warn!("reparent of {} rejected: {err}", drag.id),
            },
            None => {
                // Released over empty space: detach, but only when the
                // pointer has actually left the original parent's area.
                if let Some(parent) = page.resolved_parent(drag.id) {
                    let still_inside = self
                        .cache
                        .display_area(page, parent)
                        .is_some_and(|area| point_in_rect(area, pointer_world));
                    if !still_inside {
                        events.push(EngineEvent::Reparented {
                            id: drag.id,
                            parent: None,
                        });
                    }
                }
            }
        }
    }

    /// Clears all gesture-scoped state after a drag ends or cancels.
    fn finish_drag(&mut self) {
        self.cache.commit();
        self.drop_target = None;
        self.restricted = Directions::empty();
        self.last_hover_ms = None;
    }

    fn push_selection_if_changed(&self, before: u64, events: &mut Vec<EngineEvent>) {
        if self.selection.revision() != before {
            events.push(EngineEvent::SelectionChanged {
                ids: self.selection.items().to_vec(),
            });
        }
    }
}

impl core::fmt::Debug for Engine {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Engine")
            .field("tool", &self.tool())
            .field("gesture_active", &self.is_gesture_active())
            .field("selection", &self.selection)
            .field("drop_target", &self.drop_target)
            .field("restricted", &self.restricted)
            .finish_non_exhaustive()
    }
}

/// Every node whose effective rect overlaps the marquee rectangle.
fn marquee_hits(page: &Page, cache: &AreaCache, rect: Rect) -> Vec<NodeId> {
    page.nodes()
        .filter_map(|node| {
            let r = effective_rect(page, cache, node.id())?;
            (!r.intersect(rect).is_zero_area()).then(|| node.id())
        })
        .collect()
}
