// Copyright 2025 the Thicket Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Click/drag classification and movement deltas.

use kurbo::{Point, Vec2};

/// Screen-space movement (in pixels) that turns an armed gesture into a drag.
///
/// The threshold is measured in *screen* pixels on purpose: at high zoom a
/// tiny world-space wobble should not defeat a click, and at low zoom a
/// large world-space jump within a few pixels still is one.
pub const DRAG_THRESHOLD_PX: f64 = 5.0;

/// Result of feeding a pointer move into a [`DragTracker`].
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum DragUpdate {
    /// Movement stayed within the click threshold; nothing to apply yet.
    Armed,
    /// The threshold was just crossed: the gesture is now a drag.
    ///
    /// `delta` is the full world-space offset accumulated since arming, so
    /// no movement is lost to the threshold.
    Started {
        /// World-space offset from the armed position.
        delta: Vec2,
    },
    /// An ongoing drag moved again.
    Moved {
        /// World-space offset since the previous update.
        delta: Vec2,
    },
}

/// Tracks one pointer gesture from button-down to release.
///
/// A tracker is *armed* at pointer-down and becomes *dragging* once the
/// pointer leaves the [`DRAG_THRESHOLD_PX`] radius in screen space. A
/// release while still armed is a click; the caller decides what a click
/// means. Positions are tracked in both spaces: screen for the threshold,
/// world for the deltas the engine applies to node positions.
#[derive(Copy, Clone, Debug)]
pub struct DragTracker {
    start_screen: Point,
    start_world: Point,
    last_world: Point,
    dragging: bool,
}

impl DragTracker {
    /// Arms a tracker at the pointer-down position.
    #[must_use]
    pub const fn arm(screen: Point, world: Point) -> Self {
        Self {
            start_screen: screen,
            start_world: world,
            last_world: world,
            dragging: false,
        }
    }

    /// Returns `true` once the gesture has crossed the drag threshold.
    #[must_use]
    pub const fn is_dragging(&self) -> bool {
        self.dragging
    }

    /// The world position of the previous update (or the armed position).
    #[must_use]
    pub const fn last_world(&self) -> Point {
        self.last_world
    }

    /// The world position the gesture was armed at.
    #[must_use]
    pub const fn start_world(&self) -> Point {
        self.start_world
    }

    /// Total world-space offset from the armed position to `world`.
    #[must_use]
    pub fn total_offset(&self, world: Point) -> Vec2 {
        world - self.start_world
    }

    /// Feeds a pointer move, returning what the engine should do with it.
    pub fn update(&mut self, screen: Point, world: Point) -> DragUpdate {
        if !self.dragging {
            let travel = screen - self.start_screen;
            if travel.hypot2() <= DRAG_THRESHOLD_PX * DRAG_THRESHOLD_PX {
                return DragUpdate::Armed;
            }
            self.dragging = true;
            let delta = world - self.start_world;
            self.last_world = world;
            return DragUpdate::Started { delta };
        }
        let delta = world - self.last_world;
        self.last_world = world;
        DragUpdate::Moved { delta }
    }
}
