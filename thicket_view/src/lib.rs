// Copyright 2025 the Thicket Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=thicket_view --heading-base-level=0

//! Thicket View: the shared canvas viewport.
//!
//! A [`Viewport`] is a pan offset plus a uniform scale mapping world
//! coordinates onto the host's screen: `screen = world * scale + offset`.
//! The viewport is *shared with*, not owned by, the interaction engine:
//! the host store supplies the current value on each evaluation and applies
//! the offsets/scales the engine proposes back.
//!
//! Every pointer coordinate entering the geometry engines must pass through
//! [`Viewport::screen_to_world_point`] first; all engine geometry is world
//! space.
//!
//! ## Minimal example
//!
//! ```
//! use kurbo::{Point, Vec2};
//! use thicket_view::Viewport;
//!
//! let mut view = Viewport::new(Vec2::new(100.0, 50.0), 2.0);
//!
//! let world = view.screen_to_world_point(Point::new(300.0, 250.0));
//! assert_eq!(world, Point::new(100.0, 100.0));
//! assert_eq!(view.world_to_screen_point(world), Point::new(300.0, 250.0));
//!
//! // Zooming about a screen point keeps that point's world position fixed.
//! let anchor = Point::new(300.0, 250.0);
//! view.zoom_about_screen_point(anchor, 1.5);
//! assert_eq!(view.screen_to_world_point(anchor), world);
//! ```
//!
//! This crate is `no_std`.

#![no_std]

use kurbo::{Point, Rect, Size, Vec2};

/// A pan/zoom viewport over the world plane.
///
/// The mapping is axis-aligned with a uniform scale:
/// `world = (screen − offset) / scale`. A non-finite or non-positive scale
/// is treated as `1.0` by every conversion, so degenerate host state can
/// never produce NaN geometry downstream.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Viewport {
    /// Screen-space translation of the world origin.
    pub offset: Vec2,
    /// Uniform world-to-screen scale factor.
    pub scale: f64,
}

impl Viewport {
    /// Smallest accepted scale; zooming clamps here.
    pub const MIN_SCALE: f64 = 1e-3;
    /// Largest accepted scale; zooming clamps here.
    pub const MAX_SCALE: f64 = 1e3;

    /// Creates a viewport from an offset and scale.
    #[must_use]
    pub const fn new(offset: Vec2, scale: f64) -> Self {
        Self { offset, scale }
    }

    /// The identity viewport: no pan, scale `1.0`.
    #[must_use]
    pub const fn identity() -> Self {
        Self::new(Vec2::ZERO, 1.0)
    }

    fn effective_scale(&self) -> f64 {
        if self.scale.is_finite() && self.scale > 0.0 {
            self.scale
        } else {
            1.0
        }
    }

    /// Converts a screen-space point into world coordinates.
    #[must_use]
    pub fn screen_to_world_point(&self, screen: Point) -> Point {
        let s = self.effective_scale();
        Point::new((screen.x - self.offset.x) / s, (screen.y - self.offset.y) / s)
    }

    /// Converts a world-space point into screen coordinates.
    #[must_use]
    pub fn world_to_screen_point(&self, world: Point) -> Point {
        let s = self.effective_scale();
        Point::new(world.x * s + self.offset.x, world.y * s + self.offset.y)
    }

    /// Converts a screen-space rectangle into world coordinates.
    #[must_use]
    pub fn screen_to_world_rect(&self, rect: Rect) -> Rect {
        let p0 = self.screen_to_world_point(rect.origin());
        let p1 = self.screen_to_world_point(Point::new(rect.x1, rect.y1));
        Rect::new(p0.x, p0.y, p1.x, p1.y)
    }

    /// Converts a world-space rectangle into screen coordinates.
    #[must_use]
    pub fn world_to_screen_rect(&self, rect: Rect) -> Rect {
        let p0 = self.world_to_screen_point(rect.origin());
        let p1 = self.world_to_screen_point(Point::new(rect.x1, rect.y1));
        Rect::new(p0.x, p0.y, p1.x, p1.y)
    }

    /// Converts a screen-space delta (e.g. a pointer movement) into world units.
    #[must_use]
    pub fn screen_to_world_delta(&self, delta: Vec2) -> Vec2 {
        delta / self.effective_scale()
    }

    /// Pans the view by a screen-space delta.
    pub fn pan_by(&mut self, delta: Vec2) {
        self.offset += delta;
    }

    /// Scales by `factor` while keeping `anchor`'s world position fixed on screen.
    ///
    /// The resulting scale is clamped to `[MIN_SCALE, MAX_SCALE]`; a
    /// non-positive or non-finite factor is ignored.
    pub fn zoom_about_screen_point(&mut self, anchor: Point, factor: f64) {
        if !(factor.is_finite() && factor > 0.0) {
            return;
        }
        let old = self.effective_scale();
        let new = (old * factor).clamp(Self::MIN_SCALE, Self::MAX_SCALE);
        if new == old {
            return;
        }
        let world = self.screen_to_world_point(anchor);
        self.scale = new;
        self.offset = anchor.to_vec2() - world.to_vec2() * new;
    }

    /// Returns the world-space rectangle visible through a view of `view_size`.
    ///
    /// Useful for culling; the view is assumed to start at the screen origin.
    #[must_use]
    pub fn visible_world_rect(&self, view_size: Size) -> Rect {
        self.screen_to_world_rect(Rect::from_origin_size(Point::ZERO, view_size))
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::identity()
    }
}
