// Copyright 2025 the Thicket Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Rubber-band selection rectangle tracking.

use kurbo::{Point, Rect};

/// A marquee (rubber-band) selection gesture in world space.
///
/// Tracks the rectangle spanned from the gesture's starting point to the
/// current pointer position; the caller intersects it against node rects on
/// each update and commits the hit set on release. Whether the commit
/// replaces or unions the selection is fixed by the modifier state at
/// gesture start, not at release.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Marquee {
    origin: Point,
    current: Point,
    extend: bool,
}

impl Marquee {
    /// Starts a marquee at `origin`.
    ///
    /// `extend` records whether the commit should union into the existing
    /// selection (secondary modifier held at gesture start).
    #[must_use]
    pub const fn new(origin: Point, extend: bool) -> Self {
        Self {
            origin,
            current: origin,
            extend,
        }
    }

    /// Moves the free corner to the current pointer position.
    pub fn update(&mut self, current: Point) {
        self.current = current;
    }

    /// The rectangle currently spanned, normalized for any drag direction.
    #[must_use]
    pub fn rect(&self) -> Rect {
        Rect::from_points(self.origin, self.current)
    }

    /// Whether the commit unions instead of replacing.
    #[must_use]
    pub const fn extends_selection(&self) -> bool {
        self.extend
    }
}
