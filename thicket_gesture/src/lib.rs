// Copyright 2025 the Thicket Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=thicket_gesture --heading-base-level=0

//! Thicket Gesture: small state machines for canvas interactions.
//!
//! Three focused pieces, composed by the interaction engine:
//!
//! - [`ToolState`]: the persisted base tool (`select`/`pan`/`zoom`) plus
//!   transient keyboard overrides (space forces pan, alt forces zoom) that
//!   compose and restore correctly in any press/release order.
//! - [`DragTracker`]: classifies a pointer gesture as click vs. drag across
//!   a screen-space movement threshold and reports per-move world deltas
//!   once dragging.
//! - [`Marquee`]: tracks the rubber-band rectangle of a drag-selection
//!   gesture.
//!
//! ## Click vs. drag
//!
//! ```
//! use kurbo::Point;
//! use thicket_gesture::{DragTracker, DragUpdate};
//!
//! let mut drag = DragTracker::arm(Point::new(10.0, 10.0), Point::new(10.0, 10.0));
//! assert!(!drag.is_dragging());
//!
//! // Two pixels of movement: still a potential click.
//! let update = drag.update(Point::new(12.0, 10.0), Point::new(12.0, 10.0));
//! assert_eq!(update, DragUpdate::Armed);
//!
//! // Crossing the threshold turns the gesture into a drag.
//! let update = drag.update(Point::new(20.0, 10.0), Point::new(20.0, 10.0));
//! assert!(matches!(update, DragUpdate::Started { .. }));
//! ```
//!
//! This crate is `no_std`.

#![no_std]

mod drag;
mod marquee;
mod tool;

pub use drag::{DRAG_THRESHOLD_PX, DragTracker, DragUpdate};
pub use marquee::Marquee;
pub use tool::{Tool, ToolState};

bitflags::bitflags! {
    /// Modifier state delivered alongside pointer and key events.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    pub struct Modifiers: u8 {
        /// The reparent modifier: a drag changes containment, not just position.
        const REPARENT = 0b0000_0001;
        /// The extend modifier: clicks toggle and marquees union the selection.
        const EXTEND = 0b0000_0010;
        /// Space held: temporarily forces the pan tool.
        const SPACE = 0b0000_0100;
        /// Alt held: temporarily forces the zoom tool.
        const ALT = 0b0000_1000;
    }
}
