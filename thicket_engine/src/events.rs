// Copyright 2025 the Thicket Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Input events consumed and mutation events emitted by the engine.

use alloc::vec::Vec;

use kurbo::{Point, Size, Vec2};
use thicket_gesture::Modifiers;
use thicket_model::NodeId;

/// One pointer sample from the host UI layer.
///
/// Coordinates are *screen* space; the engine converts to world space
/// through the viewport it is handed alongside the event. `time_ms` is a
/// monotonic host-supplied timestamp, used only to throttle hover
/// recomputation; the engine keeps no ambient clock of its own.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct PointerEvent {
    /// Pointer position in screen coordinates.
    pub screen: Point,
    /// Modifier key state at the time of the sample.
    pub modifiers: Modifiers,
    /// Monotonic timestamp in milliseconds.
    pub time_ms: u64,
}

/// A mutation the engine proposes to the external store.
///
/// The engine emits these from its event handlers and forgets them; the
/// store is the single writer of document state and is expected to apply
/// (or refuse) each one before the next evaluation.
#[derive(Clone, Debug, PartialEq)]
pub enum EngineEvent {
    /// A node moved to a new world position.
    PositionChanged {
        /// The moved node.
        id: NodeId,
        /// Its new top-left corner.
        position: Point,
    },
    /// A node was given a new block size.
    SizeChanged {
        /// The resized node.
        id: NodeId,
        /// Its new size.
        size: Size,
    },
    /// A node moved into a category (`Some`) or detached to top level (`None`).
    Reparented {
        /// The reparented node.
        id: NodeId,
        /// The new containing category, if any.
        parent: Option<NodeId>,
    },
    /// A connection between two nodes should be created.
    ConnectionAdded {
        /// One endpoint.
        a: NodeId,
        /// The other endpoint.
        b: NodeId,
    },
    /// A connection between two nodes should be removed.
    ConnectionRemoved {
        /// One endpoint.
        a: NodeId,
        /// The other endpoint.
        b: NodeId,
    },
    /// The selection changed; `ids` is the complete new selection.
    SelectionChanged {
        /// The selected node ids, in stable order.
        ids: Vec<NodeId>,
    },
    /// The viewport should pan/zoom to the given state.
    ViewportChanged {
        /// The new screen-space offset.
        offset: Vec2,
        /// The new uniform scale.
        scale: f64,
    },
}
