// Copyright 2025 the Thicket Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Memo and category nodes and their block geometry.

use alloc::vec::Vec;

use kurbo::{Point, Rect, Size};

use crate::NodeId;

/// Default block size for a memo whose own size is unset or degenerate.
pub const MEMO_DEFAULT_SIZE: Size = Size::new(200.0, 95.0);

/// Default block size for a category whose own size is unset or degenerate.
pub const CATEGORY_DEFAULT_SIZE: Size = Size::new(200.0, 80.0);

/// A leaf content node positioned on the canvas.
///
/// `connections` is a symmetric set: both endpoints list each other. It is
/// stored as a `Vec` with uniqueness enforced at mutation time so snapshots
/// stay cheap to clone and deterministic to iterate.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Memo {
    /// Unique, stable identifier.
    pub id: NodeId,
    /// Top-left corner in world coordinates.
    pub position: Point,
    /// Block size; `None` resolves to [`MEMO_DEFAULT_SIZE`].
    pub size: Option<Size>,
    /// Containing category, if any.
    pub parent_id: Option<NodeId>,
    /// Symmetric connection endpoints.
    pub connections: Vec<NodeId>,
}

impl Memo {
    /// Creates a memo with default size, no parent, and no connections.
    #[must_use]
    pub fn new(id: NodeId, position: Point) -> Self {
        Self {
            id,
            position,
            size: None,
            parent_id: None,
            connections: Vec::new(),
        }
    }

    /// Sets an explicit block size.
    #[must_use]
    pub fn with_size(mut self, size: Size) -> Self {
        self.size = Some(size);
        self
    }

    /// Sets the containing category.
    #[must_use]
    pub fn with_parent(mut self, parent: NodeId) -> Self {
        self.parent_id = Some(parent);
        self
    }

    /// Returns the memo's block rectangle in world coordinates.
    ///
    /// Unset or degenerate sizes resolve to [`MEMO_DEFAULT_SIZE`]; the result
    /// is always finite and non-inverted.
    #[must_use]
    pub fn block_rect(&self) -> Rect {
        block_rect(self.position, self.size, MEMO_DEFAULT_SIZE)
    }
}

/// A container node that visually groups memos and other categories.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Category {
    /// Unique, stable identifier.
    pub id: NodeId,
    /// Top-left corner of the category block in world coordinates.
    pub position: Point,
    /// Block size; `None` resolves to [`CATEGORY_DEFAULT_SIZE`].
    pub size: Option<Size>,
    /// Containing category, if any.
    pub parent_id: Option<NodeId>,
    /// Symmetric connection endpoints.
    pub connections: Vec<NodeId>,
    /// Whether the category's contents are currently visible.
    pub is_expanded: bool,
}

impl Category {
    /// Creates an expanded category with default size, no parent, and no
    /// connections.
    #[must_use]
    pub fn new(id: NodeId, position: Point) -> Self {
        Self {
            id,
            position,
            size: None,
            parent_id: None,
            connections: Vec::new(),
            is_expanded: true,
        }
    }

    /// Sets an explicit block size.
    #[must_use]
    pub fn with_size(mut self, size: Size) -> Self {
        self.size = Some(size);
        self
    }

    /// Sets the containing category.
    #[must_use]
    pub fn with_parent(mut self, parent: NodeId) -> Self {
        self.parent_id = Some(parent);
        self
    }

    /// Sets the expand/collapse state.
    #[must_use]
    pub fn expanded(mut self, is_expanded: bool) -> Self {
        self.is_expanded = is_expanded;
        self
    }

    /// Returns the category's block rectangle in world coordinates.
    ///
    /// This is the tag/header block, not the derived area; see
    /// `thicket_area` for the content-derived bounding region.
    #[must_use]
    pub fn block_rect(&self) -> Rect {
        block_rect(self.position, self.size, CATEGORY_DEFAULT_SIZE)
    }
}

/// Discriminates the two node kinds without borrowing the node.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum NodeKind {
    /// A [`Memo`].
    Memo,
    /// A [`Category`].
    Category,
}

/// A borrowed view of either node kind.
///
/// Lets callers iterate the whole page uniformly when only the shared
/// geometry and containment fields matter.
#[derive(Copy, Clone, Debug)]
pub enum NodeRef<'a> {
    /// A borrowed memo.
    Memo(&'a Memo),
    /// A borrowed category.
    Category(&'a Category),
}

impl NodeRef<'_> {
    /// The node's id.
    #[must_use]
    pub fn id(&self) -> NodeId {
        match self {
            Self::Memo(m) => m.id,
            Self::Category(c) => c.id,
        }
    }

    /// The node's kind.
    #[must_use]
    pub fn kind(&self) -> NodeKind {
        match self {
            Self::Memo(_) => NodeKind::Memo,
            Self::Category(_) => NodeKind::Category,
        }
    }

    /// The node's stored parent reference, unresolved.
    #[must_use]
    pub fn parent_id(&self) -> Option<NodeId> {
        match self {
            Self::Memo(m) => m.parent_id,
            Self::Category(c) => c.parent_id,
        }
    }

    /// The node's position.
    #[must_use]
    pub fn position(&self) -> Point {
        match self {
            Self::Memo(m) => m.position,
            Self::Category(c) => c.position,
        }
    }

    /// The node's block rectangle.
    #[must_use]
    pub fn block_rect(&self) -> Rect {
        match self {
            Self::Memo(m) => m.block_rect(),
            Self::Category(c) => c.block_rect(),
        }
    }

    /// The node's connection endpoints.
    #[must_use]
    pub fn connections(&self) -> &[NodeId] {
        match self {
            Self::Memo(m) => &m.connections,
            Self::Category(c) => &c.connections,
        }
    }
}

/// Builds a well-formed block rect from a stored position and optional size.
///
/// Non-finite position components collapse to the origin and degenerate sizes
/// (non-finite, zero, or negative extents) resolve to `default`, so callers
/// never see NaN or inverted rectangles.
fn block_rect(position: Point, size: Option<Size>, default: Size) -> Rect {
    let origin = if position.x.is_finite() && position.y.is_finite() {
        position
    } else {
        Point::ZERO
    };
    let size = match size {
        Some(s)
            if s.width.is_finite() && s.height.is_finite() && s.width > 0.0 && s.height > 0.0 =>
        {
            s
        }
        _ => default,
    };
    Rect::from_origin_size(origin, size)
}
