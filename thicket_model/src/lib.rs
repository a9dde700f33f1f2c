// Copyright 2025 the Thicket Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=thicket_model --heading-base-level=0

//! Thicket Model: the canvas page model for memo/category boards.
//!
//! This crate defines the data the rest of the engine evaluates: memo and
//! category nodes positioned in world space, the parent/child containment
//! relation, and symmetric connections between nodes. It owns no interaction
//! state; a [`Page`] is an immutable snapshot handed to each evaluation by an
//! external store.
//!
//! ## Core types
//!
//! - [`NodeId`]: opaque, externally assigned node identifier.
//! - [`Memo`]: leaf content node.
//! - [`Category`]: container node with an expand/collapse state. Children are
//!   *derived* from `parent_id` references, never stored as a list, so the
//!   containment relation has a single source of truth.
//! - [`Page`]: the aggregate snapshot plus the containment and connection
//!   queries the geometry engines build on.
//! - [`EdgeKey`]: canonical undirected connection key for de-duplication.
//!
//! ## Minimal example
//!
//! ```
//! use kurbo::Point;
//! use thicket_model::{Category, Memo, NodeId, Page};
//!
//! let root = NodeId::new(1);
//! let note = NodeId::new(2);
//!
//! let mut page = Page::new();
//! page.categories.push(Category::new(root, Point::new(0.0, 0.0)));
//! page.memos.push(Memo::new(note, Point::new(40.0, 40.0)).with_parent(root));
//!
//! assert_eq!(page.resolved_parent(note), Some(root));
//! assert_eq!(page.depth(note), 1);
//! assert!(page.is_ancestor(root, note));
//! ```
//!
//! ## Failure posture
//!
//! The model fails open: a `parent_id` referencing a missing category degrades
//! to "no parent", a cycle in the parent chain terminates every walk, and
//! degenerate node sizes resolve to per-kind defaults in [`Page::block_rect`].
//! None of these paths panic or return non-finite geometry.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod connect;
mod id;
mod node;
mod page;

pub use connect::EdgeKey;
pub use id::NodeId;
pub use node::{
    CATEGORY_DEFAULT_SIZE, Category, MEMO_DEFAULT_SIZE, Memo, NodeKind, NodeRef,
};
pub use page::Page;
