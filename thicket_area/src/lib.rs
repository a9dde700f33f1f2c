// Copyright 2025 the Thicket Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=thicket_area --heading-base-level=0

//! Thicket Area: category bounding regions and drag-stable caching.
//!
//! A category's *area* is the rectangle bounding everything nested inside
//! it (memo blocks, child category blocks, and the child categories' own
//! areas, recursively), inflated by a fixed padding. Areas are derived: they
//! are recomputed from the [`Page`] snapshot and never persisted.
//!
//! The crate has two halves:
//!
//! - [`compute_area`]: the pure recursive derivation, cycle-guarded and
//!   total. See the function docs for the exact union rules.
//! - [`AreaCache`]: the drag stabilizer. Moving a node changes its
//!   category's area, which would change the layout under the pointer
//!   mid-gesture; the cache freezes area rectangles for the duration of a
//!   gesture so continuous recomputation can never feed back into the drag.
//!
//! ## Minimal example
//!
//! ```
//! use kurbo::{Point, Rect};
//! use thicket_model::{Category, Memo, NodeId, Page};
//! use thicket_area::compute_area;
//!
//! let root = NodeId::new(1);
//! let mut page = Page::new();
//! page.categories.push(Category::new(root, Point::new(0.0, 0.0)));
//! // An expanded category with no visible content bounds nothing.
//! assert_eq!(compute_area(&page, root), None);
//!
//! page.memos.push(
//!     Memo::new(NodeId::new(2), Point::new(0.0, 0.0)).with_parent(root),
//! );
//! // One 200x95 memo at the origin, padded by 20 on every side.
//! assert_eq!(
//!     compute_area(&page, root),
//!     Some(Rect::new(-20.0, -20.0, 220.0, 115.0)),
//! );
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod cache;
mod compute;

pub use cache::AreaCache;
pub use compute::{AREA_PADDING, compute_area, effective_rect};
