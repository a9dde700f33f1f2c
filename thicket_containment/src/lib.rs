// Copyright 2025 the Thicket Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=thicket_containment --heading-base-level=0

//! Thicket Containment: how dragged nodes interact with category areas.
//!
//! Two complementary policies, both evaluated per pointer move and both
//! side-effect free:
//!
//! - [`restrict_movement`]: during a *plain* drag of a top-level node,
//!   movement into a foreign category's area is clamped on exactly the
//!   axes pushing into the collision, producing boundary sliding rather
//!   than a hard stop. Without the reparent modifier a free-floating node
//!   can never wander into a container it does not belong to.
//! - [`resolve_drop_target`]: during a *modifier* drag, the pointer is
//!   tested against the cached areas of every expanded category to find
//!   the container the node would drop into, preferring the deepest
//!   (most specific) match.
//!
//! Reparent commits are validated separately by [`validate_reparent`],
//! which rejects any change that would make a category its own ancestor.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod reparent;
mod restrict;

pub use reparent::{ReparentError, resolve_drop_target, validate_reparent};
pub use restrict::{Directions, RestrictedMove, restrict_movement};
