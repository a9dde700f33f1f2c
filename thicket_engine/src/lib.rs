// Copyright 2025 the Thicket Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=thicket_engine --heading-base-level=0

//! Thicket Engine: the interaction façade for the canvas.
//!
//! The [`Engine`] sits between a host UI layer and an external document
//! store. The host feeds it pointer/keyboard events plus the current
//! [`Page`](thicket_model::Page) and [`Viewport`](thicket_view::Viewport)
//! snapshots; the engine classifies the gesture (click, plain drag,
//! modifier drag, marquee, pan, zoom) and returns the mutations the store
//! should apply as a list of [`EngineEvent`]s. It never mutates the store,
//! never holds a page copy across calls, and runs entirely synchronously
//! inside each event handler.
//!
//! Gesture ownership is exclusive: only one drag-affecting gesture can be
//! active at a time, and pointer-downs arriving while one is in flight are
//! ignored. A release or [`Engine::cancel`] always returns the engine to
//! idle; no gesture can be left stuck.
//!
//! ## Minimal example
//!
//! ```
//! use kurbo::Point;
//! use thicket_engine::{Engine, EngineEvent, PointerEvent};
//! use thicket_gesture::Modifiers;
//! use thicket_model::{Memo, NodeId, Page};
//! use thicket_view::Viewport;
//!
//! let mut page = Page::new();
//! page.memos.push(Memo::new(NodeId::new(1), Point::new(0.0, 0.0)));
//!
//! let view = Viewport::identity();
//! let mut engine = Engine::new();
//!
//! let at = |x: f64, y: f64, t: u64| PointerEvent {
//!     screen: Point::new(x, y),
//!     modifiers: Modifiers::empty(),
//!     time_ms: t,
//! };
//!
//! // Press, move past the drag threshold, release: a plain move.
//! engine.pointer_down(&page, &view, at(10.0, 10.0, 0));
//! let events = engine.pointer_move(&page, &view, at(60.0, 10.0, 16));
//! assert!(matches!(
//!     events[0],
//!     EngineEvent::PositionChanged { id, .. } if id == NodeId::new(1),
//! ));
//! engine.pointer_up(&page, &view, at(60.0, 10.0, 32));
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod engine;
mod events;

pub use engine::Engine;
pub use events::{EngineEvent, PointerEvent};
