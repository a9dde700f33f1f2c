// Copyright 2025 the Thicket Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tests for the `thicket_selection` crate.
//!
//! These exercise the selection container's contents, primary role, and the
//! revision counter's no-op awareness.

use thicket_model::NodeId;
use thicket_selection::Selection;

fn id(raw: u64) -> NodeId {
    NodeId::new(raw)
}

#[test]
fn empty_selection_basics() {
    let sel = Selection::new();
    assert!(sel.is_empty());
    assert_eq!(sel.len(), 0);
    assert_eq!(sel.primary(), None);
    assert_eq!(sel.revision(), 0);
}

#[test]
fn select_only_sets_primary_and_bumps_revision() {
    let mut sel = Selection::new();
    sel.select_only(id(1));

    assert_eq!(sel.items(), &[id(1)]);
    assert_eq!(sel.primary(), Some(id(1)));
    assert_eq!(sel.revision(), 1);

    // No-op: selecting the same singleton again should not change revision.
    sel.select_only(id(1));
    assert_eq!(sel.revision(), 1);
}

#[test]
fn clear_bumps_revision_only_on_change() {
    let mut sel = Selection::new();
    sel.clear();
    assert_eq!(sel.revision(), 0);

    sel.select_only(id(1));
    sel.clear();
    assert!(sel.is_empty());
    assert_eq!(sel.primary(), None);
    assert_eq!(sel.revision(), 2);
}

#[test]
fn toggle_adds_then_removes() {
    let mut sel = Selection::new();
    sel.toggle(id(5));
    assert!(sel.contains(id(5)));
    assert_eq!(sel.primary(), Some(id(5)));

    sel.toggle(id(5));
    assert!(sel.is_empty());
    assert_eq!(sel.primary(), None);
}

#[test]
fn remove_repairs_primary_index() {
    let mut sel = Selection::new();
    sel.replace_with([id(1), id(2), id(3)]);
    sel.toggle(id(4)); // primary is now 4 at index 3

    sel.remove(id(2));
    assert_eq!(sel.primary(), Some(id(4)));
    assert_eq!(sel.items(), &[id(1), id(3), id(4)]);

    sel.remove(id(4));
    assert_eq!(sel.primary(), None);
}

#[test]
fn replace_with_dedups_and_detects_no_ops() {
    let mut sel = Selection::new();
    sel.replace_with([id(1), id(2), id(2), id(3)]);
    assert_eq!(sel.items(), &[id(1), id(2), id(3)]);
    assert_eq!(sel.primary(), Some(id(1)));

    let rev = sel.revision();
    sel.replace_with([id(1), id(2), id(3)]);
    assert_eq!(sel.revision(), rev);
}

#[test]
fn extend_with_keeps_existing_and_moves_primary() {
    let mut sel = Selection::new();
    sel.replace_with([id(1), id(2)]);
    sel.extend_with([id(2), id(3)]);

    assert_eq!(sel.items(), &[id(1), id(2), id(3)]);
    assert_eq!(sel.primary(), Some(id(3)));

    // Extending with only-already-selected ids changes nothing.
    let rev = sel.revision();
    sel.extend_with([id(1), id(2)]);
    assert_eq!(sel.revision(), rev);
}

#[test]
fn marquee_replaces_or_unions() {
    let mut sel = Selection::new();
    sel.select_only(id(9));

    sel.apply_marquee([id(1), id(2)], false);
    assert_eq!(sel.items(), &[id(1), id(2)]);

    sel.apply_marquee([id(3)], true);
    assert_eq!(sel.items(), &[id(1), id(2), id(3)]);
}

#[test]
fn empty_marquee_replace_clears() {
    let mut sel = Selection::new();
    sel.replace_with([id(1), id(2)]);
    sel.apply_marquee([], false);
    assert!(sel.is_empty());
}
