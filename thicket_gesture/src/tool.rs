// Copyright 2025 the Thicket Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The active tool and its transient keyboard overrides.

/// The canvas tool controlling how pointer gestures are interpreted.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Default)]
pub enum Tool {
    /// Click/drag selects and moves nodes; marquee selection is available.
    #[default]
    Select,
    /// Drags pan the viewport.
    Pan,
    /// Drags and wheel events zoom the viewport.
    Zoom,
}

/// Tracks the persisted base tool plus transient overrides.
///
/// Holding space forces [`Tool::Pan`] and holding alt forces [`Tool::Zoom`]
/// without losing the base tool. The two overrides compose in any order
/// (space outranks alt while both are held) and releasing the last one
/// restores the base tool exactly.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub struct ToolState {
    base: Tool,
    space_held: bool,
    alt_held: bool,
}

impl ToolState {
    /// Creates a tool state with the given base tool and no overrides.
    #[must_use]
    pub const fn new(base: Tool) -> Self {
        Self {
            base,
            space_held: false,
            alt_held: false,
        }
    }

    /// The persisted base tool.
    #[must_use]
    pub const fn base(&self) -> Tool {
        self.base
    }

    /// Sets the persisted base tool; overrides keep applying on top.
    pub fn set_base(&mut self, base: Tool) {
        self.base = base;
    }

    /// Records the space key being pressed or released.
    pub fn set_space(&mut self, held: bool) {
        self.space_held = held;
    }

    /// Records the alt key being pressed or released.
    pub fn set_alt(&mut self, held: bool) {
        self.alt_held = held;
    }

    /// The tool currently in effect, overrides included.
    #[must_use]
    pub const fn effective(&self) -> Tool {
        if self.space_held {
            Tool::Pan
        } else if self.alt_held {
            Tool::Zoom
        } else {
            self.base
        }
    }
}
