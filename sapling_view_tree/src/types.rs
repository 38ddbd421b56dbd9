// Copyright 2026 the Sapling Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Public types for the view tree: view identifiers and flags.

/// Identifier for a view in the tree.
///
/// This is a small, copyable handle that stays stable across updates but
/// becomes invalid when the underlying slot is reused.
/// It consists of a slot index and a generation counter.
///
/// ## Semantics
///
/// - On insert, a fresh slot is allocated with generation `1`.
/// - On remove, the slot is freed; any existing `ViewId` that pointed to that slot is now stale.
/// - On reuse of a freed slot, its generation is incremented, producing a new, distinct `ViewId`.
///
/// ### Liveness
///
/// Use [`ViewTree::is_alive`](crate::ViewTree::is_alive) to check whether a
/// `ViewId` still refers to a live view. Stale `ViewId`s never alias a
/// different live view because the generation must match.
///
/// ### Notes
///
/// - The generation increments on slot reuse and never decreases.
/// - `u32` is ample for practical lifetimes; behavior on generation overflow is unspecified.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct ViewId(pub(crate) u32, pub(crate) u32);

impl ViewId {
    pub(crate) const fn new(idx: u32, generation: u32) -> Self {
        Self(idx, generation)
    }

    pub(crate) const fn idx(self) -> usize {
        self.0 as usize
    }
}

bitflags::bitflags! {
    /// View flags controlling visibility and cosmetic/layout markers.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct ViewFlags: u8 {
        /// View is visible (participates in rendering).
        const VISIBLE = 0b0000_0001;
        /// View prefers to hug its content rather than stretch.
        const HUG_CONTENT = 0b0000_0010;
        /// Draw a diagnostic outline around the view's bounds.
        const DEBUG_OUTLINE = 0b0000_0100;
    }
}

impl Default for ViewFlags {
    fn default() -> Self {
        Self::VISIBLE
    }
}
