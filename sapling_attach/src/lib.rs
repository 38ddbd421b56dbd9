// Copyright 2026 the Sapling Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Sapling Attach: one-shot "did acquire a parent" callbacks.
//!
//! A view often only becomes fully configurable once it is in the hierarchy —
//! constraints against a parent, focus wiring, measurements. This crate lets
//! a call site say "run this once, as soon as this view has a parent":
//!
//! ```rust
//! use sapling_attach::on_attach;
//! use sapling_view_tree::ViewTree;
//!
//! let mut tree = ViewTree::new();
//! let root = tree.insert();
//! let child = tree.insert();
//!
//! on_attach(&mut tree, child, |tree, id| {
//!     assert!(tree.parent(id).is_some());
//! });
//!
//! tree.add_child(root, child); // fires here, exactly once
//! tree.set_parent(child, None);
//! tree.add_child(root, child); // does not fire again
//! ```
//!
//! ## How it works
//!
//! The callback is stored in the view's side-table under a well-known key.
//! The first registration against a tree decorates the tree's parent-changed
//! handler through [`ViewTree::decorate_parent_changed`]: the replacement
//! invokes the original behavior first, then — only if the view now has a
//! parent — takes the stored callback out of the side-table and invokes it.
//! Clearing before invoking is what makes the callback fire at most once per
//! registration.
//!
//! Installation is gated by a monotonic installed marker in the tree-level
//! side-table, so it happens once per tree no matter how many registrations
//! occur.
//!
//! ## Failure is soft
//!
//! If the handler slot cannot be decorated (a notification is in flight),
//! the attempt is abandoned: the marker is not advanced, the error goes to
//! the registration's [`AttachTrace`] sink, and the next registration
//! retries. Registration itself never fails — the hook is best-effort
//! instrumentation, not correctness-critical application logic.
//!
//! A callback that never fires (the view never gains a parent) is simply
//! dropped with the view's side-table.
//!
//! This crate is `no_std` and uses `alloc`.
//!
//! [`ViewTree::decorate_parent_changed`]: sapling_view_tree::ViewTree::decorate_parent_changed

#![no_std]

extern crate alloc;

mod hook;
mod trace;

pub use hook::{
    AttachCallback, cancel, is_pending, on_attach, on_attach_to, on_attach_to_traced,
    on_attach_traced,
};
pub use trace::{AttachTrace, InstallRecorder, NoTrace};
