// Copyright 2026 the Sapling Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Sapling View Tree: a minimal retained view tree with a decoratable
//! lifecycle notification.
//!
//! This crate is the host-toolkit boundary for the rest of the workspace: a
//! hierarchy of views addressed by generational ids, with the two facilities
//! the configuration and hook layers consume.
//!
//! - **Identity association**: every view owns a lazily-allocated
//!   [`sapling_state::StateMap`] side-table ([`ViewTree::state_mut`]) that is
//!   released with the view, and the tree owns one of its own
//!   ([`ViewTree::tree_state_mut`]) for tree-level markers.
//! - **Lifecycle observation**: every reparent runs built-in bookkeeping and
//!   then dispatches a parent-changed notification through a single
//!   replaceable handler slot. [`ViewTree::decorate_parent_changed`] is the
//!   well-known extension point for wrapping that handler with
//!   instrumentation; the handler is checked out of the slot during a
//!   dispatch so it may borrow the tree mutably.
//!
//! ## API overview
//!
//! - [`ViewTree`]: storage, hierarchy, attached state, and dispatch.
//! - [`ViewId`]: generational handle of a view.
//! - [`ViewFlags`]: visibility and marker flags.
//! - [`ParentChangedHandler`] / [`DecorateError`]: the notification slot.
//! - [`LifecycleCounters`]: built-in activity counters, useful for asserting
//!   how often the original behavior ran.
//!
//! Key operations:
//! - [`ViewTree::insert`] → [`ViewId`]; [`ViewTree::remove`] frees a subtree.
//! - [`ViewTree::set_parent`] / [`ViewTree::add_child`] → bookkeeping, then
//!   one notification per call.
//! - [`ViewTree::state_mut`] / [`ViewTree::tree_state_mut`] → side-tables.
//! - [`ViewTree::decorate_parent_changed`] → install-once instrumentation.
//!
//! ## Not a layout engine
//!
//! Views carry local bounds and flags, but the crate performs no measurement
//! or arrangement; layout belongs upstream. The bounds exist so convenience
//! layers have somewhere to record sizing intent.
//!
//! ## Scheduling model
//!
//! Everything here is synchronous and single-threaded in the toolkit's
//! cooperative style: no locks, no async, nothing blocks. Notifications do
//! not recurse — a reparent performed inside a handler queues its
//! notification, and the queue is drained in order once the outermost
//! dispatch unwinds.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod lifecycle;
mod tree;
mod types;

pub use lifecycle::{DecorateError, LifecycleCounters, ParentChangedHandler};
pub use tree::ViewTree;
pub use types::{ViewFlags, ViewId};
