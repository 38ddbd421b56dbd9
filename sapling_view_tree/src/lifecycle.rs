// Copyright 2026 the Sapling Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Lifecycle notification plumbing: the handler slot type, counters, and the
//! decoration error.

use alloc::boxed::Box;
use core::fmt;

use crate::ViewTree;
use crate::types::ViewId;

/// The boxed parent-changed handler stored in the tree's notification slot.
///
/// The handler is dispatched with the tree and the id of the view whose
/// parent relationship changed; it can read the current parent (or its
/// absence) from the tree at call time. During a dispatch the handler is
/// checked out of the slot so it may borrow the tree mutably.
pub type ParentChangedHandler = Box<dyn FnMut(&mut ViewTree, ViewId)>;

/// Monotonic counters recording built-in lifecycle activity.
///
/// The built-in parent-changed behavior bumps these before any installed
/// decorator work runs, which makes them a precise probe for "the original
/// implementation ran exactly once per notification" style assertions.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub struct LifecycleCounters {
    /// Number of parent-changed notifications processed by the built-in
    /// behavior.
    pub parent_changed: u64,
}

/// Error returned when the parent-changed slot cannot be decorated.
#[derive(Copy, Clone, Eq, PartialEq)]
pub enum DecorateError {
    /// A notification is currently being dispatched, so the handler is
    /// checked out of the slot and the original cannot be captured.
    DispatchInFlight,
}

impl fmt::Debug for DecorateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DispatchInFlight => write!(f, "DecorateError::DispatchInFlight"),
        }
    }
}

impl fmt::Display for DecorateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DispatchInFlight => write!(
                f,
                "cannot decorate the parent-changed handler while a notification is in flight"
            ),
        }
    }
}

impl core::error::Error for DecorateError {}
