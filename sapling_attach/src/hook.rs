// Copyright 2026 the Sapling Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Registration and one-time installation of the attach decorator.

use alloc::boxed::Box;

use sapling_state::StateKey;
use sapling_view_tree::{ViewId, ViewTree};

use crate::trace::{AttachTrace, NoTrace};

/// The boxed one-shot callback stored in a view's side-table.
pub type AttachCallback = Box<dyn FnOnce(&mut ViewTree, ViewId)>;

/// Side-table key holding a view's pending callback.
const ATTACH_CALLBACK: StateKey<AttachCallback> = StateKey::new("sapling.attach.callback");

/// Tree-state key marking that the decorator is installed.
///
/// Monotonic: written once per tree, never cleared.
const INSTALLED: StateKey<bool> = StateKey::new("sapling.attach.installed");

/// Registers a one-shot callback for the next time `id` acquires a parent.
///
/// The callback is stored in the view's side-table and invoked — after the
/// tree's original parent-changed behavior has run — the first time the view
/// is confirmed to have a parent. It is cleared before it is invoked, so it
/// fires at most once per registration; moving the view again later does not
/// fire it again unless it is re-registered. A second registration before
/// the callback fires overwrites the first.
///
/// Registering triggers one-time installation of the tree-wide decorator.
/// Installation failure is non-fatal and silent here; use
/// [`on_attach_traced`] to observe it. Returns `id` for chaining.
///
/// # Example
///
/// ```rust
/// use sapling_attach::on_attach;
/// use sapling_view_tree::ViewTree;
///
/// let mut tree = ViewTree::new();
/// let root = tree.insert();
/// let child = tree.insert();
///
/// on_attach(&mut tree, child, |tree, id| {
///     // A suitable place to record constraints against the new parent.
///     let parent = tree.parent(id).unwrap();
///     assert_eq!(tree.children(parent), [id]);
/// });
///
/// tree.add_child(root, child);
/// ```
pub fn on_attach<F>(tree: &mut ViewTree, id: ViewId, callback: F) -> ViewId
where
    F: FnOnce(&mut ViewTree, ViewId) + 'static,
{
    on_attach_traced(tree, id, callback, &mut NoTrace)
}

/// [`on_attach`] with an [`AttachTrace`] sink for installation diagnostics.
pub fn on_attach_traced<F>(
    tree: &mut ViewTree,
    id: ViewId,
    callback: F,
    trace: &mut dyn AttachTrace,
) -> ViewId
where
    F: FnOnce(&mut ViewTree, ViewId) + 'static,
{
    let Some(state) = tree.state_mut(id) else {
        // Stale id: nothing to attach to.
        return id;
    };
    state.set(ATTACH_CALLBACK, Box::new(callback) as AttachCallback);
    install(tree, trace);
    id
}

/// Registers a one-shot callback receiving the new parent as well.
///
/// A thin adapter over [`on_attach`]: the parent is read at fire time, and
/// the callback body is skipped entirely if the view has no parent then.
///
/// # Example
///
/// ```rust
/// use sapling_attach::on_attach_to;
/// use sapling_view_tree::ViewTree;
///
/// let mut tree = ViewTree::new();
/// let root = tree.insert();
/// let child = tree.insert();
///
/// on_attach_to(&mut tree, child, move |_, id, parent| {
///     assert_ne!(id, parent);
/// });
///
/// tree.add_child(root, child);
/// ```
pub fn on_attach_to<F>(tree: &mut ViewTree, id: ViewId, callback: F) -> ViewId
where
    F: FnOnce(&mut ViewTree, ViewId, ViewId) + 'static,
{
    on_attach_to_traced(tree, id, callback, &mut NoTrace)
}

/// [`on_attach_to`] with an [`AttachTrace`] sink for installation diagnostics.
pub fn on_attach_to_traced<F>(
    tree: &mut ViewTree,
    id: ViewId,
    callback: F,
    trace: &mut dyn AttachTrace,
) -> ViewId
where
    F: FnOnce(&mut ViewTree, ViewId, ViewId) + 'static,
{
    on_attach_traced(
        tree,
        id,
        move |tree, id| {
            if let Some(parent) = tree.parent(id) {
                callback(tree, id, parent);
            }
        },
        trace,
    )
}

/// Returns `true` if `id` has a registered callback that has not fired.
#[must_use]
pub fn is_pending(tree: &ViewTree, id: ViewId) -> bool {
    tree.state(id)
        .is_some_and(|state| state.contains(ATTACH_CALLBACK))
}

/// Cancels a pending registration.
///
/// Returns `true` if a callback was removed; a no-op otherwise, and one
/// that never allocates a side-table for a view that has none. The
/// tree-wide decorator stays installed — it is inert for views without a
/// stored callback.
pub fn cancel(tree: &mut ViewTree, id: ViewId) -> bool {
    if !is_pending(tree, id) {
        return false;
    }
    tree.state_mut(id)
        .is_some_and(|state| state.remove(ATTACH_CALLBACK))
}

/// Installs the decorator on `tree` if it is not installed yet.
///
/// Safe to call repeatedly: once the installed marker is set, this is a
/// no-op. On failure the marker is not advanced, the error goes to `trace`,
/// and a later registration retries.
fn install(tree: &mut ViewTree, trace: &mut dyn AttachTrace) {
    if tree.tree_state().get(INSTALLED).copied().unwrap_or(false) {
        return;
    }
    let result = tree.decorate_parent_changed(|mut original| {
        Box::new(move |tree: &mut ViewTree, id: ViewId| {
            // The original lifecycle behavior always runs first.
            original(tree, id);
            if tree.parent(id).is_none() {
                return;
            }
            // Clear before invoking: at most one fire per registration.
            let callback = tree.state_mut(id).and_then(|state| state.take(ATTACH_CALLBACK));
            if let Some(callback) = callback {
                callback(tree, id);
            }
        })
    });
    match result {
        Ok(()) => {
            tree.tree_state_mut().set(INSTALLED, true);
            trace.installed();
        }
        Err(error) => trace.install_failed(error),
    }
}
