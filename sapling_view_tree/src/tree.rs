// Copyright 2026 the Sapling Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The retained view tree: slot storage, parent/child bookkeeping, attached
//! state, and the parent-changed notification dispatch.

use alloc::boxed::Box;
use alloc::vec;
use alloc::vec::Vec;
use core::fmt;

use kurbo::Rect;
use sapling_state::StateMap;
use smallvec::SmallVec;

use crate::lifecycle::{DecorateError, LifecycleCounters, ParentChangedHandler};
use crate::types::{ViewFlags, ViewId};

/// Default inline capacity for child lists.
///
/// Most views have a handful of children, so this avoids heap allocation in
/// the common case.
const INLINE_CHILDREN: usize = 4;

struct View {
    parent: Option<ViewId>,
    children: SmallVec<[ViewId; INLINE_CHILDREN]>,
    flags: ViewFlags,
    bounds: Rect,
    /// Attached state, allocated on first access.
    state: Option<Box<StateMap>>,
}

impl View {
    fn new() -> Self {
        Self {
            parent: None,
            children: SmallVec::new(),
            flags: ViewFlags::default(),
            bounds: Rect::ZERO,
            state: None,
        }
    }
}

struct Slot {
    generation: u32,
    view: Option<View>,
}

/// A retained tree of views with a decoratable parent-changed notification.
///
/// The tree owns view records addressed by generational [`ViewId`]s. Each
/// reparenting operation runs the tree's built-in bookkeeping and then
/// dispatches a parent-changed notification through a single replaceable
/// handler slot; [`decorate_parent_changed`](Self::decorate_parent_changed)
/// is the extension point for wrapping that handler with instrumentation.
///
/// Views carry a lazily-allocated [`StateMap`] side-table for attached state,
/// and the tree carries one of its own for tree-level markers.
///
/// # Example
///
/// ```rust
/// use sapling_view_tree::ViewTree;
///
/// let mut tree = ViewTree::new();
/// let root = tree.insert();
/// let child = tree.insert();
///
/// assert!(tree.add_child(root, child));
/// assert_eq!(tree.parent(child), Some(root));
/// assert_eq!(tree.counters().parent_changed, 1);
/// ```
///
/// # Not a layout engine
///
/// The tree stores local bounds and flags but performs no measurement or
/// arrangement; layout policies belong upstream.
pub struct ViewTree {
    slots: Vec<Slot>,
    free: Vec<u32>,
    live: usize,
    tree_state: StateMap,
    counters: LifecycleCounters,
    damage: Vec<ViewId>,
    /// Notifications raised while the handler was checked out, awaiting
    /// redelivery when the outermost dispatch unwinds.
    pending_notify: Vec<ViewId>,
    /// The parent-changed handler chain. `None` while a dispatch is in
    /// flight (the handler is checked out so it may borrow the tree).
    parent_changed: Option<ParentChangedHandler>,
}

impl Default for ViewTree {
    fn default() -> Self {
        Self::new()
    }
}

impl ViewTree {
    /// Creates an empty tree with the built-in parent-changed behavior
    /// installed.
    #[must_use]
    pub fn new() -> Self {
        Self {
            slots: Vec::new(),
            free: Vec::new(),
            live: 0,
            tree_state: StateMap::new(),
            counters: LifecycleCounters::default(),
            damage: Vec::new(),
            pending_notify: Vec::new(),
            parent_changed: Some(Box::new(built_in_parent_changed)),
        }
    }

    // =========================================================================
    // Storage
    // =========================================================================

    /// Inserts a new parentless view and returns its id.
    pub fn insert(&mut self) -> ViewId {
        self.live += 1;
        if let Some(idx) = self.free.pop() {
            let slot = &mut self.slots[idx as usize];
            slot.generation += 1;
            slot.view = Some(View::new());
            return ViewId::new(idx, slot.generation);
        }
        let idx = u32::try_from(self.slots.len()).expect("too many views for ViewId (u32)");
        self.slots.push(Slot {
            generation: 1,
            view: Some(View::new()),
        });
        ViewId::new(idx, 1)
    }

    /// Removes a view and its entire subtree.
    ///
    /// Attached state is dropped with each removed view. Removal is
    /// destruction, not a reparent: no parent-changed notification is
    /// dispatched. Returns `false` for a stale id.
    pub fn remove(&mut self, id: ViewId) -> bool {
        if !self.is_alive(id) {
            return false;
        }
        if let Some(parent) = self.view(id).and_then(|view| view.parent)
            && let Some(parent_view) = self.view_mut(parent)
        {
            parent_view.children.retain(|&mut child| child != id);
        }

        let mut stack = vec![id];
        while let Some(current) = stack.pop() {
            let slot = &mut self.slots[current.idx()];
            if let Some(view) = slot.view.take() {
                self.live -= 1;
                self.free.push(current.0);
                stack.extend(view.children);
            }
        }
        true
    }

    /// Returns `true` if `id` refers to a live view.
    #[must_use]
    pub fn is_alive(&self, id: ViewId) -> bool {
        self.view(id).is_some()
    }

    /// Returns the number of live views.
    #[must_use]
    pub fn len(&self) -> usize {
        self.live
    }

    /// Returns `true` if the tree holds no live views.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.live == 0
    }

    fn view(&self, id: ViewId) -> Option<&View> {
        let slot = self.slots.get(id.idx())?;
        if slot.generation != id.1 {
            return None;
        }
        slot.view.as_ref()
    }

    fn view_mut(&mut self, id: ViewId) -> Option<&mut View> {
        let slot = self.slots.get_mut(id.idx())?;
        if slot.generation != id.1 {
            return None;
        }
        slot.view.as_mut()
    }

    // =========================================================================
    // Hierarchy
    // =========================================================================

    /// Returns the parent of `id`, or `None` for roots and stale ids.
    #[must_use]
    pub fn parent(&self, id: ViewId) -> Option<ViewId> {
        self.view(id)?.parent
    }

    /// Returns the children of `id`, in insertion order.
    ///
    /// Stale ids yield an empty slice.
    #[must_use]
    pub fn children(&self, id: ViewId) -> &[ViewId] {
        self.view(id).map_or(&[], |view| view.children.as_slice())
    }

    /// Moves `child` under `parent`, or detaches it for `None`.
    ///
    /// On success the view is detached from any prior parent, attached, and a
    /// single parent-changed notification is dispatched for it — for detach
    /// as well as attach. Rejected (returning `false`, with no notification)
    /// when either id is stale, when `parent == child`, or when the move
    /// would create a cycle.
    pub fn set_parent(&mut self, child: ViewId, parent: Option<ViewId>) -> bool {
        if !self.is_alive(child) {
            return false;
        }
        if let Some(parent) = parent
            && (!self.is_alive(parent) || parent == child || self.is_in_subtree(parent, child))
        {
            return false;
        }

        if let Some(old) = self.view(child).and_then(|view| view.parent)
            && let Some(old_view) = self.view_mut(old)
        {
            old_view.children.retain(|&mut c| c != child);
        }
        let Some(view) = self.view_mut(child) else {
            return false;
        };
        view.parent = parent;
        if let Some(parent) = parent
            && let Some(parent_view) = self.view_mut(parent)
        {
            parent_view.children.push(child);
        }

        self.notify_parent_changed(child);
        true
    }

    /// Appends `child` to `parent`'s child list.
    ///
    /// Sugar for [`set_parent`](Self::set_parent) with `Some(parent)`.
    pub fn add_child(&mut self, parent: ViewId, child: ViewId) -> bool {
        self.set_parent(child, Some(parent))
    }

    /// Returns `true` if `id` lies in the subtree rooted at `root`
    /// (including `root` itself).
    fn is_in_subtree(&self, id: ViewId, root: ViewId) -> bool {
        let mut current = Some(id);
        while let Some(view_id) = current {
            if view_id == root {
                return true;
            }
            current = self.parent(view_id);
        }
        false
    }

    // =========================================================================
    // Flags and bounds
    // =========================================================================

    /// Returns the flags of `id`, or `None` for a stale id.
    #[must_use]
    pub fn flags(&self, id: ViewId) -> Option<ViewFlags> {
        Some(self.view(id)?.flags)
    }

    /// Replaces the flags of `id`. Returns `false` for a stale id.
    pub fn set_flags(&mut self, id: ViewId, flags: ViewFlags) -> bool {
        match self.view_mut(id) {
            Some(view) => {
                view.flags = flags;
                true
            }
            None => false,
        }
    }

    /// Returns the local bounds of `id`, or `None` for a stale id.
    #[must_use]
    pub fn bounds(&self, id: ViewId) -> Option<Rect> {
        Some(self.view(id)?.bounds)
    }

    /// Replaces the local bounds of `id`. Returns `false` for a stale id.
    pub fn set_bounds(&mut self, id: ViewId, bounds: Rect) -> bool {
        match self.view_mut(id) {
            Some(view) => {
                view.bounds = bounds;
                true
            }
            None => false,
        }
    }

    // =========================================================================
    // Attached state
    // =========================================================================

    /// Returns the attached state of `id`, if the view is live and its
    /// side-table has been allocated.
    #[must_use]
    pub fn state(&self, id: ViewId) -> Option<&StateMap> {
        self.view(id)?.state.as_deref()
    }

    /// Returns the attached state of `id` mutably, allocating the side-table
    /// on first access. `None` only for a stale id.
    pub fn state_mut(&mut self, id: ViewId) -> Option<&mut StateMap> {
        let view = self.view_mut(id)?;
        Some(view.state.get_or_insert_with(|| Box::new(StateMap::new())).as_mut())
    }

    /// Returns the tree-level side-table.
    #[must_use]
    pub fn tree_state(&self) -> &StateMap {
        &self.tree_state
    }

    /// Returns the tree-level side-table mutably.
    pub fn tree_state_mut(&mut self) -> &mut StateMap {
        &mut self.tree_state
    }

    // =========================================================================
    // Lifecycle dispatch
    // =========================================================================

    /// Returns the built-in lifecycle counters.
    #[must_use]
    pub fn counters(&self) -> LifecycleCounters {
        self.counters
    }

    /// Drains the views damaged by built-in bookkeeping since the last call.
    pub fn take_damage(&mut self) -> Vec<ViewId> {
        core::mem::take(&mut self.damage)
    }

    /// Wraps the current parent-changed handler.
    ///
    /// `wrap` receives the current boxed handler ("the original") and returns
    /// the handler to install in its place. Decorators conventionally invoke
    /// the original first so built-in bookkeeping and earlier decorations
    /// keep their ordering.
    ///
    /// # Errors
    ///
    /// - [`DecorateError::DispatchInFlight`]: a notification is currently
    ///   being dispatched, so the handler is checked out of the slot. The
    ///   tree is left unchanged and the call may be retried later.
    pub fn decorate_parent_changed<F>(&mut self, wrap: F) -> Result<(), DecorateError>
    where
        F: FnOnce(ParentChangedHandler) -> ParentChangedHandler,
    {
        match self.parent_changed.take() {
            Some(original) => {
                self.parent_changed = Some(wrap(original));
                Ok(())
            }
            None => Err(DecorateError::DispatchInFlight),
        }
    }

    /// Dispatches a parent-changed notification for `id`.
    ///
    /// The handler is checked out of the slot for the duration of the call so
    /// it may borrow the tree mutably. A reparent performed inside a handler
    /// does not recurse: its notification is queued and delivered, in order,
    /// once the outermost dispatch unwinds. Views removed before redelivery
    /// are skipped.
    fn notify_parent_changed(&mut self, id: ViewId) {
        let Some(mut handler) = self.parent_changed.take() else {
            self.pending_notify.push(id);
            return;
        };
        handler(self, id);
        // Drain queued notifications; dispatching them may queue more.
        while !self.pending_notify.is_empty() {
            let next = self.pending_notify.remove(0);
            if self.is_alive(next) {
                handler(self, next);
            }
        }
        if self.parent_changed.is_none() {
            self.parent_changed = Some(handler);
        }
    }
}

impl fmt::Debug for ViewTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ViewTree")
            .field("len", &self.live)
            .field("counters", &self.counters)
            .field("dispatch_in_flight", &self.parent_changed.is_none())
            .finish_non_exhaustive()
    }
}

/// The tree's original parent-changed behavior: counters and damage.
fn built_in_parent_changed(tree: &mut ViewTree, id: ViewId) {
    tree.counters.parent_changed += 1;
    tree.damage.push(id);
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;
    use alloc::rc::Rc;
    use core::cell::{Cell, RefCell};
    use sapling_state::StateKey;

    const MARK: StateKey<u32> = StateKey::new("test.mark");

    #[test]
    fn insert_and_liveness() {
        let mut tree = ViewTree::new();
        assert!(tree.is_empty());

        let a = tree.insert();
        let b = tree.insert();
        assert!(tree.is_alive(a));
        assert!(tree.is_alive(b));
        assert_eq!(tree.len(), 2);
        assert_eq!(tree.parent(a), None);
        assert!(tree.children(a).is_empty());
    }

    #[test]
    fn slot_reuse_bumps_generation() {
        let mut tree = ViewTree::new();
        let a = tree.insert();
        assert!(tree.remove(a));
        assert!(!tree.is_alive(a));

        let b = tree.insert();
        // Same slot, new generation: the stale id must not alias.
        assert_eq!(a.0, b.0);
        assert_ne!(a, b);
        assert!(!tree.is_alive(a));
        assert!(tree.is_alive(b));
    }

    #[test]
    fn add_child_links_both_directions() {
        let mut tree = ViewTree::new();
        let root = tree.insert();
        let child = tree.insert();

        assert!(tree.add_child(root, child));
        assert_eq!(tree.parent(child), Some(root));
        assert_eq!(tree.children(root), [child]);
    }

    #[test]
    fn reparent_moves_between_child_lists() {
        let mut tree = ViewTree::new();
        let a = tree.insert();
        let b = tree.insert();
        let child = tree.insert();

        assert!(tree.add_child(a, child));
        assert!(tree.add_child(b, child));

        assert!(tree.children(a).is_empty());
        assert_eq!(tree.children(b), [child]);
        assert_eq!(tree.parent(child), Some(b));
    }

    #[test]
    fn detach_clears_parent() {
        let mut tree = ViewTree::new();
        let root = tree.insert();
        let child = tree.insert();
        tree.add_child(root, child);

        assert!(tree.set_parent(child, None));
        assert_eq!(tree.parent(child), None);
        assert!(tree.children(root).is_empty());
    }

    #[test]
    fn cycles_are_rejected() {
        let mut tree = ViewTree::new();
        let a = tree.insert();
        let b = tree.insert();
        let c = tree.insert();
        tree.add_child(a, b);
        tree.add_child(b, c);

        // Self-parenting and ancestor cycles are rejected without notifying.
        let before = tree.counters().parent_changed;
        assert!(!tree.set_parent(a, Some(a)));
        assert!(!tree.set_parent(a, Some(c)));
        assert_eq!(tree.counters().parent_changed, before);
        assert_eq!(tree.parent(a), None);
    }

    #[test]
    fn stale_ids_are_rejected_everywhere() {
        let mut tree = ViewTree::new();
        let a = tree.insert();
        let b = tree.insert();
        tree.remove(a);

        assert!(!tree.set_parent(a, Some(b)));
        assert!(!tree.add_child(b, a));
        assert!(!tree.set_flags(a, ViewFlags::default()));
        assert!(!tree.set_bounds(a, Rect::new(0.0, 0.0, 1.0, 1.0)));
        assert_eq!(tree.flags(a), None);
        assert_eq!(tree.bounds(a), None);
        assert!(tree.state_mut(a).is_none());
    }

    #[test]
    fn remove_takes_the_whole_subtree() {
        let mut tree = ViewTree::new();
        let root = tree.insert();
        let mid = tree.insert();
        let leaf = tree.insert();
        let sibling = tree.insert();
        tree.add_child(root, mid);
        tree.add_child(mid, leaf);
        tree.add_child(root, sibling);

        assert!(tree.remove(mid));
        assert!(!tree.is_alive(mid));
        assert!(!tree.is_alive(leaf));
        assert!(tree.is_alive(sibling));
        assert_eq!(tree.children(root), [sibling]);
        assert_eq!(tree.len(), 2);
    }

    #[test]
    fn remove_does_not_notify() {
        let mut tree = ViewTree::new();
        let root = tree.insert();
        let child = tree.insert();
        tree.add_child(root, child);

        let before = tree.counters().parent_changed;
        tree.remove(child);
        assert_eq!(tree.counters().parent_changed, before);
    }

    #[test]
    fn state_is_lazily_allocated_and_dropped_with_the_view() {
        let mut tree = ViewTree::new();
        let a = tree.insert();
        assert!(tree.state(a).is_none());

        tree.state_mut(a).unwrap().set(MARK, 7);
        assert_eq!(tree.state(a).unwrap().get(MARK), Some(&7));

        tree.remove(a);
        let b = tree.insert();
        // Reused slot, fresh view: no state leaks across generations.
        assert!(tree.state(b).is_none());
    }

    #[test]
    fn tree_state_is_independent_of_views() {
        let mut tree = ViewTree::new();
        tree.tree_state_mut().set(MARK, 1);
        let a = tree.insert();
        tree.remove(a);
        assert_eq!(tree.tree_state().get(MARK), Some(&1));
    }

    #[test]
    fn built_in_behavior_counts_and_damages() {
        let mut tree = ViewTree::new();
        let root = tree.insert();
        let a = tree.insert();
        let b = tree.insert();

        tree.add_child(root, a);
        tree.add_child(root, b);
        tree.set_parent(a, None);

        assert_eq!(tree.counters().parent_changed, 3);
        assert_eq!(tree.take_damage(), [a, b, a]);
        assert!(tree.take_damage().is_empty());
    }

    #[test]
    fn decorators_run_after_the_original() {
        let mut tree = ViewTree::new();
        let order = Rc::new(Cell::new(0_u64));

        let seen = Rc::clone(&order);
        tree.decorate_parent_changed(move |mut original| {
            Box::new(move |tree: &mut ViewTree, id: ViewId| {
                original(tree, id);
                // The built-in counter has already advanced when we run.
                seen.set(tree.counters().parent_changed);
            })
        })
        .unwrap();

        let root = tree.insert();
        let child = tree.insert();
        tree.add_child(root, child);

        assert_eq!(order.get(), 1);
    }

    #[test]
    fn decorate_fails_while_dispatching() {
        let mut tree = ViewTree::new();
        let failed = Rc::new(Cell::new(None));

        let seen = Rc::clone(&failed);
        tree.decorate_parent_changed(move |mut original| {
            Box::new(move |tree: &mut ViewTree, id: ViewId| {
                original(tree, id);
                // The handler is checked out right now.
                seen.set(tree.decorate_parent_changed(|h| h).err());
            })
        })
        .unwrap();

        let root = tree.insert();
        let child = tree.insert();
        tree.add_child(root, child);

        assert_eq!(failed.get(), Some(DecorateError::DispatchInFlight));
        // The slot was restored after the dispatch; decorating works again.
        assert!(tree.decorate_parent_changed(|h| h).is_ok());
    }

    #[test]
    fn nested_reparents_are_queued_for_redelivery() {
        let mut tree = ViewTree::new();
        let root = tree.insert();
        let child = tree.insert();
        let grandchild = tree.insert();

        let log = Rc::new(RefCell::new(Vec::new()));
        let seen = Rc::clone(&log);
        tree.decorate_parent_changed(move |mut original| {
            Box::new(move |tree: &mut ViewTree, id: ViewId| {
                original(tree, id);
                seen.borrow_mut().push(id);
                // Reparenting during dispatch must not recurse into us; the
                // nested notification arrives after this one completes.
                if seen.borrow().len() == 1 {
                    tree.add_child(id, grandchild);
                }
            })
        })
        .unwrap();

        tree.add_child(root, child);

        assert_eq!(*log.borrow(), [child, grandchild]);
        assert_eq!(tree.parent(grandchild), Some(child));
        // The built-in behavior ran for the nested reparent too.
        assert_eq!(tree.counters().parent_changed, 2);
        assert_eq!(tree.take_damage(), [child, grandchild]);
        // The handler slot was restored after the drain.
        assert!(tree.decorate_parent_changed(|h| h).is_ok());
    }

    #[test]
    fn views_removed_before_redelivery_are_skipped() {
        let mut tree = ViewTree::new();
        let root = tree.insert();
        let child = tree.insert();
        let doomed = tree.insert();

        let fired = Rc::new(Cell::new(0_u32));
        let seen = Rc::clone(&fired);
        tree.decorate_parent_changed(move |mut original| {
            Box::new(move |tree: &mut ViewTree, id: ViewId| {
                original(tree, id);
                seen.set(seen.get() + 1);
                if seen.get() == 1 {
                    tree.add_child(id, doomed);
                    tree.remove(doomed);
                }
            })
        })
        .unwrap();

        tree.add_child(root, child);

        assert_eq!(fired.get(), 1);
        assert_eq!(tree.counters().parent_changed, 1);
        assert!(!tree.is_alive(doomed));
    }
}
