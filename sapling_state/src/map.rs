// Copyright 2026 the Sapling Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The heterogeneous side-table itself.

use alloc::boxed::Box;
use core::any::Any;
use core::fmt;

use hashbrown::HashMap;

use crate::key::StateKey;

/// A per-instance key→value side-table.
///
/// Values are stored type-erased and addressed by [`StateKey`]. Values only
/// need to be `'static`; there is no `Clone` bound, so move-only payloads
/// such as boxed `FnOnce` callbacks are fine and can be reclaimed with
/// [`take`](Self::take).
///
/// Absence is represented, never signaled: every lookup is an `Option` and
/// removing a missing entry is a no-op.
///
/// # Example
///
/// ```rust
/// use sapling_state::{StateKey, StateMap};
///
/// const LABEL: StateKey<&'static str> = StateKey::new("demo.label");
/// const COUNT: StateKey<u32> = StateKey::new("demo.count");
///
/// let mut state = StateMap::new();
/// state.set(LABEL, "hello");
/// state.set(COUNT, 1);
///
/// assert_eq!(state.get(LABEL), Some(&"hello"));
///
/// // Storing "nothing" is deleting.
/// state.set_or_remove(COUNT, None::<u32>);
/// assert_eq!(state.get(COUNT), None);
/// ```
#[derive(Default)]
pub struct StateMap {
    entries: HashMap<&'static str, Box<dyn Any>>,
}

impl StateMap {
    /// Creates an empty side-table.
    #[must_use]
    pub fn new() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }

    /// Associates `value` with `key`, overwriting any prior association.
    ///
    /// Returns the previous value if one of the same type was stored.
    pub fn set<T: 'static>(&mut self, key: StateKey<T>, value: T) -> Option<T> {
        self.entries
            .insert(key.name(), Box::new(value))
            .and_then(downcast_owned)
    }

    /// Associates `Some(value)` with `key`, or removes the association for `None`.
    ///
    /// "Store nothing" is treated as "delete". Returns the previous value if
    /// one of the same type was stored.
    pub fn set_or_remove<T: 'static>(&mut self, key: StateKey<T>, value: Option<T>) -> Option<T> {
        match value {
            Some(value) => self.set(key, value),
            None => self.take(key),
        }
    }

    /// Returns the value associated with `key`, if any.
    #[must_use]
    pub fn get<T: 'static>(&self, key: StateKey<T>) -> Option<&T> {
        self.entries.get(key.name())?.downcast_ref()
    }

    /// Returns the value associated with `key` mutably, if any.
    #[must_use]
    pub fn get_mut<T: 'static>(&mut self, key: StateKey<T>) -> Option<&mut T> {
        self.entries.get_mut(key.name())?.downcast_mut()
    }

    /// Removes and returns the value associated with `key`.
    ///
    /// The entry is removed whenever the name is present; the value is
    /// returned only when its type matches the key.
    pub fn take<T: 'static>(&mut self, key: StateKey<T>) -> Option<T> {
        self.entries.remove(key.name()).and_then(downcast_owned)
    }

    /// Deletes the association for `key`.
    ///
    /// Returns `true` if an entry was removed; removing a missing entry is a
    /// no-op.
    pub fn remove<T: 'static>(&mut self, key: StateKey<T>) -> bool {
        self.entries.remove(key.name()).is_some()
    }

    /// Returns `true` if `key` has an associated value of the key's type.
    #[must_use]
    pub fn contains<T: 'static>(&self, key: StateKey<T>) -> bool {
        self.get(key).is_some()
    }

    /// Returns the number of associations.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if the table holds no associations.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Drops every association.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Returns the names of all present entries, in arbitrary order.
    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.entries.keys().copied()
    }
}

impl fmt::Debug for StateMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StateMap")
            .field("len", &self.entries.len())
            .finish_non_exhaustive()
    }
}

fn downcast_owned<T: 'static>(value: Box<dyn Any>) -> Option<T> {
    value.downcast().ok().map(|boxed| *boxed)
}
