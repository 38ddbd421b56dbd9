// Copyright 2026 the Sapling Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! State identification tokens.
//!
//! This module provides [`StateKey`], the opaque typed token used to address
//! entries in a [`StateMap`](crate::StateMap).

use core::fmt;
use core::hash::{Hash, Hasher};
use core::marker::PhantomData;

/// An opaque typed key for a [`StateMap`](crate::StateMap) entry.
///
/// A key is a `'static` name plus a phantom value type. Two keys address the
/// same entry exactly when their names are equal; the phantom type drives
/// what [`get`](crate::StateMap::get) and friends downcast to.
///
/// # Naming
///
/// Keys are compared by name, so names shared between crates must be
/// coordinated the same way any global token is. The convention used by this
/// workspace is a dotted path with the defining crate as the prefix, for
/// example `"sapling.attach.callback"`.
///
/// A name must always be paired with a single value type. Reusing a name
/// with a second type does not corrupt the map; reads through the
/// mismatched key simply return `None`.
///
/// # Example
///
/// ```rust
/// use sapling_state::StateKey;
///
/// const TOOLTIP: StateKey<&'static str> = StateKey::new("app.tooltip");
/// assert_eq!(TOOLTIP.name(), "app.tooltip");
/// ```
pub struct StateKey<T> {
    name: &'static str,
    _marker: PhantomData<fn() -> T>,
}

impl<T> StateKey<T> {
    /// Creates a key with the given name.
    #[must_use]
    #[inline]
    pub const fn new(name: &'static str) -> Self {
        Self {
            name,
            _marker: PhantomData,
        }
    }

    /// Returns the key's name.
    #[must_use]
    #[inline]
    pub const fn name(self) -> &'static str {
        self.name
    }
}

// Manual trait implementations to avoid requiring T: Clone, etc.

impl<T> Copy for StateKey<T> {}

impl<T> Clone for StateKey<T> {
    #[inline]
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> PartialEq for StateKey<T> {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl<T> Eq for StateKey<T> {}

impl<T> Hash for StateKey<T> {
    #[inline]
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name.hash(state);
    }
}

impl<T> fmt::Debug for StateKey<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StateKey")
            .field("name", &self.name)
            .field("type", &core::any::type_name::<T>())
            .finish()
    }
}
