// Copyright 2026 the Sapling Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Sapling State: a keyed side-table for attaching state to UI objects.
//!
//! Retained-mode toolkits regularly need to hang extra state off an object
//! that has no dedicated field for it: a one-shot callback, a flag, an
//! attached property set by a layout container. This crate provides
//! [`StateMap`], a small heterogeneous map for exactly that, keyed by
//! [`StateKey`] tokens.
//!
//! ## Keys
//!
//! A [`StateKey<T>`] is a `const`-constructible token: a `'static` name plus
//! a phantom value type. Keys compare by name, so well-known keys can live in
//! `const` items and cross crate boundaries without a registry:
//!
//! ```rust
//! use sapling_state::{StateKey, StateMap};
//!
//! const BADGE_COUNT: StateKey<u32> = StateKey::new("app.badge_count");
//!
//! let mut state = StateMap::new();
//! state.set(BADGE_COUNT, 3);
//! assert_eq!(state.get(BADGE_COUNT), Some(&3));
//! ```
//!
//! A name must always be used with a single value type. A read through a key
//! whose name was stored with a different type is `None`, never a panic.
//!
//! ## Absence is not an error
//!
//! Every lookup returns an `Option`; there is no fallible path. Storing
//! "nothing" is deleting: [`StateMap::set_or_remove`] with `None` removes the
//! association entirely.
//!
//! ## Ownership
//!
//! A `StateMap` is meant to be owned exclusively by the instance it
//! describes, typically behind a lazily-allocated `Option<Box<StateMap>>`
//! field, and dropped with it. Values only need to be `'static`; in
//! particular boxed `FnOnce` callbacks can be stored and later moved out via
//! [`StateMap::take`].
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod key;
mod map;

pub use key::StateKey;
pub use map::StateMap;
