// Copyright 2026 the Sapling Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Sapling Configure: fluent inline configuration for UI objects.
//!
//! Construction code reads best as a single expression: make the object,
//! adjust a few properties, hand it on. This crate provides the two small
//! capabilities that make that possible without giving up Rust's ownership
//! story:
//!
//! - [`WithShared`] for shared-identity handles: the closure mutates the live
//!   referent and the *same* handle comes back. Callers may rely on
//!   [`Rc::ptr_eq`] holding between input and output.
//! - [`WithValue`] for plain values: the closure mutates a fresh clone and
//!   the clone comes back. The original is never observably mutated.
//!
//! These are deliberately two independent opt-in traits rather than one
//! unified abstraction. Unifying them would either alias where value types
//! need copies, or force shared handles through needless copies; each
//! concrete type picks the one that matches its identity semantics.
//!
//! ```rust
//! use sapling_configure::WithValue;
//!
//! #[derive(Clone, Default, PartialEq, Debug)]
//! struct Style {
//!     spacing: f64,
//!     wrap: bool,
//! }
//! impl WithValue for Style {}
//!
//! let base = Style::default();
//! let dense = base.with(|style| {
//!     style.spacing = 2.0;
//!     style.wrap = true;
//! });
//!
//! assert_eq!(base, Style::default()); // untouched
//! assert_eq!(dense.spacing, 2.0);
//! ```
//!
//! Neither trait handles failure: a panic inside the configuration closure
//! propagates to the caller unmodified, and the configured result is
//! returned only on normal completion.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

use alloc::rc::Rc;
use core::cell::RefCell;

/// Fluent configuration for shared-identity handles.
///
/// [`with`](Self::with) hands the handle to the closure by reference so the
/// closure can reach the shared referent (typically through interior
/// mutability), then returns the very same handle. No copy is made; identity
/// is preserved.
///
/// Implement this for handle types whose clones alias one referent. A
/// blanket implementation is provided for [`Rc<RefCell<T>>`], the canonical
/// shared shape under a single-threaded toolkit.
///
/// # Example
///
/// ```rust
/// use std::cell::RefCell;
/// use std::rc::Rc;
///
/// use sapling_configure::WithShared;
///
/// #[derive(Default)]
/// struct Label {
///     text: String,
/// }
///
/// let label = Rc::new(RefCell::new(Label::default())).with(|label| {
///     label.borrow_mut().text.push_str("hello");
/// });
/// assert_eq!(label.borrow().text, "hello");
/// ```
pub trait WithShared: Sized {
    /// Applies `configure` to this handle and returns the same handle.
    #[must_use]
    fn with(self, configure: impl FnOnce(&Self)) -> Self {
        configure(&self);
        self
    }
}

impl<T> WithShared for Rc<RefCell<T>> {}

/// Fluent configuration for value types.
///
/// [`with`](Self::with) clones the value, applies the closure to the clone,
/// and returns the clone; the original is never observably mutated. This is
/// the only sound fluent contract for types without stable identity.
///
/// For build-up chains where the starting value is intentionally given away,
/// [`into_with`](Self::into_with) consumes `self` and skips the clone.
pub trait WithValue: Clone {
    /// Applies `configure` to a clone of this value and returns the clone.
    #[must_use]
    fn with(&self, configure: impl FnOnce(&mut Self)) -> Self {
        let mut copy = self.clone();
        configure(&mut copy);
        copy
    }

    /// Consumes this value, applies `configure`, and returns it.
    #[must_use]
    fn into_with(mut self, configure: impl FnOnce(&mut Self)) -> Self {
        configure(&mut self);
        self
    }
}
