// Copyright 2026 the Sapling Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Sapling Widget: per-widget convenience setters.
//!
//! Thin fluent helpers over the view tree so common widgets read as one
//! expression: label text, image sources, stack axis and spacing, spacers,
//! pinning intent, and diagnostic outlines. Everything here is a one-line
//! call-through into the side-table, flags, or bounds — there is no
//! independent design in this crate.
//!
//! Widget content is stored as attached properties under the well-known
//! [`StateKey`]s exported here, so any layer can read them back without this
//! crate in the loop.
//!
//! ```rust
//! use sapling_view_tree::ViewTree;
//! use sapling_widget::{Axis, WidgetExt, spacer};
//!
//! let mut tree = ViewTree::new();
//! let title = tree.insert();
//! let icon = tree.insert();
//! let gap = spacer(&mut tree);
//!
//! let row = tree.insert();
//! tree.widget(row)
//!     .horizontal(8.0)
//!     .views([icon, gap, title]);
//! tree.widget(title).text("Sapling");
//! tree.widget(icon).image("leaf.png");
//!
//! assert_eq!(tree.axis(row), Axis::Horizontal);
//! assert_eq!(tree.text(title), Some("Sapling"));
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

use alloc::string::String;
use core::fmt;

use kurbo::{Insets, Rect};
use sapling_configure::WithValue;
use sapling_state::StateKey;
use sapling_view_tree::{ViewFlags, ViewId, ViewTree};

/// Label text.
pub const TEXT: StateKey<String> = StateKey::new("sapling.widget.text");

/// Image source, as an application-interpreted path or name.
pub const IMAGE_SOURCE: StateKey<String> = StateKey::new("sapling.widget.image_source");

/// Stacking axis for container views.
pub const AXIS: StateKey<Axis> = StateKey::new("sapling.widget.axis");

/// Gap between stacked children.
pub const SPACING: StateKey<f64> = StateKey::new("sapling.widget.spacing");

/// Recorded pinning intent against the parent.
pub const PIN: StateKey<Pin> = StateKey::new("sapling.widget.pin");

/// The stacking axis of a container view.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
pub enum Axis {
    /// Children flow left to right.
    #[default]
    Horizontal,
    /// Children flow top to bottom.
    Vertical,
}

/// Pinning intent: keep a view's edges inset from its parent's.
///
/// This records intent only; an upstream layout pass interprets it.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Pin {
    /// Insets from the parent's edges.
    pub insets: Insets,
}

impl Default for Pin {
    fn default() -> Self {
        Self {
            insets: Insets::ZERO,
        }
    }
}

impl WithValue for Pin {}

/// Fluent write access to one view.
///
/// Obtained from [`WidgetExt::widget`]; each setter returns the cursor so
/// configuration chains. Setters on a stale id are quiet no-ops, matching
/// the tree's own accessors.
pub struct ViewMut<'a> {
    tree: &'a mut ViewTree,
    id: ViewId,
}

impl ViewMut<'_> {
    /// Returns the id this cursor writes to.
    #[must_use]
    pub fn id(&self) -> ViewId {
        self.id
    }

    fn set<T: 'static>(self, key: StateKey<T>, value: T) -> Self {
        if let Some(state) = self.tree.state_mut(self.id) {
            state.set(key, value);
        }
        self
    }

    fn add_flags(self, flags: ViewFlags) -> Self {
        if let Some(current) = self.tree.flags(self.id) {
            self.tree.set_flags(self.id, current | flags);
        }
        self
    }

    /// Sets the label text.
    pub fn text(self, text: impl Into<String>) -> Self {
        self.set(TEXT, text.into())
    }

    /// Sets the image source.
    pub fn image(self, source: impl Into<String>) -> Self {
        self.set(IMAGE_SOURCE, source.into())
    }

    /// Makes this a horizontal stack with the given gap.
    pub fn horizontal(self, spacing: f64) -> Self {
        self.set(AXIS, Axis::Horizontal).set(SPACING, spacing)
    }

    /// Makes this a vertical stack with the given gap.
    pub fn vertical(self, spacing: f64) -> Self {
        self.set(AXIS, Axis::Vertical).set(SPACING, spacing)
    }

    /// Appends children, in order.
    pub fn views(self, children: impl IntoIterator<Item = ViewId>) -> Self {
        for child in children {
            self.tree.add_child(self.id, child);
        }
        self
    }

    /// Marks the view to prefer hugging its content.
    pub fn hug_content(self) -> Self {
        self.add_flags(ViewFlags::HUG_CONTENT)
    }

    /// Draws a diagnostic outline around the view's bounds.
    pub fn debug_outline(self) -> Self {
        self.add_flags(ViewFlags::DEBUG_OUTLINE)
    }

    /// Sets the width of the local bounds, keeping the origin.
    pub fn width(self, width: f64) -> Self {
        if let Some(bounds) = self.tree.bounds(self.id) {
            self.tree.set_bounds(
                self.id,
                Rect::new(bounds.x0, bounds.y0, bounds.x0 + width, bounds.y1),
            );
        }
        self
    }

    /// Sets the height of the local bounds, keeping the origin.
    pub fn height(self, height: f64) -> Self {
        if let Some(bounds) = self.tree.bounds(self.id) {
            self.tree.set_bounds(
                self.id,
                Rect::new(bounds.x0, bounds.y0, bounds.x1, bounds.y0 + height),
            );
        }
        self
    }

    /// Records intent to pin this view's edges to its parent's, inset.
    pub fn pin_to_parent(self, insets: Insets) -> Self {
        self.set(PIN, Pin { insets })
    }

    /// Registers a one-shot callback for when this view acquires a parent.
    ///
    /// See [`sapling_attach::on_attach`].
    pub fn on_attach(self, callback: impl FnOnce(&mut ViewTree, ViewId) + 'static) -> Self {
        sapling_attach::on_attach(self.tree, self.id, callback);
        self
    }
}

impl fmt::Debug for ViewMut<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ViewMut").field("id", &self.id).finish()
    }
}

/// Widget conveniences on the view tree.
///
/// The setters live on [`ViewMut`]; the getters here read the attached
/// properties back with widget-flavored defaults.
pub trait WidgetExt {
    /// Returns a fluent write cursor for `id`.
    fn widget(&mut self, id: ViewId) -> ViewMut<'_>;

    /// Returns the label text, if set.
    fn text(&self, id: ViewId) -> Option<&str>;

    /// Returns the image source, if set.
    fn image_source(&self, id: ViewId) -> Option<&str>;

    /// Returns the stacking axis, horizontal when unset.
    fn axis(&self, id: ViewId) -> Axis;

    /// Returns the stacking gap, `0.0` when unset.
    fn spacing(&self, id: ViewId) -> f64;

    /// Returns the recorded pinning intent, if any.
    fn pin(&self, id: ViewId) -> Option<Pin>;
}

impl WidgetExt for ViewTree {
    fn widget(&mut self, id: ViewId) -> ViewMut<'_> {
        ViewMut { tree: self, id }
    }

    fn text(&self, id: ViewId) -> Option<&str> {
        self.state(id)?.get(TEXT).map(String::as_str)
    }

    fn image_source(&self, id: ViewId) -> Option<&str> {
        self.state(id)?.get(IMAGE_SOURCE).map(String::as_str)
    }

    fn axis(&self, id: ViewId) -> Axis {
        self.state(id)
            .and_then(|state| state.get(AXIS).copied())
            .unwrap_or_default()
    }

    fn spacing(&self, id: ViewId) -> f64 {
        self.state(id)
            .and_then(|state| state.get(SPACING).copied())
            .unwrap_or_default()
    }

    fn pin(&self, id: ViewId) -> Option<Pin> {
        self.state(id)?.get(PIN).copied()
    }
}

/// Inserts a view that prefers hugging its content on both axes.
///
/// Useful as flexible filler between stacked children.
pub fn spacer(tree: &mut ViewTree) -> ViewId {
    let id = tree.insert();
    tree.widget(id).hug_content().id()
}

#[cfg(test)]
mod tests {
    extern crate std;

    use alloc::rc::Rc;
    use core::cell::Cell;

    use sapling_attach::is_pending;

    use super::*;

    #[test]
    fn text_and_image_round_trip() {
        let mut tree = ViewTree::new();
        let label = tree.insert();
        let image = tree.insert();

        tree.widget(label).text("hello");
        tree.widget(image).image("leaf.png");

        assert_eq!(tree.text(label), Some("hello"));
        assert_eq!(tree.image_source(image), Some("leaf.png"));
        assert_eq!(tree.text(image), None);
    }

    #[test]
    fn stack_axes_and_spacing() {
        let mut tree = ViewTree::new();
        let row = tree.insert();
        let column = tree.insert();
        let plain = tree.insert();

        tree.widget(row).horizontal(8.0);
        tree.widget(column).vertical(4.0);

        assert_eq!(tree.axis(row), Axis::Horizontal);
        assert_eq!(tree.spacing(row), 8.0);
        assert_eq!(tree.axis(column), Axis::Vertical);
        assert_eq!(tree.spacing(column), 4.0);

        // Unset views read as horizontal with no gap.
        assert_eq!(tree.axis(plain), Axis::Horizontal);
        assert_eq!(tree.spacing(plain), 0.0);
    }

    #[test]
    fn views_appends_children_in_order() {
        let mut tree = ViewTree::new();
        let a = tree.insert();
        let b = tree.insert();
        let row = tree.insert();

        tree.widget(row).horizontal(0.0).views([a, b]);

        assert_eq!(tree.children(row), [a, b]);
        assert_eq!(tree.parent(a), Some(row));
    }

    #[test]
    fn spacer_hugs_content() {
        let mut tree = ViewTree::new();
        let gap = spacer(&mut tree);
        let flags = tree.flags(gap).unwrap();
        assert!(flags.contains(ViewFlags::HUG_CONTENT));
        assert!(flags.contains(ViewFlags::VISIBLE));
    }

    #[test]
    fn debug_outline_only_adds_its_flag() {
        let mut tree = ViewTree::new();
        let view = tree.insert();

        tree.widget(view).debug_outline();

        let flags = tree.flags(view).unwrap();
        assert!(flags.contains(ViewFlags::DEBUG_OUTLINE));
        assert!(flags.contains(ViewFlags::VISIBLE));
    }

    #[test]
    fn width_and_height_keep_the_origin() {
        let mut tree = ViewTree::new();
        let view = tree.insert();
        tree.set_bounds(view, Rect::new(10.0, 20.0, 11.0, 21.0));

        tree.widget(view).width(100.0).height(50.0);

        let bounds = tree.bounds(view).unwrap();
        assert_eq!(bounds, Rect::new(10.0, 20.0, 110.0, 70.0));
    }

    #[test]
    fn pin_records_intent() {
        let mut tree = ViewTree::new();
        let view = tree.insert();

        tree.widget(view).pin_to_parent(Insets::uniform(12.0));

        let pin = tree.pin(view).unwrap();
        assert_eq!(pin.insets, Insets::uniform(12.0));
    }

    #[test]
    fn pin_is_a_configurable_value() {
        let base = Pin::default();
        let padded = base.with(|pin| pin.insets = Insets::uniform(4.0));

        assert_eq!(base.insets, Insets::ZERO);
        assert_eq!(padded.insets, Insets::uniform(4.0));
    }

    #[test]
    fn on_attach_chains_through_the_cursor() {
        let mut tree = ViewTree::new();
        let root = tree.insert();
        let child = tree.insert();

        let fired = Rc::new(Cell::new(false));
        let seen = Rc::clone(&fired);
        tree.widget(child)
            .text("pending")
            .on_attach(move |_, _| seen.set(true));
        assert!(is_pending(&tree, child));

        tree.add_child(root, child);
        assert!(fired.get());
        assert_eq!(tree.text(child), Some("pending"));
    }

    #[test]
    fn setters_on_stale_ids_are_quiet() {
        let mut tree = ViewTree::new();
        let ghost = tree.insert();
        tree.remove(ghost);

        tree.widget(ghost).text("nope").horizontal(1.0).debug_outline();
        assert_eq!(tree.text(ghost), None);
    }
}
