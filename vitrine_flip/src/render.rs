// Copyright 2025 the Vitrine Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The element abstraction the transition engine animates.

use core::hash::Hash;

use hashbrown::HashMap;
use kurbo::{Affine, Rect};

use crate::Geometry;

/// An element the engine can measure and animate.
///
/// Hosts implement this for whatever they draw with (DOM nodes, retained
/// scene nodes, GPU quads). The engine only ever reads geometry and writes a
/// visual transform and opacity; layout itself stays with the caller.
pub trait Renderable {
    /// Current on-screen geometry, including any applied transform, or `None`
    /// when the element is not attached to the render tree.
    fn geometry(&self) -> Option<Geometry>;

    /// Sets the visual transform, in parent coordinates, applied on top of
    /// the element's layout box.
    fn set_transform(&mut self, transform: Affine);

    /// Sets the visual opacity.
    fn set_opacity(&mut self, opacity: f64);

    /// Moves the element's layout box.
    ///
    /// The engine never calls this; it is how a caller's layout mutation
    /// reaches elements through a `&mut dyn RenderTree`.
    fn set_layout(&mut self, layout: Rect);

    /// Removes the element from the render tree.
    fn detach(&mut self);

    /// Puts a detached element back into the render tree.
    fn attach(&mut self);

    /// Returns `true` while the element is attached.
    fn is_attached(&self) -> bool {
        self.geometry().is_some()
    }
}

/// Keyed access to the elements of a render tree.
///
/// This trait is object safe; the engine works with `&mut dyn RenderTree<K>`
/// so deferred layout mutations can be stored alongside running animations.
pub trait RenderTree<K> {
    /// Returns the element for `key`.
    fn element(&self, key: &K) -> Option<&dyn Renderable>;

    /// Returns the element for `key` mutably.
    fn element_mut(&mut self, key: &K) -> Option<&mut dyn Renderable>;
}

/// A headless element: a layout box plus a visual transform and opacity.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HeadlessElement {
    layout: Rect,
    transform: Affine,
    opacity: f64,
    attached: bool,
}

impl HeadlessElement {
    /// Creates an attached, fully opaque element laid out at `layout`.
    #[must_use]
    pub fn new(layout: Rect) -> Self {
        Self {
            layout,
            transform: Affine::IDENTITY,
            opacity: 1.0,
            attached: true,
        }
    }

    /// The layout box, ignoring any visual transform.
    #[must_use]
    pub fn layout(&self) -> Rect {
        self.layout
    }

    /// The current visual transform.
    #[must_use]
    pub fn transform(&self) -> Affine {
        self.transform
    }

    /// The current visual opacity.
    #[must_use]
    pub fn opacity(&self) -> f64 {
        self.opacity
    }
}

impl Renderable for HeadlessElement {
    fn geometry(&self) -> Option<Geometry> {
        self.attached.then(|| {
            Geometry::new(self.transform.transform_rect_bbox(self.layout), self.opacity)
        })
    }

    fn set_transform(&mut self, transform: Affine) {
        self.transform = transform;
    }

    fn set_opacity(&mut self, opacity: f64) {
        self.opacity = opacity.clamp(0.0, 1.0);
    }

    fn set_layout(&mut self, layout: Rect) {
        self.layout = layout;
    }

    fn detach(&mut self) {
        self.attached = false;
    }

    fn attach(&mut self) {
        self.attached = true;
    }
}

/// A render tree of [`HeadlessElement`]s, for tests and display-less hosts.
#[derive(Clone, Debug)]
pub struct HeadlessTree<K> {
    elements: HashMap<K, HeadlessElement>,
}

impl<K> Default for HeadlessTree<K> {
    fn default() -> Self {
        Self {
            elements: HashMap::new(),
        }
    }
}

impl<K: Eq + Hash> HeadlessTree<K> {
    /// Creates an empty tree.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts or replaces an element laid out at `layout`.
    pub fn insert(&mut self, key: K, layout: Rect) -> &mut HeadlessElement {
        self.elements
            .entry(key)
            .and_modify(|e| *e = HeadlessElement::new(layout))
            .or_insert_with(|| HeadlessElement::new(layout))
    }

    /// Removes an element entirely.
    pub fn remove(&mut self, key: &K) -> Option<HeadlessElement> {
        self.elements.remove(key)
    }

    /// Returns the element for `key`.
    #[must_use]
    pub fn get(&self, key: &K) -> Option<&HeadlessElement> {
        self.elements.get(key)
    }

    /// Returns the element for `key` mutably.
    pub fn get_mut(&mut self, key: &K) -> Option<&mut HeadlessElement> {
        self.elements.get_mut(key)
    }

    /// Number of elements, attached or not.
    #[must_use]
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    /// Returns `true` when the tree holds no elements.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Iterates all elements in arbitrary order.
    pub fn iter(&self) -> impl Iterator<Item = (&K, &HeadlessElement)> + '_ {
        self.elements.iter()
    }
}

impl<K: Eq + Hash> RenderTree<K> for HeadlessTree<K> {
    fn element(&self, key: &K) -> Option<&dyn Renderable> {
        self.elements.get(key).map(|e| e as &dyn Renderable)
    }

    fn element_mut(&mut self, key: &K) -> Option<&mut dyn Renderable> {
        self.elements.get_mut(key).map(|e| e as &mut dyn Renderable)
    }
}
