// Copyright 2026 the Stratum Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Container nodes mirroring visuals.

use alloc::sync::Arc;
use alloc::vec::Vec;

use kurbo::{Affine, Rect};

use super::id::{BrushId, GeometryId, VisualId};
use super::traverse::Descendants;
use super::SceneNode;
use crate::error::ConstructionError;

/// A visual (UI-tree object) as seen by the scene graph.
///
/// Only identity and parentage are needed, to validate that the mirrored
/// tree has the same roots as the visual tree.
pub trait Visual {
    /// Returns this visual's identity.
    fn id(&self) -> VisualId;

    /// Returns the identity of this visual's parent in the visual tree.
    fn parent(&self) -> Option<VisualId>;

    /// Returns whether this visual has a parent in the visual tree.
    fn has_parent(&self) -> bool {
        self.parent().is_some()
    }
}

/// A container scene node: one per mirrored visual.
///
/// Carries the visual's transform, clip, and opacity state plus an ordered
/// list of children. Children are drawn in order, so the last child is the
/// topmost.
///
/// A node is freely mutable while the builder owns it. Once it is shared
/// through an [`Arc`] (as a child, or inside a published
/// [`Snapshot`](crate::scene::Snapshot)) it can only be changed through
/// copy-on-write, see [`child_mut`](Self::child_mut).
#[derive(Clone, Debug)]
pub struct VisualNode {
    visual: VisualId,
    parent: Option<VisualId>,
    transform: Affine,
    clip_bounds: Rect,
    clip_to_bounds: bool,
    geometry_clip: Option<GeometryId>,
    opacity: f32,
    opacity_mask: Option<BrushId>,
    children: Vec<SceneNode>,
    subtree_updated: bool,
}

impl VisualNode {
    /// Creates a node mirroring `visual` under `parent`.
    ///
    /// The node starts with an identity transform, opacity 1, no clips, no
    /// opacity mask, and no children. Setting the real state is the
    /// builder's job, as is linking the node into `parent` with
    /// [`add_child`](Self::add_child).
    ///
    /// # Errors
    ///
    /// Fails if root-ness of the node would not match root-ness of the
    /// visual, or if `parent` does not mirror the visual's parent.
    pub fn new(visual: &dyn Visual, parent: Option<&Self>) -> Result<Self, ConstructionError> {
        let id = visual.id();
        match (parent.map(Self::visual), visual.parent()) {
            (None, Some(visual_parent)) => {
                return Err(ConstructionError::RootForParentedVisual {
                    visual: id,
                    visual_parent,
                });
            }
            (Some(node_parent), None) => {
                return Err(ConstructionError::ParentedNodeForRootVisual {
                    visual: id,
                    node_parent,
                });
            }
            (Some(node_parent), Some(visual_parent)) if node_parent != visual_parent => {
                return Err(ConstructionError::ParentMismatch {
                    visual: id,
                    visual_parent,
                    node_parent,
                });
            }
            _ => {}
        }
        Ok(Self::with_parent(id, parent.map(Self::visual)))
    }

    fn with_parent(visual: VisualId, parent: Option<VisualId>) -> Self {
        Self {
            visual,
            parent,
            transform: Affine::IDENTITY,
            clip_bounds: Rect::ZERO,
            clip_to_bounds: false,
            geometry_clip: None,
            opacity: 1.0,
            opacity_mask: None,
            children: Vec::new(),
            subtree_updated: false,
        }
    }

    /// Copies this node's visual state to a new node under `new_parent`.
    ///
    /// The copy has the same visual, transform, clips, opacity, and mask,
    /// but no children; the caller decides per subtree whether to clone or
    /// re-link descendants. Runs in constant time regardless of subtree size.
    #[must_use]
    pub fn clone_for(&self, new_parent: &Self) -> Self {
        self.shallow_copy(Some(new_parent.visual))
    }

    /// Like [`clone_for`](Self::clone_for), but the copy is a root.
    ///
    /// Used when the mirrored visual has been detached from its visual
    /// parent and its subtree should be kept.
    #[must_use]
    pub fn detach_root(&self) -> Self {
        self.shallow_copy(None)
    }

    fn shallow_copy(&self, parent: Option<VisualId>) -> Self {
        Self {
            transform: self.transform,
            clip_bounds: self.clip_bounds,
            clip_to_bounds: self.clip_to_bounds,
            geometry_clip: self.geometry_clip,
            opacity: self.opacity,
            opacity_mask: self.opacity_mask,
            ..Self::with_parent(self.visual, parent)
        }
    }

    // -- Identity --

    /// Returns the visual this node mirrors.
    #[inline]
    #[must_use]
    pub fn visual(&self) -> VisualId {
        self.visual
    }

    /// Returns the visual of the parent node, or `None` for a root.
    #[inline]
    #[must_use]
    pub fn parent(&self) -> Option<VisualId> {
        self.parent
    }

    /// Returns whether this node is a tree root.
    #[inline]
    #[must_use]
    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }

    // -- Visual state --

    /// Returns the transform assigned to the drawing context for this node.
    #[must_use]
    pub fn transform(&self) -> Affine {
        self.transform
    }

    /// Returns the clip rectangle.
    #[must_use]
    pub fn clip_bounds(&self) -> Rect {
        self.clip_bounds
    }

    /// Returns whether drawing is clipped to [`clip_bounds`](Self::clip_bounds).
    #[must_use]
    pub fn clip_to_bounds(&self) -> bool {
        self.clip_to_bounds
    }

    /// Returns the geometry clip, if any.
    #[must_use]
    pub fn geometry_clip(&self) -> Option<GeometryId> {
        self.geometry_clip
    }

    /// Returns the opacity.
    #[must_use]
    pub fn opacity(&self) -> f32 {
        self.opacity
    }

    /// Returns the opacity mask brush, if any.
    #[must_use]
    pub fn opacity_mask(&self) -> Option<BrushId> {
        self.opacity_mask
    }

    /// Returns whether the builder marked this subtree as changed.
    #[must_use]
    pub fn subtree_updated(&self) -> bool {
        self.subtree_updated
    }

    /// Sets the transform.
    pub fn set_transform(&mut self, transform: Affine) {
        self.transform = transform;
    }

    /// Sets the clip rectangle.
    pub fn set_clip_bounds(&mut self, clip_bounds: Rect) {
        self.clip_bounds = clip_bounds;
    }

    /// Sets whether drawing is clipped to the clip rectangle.
    pub fn set_clip_to_bounds(&mut self, clip_to_bounds: bool) {
        self.clip_to_bounds = clip_to_bounds;
    }

    /// Sets or clears the geometry clip.
    pub fn set_geometry_clip(&mut self, geometry_clip: Option<GeometryId>) {
        self.geometry_clip = geometry_clip;
    }

    /// Sets the opacity. Not validated; see [`DrawingContext::push_opacity`].
    ///
    /// [`DrawingContext::push_opacity`]: crate::context::DrawingContext::push_opacity
    pub fn set_opacity(&mut self, opacity: f32) {
        self.opacity = opacity;
    }

    /// Sets or clears the opacity mask.
    pub fn set_opacity_mask(&mut self, opacity_mask: Option<BrushId>) {
        self.opacity_mask = opacity_mask;
    }

    /// Marks or unmarks this subtree as changed since the last frame.
    pub fn set_subtree_updated(&mut self, subtree_updated: bool) {
        self.subtree_updated = subtree_updated;
    }

    // -- Children --

    /// Returns the children in paint order.
    #[inline]
    #[must_use]
    pub fn children(&self) -> &[SceneNode] {
        &self.children
    }

    /// Appends `child` as the topmost child.
    ///
    /// # Panics
    ///
    /// Panics if `child` is a container node whose parent is not this node.
    pub fn add_child(&mut self, child: impl Into<SceneNode>) {
        let child = child.into();
        self.check_parent(&child);
        self.children.push(child);
    }

    /// Inserts `child` at `index`, shifting later children up.
    ///
    /// # Panics
    ///
    /// Panics if `index > len`, or if `child` is a container node whose
    /// parent is not this node.
    pub fn insert_child(&mut self, index: usize, child: impl Into<SceneNode>) {
        assert!(
            index <= self.children.len(),
            "child index {index} out of range (len {})",
            self.children.len()
        );
        let child = child.into();
        self.check_parent(&child);
        self.children.insert(index, child);
    }

    /// Removes and returns the child at `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of range.
    pub fn remove_child(&mut self, index: usize) -> SceneNode {
        self.check_index(index);
        self.children.remove(index)
    }

    /// Replaces the child at `index`, returning the old one.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of range, or if `child` is a container node
    /// whose parent is not this node.
    pub fn replace_child(&mut self, index: usize, child: impl Into<SceneNode>) -> SceneNode {
        self.check_index(index);
        let child = child.into();
        self.check_parent(&child);
        core::mem::replace(&mut self.children[index], child)
    }

    /// Removes all children.
    pub fn clear_children(&mut self) {
        self.children.clear();
    }

    /// Returns mutable access to the container child at `index`.
    ///
    /// If the child is shared (by a published snapshot, or another tree),
    /// it is copied first and the copy takes its place here; other holders
    /// keep seeing the old node. Returns `None` for draw-node children and
    /// out-of-range indices.
    pub fn child_mut(&mut self, index: usize) -> Option<&mut Self> {
        match self.children.get_mut(index)? {
            SceneNode::Visual(node) => Some(Arc::make_mut(node)),
            SceneNode::Draw(_) => None,
        }
    }

    // -- Lookup --

    /// Iterates all descendants in depth-first pre-order (paint order).
    #[must_use]
    pub fn descendants(&self) -> Descendants<'_> {
        Descendants::new(&self.children)
    }

    /// Finds the container node mirroring `visual` in this subtree,
    /// including this node itself.
    #[must_use]
    pub fn find(&self, visual: VisualId) -> Option<&Self> {
        if self.visual == visual {
            return Some(self);
        }
        self.descendants()
            .filter_map(|(_, node)| node.as_visual())
            .find(|node| node.visual == visual)
    }

    // -- Internal helpers --

    fn check_index(&self, index: usize) {
        assert!(
            index < self.children.len(),
            "child index {index} out of range (len {})",
            self.children.len()
        );
    }

    fn check_parent(&self, child: &SceneNode) {
        if let SceneNode::Visual(node) = child {
            assert!(
                node.parent == Some(self.visual),
                "child {:?} has parent {:?}, expected {:?}",
                node.visual,
                node.parent,
                self.visual
            );
        }
    }
}
