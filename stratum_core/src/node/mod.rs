// Copyright 2026 the Stratum Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Scene node data model.
//!
//! A scene graph is a tree of [`SceneNode`]s mirroring the visual (UI) tree.
//! Nodes come in two kinds:
//!
//! - **Container nodes** ([`VisualNode`]): one per mirrored visual. They
//!   carry a transform, a rectangular clip, an optional geometry clip,
//!   opacity, an optional opacity mask, and an ordered list of children.
//!   They draw nothing themselves.
//! - **Draw nodes** ([`DrawNode`]): leaves supplied by a drawing subsystem.
//!   They render content and answer point hit tests.
//!
//! Children are held behind [`Arc`], which makes the tree persistent: a
//! builder can share unchanged subtrees between frames and copy only the
//! path to a change (see [`VisualNode::child_mut`]).
//!
//! # Identity
//!
//! Nodes refer to visuals and to their parent by [`VisualId`], never by
//! owning pointer. The parent link exists for lookup and validation only.

mod draw;
mod id;
mod traverse;
mod visual;

use alloc::sync::Arc;

pub use draw::DrawNode;
pub use id::{BrushId, GeometryId, SurfaceId, VisualId};
pub use traverse::Descendants;
pub use visual::{Visual, VisualNode};

/// A node in the scene graph.
#[derive(Clone, Debug)]
pub enum SceneNode {
    /// A container mirroring a visual.
    Visual(Arc<VisualNode>),
    /// A leaf that draws content.
    Draw(Arc<dyn DrawNode>),
}

impl SceneNode {
    /// Wraps a draw node.
    #[must_use]
    pub fn draw(node: impl DrawNode + 'static) -> Self {
        Self::Draw(Arc::new(node))
    }

    /// Returns the container node, if this is one.
    #[must_use]
    pub fn as_visual(&self) -> Option<&VisualNode> {
        match self {
            Self::Visual(node) => Some(node),
            Self::Draw(_) => None,
        }
    }

    /// Returns the draw node, if this is one.
    #[must_use]
    pub fn as_draw(&self) -> Option<&dyn DrawNode> {
        match self {
            Self::Visual(_) => None,
            Self::Draw(node) => Some(&**node),
        }
    }

    /// Returns whether both handles point at the same node allocation.
    ///
    /// Useful for checking which subtrees two snapshots share.
    #[must_use]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Visual(a), Self::Visual(b)) => Arc::ptr_eq(a, b),
            (Self::Draw(a), Self::Draw(b)) => core::ptr::addr_eq(Arc::as_ptr(a), Arc::as_ptr(b)),
            _ => false,
        }
    }
}

impl From<VisualNode> for SceneNode {
    fn from(node: VisualNode) -> Self {
        Self::Visual(Arc::new(node))
    }
}

impl From<Arc<VisualNode>> for SceneNode {
    fn from(node: Arc<VisualNode>) -> Self {
        Self::Visual(node)
    }
}

impl From<Arc<dyn DrawNode>> for SceneNode {
    fn from(node: Arc<dyn DrawNode>) -> Self {
        Self::Draw(node)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{Probe, TestVisual};

    #[test]
    fn tag_accessors() {
        let visual = SceneNode::from(VisualNode::new(&TestVisual::root(1), None).unwrap());
        let draw = SceneNode::draw(Probe::hit());
        assert!(visual.as_visual().is_some());
        assert!(visual.as_draw().is_none());
        assert!(draw.as_draw().is_some());
        assert!(draw.as_visual().is_none());
    }

    #[test]
    fn ptr_eq_tracks_sharing() {
        let a = SceneNode::draw(Probe::hit());
        let b = a.clone();
        let c = SceneNode::draw(Probe::hit());
        assert!(a.ptr_eq(&b));
        assert!(!a.ptr_eq(&c));

        let v = SceneNode::from(VisualNode::new(&TestVisual::root(1), None).unwrap());
        assert!(v.ptr_eq(&v.clone()));
        assert!(!v.ptr_eq(&a));
    }
}
