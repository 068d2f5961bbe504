// Copyright 2026 the Stratum Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Render traversal.
//!
//! Rendering is a depth-first pre-order walk. For each container node the
//! traversal:
//!
//! 1. **Assigns the transform**: [`set_transform`] with the node's matrix
//!    (overwrite, not compose).
//! 2. **Pushes scopes**: opacity (when not 1), rectangular clip (when
//!    `clip_to_bounds`), geometry clip, opacity mask, in that order.
//! 3. **Recurses**: renders children in stored order. Draw nodes render
//!    themselves.
//! 4. **Pops scopes**: in reverse push order.
//!
//! # Clip coordinate space
//!
//! `clip_bounds` is expressed in the space the node's transform maps *from*
//! the context's point of view: it is given before the transform is applied,
//! but the clip is pushed after [`set_transform`], so the rectangle is first
//! mapped through the inverse transform. Under rotation or skew the pushed
//! clip is the axis-aligned bounding box of the mapped rectangle.
//!
//! # Failures
//!
//! Drawing-context failures abort the pass and are returned to the caller.
//! Every scope that was pushed successfully is still popped, in order,
//! before the error is returned; a push that failed is not popped. When
//! several calls fail, the first error wins.
//!
//! [`set_transform`]: DrawingContext::set_transform

use crate::context::DrawingContext;
use crate::error::RenderError;
use crate::node::{SceneNode, VisualId, VisualNode};
use crate::trace::{
    NodeEnterEvent, RenderPassBeginEvent, RenderPassEndEvent, ScopeAction, ScopeEvent, Tracer,
};
use crate::transform;

/// A kind of drawing-context scope pushed by the render traversal.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ScopeKind {
    /// [`push_opacity`](DrawingContext::push_opacity).
    Opacity,
    /// [`push_clip`](DrawingContext::push_clip).
    Clip,
    /// [`push_geometry_clip`](DrawingContext::push_geometry_clip).
    GeometryClip,
    /// [`push_opacity_mask`](DrawingContext::push_opacity_mask).
    OpacityMask,
}

impl ScopeKind {
    fn pop(self, cx: &mut dyn DrawingContext) -> Result<(), RenderError> {
        match self {
            Self::Opacity => cx.pop_opacity(),
            Self::Clip => cx.pop_clip(),
            Self::GeometryClip => cx.pop_geometry_clip(),
            Self::OpacityMask => cx.pop_opacity_mask(),
        }
    }
}

impl VisualNode {
    /// Renders this node and its subtree into `cx`.
    ///
    /// # Errors
    ///
    /// Returns the first failure reported by `cx` or a draw node. Scopes
    /// pushed before the failure have been popped by the time this returns.
    pub fn render(&self, cx: &mut dyn DrawingContext) -> Result<(), RenderError> {
        self.render_traced(cx, &mut Tracer::none())
    }

    /// Like [`render`](Self::render), reporting the pass to `tracer`.
    ///
    /// # Errors
    ///
    /// See [`render`](Self::render).
    pub fn render_traced(
        &self,
        cx: &mut dyn DrawingContext,
        tracer: &mut Tracer<'_>,
    ) -> Result<(), RenderError> {
        let root = self.visual();
        tracer.render_pass_begin(&RenderPassBeginEvent { root });
        let mut walk = Walk {
            tracer: &mut *tracer,
            depth: 0,
            nodes_visited: 0,
        };
        let result = render_visual(self, cx, &mut walk);
        let nodes_visited = walk.nodes_visited;
        tracer.render_pass_end(&RenderPassEndEvent {
            root,
            nodes_visited,
            failed: result.is_err(),
        });
        result
    }
}

impl SceneNode {
    /// Renders this node into `cx`, dispatching on its kind.
    ///
    /// # Errors
    ///
    /// See [`VisualNode::render`].
    pub fn render(&self, cx: &mut dyn DrawingContext) -> Result<(), RenderError> {
        match self {
            Self::Visual(node) => node.render(cx),
            Self::Draw(node) => node.render(cx),
        }
    }
}

/// Per-pass traversal state.
struct Walk<'t, 's> {
    tracer: &'t mut Tracer<'s>,
    depth: u32,
    nodes_visited: u64,
}

impl Walk<'_, '_> {
    fn enter(&mut self, visual: Option<VisualId>) {
        self.nodes_visited += 1;
        self.tracer.node_enter(&NodeEnterEvent {
            depth: self.depth,
            visual,
        });
    }

    fn scope(&mut self, kind: ScopeKind, action: ScopeAction) {
        self.tracer.scope(&ScopeEvent {
            depth: self.depth,
            kind,
            action,
        });
    }
}

/// Scopes pushed for one node, in push order.
#[derive(Default)]
struct ScopeStack {
    kinds: [Option<ScopeKind>; 4],
    len: usize,
}

impl ScopeStack {
    fn push(&mut self, kind: ScopeKind) {
        self.kinds[self.len] = Some(kind);
        self.len += 1;
    }

    fn pop(&mut self) -> Option<ScopeKind> {
        self.len = self.len.checked_sub(1)?;
        self.kinds[self.len].take()
    }
}

fn render_node(
    node: &SceneNode,
    cx: &mut dyn DrawingContext,
    walk: &mut Walk<'_, '_>,
) -> Result<(), RenderError> {
    match node {
        SceneNode::Visual(visual) => render_visual(visual, cx, walk),
        SceneNode::Draw(draw) => {
            walk.enter(None);
            draw.render(cx)
        }
    }
}

fn render_visual(
    node: &VisualNode,
    cx: &mut dyn DrawingContext,
    walk: &mut Walk<'_, '_>,
) -> Result<(), RenderError> {
    walk.enter(Some(node.visual()));
    cx.set_transform(node.transform());

    let mut scopes = ScopeStack::default();
    let mut result = push_and_recurse(node, cx, walk, &mut scopes);
    while let Some(kind) = scopes.pop() {
        let popped = kind.pop(cx);
        walk.scope(kind, ScopeAction::Pop);
        if result.is_ok() {
            result = popped;
        }
    }
    result
}

fn push_and_recurse(
    node: &VisualNode,
    cx: &mut dyn DrawingContext,
    walk: &mut Walk<'_, '_>,
    scopes: &mut ScopeStack,
) -> Result<(), RenderError> {
    let opacity = node.opacity();
    if opacity != 1.0 {
        cx.push_opacity(opacity)?;
        scopes.push(ScopeKind::Opacity);
        walk.scope(ScopeKind::Opacity, ScopeAction::Push);
    }

    let mask = node.opacity_mask();
    let bounds = (node.clip_to_bounds() || mask.is_some())
        .then(|| transform::inverse_rect_bbox(node.transform(), node.clip_bounds()));

    if let Some(bounds) = bounds.filter(|_| node.clip_to_bounds()) {
        cx.push_clip(bounds)?;
        scopes.push(ScopeKind::Clip);
        walk.scope(ScopeKind::Clip, ScopeAction::Push);
    }

    if let Some(geometry) = node.geometry_clip() {
        cx.push_geometry_clip(geometry)?;
        scopes.push(ScopeKind::GeometryClip);
        walk.scope(ScopeKind::GeometryClip, ScopeAction::Push);
    }

    if let (Some(mask), Some(bounds)) = (mask, bounds) {
        cx.push_opacity_mask(mask, bounds)?;
        scopes.push(ScopeKind::OpacityMask);
        walk.scope(ScopeKind::OpacityMask, ScopeAction::Push);
    }

    walk.depth += 1;
    let result = node
        .children()
        .iter()
        .try_for_each(|child| render_node(child, cx, walk));
    walk.depth -= 1;
    result
}
