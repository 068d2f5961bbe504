// Copyright 2026 the Stratum Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A drawing context that records a display list.
//!
//! [`DisplayList`] implements [`DrawingContext`] by appending every call as a
//! [`DrawOp`]. It checks scope discipline as it goes: popping a scope that is
//! not the innermost open one fails with [`RenderError::Backend`]. Individual
//! capabilities can be switched off to exercise fallback paths.

use kurbo::{Affine, Rect, RoundedRect};
use stratum_core::context::{DrawingContext, Pen};
use stratum_core::error::{Capability, RenderError};
use stratum_core::node::{BrushId, GeometryId, SurfaceId};
use stratum_core::render::ScopeKind;

/// One recorded drawing operation.
#[derive(Clone, Debug, PartialEq)]
pub enum DrawOp {
    /// [`DrawingContext::set_transform`].
    SetTransform(Affine),
    /// [`DrawingContext::push_opacity`].
    PushOpacity(f32),
    /// [`DrawingContext::pop_opacity`].
    PopOpacity,
    /// [`DrawingContext::push_clip`].
    PushClip(Rect),
    /// [`DrawingContext::pop_clip`].
    PopClip,
    /// [`DrawingContext::push_geometry_clip`].
    PushGeometryClip(GeometryId),
    /// [`DrawingContext::pop_geometry_clip`].
    PopGeometryClip,
    /// [`DrawingContext::push_opacity_mask`].
    PushOpacityMask {
        /// Mask brush.
        mask: BrushId,
        /// Mask bounds in the current coordinate space.
        bounds: Rect,
    },
    /// [`DrawingContext::pop_opacity_mask`].
    PopOpacityMask,
    /// [`DrawingContext::fill_rect`].
    FillRect {
        /// Rectangle in the current coordinate space.
        rect: RoundedRect,
        /// Fill brush.
        brush: BrushId,
    },
    /// [`DrawingContext::stroke_rect`].
    StrokeRect {
        /// Rectangle in the current coordinate space.
        rect: RoundedRect,
        /// Outline style.
        pen: Pen,
    },
    /// [`DrawingContext::draw_surface`].
    DrawSurface {
        /// Surface drawn.
        surface: SurfaceId,
        /// Destination in the current coordinate space.
        dest: Rect,
        /// Compositing opacity.
        opacity: f32,
    },
}

/// A [`DrawingContext`] that records calls instead of drawing.
#[derive(Debug, Default)]
pub struct DisplayList {
    ops: Vec<DrawOp>,
    open: Vec<ScopeKind>,
    max_depth: usize,
    disabled: Vec<Capability>,
}

impl DisplayList {
    /// Creates an empty display list supporting every capability.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes the list reject `capability` with [`RenderError::Unsupported`].
    #[must_use]
    pub fn without(mut self, capability: Capability) -> Self {
        if !self.disabled.contains(&capability) {
            self.disabled.push(capability);
        }
        self
    }

    /// Returns the recorded operations.
    #[must_use]
    pub fn ops(&self) -> &[DrawOp] {
        &self.ops
    }

    /// Consumes the list and returns the recorded operations.
    #[must_use]
    pub fn into_ops(self) -> Vec<DrawOp> {
        self.ops
    }

    /// Returns the number of currently open scopes.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.open.len()
    }

    /// Returns the deepest scope nesting seen so far.
    #[must_use]
    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    /// Returns whether every pushed scope has been popped.
    #[must_use]
    pub fn is_balanced(&self) -> bool {
        self.open.is_empty()
    }

    fn check(&self, capability: Capability) -> Result<(), RenderError> {
        if self.disabled.contains(&capability) {
            Err(RenderError::Unsupported(capability))
        } else {
            Ok(())
        }
    }

    fn push(&mut self, kind: ScopeKind, op: DrawOp) {
        self.ops.push(op);
        self.open.push(kind);
        self.max_depth = self.max_depth.max(self.open.len());
    }

    fn pop(&mut self, kind: ScopeKind, op: DrawOp) -> Result<(), RenderError> {
        match self.open.last() {
            Some(&top) if top == kind => {
                self.open.pop();
                self.ops.push(op);
                Ok(())
            }
            top => Err(RenderError::Backend(format!(
                "pop of {kind:?} scope with {top:?} innermost"
            ))),
        }
    }
}

impl DrawingContext for DisplayList {
    fn set_transform(&mut self, transform: Affine) {
        self.ops.push(DrawOp::SetTransform(transform));
    }

    fn push_opacity(&mut self, opacity: f32) -> Result<(), RenderError> {
        self.push(ScopeKind::Opacity, DrawOp::PushOpacity(opacity));
        Ok(())
    }

    fn pop_opacity(&mut self) -> Result<(), RenderError> {
        self.pop(ScopeKind::Opacity, DrawOp::PopOpacity)
    }

    fn push_clip(&mut self, clip: Rect) -> Result<(), RenderError> {
        self.push(ScopeKind::Clip, DrawOp::PushClip(clip));
        Ok(())
    }

    fn pop_clip(&mut self) -> Result<(), RenderError> {
        self.pop(ScopeKind::Clip, DrawOp::PopClip)
    }

    fn push_geometry_clip(&mut self, geometry: GeometryId) -> Result<(), RenderError> {
        self.check(Capability::GeometryClip)?;
        self.push(ScopeKind::GeometryClip, DrawOp::PushGeometryClip(geometry));
        Ok(())
    }

    fn pop_geometry_clip(&mut self) -> Result<(), RenderError> {
        self.pop(ScopeKind::GeometryClip, DrawOp::PopGeometryClip)
    }

    fn push_opacity_mask(&mut self, mask: BrushId, bounds: Rect) -> Result<(), RenderError> {
        self.check(Capability::OpacityMask)?;
        self.push(
            ScopeKind::OpacityMask,
            DrawOp::PushOpacityMask { mask, bounds },
        );
        Ok(())
    }

    fn pop_opacity_mask(&mut self) -> Result<(), RenderError> {
        self.pop(ScopeKind::OpacityMask, DrawOp::PopOpacityMask)
    }

    fn fill_rect(&mut self, rect: RoundedRect, brush: BrushId) -> Result<(), RenderError> {
        self.ops.push(DrawOp::FillRect { rect, brush });
        Ok(())
    }

    fn stroke_rect(&mut self, rect: RoundedRect, pen: Pen) -> Result<(), RenderError> {
        self.check(Capability::StrokeRect)?;
        self.ops.push(DrawOp::StrokeRect { rect, pen });
        Ok(())
    }

    fn draw_surface(
        &mut self,
        surface: SurfaceId,
        dest: Rect,
        opacity: f32,
    ) -> Result<(), RenderError> {
        self.check(Capability::DrawSurface)?;
        self.ops.push(DrawOp::DrawSurface {
            surface,
            dest,
            opacity,
        });
        Ok(())
    }
}
