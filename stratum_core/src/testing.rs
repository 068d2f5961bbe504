// Copyright 2026 the Stratum Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Test doubles shared by the unit tests.

use alloc::sync::Arc;
use alloc::vec::Vec;
use core::sync::atomic::{AtomicUsize, Ordering};

use kurbo::{Affine, Point, Rect, RoundedRect};

use crate::context::{DrawingContext, Pen};
use crate::error::{Capability, RenderError};
use crate::node::{BrushId, DrawNode, GeometryId, SurfaceId, Visual, VisualId};

/// A visual with a fixed identity and parent.
#[derive(Clone, Copy, Debug)]
pub(crate) struct TestVisual {
    id: u64,
    parent: Option<u64>,
}

impl TestVisual {
    pub(crate) fn root(id: u64) -> Self {
        Self { id, parent: None }
    }

    pub(crate) fn child(id: u64, parent: u64) -> Self {
        Self {
            id,
            parent: Some(parent),
        }
    }
}

impl Visual for TestVisual {
    fn id(&self) -> VisualId {
        VisualId(self.id)
    }

    fn parent(&self) -> Option<VisualId> {
        self.parent.map(VisualId)
    }
}

/// One recorded drawing-context call.
#[derive(Clone, Debug, PartialEq)]
pub(crate) enum Op {
    SetTransform(Affine),
    PushOpacity(f32),
    PopOpacity,
    PushClip(Rect),
    PopClip,
    PushGeometryClip(GeometryId),
    PopGeometryClip,
    PushOpacityMask(BrushId, Rect),
    PopOpacityMask,
    FillRect(RoundedRect, BrushId),
    StrokeRect(RoundedRect, Pen),
    DrawSurface(SurfaceId, Rect, f32),
}

impl Op {
    pub(crate) fn is_push(&self) -> bool {
        matches!(
            self,
            Self::PushOpacity(_)
                | Self::PushClip(_)
                | Self::PushGeometryClip(_)
                | Self::PushOpacityMask(..)
        )
    }

    pub(crate) fn is_pop(&self) -> bool {
        matches!(
            self,
            Self::PopOpacity | Self::PopClip | Self::PopGeometryClip | Self::PopOpacityMask
        )
    }
}

/// The operation a tagged [`Probe`] records when rendered.
pub(crate) fn draw_op(tag: u32) -> Op {
    Op::FillRect(RoundedRect::from_rect(Rect::ZERO, 0.0), BrushId(tag))
}

/// A drawing context that records every call.
#[derive(Debug)]
pub(crate) struct RecordingContext {
    pub(crate) ops: Vec<Op>,
    pub(crate) supports_geometry_clip: bool,
    pub(crate) fail_pops: bool,
}

impl Default for RecordingContext {
    fn default() -> Self {
        Self {
            ops: Vec::new(),
            supports_geometry_clip: true,
            fail_pops: false,
        }
    }
}

impl RecordingContext {
    fn pop(&mut self, op: Op) -> Result<(), RenderError> {
        self.ops.push(op);
        if self.fail_pops {
            Err(RenderError::Backend("pop failed".into()))
        } else {
            Ok(())
        }
    }
}

impl DrawingContext for RecordingContext {
    fn set_transform(&mut self, transform: Affine) {
        self.ops.push(Op::SetTransform(transform));
    }

    fn push_opacity(&mut self, opacity: f32) -> Result<(), RenderError> {
        self.ops.push(Op::PushOpacity(opacity));
        Ok(())
    }

    fn pop_opacity(&mut self) -> Result<(), RenderError> {
        self.pop(Op::PopOpacity)
    }

    fn push_clip(&mut self, clip: Rect) -> Result<(), RenderError> {
        self.ops.push(Op::PushClip(clip));
        Ok(())
    }

    fn pop_clip(&mut self) -> Result<(), RenderError> {
        self.pop(Op::PopClip)
    }

    fn push_geometry_clip(&mut self, geometry: GeometryId) -> Result<(), RenderError> {
        if !self.supports_geometry_clip {
            return Err(RenderError::Unsupported(Capability::GeometryClip));
        }
        self.ops.push(Op::PushGeometryClip(geometry));
        Ok(())
    }

    fn pop_geometry_clip(&mut self) -> Result<(), RenderError> {
        self.pop(Op::PopGeometryClip)
    }

    fn push_opacity_mask(&mut self, mask: BrushId, bounds: Rect) -> Result<(), RenderError> {
        self.ops.push(Op::PushOpacityMask(mask, bounds));
        Ok(())
    }

    fn pop_opacity_mask(&mut self) -> Result<(), RenderError> {
        self.pop(Op::PopOpacityMask)
    }

    fn fill_rect(&mut self, rect: RoundedRect, brush: BrushId) -> Result<(), RenderError> {
        self.ops.push(Op::FillRect(rect, brush));
        Ok(())
    }

    fn stroke_rect(&mut self, rect: RoundedRect, pen: Pen) -> Result<(), RenderError> {
        self.ops.push(Op::StrokeRect(rect, pen));
        Ok(())
    }

    fn draw_surface(
        &mut self,
        surface: SurfaceId,
        dest: Rect,
        opacity: f32,
    ) -> Result<(), RenderError> {
        self.ops.push(Op::DrawSurface(surface, dest, opacity));
        Ok(())
    }
}

/// A draw node with a fixed hit-test answer and call counters.
///
/// Clones share their counters, so a test can keep a clone after handing
/// the probe to a tree.
#[derive(Clone, Debug)]
pub(crate) struct Probe {
    hits: bool,
    fails: bool,
    tag: Option<u32>,
    renders: Arc<AtomicUsize>,
    hit_tests: Arc<AtomicUsize>,
}

impl Probe {
    fn new(hits: bool, fails: bool) -> Self {
        Self {
            hits,
            fails,
            tag: None,
            renders: Arc::new(AtomicUsize::new(0)),
            hit_tests: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// A probe that reports every point as a hit.
    pub(crate) fn hit() -> Self {
        Self::new(true, false)
    }

    /// A probe that never reports a hit.
    pub(crate) fn miss() -> Self {
        Self::new(false, false)
    }

    /// A probe whose render fails with [`RenderError::ResourceExhausted`].
    pub(crate) fn failing() -> Self {
        Self::new(false, true)
    }

    /// Makes the probe record [`draw_op(tag)`](draw_op) when rendered.
    pub(crate) fn tagged(mut self, tag: u32) -> Self {
        self.tag = Some(tag);
        self
    }

    pub(crate) fn renders(&self) -> usize {
        self.renders.load(Ordering::Relaxed)
    }

    pub(crate) fn hit_tests(&self) -> usize {
        self.hit_tests.load(Ordering::Relaxed)
    }
}

impl DrawNode for Probe {
    fn render(&self, cx: &mut dyn DrawingContext) -> Result<(), RenderError> {
        self.renders.fetch_add(1, Ordering::Relaxed);
        if self.fails {
            return Err(RenderError::ResourceExhausted);
        }
        if let Some(tag) = self.tag {
            cx.fill_rect(RoundedRect::from_rect(Rect::ZERO, 0.0), BrushId(tag))?;
        }
        Ok(())
    }

    fn hit_test(&self, point: Point) -> bool {
        _ = point;
        self.hit_tests.fetch_add(1, Ordering::Relaxed);
        self.hits
    }
}
