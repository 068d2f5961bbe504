// Copyright 2026 the Stratum Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Built-in draw nodes.
//!
//! These cover the common leaves a drawing subsystem emits. Anything more
//! elaborate implements [`DrawNode`] directly.

use kurbo::{Affine, Point, Rect, RoundedRect, RoundedRectRadii, Shape};

use crate::context::{DrawingContext, Pen};
use crate::error::RenderError;
use crate::node::{BrushId, DrawNode, SceneNode, SurfaceId};
use crate::transform;

/// A filled and/or stroked (rounded) rectangle.
#[derive(Clone, Debug, PartialEq)]
pub struct RectangleNode {
    /// Full transform assigned before drawing.
    pub transform: Affine,
    /// Rectangle in local coordinates.
    pub rect: RoundedRect,
    /// Fill brush; no fill when `None`.
    pub brush: Option<BrushId>,
    /// Outline; no stroke when `None`.
    pub pen: Option<Pen>,
}

impl RectangleNode {
    /// Creates a filled rectangle with no outline.
    #[must_use]
    pub fn filled(transform: Affine, rect: RoundedRect, brush: BrushId) -> Self {
        Self {
            transform,
            rect,
            brush: Some(brush),
            pen: None,
        }
    }

    /// Adds an outline.
    #[must_use]
    pub fn with_pen(mut self, pen: Pen) -> Self {
        self.pen = Some(pen);
        self
    }

    fn in_stroke(&self, point: Point, pen: Pen) -> bool {
        let half = pen.thickness * 0.5;
        if half.is_nan() || half <= 0.0 {
            return false;
        }
        let outer = offset(self.rect, half);
        let inner = offset(self.rect, -half);
        let inner_empty = inner.width() <= 0.0 || inner.height() <= 0.0;
        outer.contains(point) && (inner_empty || !inner.contains(point))
    }
}

/// Grows (or shrinks, for negative `d`) a rounded rect by `d` on every side.
fn offset(rect: RoundedRect, d: f64) -> RoundedRect {
    let r = rect.radii();
    let grow = |radius: f64| (radius + d).max(0.0);
    let bounds = rect.rect().abs().inflate(d, d);
    let bounds = if bounds.width() < 0.0 || bounds.height() < 0.0 {
        Rect::from_center_size(bounds.center(), (0.0, 0.0))
    } else {
        bounds
    };
    RoundedRect::from_rect(
        bounds,
        RoundedRectRadii::new(
            grow(r.top_left),
            grow(r.top_right),
            grow(r.bottom_right),
            grow(r.bottom_left),
        ),
    )
}

impl DrawNode for RectangleNode {
    fn render(&self, cx: &mut dyn DrawingContext) -> Result<(), RenderError> {
        cx.set_transform(self.transform);
        if let Some(brush) = self.brush {
            cx.fill_rect(self.rect, brush)?;
        }
        if let Some(pen) = self.pen {
            cx.stroke_rect(self.rect, pen)?;
        }
        Ok(())
    }

    fn hit_test(&self, point: Point) -> bool {
        let Some(local) = transform::to_local(self.transform, point) else {
            return false;
        };
        if self.brush.is_some() && self.rect.contains(local) {
            return true;
        }
        self.pen.is_some_and(|pen| self.in_stroke(local, pen))
    }
}

impl From<RectangleNode> for SceneNode {
    fn from(node: RectangleNode) -> Self {
        Self::draw(node)
    }
}

/// A composited surface (an offscreen layer or decoded image).
#[derive(Clone, Debug, PartialEq)]
pub struct SurfaceNode {
    /// Full transform assigned before drawing.
    pub transform: Affine,
    /// Surface to draw.
    pub surface: SurfaceId,
    /// Destination rectangle in local coordinates.
    pub dest: Rect,
    /// Opacity applied while compositing the surface.
    pub opacity: f32,
}

impl DrawNode for SurfaceNode {
    fn render(&self, cx: &mut dyn DrawingContext) -> Result<(), RenderError> {
        cx.set_transform(self.transform);
        cx.draw_surface(self.surface, self.dest, self.opacity)
    }

    fn hit_test(&self, point: Point) -> bool {
        transform::to_local(self.transform, point).is_some_and(|local| self.dest.contains(local))
    }
}

impl From<SurfaceNode> for SceneNode {
    fn from(node: SurfaceNode) -> Self {
        Self::draw(node)
    }
}
