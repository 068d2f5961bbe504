// Copyright 2026 the Stratum Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Drawing-context contract for rendering backends.
//!
//! The scene graph does not rasterize anything. Rendering a tree means
//! driving a [`DrawingContext`], a stateful, stack-based sink provided by a
//! backend (CPU rasterizer, GPU renderer, display-list recorder).
//!
//! # State model
//!
//! - **Transform**: a single current matrix, overwritten by every node
//!   through [`set_transform`](DrawingContext::set_transform).
//! - **Scopes**: opacity, rectangular clip, geometry clip, and opacity mask
//!   are pushed and popped in strict LIFO order. The traversal guarantees
//!   that every successful push is matched by exactly one pop, even when
//!   something between them fails.
//!
//! # Capabilities
//!
//! Geometry clips, opacity masks, stroked rectangles, and surfaces are
//! optional. Their default implementations fail with
//! [`RenderError::Unsupported`], which aborts the render pass if a node
//! actually needs them.
//!
//! # Frame loop pseudocode
//!
//! ```rust,ignore
//! fn on_frame(scene: &Scene, backend: &mut Backend) -> Result<(), RenderError> {
//!     // Builder thread has published the latest root with `scene.publish(..)`.
//!     let snapshot = scene.snapshot();
//!     let mut cx = backend.begin_frame();
//!     snapshot.render(&mut cx)?;
//!     backend.end_frame(cx);
//!     Ok(())
//! }
//! ```

use kurbo::{Affine, Rect, RoundedRect};

use crate::error::{Capability, RenderError};
use crate::node::{BrushId, GeometryId, SurfaceId};

/// Outline style for stroked shapes.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Pen {
    /// Brush used to paint the stroke.
    pub brush: BrushId,
    /// Stroke width in local units, centered on the outline.
    pub thickness: f64,
}

/// A stateful, stack-based drawing target.
pub trait DrawingContext {
    /// Replaces the current transform.
    ///
    /// This overwrites rather than composes: every scene node carries the
    /// full matrix for its own drawing.
    fn set_transform(&mut self, transform: Affine);

    /// Pushes an opacity scope. Everything drawn until the matching
    /// [`pop_opacity`](Self::pop_opacity) is composited at `opacity`.
    ///
    /// Values outside `[0, 1]` are passed through; clamping is up to the
    /// implementation.
    fn push_opacity(&mut self, opacity: f32) -> Result<(), RenderError>;

    /// Pops the innermost opacity scope.
    fn pop_opacity(&mut self) -> Result<(), RenderError>;

    /// Pushes a rectangular clip in the current coordinate space.
    fn push_clip(&mut self, clip: Rect) -> Result<(), RenderError>;

    /// Pops the innermost rectangular clip.
    fn pop_clip(&mut self) -> Result<(), RenderError>;

    /// Pushes a clip to an arbitrary geometry resource.
    fn push_geometry_clip(&mut self, geometry: GeometryId) -> Result<(), RenderError> {
        _ = geometry;
        Err(RenderError::Unsupported(Capability::GeometryClip))
    }

    /// Pops the innermost geometry clip.
    fn pop_geometry_clip(&mut self) -> Result<(), RenderError> {
        Err(RenderError::Unsupported(Capability::GeometryClip))
    }

    /// Pushes an opacity mask painted with `mask` over `bounds`.
    fn push_opacity_mask(&mut self, mask: BrushId, bounds: Rect) -> Result<(), RenderError> {
        _ = (mask, bounds);
        Err(RenderError::Unsupported(Capability::OpacityMask))
    }

    /// Pops the innermost opacity mask.
    fn pop_opacity_mask(&mut self) -> Result<(), RenderError> {
        Err(RenderError::Unsupported(Capability::OpacityMask))
    }

    /// Fills `rect` with `brush` in the current coordinate space.
    fn fill_rect(&mut self, rect: RoundedRect, brush: BrushId) -> Result<(), RenderError>;

    /// Strokes the outline of `rect` with `pen`.
    fn stroke_rect(&mut self, rect: RoundedRect, pen: Pen) -> Result<(), RenderError> {
        _ = (rect, pen);
        Err(RenderError::Unsupported(Capability::StrokeRect))
    }

    /// Draws `surface` scaled into `dest` at the given opacity.
    fn draw_surface(
        &mut self,
        surface: SurfaceId,
        dest: Rect,
        opacity: f32,
    ) -> Result<(), RenderError> {
        _ = (surface, dest, opacity);
        Err(RenderError::Unsupported(Capability::DrawSurface))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::RecordingContext;

    /// Implements only the required methods.
    struct Minimal;

    impl DrawingContext for Minimal {
        fn set_transform(&mut self, _: Affine) {}
        fn push_opacity(&mut self, _: f32) -> Result<(), RenderError> {
            Ok(())
        }
        fn pop_opacity(&mut self) -> Result<(), RenderError> {
            Ok(())
        }
        fn push_clip(&mut self, _: Rect) -> Result<(), RenderError> {
            Ok(())
        }
        fn pop_clip(&mut self) -> Result<(), RenderError> {
            Ok(())
        }
        fn fill_rect(&mut self, _: RoundedRect, _: BrushId) -> Result<(), RenderError> {
            Ok(())
        }
    }

    #[test]
    fn optional_capabilities_default_to_unsupported() {
        let mut cx = Minimal;
        assert_eq!(
            cx.push_geometry_clip(GeometryId(1)),
            Err(RenderError::Unsupported(Capability::GeometryClip))
        );
        assert_eq!(
            cx.push_opacity_mask(BrushId(2), Rect::ZERO),
            Err(RenderError::Unsupported(Capability::OpacityMask))
        );
        let pen = Pen {
            brush: BrushId(3),
            thickness: 1.0,
        };
        assert_eq!(
            cx.stroke_rect(RoundedRect::from_rect(Rect::ZERO, 0.0), pen),
            Err(RenderError::Unsupported(Capability::StrokeRect))
        );
        assert_eq!(
            cx.draw_surface(SurfaceId(4), Rect::ZERO, 1.0),
            Err(RenderError::Unsupported(Capability::DrawSurface))
        );
    }

    #[test]
    fn context_is_object_safe() {
        let mut recording = RecordingContext::default();
        let cx: &mut dyn DrawingContext = &mut recording;
        cx.set_transform(Affine::IDENTITY);
        assert_eq!(recording.ops.len(), 1);
    }
}
