// Copyright 2026 the Stratum Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Inverse-transform helpers shared by rendering and hit testing.
//!
//! Scene nodes store [`Affine`] matrices that may be singular (a zero scale
//! collapses a subtree to nothing). [`kurbo`] produces non-finite values when
//! inverting such a matrix, so every inversion in the crate goes through
//! [`invert`], which reports singular matrices as `None`.

use kurbo::{Affine, Point, Rect};

/// Returns the inverse of `transform`, or `None` if it is singular or not
/// finite.
#[inline]
#[must_use]
pub fn invert(transform: Affine) -> Option<Affine> {
    let det = transform.determinant();
    if det == 0.0 || !det.is_finite() {
        return None;
    }
    let inverse = transform.inverse();
    inverse.is_finite().then_some(inverse)
}

/// Maps `rect` through the inverse of `transform` and returns the
/// axis-aligned bounding box of the result.
///
/// A singular transform yields [`Rect::ZERO`]: nothing drawn under that
/// transform is visible, so an empty clip is exact.
#[must_use]
pub fn inverse_rect_bbox(transform: Affine, rect: Rect) -> Rect {
    invert(transform).map_or(Rect::ZERO, |inverse| inverse.transform_rect_bbox(rect))
}

/// Maps `point` into the space `transform` maps from.
///
/// Returns `None` for singular transforms; no point lies inside a shape that
/// has been collapsed.
#[inline]
#[must_use]
pub fn to_local(transform: Affine, point: Point) -> Option<Point> {
    invert(transform).map(|inverse| inverse * point)
}
