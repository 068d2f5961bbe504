// Copyright 2026 the Stratum Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Leaf draw node contract.

use core::fmt;

use kurbo::Point;

use crate::context::DrawingContext;
use crate::error::RenderError;

/// A leaf scene node that draws content.
///
/// Draw nodes are opaque to the traversal: rendering hands them the drawing
/// context, hit testing hands them a point. Like containers, a draw node
/// assigns its own full transform when it renders, and maps hit-test points
/// through the inverse of that transform itself.
///
/// Draw nodes must be `Send + Sync` because published snapshots are read
/// from compositor and input threads at the same time.
pub trait DrawNode: fmt::Debug + Send + Sync {
    /// Draws this node into `cx`.
    ///
    /// # Errors
    ///
    /// Propagates any failure reported by `cx`.
    fn render(&self, cx: &mut dyn DrawingContext) -> Result<(), RenderError>;

    /// Returns whether `point` lies within this node's content.
    fn hit_test(&self, point: Point) -> bool;
}
