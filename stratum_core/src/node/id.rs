// Copyright 2026 the Stratum Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Visual and resource identity types.
//!
//! None of these handles own anything. Visuals, geometries, brushes, and
//! surfaces live in external systems; the scene graph only carries their
//! identities through to the drawing context.

use core::fmt;

/// Identity of an external visual (UI-tree object).
///
/// Scene nodes use this as the key for matching against the visual tree
/// during rebuilds, and as the non-owning link from a node to its parent.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct VisualId(pub u64);

impl fmt::Debug for VisualId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "VisualId({})", self.0)
    }
}

/// An opaque reference to an arbitrary-shape geometry resource.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct GeometryId(pub u32);

impl fmt::Debug for GeometryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "GeometryId({})", self.0)
    }
}

/// An opaque reference to a brush resource (solid color, gradient, image).
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct BrushId(pub u32);

impl fmt::Debug for BrushId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "BrushId({})", self.0)
    }
}

/// An opaque reference to a content surface.
///
/// Surfaces are created and managed externally (e.g. by an imaging pipeline or
/// GPU backend) and drawn by [`SurfaceNode`](crate::leaf::SurfaceNode).
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct SurfaceId(pub u32);

impl fmt::Debug for SurfaceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SurfaceId({})", self.0)
    }
}
