// Copyright 2026 the Stratum Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Error types for node construction and rendering.
//!
//! Hit testing has no error type: a point that matches nothing simply
//! returns `false`.

use alloc::string::String;
use core::fmt;

use crate::node::VisualId;

/// A builder invariant was violated while constructing a [`VisualNode`].
///
/// These errors signal a bug in the tree builder, not a condition to retry.
///
/// [`VisualNode`]: crate::node::VisualNode
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ConstructionError {
    /// A root node was requested for a visual that has a parent in the
    /// visual tree.
    RootForParentedVisual {
        /// The visual being mirrored.
        visual: VisualId,
        /// Its parent in the visual tree.
        visual_parent: VisualId,
    },
    /// A parent node was given for a visual that is a visual-tree root.
    ParentedNodeForRootVisual {
        /// The visual being mirrored.
        visual: VisualId,
        /// The visual of the parent node that was given.
        node_parent: VisualId,
    },
    /// The visual's parent does not match the visual of the given parent
    /// node.
    ParentMismatch {
        /// The visual being mirrored.
        visual: VisualId,
        /// Its parent in the visual tree.
        visual_parent: VisualId,
        /// The visual of the parent node that was given.
        node_parent: VisualId,
    },
}

impl fmt::Display for ConstructionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::RootForParentedVisual {
                visual,
                visual_parent,
            } => write!(
                f,
                "attempted to create root node for parented visual {visual:?} (parent {visual_parent:?})"
            ),
            Self::ParentedNodeForRootVisual {
                visual,
                node_parent,
            } => write!(
                f,
                "attempted to parent node for root visual {visual:?} under {node_parent:?}"
            ),
            Self::ParentMismatch {
                visual,
                visual_parent,
                node_parent,
            } => write!(
                f,
                "node parent {node_parent:?} does not match visual parent {visual_parent:?} of {visual:?}"
            ),
        }
    }
}

impl core::error::Error for ConstructionError {}

/// Optional drawing-context capabilities.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Capability {
    /// Clipping to an arbitrary geometry.
    GeometryClip,
    /// Masking opacity with a brush.
    OpacityMask,
    /// Stroking rectangle outlines.
    StrokeRect,
    /// Drawing external surfaces.
    DrawSurface,
}

/// A drawing-context failure during a render pass.
///
/// The traversal never handles these itself; they abort the pass and the
/// compositor decides whether to retry, drop the frame, or escalate.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RenderError {
    /// The drawing context does not implement the named capability.
    Unsupported(Capability),
    /// The backend ran out of a resource (memory, layers, textures).
    ResourceExhausted,
    /// Any other backend failure.
    Backend(String),
}

impl fmt::Display for RenderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unsupported(capability) => {
                write!(f, "drawing context does not support {capability:?}")
            }
            Self::ResourceExhausted => f.write_str("drawing backend resources exhausted"),
            Self::Backend(message) => write!(f, "drawing backend failed: {message}"),
        }
    }
}

impl core::error::Error for RenderError {}

#[cfg(test)]
mod tests {
    use alloc::string::ToString;

    use super::*;

    #[test]
    fn construction_error_names_visuals() {
        let err = ConstructionError::RootForParentedVisual {
            visual: VisualId(4),
            visual_parent: VisualId(1),
        };
        let message = err.to_string();
        assert!(message.contains("VisualId(4)"), "got: {message}");
        assert!(message.contains("VisualId(1)"), "got: {message}");
    }

    #[test]
    fn render_error_display() {
        assert_eq!(
            RenderError::Unsupported(Capability::GeometryClip).to_string(),
            "drawing context does not support GeometryClip"
        );
        assert_eq!(
            RenderError::Backend("device lost".into()).to_string(),
            "drawing backend failed: device lost"
        );
    }
}
