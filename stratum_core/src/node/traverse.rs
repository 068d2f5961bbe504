// Copyright 2026 the Stratum Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tree traversal utilities.

use alloc::vec::Vec;

use super::SceneNode;

/// A depth-first pre-order iterator over the descendants of a container.
///
/// Yields `(depth, node)` pairs, where direct children have depth 1. Nodes
/// come out in paint order. Created by
/// [`VisualNode::descendants`](super::VisualNode::descendants).
#[derive(Debug)]
pub struct Descendants<'a> {
    stack: Vec<(usize, &'a SceneNode)>,
}

impl<'a> Descendants<'a> {
    pub(crate) fn new(children: &'a [SceneNode]) -> Self {
        let mut stack = Vec::with_capacity(children.len());
        stack.extend(children.iter().rev().map(|child| (1, child)));
        Self { stack }
    }
}

impl<'a> Iterator for Descendants<'a> {
    type Item = (usize, &'a SceneNode);

    fn next(&mut self) -> Option<Self::Item> {
        let (depth, node) = self.stack.pop()?;
        if let SceneNode::Visual(visual) = node {
            self.stack
                .extend(visual.children().iter().rev().map(|child| (depth + 1, child)));
        }
        Some((depth, node))
    }
}
