// Copyright 2026 the Stratum Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tracing and diagnostics for scene traversal.
//!
//! This module provides a [`TraceSink`] trait with per-event methods that the
//! render and hit-test traversals call as they run. All method bodies default
//! to no-ops, so implementing only the events you care about is fine.
//!
//! [`Tracer`] wraps an optional `&mut dyn TraceSink`. When the `trace` feature
//! is **off**, every `Tracer` method compiles to nothing (zero overhead). When
//! **on**, each method performs a single `Option` branch before dispatching.
//!
//! # Crate features
//!
//! - `trace`: enables the `Tracer` method bodies (one branch per call).
//! - `trace-rich` (implies `trace`): gates per-node [`NodeEnterEvent`] and
//!   per-scope [`ScopeEvent`] dispatch plus the corresponding `TraceSink`
//!   methods.

use kurbo::Point;

use crate::hit_test::HitTestOrder;
use crate::node::VisualId;
use crate::render::ScopeKind;

// ---------------------------------------------------------------------------
// Event structs
// ---------------------------------------------------------------------------

/// Emitted when a render pass starts at a root node.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RenderPassBeginEvent {
    /// Visual of the node the pass starts at.
    pub root: VisualId,
}

/// Emitted when a render pass finishes, successfully or not.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RenderPassEndEvent {
    /// Visual of the node the pass started at.
    pub root: VisualId,
    /// Number of nodes rendered, including the root.
    pub nodes_visited: u64,
    /// Whether the pass was aborted by a drawing-context failure.
    pub failed: bool,
}

/// Emitted after a hit test completes.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HitTestEvent {
    /// Visual of the node the query started at.
    pub root: VisualId,
    /// The queried point.
    pub point: Point,
    /// Child order used for the query.
    pub order: HitTestOrder,
    /// Visual owning the hit leaf, if anything was hit.
    pub hit: Option<VisualId>,
    /// Number of child nodes consulted.
    pub nodes_tested: u64,
}

/// Emitted when a new root is published.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SnapshotPublishedEvent {
    /// Generation of the new snapshot.
    pub generation: u64,
    /// Visual of the new root.
    pub root: VisualId,
    /// Number of nodes reachable from the root, including the root.
    pub node_count: usize,
}

/// Emitted when the render traversal enters a node.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct NodeEnterEvent {
    /// Depth below the pass root (root = 0).
    pub depth: u32,
    /// The mirrored visual, or `None` for draw nodes.
    pub visual: Option<VisualId>,
}

/// Whether a scope was pushed or popped.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ScopeAction {
    /// The scope was pushed onto the drawing context.
    Push,
    /// The scope was popped from the drawing context.
    Pop,
}

/// Emitted for every scope push and pop issued by the render traversal.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ScopeEvent {
    /// Depth of the node owning the scope.
    pub depth: u32,
    /// Kind of scope.
    pub kind: ScopeKind,
    /// Push or pop.
    pub action: ScopeAction,
}

// ---------------------------------------------------------------------------
// TraceSink trait
// ---------------------------------------------------------------------------

/// Receives trace events from scene traversals.
///
/// All methods have default no-op implementations, so you only need to
/// override the events you care about.
pub trait TraceSink {
    /// Called when a render pass starts.
    fn on_render_pass_begin(&mut self, e: &RenderPassBeginEvent) {
        _ = e;
    }

    /// Called when a render pass ends.
    fn on_render_pass_end(&mut self, e: &RenderPassEndEvent) {
        _ = e;
    }

    /// Called after a hit test.
    fn on_hit_test(&mut self, e: &HitTestEvent) {
        _ = e;
    }

    /// Called after a snapshot is published.
    fn on_snapshot_published(&mut self, e: &SnapshotPublishedEvent) {
        _ = e;
    }

    /// Called when the render traversal enters a node (requires `trace-rich`
    /// feature).
    #[cfg(feature = "trace-rich")]
    fn on_node_enter(&mut self, e: &NodeEnterEvent) {
        _ = e;
    }

    /// Called on every scope push and pop (requires `trace-rich` feature).
    #[cfg(feature = "trace-rich")]
    fn on_scope(&mut self, e: &ScopeEvent) {
        _ = e;
    }
}

// ---------------------------------------------------------------------------
// NoopSink
// ---------------------------------------------------------------------------

/// A [`TraceSink`] that discards all events.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopSink;

impl TraceSink for NoopSink {}

// ---------------------------------------------------------------------------
// Tracer wrapper
// ---------------------------------------------------------------------------

/// Thin wrapper around an optional [`TraceSink`].
///
/// When the `trace` feature is **off**, every method compiles to nothing. When
/// **on**, each method checks the inner `Option` (one branch) before
/// dispatching to the sink. Per-node and per-scope methods additionally need
/// `trace-rich`.
pub struct Tracer<'a> {
    #[cfg(feature = "trace")]
    sink: Option<&'a mut dyn TraceSink>,
    #[cfg(not(feature = "trace"))]
    _marker: core::marker::PhantomData<&'a mut dyn TraceSink>,
}

impl core::fmt::Debug for Tracer<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Tracer").finish_non_exhaustive()
    }
}

impl<'a> Tracer<'a> {
    /// Creates a tracer that dispatches to the given sink.
    #[inline]
    #[must_use]
    pub fn new(sink: &'a mut dyn TraceSink) -> Self {
        #[cfg(feature = "trace")]
        {
            Self { sink: Some(sink) }
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = sink;
            Self {
                _marker: core::marker::PhantomData,
            }
        }
    }

    /// Creates a tracer that discards all events.
    #[inline]
    #[must_use]
    pub fn none() -> Self {
        #[cfg(feature = "trace")]
        {
            Self { sink: None }
        }
        #[cfg(not(feature = "trace"))]
        {
            Self {
                _marker: core::marker::PhantomData,
            }
        }
    }

    /// Emits a [`RenderPassBeginEvent`].
    #[inline]
    pub fn render_pass_begin(&mut self, e: &RenderPassBeginEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_render_pass_begin(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Emits a [`RenderPassEndEvent`].
    #[inline]
    pub fn render_pass_end(&mut self, e: &RenderPassEndEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_render_pass_end(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Emits a [`HitTestEvent`].
    #[inline]
    pub fn hit_test(&mut self, e: &HitTestEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_hit_test(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Emits a [`SnapshotPublishedEvent`].
    #[inline]
    pub fn snapshot_published(&mut self, e: &SnapshotPublishedEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_snapshot_published(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Emits a [`NodeEnterEvent`] (dispatched only with `trace-rich`).
    #[inline]
    pub fn node_enter(&mut self, e: &NodeEnterEvent) {
        #[cfg(feature = "trace-rich")]
        if let Some(s) = &mut self.sink {
            s.on_node_enter(e);
        }
        #[cfg(not(feature = "trace-rich"))]
        {
            _ = e;
        }
    }

    /// Emits a [`ScopeEvent`] (dispatched only with `trace-rich`).
    #[inline]
    pub fn scope(&mut self, e: &ScopeEvent) {
        #[cfg(feature = "trace-rich")]
        if let Some(s) = &mut self.sink {
            s.on_scope(e);
        }
        #[cfg(not(feature = "trace-rich"))]
        {
            _ = e;
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
