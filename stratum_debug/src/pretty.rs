// Copyright 2026 the Stratum Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Human-readable trace output.
//!
//! [`PrettyPrintSink`] implements [`TraceSink`] and writes one line per event
//! to a [`Write`](std::io::Write) destination (default: stderr). Per-node
//! and per-scope lines are indented by tree depth.

use std::io::Write;

use stratum_core::hit_test::HitTestOrder;
use stratum_core::node::VisualId;
use stratum_core::render::ScopeKind;
use stratum_core::trace::{
    HitTestEvent, NodeEnterEvent, RenderPassBeginEvent, RenderPassEndEvent, ScopeAction,
    ScopeEvent, SnapshotPublishedEvent, TraceSink,
};

/// Writes human-readable trace lines to a [`Write`](std::io::Write) destination.
pub struct PrettyPrintSink<W: Write = Box<dyn Write>> {
    writer: W,
}

impl<W: Write> std::fmt::Debug for PrettyPrintSink<W> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PrettyPrintSink").finish_non_exhaustive()
    }
}

impl PrettyPrintSink {
    /// Creates a sink that writes to stderr.
    #[must_use]
    pub fn stderr() -> Self {
        Self {
            writer: Box::new(std::io::stderr()),
        }
    }

    /// Creates a sink that writes to a boxed writer.
    #[must_use]
    pub fn new(writer: Box<dyn Write>) -> Self {
        Self { writer }
    }
}

impl<W: Write> PrettyPrintSink<W> {
    /// Creates a sink that writes to the given destination.
    #[must_use]
    pub fn with_writer(writer: W) -> Self {
        Self { writer }
    }

    /// Consumes the sink and returns the writer.
    #[must_use]
    pub fn into_writer(self) -> W {
        self.writer
    }
}

pub(crate) fn scope_name(kind: ScopeKind) -> &'static str {
    match kind {
        ScopeKind::Opacity => "opacity",
        ScopeKind::Clip => "clip",
        ScopeKind::GeometryClip => "geometry-clip",
        ScopeKind::OpacityMask => "opacity-mask",
    }
}

pub(crate) fn order_name(order: HitTestOrder) -> &'static str {
    match order {
        HitTestOrder::TopmostFirst => "topmost-first",
        HitTestOrder::PaintOrder => "paint-order",
    }
}

fn indent(depth: u32) -> usize {
    depth as usize * 2
}

struct Visual(Option<VisualId>);

impl std::fmt::Display for Visual {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.0 {
            Some(id) => write!(f, "{}", id.0),
            None => f.write_str("-"),
        }
    }
}

impl<W: Write> TraceSink for PrettyPrintSink<W> {
    fn on_render_pass_begin(&mut self, e: &RenderPassBeginEvent) {
        let _ = writeln!(self.writer, "[render:begin] root={}", e.root.0);
    }

    fn on_render_pass_end(&mut self, e: &RenderPassEndEvent) {
        let status = if e.failed { "FAILED" } else { "ok" };
        let _ = writeln!(
            self.writer,
            "[render:end] root={} nodes={} status={status}",
            e.root.0, e.nodes_visited,
        );
    }

    fn on_hit_test(&mut self, e: &HitTestEvent) {
        let _ = writeln!(
            self.writer,
            "[hit] root={} point=({:.1}, {:.1}) order={} hit={} tested={}",
            e.root.0,
            e.point.x,
            e.point.y,
            order_name(e.order),
            Visual(e.hit),
            e.nodes_tested,
        );
    }

    fn on_snapshot_published(&mut self, e: &SnapshotPublishedEvent) {
        let _ = writeln!(
            self.writer,
            "[publish] generation={} root={} nodes={}",
            e.generation, e.root.0, e.node_count,
        );
    }

    fn on_node_enter(&mut self, e: &NodeEnterEvent) {
        let kind = if e.visual.is_some() { "visual" } else { "draw" };
        let _ = writeln!(
            self.writer,
            "[node] {:width$}{kind} {}",
            "",
            Visual(e.visual),
            width = indent(e.depth),
        );
    }

    fn on_scope(&mut self, e: &ScopeEvent) {
        let action = match e.action {
            ScopeAction::Push => "push",
            ScopeAction::Pop => "pop",
        };
        let _ = writeln!(
            self.writer,
            "[scope] {:width$}{action} {}",
            "",
            scope_name(e.kind),
            width = indent(e.depth),
        );
    }
}
