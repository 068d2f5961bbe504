// Copyright 2026 the Stratum Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! JSON dumps of scene trees, display lists, and recorded events.
//!
//! Dumps are meant for diffing in tests and for attaching to bug reports.
//! Every function writes a single pretty-printed JSON value.

use std::io::{self, Write};

use kurbo::{Affine, Rect, RoundedRect};
use serde_json::{Value, json};

use stratum_core::node::{SceneNode, VisualNode};
use stratum_core::trace::ScopeAction;

use crate::display_list::DrawOp;
use crate::pretty::{order_name, scope_name};
use crate::recorder::RecordedEvent;

/// Writes `root` and its subtree as nested JSON objects.
///
/// Draw nodes appear as `{"draw": "<debug output>"}`.
pub fn dump_tree(root: &VisualNode, writer: &mut dyn Write) -> io::Result<()> {
    serde_json::to_writer_pretty(writer, &visual_value(root))?;
    Ok(())
}

/// Writes a display list as a JSON array, one object per operation.
pub fn dump_display_list(ops: &[DrawOp], writer: &mut dyn Write) -> io::Result<()> {
    let ops: Vec<Value> = ops.iter().map(op_value).collect();
    serde_json::to_writer_pretty(writer, &ops)?;
    Ok(())
}

/// Writes recorded events as a JSON array, one object per event.
pub fn export_events(events: &[RecordedEvent], writer: &mut dyn Write) -> io::Result<()> {
    let events: Vec<Value> = events.iter().map(event_value).collect();
    serde_json::to_writer_pretty(writer, &events)?;
    Ok(())
}

fn visual_value(node: &VisualNode) -> Value {
    let children: Vec<Value> = node
        .children()
        .iter()
        .map(|child| match child {
            SceneNode::Visual(visual) => visual_value(visual),
            SceneNode::Draw(draw) => json!({ "draw": format!("{draw:?}") }),
        })
        .collect();
    json!({
        "visual": node.visual().0,
        "parent": node.parent().map(|p| p.0),
        "transform": affine(node.transform()),
        "clip_bounds": rect(node.clip_bounds()),
        "clip_to_bounds": node.clip_to_bounds(),
        "geometry_clip": node.geometry_clip().map(|g| g.0),
        "opacity": node.opacity(),
        "opacity_mask": node.opacity_mask().map(|b| b.0),
        "subtree_updated": node.subtree_updated(),
        "children": children,
    })
}

fn op_value(op: &DrawOp) -> Value {
    match op {
        DrawOp::SetTransform(t) => json!({ "op": "set_transform", "transform": affine(*t) }),
        DrawOp::PushOpacity(o) => json!({ "op": "push_opacity", "opacity": o }),
        DrawOp::PopOpacity => json!({ "op": "pop_opacity" }),
        DrawOp::PushClip(r) => json!({ "op": "push_clip", "rect": rect(*r) }),
        DrawOp::PopClip => json!({ "op": "pop_clip" }),
        DrawOp::PushGeometryClip(g) => json!({ "op": "push_geometry_clip", "geometry": g.0 }),
        DrawOp::PopGeometryClip => json!({ "op": "pop_geometry_clip" }),
        DrawOp::PushOpacityMask { mask, bounds } => json!({
            "op": "push_opacity_mask",
            "mask": mask.0,
            "bounds": rect(*bounds),
        }),
        DrawOp::PopOpacityMask => json!({ "op": "pop_opacity_mask" }),
        DrawOp::FillRect { rect: r, brush } => json!({
            "op": "fill_rect",
            "rect": rounded_rect(*r),
            "brush": brush.0,
        }),
        DrawOp::StrokeRect { rect: r, pen } => json!({
            "op": "stroke_rect",
            "rect": rounded_rect(*r),
            "brush": pen.brush.0,
            "thickness": pen.thickness,
        }),
        DrawOp::DrawSurface {
            surface,
            dest,
            opacity,
        } => json!({
            "op": "draw_surface",
            "surface": surface.0,
            "dest": rect(*dest),
            "opacity": opacity,
        }),
    }
}

fn event_value(event: &RecordedEvent) -> Value {
    match event {
        RecordedEvent::RenderPassBegin(e) => json!({
            "event": "render_pass_begin",
            "root": e.root.0,
        }),
        RecordedEvent::RenderPassEnd(e) => json!({
            "event": "render_pass_end",
            "root": e.root.0,
            "nodes_visited": e.nodes_visited,
            "failed": e.failed,
        }),
        RecordedEvent::HitTest(e) => json!({
            "event": "hit_test",
            "root": e.root.0,
            "point": [e.point.x, e.point.y],
            "order": order_name(e.order),
            "hit": e.hit.map(|v| v.0),
            "nodes_tested": e.nodes_tested,
        }),
        RecordedEvent::SnapshotPublished(e) => json!({
            "event": "snapshot_published",
            "generation": e.generation,
            "root": e.root.0,
            "node_count": e.node_count,
        }),
        RecordedEvent::NodeEnter(e) => json!({
            "event": "node_enter",
            "depth": e.depth,
            "visual": e.visual.map(|v| v.0),
        }),
        RecordedEvent::Scope(e) => json!({
            "event": match e.action {
                ScopeAction::Push => "scope_push",
                ScopeAction::Pop => "scope_pop",
            },
            "depth": e.depth,
            "kind": scope_name(e.kind),
        }),
    }
}

fn affine(t: Affine) -> Value {
    json!(t.as_coeffs())
}

fn rect(r: Rect) -> Value {
    json!([r.x0, r.y0, r.x1, r.y1])
}

fn rounded_rect(r: RoundedRect) -> Value {
    let radii = r.radii();
    json!({
        "rect": rect(r.rect()),
        "radii": [radii.top_left, radii.top_right, radii.bottom_right, radii.bottom_left],
    })
}
