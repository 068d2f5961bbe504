// Copyright 2026 the Stratum Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! In-memory event recording.
//!
//! [`RecorderSink`] implements [`TraceSink`] and keeps every event it
//! receives, in order, as a [`RecordedEvent`]. Recordings feed
//! [`json::export_events`](crate::json::export_events) and tests that assert
//! on traversal behavior.

use stratum_core::trace::{
    HitTestEvent, NodeEnterEvent, RenderPassBeginEvent, RenderPassEndEvent, ScopeAction,
    ScopeEvent, SnapshotPublishedEvent, TraceSink,
};

/// A single recorded event.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum RecordedEvent {
    /// A [`RenderPassBeginEvent`].
    RenderPassBegin(RenderPassBeginEvent),
    /// A [`RenderPassEndEvent`].
    RenderPassEnd(RenderPassEndEvent),
    /// A [`HitTestEvent`].
    HitTest(HitTestEvent),
    /// A [`SnapshotPublishedEvent`].
    SnapshotPublished(SnapshotPublishedEvent),
    /// A [`NodeEnterEvent`].
    NodeEnter(NodeEnterEvent),
    /// A [`ScopeEvent`].
    Scope(ScopeEvent),
}

/// A [`TraceSink`] that stores events in memory.
#[derive(Debug, Default)]
pub struct RecorderSink {
    events: Vec<RecordedEvent>,
}

impl RecorderSink {
    /// Creates an empty recorder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the recorded events.
    #[must_use]
    pub fn events(&self) -> &[RecordedEvent] {
        &self.events
    }

    /// Consumes the recorder and returns the recorded events.
    #[must_use]
    pub fn into_events(self) -> Vec<RecordedEvent> {
        self.events
    }

    /// Discards all recorded events.
    pub fn clear(&mut self) {
        self.events.clear();
    }

    /// Returns whether every recorded scope push has a matching pop, in
    /// LIFO order.
    #[must_use]
    pub fn scopes_balanced(&self) -> bool {
        let mut open = Vec::new();
        for event in &self.events {
            let RecordedEvent::Scope(e) = event else {
                continue;
            };
            match e.action {
                ScopeAction::Push => open.push((e.depth, e.kind)),
                ScopeAction::Pop => {
                    if open.pop() != Some((e.depth, e.kind)) {
                        return false;
                    }
                }
            }
        }
        open.is_empty()
    }
}

impl TraceSink for RecorderSink {
    fn on_render_pass_begin(&mut self, e: &RenderPassBeginEvent) {
        self.events.push(RecordedEvent::RenderPassBegin(*e));
    }

    fn on_render_pass_end(&mut self, e: &RenderPassEndEvent) {
        self.events.push(RecordedEvent::RenderPassEnd(*e));
    }

    fn on_hit_test(&mut self, e: &HitTestEvent) {
        self.events.push(RecordedEvent::HitTest(*e));
    }

    fn on_snapshot_published(&mut self, e: &SnapshotPublishedEvent) {
        self.events.push(RecordedEvent::SnapshotPublished(*e));
    }

    fn on_node_enter(&mut self, e: &NodeEnterEvent) {
        self.events.push(RecordedEvent::NodeEnter(*e));
    }

    fn on_scope(&mut self, e: &ScopeEvent) {
        self.events.push(RecordedEvent::Scope(*e));
    }
}

#[cfg(test)]
mod tests {
    use kurbo::Rect;
    use stratum_core::leaf::RectangleNode;
    use stratum_core::node::{BrushId, SceneNode, Visual, VisualId, VisualNode};
    use stratum_core::render::ScopeKind;
    use stratum_core::trace::Tracer;

    use super::*;
    use crate::display_list::DisplayList;

    struct V(u64, Option<u64>);

    impl Visual for V {
        fn id(&self) -> VisualId {
            VisualId(self.0)
        }
        fn parent(&self) -> Option<VisualId> {
            self.1.map(VisualId)
        }
    }

    fn scene() -> VisualNode {
        let mut root = VisualNode::new(&V(1, None), None).unwrap();
        root.set_opacity(0.5);
        let mut inner = VisualNode::new(&V(2, Some(1)), Some(&root)).unwrap();
        inner.set_clip_to_bounds(true);
        inner.set_clip_bounds(Rect::new(0.0, 0.0, 10.0, 10.0));
        inner.add_child(SceneNode::from(RectangleNode::filled(
            kurbo::Affine::IDENTITY,
            Rect::new(0.0, 0.0, 5.0, 5.0).to_rounded_rect(0.0),
            BrushId(1),
        )));
        root.add_child(inner);
        root
    }

    #[test]
    fn records_a_full_render_pass() {
        let mut rec = RecorderSink::new();
        let mut cx = DisplayList::new();
        scene()
            .render_traced(&mut cx, &mut Tracer::new(&mut rec))
            .unwrap();

        let events = rec.events();
        assert!(matches!(events.first(), Some(RecordedEvent::RenderPassBegin(_))));
        assert!(matches!(
            events.last(),
            Some(RecordedEvent::RenderPassEnd(RenderPassEndEvent {
                nodes_visited: 3,
                failed: false,
                ..
            }))
        ));
        let scopes: Vec<_> = events
            .iter()
            .filter_map(|e| match e {
                RecordedEvent::Scope(s) => Some((s.kind, s.action)),
                _ => None,
            })
            .collect();
        assert_eq!(
            scopes,
            &[
                (ScopeKind::Opacity, ScopeAction::Push),
                (ScopeKind::Clip, ScopeAction::Push),
                (ScopeKind::Clip, ScopeAction::Pop),
                (ScopeKind::Opacity, ScopeAction::Pop),
            ]
        );
        assert!(rec.scopes_balanced());
    }

    #[test]
    fn unbalanced_scopes_are_detected() {
        let mut rec = RecorderSink::new();
        rec.on_scope(&ScopeEvent {
            depth: 0,
            kind: ScopeKind::Clip,
            action: ScopeAction::Push,
        });
        assert!(!rec.scopes_balanced());
        rec.on_scope(&ScopeEvent {
            depth: 0,
            kind: ScopeKind::Opacity,
            action: ScopeAction::Pop,
        });
        assert!(!rec.scopes_balanced());
    }

    #[test]
    fn clear_discards_events() {
        let mut rec = RecorderSink::new();
        rec.on_render_pass_begin(&RenderPassBeginEvent { root: VisualId(1) });
        rec.clear();
        assert!(rec.events().is_empty());
        assert!(rec.scopes_balanced());
    }
}
