// Copyright 2026 the Stratum Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Publication of scene snapshots across threads.
//!
//! The builder (UI) thread assembles a [`VisualNode`] tree and publishes it
//! with [`Scene::publish`]. Render and input threads call
//! [`Scene::snapshot`] to get the latest [`Snapshot`] and work on it without
//! holding any lock. Publishing replaces the root reference in one step, so
//! a reader sees either the old tree or the new one, never a mix.
//!
//! Snapshots are immutable. To build the next frame, start from
//! [`Snapshot::to_builder`]: it copies only the root, sharing every child,
//! and [`VisualNode::child_mut`] copies further nodes on the path to each
//! change.

use alloc::sync::Arc;
use std::sync::{PoisonError, RwLock};

use kurbo::Point;

use crate::context::DrawingContext;
use crate::error::RenderError;
use crate::hit_test::HitTestOrder;
use crate::node::{VisualId, VisualNode};
use crate::trace::{SnapshotPublishedEvent, Tracer};

/// An immutable, published scene tree.
#[derive(Debug)]
pub struct Snapshot {
    generation: u64,
    root: Arc<VisualNode>,
}

impl Snapshot {
    /// Returns the generation this snapshot was published as.
    ///
    /// The initial root is generation 0; every publish adds one.
    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Returns the root node.
    #[must_use]
    pub fn root(&self) -> &Arc<VisualNode> {
        &self.root
    }

    /// Returns the number of nodes in the tree, including the root.
    #[must_use]
    pub fn node_count(&self) -> usize {
        1 + self.root.descendants().count()
    }

    /// Renders the tree into `cx`.
    ///
    /// # Errors
    ///
    /// See [`VisualNode::render`].
    pub fn render(&self, cx: &mut dyn DrawingContext) -> Result<(), RenderError> {
        self.root.render(cx)
    }

    /// Renders the tree into `cx`, reporting the pass to `tracer`.
    ///
    /// # Errors
    ///
    /// See [`VisualNode::render`].
    pub fn render_traced(
        &self,
        cx: &mut dyn DrawingContext,
        tracer: &mut Tracer<'_>,
    ) -> Result<(), RenderError> {
        self.root.render_traced(cx, tracer)
    }

    /// Returns whether `point` hits anything, topmost first.
    #[must_use]
    pub fn hit_test(&self, point: Point) -> bool {
        self.root.hit_test(point)
    }

    /// Returns the visual owning the topmost hit at `point`.
    #[must_use]
    pub fn hit_test_visual(&self, point: Point) -> Option<VisualId> {
        self.root.hit_test_visual(point)
    }

    /// Runs a hit test with an explicit order, reporting it to `tracer`.
    #[must_use]
    pub fn hit_test_traced(
        &self,
        point: Point,
        order: HitTestOrder,
        tracer: &mut Tracer<'_>,
    ) -> Option<VisualId> {
        self.root.hit_test_traced(point, order, tracer)
    }

    /// Returns a mutable copy of the root for building the next frame.
    ///
    /// Only the root is copied; children stay shared with this snapshot
    /// until they are changed through [`VisualNode::child_mut`].
    #[must_use]
    pub fn to_builder(&self) -> VisualNode {
        VisualNode::clone(&self.root)
    }
}

/// The published scene, shared between the builder and its readers.
#[derive(Debug)]
pub struct Scene {
    current: RwLock<Arc<Snapshot>>,
}

impl Scene {
    /// Creates a scene whose generation-0 snapshot is `root`.
    ///
    /// # Panics
    ///
    /// Panics if `root` is not a tree root.
    #[must_use]
    pub fn new(root: VisualNode) -> Self {
        check_root(&root);
        Self {
            current: RwLock::new(Arc::new(Snapshot {
                generation: 0,
                root: Arc::new(root),
            })),
        }
    }

    /// Returns the latest published snapshot.
    #[must_use]
    pub fn snapshot(&self) -> Arc<Snapshot> {
        let current = self.current.read().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(&*current)
    }

    /// Returns the generation of the latest published snapshot.
    #[must_use]
    pub fn generation(&self) -> u64 {
        self.snapshot().generation
    }

    /// Publishes `root` as the new snapshot and returns its generation.
    ///
    /// Readers holding an older snapshot keep it until they drop it.
    ///
    /// # Panics
    ///
    /// Panics if `root` is not a tree root.
    pub fn publish(&self, root: VisualNode) -> u64 {
        self.publish_traced(root, &mut Tracer::none())
    }

    /// Like [`publish`](Self::publish), reporting the new snapshot to
    /// `tracer`.
    ///
    /// # Panics
    ///
    /// Panics if `root` is not a tree root.
    pub fn publish_traced(&self, root: VisualNode, tracer: &mut Tracer<'_>) -> u64 {
        check_root(&root);
        let root = Arc::new(root);
        let snapshot = {
            let mut current = self.current.write().unwrap_or_else(PoisonError::into_inner);
            let snapshot = Arc::new(Snapshot {
                generation: current.generation + 1,
                root,
            });
            *current = Arc::clone(&snapshot);
            snapshot
        };
        tracer.snapshot_published(&SnapshotPublishedEvent {
            generation: snapshot.generation,
            root: snapshot.root.visual(),
            node_count: snapshot.node_count(),
        });
        snapshot.generation
    }
}

fn check_root(root: &VisualNode) {
    assert!(
        root.is_root(),
        "published node {:?} has parent {:?}",
        root.visual(),
        root.parent()
    );
}

#[cfg(test)]
mod tests {
    use std::thread;
    use std::vec::Vec;

    use kurbo::{Affine, Rect};

    use super::*;
    use crate::node::SceneNode;
    use crate::testing::{Probe, RecordingContext, TestVisual};

    fn tree() -> VisualNode {
        let mut root = VisualNode::new(&TestVisual::root(1), None).unwrap();
        let mut inner = VisualNode::new(&TestVisual::child(2, 1), Some(&root)).unwrap();
        inner.add_child(SceneNode::draw(Probe::hit()));
        root.add_child(inner);
        root
    }

    #[test]
    fn new_scene_starts_at_generation_zero() {
        let scene = Scene::new(tree());
        let snapshot = scene.snapshot();
        assert_eq!(snapshot.generation(), 0);
        assert_eq!(snapshot.node_count(), 3);
        assert!(snapshot.hit_test(Point::ZERO));
        assert_eq!(snapshot.hit_test_visual(Point::ZERO), Some(VisualId(2)));
    }

    #[test]
    fn publish_bumps_generation() {
        let scene = Scene::new(tree());
        assert_eq!(scene.publish(tree()), 1);
        assert_eq!(scene.publish(tree()), 2);
        assert_eq!(scene.generation(), 2);
    }

    #[test]
    fn builder_changes_do_not_leak_into_published_snapshot() {
        let scene = Scene::new(tree());
        let before = scene.snapshot();

        let mut next = before.to_builder();
        next.set_opacity(0.5);
        next.child_mut(0).unwrap().set_clip_to_bounds(true);
        next.child_mut(0)
            .unwrap()
            .set_clip_bounds(Rect::new(10.0, 10.0, 20.0, 20.0));

        assert_eq!(before.root().opacity(), 1.0);
        let child = before.root().children()[0].as_visual().unwrap();
        assert!(!child.clip_to_bounds());
        assert!(before.hit_test(Point::ZERO));

        scene.publish(next);
        let after = scene.snapshot();
        assert_eq!(after.root().opacity(), 0.5);
        assert!(!after.hit_test(Point::ZERO));
        assert!(before.hit_test(Point::ZERO), "old snapshot must be unchanged");
    }

    #[test]
    fn to_builder_shares_unchanged_children() {
        let scene = Scene::new(tree());
        let snapshot = scene.snapshot();
        let next = snapshot.to_builder();
        assert!(next.children()[0].ptr_eq(&snapshot.root().children()[0]));
    }

    #[test]
    fn render_delegates_to_root() {
        let mut root = tree();
        root.set_transform(Affine::scale(2.0));
        let scene = Scene::new(root);
        let mut cx = RecordingContext::default();
        scene.snapshot().render(&mut cx).unwrap();
        assert!(!cx.ops.is_empty());
    }

    #[test]
    #[should_panic(expected = "has parent Some(VisualId(1))")]
    fn publishing_non_root_panics() {
        let root = tree();
        let child = VisualNode::new(&TestVisual::child(2, 1), Some(&root)).unwrap();
        let _ = Scene::new(child);
    }

    #[test]
    fn readers_see_whole_generations() {
        let scene = Arc::new(Scene::new(tree()));
        let readers: Vec<_> = (0..4)
            .map(|_| {
                let scene = Arc::clone(&scene);
                thread::spawn(move || {
                    let mut last = 0;
                    for _ in 0..200 {
                        let snapshot = scene.snapshot();
                        assert!(snapshot.generation() >= last);
                        last = snapshot.generation();
                        // Every generation has opacity derived from its number.
                        let expected = if last == 0 { 1.0 } else { 1.0 / last as f32 };
                        assert_eq!(snapshot.root().opacity(), expected);
                    }
                })
            })
            .collect();

        for generation in 1..=50_u64 {
            let mut next = scene.snapshot().to_builder();
            next.set_opacity(1.0 / generation as f32);
            assert_eq!(scene.publish(next), generation);
        }
        for reader in readers {
            reader.join().unwrap();
        }
    }

    #[cfg(feature = "trace")]
    #[test]
    fn publish_reports_snapshot() {
        use crate::trace::TraceSink;

        #[derive(Default)]
        struct Sink(Vec<SnapshotPublishedEvent>);
        impl TraceSink for Sink {
            fn on_snapshot_published(&mut self, e: &SnapshotPublishedEvent) {
                self.0.push(*e);
            }
        }

        let scene = Scene::new(tree());
        let mut sink = Sink::default();
        scene.publish_traced(tree(), &mut Tracer::new(&mut sink));
        assert_eq!(
            sink.0,
            &[SnapshotPublishedEvent {
                generation: 1,
                root: VisualId(1),
                node_count: 3,
            }]
        );
    }
}
