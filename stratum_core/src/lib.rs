// Copyright 2026 the Stratum Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Retained scene graph for compositing UI trees.
//!
//! `stratum_core` mirrors a visual (UI) tree as a tree of scene nodes that a
//! compositor can render and hit-test independently of the UI thread. It is
//! `no_std` compatible (with `alloc`); publication across threads needs the
//! `std` feature.
//!
//! # Architecture
//!
//! ```text
//!   Visual tree (UI thread)
//!       │  VisualNode::new / clone_for / add_child
//!       ▼
//!   VisualNode tree ──► Scene::publish() ──► Arc<Snapshot>
//!                                               │
//!                 ┌─────────────────────────────┤
//!                 ▼                             ▼
//!   Snapshot::render(&mut dyn DrawingContext)   Snapshot::hit_test(point)
//!   (compositor thread)                         (input thread)
//! ```
//!
//! **[`node`]**: [`VisualNode`](node::VisualNode) containers and
//! [`DrawNode`](node::DrawNode) leaves, joined in the
//! [`SceneNode`](node::SceneNode) enum. Children sit behind `Arc`, so
//! unchanged subtrees are shared between frames.
//!
//! **[`render`]**: Depth-first render traversal driving a
//! [`DrawingContext`](context::DrawingContext) with balanced push/pop scopes.
//!
//! **[`hit_test`]**: Short-circuiting point queries with a configurable
//! [`HitTestOrder`](hit_test::HitTestOrder).
//!
//! **[`context`]**: The drawing-context trait backends implement.
//!
//! **[`leaf`]**: Built-in rectangle and surface draw nodes.
//!
//! **[`scene`]**: Snapshot publication between builder and readers.
//!
//! **[`transform`]**: Singular-safe inverse-transform helpers.
//!
//! **[`trace`]**: [`TraceSink`](trace::TraceSink) trait and event types for
//! traversal instrumentation, with zero-overhead [`Tracer`](trace::Tracer)
//! wrapper.
//!
//! # Crate features
//!
//! - `std` (enabled by default): Enables [`scene`] and `std` support in
//!   dependencies.
//! - `trace` (disabled by default): Enables `Tracer` method bodies (one branch
//!   per call site).
//! - `trace-rich` (disabled by default, implies `trace`): Gates per-node and
//!   per-scope events.

#![no_std]
#![cfg_attr(docsrs, feature(doc_auto_cfg))]

extern crate alloc;
#[cfg(feature = "std")]
extern crate std;

pub mod context;
pub mod error;
pub mod leaf;
pub mod node;
pub mod render;
#[cfg(feature = "std")]
pub mod scene;
pub mod trace;
pub mod transform;

#[cfg(test)]
mod testing;
