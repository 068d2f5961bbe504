// Copyright 2026 the Stratum Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Recording, pretty-printing, and JSON dumps for stratum diagnostics.
//!
//! This crate provides development-time implementations of the
//! [`stratum_core`] extension points:
//!
//! - [`pretty::PrettyPrintSink`]: human-readable one-line-per-event output.
//! - [`recorder::RecorderSink`]: in-memory event recording with a scope
//!   balance check.
//! - [`display_list::DisplayList`]: a
//!   [`DrawingContext`](stratum_core::context::DrawingContext) that records
//!   operations and validates push/pop discipline.
//! - [`json`]: JSON dumps of trees, display lists, and recorded events.

pub mod display_list;
pub mod json;
pub mod pretty;
pub mod recorder;
