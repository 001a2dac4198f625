// Copyright 2026 the Displace Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Pointer-relative displacement for a set of managed elements.
//!
//! `displace_core` computes a translate + skew transform per target so that
//! targets appear pushed away from (or pulled toward) the pointer, measured
//! relative to the center of a *trigger* area. It is `no_std` compatible (with
//! `alloc`) and knows nothing about any particular host; platform glue lives
//! in backend crates.
//!
//! # Architecture
//!
//! ```text
//!   Targets<E> ──► resolve_targets() ──► Vec<E>
//!   DisplaceOptions<E> ──► DisplaceSettings::resolve() ──► DisplaceSettings<E>
//!                                  │
//!                                  ▼
//!   Viewport + trigger ──► GeometryTracker::recompute() ──► TriggerGeometry
//!                                  │
//!                                  ▼
//!   Signal ──► Displacer::{pointer_moved, pointer_exited} ──► FrameRequest
//!                                  │
//!                        (backend waits one frame)
//!                                  ▼
//!              Displacer::frame() ──► Presenter::apply()
//! ```
//!
//! **[`target`]**: Normalizes a single element, a collection, or an explicit
//! list of candidates into an ordered list of targets.
//!
//! **[`settings`]**: Shallow-merges caller options over the documented
//! defaults into an immutable [`DisplaceSettings`](settings::DisplaceSettings).
//!
//! **[`geometry`]**: Tracks the trigger center in document coordinates.
//!
//! **[`displacement`]**: The per-target translate/skew formula and the
//! [`TargetStyle`](displacement::TargetStyle) handed to presenters.
//!
//! **[`engine`]**: [`Displacer`](engine::Displacer), the frame-coalescing
//! state machine that drives displacement and release.
//!
//! **[`lifecycle`]**: Symmetric attach/teardown over a
//! [`SignalHub`](lifecycle::SignalHub), and the
//! [`Displaceable`](lifecycle::Displaceable) facade that ties it all together.
//!
//! **[`backend`]**: The traits a platform backend implements.
//!
//! **[`trace`]**: [`TraceSink`](trace::TraceSink) hooks for diagnostics.
//!
//! # Crate features
//!
//! - `std` (disabled by default): Enables `std` support in dependencies.
//! - `trace` (disabled by default): Enables `Tracer` method bodies (one branch
//!   per call site).

#![no_std]
#![cfg_attr(docsrs, feature(doc_auto_cfg))]

extern crate alloc;

pub mod backend;
pub mod displacement;
pub mod engine;
pub mod error;
pub mod geometry;
pub mod lifecycle;
pub mod settings;
pub mod target;
pub mod trace;

pub use error::DisplaceError;

#[cfg(test)]
pub(crate) mod testing;
