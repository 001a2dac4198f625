// Copyright 2026 the Displace Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tracing and diagnostics for the displacement engine.
//!
//! This module provides a [`TraceSink`] trait with per-event methods that the
//! engine calls as it resolves targets, measures the trigger, and applies
//! frames. All method bodies default to no-ops, so implementing only the
//! events you care about is fine.
//!
//! [`Tracer`] wraps an optional `&mut dyn TraceSink`. When the `trace` feature
//! is **off**, every `Tracer` method compiles to nothing (zero overhead). When
//! **on**, each method performs a single `Option` branch before dispatching.

use core::time::Duration;

use kurbo::Point;

use crate::displacement::DisplacementVector;
use crate::error::DisplaceError;

// ---------------------------------------------------------------------------
// Enums
// ---------------------------------------------------------------------------

/// Why the trigger geometry was measured.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum GeometryReason {
    /// First measurement during construction.
    Initial,
    /// The viewport was resized.
    Resize,
    /// The viewport was scrolled.
    Scroll,
}

/// What a pending frame will do.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FrameKind {
    /// Displace targets toward the latest pointer sample.
    Move,
    /// Return targets to rest.
    Release,
}

/// Lifecycle transitions.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum LifecyclePhase {
    /// All signal handlers were registered.
    Attached,
    /// All signal handlers were unregistered.
    TornDown,
}

// ---------------------------------------------------------------------------
// Event structs
// ---------------------------------------------------------------------------

/// Emitted when the trigger center was (re)measured successfully.
#[derive(Clone, Copy, Debug)]
pub struct GeometryEvent {
    /// Why the measurement happened.
    pub reason: GeometryReason,
    /// New center in document coordinates.
    pub center: Point,
}

/// Emitted when a signal asked for a display frame.
#[derive(Clone, Copy, Debug)]
pub struct FrameRequestEvent {
    /// What the frame will do.
    pub kind: FrameKind,
    /// `true` if a frame was already pending and this signal superseded it.
    pub coalesced: bool,
}

/// Emitted once per target when a displacement frame is applied.
#[derive(Clone, Copy, Debug)]
pub struct DisplaceEvent {
    /// Index of the target in resolution order.
    pub target_index: usize,
    /// The transform written.
    pub vector: DisplacementVector,
}

/// Emitted when a release frame is applied.
#[derive(Clone, Copy, Debug)]
pub struct ReleaseEvent {
    /// Number of targets reset.
    pub targets: usize,
    /// Transition duration used.
    pub reset_time: Duration,
}

// ---------------------------------------------------------------------------
// TraceSink trait
// ---------------------------------------------------------------------------

/// Receives trace events from the engine.
///
/// All methods have default no-op implementations, so you only need to
/// override the events you care about.
pub trait TraceSink {
    /// Called after target resolution succeeds.
    fn on_targets_resolved(&mut self, count: usize) {
        _ = count;
    }

    /// Called after a successful trigger measurement.
    fn on_geometry(&mut self, e: &GeometryEvent) {
        _ = e;
    }

    /// Called when a trigger measurement fails.
    fn on_geometry_error(&mut self, reason: GeometryReason, error: &DisplaceError) {
        _ = (reason, error);
    }

    /// Called when a signal requests (or supersedes) a display frame.
    fn on_frame_requested(&mut self, e: &FrameRequestEvent) {
        _ = e;
    }

    /// Called per target when a displacement frame is applied.
    fn on_displace(&mut self, e: &DisplaceEvent) {
        _ = e;
    }

    /// Called when a release frame is applied.
    fn on_release(&mut self, e: &ReleaseEvent) {
        _ = e;
    }

    /// Called when a frame fires with nothing pending (e.g. after teardown).
    fn on_frame_skipped(&mut self) {}

    /// Called on attach and teardown.
    fn on_lifecycle(&mut self, phase: LifecyclePhase) {
        _ = phase;
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
/// dispatching to the sink.
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

/// Expands to a `Tracer` method that forwards to one sink method.
macro_rules! forward {
    ($(#[$doc:meta])* $name:ident => $method:ident($($arg:ident: $ty:ty),*)) => {
        $(#[$doc])*
        #[inline]
        pub fn $name(&mut self, $($arg: $ty),*) {
            #[cfg(feature = "trace")]
            if let Some(s) = &mut self.sink {
                s.$method($($arg),*);
            }
            #[cfg(not(feature = "trace"))]
            {
                _ = ($($arg,)*);
            }
        }
    };
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

    forward!(
        /// Emits a resolved-target count.
        targets_resolved => on_targets_resolved(count: usize)
    );
    forward!(
        /// Emits a [`GeometryEvent`].
        geometry => on_geometry(e: &GeometryEvent)
    );
    forward!(
        /// Emits a failed measurement.
        geometry_error => on_geometry_error(reason: GeometryReason, error: &DisplaceError)
    );
    forward!(
        /// Emits a [`FrameRequestEvent`].
        frame_requested => on_frame_requested(e: &FrameRequestEvent)
    );
    forward!(
        /// Emits a [`DisplaceEvent`].
        displace => on_displace(e: &DisplaceEvent)
    );
    forward!(
        /// Emits a [`ReleaseEvent`].
        release => on_release(e: &ReleaseEvent)
    );
    forward!(
        /// Emits an empty frame.
        frame_skipped => on_frame_skipped()
    );
    forward!(
        /// Emits a lifecycle transition.
        lifecycle => on_lifecycle(phase: LifecyclePhase)
    );
}
