// Copyright 2026 the Displace Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! In-memory event recording.
//!
//! [`RecorderSink`] implements [`TraceSink`] and keeps every event as a
//! [`Record`], stamped with the time elapsed since the recorder was created.
//! Failures are stored as their display text so a recording owns no engine
//! state.

use std::time::{Duration, Instant};

use displace_core::DisplaceError;
use displace_core::trace::{
    DisplaceEvent, FrameRequestEvent, GeometryEvent, GeometryReason, LifecyclePhase,
    ReleaseEvent, TraceSink,
};

/// One recorded trace event.
#[derive(Clone, Debug)]
pub enum RecordedEvent {
    /// Target resolution succeeded.
    TargetsResolved {
        /// Number of targets.
        count: usize,
    },
    /// The trigger center was measured.
    Geometry(GeometryEvent),
    /// A trigger measurement failed.
    GeometryError {
        /// Why the measurement happened.
        reason: GeometryReason,
        /// The error's display text.
        message: String,
    },
    /// A signal asked for a frame.
    FrameRequested(FrameRequestEvent),
    /// A target was displaced.
    Displace(DisplaceEvent),
    /// Targets were released to rest.
    Release(ReleaseEvent),
    /// A frame fired with nothing pending.
    FrameSkipped,
    /// Attach or teardown.
    Lifecycle(LifecyclePhase),
}

impl RecordedEvent {
    /// Short name of the event kind.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::TargetsResolved { .. } => "TargetsResolved",
            Self::Geometry(_) => "Geometry",
            Self::GeometryError { .. } => "GeometryError",
            Self::FrameRequested(_) => "FrameRequested",
            Self::Displace(_) => "Displace",
            Self::Release(_) => "Release",
            Self::FrameSkipped => "FrameSkipped",
            Self::Lifecycle(_) => "Lifecycle",
        }
    }
}

/// A [`RecordedEvent`] with its capture time.
#[derive(Clone, Debug)]
pub struct Record {
    /// Time since the recorder was created.
    pub at: Duration,
    /// The event.
    pub event: RecordedEvent,
}

/// A [`TraceSink`] that keeps every event in memory.
#[derive(Debug)]
pub struct RecorderSink {
    origin: Instant,
    records: Vec<Record>,
}

impl Default for RecorderSink {
    fn default() -> Self {
        Self::new()
    }
}

impl RecorderSink {
    /// Creates an empty recorder; timestamps are relative to now.
    #[must_use]
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
            records: Vec::new(),
        }
    }

    /// Returns the recorded events in capture order.
    #[must_use]
    pub fn records(&self) -> &[Record] {
        &self.records
    }

    /// Consumes the recorder and returns the recorded events.
    #[must_use]
    pub fn into_records(self) -> Vec<Record> {
        self.records
    }

    /// Discards everything recorded so far.
    pub fn clear(&mut self) {
        self.records.clear();
    }

    fn push(&mut self, event: RecordedEvent) {
        self.records.push(Record {
            at: self.origin.elapsed(),
            event,
        });
    }
}

impl TraceSink for RecorderSink {
    fn on_targets_resolved(&mut self, count: usize) {
        self.push(RecordedEvent::TargetsResolved { count });
    }

    fn on_geometry(&mut self, e: &GeometryEvent) {
        self.push(RecordedEvent::Geometry(*e));
    }

    fn on_geometry_error(&mut self, reason: GeometryReason, error: &DisplaceError) {
        self.push(RecordedEvent::GeometryError {
            reason,
            message: error.to_string(),
        });
    }

    fn on_frame_requested(&mut self, e: &FrameRequestEvent) {
        self.push(RecordedEvent::FrameRequested(*e));
    }

    fn on_displace(&mut self, e: &DisplaceEvent) {
        self.push(RecordedEvent::Displace(*e));
    }

    fn on_release(&mut self, e: &ReleaseEvent) {
        self.push(RecordedEvent::Release(*e));
    }

    fn on_frame_skipped(&mut self) {
        self.push(RecordedEvent::FrameSkipped);
    }

    fn on_lifecycle(&mut self, phase: LifecyclePhase) {
        self.push(RecordedEvent::Lifecycle(phase));
    }
}
