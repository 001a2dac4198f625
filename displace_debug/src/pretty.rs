// Copyright 2026 the Displace Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Human-readable trace output.
//!
//! [`PrettyPrintSink`] implements [`TraceSink`] and writes one line per event
//! to a [`Write`](std::io::Write) destination (default: stderr).

use std::io::Write;

use displace_core::DisplaceError;
use displace_core::trace::{
    DisplaceEvent, FrameKind, FrameRequestEvent, GeometryEvent, GeometryReason, LifecyclePhase,
    ReleaseEvent, TraceSink,
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

    /// Consumes the sink and returns its writer.
    #[must_use]
    pub fn into_inner(self) -> W {
        self.writer
    }
}

fn reason_name(reason: GeometryReason) -> &'static str {
    match reason {
        GeometryReason::Initial => "initial",
        GeometryReason::Resize => "resize",
        GeometryReason::Scroll => "scroll",
    }
}

fn kind_name(kind: FrameKind) -> &'static str {
    match kind {
        FrameKind::Move => "move",
        FrameKind::Release => "release",
    }
}

impl<W: Write> TraceSink for PrettyPrintSink<W> {
    fn on_targets_resolved(&mut self, count: usize) {
        let _ = writeln!(self.writer, "[targets] count={count}");
    }

    fn on_geometry(&mut self, e: &GeometryEvent) {
        let _ = writeln!(
            self.writer,
            "[geometry] {} center=({:.1}, {:.1})",
            reason_name(e.reason),
            e.center.x,
            e.center.y,
        );
    }

    fn on_geometry_error(&mut self, reason: GeometryReason, error: &DisplaceError) {
        let _ = writeln!(
            self.writer,
            "[geometry:error] {} {error}",
            reason_name(reason),
        );
    }

    fn on_frame_requested(&mut self, e: &FrameRequestEvent) {
        let coalesced = if e.coalesced { " coalesced" } else { "" };
        let _ = writeln!(self.writer, "[request] {}{coalesced}", kind_name(e.kind));
    }

    fn on_displace(&mut self, e: &DisplaceEvent) {
        let v = &e.vector;
        let _ = writeln!(
            self.writer,
            "[displace] target={} dx={:.2} dy={:.2} skew=({:.3}, {:.3})",
            e.target_index, v.dx, v.dy, v.skew_x, v.skew_y,
        );
    }

    fn on_release(&mut self, e: &ReleaseEvent) {
        let _ = writeln!(
            self.writer,
            "[release] targets={} over {}ms",
            e.targets,
            e.reset_time.as_millis(),
        );
    }

    fn on_frame_skipped(&mut self) {
        let _ = writeln!(self.writer, "[frame] nothing pending");
    }

    fn on_lifecycle(&mut self, phase: LifecyclePhase) {
        let name = match phase {
            LifecyclePhase::Attached => "attached",
            LifecyclePhase::TornDown => "torn down",
        };
        let _ = writeln!(self.writer, "[lifecycle] {name}");
    }
}
