// Copyright 2026 the Displace Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Chrome Trace Event Format exporter.
//!
//! [`export`] reads records from a [`RecorderSink`](super::recorder::RecorderSink)
//! and writes [Chrome Trace Event Format][spec] JSON to the given writer.
//!
//! [spec]: https://docs.google.com/document/d/1CvAClvFfyA5R-PhYUmn5OOQtYMH4h6I0nSsKchNAySU

use std::io::{self, Write};

use serde_json::{Value, json};

use displace_core::trace::LifecyclePhase;

use crate::recorder::{Record, RecordedEvent};

/// Exports recorded events as Chrome Trace Event Format JSON.
///
/// The output is a complete JSON array of trace event objects, suitable for
/// loading into `chrome://tracing` or [Perfetto](https://ui.perfetto.dev/).
/// Attach and teardown become a begin/end pair named `attached`; everything
/// else is an instant event. Each target gets its own track for displacement
/// events.
pub fn export(records: &[Record], writer: &mut dyn Write) -> io::Result<()> {
    let mut events: Vec<Value> = Vec::with_capacity(records.len());

    for record in records {
        let ts = record.at.as_secs_f64() * 1_000_000.0;
        let event = match &record.event {
            RecordedEvent::Lifecycle(phase) => json!({
                "ph": phase_marker(*phase),
                "name": "attached",
                "cat": "Lifecycle",
                "ts": ts,
                "pid": 0,
                "tid": 0,
            }),
            RecordedEvent::TargetsResolved { count } => instant(
                "TargetsResolved",
                "Lifecycle",
                ts,
                0,
                json!({ "count": count }),
            ),
            RecordedEvent::Geometry(e) => instant(
                "Geometry",
                "Geometry",
                ts,
                0,
                json!({
                    "reason": format!("{:?}", e.reason),
                    "center_x": e.center.x,
                    "center_y": e.center.y,
                }),
            ),
            RecordedEvent::GeometryError { reason, message } => instant(
                "GeometryError",
                "Geometry",
                ts,
                0,
                json!({
                    "reason": format!("{reason:?}"),
                    "message": message,
                }),
            ),
            RecordedEvent::FrameRequested(e) => instant(
                "FrameRequested",
                "Frame",
                ts,
                0,
                json!({
                    "kind": format!("{:?}", e.kind),
                    "coalesced": e.coalesced,
                }),
            ),
            RecordedEvent::Displace(e) => instant(
                "Displace",
                "Frame",
                ts,
                e.target_index + 1,
                json!({
                    "target": e.target_index,
                    "dx": e.vector.dx,
                    "dy": e.vector.dy,
                    "skew_x": e.vector.skew_x,
                    "skew_y": e.vector.skew_y,
                }),
            ),
            RecordedEvent::Release(e) => instant(
                "Release",
                "Frame",
                ts,
                0,
                json!({
                    "targets": e.targets,
                    "reset_ms": u64::try_from(e.reset_time.as_millis()).unwrap_or(u64::MAX),
                }),
            ),
            RecordedEvent::FrameSkipped => instant("FrameSkipped", "Frame", ts, 0, json!({})),
        };
        events.push(event);
    }

    serde_json::to_writer_pretty(writer, &events)?;
    Ok(())
}

fn phase_marker(phase: LifecyclePhase) -> &'static str {
    match phase {
        LifecyclePhase::Attached => "B",
        LifecyclePhase::TornDown => "E",
    }
}

fn instant(name: &str, cat: &str, ts: f64, tid: usize, args: Value) -> Value {
    json!({
        "ph": "i",
        "name": name,
        "cat": cat,
        "ts": ts,
        "pid": 0,
        "tid": tid,
        "s": "t",
        "args": args,
    })
}
