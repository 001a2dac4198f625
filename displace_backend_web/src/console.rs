// Copyright 2026 the Displace Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Browser-console trace output.
//!
//! [`ConsoleSink`] forwards engine trace events to `console.debug` (and
//! failures to `console.warn`). Per-target displacement events are chatty, so
//! they are only written when `verbose` is set.

use alloc::format;
use alloc::string::ToString;

use displace_core::DisplaceError;
use displace_core::lifecycle::Signal;
use displace_core::trace::{
    DisplaceEvent, FrameRequestEvent, GeometryEvent, GeometryReason, LifecyclePhase,
    ReleaseEvent, TraceSink,
};
use wasm_bindgen::JsValue;
use web_sys::console;

/// A [`TraceSink`] that writes to the browser console.
#[derive(Clone, Copy, Debug, Default)]
pub struct ConsoleSink {
    /// Also log per-target displacement and frame requests.
    pub verbose: bool,
}

/// Writes a recompute failure as a console warning.
pub(crate) fn warn(reason: GeometryReason, error: &DisplaceError) {
    console::warn_1(&JsValue::from_str(&format!(
        "[displace] {reason:?} recompute failed: {error}"
    )));
}

/// Writes a failed listener (un)registration as a console warning.
pub(crate) fn warn_listener(signal: Signal, action: &str, error: &JsValue) {
    console::warn_2(
        &JsValue::from_str(&format!(
            "[displace] failed to {action} {} listener:",
            signal.event_type()
        )),
        error,
    );
}

fn debug(line: &str) {
    console::debug_1(&JsValue::from_str(line));
}

impl TraceSink for ConsoleSink {
    fn on_targets_resolved(&mut self, count: usize) {
        debug(&format!("[displace] {count} target(s)"));
    }

    fn on_geometry(&mut self, e: &GeometryEvent) {
        debug(&format!(
            "[displace] {:?} center=({:.1}, {:.1})",
            e.reason, e.center.x, e.center.y
        ));
    }

    fn on_geometry_error(&mut self, reason: GeometryReason, error: &DisplaceError) {
        // Recompute failures are always warned by the dispatcher; only the
        // initial one reaches the console from here.
        if reason == GeometryReason::Initial {
            console::warn_1(&JsValue::from_str(&error.to_string()));
        }
    }

    fn on_frame_requested(&mut self, e: &FrameRequestEvent) {
        if self.verbose {
            debug(&format!(
                "[displace] frame {:?}{}",
                e.kind,
                if e.coalesced { " (coalesced)" } else { "" }
            ));
        }
    }

    fn on_displace(&mut self, e: &DisplaceEvent) {
        if self.verbose {
            debug(&format!(
                "[displace] target {} -> {}",
                e.target_index,
                e.vector.to_css()
            ));
        }
    }

    fn on_release(&mut self, e: &ReleaseEvent) {
        debug(&format!(
            "[displace] release {} target(s) over {}ms",
            e.targets,
            e.reset_time.as_millis()
        ));
    }

    fn on_lifecycle(&mut self, phase: LifecyclePhase) {
        debug(&format!("[displace] {phase:?}"));
    }
}
