// Copyright 2026 the Displace Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Backend contract for platform integrations.
//!
//! The engine never touches a host API directly. A backend crate provides:
//!
//! - **Viewport**: Implements [`Viewport`]: the ambient surface's size and
//!   vertical scroll offset. This replaces any implicit global window.
//!
//! - **Elements**: Implements [`Element`] for its native element handle so
//!   the engine can measure triggers and read per-target override attributes.
//!
//! - **Presenter**: Implements [`Presenter`] to write the computed
//!   [`TargetStyle`] onto native elements.
//!
//! - **Signals**: Implements [`SignalHub`](crate::lifecycle::SignalHub) to
//!   register pointer and viewport listeners that forward into the engine.
//!
//! - **Frame pacing**: Requests one display frame whenever an engine
//!   operation returns [`FrameRequest::Schedule`](crate::engine::FrameRequest),
//!   then calls [`Displacer::frame`](crate::engine::Displacer::frame). This is
//!   backend-specific and not abstracted by a trait because the mechanism
//!   (e.g. `requestAnimationFrame`) differs fundamentally across hosts.
//!
//! # Frame loop pseudocode
//!
//! ```rust,ignore
//! fn on_pointer_move(x: f64, y: f64) {
//!     let sample = PointerSample::from_client(x, y, viewport.scroll_y());
//!     if displacer.pointer_moved(sample, &mut tracer).needs_frame() {
//!         request_frame(on_frame);
//!     }
//! }
//!
//! fn on_frame() {
//!     displacer.frame(&mut presenter, &mut tracer);
//! }
//! ```

use kurbo::{Rect, Size};

use crate::displacement::TargetStyle;

/// The ambient display surface.
pub trait Viewport {
    /// Current inner size of the surface, in display units.
    fn inner_size(&self) -> Size;

    /// Current vertical scroll offset, in display units.
    fn scroll_y(&self) -> f64;
}

/// Per-target metadata keys that override the shared settings.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum OverrideKey {
    /// Overrides [`displace_factor`](crate::settings::DisplaceSettings::displace_factor).
    DisplaceFactor,
    /// Overrides [`skew_factor`](crate::settings::DisplaceSettings::skew_factor).
    SkewFactor,
    /// Locks horizontal displacement for this target.
    LockX,
    /// Locks vertical displacement for this target.
    LockY,
}

impl OverrideKey {
    /// All keys, in the order they are read.
    pub const ALL: [Self; 4] = [
        Self::DisplaceFactor,
        Self::SkewFactor,
        Self::LockX,
        Self::LockY,
    ];

    /// The camel-case dataset name (`displaceFactor`, ...).
    #[must_use]
    pub const fn dataset_name(self) -> &'static str {
        match self {
            Self::DisplaceFactor => "displaceFactor",
            Self::SkewFactor => "skewFactor",
            Self::LockX => "lockX",
            Self::LockY => "lockY",
        }
    }

    /// The markup attribute name (`data-displace-factor`, ...).
    #[must_use]
    pub const fn attribute_name(self) -> &'static str {
        match self {
            Self::DisplaceFactor => "data-displace-factor",
            Self::SkewFactor => "data-skew-factor",
            Self::LockX => "data-lock-x",
            Self::LockY => "data-lock-y",
        }
    }
}

/// A native element handle the engine can measure and inspect.
///
/// Elements are owned by the host; the engine only holds handles.
pub trait Element {
    /// Current bounding box in viewport coordinates (not including scroll).
    fn bounding_rect(&self) -> Rect;

    /// Raw value of an override attribute, if present.
    ///
    /// Called on every frame; implementations must not cache.
    fn attribute(&self, key: OverrideKey) -> Option<alloc::string::String>;
}

/// Writes computed styles onto native elements.
///
/// Implemented by the DOM presenter and by test doubles.
pub trait Presenter<E> {
    /// One-time preparation when the engine takes ownership of a target
    /// (disable pointer interaction, hint that `transform` will change).
    fn prepare(&mut self, target: &E);

    /// Applies the transform and transition for the current frame.
    fn apply(&mut self, target: &E, style: &TargetStyle);
}
