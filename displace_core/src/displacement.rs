// Copyright 2026 the Displace Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The per-target displacement formula.
//!
//! Given the pointer's signed distance from the trigger center, each axis
//! contributes `sqrt(|strength|)` scaled by the displace factor (translation)
//! or by `skew_factor / 100` (shear, in degrees). Skew axes are
//! cross-assigned: the horizontal shear angle comes from the vertical
//! distance and vice versa.

use alloc::string::String;
use core::fmt::Write as _;
use core::time::Duration;

use kurbo::{Affine, Vec2};
#[cfg(not(feature = "std"))]
use kurbo::common::FloatFuncs as _;

use crate::settings::EffectiveParams;

/// Transition applied to every displacement frame, so consecutive frames
/// blend without visible stepping.
pub const MOVE_TRANSITION: Duration = Duration::from_millis(50);

/// Translate + skew for one target in one frame.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct DisplacementVector {
    /// Horizontal translation, in display units.
    pub dx: f64,
    /// Vertical translation, in display units.
    pub dy: f64,
    /// Shear magnitude derived from the horizontal distance, in degrees.
    pub skew_x: f64,
    /// Shear magnitude derived from the vertical distance, in degrees.
    pub skew_y: f64,
}

impl DisplacementVector {
    /// Computes the displacement for a pointer at `strength` from the center.
    ///
    /// A negative horizontal strength flips `dx` and both skew components;
    /// a negative vertical strength flips `dy` only. Locking either axis
    /// zeroes its translation and also zeroes `skew_y`; `skew_x` is never
    /// affected by locks.
    #[must_use]
    pub fn compute(strength: Vec2, params: &EffectiveParams) -> Self {
        let normalized_skew = params.skew_factor / 100.0;
        let root_x = strength.x.abs().sqrt();
        let root_y = strength.y.abs().sqrt();

        let mut v = Self {
            dx: root_x * params.displace_factor,
            dy: root_y * params.displace_factor,
            skew_x: root_x * normalized_skew,
            skew_y: root_y * normalized_skew,
        };

        if strength.x < 0.0 {
            v.dx = -v.dx;
            v.skew_x = -v.skew_x;
            v.skew_y = -v.skew_y;
        }
        if strength.y < 0.0 {
            v.dy = -v.dy;
        }

        if params.lock_x {
            v.dx = 0.0;
            v.skew_y = 0.0;
        }
        if params.lock_y {
            v.dy = 0.0;
            v.skew_y = 0.0;
        }
        v
    }

    /// Whether every component is zero.
    #[must_use]
    pub fn is_identity(&self) -> bool {
        self.dx == 0.0 && self.dy == 0.0 && self.skew_x == 0.0 && self.skew_y == 0.0
    }

    /// CSS `transform` value: translate first, then skew with the
    /// cross-assigned angle pair `skew(skew_y, skew_x)`.
    #[must_use]
    pub fn to_css(&self) -> String {
        let mut css = String::with_capacity(64);
        // Writing into a String cannot fail.
        let _ = write!(
            css,
            "translate({}px, {}px) skew({}deg, {}deg)",
            self.dx, self.dy, self.skew_y, self.skew_x
        );
        css
    }

    /// The same transform as a 2-D affine map (translate, then skew).
    #[must_use]
    pub fn to_affine(&self) -> Affine {
        let horizontal_shear = self.skew_y.to_radians().tan();
        let vertical_shear = self.skew_x.to_radians().tan();
        Affine::translate(Vec2::new(self.dx, self.dy))
            * Affine::skew(horizontal_shear, vertical_shear)
    }
}

/// What a presenter writes onto one target.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TargetStyle {
    /// The transform, or `None` to clear it back to rest.
    pub transform: Option<DisplacementVector>,
    /// Transition duration for the `transform` property.
    pub transition: Duration,
}

impl TargetStyle {
    /// A displacement frame with the short move transition.
    #[must_use]
    pub fn displaced(vector: DisplacementVector) -> Self {
        Self {
            transform: Some(vector),
            transition: MOVE_TRANSITION,
        }
    }

    /// A reset to rest over `reset_time`.
    #[must_use]
    pub fn rest(reset_time: Duration) -> Self {
        Self {
            transform: None,
            transition: reset_time,
        }
    }

    /// CSS `transform` value; empty for rest.
    #[must_use]
    pub fn transform_css(&self) -> String {
        self.transform
            .map(|v| v.to_css())
            .unwrap_or_default()
    }

    /// CSS `transition` value.
    #[must_use]
    pub fn transition_css(&self) -> String {
        let mut css = String::with_capacity(32);
        if self.transform.is_some() {
            let _ = write!(css, "transform {}s linear", self.transition.as_secs_f64());
        } else {
            let _ = write!(css, "transform {}ms", self.transition.as_millis());
        }
        css
    }
}
