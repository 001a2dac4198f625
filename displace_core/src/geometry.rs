// Copyright 2026 the Displace Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Trigger geometry in document coordinates.
//!
//! The trigger center is the zero point of displacement. It is measured once
//! at construction and re-measured (never incrementally updated) on every
//! resize or scroll signal. All positions here include the vertical scroll
//! offset, so pointer samples and centers compare directly.

use kurbo::{Point, Vec2};

use crate::backend::{Element, Viewport};
use crate::error::DisplaceError;
use crate::settings::TriggerRef;

/// A pointer position in document coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointerSample {
    /// Horizontal position.
    pub x: f64,
    /// Vertical position, including scroll offset.
    pub y: f64,
}

impl PointerSample {
    /// Converts a viewport-relative (client) position to document coordinates.
    #[must_use]
    pub fn from_client(client_x: f64, client_y: f64, scroll_y: f64) -> Self {
        Self {
            x: client_x,
            y: client_y + scroll_y,
        }
    }

    /// The sample as a point.
    #[must_use]
    pub fn to_point(self) -> Point {
        Point::new(self.x, self.y)
    }
}

/// The trigger center in document coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TriggerGeometry {
    /// Center of the trigger area.
    pub center: Point,
}

impl TriggerGeometry {
    /// Measures `trigger` against the current viewport state.
    ///
    /// For the viewport this is `(width / 2, height / 2 + scroll_y)`; for an
    /// element it is the center of its bounding box plus `scroll_y`.
    ///
    /// # Errors
    ///
    /// - [`DisplaceError::InvalidTrigger`] for [`TriggerRef::Foreign`].
    /// - [`DisplaceError::DegenerateTrigger`] when the element has zero width
    ///   or height.
    pub fn measure<E: Element, V: Viewport + ?Sized>(
        trigger: &TriggerRef<E>,
        viewport: &V,
    ) -> Result<Self, DisplaceError> {
        let scroll = Vec2::new(0.0, viewport.scroll_y());
        match trigger {
            TriggerRef::Viewport => {
                let size = viewport.inner_size();
                Ok(Self {
                    center: Point::new(size.width / 2.0, size.height / 2.0) + scroll,
                })
            }
            TriggerRef::Element(element) => {
                let rect = element.bounding_rect();
                let (width, height) = (rect.width(), rect.height());
                if !(width > 0.0 && height > 0.0) {
                    return Err(DisplaceError::DegenerateTrigger { width, height });
                }
                Ok(Self {
                    center: rect.center() + scroll,
                })
            }
            TriggerRef::Foreign(what) => Err(DisplaceError::InvalidTrigger(what.clone())),
        }
    }

    /// Signed distance from the center to `sample`, per axis.
    #[must_use]
    pub fn strength(&self, sample: PointerSample) -> Vec2 {
        sample.to_point() - self.center
    }
}

/// Caches the last successfully measured [`TriggerGeometry`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GeometryTracker {
    current: TriggerGeometry,
}

impl GeometryTracker {
    /// Performs the initial measurement.
    ///
    /// # Errors
    ///
    /// Propagates any [`TriggerGeometry::measure`] error; there is no
    /// last-known-good geometry to fall back on yet.
    pub fn new<E: Element, V: Viewport + ?Sized>(
        trigger: &TriggerRef<E>,
        viewport: &V,
    ) -> Result<Self, DisplaceError> {
        Ok(Self {
            current: TriggerGeometry::measure(trigger, viewport)?,
        })
    }

    /// Re-measures and overwrites the cached center.
    ///
    /// # Errors
    ///
    /// On failure the previous geometry is kept and the error returned.
    pub fn recompute<E: Element, V: Viewport + ?Sized>(
        &mut self,
        trigger: &TriggerRef<E>,
        viewport: &V,
    ) -> Result<TriggerGeometry, DisplaceError> {
        let measured = TriggerGeometry::measure(trigger, viewport)?;
        self.current = measured;
        Ok(measured)
    }

    /// The current (last good) geometry.
    #[must_use]
    pub fn geometry(&self) -> TriggerGeometry {
        self.current
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{FakeElement, FakeViewport};
    use kurbo::Rect;

    #[test]
    fn viewport_center_includes_scroll() {
        let viewport = FakeViewport::new(800.0, 600.0).scrolled(250.0);
        let geometry =
            TriggerGeometry::measure(&TriggerRef::<FakeElement>::Viewport, &viewport).unwrap();
        assert_eq!(geometry.center, Point::new(400.0, 550.0));
    }

    #[test]
    fn element_center_includes_scroll() {
        let viewport = FakeViewport::new(800.0, 600.0).scrolled(100.0);
        let trigger = FakeElement::new(1).with_rect(Rect::new(10.0, 20.0, 110.0, 60.0));
        let geometry = TriggerGeometry::measure(&TriggerRef::Element(trigger), &viewport).unwrap();
        assert_eq!(geometry.center, Point::new(60.0, 140.0));
    }

    #[test]
    fn zero_size_element_is_degenerate() {
        let viewport = FakeViewport::new(800.0, 600.0);
        let trigger = FakeElement::new(1).with_rect(Rect::new(10.0, 20.0, 10.0, 60.0));
        assert_eq!(
            TriggerGeometry::measure(&TriggerRef::Element(trigger), &viewport),
            Err(DisplaceError::DegenerateTrigger {
                width: 0.0,
                height: 40.0
            })
        );
    }

    #[test]
    fn foreign_trigger_is_invalid() {
        let viewport = FakeViewport::new(800.0, 600.0);
        let trigger = TriggerRef::<FakeElement>::Foreign("42".into());
        assert_eq!(
            TriggerGeometry::measure(&trigger, &viewport),
            Err(DisplaceError::InvalidTrigger("42".into()))
        );
    }

    #[test]
    fn recompute_failure_keeps_last_good_center() {
        let viewport = FakeViewport::new(800.0, 600.0);
        let trigger = FakeElement::new(1).with_rect(Rect::new(0.0, 0.0, 100.0, 100.0));
        let trigger = TriggerRef::Element(trigger);
        let mut tracker = GeometryTracker::new(&trigger, &viewport).unwrap();

        if let TriggerRef::Element(element) = &trigger {
            element.set_rect(Rect::ZERO);
        }
        assert!(
            tracker.recompute(&trigger, &viewport).is_err(),
            "collapsed trigger should fail to measure"
        );
        assert_eq!(tracker.geometry().center, Point::new(50.0, 50.0));

        if let TriggerRef::Element(element) = &trigger {
            element.set_rect(Rect::new(0.0, 0.0, 200.0, 100.0));
        }
        viewport.set_scroll_y(30.0);
        let geometry = tracker.recompute(&trigger, &viewport).unwrap();
        assert_eq!(geometry.center, Point::new(100.0, 80.0));
        assert_eq!(tracker.geometry(), geometry);
    }

    #[test]
    fn strength_is_sample_minus_center() {
        let geometry = TriggerGeometry {
            center: Point::new(400.0, 300.0),
        };
        let strength = geometry.strength(PointerSample::from_client(500.0, 150.0, 50.0));
        assert_eq!(strength, Vec2::new(100.0, -100.0));
    }
}
