// Copyright 2026 the Displace Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The displacement engine.
//!
//! [`Displacer`] owns the resolved targets, the immutable settings, and the
//! trigger geometry. Pointer signals do not touch targets directly: they fill
//! a single pending-frame slot and tell the backend whether a display frame
//! must be requested. When the frame fires, [`Displacer::frame`] drains the
//! slot and writes one style per target.
//!
//! Only the latest signal before a frame counts. A second pointer sample
//! replaces the first; a pointer exit replaces a pending move (and vice
//! versa). At most one frame request is outstanding at a time.

use alloc::vec::Vec;

use crate::backend::{Element, Presenter, Viewport};
use crate::displacement::{DisplacementVector, TargetStyle};
use crate::error::DisplaceError;
use crate::geometry::{GeometryTracker, PointerSample, TriggerGeometry};
use crate::settings::{DisplaceOptions, DisplaceSettings, TargetOverrides};
use crate::target::{Targets, resolve_targets};
use crate::trace::{
    DisplaceEvent, FrameKind, FrameRequestEvent, GeometryEvent, GeometryReason, ReleaseEvent,
    Tracer,
};

/// What the backend should do after a signal.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FrameRequest {
    /// Request a display frame and call [`Displacer::frame`] when it fires.
    Schedule,
    /// A frame is already requested; the signal replaced its payload.
    AlreadyPending,
    /// Nothing to do (the engine is not attached).
    Ignored,
}

impl FrameRequest {
    /// Whether a new display frame must be requested.
    #[must_use]
    pub fn needs_frame(self) -> bool {
        matches!(self, Self::Schedule)
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
enum Pending {
    Move(PointerSample),
    Release,
}

impl Pending {
    fn kind(self) -> FrameKind {
        match self {
            Self::Move(_) => FrameKind::Move,
            Self::Release => FrameKind::Release,
        }
    }
}

/// Per-frame transform computation over a fixed target list.
#[derive(Debug)]
pub struct Displacer<E> {
    targets: Vec<E>,
    settings: DisplaceSettings<E>,
    geometry: GeometryTracker,
    pending: Option<Pending>,
}

impl<E: Element> Displacer<E> {
    /// Validates the inputs and measures the trigger.
    ///
    /// # Errors
    ///
    /// Returns the first validation failure: [`DisplaceError::InvalidInput`]
    /// from target resolution, then [`DisplaceError::InvalidTrigger`] or
    /// [`DisplaceError::DegenerateTrigger`] from the initial measurement.
    pub fn new<V: Viewport + ?Sized>(
        targets: Targets<E>,
        options: DisplaceOptions<E>,
        viewport: &V,
        tracer: &mut Tracer<'_>,
    ) -> Result<Self, DisplaceError> {
        let targets = resolve_targets(targets)?;
        tracer.targets_resolved(targets.len());

        let settings = DisplaceSettings::resolve(options);
        let geometry = match GeometryTracker::new(settings.trigger(), viewport) {
            Ok(geometry) => geometry,
            Err(err) => {
                tracer.geometry_error(GeometryReason::Initial, &err);
                return Err(err);
            }
        };
        tracer.geometry(&GeometryEvent {
            reason: GeometryReason::Initial,
            center: geometry.geometry().center,
        });

        Ok(Self {
            targets,
            settings,
            geometry,
            pending: None,
        })
    }

    /// Lets the presenter take ownership of every target's interaction and
    /// transform styles.
    pub fn prepare_targets<P: Presenter<E> + ?Sized>(&self, presenter: &mut P) {
        for target in &self.targets {
            presenter.prepare(target);
        }
    }

    /// The resolved targets, in input order.
    #[must_use]
    pub fn targets(&self) -> &[E] {
        &self.targets
    }

    /// The resolved settings.
    #[must_use]
    pub fn settings(&self) -> &DisplaceSettings<E> {
        &self.settings
    }

    /// The current (last good) trigger geometry.
    #[must_use]
    pub fn geometry(&self) -> TriggerGeometry {
        self.geometry.geometry()
    }

    /// Whether a frame is pending.
    #[must_use]
    pub fn has_pending_frame(&self) -> bool {
        self.pending.is_some()
    }

    /// Records a pointer sample for the next frame.
    pub fn pointer_moved(&mut self, sample: PointerSample, tracer: &mut Tracer<'_>) -> FrameRequest {
        self.set_pending(Pending::Move(sample), tracer)
    }

    /// Schedules a return to rest for the next frame.
    pub fn pointer_exited(&mut self, tracer: &mut Tracer<'_>) -> FrameRequest {
        self.set_pending(Pending::Release, tracer)
    }

    fn set_pending(&mut self, pending: Pending, tracer: &mut Tracer<'_>) -> FrameRequest {
        let coalesced = self.pending.replace(pending).is_some();
        tracer.frame_requested(&FrameRequestEvent {
            kind: pending.kind(),
            coalesced,
        });
        if coalesced {
            FrameRequest::AlreadyPending
        } else {
            FrameRequest::Schedule
        }
    }

    /// Re-measures the trigger after a resize or scroll.
    ///
    /// # Errors
    ///
    /// Returns the measurement error; the previous geometry stays in effect.
    pub fn viewport_changed<V: Viewport + ?Sized>(
        &mut self,
        reason: GeometryReason,
        viewport: &V,
        tracer: &mut Tracer<'_>,
    ) -> Result<TriggerGeometry, DisplaceError> {
        match self.geometry.recompute(self.settings.trigger(), viewport) {
            Ok(geometry) => {
                tracer.geometry(&GeometryEvent {
                    reason,
                    center: geometry.center,
                });
                Ok(geometry)
            }
            Err(err) => {
                tracer.geometry_error(reason, &err);
                Err(err)
            }
        }
    }

    /// Drops any pending frame payload. A frame that fires afterwards does
    /// nothing.
    pub fn cancel_pending(&mut self) {
        self.pending = None;
    }

    /// Applies the pending frame, if any, and returns what it did.
    pub fn frame<P: Presenter<E> + ?Sized>(
        &mut self,
        presenter: &mut P,
        tracer: &mut Tracer<'_>,
    ) -> Option<FrameKind> {
        let Some(pending) = self.pending.take() else {
            tracer.frame_skipped();
            return None;
        };
        match pending {
            Pending::Move(sample) => self.apply_displacement(sample, presenter, tracer),
            Pending::Release => self.apply_release(presenter, tracer),
        }
        Some(pending.kind())
    }

    /// Computes the transform for one target, reading its overrides now.
    #[must_use]
    pub fn displacement_for(&self, target: &E, sample: PointerSample) -> DisplacementVector {
        let overrides = TargetOverrides::read(target);
        let params = self.settings.effective(&overrides);
        DisplacementVector::compute(self.geometry().strength(sample), &params)
    }

    fn apply_displacement<P: Presenter<E> + ?Sized>(
        &self,
        sample: PointerSample,
        presenter: &mut P,
        tracer: &mut Tracer<'_>,
    ) {
        for (target_index, target) in self.targets.iter().enumerate() {
            let vector = self.displacement_for(target, sample);
            presenter.apply(target, &TargetStyle::displaced(vector));
            tracer.displace(&DisplaceEvent {
                target_index,
                vector,
            });
        }
    }

    fn apply_release<P: Presenter<E> + ?Sized>(&self, presenter: &mut P, tracer: &mut Tracer<'_>) {
        let style = TargetStyle::rest(self.settings.reset_time());
        for target in &self.targets {
            presenter.apply(target, &style);
        }
        tracer.release(&ReleaseEvent {
            targets: self.targets.len(),
            reset_time: self.settings.reset_time(),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::OverrideKey;
    use crate::settings::TriggerRef;
    use crate::target::Candidate;
    use crate::testing::{FakeElement, FakeViewport, RecordingPresenter};
    use alloc::vec;
    use core::time::Duration;
    use kurbo::{Point, Rect};

    fn displacer(targets: Vec<FakeElement>, options: DisplaceOptions<FakeElement>) -> Displacer<FakeElement> {
        let viewport = FakeViewport::new(800.0, 600.0);
        Displacer::new(Targets::Collection(targets), options, &viewport, &mut Tracer::none())
            .unwrap()
    }

    fn translate_of(style: &TargetStyle) -> (f64, f64) {
        let v = style.transform.expect("expected a displacement");
        (v.dx, v.dy)
    }

    #[test]
    fn construction_measures_viewport_center() {
        let d = displacer(vec![FakeElement::new(1)], DisplaceOptions::default());
        assert_eq!(d.geometry().center, Point::new(400.0, 300.0));
        assert_eq!(d.targets().len(), 1);
        assert!(!d.has_pending_frame(), "fresh engine has no frame pending");
    }

    #[test]
    fn construction_fails_on_invalid_list_member() {
        let viewport = FakeViewport::new(800.0, 600.0);
        let err = Displacer::new(
            Targets::List(vec![
                Candidate::Element(FakeElement::new(1)),
                Candidate::Foreign("undefined".into()),
            ]),
            DisplaceOptions::default(),
            &viewport,
            &mut Tracer::none(),
        )
        .unwrap_err();
        assert_eq!(err, DisplaceError::InvalidInput("undefined".into()));
    }

    #[test]
    fn construction_fails_on_degenerate_trigger() {
        let viewport = FakeViewport::new(800.0, 600.0);
        let hidden = FakeElement::new(9).with_rect(Rect::ZERO);
        let err = Displacer::new(
            Targets::Single(FakeElement::new(1)),
            DisplaceOptions {
                trigger: Some(TriggerRef::Element(hidden)),
                ..DisplaceOptions::default()
            },
            &viewport,
            &mut Tracer::none(),
        )
        .unwrap_err();
        assert!(
            matches!(err, DisplaceError::DegenerateTrigger { .. }),
            "unexpected error {err:?}"
        );
    }

    #[test]
    fn move_frame_applies_formula_to_every_target() {
        let mut d = displacer(
            vec![FakeElement::new(1), FakeElement::new(2)],
            DisplaceOptions::default(),
        );
        let mut presenter = RecordingPresenter::default();

        let request = d.pointer_moved(PointerSample { x: 500.0, y: 200.0 }, &mut Tracer::none());
        assert_eq!(request, FrameRequest::Schedule);
        assert!(presenter.applied.is_empty(), "nothing applied before the frame");

        assert_eq!(d.frame(&mut presenter, &mut Tracer::none()), Some(FrameKind::Move));
        assert_eq!(presenter.applied.len(), 2);
        for (id, style) in &presenter.applied {
            let (dx, dy) = translate_of(style);
            assert!((dx - 30.0).abs() < 1e-9, "target {id} dx {dx}");
            assert!((dy + 30.0).abs() < 1e-9, "target {id} dy {dy}");
            assert_eq!(style.transition, Duration::from_millis(50));
        }
        assert_eq!(
            presenter.applied.iter().map(|(id, _)| *id).collect::<Vec<_>>(),
            vec![1, 2]
        );
    }

    #[test]
    fn latest_sample_wins_within_a_frame() {
        let mut d = displacer(vec![FakeElement::new(1)], DisplaceOptions::default());
        let mut presenter = RecordingPresenter::default();

        let first = d.pointer_moved(PointerSample { x: 0.0, y: 0.0 }, &mut Tracer::none());
        let second = d.pointer_moved(PointerSample { x: 416.0, y: 309.0 }, &mut Tracer::none());
        assert_eq!(first, FrameRequest::Schedule);
        assert_eq!(second, FrameRequest::AlreadyPending);

        d.frame(&mut presenter, &mut Tracer::none());
        assert_eq!(presenter.applied.len(), 1, "one update per target per frame");
        let (dx, dy) = translate_of(&presenter.applied[0].1);
        assert!((dx - 12.0).abs() < 1e-9, "dx {dx}");
        assert!((dy - 9.0).abs() < 1e-9, "dy {dy}");

        // The slot is drained; the next signal schedules again.
        let third = d.pointer_moved(PointerSample { x: 1.0, y: 1.0 }, &mut Tracer::none());
        assert_eq!(third, FrameRequest::Schedule);
    }

    #[test]
    fn exit_resets_to_rest_with_reset_time() {
        let mut d = displacer(
            vec![FakeElement::new(1), FakeElement::new(2)],
            DisplaceOptions {
                reset_time: Some(Duration::from_millis(250)),
                ..DisplaceOptions::default()
            },
        );
        let mut presenter = RecordingPresenter::default();

        d.pointer_moved(PointerSample { x: 10.0, y: 10.0 }, &mut Tracer::none());
        d.frame(&mut presenter, &mut Tracer::none());
        presenter.applied.clear();

        assert_eq!(d.pointer_exited(&mut Tracer::none()), FrameRequest::Schedule);
        assert_eq!(
            d.frame(&mut presenter, &mut Tracer::none()),
            Some(FrameKind::Release)
        );
        assert_eq!(presenter.applied.len(), 2);
        for (_, style) in &presenter.applied {
            assert_eq!(*style, TargetStyle::rest(Duration::from_millis(250)));
        }
    }

    #[test]
    fn exit_supersedes_pending_move() {
        let mut d = displacer(vec![FakeElement::new(1)], DisplaceOptions::default());
        let mut presenter = RecordingPresenter::default();

        d.pointer_moved(PointerSample { x: 10.0, y: 10.0 }, &mut Tracer::none());
        assert_eq!(d.pointer_exited(&mut Tracer::none()), FrameRequest::AlreadyPending);
        d.frame(&mut presenter, &mut Tracer::none());

        assert_eq!(presenter.applied.len(), 1);
        assert_eq!(presenter.applied[0].1.transform, None);
    }

    #[test]
    fn repeated_release_is_idempotent() {
        let mut d = displacer(vec![FakeElement::new(1)], DisplaceOptions::default());
        let mut presenter = RecordingPresenter::default();
        for _ in 0..3 {
            d.pointer_exited(&mut Tracer::none());
            d.frame(&mut presenter, &mut Tracer::none());
        }
        let first = presenter.applied[0].1;
        assert!(
            presenter.applied.iter().all(|(_, style)| *style == first),
            "every release writes the same rest style"
        );
    }

    #[test]
    fn per_target_overrides_are_read_each_frame() {
        let target = FakeElement::new(1).with_attr(OverrideKey::DisplaceFactor, "1");
        let mut d = displacer(vec![target.clone()], DisplaceOptions::default());
        let mut presenter = RecordingPresenter::default();
        let sample = PointerSample { x: 500.0, y: 400.0 };

        d.pointer_moved(sample, &mut Tracer::none());
        d.frame(&mut presenter, &mut Tracer::none());
        assert_eq!(translate_of(&presenter.applied[0].1), (10.0, 10.0));

        target.set_attr(OverrideKey::DisplaceFactor, "2");
        target.set_attr(OverrideKey::LockY, "true");
        d.pointer_moved(sample, &mut Tracer::none());
        d.frame(&mut presenter, &mut Tracer::none());
        assert_eq!(translate_of(&presenter.applied[1].1), (20.0, 0.0));
    }

    #[test]
    fn malformed_override_matches_no_override() {
        let plain = FakeElement::new(1);
        let garbled = FakeElement::new(2)
            .with_attr(OverrideKey::DisplaceFactor, "wide")
            .with_attr(OverrideKey::SkewFactor, "");
        let d = displacer(vec![plain.clone(), garbled.clone()], DisplaceOptions::default());
        let sample = PointerSample { x: 123.0, y: 456.0 };
        assert_eq!(
            d.displacement_for(&plain, sample),
            d.displacement_for(&garbled, sample)
        );
    }

    #[test]
    fn shared_lock_applies_to_every_target() {
        let mut d = displacer(
            vec![FakeElement::new(1), FakeElement::new(2)],
            DisplaceOptions {
                lock_x: Some(true),
                ..DisplaceOptions::default()
            },
        );
        let mut presenter = RecordingPresenter::default();
        d.pointer_moved(PointerSample { x: 500.0, y: 200.0 }, &mut Tracer::none());
        d.frame(&mut presenter, &mut Tracer::none());
        for (_, style) in &presenter.applied {
            let v = style.transform.expect("displaced");
            assert_eq!(v.dx, 0.0);
            assert_eq!(v.skew_y, 0.0);
            assert!((v.dy + 30.0).abs() < 1e-9, "dy {}", v.dy);
            assert!((v.skew_x - 0.5).abs() < 1e-9, "skew_x {}", v.skew_x);
        }
    }

    #[test]
    fn frame_uses_geometry_at_frame_time() {
        let viewport = FakeViewport::new(800.0, 600.0);
        let mut d = Displacer::new(
            Targets::Single(FakeElement::new(1)),
            DisplaceOptions::default(),
            &viewport,
            &mut Tracer::none(),
        )
        .unwrap();
        let mut presenter = RecordingPresenter::default();

        d.pointer_moved(PointerSample { x: 409.0, y: 300.0 }, &mut Tracer::none());
        viewport.set_size(818.0, 600.0);
        d.viewport_changed(GeometryReason::Resize, &viewport, &mut Tracer::none())
            .unwrap();
        d.frame(&mut presenter, &mut Tracer::none());
        // Center moved to x = 409, so the pointer now sits on it.
        assert_eq!(translate_of(&presenter.applied[0].1), (0.0, 0.0));
    }

    #[test]
    fn failed_recompute_keeps_serving_old_geometry() {
        let viewport = FakeViewport::new(800.0, 600.0);
        let trigger = FakeElement::new(9).with_rect(Rect::new(0.0, 0.0, 200.0, 100.0));
        let mut d = Displacer::new(
            Targets::Single(FakeElement::new(1)),
            DisplaceOptions {
                trigger: Some(TriggerRef::Element(trigger.clone())),
                ..DisplaceOptions::default()
            },
            &viewport,
            &mut Tracer::none(),
        )
        .unwrap();

        trigger.set_rect(Rect::new(0.0, 0.0, 0.0, 100.0));
        let err = d
            .viewport_changed(GeometryReason::Scroll, &viewport, &mut Tracer::none())
            .unwrap_err();
        assert!(
            matches!(err, DisplaceError::DegenerateTrigger { .. }),
            "unexpected error {err:?}"
        );
        assert_eq!(d.geometry().center, Point::new(100.0, 50.0));
    }

    #[test]
    fn cancelled_frame_is_skipped() {
        let mut d = displacer(vec![FakeElement::new(1)], DisplaceOptions::default());
        let mut presenter = RecordingPresenter::default();
        d.pointer_moved(PointerSample { x: 1.0, y: 2.0 }, &mut Tracer::none());
        d.cancel_pending();
        assert_eq!(d.frame(&mut presenter, &mut Tracer::none()), None);
        assert!(presenter.applied.is_empty(), "cancelled frame wrote styles");
    }

    #[test]
    fn prepare_touches_each_target_once() {
        let d = displacer(
            vec![FakeElement::new(3), FakeElement::new(4)],
            DisplaceOptions::default(),
        );
        let mut presenter = RecordingPresenter::default();
        d.prepare_targets(&mut presenter);
        assert_eq!(presenter.prepared, vec![3, 4]);
    }
}
