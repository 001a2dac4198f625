// Copyright 2026 the Displace Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Signal registration and the top-level [`Displaceable`] handle.
//!
//! [`Lifecycle`] registers the four signals the engine reacts to (pointer
//! move and pointer exit on the trigger, resize and scroll on the viewport)
//! exactly once each, and unregisters exactly those on teardown.
//!
//! [`Displaceable`] is the constructible-or-error entry point: it validates,
//! prepares targets, and attaches only when every validation step passed.

use alloc::vec::Vec;

use crate::backend::{Element, Presenter, Viewport};
use crate::engine::{Displacer, FrameRequest};
use crate::error::DisplaceError;
use crate::geometry::{PointerSample, TriggerGeometry};
use crate::settings::DisplaceOptions;
use crate::target::Targets;
use crate::trace::{FrameKind, GeometryReason, LifecyclePhase, Tracer};

/// An external signal the engine listens for.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Signal {
    /// The pointer moved over the trigger.
    PointerMove,
    /// The pointer left the trigger.
    PointerExit,
    /// The viewport was resized.
    Resize,
    /// The viewport was scrolled.
    Scroll,
}

impl Signal {
    /// Every signal, in registration order.
    pub const ALL: [Self; 4] = [Self::PointerMove, Self::PointerExit, Self::Resize, Self::Scroll];

    /// The DOM event type carrying this signal.
    #[must_use]
    pub const fn event_type(self) -> &'static str {
        match self {
            Self::PointerMove => "mousemove",
            Self::PointerExit => "mouseout",
            Self::Resize => "resize",
            Self::Scroll => "scroll",
        }
    }

    /// Whether the signal is observed on the trigger (as opposed to the
    /// viewport).
    #[must_use]
    pub const fn targets_trigger(self) -> bool {
        matches!(self, Self::PointerMove | Self::PointerExit)
    }
}

/// Registers and unregisters signal handlers with a host.
pub trait SignalHub {
    /// Token needed to undo one registration.
    type Registration;

    /// Starts delivering `signal` to the engine.
    fn register(&mut self, signal: Signal) -> Self::Registration;

    /// Stops delivering the signal behind `registration`. Handlers must not
    /// fire after this returns.
    fn unregister(&mut self, registration: Self::Registration);
}

/// Symmetric attach/teardown over a [`SignalHub`].
pub struct Lifecycle<H: SignalHub> {
    hub: H,
    registrations: Vec<H::Registration>,
}

impl<H: SignalHub> core::fmt::Debug for Lifecycle<H> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Lifecycle")
            .field("registrations", &self.registrations.len())
            .finish_non_exhaustive()
    }
}

impl<H: SignalHub> Lifecycle<H> {
    /// Creates a detached lifecycle.
    #[must_use]
    pub fn new(hub: H) -> Self {
        Self {
            hub,
            registrations: Vec::new(),
        }
    }

    /// Registers every [`Signal`] once. Returns `false` (and does nothing)
    /// if already attached.
    pub fn attach(&mut self, tracer: &mut Tracer<'_>) -> bool {
        if self.is_attached() {
            return false;
        }
        for signal in Signal::ALL {
            let registration = self.hub.register(signal);
            self.registrations.push(registration);
        }
        tracer.lifecycle(LifecyclePhase::Attached);
        true
    }

    /// Unregisters everything [`attach`](Self::attach) registered. Returns
    /// `false` (and does nothing) if not attached.
    pub fn teardown(&mut self, tracer: &mut Tracer<'_>) -> bool {
        if !self.is_attached() {
            return false;
        }
        for registration in self.registrations.drain(..) {
            self.hub.unregister(registration);
        }
        tracer.lifecycle(LifecyclePhase::TornDown);
        true
    }

    /// Whether handlers are currently registered.
    #[must_use]
    pub fn is_attached(&self) -> bool {
        !self.registrations.is_empty()
    }

    /// The underlying hub.
    #[must_use]
    pub fn hub(&self) -> &H {
        &self.hub
    }
}

/// A running displacement effect: engine plus registered signals.
///
/// Every signal entry point is ignored once torn down, and teardown drops
/// any pending frame so a late frame callback is a no-op.
pub struct Displaceable<E, H: SignalHub> {
    displacer: Displacer<E>,
    lifecycle: Lifecycle<H>,
}

impl<E: core::fmt::Debug, H: SignalHub> core::fmt::Debug for Displaceable<E, H> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Displaceable")
            .field("displacer", &self.displacer)
            .field("lifecycle", &self.lifecycle)
            .finish()
    }
}

impl<E: Element, H: SignalHub> Displaceable<E, H> {
    /// Validates, prepares every target, then attaches.
    ///
    /// # Errors
    ///
    /// Any [`DisplaceError`] from validation. In that case nothing was
    /// prepared and nothing was registered with `hub`.
    pub fn new<V, P>(
        targets: Targets<E>,
        options: DisplaceOptions<E>,
        viewport: &V,
        presenter: &mut P,
        hub: H,
        tracer: &mut Tracer<'_>,
    ) -> Result<Self, DisplaceError>
    where
        V: Viewport + ?Sized,
        P: Presenter<E> + ?Sized,
    {
        let displacer = Displacer::new(targets, options, viewport, tracer)?;
        displacer.prepare_targets(presenter);
        let mut lifecycle = Lifecycle::new(hub);
        lifecycle.attach(tracer);
        Ok(Self {
            displacer,
            lifecycle,
        })
    }

    /// The engine.
    #[must_use]
    pub fn displacer(&self) -> &Displacer<E> {
        &self.displacer
    }

    /// The signal hub.
    #[must_use]
    pub fn hub(&self) -> &H {
        self.lifecycle.hub()
    }

    /// Whether signal handlers are registered.
    #[must_use]
    pub fn is_attached(&self) -> bool {
        self.lifecycle.is_attached()
    }

    /// Handles a pointer-move signal.
    pub fn pointer_moved(&mut self, sample: PointerSample, tracer: &mut Tracer<'_>) -> FrameRequest {
        if !self.is_attached() {
            return FrameRequest::Ignored;
        }
        self.displacer.pointer_moved(sample, tracer)
    }

    /// Handles a pointer-exit signal.
    pub fn pointer_exited(&mut self, tracer: &mut Tracer<'_>) -> FrameRequest {
        if !self.is_attached() {
            return FrameRequest::Ignored;
        }
        self.displacer.pointer_exited(tracer)
    }

    /// Handles a resize or scroll signal. Returns `Ok(None)` when detached.
    ///
    /// # Errors
    ///
    /// A measurement failure; handlers stay registered and the previous
    /// geometry stays in effect.
    pub fn viewport_changed<V: Viewport + ?Sized>(
        &mut self,
        reason: GeometryReason,
        viewport: &V,
        tracer: &mut Tracer<'_>,
    ) -> Result<Option<TriggerGeometry>, DisplaceError> {
        if !self.is_attached() {
            return Ok(None);
        }
        self.displacer
            .viewport_changed(reason, viewport, tracer)
            .map(Some)
    }

    /// Runs a display frame. Safe to call after teardown.
    pub fn frame<P: Presenter<E> + ?Sized>(
        &mut self,
        presenter: &mut P,
        tracer: &mut Tracer<'_>,
    ) -> Option<FrameKind> {
        self.displacer.frame(presenter, tracer)
    }

    /// Unregisters all handlers. Idempotent.
    pub fn teardown(&mut self, tracer: &mut Tracer<'_>) {
        if self.lifecycle.teardown(tracer) {
            self.displacer.cancel_pending();
        }
    }
}
