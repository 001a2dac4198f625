// Copyright 2026 the Displace Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Web backend for displace.
//!
//! This crate provides integration with browser APIs:
//!
//! - [`DomElement`] / [`WindowViewport`]: DOM implementations of the engine's
//!   element and viewport traits
//! - [`DomPresenter`]: inline `transform`/`transition` writes
//! - [`DomSignals`]: `mousemove`/`mouseout` on the trigger, `resize`/`scroll`
//!   on the window
//! - [`FrameRequester`]: one-shot `requestAnimationFrame` scheduling
//! - [`ConsoleSink`]: trace output to the browser console
//! - [`Displaceable`]: the JS-facing class tying it all together
//!
//! From JS:
//!
//! ```js
//! const effect = new Displaceable(document.querySelectorAll(".card"), {
//!   displaceFactor: 4,
//!   trigger: document.querySelector("#stage"),
//! });
//! // later
//! effect.destroy();
//! ```
//!
//! The constructor throws if the targets or the trigger are invalid; no
//! listener is registered in that case.

#![no_std]

extern crate alloc;

mod console;
mod convert;
mod element;
mod presenter;
mod raf;
mod signals;

pub use console::ConsoleSink;
pub use convert::{error_to_js, options_from_js, targets_from_js, trigger_from_js};
pub use element::{DomElement, WindowViewport};
pub use presenter::DomPresenter;
pub use raf::FrameRequester;
pub use signals::{DomSignals, Listener};

use alloc::rc::{Rc, Weak};
use core::cell::{Cell, RefCell};

use displace_core::DisplaceError;
use displace_core::backend::Viewport as _;
use displace_core::geometry::PointerSample;
use displace_core::lifecycle::{self, Signal};
use displace_core::settings::{DisplaceOptions, TriggerRef};
use displace_core::target::Targets;
use displace_core::trace::{GeometryReason, Tracer};
use wasm_bindgen::prelude::*;
use web_sys::{Event, EventTarget, MouseEvent};

type Engine = lifecycle::Displaceable<DomElement, DomSignals>;

struct Shared {
    /// `None` only while construction is in progress.
    engine: Option<Engine>,
    presenter: DomPresenter,
    viewport: WindowViewport,
    frames: FrameRequester,
    sink: ConsoleSink,
}

struct Handle {
    state: RefCell<Shared>,
    /// Set when teardown ran while `state` was borrowed; the borrower
    /// finishes it before releasing its strong reference.
    teardown_deferred: Cell<bool>,
}

impl Handle {
    fn teardown(&self) {
        let Ok(mut guard) = self.state.try_borrow_mut() else {
            self.teardown_deferred.set(true);
            web_sys::console::warn_1(&JsValue::from_str(
                "[displace] teardown while busy; deferred to the end of the current callback",
            ));
            return;
        };
        self.teardown_deferred.set(false);
        let Shared { engine, sink, .. } = &mut *guard;
        if let Some(engine) = engine {
            engine.teardown(&mut Tracer::new(sink));
        }
    }

    /// Runs a teardown that was deferred while `state` was borrowed.
    fn settle(&self) {
        if self.teardown_deferred.get() {
            self.teardown();
        }
    }
}

/// A running displacement effect on a set of DOM elements.
///
/// Listeners hold only weak references to the effect, so dropping (or, from
/// JS, calling `free()` on) the handle tears everything down.
#[wasm_bindgen]
pub struct Displaceable {
    shared: Rc<Handle>,
}

impl core::fmt::Debug for Displaceable {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Displaceable")
            .field("attached", &self.is_attached())
            .finish_non_exhaustive()
    }
}

#[wasm_bindgen]
impl Displaceable {
    /// Validates `targets` and `options` and starts the effect.
    ///
    /// Throws a JS `Error` on invalid input, an invalid trigger, or a trigger
    /// with zero width or height.
    #[wasm_bindgen(constructor)]
    pub fn new(targets: &JsValue, options: &JsValue) -> Result<Self, JsValue> {
        let viewport = WindowViewport::global()
            .ok_or_else(|| JsValue::from(js_sys::Error::new("no global window")))?;
        let targets = targets_from_js(targets).map_err(|err| error_to_js(&err))?;
        let options = options_from_js(options);
        Self::start(targets, options, viewport).map_err(|err| error_to_js(&err))
    }

    /// Unregisters every listener. Calling it again does nothing.
    ///
    /// Called from inside an engine callback, the teardown completes as soon
    /// as that callback returns.
    pub fn teardown(&self) {
        self.shared.teardown();
    }

    /// Alias of [`teardown`](Self::teardown).
    pub fn destroy(&self) {
        self.teardown();
    }

    /// Whether listeners are currently registered.
    #[wasm_bindgen(js_name = isAttached)]
    #[must_use]
    pub fn is_attached(&self) -> bool {
        self.shared
            .state
            .try_borrow()
            .ok()
            .and_then(|shared| shared.engine.as_ref().map(Engine::is_attached))
            .unwrap_or(false)
    }

    /// Shows per-frame trace output in the console (needs the `trace`
    /// feature).
    #[wasm_bindgen(js_name = setVerbose)]
    pub fn set_verbose(&self, verbose: bool) {
        if let Ok(mut shared) = self.shared.state.try_borrow_mut() {
            shared.sink.verbose = verbose;
        }
    }
}

impl Displaceable {
    /// Starts the effect from already-classified input.
    ///
    /// # Errors
    ///
    /// Any validation [`DisplaceError`]; nothing is registered in that case.
    pub fn start(
        targets: Targets<DomElement>,
        options: DisplaceOptions<DomElement>,
        viewport: WindowViewport,
    ) -> Result<Self, DisplaceError> {
        let window: EventTarget = viewport.window().clone().into();
        let trigger: EventTarget = match &options.trigger {
            Some(TriggerRef::Element(element)) => element.element().clone().into(),
            _ => window.clone(),
        };

        let shared = Rc::new_cyclic(|weak: &Weak<Handle>| {
            let weak = weak.clone();
            Handle {
                state: RefCell::new(Shared {
                    engine: None,
                    presenter: DomPresenter,
                    viewport,
                    frames: FrameRequester::new(move |_timestamp_ms| on_frame(&weak)),
                    sink: ConsoleSink::default(),
                }),
                teardown_deferred: Cell::new(false),
            }
        });

        let weak = Rc::downgrade(&shared);
        let hub = DomSignals::new(trigger, window, move |signal, event| {
            dispatch(&weak, signal, event);
        });

        let engine = {
            let mut guard = shared.state.borrow_mut();
            let Shared {
                presenter,
                viewport,
                sink,
                ..
            } = &mut *guard;
            Engine::new(
                targets,
                options,
                &*viewport,
                presenter,
                hub,
                &mut Tracer::new(sink),
            )?
        };
        shared.state.borrow_mut().engine = Some(engine);
        Ok(Self { shared })
    }
}

impl Drop for Displaceable {
    fn drop(&mut self) {
        self.teardown();
    }
}

fn on_frame(shared: &Weak<Handle>) {
    let Some(shared) = shared.upgrade() else {
        return;
    };
    run_frame(&shared);
    shared.settle();
}

fn run_frame(shared: &Handle) {
    let Ok(mut guard) = shared.state.try_borrow_mut() else {
        return;
    };
    let Shared {
        engine,
        presenter,
        sink,
        ..
    } = &mut *guard;
    if let Some(engine) = engine {
        engine.frame(presenter, &mut Tracer::new(sink));
    }
}

fn dispatch(shared: &Weak<Handle>, signal: Signal, event: &Event) {
    let Some(shared) = shared.upgrade() else {
        return;
    };
    handle_signal(&shared, signal, event);
    shared.settle();
}

fn handle_signal(shared: &Handle, signal: Signal, event: &Event) {
    let Ok(mut guard) = shared.state.try_borrow_mut() else {
        return;
    };
    let Shared {
        engine,
        viewport,
        frames,
        sink,
        ..
    } = &mut *guard;
    let Some(engine) = engine.as_mut() else {
        return;
    };
    let mut tracer = Tracer::new(sink);

    let request = match signal {
        Signal::PointerMove => {
            let Some(mouse) = event.dyn_ref::<MouseEvent>() else {
                return;
            };
            let sample = PointerSample::from_client(
                f64::from(mouse.client_x()),
                f64::from(mouse.client_y()),
                viewport.scroll_y(),
            );
            engine.pointer_moved(sample, &mut tracer)
        }
        Signal::PointerExit => engine.pointer_exited(&mut tracer),
        Signal::Resize | Signal::Scroll => {
            let reason = if signal == Signal::Resize {
                GeometryReason::Resize
            } else {
                GeometryReason::Scroll
            };
            if let Err(err) = engine.viewport_changed(reason, &*viewport, &mut tracer) {
                console::warn(reason, &err);
            }
            return;
        }
    };
    if request.needs_frame() {
        frames.request();
    }
}
