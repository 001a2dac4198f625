// Copyright 2026 the Displace Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! DOM event listeners as a [`SignalHub`].
//!
//! Pointer signals are observed on the trigger (an element, or the window for
//! the viewport trigger); resize and scroll are always observed on the
//! window. Each registration owns its JS closure, so unregistering drops it.

use alloc::boxed::Box;
use alloc::rc::Rc;

use displace_core::lifecycle::{Signal, SignalHub};
use wasm_bindgen::JsCast as _;
use wasm_bindgen::closure::Closure;
use web_sys::{Event, EventTarget};

use crate::console;

type Handler = Rc<dyn Fn(Signal, &Event)>;

/// Adds and removes DOM event listeners that forward to one handler.
pub struct DomSignals {
    trigger: EventTarget,
    window: EventTarget,
    handler: Handler,
}

impl core::fmt::Debug for DomSignals {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("DomSignals")
            .field("trigger", &self.trigger)
            .field("window", &self.window)
            .finish_non_exhaustive()
    }
}

impl DomSignals {
    /// Creates a hub that listens for pointer signals on `trigger` and for
    /// viewport signals on `window`, calling `handler` for each event.
    pub fn new(
        trigger: EventTarget,
        window: EventTarget,
        handler: impl Fn(Signal, &Event) + 'static,
    ) -> Self {
        Self {
            trigger,
            window,
            handler: Rc::new(handler),
        }
    }

    fn target_for(&self, signal: Signal) -> &EventTarget {
        if signal.targets_trigger() {
            &self.trigger
        } else {
            &self.window
        }
    }
}

/// One live event listener.
pub struct Listener {
    target: EventTarget,
    signal: Signal,
    closure: Closure<dyn FnMut(Event)>,
}

impl core::fmt::Debug for Listener {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Listener")
            .field("signal", &self.signal)
            .finish_non_exhaustive()
    }
}

impl SignalHub for DomSignals {
    type Registration = Listener;

    fn register(&mut self, signal: Signal) -> Listener {
        let handler = Rc::clone(&self.handler);
        let closure = Closure::wrap(Box::new(move |event: Event| {
            handler(signal, &event);
        }) as Box<dyn FnMut(Event)>);

        let target = self.target_for(signal).clone();
        if let Err(err) = target
            .add_event_listener_with_callback(signal.event_type(), closure.as_ref().unchecked_ref())
        {
            console::warn_listener(signal, "register", &err);
        }
        Listener {
            target,
            signal,
            closure,
        }
    }

    fn unregister(&mut self, registration: Listener) {
        let Listener {
            target,
            signal,
            closure,
        } = registration;
        if let Err(err) = target.remove_event_listener_with_callback(
            signal.event_type(),
            closure.as_ref().unchecked_ref(),
        ) {
            console::warn_listener(signal, "unregister", &err);
        }
        drop(closure);
    }
}
