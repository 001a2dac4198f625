// Copyright 2026 the Displace Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! One-shot `requestAnimationFrame` scheduling.
//!
//! [`FrameRequester`] asks the browser for at most one animation frame at a
//! time. The engine already coalesces signals, so a request made while one
//! is outstanding is dropped rather than queued.

use alloc::boxed::Box;
use alloc::rc::Rc;
use core::cell::{Cell, RefCell};

use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;

// Direct global bindings instead of `web_sys::Window` methods; avoids
// fetching (and unwrapping) the Window object on every request.
#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_name = "requestAnimationFrame")]
    fn request_animation_frame(callback: &JsValue) -> i32;

    #[wasm_bindgen(js_name = "cancelAnimationFrame")]
    fn cancel_animation_frame(id: i32);
}

/// Requests single animation frames on demand.
///
/// The callback receives the frame's `DOMHighResTimeStamp` in milliseconds.
/// Dropping the requester cancels any outstanding frame.
pub struct FrameRequester {
    inner: Rc<FrameInner>,
}

type RafClosure = Closure<dyn FnMut(f64)>;

struct FrameInner {
    /// The JS closure handed to `requestAnimationFrame`. It holds a strong
    /// reference back to this struct; [`Drop`] breaks the cycle.
    closure: RefCell<Option<RafClosure>>,

    /// The user-supplied frame callback.
    callback: RefCell<Box<dyn FnMut(f64)>>,

    /// ID of the outstanding request, if any.
    pending: Cell<Option<i32>>,

    /// Frames delivered so far.
    delivered: Cell<u64>,
}

impl FrameRequester {
    /// Creates a requester with no frame outstanding.
    pub fn new(callback: impl FnMut(f64) + 'static) -> Self {
        let inner = Rc::new(FrameInner {
            closure: RefCell::new(None),
            callback: RefCell::new(Box::new(callback)),
            pending: Cell::new(None),
            delivered: Cell::new(0),
        });

        let this = Rc::clone(&inner);
        let closure = Closure::wrap(Box::new(move |timestamp_ms: f64| {
            this.pending.set(None);
            this.delivered.set(this.delivered.get() + 1);
            this.callback.borrow_mut()(timestamp_ms);
        }) as Box<dyn FnMut(f64)>);
        *inner.closure.borrow_mut() = Some(closure);

        Self { inner }
    }

    /// Requests the next animation frame. Returns `false` if one was already
    /// outstanding.
    pub fn request(&self) -> bool {
        if self.inner.pending.get().is_some() {
            return false;
        }
        let Some(ref closure) = *self.inner.closure.borrow() else {
            return false;
        };
        let id = request_animation_frame(closure.as_ref().unchecked_ref());
        self.inner.pending.set(Some(id));
        true
    }

    /// Cancels the outstanding frame, if any.
    pub fn cancel(&self) {
        if let Some(id) = self.inner.pending.take() {
            cancel_animation_frame(id);
        }
    }

    /// Returns `true` while a frame is outstanding.
    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.inner.pending.get().is_some()
    }
}

impl Drop for FrameRequester {
    fn drop(&mut self) {
        self.cancel();
        // Drop the JS closure so it doesn't leak.
        self.inner.closure.borrow_mut().take();
    }
}

impl core::fmt::Debug for FrameRequester {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("FrameRequester")
            .field("pending", &self.inner.pending.get())
            .field("delivered", &self.inner.delivered.get())
            .finish()
    }
}
