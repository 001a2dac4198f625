// Copyright 2026 the Displace Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! In-memory test doubles for the backend traits.

use alloc::rc::Rc;
use alloc::string::{String, ToString};
use alloc::vec::Vec;
use core::cell::{Cell, RefCell};

use kurbo::{Rect, Size};

use crate::backend::{Element, OverrideKey, Presenter, Viewport};
use crate::displacement::TargetStyle;
use crate::lifecycle::{Signal, SignalHub};

/// An element with a shared, mutable bounding box and attribute set.
///
/// Clones share state, so a test can mutate an element the engine holds.
#[derive(Clone, Debug)]
pub(crate) struct FakeElement {
    pub(crate) id: u32,
    rect: Rc<Cell<Rect>>,
    attrs: Rc<RefCell<Vec<(OverrideKey, String)>>>,
}

impl PartialEq for FakeElement {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl FakeElement {
    pub(crate) fn new(id: u32) -> Self {
        Self {
            id,
            rect: Rc::new(Cell::new(Rect::new(0.0, 0.0, 50.0, 50.0))),
            attrs: Rc::default(),
        }
    }

    pub(crate) fn with_rect(self, rect: Rect) -> Self {
        self.set_rect(rect);
        self
    }

    pub(crate) fn with_attr(self, key: OverrideKey, value: &str) -> Self {
        self.set_attr(key, value);
        self
    }

    pub(crate) fn set_rect(&self, rect: Rect) {
        self.rect.set(rect);
    }

    pub(crate) fn set_attr(&self, key: OverrideKey, value: &str) {
        let mut attrs = self.attrs.borrow_mut();
        attrs.retain(|(k, _)| *k != key);
        attrs.push((key, value.to_string()));
    }
}

impl Element for FakeElement {
    fn bounding_rect(&self) -> Rect {
        self.rect.get()
    }

    fn attribute(&self, key: OverrideKey) -> Option<String> {
        self.attrs
            .borrow()
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| v.clone())
    }
}

/// A viewport whose size and scroll offset can change mid-test.
#[derive(Debug)]
pub(crate) struct FakeViewport {
    size: Cell<Size>,
    scroll_y: Cell<f64>,
}

impl FakeViewport {
    pub(crate) fn new(width: f64, height: f64) -> Self {
        Self {
            size: Cell::new(Size::new(width, height)),
            scroll_y: Cell::new(0.0),
        }
    }

    pub(crate) fn scrolled(self, scroll_y: f64) -> Self {
        self.set_scroll_y(scroll_y);
        self
    }

    pub(crate) fn set_size(&self, width: f64, height: f64) {
        self.size.set(Size::new(width, height));
    }

    pub(crate) fn set_scroll_y(&self, scroll_y: f64) {
        self.scroll_y.set(scroll_y);
    }
}

impl Viewport for FakeViewport {
    fn inner_size(&self) -> Size {
        self.size.get()
    }

    fn scroll_y(&self) -> f64 {
        self.scroll_y.get()
    }
}

/// Records every prepare and apply call, keyed by element id.
#[derive(Debug, Default)]
pub(crate) struct RecordingPresenter {
    pub(crate) prepared: Vec<u32>,
    pub(crate) applied: Vec<(u32, TargetStyle)>,
}

impl Presenter<FakeElement> for RecordingPresenter {
    fn prepare(&mut self, target: &FakeElement) {
        self.prepared.push(target.id);
    }

    fn apply(&mut self, target: &FakeElement, style: &TargetStyle) {
        self.applied.push((target.id, *style));
    }
}

#[derive(Debug, Default)]
struct HubLog {
    next: usize,
    active: Vec<(usize, Signal)>,
    registered: usize,
    unregistered: usize,
}

/// A signal hub that only keeps books. Clones share the log.
#[derive(Clone, Debug, Default)]
pub(crate) struct FakeHub {
    log: Rc<RefCell<HubLog>>,
}

impl FakeHub {
    pub(crate) fn active(&self) -> Vec<Signal> {
        self.log.borrow().active.iter().map(|(_, s)| *s).collect()
    }

    pub(crate) fn total_registered(&self) -> usize {
        self.log.borrow().registered
    }

    pub(crate) fn total_unregistered(&self) -> usize {
        self.log.borrow().unregistered
    }
}

impl SignalHub for FakeHub {
    type Registration = usize;

    fn register(&mut self, signal: Signal) -> usize {
        let mut log = self.log.borrow_mut();
        let token = log.next;
        log.next += 1;
        log.registered += 1;
        log.active.push((token, signal));
        token
    }

    fn unregister(&mut self, registration: usize) {
        let mut log = self.log.borrow_mut();
        let before = log.active.len();
        log.active.retain(|(token, _)| *token != registration);
        assert_eq!(
            before,
            log.active.len() + 1,
            "registration {registration} unregistered twice"
        );
        log.unregistered += 1;
    }
}
