// Copyright 2026 the Displace Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! DOM implementations of the engine's [`Element`] and [`Viewport`] traits.

use alloc::string::String;

use displace_core::backend::{Element, OverrideKey, Viewport};
use kurbo::{Rect, Size};
use web_sys::{Element as WebElement, Window};

/// A DOM element managed (or measured) by the engine.
///
/// Any element kind is accepted, HTML or SVG alike.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DomElement(WebElement);

impl DomElement {
    /// Wraps an element handle.
    #[must_use]
    pub fn new(element: impl Into<WebElement>) -> Self {
        Self(element.into())
    }

    /// The wrapped element.
    #[must_use]
    pub fn element(&self) -> &WebElement {
        &self.0
    }
}

impl From<WebElement> for DomElement {
    fn from(element: WebElement) -> Self {
        Self(element)
    }
}

impl Element for DomElement {
    fn bounding_rect(&self) -> Rect {
        let r = self.0.get_bounding_client_rect();
        Rect::from_origin_size((r.x(), r.y()), (r.width(), r.height()))
    }

    fn attribute(&self, key: OverrideKey) -> Option<String> {
        self.0.get_attribute(key.attribute_name())
    }
}

/// The browser window as the ambient surface.
#[derive(Clone, Debug)]
pub struct WindowViewport {
    window: Window,
}

impl WindowViewport {
    /// Wraps the given window.
    #[must_use]
    pub fn new(window: Window) -> Self {
        Self { window }
    }

    /// Wraps the global window, if there is one.
    #[must_use]
    pub fn global() -> Option<Self> {
        web_sys::window().map(Self::new)
    }

    /// The wrapped window.
    #[must_use]
    pub fn window(&self) -> &Window {
        &self.window
    }
}

impl Viewport for WindowViewport {
    fn inner_size(&self) -> Size {
        let dim = |v: Result<wasm_bindgen::JsValue, wasm_bindgen::JsValue>| {
            v.ok().and_then(|v| v.as_f64()).unwrap_or(0.0)
        };
        Size::new(
            dim(self.window.inner_width()),
            dim(self.window.inner_height()),
        )
    }

    fn scroll_y(&self) -> f64 {
        self.window.scroll_y().unwrap_or(0.0)
    }
}
