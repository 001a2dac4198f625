// Copyright 2026 the Displace Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Inline-style writes for managed elements.
//!
//! The engine owns exactly four inline properties on each target:
//! `pointer-events` and `will-change` (set once by
//! [`prepare`](Presenter::prepare)), plus `transition` and `transform`
//! (rewritten every frame).

use displace_core::backend::Presenter;
use displace_core::displacement::TargetStyle;
use wasm_bindgen::JsCast as _;
use web_sys::{CssStyleDeclaration, HtmlElement, SvgElement};

use crate::element::DomElement;

/// Writes [`TargetStyle`]s onto DOM elements as inline CSS.
///
/// HTML and SVG elements are styled; other element kinds have no inline
/// style and are left untouched.
#[derive(Clone, Copy, Debug, Default)]
pub struct DomPresenter;

/// The element's inline style declaration, if its kind has one.
fn inline_style(target: &DomElement) -> Option<CssStyleDeclaration> {
    let element = target.element();
    if let Some(html) = element.dyn_ref::<HtmlElement>() {
        Some(html.style())
    } else {
        element.dyn_ref::<SvgElement>().map(SvgElement::style)
    }
}

impl Presenter<DomElement> for DomPresenter {
    fn prepare(&mut self, target: &DomElement) {
        let Some(s) = inline_style(target) else {
            return;
        };
        let _ = s.set_property("pointer-events", "none");
        let _ = s.set_property("will-change", "transform");
    }

    fn apply(&mut self, target: &DomElement, style: &TargetStyle) {
        let Some(s) = inline_style(target) else {
            return;
        };
        // Transition first, so it governs this transform change.
        let _ = s.set_property("transition", &style.transition_css());
        if style.transform.is_some() {
            let _ = s.set_property("transform", &style.transform_css());
        } else {
            let _ = s.remove_property("transform");
        }
    }
}
