// Copyright 2026 the Displace Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Web demo: a row of cards that lean away from the pointer.
//!
//! Two effects run side by side. The upper row reacts to the pointer anywhere
//! in the window; the lower row reacts only while the pointer is over its own
//! stage. Some cards carry `data-*` overrides to show per-element factors
//! and axis locks.
//!
//! Build with: `wasm-pack build --target web demos/web_displace`
//! Then serve `demos/web_displace/` and open `index.html`.

#![no_std]
#![cfg_attr(
    not(target_arch = "wasm32"),
    allow(dead_code, reason = "this crate only runs in the browser")
)]

extern crate alloc;

use alloc::format;
use alloc::vec::Vec;
use core::time::Duration;

use displace_backend_web::{Displaceable, DomElement, WindowViewport, error_to_js};
use displace_core::settings::{DisplaceOptions, TriggerRef};
use displace_core::target::Targets;
use wasm_bindgen::JsCast as _;
use wasm_bindgen::prelude::*;
use web_sys::{Document, HtmlElement};

const CARD_W: f64 = 120.0;
const CARD_H: f64 = 160.0;

/// `(label, data attributes)` per card.
const CARDS: [(&str, &[(&str, &str)]); 5] = [
    ("default", &[]),
    ("factor 6", &[("data-displace-factor", "6")]),
    ("lock x", &[("data-lock-x", "true")]),
    ("lock y", &[("data-lock-y", "1")]),
    ("skew 15", &[("data-skew-factor", "15")]),
];

/// Entry point, called automatically by `wasm_bindgen(start)`.
#[wasm_bindgen(start)]
pub fn main() -> Result<(), JsValue> {
    let window = web_sys::window().ok_or_else(|| JsValue::from_str("no global window"))?;
    let document = window
        .document()
        .ok_or_else(|| JsValue::from_str("no document"))?;
    let body = document
        .body()
        .ok_or_else(|| JsValue::from_str("no body"))?;

    let upper = create_stage(&document, "#1e1e2e")?;
    let lower = create_stage(&document, "#2e1e2e")?;
    body.append_child(&upper)?;
    body.append_child(&lower)?;

    let upper_cards = fill_stage(&document, &upper)?;
    let lower_cards = fill_stage(&document, &lower)?;

    let window_effect = Displaceable::start(
        Targets::Collection(upper_cards),
        DisplaceOptions::default(),
        WindowViewport::new(window.clone()),
    )
    .map_err(|err| error_to_js(&err))?;

    let stage_effect = Displaceable::start(
        Targets::Collection(lower_cards),
        DisplaceOptions {
            displace_factor: Some(4.0),
            reset_time: Some(Duration::from_millis(600)),
            trigger: Some(TriggerRef::Element(DomElement::new(lower))),
            ..DisplaceOptions::default()
        },
        WindowViewport::new(window),
    )
    .map_err(|err| error_to_js(&err))?;

    #[cfg(feature = "trace")]
    window_effect.set_verbose(true);

    // Both effects live for the lifetime of the page.
    core::mem::forget(window_effect);
    core::mem::forget(stage_effect);
    Ok(())
}

fn create_stage(doc: &Document, background: &str) -> Result<HtmlElement, JsValue> {
    let el: HtmlElement = doc.create_element("div")?.unchecked_into();
    let s = el.style();
    s.set_property("display", "flex")?;
    s.set_property("gap", "24px")?;
    s.set_property("justify-content", "center")?;
    s.set_property("padding", "48px")?;
    s.set_property("margin", "24px auto")?;
    s.set_property("max-width", "860px")?;
    s.set_property("background", background)?;
    s.set_property("border-radius", "16px")?;
    Ok(el)
}

fn fill_stage(doc: &Document, stage: &HtmlElement) -> Result<Vec<DomElement>, JsValue> {
    let mut cards = Vec::with_capacity(CARDS.len());
    for (label, attributes) in CARDS {
        let card: HtmlElement = doc.create_element("div")?.unchecked_into();
        card.set_text_content(Some(label));
        for (name, value) in attributes {
            card.set_attribute(name, value)?;
        }
        let s = card.style();
        s.set_property("width", &format!("{CARD_W}px"))?;
        s.set_property("height", &format!("{CARD_H}px"))?;
        s.set_property("display", "flex")?;
        s.set_property("align-items", "center")?;
        s.set_property("justify-content", "center")?;
        s.set_property("color", "#cdd6f4")?;
        s.set_property("font-family", "sans-serif")?;
        s.set_property("background", "#45475a")?;
        s.set_property("border-radius", "12px")?;
        stage.append_child(&card)?;
        cards.push(DomElement::new(card));
    }
    Ok(cards)
}
