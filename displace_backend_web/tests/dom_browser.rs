// Copyright 2026 the Displace Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! DOM classification, styling, and listener tests. Run with
//! `wasm-pack test --headless --firefox displace_backend_web`.

#![cfg(target_arch = "wasm32")]

use std::cell::Cell;
use std::rc::Rc;

use displace_backend_web::{DomElement, DomPresenter, DomSignals, targets_from_js, trigger_from_js};
use displace_core::DisplaceError;
use displace_core::backend::Presenter as _;
use displace_core::displacement::{DisplacementVector, TargetStyle};
use displace_core::lifecycle::{Signal, SignalHub as _};
use displace_core::settings::TriggerRef;
use displace_core::target::{Targets, resolve_targets};
use js_sys::Array;
use wasm_bindgen::{JsCast as _, JsValue};
use wasm_bindgen_test::*;
use web_sys::{Element, Event, EventTarget, SvgElement};

wasm_bindgen_test_configure!(run_in_browser);

/// A detached container holding `markup`.
fn fixture(markup: &str) -> Element {
    let document = web_sys::window().unwrap().document().unwrap();
    let root = document.create_element("div").unwrap();
    root.set_inner_html(markup);
    root
}

#[wasm_bindgen_test]
fn node_list_keeps_svg_members_in_order() {
    let root = fixture(r#"<svg class="t" id="a"></svg><div class="t" id="b"></div><svg class="t" id="c"></svg>"#);
    let list = root.query_selector_all(".t").unwrap();

    let Targets::Collection(elements) = targets_from_js(&list.into()).unwrap() else {
        panic!("a NodeList is a collection");
    };
    let ids: Vec<_> = elements.iter().map(|e| e.element().id()).collect();
    assert_eq!(ids, ["a", "b", "c"]);
}

#[wasm_bindgen_test]
fn html_collection_keeps_svg_members() {
    let root = fixture(r#"<svg></svg><span></span>"#);
    let Targets::Collection(elements) = targets_from_js(&root.children().into()).unwrap() else {
        panic!("an HTMLCollection is a collection");
    };
    assert_eq!(elements.len(), 2);
}

#[wasm_bindgen_test]
fn single_svg_element_is_a_target() {
    let root = fixture("<svg></svg>");
    let svg = root.first_element_child().unwrap();
    let targets = targets_from_js(&svg.clone().into()).unwrap();
    assert_eq!(targets, Targets::Single(DomElement::new(svg)));
}

#[wasm_bindgen_test]
fn svg_trigger_is_an_element() {
    let root = fixture("<svg></svg>");
    let svg = root.first_element_child().unwrap();
    assert_eq!(
        trigger_from_js(&svg.clone().into()),
        TriggerRef::Element(DomElement::new(svg))
    );
}

#[wasm_bindgen_test]
fn array_members_are_still_checked() {
    let root = fixture("<svg></svg>");
    let array = Array::new();
    array.push(&root.first_element_child().unwrap());
    array.push(&JsValue::from_str("#nope"));

    let targets = targets_from_js(&array.into()).unwrap();
    assert!(matches!(
        resolve_targets(targets),
        Err(DisplaceError::InvalidInput(_))
    ));
}

#[wasm_bindgen_test]
fn presenter_styles_svg_elements() {
    let root = fixture("<svg></svg>");
    let svg = root.first_element_child().unwrap();
    let target = DomElement::new(svg.clone());

    let mut presenter = DomPresenter;
    presenter.prepare(&target);
    presenter.apply(
        &target,
        &TargetStyle::displaced(DisplacementVector {
            dx: 30.0,
            dy: -30.0,
            skew_x: 0.5,
            skew_y: 0.5,
        }),
    );

    let style = svg.unchecked_into::<SvgElement>().style();
    assert_eq!(style.get_property_value("pointer-events").unwrap(), "none");
    assert!(
        style.get_property_value("transform").unwrap().starts_with("translate(30px"),
        "transform was not written"
    );
}

#[wasm_bindgen_test]
fn listeners_stop_firing_after_unregister() {
    let trigger: EventTarget = fixture("").into();
    let window: EventTarget = web_sys::window().unwrap().into();
    let fired = Rc::new(Cell::new(0_u32));
    let counter = Rc::clone(&fired);
    let mut hub = DomSignals::new(trigger.clone(), window, move |signal, _event| {
        assert_eq!(signal, Signal::PointerMove);
        counter.set(counter.get() + 1);
    });

    let listener = hub.register(Signal::PointerMove);
    trigger
        .dispatch_event(&Event::new("mousemove").unwrap())
        .unwrap();
    assert_eq!(fired.get(), 1);

    hub.unregister(listener);
    trigger
        .dispatch_event(&Event::new("mousemove").unwrap())
        .unwrap();
    assert_eq!(fired.get(), 1);
}
