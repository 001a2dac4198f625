// Copyright 2026 the Displace Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Classification of loosely typed JS input.
//!
//! The JS constructor accepts an element, a `NodeList`/`HTMLCollection`, or
//! an array for targets, and a plain object for options. These functions map
//! that input onto the engine's typed [`Targets`] and [`DisplaceOptions`].

use alloc::format;
use alloc::string::{String, ToString};
use alloc::vec::Vec;
use core::time::Duration;

use displace_core::DisplaceError;
use displace_core::settings::{DisplaceOptions, TriggerRef};
use displace_core::target::{Candidate, Targets};
use js_sys::{Array, Object, Reflect};
use wasm_bindgen::{JsCast as _, JsValue};
use web_sys::{Element, HtmlCollection, NodeList, Window};

use crate::element::DomElement;

/// Classifies a JS target value.
///
/// Falsy values are [`Targets::Absent`]. A single element or a
/// `NodeList`/`HTMLCollection` is taken as is, HTML and SVG alike; only
/// non-element nodes (text, comments) are left out of a `NodeList`. Array
/// members are checked individually by the engine.
///
/// # Errors
///
/// [`DisplaceError::InvalidInput`] for a truthy value of any other shape.
pub fn targets_from_js(value: &JsValue) -> Result<Targets<DomElement>, DisplaceError> {
    if value.is_falsy() {
        return Ok(Targets::Absent);
    }
    if let Some(element) = value.dyn_ref::<Element>() {
        return Ok(Targets::Single(DomElement::new(element.clone())));
    }
    if let Some(list) = value.dyn_ref::<NodeList>() {
        let elements = (0..list.length())
            .filter_map(|i| list.item(i))
            .filter_map(|node| node.dyn_into::<Element>().ok())
            .map(DomElement::new)
            .collect();
        return Ok(Targets::Collection(elements));
    }
    if let Some(collection) = value.dyn_ref::<HtmlCollection>() {
        let elements = (0..collection.length())
            .filter_map(|i| collection.item(i))
            .map(DomElement::new)
            .collect();
        return Ok(Targets::Collection(elements));
    }
    if Array::is_array(value) {
        let candidates: Vec<_> = Array::from(value)
            .iter()
            .map(|member| match member.dyn_into::<Element>() {
                Ok(element) => Candidate::Element(DomElement::new(element)),
                Err(other) => Candidate::Foreign(describe(&other)),
            })
            .collect();
        return Ok(Targets::List(candidates));
    }
    Err(DisplaceError::InvalidInput(describe(value)))
}

/// Reads a JS options object.
///
/// `undefined` and `null` yield all defaults. Recognized keys of the wrong
/// type are ignored, so the default applies. Unrecognized keys are kept in
/// [`DisplaceOptions::extra`] as descriptions.
#[must_use]
pub fn options_from_js(value: &JsValue) -> DisplaceOptions<DomElement> {
    let mut options = DisplaceOptions::default();
    let Some(object) = value.dyn_ref::<Object>() else {
        return options;
    };
    for key in Object::keys(object).iter() {
        let Some(name) = key.as_string() else {
            continue;
        };
        let field = Reflect::get(object, &key).unwrap_or(JsValue::UNDEFINED);
        match name.as_str() {
            "displaceFactor" => options.displace_factor = finite(&field),
            "skewFactor" => options.skew_factor = finite(&field),
            "lockX" => options.lock_x = Some(field.is_truthy()),
            "lockY" => options.lock_y = Some(field.is_truthy()),
            "resetTime" => options.reset_time = millis(&field),
            "trigger" => options.trigger = Some(trigger_from_js(&field)),
            _ => {
                options.extra.insert(name, describe(&field));
            }
        }
    }
    options
}

/// Classifies a trigger value: the window, an element, or neither.
#[must_use]
pub fn trigger_from_js(value: &JsValue) -> TriggerRef<DomElement> {
    if value.dyn_ref::<Window>().is_some() {
        TriggerRef::Viewport
    } else if let Some(element) = value.dyn_ref::<Element>() {
        TriggerRef::Element(DomElement::new(element.clone()))
    } else {
        TriggerRef::Foreign(describe(value))
    }
}

/// Converts an engine error to a JS `Error`.
#[must_use]
pub fn error_to_js(err: &DisplaceError) -> JsValue {
    js_sys::Error::new(&err.to_string()).into()
}

fn finite(value: &JsValue) -> Option<f64> {
    value.as_f64().filter(|v| v.is_finite())
}

fn millis(value: &JsValue) -> Option<Duration> {
    finite(value)
        .filter(|ms| *ms >= 0.0)
        .and_then(|ms| Duration::try_from_secs_f64(ms / 1000.0).ok())
}

fn describe(value: &JsValue) -> String {
    if let Some(s) = value.as_string() {
        format!("\"{s}\"")
    } else if let Some(n) = value.as_f64() {
        format!("{n}")
    } else if value.is_null() {
        String::from("null")
    } else if value.is_undefined() {
        String::from("undefined")
    } else {
        format!("{value:?}")
    }
}
