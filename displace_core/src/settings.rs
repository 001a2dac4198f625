// Copyright 2026 the Displace Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Configuration resolution and per-target overrides.
//!
//! [`DisplaceSettings::resolve`] shallow-merges a [`DisplaceOptions`] over
//! the defaults. The result is never mutated afterwards; per-target
//! [`TargetOverrides`] are layered on top at evaluation time.

use alloc::collections::BTreeMap;
use alloc::string::String;
use core::time::Duration;

use crate::backend::{Element, OverrideKey};

/// Default multiplier for the translate component.
pub const DEFAULT_DISPLACE_FACTOR: f64 = 3.0;

/// Default multiplier for the skew component (scaled by 1/100).
pub const DEFAULT_SKEW_FACTOR: f64 = 5.0;

/// Default transition back to rest.
pub const DEFAULT_RESET_TIME: Duration = Duration::from_millis(1000);

/// What the trigger area is.
#[derive(Clone, Debug, PartialEq)]
pub enum TriggerRef<E> {
    /// The whole ambient surface.
    Viewport,
    /// A designated element.
    Element(E),
    /// Something the backend could not classify as either. Rejected with
    /// [`InvalidTrigger`](crate::DisplaceError::InvalidTrigger) when measured.
    Foreign(String),
}

impl<E> Default for TriggerRef<E> {
    fn default() -> Self {
        Self::Viewport
    }
}

/// Caller-supplied configuration. Every field is optional.
///
/// Unrecognized keys from a dynamic configuration object go in `extra` and
/// are carried through without effect.
#[derive(Clone, Debug, PartialEq)]
pub struct DisplaceOptions<E> {
    /// Multiplier for the translate component.
    pub displace_factor: Option<f64>,
    /// Multiplier for the skew component.
    pub skew_factor: Option<f64>,
    /// Suppress horizontal translation (targets move on Y only).
    pub lock_x: Option<bool>,
    /// Suppress vertical translation (targets move on X only).
    pub lock_y: Option<bool>,
    /// Transition duration when returning to rest.
    pub reset_time: Option<Duration>,
    /// The trigger area.
    pub trigger: Option<TriggerRef<E>>,
    /// Unrecognized fields, passed through untouched.
    pub extra: BTreeMap<String, String>,
}

impl<E> Default for DisplaceOptions<E> {
    fn default() -> Self {
        Self {
            displace_factor: None,
            skew_factor: None,
            lock_x: None,
            lock_y: None,
            reset_time: None,
            trigger: None,
            extra: BTreeMap::new(),
        }
    }
}

/// Resolved, immutable configuration.
#[derive(Clone, Debug, PartialEq)]
pub struct DisplaceSettings<E> {
    displace_factor: f64,
    skew_factor: f64,
    lock_x: bool,
    lock_y: bool,
    reset_time: Duration,
    trigger: TriggerRef<E>,
    extra: BTreeMap<String, String>,
}

impl<E> Default for DisplaceSettings<E> {
    fn default() -> Self {
        Self::resolve(DisplaceOptions::default())
    }
}

impl<E> DisplaceSettings<E> {
    /// Merges `options` over the defaults. Only supplied fields change.
    #[must_use]
    pub fn resolve(options: DisplaceOptions<E>) -> Self {
        Self {
            displace_factor: options.displace_factor.unwrap_or(DEFAULT_DISPLACE_FACTOR),
            skew_factor: options.skew_factor.unwrap_or(DEFAULT_SKEW_FACTOR),
            lock_x: options.lock_x.unwrap_or(false),
            lock_y: options.lock_y.unwrap_or(false),
            reset_time: options.reset_time.unwrap_or(DEFAULT_RESET_TIME),
            trigger: options.trigger.unwrap_or_default(),
            extra: options.extra,
        }
    }

    /// Multiplier for the translate component.
    #[must_use]
    pub fn displace_factor(&self) -> f64 {
        self.displace_factor
    }

    /// Multiplier for the skew component (before the 1/100 scaling).
    #[must_use]
    pub fn skew_factor(&self) -> f64 {
        self.skew_factor
    }

    /// Whether horizontal translation is suppressed for every target.
    #[must_use]
    pub fn lock_x(&self) -> bool {
        self.lock_x
    }

    /// Whether vertical translation is suppressed for every target.
    #[must_use]
    pub fn lock_y(&self) -> bool {
        self.lock_y
    }

    /// Transition duration when returning to rest.
    #[must_use]
    pub fn reset_time(&self) -> Duration {
        self.reset_time
    }

    /// The trigger area.
    #[must_use]
    pub fn trigger(&self) -> &TriggerRef<E> {
        &self.trigger
    }

    /// Unrecognized fields, as supplied.
    #[must_use]
    pub fn extra(&self) -> &BTreeMap<String, String> {
        &self.extra
    }

    /// Layers `overrides` on top of these settings for one target.
    #[must_use]
    pub fn effective(&self, overrides: &TargetOverrides) -> EffectiveParams {
        EffectiveParams {
            displace_factor: overrides.displace_factor.unwrap_or(self.displace_factor),
            skew_factor: overrides.skew_factor.unwrap_or(self.skew_factor),
            lock_x: self.lock_x || overrides.lock_x,
            lock_y: self.lock_y || overrides.lock_y,
        }
    }
}

/// Parameters for one target in one frame, after overrides.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EffectiveParams {
    /// Translate multiplier.
    pub displace_factor: f64,
    /// Skew multiplier (before the 1/100 scaling).
    pub skew_factor: f64,
    /// Horizontal lock.
    pub lock_x: bool,
    /// Vertical lock.
    pub lock_y: bool,
}

/// Per-target overrides read from element metadata.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct TargetOverrides {
    /// Replaces the shared displace factor when present.
    pub displace_factor: Option<f64>,
    /// Replaces the shared skew factor when present.
    pub skew_factor: Option<f64>,
    /// Adds a horizontal lock for this target.
    pub lock_x: bool,
    /// Adds a vertical lock for this target.
    pub lock_y: bool,
}

impl TargetOverrides {
    /// Reads all override attributes from `element`.
    ///
    /// Malformed numbers count as absent, so the shared setting applies.
    #[must_use]
    pub fn read<E: Element>(element: &E) -> Self {
        let number = |key| element.attribute(key).as_deref().and_then(parse_number);
        let flag = |key| element.attribute(key).as_deref().is_some_and(parse_flag);
        Self {
            displace_factor: number(OverrideKey::DisplaceFactor),
            skew_factor: number(OverrideKey::SkewFactor),
            lock_x: flag(OverrideKey::LockX),
            lock_y: flag(OverrideKey::LockY),
        }
    }
}

/// Parses the leading decimal number of `raw`, like a lenient float parser.
///
/// Leading whitespace is skipped and trailing garbage ignored (`"4px"` is 4).
/// Returns `None` for empty, unparsable, or non-finite input.
#[must_use]
pub fn parse_number(raw: &str) -> Option<f64> {
    let s = raw.trim_start();
    let bytes = s.as_bytes();
    let mut end = 0;
    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end += 1;
    }
    let int_start = end;
    while bytes.get(end).is_some_and(u8::is_ascii_digit) {
        end += 1;
    }
    let mut digits = end - int_start;
    if bytes.get(end) == Some(&b'.') {
        let frac_start = end + 1;
        let mut frac_end = frac_start;
        while bytes.get(frac_end).is_some_and(u8::is_ascii_digit) {
            frac_end += 1;
        }
        digits += frac_end - frac_start;
        if digits > 0 {
            end = frac_end;
        }
    }
    if digits == 0 {
        return None;
    }
    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut exp_end = end + 1;
        if matches!(bytes.get(exp_end), Some(b'+' | b'-')) {
            exp_end += 1;
        }
        let exp_digits_start = exp_end;
        while bytes.get(exp_end).is_some_and(u8::is_ascii_digit) {
            exp_end += 1;
        }
        if exp_end > exp_digits_start {
            end = exp_end;
        }
    }
    s[..end].parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Interprets a lock attribute: any non-empty value enables it, including
/// `"false"` and whitespace.
#[must_use]
pub fn parse_flag(raw: &str) -> bool {
    !raw.is_empty()
}
