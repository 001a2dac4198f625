// Copyright 2026 the Displace Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Validation errors.

use alloc::string::String;
use core::fmt;

/// Errors reported while validating targets or measuring the trigger.
///
/// All three are detected synchronously. During construction any of them
/// aborts initialization; during a later geometry recompute they are reported
/// and the last good geometry stays in effect.
#[derive(Clone, Debug, PartialEq)]
pub enum DisplaceError {
    /// The target input was absent, or an explicit list contained something
    /// that is not an element. Carries a description of the offending value.
    InvalidInput(String),
    /// The configured trigger is neither the viewport nor an element.
    InvalidTrigger(String),
    /// The trigger element currently has zero width or height.
    DegenerateTrigger {
        /// Measured width.
        width: f64,
        /// Measured height.
        height: f64,
    },
}

impl fmt::Display for DisplaceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidInput(what) => write!(
                f,
                "unable to initialize displacement: {what} is not an element, \
                 element collection, or list of elements"
            ),
            Self::InvalidTrigger(what) => write!(
                f,
                "{what} is not a valid displacement trigger; \
                 the trigger must be the viewport or an element"
            ),
            Self::DegenerateTrigger { width, height } => write!(
                f,
                "trigger has invalid dimensions ({width}x{height}); \
                 both width and height must be greater than zero"
            ),
        }
    }
}

impl core::error::Error for DisplaceError {}
