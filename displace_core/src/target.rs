// Copyright 2026 the Displace Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Target normalization.
//!
//! Callers hand the engine one element, a native collection, or an explicit
//! list. [`resolve_targets`] turns any of these into an ordered `Vec` of
//! element handles.

use alloc::string::String;
use alloc::vec;
use alloc::vec::Vec;

use crate::error::DisplaceError;

/// One member of an explicit list, classified by the backend.
#[derive(Clone, Debug, PartialEq)]
pub enum Candidate<E> {
    /// A recognized element handle.
    Element(E),
    /// Anything else. Carries a description used in error messages.
    Foreign(String),
}

/// The shapes of target input the engine accepts.
#[derive(Clone, Debug, PartialEq)]
pub enum Targets<E> {
    /// No input (null, undefined, or otherwise falsy).
    Absent,
    /// A single element.
    Single(E),
    /// A native element collection. Members are elements by construction.
    Collection(Vec<E>),
    /// An explicit list whose members still need validation.
    List(Vec<Candidate<E>>),
}

impl<E> From<E> for Targets<E> {
    fn from(element: E) -> Self {
        Self::Single(element)
    }
}

impl<E> FromIterator<Candidate<E>> for Targets<E> {
    fn from_iter<I: IntoIterator<Item = Candidate<E>>>(iter: I) -> Self {
        Self::List(iter.into_iter().collect())
    }
}

/// Normalizes `input` into an ordered list of targets.
///
/// Order is preserved. Empty collections and lists are accepted.
///
/// # Errors
///
/// Returns [`DisplaceError::InvalidInput`] if `input` is [`Targets::Absent`]
/// or if any member of a [`Targets::List`] is a [`Candidate::Foreign`]. No
/// partial list is produced in that case.
pub fn resolve_targets<E>(input: Targets<E>) -> Result<Vec<E>, DisplaceError> {
    match input {
        Targets::Absent => Err(DisplaceError::InvalidInput(String::from("nothing"))),
        Targets::Single(element) => Ok(vec![element]),
        Targets::Collection(elements) => Ok(elements),
        Targets::List(candidates) => candidates
            .into_iter()
            .map(|candidate| match candidate {
                Candidate::Element(element) => Ok(element),
                Candidate::Foreign(what) => Err(DisplaceError::InvalidInput(what)),
            })
            .collect(),
    }
}
