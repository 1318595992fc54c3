// Copyright 2025 the Tangible Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Change records emitted by committed transform mutations.

use kurbo::Affine;

/// Record of one committed transform replacement.
///
/// Every mutation of [`crate::TransformState`] that commits produces exactly
/// one of these, carrying the matrix before and after the commit. Downstream
/// layers (renderers, bindings, derived-state caches) consume these instead
/// of observing the state through callbacks. Event-routing layers such as
/// `tangible_gesture` accumulate them for the host to drain per batch.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TransformChange {
    /// The transform before the commit.
    pub old: Affine,
    /// The transform after the commit.
    pub new: Affine,
}

impl TransformChange {
    /// Returns true if the commit did not actually move the matrix.
    #[must_use]
    pub fn is_noop(&self) -> bool {
        self.old == self.new
    }
}
