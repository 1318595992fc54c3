// Copyright 2025 the Tangible Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Error type for degenerate transform conditions.

use core::fmt;

/// A candidate transform matrix was not invertible.
///
/// With the scale bounded away from zero by [`crate::ScaleLimits`], this is
/// unreachable through normal interactive use; hitting it indicates the
/// caller supplied a collapsing delta (for example a zero scale factor).
/// The state that reported it is left unchanged, so a NaN-bearing inverse is
/// never published.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SingularTransform;

impl fmt::Display for SingularTransform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("transform matrix is singular and cannot be inverted")
    }
}

impl core::error::Error for SingularTransform {}
