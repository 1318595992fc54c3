// Copyright 2025 the Tangible Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Policy flags, scale limits, and composition modes shared across the crate.

bitflags::bitflags! {
    /// Which components of the transform interactive input may change.
    ///
    /// The policy masks *interactive* updates (drags and pivots). Explicit
    /// setters such as [`crate::TransformState::set_position`] are not
    /// masked; they express a direct decision by the embedding application.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct TransformPolicy: u8 {
        /// Allow translation along the parent X axis.
        const TRANSLATE_X = 0b0000_0001;
        /// Allow translation along the parent Y axis.
        const TRANSLATE_Y = 0b0000_0010;
        /// Allow rotation about the gesture anchor.
        const ROTATE      = 0b0000_0100;
        /// Allow uniform scaling about the gesture anchor.
        const SCALE       = 0b0000_1000;
        /// Allow translation along both axes.
        const TRANSLATE = Self::TRANSLATE_X.bits() | Self::TRANSLATE_Y.bits();
    }
}

impl Default for TransformPolicy {
    fn default() -> Self {
        Self::all()
    }
}

/// Bounds on the derived uniform scale factor.
///
/// The lower bound is kept strictly positive so the transform stays
/// invertible: a scale of zero would collapse the matrix to a singular one.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScaleLimits {
    /// Minimum allowed scale. Always `> 0`.
    pub min: f64,
    /// Maximum allowed scale. Always `>= min`.
    pub max: f64,
}

impl ScaleLimits {
    /// Creates a limit range, normalizing the inputs.
    ///
    /// The range is reordered so that `min <= max`, and the lower bound is
    /// raised above zero if necessary.
    #[must_use]
    pub fn new(min: f64, max: f64) -> Self {
        let (min, max) = if min <= max { (min, max) } else { (max, min) };
        let min = min.max(f64::MIN_POSITIVE);
        let max = max.max(min);
        Self { min, max }
    }

    /// Returns true if `scale` lies within the limits (inclusive).
    #[must_use]
    pub fn contains(&self, scale: f64) -> bool {
        scale >= self.min && scale <= self.max
    }

    /// Clamps `scale` into the limits.
    #[must_use]
    pub fn clamp(&self, scale: f64) -> f64 {
        scale.clamp(self.min, self.max)
    }
}

impl Default for ScaleLimits {
    fn default() -> Self {
        Self {
            min: 0.01,
            max: 1e20,
        }
    }
}

/// How a delta transform composes with the current transform.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Compose {
    /// Apply the delta in parent space, before the current transform:
    /// `new = delta * current`. The anchor is a parent-space point.
    #[default]
    Before,
    /// Apply the delta in the object's own local frame, as if it occurred
    /// before the current transform: `new = current * delta`. The anchor is
    /// a local-space point.
    After,
}
