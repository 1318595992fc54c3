// Copyright 2025 the Tangible Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tangible Transform: affine transform state for interactive 2D objects.
//!
//! This crate provides a small, headless model of an object that lives in a
//! parent coordinate space under a 2D affine transform and is manipulated
//! through incremental, anchored delta transforms. It focuses on:
//! - Owning the transform together with its cached inverse, kept in
//!   lockstep by a single mutation point.
//! - Coordinate conversion between local and parent space.
//! - Derived geometry: parent-space bounding box, position, center,
//!   rotation, and uniform scale — all pure functions of the matrix.
//! - Policy flags and scale limits that bound interactive updates.
//!
//! It does **not** own a scene graph, touch input, or rendering. Callers are
//! expected to:
//! - Feed anchored deltas from an input layer (for example
//!   `tangible_gesture`) into [`TransformState::apply_with`].
//! - Forward the returned [`TransformChange`] records to whatever consumes
//!   committed transforms (renderers, bindings, caches).
//!
//! ## Minimal example
//!
//! ```rust
//! use kurbo::{Affine, Point, Size, Vec2};
//! use tangible_transform::TransformState;
//!
//! // A 100x50 object at the parent origin.
//! let mut state = TransformState::new(Size::new(100.0, 50.0));
//!
//! // Drag it by (5, 2), then spin it in place.
//! state.apply(Affine::translate(Vec2::new(5.0, 2.0)))?;
//! state.set_rotation(45.0)?;
//!
//! // Map a parent-space point into the object for hit testing.
//! let local = state.to_local(Point::new(20.0, 10.0));
//! # Ok::<(), tangible_transform::SingularTransform>(())
//! ```
//!
//! ## Design notes
//!
//! - The transform is always invertible: scale is bounded away from zero by
//!   [`ScaleLimits`], and [`TransformState::apply_with`] refuses to commit a
//!   matrix whose determinant vanishes.
//! - Derived properties are never stored. Setting one computes the delta
//!   transform that produces the requested value and commits that, so the
//!   matrix remains the only authority.
//! - Change propagation is by value: each commit returns a
//!   [`TransformChange`] with the old and new matrix, rather than firing
//!   observer callbacks.
//!
//! This crate is `no_std`.

#![no_std]

mod change;
mod error;
mod policy;
mod state;

pub use change::TransformChange;
pub use error::SingularTransform;
pub use policy::{Compose, ScaleLimits, TransformPolicy};
pub use state::TransformState;
