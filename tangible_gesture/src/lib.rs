// Copyright 2025 the Tangible Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tangible Gesture: multi-touch manipulation of 2D objects.
//!
//! This crate turns a host's touch event stream into incremental transform
//! updates on a [`tangible_transform::TransformState`]: one finger drags the
//! object, two fingers pinch-rotate-scale it about the point between them.
//! It is built from three layers:
//!
//! - [`TouchRegistry`]: the ordered set of touches a surface has grabbed,
//!   with last known parent-space positions.
//! - [`interpret`]: a pure function from a registry snapshot and one touch
//!   movement to a [`GestureDelta`] — a drag translation, or a rotation +
//!   scale pivoting about an anchor.
//! - [`TouchSurface`]: the routing shim that hit tests events, offers them
//!   to child responders in local coordinates, grabs unconsumed touches,
//!   and commits interpreted deltas.
//!
//! ## Minimal example
//!
//! ```rust
//! use kurbo::{Point, Size};
//! use tangible_gesture::{GrabOwner, TouchEvent, TouchId, TouchSurface};
//!
//! let mut surface = TouchSurface::new(Size::new(100.0, 50.0));
//! let finger = TouchId::new(1);
//!
//! // Finger lands on the object; the surface grabs it. The unit hooks
//! // stand in for a host with no children and no grab bookkeeping.
//! surface.on_touch_down(&TouchEvent::new(finger, Point::new(10.0, 10.0)), &mut ());
//!
//! // Moves for a grabbed touch arrive stamped with the receiver's grab
//! // and drag the object.
//! let ev = TouchEvent::new(finger, Point::new(15.0, 12.0)).with_grab(GrabOwner::Receiver);
//! surface.on_touch_move(&ev, &mut ());
//!
//! let pos = surface.state().position();
//! assert!((pos.x - 5.0).abs() < 1e-9 && (pos.y - 2.0).abs() < 1e-9);
//! ```
//!
//! ## Gesture rules
//!
//! - A touch joins the gesture only if it lands on the object and no child
//!   responder consumes it; the surface then grabs it, so other responders
//!   stop seeing its move/up events.
//! - With two or more grabbed touches, each frame is driven by the two
//!   mutually farthest ones; a loosely held third finger cannot jitter the
//!   transform.
//! - A scale step that would leave the configured limits is rejected for
//!   that frame (the rotation component still applies); degenerate finger
//!   geometry skips the affected component rather than erroring.
//! - Which components respond at all is governed by the state's
//!   [`tangible_transform::TransformPolicy`].
//!
//! ## Concurrency
//!
//! Everything here is single-threaded and synchronous: each event is
//! processed to completion before the next, every commit replaces the
//! matrix pair atomically, and renderers on other threads should consume
//! snapshots via the drained [`tangible_transform::TransformChange`]
//! records.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod interpreter;
mod registry;
mod surface;
mod touch;

pub use interpreter::{GestureDelta, interpret};
pub use registry::TouchRegistry;
pub use surface::{SurfaceHooks, TouchSurface};
pub use touch::{GrabOwner, TouchEvent, TouchId, TouchPhase};
