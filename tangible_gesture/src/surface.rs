// Copyright 2025 the Tangible Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Touch event routing for one tangible object.
//!
//! [`TouchSurface`] is the glue between a host's touch events and the
//! transform state: it hit tests incoming events, offers them to child
//! responders in local coordinates, grabs the touches it decides to own,
//! and converts their movement into committed transform deltas.
//!
//! The surface is headless. The host owns the scene and the touch devices
//! and lends the surface its capabilities per call through
//! [`SurfaceHooks`]; the surface owns only its own transform state and the
//! registry of touches it has grabbed.

use alloc::vec::Vec;

use kurbo::{Affine, Point, Size};
use tangible_transform::{TransformChange, TransformState};

use crate::interpreter::{GestureDelta, interpret};
use crate::registry::TouchRegistry;
use crate::touch::{GrabOwner, TouchEvent, TouchId, TouchPhase};

/// Capabilities a host lends a surface while it routes one touch event.
///
/// The unit type implements this as a childless host with no grab
/// bookkeeping, which is enough for tests and single-object embeddings.
pub trait SurfaceHooks {
    /// Offers an event to child responders, with `touch.pos` already mapped
    /// into the surface's local space. Returns true if a child consumed it.
    fn offer_to_children(&mut self, phase: TouchPhase, touch: &TouchEvent) -> bool {
        let _ = (phase, touch);
        false
    }

    /// Claims exclusive ownership of a touch's future move/up events.
    fn grab(&mut self, id: TouchId) {
        let _ = id;
    }

    /// Releases a previous claim.
    fn ungrab(&mut self, id: TouchId) {
        let _ = id;
    }
}

impl SurfaceHooks for () {}

/// Touch-driven manipulation surface for one 2D object.
///
/// Feed it the host's touch lifecycle through
/// [`TouchSurface::on_touch_down`], [`TouchSurface::on_touch_move`], and
/// [`TouchSurface::on_touch_up`]; each handler returns true when the event
/// was consumed and should stop propagating. Transform commits made while
/// routing are recorded and handed out through
/// [`TouchSurface::drain_changes`], once per committed mutation.
#[derive(Clone, Debug)]
pub struct TouchSurface {
    state: TransformState,
    registry: TouchRegistry,
    changes: Vec<TransformChange>,
}

impl TouchSurface {
    /// Creates a surface over a local rectangle of the given size, at the
    /// identity transform.
    #[must_use]
    pub fn new(size: Size) -> Self {
        Self {
            state: TransformState::new(size),
            registry: TouchRegistry::new(),
            changes: Vec::new(),
        }
    }

    /// Returns the transform state.
    #[must_use]
    pub fn state(&self) -> &TransformState {
        &self.state
    }

    /// Returns the transform state for direct manipulation.
    ///
    /// Commits made directly on the state return their own
    /// [`TransformChange`] and are not recorded for
    /// [`TouchSurface::drain_changes`].
    #[must_use]
    pub fn state_mut(&mut self) -> &mut TransformState {
        &mut self.state
    }

    /// Returns the registry of touches this surface has grabbed.
    #[must_use]
    pub fn registry(&self) -> &TouchRegistry {
        &self.registry
    }

    /// Takes the transform changes committed since the last drain, in
    /// commit order.
    pub fn drain_changes(&mut self) -> Vec<TransformChange> {
        core::mem::take(&mut self.changes)
    }

    /// Routes a touch-down event.
    ///
    /// Events outside the object are ignored. Events inside are first
    /// offered to children in local coordinates; if no child consumes the
    /// touch, the surface grabs it and starts tracking it as part of the
    /// current gesture.
    pub fn on_touch_down(&mut self, touch: &TouchEvent, hooks: &mut impl SurfaceHooks) -> bool {
        if !self.state.contains(touch.pos) {
            return false;
        }
        if hooks.offer_to_children(TouchPhase::Down, &self.to_local_event(touch)) {
            return true;
        }
        hooks.grab(touch.id);
        self.registry.insert(touch.id, touch.pos);
        true
    }

    /// Routes a touch-move event.
    ///
    /// Touches grabbed elsewhere (or not at all) are offered to children
    /// while they are over the object. Touches this surface has grabbed
    /// drive the gesture: the frame's delta is interpreted from the
    /// registry, committed, and the touch's last known position advanced.
    pub fn on_touch_move(&mut self, touch: &TouchEvent, hooks: &mut impl SurfaceHooks) -> bool {
        if self.state.contains(touch.pos)
            && touch.grab != GrabOwner::Receiver
            && hooks.offer_to_children(TouchPhase::Move, &self.to_local_event(touch))
        {
            return true;
        }

        if touch.grab == GrabOwner::Receiver && self.registry.contains(touch.id) {
            self.apply_gesture(touch.id, touch.pos);
            self.registry.update(touch.id, touch.pos);
        }

        self.state.contains(touch.pos)
    }

    /// Routes a touch-up event.
    ///
    /// Touches grabbed elsewhere are offered to children; touches this
    /// surface grabbed are released and forgotten.
    pub fn on_touch_up(&mut self, touch: &TouchEvent, hooks: &mut impl SurfaceHooks) -> bool {
        if touch.grab != GrabOwner::Receiver
            && hooks.offer_to_children(TouchPhase::Up, &self.to_local_event(touch))
        {
            return true;
        }

        if self.registry.contains(touch.id) {
            hooks.ungrab(touch.id);
            self.registry.remove(touch.id);
        }

        self.state.contains(touch.pos)
    }

    fn to_local_event(&self, touch: &TouchEvent) -> TouchEvent {
        TouchEvent {
            pos: self.state.to_local(touch.pos),
            ..*touch
        }
    }

    fn apply_gesture(&mut self, id: TouchId, pos: Point) {
        let delta = interpret(
            &self.registry,
            id,
            pos,
            self.state.policy(),
            self.state.limits(),
            self.state.scale(),
        );
        match delta {
            GestureDelta::None => {}
            GestureDelta::Translate(v) => {
                if v.x != 0.0 || v.y != 0.0 {
                    self.commit(Affine::translate(v), pos);
                }
            }
            GestureDelta::Pivot {
                anchor,
                angle,
                scale_ratio,
            } => {
                // Two sequential anchor-preserving commits, rotation first.
                if angle != 0.0 {
                    self.commit(Affine::rotate(angle), anchor);
                }
                if scale_ratio != 1.0 {
                    self.commit(Affine::scale(scale_ratio), anchor);
                }
            }
        }
    }

    fn commit(&mut self, delta: Affine, anchor: Point) {
        // A singular candidate means this component is dropped for the
        // frame; event routing itself never fails.
        if let Ok(change) = self.state.apply_about(delta, anchor) {
            self.changes.push(change);
        }
    }
}
