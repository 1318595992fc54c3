// Copyright 2025 the Tangible Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Touch identities and event payloads.

use kurbo::Point;

/// Stable identity of a pointer contact, supplied by the host.
///
/// The host assigns an id when a contact appears and keeps it stable for the
/// contact's lifetime; down, move, and up events for the same finger carry
/// the same id. Ids may be reused after the contact ends.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Ord, PartialOrd)]
#[repr(transparent)]
pub struct TouchId(u64);

impl TouchId {
    /// Wraps a host-assigned raw id.
    #[must_use]
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// Returns the raw numeric id.
    #[must_use]
    pub const fn to_raw(self) -> u64 {
        self.0
    }
}

/// Who currently owns a touch's move/up stream, relative to the surface
/// receiving the event.
///
/// Grabbing is the host's exclusive-claim mechanism: once a responder grabs
/// a touch, other responders stop receiving its move/up events. The host
/// records who holds the grab and stamps each delivered event with this
/// receiver-relative view of it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum GrabOwner {
    /// Nobody has claimed the touch.
    #[default]
    None,
    /// The surface receiving the event holds the grab.
    Receiver,
    /// Some other responder holds the grab.
    Other,
}

/// Lifecycle phase of a touch event, used when offering events to children.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TouchPhase {
    /// Contact appeared.
    Down,
    /// Contact moved.
    Move,
    /// Contact ended.
    Up,
}

/// One touch event as delivered to a surface.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TouchEvent {
    /// Stable identity of the contact.
    pub id: TouchId,
    /// Current position. In parent space at the surface boundary; remapped
    /// to local space when the event is offered to children.
    pub pos: Point,
    /// Grab ownership of this touch, relative to the receiving surface.
    pub grab: GrabOwner,
}

impl TouchEvent {
    /// Creates an ungrabbed event.
    #[must_use]
    pub fn new(id: TouchId, pos: Point) -> Self {
        Self {
            id,
            pos,
            grab: GrabOwner::None,
        }
    }

    /// Returns this event with the given grab ownership.
    #[must_use]
    pub fn with_grab(self, grab: GrabOwner) -> Self {
        Self { grab, ..self }
    }
}
