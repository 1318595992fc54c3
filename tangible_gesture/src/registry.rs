// Copyright 2025 the Tangible Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Registry of grabbed touches and their last known positions.

use alloc::vec::Vec;

use hashbrown::HashMap;
use kurbo::Point;

use crate::touch::TouchId;

/// Ordered set of touches a surface has grabbed, with the parent-space
/// position each was last seen at.
///
/// Entries are inserted explicitly when a touch is grabbed and removed when
/// the grab is released; a move for an id that was never grabbed is simply
/// unknown to the registry. Iteration order is grab order, which gesture
/// interpretation relies on for deterministic tie-breaks.
#[derive(Clone, Debug, Default)]
pub struct TouchRegistry {
    order: Vec<TouchId>,
    last_pos: HashMap<TouchId, Point>,
}

impl TouchRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of grabbed touches.
    #[must_use]
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Returns true if no touches are grabbed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Returns true if `id` is currently grabbed.
    #[must_use]
    pub fn contains(&self, id: TouchId) -> bool {
        self.last_pos.contains_key(&id)
    }

    /// Records a grab of `id` at `pos`.
    ///
    /// Re-inserting a live id refreshes its stored position but keeps its
    /// place in the grab order.
    pub fn insert(&mut self, id: TouchId, pos: Point) {
        if self.last_pos.insert(id, pos).is_none() {
            self.order.push(id);
        }
    }

    /// Replaces the stored position of `id`, returning the previous one.
    ///
    /// Returns `None` and stores nothing when `id` is not grabbed.
    pub fn update(&mut self, id: TouchId, pos: Point) -> Option<Point> {
        match self.last_pos.get_mut(&id) {
            Some(entry) => Some(core::mem::replace(entry, pos)),
            None => None,
        }
    }

    /// Removes `id`, returning true if it was present.
    pub fn remove(&mut self, id: TouchId) -> bool {
        if self.last_pos.remove(&id).is_some() {
            self.order.retain(|&t| t != id);
            true
        } else {
            false
        }
    }

    /// Returns the last known position of `id`, if grabbed.
    #[must_use]
    pub fn last_pos(&self, id: TouchId) -> Option<Point> {
        self.last_pos.get(&id).copied()
    }

    /// Grabbed touch ids in grab order.
    #[must_use]
    pub fn ids(&self) -> &[TouchId] {
        &self.order
    }

    /// Iterates over `(id, last known position)` in grab order.
    pub fn iter(&self) -> impl Iterator<Item = (TouchId, Point)> + '_ {
        self.order.iter().map(|&id| (id, self.last_pos[&id]))
    }

    /// Drops all entries.
    pub fn clear(&mut self) {
        self.order.clear();
        self.last_pos.clear();
    }
}
