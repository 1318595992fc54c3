// Copyright 2025 the Tangible Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Pure gesture interpretation over touch registry snapshots.
//!
//! [`interpret`] turns "grabbed touch `t` moved to `p`" into a per-frame
//! transform delta: a translation while one touch is down, or a combined
//! rotation + scale about an anchor once two or more are. It holds no state
//! of its own; everything it needs is the registry snapshot, the moved
//! touch, and the policy inputs.

use kurbo::{Point, Vec2};
use tangible_transform::{ScaleLimits, TransformPolicy};

use crate::registry::TouchRegistry;
use crate::touch::TouchId;

/// Vector lengths below this are considered degenerate.
const LEN_EPSILON: f64 = 1e-9;

/// Transform delta produced by one touch-move frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum GestureDelta {
    /// The movement produces no transform this frame.
    None,
    /// Single-touch drag by the given parent-space vector.
    Translate(Vec2),
    /// Two-touch rotation and scale about a fixed point.
    Pivot {
        /// Parent-space point that stays fixed under the delta.
        anchor: Point,
        /// Rotation in radians (counter-clockwise for y-up hosts).
        angle: f64,
        /// Multiplicative scale factor.
        scale_ratio: f64,
    },
}

/// Computes the transform delta for a grabbed touch that moved to `new_pos`.
///
/// With a single grabbed touch this is a drag: the movement since the
/// touch's last known position, with each component masked to zero unless
/// the policy allows translation along that axis.
///
/// With two or more grabbed touches, the gesture is driven by the two
/// mutually farthest touches so that a loosely held third finger cannot
/// jitter the transform:
/// 1. The anchor is the last known position of the *other* grabbed touch
///    farthest from `new_pos`.
/// 2. If some touch other than the moving one is farther from that anchor,
///    the moving touch is not part of the driving pair and the frame is
///    [`GestureDelta::None`].
/// 3. Otherwise the old and new finger vectors from the anchor give the
///    rotation angle and scale ratio.
///
/// Degenerate finger vectors zero out the affected component rather than
/// erroring, and a ratio that would take `current_scale` outside `limits`
/// is rejected outright (forced to 1) instead of being partially clamped,
/// so the scale cannot oscillate at a boundary. A `touch` the registry does
/// not know yields [`GestureDelta::None`].
#[must_use]
pub fn interpret(
    registry: &TouchRegistry,
    touch: TouchId,
    new_pos: Point,
    policy: TransformPolicy,
    limits: ScaleLimits,
    current_scale: f64,
) -> GestureDelta {
    let Some(last_pos) = registry.last_pos(touch) else {
        return GestureDelta::None;
    };

    if registry.len() == 1 {
        let delta = new_pos - last_pos;
        return GestureDelta::Translate(Vec2::new(
            if policy.contains(TransformPolicy::TRANSLATE_X) {
                delta.x
            } else {
                0.0
            },
            if policy.contains(TransformPolicy::TRANSLATE_Y) {
                delta.y
            } else {
                0.0
            },
        ));
    }

    // Anchor: the other grabbed touch farthest from where the moving touch
    // is now. Ties keep the earliest grab.
    let mut anchor = Point::ORIGIN;
    let mut best = f64::NEG_INFINITY;
    for (id, pos) in registry.iter() {
        if id == touch {
            continue;
        }
        let dist = (pos - new_pos).hypot();
        if dist > best {
            best = dist;
            anchor = pos;
        }
    }

    // The moving touch must itself be the touch farthest from the anchor;
    // otherwise it is the odd one out this frame.
    let mut farthest = touch;
    let mut best = f64::NEG_INFINITY;
    for (id, pos) in registry.iter() {
        let dist = (pos - anchor).hypot();
        if dist > best {
            best = dist;
            farthest = id;
        }
    }
    if farthest != touch {
        return GestureDelta::None;
    }

    let old_vec = last_pos - anchor;
    let new_vec = new_pos - anchor;
    let old_len = old_vec.hypot();
    let new_len = new_vec.hypot();
    let degenerate = old_len < LEN_EPSILON || new_len < LEN_EPSILON;

    let angle = if policy.contains(TransformPolicy::ROTATE) && !degenerate {
        // Signed angle rotating the old finger vector onto the new one.
        Vec2::new(old_vec.dot(new_vec), old_vec.cross(new_vec)).atan2()
    } else {
        0.0
    };

    let mut scale_ratio = if policy.contains(TransformPolicy::SCALE) && !degenerate {
        new_len / old_len
    } else {
        1.0
    };
    if !limits.contains(current_scale * scale_ratio) {
        scale_ratio = 1.0;
    }

    if angle.abs() < LEN_EPSILON && (scale_ratio - 1.0).abs() < LEN_EPSILON {
        return GestureDelta::None;
    }
    GestureDelta::Pivot {
        anchor,
        angle,
        scale_ratio,
    }
}
