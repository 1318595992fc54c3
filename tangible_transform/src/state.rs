// Copyright 2025 the Tangible Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use core::f64::consts::PI;

use kurbo::{Affine, Point, Rect, Size, Vec2};

use crate::change::TransformChange;
use crate::error::SingularTransform;
use crate::policy::{Compose, ScaleLimits, TransformPolicy};

/// Determinant magnitudes below this are treated as singular.
const DET_EPSILON: f64 = 1e-12;

/// Tolerance used by setters to suppress commits for unchanged values.
const VALUE_EPSILON: f64 = 1e-9;

const RAD_PER_DEG: f64 = PI / 180.0;
const DEG_PER_RAD: f64 = 180.0 / PI;

/// Transform state of a tangible 2D object.
///
/// `TransformState` owns the object's transform into parent space together
/// with its cached inverse, and derives all interactive geometry from that
/// single authority:
/// - Convert points between local and parent space.
/// - Apply anchored delta transforms (drag, pinch, rotate).
/// - Report the parent-space bounding box, position, center, rotation, and
///   uniform scale, and accept requested values for them.
///
/// The local content occupies the rectangle `(0, 0)..(width, height)` given
/// by [`TransformState::size`]. Derived properties are never stored: each is
/// recomputed from the matrix on demand, so they cannot diverge from it.
///
/// All mutation funnels through [`TransformState::apply_with`], which keeps
/// the inverse in lockstep with the transform and refuses to commit a
/// singular matrix.
#[derive(Clone, Debug)]
pub struct TransformState {
    size: Size,
    transform: Affine,
    inverse: Affine,
    policy: TransformPolicy,
    limits: ScaleLimits,
}

impl TransformState {
    /// Creates a state with the identity transform over a local rectangle of
    /// the given size.
    ///
    /// - The policy defaults to allowing every component.
    /// - Scale limits default to `0.01 ..= 1e20`.
    #[must_use]
    pub fn new(size: Size) -> Self {
        Self {
            size,
            transform: Affine::IDENTITY,
            inverse: Affine::IDENTITY,
            policy: TransformPolicy::default(),
            limits: ScaleLimits::default(),
        }
    }

    /// Returns the local content size.
    #[must_use]
    pub fn size(&self) -> Size {
        self.size
    }

    /// Sets the local content size.
    ///
    /// This does not touch the transform; only derived geometry such as
    /// [`TransformState::bbox`] observes the new rectangle.
    pub fn set_size(&mut self, size: Size) {
        self.size = size;
    }

    /// Returns the current transform into parent space.
    #[must_use]
    pub fn transform(&self) -> Affine {
        self.transform
    }

    /// Returns the cached inverse of the current transform.
    #[must_use]
    pub fn inverse(&self) -> Affine {
        self.inverse
    }

    /// Returns the interactive-component policy.
    #[must_use]
    pub fn policy(&self) -> TransformPolicy {
        self.policy
    }

    /// Sets the interactive-component policy.
    pub fn set_policy(&mut self, policy: TransformPolicy) {
        self.policy = policy;
    }

    /// Returns the scale limits.
    #[must_use]
    pub fn limits(&self) -> ScaleLimits {
        self.limits
    }

    /// Sets the minimum and maximum scale, normalized so `0 < min <= max`.
    ///
    /// Limits constrain future scale changes; the current scale is left
    /// as-is even if it falls outside the new range.
    pub fn set_scale_limits(&mut self, min: f64, max: f64) {
        self.limits = ScaleLimits::new(min, max);
    }

    /// Applies `delta` in parent space around the origin.
    ///
    /// Equivalent to `apply_with(delta, Point::ORIGIN, Compose::Before)`.
    pub fn apply(&mut self, delta: Affine) -> Result<TransformChange, SingularTransform> {
        self.apply_with(delta, Point::ORIGIN, Compose::Before)
    }

    /// Applies `delta` in parent space, leaving `anchor` fixed.
    pub fn apply_about(
        &mut self,
        delta: Affine,
        anchor: Point,
    ) -> Result<TransformChange, SingularTransform> {
        self.apply_with(delta, anchor, Compose::Before)
    }

    /// Applies a delta transform around an anchor point.
    ///
    /// This is the single mutation point for the matrix pair. The delta is
    /// conjugated with translations to and from `anchor`, so the anchor maps
    /// to itself under the delta, then composed with the current transform
    /// according to `compose`:
    ///
    /// - [`Compose::Before`]: `new = t * current`; the delta and anchor live
    ///   in parent space. This is what touch gestures use.
    /// - [`Compose::After`]: `new = current * t`; the delta and anchor live
    ///   in the object's local frame. This is what the rotation and scale
    ///   setters use to pivot around the (local image of the) center.
    ///
    /// The candidate matrix is inverted before anything is committed; a
    /// near-zero determinant fails with [`SingularTransform`] and leaves the
    /// state untouched. On success both matrices are replaced together and
    /// the old/new pair is returned for change propagation.
    pub fn apply_with(
        &mut self,
        delta: Affine,
        anchor: Point,
        compose: Compose,
    ) -> Result<TransformChange, SingularTransform> {
        let t = Affine::translate(anchor.to_vec2()) * delta * Affine::translate(-anchor.to_vec2());
        let candidate = match compose {
            Compose::Before => t * self.transform,
            Compose::After => self.transform * t,
        };
        if candidate.determinant().abs() < DET_EPSILON {
            return Err(SingularTransform);
        }
        let old = self.transform;
        self.transform = candidate;
        self.inverse = candidate.inverse();
        Ok(TransformChange {
            old,
            new: candidate,
        })
    }

    /// Maps a local-space point into parent space.
    #[must_use]
    pub fn to_parent(&self, pt: Point) -> Point {
        self.transform * pt
    }

    /// Maps a parent-space point into local space.
    #[must_use]
    pub fn to_local(&self, pt: Point) -> Point {
        self.inverse * pt
    }

    /// Hit test: returns true if a parent-space point falls inside the local
    /// content rectangle (edges inclusive).
    #[must_use]
    pub fn contains(&self, pt: Point) -> bool {
        let p = self.to_local(pt);
        0.0 <= p.x && p.x <= self.size.width && 0.0 <= p.y && p.y <= self.size.height
    }

    /// Returns the axis-aligned bounding box of the content in parent space.
    ///
    /// The four corners of the local rectangle are mapped through the
    /// transform and the extrema taken, so the box is exact for the affine
    /// maps this state can hold.
    #[must_use]
    pub fn bbox(&self) -> Rect {
        let q0 = self.to_parent(Point::ORIGIN);
        let q1 = self.to_parent(Point::new(self.size.width, 0.0));
        let q2 = self.to_parent(Point::new(0.0, self.size.height));
        let q3 = self.to_parent(Point::new(self.size.width, self.size.height));
        let min_x = q0.x.min(q1.x).min(q2.x).min(q3.x);
        let min_y = q0.y.min(q1.y).min(q2.y).min(q3.y);
        let max_x = q0.x.max(q1.x).max(q2.x).max(q3.x);
        let max_y = q0.y.max(q1.y).max(q2.y).max(q3.y);
        Rect::new(min_x, min_y, max_x, max_y)
    }

    /// Returns the minimum corner of [`TransformState::bbox`].
    #[must_use]
    pub fn position(&self) -> Point {
        self.bbox().origin()
    }

    /// Returns the center of [`TransformState::bbox`].
    #[must_use]
    pub fn center(&self) -> Point {
        self.bbox().center()
    }

    /// Returns the X coordinate of [`TransformState::position`].
    #[must_use]
    pub fn x(&self) -> f64 {
        self.position().x
    }

    /// Returns the Y coordinate of [`TransformState::position`].
    #[must_use]
    pub fn y(&self) -> f64 {
        self.position().y
    }

    /// Parent-space image of one local unit along +X.
    ///
    /// Both the rotation and the scale derivations read this one probe
    /// vector, so the two properties are consistent views of the matrix.
    fn unit_image(&self) -> Vec2 {
        self.to_parent(Point::new(1.0, 0.0)) - self.to_parent(Point::ORIGIN)
    }

    /// Returns the rotation in degrees, normalized into `[0, 360)`.
    ///
    /// Derived as the angle of the parent-space image of the local +X unit
    /// vector. Zero means the local axes are parallel to the parent's.
    #[must_use]
    pub fn rotation(&self) -> f64 {
        normalize_degrees(self.unit_image().atan2() * DEG_PER_RAD)
    }

    /// Returns the uniform scale factor.
    ///
    /// Derived as the parent-space length of one local unit.
    #[must_use]
    pub fn scale(&self) -> f64 {
        self.unit_image().hypot()
    }

    /// Moves the object so its bounding-box origin lands on `pos`.
    ///
    /// Returns `Ok(None)` without committing when the requested position
    /// already holds within tolerance.
    pub fn set_position(
        &mut self,
        pos: Point,
    ) -> Result<Option<TransformChange>, SingularTransform> {
        let delta = pos - self.position();
        if delta.hypot() < VALUE_EPSILON {
            return Ok(None);
        }
        self.apply(Affine::translate(delta)).map(Some)
    }

    /// Moves the object so its bounding-box center lands on `center`.
    pub fn set_center(
        &mut self,
        center: Point,
    ) -> Result<Option<TransformChange>, SingularTransform> {
        let delta = center - self.center();
        if delta.hypot() < VALUE_EPSILON {
            return Ok(None);
        }
        self.apply(Affine::translate(delta)).map(Some)
    }

    /// Sets the X coordinate of the bounding-box origin.
    pub fn set_x(&mut self, x: f64) -> Result<Option<TransformChange>, SingularTransform> {
        let pos = self.position();
        self.set_position(Point::new(x, pos.y))
    }

    /// Sets the Y coordinate of the bounding-box origin.
    pub fn set_y(&mut self, y: f64) -> Result<Option<TransformChange>, SingularTransform> {
        let pos = self.position();
        self.set_position(Point::new(pos.x, y))
    }

    /// Rotates the object to the requested angle in degrees.
    ///
    /// The angular delta from the current derived rotation is applied in the
    /// local frame, pivoting around the local image of the current center so
    /// the object spins in place. Requests are interpreted modulo 360; a
    /// request equal to the current rotation is a no-op.
    pub fn set_rotation(
        &mut self,
        degrees: f64,
    ) -> Result<Option<TransformChange>, SingularTransform> {
        let mut delta = (degrees - self.rotation()) % 360.0;
        if delta > 180.0 {
            delta -= 360.0;
        } else if delta < -180.0 {
            delta += 360.0;
        }
        if delta.abs() < VALUE_EPSILON {
            return Ok(None);
        }
        let anchor = self.to_local(self.center());
        self.apply_with(Affine::rotate(delta * RAD_PER_DEG), anchor, Compose::After)
            .map(Some)
    }

    /// Scales the object to the requested uniform factor.
    ///
    /// The request is clamped into the limits, then applied as a ratio
    /// against the current derived scale, pivoting around the local image of
    /// the current center. A request equal to the current scale is a no-op.
    ///
    /// Fails with [`SingularTransform`] if the current scale has collapsed
    /// to zero, which cannot happen while the limit invariant holds.
    pub fn set_scale(&mut self, scale: f64) -> Result<Option<TransformChange>, SingularTransform> {
        let target = self.limits.clamp(scale);
        let current = self.scale();
        if current < VALUE_EPSILON {
            return Err(SingularTransform);
        }
        let ratio = target / current;
        if (ratio - 1.0).abs() < VALUE_EPSILON {
            return Ok(None);
        }
        let anchor = self.to_local(self.center());
        self.apply_with(Affine::scale(ratio), anchor, Compose::After)
            .map(Some)
    }

    /// Applies a rotation, scale factor, and translation as one commit.
    ///
    /// `angle` is in radians; rotation and scale pivot around the
    /// parent-space `anchor`, the translation acts afterwards. The
    /// translation components are masked by the policy's translate flags,
    /// and the scale factor is dropped (forced to 1) if it would take the
    /// derived scale outside the limits.
    pub fn apply_composite(
        &mut self,
        angle: f64,
        scale: f64,
        translation: Vec2,
        anchor: Point,
    ) -> Result<TransformChange, SingularTransform> {
        let masked = Vec2::new(
            if self.policy.contains(TransformPolicy::TRANSLATE_X) {
                translation.x
            } else {
                0.0
            },
            if self.policy.contains(TransformPolicy::TRANSLATE_Y) {
                translation.y
            } else {
                0.0
            },
        );
        let scale = if self.limits.contains(self.scale() * scale) {
            scale
        } else {
            1.0
        };
        let delta = Affine::translate(masked)
            * Affine::translate(anchor.to_vec2())
            * Affine::rotate(angle)
            * Affine::scale(scale)
            * Affine::translate(-anchor.to_vec2());
        self.apply(delta)
    }
}

/// Normalizes an angle in degrees into `[0, 360)`.
fn normalize_degrees(degrees: f64) -> f64 {
    let r = degrees % 360.0;
    let r = if r < 0.0 { r + 360.0 } else { r };
    // Adding 360 to a tiny negative remainder rounds back up to 360.
    if r >= 360.0 { 0.0 } else { r }
}

#[cfg(test)]
mod tests {
    use core::f64::consts::{FRAC_PI_2, PI};

    use kurbo::{Affine, Point, Size, Vec2};

    use super::{Compose, ScaleLimits, SingularTransform, TransformPolicy, TransformState};

    fn near(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-6
    }

    fn point_near(a: Point, b: Point) -> bool {
        near(a.x, b.x) && near(a.y, b.y)
    }

    /// Angular distance in degrees, wrapped so 359.999… is near 0.
    fn deg_near(a: f64, b: f64) -> bool {
        let mut d = (a - b) % 360.0;
        if d > 180.0 {
            d -= 360.0;
        } else if d < -180.0 {
            d += 360.0;
        }
        d.abs() < 1e-6
    }

    fn identity_near(m: Affine) -> bool {
        let c = m.as_coeffs();
        let i = Affine::IDENTITY.as_coeffs();
        c.iter().zip(i.iter()).all(|(a, b)| (a - b).abs() < 1e-9)
    }

    fn state() -> TransformState {
        TransformState::new(Size::new(100.0, 50.0))
    }

    #[test]
    fn identity_apply_is_a_noop() {
        let mut st = state();
        let before = st.transform();
        let pos = st.position();
        let rot = st.rotation();
        let scale = st.scale();

        let change = st.apply(Affine::IDENTITY).unwrap();
        assert!(change.is_noop());
        assert_eq!(st.transform(), before);
        assert!(point_near(st.position(), pos));
        assert!(deg_near(st.rotation(), rot));
        assert!(near(st.scale(), scale));
    }

    #[test]
    fn local_parent_roundtrip() {
        let mut st = state();
        st.apply_about(Affine::rotate(0.7), Point::new(13.0, -4.0))
            .unwrap();
        st.apply(Affine::scale(3.5)).unwrap();
        st.apply(Affine::translate(Vec2::new(-20.0, 11.0))).unwrap();

        for pt in [
            Point::ORIGIN,
            Point::new(10.0, -5.0),
            Point::new(-123.0, 456.0),
        ] {
            let back = st.to_local(st.to_parent(pt));
            assert!(point_near(back, pt));
        }
    }

    #[test]
    fn inverse_stays_consistent_after_every_commit() {
        let mut st = state();
        st.apply(Affine::translate(Vec2::new(5.0, 7.0))).unwrap();
        assert!(identity_near(st.transform() * st.inverse()));
        st.apply_about(Affine::rotate(1.2), Point::new(3.0, 3.0))
            .unwrap();
        assert!(identity_near(st.transform() * st.inverse()));
        st.set_scale(2.5).unwrap();
        assert!(identity_near(st.transform() * st.inverse()));
    }

    #[test]
    fn singular_delta_is_rejected_and_state_unchanged() {
        let mut st = state();
        st.apply(Affine::translate(Vec2::new(1.0, 2.0))).unwrap();
        let before = st.transform();

        let err = st.apply(Affine::scale(0.0));
        assert_eq!(err, Err(SingularTransform));
        assert_eq!(st.transform(), before);
        assert!(identity_near(st.transform() * st.inverse()));
    }

    #[test]
    fn translate_moves_position_by_delta() {
        let mut st = state();
        st.apply(Affine::translate(Vec2::new(5.0, 2.0))).unwrap();
        assert!(point_near(st.position(), Point::new(5.0, 2.0)));
    }

    #[test]
    fn anchor_is_invariant_under_anchored_rotation() {
        let mut st = state();
        st.apply(Affine::translate(Vec2::new(30.0, 40.0))).unwrap();

        let anchor = Point::new(12.0, 34.0);
        let anchor_local = st.to_local(anchor);
        for angle in [0.3, 1.0, -2.2, PI] {
            st.apply_about(Affine::rotate(angle), anchor).unwrap();
            assert!(point_near(st.to_parent(anchor_local), anchor));
        }
    }

    #[test]
    fn bbox_tracks_rotated_corners() {
        let mut st = state();
        st.apply(Affine::rotate(FRAC_PI_2)).unwrap();

        // A 100x50 rectangle rotated a quarter turn about the origin spans
        // x in [-50, 0] and y in [0, 100].
        let bbox = st.bbox();
        assert!(near(bbox.x0, -50.0));
        assert!(near(bbox.y0, 0.0));
        assert!(near(bbox.width(), 50.0));
        assert!(near(bbox.height(), 100.0));
    }

    #[test]
    fn position_and_center_match_bbox_after_any_mutation() {
        let mut st = state();
        st.apply_about(Affine::rotate(0.4), Point::new(10.0, 10.0))
            .unwrap();
        st.set_scale(1.7).unwrap();
        st.set_position(Point::new(-3.0, 8.0)).unwrap();

        let bbox = st.bbox();
        assert!(point_near(st.position(), bbox.origin()));
        assert!(point_near(st.center(), bbox.center()));
    }

    #[test]
    fn set_position_and_center_land_exactly() {
        let mut st = state();
        st.apply(Affine::rotate(0.9)).unwrap();

        st.set_position(Point::new(25.0, -10.0)).unwrap();
        assert!(point_near(st.position(), Point::new(25.0, -10.0)));

        st.set_center(Point::new(0.0, 0.0)).unwrap();
        assert!(point_near(st.center(), Point::ORIGIN));
    }

    #[test]
    fn x_y_setters_route_through_position() {
        let mut st = state();
        st.set_x(42.0).unwrap();
        st.set_y(-7.0).unwrap();
        assert!(near(st.x(), 42.0));
        assert!(near(st.y(), -7.0));
    }

    #[test]
    fn rotation_roundtrips_through_set_get() {
        let mut st = state();
        for target in [30.0, 275.5, 359.0, 0.0] {
            st.set_rotation(target).unwrap();
            let got = st.rotation();
            assert!(deg_near(got, target), "target {target} got {got}");
            assert!((0.0..360.0).contains(&got), "got {got}");
        }

        // Out-of-range requests are interpreted modulo 360, and a request
        // sitting exactly on the wrap stays inside the range.
        st.set_rotation(370.0).unwrap();
        assert!(deg_near(st.rotation(), 10.0));
        st.set_rotation(-90.0).unwrap();
        assert!(deg_near(st.rotation(), 270.0));
        st.set_rotation(360.0).unwrap();
        assert!(st.rotation() < 360.0);
        assert!(deg_near(st.rotation(), 0.0));
    }

    #[test]
    fn set_rotation_spins_in_place() {
        let mut st = state();
        st.set_position(Point::new(60.0, 80.0)).unwrap();
        let center = st.center();
        st.set_rotation(123.0).unwrap();
        assert!(point_near(st.center(), center));
    }

    #[test]
    fn scale_roundtrips_and_clamps_into_limits() {
        let mut st = state();
        st.set_scale(2.0).unwrap();
        assert!(near(st.scale(), 2.0));

        st.set_scale_limits(0.5, 4.0);
        st.set_scale(100.0).unwrap();
        assert!(near(st.scale(), 4.0));
        st.set_scale(0.001).unwrap();
        assert!(near(st.scale(), 0.5));
    }

    #[test]
    fn set_scale_keeps_center_fixed() {
        let mut st = state();
        st.set_position(Point::new(-40.0, 15.0)).unwrap();
        st.set_rotation(45.0).unwrap();
        let center = st.center();
        st.set_scale(3.0).unwrap();
        assert!(point_near(st.center(), center));
    }

    #[test]
    fn setters_suppress_noop_commits() {
        let mut st = state();
        st.set_position(Point::new(10.0, 10.0)).unwrap();

        assert_eq!(st.set_position(st.position()).unwrap(), None);
        assert_eq!(st.set_center(st.center()).unwrap(), None);
        assert_eq!(st.set_rotation(st.rotation()).unwrap(), None);
        assert_eq!(st.set_scale(st.scale()).unwrap(), None);
    }

    #[test]
    fn rotation_and_scale_derive_from_one_probe() {
        let mut st = state();
        st.set_rotation(90.0).unwrap();
        st.set_scale(2.0).unwrap();
        // Rotation and scale do not disturb each other.
        assert!(deg_near(st.rotation(), 90.0));
        assert!(near(st.scale(), 2.0));
    }

    #[test]
    fn contains_respects_the_transform() {
        let mut st = state();
        assert!(st.contains(Point::new(50.0, 25.0)));
        assert!(st.contains(Point::ORIGIN));
        assert!(!st.contains(Point::new(101.0, 25.0)));

        st.set_position(Point::new(200.0, 200.0)).unwrap();
        assert!(!st.contains(Point::new(50.0, 25.0)));
        assert!(st.contains(Point::new(250.0, 225.0)));
    }

    #[test]
    fn compose_after_acts_in_the_local_frame() {
        let mut st = state();
        st.apply(Affine::rotate(FRAC_PI_2)).unwrap();

        // A local +X translation after a quarter turn moves the object along
        // the parent +Y axis.
        let before = st.to_parent(Point::ORIGIN);
        st.apply_with(
            Affine::translate(Vec2::new(10.0, 0.0)),
            Point::ORIGIN,
            Compose::After,
        )
        .unwrap();
        let after = st.to_parent(Point::ORIGIN);
        assert!(near(after.x - before.x, 0.0));
        assert!(near(after.y - before.y, 10.0));
    }

    #[test]
    fn composite_masks_translation_by_policy() {
        let mut st = state();
        st.set_policy(TransformPolicy::TRANSLATE_Y | TransformPolicy::ROTATE);
        st.apply_composite(0.0, 1.0, Vec2::new(5.0, 7.0), Point::ORIGIN)
            .unwrap();
        assert!(point_near(st.position(), Point::new(0.0, 7.0)));
    }

    #[test]
    fn composite_rejects_out_of_range_scale() {
        let mut st = state();
        st.set_scale_limits(0.5, 2.0);
        st.apply_composite(0.0, 10.0, Vec2::ZERO, Point::ORIGIN)
            .unwrap();
        assert!(near(st.scale(), 1.0));

        // An in-range factor still goes through.
        st.apply_composite(0.0, 1.5, Vec2::ZERO, Point::ORIGIN)
            .unwrap();
        assert!(near(st.scale(), 1.5));
    }

    #[test]
    fn limits_constructor_normalizes() {
        let mut st = state();
        st.set_scale_limits(5.0, 0.2);
        assert_eq!(st.limits(), ScaleLimits::new(0.2, 5.0));
    }
}
