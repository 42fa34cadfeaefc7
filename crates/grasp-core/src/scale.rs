// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Scale factors derived from how grab points spread apart or converge.
//!
//! Two interchangeable strategies exist: a single uniform factor from offset
//! length ratios, and per-axis factors measured in the object's current local
//! frame. Per-axis scaling can additionally be restricted to two axes.

use crate::delta::{centroid, centroid_offset, GrabPointDelta, AXIS_EPSILON};
use crate::math::{self, Quat, Vec3};
use crate::pose::Pose;

/// Smallest per-axis factor a single tick may produce.
pub const MIN_AXIS_RATIO: f32 = 0.01;

/// Largest per-axis factor a single tick may produce.
pub const MAX_AXIS_RATIO: f32 = 100.0;

/// Previous-component magnitude below which an axis ratio is neutral.
pub const AXIS_RATIO_EPSILON: f32 = 1e-8;

/// Uniform scale factor for this tick.
///
/// Each point with a usable offset contributes `|current| / |previous|`
/// (computed from squared lengths); other points contribute a neutral `1`.
/// Contributions are averaged with weight `1 / count`.
#[allow(clippy::cast_precision_loss)]
pub fn update_scale(deltas: &[GrabPointDelta]) -> f32 {
    if deltas.is_empty() {
        return 1.0;
    }
    let weight = 1.0 / deltas.len() as f32;
    deltas
        .iter()
        .map(|data| {
            let previous_sq = data.previous_centroid_offset().length_squared();
            if data.is_valid_axis() && previous_sq > AXIS_EPSILON {
                (data.centroid_offset().length_squared() / previous_sq).sqrt() * weight
            } else {
                weight
            }
        })
        .sum()
}

/// Per-axis scale factors for this tick, measured in the object's current
/// local frame.
///
/// Offsets are inverse-rotated by `object_rotation` (the live orientation, not
/// the one at session start) so the scaled axes follow the object as it
/// turns. Points without a usable offset contribute `(1, 1, 1)`.
#[allow(clippy::cast_precision_loss)]
pub fn update_scale_per_axis(deltas: &[GrabPointDelta], object_rotation: &Quat) -> Vec3 {
    if deltas.is_empty() {
        return Vec3::ONE;
    }
    let weight = 1.0 / deltas.len() as f32;
    let inv_rot = object_rotation.inverse();

    deltas.iter().fold(Vec3::ZERO, |acc, data| {
        let factors = if data.is_valid_axis() {
            let curr_local = inv_rot.rotate(&data.centroid_offset());
            let prev_local = inv_rot.rotate(&data.previous_centroid_offset());
            Vec3::new(
                safe_axis_ratio(curr_local.x(), prev_local.x()),
                safe_axis_ratio(curr_local.y(), prev_local.y()),
                safe_axis_ratio(curr_local.z(), prev_local.z()),
            )
        } else {
            Vec3::ONE
        };
        acc.add(&factors.scale(weight))
    })
}

/// `|curr| / |prev|` bounded to `[MIN_AXIS_RATIO, MAX_AXIS_RATIO]`.
///
/// Near-zero `prev` and non-finite ratios are neutral (`1`).
pub fn safe_axis_ratio(curr: f32, prev: f32) -> f32 {
    let ap = prev.abs();
    if ap < AXIS_RATIO_EPSILON {
        return 1.0;
    }
    let r = curr.abs() / ap;
    if !r.is_finite() {
        return 1.0;
    }
    math::clamp(r, MIN_AXIS_RATIO, MAX_AXIS_RATIO)
}

/// Which local axes may scale this tick.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct AxisMask {
    free: [bool; 3],
}

impl AxisMask {
    /// Every axis free.
    pub const ALL: Self = Self { free: [true; 3] };

    /// All axes free except `locked` (`0 = x`, `1 = y`, `2 = z`).
    pub fn locking(locked: usize) -> Self {
        let mut free = [true; 3];
        free[locked.min(2)] = false;
        Self { free }
    }

    /// Whether axis `idx` may scale.
    pub fn is_free(&self, idx: usize) -> bool {
        self.free[idx.min(2)]
    }

    /// Index of the first locked axis, if any.
    pub fn locked_axis(&self) -> Option<usize> {
        self.free.iter().position(|free| !free)
    }

    /// Replaces locked components of `factors` with a neutral `1`.
    pub fn apply(&self, factors: Vec3) -> Vec3 {
        Vec3::new(
            if self.free[0] { factors.x() } else { 1.0 },
            if self.free[1] { factors.y() } else { 1.0 },
            if self.free[2] { factors.z() } else { 1.0 },
        )
    }
}

impl Default for AxisMask {
    fn default() -> Self {
        Self::ALL
    }
}

/// Index of the axis with the smallest weight.
///
/// Ties resolve in a fixed order: `y` replaces `x` only when strictly smaller,
/// then `z` replaces the provisional pick only when strictly smaller.
pub fn drop_axis(weights: &Vec3) -> usize {
    let mut drop = 0;
    if weights.y() < weights.x() {
        drop = 1;
    }
    if weights.z() < weights.axis(drop) {
        drop = 2;
    }
    drop
}

/// Restricts scaling to the two local axes most aligned with the grab.
///
/// With two or more points the weights are the absolute local components of
/// the span from the first to the second point; otherwise they are the summed
/// absolute local centroid offsets. The axis with the smallest weight is
/// locked.
pub fn compute_two_axis_mask(grab_points: &[Pose], object_rotation: &Quat) -> AxisMask {
    let inv_rot = object_rotation.inverse();

    let weights = if grab_points.len() >= 2 {
        let span = grab_points[1].position().sub(&grab_points[0].position());
        inv_rot.rotate(&span).abs()
    } else {
        let c = centroid(grab_points);
        grab_points.iter().fold(Vec3::ZERO, |acc, pose| {
            let local = inv_rot.rotate(&centroid_offset(pose, &c));
            acc.add(&local.abs())
        })
    };

    AxisMask::locking(drop_axis(&weights))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stretched(prev: Vec3, curr: Vec3) -> GrabPointDelta {
        let mut delta = GrabPointDelta::new(prev, Quat::identity());
        delta.update_data(curr, Quat::identity());
        delta
    }

    #[test]
    fn axis_ratio_clamps_to_bounds() {
        assert!((safe_axis_ratio(10_000.0, 1.0) - 100.0).abs() < f32::EPSILON);
        assert!((safe_axis_ratio(1.0, 10_000.0) - 0.01).abs() < f32::EPSILON);
    }

    #[test]
    fn axis_ratio_neutral_for_tiny_previous() {
        assert!((safe_axis_ratio(3.0, 1e-9) - 1.0).abs() < f32::EPSILON);
        assert!((safe_axis_ratio(f32::NAN, 1.0) - 1.0).abs() < f32::EPSILON);
    }

    #[test]
    fn drop_axis_picks_smallest() {
        assert_eq!(drop_axis(&Vec3::new(3.0, 1.0, 2.0)), 1);
        assert_eq!(drop_axis(&Vec3::new(1.0, 3.0, 2.0)), 0);
        assert_eq!(drop_axis(&Vec3::new(3.0, 2.0, 1.0)), 2);
    }

    #[test]
    fn drop_axis_ties_prefer_lower_index() {
        assert_eq!(drop_axis(&Vec3::new(1.0, 1.0, 1.0)), 0);
        assert_eq!(drop_axis(&Vec3::new(2.0, 1.0, 1.0)), 1);
    }

    #[test]
    fn mask_locks_requested_axis() {
        let mask = AxisMask::locking(1);
        assert_eq!(mask.locked_axis(), Some(1));
        let applied = mask.apply(Vec3::new(2.0, 3.0, 4.0));
        assert_eq!(applied.to_array(), [2.0, 1.0, 4.0]);
    }

    #[test]
    fn uniform_scale_averages_per_point_ratios() {
        let a = stretched(Vec3::UNIT_X, Vec3::new(2.0, 0.0, 0.0));
        let b = stretched(Vec3::new(-1.0, 0.0, 0.0), Vec3::new(-4.0, 0.0, 0.0));
        assert!((update_scale(&[a, b]) - 3.0).abs() < 1e-6);
    }

    #[test]
    fn degenerate_points_are_neutral_in_both_modes() {
        let d = stretched(Vec3::ZERO, Vec3::ZERO);
        assert!((update_scale(&[d]) - 1.0).abs() < 1e-6);
        let v = update_scale_per_axis(&[d], &Quat::identity());
        assert_eq!(v.to_array(), [1.0, 1.0, 1.0]);
    }

    #[test]
    fn per_axis_scale_follows_object_rotation() {
        // Stretch along world X while the object is yawed 90°: that is the
        // object's local Z axis.
        let yaw = Quat::from_axis_angle(Vec3::UNIT_Y, core::f32::consts::FRAC_PI_2);
        let a = stretched(Vec3::new(1.0, 0.5, 0.0), Vec3::new(2.0, 0.5, 0.0));
        let f = update_scale_per_axis(&[a], &yaw);
        assert!((f.z() - 2.0).abs() < 1e-4, "{f:?}");
        assert!((f.y() - 1.0).abs() < 1e-4, "{f:?}");
    }
}
