// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Per-grab-point centroid offsets and orientations tracked across ticks.
//!
//! Every tick recomputes the centroid of all active grab points and shifts
//! each point's current offset/orientation into the "previous" slot. The
//! rotation and scale solvers only ever look at these previous/current pairs.

use crate::math::{Quat, Vec3};
use crate::pose::Pose;

/// Squared-length threshold below which a centroid offset has no usable
/// direction.
pub const AXIS_EPSILON: f32 = 0.000001;

/// Derived state for one grab point.
///
/// Offsets are world-frame vectors from the grab point to the centroid.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct GrabPointDelta {
    previous_centroid_offset: Vec3,
    centroid_offset: Vec3,
    previous_rotation: Quat,
    rotation: Quat,
}

impl GrabPointDelta {
    /// Creates a delta whose previous and current samples coincide.
    pub const fn new(centroid_offset: Vec3, rotation: Quat) -> Self {
        Self {
            previous_centroid_offset: centroid_offset,
            centroid_offset,
            previous_rotation: rotation,
            rotation,
        }
    }

    /// Offset recorded on the previous tick.
    pub fn previous_centroid_offset(&self) -> Vec3 {
        self.previous_centroid_offset
    }

    /// Offset recorded on the current tick.
    pub fn centroid_offset(&self) -> Vec3 {
        self.centroid_offset
    }

    /// Orientation recorded on the previous tick.
    pub fn previous_rotation(&self) -> Quat {
        self.previous_rotation
    }

    /// Orientation recorded on the current tick (sign-continuous with the
    /// previous sample).
    pub fn rotation(&self) -> Quat {
        self.rotation
    }

    /// Shifts current samples into the previous slot and stores new ones.
    ///
    /// A new orientation on the opposite hemisphere of the stored one is
    /// negated first, so `q` followed by `-q` records no motion.
    pub fn update_data(&mut self, centroid_offset: Vec3, rotation: Quat) {
        self.previous_centroid_offset = self.centroid_offset;
        self.centroid_offset = centroid_offset;

        self.previous_rotation = self.rotation;
        self.rotation = if rotation.dot(&self.rotation) < 0.0 {
            rotation.negate()
        } else {
            rotation
        };
    }

    /// Whether the current offset is long enough to define an aiming direction.
    pub fn is_valid_axis(&self) -> bool {
        self.centroid_offset.length_squared() > AXIS_EPSILON
    }
}

/// Arithmetic mean of the grab positions; zero for an empty slice.
#[allow(clippy::cast_precision_loss)]
pub fn centroid(poses: &[Pose]) -> Vec3 {
    if poses.is_empty() {
        return Vec3::ZERO;
    }
    let sum = poses
        .iter()
        .fold(Vec3::ZERO, |acc, pose| acc.add(&pose.position()));
    sum.scale(1.0 / poses.len() as f32)
}

/// Vector from `pose` to `centroid`.
pub fn centroid_offset(pose: &Pose, centroid: &Vec3) -> Vec3 {
    centroid.sub(&pose.position())
}

/// Builds the per-point deltas for a new session.
pub fn initialize_deltas(poses: &[Pose]) -> Vec<GrabPointDelta> {
    let c = centroid(poses);
    poses
        .iter()
        .map(|pose| GrabPointDelta::new(centroid_offset(pose, &c), pose.rotation()))
        .collect()
}

/// Advances every delta to this tick's poses and returns the new centroid.
///
/// `poses` and `deltas` are matched by index; callers guarantee equal length.
pub fn update_point_data(poses: &[Pose], deltas: &mut [GrabPointDelta]) -> Vec3 {
    debug_assert_eq!(poses.len(), deltas.len());
    let c = centroid(poses);
    for (pose, delta) in poses.iter().zip(deltas.iter_mut()) {
        delta.update_data(centroid_offset(pose, &c), pose.rotation());
    }
    c
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn centroid_is_mean_of_positions() {
        let poses = [
            Pose::from_position(Vec3::new(1.0, 0.0, 0.0)),
            Pose::from_position(Vec3::new(-1.0, 2.0, 0.0)),
            Pose::from_position(Vec3::new(3.0, 1.0, 3.0)),
        ];
        assert_eq!(centroid(&poses).to_array(), [1.0, 1.0, 1.0]);
    }

    #[test]
    fn offsets_point_from_grab_to_centroid() {
        let poses = [
            Pose::from_position(Vec3::new(-1.0, 0.0, 0.0)),
            Pose::from_position(Vec3::new(1.0, 0.0, 0.0)),
        ];
        let deltas = initialize_deltas(&poses);
        assert_eq!(deltas[0].centroid_offset().to_array(), [1.0, 0.0, 0.0]);
        assert_eq!(deltas[1].centroid_offset().to_array(), [-1.0, 0.0, 0.0]);
    }

    #[test]
    fn update_shifts_current_into_previous() {
        let mut delta = GrabPointDelta::new(Vec3::UNIT_X, Quat::identity());
        delta.update_data(Vec3::UNIT_Y, Quat::identity());
        assert_eq!(delta.previous_centroid_offset(), Vec3::UNIT_X);
        assert_eq!(delta.centroid_offset(), Vec3::UNIT_Y);
    }

    #[test]
    fn opposite_hemisphere_sample_is_negated() {
        let q = Quat::from_axis_angle(Vec3::UNIT_Z, 0.4);
        let mut delta = GrabPointDelta::new(Vec3::UNIT_X, q);
        delta.update_data(Vec3::UNIT_X, q.negate());
        assert_eq!(delta.rotation(), q);
    }

    #[test]
    fn short_offset_is_not_a_valid_axis() {
        let delta = GrabPointDelta::new(Vec3::new(0.0005, 0.0, 0.0), Quat::identity());
        assert!(!delta.is_valid_axis());
        let delta = GrabPointDelta::new(Vec3::new(0.01, 0.0, 0.0), Quat::identity());
        assert!(delta.is_valid_axis());
    }
}
