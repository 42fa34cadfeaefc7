// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Object transform with non-uniform scale and the sink capability that
//! receives solver output.

use crate::math::{Quat, Vec3};

/// Rigid transform with non-uniform scale for the manipulated object.
///
/// Conventions:
/// - `position` in metres, expressed in the same space as the grab poses.
/// - `rotation` as a unit quaternion.
/// - `scale` is non-uniform and applied before rotation/translation.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct ObjectTransform {
    position: Vec3,
    rotation: Quat,
    scale: Vec3,
}

impl ObjectTransform {
    /// Identity transform (no translation, no rotation, unit scale).
    pub const fn identity() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Quat::identity(),
            scale: Vec3::ONE,
        }
    }

    /// Creates a transform from components.
    pub const fn new(position: Vec3, rotation: Quat, scale: Vec3) -> Self {
        Self {
            position,
            rotation,
            scale,
        }
    }

    /// Position component.
    pub fn position(&self) -> Vec3 {
        self.position
    }

    /// Rotation component.
    pub fn rotation(&self) -> Quat {
        self.rotation
    }

    /// Scale component.
    pub fn scale(&self) -> Vec3 {
        self.scale
    }

    /// Replaces the position.
    pub fn set_position(&mut self, position: Vec3) {
        self.position = position;
    }

    /// Replaces the rotation.
    pub fn set_rotation(&mut self, rotation: Quat) {
        self.rotation = rotation;
    }

    /// Replaces the scale.
    pub fn set_scale(&mut self, scale: Vec3) {
        self.scale = scale;
    }

    /// Maps a local-space direction into world space: `rotate(scale ⊙ v)`.
    ///
    /// Translation is ignored.
    pub fn transform_vector(&self, v: &Vec3) -> Vec3 {
        self.rotation.rotate(&self.scale.mul_elements(v))
    }

    /// Maps a world-space direction into local space: `rotate⁻¹(v) ⊘ scale`.
    ///
    /// Axes whose scale is within `f32::EPSILON` of zero map to zero.
    pub fn inverse_transform_vector(&self, v: &Vec3) -> Vec3 {
        let local = self.rotation.inverse().rotate(v);
        let div = |value: f32, s: f32| if s.abs() <= f32::EPSILON { 0.0 } else { value / s };
        Vec3::new(
            div(local.x(), self.scale.x()),
            div(local.y(), self.scale.y()),
            div(local.z(), self.scale.z()),
        )
    }
}

impl Default for ObjectTransform {
    fn default() -> Self {
        Self::identity()
    }
}

/// Write target for solver output.
///
/// A grab session holds exclusive access to its sink for the session's
/// duration; no other mutator may touch the same transform between ticks.
pub trait TransformSink {
    /// Current transform of the owned object.
    fn transform(&self) -> ObjectTransform;
    /// Overwrites the owned object's transform.
    fn set_transform(&mut self, transform: ObjectTransform);
}

impl TransformSink for ObjectTransform {
    fn transform(&self) -> ObjectTransform {
        *self
    }

    fn set_transform(&mut self, transform: ObjectTransform) {
        *self = transform;
    }
}
