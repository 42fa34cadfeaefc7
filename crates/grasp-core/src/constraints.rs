// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Per-axis position, rotation, and scale limits.
//!
//! Limits are either absolute or relative to the transform captured when a
//! grab session begins. Out-of-range values are clamped silently; a grab is a
//! continuous physical interaction and never fails because of a limit.

use crate::math::{wrap_degrees, Quat, Vec3};
use crate::transform::ObjectTransform;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Inclusive `[min, max]` range.
#[derive(Debug, Copy, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct FloatRange {
    /// Lower bound.
    pub min: f32,
    /// Upper bound.
    pub max: f32,
}

impl FloatRange {
    /// Creates a range from bounds.
    pub const fn new(min: f32, max: f32) -> Self {
        Self { min, max }
    }

    /// Clamps `value` into the range.
    ///
    /// The lower bound is checked first, so an inverted range (`min > max`)
    /// resolves to `min` for values below it and `max` otherwise.
    pub fn clamp(&self, value: f32) -> f32 {
        if value < self.min {
            self.min
        } else if value > self.max {
            self.max
        } else {
            value
        }
    }
}

impl Default for FloatRange {
    fn default() -> Self {
        Self::new(0.0, 0.0)
    }
}

/// Limit on a single axis.
#[derive(Debug, Copy, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct AxisConstraint {
    /// Whether the range is enforced.
    pub constrain_axis: bool,
    /// Allowed range when enforced.
    pub axis_range: FloatRange,
}

impl AxisConstraint {
    /// Unconstrained axis.
    pub const fn free() -> Self {
        Self {
            constrain_axis: false,
            axis_range: FloatRange::new(0.0, 0.0),
        }
    }

    /// Axis constrained to `[min, max]`.
    pub const fn range(min: f32, max: f32) -> Self {
        Self {
            constrain_axis: true,
            axis_range: FloatRange::new(min, max),
        }
    }

    /// Clamps `value` when the axis is constrained.
    pub fn apply(&self, value: f32) -> f32 {
        if self.constrain_axis {
            self.axis_range.clamp(value)
        } else {
            value
        }
    }
}

/// Limits for the three axes of one transform channel.
///
/// Units depend on the channel: metres for position, degrees (Euler, Z→X→Y
/// application order) for rotation, scale factors for scale.
#[derive(Debug, Copy, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct AxisConstraints {
    /// Ranges are offsets (position, rotation) or factors (scale) of the
    /// value captured at session start.
    pub constraints_are_relative: bool,
    /// X axis limit.
    pub x_axis: AxisConstraint,
    /// Y axis limit.
    pub y_axis: AxisConstraint,
    /// Z axis limit.
    pub z_axis: AxisConstraint,
}

/// Position limits in metres.
pub type PositionConstraints = AxisConstraints;
/// Rotation limits in Euler degrees.
pub type RotationConstraints = AxisConstraints;
/// Scale limits as factors.
pub type ScaleConstraints = AxisConstraints;

impl AxisConstraints {
    /// No axis constrained.
    pub const fn unconstrained() -> Self {
        Self {
            constraints_are_relative: false,
            x_axis: AxisConstraint::free(),
            y_axis: AxisConstraint::free(),
            z_axis: AxisConstraint::free(),
        }
    }

    /// Same range on every axis.
    pub const fn uniform(relative: bool, min: f32, max: f32) -> Self {
        Self {
            constraints_are_relative: relative,
            x_axis: AxisConstraint::range(min, max),
            y_axis: AxisConstraint::range(min, max),
            z_axis: AxisConstraint::range(min, max),
        }
    }

    /// Limit for axis `idx` (`0 = x`, `1 = y`, `2 = z`; larger indices map to z).
    pub fn axis(&self, idx: usize) -> &AxisConstraint {
        match idx {
            0 => &self.x_axis,
            1 => &self.y_axis,
            _ => &self.z_axis,
        }
    }

    fn axis_mut(&mut self, idx: usize) -> &mut AxisConstraint {
        match idx {
            0 => &mut self.x_axis,
            1 => &mut self.y_axis,
            _ => &mut self.z_axis,
        }
    }

    /// Whether any axis is enforced.
    pub fn any_constrained(&self) -> bool {
        (0..3).any(|i| self.axis(i).constrain_axis)
    }

    /// Absolute limits for relative offsets around `start`.
    ///
    /// Absolute constraints are returned unchanged.
    pub fn resolve_offsets(&self, start: &Vec3) -> Self {
        if !self.constraints_are_relative {
            return *self;
        }
        let mut out = *self;
        out.constraints_are_relative = false;
        for i in 0..3 {
            let axis = out.axis_mut(i);
            let s = start.axis(i);
            axis.axis_range = FloatRange::new(axis.axis_range.min + s, axis.axis_range.max + s);
        }
        out
    }

    /// Absolute limits for relative factors of `start`.
    ///
    /// A negative start component flips the bounds so that `min ≤ max` still
    /// holds. Absolute constraints are returned unchanged.
    pub fn resolve_factors(&self, start: &Vec3) -> Self {
        if !self.constraints_are_relative {
            return *self;
        }
        let mut out = *self;
        out.constraints_are_relative = false;
        for i in 0..3 {
            let axis = out.axis_mut(i);
            let s = start.axis(i);
            let a = axis.axis_range.min * s;
            let b = axis.axis_range.max * s;
            axis.axis_range = FloatRange::new(a.min(b), a.max(b));
        }
        out
    }

    /// Clamps each component of `value` against its axis limit.
    pub fn clamp_vec(&self, value: &Vec3) -> Vec3 {
        Vec3::new(
            self.x_axis.apply(value.x()),
            self.y_axis.apply(value.y()),
            self.z_axis.apply(value.z()),
        )
    }
}

/// Constraint set resolved against the transform at session start.
///
/// Built once per session; every tick passes proposed values through it.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct ConstraintApplier {
    position: AxisConstraints,
    rotation: AxisConstraints,
    rotation_reference: Vec3,
    scale: AxisConstraints,
}

impl ConstraintApplier {
    /// Resolves relative limits against `start`.
    pub fn resolve(
        position: &PositionConstraints,
        rotation: &RotationConstraints,
        scale: &ScaleConstraints,
        start: &ObjectTransform,
    ) -> Self {
        let rotation_reference = if rotation.constraints_are_relative {
            start.rotation().to_euler_degrees()
        } else {
            Vec3::ZERO
        };
        Self {
            position: position.resolve_offsets(&start.position()),
            rotation: *rotation,
            rotation_reference,
            scale: scale.resolve_factors(&start.scale()),
        }
    }

    /// Applier that leaves every value untouched.
    pub const fn unconstrained() -> Self {
        Self {
            position: AxisConstraints::unconstrained(),
            rotation: AxisConstraints::unconstrained(),
            rotation_reference: Vec3::ZERO,
            scale: AxisConstraints::unconstrained(),
        }
    }

    /// Resolved (absolute) position limits.
    pub fn position_limits(&self) -> &AxisConstraints {
        &self.position
    }

    /// Resolved (absolute) scale limits.
    pub fn scale_limits(&self) -> &AxisConstraints {
        &self.scale
    }

    /// Clamps a proposed position.
    pub fn position(&self, proposed: &Vec3) -> Vec3 {
        self.position.clamp_vec(proposed)
    }

    /// Clamps a proposed scale.
    pub fn scale(&self, proposed: &Vec3) -> Vec3 {
        self.scale.clamp_vec(proposed)
    }

    /// Clamps a proposed rotation per Euler axis.
    ///
    /// Each constrained angle is measured as a signed offset in
    /// `(-180, 180]` from its reference (zero, or the start angle for
    /// relative limits), clamped, and the rotation rebuilt. With no axis
    /// constrained the rotation is returned untouched.
    pub fn rotation(&self, proposed: &Quat) -> Quat {
        if !self.rotation.any_constrained() {
            return *proposed;
        }
        let euler = proposed.to_euler_degrees();
        let mut clamped = euler;
        for i in 0..3 {
            let limit = self.rotation.axis(i);
            if !limit.constrain_axis {
                continue;
            }
            let reference = self.rotation_reference.axis(i);
            let offset = limit.apply(wrap_degrees(euler.axis(i) - reference));
            clamped = clamped.with_axis(i, reference + offset);
        }
        Quat::from_euler_degrees(clamped)
    }
}

impl Default for ConstraintApplier {
    fn default() -> Self {
        Self::unconstrained()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn relative_scale_limits_multiply_start() {
        let limits = AxisConstraints::uniform(true, 0.5, 2.0).resolve_factors(&Vec3::new(2.0, 1.0, 4.0));
        assert!(!limits.constraints_are_relative);
        assert_eq!(limits.x_axis.axis_range, FloatRange::new(1.0, 4.0));
        assert_eq!(limits.z_axis.axis_range, FloatRange::new(2.0, 8.0));
    }

    #[test]
    fn relative_position_limits_offset_start() {
        let limits = AxisConstraints::uniform(true, -1.0, 1.0).resolve_offsets(&Vec3::new(5.0, 0.0, 0.0));
        assert_eq!(limits.x_axis.axis_range, FloatRange::new(4.0, 6.0));
        assert_eq!(limits.y_axis.axis_range, FloatRange::new(-1.0, 1.0));
    }

    #[test]
    fn unconstrained_axes_pass_through() {
        let mut limits = AxisConstraints::unconstrained();
        limits.y_axis = AxisConstraint::range(0.0, 1.0);
        let out = limits.clamp_vec(&Vec3::new(-7.0, 3.0, 9.0));
        assert_eq!(out.to_array(), [-7.0, 1.0, 9.0]);
    }

    #[test]
    fn rotation_clamped_about_constrained_axis() {
        let mut rotation = AxisConstraints::unconstrained();
        rotation.y_axis = AxisConstraint::range(-30.0, 30.0);
        let applier = ConstraintApplier::resolve(
            &AxisConstraints::unconstrained(),
            &rotation,
            &AxisConstraints::unconstrained(),
            &ObjectTransform::identity(),
        );
        let proposed = Quat::from_euler_degrees(Vec3::new(0.0, 80.0, 0.0));
        let out = applier.rotation(&proposed).to_euler_degrees();
        assert!((out.y() - 30.0).abs() < 1e-3, "{out:?}");
    }

    #[test]
    fn relative_rotation_limits_follow_start_angle() {
        let mut rotation = AxisConstraints::unconstrained();
        rotation.constraints_are_relative = true;
        rotation.y_axis = AxisConstraint::range(-10.0, 10.0);
        let start = ObjectTransform::new(
            Vec3::ZERO,
            Quat::from_euler_degrees(Vec3::new(0.0, 170.0, 0.0)),
            Vec3::ONE,
        );
        let applier = ConstraintApplier::resolve(
            &AxisConstraints::unconstrained(),
            &rotation,
            &AxisConstraints::unconstrained(),
            &start,
        );
        // 200° is 30° past the start, across the 180° seam.
        let proposed = Quat::from_euler_degrees(Vec3::new(0.0, 200.0, 0.0));
        let out = applier.rotation(&proposed).to_euler_degrees();
        assert!((out.y() - 180.0).abs() < 1e-2, "{out:?}");
    }
}
