// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Host-provided transformer configuration, set once per transformer.

use crate::constraints::{
    AxisConstraints, PositionConstraints, RotationConstraints, ScaleConstraints,
};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// How two-or-more-point grabs turn hand spread into scale.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum ScalingMode {
    /// One factor from offset length ratios, applied to every axis.
    #[default]
    Uniform,
    /// Independent factors per axis of the object's current local frame.
    PerAxis,
}

/// Configuration for [`crate::FreeTransformer`].
///
/// The default mirrors a stock free-grab component: uniform scaling, no
/// toggles, unconstrained position and rotation, and scale pinned to its
/// start value (relative `[1, 1]` on every axis). Scaling stays disabled
/// until the scale limits are widened.
#[derive(Debug, Copy, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct TransformerConfig {
    /// Uniform or per-axis scaling.
    pub scaling_mode: ScalingMode,
    /// Freeze rotation while more than one point is grabbing.
    pub lock_rotation_while_scaling: bool,
    /// In per-axis mode, hold the axis least aligned with the grab at 1x.
    pub limit_scaling_to_two_axes: bool,
    /// Re-baseline accumulated scale to the clamped value every tick, so
    /// reversing after hitting a limit responds immediately.
    pub reset_scale_responsiveness_on_constraint_overshoot: bool,
    /// Position limits (metres).
    pub position_constraints: PositionConstraints,
    /// Rotation limits (Euler degrees).
    pub rotation_constraints: RotationConstraints,
    /// Scale limits (factors).
    pub scale_constraints: ScaleConstraints,
}

impl TransformerConfig {
    /// Config with every channel unconstrained, including scale.
    pub fn unconstrained() -> Self {
        Self {
            scale_constraints: AxisConstraints::unconstrained(),
            ..Self::default()
        }
    }

    /// Builder-style scaling mode override.
    pub fn with_scaling_mode(mut self, mode: ScalingMode) -> Self {
        self.scaling_mode = mode;
        self
    }

    /// Builder-style scale limits override.
    pub fn with_scale_constraints(mut self, constraints: ScaleConstraints) -> Self {
        self.scale_constraints = constraints;
        self
    }

    /// Builder-style position limits override.
    pub fn with_position_constraints(mut self, constraints: PositionConstraints) -> Self {
        self.position_constraints = constraints;
        self
    }

    /// Builder-style rotation limits override.
    pub fn with_rotation_constraints(mut self, constraints: RotationConstraints) -> Self {
        self.rotation_constraints = constraints;
        self
    }
}

impl Default for TransformerConfig {
    fn default() -> Self {
        Self {
            scaling_mode: ScalingMode::Uniform,
            lock_rotation_while_scaling: false,
            limit_scaling_to_two_axes: false,
            reset_scale_responsiveness_on_constraint_overshoot: false,
            position_constraints: AxisConstraints::unconstrained(),
            rotation_constraints: AxisConstraints::unconstrained(),
            scale_constraints: AxisConstraints::uniform(true, 1.0, 1.0),
        }
    }
}
