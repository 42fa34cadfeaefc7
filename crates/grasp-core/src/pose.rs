// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Grab poses and the capability the host implements to supply them.

use crate::math::{Quat, Vec3};

/// Position + orientation pair.
///
/// Used both for raw grab points (a hand or controller sampled this tick) and
/// for the fixed object-to-centroid offset captured when a session begins.
#[derive(Debug, Copy, Clone, PartialEq, Default)]
pub struct Pose {
    position: Vec3,
    rotation: Quat,
}

impl Pose {
    /// Creates a pose from components.
    pub const fn new(position: Vec3, rotation: Quat) -> Self {
        Self { position, rotation }
    }

    /// Pose at `position` with identity orientation.
    pub const fn from_position(position: Vec3) -> Self {
        Self::new(position, Quat::identity())
    }

    /// Position component.
    pub fn position(&self) -> Vec3 {
        self.position
    }

    /// Orientation component.
    pub fn rotation(&self) -> Quat {
        self.rotation
    }
}

/// Source of the grab poses active this tick.
///
/// Order must be stable for the lifetime of a session: index `i` always
/// refers to the same hand or controller.
pub trait GrabPoseSource {
    /// Current grab poses, one per active grab point.
    fn grab_points(&self) -> &[Pose];
}

impl GrabPoseSource for [Pose] {
    fn grab_points(&self) -> &[Pose] {
        self
    }
}

impl GrabPoseSource for Vec<Pose> {
    fn grab_points(&self) -> &[Pose] {
        self
    }
}
