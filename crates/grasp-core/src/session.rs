// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! State held for the duration of one grab.

use crate::config::TransformerConfig;
use crate::constraints::ConstraintApplier;
use crate::delta::{centroid, initialize_deltas, GrabPointDelta};
use crate::error::GrabError;
use crate::math::{Quat, Vec3};
use crate::pose::Pose;
use crate::tick::Tick;
use crate::transform::ObjectTransform;

/// Per-grab state: point deltas, accumulated rotation/scale, and the fixed
/// object-to-centroid offset captured at begin.
///
/// The offset is never recomputed from later centroids; that is what keeps
/// the object attached to the hands instead of re-centering as the centroid
/// drifts. Delta storage is sized once at begin and reused every tick.
#[derive(Debug, Clone, PartialEq)]
pub struct GrabSession {
    pub(crate) deltas: Vec<GrabPointDelta>,
    pub(crate) grab_offset: Pose,
    pub(crate) accumulated_rotation: Quat,
    pub(crate) accumulated_scale: Vec3,
    pub(crate) constraints: ConstraintApplier,
    pub(crate) tick: Tick,
}

impl GrabSession {
    /// Starts a session for `points` grabbing an object at `start`.
    pub fn begin(
        points: &[Pose],
        start: &ObjectTransform,
        config: &TransformerConfig,
    ) -> Result<Self, GrabError> {
        if points.is_empty() {
            return Err(GrabError::NoGrabPoints);
        }
        let c = centroid(points);
        let local_offset = start.inverse_transform_vector(&c.sub(&start.position()));
        Ok(Self {
            deltas: initialize_deltas(points),
            grab_offset: Pose::new(local_offset, start.rotation()),
            accumulated_rotation: Quat::identity(),
            accumulated_scale: start.scale(),
            constraints: ConstraintApplier::resolve(
                &config.position_constraints,
                &config.rotation_constraints,
                &config.scale_constraints,
                start,
            ),
            tick: Tick::default(),
        })
    }

    /// Number of grab points the session was started with.
    pub fn point_count(&self) -> usize {
        self.deltas.len()
    }

    /// Per-point deltas as of the last tick.
    pub fn deltas(&self) -> &[GrabPointDelta] {
        &self.deltas
    }

    /// Centroid in object-local space and object rotation, both captured at begin.
    pub fn grab_offset(&self) -> Pose {
        self.grab_offset
    }

    /// Rotation accumulated since begin.
    pub fn accumulated_rotation(&self) -> Quat {
        self.accumulated_rotation
    }

    /// Scale accumulated since begin (may exceed the visible, clamped scale).
    pub fn accumulated_scale(&self) -> Vec3 {
        self.accumulated_scale
    }

    /// Limits resolved against the start transform.
    pub fn constraints(&self) -> &ConstraintApplier {
        &self.constraints
    }

    /// Number of updates applied so far.
    pub fn tick(&self) -> Tick {
        self.tick
    }

    pub(crate) fn check_point_count(&self, points: &[Pose]) -> Result<(), GrabError> {
        if points.is_empty() {
            return Err(GrabError::NoGrabPoints);
        }
        if points.len() != self.deltas.len() {
            return Err(GrabError::PointCountChanged {
                expected: self.deltas.len(),
                actual: points.len(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn begin_rejects_empty_points() {
        let err = GrabSession::begin(&[], &ObjectTransform::identity(), &TransformerConfig::default());
        assert_eq!(err, Err(GrabError::NoGrabPoints));
    }

    #[test]
    fn grab_offset_is_in_object_local_space() {
        let start = ObjectTransform::new(Vec3::new(1.0, 0.0, 0.0), Quat::identity(), Vec3::splat(2.0));
        let points = [Pose::from_position(Vec3::new(3.0, 0.0, 0.0))];
        let session = GrabSession::begin(&points, &start, &TransformerConfig::default()).unwrap();
        assert_eq!(session.grab_offset().position().to_array(), [1.0, 0.0, 0.0]);
        assert_eq!(session.accumulated_scale(), Vec3::splat(2.0));
        assert_eq!(session.point_count(), 1);
    }

    #[test]
    fn count_change_is_reported() {
        let points = [Pose::default(), Pose::default()];
        let session =
            GrabSession::begin(&points, &ObjectTransform::identity(), &TransformerConfig::default())
                .unwrap();
        assert_eq!(
            session.check_point_count(&points[..1]),
            Err(GrabError::PointCountChanged {
                expected: 2,
                actual: 1
            })
        );
    }
}
