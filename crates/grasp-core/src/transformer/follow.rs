// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
use tracing::debug;

use crate::constraints::{AxisConstraints, PositionConstraints};
use crate::error::GrabError;
use crate::math::Vec3;
use crate::pose::Pose;
use crate::transform::TransformSink;

use super::Transformer;

/// Translate-only grab that follows the first grab point.
///
/// The object keeps the offset it had from the first point at begin;
/// rotation and scale are never touched. Additional points are ignored.
#[derive(Debug, Clone, Default)]
pub struct FollowTransformer {
    position_constraints: PositionConstraints,
    session: Option<FollowSession>,
}

#[derive(Debug, Clone, Copy)]
struct FollowSession {
    offset: Vec3,
    limits: AxisConstraints,
}

impl FollowTransformer {
    /// Creates an idle transformer with the given position limits.
    pub fn new(position_constraints: PositionConstraints) -> Self {
        Self {
            position_constraints,
            session: None,
        }
    }

    /// Offset from the first grab point to the object, if a session is active.
    pub fn offset(&self) -> Option<Vec3> {
        self.session.map(|s| s.offset)
    }
}

impl Transformer for FollowTransformer {
    fn begin_transform(
        &mut self,
        points: &[Pose],
        target: &mut dyn TransformSink,
    ) -> Result<(), GrabError> {
        let first = points.first().ok_or(GrabError::NoGrabPoints)?;
        let start = target.transform();
        let offset = start.position().sub(&first.position());
        self.session = Some(FollowSession {
            offset,
            limits: self.position_constraints.resolve_offsets(&start.position()),
        });
        debug!(?offset, "follow grab started");
        Ok(())
    }

    fn update_transform(
        &mut self,
        points: &[Pose],
        target: &mut dyn TransformSink,
    ) -> Result<(), GrabError> {
        let session = self.session.ok_or(GrabError::NoActiveSession)?;
        let first = points.first().ok_or(GrabError::NoGrabPoints)?;
        let mut transform = target.transform();
        let proposed = first.position().add(&session.offset);
        transform.set_position(session.limits.clamp_vec(&proposed));
        target.set_transform(transform);
        Ok(())
    }

    fn end_transform(&mut self) -> Result<(), GrabError> {
        self.session.take().ok_or(GrabError::NoActiveSession)?;
        debug!("follow grab ended");
        Ok(())
    }

    fn is_active(&self) -> bool {
        self.session.is_some()
    }
}
