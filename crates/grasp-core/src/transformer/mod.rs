// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Transformers turn a stream of grab poses into object transform updates.
//!
//! The host drives every transformer through the same three calls: begin when
//! the first grab point becomes active, update once per tick while any point
//! is active, end when the last point releases.

mod follow;
mod free;

pub use follow::FollowTransformer;
pub use free::FreeTransformer;

use crate::error::GrabError;
use crate::pose::Pose;
use crate::transform::TransformSink;

/// Grab-driven transform solver.
pub trait Transformer {
    /// Captures session state from the current poses and object transform.
    fn begin_transform(
        &mut self,
        points: &[Pose],
        target: &mut dyn TransformSink,
    ) -> Result<(), GrabError>;

    /// Applies one tick of motion to the target.
    fn update_transform(
        &mut self,
        points: &[Pose],
        target: &mut dyn TransformSink,
    ) -> Result<(), GrabError>;

    /// Releases session state.
    fn end_transform(&mut self) -> Result<(), GrabError>;

    /// Whether a session is in progress.
    fn is_active(&self) -> bool;
}

impl<T: Transformer + ?Sized> Transformer for Box<T> {
    fn begin_transform(
        &mut self,
        points: &[Pose],
        target: &mut dyn TransformSink,
    ) -> Result<(), GrabError> {
        (**self).begin_transform(points, target)
    }

    fn update_transform(
        &mut self,
        points: &[Pose],
        target: &mut dyn TransformSink,
    ) -> Result<(), GrabError> {
        (**self).update_transform(points, target)
    }

    fn end_transform(&mut self) -> Result<(), GrabError> {
        (**self).end_transform()
    }

    fn is_active(&self) -> bool {
        (**self).is_active()
    }
}
