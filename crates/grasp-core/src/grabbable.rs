// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Drives a transformer from the raw per-tick grab-point list.
//!
//! Hosts that only know "which points are grabbing right now" can feed that
//! list here every tick; the driver turns count transitions into begin,
//! update, and end calls on the owned transformer.

use tracing::debug;

use crate::error::GrabError;
use crate::pose::GrabPoseSource;
use crate::transform::TransformSink;
use crate::transformer::Transformer;

/// What a call to [`Grabbable::process`] did.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum GrabPhase {
    /// No points before or after; nothing happened.
    Idle,
    /// First point(s) arrived; a session began.
    Began,
    /// An existing session advanced by one tick.
    Updated,
    /// The point count changed; the old session ended and a new one began.
    Regrabbed,
    /// The last point released; the session ended.
    Released,
}

/// An object owning its transform and the transformer that moves it.
pub struct Grabbable<T, S> {
    transformer: T,
    target: S,
    point_count: usize,
}

impl<T, S> Grabbable<T, S>
where
    T: Transformer,
    S: TransformSink,
{
    /// Wraps `target` so that `transformer` can move it.
    pub fn new(transformer: T, target: S) -> Self {
        Self {
            transformer,
            target,
            point_count: 0,
        }
    }

    /// Advances one tick with the points grabbing this object right now.
    ///
    /// A change in point count restarts the session rather than feeding a
    /// different number of points into an existing one.
    pub fn process<P>(&mut self, source: &P) -> Result<GrabPhase, GrabError>
    where
        P: GrabPoseSource + ?Sized,
    {
        let points = source.grab_points();
        let before = self.point_count;
        let now = points.len();

        let phase = match (before, now) {
            (0, 0) => GrabPhase::Idle,
            (_, 0) => {
                self.transformer.end_transform()?;
                GrabPhase::Released
            }
            (0, _) => {
                self.transformer.begin_transform(points, &mut self.target)?;
                GrabPhase::Began
            }
            _ if before != now => {
                debug!(before, now, "grab point count changed; restarting session");
                self.point_count = 0;
                self.transformer.end_transform()?;
                self.transformer.begin_transform(points, &mut self.target)?;
                GrabPhase::Regrabbed
            }
            _ => {
                self.transformer.update_transform(points, &mut self.target)?;
                GrabPhase::Updated
            }
        };
        self.point_count = now;
        Ok(phase)
    }

    /// The owned transform sink.
    pub fn target(&self) -> &S {
        &self.target
    }

    /// The owned transformer.
    pub fn transformer(&self) -> &T {
        &self.transformer
    }

    /// Number of points seen on the last tick.
    pub fn point_count(&self) -> usize {
        self.point_count
    }

    /// Releases the transform sink, ending any session in progress.
    pub fn into_target(mut self) -> Result<S, GrabError> {
        if self.transformer.is_active() {
            self.transformer.end_transform()?;
        }
        Ok(self.target)
    }
}
