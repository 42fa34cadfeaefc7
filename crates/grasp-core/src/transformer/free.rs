// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
use tracing::{debug, trace};

use crate::config::{ScalingMode, TransformerConfig};
use crate::delta::update_point_data;
use crate::error::GrabError;
use crate::pose::Pose;
use crate::rotation::update_rotation;
use crate::scale::{compute_two_axis_mask, update_scale, update_scale_per_axis};
use crate::session::GrabSession;
use crate::transform::TransformSink;

use super::Transformer;

/// Free-form multi-point grab: translate, rotate, and scale from any number
/// of simultaneous grab points.
///
/// Per tick, in order: point deltas, scale (only with two or more points),
/// scale limits, rotation (frozen while scaling when configured), rotation
/// limits, then position from the centroid and the captured grab offset
/// using the rotation and scale just written.
#[derive(Debug, Clone, Default)]
pub struct FreeTransformer {
    config: TransformerConfig,
    session: Option<GrabSession>,
}

impl FreeTransformer {
    /// Creates an idle transformer.
    pub fn new(config: TransformerConfig) -> Self {
        Self {
            config,
            session: None,
        }
    }

    /// Active configuration.
    pub fn config(&self) -> &TransformerConfig {
        &self.config
    }

    /// Session in progress, if any.
    pub fn session(&self) -> Option<&GrabSession> {
        self.session.as_ref()
    }
}

impl Transformer for FreeTransformer {
    fn begin_transform(
        &mut self,
        points: &[Pose],
        target: &mut dyn TransformSink,
    ) -> Result<(), GrabError> {
        let start = target.transform();
        let session = GrabSession::begin(points, &start, &self.config)?;
        debug!(
            points = points.len(),
            position = ?start.position(),
            scale = ?start.scale(),
            "grab session started"
        );
        self.session = Some(session);
        Ok(())
    }

    fn update_transform(
        &mut self,
        points: &[Pose],
        target: &mut dyn TransformSink,
    ) -> Result<(), GrabError> {
        let config = &self.config;
        let session = self.session.as_mut().ok_or(GrabError::NoActiveSession)?;
        session.check_point_count(points)?;

        let count = points.len();
        let mut transform = target.transform();
        let centroid = update_point_data(points, &mut session.deltas);

        // Scale
        if count <= 1 {
            session.accumulated_scale = transform.scale();
        } else {
            match config.scaling_mode {
                ScalingMode::Uniform => {
                    let factor = update_scale(&session.deltas);
                    session.accumulated_scale = session.accumulated_scale.scale(factor);
                }
                ScalingMode::PerAxis => {
                    let object_rotation = transform.rotation();
                    let mut factors = update_scale_per_axis(&session.deltas, &object_rotation);
                    if config.limit_scaling_to_two_axes {
                        factors = compute_two_axis_mask(points, &object_rotation).apply(factors);
                    }
                    session.accumulated_scale = factors.mul_elements(&session.accumulated_scale);
                }
            }
        }
        transform.set_scale(session.constraints.scale(&session.accumulated_scale));
        if config.reset_scale_responsiveness_on_constraint_overshoot {
            session.accumulated_scale = transform.scale();
        }

        // Rotation
        if !(count > 1 && config.lock_rotation_while_scaling) {
            session.accumulated_rotation =
                update_rotation(&session.deltas).multiply(&session.accumulated_rotation);
        }
        let rotation = session
            .accumulated_rotation
            .multiply(&session.grab_offset.rotation());
        transform.set_rotation(session.constraints.rotation(&rotation));

        // Position
        let position =
            centroid.sub(&transform.transform_vector(&session.grab_offset.position()));
        transform.set_position(session.constraints.position(&position));

        target.set_transform(transform);
        session.tick = session.tick.next();
        trace!(
            tick = session.tick.index(),
            ?centroid,
            scale = ?transform.scale(),
            "grab tick applied"
        );
        Ok(())
    }

    fn end_transform(&mut self) -> Result<(), GrabError> {
        let session = self.session.take().ok_or(GrabError::NoActiveSession)?;
        debug!(ticks = session.tick.index(), "grab session ended");
        Ok(())
    }

    fn is_active(&self) -> bool {
        self.session.is_some()
    }
}
