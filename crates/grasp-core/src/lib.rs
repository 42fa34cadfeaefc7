// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! grasp-core: deterministic multi-point grab solver.
//!
//! Any number of simultaneous grab points (hands, controllers, pointers)
//! drive an object's position, rotation, and optionally non-uniform scale.
//! The host owns the object transform and the poses; this crate owns the
//! per-grab session state and the per-tick solve.
//!
//! Everything here is synchronous and single-threaded. Given the same start
//! transform, configuration, and pose stream, the output sequence is
//! identical across runs.
#![forbid(unsafe_code)]

pub mod math;

mod config;
mod constraints;
mod delta;
mod error;
mod grabbable;
mod pose;
mod rotation;
mod scale;
mod session;
mod tick;
mod transform;
mod transformer;

pub use config::{ScalingMode, TransformerConfig};
pub use constraints::{
    AxisConstraint, AxisConstraints, ConstraintApplier, FloatRange, PositionConstraints,
    RotationConstraints, ScaleConstraints,
};
pub use delta::{
    centroid, centroid_offset, initialize_deltas, update_point_data, GrabPointDelta,
    AXIS_EPSILON,
};
pub use error::GrabError;
pub use grabbable::{GrabPhase, Grabbable};
pub use pose::{GrabPoseSource, Pose};
pub use rotation::update_rotation;
pub use scale::{
    compute_two_axis_mask, drop_axis, safe_axis_ratio, update_scale, update_scale_per_axis,
    AxisMask, AXIS_RATIO_EPSILON, MAX_AXIS_RATIO, MIN_AXIS_RATIO,
};
pub use session::GrabSession;
pub use tick::Tick;
pub use transform::{ObjectTransform, TransformSink};
pub use transformer::{FollowTransformer, FreeTransformer, Transformer};
