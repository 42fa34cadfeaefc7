// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Frame-list driver for transformer tests.

use grasp_core::{GrabError, Grabbable, ObjectTransform, Pose, Transformer};

/// Feeds `frames` through a [`Grabbable`] wrapping `transformer` and `start`,
/// returning the object transform after each frame.
///
/// An empty frame releases the grab; the next non-empty frame begins a new
/// one. The begin frame itself leaves the transform untouched.
pub fn replay_frames<T: Transformer>(
    transformer: T,
    start: ObjectTransform,
    frames: &[Vec<Pose>],
) -> Result<Vec<ObjectTransform>, GrabError> {
    let mut grabbable = Grabbable::new(transformer, start);
    let mut out = Vec::with_capacity(frames.len());
    for frame in frames {
        grabbable.process(frame)?;
        out.push(*grabbable.target());
    }
    Ok(out)
}
