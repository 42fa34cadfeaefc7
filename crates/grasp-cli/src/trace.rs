// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Recorded grab traces and their replay.
//!
//! A trace is a JSON document:
//!
//! ```json
//! {
//!   "initial": { "position": [0, 0, 1], "rotation": [0, 0, 0, 1], "scale": [1, 1, 1] },
//!   "frames": [
//!     [ { "position": [-1, 0, 0] }, { "position": [1, 0, 0] } ],
//!     [ { "position": [-2, 0, 0], "rotation": [0, 0, 0, 1] }, { "position": [2, 0, 0] } ],
//!     []
//!   ]
//! }
//! ```
//!
//! Each frame lists the grab points active on that tick, in a stable order.
//! An empty frame releases the grab. Omitted rotations are identity and an
//! omitted `initial` is the identity transform.

use anyhow::{bail, Context, Result};
use grasp_core::math::{Quat, Vec3};
use grasp_core::{GrabPhase, Grabbable, ObjectTransform, Pose, Transformer};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

/// Object transform as stored in a trace.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TransformRecord {
    /// World position.
    pub position: [f32; 3],
    /// Orientation quaternion `(x, y, z, w)`.
    pub rotation: [f32; 4],
    /// Local scale.
    pub scale: [f32; 3],
}

impl Default for TransformRecord {
    fn default() -> Self {
        Self::from(ObjectTransform::identity())
    }
}

impl From<ObjectTransform> for TransformRecord {
    fn from(t: ObjectTransform) -> Self {
        Self {
            position: t.position().to_array(),
            rotation: t.rotation().to_array(),
            scale: t.scale().to_array(),
        }
    }
}

/// One grab point sample.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PoseRecord {
    /// World position.
    pub position: [f32; 3],
    /// Orientation quaternion `(x, y, z, w)`; identity when omitted.
    #[serde(default = "identity_rotation")]
    pub rotation: [f32; 4],
}

fn identity_rotation() -> [f32; 4] {
    Quat::identity().to_array()
}

/// Full trace document.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct GrabTrace {
    /// Object transform before the first frame.
    #[serde(default)]
    pub initial: TransformRecord,
    /// Grab points per tick.
    pub frames: Vec<Vec<PoseRecord>>,
}

impl GrabTrace {
    /// Reads and validates a trace file.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read trace {}", path.display()))?;
        let trace: Self = serde_json::from_str(&text)
            .with_context(|| format!("failed to parse trace {}", path.display()))?;
        trace.validate()?;
        Ok(trace)
    }

    /// Rejects zero-length rotations, which have no orientation to normalize to.
    pub fn validate(&self) -> Result<()> {
        let initial = Quat::from(self.initial.rotation);
        if initial.dot(&initial) <= f32::EPSILON {
            bail!("initial rotation has zero length");
        }
        for (frame, points) in self.frames.iter().enumerate() {
            for (point, record) in points.iter().enumerate() {
                let q = Quat::from(record.rotation);
                if q.dot(&q) <= f32::EPSILON {
                    bail!("frame {frame} point {point}: rotation has zero length");
                }
            }
        }
        Ok(())
    }

    /// Starting object transform, with the rotation normalized.
    pub fn initial_transform(&self) -> ObjectTransform {
        ObjectTransform::new(
            Vec3::from(self.initial.position),
            Quat::from(self.initial.rotation).normalize(),
            Vec3::from(self.initial.scale),
        )
    }

    /// Poses for frame `idx`, rotations normalized.
    pub fn frame_poses(&self, idx: usize) -> Vec<Pose> {
        self.frames.get(idx).map_or_else(Vec::new, |points| {
            points
                .iter()
                .map(|r| Pose::new(Vec3::from(r.position), Quat::from(r.rotation).normalize()))
                .collect()
        })
    }
}

/// Object transform after one replayed frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReplayStep {
    /// Frame index in the trace.
    pub frame: usize,
    /// What the driver did on this frame.
    pub phase: GrabPhase,
    /// Number of grab points in the frame.
    pub points: usize,
    /// Object transform after the frame.
    pub transform: ObjectTransform,
}

/// Replays every frame of `trace` through `transformer`.
pub fn replay<T: Transformer>(trace: &GrabTrace, transformer: T) -> Result<Vec<ReplayStep>> {
    let mut grabbable = Grabbable::new(transformer, trace.initial_transform());
    let mut steps = Vec::with_capacity(trace.frames.len());
    for frame in 0..trace.frames.len() {
        let poses = trace.frame_poses(frame);
        let phase = grabbable
            .process(&poses)
            .with_context(|| format!("frame {frame}"))?;
        steps.push(ReplayStep {
            frame,
            phase,
            points: poses.len(),
            transform: *grabbable.target(),
        });
    }
    grabbable.into_target().context("ending final grab")?;
    debug!(frames = steps.len(), "trace replayed");
    Ok(steps)
}

/// Lowercase label for a phase.
pub fn phase_label(phase: GrabPhase) -> &'static str {
    match phase {
        GrabPhase::Idle => "idle",
        GrabPhase::Began => "began",
        GrabPhase::Updated => "updated",
        GrabPhase::Regrabbed => "regrabbed",
        GrabPhase::Released => "released",
    }
}
