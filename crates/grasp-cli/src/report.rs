// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Rendering replay results for humans (table) and tools (JSON lines).

use anyhow::Result;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{ContentArrangement, Table};
use serde::Serialize;

use crate::trace::{phase_label, ReplayStep};

#[derive(Serialize)]
struct StepLine<'a> {
    frame: usize,
    phase: &'a str,
    points: usize,
    position: [f32; 3],
    rotation: [f32; 4],
    euler_degrees: [f32; 3],
    scale: [f32; 3],
}

impl<'a> From<&'a ReplayStep> for StepLine<'a> {
    fn from(step: &'a ReplayStep) -> Self {
        let t = step.transform;
        Self {
            frame: step.frame,
            phase: phase_label(step.phase),
            points: step.points,
            position: t.position().to_array(),
            rotation: t.rotation().to_array(),
            euler_degrees: t.rotation().to_euler_degrees().to_array(),
            scale: t.scale().to_array(),
        }
    }
}

fn fmt3(v: [f32; 3]) -> String {
    format!("{:.4}, {:.4}, {:.4}", v[0], v[1], v[2])
}

/// One row per frame: phase, point count, position, Euler rotation, scale.
pub fn render_table(steps: &[ReplayStep]) -> String {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec![
            "frame",
            "phase",
            "points",
            "position",
            "rotation (euler °)",
            "scale",
        ]);
    for step in steps {
        let line = StepLine::from(step);
        table.add_row(vec![
            line.frame.to_string(),
            line.phase.to_owned(),
            line.points.to_string(),
            fmt3(line.position),
            fmt3(line.euler_degrees),
            fmt3(line.scale),
        ]);
    }
    table.to_string()
}

/// One JSON object per line, newline-terminated.
pub fn render_jsonl(steps: &[ReplayStep]) -> Result<String> {
    let mut out = String::new();
    for step in steps {
        out.push_str(&serde_json::to_string(&StepLine::from(step))?);
        out.push('\n');
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use grasp_core::{GrabPhase, ObjectTransform};

    fn step(frame: usize, phase: GrabPhase) -> ReplayStep {
        ReplayStep {
            frame,
            phase,
            points: 2,
            transform: ObjectTransform::identity(),
        }
    }

    #[test]
    fn jsonl_emits_one_object_per_step() {
        let out = render_jsonl(&[step(0, GrabPhase::Began), step(1, GrabPhase::Updated)]).unwrap();
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines.len(), 2);
        let v: serde_json::Value = serde_json::from_str(lines[1]).unwrap();
        assert_eq!(v["phase"], "updated");
        assert_eq!(v["scale"][2], 1.0);
    }

    #[test]
    fn table_has_header_and_rows() {
        let out = render_table(&[step(0, GrabPhase::Began)]);
        assert!(out.contains("phase"));
        assert!(out.contains("began"));
        assert!(out.contains("1.0000, 1.0000, 1.0000"));
    }
}
