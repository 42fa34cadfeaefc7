// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Combines per-point orientation deltas into one incremental rotation.

use crate::delta::GrabPointDelta;
use crate::math::Quat;

/// Incremental rotation for this tick, to be premultiplied onto the
/// accumulated rotation.
///
/// Each point contributes, with weight `1 / count`:
/// 1. the arc taking its previous offset direction to its current one
///    (hands revolving about the centroid), when its offset is usable;
/// 2. its own orientation delta. For points with a usable offset the delta
///    is re-expressed about the aiming direction, with the angle scaled by
///    how well the delta's axis aligns with it, so twist about other axes
///    is dropped.
///
/// Contributions are composed one after another in slice order. This is not
/// a simultaneous average; reordering the points changes the result.
#[allow(clippy::cast_precision_loss)]
pub fn update_rotation(deltas: &[GrabPointDelta]) -> Quat {
    let mut combined = Quat::identity();
    if deltas.is_empty() {
        return combined;
    }

    let fraction = 1.0 / deltas.len() as f32;
    for data in deltas {
        let mut rot_delta = data.rotation().multiply(&data.previous_rotation().inverse());

        if data.is_valid_axis() {
            let aiming_axis = data.centroid_offset().normalize();
            let dir_delta = Quat::from_to_rotation(
                data.previous_centroid_offset().normalize(),
                aiming_axis,
            );
            combined = Quat::identity()
                .slerp(&dir_delta, fraction)
                .multiply(&combined);

            let (angle, axis) = rot_delta.to_axis_angle();
            let projection = axis.dot(&aiming_axis);
            rot_delta = Quat::from_axis_angle(aiming_axis, angle * projection);
        }

        combined = Quat::identity()
            .slerp(&rot_delta, fraction)
            .multiply(&combined);
    }

    combined
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::Vec3;

    fn angle_of(q: Quat) -> f32 {
        let (angle, _) = q.to_axis_angle();
        angle.min(core::f32::consts::TAU - angle)
    }

    #[test]
    fn empty_input_is_identity() {
        assert_eq!(update_rotation(&[]), Quat::identity());
    }

    #[test]
    fn twist_about_offset_direction_is_kept() {
        let twist = Quat::from_axis_angle(Vec3::UNIT_X, 0.2);
        let mut delta = GrabPointDelta::new(Vec3::UNIT_X, Quat::identity());
        delta.update_data(Vec3::UNIT_X, twist);
        let q = update_rotation(&[delta]);
        assert!((angle_of(q) - 0.2).abs() < 1e-4);
    }

    #[test]
    fn twist_orthogonal_to_offset_is_dropped() {
        let roll = Quat::from_axis_angle(Vec3::UNIT_Y, 0.3);
        let mut delta = GrabPointDelta::new(Vec3::UNIT_X, Quat::identity());
        delta.update_data(Vec3::UNIT_X, roll);
        let q = update_rotation(&[delta]);
        assert!(angle_of(q) < 1e-3);
    }

    #[test]
    fn degenerate_offset_keeps_full_own_delta() {
        let spin = Quat::from_axis_angle(Vec3::UNIT_Y, 0.3);
        let mut delta = GrabPointDelta::new(Vec3::ZERO, Quat::identity());
        delta.update_data(Vec3::ZERO, spin);
        let q = update_rotation(&[delta]);
        assert!((angle_of(q) - 0.3).abs() < 1e-4);
    }
}
