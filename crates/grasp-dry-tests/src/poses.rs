// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Grab pose builders.
//!
//! Each builder returns a fresh `Vec<Pose>` so tests can chain them frame by
//! frame: `translated(&stretched(&hands, c, k), d)`.

use grasp_core::math::{deg_to_rad, Quat, Vec3};
use grasp_core::Pose;

/// Identity-oriented poses at the given positions.
pub fn hands_at(positions: &[[f32; 3]]) -> Vec<Pose> {
    positions
        .iter()
        .map(|p| Pose::from_position(Vec3::from(*p)))
        .collect()
}

/// Two identity-oriented hands at `center - half` and `center + half`.
pub fn hand_pair(center: Vec3, half: Vec3) -> Vec<Pose> {
    vec![
        Pose::from_position(center.sub(&half)),
        Pose::from_position(center.add(&half)),
    ]
}

/// Every pose moved by `delta`; orientations unchanged.
pub fn translated(poses: &[Pose], delta: Vec3) -> Vec<Pose> {
    poses
        .iter()
        .map(|p| Pose::new(p.position().add(&delta), p.rotation()))
        .collect()
}

/// Positions scaled per axis about `about`; orientations unchanged.
pub fn stretched(poses: &[Pose], about: Vec3, factors: Vec3) -> Vec<Pose> {
    poses
        .iter()
        .map(|p| {
            let local = p.position().sub(&about).mul_elements(&factors);
            Pose::new(about.add(&local), p.rotation())
        })
        .collect()
}

/// Poses revolved `degrees` about the world Y axis through `about`.
///
/// Orientations turn with the positions, as a hand carried around a circle would.
pub fn orbited_y(poses: &[Pose], about: Vec3, degrees: f32) -> Vec<Pose> {
    let turn = Quat::from_axis_angle(Vec3::UNIT_Y, deg_to_rad(degrees));
    poses
        .iter()
        .map(|p| {
            let local = turn.rotate(&p.position().sub(&about));
            Pose::new(about.add(&local), turn.multiply(&p.rotation()))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::approx::assert_vec3_near;

    #[test]
    fn orbit_quarter_turn_moves_x_to_minus_z() {
        let hands = hands_at(&[[1.0, 0.0, 0.0]]);
        let moved = orbited_y(&hands, Vec3::ZERO, 90.0);
        assert_vec3_near(moved[0].position(), Vec3::new(0.0, 0.0, -1.0), 1e-6);
    }

    #[test]
    fn stretch_is_about_the_given_point() {
        let hands = hand_pair(Vec3::new(1.0, 0.0, 0.0), Vec3::UNIT_X);
        let wide = stretched(&hands, Vec3::new(1.0, 0.0, 0.0), Vec3::new(2.0, 1.0, 1.0));
        assert_vec3_near(wide[0].position(), Vec3::new(-1.0, 0.0, 0.0), 1e-6);
        assert_vec3_near(wide[1].position(), Vec3::new(3.0, 0.0, 0.0), 1e-6);
    }
}
