// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Tolerance assertions.

use grasp_core::math::{Quat, Vec3};

/// Asserts `|actual - expected| <= eps`.
#[track_caller]
pub fn assert_near(actual: f32, expected: f32, eps: f32) {
    let diff = (actual - expected).abs();
    assert!(
        diff <= eps,
        "expected {expected}, got {actual} (diff {diff}, eps {eps})"
    );
}

/// Component-wise [`assert_near`].
#[track_caller]
pub fn assert_vec3_near(actual: Vec3, expected: Vec3, eps: f32) {
    let (a, e) = (actual.to_array(), expected.to_array());
    for i in 0..3 {
        let diff = (a[i] - e[i]).abs();
        assert!(
            diff <= eps,
            "axis {i}: expected {e:?}, got {a:?} (diff {diff}, eps {eps})"
        );
    }
}

/// Asserts two rotations are equal up to sign (`q` and `-q` are the same rotation).
#[track_caller]
pub fn assert_quat_near(actual: Quat, expected: Quat, eps: f32) {
    let dot = actual.dot(&expected).abs();
    assert!(
        (1.0 - dot) <= eps,
        "expected {expected:?}, got {actual:?} (|dot| {dot}, eps {eps})"
    );
}
