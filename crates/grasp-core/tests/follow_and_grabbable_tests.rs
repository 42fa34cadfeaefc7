// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>

#![allow(missing_docs)]
use grasp_core::math::{Quat, Vec3};
use grasp_core::{
    AxisConstraint, AxisConstraints, FollowTransformer, FreeTransformer, GrabError, GrabPhase,
    Grabbable, ObjectTransform, Pose, Transformer, TransformerConfig,
};
use grasp_dry_tests::{assert_vec3_near, hand_pair, hands_at, replay_frames, stretched, translated};

#[test]
fn follow_keeps_offset_from_first_point() {
    let start = ObjectTransform::new(Vec3::new(0.0, 0.0, 1.0), Quat::identity(), Vec3::splat(3.0));
    let hand = hands_at(&[[0.0, 0.0, 0.0]]);
    let frames = vec![hand.clone(), translated(&hand, Vec3::new(1.0, 0.0, 0.0))];
    let out = replay_frames(FollowTransformer::default(), start, &frames).unwrap();
    assert_vec3_near(out[1].position(), Vec3::new(1.0, 0.0, 1.0), 1e-6);
    assert_eq!(out[1].scale(), Vec3::splat(3.0));
}

#[test]
fn follow_ignores_extra_points_and_never_scales_or_rotates() {
    let hands = hand_pair(Vec3::ZERO, Vec3::UNIT_X);
    let frames = vec![hands.clone(), stretched(&hands, Vec3::ZERO, Vec3::splat(4.0))];
    let out = replay_frames(FollowTransformer::default(), ObjectTransform::identity(), &frames)
        .unwrap();
    // First hand moved from -1 to -4 on x.
    assert_vec3_near(out[1].position(), Vec3::new(-3.0, 0.0, 0.0), 1e-6);
    assert_eq!(out[1].rotation(), Quat::identity());
    assert_eq!(out[1].scale(), Vec3::ONE);
}

#[test]
fn follow_respects_position_limits() {
    let mut limits = AxisConstraints::unconstrained();
    limits.x_axis = AxisConstraint::range(-0.5, 0.5);
    let hand = hands_at(&[[0.0, 0.0, 0.0]]);
    let frames = vec![hand.clone(), translated(&hand, Vec3::new(2.0, 1.0, 0.0))];
    let out = replay_frames(FollowTransformer::new(limits), ObjectTransform::identity(), &frames)
        .unwrap();
    assert_vec3_near(out[1].position(), Vec3::new(0.5, 1.0, 0.0), 1e-6);
}

#[test]
fn follow_reports_offset_only_while_active() {
    let mut follow = FollowTransformer::default();
    let mut target = ObjectTransform::new(Vec3::new(2.0, 0.0, 0.0), Quat::identity(), Vec3::ONE);
    assert_eq!(follow.offset(), None);
    follow
        .begin_transform(&hands_at(&[[1.0, 0.0, 0.0]]), &mut target)
        .unwrap();
    assert_eq!(follow.offset(), Some(Vec3::new(1.0, 0.0, 0.0)));
    follow.end_transform().unwrap();
    assert_eq!(follow.offset(), None);
    assert_eq!(follow.end_transform(), Err(GrabError::NoActiveSession));
}

#[test]
fn grabbable_turns_count_changes_into_phases() {
    let one = hands_at(&[[0.0, 0.0, 0.0]]);
    let two = hand_pair(Vec3::ZERO, Vec3::UNIT_X);
    let none: Vec<Pose> = Vec::new();
    let mut grabbable = Grabbable::new(
        FreeTransformer::new(TransformerConfig::default()),
        ObjectTransform::identity(),
    );

    let phases: Vec<GrabPhase> = [&none, &one, &one, &two, &two, &none, &none]
        .into_iter()
        .map(|frame| grabbable.process(frame).unwrap())
        .collect();

    assert_eq!(
        phases,
        vec![
            GrabPhase::Idle,
            GrabPhase::Began,
            GrabPhase::Updated,
            GrabPhase::Regrabbed,
            GrabPhase::Updated,
            GrabPhase::Released,
            GrabPhase::Idle,
        ]
    );
    assert_eq!(grabbable.point_count(), 0);
    assert!(!grabbable.transformer().is_active());
}

#[test]
fn regrab_does_not_jump_the_object() {
    let start = ObjectTransform::new(Vec3::new(0.0, 0.0, 2.0), Quat::identity(), Vec3::ONE);
    let one = hands_at(&[[-1.0, 0.0, 0.0]]);
    let two = hands_at(&[[-1.0, 0.0, 0.0], [1.0, 0.0, 0.0]]);
    let frames = vec![one.clone(), one, two.clone(), two];
    let out = replay_frames(FreeTransformer::default(), start, &frames).unwrap();
    for t in out {
        assert_vec3_near(t.position(), start.position(), 1e-5);
    }
}

#[test]
fn boxed_transformers_drive_a_grabbable() {
    let transformers: Vec<Box<dyn Transformer>> = vec![
        Box::new(FreeTransformer::default()),
        Box::new(FollowTransformer::default()),
    ];
    let hand = hands_at(&[[0.0, 0.0, 0.0]]);
    let moved = translated(&hand, Vec3::new(0.0, 1.0, 0.0));
    for transformer in transformers {
        let mut grabbable = Grabbable::new(transformer, ObjectTransform::identity());
        grabbable.process(&hand).unwrap();
        grabbable.process(&moved).unwrap();
        let target = grabbable.into_target().unwrap();
        assert_vec3_near(target.position(), Vec3::new(0.0, 1.0, 0.0), 1e-6);
    }
}
