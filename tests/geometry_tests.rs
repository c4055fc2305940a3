mod common;

use common::FrameBuilder;
use gestureforge::classifier::GestureLabel;
use gestureforge::geometry::{
    finger_horizontal_direction, finger_points_up, finger_stretched_with_ratio,
    is_finger_stretched, is_hand_open, FingerPredicates, HorizontalDirection,
};
use gestureforge::landmarks::{Finger, Joint, WRIST};
use rstest::rstest;

// Canonical hand: wrist at (320, 400), index mcp at (290, 300).

// --- STRETCH ---
#[rstest]
#[case(Some(GestureLabel::HandRaise), Finger::Index, true)]
#[case(Some(GestureLabel::HandRaise), Finger::Ring, true)]
#[case(Some(GestureLabel::HandRaise), Finger::Pinky, true)]
#[case(Some(GestureLabel::Stop), Finger::Middle, true)]
#[case(Some(GestureLabel::Stop), Finger::Ring, false)]
#[case(Some(GestureLabel::PointRight), Finger::Index, true)]
#[case(Some(GestureLabel::PointRight), Finger::Middle, false)]
#[case(None, Finger::Index, false)]
#[case(None, Finger::Pinky, false)]
fn test_is_finger_stretched(
    #[case] pose: Option<GestureLabel>,
    #[case] finger: Finger,
    #[case] expected: bool,
) {
    let frame = FrameBuilder::pose(pose).build();
    assert_eq!(
        is_finger_stretched(&frame, finger),
        expected,
        "{:?} on {:?}",
        finger,
        pose
    );
}

#[test]
fn test_thumb_never_stretched() {
    // The thumb has no pip/dip landmarks.
    let frame = FrameBuilder::pose(Some(GestureLabel::ThumbsUp)).build();
    assert!(!is_finger_stretched(&frame, Finger::Thumb));
}

#[test]
fn test_folded_finger_not_stretched() {
    // Far from the mcp but dip sits below pip.
    let frame = FrameBuilder::pose(Some(GestureLabel::HandRaise))
        .joint(Finger::Index, Joint::Dip, 290.0, 280.0)
        .build();
    assert!(!is_finger_stretched(&frame, Finger::Index));
    assert!(finger_points_up(&frame, Finger::Index));
}

#[test]
fn test_short_finger_not_stretched() {
    // Monotonic but the tip is only 15px from the mcp (hand length ~104px).
    let frame = FrameBuilder::pose(Some(GestureLabel::HandRaise))
        .joint(Finger::Index, Joint::Pip, 290.0, 295.0)
        .joint(Finger::Index, Joint::Dip, 290.0, 290.0)
        .joint(Finger::Index, Joint::Tip, 290.0, 285.0)
        .build();
    assert!(!is_finger_stretched(&frame, Finger::Index));
}

#[rstest]
#[case(0.1, true)]
#[case(0.5, true)]
#[case(2.0, false)]
fn test_stretch_ratio_threshold(#[case] ratio: f32, #[case] expected: bool) {
    // tip-mcp is 100px, wrist-mcp ~104px.
    let frame = FrameBuilder::pose(Some(GestureLabel::HandRaise)).build();
    assert_eq!(
        finger_stretched_with_ratio(&frame, Finger::Index, ratio),
        expected
    );
}

#[rstest]
#[case(WRIST)]
#[case("index_finger_tip")]
#[case("index_finger_dip")]
#[case("index_finger_pip")]
#[case("index_finger_mcp")]
fn test_missing_landmark_not_stretched(#[case] id: &str) {
    let frame = FrameBuilder::pose(Some(GestureLabel::HandRaise))
        .without(id)
        .build();
    assert!(!is_finger_stretched(&frame, Finger::Index));
}

// --- DIRECTION ---
#[rstest]
#[case(250.0, HorizontalDirection::Right)]
#[case(330.0, HorizontalDirection::Left)]
#[case(290.0, HorizontalDirection::Unknown)]
fn test_horizontal_direction(#[case] tip_x: f32, #[case] expected: HorizontalDirection) {
    let frame = FrameBuilder::fist()
        .joint(Finger::Index, Joint::Tip, tip_x, 275.0)
        .build();
    assert_eq!(finger_horizontal_direction(&frame, Finger::Index), expected);
}

#[test]
fn test_direction_unknown_without_tip() {
    let frame = FrameBuilder::pose(Some(GestureLabel::PointLeft))
        .without_joint(Finger::Index, Joint::Tip)
        .build();
    assert_eq!(
        finger_horizontal_direction(&frame, Finger::Index),
        HorizontalDirection::Unknown
    );
    assert!(!finger_points_up(&frame, Finger::Index));
}

#[test]
fn test_flipped_direction() {
    assert_eq!(HorizontalDirection::Left.flipped(), HorizontalDirection::Right);
    assert_eq!(HorizontalDirection::Right.flipped(), HorizontalDirection::Left);
    assert_eq!(
        HorizontalDirection::Unknown.flipped(),
        HorizontalDirection::Unknown
    );
}

// --- HAND OPEN ---
#[rstest]
#[case(Some(GestureLabel::HandRaise), true)]
#[case(Some(GestureLabel::Stop), false)]
#[case(Some(GestureLabel::PointLeft), false)]
#[case(Some(GestureLabel::ThumbsUp), false)]
#[case(None, false)]
fn test_is_hand_open(#[case] pose: Option<GestureLabel>, #[case] expected: bool) {
    let frame = FrameBuilder::pose(pose).build();
    assert_eq!(is_hand_open(&frame), expected);
}

#[test]
fn test_hand_open_ignores_pinky() {
    let frame = FrameBuilder::pose(Some(GestureLabel::HandRaise))
        .without_joint(Finger::Pinky, Joint::Tip)
        .build();
    assert!(is_hand_open(&frame));
}

#[test]
fn test_empty_frame_is_conservative() {
    let frame = FrameBuilder::empty().build();
    let p = FingerPredicates::compute(&frame, Finger::Middle, 0.2);
    assert!(!p.is_stretched);
    assert!(!p.points_up);
    assert_eq!(p.horizontal_direction, HorizontalDirection::Unknown);
    assert!(!is_hand_open(&frame));
}
