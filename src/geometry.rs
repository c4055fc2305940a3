//! Pure predicates over a single [`LandmarkFrame`].
//!
//! Image space has `y` growing downwards, so "up" means a smaller `y`.
//! Missing landmarks never fail: predicates fall back to `false` or
//! [`HorizontalDirection::Unknown`].

use crate::consts::DEFAULT_STRETCH_RATIO;
use crate::landmarks::{Finger, Joint, LandmarkFrame};
use serde::Serialize;
use strum_macros::{Display, EnumString};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString, Serialize)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum HorizontalDirection {
    Left,
    Right,
    Unknown,
}

impl HorizontalDirection {
    pub fn flipped(self) -> Self {
        match self {
            Self::Left => Self::Right,
            Self::Right => Self::Left,
            Self::Unknown => Self::Unknown,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FingerPredicates {
    pub is_stretched: bool,
    pub points_up: bool,
    pub horizontal_direction: HorizontalDirection,
}

impl FingerPredicates {
    pub fn compute(frame: &LandmarkFrame, finger: Finger, stretch_ratio: f32) -> Self {
        Self {
            is_stretched: finger_stretched_with_ratio(frame, finger, stretch_ratio),
            points_up: finger_points_up(frame, finger),
            horizontal_direction: finger_horizontal_direction(frame, finger),
        }
    }
}

/// A finger is stretched when its tip is far enough from the mcp joint and
/// the joints climb monotonically from mcp to tip (no fold).
pub fn is_finger_stretched(frame: &LandmarkFrame, finger: Finger) -> bool {
    finger_stretched_with_ratio(frame, finger, DEFAULT_STRETCH_RATIO)
}

pub fn finger_stretched_with_ratio(frame: &LandmarkFrame, finger: Finger, ratio: f32) -> bool {
    let (Some(tip), Some(dip), Some(pip), Some(mcp), Some(wrist)) = (
        frame.joint(finger, Joint::Tip),
        frame.joint(finger, Joint::Dip),
        frame.joint(finger, Joint::Pip),
        frame.joint(finger, Joint::Mcp),
        frame.wrist(),
    ) else {
        return false;
    };

    let hand_length = wrist.distance(mcp);
    let stretch_distance = tip.distance(mcp);
    let far_enough = stretch_distance > hand_length * ratio;

    far_enough && tip.y < dip.y && dip.y < pip.y && pip.y < mcp.y
}

pub fn finger_points_up(frame: &LandmarkFrame, finger: Finger) -> bool {
    match (frame.joint(finger, Joint::Tip), frame.joint(finger, Joint::Mcp)) {
        (Some(tip), Some(mcp)) => tip.y < mcp.y,
        _ => false,
    }
}

/// Direction in user space for a mirrored (selfie-view) feed: a tip to the
/// right of the mcp in image space points to the user's left.
pub fn finger_horizontal_direction(frame: &LandmarkFrame, finger: Finger) -> HorizontalDirection {
    match (frame.joint(finger, Joint::Tip), frame.joint(finger, Joint::Mcp)) {
        (Some(tip), Some(mcp)) if tip.x > mcp.x => HorizontalDirection::Left,
        (Some(tip), Some(mcp)) if tip.x < mcp.x => HorizontalDirection::Right,
        _ => HorizontalDirection::Unknown,
    }
}

pub fn is_hand_open(frame: &LandmarkFrame) -> bool {
    hand_open_with_ratio(frame, DEFAULT_STRETCH_RATIO)
}

pub fn hand_open_with_ratio(frame: &LandmarkFrame, ratio: f32) -> bool {
    Finger::OPEN_HAND
        .iter()
        .all(|&f| finger_stretched_with_ratio(frame, f, ratio))
}
