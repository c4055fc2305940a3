use crate::consts::HAND_LANDMARK_COUNT;
use crate::error::{GestureError, GfResult};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use strum_macros::{AsRefStr, Display, EnumIter, EnumString};

/// Canonical landmark names in the order index-based hand detectors emit them.
///
/// - 0: wrist
/// - 1..=4: thumb (cmc, mcp, ip, tip)
/// - 5..=20: index, middle, ring, pinky (mcp, pip, dip, tip)
pub const HAND_LANDMARK_NAMES: [&str; HAND_LANDMARK_COUNT] = [
    "wrist",
    "thumb_cmc",
    "thumb_mcp",
    "thumb_ip",
    "thumb_tip",
    "index_finger_mcp",
    "index_finger_pip",
    "index_finger_dip",
    "index_finger_tip",
    "middle_finger_mcp",
    "middle_finger_pip",
    "middle_finger_dip",
    "middle_finger_tip",
    "ring_finger_mcp",
    "ring_finger_pip",
    "ring_finger_dip",
    "ring_finger_tip",
    "pinky_finger_mcp",
    "pinky_finger_pip",
    "pinky_finger_dip",
    "pinky_finger_tip",
];

pub const WRIST: &str = "wrist";

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, EnumString, Display, AsRefStr,
)]
pub enum Finger {
    #[strum(serialize = "thumb")]
    Thumb,
    #[strum(serialize = "index_finger")]
    Index,
    #[strum(serialize = "middle_finger")]
    Middle,
    #[strum(serialize = "ring_finger")]
    Ring,
    #[strum(serialize = "pinky_finger")]
    Pinky,
}

impl Finger {
    /// The three fingers whose stretch decides whether the hand is open.
    pub const OPEN_HAND: [Finger; 3] = [Finger::Index, Finger::Middle, Finger::Ring];
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, EnumString, Display, AsRefStr)]
#[strum(serialize_all = "snake_case")]
pub enum Joint {
    Cmc,
    Mcp,
    Ip,
    Pip,
    Dip,
    Tip,
}

pub fn landmark_id(finger: Finger, joint: Joint) -> String {
    format!("{}_{}", finger, joint)
}

fn is_landmark(id: &str, finger: Finger, joint: Joint) -> bool {
    id.strip_prefix(finger.as_ref())
        .and_then(|rest| rest.strip_prefix('_'))
        .is_some_and(|rest| rest == joint.as_ref())
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Keypoint {
    #[serde(alias = "name")]
    pub id: String,
    pub x: f32,
    pub y: f32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub z: Option<f32>,
}

impl Keypoint {
    pub fn new(id: impl Into<String>, x: f32, y: f32) -> Self {
        Self {
            id: id.into(),
            x,
            y,
            z: None,
        }
    }

    #[inline(always)]
    pub fn distance(&self, other: &Keypoint) -> f32 {
        ((self.x - other.x).powi(2) + (self.y - other.y).powi(2)).sqrt()
    }
}

/// One detection result from the hand tracker, in the detector's pixel space.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LandmarkFrame {
    pub keypoints: Vec<Keypoint>,
    #[serde(alias = "score")]
    pub confidence_score: f32,
}

impl LandmarkFrame {
    /// Builds a frame and checks that it is well formed.
    pub fn new(keypoints: Vec<Keypoint>, confidence_score: f32) -> GfResult<Self> {
        let frame = Self {
            keypoints,
            confidence_score,
        };
        frame.validate()?;
        Ok(frame)
    }

    /// Names 21 index-ordered points with the canonical landmark ids.
    pub fn from_indexed(points: &[(f32, f32)], confidence_score: f32) -> GfResult<Self> {
        if points.len() != HAND_LANDMARK_COUNT {
            return Err(GestureError::Validation(format!(
                "Index-ordered hand requires {} points, got {}",
                HAND_LANDMARK_COUNT,
                points.len()
            )));
        }

        let keypoints = points
            .iter()
            .zip(HAND_LANDMARK_NAMES)
            .map(|(&(x, y), name)| Keypoint::new(name, x, y))
            .collect();

        Self::new(keypoints, confidence_score)
    }

    pub fn validate(&self) -> GfResult<()> {
        if !(0.0..=1.0).contains(&self.confidence_score) {
            return Err(GestureError::Validation(format!(
                "Confidence score {} is outside [0, 1]",
                self.confidence_score
            )));
        }

        let mut seen = HashSet::with_capacity(self.keypoints.len());
        for kp in &self.keypoints {
            if !seen.insert(kp.id.as_str()) {
                return Err(GestureError::Validation(format!(
                    "Duplicate keypoint id '{}'",
                    kp.id
                )));
            }
        }
        Ok(())
    }

    /// A detection without keypoints carries no hand.
    pub fn is_empty(&self) -> bool {
        self.keypoints.is_empty()
    }

    pub fn keypoint(&self, id: &str) -> Option<&Keypoint> {
        self.keypoints.iter().find(|k| k.id == id)
    }

    pub fn joint(&self, finger: Finger, joint: Joint) -> Option<&Keypoint> {
        self.keypoints
            .iter()
            .find(|k| is_landmark(&k.id, finger, joint))
    }

    pub fn wrist(&self) -> Option<&Keypoint> {
        self.keypoint(WRIST)
    }
}
