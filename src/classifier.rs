use crate::config::EngineConfig;
use crate::consts::{
    DEFAULT_STOP_MIN_FINGERS, DEFAULT_STRETCH_RATIO, DEFAULT_THUMB_MARGIN,
};
use crate::error::GfResult;
use crate::geometry::{FingerPredicates, HorizontalDirection};
use crate::landmarks::{Finger, Joint, LandmarkFrame};
use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumCount, EnumIter, EnumString};

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    EnumIter,
    EnumString,
    EnumCount,
    Display,
    AsRefStr,
    Serialize,
    Deserialize,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum GestureLabel {
    PointRight,
    PointLeft,
    HandRaise,
    ThumbsUp,
    Stop,
}

impl GestureLabel {
    #[inline(always)]
    pub fn index(self) -> usize {
        self as usize
    }
}

/// The classifier's single-frame guess. Confidence is the detector's score.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GestureCandidate {
    pub label: Option<GestureLabel>,
    pub confidence: f32,
}

impl GestureCandidate {
    pub fn none() -> Self {
        Self {
            label: None,
            confidence: 0.0,
        }
    }

    pub fn new(label: GestureLabel, confidence: f32) -> Self {
        Self {
            label: Some(label),
            confidence,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FrameAnalysis {
    /// Indexed by `Finger as usize` (thumb first).
    pub fingers: [FingerPredicates; 5],
    pub hand_open: bool,
    pub candidate: GestureCandidate,
}

impl FrameAnalysis {
    pub fn finger(&self, finger: Finger) -> &FingerPredicates {
        &self.fingers[finger as usize]
    }
}

#[derive(Debug, Clone)]
pub struct FrameClassifier {
    pub stretch_ratio: f32,
    pub thumb_margin: f32,
    pub stop_fingers: Vec<Finger>,
    pub stop_min_fingers: usize,
    pub mirrored: bool,
}

impl Default for FrameClassifier {
    fn default() -> Self {
        Self {
            stretch_ratio: DEFAULT_STRETCH_RATIO,
            thumb_margin: DEFAULT_THUMB_MARGIN,
            stop_fingers: vec![Finger::Index, Finger::Middle],
            stop_min_fingers: DEFAULT_STOP_MIN_FINGERS,
            mirrored: true,
        }
    }
}

impl FrameClassifier {
    pub fn from_config(config: &EngineConfig) -> GfResult<Self> {
        Ok(Self {
            stretch_ratio: config.stretch_ratio,
            thumb_margin: config.thumb_margin,
            stop_fingers: config.get_stop_fingers()?,
            stop_min_fingers: config.stop_min_fingers,
            mirrored: config.mirrored,
        })
    }

    pub fn classify(&self, frame: &LandmarkFrame) -> GestureCandidate {
        self.analyze(frame).candidate
    }

    /// Per-finger predicates plus the resulting candidate.
    pub fn analyze(&self, frame: &LandmarkFrame) -> FrameAnalysis {
        let fingers = [
            FingerPredicates::compute(frame, Finger::Thumb, self.stretch_ratio),
            FingerPredicates::compute(frame, Finger::Index, self.stretch_ratio),
            FingerPredicates::compute(frame, Finger::Middle, self.stretch_ratio),
            FingerPredicates::compute(frame, Finger::Ring, self.stretch_ratio),
            FingerPredicates::compute(frame, Finger::Pinky, self.stretch_ratio),
        ];
        let hand_open = Finger::OPEN_HAND
            .iter()
            .all(|&f| fingers[f as usize].is_stretched);

        let label = self.decide(frame, &fingers, hand_open);

        FrameAnalysis {
            fingers,
            hand_open,
            candidate: GestureCandidate {
                label,
                confidence: frame.confidence_score,
            },
        }
    }

    // Priority: hand raise > pointing > stop > thumbs up.
    fn decide(
        &self,
        frame: &LandmarkFrame,
        fingers: &[FingerPredicates; 5],
        hand_open: bool,
    ) -> Option<GestureLabel> {
        let wrist = frame.wrist()?;
        frame.joint(Finger::Index, Joint::Tip)?;
        frame.joint(Finger::Index, Joint::Mcp)?;

        let f = |finger: Finger| &fingers[finger as usize];

        if hand_open && Finger::OPEN_HAND.iter().any(|&x| f(x).points_up) {
            return Some(GestureLabel::HandRaise);
        }

        let others_curled = [Finger::Middle, Finger::Ring, Finger::Pinky]
            .iter()
            .all(|&x| !f(x).is_stretched);

        if f(Finger::Index).is_stretched && !hand_open && others_curled {
            let direction = if self.mirrored {
                f(Finger::Index).horizontal_direction
            } else {
                f(Finger::Index).horizontal_direction.flipped()
            };
            return match direction {
                HorizontalDirection::Left => Some(GestureLabel::PointLeft),
                HorizontalDirection::Right => Some(GestureLabel::PointRight),
                HorizontalDirection::Unknown => None,
            };
        }

        let raised = self
            .stop_fingers
            .iter()
            .filter(|&&x| f(x).is_stretched && f(x).points_up)
            .count();
        if raised >= self.stop_min_fingers {
            return Some(GestureLabel::Stop);
        }

        match frame.joint(Finger::Thumb, Joint::Tip) {
            Some(thumb) if thumb.y < wrist.y - self.thumb_margin => Some(GestureLabel::ThumbsUp),
            _ => None,
        }
    }
}
