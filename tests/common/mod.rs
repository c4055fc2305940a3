#![allow(dead_code)]

use gestureforge::classifier::{GestureCandidate, GestureLabel};
use gestureforge::landmarks::{landmark_id, Finger, Joint, Keypoint, LandmarkFrame};
use gestureforge::recording::RecordedFrame;
use gestureforge::synth::PoseSynth;

/// Builder for LandmarkFrame, starting from a noise-free synthetic pose.
pub struct FrameBuilder {
    frame: LandmarkFrame,
}

impl FrameBuilder {
    pub fn pose(pose: Option<GestureLabel>) -> Self {
        Self {
            frame: PoseSynth::canonical(pose),
        }
    }

    pub fn fist() -> Self {
        Self::pose(None)
    }

    pub fn empty() -> Self {
        Self {
            frame: LandmarkFrame {
                keypoints: Vec::new(),
                confidence_score: 0.95,
            },
        }
    }

    pub fn confidence(mut self, score: f32) -> Self {
        self.frame.confidence_score = score;
        self
    }

    /// Moves (or inserts) a joint to absolute pixel coordinates.
    pub fn joint(mut self, finger: Finger, joint: Joint, x: f32, y: f32) -> Self {
        let id = landmark_id(finger, joint);
        match self.frame.keypoints.iter_mut().find(|k| k.id == id) {
            Some(kp) => {
                kp.x = x;
                kp.y = y;
            }
            None => self.frame.keypoints.push(Keypoint::new(id, x, y)),
        }
        self
    }

    pub fn without(mut self, id: &str) -> Self {
        self.frame.keypoints.retain(|k| k.id != id);
        self
    }

    pub fn without_joint(self, finger: Finger, joint: Joint) -> Self {
        let id = landmark_id(finger, joint);
        self.without(&id)
    }

    pub fn build(self) -> LandmarkFrame {
        self.frame
    }
}

pub fn candidate(label: GestureLabel) -> GestureCandidate {
    GestureCandidate::new(label, 0.9)
}

/// `count` frames of the same pose, `step_ms` apart, starting at `start`.
pub fn held(pose: Option<GestureLabel>, count: usize, start: u64, step_ms: u64) -> Vec<RecordedFrame> {
    let mut synth = PoseSynth::new(Some(7));
    (0..count)
        .map(|i| RecordedFrame {
            t: start + i as u64 * step_ms,
            hand: Some(synth.frame(pose)),
        })
        .collect()
}

pub fn gap(count: usize, start: u64, step_ms: u64) -> Vec<RecordedFrame> {
    (0..count)
        .map(|i| RecordedFrame {
            t: start + i as u64 * step_ms,
            hand: None,
        })
        .collect()
}
