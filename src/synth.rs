//! Synthetic hands for demos, tests and benchmarks.
//!
//! Poses are laid out for a mirrored (selfie-view) feed: the wrist sits at
//! `origin`, fingers extend towards smaller `y`.

use crate::classifier::GestureLabel;
use crate::landmarks::{landmark_id, Finger, Joint, Keypoint, LandmarkFrame, WRIST};

type Offset = (f32, f32);

const INDEX_X: f32 = -30.0;
const MIDDLE_X: f32 = 0.0;
const RING_X: f32 = 30.0;
const PINKY_X: f32 = 60.0;

// mcp, pip, dip, tip
fn straight(x: f32) -> [Offset; 4] {
    [(x, -100.0), (x, -140.0), (x, -170.0), (x, -200.0)]
}

fn curled(x: f32) -> [Offset; 4] {
    [(x, -100.0), (x, -70.0), (x, -60.0), (x - 5.0, -75.0)]
}

/// Index finger held sideways and slightly raised; `dir` is -1 for a tip
/// left of the mcp in image space.
fn sideways(x: f32, dir: f32) -> [Offset; 4] {
    [
        (x, -100.0),
        (x + dir * 40.0, -110.0),
        (x + dir * 70.0, -118.0),
        (x + dir * 100.0, -125.0),
    ]
}

// cmc, mcp, ip, tip
const THUMB_UP: [Offset; 4] = [(-40.0, -20.0), (-60.0, -50.0), (-70.0, -80.0), (-75.0, -110.0)];
const THUMB_TUCKED: [Offset; 4] = [(-40.0, -20.0), (-55.0, -35.0), (-50.0, -45.0), (-40.0, -15.0)];

struct HandShape {
    thumb: [Offset; 4],
    index: [Offset; 4],
    middle: [Offset; 4],
    ring: [Offset; 4],
    pinky: [Offset; 4],
}

fn shape_for(pose: Option<GestureLabel>) -> HandShape {
    let fist = HandShape {
        thumb: THUMB_TUCKED,
        index: curled(INDEX_X),
        middle: curled(MIDDLE_X),
        ring: curled(RING_X),
        pinky: curled(PINKY_X),
    };

    match pose {
        None => fist,
        Some(GestureLabel::HandRaise) => HandShape {
            index: straight(INDEX_X),
            middle: straight(MIDDLE_X),
            ring: straight(RING_X),
            pinky: straight(PINKY_X),
            ..fist
        },
        // User's right on a mirrored feed is image-left.
        Some(GestureLabel::PointRight) => HandShape {
            index: sideways(INDEX_X, -1.0),
            ..fist
        },
        Some(GestureLabel::PointLeft) => HandShape {
            index: sideways(INDEX_X, 1.0),
            ..fist
        },
        Some(GestureLabel::Stop) => HandShape {
            index: straight(INDEX_X),
            middle: straight(MIDDLE_X),
            ..fist
        },
        Some(GestureLabel::ThumbsUp) => HandShape {
            thumb: THUMB_UP,
            ..fist
        },
    }
}

pub struct PoseSynth {
    rng: fastrand::Rng,
    pub origin: (f32, f32),
    pub jitter: f32,
    pub confidence: f32,
}

impl PoseSynth {
    pub fn new(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(s) => fastrand::Rng::with_seed(s),
            None => fastrand::Rng::new(),
        };
        Self {
            rng,
            origin: (320.0, 400.0),
            jitter: 2.0,
            confidence: 0.95,
        }
    }

    pub fn with_jitter(mut self, jitter: f32) -> Self {
        self.jitter = jitter.abs();
        self
    }

    pub fn with_confidence(mut self, confidence: f32) -> Self {
        self.confidence = confidence.clamp(0.0, 1.0);
        self
    }

    /// A noise-free hand for `pose` (`None` is a relaxed fist).
    pub fn canonical(pose: Option<GestureLabel>) -> LandmarkFrame {
        let mut synth = Self::new(Some(0)).with_jitter(0.0);
        synth.frame(pose)
    }

    pub fn frame(&mut self, pose: Option<GestureLabel>) -> LandmarkFrame {
        let shape = shape_for(pose);
        let mut keypoints = Vec::with_capacity(21);
        keypoints.push(self.point(WRIST.to_string(), (0.0, 0.0)));

        let thumb_joints = [Joint::Cmc, Joint::Mcp, Joint::Ip, Joint::Tip];
        for (joint, offset) in thumb_joints.iter().zip(shape.thumb) {
            keypoints.push(self.point(landmark_id(Finger::Thumb, *joint), offset));
        }

        let finger_joints = [Joint::Mcp, Joint::Pip, Joint::Dip, Joint::Tip];
        let fingers = [
            (Finger::Index, shape.index),
            (Finger::Middle, shape.middle),
            (Finger::Ring, shape.ring),
            (Finger::Pinky, shape.pinky),
        ];
        for (finger, offsets) in fingers {
            for (joint, offset) in finger_joints.iter().zip(offsets) {
                keypoints.push(self.point(landmark_id(finger, *joint), offset));
            }
        }

        LandmarkFrame {
            keypoints,
            confidence_score: self.confidence,
        }
    }

    fn point(&mut self, id: String, (dx, dy): Offset) -> Keypoint {
        let x = self.origin.0 + dx + self.noise();
        let y = self.origin.1 + dy + self.noise();
        Keypoint::new(id, x, y)
    }

    fn noise(&mut self) -> f32 {
        if self.jitter == 0.0 {
            return 0.0;
        }
        (self.rng.f32() * 2.0 - 1.0) * self.jitter
    }
}
