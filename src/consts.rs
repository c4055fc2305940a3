/// Consecutive matching frames needed to confirm a gesture (~3s at 10 fps).
pub const DEFAULT_HOLD_THRESHOLD: u32 = 30;

/// Quiet period after a confirmed gesture, in milliseconds.
pub const DEFAULT_COOLDOWN_MS: u64 = 1000;

/// Frames whose detector score is below this never reach the state machine.
pub const DEFAULT_REQUIRED_CONFIDENCE: f32 = 0.8;

/// Pixels the thumb tip must sit above the wrist for a thumbs-up.
pub const DEFAULT_THUMB_MARGIN: f32 = 30.0;

/// Minimum tip-to-mcp distance, as a fraction of the wrist-to-mcp distance,
/// for a finger to count as stretched.
pub const DEFAULT_STRETCH_RATIO: f32 = 0.2;

/// Fingers counted by the stop check.
pub const DEFAULT_STOP_FINGERS: &str = "index_finger,middle_finger";

/// Stretched-and-up fingers required for a stop.
pub const DEFAULT_STOP_MIN_FINGERS: usize = 2;

/// Number of landmarks emitted by index-ordered hand detectors.
pub const HAND_LANDMARK_COUNT: usize = 21;
