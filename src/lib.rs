pub mod classifier;
pub mod config;
pub mod confirm;
pub mod consts;
pub mod engine;
pub mod error;
pub mod geometry;
pub mod landmarks;
pub mod recording;
pub mod synth;
// cmd and reports belong to the binary (main.rs).

pub use classifier::{GestureCandidate, GestureLabel};
pub use config::{EngineConfig, EngineOptions};
pub use confirm::{GestureEvent, Timestamp};
pub use engine::{GestureEngine, HandTracker, Subscription};
pub use error::{GestureError, GfResult};
pub use landmarks::{Keypoint, LandmarkFrame};
