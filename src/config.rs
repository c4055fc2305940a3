use crate::consts::{
    DEFAULT_COOLDOWN_MS, DEFAULT_HOLD_THRESHOLD, DEFAULT_REQUIRED_CONFIDENCE,
    DEFAULT_STOP_FINGERS, DEFAULT_STOP_MIN_FINGERS, DEFAULT_STRETCH_RATIO,
    DEFAULT_THUMB_MARGIN,
};
use crate::error::{GestureError, GfResult};
use crate::landmarks::Finger;
use clap::{parser::ValueSource, ArgAction, ArgMatches, Args};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::str::FromStr;

#[derive(Args, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EngineConfig {
    // === CONFIRMATION ===
    /// Consecutive matching frames required to confirm a gesture
    #[arg(long, default_value_t = DEFAULT_HOLD_THRESHOLD)]
    pub hold_threshold: u32,
    /// Quiet period after a confirmed gesture (ms)
    #[arg(long, default_value_t = DEFAULT_COOLDOWN_MS)]
    pub cooldown_ms: u64,
    /// Frames scored below this are treated as "no hand"
    #[arg(long, default_value_t = DEFAULT_REQUIRED_CONFIDENCE)]
    pub required_confidence: f32,

    // === GEOMETRY ===
    #[arg(long, default_value_t = DEFAULT_THUMB_MARGIN)]
    pub thumb_margin: f32,
    #[arg(long, default_value_t = DEFAULT_STRETCH_RATIO)]
    pub stretch_ratio: f32,
    #[arg(long, default_value = DEFAULT_STOP_FINGERS)]
    pub stop_fingers: String,
    #[arg(long, default_value_t = DEFAULT_STOP_MIN_FINGERS)]
    pub stop_min_fingers: usize,

    /// Input comes from a horizontally mirrored (selfie-view) feed
    #[arg(long, default_value_t = true, action = ArgAction::Set)]
    pub mirrored: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            hold_threshold: DEFAULT_HOLD_THRESHOLD,
            cooldown_ms: DEFAULT_COOLDOWN_MS,
            required_confidence: DEFAULT_REQUIRED_CONFIDENCE,
            thumb_margin: DEFAULT_THUMB_MARGIN,
            stretch_ratio: DEFAULT_STRETCH_RATIO,
            stop_fingers: DEFAULT_STOP_FINGERS.to_string(),
            stop_min_fingers: DEFAULT_STOP_MIN_FINGERS,
            mirrored: true,
        }
    }
}

/// Partial update accepted by `GestureEngine::configure`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EngineOptions {
    pub hold_threshold: Option<u32>,
    pub cooldown_ms: Option<u64>,
    pub required_confidence: Option<f32>,
    pub thumb_margin: Option<f32>,
    pub stretch_ratio: Option<f32>,
    pub stop_fingers: Option<String>,
    pub stop_min_fingers: Option<usize>,
    pub mirrored: Option<bool>,
}

impl EngineConfig {
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> GfResult<Self> {
        let content = fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> GfResult<()> {
        if self.hold_threshold == 0 {
            return Err(GestureError::Config(
                "hold_threshold must be at least 1 frame".to_string(),
            ));
        }
        if !(0.0..=1.0).contains(&self.required_confidence) {
            return Err(GestureError::Config(format!(
                "required_confidence must be within [0, 1], got {}",
                self.required_confidence
            )));
        }
        if !self.thumb_margin.is_finite() || self.thumb_margin < 0.0 {
            return Err(GestureError::Config(format!(
                "thumb_margin must be a non-negative number, got {}",
                self.thumb_margin
            )));
        }
        if !self.stretch_ratio.is_finite() || self.stretch_ratio <= 0.0 {
            return Err(GestureError::Config(format!(
                "stretch_ratio must be positive, got {}",
                self.stretch_ratio
            )));
        }
        if self.stop_min_fingers == 0 {
            return Err(GestureError::Config(
                "stop_min_fingers must be at least 1".to_string(),
            ));
        }
        self.get_stop_fingers()?;
        Ok(())
    }

    pub fn get_stop_fingers(&self) -> GfResult<Vec<Finger>> {
        let mut fingers = Vec::new();
        for name in self.stop_fingers.split(',') {
            let name = name.trim();
            if name.is_empty() {
                continue;
            }
            let finger = Finger::from_str(name).map_err(|_| {
                GestureError::Config(format!("Unknown finger '{}' in stop_fingers", name))
            })?;
            if !fingers.contains(&finger) {
                fingers.push(finger);
            }
        }
        if fingers.is_empty() {
            return Err(GestureError::Config(
                "stop_fingers must name at least one finger".to_string(),
            ));
        }
        Ok(fingers)
    }

    /// Returns a copy with every field present in `options` replaced.
    pub fn with_options(&self, options: &EngineOptions) -> Self {
        let mut next = self.clone();
        macro_rules! apply {
            ($($field:ident),*) => {
                $(
                    if let Some(v) = &options.$field {
                        next.$field = v.clone();
                    }
                )*
            };
        }
        apply!(
            hold_threshold,
            cooldown_ms,
            required_confidence,
            thumb_margin,
            stretch_ratio,
            stop_fingers,
            stop_min_fingers,
            mirrored
        );
        next
    }

    /// Overlays only the flags that were typed on the command line.
    pub fn merge_from_cli(&mut self, cli: &EngineConfig, matches: &ArgMatches) {
        macro_rules! update_if_present {
            ($field:ident, $arg_name:expr) => {
                if matches.value_source($arg_name) == Some(ValueSource::CommandLine) {
                    self.$field = cli.$field.clone();
                }
            };
        }

        update_if_present!(hold_threshold, "hold_threshold");
        update_if_present!(cooldown_ms, "cooldown_ms");
        update_if_present!(required_confidence, "required_confidence");
        update_if_present!(thumb_margin, "thumb_margin");
        update_if_present!(stretch_ratio, "stretch_ratio");
        update_if_present!(stop_fingers, "stop_fingers");
        update_if_present!(stop_min_fingers, "stop_min_fingers");
        update_if_present!(mirrored, "mirrored");
    }
}
