//! Landmark recordings (JSON lines) and confirmed-event export (CSV).
//!
//! Each non-empty line is `{"t": <ms>, "hand": <LandmarkFrame> | null}`.
//! Lines starting with `#` are comments.

use crate::confirm::{GestureEvent, Timestamp};
use crate::engine::{FrameSink, HandTracker};
use crate::error::{GestureError, GfResult};
use crate::landmarks::LandmarkFrame;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordedFrame {
    pub t: Timestamp,
    #[serde(default)]
    pub hand: Option<LandmarkFrame>,
}

pub fn parse_recording<R: BufRead>(reader: R) -> GfResult<Vec<RecordedFrame>> {
    let mut frames: Vec<RecordedFrame> = Vec::new();

    for (idx, line) in reader.lines().enumerate() {
        let line = line?;
        let line_no = idx + 1;
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }

        let frame: RecordedFrame = serde_json::from_str(trimmed).map_err(|e| {
            GestureError::Validation(format!("line {}: {}", line_no, e))
        })?;

        if let Some(hand) = &frame.hand {
            hand.validate()
                .map_err(|e| GestureError::Validation(format!("line {}: {}", line_no, e)))?;
        }

        if let Some(prev) = frames.last() {
            if frame.t < prev.t {
                return Err(GestureError::Validation(format!(
                    "line {}: timestamp {} is earlier than {}",
                    line_no, frame.t, prev.t
                )));
            }
        }

        frames.push(frame);
    }

    Ok(frames)
}

pub fn load_recording<P: AsRef<Path>>(path: P) -> GfResult<Vec<RecordedFrame>> {
    let file = File::open(path.as_ref())?;
    let frames = parse_recording(BufReader::new(file))?;
    debug!(
        "Loaded {} frames from {}",
        frames.len(),
        path.as_ref().display()
    );
    Ok(frames)
}

pub fn save_recording<P: AsRef<Path>>(path: P, frames: &[RecordedFrame]) -> GfResult<()> {
    let mut out = BufWriter::new(File::create(path)?);
    for frame in frames {
        serde_json::to_writer(&mut out, frame)?;
        out.write_all(b"\n")?;
    }
    out.flush()?;
    Ok(())
}

pub fn write_events_csv<W: Write>(writer: W, events: &[GestureEvent]) -> GfResult<()> {
    let mut wtr = csv::Writer::from_writer(writer);
    for event in events {
        wtr.serialize(event)?;
    }
    wtr.flush()?;
    Ok(())
}

pub fn save_events_csv<P: AsRef<Path>>(path: P, events: &[GestureEvent]) -> GfResult<()> {
    write_events_csv(File::create(path)?, events)
}

/// Plays a recording into whatever sink the engine registers.
pub struct RecordingTracker {
    frames: Vec<RecordedFrame>,
    sink: Option<FrameSink>,
}

impl RecordingTracker {
    pub fn new(frames: Vec<RecordedFrame>) -> Self {
        Self { frames, sink: None }
    }

    /// Delivers every frame in order. Returns how many were delivered
    /// (zero when nothing is connected).
    pub fn play(&mut self) -> usize {
        let Some(sink) = self.sink.as_mut() else {
            return 0;
        };
        for frame in &self.frames {
            sink(frame.hand.clone(), frame.t);
        }
        self.frames.len()
    }
}

impl HandTracker for RecordingTracker {
    fn on_frame(&mut self, sink: FrameSink) {
        self.sink = Some(sink);
    }
}
