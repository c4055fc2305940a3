use crate::reports;
use clap::Args;
use gestureforge::config::EngineConfig;
use gestureforge::confirm::GestureEvent;
use gestureforge::engine::{connect, GestureEngine};
use gestureforge::error::GfResult;
use gestureforge::recording::{load_recording, save_events_csv, RecordingTracker};
use rayon::prelude::*;
use std::sync::{Arc, Mutex};
use tracing::info;

#[derive(Args, Debug, Clone)]
pub struct ReplayArgs {
    #[command(flatten)]
    pub engine: EngineConfig,

    /// Recordings to replay (JSON lines). Each one gets its own engine.
    #[arg(required = true)]
    pub files: Vec<String>,

    /// Also write every confirmed event to this CSV file
    #[arg(long)]
    pub events_csv: Option<String>,
}

pub struct ReplayOutcome {
    pub file: String,
    pub frames: usize,
    pub events: Vec<GestureEvent>,
}

pub fn run(args: &ReplayArgs, config: EngineConfig) -> GfResult<()> {
    info!("▶️  Replaying {} recording(s)", args.files.len());

    let outcomes = args
        .files
        .par_iter()
        .map(|path| replay_file(path, &config))
        .collect::<GfResult<Vec<_>>>()?;

    reports::print_event_report(&outcomes);

    if let Some(path) = &args.events_csv {
        let events: Vec<GestureEvent> = outcomes
            .iter()
            .flat_map(|o| o.events.iter().copied())
            .collect();
        save_events_csv(path, &events)?;
        info!("💾 Wrote {} event(s) to {}", events.len(), path);
    }

    Ok(())
}

pub fn replay_file(path: &str, config: &EngineConfig) -> GfResult<ReplayOutcome> {
    let frames = load_recording(path)?;
    let frame_count = frames.len();

    let mut engine = GestureEngine::new(config.clone())?;
    let collected = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&collected);
    engine.subscribe(move |event| {
        sink.lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(*event);
    });

    let engine = Arc::new(Mutex::new(engine));
    let mut tracker = RecordingTracker::new(frames);
    connect(Arc::clone(&engine), &mut tracker);
    tracker.play();

    let events = collected
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner())
        .clone();

    Ok(ReplayOutcome {
        file: path.to_string(),
        frames: frame_count,
        events,
    })
}
