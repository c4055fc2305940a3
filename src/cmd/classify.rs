use crate::reports::{self, FrameRow};
use clap::Args;
use gestureforge::classifier::GestureLabel;
use gestureforge::config::EngineConfig;
use gestureforge::engine::GestureEngine;
use gestureforge::error::GfResult;
use gestureforge::landmarks::Finger;
use gestureforge::recording::load_recording;
use std::collections::HashMap;
use strum::IntoEnumIterator;

#[derive(Args, Debug, Clone)]
pub struct ClassifyArgs {
    #[command(flatten)]
    pub engine: EngineConfig,

    /// Recording to inspect (JSON lines)
    pub file: String,

    /// Print one row per frame instead of only the summary
    #[arg(long, default_value_t = false)]
    pub frames: bool,
}

pub fn run(args: &ClassifyArgs, config: EngineConfig) -> GfResult<()> {
    let recording = load_recording(&args.file)?;
    let engine = GestureEngine::new(config)?;

    let mut counts: HashMap<Option<GestureLabel>, usize> = HashMap::new();
    let mut rows = Vec::with_capacity(recording.len());

    for frame in &recording {
        let row = match &frame.hand {
            None => FrameRow {
                t: frame.t,
                hand: false,
                score: 0.0,
                candidate: None,
                confidence: 0.0,
                hand_open: false,
                index: "-".to_string(),
            },
            Some(hand) => {
                let analysis = engine.analyze(hand);
                let candidate = engine.candidate(hand);
                let index = analysis.finger(Finger::Index);
                FrameRow {
                    t: frame.t,
                    hand: true,
                    score: hand.confidence_score,
                    candidate: candidate.label,
                    confidence: candidate.confidence,
                    hand_open: analysis.hand_open,
                    index: format!(
                        "{}{}",
                        if index.is_stretched { "stretched " } else { "" },
                        index.horizontal_direction
                    ),
                }
            }
        };
        *counts.entry(row.candidate).or_insert(0) += 1;
        rows.push(row);
    }

    if args.frames {
        reports::print_frame_table(&rows);
    }

    let summary: Vec<(String, usize)> = GestureLabel::iter()
        .map(Some)
        .chain(std::iter::once(None))
        .map(|label| {
            let name = label.map_or_else(|| "none".to_string(), |l| l.to_string());
            (name, counts.get(&label).copied().unwrap_or(0))
        })
        .collect();
    reports::print_label_summary(&args.file, &summary, rows.len());

    Ok(())
}
