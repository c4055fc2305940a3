use clap::Args;
use gestureforge::classifier::GestureLabel;
use gestureforge::error::{GestureError, GfResult};
use gestureforge::recording::{save_recording, RecordedFrame};
use gestureforge::synth::PoseSynth;
use std::str::FromStr;
use tracing::info;

#[derive(Args, Debug, Clone)]
pub struct SimulateArgs {
    /// Pose to hold: point_right, point_left, hand_raise, thumbs_up, stop or none
    #[arg(short, long, default_value = "none")]
    pub gesture: String,

    #[arg(long, default_value_t = 40)]
    pub frames: usize,

    /// Frames with no hand appended after the pose
    #[arg(long, default_value_t = 0)]
    pub gap: usize,

    #[arg(long, default_value_t = 30.0)]
    pub fps: f32,

    #[arg(long, default_value_t = 0)]
    pub start: u64,

    #[arg(long)]
    pub seed: Option<u64>,

    /// Per-coordinate noise in pixels
    #[arg(long, default_value_t = 2.0)]
    pub jitter: f32,

    #[arg(long, default_value_t = 0.95)]
    pub confidence: f32,

    #[arg(short, long)]
    pub out: String,
}

pub fn parse_pose(name: &str) -> GfResult<Option<GestureLabel>> {
    if name.eq_ignore_ascii_case("none") {
        return Ok(None);
    }
    GestureLabel::from_str(name)
        .map(Some)
        .map_err(|_| GestureError::Config(format!("Unknown gesture '{}'", name)))
}

pub fn build_frames(args: &SimulateArgs) -> GfResult<Vec<RecordedFrame>> {
    let pose = parse_pose(&args.gesture)?;
    if args.fps.is_nan() || args.fps <= 0.0 {
        return Err(GestureError::Config(format!(
            "fps must be positive, got {}",
            args.fps
        )));
    }
    let step = (1000.0 / args.fps).round().max(1.0) as u64;

    let mut synth = PoseSynth::new(args.seed)
        .with_jitter(args.jitter)
        .with_confidence(args.confidence);

    let mut frames = Vec::with_capacity(args.frames + args.gap);
    for i in 0..(args.frames + args.gap) {
        let t = args.start + i as u64 * step;
        let hand = (i < args.frames).then(|| synth.frame(pose));
        frames.push(RecordedFrame { t, hand });
    }
    Ok(frames)
}

pub fn run(args: &SimulateArgs) -> GfResult<()> {
    let frames = build_frames(args)?;
    save_recording(&args.out, &frames)?;
    info!(
        "💾 Wrote {} frame(s) of '{}' to {}",
        frames.len(),
        args.gesture,
        args.out
    );
    Ok(())
}
