//! `magno-rel export`: animate Bz over a run as GIF or MP4.

use crate::commands::load_config;
use clap::Args;
use magno_physics::magno_rel::MagnoRelSim;
use magno_physics::source::{BzSource, GaussianPulse};
use magno_render::animation::{open_sink, AnimationFormat, FrameSink};
use magno_render::colormap::Colormap;
use magno_render::plot::{pixel_size, FieldFrame};
use magno_render::scale::ScaleLock;
use magno_types::error::{MagnoError, MagnoResult};
use std::fs;
use std::path::PathBuf;
use std::time::Instant;

pub const TITLE: &str = "Mango Relativity — Bz field";

#[derive(Debug, Clone, Args)]
pub struct ExportArgs {
    /// Parameter file
    #[arg(short, long, default_value = "params.json")]
    pub params: PathBuf,

    /// Target duration (seconds)
    #[arg(long, default_value_t = 60)]
    pub seconds: usize,

    /// Frames per second
    #[arg(long, default_value_t = 10)]
    pub fps: u32,

    /// Output file path (.gif or .mp4)
    #[arg(long, default_value = "outputs/demo_60s.gif")]
    pub outfile: PathBuf,

    /// Export MP4 instead of GIF (requires ffmpeg)
    #[arg(long)]
    pub mp4: bool,

    /// Colormap (viridis, plasma, inferno, magma, coolwarm, gray; `_r` reverses)
    #[arg(long, default_value = "viridis")]
    pub colormap: String,

    /// Dots per inch
    #[arg(long, default_value_t = 120)]
    pub dpi: u32,

    /// Figure width (inches)
    #[arg(long, default_value_t = 6.0)]
    pub width: f64,

    /// Figure height (inches)
    #[arg(long, default_value_t = 5.0)]
    pub height: f64,

    /// Frames before locking the colour scale (0 = never lock)
    #[arg(long, default_value_t = 20)]
    pub lock_scale_after: usize,

    /// Simulation steps per frame (0 = auto)
    #[arg(long, default_value_t = 0)]
    pub stride: usize,

    /// Warm-up length in strides, run before the first frame
    #[arg(long, default_value_t = 3)]
    pub warmup_strides: usize,

    /// ffmpeg executable used for MP4 output
    #[arg(long, default_value = "ffmpeg")]
    pub ffmpeg: String,
}

/// How a run of `steps` maps onto animation frames.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FramePlan {
    pub stride: usize,
    pub frames: usize,
    pub warmup_steps: usize,
}

impl FramePlan {
    /// `stride_override == 0` picks the stride that spreads `steps` over
    /// `seconds·fps` frames.
    pub fn new(
        steps: usize,
        seconds: usize,
        fps: u32,
        stride_override: usize,
        warmup_strides: usize,
    ) -> Self {
        let target_frames = seconds.saturating_mul(fps as usize);
        let stride = if stride_override > 0 {
            stride_override
        } else {
            (steps / target_frames.max(1)).max(1)
        };
        FramePlan {
            stride,
            frames: target_frames.min(steps / stride),
            warmup_steps: (stride * warmup_strides).min(steps),
        }
    }

    /// Step indices simulated for frame `k`.
    pub fn frame_steps(&self, k: usize) -> std::ops::Range<usize> {
        k * self.stride..(k + 1) * self.stride
    }

    /// Log progress every tenth of the animation.
    pub fn progress_every(&self) -> usize {
        (self.frames / 10).max(1)
    }
}

pub fn frame_title(k: usize, frames: usize) -> String {
    format!("{TITLE} (frame {}/{})", k + 1, frames)
}

/// Warm up, then advance `plan.stride` steps per frame and hand each Bz
/// frame to `sink`.
pub fn record_frames(
    sim: &mut MagnoRelSim,
    source: &dyn BzSource,
    plan: &FramePlan,
    lock: &mut ScaleLock,
    colormap: Colormap,
    sink: &mut dyn FrameSink,
) -> MagnoResult<()> {
    // Warm-up keeps the step index at 0, so the source stays on throughout.
    for _ in 0..plan.warmup_steps {
        sim.step(Some(source), 0);
    }

    let extent = sim.grid.extent();
    for k in 0..plan.frames {
        let steps = plan.frame_steps(k);
        sim.run_from(steps.start, steps.len(), Some(source))?;

        let scale = lock.scale_for(k, &sim.fields.bz);
        sink.push_frame(&FieldFrame {
            bz: &sim.fields.bz,
            extent,
            scale,
            colormap,
            title: frame_title(k, plan.frames),
        })?;

        if (k + 1) % plan.progress_every() == 0 {
            tracing::info!(frame = k + 1, frames = plan.frames, "[{}/{}]", k + 1, plan.frames);
        }
    }
    Ok(())
}

pub fn execute(args: &ExportArgs) -> MagnoResult<PathBuf> {
    if args.fps == 0 {
        return Err(MagnoError::ConfigError("fps must be > 0".to_string()));
    }
    if !(args.width > 0.0 && args.height > 0.0) || args.dpi == 0 {
        return Err(MagnoError::ConfigError(format!(
            "figure size must be positive, got {}x{} in at {} dpi",
            args.width, args.height, args.dpi
        )));
    }
    let colormap: Colormap = args.colormap.parse()?;

    let config = load_config(&args.params)?;
    let mut sim = MagnoRelSim::from_config(&config)?;
    let pulse = GaussianPulse::from_config(&config);

    let plan = FramePlan::new(
        config.steps,
        args.seconds,
        args.fps,
        args.stride,
        args.warmup_strides,
    );
    tracing::info!(
        stride = plan.stride,
        frames = plan.frames,
        warmup = plan.warmup_steps,
        "frame plan"
    );

    let format = AnimationFormat::detect(&args.outfile, args.mp4);
    let out_path = format.normalise_path(&args.outfile);
    if let Some(parent) = out_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    let size = pixel_size(args.width, args.height, args.dpi);
    tracing::info!(path = %out_path.display(), ?format, width = size.0, height = size.1, "exporting");

    let started = Instant::now();
    let mut sink = open_sink(format, &out_path, size, args.fps, &args.ffmpeg)?;
    let mut lock = ScaleLock::new(args.lock_scale_after);
    record_frames(&mut sim, &pulse, &plan, &mut lock, colormap, sink.as_mut())?;

    let written = sink.finish()?;
    tracing::info!(
        path = %written.display(),
        elapsed_ms = started.elapsed().as_millis() as u64,
        "done"
    );
    Ok(written)
}
