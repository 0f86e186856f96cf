//! Animation sinks: frames go straight into a GIF, or into a PNG sequence
//! that ffmpeg encodes to MP4 on `finish`.

use crate::plot::{draw_field, save_field_png, FieldFrame};
use crate::render_err;
use magno_types::error::{MagnoError, MagnoResult};
use plotters::coord::Shift;
use plotters::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

/// MP4 video bitrate handed to ffmpeg.
pub const MP4_BITRATE: &str = "1800k";

/// Output container of an exported animation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnimationFormat {
    Gif,
    Mp4,
}

impl AnimationFormat {
    pub fn extension(self) -> &'static str {
        match self {
            AnimationFormat::Gif => "gif",
            AnimationFormat::Mp4 => "mp4",
        }
    }

    /// MP4 when forced or when the path already ends in `.mp4`, GIF
    /// otherwise.
    pub fn detect(path: &Path, force_mp4: bool) -> Self {
        let is_mp4 = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.eq_ignore_ascii_case("mp4"))
            .unwrap_or(false);
        if force_mp4 || is_mp4 {
            AnimationFormat::Mp4
        } else {
            AnimationFormat::Gif
        }
    }

    /// `path` with its extension replaced by this format's, unless it
    /// already matches (case-insensitively).
    pub fn normalise_path(self, path: &Path) -> PathBuf {
        let matches = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.eq_ignore_ascii_case(self.extension()))
            .unwrap_or(false);
        if matches {
            path.to_path_buf()
        } else {
            path.with_extension(self.extension())
        }
    }
}

/// Destination for rendered animation frames.
pub trait FrameSink {
    fn push_frame(&mut self, frame: &FieldFrame<'_>) -> MagnoResult<()>;

    /// Flush and close the output. Returns the written file.
    fn finish(self: Box<Self>) -> MagnoResult<PathBuf>;
}

/// Animated GIF written frame by frame.
pub struct GifRecorder {
    root: DrawingArea<BitMapBackend<'static>, Shift>,
    path: PathBuf,
    frames: usize,
}

impl GifRecorder {
    pub fn create(path: &Path, size: (u32, u32), fps: u32) -> MagnoResult<Self> {
        let delay_ms = 1000 / fps.max(1);
        let backend = BitMapBackend::gif(path, size, delay_ms).map_err(render_err)?;
        Ok(GifRecorder {
            root: backend.into_drawing_area(),
            path: path.to_path_buf(),
            frames: 0,
        })
    }
}

impl FrameSink for GifRecorder {
    fn push_frame(&mut self, frame: &FieldFrame<'_>) -> MagnoResult<()> {
        draw_field(&self.root, frame)?;
        self.root.present().map_err(render_err)?;
        self.frames += 1;
        Ok(())
    }

    fn finish(self: Box<Self>) -> MagnoResult<PathBuf> {
        tracing::info!(path = %self.path.display(), frames = self.frames, "GIF written");
        Ok(self.path)
    }
}

/// PNG frames in a scratch directory next to the target, encoded to MP4
/// by ffmpeg when finished.
pub struct Mp4Recorder {
    ffmpeg: String,
    out: PathBuf,
    frames_dir: PathBuf,
    size: (u32, u32),
    fps: u32,
    frames: usize,
}

impl Mp4Recorder {
    /// Frames go to `<out>.frames/`, which is emptied first so no frame of an
    /// earlier export can end up in this one.
    pub fn create(ffmpeg: &str, out: &Path, size: (u32, u32), fps: u32) -> MagnoResult<Self> {
        let frames_dir = out.with_extension("frames");
        if frames_dir.exists() {
            tracing::debug!(dir = %frames_dir.display(), "clearing stale frames");
            fs::remove_dir_all(&frames_dir)?;
        }
        fs::create_dir_all(&frames_dir)?;
        Ok(Mp4Recorder {
            ffmpeg: ffmpeg.to_string(),
            out: out.to_path_buf(),
            frames_dir,
            size,
            fps: fps.max(1),
            frames: 0,
        })
    }

    fn frame_path(&self, index: usize) -> PathBuf {
        self.frames_dir.join(format!("frame_{index:05}.png"))
    }
}

impl FrameSink for Mp4Recorder {
    fn push_frame(&mut self, frame: &FieldFrame<'_>) -> MagnoResult<()> {
        save_field_png(&self.frame_path(self.frames), frame, self.size)?;
        self.frames += 1;
        Ok(())
    }

    fn finish(self: Box<Self>) -> MagnoResult<PathBuf> {
        let pattern = self.frames_dir.join("frame_%05d.png");
        let encoded = encode_mp4(&self.ffmpeg, &pattern, self.fps, &self.out);
        let cleaned = fs::remove_dir_all(&self.frames_dir);
        encoded?;
        cleaned?;
        tracing::info!(path = %self.out.display(), frames = self.frames, "MP4 written");
        Ok(self.out)
    }
}

/// ffmpeg arguments for encoding a numbered PNG sequence.
pub fn ffmpeg_args(pattern: &Path, fps: u32, out: &Path) -> Vec<String> {
    vec![
        "-y".to_string(),
        "-loglevel".to_string(),
        "error".to_string(),
        "-framerate".to_string(),
        fps.to_string(),
        "-i".to_string(),
        pattern.display().to_string(),
        // libx264 with yuv420p needs even dimensions
        "-vf".to_string(),
        "pad=ceil(iw/2)*2:ceil(ih/2)*2".to_string(),
        "-c:v".to_string(),
        "libx264".to_string(),
        "-b:v".to_string(),
        MP4_BITRATE.to_string(),
        "-pix_fmt".to_string(),
        "yuv420p".to_string(),
        out.display().to_string(),
    ]
}

/// Run ffmpeg on a numbered PNG sequence.
pub fn encode_mp4(ffmpeg: &str, pattern: &Path, fps: u32, out: &Path) -> MagnoResult<()> {
    let args = ffmpeg_args(pattern, fps, out);
    tracing::debug!(ffmpeg, ?args, "invoking ffmpeg");
    let status = Command::new(ffmpeg).args(&args).status().map_err(|e| {
        MagnoError::Render(format!("failed to launch '{ffmpeg}' (is ffmpeg installed?): {e}"))
    })?;
    if !status.success() {
        return Err(MagnoError::Render(format!(
            "ffmpeg exited with status {status}"
        )));
    }
    Ok(())
}

/// Open the sink for `format`.
pub fn open_sink(
    format: AnimationFormat,
    out: &Path,
    size: (u32, u32),
    fps: u32,
    ffmpeg: &str,
) -> MagnoResult<Box<dyn FrameSink>> {
    Ok(match format {
        AnimationFormat::Gif => Box::new(GifRecorder::create(out, size, fps)?),
        AnimationFormat::Mp4 => Box::new(Mp4Recorder::create(ffmpeg, out, size, fps)?),
    })
}
