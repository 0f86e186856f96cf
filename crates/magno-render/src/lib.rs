//! Rendering for Magno Relativity: colormaps, colour scaling, field and
//! energy plots, and animation sinks (GIF directly, MP4 through ffmpeg).

pub mod animation;
pub mod colormap;
pub mod plot;
pub mod scale;

use magno_types::error::MagnoError;

pub(crate) fn render_err<E: std::fmt::Display>(e: E) -> MagnoError {
    MagnoError::Render(e.to_string())
}
