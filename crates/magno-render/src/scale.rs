//! Colour-scale selection for field frames.

use magno_math::stats::{finite_range, percentile};
use ndarray::Array2;

/// Low/high percentiles used for animation frames.
pub const FRAME_PERCENTILES: (f64, f64) = (2.0, 98.0);

/// Fallback half-width when a frame has no spread.
pub const DEGENERATE_HALF_WIDTH: f64 = 1e-6;

/// Value range mapped onto the colormap.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColorScale {
    pub vmin: f64,
    pub vmax: f64,
}

impl ColorScale {
    fn degenerate() -> Self {
        ColorScale {
            vmin: -DEGENERATE_HALF_WIDTH,
            vmax: DEGENERATE_HALF_WIDTH,
        }
    }

    fn checked(vmin: f64, vmax: f64) -> Self {
        if vmin == vmax {
            Self::degenerate()
        } else {
            ColorScale { vmin, vmax }
        }
    }

    /// 2nd..98th percentile of the field; a flat or empty field falls back
    /// to ±1e-6.
    pub fn from_percentiles(field: &Array2<f64>) -> Self {
        let (lo, hi) = FRAME_PERCENTILES;
        match (percentile(field, lo), percentile(field, hi)) {
            (Some(vmin), Some(vmax)) => Self::checked(vmin, vmax),
            _ => Self::degenerate(),
        }
    }

    /// Full finite range of the field, with the same fallback.
    pub fn from_range(field: &Array2<f64>) -> Self {
        match finite_range(field) {
            Some((vmin, vmax)) => Self::checked(vmin, vmax),
            None => Self::degenerate(),
        }
    }

    /// Position of `v` within the scale, unclamped.
    #[inline]
    pub fn normalise(&self, v: f64) -> f64 {
        (v - self.vmin) / (self.vmax - self.vmin)
    }
}

/// Per-frame scale that freezes after a number of frames so late, faint
/// frames are not stretched to full contrast.
#[derive(Debug, Clone)]
pub struct ScaleLock {
    lock_after: usize,
    locked: Option<ColorScale>,
}

impl ScaleLock {
    /// `lock_after == 0` keeps rescaling every frame.
    pub fn new(lock_after: usize) -> Self {
        ScaleLock {
            lock_after,
            locked: None,
        }
    }

    pub fn locked(&self) -> Option<ColorScale> {
        self.locked
    }

    /// Scale for frame `frame` showing `field`.
    pub fn scale_for(&mut self, frame: usize, field: &Array2<f64>) -> ColorScale {
        match self.locked {
            Some(scale) if frame >= self.lock_after => scale,
            _ => {
                let scale = ColorScale::from_percentiles(field);
                if self.lock_after > 0 && frame + 1 == self.lock_after {
                    self.locked = Some(scale);
                }
                scale
            }
        }
    }
}
