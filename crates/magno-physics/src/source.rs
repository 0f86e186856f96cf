//! Bz injection sources.

use magno_types::config::MagnoConfig;
use magno_types::state::StaggeredGrid;
use ndarray::{Array2, Zip};

/// Something that adds to Bz at step `t`.
pub trait BzSource {
    fn apply(&self, t: usize, bz: &mut Array2<f64>);
}

impl<F> BzSource for F
where
    F: Fn(usize, &mut Array2<f64>),
{
    fn apply(&self, t: usize, bz: &mut Array2<f64>) {
        self(t, bz)
    }
}

/// Gaussian blob `amp·exp(-r²/(2σ²))` centred on the grid, added to Bz on
/// every step `t < steps`. Distances are in node-index units.
#[derive(Debug, Clone)]
pub struct GaussianPulse {
    profile: Array2<f64>,
    steps: usize,
}

impl GaussianPulse {
    pub fn new(grid: &StaggeredGrid, amp: f64, sigma: f64, steps: usize) -> Self {
        let (cx, cy) = grid.centre();
        let two_sigma_sq = 2.0 * sigma * sigma;
        let profile = Array2::from_shape_fn(grid.bz_shape(), |(i, j)| {
            let ddx = i as f64 - cx;
            let ddy = j as f64 - cy;
            amp * (-(ddx * ddx + ddy * ddy) / two_sigma_sq).exp()
        });
        GaussianPulse { profile, steps }
    }

    pub fn from_config(config: &MagnoConfig) -> Self {
        Self::new(
            &config.grid(),
            config.src_amp,
            config.src_sigma,
            config.src_steps,
        )
    }

    /// The per-step increment.
    pub fn profile(&self) -> &Array2<f64> {
        &self.profile
    }

    pub fn is_active(&self, t: usize) -> bool {
        t < self.steps
    }
}

impl BzSource for GaussianPulse {
    fn apply(&self, t: usize, bz: &mut Array2<f64>) {
        if !self.is_active(t) {
            return;
        }
        Zip::from(bz).and(&self.profile).for_each(|b, &g| *b += g);
    }
}
