// ─────────────────────────────────────────────────────────────────────
// Magno Relativity — Simulator
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! 2D toy simulator with a primary Bz and an emergent (Ex, Ey).
//!
//! Leapfrog on a Yee-style staggered grid:
//!
//! ```text
//! dBz/dt = c_eff² · (dEx/dy - dEy/dx),     c_eff² = c² / (1 + k_rel·Bz²)
//! dEx/dt =  alpha · dBz/dy / (1 + beta·Ex²) - sigma·Ex
//! dEy/dt = -alpha · dBz/dx / (1 + beta·Ey²) - sigma·Ey
//! ```
//!
//! Bz is advanced first, the source is injected, then E is advanced from
//! the updated Bz. Every field is damped in a fixed margin at the edges.

use crate::boundary::EdgeDamping;
use crate::source::BzSource;
use magno_math::stats::mean_square;
use magno_math::stencil::{curl_e_interior, diff_x, diff_y};
use magno_types::config::MagnoConfig;
use magno_types::error::{MagnoError, MagnoResult};
use magno_types::state::{FieldState, StaggeredGrid};
use ndarray::{s, Array2, Zip};

/// Physical coefficients and timestep.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PhysicsParams {
    pub dt: f64,
    pub c: f64,
    pub k_rel: f64,
    pub alpha_emerge: f64,
    pub beta_sat: f64,
    pub sigma_damp: f64,
}

impl PhysicsParams {
    pub fn from_config(config: &MagnoConfig) -> Self {
        PhysicsParams {
            dt: config.dt,
            c: config.c,
            k_rel: config.k_rel,
            alpha_emerge: config.alpha_emerge,
            beta_sat: config.beta_sat,
            sigma_damp: config.sigma_damp,
        }
    }

    /// Squared effective speed at a node carrying `bz`.
    #[inline]
    pub fn c_eff_sq(&self, bz: f64) -> f64 {
        let c2 = self.c * self.c;
        if self.k_rel == 0.0 {
            c2
        } else {
            c2 / (1.0 + self.k_rel * bz * bz)
        }
    }
}

/// Staggered-grid Bz/E simulator.
#[derive(Debug, Clone)]
pub struct MagnoRelSim {
    pub grid: StaggeredGrid,
    pub params: PhysicsParams,
    pub fields: FieldState,
    pub edge: EdgeDamping,
    /// Energy diagnostic after each step.
    pub energy_history: Vec<f64>,
}

impl MagnoRelSim {
    /// Zero fields on `grid`.
    pub fn new(grid: StaggeredGrid, params: PhysicsParams) -> Self {
        MagnoRelSim {
            fields: FieldState::zeros(&grid),
            grid,
            params,
            edge: EdgeDamping::default(),
            energy_history: Vec::new(),
        }
    }

    pub fn from_config(config: &MagnoConfig) -> MagnoResult<Self> {
        config.validate()?;
        Ok(Self::new(config.grid(), PhysicsParams::from_config(config)))
    }

    /// Replace the fields, e.g. to resume from a snapshot.
    pub fn with_fields(mut self, fields: FieldState) -> MagnoResult<Self> {
        fields.check_shapes(&self.grid)?;
        self.fields = fields;
        Ok(self)
    }

    /// Effective propagation speed at every Bz node.
    pub fn c_eff(&self) -> Array2<f64> {
        self.fields.bz.mapv(|b| self.params.c_eff_sq(b).sqrt())
    }

    /// `mean(Bz²) + mean(Ex²) + mean(Ey²)`.
    pub fn energy(&self) -> f64 {
        mean_square(&self.fields.bz) + mean_square(&self.fields.ex) + mean_square(&self.fields.ey)
    }

    pub fn final_energy(&self) -> Option<f64> {
        self.energy_history.last().copied()
    }

    /// Advance one step. `t` is the step index handed to the source.
    /// Returns the energy after the step.
    pub fn step(&mut self, source: Option<&dyn BzSource>, t: usize) -> f64 {
        let StaggeredGrid { nx, ny, dx, dy } = self.grid;
        let p = self.params;
        let dt = p.dt;

        // Bz from curl E; interior nodes only. c_eff uses the pre-step Bz
        // of the same node, which is read before it is written.
        let curl = curl_e_interior(&self.fields.ex, &self.fields.ey, dx, dy);
        if !curl.is_empty() {
            let mut interior = self.fields.bz.slice_mut(s![1..nx, 1..ny]);
            Zip::from(&mut interior).and(&curl).for_each(|b, &cu| {
                *b += dt * p.c_eff_sq(*b) * cu;
            });
        }

        if let Some(src) = source {
            src.apply(t, &mut self.fields.bz);
        }

        // E from the updated Bz; saturation uses the pre-update E.
        let dbz_dy = diff_y(&self.fields.bz, dy);
        let dbz_dx = diff_x(&self.fields.bz, dx);
        let (alpha, beta, sigma) = (p.alpha_emerge, p.beta_sat, p.sigma_damp);

        Zip::from(&mut self.fields.ex)
            .and(&dbz_dy)
            .for_each(|e, &g| {
                let sat = 1.0 + beta * *e * *e;
                *e += dt * (alpha * g / sat - sigma * *e);
            });
        Zip::from(&mut self.fields.ey)
            .and(&dbz_dx)
            .for_each(|e, &g| {
                let sat = 1.0 + beta * *e * *e;
                *e += dt * (alpha * -g / sat - sigma * *e);
            });

        self.edge.apply(&mut self.fields.ex);
        self.edge.apply(&mut self.fields.ey);
        self.edge.apply(&mut self.fields.bz);

        let energy = self.energy();
        self.energy_history.push(energy);
        energy
    }

    /// Run steps `t = 0..n_steps`.
    pub fn run(&mut self, n_steps: usize, source: Option<&dyn BzSource>) -> MagnoResult<()> {
        self.run_from(0, n_steps, source)
    }

    /// Run steps `t = t0..t0 + n_steps`, stopping at the first non-finite
    /// energy.
    pub fn run_from(
        &mut self,
        t0: usize,
        n_steps: usize,
        source: Option<&dyn BzSource>,
    ) -> MagnoResult<()> {
        for t in t0..t0 + n_steps {
            let energy = self.step(source, t);
            if !energy.is_finite() {
                tracing::warn!(step = t, energy, "field energy is no longer finite");
                return Err(MagnoError::SolverDiverged {
                    step: t,
                    message: format!("energy became {energy}"),
                });
            }
        }
        tracing::debug!(
            t0,
            n_steps,
            energy = self.final_energy().unwrap_or(0.0),
            "run segment complete"
        );
        Ok(())
    }
}
