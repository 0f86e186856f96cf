// ─────────────────────────────────────────────────────────────────────
// Magno Relativity — Config
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
use crate::error::{MagnoError, MagnoResult};
use crate::state::StaggeredGrid;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Simulation parameters.
/// Maps 1:1 to the flat `params.json` schema; grid and timing keys are
/// required, physics and source keys fall back to defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MagnoConfig {
    pub nx: usize,
    pub ny: usize,
    pub dx: f64,
    pub dy: f64,
    pub dt: f64,
    pub steps: usize,

    /// Vacuum propagation speed.
    #[serde(default = "default_c")]
    pub c: f64,
    /// Field-strength slow-down: c_eff = c / sqrt(1 + k_rel·Bz²).
    #[serde(default)]
    pub k_rel: f64,
    /// Coupling of curl(Bz) into the emergent E field.
    #[serde(default)]
    pub alpha_emerge: f64,
    /// Saturation of the E response: 1 + beta_sat·E².
    #[serde(default)]
    pub beta_sat: f64,
    /// Linear damping rate of E.
    #[serde(default)]
    pub sigma_damp: f64,

    /// Number of leading steps during which the pulse is injected.
    #[serde(default = "default_src_steps")]
    pub src_steps: usize,
    #[serde(default = "default_src_amp")]
    pub src_amp: f64,
    /// Pulse width in grid nodes.
    #[serde(default = "default_src_sigma")]
    pub src_sigma: f64,
}

fn default_c() -> f64 {
    1.0
}
fn default_src_steps() -> usize {
    50
}
fn default_src_amp() -> f64 {
    1.0
}
fn default_src_sigma() -> f64 {
    6.0
}

fn require_positive(name: &str, v: f64) -> MagnoResult<()> {
    if !v.is_finite() || v <= 0.0 {
        return Err(MagnoError::ConfigError(format!(
            "{name} must be finite and > 0, got {v}"
        )));
    }
    Ok(())
}

fn require_non_negative(name: &str, v: f64) -> MagnoResult<()> {
    if !v.is_finite() || v < 0.0 {
        return Err(MagnoError::ConfigError(format!(
            "{name} must be finite and >= 0, got {v}"
        )));
    }
    Ok(())
}

fn require_finite(name: &str, v: f64) -> MagnoResult<()> {
    if !v.is_finite() {
        return Err(MagnoError::ConfigError(format!(
            "{name} must be finite, got {v}"
        )));
    }
    Ok(())
}

impl MagnoConfig {
    /// Load from a JSON file and validate.
    pub fn from_file(path: impl AsRef<Path>) -> MagnoResult<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_json(&contents)
    }

    /// Parse from a JSON string and validate.
    pub fn from_json(json: &str) -> MagnoResult<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> MagnoResult<()> {
        if self.nx == 0 || self.ny == 0 {
            return Err(MagnoError::ConfigError(format!(
                "grid must have at least one cell per axis, got {}x{}",
                self.nx, self.ny
            )));
        }
        require_positive("dx", self.dx)?;
        require_positive("dy", self.dy)?;
        require_positive("dt", self.dt)?;
        require_positive("c", self.c)?;
        require_positive("src_sigma", self.src_sigma)?;
        require_non_negative("k_rel", self.k_rel)?;
        require_non_negative("beta_sat", self.beta_sat)?;
        require_non_negative("sigma_damp", self.sigma_damp)?;
        require_finite("alpha_emerge", self.alpha_emerge)?;
        require_finite("src_amp", self.src_amp)?;
        Ok(())
    }

    /// Create the staggered grid described by this config.
    pub fn grid(&self) -> StaggeredGrid {
        StaggeredGrid::new(self.nx, self.ny, self.dx, self.dy)
    }

    /// Courant number of the vacuum speed. Above 1 the leapfrog is unstable
    /// until the field is strong enough for c_eff to pull it back.
    pub fn cfl_number(&self) -> f64 {
        self.c * self.dt * (1.0 / (self.dx * self.dx) + 1.0 / (self.dy * self.dy)).sqrt()
    }
}
