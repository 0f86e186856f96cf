// ─────────────────────────────────────────────────────────────────────
// Magno Relativity — State
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
use crate::error::{MagnoError, MagnoResult};
use ndarray::Array2;

/// Uniform 2D Yee-style grid of `nx × ny` cells.
///
/// Bz lives on cell corners, Ex on x-directed edges, Ey on y-directed edges.
/// All field arrays are indexed `[i, j]` with `i` along x.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StaggeredGrid {
    pub nx: usize,
    pub ny: usize,
    pub dx: f64,
    pub dy: f64,
}

impl StaggeredGrid {
    pub fn new(nx: usize, ny: usize, dx: f64, dy: f64) -> Self {
        StaggeredGrid { nx, ny, dx, dy }
    }

    /// Ex shape: (nx + 1, ny).
    pub fn ex_shape(&self) -> (usize, usize) {
        (self.nx + 1, self.ny)
    }

    /// Ey shape: (nx, ny + 1).
    pub fn ey_shape(&self) -> (usize, usize) {
        (self.nx, self.ny + 1)
    }

    /// Bz shape: (nx + 1, ny + 1).
    pub fn bz_shape(&self) -> (usize, usize) {
        (self.nx + 1, self.ny + 1)
    }

    /// Physical extent (nx·dx, ny·dy).
    pub fn extent(&self) -> (f64, f64) {
        (self.nx as f64 * self.dx, self.ny as f64 * self.dy)
    }

    /// Grid centre in Bz node-index units. Integer halving, then a half-node
    /// shift, so an even grid puts the centre between four nodes.
    pub fn centre(&self) -> (f64, f64) {
        ((self.nx / 2) as f64 + 0.5, (self.ny / 2) as f64 + 0.5)
    }
}

/// The three field components of the simulation.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldState {
    pub ex: Array2<f64>,
    pub ey: Array2<f64>,
    pub bz: Array2<f64>,
}

impl FieldState {
    pub fn zeros(grid: &StaggeredGrid) -> Self {
        FieldState {
            ex: Array2::zeros(grid.ex_shape()),
            ey: Array2::zeros(grid.ey_shape()),
            bz: Array2::zeros(grid.bz_shape()),
        }
    }

    /// Verify every component has the shape the grid prescribes.
    pub fn check_shapes(&self, grid: &StaggeredGrid) -> MagnoResult<()> {
        for (field, arr, expected) in [
            ("ex", &self.ex, grid.ex_shape()),
            ("ey", &self.ey, grid.ey_shape()),
            ("bz", &self.bz, grid.bz_shape()),
        ] {
            let got = arr.dim();
            if got != expected {
                return Err(MagnoError::ShapeMismatch {
                    field,
                    expected,
                    got,
                });
            }
        }
        Ok(())
    }
}
