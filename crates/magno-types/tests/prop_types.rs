// ─────────────────────────────────────────────────────────────────────
// Magno Relativity — Property-Based Tests (proptest) for magno-types
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Property-based tests for magno-types using proptest.
//!
//! Covers: StaggeredGrid shape invariants, FieldState shapes,
//! configuration validation.

use magno_types::config::MagnoConfig;
use magno_types::state::{FieldState, StaggeredGrid};
use proptest::prelude::*;

// ── StaggeredGrid Invariants ─────────────────────────────────────────

proptest! {
    /// Edge and node arrays share the appropriate axis with Bz.
    #[test]
    fn staggered_shapes_consistent(
        nx in 1usize..128,
        ny in 1usize..128,
    ) {
        let grid = StaggeredGrid::new(nx, ny, 1.0, 1.0);
        let (bx, by) = grid.bz_shape();

        prop_assert_eq!(grid.ex_shape(), (bx, by - 1));
        prop_assert_eq!(grid.ey_shape(), (bx - 1, by));
        prop_assert_eq!(grid.bz_shape(), (nx + 1, ny + 1));
    }

    /// The centre always sits inside the Bz node range.
    #[test]
    fn centre_inside_grid(
        nx in 1usize..256,
        ny in 1usize..256,
    ) {
        let grid = StaggeredGrid::new(nx, ny, 1.0, 1.0);
        let (cx, cy) = grid.centre();
        prop_assert!(cx > 0.0 && cx <= nx as f64 + 0.5);
        prop_assert!(cy > 0.0 && cy <= ny as f64 + 0.5);
    }

    /// Extent scales linearly with spacing.
    #[test]
    fn extent_is_cells_times_spacing(
        nx in 1usize..64,
        ny in 1usize..64,
        dx in 1e-3f64..10.0,
        dy in 1e-3f64..10.0,
    ) {
        let grid = StaggeredGrid::new(nx, ny, dx, dy);
        let (lx, ly) = grid.extent();
        prop_assert!((lx - nx as f64 * dx).abs() < 1e-9);
        prop_assert!((ly - ny as f64 * dy).abs() < 1e-9);
    }
}

// ── FieldState Invariants ────────────────────────────────────────────

proptest! {
    /// A fresh FieldState always passes its own shape check.
    #[test]
    fn field_state_shapes(
        nx in 1usize..96,
        ny in 1usize..96,
    ) {
        let grid = StaggeredGrid::new(nx, ny, 1.0, 1.0);
        let state = FieldState::zeros(&grid);
        prop_assert!(state.check_shapes(&grid).is_ok());
        prop_assert_eq!(state.bz.dim(), grid.bz_shape());
    }
}

// ── MagnoConfig Validation ───────────────────────────────────────────

proptest! {
    /// Any positive spacing and timestep produces a valid config.
    #[test]
    fn positive_config_validates(
        nx in 1usize..512,
        ny in 1usize..512,
        dx in 1e-4f64..10.0,
        dy in 1e-4f64..10.0,
        dt in 1e-6f64..1.0,
        steps in 0usize..10_000,
    ) {
        let json = format!(
            r#"{{"nx": {nx}, "ny": {ny}, "dx": {dx}, "dy": {dy}, "dt": {dt}, "steps": {steps}}}"#
        );
        let cfg = MagnoConfig::from_json(&json);
        prop_assert!(cfg.is_ok(), "unexpected error: {:?}", cfg.err());
    }

    /// Non-positive timesteps are always rejected.
    #[test]
    fn non_positive_dt_rejected(dt in -10.0f64..=0.0) {
        let json = format!(
            r#"{{"nx": 8, "ny": 8, "dx": 1.0, "dy": 1.0, "dt": {dt}, "steps": 1}}"#
        );
        prop_assert!(MagnoConfig::from_json(&json).is_err());
    }

    /// CFL number grows linearly in dt.
    #[test]
    fn cfl_linear_in_dt(dt in 1e-4f64..1.0) {
        let json = format!(
            r#"{{"nx": 8, "ny": 8, "dx": 1.0, "dy": 1.0, "dt": {dt}, "steps": 1}}"#
        );
        let cfg = MagnoConfig::from_json(&json).unwrap();
        prop_assert!((cfg.cfl_number() - dt * 2f64.sqrt()).abs() < 1e-9);
    }
}
