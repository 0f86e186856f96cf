// ─────────────────────────────────────────────────────────────────────
// Magno Relativity — Property-Based Tests (proptest) for magno-math
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Property-based tests for magno-math using proptest.
//!
//! Covers: staggered difference shapes and linearity, the discrete
//! curl identity, percentile ordering and bounds.

use magno_math::stats::{mean_square, percentile};
use magno_math::stencil::{curl_e_interior, diff_x, diff_y};
use ndarray::Array2;
use proptest::prelude::*;

// ── Stencil Properties ───────────────────────────────────────────────

proptest! {
    /// Differences of Bz always land on the matching edge arrays.
    #[test]
    fn diff_shapes(nx in 1usize..40, ny in 1usize..40) {
        let bz = Array2::<f64>::zeros((nx + 1, ny + 1));
        prop_assert_eq!(diff_y(&bz, 1.0).dim(), (nx + 1, ny));
        prop_assert_eq!(diff_x(&bz, 1.0).dim(), (nx, ny + 1));
    }

    /// The staggered curl annihilates edge fields built as mixed
    /// differences of one node potential.
    #[test]
    fn curl_of_potential_field_is_zero(
        nx in 2usize..30,
        ny in 2usize..30,
        kx in 0.1f64..2.0,
        ky in 0.1f64..2.0,
    ) {
        let h = Array2::from_shape_fn((nx + 2, ny + 2), |(i, j)| {
            (kx * i as f64).sin() * (ky * j as f64).cos()
        });
        let ex = Array2::from_shape_fn((nx + 1, ny), |(i, j)| h[[i + 1, j + 1]] - h[[i, j + 1]]);
        let ey = Array2::from_shape_fn((nx, ny + 1), |(i, j)| h[[i + 1, j + 1]] - h[[i + 1, j]]);

        let curl = curl_e_interior(&ex, &ey, 1.0, 1.0);
        prop_assert_eq!(curl.dim(), (nx - 1, ny - 1));
        for &v in curl.iter() {
            prop_assert!(v.abs() < 1e-12, "curl not zero: {}", v);
        }
    }

    /// Differences are linear in the field.
    #[test]
    fn diff_linear(nx in 1usize..20, ny in 1usize..20, a in -5.0f64..5.0) {
        let bz = Array2::from_shape_fn((nx + 1, ny + 1), |(i, j)| (i as f64).powi(2) - j as f64);
        let scaled = &bz * a;
        let d1 = diff_x(&scaled, 0.3);
        let d0 = diff_x(&bz, 0.3);
        for (s, b) in d1.iter().zip(d0.iter()) {
            prop_assert!((s - a * b).abs() < 1e-9);
        }
    }
}

// ── Statistics Properties ────────────────────────────────────────────

proptest! {
    /// Percentiles are monotone in q and stay within [min, max].
    #[test]
    fn percentile_monotone_and_bounded(
        values in prop::collection::vec(-1e3f64..1e3, 1..200),
        q1 in 0.0f64..100.0,
        q2 in 0.0f64..100.0,
    ) {
        let (lo_q, hi_q) = if q1 <= q2 { (q1, q2) } else { (q2, q1) };
        let lo = percentile(&values, lo_q).unwrap();
        let hi = percentile(&values, hi_q).unwrap();
        let min = values.iter().cloned().fold(f64::INFINITY, f64::min);
        let max = values.iter().cloned().fold(f64::NEG_INFINITY, f64::max);

        prop_assert!(lo <= hi + 1e-9);
        prop_assert!(lo >= min - 1e-9 && hi <= max + 1e-9);
    }

    /// Mean square is non-negative and scales quadratically.
    #[test]
    fn mean_square_scaling(
        n in 1usize..30,
        a in -4.0f64..4.0,
    ) {
        let field = Array2::from_shape_fn((n, n), |(i, j)| (i as f64 - j as f64) * 0.1);
        let base = mean_square(&field);
        let scaled = mean_square(&(&field * a));
        prop_assert!(base >= 0.0);
        prop_assert!((scaled - a * a * base).abs() < 1e-9 * (1.0 + base));
    }
}
