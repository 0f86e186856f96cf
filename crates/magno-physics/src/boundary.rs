//! Absorbing margin applied after every step.

use ndarray::{s, Array2};

/// Width of the damped margin, in array entries.
pub const EDGE_MARGIN: usize = 4;

/// Per-step multiplier inside the margin.
pub const EDGE_FACTOR: f64 = 0.9;

/// Edge-damping settings.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EdgeDamping {
    pub margin: usize,
    pub factor: f64,
}

impl Default for EdgeDamping {
    fn default() -> Self {
        EdgeDamping {
            margin: EDGE_MARGIN,
            factor: EDGE_FACTOR,
        }
    }
}

impl EdgeDamping {
    pub fn apply(&self, a: &mut Array2<f64>) {
        edge_damp(a, self.margin, self.factor);
    }
}

/// Scale the outer `margin` rows and columns of `a` by `factor`.
///
/// The four strips are scaled one after another (first rows, last rows,
/// first columns, last columns), so corners receive `factor²`. A strip
/// wider than its axis covers the whole axis.
pub fn edge_damp(a: &mut Array2<f64>, margin: usize, factor: f64) {
    if margin == 0 {
        return;
    }
    let (n0, n1) = a.dim();
    let m0 = margin.min(n0);
    let m1 = margin.min(n1);

    a.slice_mut(s![..m0, ..]).mapv_inplace(|v| v * factor);
    a.slice_mut(s![n0 - m0.., ..]).mapv_inplace(|v| v * factor);
    a.slice_mut(s![.., ..m1]).mapv_inplace(|v| v * factor);
    a.slice_mut(s![.., n1 - m1..]).mapv_inplace(|v| v * factor);
}
