//! Staggered finite differences on the Yee grid.
//!
//! Shapes follow `StaggeredGrid`: Ex (nx+1, ny), Ey (nx, ny+1),
//! Bz (nx+1, ny+1), all indexed `[i, j]` with `i` along x.

use ndarray::{s, Array2, Zip};

/// Curl of E at the interior Bz nodes.
///
/// Returns an `(nx-1, ny-1)` array whose entry `[i-1, j-1]` belongs to Bz
/// node `(i, j)` for `i in 1..nx`, `j in 1..ny`:
/// `(Ex[i,j] - Ex[i,j-1])/dy - (Ey[i,j] - Ey[i-1,j])/dx`.
pub fn curl_e_interior(ex: &Array2<f64>, ey: &Array2<f64>, dx: f64, dy: f64) -> Array2<f64> {
    let (nx1, ny) = ex.dim();
    let nx = nx1 - 1;
    debug_assert_eq!(ey.dim(), (nx, ny + 1));

    let ni = nx.saturating_sub(1);
    let nj = ny.saturating_sub(1);
    let mut curl = Array2::zeros((ni, nj));
    if ni == 0 || nj == 0 {
        return curl;
    }

    let ex_hi = ex.slice(s![1..nx, 1..ny]);
    let ex_lo = ex.slice(s![1..nx, 0..ny - 1]);
    let ey_hi = ey.slice(s![1..nx, 1..ny]);
    let ey_lo = ey.slice(s![0..nx - 1, 1..ny]);

    Zip::from(&mut curl)
        .and(&ex_hi)
        .and(&ex_lo)
        .and(&ey_hi)
        .and(&ey_lo)
        .for_each(|c, &exh, &exl, &eyh, &eyl| {
            *c = (exh - exl) / dy - (eyh - eyl) / dx;
        });
    curl
}

/// Forward difference of Bz along y: `(Bz[:, 1:] - Bz[:, :-1]) / dy`.
/// The result has the Ex shape.
pub fn diff_y(bz: &Array2<f64>, dy: f64) -> Array2<f64> {
    let (n0, n1) = bz.dim();
    if n1 < 2 {
        return Array2::zeros((n0, 0));
    }
    let hi = bz.slice(s![.., 1..]);
    let lo = bz.slice(s![.., ..n1 - 1]);
    (&hi - &lo) / dy
}

/// Forward difference of Bz along x: `(Bz[1:, :] - Bz[:-1, :]) / dx`.
/// The result has the Ey shape.
pub fn diff_x(bz: &Array2<f64>, dx: f64) -> Array2<f64> {
    let (n0, n1) = bz.dim();
    if n0 < 2 {
        return Array2::zeros((0, n1));
    }
    let hi = bz.slice(s![1.., ..]);
    let lo = bz.slice(s![..n0 - 1, ..]);
    (&hi - &lo) / dx
}
