// ─────────────────────────────────────────────────────────────────────
// Magno Relativity — Plots
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Bz heatmaps with a colour bar, and the energy time series.

use crate::colormap::Colormap;
use crate::render_err;
use crate::scale::ColorScale;
use magno_types::error::MagnoResult;
use ndarray::Array2;
use plotters::coord::Shift;
use plotters::prelude::*;
use std::path::Path;

/// Width reserved on the right of a field plot for the colour bar.
const COLORBAR_WIDTH: u32 = 110;

/// Vertical resolution of the colour bar gradient.
const COLORBAR_BANDS: usize = 128;

/// Tick label size. plotters otherwise scales it to the panel, which makes
/// the narrow colour bar unreadable.
const TICK_LABEL_PX: u32 = 12;

/// Pixel size of a figure given in inches at `dpi`.
pub fn pixel_size(width_in: f64, height_in: f64, dpi: u32) -> (u32, u32) {
    let px = |inches: f64| ((inches * dpi as f64).round() as u32).max(1);
    (px(width_in), px(height_in))
}

/// Everything needed to draw one Bz frame.
#[derive(Debug, Clone)]
pub struct FieldFrame<'a> {
    pub bz: &'a Array2<f64>,
    /// Physical extent (x_max, y_max); the plot spans [0, x_max] × [0, y_max].
    pub extent: (f64, f64),
    pub scale: ColorScale,
    pub colormap: Colormap,
    pub title: String,
}

/// Draw a heatmap of `frame.bz` with origin at the lower left, x along the
/// first array axis, plus a colour bar on the right.
pub fn draw_field<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    frame: &FieldFrame<'_>,
) -> MagnoResult<()> {
    area.fill(&WHITE).map_err(render_err)?;
    let (w, _) = area.dim_in_pixel();
    let split = w.saturating_sub(COLORBAR_WIDTH).max(1);
    let (main, bar) = area.split_horizontally(split);

    let (lx, ly) = frame.extent;
    let (ni, nj) = frame.bz.dim();
    let cell_w = lx / ni.max(1) as f64;
    let cell_h = ly / nj.max(1) as f64;

    let mut chart = ChartBuilder::on(&main)
        .margin(10)
        .caption(&frame.title, ("sans-serif", 18))
        .x_label_area_size(40)
        .y_label_area_size(50)
        .build_cartesian_2d(0f64..lx, 0f64..ly)
        .map_err(render_err)?;

    chart
        .configure_mesh()
        .disable_mesh()
        .x_desc("x (m)")
        .y_desc("y (m)")
        .label_style(("sans-serif", TICK_LABEL_PX))
        .axis_desc_style(("sans-serif", 14))
        .draw()
        .map_err(render_err)?;

    let scale = frame.scale;
    let cmap = frame.colormap;
    chart
        .draw_series(frame.bz.indexed_iter().map(|((i, j), &v)| {
            let x0 = i as f64 * cell_w;
            let y0 = j as f64 * cell_h;
            let colour = cmap.colour(scale.normalise(v));
            Rectangle::new([(x0, y0), (x0 + cell_w, y0 + cell_h)], colour.filled())
        }))
        .map_err(render_err)?;

    draw_colorbar(&bar, scale, cmap)
}

fn draw_colorbar<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    scale: ColorScale,
    cmap: Colormap,
) -> MagnoResult<()> {
    let mut chart = ChartBuilder::on(area)
        .margin_top(38)
        .margin_bottom(50)
        .margin_right(10)
        .y_label_area_size(70)
        .build_cartesian_2d(0f64..1f64, scale.vmin..scale.vmax)
        .map_err(render_err)?;

    chart
        .configure_mesh()
        .disable_mesh()
        .disable_x_axis()
        .y_labels(6)
        .y_label_style(("sans-serif", TICK_LABEL_PX))
        .y_label_formatter(&|v| format!("{v:.2e}"))
        .draw()
        .map_err(render_err)?;

    let span = scale.vmax - scale.vmin;
    let band = span / COLORBAR_BANDS as f64;
    chart
        .draw_series((0..COLORBAR_BANDS).map(|k| {
            let y0 = scale.vmin + k as f64 * band;
            let mid = (k as f64 + 0.5) / COLORBAR_BANDS as f64;
            Rectangle::new([(0.0, y0), (1.0, y0 + band)], cmap.colour(mid).filled())
        }))
        .map_err(render_err)?;
    Ok(())
}

/// Render one field frame to a PNG file.
pub fn save_field_png(path: &Path, frame: &FieldFrame<'_>, size: (u32, u32)) -> MagnoResult<()> {
    let root = BitMapBackend::new(path, size).into_drawing_area();
    draw_field(&root, frame)?;
    root.present().map_err(render_err)?;
    tracing::debug!(path = %path.display(), "field plot written");
    Ok(())
}

/// Plot the energy diagnostic against step index. An empty history writes
/// nothing.
pub fn save_energy_png(path: &Path, history: &[f64], size: (u32, u32)) -> MagnoResult<()> {
    if history.is_empty() {
        tracing::debug!("empty energy history, skipping plot");
        return Ok(());
    }

    let (mut y_min, mut y_max) = history
        .iter()
        .copied()
        .filter(|e| e.is_finite())
        .fold(None, |acc: Option<(f64, f64)>, e| match acc {
            None => Some((e, e)),
            Some((lo, hi)) => Some((lo.min(e), hi.max(e))),
        })
        .unwrap_or((-1.0, 1.0));
    if (y_max - y_min).abs() < 1e-300 {
        // flat history; open a window around it
        let delta = if y_max.abs() < 1e-300 { 1.0 } else { 0.1 * y_max.abs() };
        y_min -= delta;
        y_max += delta;
    } else {
        let margin = 0.05 * (y_max - y_min);
        y_min -= margin;
        y_max += margin;
    }
    let x_max = (history.len().max(2) - 1) as f64;

    let root = BitMapBackend::new(path, size).into_drawing_area();
    root.fill(&WHITE).map_err(render_err)?;

    let mut chart = ChartBuilder::on(&root)
        .margin(20)
        .caption("Total Energy vs Time", ("sans-serif", 24))
        .x_label_area_size(45)
        .y_label_area_size(80)
        .build_cartesian_2d(0f64..x_max, y_min..y_max)
        .map_err(render_err)?;

    chart
        .configure_mesh()
        .x_desc("Step")
        .y_desc("Energy (arb)")
        .y_label_formatter(&|v| format!("{v:.3e}"))
        .axis_desc_style(("sans-serif", 16))
        .draw()
        .map_err(render_err)?;

    chart
        .draw_series(LineSeries::new(
            history
                .iter()
                .enumerate()
                .filter(|(_, e)| e.is_finite())
                .map(|(k, &e)| (k as f64, e)),
            &BLUE,
        ))
        .map_err(render_err)?;

    root.present().map_err(render_err)?;
    tracing::debug!(path = %path.display(), points = history.len(), "energy plot written");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::ops::Range;
    use std::time::{SystemTime, UNIX_EPOCH};

    fn scratch_path(tag: &str, ext: &str) -> std::path::PathBuf {
        let stamp = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_nanos())
            .unwrap_or(0);
        std::env::temp_dir().join(format!("magno_render_{tag}_{stamp}.{ext}"))
    }

    fn tilted_field() -> Array2<f64> {
        Array2::from_shape_fn((41, 31), |(i, j)| (i as f64 - 20.0) * 1e-3 + j as f64 * 1e-4)
    }

    fn frame(bz: &Array2<f64>) -> FieldFrame<'_> {
        FieldFrame {
            bz,
            extent: (40.0, 30.0),
            scale: ColorScale::from_percentiles(bz),
            colormap: Colormap::default(),
            title: "Final Bz".to_string(),
        }
    }

    /// Tallest vertical run of non-white pixels in columns `cols` of an RGB
    /// buffer.
    fn tallest_ink_run(buf: &[u8], width: u32, height: u32, cols: Range<u32>) -> u32 {
        let mut tallest = 0;
        for x in cols {
            let mut run = 0;
            for y in 0..height {
                let at = ((y * width + x) * 3) as usize;
                let sum: u32 = buf[at..at + 3].iter().map(|&c| c as u32).sum();
                if sum < 3 * 200 {
                    run += 1;
                    tallest = tallest.max(run);
                } else {
                    run = 0;
                }
            }
        }
        tallest
    }

    #[test]
    fn test_pixel_size() {
        assert_eq!(pixel_size(6.0, 5.0, 120), (720, 600));
        assert_eq!(pixel_size(6.4, 4.8, 160), (1024, 768));
        assert_eq!(pixel_size(0.0, 0.0, 100), (1, 1));
    }

    #[test]
    fn test_colorbar_labels_are_legible() {
        let (w, h) = (720u32, 600u32);
        let bz = tilted_field();
        let mut buf = vec![0u8; (w * h * 3) as usize];
        {
            let root = BitMapBackend::with_buffer(&mut buf, (w, h)).into_drawing_area();
            draw_field(&root, &frame(&bz)).unwrap();
            root.present().unwrap();
        }
        // label column of the colour bar panel, left of its axis line
        let bar_x = w - COLORBAR_WIDTH;
        let glyph = tallest_ink_run(&buf, w, h, bar_x..bar_x + 55);
        assert!(glyph >= 5, "colour bar labels only {glyph} px tall");
    }

    #[test]
    fn test_save_field_png_writes_png() {
        let path = scratch_path("field", "png");
        let bz = tilted_field();
        save_field_png(&path, &frame(&bz), (480, 360)).unwrap();
        let bytes = std::fs::read(&path).unwrap();
        let _ = std::fs::remove_file(&path);
        assert!(bytes.len() > 1000);
        assert_eq!(&bytes[..4], b"\x89PNG");
    }

    #[test]
    fn test_save_energy_png_writes_png() {
        let path = scratch_path("energy", "png");
        let history: Vec<f64> = (0..200).map(|k| 1e-3 * (-(k as f64) / 80.0).exp()).collect();
        save_energy_png(&path, &history, (480, 360)).unwrap();
        let bytes = std::fs::read(&path).unwrap();
        let _ = std::fs::remove_file(&path);
        assert_eq!(&bytes[..4], b"\x89PNG");
    }

    #[test]
    fn test_flat_energy_history_still_plots() {
        let path = scratch_path("energy_flat", "png");
        save_energy_png(&path, &[0.0; 10], (320, 240)).unwrap();
        assert!(path.exists());
        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn test_empty_energy_history_writes_nothing() {
        let path = scratch_path("energy_empty", "png");
        save_energy_png(&path, &[], (320, 240)).unwrap();
        assert!(!path.exists());
    }
}
