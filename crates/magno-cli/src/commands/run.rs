//! `magno-rel run`: simulate, then write the final field, the energy plot,
//! a JSON summary and an `.npz` snapshot.

use crate::commands::load_config;
use crate::snapshot::{read_fields_npz, write_fields_npz};
use clap::Args;
use magno_physics::magno_rel::MagnoRelSim;
use magno_physics::source::GaussianPulse;
use magno_render::colormap::Colormap;
use magno_render::plot::{pixel_size, save_energy_png, save_field_png, FieldFrame};
use magno_render::scale::ColorScale;
use magno_types::config::MagnoConfig;
use magno_types::error::MagnoResult;
use magno_types::state::FieldState;
use serde::{Deserialize, Serialize};
use std::fs::{self, File};
use std::path::{Path, PathBuf};
use std::time::Instant;

pub const FIELD_PLOT: &str = "field_B_final.png";
pub const ENERGY_PLOT: &str = "energy_timeseries.png";
pub const SUMMARY_FILE: &str = "run_summary.json";
pub const SNAPSHOT_FILE: &str = "fields_final.npz";

/// Figure size of the static plots, inches at `PLOT_DPI`.
const PLOT_SIZE_IN: (f64, f64) = (6.4, 4.8);
const PLOT_DPI: u32 = 160;

#[derive(Debug, Clone, Args)]
pub struct RunArgs {
    /// Parameter file
    #[arg(short, long, default_value = "params.json")]
    pub params: PathBuf,

    /// Output directory
    #[arg(short, long, default_value = "outputs")]
    pub out_dir: PathBuf,

    /// Skip the PNG plots
    #[arg(long)]
    pub no_plots: bool,

    /// Start from the fields of a `fields_final.npz` snapshot instead of rest
    #[arg(long)]
    pub resume: Option<PathBuf>,

    /// Step index of the first step, as seen by the source
    #[arg(long, default_value_t = 0, requires = "resume")]
    pub start_step: usize,
}

/// Contents of `run_summary.json`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunSummary {
    pub params: MagnoConfig,
    pub final_energy: Option<f64>,
    pub steps: usize,
}

impl RunSummary {
    pub fn write_to_dir(&self, out_dir: &Path) -> MagnoResult<PathBuf> {
        let path = out_dir.join(SUMMARY_FILE);
        let file = File::create(&path)?;
        serde_json::to_writer_pretty(file, self)?;
        Ok(path)
    }
}

/// Simulate `config.steps` steps from rest with the configured pulse.
pub fn simulate(config: &MagnoConfig) -> MagnoResult<MagnoRelSim> {
    simulate_from(config, None, 0)
}

/// Simulate `config.steps` steps at `t = t0..`, starting from `initial` when
/// given and from rest otherwise.
pub fn simulate_from(
    config: &MagnoConfig,
    initial: Option<FieldState>,
    t0: usize,
) -> MagnoResult<MagnoRelSim> {
    let mut sim = MagnoRelSim::from_config(config)?;
    if let Some(fields) = initial {
        sim = sim.with_fields(fields)?;
    }
    let pulse = GaussianPulse::from_config(config);
    sim.run_from(t0, config.steps, Some(&pulse))?;
    Ok(sim)
}

pub fn execute(args: &RunArgs) -> MagnoResult<RunSummary> {
    let config = load_config(&args.params)?;

    let initial = match &args.resume {
        Some(path) => {
            tracing::info!(snapshot = %path.display(), t0 = args.start_step, "resuming");
            Some(read_fields_npz(path)?)
        }
        None => None,
    };

    let started = Instant::now();
    let sim = simulate_from(&config, initial, args.start_step)?;
    tracing::info!(
        steps = config.steps,
        elapsed_ms = started.elapsed().as_millis() as u64,
        final_energy = sim.final_energy().unwrap_or(0.0),
        "simulation finished"
    );

    fs::create_dir_all(&args.out_dir)?;

    if !args.no_plots {
        let size = pixel_size(PLOT_SIZE_IN.0, PLOT_SIZE_IN.1, PLOT_DPI);
        let frame = FieldFrame {
            bz: &sim.fields.bz,
            extent: sim.grid.extent(),
            scale: ColorScale::from_range(&sim.fields.bz),
            colormap: Colormap::default(),
            title: "Final Bz".to_string(),
        };
        save_field_png(&args.out_dir.join(FIELD_PLOT), &frame, size)?;
        save_energy_png(&args.out_dir.join(ENERGY_PLOT), &sim.energy_history, size)?;
    }

    write_fields_npz(&args.out_dir.join(SNAPSHOT_FILE), &sim.fields)?;

    let summary = RunSummary {
        params: config.clone(),
        final_energy: sim.final_energy(),
        steps: config.steps,
    };
    let path = summary.write_to_dir(&args.out_dir)?;
    tracing::info!(out_dir = %args.out_dir.display(), summary = %path.display(), "outputs written");
    Ok(summary)
}
