pub mod export;
pub mod run;

use magno_types::config::MagnoConfig;
use magno_types::error::MagnoResult;
use std::path::Path;

/// Load params and report anything suspicious before a run.
pub(crate) fn load_config(path: &Path) -> MagnoResult<MagnoConfig> {
    let config = MagnoConfig::from_file(path)?;
    tracing::info!(
        path = %path.display(),
        nx = config.nx,
        ny = config.ny,
        steps = config.steps,
        "loaded parameters"
    );
    let cfl = config.cfl_number();
    if cfl > 1.0 {
        tracing::warn!(cfl, "timestep exceeds the vacuum CFL limit; the run may diverge");
    }
    Ok(config)
}
