//! Field snapshots as `.npz` archives (arrays `ex`, `ey`, `bz`).

use magno_types::error::{MagnoError, MagnoResult};
use magno_types::state::FieldState;
use ndarray::Array2;
use ndarray_npy::{NpzReader, NpzWriter};
use std::fs::File;
use std::path::Path;

pub fn write_fields_npz(path: &Path, fields: &FieldState) -> MagnoResult<()> {
    let file = File::create(path)?;
    let mut npz = NpzWriter::new(file);
    for (name, arr) in [("ex", &fields.ex), ("ey", &fields.ey), ("bz", &fields.bz)] {
        npz.add_array(name, arr)
            .map_err(|e| MagnoError::Snapshot(format!("Failed to write {name}: {e}")))?;
    }
    npz.finish()
        .map_err(|e| MagnoError::Snapshot(format!("Failed to finish '{}': {e}", path.display())))?;
    Ok(())
}

pub fn read_fields_npz(path: &Path) -> MagnoResult<FieldState> {
    let file = File::open(path)?;
    let mut npz = NpzReader::new(file).map_err(|e| {
        MagnoError::Snapshot(format!("Failed to open npz '{}': {e}", path.display()))
    })?;
    Ok(FieldState {
        ex: read_array2(&mut npz, "ex")?,
        ey: read_array2(&mut npz, "ey")?,
        bz: read_array2(&mut npz, "bz")?,
    })
}

fn read_array2(npz: &mut NpzReader<File>, key: &str) -> MagnoResult<Array2<f64>> {
    npz.by_name::<ndarray::OwnedRepr<f64>, ndarray::Ix2>(&format!("{key}.npy"))
        .or_else(|_| npz.by_name::<ndarray::OwnedRepr<f64>, ndarray::Ix2>(key))
        .map_err(|e| MagnoError::Snapshot(format!("Failed to read {key} from npz: {e}")))
}
