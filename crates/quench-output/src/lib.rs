//! Ensemble output for the quench driver.
//!
//! Flattens an evolved [`Ensemble`](quench_core::Ensemble) into a single
//! weighted particle list and serializes it as whitespace-separated ASCII,
//! one particle per line, behind a header naming the format version and
//! columns. Energy-loss currents get their own file.
//!
//! Positions are written in the driver's internal units (GeV⁻¹).

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod currents;
pub mod error;
pub mod format;
pub mod partons;

pub use currents::CurrentWriter;
pub use error::OutputError;
pub use format::OutputFormat;
pub use partons::{flatten, OscarWriter};

use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use quench_core::Ensemble;
use tracing::info;

/// Path of the particle file for `run_id` in `dir`.
pub fn output_path(dir: impl AsRef<Path>, run_id: u32) -> PathBuf {
    dir.as_ref().join(format!("{run_id:08}-partons.dat"))
}

/// Path of the current file for `run_id` in `dir`.
pub fn currents_path(dir: impl AsRef<Path>, run_id: u32) -> PathBuf {
    dir.as_ref().join(format!("{run_id:08}-currents.dat"))
}

fn create(path: &Path) -> Result<BufWriter<File>, OutputError> {
    File::create(path)
        .map(BufWriter::new)
        .map_err(|source| OutputError::Create {
            path: path.to_path_buf(),
            source,
        })
}

/// Write the particle file, and the current file if `currents` is set,
/// into `dir`. Returns the paths written.
///
/// # Errors
///
/// [`OutputError::Create`] if a file cannot be created,
/// [`OutputError::Io`] if writing fails.
pub fn write_run(
    dir: impl AsRef<Path>,
    run_id: u32,
    ensemble: &Ensemble,
    format: OutputFormat,
    currents: bool,
) -> Result<Vec<PathBuf>, OutputError> {
    let dir = dir.as_ref();
    let mut written = Vec::new();

    let path = output_path(dir, run_id);
    let mut partons = OscarWriter::new(create(&path)?, format)?;
    let n = partons.write_ensemble(ensemble)?;
    partons.finish()?;
    info!(path = %path.display(), particles = n, "Wrote particles");
    written.push(path);

    if currents {
        let path = currents_path(dir, run_id);
        let mut writer = CurrentWriter::new(create(&path)?)?;
        let n = writer.write_ensemble(ensemble)?;
        writer.finish()?;
        info!(path = %path.display(), currents = n, "Wrote currents");
        written.push(path);
    }
    Ok(written)
}
