//! CSV and JSON renditions of sampled motion.

use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use mruv_series::{PlotData, SamplePoint};
use serde::Serialize;
use thiserror::Error;
use tracing::info;

use crate::writer_for_path;

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("cannot write {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to write CSV: {0}")]
    Csv(#[from] csv::Error),
    #[error("failed to write JSON: {0}")]
    Json(#[from] serde_json::Error),
}

pub const HEADER: [&str; 3] = ["t", "position", "velocity"];

#[derive(Serialize)]
struct CsvRow {
    t: f64,
    position: Option<f64>,
    velocity: Option<f64>,
}

/// Write samples as `t,position,velocity` rows; missing values are left empty.
pub fn write_samples_csv(path: &Path, samples: &[SamplePoint]) -> Result<(), ExportError> {
    let writer = writer_for_path(path).map_err(|source| ExportError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let mut csv = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(writer);
    csv.write_record(HEADER)?;
    for sample in samples {
        csv.serialize(CsvRow {
            t: sample.t,
            position: sample.position,
            velocity: sample.velocity,
        })?;
    }
    csv.flush().map_err(|source| ExportError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    info!(path = %path.display(), rows = samples.len(), "wrote sample CSV");
    Ok(())
}

/// Path of the JSON sidecar that accompanies `output`, e.g. `run.csv` -> `run_plot.json`.
pub fn sidecar_path(output: &Path) -> PathBuf {
    let stem = output
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("series");
    output.with_file_name(format!("{stem}_plot.json"))
}

/// Write plot data as pretty JSON, creating parent directories.
pub fn write_plot_json(path: &Path, plot: &PlotData) -> Result<(), ExportError> {
    let io_err = |source: io::Error| ExportError::Io {
        path: path.to_path_buf(),
        source,
    };
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).map_err(io_err)?;
        }
    }
    let file = File::create(path).map_err(io_err)?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, plot)?;
    writer.flush().map_err(io_err)?;
    info!(path = %path.display(), series = plot.series.len(), "wrote plot sidecar");
    Ok(())
}
