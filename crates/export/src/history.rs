//! Append-only calculation history persisted as a JSON array.
//!
//! Every write replaces the target through a sibling temporary file that is
//! synced and then renamed over it, so a reader only ever sees the previous or
//! the next complete document.

use std::fs::{self, File};
use std::io::{self, BufReader, Write};
use std::path::{Path, PathBuf};

use mruv_kinematics::{Equations, Evaluation, Mode};
use serde::{Deserialize, Serialize};
use serde_json::ser::PrettyFormatter;
use tempfile::NamedTempFile;
use thiserror::Error;
use tracing::{info, warn};

#[derive(Debug, Error)]
pub enum HistoryError {
    #[error("cannot persist history to {path}: {source}")]
    Persistence {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("history file {path} is malformed: {source}")]
    Malformed {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("failed to serialize history: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Snapshot of one calculation. Fields a mode does not produce are omitted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultRecord {
    pub formula: Mode,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position_formula: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub velocity_formula: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub velocity: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub acceleration: Option<f64>,
}

impl ResultRecord {
    /// Record for a calculation in the equations' own mode.
    ///
    /// Position and velocity modes keep the formulas and values they
    /// produced; acceleration mode keeps only the constant.
    pub fn from_calculation(equations: &Equations, evaluation: Option<&Evaluation>) -> Self {
        let formula = equations.mode;
        let acceleration = (formula == Mode::Acceleration).then_some(equations.acceleration);
        Self {
            formula,
            position_formula: equations.position.as_ref().map(|e| e.to_string()),
            velocity_formula: equations.velocity.as_ref().map(|e| e.to_string()),
            time: evaluation.map(|e| e.time),
            position: evaluation.and_then(|e| e.position),
            velocity: evaluation.and_then(|e| e.velocity),
            acceleration,
        }
    }
}

/// Ordered in-memory history mirrored to a JSON file after every append.
#[derive(Debug)]
pub struct HistoryLog {
    path: PathBuf,
    records: Vec<ResultRecord>,
}

impl HistoryLog {
    /// Empty log persisted at `path`. Nothing is written until the first append.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            records: Vec::new(),
        }
    }

    /// Resume the log stored at `path`, or start empty if the file does not exist.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, HistoryError> {
        let path = path.into();
        let records = if path.exists() {
            load(&path)?
        } else {
            Vec::new()
        };
        Ok(Self { path, records })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn records(&self) -> &[ResultRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Add a record and persist the whole log.
    ///
    /// When the write fails the record is dropped again, so memory and disk
    /// stay at the last successful append.
    pub fn append(&mut self, record: ResultRecord) -> Result<(), HistoryError> {
        self.records.push(record);
        if let Err(err) = write_atomic(&self.path, &self.records) {
            self.records.pop();
            warn!(path = %self.path.display(), error = %err, "history append rolled back");
            return Err(err);
        }
        info!(path = %self.path.display(), records = self.records.len(), "history saved");
        Ok(())
    }

    /// Write the current log to `path` without touching the default location.
    pub fn export_to(&self, path: impl AsRef<Path>) -> Result<(), HistoryError> {
        let path = path.as_ref();
        write_atomic(path, &self.records)?;
        info!(path = %path.display(), records = self.records.len(), "history exported");
        Ok(())
    }
}

/// Read a history document written by [`HistoryLog`].
pub fn load(path: impl AsRef<Path>) -> Result<Vec<ResultRecord>, HistoryError> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|source| HistoryError::Persistence {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_reader(BufReader::new(file)).map_err(|source| HistoryError::Malformed {
        path: path.to_path_buf(),
        source,
    })
}

/// Render records the way they are stored on disk: a JSON array indented by four spaces.
pub fn to_json(records: &[ResultRecord]) -> Result<Vec<u8>, HistoryError> {
    let mut buf = Vec::new();
    let mut ser =
        serde_json::Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(b"    "));
    records.serialize(&mut ser)?;
    buf.push(b'\n');
    Ok(buf)
}

fn write_atomic(path: &Path, records: &[ResultRecord]) -> Result<(), HistoryError> {
    let bytes = to_json(records)?;
    let persistence = |source: io::Error| HistoryError::Persistence {
        path: path.to_path_buf(),
        source,
    };

    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    fs::create_dir_all(parent).map_err(persistence)?;

    let mut tmp = NamedTempFile::new_in(parent).map_err(persistence)?;
    tmp.write_all(&bytes).map_err(persistence)?;
    tmp.as_file().sync_all().map_err(persistence)?;
    tmp.persist(path).map_err(|err| persistence(err.error))?;
    Ok(())
}
