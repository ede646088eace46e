//! Persistence seam for extracted datasets.
//!
//! Container formats live behind [`DatasetStore`], so an HDF5 (or any other)
//! writer can be slotted in without touching extraction. [`JsonStore`] is the
//! bundled implementation; serde_json emits shortest-round-trip floats, so
//! numeric arrays survive a save/load cycle bit-for-bit.

use std::fs::{self, File};
use std::io::{BufReader, BufWriter};
use std::path::Path;

use crate::error::Result;
use crate::types::Dataset;

/// Writes and reads extracted datasets.
pub trait DatasetStore {
    /// Writes a dataset to `path`, creating parent directories as needed.
    fn save(&self, path: &Path, dataset: &Dataset) -> Result<()>;

    /// Reads a dataset back from `path`.
    fn load(&self, path: &Path) -> Result<Dataset>;
}

/// JSON-backed dataset store.
#[derive(Debug, Default)]
pub struct JsonStore;

impl DatasetStore for JsonStore {
    fn save(&self, path: &Path, dataset: &Dataset) -> Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let writer = BufWriter::new(File::create(path)?);
        serde_json::to_writer(writer, dataset)?;
        Ok(())
    }

    fn load(&self, path: &Path) -> Result<Dataset> {
        let reader = BufReader::new(File::open(path)?);
        Ok(serde_json::from_reader(reader)?)
    }
}
