use crate::config::OutputConfig;
use crate::models::{AlbumRow, BandEntry, ReviewRecord};
use anyhow::{Context, Result};
use serde::Serialize;
use std::fs;
use std::io::Write;
use std::path::Path;
use tracing::info;

/// Flat-file CSV store for the output datasets.
///
/// Every write fully overwrites its target: records live for one run only,
/// there is no incremental update or versioning.
pub struct DatasetStore {
    output: OutputConfig,
}

impl DatasetStore {
    pub fn new(output: OutputConfig) -> Self {
        Self { output }
    }

    // ── Review datasets ───────────────────────────────────────────────────────

    pub fn write_raw_reviews(&self, records: &[ReviewRecord]) -> Result<usize> {
        write_records(&self.output.raw_reviews_path, records)
    }

    pub fn write_clean_reviews(&self, records: &[ReviewRecord]) -> Result<usize> {
        write_records(&self.output.clean_reviews_path, records)
    }

    // ── Test splits ───────────────────────────────────────────────────────────

    pub fn write_band_entries(&self, entries: &[BandEntry]) -> Result<usize> {
        write_records(&self.output.bands_test_path, entries)
    }

    pub fn write_album_rows(&self, rows: &[AlbumRow]) -> Result<usize> {
        write_records(&self.output.albums_test_path, rows)
    }

    // ── Inspection ────────────────────────────────────────────────────────────

    /// Data rows in an output file, header excluded.
    pub fn row_count(path: &Path) -> Result<usize> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .from_path(path)
            .with_context(|| format!("Could not open {:?}", path))?;
        Ok(reader.records().filter(|r| r.is_ok()).count())
    }
}

/// Serialize records to `path` with a header row, overwriting any previous
/// file. Parent directories are created.
fn write_records<S: Serialize>(path: &Path, records: &[S]) -> Result<usize> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Could not create dir {:?}", parent))?;
    }

    let file = fs::File::create(path).with_context(|| format!("Could not create {:?}", path))?;
    let count = write_csv(file, records).with_context(|| format!("Write to {:?} failed", path))?;

    info!("{:?}: {} rows written", path, count);
    Ok(count)
}

fn write_csv<W: Write, S: Serialize>(out: W, records: &[S]) -> Result<usize> {
    let mut writer = csv::Writer::from_writer(out);
    for record in records {
        writer.serialize(record)?;
    }
    writer.flush()?;
    Ok(records.len())
}

// ── Tests ─────────────────────────────────────────────────────────────────────
