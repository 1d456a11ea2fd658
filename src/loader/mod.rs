//! Reads the prior cleaned-reviews dataset used as the anti-join reference.

use anyhow::{Context, Result};
use std::collections::HashSet;
use std::path::Path;
use tracing::{debug, warn};

/// Load the Band column of the training CSV as the anti-join reference set.
///
/// The training file is optional input: when it is absent the band split is
/// simply written unfiltered.
pub fn load_known_bands(path: &Path) -> Result<HashSet<String>> {
    if !path.exists() {
        warn!("Training dataset {:?} not found; band filter disabled", path);
        return Ok(HashSet::new());
    }

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_path(path)
        .with_context(|| format!("Could not open {:?}", path))?;

    let band_idx = reader
        .headers()
        .context("Missing header row")?
        .iter()
        .position(|h| h == "Band")
        .with_context(|| format!("No Band column in {:?}", path))?;

    let mut bands = HashSet::new();
    for (i, result) in reader.records().enumerate() {
        let record = match result {
            Ok(r) => r,
            Err(e) => {
                warn!("Row {} in {:?}: {}", i + 1, path, e);
                continue;
            }
        };

        if let Some(band) = record.get(band_idx) {
            bands.insert(band.to_string());
        }
    }

    debug!("{} known bands loaded from {:?}", bands.len(), path);
    Ok(bands)
}
