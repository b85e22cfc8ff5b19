use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::NaiveDate;

use super::model::{IceSeries, Observation, MISSING_SENTINEL};
use crate::archive::CacheManifest;

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load every cached CSV and merge the rows into one normalized series.
///
/// Any file that fails to parse is a fatal error; the dashboard never starts
/// on a partially loaded dataset.
pub fn load_dir(cache_dir: &Path) -> Result<IceSeries> {
    let files = list_csv_files(cache_dir)
        .with_context(|| format!("reading cache directory {}", cache_dir.display()))?;

    warn_if_incomplete(cache_dir, &files);

    let mut observations = Vec::new();
    for path in &files {
        let rows = load_csv(path).with_context(|| format!("parsing {}", path.display()))?;
        observations.extend(rows);
    }

    let series = IceSeries::from_observations(observations);
    log::info!(
        "loaded {} observations from {} files, regions {:?}",
        series.len(),
        files.len(),
        series.regions
    );
    Ok(series)
}

/// Cached data files, sorted by name so merge order is deterministic.
fn list_csv_files(cache_dir: &Path) -> Result<Vec<PathBuf>> {
    let mut files: Vec<PathBuf> = std::fs::read_dir(cache_dir)?
        .collect::<std::io::Result<Vec<_>>>()?
        .into_iter()
        .map(|entry| entry.path())
        .filter(|p| p.extension().and_then(|e| e.to_str()) == Some("csv"))
        .collect();
    files.sort();
    Ok(files)
}

/// Compare the cache contents against the download manifest. A mismatch
/// means an earlier download was cut short; the cache is still trusted and
/// loaded as-is.
fn warn_if_incomplete(cache_dir: &Path, files: &[PathBuf]) {
    match CacheManifest::read(cache_dir) {
        Some(manifest) if manifest.files.len() != files.len() => {
            log::warn!(
                "cache holds {} files but the manifest recorded {}; \
                 the cache may be incomplete (delete {} to re-download)",
                files.len(),
                manifest.files.len(),
                cache_dir.display()
            );
        }
        Some(_) => {}
        None => log::debug!("no download manifest in {}", cache_dir.display()),
    }
}

// ---------------------------------------------------------------------------
// CSV parsing
// ---------------------------------------------------------------------------

/// Parse one archive CSV into observations.
///
/// The source files pad both headers and fields with spaces (` mo`,
/// ` region`, `      S`), so everything is trimmed before use. Required
/// columns: `year`, `mo` (or `month`), `region`, `extent`.
fn load_csv(path: &Path) -> Result<Vec<Observation>> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_path(path)
        .context("opening CSV")?;

    let headers: Vec<String> = reader
        .headers()
        .context("reading CSV headers")?
        .iter()
        .map(|h| h.to_string())
        .collect();

    let column = |name: &str| headers.iter().position(|h| h == name);
    let year_idx = column("year").context("CSV missing 'year' column")?;
    let month_idx = column("mo")
        .or_else(|| column("month"))
        .context("CSV missing 'mo' column")?;
    let region_idx = column("region").context("CSV missing 'region' column")?;
    let extent_idx = column("extent").context("CSV missing 'extent' column")?;

    let mut observations = Vec::new();

    for (row_no, result) in reader.records().enumerate() {
        let record = result.with_context(|| format!("CSV row {row_no}"))?;
        let field = |idx: usize| record.get(idx).unwrap_or("");

        let year: i32 = field(year_idx)
            .parse()
            .with_context(|| format!("row {row_no}: invalid year '{}'", field(year_idx)))?;
        let month: u32 = field(month_idx)
            .parse()
            .with_context(|| format!("row {row_no}: invalid month '{}'", field(month_idx)))?;
        let date = NaiveDate::from_ymd_opt(year, month, 1)
            .with_context(|| format!("row {row_no}: no such month {year}-{month}"))?;

        let extent: f64 = field(extent_idx)
            .parse()
            .with_context(|| format!("row {row_no}: invalid extent '{}'", field(extent_idx)))?;

        observations.push(Observation {
            date,
            region: map_region_code(field(region_idx)),
            extent: normalize_extent(extent),
        });
    }

    Ok(observations)
}

/// Map the archive's region codes to display labels. Unknown codes pass
/// through trimmed rather than being rejected.
pub fn map_region_code(code: &str) -> String {
    match code.trim() {
        "S" => "Antarctica".to_string(),
        "N" => "Arctic".to_string(),
        other => other.to_string(),
    }
}

/// The −9999 sentinel becomes an explicit missing marker; every other value
/// passes through untouched.
pub fn normalize_extent(extent: f64) -> Option<f64> {
    if extent == MISSING_SENTINEL {
        None
    } else {
        Some(extent)
    }
}
