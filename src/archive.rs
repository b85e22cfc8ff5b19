use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::LazyLock;
use std::time::Duration;

use anyhow::{Context, Result};
use regex::Regex;
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Archive layout
// ---------------------------------------------------------------------------

/// NSIDC Sea Ice Index (G02135) monthly archive.
pub const DEFAULT_ARCHIVE_BASE: &str = "https://noaadata.apps.nsidc.org/NOAA/G02135";

/// Hemisphere identifiers as the archive names them.
pub const ARCHIVE_REGIONS: [&str; 2] = ["north", "south"];

const FETCH_TIMEOUT: Duration = Duration::from_secs(60);

/// Where the downloaded CSVs live. `ICEWATCH_DATA_DIR` overrides the
/// default `data/` next to the working directory.
pub fn default_cache_dir() -> PathBuf {
    std::env::var_os("ICEWATCH_DATA_DIR")
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("data"))
}

fn archive_base() -> String {
    std::env::var("ICEWATCH_ARCHIVE_URL").unwrap_or_else(|_| DEFAULT_ARCHIVE_BASE.to_string())
}

// ---------------------------------------------------------------------------
// ensure_cached – the one entry point the startup path calls
// ---------------------------------------------------------------------------

/// Outcome of the cache check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheStatus {
    /// Data is available locally, pre-existing or freshly downloaded.
    Ready,
    /// The user declined the download; the caller must halt before loading.
    Declined,
}

/// Make sure the cache directory holds the archive data.
///
/// An existing directory is trusted as-is with no network activity and no
/// per-file integrity check. Otherwise the user is asked once for consent
/// (empty answer means yes); on consent every listed file of every region
/// is downloaded and a manifest of the successes is written. Individual
/// download failures are logged and skipped, never retried.
pub fn ensure_cached(cache_dir: &Path) -> Result<CacheStatus> {
    if cache_dir.exists() {
        log::debug!("cache directory {} exists, trusting it", cache_dir.display());
        return Ok(CacheStatus::Ready);
    }

    if !prompt_for_consent()? {
        return Ok(CacheStatus::Declined);
    }

    std::fs::create_dir_all(cache_dir)
        .with_context(|| format!("creating cache directory {}", cache_dir.display()))?;

    let agent = ureq::AgentBuilder::new().timeout(FETCH_TIMEOUT).build();
    let base = archive_base();
    let mut manifest = CacheManifest::default();

    for region in ARCHIVE_REGIONS {
        match download_region(&agent, &base, region, cache_dir) {
            Ok(files) => manifest.files.extend(files),
            Err(e) => log::warn!("{region} region download incomplete: {e:#}"),
        }
    }

    if let Err(e) = manifest.write(cache_dir) {
        log::warn!("could not write download manifest: {e:#}");
    }

    Ok(CacheStatus::Ready)
}

fn prompt_for_consent() -> Result<bool> {
    print!("The data directory doesn't exist, do you want to download it? ([y]/n): ");
    io::stdout().flush().context("flushing prompt")?;

    let mut line = String::new();
    io::stdin()
        .read_line(&mut line)
        .context("reading consent response")?;
    Ok(consent_granted(&line))
}

/// Empty input defaults to yes; anything other than `y` declines.
fn consent_granted(answer: &str) -> bool {
    matches!(answer.trim(), "" | "y")
}

// ---------------------------------------------------------------------------
// Listing + per-file fetch
// ---------------------------------------------------------------------------

/// Fetch the region's HTML index and every file it lists, returning the
/// names that landed in the cache.
fn download_region(
    agent: &ureq::Agent,
    base: &str,
    region: &str,
    cache_dir: &Path,
) -> Result<Vec<String>> {
    let listing_url = format!("{base}/{region}/monthly/data/");
    let body = agent
        .get(&listing_url)
        .call()
        .with_context(|| format!("fetching listing {listing_url}"))?
        .into_string()
        .with_context(|| format!("reading listing {listing_url}"))?;

    let names = parse_listing(&body);
    log::info!("downloading {} files for the {region} region", names.len());

    let mut fetched = Vec::with_capacity(names.len());
    for name in names {
        let url = format!("{listing_url}{name}");
        match fetch_file(agent, &url, &cache_dir.join(&name)) {
            Ok(()) => fetched.push(name),
            Err(e) => log::warn!("skipping {name}: {e:#}"),
        }
    }
    Ok(fetched)
}

fn fetch_file(agent: &ureq::Agent, url: &str, dest: &Path) -> Result<()> {
    let response = agent
        .get(url)
        .call()
        .with_context(|| format!("fetching {url}"))?;
    let mut reader = response.into_reader();
    let mut file = std::fs::File::create(dest)
        .with_context(|| format!("creating {}", dest.display()))?;
    io::copy(&mut reader, &mut file).with_context(|| format!("writing {}", dest.display()))?;
    Ok(())
}

static HREF_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"<a[^>]*href="([^"]*)""#).expect("hard-coded pattern"));
static TAG_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new("<[^<]+?>").expect("hard-coded pattern"));

/// Extract the downloadable filenames from an HTML directory index. The
/// first anchor is the parent-directory link and is skipped; any markup
/// left inside an href is stripped before the name is used as both the
/// remote path segment and the local filename.
fn parse_listing(html: &str) -> Vec<String> {
    HREF_RE
        .captures_iter(html)
        .skip(1)
        .map(|cap| strip_tags(&cap[1]))
        .filter(|name| !name.is_empty())
        .collect()
}

fn strip_tags(html: &str) -> String {
    TAG_RE.replace_all(html, "").into_owned()
}

// ---------------------------------------------------------------------------
// Download manifest
// ---------------------------------------------------------------------------

/// Record of which files a download run actually fetched. A cache whose
/// contents disagree with its manifest was cut short; the loader warns
/// about it but still trusts the cache.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CacheManifest {
    pub files: Vec<String>,
}

impl CacheManifest {
    pub const FILE_NAME: &'static str = "manifest.json";

    pub fn write(&self, cache_dir: &Path) -> Result<()> {
        let path = cache_dir.join(Self::FILE_NAME);
        let json = serde_json::to_string_pretty(self).context("serializing manifest")?;
        std::fs::write(&path, json).with_context(|| format!("writing {}", path.display()))?;
        Ok(())
    }

    /// `None` when the manifest is absent or unreadable.
    pub fn read(cache_dir: &Path) -> Option<CacheManifest> {
        let text = std::fs::read_to_string(cache_dir.join(Self::FILE_NAME)).ok()?;
        serde_json::from_str(&text).ok()
    }
}
