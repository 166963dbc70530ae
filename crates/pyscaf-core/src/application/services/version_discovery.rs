//! Python version-matrix discovery.
//!
//! Contract: [`VersionDiscovery::discover`] returns a non-empty ordered
//! [`VersionMatrix`], never errors, and degrades to a fixed default list.
//!
//! Fallback chain, each step best-effort:
//!
//! 1. `uv python list --only-installed` — fast, local.
//! 2. `uv python list` — full, includes downloadable builds.
//! 3. Remote end-of-life API — non-EOL cycles only.
//! 4. Hard-coded default list.
//!
//! Every step's output is normalized the same way: parse "3.X" minors, drop
//! versions below the requested minimum, dedupe, sort ascending. A step
//! whose normalized output is empty counts as failed.

use std::collections::BTreeSet;

use tracing::{debug, instrument, warn};

use crate::application::ports::{ProcessRunner, ReleaseFeed};
use crate::domain::{PythonVersion, VersionMatrix};

/// Fallback list used when every discovery source fails.
pub const DEFAULT_VERSIONS: [PythonVersion; 4] = [
    PythonVersion::new(3, 10),
    PythonVersion::new(3, 11),
    PythonVersion::new(3, 12),
    PythonVersion::new(3, 13),
];

/// Best-effort discovery of supported Python minors.
pub struct VersionDiscovery<'a> {
    runner: &'a dyn ProcessRunner,
    feed: &'a dyn ReleaseFeed,
}

impl<'a> VersionDiscovery<'a> {
    pub fn new(runner: &'a dyn ProcessRunner, feed: &'a dyn ReleaseFeed) -> Self {
        Self { runner, feed }
    }

    /// Discover the version matrix for projects requiring at least `min`.
    ///
    /// Never fails. The returned matrix is non-empty and ascending; in the
    /// worst case it contains only `min` itself.
    #[instrument(skip_all, fields(min = %min))]
    pub fn discover(&self, min: PythonVersion) -> VersionMatrix {
        for (source, versions) in [
            ("uv (installed)", self.from_uv(true)),
            ("uv (available)", self.from_uv(false)),
            ("release feed", self.from_feed()),
            ("defaults", Some(DEFAULT_VERSIONS.to_vec())),
        ] {
            let Some(versions) = versions else {
                debug!(source, "discovery source failed, trying next");
                continue;
            };
            let normalized = normalize(versions, min);
            if normalized.is_empty() {
                debug!(source, "discovery source produced nothing usable");
                continue;
            }
            debug!(source, count = normalized.len(), "version matrix discovered");
            return VersionMatrix::new(normalized);
        }

        // All sources empty after filtering: the requested minimum is newer
        // than anything known. The matrix still must not be empty.
        warn!(%min, "no discovery source knew the requested minimum; using it alone");
        VersionMatrix::new(vec![min])
    }

    /// Query `uv python list`, optionally restricted to installed builds.
    fn from_uv(&self, only_installed: bool) -> Option<Vec<PythonVersion>> {
        let args: &[&str] = if only_installed {
            &["python", "list", "--only-installed"]
        } else {
            &["python", "list"]
        };

        let output = match self.runner.run("uv", args, None) {
            Ok(output) if output.success => output,
            Ok(output) => {
                debug!(stderr = %output.stderr.trim(), "uv exited non-zero");
                return None;
            }
            Err(e) => {
                debug!(error = %e, "uv could not be started");
                return None;
            }
        };

        let versions: Vec<PythonVersion> = output
            .stdout
            .lines()
            .filter_map(parse_uv_line)
            .collect();
        (!versions.is_empty()).then_some(versions)
    }

    /// Query the remote release feed, keeping non-EOL cycles.
    fn from_feed(&self) -> Option<Vec<PythonVersion>> {
        match self.feed.python_cycles() {
            Ok(cycles) => {
                let versions: Vec<PythonVersion> = cycles
                    .into_iter()
                    .filter(|c| !c.eol)
                    .map(|c| c.version)
                    .collect();
                (!versions.is_empty()).then_some(versions)
            }
            Err(e) => {
                debug!(error = %e, "release feed unavailable");
                None
            }
        }
    }
}

/// Drop versions below `min`, dedupe, sort ascending.
fn normalize(versions: Vec<PythonVersion>, min: PythonVersion) -> Vec<PythonVersion> {
    let set: BTreeSet<PythonVersion> = versions.into_iter().filter(|v| *v >= min).collect();
    set.into_iter().collect()
}

/// Extract a "3.X" minor from one line of `uv python list` output.
///
/// Lines look like `cpython-3.12.7-linux-x86_64-gnu    /usr/bin/python3.12`
/// or `cpython-3.14.0rc1-… <download available>`; the first `3.` found
/// with digits after it wins.
fn parse_uv_line(line: &str) -> Option<PythonVersion> {
    let idx = line.find("3.")?;
    let rest = &line[idx + 2..];
    let digits: String = rest.chars().take_while(|c| c.is_ascii_digit()).collect();
    if digits.is_empty() {
        return None;
    }
    digits
        .parse::<u8>()
        .ok()
        .map(|minor| PythonVersion::new(3, minor))
}

// ── tests ─────────────────────────────────────────────────────────────────────
