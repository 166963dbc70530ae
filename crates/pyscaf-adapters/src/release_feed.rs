//! Python release-metadata adapters.
//!
//! [`EndOfLifeFeed`] queries the endoflife.date public API with a short
//! timeout; [`StaticFeed`] serves fixtures in tests.

use std::time::Duration;

use serde::Deserialize;
use tracing::{debug, instrument};

use pyscaf_core::{
    application::ApplicationError,
    application::ports::{ReleaseCycle, ReleaseFeed},
    domain::PythonVersion,
    error::PyscafResult,
};

const EOL_API_URL: &str = "https://endoflife.date/api/python.json";
const TIMEOUT_MS: u64 = 3000;

/// One cycle as served by the API. `eol` is either a boolean or an ISO date.
#[derive(Debug, Deserialize)]
struct CycleDto {
    cycle: String,
    #[serde(default)]
    eol: EolField,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum EolField {
    Flag(bool),
    Date(String),
}

impl Default for EolField {
    fn default() -> Self {
        Self::Flag(false)
    }
}

impl EolField {
    /// Whether end-of-life has been reached as of `today` (ISO date).
    /// ISO dates compare correctly as strings.
    fn reached(&self, today: &str) -> bool {
        match self {
            Self::Flag(flag) => *flag,
            Self::Date(date) => date.as_str() <= today,
        }
    }
}

/// Production feed backed by <https://endoflife.date>.
#[derive(Debug, Clone)]
pub struct EndOfLifeFeed {
    url: String,
    timeout: Duration,
}

impl EndOfLifeFeed {
    pub fn new() -> Self {
        Self {
            url: EOL_API_URL.to_string(),
            timeout: Duration::from_millis(TIMEOUT_MS),
        }
    }

    /// Point the feed at a different endpoint (tests, mirrors).
    pub fn with_url(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            timeout: Duration::from_millis(TIMEOUT_MS),
        }
    }
}

impl Default for EndOfLifeFeed {
    fn default() -> Self {
        Self::new()
    }
}

impl ReleaseFeed for EndOfLifeFeed {
    #[instrument(skip_all)]
    fn python_cycles(&self) -> PyscafResult<Vec<ReleaseCycle>> {
        let client = reqwest::blocking::Client::builder()
            .timeout(self.timeout)
            .build()
            .map_err(|e| feed_error(e.to_string()))?;

        let dtos: Vec<CycleDto> = client
            .get(&self.url)
            .send()
            .and_then(|resp| resp.error_for_status())
            .map_err(|e| feed_error(e.to_string()))?
            .json()
            .map_err(|e| feed_error(e.to_string()))?;

        let today = chrono::Utc::now().format("%Y-%m-%d").to_string();
        let cycles = convert(dtos, &today);
        debug!(count = cycles.len(), "release cycles fetched");
        Ok(cycles)
    }
}

/// Parse DTOs into port cycles, skipping non-3.x entries.
fn convert(dtos: Vec<CycleDto>, today: &str) -> Vec<ReleaseCycle> {
    dtos.into_iter()
        .filter_map(|dto| {
            let version: PythonVersion = dto.cycle.parse().ok()?;
            Some(ReleaseCycle {
                version,
                eol: dto.eol.reached(today),
            })
        })
        .collect()
}

fn feed_error(reason: String) -> pyscaf_core::error::PyscafError {
    ApplicationError::FeedUnavailable { reason }.into()
}

/// Test feed with fixed cycles, or a scripted outage.
#[derive(Debug, Clone, Default)]
pub struct StaticFeed {
    cycles: Option<Vec<(PythonVersion, bool)>>,
}

impl StaticFeed {
    pub fn with_cycles(cycles: Vec<(PythonVersion, bool)>) -> Self {
        Self {
            cycles: Some(cycles),
        }
    }

    /// A feed that always fails, as if the network were down.
    pub fn offline() -> Self {
        Self { cycles: None }
    }
}

impl ReleaseFeed for StaticFeed {
    fn python_cycles(&self) -> PyscafResult<Vec<ReleaseCycle>> {
        match &self.cycles {
            Some(cycles) => Ok(cycles
                .iter()
                .map(|(version, eol)| ReleaseCycle {
                    version: *version,
                    eol: *eol,
                })
                .collect()),
            None => Err(feed_error("offline".into())),
        }
    }
}

// ── tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn dto(cycle: &str, eol: EolField) -> CycleDto {
        CycleDto {
            cycle: cycle.to_string(),
            eol,
        }
    }

    #[test]
    fn convert_skips_python2_and_flags_eol() {
        let cycles = convert(
            vec![
                dto("2.7", EolField::Flag(true)),
                dto("3.8", EolField::Date("2024-10-07".into())),
                dto("3.13", EolField::Date("2029-10-31".into())),
                dto("3.14", EolField::Flag(false)),
            ],
            "2026-08-06",
        );

        assert_eq!(cycles.len(), 3);
        assert!(cycles[0].eol); // 3.8 date passed
        assert!(!cycles[1].eol); // 3.13 date in the future
        assert!(!cycles[2].eol);
    }

    #[test]
    fn eol_payload_shape_parses() {
        // Shape as actually served by the API.
        let raw = r#"[
            {"cycle": "3.13", "releaseDate": "2024-10-07", "eol": "2029-10-31", "latest": "3.13.1"},
            {"cycle": "3.8", "eol": "2024-10-07"}
        ]"#;
        let dtos: Vec<CycleDto> = serde_json::from_str(raw).unwrap();
        assert_eq!(dtos.len(), 2);
        assert_eq!(dtos[0].cycle, "3.13");
    }

    #[test]
    fn static_feed_offline_errors() {
        assert!(StaticFeed::offline().python_cycles().is_err());
    }

    #[test]
    fn static_feed_serves_fixtures() {
        let feed = StaticFeed::with_cycles(vec![
            (PythonVersion::new(3, 12), false),
            (PythonVersion::new(3, 8), true),
        ]);
        let cycles = feed.python_cycles().unwrap();
        assert_eq!(cycles.len(), 2);
        assert!(!cycles[0].eol);
    }
}
