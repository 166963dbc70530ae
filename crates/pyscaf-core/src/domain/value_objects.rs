//! Domain value objects: PythonVersion, VersionSpec, ProjectType, Assistant,
//! CommitHash, TemplateSource.
//!
//! # Design
//!
//! These are pure value types — equality-by-value, no identity. This file's
//! only job is to define the types, their string representations, and their
//! parsers. Orchestration lives in the application layer.

use crate::domain::error::DomainError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

// ── PythonVersion ─────────────────────────────────────────────────────────────

/// An "X.Y" Python minor version, e.g. `3.12`.
///
/// Patch components are tolerated on input (`3.12.4` parses as `3.12`) and
/// never stored: the generator only reasons about minors.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(try_from = "String", into = "String")]
pub struct PythonVersion {
    major: u8,
    minor: u8,
}

impl PythonVersion {
    pub const fn new(major: u8, minor: u8) -> Self {
        Self { major, minor }
    }

    pub const fn major(&self) -> u8 {
        self.major
    }

    pub const fn minor(&self) -> u8 {
        self.minor
    }

    /// Lowest minor the generated projects support.
    pub const fn floor() -> Self {
        Self::new(3, 9)
    }
}

impl fmt::Display for PythonVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.major, self.minor)
    }
}

impl FromStr for PythonVersion {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = |reason: &str| DomainError::InvalidPythonVersion {
            input: s.to_string(),
            reason: reason.to_string(),
        };

        let mut parts = s.trim().splitn(3, '.');
        let major = parts
            .next()
            .and_then(|p| p.parse::<u8>().ok())
            .ok_or_else(|| invalid("missing major component"))?;
        let minor = parts
            .next()
            .and_then(|p| p.parse::<u8>().ok())
            .ok_or_else(|| invalid("missing minor component"))?;
        // A third component (patch) is allowed and discarded.

        if major != 3 {
            return Err(invalid("only Python 3 is supported"));
        }

        Ok(Self::new(major, minor))
    }
}

impl TryFrom<String> for PythonVersion {
    type Error = DomainError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<PythonVersion> for String {
    fn from(v: PythonVersion) -> String {
        v.to_string()
    }
}

// ── VersionSpec ───────────────────────────────────────────────────────────────

/// A `requires-python` constraint, reduced to its minor bounds.
///
/// Parsing rules:
/// - `>=3.10,<3.13` → min `3.10`, max `3.12` (exclusive upper bound)
/// - `>=3.12`       → min `3.12`, max `3.12`
/// - unparsable     → min defaults to `3.10`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VersionSpec {
    pub min: PythonVersion,
    pub max: PythonVersion,
}

impl VersionSpec {
    /// Parse a requires-python constraint string.
    ///
    /// Never fails: clauses that cannot be understood are ignored, and a spec
    /// with no understandable lower bound defaults to `>=3.10`.
    pub fn parse(spec: &str) -> Self {
        let mut lo: Option<u8> = None;
        let mut hi_exclusive: Option<u8> = None;

        for clause in spec.split(',') {
            let clause = clause.trim();
            if let Some(rest) = clause.strip_prefix(">=").or_else(|| clause.strip_prefix('>')) {
                if let Some(minor) = parse_py3_minor(rest) {
                    lo = Some(minor);
                }
            } else if let Some(rest) = clause.strip_prefix('<') {
                // `<=` is not produced by our own tooling; treat it as `<` + 1.
                let (rest, bump) = match rest.strip_prefix('=') {
                    Some(r) => (r, 1u8),
                    None => (rest, 0u8),
                };
                if let Some(minor) = parse_py3_minor(rest) {
                    hi_exclusive = Some(minor + bump);
                }
            }
        }

        let lo = lo.unwrap_or(10);
        let hi = hi_exclusive.map(|h| h.saturating_sub(1)).unwrap_or(lo);

        Self {
            min: PythonVersion::new(3, lo),
            max: PythonVersion::new(3, hi.max(lo)),
        }
    }

    /// Rewrite the lower bound of a constraint string, keeping anything after
    /// the `>=` clause intact (`>=3.10,<3.13` bumped to 3.12 is
    /// `>=3.12,<3.13`). A spec without a `>=` clause is replaced wholesale.
    pub fn bump_min(spec: &str, to: PythonVersion) -> String {
        if let Some(pos) = spec.find(">=") {
            let tail_start = pos + 2;
            let tail = &spec[tail_start..];
            let end = tail
                .find(|c: char| !(c.is_ascii_digit() || c == '.' || c == ' '))
                .map(|i| tail_start + i)
                .unwrap_or(spec.len());
            format!("{}>={}{}", &spec[..pos], to, &spec[end..])
        } else {
            format!(">={to}")
        }
    }
}

/// Extract the minor from a `3.X` fragment, tolerating whitespace and a
/// trailing patch component.
fn parse_py3_minor(s: &str) -> Option<u8> {
    let s = s.trim();
    let rest = s.strip_prefix("3.")?;
    let digits: String = rest.chars().take_while(|c| c.is_ascii_digit()).collect();
    digits.parse().ok()
}

// ── ProjectType ───────────────────────────────────────────────────────────────

/// The flavor of project to generate.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProjectType {
    /// A regular Python package.
    #[default]
    Standard,
    /// A package plus a paper-writing workflow (sources, bibliography, CI).
    Paper,
}

impl ProjectType {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Standard => "standard",
            Self::Paper => "paper",
        }
    }
}

impl fmt::Display for ProjectType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProjectType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "standard" => Ok(Self::Standard),
            "paper" => Ok(Self::Paper),
            other => Err(DomainError::InvalidParams(format!(
                "unknown project type: {other}"
            ))),
        }
    }
}

// ── Assistant ─────────────────────────────────────────────────────────────────

/// An AI-assistant integration whose instruction files can be emitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Assistant {
    Claude,
    Copilot,
    Cursor,
}

impl Assistant {
    pub const ALL: [Assistant; 3] = [Self::Claude, Self::Copilot, Self::Cursor];

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Claude => "claude",
            Self::Copilot => "copilot",
            Self::Cursor => "cursor",
        }
    }

    /// The instruction file this assistant reads, relative to the project root.
    pub const fn instruction_file(&self) -> &'static str {
        match self {
            Self::Claude => "CLAUDE.md",
            Self::Copilot => ".github/copilot-instructions.md",
            Self::Cursor => ".cursorrules",
        }
    }
}

impl fmt::Display for Assistant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Assistant {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "claude" => Ok(Self::Claude),
            "copilot" | "github-copilot" => Ok(Self::Copilot),
            "cursor" => Ok(Self::Cursor),
            other => Err(DomainError::InvalidParams(format!(
                "unknown assistant: {other}"
            ))),
        }
    }
}

// ── CommitHash ────────────────────────────────────────────────────────────────

/// A full 40-character lowercase hex commit hash.
///
/// Invariant: exactly 40 hex digits. Enforced at construction; uppercase
/// input is normalised.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CommitHash(String);

impl CommitHash {
    pub fn parse(input: &str) -> Result<Self, DomainError> {
        let trimmed = input.trim();
        if trimmed.len() == 40 && trimmed.chars().all(|c| c.is_ascii_hexdigit()) {
            Ok(Self(trimmed.to_ascii_lowercase()))
        } else {
            Err(DomainError::InvalidCommitHash {
                input: input.to_string(),
            })
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Abbreviated form for display (first 8 chars).
    pub fn short(&self) -> &str {
        &self.0[..8]
    }
}

impl fmt::Display for CommitHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for CommitHash {
    type Error = DomainError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::parse(&s)
    }
}

impl From<CommitHash> for String {
    fn from(h: CommitHash) -> String {
        h.0
    }
}

// ── TemplateSource ────────────────────────────────────────────────────────────

/// Where the template a project was generated from lives.
///
/// Drives commit resolution: a local path can be `rev-parse`d or probed on
/// disk, a remote URL can be `ls-remote`d, and both have a stable string
/// identity for the synthetic-hash fallback.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TemplateSource {
    Remote(String),
    Local(PathBuf),
}

impl TemplateSource {
    /// Canonical source of the built-in blueprint.
    pub fn builtin() -> Self {
        Self::Remote("https://github.com/aamersdq/pyscaf".to_string())
    }

    /// Classify a user-supplied `--template` value: anything with a URL
    /// scheme or `git@` prefix is remote, everything else is a local path.
    pub fn infer(value: &str) -> Self {
        let remote = value.contains("://") || value.starts_with("git@");
        if remote {
            Self::Remote(value.to_string())
        } else {
            Self::Local(PathBuf::from(value))
        }
    }

    /// Stable string identity, used for `.cruft.json` and synthetic hashing.
    pub fn identifier(&self) -> String {
        match self {
            Self::Remote(url) => url.clone(),
            Self::Local(path) => path.display().to_string(),
        }
    }

    pub fn local_path(&self) -> Option<&PathBuf> {
        match self {
            Self::Local(p) => Some(p),
            Self::Remote(_) => None,
        }
    }
}

impl fmt::Display for TemplateSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.identifier())
    }
}

// ── tests ─────────────────────────────────────────────────────────────────────
