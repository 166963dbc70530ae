//! Substitution machinery: `{{VAR}}` context variables and `__TOKEN__`
//! placeholders.
//!
//! Two mechanisms coexist on purpose. Context variables carry user-supplied
//! parameters (names, author, description) and are applied first. Tokens
//! carry *computed* values (the discovered version matrix, the year) and are
//! applied second, so a leftover `__…__` sequence in an emitted file is
//! always a defect the validator can detect.

use std::collections::BTreeMap;

use crate::domain::value_objects::PythonVersion;

// ── VersionMatrix ─────────────────────────────────────────────────────────────

/// Non-empty ordered list of Python minors used to fill the CI test matrix.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionMatrix {
    versions: Vec<PythonVersion>,
}

impl VersionMatrix {
    /// Build a matrix from an already deduplicated, ascending list.
    ///
    /// # Panics
    /// Panics if `versions` is empty — construction sites guarantee
    /// non-emptiness (that is the version-discovery contract).
    pub fn new(versions: Vec<PythonVersion>) -> Self {
        assert!(!versions.is_empty(), "version matrix cannot be empty");
        Self { versions }
    }

    pub fn min(&self) -> PythonVersion {
        self.versions[0]
    }

    pub fn max(&self) -> PythonVersion {
        *self.versions.last().expect("matrix is non-empty")
    }

    pub fn versions(&self) -> &[PythonVersion] {
        &self.versions
    }

    /// The matrix with `version` guaranteed present (and ordering kept).
    ///
    /// Used to pin the requested minimum into a discovered matrix: discovery
    /// reports what exists, but the generated project must always test the
    /// minimum it claims to support.
    pub fn including(self, version: PythonVersion) -> Self {
        let mut set: std::collections::BTreeSet<PythonVersion> =
            self.versions.into_iter().collect();
        set.insert(version);
        Self {
            versions: set.into_iter().collect(),
        }
    }

    /// JSON array literal for workflow files: `["3.10", "3.11"]`.
    pub fn matrix_json(&self) -> String {
        let quoted: Vec<String> = self.versions.iter().map(|v| format!("\"{v}\"")).collect();
        format!("[{}]", quoted.join(", "))
    }

    /// Min/max blob used by maintenance tooling: `{"min": "3.10", "max": "3.12"}`.
    pub fn bounds_json(&self) -> String {
        format!(
            "{{\"min\": \"{}\", \"max\": \"{}\"}}",
            self.min(),
            self.max()
        )
    }
}

// ── TokenMap ──────────────────────────────────────────────────────────────────

/// Flat mapping of fixed `__NAME__` placeholder tokens to replacement strings.
#[derive(Debug, Clone, Default)]
pub struct TokenMap {
    entries: BTreeMap<&'static str, String>,
}

impl TokenMap {
    /// The standard token set for a generation run.
    pub fn standard(matrix: &VersionMatrix, year: i32) -> Self {
        let min = matrix.min();
        let mut map = Self::default();
        map.set("__PY_MIN__", min.to_string());
        // Dotless form for identifiers like ruff's `target-version = "py310"`.
        map.set("__PY_MIN_NODOT__", format!("{}{}", min.major(), min.minor()));
        map.set("__PY_MAX__", matrix.max().to_string());
        map.set("__PY_MATRIX__", matrix.matrix_json());
        map.set("__YEAR__", year.to_string());
        map
    }

    pub fn set(&mut self, token: &'static str, value: impl Into<String>) {
        debug_assert!(
            token.starts_with("__") && token.ends_with("__"),
            "tokens are spelled __NAME__"
        );
        self.entries.insert(token, value.into());
    }

    /// Replace every known token in `text`. Single pass per token; token
    /// names are fixed and non-overlapping so order does not matter.
    pub fn apply(&self, text: &str) -> String {
        let mut out = text.to_string();
        for (token, value) in &self.entries {
            out = out.replace(token, value);
        }
        out
    }

    /// Scan `text` for `__NAME__`-shaped sequences that survived
    /// substitution. Used to enforce the no-leftover-token invariant.
    pub fn remaining(text: &str) -> Vec<String> {
        let bytes = text.as_bytes();
        let mut found: Vec<String> = Vec::new();
        let mut i = 0;
        while i + 4 <= bytes.len() {
            if &bytes[i..i + 2] == b"__" {
                // Scan the candidate name: uppercase alnum with single
                // underscores, terminated by a closing `__`.
                let mut j = i + 2;
                let mut close = None;
                while j < bytes.len() {
                    let b = bytes[j];
                    if b == b'_' {
                        if j + 1 < bytes.len() && bytes[j + 1] == b'_' {
                            close = Some(j);
                            break;
                        }
                        j += 1;
                    } else if b.is_ascii_uppercase() || b.is_ascii_digit() {
                        j += 1;
                    } else {
                        break;
                    }
                }
                if let Some(c) = close {
                    if c > i + 2 {
                        let token = &text[i..c + 2];
                        if !found.iter().any(|t| t == token) {
                            found.push(token.to_string());
                        }
                        i = c + 2;
                        continue;
                    }
                }
            }
            i += 1;
        }
        found
    }
}

// ── RenderContext ─────────────────────────────────────────────────────────────

/// Variable substitution context for `{{VAR}}` placeholders in blueprint
/// paths and contents.
#[derive(Debug, Clone, Default)]
pub struct RenderContext {
    variables: BTreeMap<String, String>,
}

impl RenderContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_variable(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.variables.insert(name.into(), value.into());
        self
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.variables.get(name).map(String::as_str)
    }

    /// Substitute every `{{VAR}}` occurrence. Unknown variables are left
    /// untouched (the structure validator will flag them via content checks
    /// in tests, not silently drop them).
    pub fn render(&self, text: &str) -> String {
        let mut out = text.to_string();
        for (name, value) in &self.variables {
            out = out.replace(&format!("{{{{{name}}}}}"), value);
        }
        out
    }
}

// ── tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn matrix() -> VersionMatrix {
        VersionMatrix::new(vec![
            PythonVersion::new(3, 10),
            PythonVersion::new(3, 11),
            PythonVersion::new(3, 12),
        ])
    }

    #[test]
    fn matrix_bounds() {
        let m = matrix();
        assert_eq!(m.min().to_string(), "3.10");
        assert_eq!(m.max().to_string(), "3.12");
    }

    #[test]
    fn matrix_json_forms() {
        let m = matrix();
        assert_eq!(m.matrix_json(), "[\"3.10\", \"3.11\", \"3.12\"]");
        assert_eq!(m.bounds_json(), "{\"min\": \"3.10\", \"max\": \"3.12\"}");
    }

    #[test]
    #[should_panic]
    fn matrix_rejects_empty() {
        VersionMatrix::new(vec![]);
    }

    #[test]
    fn including_pins_missing_minimum() {
        let m = matrix().including(PythonVersion::new(3, 9));
        assert_eq!(m.min(), PythonVersion::new(3, 9));
        assert_eq!(m.versions().len(), 4);

        // Already-present versions do not duplicate.
        let m = m.including(PythonVersion::new(3, 11));
        assert_eq!(m.versions().len(), 4);
    }

    #[test]
    fn tokens_apply_all() {
        let tokens = TokenMap::standard(&matrix(), 2026);
        let rendered = tokens.apply("py __PY_MIN__ to __PY_MAX__, (c) __YEAR__");
        assert_eq!(rendered, "py 3.10 to 3.12, (c) 2026");
    }

    #[test]
    fn dotless_min_token() {
        let tokens = TokenMap::standard(&matrix(), 2026);
        assert_eq!(
            tokens.apply("target-version = \"py__PY_MIN_NODOT__\""),
            "target-version = \"py310\""
        );
    }

    #[test]
    fn tokens_apply_leaves_no_standard_token() {
        let tokens = TokenMap::standard(&matrix(), 2026);
        let rendered = tokens.apply("matrix: __PY_MATRIX__");
        assert!(TokenMap::remaining(&rendered).is_empty());
    }

    #[test]
    fn remaining_detects_leftover() {
        let left = TokenMap::remaining("version = \"__PY_MIN__\"");
        assert_eq!(left, vec!["__PY_MIN__".to_string()]);
    }

    #[test]
    fn remaining_ignores_dunder_identifiers() {
        // Python dunders are lowercase; the token alphabet is uppercase.
        assert!(TokenMap::remaining("def __init__(self):").is_empty());
        assert!(TokenMap::remaining("____").is_empty());
    }

    #[test]
    fn context_renders_variables() {
        let ctx = RenderContext::new()
            .with_variable("PROJECT_NAME", "My Project")
            .with_variable("PACKAGE_NAME", "my_project");
        assert_eq!(
            ctx.render("# {{PROJECT_NAME}} (import {{PACKAGE_NAME}})"),
            "# My Project (import my_project)"
        );
    }

    #[test]
    fn context_leaves_unknown_variables() {
        let ctx = RenderContext::new();
        assert_eq!(ctx.render("{{NOT_SET}}"), "{{NOT_SET}}");
    }
}
