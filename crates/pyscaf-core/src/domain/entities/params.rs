//! Generation parameters and their builder.
//!
//! [`ProjectParams`] is the validated input of a generation run. Raw user
//! input goes through [`ParamsBuilder`], which derives the repository and
//! package names when they are not overridden and rejects anything the
//! generated project could not live with (names Python cannot import,
//! versions below the supported floor).

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::domain::error::DomainError;
use crate::domain::value_objects::{Assistant, ProjectType, PythonVersion};

/// Reserved words that cannot be Python package names.
///
/// Only the lowercase keywords matter: uppercase characters are already
/// rejected by the identifier rule.
const PYTHON_KEYWORDS: &[&str] = &[
    "and", "as", "assert", "async", "await", "break", "class", "continue", "def", "del", "elif",
    "else", "except", "finally", "for", "from", "global", "if", "import", "in", "is", "lambda",
    "nonlocal", "not", "or", "pass", "raise", "return", "try", "while", "with", "yield",
];

/// Validated parameters for one generation run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectParams {
    project_name: String,
    repo_name: String,
    package_name: String,
    python_min: PythonVersion,
    project_type: ProjectType,
    assistants: BTreeSet<Assistant>,
    use_docker: bool,
    skip_typecheck: bool,
    author: String,
    description: String,
}

impl ProjectParams {
    /// Start building parameters from a human project title.
    pub fn builder(project_name: impl Into<String>) -> ParamsBuilder {
        ParamsBuilder::new(project_name)
    }

    pub fn project_name(&self) -> &str {
        &self.project_name
    }

    /// Kebab-case directory name.
    pub fn repo_name(&self) -> &str {
        &self.repo_name
    }

    /// Snake-case importable name.
    pub fn package_name(&self) -> &str {
        &self.package_name
    }

    pub fn python_min(&self) -> PythonVersion {
        self.python_min
    }

    pub fn project_type(&self) -> ProjectType {
        self.project_type
    }

    pub fn assistants(&self) -> impl Iterator<Item = Assistant> + '_ {
        self.assistants.iter().copied()
    }

    pub fn has_assistant(&self, assistant: Assistant) -> bool {
        self.assistants.contains(&assistant)
    }

    pub fn use_docker(&self) -> bool {
        self.use_docker
    }

    pub fn skip_typecheck(&self) -> bool {
        self.skip_typecheck
    }

    pub fn author(&self) -> &str {
        &self.author
    }

    pub fn description(&self) -> &str {
        &self.description
    }
}

// ── Builder ───────────────────────────────────────────────────────────────────

/// Builder for [`ProjectParams`]. Derivation happens at `build()` time so
/// overrides can arrive in any order.
#[derive(Debug, Clone)]
pub struct ParamsBuilder {
    project_name: String,
    repo_name: Option<String>,
    package_name: Option<String>,
    python_min: PythonVersion,
    project_type: ProjectType,
    assistants: BTreeSet<Assistant>,
    use_docker: bool,
    skip_typecheck: bool,
    author: Option<String>,
    description: Option<String>,
}

impl ParamsBuilder {
    fn new(project_name: impl Into<String>) -> Self {
        Self {
            project_name: project_name.into(),
            repo_name: None,
            package_name: None,
            python_min: PythonVersion::new(3, 10),
            project_type: ProjectType::Standard,
            assistants: BTreeSet::new(),
            use_docker: false,
            skip_typecheck: false,
            author: None,
            description: None,
        }
    }

    pub fn repo_name(mut self, name: impl Into<String>) -> Self {
        self.repo_name = Some(name.into());
        self
    }

    pub fn package_name(mut self, name: impl Into<String>) -> Self {
        self.package_name = Some(name.into());
        self
    }

    pub fn python_min(mut self, version: PythonVersion) -> Self {
        self.python_min = version;
        self
    }

    pub fn project_type(mut self, project_type: ProjectType) -> Self {
        self.project_type = project_type;
        self
    }

    pub fn assistant(mut self, assistant: Assistant) -> Self {
        self.assistants.insert(assistant);
        self
    }

    pub fn assistants(mut self, assistants: impl IntoIterator<Item = Assistant>) -> Self {
        self.assistants.extend(assistants);
        self
    }

    pub fn use_docker(mut self, enabled: bool) -> Self {
        self.use_docker = enabled;
        self
    }

    pub fn skip_typecheck(mut self, enabled: bool) -> Self {
        self.skip_typecheck = enabled;
        self
    }

    pub fn author(mut self, author: impl Into<String>) -> Self {
        self.author = Some(author.into());
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Derive missing names, validate everything, produce the params.
    pub fn build(self) -> Result<ProjectParams, DomainError> {
        let project_name = self.project_name.trim().to_string();
        if project_name.is_empty() {
            return Err(DomainError::MissingRequiredField {
                field: "project_name",
            });
        }

        let repo_name = match self.repo_name {
            Some(name) => name,
            None => derive_repo_name(&project_name),
        };
        validate_repo_name(&repo_name)?;

        let package_name = match self.package_name {
            Some(name) => name,
            None => derive_package_name(&repo_name),
        };
        validate_package_name(&package_name)?;

        if self.python_min < PythonVersion::floor() {
            return Err(DomainError::InvalidPythonVersion {
                input: self.python_min.to_string(),
                reason: format!("minimum supported version is {}", PythonVersion::floor()),
            });
        }

        Ok(ProjectParams {
            project_name: project_name.clone(),
            repo_name,
            package_name,
            python_min: self.python_min,
            project_type: self.project_type,
            assistants: self.assistants,
            use_docker: self.use_docker,
            skip_typecheck: self.skip_typecheck,
            author: self.author.unwrap_or_else(|| "Your Name".to_string()),
            description: self
                .description
                .unwrap_or_else(|| format!("{project_name} — a Python project")),
        })
    }
}

// ── Derivation + validation ───────────────────────────────────────────────────

/// "My Project" → "my-project". Whitespace and underscores become hyphens,
/// anything outside [a-z0-9-] is dropped, runs of hyphens collapse.
fn derive_repo_name(project_name: &str) -> String {
    let mut out = String::with_capacity(project_name.len());
    let mut last_hyphen = false;
    for c in project_name.chars() {
        let mapped = match c {
            c if c.is_ascii_alphanumeric() => Some(c.to_ascii_lowercase()),
            ' ' | '\t' | '_' | '-' => Some('-'),
            _ => None,
        };
        if let Some(m) = mapped {
            if m == '-' {
                if !last_hyphen && !out.is_empty() {
                    out.push('-');
                }
                last_hyphen = true;
            } else {
                out.push(m);
                last_hyphen = false;
            }
        }
    }
    out.trim_end_matches('-').to_string()
}

/// "my-project" → "my_project". Lowercased so a mixed-case repo name still
/// yields an importable package.
fn derive_package_name(repo_name: &str) -> String {
    repo_name.to_ascii_lowercase().replace(['-', '.'], "_")
}

fn validate_repo_name(name: &str) -> Result<(), DomainError> {
    let err = |reason: &str| DomainError::InvalidProjectName {
        name: name.to_string(),
        reason: reason.to_string(),
    };

    if name.is_empty() {
        return Err(err("name cannot be empty"));
    }
    if name.starts_with('.') {
        return Err(err("name cannot start with '.'"));
    }
    if name.contains('/') || name.contains('\\') {
        return Err(err("name cannot contain path separators"));
    }
    if !name
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_' || c == '.')
    {
        return Err(err("use alphanumerics, hyphens, underscores, and dots"));
    }
    Ok(())
}

fn validate_package_name(name: &str) -> Result<(), DomainError> {
    let err = |reason: &str| DomainError::InvalidPackageName {
        name: name.to_string(),
        reason: reason.to_string(),
    };

    let mut chars = name.chars();
    match chars.next() {
        None => return Err(err("name cannot be empty")),
        Some(c) if c.is_ascii_lowercase() || c == '_' => {}
        Some(_) => return Err(err("must start with a lowercase letter or underscore")),
    }
    if !chars.all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_') {
        return Err(err("only lowercase letters, digits, and underscores"));
    }
    if PYTHON_KEYWORDS.contains(&name) {
        return Err(err("shadows a Python keyword"));
    }
    Ok(())
}

// ── tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_derives_names() {
        let params = ProjectParams::builder("My Awesome Project").build().unwrap();
        assert_eq!(params.repo_name(), "my-awesome-project");
        assert_eq!(params.package_name(), "my_awesome_project");
    }

    #[test]
    fn builder_honours_overrides() {
        let params = ProjectParams::builder("My Project")
            .repo_name("custom-repo")
            .package_name("custom_pkg")
            .build()
            .unwrap();
        assert_eq!(params.repo_name(), "custom-repo");
        assert_eq!(params.package_name(), "custom_pkg");
    }

    #[test]
    fn builder_defaults() {
        let params = ProjectParams::builder("Thing").build().unwrap();
        assert_eq!(params.python_min(), PythonVersion::new(3, 10));
        assert_eq!(params.project_type(), ProjectType::Standard);
        assert_eq!(params.assistants().count(), 0);
        assert!(!params.use_docker());
        assert!(!params.skip_typecheck());
    }

    #[test]
    fn empty_title_is_rejected() {
        assert!(matches!(
            ProjectParams::builder("   ").build(),
            Err(DomainError::MissingRequiredField { .. })
        ));
    }

    #[test]
    fn dotfile_repo_name_is_rejected() {
        assert!(ProjectParams::builder("x").repo_name(".hidden").build().is_err());
    }

    #[test]
    fn separator_in_repo_name_is_rejected() {
        assert!(ProjectParams::builder("x").repo_name("a/b").build().is_err());
        assert!(ProjectParams::builder("x").repo_name("a\\b").build().is_err());
    }

    #[test]
    fn keyword_package_name_is_rejected() {
        assert!(matches!(
            ProjectParams::builder("x").package_name("import").build(),
            Err(DomainError::InvalidPackageName { .. })
        ));
    }

    #[test]
    fn uppercase_package_name_is_rejected() {
        assert!(ProjectParams::builder("x").package_name("MyPkg").build().is_err());
    }

    #[test]
    fn old_python_is_rejected() {
        let result = ProjectParams::builder("x")
            .python_min(PythonVersion::new(3, 8))
            .build();
        assert!(matches!(
            result,
            Err(DomainError::InvalidPythonVersion { .. })
        ));
    }

    #[test]
    fn derive_handles_messy_titles() {
        assert_eq!(derive_repo_name("  Weird -- Title! "), "weird-title");
        assert_eq!(derive_repo_name("snake_case_name"), "snake-case-name");
    }

    #[test]
    fn mixed_case_repo_name_yields_importable_package() {
        let params = ProjectParams::builder("x").repo_name("MyApp").build().unwrap();
        assert_eq!(params.repo_name(), "MyApp");
        assert_eq!(params.package_name(), "myapp");
    }

    #[test]
    fn assistants_are_a_set() {
        let params = ProjectParams::builder("x")
            .assistant(Assistant::Claude)
            .assistant(Assistant::Claude)
            .assistant(Assistant::Cursor)
            .build()
            .unwrap();
        assert_eq!(params.assistants().count(), 2);
        assert!(params.has_assistant(Assistant::Claude));
        assert!(!params.has_assistant(Assistant::Copilot));
    }
}
