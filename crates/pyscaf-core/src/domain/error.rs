use thiserror::Error;

/// Root domain error type.
///
/// All errors are:
/// - Cloneable (callers may hold several while reporting)
/// - Categorizable (for CLI display)
/// - Actionable (provides suggestions)
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DomainError {
    // ========================================================================
    // Validation Errors (400-level equivalent)
    // ========================================================================
    #[error("Invalid project parameters: {0}")]
    InvalidParams(String),

    #[error("Invalid project name '{name}': {reason}")]
    InvalidProjectName { name: String, reason: String },

    #[error("'{name}' is not a valid Python package name: {reason}")]
    InvalidPackageName { name: String, reason: String },

    #[error("Invalid Python version '{input}': {reason}")]
    InvalidPythonVersion { input: String, reason: String },

    #[error("'{input}' is not a 40-character hex commit hash")]
    InvalidCommitHash { input: String },

    #[error("Invalid blueprint: {0}")]
    InvalidBlueprint(String),

    #[error("Blueprint '{name}' has no files")]
    EmptyBlueprint { name: String },

    #[error("Duplicate path in rendered project: {path}")]
    DuplicatePath { path: String },

    #[error("Absolute paths not allowed: {path}")]
    AbsolutePathNotAllowed { path: String },

    // ========================================================================
    // Consistency Errors (409-level equivalent)
    // ========================================================================
    #[error("placeholder token '{token}' survived rendering in {path}")]
    UnresolvedToken { token: String, path: String },

    #[error("tracking metadata rejected: {reason}")]
    TrackingRejected { reason: String },

    // ========================================================================
    // Constraint Violations
    // ========================================================================
    #[error("Required field missing: {field}")]
    MissingRequiredField { field: &'static str },
}

impl DomainError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::InvalidParams(msg) => vec![
                "Check your generation parameters".into(),
                format!("Details: {}", msg),
            ],
            Self::InvalidProjectName { reason, .. } => vec![
                format!("Project name rejected: {}", reason),
                "Use letters, digits, spaces, hyphens, and underscores".into(),
            ],
            Self::InvalidPackageName { name, .. } => vec![
                format!("'{}' cannot be imported from Python", name),
                "Package names are lowercase identifiers: letters, digits, underscores".into(),
            ],
            Self::InvalidPythonVersion { input, .. } => vec![
                format!("'{}' is not an X.Y Python version", input),
                "Examples: 3.10, 3.12".into(),
            ],
            Self::UnresolvedToken { token, path } => vec![
                format!("Token '{}' was not substituted in {}", token, path),
                "This is a blueprint defect, please report it".into(),
            ],
            Self::EmptyBlueprint { name } => vec![
                format!("Blueprint '{}' is corrupted", name),
                "Please report this issue".into(),
            ],
            _ => vec!["See documentation for more details".into()],
        }
    }

    /// Error category for CLI display styling.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::InvalidParams(_)
            | Self::InvalidProjectName { .. }
            | Self::InvalidPackageName { .. }
            | Self::InvalidPythonVersion { .. }
            | Self::InvalidCommitHash { .. }
            | Self::MissingRequiredField { .. } => ErrorCategory::Validation,
            Self::UnresolvedToken { .. } | Self::TrackingRejected { .. } => {
                ErrorCategory::Consistency
            }
            _ => ErrorCategory::Internal,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    Consistency,
    Internal,
}
