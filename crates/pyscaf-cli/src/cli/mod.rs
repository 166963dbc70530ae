//! CLI argument definitions using the clap derive API.
//!
//! This module is the *only* place that knows about argument names, aliases,
//! help text, and value enums.  No business logic lives here.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

pub mod global;
pub use global::{GlobalArgs, OutputFormat};

// ── Top-level CLI ─────────────────────────────────────────────────────────────

/// Main CLI entry-point.
#[derive(Debug, Parser)]
#[command(
    name    = "pyscaf",
    bin_name = "pyscaf",
    version  = env!("CARGO_PKG_VERSION"),
    author   = env!("CARGO_PKG_AUTHORS"),
    about    = "\u{1f40d} Python project scaffolding",
    long_about = "Pyscaf generates ready-to-develop Python projects: \
                  source layout, pyproject.toml, CI matrix, pre-commit \
                  hooks, and template tracking metadata.",
    after_help = "EXAMPLES:\n\
        \x20 pyscaf new my-project --python-min 3.11\n\
        \x20 pyscaf new my-paper --type paper --assistant claude\n\
        \x20 pyscaf versions --format json\n\
        \x20 pyscaf check --path ./my-project\n\
        \x20 pyscaf completions bash > /usr/share/bash-completion/completions/pyscaf",
    arg_required_else_help = true,
    subcommand_required    = true,
)]
pub struct Cli {
    /// Flags available on every subcommand.
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

// ── Subcommands ───────────────────────────────────────────────────────────────

/// All available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Generate a new Python project.
    #[command(
        visible_alias = "n",
        about = "Generate a new project",
        after_help = "EXAMPLES:\n\
            \x20 pyscaf new my-project\n\
            \x20 pyscaf new my-paper   --type paper --python-min 3.12\n\
            \x20 pyscaf new my-project --assistant claude --assistant cursor --docker"
    )]
    New(NewArgs),

    /// Show the discovered Python version matrix.
    #[command(
        about = "Show the discovered Python version matrix",
        after_help = "EXAMPLES:\n\
            \x20 pyscaf versions\n\
            \x20 pyscaf versions --python-min 3.11 --format json"
    )]
    Versions(VersionsArgs),

    /// Bump requires-python in an existing project.
    #[command(
        about = "Bump the minimum Python version of a project",
        after_help = "EXAMPLES:\n\
            \x20 pyscaf bump --to 3.12\n\
            \x20 pyscaf bump --to 3.11 --path ./my-project"
    )]
    Bump(BumpArgs),

    /// Validate a generated project.
    #[command(
        about = "Validate a generated project",
        after_help = "EXAMPLES:\n\
            \x20 pyscaf check\n\
            \x20 pyscaf check --path ./my-project"
    )]
    Check(CheckArgs),

    /// Initialise a Pyscaf configuration file.
    #[command(
        about = "Initialise configuration",
        after_help = "EXAMPLES:\n\
            \x20 pyscaf init           # default location\n\
            \x20 pyscaf init --force   # overwrite existing"
    )]
    Init(InitArgs),

    /// Generate shell completion scripts.
    #[command(
        about = "Generate shell completions",
        after_help = "EXAMPLES:\n\
            \x20 pyscaf completions bash > ~/.local/share/bash-completion/completions/pyscaf\n\
            \x20 pyscaf completions zsh  > ~/.zfunc/_pyscaf\n\
            \x20 pyscaf completions fish > ~/.config/fish/completions/pyscaf.fish"
    )]
    Completions(CompletionsArgs),

    /// Manage the Pyscaf configuration.
    #[command(
        about = "Configuration management",
        subcommand,
        after_help = "EXAMPLES:\n\
            \x20 pyscaf config get defaults.python-min\n\
            \x20 pyscaf config list"
    )]
    Config(ConfigCommands),
}

// ── new ───────────────────────────────────────────────────────────────────────

/// Arguments for `pyscaf new`.
#[derive(Debug, Args)]
pub struct NewArgs {
    /// Project name or path.  A plain name creates `./name`; a path like
    /// `../foo` places the project one level up.
    #[arg(value_name = "NAME", help = "Project name or path")]
    pub name: String,

    /// Minimum supported Python version.
    #[arg(
        short = 'p',
        long = "python-min",
        value_name = "VERSION",
        help = "Minimum Python version (e.g. 3.11)"
    )]
    pub python_min: Option<String>,

    /// Project type.
    #[arg(
        short = 't',
        long = "type",
        value_name = "TYPE",
        value_enum,
        help = "Project type"
    )]
    pub project_type: Option<ProjectTypeArg>,

    /// AI-assistant integration (repeatable).
    #[arg(
        short = 'a',
        long = "assistant",
        value_name = "ASSISTANT",
        value_enum,
        help = "Emit instruction files for this assistant (repeatable)"
    )]
    pub assistants: Vec<AssistantArg>,

    /// Emit Dockerfile and .dockerignore.
    #[arg(long = "docker", help = "Include Docker support")]
    pub docker: bool,

    /// Author name for pyproject.toml and LICENSE.
    #[arg(long = "author", value_name = "NAME", help = "Author name")]
    pub author: Option<String>,

    /// One-line project description.
    #[arg(
        short = 'd',
        long = "description",
        value_name = "TEXT",
        help = "Project description"
    )]
    pub description: Option<String>,

    /// Template source recorded in tracking metadata (URL or local path).
    #[arg(
        long = "template",
        value_name = "SOURCE",
        help = "Template source to track (URL or path)"
    )]
    pub template: Option<String>,

    /// Skip the confirmation prompt.
    #[arg(
        short = 'y',
        long = "yes",
        help = "Skip confirmation and create immediately"
    )]
    pub yes: bool,

    /// Overwrite an existing directory (destructive).
    #[arg(long = "force", help = "Overwrite existing directory")]
    pub force: bool,

    /// Preview what would be created without writing any files.
    #[arg(long = "dry-run", help = "Show what would be created without creating")]
    pub dry_run: bool,
}

// ── versions ──────────────────────────────────────────────────────────────────

/// Arguments for `pyscaf versions`.
#[derive(Debug, Args)]
pub struct VersionsArgs {
    /// Minimum version to include in the matrix.
    #[arg(
        short = 'p',
        long = "python-min",
        value_name = "VERSION",
        help = "Lower bound for the matrix"
    )]
    pub python_min: Option<String>,

    /// Output format.
    #[arg(
        long = "format",
        value_enum,
        default_value = "table",
        help = "Output format"
    )]
    pub format: VersionsFormat,
}

/// Output format for the `versions` command.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum VersionsFormat {
    /// Human-readable table.
    Table,
    /// One version per line.
    List,
    /// JSON bounds + matrix.
    Json,
}

// ── bump ──────────────────────────────────────────────────────────────────────

/// Arguments for `pyscaf bump`.
#[derive(Debug, Args)]
pub struct BumpArgs {
    /// New minimum Python version.
    #[arg(long = "to", value_name = "VERSION", help = "New minimum (e.g. 3.12)")]
    pub to: String,

    /// Project directory containing pyproject.toml.
    #[arg(
        long = "path",
        value_name = "DIR",
        default_value = ".",
        help = "Project directory"
    )]
    pub path: PathBuf,
}

// ── check ─────────────────────────────────────────────────────────────────────

/// Arguments for `pyscaf check`.
#[derive(Debug, Args)]
pub struct CheckArgs {
    /// Project directory to validate.
    #[arg(
        long = "path",
        value_name = "DIR",
        default_value = ".",
        help = "Project directory"
    )]
    pub path: PathBuf,
}

// ── init ──────────────────────────────────────────────────────────────────────

/// Arguments for `pyscaf init`.
#[derive(Debug, Args)]
pub struct InitArgs {
    /// Overwrite an existing config file.
    #[arg(short = 'f', long = "force", help = "Overwrite existing configuration")]
    pub force: bool,
}

// ── completions ───────────────────────────────────────────────────────────────

/// Arguments for `pyscaf completions`.
#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Target shell.
    #[arg(value_enum, help = "Shell to generate completions for")]
    pub shell: Shell,
}

/// Supported shells for completion generation.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
    Elvish,
}

// ── config subcommands ────────────────────────────────────────────────────────

/// Subcommands for `pyscaf config`.
#[derive(Debug, Subcommand)]
pub enum ConfigCommands {
    /// Print the value of a configuration key.
    Get {
        /// Dotted key path, e.g. `defaults.python-min`.
        key: String,
    },
    /// Set a configuration key to a value.
    Set {
        /// Dotted key path.
        key: String,
        /// New value.
        value: String,
    },
    /// Print all configuration values.
    List,
    /// Print the path to the active configuration file.
    Path,
}

// ── value enums ───────────────────────────────────────────────────────────────

/// Project flavors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
#[value(rename_all = "lowercase")]
pub enum ProjectTypeArg {
    Standard,
    Paper,
}

impl std::fmt::Display for ProjectTypeArg {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Standard => write!(f, "standard"),
            Self::Paper => write!(f, "paper"),
        }
    }
}

/// Supported AI assistants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
#[value(rename_all = "lowercase")]
pub enum AssistantArg {
    Claude,
    Copilot,
    Cursor,
}

impl std::fmt::Display for AssistantArg {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Claude => write!(f, "claude"),
            Self::Copilot => write!(f, "copilot"),
            Self::Cursor => write!(f, "cursor"),
        }
    }
}

// ── tests ─────────────────────────────────────────────────────────────────────
