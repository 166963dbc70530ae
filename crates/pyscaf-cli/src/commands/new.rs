//! Implementation of the `pyscaf new` command.
//!
//! Responsibility: translate CLI arguments into `ProjectParams`, call the
//! core generate service, and display results. No business logic lives here.

use std::path::{Path, PathBuf};
use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, info, instrument};

use pyscaf_adapters::{EndOfLifeFeed, LocalFilesystem, SystemProcessRunner, TokenRenderer, builtin_blueprint};
use pyscaf_core::{
    application::{GenerateReport, GenerateService},
    domain::{
        Assistant as CoreAssistant, ProjectParams, ProjectType as CoreType, PythonVersion,
        TemplateSource,
    },
};

use crate::{
    cli::{AssistantArg, NewArgs, ProjectTypeArg, global::GlobalArgs},
    config::AppConfig,
    error::{CliError, CliResult},
    output::OutputManager,
};

/// Environment toggle: skip the mypy hook in generated pre-commit config.
const SKIP_TYPECHECK_ENV: &str = "PYSCAF_SKIP_TYPECHECK";

/// Execute the `pyscaf new` command.
///
/// Dispatch sequence:
/// 1. Parse and validate the project name / output path
/// 2. Convert CLI args + config into core `ProjectParams`
/// 3. Confirm with user unless `--yes` or `--quiet`
/// 4. Early-exit if `--dry-run`
/// 5. Execute generation via `GenerateService`
/// 6. Print next-steps guidance
#[instrument(skip_all, fields(project = %args.name))]
pub fn execute(
    args: NewArgs,
    global: GlobalArgs,
    config: AppConfig,
    output: OutputManager,
) -> CliResult<()> {
    // 1. Resolve project path
    let (project_name, project_path) = resolve_project_path(&args.name)?;

    // 2. Build params (derivation + validation happens in the core builder)
    let params = build_params(&args, &project_name, &config)?;

    debug!(
        repo = params.repo_name(),
        package = params.package_name(),
        python_min = %params.python_min(),
        project_type = %params.project_type(),
        "Parameters resolved"
    );

    // Blueprint + tracked template source
    let mut blueprint = builtin_blueprint();
    if let Some(source) = args.template.as_deref().or(config.template.source.as_deref()) {
        blueprint.source = TemplateSource::infer(source);
    }

    // 3. Show configuration and confirm
    if !global.quiet && !args.yes && !args.dry_run {
        show_configuration(&params, &project_path, &output)?;
        if !confirm()? {
            return Err(CliError::Cancelled);
        }
    }

    // 4. Check for existing directory
    if project_path.exists() && !args.force {
        return Err(CliError::ProjectExists { path: project_path });
    }

    // 5. Create adapters and the service
    let service = GenerateService::new(
        Box::new(TokenRenderer::new()),
        Box::new(LocalFilesystem::new()),
        Box::new(SystemProcessRunner::new()),
        Box::new(EndOfLifeFeed::new()),
    );

    // Dry run: describe but do not write.
    if args.dry_run {
        let structure = service
            .preview(&blueprint, &params, &project_path)
            .map_err(CliError::Core)?;
        output.info(&format!(
            "Dry run: would create '{}' at {} ({} entries)",
            params.repo_name(),
            project_path.display(),
            structure.entry_count(),
        ))?;
        for file in structure.files() {
            output.print(&format!("  {}", file.path.display()))?;
        }
        return Ok(());
    }

    // 6. Generate
    output.header(&format!("Creating '{}'...", params.repo_name()))?;
    info!(project = %params.repo_name(), path = %project_path.display(), "Generation started");

    let spinner = make_spinner(global.quiet);
    let report = service
        .generate(&blueprint, &params, &project_path, args.force)
        .map_err(CliError::Core)?;
    spinner.finish_and_clear();

    info!(project = %params.repo_name(), commit = report.commit.short(), "Generation completed");

    // 7. Success + next steps
    print_report(&params, &report, &output)?;

    Ok(())
}

// ── Path resolution ───────────────────────────────────────────────────────────

pub fn resolve_project_path(name: &str) -> CliResult<(String, PathBuf)> {
    let path = Path::new(name);

    let project_name = path
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| CliError::InvalidProjectName {
            name: name.into(),
            reason: "cannot extract valid project name".into(),
        })?
        .to_string();

    validate_project_name(&project_name)?;

    // Full path to the project directory, as typed.
    Ok((project_name, path.to_path_buf()))
}

fn validate_project_name(name: &str) -> CliResult<()> {
    if name.is_empty() {
        return Err(CliError::InvalidProjectName {
            name: name.into(),
            reason: "name cannot be empty".into(),
        });
    }
    if name.starts_with('.') {
        return Err(CliError::InvalidProjectName {
            name: name.into(),
            reason: "name cannot start with '.'".into(),
        });
    }
    Ok(())
}

// ── Params construction ───────────────────────────────────────────────────────

fn build_params(args: &NewArgs, project_name: &str, config: &AppConfig) -> CliResult<ProjectParams> {
    let python_min: PythonVersion = args
        .python_min
        .as_deref()
        .unwrap_or(&config.defaults.python_min)
        .parse()
        .map_err(|e| CliError::Core(pyscaf_core::error::PyscafError::Domain(e)))?;

    let project_type = match args.project_type {
        Some(arg) => convert_type(arg),
        None => config
            .defaults
            .project_type
            .parse()
            .unwrap_or(CoreType::Standard),
    };

    // CLI flags win outright; config assistants only apply when none given.
    let assistants: Vec<CoreAssistant> = if args.assistants.is_empty() {
        config
            .defaults
            .assistants
            .iter()
            .filter_map(|name| name.parse().ok())
            .collect()
    } else {
        args.assistants.iter().copied().map(convert_assistant).collect()
    };

    let mut builder = ProjectParams::builder(project_name)
        .repo_name(project_name)
        .python_min(python_min)
        .project_type(project_type)
        .assistants(assistants)
        .use_docker(args.docker)
        .skip_typecheck(skip_typecheck_from_env());

    if let Some(author) = args.author.as_deref().or(config.defaults.author.as_deref()) {
        builder = builder.author(author);
    }
    if let Some(description) = &args.description {
        builder = builder.description(description);
    }

    builder
        .build()
        .map_err(|e| CliError::Core(pyscaf_core::error::PyscafError::Domain(e)))
}

/// `PYSCAF_SKIP_TYPECHECK` set to anything but `0` / `false` / empty.
fn skip_typecheck_from_env() -> bool {
    match std::env::var(SKIP_TYPECHECK_ENV) {
        Ok(value) => !matches!(value.to_ascii_lowercase().as_str(), "" | "0" | "false"),
        Err(_) => false,
    }
}

// ── Type conversions CLI → core ───────────────────────────────────────────────

fn convert_type(arg: ProjectTypeArg) -> CoreType {
    match arg {
        ProjectTypeArg::Standard => CoreType::Standard,
        ProjectTypeArg::Paper => CoreType::Paper,
    }
}

fn convert_assistant(arg: AssistantArg) -> CoreAssistant {
    match arg {
        AssistantArg::Claude => CoreAssistant::Claude,
        AssistantArg::Copilot => CoreAssistant::Copilot,
        AssistantArg::Cursor => CoreAssistant::Cursor,
    }
}

// ── UI helpers ────────────────────────────────────────────────────────────────

fn make_spinner(quiet: bool) -> ProgressBar {
    if quiet {
        return ProgressBar::hidden();
    }
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::with_template("{spinner} {msg}").expect("static template is valid"),
    );
    spinner.set_message("discovering versions, rendering, initialising...");
    spinner.enable_steady_tick(Duration::from_millis(80));
    spinner
}

fn show_configuration(
    params: &ProjectParams,
    project_path: &Path,
    out: &OutputManager,
) -> CliResult<()> {
    out.header("Configuration")?;
    out.print(&format!("  Project:      {}", params.project_name()))?;
    out.print(&format!("  Package:      {}", params.package_name()))?;
    out.print(&format!("  Python:       >={}", params.python_min()))?;
    out.print(&format!("  Type:         {}", params.project_type()))?;
    let assistants: Vec<String> = params.assistants().map(|a| a.to_string()).collect();
    if !assistants.is_empty() {
        out.print(&format!("  Assistants:   {}", assistants.join(", ")))?;
    }
    if params.use_docker() {
        out.print("  Docker:       yes")?;
    }
    out.print(&format!("  Location:     {}", project_path.display()))?;
    out.print("")?;
    Ok(())
}

fn confirm() -> CliResult<bool> {
    use std::io::{self, Write};

    print!("Continue? [Y/n] ");
    io::stdout().flush().map_err(|e| CliError::IoError {
        message: "failed to flush stdout".into(),
        source: e,
    })?;

    let mut input = String::new();
    io::stdin()
        .read_line(&mut input)
        .map_err(|e| CliError::IoError {
            message: "failed to read confirmation input".into(),
            source: e,
        })?;

    let input = input.trim().to_ascii_lowercase();
    Ok(input.is_empty() || input == "y" || input == "yes")
}

fn print_report(
    params: &ProjectParams,
    report: &GenerateReport,
    output: &OutputManager,
) -> CliResult<()> {
    output.success(&format!("Project '{}' created!", params.repo_name()))?;
    output.print(&format!(
        "  Python matrix: {}",
        report.matrix.matrix_json()
    ))?;
    output.print(&format!("  Tracking:      {}", report.commit.short()))?;
    if report.cruft_preserved {
        output.info("Existing .cruft.json kept (tracking commit unchanged)")?;
    }

    for outcome in report.post_gen.outcomes.iter().filter(|o| !o.ok) {
        output.warning(&format!(
            "Could not {}: {}",
            outcome.step.describe(),
            outcome.detail
        ))?;
    }

    output.print("")?;
    output.print("Next steps:")?;
    output.print(&format!("  cd {}", report.project_path.display()))?;
    if report.post_gen.uv_available {
        output.print("  uv pip install -e \".[dev]\"")?;
    } else {
        output.print("  pip install -e \".[dev]\"")?;
    }
    output.print("  cp .env.example .env")?;
    output.print("  pytest")?;
    if params.use_docker() {
        output.print(&format!(
            "  docker build -t {}-dev .",
            params.repo_name()
        ))?;
    }

    Ok(())
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    // ── resolve_project_path ──────────────────────────────────────────────────

    #[test]
    fn simple_name_resolves_to_cwd() {
        let (name, dir) = resolve_project_path("my-app").unwrap();
        assert_eq!(name, "my-app");
        assert_eq!(dir, PathBuf::from("my-app"));
    }

    #[test]
    fn relative_path_keeps_full_target() {
        let (name, dir) = resolve_project_path("../my-app").unwrap();
        assert_eq!(name, "my-app");
        assert_eq!(dir, PathBuf::from("../my-app"));
    }

    #[test]
    fn nested_path_works_on_all_platforms() {
        let sep = std::path::MAIN_SEPARATOR;
        let path = format!("foo{sep}bar{sep}my-app");

        let (name, dir) = resolve_project_path(&path).unwrap();
        assert_eq!(name, "my-app");

        let expected = PathBuf::from("foo").join("bar").join("my-app");
        assert_eq!(dir, expected);
    }

    // ── validate_project_name ─────────────────────────────────────────────────

    #[test]
    fn empty_name_is_invalid() {
        assert!(matches!(
            validate_project_name(""),
            Err(CliError::InvalidProjectName { .. })
        ));
    }

    #[test]
    fn dotfile_name_is_invalid() {
        assert!(matches!(
            validate_project_name(".hidden"),
            Err(CliError::InvalidProjectName { .. })
        ));
    }

    #[test]
    fn valid_names_pass() {
        for name in &["my-project", "my_app", "project123", "pyscaf"] {
            assert!(validate_project_name(name).is_ok(), "failed for: {name}");
        }
    }

    // ── build_params ──────────────────────────────────────────────────────────

    fn new_args(name: &str) -> NewArgs {
        NewArgs {
            name: name.into(),
            python_min: None,
            project_type: None,
            assistants: vec![],
            docker: false,
            author: None,
            description: None,
            template: None,
            yes: true,
            force: false,
            dry_run: false,
        }
    }

    #[test]
    fn params_default_from_config() {
        let args = new_args("demo");
        let config = AppConfig::default();
        let params = build_params(&args, "demo", &config).unwrap();
        assert_eq!(params.python_min(), PythonVersion::new(3, 10));
        assert_eq!(params.project_type(), CoreType::Standard);
    }

    #[test]
    fn cli_python_min_overrides_config() {
        let mut args = new_args("demo");
        args.python_min = Some("3.12".into());
        let params = build_params(&args, "demo", &AppConfig::default()).unwrap();
        assert_eq!(params.python_min(), PythonVersion::new(3, 12));
    }

    #[test]
    fn invalid_python_min_is_user_error() {
        let mut args = new_args("demo");
        args.python_min = Some("latest".into());
        let err = build_params(&args, "demo", &AppConfig::default()).unwrap_err();
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn config_assistants_apply_when_cli_gives_none() {
        let args = new_args("demo");
        let mut config = AppConfig::default();
        config.defaults.assistants = vec!["claude".into(), "bogus".into()];
        let params = build_params(&args, "demo", &config).unwrap();
        assert!(params.has_assistant(CoreAssistant::Claude));
        assert_eq!(params.assistants().count(), 1);
    }

    #[test]
    fn cli_assistants_override_config() {
        let mut args = new_args("demo");
        args.assistants = vec![AssistantArg::Cursor];
        let mut config = AppConfig::default();
        config.defaults.assistants = vec!["claude".into()];
        let params = build_params(&args, "demo", &config).unwrap();
        assert!(params.has_assistant(CoreAssistant::Cursor));
        assert!(!params.has_assistant(CoreAssistant::Claude));
    }
}
