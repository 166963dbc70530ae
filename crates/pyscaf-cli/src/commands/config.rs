//! `pyscaf config` — read and write configuration values.

use crate::{
    cli::ConfigCommands,
    config::AppConfig,
    error::{CliError, CliResult},
    output::OutputManager,
};

/// Dispatch to the correct config subcommand.
pub fn execute(cmd: ConfigCommands, config: AppConfig, output: OutputManager) -> CliResult<()> {
    match cmd {
        ConfigCommands::Get { key } => {
            let value = get_config_value(&config, &key)?;
            output.print(&format!("{key} = {value:?}"))?;
        }

        ConfigCommands::Set { key, value } => {
            set_config_value(key, value, &output)?;
        }

        ConfigCommands::List => {
            output.header("Current Configuration:")?;
            let serialised =
                toml::to_string_pretty(&config).map_err(|e| CliError::ConfigError {
                    message: format!("Failed to serialise config: {e}"),
                    source: Some(Box::new(e)),
                })?;
            output.print(&serialised)?;
        }

        ConfigCommands::Path => {
            output.print(&AppConfig::config_path().display().to_string())?;
        }
    }

    Ok(())
}

// ── helpers ───────────────────────────────────────────────────────────────────

fn get_config_value(config: &AppConfig, key: &str) -> CliResult<String> {
    match key {
        "defaults.python-min" => Ok(config.defaults.python_min.clone()),
        "defaults.type" => Ok(config.defaults.project_type.clone()),
        "defaults.author" => Ok(config.defaults.author.clone().unwrap_or_default()),
        "defaults.assistants" => Ok(config.defaults.assistants.join(",")),
        "output.no_color" => Ok(config.output.no_color.to_string()),
        "output.format" => Ok(config.output.format.clone()),
        "template.source" => Ok(config.template.source.clone().unwrap_or_default()),
        _ => Err(CliError::ConfigError {
            message: format!("Unknown config key: '{key}'"),
            source: None,
        }),
    }
}

/// Re-load the config file, apply one key, write it back.
fn set_config_value(key: String, value: String, output: &OutputManager) -> CliResult<()> {
    let path = AppConfig::config_path();
    let mut config = AppConfig::load(Some(&path)).map_err(|e| CliError::ConfigError {
        message: format!("Failed to load config: {e}"),
        source: None,
    })?;

    match key.as_str() {
        "defaults.python-min" => config.defaults.python_min = value.clone(),
        "defaults.type" => config.defaults.project_type = value.clone(),
        "defaults.author" => config.defaults.author = Some(value.clone()),
        "defaults.assistants" => {
            config.defaults.assistants = value.split(',').map(str::to_string).collect();
        }
        "output.no_color" => {
            config.output.no_color = value.parse().map_err(|_| CliError::ConfigError {
                message: format!("'{value}' is not a boolean"),
                source: None,
            })?;
        }
        "output.format" => config.output.format = value.clone(),
        "template.source" => config.template.source = Some(value.clone()),
        _ => {
            return Err(CliError::ConfigError {
                message: format!("Unknown config key: '{key}'"),
                source: None,
            });
        }
    }

    let serialised = toml::to_string_pretty(&config).map_err(|e| CliError::ConfigError {
        message: format!("Failed to serialise config: {e}"),
        source: Some(Box::new(e)),
    })?;
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| CliError::IoError {
            message: format!("Failed to create config directory '{}'", parent.display()),
            source: e,
        })?;
    }
    std::fs::write(&path, serialised).map_err(|e| CliError::IoError {
        message: format!("Failed to write config to '{}'", path.display()),
        source: e,
    })?;

    output.success(&format!("Set {key} = {value}"))?;
    Ok(())
}

// ── tests ─────────────────────────────────────────────────────────────────────
