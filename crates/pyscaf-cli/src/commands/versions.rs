//! Implementation of the `pyscaf versions` command.
//!
//! Exposes the version-discovery chain directly: useful for checking what
//! matrix a `pyscaf new` run would bake into CI.

use pyscaf_adapters::{EndOfLifeFeed, SystemProcessRunner};
use pyscaf_core::{
    application::VersionDiscovery,
    domain::PythonVersion,
};

use crate::{
    cli::{VersionsArgs, VersionsFormat, global::GlobalArgs},
    error::{CliError, CliResult},
    output::OutputManager,
};

pub fn execute(args: VersionsArgs, _global: GlobalArgs, output: OutputManager) -> CliResult<()> {
    let min: PythonVersion = args
        .python_min
        .as_deref()
        .unwrap_or("3.10")
        .parse()
        .map_err(|e| CliError::Core(pyscaf_core::error::PyscafError::Domain(e)))?;

    let runner = SystemProcessRunner::new();
    let feed = EndOfLifeFeed::new();
    let matrix = VersionDiscovery::new(&runner, &feed)
        .discover(min)
        .including(min);

    match args.format {
        VersionsFormat::Table => {
            output.header("Python version matrix:")?;
            for version in matrix.versions() {
                let marker = if *version == matrix.min() {
                    " (min)"
                } else if *version == matrix.max() {
                    " (max)"
                } else {
                    ""
                };
                output.print(&format!("  {version}{marker}"))?;
            }
        }

        VersionsFormat::List => {
            for version in matrix.versions() {
                println!("{version}");
            }
        }

        VersionsFormat::Json => {
            // Bypasses OutputManager because JSON output must be parseable
            // even in non-TTY pipes.
            let payload = serde_json::json!({
                "bounds": {
                    "min": matrix.min().to_string(),
                    "max": matrix.max().to_string(),
                },
                "matrix": matrix
                    .versions()
                    .iter()
                    .map(ToString::to_string)
                    .collect::<Vec<_>>(),
            });
            println!("{payload}");
        }
    }

    Ok(())
}
