//! Process runner adapters.
//!
//! [`SystemProcessRunner`] shells out via `std::process::Command`;
//! [`ScriptedRunner`] replays canned outputs for tests.

use std::path::Path;
use std::process::Command;

use pyscaf_core::{
    application::ApplicationError,
    application::ports::{CommandOutput, ProcessRunner},
    error::PyscafResult,
};
use tracing::{debug, trace};

/// Production runner using `std::process::Command`.
///
/// Terminal prompts are disabled for git subprocesses so a missing remote
/// never hangs generation waiting for credentials.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemProcessRunner;

impl SystemProcessRunner {
    pub fn new() -> Self {
        Self
    }
}

impl ProcessRunner for SystemProcessRunner {
    fn run(&self, program: &str, args: &[&str], cwd: Option<&Path>) -> PyscafResult<CommandOutput> {
        debug!(program, ?args, cwd = ?cwd, "running external command");

        let mut command = Command::new(program);
        command.args(args);
        if let Some(dir) = cwd {
            command.current_dir(dir);
        }
        if program == "git" {
            command.env("GIT_TERMINAL_PROMPT", "0");
        }

        let output = command
            .output()
            .map_err(|e| ApplicationError::CommandFailed {
                command: format!("{} {}", program, args.join(" ")),
                reason: e.to_string(),
            })?;

        let result = CommandOutput {
            success: output.status.success(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        };
        trace!(
            success = result.success,
            stdout_bytes = result.stdout.len(),
            "command finished"
        );
        Ok(result)
    }
}

/// Test runner that maps full command lines to canned outputs.
///
/// Unknown commands behave like a missing binary (spawn error), which is
/// exactly how the fallback chains under test degrade.
#[derive(Debug, Default)]
pub struct ScriptedRunner {
    responses: Vec<(String, CommandOutput)>,
    record: std::sync::Mutex<Vec<String>>,
}

impl ScriptedRunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a canned output for `"program arg0 arg1 …"`.
    pub fn on(mut self, cmdline: &str, output: CommandOutput) -> Self {
        self.responses.push((cmdline.to_string(), output));
        self
    }

    /// Every command line this runner has seen, in order.
    pub fn calls(&self) -> Vec<String> {
        self.record.lock().unwrap().clone()
    }
}

impl ProcessRunner for ScriptedRunner {
    fn run(
        &self,
        program: &str,
        args: &[&str],
        _cwd: Option<&Path>,
    ) -> PyscafResult<CommandOutput> {
        let cmdline = format!("{} {}", program, args.join(" "));
        self.record.lock().unwrap().push(cmdline.clone());

        self.responses
            .iter()
            .find(|(pattern, _)| *pattern == cmdline)
            .map(|(_, output)| output.clone())
            .ok_or_else(|| {
                ApplicationError::CommandFailed {
                    command: cmdline,
                    reason: "no such command scripted".into(),
                }
                .into()
            })
    }
}

// ── tests ─────────────────────────────────────────────────────────────────────
