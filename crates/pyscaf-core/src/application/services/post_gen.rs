//! Post-generation initialization.
//!
//! Runs after the project tree is on disk: git init, package-manager
//! detection, commit-hook installation, initial commit. Every step is
//! best-effort — a failure is recorded and logged, never propagated. The
//! caller uses the report to print accurate next-steps guidance.

use std::path::Path;

use tracing::{debug, info, instrument, warn};

use crate::application::ports::ProcessRunner;

/// One post-generation step, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PostGenStep {
    GitInit,
    DetectUv,
    InstallHooks,
    InitialCommit,
}

impl PostGenStep {
    pub const fn describe(&self) -> &'static str {
        match self {
            Self::GitInit => "initialise git repository",
            Self::DetectUv => "detect uv package manager",
            Self::InstallHooks => "install pre-commit hooks",
            Self::InitialCommit => "create initial commit",
        }
    }
}

/// Outcome of one step.
#[derive(Debug, Clone)]
pub struct StepOutcome {
    pub step: PostGenStep,
    pub ok: bool,
    pub detail: String,
}

/// What happened during post-generation.
#[derive(Debug, Clone)]
pub struct PostGenReport {
    pub uv_available: bool,
    pub outcomes: Vec<StepOutcome>,
}

impl PostGenReport {
    pub fn step_ok(&self, step: PostGenStep) -> bool {
        self.outcomes.iter().any(|o| o.step == step && o.ok)
    }
}

/// Sequential, synchronous post-generation runner.
pub struct PostGenRunner<'a> {
    runner: &'a dyn ProcessRunner,
}

impl<'a> PostGenRunner<'a> {
    pub fn new(runner: &'a dyn ProcessRunner) -> Self {
        Self { runner }
    }

    /// Run every step against the generated project. Never fails.
    #[instrument(skip_all, fields(project = %project_dir.display()))]
    pub fn run(&self, project_dir: &Path) -> PostGenReport {
        let mut outcomes = Vec::with_capacity(4);

        outcomes.push(self.git_init(project_dir));
        let (uv_available, detect) = self.detect_uv();
        outcomes.push(detect);
        outcomes.push(self.install_hooks(project_dir, uv_available));
        outcomes.push(self.initial_commit(project_dir));

        for outcome in outcomes.iter().filter(|o| !o.ok) {
            warn!(step = outcome.step.describe(), detail = %outcome.detail, "post-gen step failed");
        }
        info!(
            succeeded = outcomes.iter().filter(|o| o.ok).count(),
            total = outcomes.len(),
            "post-generation finished"
        );

        PostGenReport {
            uv_available,
            outcomes,
        }
    }

    // ── Steps ────────────────────────────────────────────────────────────

    fn git_init(&self, dir: &Path) -> StepOutcome {
        let result = self.run_in("git", &["init", "-b", "main"], dir);
        outcome(PostGenStep::GitInit, result)
    }

    fn detect_uv(&self) -> (bool, StepOutcome) {
        let result = self.runner.run("uv", &["--version"], None);
        let available = matches!(&result, Ok(output) if output.success);
        let mut out = outcome(PostGenStep::DetectUv, result);
        if !available {
            out.detail = "uv not found — falling back to pip (install: https://astral.sh/uv)"
                .to_string();
        }
        (available, out)
    }

    fn install_hooks(&self, dir: &Path, uv_available: bool) -> StepOutcome {
        let install = if uv_available {
            self.run_in("uv", &["tool", "install", "pre-commit"], dir)
        } else {
            self.run_in("pip", &["install", "pre-commit"], dir)
        };
        if !matches!(&install, Ok(output) if output.success) {
            return outcome(PostGenStep::InstallHooks, install);
        }
        let result = self.run_in("pre-commit", &["install"], dir);
        outcome(PostGenStep::InstallHooks, result)
    }

    /// `git add . && git commit`, retried once: pre-commit hooks may rewrite
    /// files and fail the first commit.
    fn initial_commit(&self, dir: &Path) -> StepOutcome {
        const MESSAGE: &str = "Initial commit from pyscaf";

        let _ = self.run_in("git", &["add", "."], dir);
        let first = self.run_in("git", &["commit", "-m", MESSAGE], dir);
        if matches!(&first, Ok(output) if output.success) {
            return outcome(PostGenStep::InitialCommit, first);
        }

        debug!("initial commit failed, re-adding and retrying once");
        let _ = self.run_in("git", &["add", "."], dir);
        let second = self.run_in("git", &["commit", "-m", MESSAGE], dir);
        outcome(PostGenStep::InitialCommit, second)
    }

    fn run_in(
        &self,
        program: &str,
        args: &[&str],
        dir: &Path,
    ) -> crate::error::PyscafResult<crate::application::ports::CommandOutput> {
        self.runner.run(program, args, Some(dir))
    }
}

fn outcome(
    step: PostGenStep,
    result: crate::error::PyscafResult<crate::application::ports::CommandOutput>,
) -> StepOutcome {
    match result {
        Ok(output) if output.success => StepOutcome {
            step,
            ok: true,
            detail: output.stdout.trim().to_string(),
        },
        Ok(output) => StepOutcome {
            step,
            ok: false,
            detail: output.stderr.trim().to_string(),
        },
        Err(e) => StepOutcome {
            step,
            ok: false,
            detail: e.to_string(),
        },
    }
}

// ── tests ─────────────────────────────────────────────────────────────────────
