//! Tracking-commit resolution.
//!
//! Contract: [`CommitResolver::resolve`] returns a valid 40-hex commit hash,
//! never errors, and degrades to a deterministic hash of the template
//! identifier. Ordered fallback strategies:
//!
//! 1. `PYSCAF_TEMPLATE_COMMIT` environment override (offline reproducibility).
//! 2. Local template path: `git -C <template> rev-parse HEAD`.
//! 3. Remote: `git ls-remote <source> HEAD`.
//! 4. Local filesystem probing of `.git/HEAD` → refs / packed-refs.
//! 5. Synthetic: SHA-256 of the template identifier, truncated to 40 hex chars.
//!
//! Each strategy's output is validated before being accepted; anything that
//! is not exactly 40 hex characters falls through to the next strategy.

use std::path::Path;

use sha2::{Digest, Sha256};
use tracing::{debug, instrument};

use crate::application::ports::{Filesystem, ProcessRunner};
use crate::domain::{CommitHash, TemplateSource};

/// Environment variable overriding commit resolution entirely.
pub const COMMIT_OVERRIDE_ENV: &str = "PYSCAF_TEMPLATE_COMMIT";

/// Best-effort resolution of the template revision a project tracks.
pub struct CommitResolver<'a> {
    runner: &'a dyn ProcessRunner,
    filesystem: &'a dyn Filesystem,
}

impl<'a> CommitResolver<'a> {
    pub fn new(runner: &'a dyn ProcessRunner, filesystem: &'a dyn Filesystem) -> Self {
        Self { runner, filesystem }
    }

    /// Resolve the tracking commit for `source`. Never fails.
    #[instrument(skip_all, fields(source = %source))]
    pub fn resolve(&self, source: &TemplateSource) -> CommitHash {
        if let Some(hash) = self.from_env() {
            debug!(commit = hash.short(), "commit from environment override");
            return hash;
        }
        if let Some(hash) = self.from_rev_parse(source) {
            debug!(commit = hash.short(), "commit from rev-parse");
            return hash;
        }
        if let Some(hash) = self.from_ls_remote(source) {
            debug!(commit = hash.short(), "commit from ls-remote");
            return hash;
        }
        if let Some(hash) = self.from_git_dir(source) {
            debug!(commit = hash.short(), "commit from .git probing");
            return hash;
        }

        let hash = synthetic_commit(&source.identifier());
        debug!(commit = hash.short(), "commit synthesised from identifier");
        hash
    }

    // ── Strategies ───────────────────────────────────────────────────────

    fn from_env(&self) -> Option<CommitHash> {
        let value = std::env::var(COMMIT_OVERRIDE_ENV).ok()?;
        CommitHash::parse(&value).ok()
    }

    fn from_rev_parse(&self, source: &TemplateSource) -> Option<CommitHash> {
        let path = source.local_path()?;
        let path_str = path.to_str()?;
        let output = self
            .runner
            .run("git", &["-C", path_str, "rev-parse", "HEAD"], None)
            .ok()?;
        if !output.success {
            return None;
        }
        CommitHash::parse(output.stdout.trim()).ok()
    }

    fn from_ls_remote(&self, source: &TemplateSource) -> Option<CommitHash> {
        let target = source.identifier();
        let output = self
            .runner
            .run("git", &["ls-remote", &target, "HEAD"], None)
            .ok()?;
        if !output.success {
            return None;
        }
        // First whitespace-delimited column of the first line.
        let first = output.stdout.lines().next()?;
        let hash = first.split_whitespace().next()?;
        CommitHash::parse(hash).ok()
    }

    /// Read `.git/HEAD` directly — works without a git binary.
    fn from_git_dir(&self, source: &TemplateSource) -> Option<CommitHash> {
        let path = source.local_path()?;
        let git_dir = path.join(".git");
        let head = self.filesystem.read_file(&git_dir.join("HEAD")).ok()?;
        let head = head.trim();

        // Detached HEAD: the file holds the hash itself.
        let Some(refname) = head.strip_prefix("ref: ") else {
            return CommitHash::parse(head).ok();
        };
        let refname = refname.trim();

        // Loose ref file first, then packed-refs.
        if let Ok(content) = self.filesystem.read_file(&git_dir.join(refname)) {
            if let Ok(hash) = CommitHash::parse(content.trim()) {
                return Some(hash);
            }
        }
        self.from_packed_refs(&git_dir, refname)
    }

    fn from_packed_refs(&self, git_dir: &Path, refname: &str) -> Option<CommitHash> {
        let packed = self.filesystem.read_file(&git_dir.join("packed-refs")).ok()?;
        for line in packed.lines() {
            let line = line.trim();
            if line.starts_with('#') || line.starts_with('^') {
                continue;
            }
            let mut parts = line.split_whitespace();
            let (Some(hash), Some(name)) = (parts.next(), parts.next()) else {
                continue;
            };
            if name == refname {
                return CommitHash::parse(hash).ok();
            }
        }
        None
    }
}

/// Deterministic fallback hash: SHA-256 of the identifier, hex-encoded,
/// truncated to the 40 characters a git hash has.
pub fn synthetic_commit(identifier: &str) -> CommitHash {
    let mut hasher = Sha256::new();
    hasher.update(identifier.as_bytes());
    let digest = hex::encode(hasher.finalize());
    CommitHash::parse(&digest[..40]).expect("sha256 hex prefix is 40 hex chars")
}

// ── tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::CommandOutput;
    use crate::error::{PyscafError, PyscafResult};
    use std::collections::HashMap;
    use std::path::PathBuf;
    use std::sync::Mutex;

    /// Runner that maps "program arg0 arg1 …" to canned outputs.
    #[derive(Default)]
    struct CannedRunner {
        responses: HashMap<String, CommandOutput>,
        calls: Mutex<Vec<String>>,
    }

    impl CannedRunner {
        fn with(mut self, cmdline: &str, output: CommandOutput) -> Self {
            self.responses.insert(cmdline.to_string(), output);
            self
        }
    }

    impl ProcessRunner for CannedRunner {
        fn run(
            &self,
            program: &str,
            args: &[&str],
            _cwd: Option<&Path>,
        ) -> PyscafResult<CommandOutput> {
            let cmdline = format!("{} {}", program, args.join(" "));
            self.calls.lock().unwrap().push(cmdline.clone());
            self.responses
                .get(&cmdline)
                .cloned()
                .ok_or(PyscafError::Internal {
                    message: format!("no canned response for: {cmdline}"),
                })
        }
    }

    /// Filesystem that only answers `read_file`.
    #[derive(Default)]
    struct ReadOnlyFs {
        files: HashMap<PathBuf, String>,
    }

    impl ReadOnlyFs {
        fn with(mut self, path: &str, content: &str) -> Self {
            self.files.insert(PathBuf::from(path), content.to_string());
            self
        }
    }

    impl Filesystem for ReadOnlyFs {
        fn create_dir_all(&self, _path: &Path) -> PyscafResult<()> {
            unimplemented!("not used by the resolver")
        }
        fn write_file(&self, _path: &Path, _content: &str) -> PyscafResult<()> {
            unimplemented!("not used by the resolver")
        }
        fn read_file(&self, path: &Path) -> PyscafResult<String> {
            self.files.get(path).cloned().ok_or(PyscafError::Internal {
                message: format!("no such file: {}", path.display()),
            })
        }
        fn set_permissions(&self, _path: &Path, _executable: bool) -> PyscafResult<()> {
            unimplemented!("not used by the resolver")
        }
        fn exists(&self, path: &Path) -> bool {
            self.files.contains_key(path)
        }
        fn remove_dir_all(&self, _path: &Path) -> PyscafResult<()> {
            unimplemented!("not used by the resolver")
        }
    }

    fn sha(fill: char) -> String {
        fill.to_string().repeat(40)
    }

    #[test]
    fn rev_parse_wins_for_local_template() {
        let runner = CannedRunner::default().with(
            "git -C /tpl rev-parse HEAD",
            CommandOutput::ok(format!("{}\n", sha('a'))),
        );
        let fs = ReadOnlyFs::default();
        let resolver = CommitResolver::new(&runner, &fs);

        let hash = resolver.resolve(&TemplateSource::Local(PathBuf::from("/tpl")));
        assert_eq!(hash.as_str(), sha('a'));
    }

    #[test]
    fn ls_remote_used_for_remote_template() {
        let runner = CannedRunner::default().with(
            "git ls-remote https://example.com/tpl HEAD",
            CommandOutput::ok(format!("{}\tHEAD\n", sha('b'))),
        );
        let fs = ReadOnlyFs::default();
        let resolver = CommitResolver::new(&runner, &fs);

        let hash = resolver.resolve(&TemplateSource::Remote("https://example.com/tpl".into()));
        assert_eq!(hash.as_str(), sha('b'));
    }

    #[test]
    fn git_dir_probing_follows_symbolic_ref() {
        // No git binary at all: every run() errors.
        let runner = CannedRunner::default();
        let fs = ReadOnlyFs::default()
            .with("/tpl/.git/HEAD", "ref: refs/heads/main\n")
            .with("/tpl/.git/refs/heads/main", &format!("{}\n", sha('c')));
        let resolver = CommitResolver::new(&runner, &fs);

        let hash = resolver.resolve(&TemplateSource::Local(PathBuf::from("/tpl")));
        assert_eq!(hash.as_str(), sha('c'));
    }

    #[test]
    fn git_dir_probing_reads_packed_refs() {
        let runner = CannedRunner::default();
        let fs = ReadOnlyFs::default()
            .with("/tpl/.git/HEAD", "ref: refs/heads/main\n")
            .with(
                "/tpl/.git/packed-refs",
                &format!(
                    "# pack-refs with: peeled fully-peeled sorted\n{} refs/heads/main\n",
                    sha('d')
                ),
            );
        let resolver = CommitResolver::new(&runner, &fs);

        let hash = resolver.resolve(&TemplateSource::Local(PathBuf::from("/tpl")));
        assert_eq!(hash.as_str(), sha('d'));
    }

    #[test]
    fn git_dir_probing_handles_detached_head() {
        let runner = CannedRunner::default();
        let fs = ReadOnlyFs::default().with("/tpl/.git/HEAD", &format!("{}\n", sha('e')));
        let resolver = CommitResolver::new(&runner, &fs);

        let hash = resolver.resolve(&TemplateSource::Local(PathBuf::from("/tpl")));
        assert_eq!(hash.as_str(), sha('e'));
    }

    #[test]
    fn synthetic_fallback_is_deterministic_and_valid() {
        let runner = CannedRunner::default();
        let fs = ReadOnlyFs::default();
        let resolver = CommitResolver::new(&runner, &fs);

        let source = TemplateSource::Remote("https://example.com/nowhere".into());
        let first = resolver.resolve(&source);
        let second = resolver.resolve(&source);

        assert_eq!(first, second);
        assert_eq!(first.as_str().len(), 40);
        assert_eq!(first, synthetic_commit("https://example.com/nowhere"));
    }

    #[test]
    fn invalid_rev_parse_output_falls_through() {
        let runner = CannedRunner::default()
            .with(
                "git -C /tpl rev-parse HEAD",
                CommandOutput::ok("fatal: not a git repository\n"),
            )
            .with(
                "git ls-remote /tpl HEAD",
                CommandOutput::failed("fatal: repository not found"),
            );
        let fs = ReadOnlyFs::default();
        let resolver = CommitResolver::new(&runner, &fs);

        let source = TemplateSource::Local(PathBuf::from("/tpl"));
        let hash = resolver.resolve(&source);
        assert_eq!(hash, synthetic_commit("/tpl"));
    }

    #[test]
    fn synthetic_commits_differ_by_identifier() {
        assert_ne!(synthetic_commit("a"), synthetic_commit("b"));
    }
}
