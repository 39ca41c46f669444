//! Shared fixture for integration tests.
//!
//! Builds real repositories in a temp dir with the git command line.
//! Author and committer dates are pinned through the environment so that
//! timestamps and offsets are predictable.

#![allow(dead_code)]

use std::path::Path;
use std::process::{Command, Output};

use tempfile::TempDir;

use veneer::core::config::Settings;
use veneer::git::Git;

/// 2024-05-01 12:00:00 UTC
pub const EPOCH: i64 = 1_714_564_800;

/// Test fixture that creates a real git repository.
pub struct TestRepo {
    dir: TempDir,
    /// Date applied to the next commit or tag, in git's internal format.
    date: std::cell::RefCell<String>,
}

impl TestRepo {
    /// Create a repository on `main` with one commit of `README.md`.
    pub fn new() -> Self {
        let repo = Self::empty();
        repo.commit_file("README.md", "# Test Repo\n", "Initial commit");
        repo
    }

    /// Create a repository on an unborn `main`.
    pub fn empty() -> Self {
        let dir = TempDir::new().expect("failed to create temp dir");
        let repo = Self {
            dir,
            date: std::cell::RefCell::new(format!("{} +0000", EPOCH)),
        };

        repo.run(&["init", "-q"]);
        repo.run(&["symbolic-ref", "HEAD", "refs/heads/main"]);
        repo.run(&["config", "user.email", "test@example.com"]);
        repo.run(&["config", "user.name", "Test User"]);
        repo.run(&["config", "commit.gpgsign", "false"]);
        repo.run(&["config", "tag.gpgsign", "false"]);
        repo.run(&["config", "core.autocrlf", "false"]);
        repo
    }

    /// Get the path to the repository.
    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Open a Git interface to this repository with default settings.
    pub fn git(&self) -> Git {
        Git::open(self.path()).expect("failed to open test repo")
    }

    /// Open a Git interface with explicit settings.
    pub fn git_with(&self, settings: Settings) -> Git {
        Git::open_with(self.path(), settings).expect("failed to open test repo")
    }

    /// Pin the date of subsequent commits and tags.
    ///
    /// `offset` is a git time zone such as `+0200` or `-0700`.
    pub fn set_date(&self, seconds: i64, offset: &str) {
        *self.date.borrow_mut() = format!("{} {}", seconds, offset);
    }

    /// Write a file in the working tree without staging it.
    pub fn write(&self, path: &str, content: &str) {
        let full = self.path().join(path);
        if let Some(parent) = full.parent() {
            std::fs::create_dir_all(parent).unwrap();
        }
        std::fs::write(full, content).unwrap();
    }

    /// Create a file and commit it, returning the new commit id.
    pub fn commit_file(&self, path: &str, content: &str, message: &str) -> String {
        self.write(path, content);
        self.run(&["add", path]);
        self.commit(message)
    }

    /// Commit whatever is staged, returning the new commit id.
    pub fn commit(&self, message: &str) -> String {
        self.run(&["commit", "-q", "--allow-empty", "-m", message]);
        self.rev_parse("HEAD")
    }

    /// Resolve a revision with git itself.
    pub fn rev_parse(&self, revision: &str) -> String {
        let output = self.output(&["rev-parse", revision]);
        assert!(output.status.success(), "rev-parse {revision} failed");
        String::from_utf8(output.stdout).unwrap().trim().to_string()
    }

    /// Run a git command, panicking on failure.
    pub fn run(&self, args: &[&str]) {
        let output = self.output(args);
        if !output.status.success() {
            panic!(
                "git {:?} failed: {}",
                args,
                String::from_utf8_lossy(&output.stderr)
            );
        }
    }

    /// Run a git command and return its output, whatever the exit status.
    pub fn output(&self, args: &[&str]) -> Output {
        let date = self.date.borrow().clone();
        Command::new("git")
            .args(args)
            .current_dir(self.path())
            .env("GIT_AUTHOR_DATE", &date)
            .env("GIT_COMMITTER_DATE", &date)
            .env("GIT_CONFIG_NOSYSTEM", "1")
            .env("GIT_TERMINAL_PROMPT", "0")
            .output()
            .expect("failed to run git")
    }

    /// Add `origin` pointing nowhere and a remote-tracking `origin/main`
    /// at the current HEAD.
    pub fn fake_origin(&self) {
        self.run(&["remote", "add", "origin", "https://example.com/repo.git"]);
        self.run(&["update-ref", "refs/remotes/origin/main", "HEAD"]);
    }

    /// Configure `branch`'s upstream directly.
    pub fn set_upstream(&self, branch: &str, remote: &str, merge: &str) {
        self.run(&["config", &format!("branch.{branch}.remote"), remote]);
        self.run(&["config", &format!("branch.{branch}.merge"), merge]);
    }
}
