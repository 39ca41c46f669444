//! cli
//!
//! Command-line interface layer for Veneer.
//!
//! # Responsibilities
//!
//! - Parse command-line arguments and global flags
//! - Load configuration and open the repository
//! - Delegate to command handlers
//!
//! # Architecture
//!
//! The CLI layer is thin. Every command is a read-only query against the
//! [`crate::git`] doorway; nothing here touches the repository directly.

pub mod args;
pub mod commands;

pub use args::{Cli, Shell, Target};

use std::path::PathBuf;

use anyhow::{Context as _, Result};

use crate::core::config::Config;
use crate::git::Git;
use crate::ui::output::Verbosity;

/// Execution context for commands.
///
/// Contains global settings derived from CLI flags.
#[derive(Debug, Clone, Default)]
pub struct Context {
    /// Working directory override.
    pub cwd: Option<PathBuf>,
    /// Debug logging enabled.
    pub debug: bool,
    /// Quiet mode (minimal output).
    pub quiet: bool,
    /// JSON output.
    pub json: bool,
}

impl Context {
    /// Output verbosity for this invocation.
    pub fn verbosity(&self) -> Verbosity {
        Verbosity::from_flags(self.quiet, self.debug)
    }

    /// The directory commands run in.
    pub fn cwd(&self) -> Result<PathBuf> {
        match &self.cwd {
            Some(path) => Ok(path.clone()),
            None => std::env::current_dir().context("Failed to get current directory"),
        }
    }

    /// Load configuration for the working directory and open the repository.
    pub fn open(&self) -> Result<Git> {
        let cwd = self.cwd()?;
        let located = Git::open(&cwd)
            .with_context(|| format!("Failed to open repository at {}", cwd.display()))?;
        let root = located
            .work_dir()
            .map(PathBuf::from)
            .unwrap_or_else(|| cwd.clone());

        let config = Config::load(Some(&root)).context("Failed to load configuration")?;
        Git::open_with(&cwd, config.settings())
            .with_context(|| format!("Failed to open repository at {}", cwd.display()))
    }
}

/// Run the CLI application.
///
/// This is the main entry point called from `main.rs`.
pub fn run() -> Result<()> {
    let cli = Cli::parse_args();

    init_logging(cli.debug);

    let ctx = Context {
        cwd: cli.cwd.clone(),
        debug: cli.debug,
        quiet: cli.quiet,
        json: cli.json,
    };

    commands::dispatch(cli.command, &ctx)
}

/// Install the logger. `RUST_LOG` wins over `--debug`.
fn init_logging(debug: bool) {
    let default = if debug { "debug" } else { "warn" };
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default))
        .format_timestamp(None)
        .try_init();
}
