//! cli::args
//!
//! Command-line argument definitions using clap derive.
//!
//! # Global Flags
//!
//! These flags are available on all commands:
//! - `--help` / `-h`: Show help
//! - `--version`: Show version
//! - `--cwd <path>`: Run as if in that directory
//! - `--debug`: Enable debug logging
//! - `--quiet` / `-q`: Minimal output
//! - `--json`: Machine-readable output

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Veneer - read-only views of a Git repository
#[derive(Parser, Debug)]
#[command(name = "veneer")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Run as if veneer was started in this directory
    #[arg(long, global = true)]
    pub cwd: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    /// Minimal output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Print results as JSON
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    /// Parse command-line arguments.
    pub fn parse_args() -> Self {
        Parser::parse()
    }
}

/// Available commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Show a commit and the paths it changed
    #[command(
        name = "show",
        long_about = "Show a commit and the paths it changed.\n\n\
            The commit is compared against its first parent only, merges included. \
            A root commit lists every path in its tree as added.",
        after_help = "\
EXAMPLES:
    # The commit HEAD points to
    veneer show

    # A tag, a branch or an abbreviated hash
    veneer show v1.0
    veneer show feature
    veneer show 3f2a9c1"
    )]
    Show {
        /// Revision to show
        #[arg(default_value = "HEAD")]
        revision: String,

        /// Omit the list of changed paths
        #[arg(long)]
        no_paths: bool,
    },

    /// List commits, newest first
    #[command(
        name = "log",
        after_help = "\
EXAMPLES:
    # History of HEAD
    veneer log

    # What main has that v1.0 does not
    veneer log main --not v1.0

    # The last five commits touching src/
    veneer log -n 5 -- src"
    )]
    Log {
        /// Revisions to start from (defaults to HEAD)
        revisions: Vec<String>,

        /// Hide commits reachable from this revision
        #[arg(long = "not", value_name = "REV")]
        excludes: Vec<String>,

        /// Stop after this many commits
        #[arg(short = 'n', long)]
        max_count: Option<usize>,

        /// Skip this many commits first
        #[arg(long, default_value_t = 0)]
        skip: usize,

        /// Only commits that change these paths
        #[arg(last = true)]
        paths: Vec<String>,
    },

    /// Name a commit after the nearest tag it descends from
    #[command(name = "describe")]
    Describe {
        /// Revision to describe
        #[arg(default_value = "HEAD")]
        revision: String,

        /// Always use the long format
        #[arg(long)]
        long: bool,

        /// Consider lightweight tags too
        #[arg(long)]
        tags: bool,

        /// Only consider tags matching this glob
        #[arg(long = "match", value_name = "GLOB")]
        pattern: Option<String>,
    },

    /// Show staged, unstaged and conflicting paths
    #[command(name = "status")]
    Status,

    /// List branches with their tracking branches
    #[command(name = "branches")]
    Branches {
        /// List remote-tracking branches
        #[arg(short, long, conflicts_with = "all")]
        remote: bool,

        /// List local and remote-tracking branches
        #[arg(short, long)]
        all: bool,

        /// Show ahead/behind counts against each tracking branch
        #[arg(short, long)]
        verbose: bool,
    },

    /// List tags
    #[command(name = "tags")]
    Tags,

    /// List configured remotes
    #[command(name = "remotes")]
    Remotes,

    /// Resolve a name or revision to a target kind
    #[command(
        name = "resolve",
        after_help = "\
EXAMPLES:
    # Full id of the commit a tag points to
    veneer resolve v1.0 --as commit

    # Object id of the tag record itself
    veneer resolve refs/tags/v1.0 --as object-id

    # Full name of a branch and its tracking chain
    veneer resolve feature --as branch"
    )]
    Resolve {
        /// Name or revision expression
        input: String,

        /// What to resolve it to
        #[arg(long = "as", value_enum, default_value_t = Target::Commit)]
        target: Target,
    },

    /// Show effective configuration
    #[command(name = "config")]
    Config,

    /// Generate shell completion scripts
    #[command(name = "completion")]
    Completion {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Resolution targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Target {
    ObjectId,
    Commit,
    Branch,
    BranchName,
    Tag,
    TagName,
    Revision,
}

/// Shell types for completion generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    #[value(name = "powershell")]
    PowerShell,
}
