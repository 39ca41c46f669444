//! cli::commands
//!
//! Command dispatch and handlers.
//!
//! # Architecture
//!
//! Each command handler:
//! 1. Opens the repository through [`Context::open`]
//! 2. Queries the [`crate::git`] doorway or the [`crate::resolve`] layer
//! 3. Formats and displays output, as text or JSON
//!
//! Handlers never write to the repository.

mod branches;
mod completion;
mod config_cmd;
mod describe;
mod log_cmd;
mod remotes;
mod resolve;
mod show;
mod status;
mod tags;

// Re-export command functions for testing and direct invocation
pub use branches::branches;
pub use completion::completion;
pub use config_cmd::config;
pub use describe::describe;
pub use log_cmd::log;
pub use remotes::remotes;
pub use resolve::resolve;
pub use show::show;
pub use status::status;
pub use tags::tags;

use crate::cli::args::Command;
use crate::cli::Context;
use crate::git::{DescribeOptions, LogOptions};
use anyhow::Result;

/// Dispatch a command to its handler.
pub fn dispatch(command: Command, ctx: &Context) -> Result<()> {
    match command {
        Command::Show { revision, no_paths } => show::show(ctx, &revision, !no_paths),
        Command::Log {
            revisions,
            excludes,
            max_count,
            skip,
            paths,
        } => log_cmd::log(
            ctx,
            LogOptions {
                includes: revisions,
                excludes,
                paths,
                skip,
                max_count,
            },
        ),
        Command::Describe {
            revision,
            long,
            tags,
            pattern,
        } => describe::describe(
            ctx,
            &revision,
            &DescribeOptions {
                long,
                tags,
                pattern,
            },
        ),
        Command::Status => status::status(ctx),
        Command::Branches {
            remote,
            all,
            verbose,
        } => branches::branches(ctx, remote, all, verbose),
        Command::Tags => tags::tags(ctx),
        Command::Remotes => remotes::remotes(ctx),
        Command::Resolve { input, target } => resolve::resolve(ctx, &input, target),
        Command::Config => config_cmd::config(ctx),
        Command::Completion { shell } => completion::completion(shell),
    }
}
