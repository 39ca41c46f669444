//! log command - List commits, newest first

use anyhow::{Context as _, Result};

use crate::cli::Context;
use crate::git::LogOptions;
use crate::ui::output::{self, Verbosity};

/// Print the commits `options` selects, one per line.
pub fn log(ctx: &Context, options: LogOptions) -> Result<()> {
    let git = ctx.open()?;
    let commits = git.log(&options).context("Failed to read history")?;

    if ctx.json {
        return output::json(&commits);
    }

    let verbosity = ctx.verbosity();
    for commit in &commits {
        if verbosity == Verbosity::Quiet {
            output::result(commit.id());
        } else {
            output::result(format!(
                "{} {}",
                commit.abbreviated_id(),
                commit.short_message()
            ));
        }
    }
    Ok(())
}
