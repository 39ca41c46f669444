//! status command - Show staged, unstaged and conflicting paths

use anyhow::{Context as _, Result};

use crate::cli::Context;
use crate::core::model::Changes;
use crate::ui::output::{self, Verbosity};

/// Show working tree and index status.
pub fn status(ctx: &Context) -> Result<()> {
    let git = ctx.open()?;
    let status = git.status().context("Failed to read status")?;

    if ctx.json {
        return output::json(&status);
    }

    let verbosity = ctx.verbosity();
    if status.is_clean() {
        output::print("nothing to commit, working tree clean", verbosity);
        return Ok(());
    }

    print_changes("Staged", status.staged(), verbosity);
    print_changes("Unstaged", status.unstaged(), verbosity);

    if !status.conflicts().is_empty() {
        output::print("Conflicts:", verbosity);
        for path in status.conflicts() {
            output::print(format!("  U {}", path), verbosity);
        }
    }

    Ok(())
}

fn print_changes(heading: &str, changes: &Changes, verbosity: Verbosity) {
    if changes.is_empty() {
        return;
    }
    output::print(format!("{}:", heading), verbosity);
    for path in changes.added() {
        output::print(format!("  A {}", path), verbosity);
    }
    for path in changes.modified() {
        output::print(format!("  M {}", path), verbosity);
    }
    for path in changes.removed() {
        output::print(format!("  D {}", path), verbosity);
    }
}
