//! describe command - Name a commit after the nearest tag

use anyhow::{Context as _, Result};

use crate::cli::Context;
use crate::git::DescribeOptions;
use crate::ui::output;

/// Describe `revision`. Fails when no tag qualifies, as `git describe` does.
pub fn describe(ctx: &Context, revision: &str, options: &DescribeOptions) -> Result<()> {
    let git = ctx.open()?;
    let name = git
        .describe(Some(revision), options)
        .with_context(|| format!("Failed to describe '{}'", revision))?;

    if ctx.json {
        return output::json(&name);
    }

    let name = name.with_context(|| format!("No tags can describe '{}'", revision))?;
    output::result(name);
    Ok(())
}
