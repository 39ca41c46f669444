//! tags command - List tags

use anyhow::{Context as _, Result};

use crate::cli::Context;
use crate::ui::output;

/// List tags with the commit each points to.
pub fn tags(ctx: &Context) -> Result<()> {
    let git = ctx.open()?;
    let tags = git.list_tags().context("Failed to list tags")?;

    if ctx.json {
        return output::json(&tags);
    }

    for tag in &tags {
        let line = match tag.short_message() {
            Some(message) if !ctx.quiet => format!(
                "{}\t{}\t{}",
                tag.name(),
                tag.commit().abbreviated_id(),
                message
            ),
            _ => format!("{}\t{}", tag.name(), tag.commit().abbreviated_id()),
        };
        output::result(line);
    }

    Ok(())
}
