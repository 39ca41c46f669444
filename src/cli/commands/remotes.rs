//! remotes command - List configured remotes

use anyhow::{Context as _, Result};

use crate::cli::Context;
use crate::ui::output;

/// List remotes with their fetch and push URLs.
pub fn remotes(ctx: &Context) -> Result<()> {
    let git = ctx.open()?;
    let remotes = git.list_remotes().context("Failed to list remotes")?;

    if ctx.json {
        return output::json(&remotes);
    }

    let verbosity = ctx.verbosity();
    for remote in &remotes {
        output::result(format!(
            "{}\t{} (fetch)",
            remote.name(),
            remote.url().unwrap_or("-")
        ));
        output::print(
            format!("{}\t{} (push)", remote.name(), remote.push_url().unwrap_or("-")),
            verbosity,
        );
        if ctx.debug {
            for refspec in remote.effective_fetch_refspecs() {
                output::print(format!("\tfetch {}", refspec), verbosity);
            }
            if remote.is_mirror() {
                output::print("\tmirror", verbosity);
            }
        }
    }

    Ok(())
}
