//! show command - Show a commit and the paths it changed

use anyhow::{Context as _, Result};
use serde::Serialize;

use crate::cli::Context;
use crate::core::model::{Commit, CommitDiff};
use crate::resolve::{Input, Resolver};
use crate::ui::output::{self, Verbosity};

#[derive(Serialize)]
struct ShowOutput<'a> {
    commit: &'a Commit,
    #[serde(skip_serializing_if = "Option::is_none")]
    diff: Option<&'a CommitDiff>,
}

/// Show a commit and, unless `with_paths` is false, its first-parent diff.
pub fn show(ctx: &Context, revision: &str, with_paths: bool) -> Result<()> {
    let git = ctx.open()?;
    let resolver = Resolver::new(&git);

    let commit = resolver
        .commit(Input::from(revision))
        .with_context(|| format!("Failed to resolve '{}'", revision))?
        .context("No commit to show")?;

    let diff = if with_paths {
        Some(git.diff(&commit).context("Failed to diff commit")?)
    } else {
        None
    };

    if ctx.json {
        return output::json(&ShowOutput {
            commit: &commit,
            diff: diff.as_ref(),
        });
    }

    let verbosity = ctx.verbosity();
    output::result(format!("commit {}", commit.id()));
    if verbosity == Verbosity::Quiet {
        return Ok(());
    }

    if commit.parent_ids().len() > 1 {
        let parents: Vec<&str> = commit
            .parent_ids()
            .iter()
            .map(|p| p.short(7))
            .collect();
        output::print(format!("Merge: {}", parents.join(" ")), verbosity);
    }
    output::print(format!("Author: {}", commit.author()), verbosity);
    output::print(format!("Date:   {}", output::format_date(commit.date_time())), verbosity);
    output::print("", verbosity);
    for line in commit.full_message().lines() {
        output::print(format!("    {}", line), verbosity);
    }

    if let Some(diff) = diff {
        output::print("", verbosity);
        print_diff(&diff, verbosity);
    }

    Ok(())
}

fn print_diff(diff: &CommitDiff, verbosity: Verbosity) {
    for path in diff.added() {
        output::print(format!("A\t{}", path), verbosity);
    }
    for path in diff.copied() {
        output::print(format!("C\t{}", path), verbosity);
    }
    for path in diff.modified() {
        output::print(format!("M\t{}", path), verbosity);
    }
    for path in diff.removed() {
        output::print(format!("D\t{}", path), verbosity);
    }
    for (from, to) in diff.renamings() {
        output::print(format!("R\t{} -> {}", from, to), verbosity);
    }
}
