//! branches command - List branches with their tracking branches

use anyhow::{Context as _, Result};
use serde::Serialize;

use crate::cli::Context;
use crate::core::model::{Branch, BranchStatus};
use crate::git::BranchListMode;
use crate::ui::output;

#[derive(Serialize)]
struct BranchLine<'a> {
    branch: &'a Branch,
    #[serde(skip_serializing_if = "Option::is_none")]
    status: Option<BranchStatus>,
}

/// List branches.
///
/// With `verbose`, branches that have a tracking branch also show how far
/// ahead and behind it they are.
pub fn branches(ctx: &Context, remote: bool, all: bool, verbose: bool) -> Result<()> {
    let git = ctx.open()?;
    let mode = if all {
        BranchListMode::All
    } else if remote {
        BranchListMode::Remote
    } else {
        BranchListMode::Local
    };
    let branches = git.list_branches(mode).context("Failed to list branches")?;

    let mut lines = Vec::with_capacity(branches.len());
    for branch in &branches {
        let status = match (verbose, branch.tracking_branch()) {
            (true, Some(_)) => Some(
                git.branch_status(branch)
                    .with_context(|| format!("Failed to compare {}", branch.name()))?,
            ),
            _ => None,
        };
        lines.push(BranchLine { branch, status });
    }

    if ctx.json {
        return output::json(&lines);
    }

    for line in &lines {
        output::result(format_line(line));
    }
    Ok(())
}

fn format_line(line: &BranchLine<'_>) -> String {
    let mut text = line.branch.name().to_string();
    if let Some(tracking) = line.branch.tracking_branch() {
        text.push_str(&format!(" [{}", tracking.name()));
        if let Some(status) = &line.status {
            match (status.ahead_count(), status.behind_count()) {
                (0, 0) => {}
                (ahead, 0) => text.push_str(&format!(": ahead {}", ahead)),
                (0, behind) => text.push_str(&format!(": behind {}", behind)),
                (ahead, behind) => {
                    text.push_str(&format!(": ahead {}, behind {}", ahead, behind))
                }
            }
        }
        text.push(']');
    }
    text
}
