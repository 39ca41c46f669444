//! config command - Show effective configuration

use anyhow::{Context as _, Result};
use serde::Serialize;

use crate::cli::Context;
use crate::core::config::{Config, Settings};
use crate::ui::output;

#[derive(Serialize)]
struct ConfigOutput {
    global_file: Option<String>,
    repo_file: Option<String>,
    tracking_depth_limit: usize,
    detect_copies: bool,
    rename_threshold: Option<u16>,
    rename_limit: Option<usize>,
    include_untracked: bool,
}

impl ConfigOutput {
    fn new(config: &Config, settings: Settings) -> Self {
        Self {
            global_file: config
                .global_config_loaded_from()
                .map(|p| p.display().to_string()),
            repo_file: config
                .repo_config_loaded_from()
                .map(|p| p.display().to_string()),
            tracking_depth_limit: settings.tracking_depth_limit,
            detect_copies: settings.detect_copies,
            rename_threshold: settings.rename_threshold,
            rename_limit: settings.rename_limit,
            include_untracked: settings.include_untracked,
        }
    }
}

/// Show where configuration was loaded from and the effective values.
///
/// Works outside a repository, in which case only global config applies.
pub fn config(ctx: &Context) -> Result<()> {
    let cwd = ctx.cwd()?;
    let root = crate::git::Git::open(&cwd)
        .ok()
        .and_then(|git| git.work_dir().map(|p| p.to_path_buf()));

    let config = Config::load(root.as_deref()).context("Failed to load configuration")?;
    let out = ConfigOutput::new(&config, config.settings());

    if ctx.json {
        return output::json(&out);
    }

    let show = |value: Option<String>| value.unwrap_or_else(|| "(default)".to_string());
    output::result(format!("global file: {}", show(out.global_file.clone())));
    output::result(format!("repo file: {}", show(out.repo_file.clone())));
    output::result(format!("resolve.tracking_depth_limit = {}", out.tracking_depth_limit));
    output::result(format!("diff.detect_copies = {}", out.detect_copies));
    output::result(format!(
        "diff.rename_threshold = {}",
        show(out.rename_threshold.map(|t| t.to_string()))
    ));
    output::result(format!(
        "diff.rename_limit = {}",
        show(out.rename_limit.map(|l| l.to_string()))
    ));
    output::result(format!("status.include_untracked = {}", out.include_untracked));
    Ok(())
}
