//! git::status
//!
//! Raw working tree and index status.
//!
//! The engine's per-path flags are sorted into the seven raw path sets of
//! [`RawStatus`]; relabeling into [`Status`] happens in [`crate::core::status`].

use super::interface::{Git, GitError};
use crate::core::model::Status;
use crate::core::status::RawStatus;

impl Git {
    /// Classify every changed path in the index and working tree.
    ///
    /// Untracked files are reported unless `[status] include_untracked`
    /// is off. Ignored files are never reported.
    pub fn raw_status(&self) -> Result<RawStatus, GitError> {
        let mut opts = git2::StatusOptions::new();
        opts.include_untracked(self.settings.include_untracked)
            .recurse_untracked_dirs(self.settings.include_untracked)
            .include_ignored(false)
            .renames_head_to_index(false)
            .renames_index_to_workdir(false);

        let statuses = self
            .repo
            .statuses(Some(&mut opts))
            .map_err(|e| GitError::from_git2(e, "status"))?;

        let mut raw = RawStatus::default();
        for entry in statuses.iter() {
            let path = String::from_utf8_lossy(entry.path_bytes()).into_owned();
            sort_into(&mut raw, entry.status(), path);
        }
        Ok(raw)
    }

    /// Working tree and index status.
    pub fn status(&self) -> Result<Status, GitError> {
        self.raw_status().map(Status::from)
    }
}

fn sort_into(raw: &mut RawStatus, flags: git2::Status, path: String) {
    if flags.is_conflicted() {
        raw.conflicting.insert(path);
        return;
    }

    if flags.is_index_new() {
        raw.added.insert(path.clone());
    }
    if flags.is_index_modified() || flags.is_index_typechange() {
        raw.changed.insert(path.clone());
    }
    if flags.is_index_deleted() {
        raw.removed.insert(path.clone());
    }

    if flags.is_wt_new() {
        raw.untracked.insert(path.clone());
    }
    if flags.is_wt_modified() || flags.is_wt_typechange() {
        raw.modified.insert(path.clone());
    }
    if flags.is_wt_deleted() {
        raw.missing.insert(path);
    }
}
