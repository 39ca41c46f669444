//! git::diff
//!
//! First-parent commit diffs.
//!
//! A commit is always compared against its first parent only, merges
//! included. A root commit has nothing to compare against: every path in
//! its tree is reported as added and no rename or copy detection runs.
//!
//! Rename and copy detection is delegated to the engine and tuned through
//! the `[diff]` settings.

use super::interface::{oid_to_git2, Git, GitError};
use crate::core::model::{Commit, CommitDiff, FileChange};

impl Git {
    /// Paths changed by `commit` relative to its first parent.
    pub fn diff(&self, commit: &Commit) -> Result<CommitDiff, GitError> {
        let raw = self
            .repo
            .find_commit(oid_to_git2(commit.id())?)
            .map_err(|e| GitError::from_git2(e, commit.id().as_str()))?;
        let tree = raw.tree()?;

        let changes = if raw.parent_count() == 0 {
            log::debug!("{} is a root commit; listing its tree", commit.abbreviated_id());
            tree_paths(&tree)?
                .into_iter()
                .map(FileChange::Added)
                .collect()
        } else {
            let parent_tree = raw.parent(0)?.tree()?;
            self.tree_changes(&parent_tree, &tree)?
        };

        let mut diff = CommitDiff::new(commit.clone());
        for change in changes {
            diff.record(change);
        }
        Ok(diff)
    }

    fn tree_changes(
        &self,
        old: &git2::Tree<'_>,
        new: &git2::Tree<'_>,
    ) -> Result<Vec<FileChange>, GitError> {
        let mut diff = self.repo.diff_tree_to_tree(Some(old), Some(new), None)?;

        let mut find = git2::DiffFindOptions::new();
        find.renames(true).copies(self.settings.detect_copies);
        if let Some(threshold) = self.settings.rename_threshold {
            find.rename_threshold(threshold).copy_threshold(threshold);
        }
        if let Some(limit) = self.settings.rename_limit {
            find.rename_limit(limit);
        }
        diff.find_similar(Some(&mut find))?;

        let changes: Vec<FileChange> = diff.deltas().filter_map(classify).collect();
        log::debug!("{} changed paths", changes.len());
        Ok(changes)
    }
}

/// Classify one delta. Unmodified, ignored and other non-change deltas
/// yield `None`.
fn classify(delta: git2::DiffDelta<'_>) -> Option<FileChange> {
    let old = path_of(&delta.old_file());
    let new = path_of(&delta.new_file());

    match delta.status() {
        git2::Delta::Added => new.map(FileChange::Added),
        git2::Delta::Copied => new.map(FileChange::Copied),
        git2::Delta::Modified | git2::Delta::Typechange => new.map(FileChange::Modified),
        git2::Delta::Deleted => old.map(FileChange::Removed),
        git2::Delta::Renamed => match (old, new) {
            (Some(from), Some(to)) => Some(FileChange::Renamed { from, to }),
            _ => None,
        },
        _ => None,
    }
}

fn path_of(file: &git2::DiffFile<'_>) -> Option<String> {
    file.path_bytes()
        .map(|bytes| String::from_utf8_lossy(bytes).into_owned())
}

/// Every non-tree entry of a tree, as slash-separated paths.
fn tree_paths(tree: &git2::Tree<'_>) -> Result<Vec<String>, GitError> {
    let mut paths = Vec::new();
    tree.walk(git2::TreeWalkMode::PreOrder, |root, entry| {
        if entry.kind() != Some(git2::ObjectType::Tree) {
            let name = String::from_utf8_lossy(entry.name_bytes());
            paths.push(format!("{}{}", root, name));
        }
        git2::TreeWalkResult::Ok
    })?;
    Ok(paths)
}
