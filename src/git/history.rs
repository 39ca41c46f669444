//! git::history
//!
//! Commit logs and `describe`.
//!
//! Revisions given to either query are resolved the same way as
//! [`Git::commit_for_revision`]: tags are peeled, so `v1.0` means the
//! commit the tag points to.

use super::interface::{oid_to_git2, Git, GitError};
use crate::core::model::Commit;

/// Selection for [`Git::log`].
///
/// With no includes the walk starts at HEAD. Commits reachable from any
/// exclude are left out, so `since..until` is
/// [`LogOptions::range`]`(since, until)`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LogOptions {
    /// Revisions to start walking from.
    pub includes: Vec<String>,
    /// Revisions whose history is hidden.
    pub excludes: Vec<String>,
    /// Keep only commits that change one of these paths. A directory
    /// matches everything below it.
    pub paths: Vec<String>,
    /// Number of selected commits to drop from the front.
    pub skip: usize,
    /// Stop after this many commits.
    pub max_count: Option<usize>,
}

impl LogOptions {
    /// Commits reachable from `until` but not from `since`.
    pub fn range(since: impl Into<String>, until: impl Into<String>) -> Self {
        Self {
            includes: vec![until.into()],
            excludes: vec![since.into()],
            ..Self::default()
        }
    }
}

/// Options for [`Git::describe`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DescribeOptions {
    /// Always print `<tag>-<n>-g<abbrev>`, even on the tagged commit itself.
    pub long: bool,
    /// Consider lightweight tags as well as annotated ones.
    pub tags: bool,
    /// Only consider tags whose short name matches this glob.
    pub pattern: Option<String>,
}

impl Git {
    /// Commits selected by `options`, newest first.
    ///
    /// Returns an empty log on an unborn HEAD when no includes are given.
    ///
    /// # Errors
    ///
    /// - [`GitError::RevisionUnresolvable`] if an include or exclude does
    ///   not resolve
    /// - [`GitError::NotACommit`] if one names a tree or blob
    pub fn log(&self, options: &LogOptions) -> Result<Vec<Commit>, GitError> {
        let mut walk = self.repo.revwalk()?;
        walk.set_sorting(git2::Sort::TIME)?;

        if options.includes.is_empty() {
            if self.head()?.is_none() {
                return Ok(Vec::new());
            }
            walk.push_head()?;
        }
        for revision in &options.includes {
            walk.push(oid_to_git2(self.commit_for_revision(revision)?.id())?)?;
        }
        for revision in &options.excludes {
            walk.hide(oid_to_git2(self.commit_for_revision(revision)?.id())?)?;
        }

        let limit = options.max_count.unwrap_or(usize::MAX);
        let mut skipped = 0;
        let mut commits = Vec::new();
        for oid in walk {
            if commits.len() >= limit {
                break;
            }
            let commit = self.repo.find_commit(oid?)?;
            if !options.paths.is_empty() && !self.touches(&commit, &options.paths)? {
                continue;
            }
            if skipped < options.skip {
                skipped += 1;
                continue;
            }
            commits.push(self.convert_commit(&commit)?);
        }

        log::debug!("log selected {} commits", commits.len());
        Ok(commits)
    }

    /// Whether `commit` changes any of `paths` relative to every parent.
    ///
    /// A merge that takes a path unchanged from one parent does not count.
    fn touches(&self, commit: &git2::Commit<'_>, paths: &[String]) -> Result<bool, GitError> {
        let mut opts = git2::DiffOptions::new();
        for path in paths {
            opts.pathspec(path);
        }

        let tree = commit.tree()?;
        if commit.parent_count() == 0 {
            let diff = self
                .repo
                .diff_tree_to_tree(None, Some(&tree), Some(&mut opts))?;
            return Ok(diff.deltas().len() > 0);
        }

        for parent in commit.parents() {
            let parent_tree = parent.tree()?;
            let diff =
                self.repo
                    .diff_tree_to_tree(Some(&parent_tree), Some(&tree), Some(&mut opts))?;
            if diff.deltas().len() == 0 {
                return Ok(false);
            }
        }
        Ok(true)
    }

    /// Name a commit after the nearest tag it descends from.
    ///
    /// `revision` defaults to HEAD. Returns `None` when no tag qualifies.
    pub fn describe(
        &self,
        revision: Option<&str>,
        options: &DescribeOptions,
    ) -> Result<Option<String>, GitError> {
        let commit = self.commit_for_revision(revision.unwrap_or("HEAD"))?;
        let object = self
            .repo
            .find_object(oid_to_git2(commit.id())?, None)
            .map_err(|e| GitError::from_git2(e, commit.id().as_str()))?;

        let mut describe = git2::DescribeOptions::new();
        if options.tags {
            describe.describe_tags();
        }
        if let Some(pattern) = &options.pattern {
            describe.pattern(pattern);
        }

        let found = match object.describe(&describe) {
            Ok(found) => found,
            // "No tag qualifies" comes back as NotFound, or as a generic
            // code in the describe class when no candidate ref exists at all.
            Err(e)
                if e.code() == git2::ErrorCode::NotFound
                    || e.class() == git2::ErrorClass::Describe =>
            {
                log::debug!("no tag describes {}", commit.abbreviated_id());
                return Ok(None);
            }
            Err(e) => return Err(GitError::from_git2(e, commit.id().as_str())),
        };

        let mut format = git2::DescribeFormatOptions::new();
        format.always_use_long_format(options.long);
        Ok(Some(found.format(Some(&format))?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn range_hides_since() {
        let options = LogOptions::range("v1", "main");
        assert_eq!(options.includes, ["main"]);
        assert_eq!(options.excludes, ["v1"]);
        assert!(options.paths.is_empty());
        assert_eq!(options.max_count, None);
    }

    #[test]
    fn describe_defaults_to_annotated_short_form() {
        let options = DescribeOptions::default();
        assert!(!options.long && !options.tags);
        assert!(options.pattern.is_none());
    }
}
