//! git::convert
//!
//! Builds entity values from raw engine records.
//!
//! # Conversions
//!
//! - Commit records into [`Commit`]
//! - Tag refs into [`Tag`], peeling annotated tag records to their commit
//! - Branch refs into [`Branch`], walking the upstream chain
//! - Remote configuration into [`Remote`]
//!
//! Conversion is deterministic: the same record always yields a
//! structurally equal value.
//!
//! # Tracking chains
//!
//! A branch's upstream may itself be a local branch with an upstream
//! (`branch.<name>.remote = .`), so the chain can be long or even cyclic.
//! The walk is iterative and stops with [`GitError::TrackingChainTooDeep`]
//! once it exceeds [`Settings::tracking_depth_limit`](crate::core::config::Settings).

use chrono::{DateTime, FixedOffset, Offset, Utc};
use git2::string_array::StringArray;

use super::interface::{oid_from_git2, oid_to_git2, Git, GitError};
use crate::core::model::{short_message, Branch, BranchStatus, Commit, Person, Remote, Tag};
use crate::core::types::{Oid, RefName, TAGS_PREFIX};

/// Which branches [`Git::list_branches`] returns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BranchListMode {
    /// `refs/heads/*`
    #[default]
    Local,
    /// `refs/remotes/*`
    Remote,
    /// Both local and remote-tracking branches
    All,
}

impl Git {
    // =========================================================================
    // Commits
    // =========================================================================

    /// Look up a commit by id.
    ///
    /// # Errors
    ///
    /// - [`GitError::MissingReference`] if no object has this id
    /// - [`GitError::NotACommit`] if the object is not a commit
    pub fn commit(&self, oid: &Oid) -> Result<Commit, GitError> {
        let object = self
            .repo
            .find_object(oid_to_git2(oid)?, None)
            .map_err(|e| GitError::from_git2(e, oid.as_str()))?;
        let commit = peel_commit(object)?;
        self.convert_commit(&commit)
    }

    /// Resolve a revision expression and peel it to a commit.
    ///
    /// # Errors
    ///
    /// - [`GitError::RevisionUnresolvable`] if the expression matches
    ///   nothing or is ambiguous
    /// - [`GitError::NotACommit`] if it names a tree or blob
    pub fn commit_for_revision(&self, revision: &str) -> Result<Commit, GitError> {
        let oid = self.resolve_revision(revision)?;
        self.commit(&oid)
    }

    /// The commit a ref ultimately points to.
    pub fn commit_for_ref(&self, refname: &RefName) -> Result<Commit, GitError> {
        let oid = self.ref_target(refname)?;
        self.commit(&oid)
    }

    /// The commit HEAD points to, or `None` on an unborn branch.
    pub fn head(&self) -> Result<Option<Commit>, GitError> {
        let head = match self.repo.head() {
            Ok(head) => head,
            Err(e)
                if e.code() == git2::ErrorCode::UnbornBranch
                    || e.code() == git2::ErrorCode::NotFound =>
            {
                return Ok(None)
            }
            Err(e) => return Err(GitError::from_git2(e, "HEAD")),
        };
        let commit = head
            .peel_to_commit()
            .map_err(|e| GitError::from_git2(e, "HEAD"))?;
        self.convert_commit(&commit).map(Some)
    }

    /// The parents of a commit as entities, in recorded order.
    pub fn resolve_parents(&self, commit: &Commit) -> Result<Vec<Commit>, GitError> {
        commit
            .parent_ids()
            .iter()
            .map(|parent| self.commit(parent))
            .collect()
    }

    pub(super) fn convert_commit(&self, commit: &git2::Commit<'_>) -> Result<Commit, GitError> {
        let id = oid_from_git2(commit.id())?;
        let abbreviated_id = commit
            .as_object()
            .short_id()
            .map_err(|e| GitError::from_git2(e, id.as_str()))?
            .as_str()
            .unwrap_or_default()
            .to_string();

        let parent_ids = commit
            .parent_ids()
            .map(oid_from_git2)
            .collect::<Result<Vec<_>, _>>()?;

        let full_message = String::from_utf8_lossy(commit.message_bytes()).into_owned();
        let short = short_message(&full_message);

        log::trace!("converted commit {}", id);
        Ok(Commit::new(
            id,
            abbreviated_id,
            parent_ids,
            person(&commit.author()),
            person(&commit.committer()),
            zoned(commit.time())?,
            full_message,
            short,
        ))
    }

    // =========================================================================
    // Tags
    // =========================================================================

    /// Convert a tag ref.
    ///
    /// An annotated tag record is peeled to its commit and its tagger,
    /// date and message are carried over. Any other target is treated as a
    /// lightweight tag whose target must be a commit.
    ///
    /// # Errors
    ///
    /// - [`GitError::MissingReference`] if the ref doesn't exist
    /// - [`GitError::NotACommit`] if the tag does not lead to a commit
    pub fn tag(&self, refname: &RefName) -> Result<Tag, GitError> {
        let target = self.ref_target(refname)?;
        let object = self
            .repo
            .find_object(oid_to_git2(&target)?, None)
            .map_err(|e| GitError::from_git2(e, target.as_str()))?;

        match object.as_tag() {
            Some(record) => {
                let tagger = record
                    .tagger()
                    .map(|sig| zoned(sig.when()).map(|when| (person(&sig), when)))
                    .transpose()?;
                let message = record
                    .message_bytes()
                    .map(|m| String::from_utf8_lossy(m).into_owned())
                    .unwrap_or_default();
                let commit = self.convert_commit(&peel_commit(object.clone())?)?;
                log::trace!("converted annotated tag {}", refname);
                Ok(Tag::annotated(refname.clone(), commit, tagger, message))
            }
            None => {
                let commit = self.convert_commit(&peel_commit(object)?)?;
                log::trace!("converted lightweight tag {}", refname);
                Ok(Tag::lightweight(refname.clone(), commit))
            }
        }
    }

    /// Find a tag by short or full name. `None` if no such tag exists.
    pub fn find_tag(&self, name: &str) -> Result<Option<Tag>, GitError> {
        let candidate = if name.starts_with(TAGS_PREFIX) {
            name.to_string()
        } else {
            format!("{}{}", TAGS_PREFIX, name)
        };
        match self.first_existing_ref([candidate])? {
            Some(refname) => self.tag(&refname).map(Some),
            None => Ok(None),
        }
    }

    /// All tags, sorted by full name.
    ///
    /// Tags that do not lead to a commit (a tag of a tree, say) are skipped.
    pub fn list_tags(&self) -> Result<Vec<Tag>, GitError> {
        let names = self.repo.tag_names(None)?;
        let mut refnames = names
            .iter()
            .flatten()
            .map(|name| RefName::new(format!("{}{}", TAGS_PREFIX, name)))
            .collect::<Result<Vec<_>, _>>()?;
        refnames.sort();

        let mut tags = Vec::with_capacity(refnames.len());
        for refname in refnames {
            match self.tag(&refname) {
                Ok(tag) => tags.push(tag),
                Err(GitError::NotACommit { oid, kind }) => {
                    log::debug!("skipping {}: {} is a {}", refname, oid, kind);
                }
                Err(e) => return Err(e),
            }
        }
        Ok(tags)
    }

    // =========================================================================
    // Branches
    // =========================================================================

    /// Convert a branch ref, resolving its tracking chain.
    ///
    /// # Errors
    ///
    /// - [`GitError::TrackingChainTooDeep`] if the upstream chain is longer
    ///   than the configured ceiling
    pub fn branch(&self, refname: &RefName) -> Result<Branch, GitError> {
        let limit = self.settings.tracking_depth_limit;
        let mut upstreams: Vec<RefName> = Vec::new();
        let mut current = refname.clone();

        while let Some(upstream) = self.upstream_of(&current)? {
            if upstreams.len() >= limit {
                return Err(GitError::TrackingChainTooDeep {
                    branch: refname.to_string(),
                    limit,
                });
            }
            log::trace!("{} tracks {}", current, upstream);
            upstreams.push(upstream.clone());
            current = upstream;
        }

        let tracking = upstreams
            .into_iter()
            .rev()
            .fold(None, |tracking, name| Some(Branch::new(name, tracking)));
        Ok(Branch::new(refname.clone(), tracking))
    }

    /// Find a branch by name. `None` if no such branch exists.
    ///
    /// A short name is looked up as a local branch first, then as a
    /// remote-tracking branch (`origin/main`).
    pub fn find_branch(&self, name: &str) -> Result<Option<Branch>, GitError> {
        match self.first_existing_ref(Self::branch_candidates(name))? {
            Some(refname) => self.branch(&refname).map(Some),
            None => Ok(None),
        }
    }

    /// Branches of the requested kind, sorted by full name.
    ///
    /// Symbolic refs such as `refs/remotes/origin/HEAD` are not branches and
    /// are left out.
    pub fn list_branches(&self, mode: BranchListMode) -> Result<Vec<Branch>, GitError> {
        let filter = match mode {
            BranchListMode::Local => Some(git2::BranchType::Local),
            BranchListMode::Remote => Some(git2::BranchType::Remote),
            BranchListMode::All => None,
        };

        let mut refnames = Vec::new();
        for entry in self.repo.branches(filter)? {
            let (branch, _) = entry?;
            let reference = branch.get();
            if reference.kind() == Some(git2::ReferenceType::Symbolic) {
                continue;
            }
            let name = String::from_utf8_lossy(reference.name_bytes()).into_owned();
            refnames.push(RefName::new(name)?);
        }
        refnames.sort();

        refnames.iter().map(|name| self.branch(name)).collect()
    }

    /// Ahead/behind counts of a branch against its tracking branch.
    ///
    /// # Errors
    ///
    /// - [`GitError::MissingReference`] if the branch has no tracking branch
    pub fn branch_status(&self, branch: &Branch) -> Result<BranchStatus, GitError> {
        let tracking = branch
            .tracking_branch()
            .ok_or_else(|| GitError::MissingReference {
                what: format!("tracking branch of {}", branch.full_name()),
            })?;

        let local = self.commit_for_ref(branch.full_name())?;
        let upstream = self.commit_for_ref(tracking.full_name())?;
        let (ahead, behind) = self.ahead_behind(local.id(), upstream.id())?;

        Ok(BranchStatus::new(branch.clone(), ahead, behind))
    }

    // =========================================================================
    // Remotes
    // =========================================================================

    /// Convert one configured remote.
    ///
    /// # Errors
    ///
    /// - [`GitError::MissingReference`] if no remote has this name
    /// - [`GitError::MultiUriRemote`] if it has more than one fetch or push URL
    pub fn find_remote(&self, name: &str) -> Result<Remote, GitError> {
        let config = self.repo.config()?;
        let urls = config_values(&config, &format!("remote.{}.url", name))?;
        let push_urls = config_values(&config, &format!("remote.{}.pushurl", name))?;
        if urls.len() > 1 || push_urls.len() > 1 {
            return Err(GitError::MultiUriRemote {
                remote: name.to_string(),
                urls: urls.len(),
                push_urls: push_urls.len(),
            });
        }

        let remote = self
            .repo
            .find_remote(name)
            .map_err(|e| GitError::from_git2(e, &format!("remote {}", name)))?;

        let mirror = match config.get_bool(&format!("remote.{}.mirror", name)) {
            Ok(mirror) => mirror,
            Err(e) if e.code() == git2::ErrorCode::NotFound => false,
            Err(e) => return Err(GitError::from_git2(e, name)),
        };

        Ok(Remote::new(
            name.to_string(),
            urls.into_iter().next(),
            push_urls.into_iter().next(),
            refspecs(&remote.fetch_refspecs()?),
            refspecs(&remote.push_refspecs()?),
            mirror,
        ))
    }

    /// All configured remotes, sorted by name.
    ///
    /// A single multi-URL remote fails the whole listing.
    pub fn list_remotes(&self) -> Result<Vec<Remote>, GitError> {
        let names = self.repo.remotes()?;
        let mut names: Vec<String> = names.iter().flatten().map(String::from).collect();
        names.sort();
        names.iter().map(|name| self.find_remote(name)).collect()
    }
}

/// Peel an object to a commit, reporting its kind when that is impossible.
fn peel_commit(object: git2::Object<'_>) -> Result<git2::Commit<'_>, GitError> {
    let id = object.id().to_string();
    let kind = object
        .kind()
        .map(|k| k.to_string())
        .unwrap_or_else(|| "unknown object".to_string());

    match object.peel(git2::ObjectType::Commit) {
        Ok(peeled) => peeled.into_commit().map_err(|other| GitError::NotACommit {
            oid: other.id().to_string(),
            kind: other
                .kind()
                .map(|k| k.to_string())
                .unwrap_or_else(|| "unknown object".to_string()),
        }),
        Err(e) if e.code() == git2::ErrorCode::NotFound => Err(GitError::from_git2(e, &id)),
        Err(_) => Err(GitError::NotACommit { oid: id, kind }),
    }
}

fn person(signature: &git2::Signature<'_>) -> Person {
    Person::new(
        String::from_utf8_lossy(signature.name_bytes()),
        String::from_utf8_lossy(signature.email_bytes()),
    )
}

/// Combine epoch seconds with the recorded offset, falling back to UTC.
fn zoned(time: git2::Time) -> Result<DateTime<FixedOffset>, GitError> {
    let offset = FixedOffset::east_opt(time.offset_minutes() * 60).unwrap_or_else(|| Utc.fix());
    DateTime::from_timestamp(time.seconds(), 0)
        .map(|utc| utc.with_timezone(&offset))
        .ok_or_else(|| GitError::Store {
            message: format!("timestamp {} out of range", time.seconds()),
        })
}

fn refspecs(array: &StringArray) -> Vec<String> {
    array.iter().flatten().map(String::from).collect()
}

/// Every value of a multi-valued config key, in file order.
fn config_values(config: &git2::Config, key: &str) -> Result<Vec<String>, GitError> {
    let mut values = Vec::new();
    let mut entries = match config.multivar(key, None) {
        Ok(entries) => entries,
        Err(e) if e.code() == git2::ErrorCode::NotFound => return Ok(values),
        Err(e) => return Err(GitError::from_git2(e, key)),
    };
    while let Some(entry) = entries.next() {
        let entry = entry?;
        if let Some(value) = entry.value() {
            values.push(value.to_string());
        }
    }
    Ok(values)
}
