//! git::interface
//!
//! Git interface implementation using git2.
//!
//! This module provides the **single doorway** to the object store. All
//! reads flow through the [`Git`] handle, which returns strong types and
//! normalizes engine errors into typed failure categories.
//!
//! # Architecture
//!
//! The `Git` struct is the only way to interact with a repository. No module
//! outside [`crate::git`] imports `git2`. Conversion into entity values
//! lives in sibling modules (`convert`, `diff`, `status`), each adding an
//! `impl Git` block.
//!
//! # Error Handling
//!
//! Git errors are categorized into typed variants:
//! - [`GitError::NotARepo`]: Not inside a Git repository
//! - [`GitError::RevisionUnresolvable`]: Revision expression not found or ambiguous
//! - [`GitError::MultiUriRemote`]: Remote with more than one fetch or push URL
//! - [`GitError::MissingReference`]: A required ref, branch or upstream is absent
//! - [`GitError::TrackingChainTooDeep`]: Upstream chain exceeds the configured ceiling
//! - [`GitError::Store`]: Any other storage failure
//!
//! # Concurrency
//!
//! Every call blocks until the engine returns. `Git` is `Send` but not
//! `Sync`; callers sharing a handle across threads must serialize access.
//!
//! # Example
//!
//! ```no_run
//! use veneer::git::Git;
//! use std::path::Path;
//!
//! let git = Git::open(Path::new(".")).unwrap();
//! let oid = git.resolve_revision("HEAD").unwrap();
//! println!("HEAD is at {}", oid.short(7));
//! ```

use std::fmt;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::core::config::Settings;
use crate::core::types::{Oid, RefName, TypeError, HEADS_PREFIX, REMOTES_PREFIX};

/// Why a revision expression could not be resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Unresolvable {
    /// Nothing matches the expression.
    NotFound,
    /// More than one object matches the expression.
    Ambiguous,
}

impl fmt::Display for Unresolvable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Unresolvable::NotFound => write!(f, "not found"),
            Unresolvable::Ambiguous => write!(f, "ambiguous"),
        }
    }
}

/// Errors from Git operations.
#[derive(Debug, Error)]
pub enum GitError {
    /// Not inside a Git repository.
    #[error("not a git repository: {path}")]
    NotARepo {
        /// The path that was searched
        path: PathBuf,
    },

    /// The engine could not resolve a revision to exactly one object.
    #[error("cannot resolve revision '{revision}': {reason}")]
    RevisionUnresolvable {
        /// The revision expression
        revision: String,
        /// Whether it was missing or ambiguous
        reason: Unresolvable,
    },

    /// A remote has more than one fetch or push URL.
    #[error("remote '{remote}' has {urls} fetch and {push_urls} push URLs; only one of each is supported")]
    MultiUriRemote {
        /// The remote name
        remote: String,
        /// Number of configured fetch URLs
        urls: usize,
        /// Number of configured push URLs
        push_urls: usize,
    },

    /// An operation required a reference that is absent.
    #[error("missing required reference: {what}")]
    MissingReference {
        /// Description of what was missing
        what: String,
    },

    /// The upstream chain of a branch did not end within the ceiling.
    #[error("tracking chain of {branch} exceeds {limit} hops")]
    TrackingChainTooDeep {
        /// The branch the walk started from
        branch: String,
        /// The configured ceiling
        limit: usize,
    },

    /// An object was expected to be (or peel to) a commit.
    #[error("{oid} is a {kind}, not a commit")]
    NotACommit {
        /// The offending object
        oid: String,
        /// Its object kind
        kind: String,
    },

    /// Invalid object id format.
    #[error("invalid object id: {oid}")]
    InvalidOid {
        /// The invalid OID string
        oid: String,
    },

    /// Invalid ref name format.
    #[error("invalid ref name: {message}")]
    InvalidRefName {
        /// Description of the problem
        message: String,
    },

    /// The storage layer failed.
    #[error("git error: {message}")]
    Store {
        /// The error message
        message: String,
    },
}

impl GitError {
    /// Create a GitError from a git2::Error with richer context.
    pub(super) fn from_git2(err: git2::Error, context: &str) -> Self {
        match err.code() {
            git2::ErrorCode::NotFound => GitError::MissingReference {
                what: context.to_string(),
            },
            _ => GitError::Store {
                message: format!("{}: {}", context, err.message()),
            },
        }
    }

    /// Map a revparse failure onto the unresolvable-revision category.
    fn from_revparse(err: git2::Error, revision: &str) -> Self {
        let reason = match err.code() {
            git2::ErrorCode::NotFound | git2::ErrorCode::InvalidSpec => Unresolvable::NotFound,
            git2::ErrorCode::Ambiguous => Unresolvable::Ambiguous,
            _ => return GitError::from_git2(err, revision),
        };
        GitError::RevisionUnresolvable {
            revision: revision.to_string(),
            reason,
        }
    }
}

impl From<git2::Error> for GitError {
    fn from(err: git2::Error) -> Self {
        GitError::Store {
            message: err.message().to_string(),
        }
    }
}

impl From<TypeError> for GitError {
    fn from(err: TypeError) -> Self {
        match err {
            TypeError::InvalidOid(msg) => GitError::InvalidOid { oid: msg },
            TypeError::InvalidRefName(msg) => GitError::InvalidRefName { message: msg },
        }
    }
}

/// The Git repository handle.
///
/// Holds the engine repository and the effective [`Settings`]. The handle
/// keeps no other state between calls.
pub struct Git {
    /// The underlying git2 repository
    pub(super) repo: git2::Repository,
    pub(super) settings: Settings,
}

impl fmt::Debug for Git {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Git")
            .field("path", &self.repo.path())
            .field("settings", &self.settings)
            .finish()
    }
}

impl Git {
    // =========================================================================
    // Repository Opening and Info
    // =========================================================================

    /// Open a repository at the given path with default settings.
    ///
    /// Uses `git2::Repository::discover` to find the repository root,
    /// so `path` can be any directory within the repository.
    ///
    /// # Errors
    ///
    /// - [`GitError::NotARepo`] if no repository is found
    pub fn open(path: &Path) -> Result<Self, GitError> {
        Self::open_with(path, Settings::default())
    }

    /// Open a repository at the given path with explicit settings.
    pub fn open_with(path: &Path, settings: Settings) -> Result<Self, GitError> {
        let repo = git2::Repository::discover(path).map_err(|_| GitError::NotARepo {
            path: path.to_path_buf(),
        })?;
        log::debug!("opened repository at {}", repo.path().display());
        Ok(Self { repo, settings })
    }

    /// The settings this handle was opened with.
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Path of the `.git` directory.
    pub fn git_dir(&self) -> &Path {
        self.repo.path()
    }

    /// Root of the working tree, `None` for a bare repository.
    pub fn work_dir(&self) -> Option<&Path> {
        self.repo.workdir()
    }

    // =========================================================================
    // Revision and Ref Resolution
    // =========================================================================

    /// Resolve a revision expression to the id of the object it names.
    ///
    /// The object is not peeled: `v1.0` naming an annotated tag resolves to
    /// the tag record, `v1.0^{commit}` to the commit.
    ///
    /// # Errors
    ///
    /// - [`GitError::RevisionUnresolvable`] if nothing, or more than one
    ///   object, matches
    pub fn resolve_revision(&self, revision: &str) -> Result<Oid, GitError> {
        let object = self
            .repo
            .revparse_single(revision)
            .map_err(|e| GitError::from_revparse(e, revision))?;
        log::trace!("revision '{}' -> {}", revision, object.id());
        oid_from_git2(object.id())
    }

    /// Dereference a ref to the object it currently points at.
    ///
    /// Symbolic refs are followed; tag records are not peeled.
    ///
    /// # Errors
    ///
    /// - [`GitError::MissingReference`] if the ref doesn't exist
    pub fn ref_target(&self, refname: &RefName) -> Result<Oid, GitError> {
        let reference = self
            .repo
            .find_reference(refname.as_str())
            .map_err(|e| GitError::from_git2(e, refname.as_str()))?;
        let resolved = reference
            .resolve()
            .map_err(|e| GitError::from_git2(e, refname.as_str()))?;
        let target = resolved.target().ok_or_else(|| GitError::MissingReference {
            what: format!("target of {}", refname),
        })?;
        oid_from_git2(target)
    }

    /// Check if a ref exists.
    ///
    /// Only absence answers `false`. A ref that is present but unreadable,
    /// such as a corrupted loose ref file, is a [`GitError::Store`].
    pub fn ref_exists(&self, refname: &RefName) -> Result<bool, GitError> {
        match self.repo.find_reference(refname.as_str()) {
            Ok(_) => Ok(true),
            Err(e)
                if matches!(
                    e.code(),
                    git2::ErrorCode::NotFound | git2::ErrorCode::InvalidSpec
                ) =>
            {
                Ok(false)
            }
            Err(e) => Err(GitError::from_git2(e, refname.as_str())),
        }
    }

    /// Find the first existing ref among candidate names.
    pub(super) fn first_existing_ref(
        &self,
        candidates: impl IntoIterator<Item = String>,
    ) -> Result<Option<RefName>, GitError> {
        for candidate in candidates {
            let Ok(refname) = RefName::new(candidate) else {
                continue;
            };
            if self.ref_exists(&refname)? {
                return Ok(Some(refname));
            }
        }
        Ok(None)
    }

    /// The configured upstream of a local branch, if it exists in the store.
    ///
    /// Only `refs/heads/*` can carry an upstream. A configured upstream
    /// whose ref is absent (never fetched, or deleted) yields `None`.
    pub(super) fn upstream_of(&self, branch: &RefName) -> Result<Option<RefName>, GitError> {
        if !branch.is_branch_ref() {
            return Ok(None);
        }

        let upstream = match self.repo.branch_upstream_name(branch.as_str()) {
            Ok(buf) => String::from_utf8_lossy(&buf).into_owned(),
            Err(e) if e.code() == git2::ErrorCode::NotFound => return Ok(None),
            Err(e) => return Err(GitError::from_git2(e, branch.as_str())),
        };

        let upstream = RefName::new(upstream)?;
        if !self.ref_exists(&upstream)? {
            log::debug!(
                "upstream {} of {} is configured but absent",
                upstream,
                branch
            );
            return Ok(None);
        }
        Ok(Some(upstream))
    }

    /// Full names a branch short name may refer to, in lookup order.
    pub(super) fn branch_candidates(name: &str) -> Vec<String> {
        if name.starts_with(HEADS_PREFIX) || name.starts_with(REMOTES_PREFIX) {
            vec![name.to_string()]
        } else {
            vec![
                format!("{}{}", HEADS_PREFIX, name),
                format!("{}{}", REMOTES_PREFIX, name),
            ]
        }
    }

    // =========================================================================
    // Ancestry
    // =========================================================================

    /// Check if `base` is an ancestor of `tip`.
    ///
    /// Returns true if base == tip (a commit is its own ancestor).
    pub fn is_ancestor_of(&self, base: &Oid, tip: &Oid) -> Result<bool, GitError> {
        if base == tip {
            return Ok(true);
        }

        let base_oid = oid_to_git2(base)?;
        let tip_oid = oid_to_git2(tip)?;

        self.repo
            .graph_descendant_of(tip_oid, base_oid)
            .map_err(|e| GitError::from_git2(e, tip.as_str()))
    }

    /// Count commits unique to each side: `(ahead, behind)` of `local`
    /// relative to `upstream`.
    pub(super) fn ahead_behind(
        &self,
        local: &Oid,
        upstream: &Oid,
    ) -> Result<(usize, usize), GitError> {
        let local_oid = oid_to_git2(local)?;
        let upstream_oid = oid_to_git2(upstream)?;
        self.repo
            .graph_ahead_behind(local_oid, upstream_oid)
            .map_err(|e| GitError::from_git2(e, local.as_str()))
    }
}

/// Convert an engine id into a validated [`Oid`].
pub(super) fn oid_from_git2(oid: git2::Oid) -> Result<Oid, GitError> {
    Oid::new(oid.to_string()).map_err(GitError::from)
}

/// Convert a validated [`Oid`] into an engine id.
pub(super) fn oid_to_git2(oid: &Oid) -> Result<git2::Oid, GitError> {
    git2::Oid::from_str(oid.as_str()).map_err(|_| GitError::InvalidOid {
        oid: oid.to_string(),
    })
}
