//! core::model
//!
//! Immutable value types materialized from the object store.
//!
//! # Types
//!
//! - [`Person`] - Author, committer or tagger identity
//! - [`Commit`] - A converted commit record
//! - [`Ref`], [`Branch`], [`Tag`] - Named pointers into the store
//! - [`Remote`] - A configured remote
//! - [`Changes`], [`Status`] - Working tree and index status
//! - [`CommitDiff`] - Paths changed by a commit against its first parent
//! - [`BranchStatus`] - Ahead/behind counts against a tracking branch
//!
//! # Invariants
//!
//! - Values are never mutated after construction. Entities that mirror
//!   store records (`Commit`, `Branch`, `Tag`, `Remote`) are only built by
//!   the converter in [`crate::git`].
//! - Equality and hashing are structural: two values are equal iff every
//!   field is equal.
//! - Path sets and maps are never absent; an empty set means "no paths".
//! - Path sets are ordered (`BTreeSet`) so that output and hashing are
//!   deterministic.

use std::collections::{BTreeMap, BTreeSet};

use chrono::{DateTime, FixedOffset};
use serde::Serialize;

use crate::core::types::{Oid, RefName};

/// A person, identified only by name and email.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Person {
    name: String,
    email: String,
}

impl Person {
    /// Create a person.
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
        }
    }

    /// Name of the person.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Email address of the person.
    pub fn email(&self) -> &str {
        &self.email
    }
}

impl std::fmt::Display for Person {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} <{}>", self.name, self.email)
    }
}

/// A commit.
///
/// `date_time` is the committer time in the committer's recorded offset,
/// or UTC when the record carries no usable offset.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Commit {
    id: Oid,
    abbreviated_id: String,
    parent_ids: Vec<Oid>,
    author: Person,
    committer: Person,
    date_time: DateTime<FixedOffset>,
    full_message: String,
    short_message: String,
}

impl Commit {
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn new(
        id: Oid,
        abbreviated_id: String,
        parent_ids: Vec<Oid>,
        author: Person,
        committer: Person,
        date_time: DateTime<FixedOffset>,
        full_message: String,
        short_message: String,
    ) -> Self {
        Self {
            id,
            abbreviated_id,
            parent_ids,
            author,
            committer,
            date_time,
            full_message,
            short_message,
        }
    }

    /// The full hash of the commit.
    pub fn id(&self) -> &Oid {
        &self.id
    }

    /// The shortest unambiguous prefix of the hash, as computed by the store.
    pub fn abbreviated_id(&self) -> &str {
        &self.abbreviated_id
    }

    /// Hashes of the parent commits, in recorded order.
    ///
    /// Empty for a root commit, two or more for a merge.
    pub fn parent_ids(&self) -> &[Oid] {
        &self.parent_ids
    }

    /// The author of the changes in the commit.
    pub fn author(&self) -> &Person {
        &self.author
    }

    /// The person who recorded the commit.
    pub fn committer(&self) -> &Person {
        &self.committer
    }

    /// Commit time with the committer's time zone.
    pub fn date_time(&self) -> &DateTime<FixedOffset> {
        &self.date_time
    }

    /// The full commit message.
    pub fn full_message(&self) -> &str {
        &self.full_message
    }

    /// The first paragraph of the message, folded onto one line.
    pub fn short_message(&self) -> &str {
        &self.short_message
    }

    /// Whether the commit has no parents.
    pub fn is_root(&self) -> bool {
        self.parent_ids.is_empty()
    }
}

/// A bare ref, known only by its full name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Ref {
    full_name: RefName,
}

impl Ref {
    /// Create a ref from its fully qualified name.
    pub fn new(full_name: RefName) -> Self {
        Self { full_name }
    }

    /// The fully qualified name of this ref.
    pub fn full_name(&self) -> &RefName {
        &self.full_name
    }

    /// The simple name of the ref.
    pub fn name(&self) -> &str {
        self.full_name.short_name()
    }
}

/// A branch, local or remote-tracking.
///
/// The tracking branch is resolved from the branch's configured upstream.
/// It is a lookup, not ownership: the same upstream may appear under many
/// branches.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Branch {
    full_name: RefName,
    tracking_branch: Option<Box<Branch>>,
}

impl Branch {
    pub(crate) fn new(full_name: RefName, tracking_branch: Option<Branch>) -> Self {
        Self {
            full_name,
            tracking_branch: tracking_branch.map(Box::new),
        }
    }

    /// The fully qualified name of this branch.
    pub fn full_name(&self) -> &RefName {
        &self.full_name
    }

    /// The simple name of the branch.
    pub fn name(&self) -> &str {
        self.full_name.short_name()
    }

    /// This branch's upstream, if one is configured and exists.
    pub fn tracking_branch(&self) -> Option<&Branch> {
        self.tracking_branch.as_deref()
    }

    /// The branch as a bare ref.
    pub fn to_ref(&self) -> Ref {
        Ref::new(self.full_name.clone())
    }
}

/// A tag.
///
/// Lightweight tags carry no tagger, message or date. Annotated tags carry
/// a message, and a tagger with date whenever the tag record has a tagger
/// line.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Tag {
    full_name: RefName,
    commit: Commit,
    tagger: Option<Person>,
    full_message: Option<String>,
    short_message: Option<String>,
    date_time: Option<DateTime<FixedOffset>>,
}

impl Tag {
    pub(crate) fn lightweight(full_name: RefName, commit: Commit) -> Self {
        Self {
            full_name,
            commit,
            tagger: None,
            full_message: None,
            short_message: None,
            date_time: None,
        }
    }

    pub(crate) fn annotated(
        full_name: RefName,
        commit: Commit,
        tagger: Option<(Person, DateTime<FixedOffset>)>,
        full_message: String,
    ) -> Self {
        let short_message = short_message(&full_message);
        let (tagger, date_time) = match tagger {
            Some((person, when)) => (Some(person), Some(when)),
            None => (None, None),
        };
        Self {
            full_name,
            commit,
            tagger,
            full_message: Some(full_message),
            short_message: Some(short_message),
            date_time,
        }
    }

    /// The fully qualified name of this tag.
    pub fn full_name(&self) -> &RefName {
        &self.full_name
    }

    /// The simple name of the tag.
    pub fn name(&self) -> &str {
        self.full_name.short_name()
    }

    /// The commit this tag ultimately points to.
    pub fn commit(&self) -> &Commit {
        &self.commit
    }

    /// The person who created an annotated tag.
    pub fn tagger(&self) -> Option<&Person> {
        self.tagger.as_ref()
    }

    /// The full message of an annotated tag.
    pub fn full_message(&self) -> Option<&str> {
        self.full_message.as_deref()
    }

    /// The first paragraph of an annotated tag's message.
    pub fn short_message(&self) -> Option<&str> {
        self.short_message.as_deref()
    }

    /// When an annotated tag was created, in the tagger's time zone.
    pub fn date_time(&self) -> Option<&DateTime<FixedOffset>> {
        self.date_time.as_ref()
    }

    /// Whether this tag is backed by its own tag record.
    pub fn is_annotated(&self) -> bool {
        self.full_message.is_some()
    }

    /// The tag as a bare ref.
    pub fn to_ref(&self) -> Ref {
        Ref::new(self.full_name.clone())
    }
}

/// A configured remote.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Remote {
    name: String,
    url: Option<String>,
    push_url: Option<String>,
    fetch_refspecs: Vec<String>,
    push_refspecs: Vec<String>,
    mirror: bool,
}

impl Remote {
    /// Build a remote. An absent `push_url` falls back to `url`.
    pub(crate) fn new(
        name: String,
        url: Option<String>,
        push_url: Option<String>,
        fetch_refspecs: Vec<String>,
        push_refspecs: Vec<String>,
        mirror: bool,
    ) -> Self {
        let push_url = push_url.or_else(|| url.clone());
        Self {
            name,
            url,
            push_url,
            fetch_refspecs,
            push_refspecs,
            mirror,
        }
    }

    /// Name of the remote.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// URL to fetch from.
    pub fn url(&self) -> Option<&str> {
        self.url.as_deref()
    }

    /// URL to push to. Same as [`url`](Self::url) unless a push URL is configured.
    pub fn push_url(&self) -> Option<&str> {
        self.push_url.as_deref()
    }

    /// Fetch refspecs exactly as configured.
    pub fn fetch_refspecs(&self) -> &[String] {
        &self.fetch_refspecs
    }

    /// Push refspecs exactly as configured.
    pub fn push_refspecs(&self) -> &[String] {
        &self.push_refspecs
    }

    /// Whether pushes mirror the repository.
    pub fn is_mirror(&self) -> bool {
        self.mirror
    }

    /// Fetch refspecs to use for this remote.
    ///
    /// The configured refspecs, or all branches into
    /// `refs/remotes/<name>/*` when none are configured. The default is
    /// computed on every call and never stored.
    pub fn effective_fetch_refspecs(&self) -> Vec<String> {
        if self.fetch_refspecs.is_empty() {
            vec![default_fetch_refspec(&self.name)]
        } else {
            self.fetch_refspecs.clone()
        }
    }
}

/// The refspec git writes for a freshly added remote.
pub fn default_fetch_refspec(remote: &str) -> String {
    format!("+refs/heads/*:refs/remotes/{remote}/*")
}

/// Paths changed relative to one comparison.
///
/// For staged changes the comparison is index vs HEAD; for unstaged
/// changes it is working tree vs index.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize)]
pub struct Changes {
    added: BTreeSet<String>,
    modified: BTreeSet<String>,
    removed: BTreeSet<String>,
}

impl Changes {
    /// Create a change set.
    pub fn new(
        added: impl IntoIterator<Item = String>,
        modified: impl IntoIterator<Item = String>,
        removed: impl IntoIterator<Item = String>,
    ) -> Self {
        Self {
            added: added.into_iter().collect(),
            modified: modified.into_iter().collect(),
            removed: removed.into_iter().collect(),
        }
    }

    pub fn added(&self) -> &BTreeSet<String> {
        &self.added
    }

    pub fn modified(&self) -> &BTreeSet<String> {
        &self.modified
    }

    pub fn removed(&self) -> &BTreeSet<String> {
        &self.removed
    }

    /// All changed paths.
    pub fn all(&self) -> BTreeSet<String> {
        self.added
            .iter()
            .chain(&self.modified)
            .chain(&self.removed)
            .cloned()
            .collect()
    }

    /// Whether no path is changed.
    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.modified.is_empty() && self.removed.is_empty()
    }
}

/// Status of the working tree and index.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize)]
pub struct Status {
    staged: Changes,
    unstaged: Changes,
    conflicts: BTreeSet<String>,
}

impl Status {
    /// Create a status.
    pub fn new(
        staged: Changes,
        unstaged: Changes,
        conflicts: impl IntoIterator<Item = String>,
    ) -> Self {
        Self {
            staged,
            unstaged,
            conflicts: conflicts.into_iter().collect(),
        }
    }

    /// Changes in the index relative to HEAD.
    pub fn staged(&self) -> &Changes {
        &self.staged
    }

    /// Changes in the working tree relative to the index.
    pub fn unstaged(&self) -> &Changes {
        &self.unstaged
    }

    /// Paths with unresolved conflicts.
    pub fn conflicts(&self) -> &BTreeSet<String> {
        &self.conflicts
    }

    /// True if there are no staged or unstaged changes and no conflicts.
    pub fn is_clean(&self) -> bool {
        self.staged.is_empty() && self.unstaged.is_empty() && self.conflicts.is_empty()
    }
}

/// One classified path change within a commit diff.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileChange {
    Added(String),
    Copied(String),
    Modified(String),
    Removed(String),
    Renamed { from: String, to: String },
}

/// Paths changed by a commit relative to its first parent.
///
/// A renamed path is listed under its new name in `renamed` and keyed by
/// its old name in `renamings`; neither name appears in `added` or
/// `removed`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct CommitDiff {
    commit: Commit,
    added: BTreeSet<String>,
    copied: BTreeSet<String>,
    modified: BTreeSet<String>,
    removed: BTreeSet<String>,
    renamed: BTreeSet<String>,
    renamings: BTreeMap<String, String>,
}

impl CommitDiff {
    pub(crate) fn new(commit: Commit) -> Self {
        Self {
            commit,
            added: BTreeSet::new(),
            copied: BTreeSet::new(),
            modified: BTreeSet::new(),
            removed: BTreeSet::new(),
            renamed: BTreeSet::new(),
            renamings: BTreeMap::new(),
        }
    }

    pub(crate) fn record(&mut self, change: FileChange) {
        match change {
            FileChange::Added(path) => {
                self.added.insert(path);
            }
            FileChange::Copied(path) => {
                self.copied.insert(path);
            }
            FileChange::Modified(path) => {
                self.modified.insert(path);
            }
            FileChange::Removed(path) => {
                self.removed.insert(path);
            }
            FileChange::Renamed { from, to } => {
                self.renamed.insert(to.clone());
                self.renamings.insert(from, to);
            }
        }
    }

    /// The commit that was diffed.
    pub fn commit(&self) -> &Commit {
        &self.commit
    }

    pub fn added(&self) -> &BTreeSet<String> {
        &self.added
    }

    pub fn copied(&self) -> &BTreeSet<String> {
        &self.copied
    }

    pub fn modified(&self) -> &BTreeSet<String> {
        &self.modified
    }

    pub fn removed(&self) -> &BTreeSet<String> {
        &self.removed
    }

    /// New names of renamed paths.
    pub fn renamed(&self) -> &BTreeSet<String> {
        &self.renamed
    }

    /// Old path to new path for every rename.
    pub fn renamings(&self) -> &BTreeMap<String, String> {
        &self.renamings
    }

    /// Union of added, copied, modified, removed and renamed paths.
    ///
    /// Old names of renamed paths are not included.
    pub fn all_changes(&self) -> BTreeSet<String> {
        self.added
            .iter()
            .chain(&self.copied)
            .chain(&self.modified)
            .chain(&self.removed)
            .chain(&self.renamed)
            .cloned()
            .collect()
    }
}

/// Tracking status of a branch against its upstream.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct BranchStatus {
    branch: Branch,
    ahead_count: usize,
    behind_count: usize,
}

impl BranchStatus {
    pub(crate) fn new(branch: Branch, ahead_count: usize, behind_count: usize) -> Self {
        Self {
            branch,
            ahead_count,
            behind_count,
        }
    }

    /// The branch this status is for.
    pub fn branch(&self) -> &Branch {
        &self.branch
    }

    /// Commits on the branch that are not on its upstream.
    pub fn ahead_count(&self) -> usize {
        self.ahead_count
    }

    /// Commits on the upstream that are not on the branch.
    pub fn behind_count(&self) -> usize {
        self.behind_count
    }
}

/// Fold the first paragraph of a message onto a single line.
///
/// Leading blank lines are skipped and the paragraph ends at the first
/// blank line. A line holding only whitespace counts as blank. Line breaks
/// inside the paragraph become single spaces; other whitespace is kept.
pub fn short_message(message: &str) -> String {
    let blank = |line: &&str| line.trim().is_empty();
    message
        .lines()
        .skip_while(blank)
        .take_while(|line| !blank(line))
        .collect::<Vec<_>>()
        .join(" ")
}
