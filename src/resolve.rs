//! resolve
//!
//! Revision resolution over a closed set of input shapes.
//!
//! Porcelain commands accept revisions in many forms: an entity already in
//! hand, a ref, a user-typed string or nothing at all. [`Input`] captures
//! those shapes once at the boundary; [`Resolver`] turns an input into the
//! target a command needs.
//!
//! | target                               | accepts                          |
//! |--------------------------------------|----------------------------------|
//! | [`object_id`](Resolver::object_id)   | Commit, Ref, Branch, Tag         |
//! | [`commit`](Resolver::commit)         | Commit, Tag, Branch, string      |
//! | [`branch`](Resolver::branch)         | Branch, string                   |
//! | [`branch_name`](Resolver::branch_name) | Branch, string                 |
//! | [`tag`](Resolver::tag)               | Tag, string                      |
//! | [`tag_name`](Resolver::tag_name)     | Tag, string                      |
//! | [`revision`](Resolver::revision)     | Commit, Tag, Branch, string      |
//!
//! Null resolves to `None` for every target. Any other shape fails with
//! [`ResolveError::UnsupportedInputKind`]. The resolver never writes, and
//! reads the store only to dereference strings and refs.
//!
//! # Example
//!
//! ```no_run
//! use veneer::git::Git;
//! use veneer::resolve::{Input, Resolver};
//! use std::path::Path;
//!
//! let git = Git::open(Path::new(".")).unwrap();
//! let resolver = Resolver::new(&git);
//! let head = resolver.commit(Input::from("HEAD")).unwrap();
//! assert!(head.is_some());
//! ```

use std::any::type_name;
use std::fmt;

use thiserror::Error;

use crate::core::model::{Branch, Commit, Ref, Tag};
use crate::core::types::Oid;
use crate::git::{Git, GitError};

/// Errors from revision resolution.
#[derive(Debug, Error)]
pub enum ResolveError {
    /// The target does not accept this kind of input.
    #[error("cannot resolve {value} ({type_name}) as {target}")]
    UnsupportedInputKind {
        /// What the caller asked for
        target: &'static str,
        /// Type of the offending value
        type_name: String,
        /// Textual form of the offending value
        value: String,
    },

    #[error(transparent)]
    Git(#[from] GitError),
}

/// A value to resolve.
#[derive(Debug, Clone)]
pub enum Input<'a> {
    Commit(&'a Commit),
    Tag(&'a Tag),
    Branch(&'a Branch),
    Ref(&'a Ref),
    Str(&'a str),
    Null,
    /// Anything else, kept for diagnostics only.
    Other {
        type_name: &'static str,
        value: String,
    },
}

impl<'a> Input<'a> {
    /// Wrap a value of a shape no target accepts.
    ///
    /// ```
    /// use veneer::resolve::Input;
    ///
    /// let input = Input::other(&42);
    /// assert_eq!(input.type_name(), "i32");
    /// ```
    pub fn other<T: fmt::Display>(value: &T) -> Self {
        Input::Other {
            type_name: type_name::<T>(),
            value: value.to_string(),
        }
    }

    /// Name of the input's type.
    pub fn type_name(&self) -> &'static str {
        match self {
            Input::Commit(_) => type_name::<Commit>(),
            Input::Tag(_) => type_name::<Tag>(),
            Input::Branch(_) => type_name::<Branch>(),
            Input::Ref(_) => type_name::<Ref>(),
            Input::Str(_) => type_name::<str>(),
            Input::Null => "null",
            Input::Other { type_name, .. } => *type_name,
        }
    }

    fn unsupported(&self, target: &'static str) -> ResolveError {
        ResolveError::UnsupportedInputKind {
            target,
            type_name: self.type_name().to_string(),
            value: self.to_string(),
        }
    }
}

impl fmt::Display for Input<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Input::Commit(commit) => write!(f, "{}", commit.id()),
            Input::Tag(tag) => write!(f, "{}", tag.full_name()),
            Input::Branch(branch) => write!(f, "{}", branch.full_name()),
            Input::Ref(reference) => write!(f, "{}", reference.full_name()),
            Input::Str(s) => write!(f, "{}", s),
            Input::Null => write!(f, "null"),
            Input::Other { value, .. } => write!(f, "{}", value),
        }
    }
}

impl<'a> From<&'a Commit> for Input<'a> {
    fn from(commit: &'a Commit) -> Self {
        Input::Commit(commit)
    }
}

impl<'a> From<&'a Tag> for Input<'a> {
    fn from(tag: &'a Tag) -> Self {
        Input::Tag(tag)
    }
}

impl<'a> From<&'a Branch> for Input<'a> {
    fn from(branch: &'a Branch) -> Self {
        Input::Branch(branch)
    }
}

impl<'a> From<&'a Ref> for Input<'a> {
    fn from(reference: &'a Ref) -> Self {
        Input::Ref(reference)
    }
}

impl<'a> From<&'a str> for Input<'a> {
    fn from(s: &'a str) -> Self {
        Input::Str(s)
    }
}

impl<'a> From<&'a String> for Input<'a> {
    fn from(s: &'a String) -> Self {
        Input::Str(s.as_str())
    }
}

impl<'a, T> From<Option<T>> for Input<'a>
where
    T: Into<Input<'a>>,
{
    fn from(value: Option<T>) -> Self {
        value.map_or(Input::Null, Into::into)
    }
}

/// Resolves [`Input`]s against one repository.
#[derive(Debug, Clone, Copy)]
pub struct Resolver<'a> {
    git: &'a Git,
}

impl<'a> Resolver<'a> {
    pub fn new(git: &'a Git) -> Self {
        Self { git }
    }

    /// The object id an input stands for.
    ///
    /// Refs are dereferenced without peeling, so an annotated tag yields
    /// the id of its tag record.
    pub fn object_id(&self, input: Input<'_>) -> Result<Option<Oid>, ResolveError> {
        let oid = match &input {
            Input::Null => return Ok(None),
            Input::Commit(commit) => commit.id().clone(),
            Input::Ref(reference) => self.git.ref_target(reference.full_name())?,
            Input::Branch(branch) => self.git.ref_target(branch.full_name())?,
            Input::Tag(tag) => self.git.ref_target(tag.full_name())?,
            _ => return Err(input.unsupported("object id")),
        };
        Ok(Some(oid))
    }

    /// The commit an input stands for.
    ///
    /// Strings are resolved as revision expressions.
    pub fn commit(&self, input: Input<'_>) -> Result<Option<Commit>, ResolveError> {
        let commit = match &input {
            Input::Null => return Ok(None),
            Input::Commit(commit) => (*commit).clone(),
            Input::Tag(tag) => tag.commit().clone(),
            Input::Branch(branch) => self.git.commit_for_ref(branch.full_name())?,
            Input::Str(revision) => self.git.commit_for_revision(revision)?,
            _ => return Err(input.unsupported("commit")),
        };
        log::debug!("resolved {} to commit {}", input, commit.id());
        Ok(Some(commit))
    }

    /// The branch an input stands for; `None` if a named branch is absent.
    pub fn branch(&self, input: Input<'_>) -> Result<Option<Branch>, ResolveError> {
        match &input {
            Input::Null => Ok(None),
            Input::Branch(branch) => Ok(Some((*branch).clone())),
            Input::Str(name) => Ok(self.git.find_branch(name)?),
            _ => Err(input.unsupported("branch")),
        }
    }

    /// The branch name an input stands for. Strings pass through unchecked.
    pub fn branch_name(&self, input: Input<'_>) -> Result<Option<String>, ResolveError> {
        match &input {
            Input::Null => Ok(None),
            Input::Branch(branch) => Ok(Some(branch.full_name().to_string())),
            Input::Str(name) => Ok(Some(name.to_string())),
            _ => Err(input.unsupported("branch name")),
        }
    }

    /// The tag an input stands for; `None` if a named tag is absent.
    pub fn tag(&self, input: Input<'_>) -> Result<Option<Tag>, ResolveError> {
        match &input {
            Input::Null => Ok(None),
            Input::Tag(tag) => Ok(Some((*tag).clone())),
            Input::Str(name) => Ok(self.git.find_tag(name)?),
            _ => Err(input.unsupported("tag")),
        }
    }

    /// The tag name an input stands for. Strings pass through unchecked.
    pub fn tag_name(&self, input: Input<'_>) -> Result<Option<String>, ResolveError> {
        match &input {
            Input::Null => Ok(None),
            Input::Tag(tag) => Ok(Some(tag.full_name().to_string())),
            Input::Str(name) => Ok(Some(name.to_string())),
            _ => Err(input.unsupported("tag name")),
        }
    }

    /// A revision string the engine can resolve.
    pub fn revision(&self, input: Input<'_>) -> Result<Option<String>, ResolveError> {
        match &input {
            Input::Null => Ok(None),
            Input::Commit(commit) => Ok(Some(commit.id().to_string())),
            Input::Tag(tag) => Ok(Some(tag.full_name().to_string())),
            Input::Branch(branch) => Ok(Some(branch.full_name().to_string())),
            Input::Str(s) => Ok(Some(s.to_string())),
            _ => Err(input.unsupported("revision")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::model::fixtures::commit;
    use crate::core::types::RefName;

    mod input {
        use super::*;

        #[test]
        fn option_none_is_null() {
            let missing: Option<&Commit> = None;
            assert!(matches!(Input::from(missing), Input::Null));
        }

        #[test]
        fn option_some_unwraps() {
            let c = commit('a', &[]);
            assert!(matches!(Input::from(Some(&c)), Input::Commit(_)));
        }

        #[test]
        fn other_reports_type_and_value() {
            let input = Input::other(&42u64);
            assert_eq!(input.type_name(), "u64");
            assert_eq!(input.to_string(), "42");
        }

        #[test]
        fn display_uses_full_names() {
            let r = Ref::new(RefName::new("refs/notes/commits").unwrap());
            assert_eq!(Input::from(&r).to_string(), "refs/notes/commits");
        }
    }

    mod unsupported {
        use super::*;

        #[test]
        fn error_names_type_value_and_target() {
            let err = Input::other(&7i32).unsupported("commit");
            match err {
                ResolveError::UnsupportedInputKind {
                    target,
                    type_name,
                    value,
                } => {
                    assert_eq!(target, "commit");
                    assert_eq!(type_name, "i32");
                    assert_eq!(value, "7");
                }
                other => panic!("unexpected error: {other:?}"),
            }
        }

        #[test]
        fn ref_type_name_is_qualified() {
            let r = Ref::new(RefName::new("refs/heads/main").unwrap());
            assert!(Input::from(&r).type_name().ends_with("model::Ref"));
        }
    }
}
