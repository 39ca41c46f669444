//! core::types
//!
//! Strong identifier types shared by the entity model and the Git doorway.
//!
//! # Types
//!
//! - [`Oid`] - Git object identifier (SHA-1 or SHA-256 hex)
//! - [`RefName`] - Validated, fully qualified Git reference name
//!
//! # Validation
//!
//! These types enforce validity at construction time. Invalid values
//! cannot be represented, so converted entities never carry malformed ids.
//!
//! # Examples
//!
//! ```
//! use veneer::core::types::{Oid, RefName};
//!
//! let oid = Oid::new("abc123def4567890abc123def4567890abc12345").unwrap();
//! let refname = RefName::new("refs/heads/feature/foo").unwrap();
//! assert_eq!(refname.short_name(), "feature/foo");
//!
//! assert!(RefName::new("refs/heads/invalid..name").is_err());
//! assert!(Oid::new("not-a-sha").is_err());
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors from type validation.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TypeError {
    #[error("invalid object id: {0}")]
    InvalidOid(String),

    #[error("invalid ref name: {0}")]
    InvalidRefName(String),
}

/// Namespace for local branches.
pub const HEADS_PREFIX: &str = "refs/heads/";

/// Namespace for tags.
pub const TAGS_PREFIX: &str = "refs/tags/";

/// Namespace for remote-tracking branches.
pub const REMOTES_PREFIX: &str = "refs/remotes/";

/// A Git object identifier (SHA-1 or SHA-256).
///
/// OIDs are normalized to lowercase so that equality is purely textual.
///
/// # Example
///
/// ```
/// use veneer::core::types::Oid;
///
/// let oid = Oid::new("ABC123DEF4567890ABC123DEF4567890ABC12345").unwrap();
/// assert_eq!(oid.as_str(), "abc123def4567890abc123def4567890abc12345");
/// assert_eq!(oid.short(7), "abc123d");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Oid(String);

impl Oid {
    /// Create a new validated object id.
    ///
    /// # Errors
    ///
    /// Returns `TypeError::InvalidOid` if the string is not a 40 or 64
    /// character hex string.
    pub fn new(oid: impl Into<String>) -> Result<Self, TypeError> {
        let oid = oid.into().to_ascii_lowercase();
        Self::validate(&oid)?;
        Ok(Self(oid))
    }

    /// Get the first `len` characters of the OID.
    ///
    /// This is a fixed-width prefix. The shortest *unambiguous* prefix is
    /// computed by the engine and stored on [`Commit`](crate::core::model::Commit).
    pub fn short(&self, len: usize) -> &str {
        let end = len.min(self.0.len());
        &self.0[..end]
    }

    fn validate(oid: &str) -> Result<(), TypeError> {
        if oid.len() != 40 && oid.len() != 64 {
            return Err(TypeError::InvalidOid(format!(
                "expected 40 or 64 hex characters, got {}",
                oid.len()
            )));
        }
        if !oid.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(TypeError::InvalidOid(
                "object id must be hexadecimal".into(),
            ));
        }
        Ok(())
    }

    /// Get the object id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for Oid {
    type Error = TypeError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::new(s)
    }
}

impl From<Oid> for String {
    fn from(oid: Oid) -> Self {
        oid.0
    }
}

impl AsRef<str> for Oid {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Oid {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A validated, fully qualified Git reference name.
///
/// Reference names must conform to Git's refname rules (see
/// `git check-ref-format`). `HEAD` and other one-level names are accepted.
///
/// # Example
///
/// ```
/// use veneer::core::types::RefName;
///
/// let refname = RefName::new("refs/remotes/origin/main").unwrap();
/// assert!(refname.is_remote_ref());
/// assert_eq!(refname.short_name(), "origin/main");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct RefName(String);

impl RefName {
    /// Create a new validated ref name.
    ///
    /// # Errors
    ///
    /// Returns `TypeError::InvalidRefName` if the name violates Git's refname rules.
    pub fn new(name: impl Into<String>) -> Result<Self, TypeError> {
        let name = name.into();
        Self::validate(&name)?;
        Ok(Self(name))
    }

    /// The simple name of the ref.
    ///
    /// Strips exactly one of `refs/heads/`, `refs/tags/` or `refs/remotes/`.
    /// Any other name is returned unchanged.
    ///
    /// ```
    /// use veneer::core::types::RefName;
    ///
    /// assert_eq!(RefName::new("refs/tags/v1.0").unwrap().short_name(), "v1.0");
    /// assert_eq!(RefName::new("refs/notes/commits").unwrap().short_name(), "refs/notes/commits");
    /// assert_eq!(RefName::new("HEAD").unwrap().short_name(), "HEAD");
    /// ```
    pub fn short_name(&self) -> &str {
        [HEADS_PREFIX, TAGS_PREFIX, REMOTES_PREFIX]
            .iter()
            .find_map(|prefix| self.0.strip_prefix(prefix))
            .unwrap_or(&self.0)
    }

    /// Strip a prefix from the ref name and return the remainder.
    ///
    /// Returns `None` if the ref doesn't start with the given prefix.
    pub fn strip_prefix(&self, prefix: &str) -> Option<&str> {
        self.0.strip_prefix(prefix)
    }

    /// Check if this ref is a local branch ref.
    pub fn is_branch_ref(&self) -> bool {
        self.0.starts_with(HEADS_PREFIX)
    }

    /// Check if this ref is a remote-tracking branch ref.
    pub fn is_remote_ref(&self) -> bool {
        self.0.starts_with(REMOTES_PREFIX)
    }

    /// Check if this ref is a tag ref.
    pub fn is_tag_ref(&self) -> bool {
        self.0.starts_with(TAGS_PREFIX)
    }

    /// Check `name` against the subset of `git check-ref-format` rules
    /// that a stored ref can violate.
    fn validate(name: &str) -> Result<(), TypeError> {
        let reject = |why: &str| -> Result<(), TypeError> {
            Err(TypeError::InvalidRefName(format!("'{name}' {why}")))
        };

        if name.is_empty() {
            return Err(TypeError::InvalidRefName("empty name".into()));
        }
        if name.starts_with('/') || name.ends_with('/') {
            return reject("has a leading or trailing slash");
        }
        if let Some(seq) = ["..", "@{", "//"].iter().find(|seq| name.contains(**seq)) {
            return reject(&format!("contains '{seq}'"));
        }
        if let Some(c) = name
            .chars()
            .find(|c| c.is_ascii_control() || " ~^:\\?*[".contains(*c))
        {
            return reject(&format!("contains {c:?}"));
        }
        if name
            .split('/')
            .any(|part| part.starts_with('.') || part.ends_with(".lock"))
        {
            return reject("has a component starting with '.' or ending in '.lock'");
        }
        Ok(())
    }

    /// Get the ref name as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for RefName {
    type Error = TypeError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::new(s)
    }
}

impl From<RefName> for String {
    fn from(name: RefName) -> Self {
        name.0
    }
}

impl AsRef<str> for RefName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for RefName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    mod oid {
        use super::*;

        #[test]
        fn normalizes_to_lowercase() {
            let oid = Oid::new("ABCDEF0123456789ABCDEF0123456789ABCDEF01").unwrap();
            assert_eq!(oid.as_str(), "abcdef0123456789abcdef0123456789abcdef01");
        }

        #[test]
        fn accepts_sha256_length() {
            assert!(Oid::new("a".repeat(64)).is_ok());
        }

        #[test]
        fn rejects_wrong_length() {
            assert!(matches!(Oid::new("abc123"), Err(TypeError::InvalidOid(_))));
        }

        #[test]
        fn rejects_non_hex() {
            assert!(Oid::new("g".repeat(40)).is_err());
        }

        #[test]
        fn short_is_clamped() {
            let oid = Oid::new("abcdef0123456789abcdef0123456789abcdef01").unwrap();
            assert_eq!(oid.short(4), "abcd");
            assert_eq!(oid.short(100).len(), 40);
        }

        #[test]
        fn serde_rejects_invalid() {
            let parsed: Result<Oid, _> = serde_json::from_str("\"zzz\"");
            assert!(parsed.is_err());
        }
    }

    mod ref_name {
        use super::*;

        #[test]
        fn short_name_strips_known_namespaces() {
            let cases = [
                ("refs/heads/main", "main"),
                ("refs/heads/feature/x", "feature/x"),
                ("refs/tags/v1.0.0", "v1.0.0"),
                ("refs/remotes/origin/main", "origin/main"),
                ("refs/stash", "refs/stash"),
                ("HEAD", "HEAD"),
            ];
            for (full, short) in cases {
                assert_eq!(RefName::new(full).unwrap().short_name(), short, "{full}");
            }
        }

        #[test]
        fn namespace_predicates() {
            let branch = RefName::new("refs/heads/main").unwrap();
            let tag = RefName::new("refs/tags/v1").unwrap();
            let remote = RefName::new("refs/remotes/origin/main").unwrap();

            assert!(branch.is_branch_ref() && !branch.is_tag_ref());
            assert!(tag.is_tag_ref() && !tag.is_remote_ref());
            assert!(remote.is_remote_ref() && !remote.is_branch_ref());
        }

        #[test]
        fn rejects_invalid_names() {
            for bad in [
                "",
                "/refs/heads/x",
                "refs/heads/x/",
                "refs/heads/x.lock",
                "refs/heads/a..b",
                "refs/heads/a@{b",
                "refs/heads//x",
                "refs/heads/has space",
                "refs/heads/.hidden",
            ] {
                assert!(RefName::new(bad).is_err(), "{bad:?} should be rejected");
            }
        }

        #[test]
        fn strip_prefix() {
            let refname = RefName::new("refs/heads/feature/foo").unwrap();
            assert_eq!(refname.strip_prefix(HEADS_PREFIX), Some("feature/foo"));
            assert_eq!(refname.strip_prefix(TAGS_PREFIX), None);
        }
    }
}
