//! git
//!
//! Single interface to the object store.
//!
//! # Architecture
//!
//! This module is the **ONLY doorway** to Git. All repository reads flow
//! through the [`Git`] handle. No other module imports `git2`, and nothing
//! shells out to the git CLI.
//!
//! # Responsibilities
//!
//! - Repository discovery and opening
//! - Revision and ref resolution
//! - Conversion of commits, tags, branches and remotes into entities
//! - First-parent commit diffs with rename and copy detection
//! - Commit logs and `describe`
//! - Raw working tree and index status
//! - Ancestry and ahead/behind queries
//!
//! # Invariants
//!
//! - Nothing here writes to the repository
//! - All operations return strong types (Oid, RefName, entities)
//!
//! # Example
//!
//! ```no_run
//! use veneer::git::{BranchListMode, Git};
//! use std::path::Path;
//!
//! let git = Git::open(Path::new(".")).unwrap();
//! let head = git.head().unwrap();
//! for branch in git.list_branches(BranchListMode::Local).unwrap() {
//!     println!("{}", branch.name());
//! }
//! # let _ = head;
//! ```

mod convert;
mod diff;
mod history;
mod interface;
mod status;

pub use convert::BranchListMode;
pub use history::{DescribeOptions, LogOptions};
pub use interface::{Git, GitError, Unresolvable};
