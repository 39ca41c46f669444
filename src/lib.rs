//! Veneer - typed, read-only views of a Git repository
//!
//! Veneer turns raw object-store records into immutable entity values
//! (commits, tags, branches, remotes, status, commit diffs) and resolves
//! loosely typed revision inputs into those entities.
//!
//! # Architecture
//!
//! The codebase follows a strict layered architecture:
//!
//! - [`core`] - Strong types, the entity model, status relabeling, configuration
//! - [`git`] - Single interface to the object store (the only user of `git2`)
//! - [`resolve`] - Revision resolution over a closed set of input shapes
//! - [`cli`] - Command-line interface layer
//! - [`ui`] - Output formatting
//!
//! # Invariants
//!
//! 1. Entities are immutable once built and compare structurally
//! 2. Entities mirroring store records are built only by [`git`]
//! 3. Nothing writes to the repository
//! 4. Every failure is reported as a typed error; there is no silent fallback
//!
//! # Example
//!
//! ```no_run
//! use veneer::git::Git;
//! use std::path::Path;
//!
//! let git = Git::open(Path::new(".")).unwrap();
//! if let Some(head) = git.head().unwrap() {
//!     let diff = git.diff(&head).unwrap();
//!     println!("{} changed {} paths", head.abbreviated_id(), diff.all_changes().len());
//! }
//! ```

pub mod cli;
pub mod core;
pub mod git;
pub mod resolve;
pub mod ui;
