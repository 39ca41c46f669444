//! core::status
//!
//! Relabels the engine's raw path classifications into [`Status`].
//!
//! The engine reports seven path sets. They map one-to-one:
//!
//! | raw          | status             |
//! |--------------|--------------------|
//! | `added`      | `staged.added`     |
//! | `changed`    | `staged.modified`  |
//! | `removed`    | `staged.removed`   |
//! | `untracked`  | `unstaged.added`   |
//! | `modified`   | `unstaged.modified`|
//! | `missing`    | `unstaged.removed` |
//! | `conflicting`| `conflicts`        |

use std::collections::BTreeSet;

use crate::core::model::{Changes, Status};

/// Path sets as classified by the engine.
///
/// `added`, `changed` and `removed` compare the index to HEAD.
/// `untracked`, `modified` and `missing` compare the working tree to the index.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawStatus {
    pub added: BTreeSet<String>,
    pub changed: BTreeSet<String>,
    pub removed: BTreeSet<String>,
    pub untracked: BTreeSet<String>,
    pub modified: BTreeSet<String>,
    pub missing: BTreeSet<String>,
    pub conflicting: BTreeSet<String>,
}

impl From<RawStatus> for Status {
    fn from(raw: RawStatus) -> Self {
        let staged = Changes::new(raw.added, raw.changed, raw.removed);
        let unstaged = Changes::new(raw.untracked, raw.modified, raw.missing);
        Status::new(staged, unstaged, raw.conflicting)
    }
}
