//! Per-file three-way classification
//!
//! A merge looks at every file name in the union of the split point, the
//! current head, and the incoming branch, and decides what to do with it
//! from the three blob ids alone. The classification is the whole merge
//! policy; applying it (working tree writes, staging, the merge commit) is
//! the command's job.

use crate::artifacts::objects::object_id::ObjectId;

/// What the merge does with one path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileAction {
    /// Check out the incoming branch's version and stage it.
    TakeOther,
    /// Delete the working file and stage the removal.
    Remove,
    /// Replace the working file with conflict markers and stage the result.
    Conflict,
    /// Leave the working tree alone.
    Keep,
}

/// Classify one path from its blob ids at the split point, in the current
/// head, and in the incoming branch.
pub fn classify(
    split: Option<&ObjectId>,
    head: Option<&ObjectId>,
    other: Option<&ObjectId>,
) -> FileAction {
    match (split, head, other) {
        (Some(split), Some(head), Some(other)) => {
            if head == other {
                // same content on both sides, nothing to do
                FileAction::Keep
            } else if split == head {
                FileAction::TakeOther
            } else if split == other {
                // only the head side changed it
                FileAction::Keep
            } else {
                FileAction::Conflict
            }
        }
        (Some(split), Some(head), None) => {
            if split == head {
                FileAction::Remove
            } else {
                // modified here, deleted there
                FileAction::Conflict
            }
        }
        (Some(split), None, Some(other)) => {
            if split == other {
                // already removed on the head side, stays removed
                FileAction::Keep
            } else {
                FileAction::Conflict
            }
        }
        (Some(_), None, None) => FileAction::Keep,
        (None, Some(head), Some(other)) => {
            if head == other {
                FileAction::Keep
            } else {
                // created independently with different content
                FileAction::Conflict
            }
        }
        (None, Some(_), None) => FileAction::Keep,
        (None, None, Some(_)) => FileAction::TakeOther,
        (None, None, None) => FileAction::Keep,
    }
}

/// Build the conflict replacement text. A missing side contributes the
/// empty string; contents are spliced in verbatim, so a side without a
/// trailing newline runs into the next marker.
pub fn conflict_content(head: Option<&str>, other: Option<&str>) -> String {
    format!(
        "<<<<<<< HEAD\n{}=======\n{}>>>>>>>\n",
        head.unwrap_or(""),
        other.unwrap_or("")
    )
}
