//! User-facing command failures
//!
//! Every way a command can legally refuse to run, with the exact message the
//! user sees. Commands bail with a variant; the boundary in `main` downcasts
//! it, prints the single line to stdout, and exits with status 0 (the
//! preserved legacy behavior). Anything that is not an `Abort` is an internal
//! error and is reported on stderr instead.

/// A refused command, carrying its verbatim user-facing message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum Abort {
    #[error("Please enter a command.")]
    NoCommand,

    #[error("Incorrect operands.")]
    BadOperands,

    #[error("No command with that name exists.")]
    UnknownCommand,

    #[error("Not in an initialized Gitlet directory.")]
    NotARepository,

    #[error("A Gitlet version-control system already exists in the current directory.")]
    RepositoryExists,

    #[error("File does not exist.")]
    MissingFile,

    #[error("File does not exist in that commit.")]
    FileNotInCommit,

    #[error("No commit with that id exists.")]
    NoSuchCommit,

    #[error("No such branch exists.")]
    NoSuchBranch,

    #[error("A branch with that name does not exist.")]
    BranchMissing,

    #[error("A branch with that name already exists.")]
    BranchExists,

    #[error("Cannot remove the current branch.")]
    RemoveCurrentBranch,

    #[error("No need to checkout the current branch.")]
    CheckoutCurrentBranch,

    #[error("No changes added to the commit.")]
    NothingStaged,

    #[error("Please enter a commit message.")]
    EmptyMessage,

    #[error("No reason to remove the file.")]
    NothingToRemove,

    #[error("Found no commit with that message.")]
    MessageNotFound,

    #[error("You have uncommitted changes.")]
    UncommittedChanges,

    #[error("Cannot merge a branch with itself.")]
    SelfMerge,

    #[error("There is an untracked file in the way; delete it, or add and commit it first.")]
    UntrackedInTheWay,

    #[error("A remote with that name already exists.")]
    RemoteExists,

    #[error("A remote with that name does not exist.")]
    RemoteMissing,

    #[error("Remote directory not found.")]
    RemoteDirMissing,

    #[error("That remote does not have that branch.")]
    RemoteBranchMissing,

    #[error("Please pull down remote changes before pushing.")]
    PushRejected,
}
