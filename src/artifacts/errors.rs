//! Fixed-message command errors
//!
//! Every usage or state error terminates the current command with a fixed
//! message and exit code 0; the variants here carry those exact texts. They
//! flow through `anyhow::Result` like every other error and are printed at the
//! top level in `main`.

use crate::artifacts::objects::object_id::ObjectId;
use thiserror::Error;

/// Wrong command shape: unknown command, missing command, bad operand count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum UsageError {
    #[error("Please enter a command.")]
    MissingCommand,
    #[error("No command with that name exists.")]
    UnknownCommand,
    #[error("Incorrect operands.")]
    IncorrectOperands,
}

/// Repository-state preconditions that abort a command before (further)
/// mutation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StateError {
    #[error("A Grit version-control system already exists in the current directory.")]
    AlreadyInitialized,
    #[error("Not in an initialized Grit directory.")]
    Uninitialized,
    #[error("File does not exist.")]
    MissingWorkingFile,
    #[error("Please enter a commit message.")]
    EmptyCommitMessage,
    #[error("No changes added to the commit.")]
    NothingToCommit,
    #[error("No reason to remove the file.")]
    NoReasonToRemove,
    #[error("Found no commit with that message.")]
    MessageNotFound,
    #[error("File does not exist in that commit.")]
    FileNotInCommit,
    #[error("No commit with that id exists.")]
    MissingCommit,
    #[error("No such branch exists.")]
    MissingBranch,
    #[error("No need to checkout the current branch.")]
    CheckoutCurrentBranch,
    #[error("A branch with that name already exists.")]
    BranchExists,
    #[error("A branch with that name does not exist.")]
    NoSuchBranch,
    #[error("Cannot remove the current branch.")]
    RemoveCurrentBranch,
    #[error("You have uncommitted changes.")]
    DirtyStagingArea,
    #[error("Cannot merge a branch with itself.")]
    SelfMerge,
    #[error("Given branch is an ancestor of the current branch.")]
    AlreadyMerged,
    #[error("Current branch fast-forwarded.")]
    FastForwarded,
    #[error("There is an untracked file in the way; delete it, or add and commit it first.")]
    UntrackedFileInTheWay,
    #[error("A remote with that name already exists.")]
    RemoteExists,
    #[error("A remote with that name does not exist.")]
    NoSuchRemote,
    #[error("Remote directory not found.")]
    RemoteDirectoryMissing,
    #[error("That remote does not have that branch.")]
    NoSuchRemoteBranch,
    #[error("Please pull down remote changes before pushing.")]
    PullBeforePushing,
}

/// A hash that resolved to nothing in the object store.
///
/// Distinct from [`StateError`] so callers can tell a corrupt/incomplete
/// store apart from ordinary precondition failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Object {0} not found in the object store.")]
pub struct ObjectNotFound(pub ObjectId);
