//! Remote commands
//!
//! A remote is another repository's `.grit` directory reachable as a
//! filesystem path. Sync is hash-based copying: an object or log file whose
//! hash already exists on the destination side is never transferred again.

pub mod add_remote;
pub mod fetch;
pub mod pull;
pub mod push;
pub mod rm_remote;

use crate::areas::history::History;
use crate::areas::object_store::ObjectStore;
use crate::artifacts::objects::object_id::ObjectId;

/// Copy one commit between repositories: its snapshot blobs, the commit
/// object itself, its per-commit log, and its message-index entry. Direction
/// agnostic; push and fetch call it with the sides swapped.
pub(crate) fn copy_commit(
    source_store: &ObjectStore,
    source_history: &History,
    dest_store: &ObjectStore,
    dest_history: &History,
    object_id: &ObjectId,
) -> anyhow::Result<()> {
    if !dest_store.contains(object_id) {
        let commit = source_store.load_commit(object_id)?;

        for blob_id in commit.snapshot().values() {
            if !dest_store.contains(blob_id) {
                dest_store.store_raw(blob_id, source_store.load_raw(blob_id)?)?;
            }
        }

        dest_store.store_raw(object_id, source_store.load_raw(object_id)?)?;
        dest_history.record_message(commit.message(), object_id)?;
    }

    if !dest_history.has_commit_log(object_id) && source_history.has_commit_log(object_id) {
        dest_history.write_commit_log(object_id, &source_history.read_commit_log(object_id)?)?;
    }

    Ok(())
}
