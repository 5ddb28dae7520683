use crate::areas::repository::Repository;
use crate::areas::stage::Stage;
use crate::artifacts::errors::StateError;
use crate::artifacts::objects::commit::Commit;
use crate::artifacts::objects::object_id::ObjectId;

impl Repository {
    pub async fn commit(&mut self, message: &str) -> anyhow::Result<()> {
        self.ensure_initialized()?;

        if message.trim().is_empty() {
            return Err(StateError::EmptyCommitMessage.into());
        }

        let stage = self.stage();
        let mut stage = stage.lock().await;
        stage.rehydrate()?;

        self.write_commit(&mut stage, message, None)?;

        Ok(())
    }

    /// Advance the current branch by the staged changes. Shared by `commit`
    /// and `merge`; a merge passes the other branch's head as second parent.
    ///
    /// Persists the commit, moves the branch ref, records the log and message
    /// index entries, and clears the staging area.
    pub(crate) fn write_commit(
        &self,
        stage: &mut Stage,
        message: &str,
        second_parent: Option<ObjectId>,
    ) -> anyhow::Result<ObjectId> {
        if !stage.has_pending_changes() {
            return Err(StateError::NothingToCommit.into());
        }

        let (head_oid, head) = self.head_commit()?;
        let commit = Commit::advance(
            message.to_string(),
            chrono::Local::now().fixed_offset(),
            head_oid,
            second_parent,
            &head,
            stage.additions(),
            stage.removals(),
        );

        let commit_id = self.object_store().store(&commit)?;
        self.refs().advance_head(&commit_id)?;
        self.history().record_commit(&commit_id, &commit)?;

        stage.clear();
        stage.write_updates()?;

        Ok(commit_id)
    }
}
