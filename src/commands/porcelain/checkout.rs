use crate::areas::repository::Repository;
use crate::areas::stage::Stage;
use crate::artifacts::errors::{StateError, UsageError};
use crate::artifacts::objects::commit::Commit;

impl Repository {
    /// Three forms, distinguished by the operands:
    /// - `checkout <branch>`: switch the working directory to a branch
    /// - `checkout -- <file>`: restore one file from the current head
    /// - `checkout <commit-id> -- <file>`: restore one file from a commit;
    ///   abbreviated ids are accepted
    pub async fn checkout(&mut self, target: Option<&str>, files: &[String]) -> anyhow::Result<()> {
        self.ensure_initialized()?;

        match (target, files) {
            (Some(branch), []) => self.checkout_branch(branch).await,
            (None, [file]) => {
                let (_, head) = self.head_commit()?;
                self.restore_file(&head, file)
            }
            (Some(raw_id), [file]) => {
                let (_, commit) = self.resolve_commit(raw_id)?;
                self.restore_file(&commit, file)
            }
            _ => Err(UsageError::IncorrectOperands.into()),
        }
    }

    fn restore_file(&self, commit: &Commit, file_name: &str) -> anyhow::Result<()> {
        let blob_id = commit
            .tracks(file_name)
            .ok_or(StateError::FileNotInCommit)?;

        let blob = self.object_store().load_blob(blob_id)?;
        self.workspace().write_file(file_name, blob.content())
    }

    async fn checkout_branch(&self, branch: &str) -> anyhow::Result<()> {
        let target_oid = self
            .refs()
            .read_branch(branch)?
            .ok_or(StateError::MissingBranch)?;

        if branch == self.refs().current_branch()? {
            return Err(StateError::CheckoutCurrentBranch.into());
        }

        let target = self.object_store().load_commit(&target_oid)?;

        let stage = self.stage();
        let mut stage = stage.lock().await;
        stage.rehydrate()?;

        self.switch_snapshot(&mut stage, &target)?;
        self.refs().set_head(branch)?;

        Ok(())
    }

    /// Replace the working directory with a commit's snapshot: write every
    /// tracked file, delete files the current head tracks but the target does
    /// not, and clear the staging area. Shared by branch checkout, `reset`
    /// and the merge fast-forward path.
    ///
    /// Aborts before touching anything if an untracked working file would be
    /// overwritten.
    pub(crate) fn switch_snapshot(&self, stage: &mut Stage, target: &Commit) -> anyhow::Result<()> {
        let (_, head) = self.head_commit()?;

        for file in self.workspace().list_files()? {
            if head.tracks(&file).is_none() && target.tracks(&file).is_some() {
                return Err(StateError::UntrackedFileInTheWay.into());
            }
        }

        for (path, blob_id) in target.snapshot() {
            let blob = self.object_store().load_blob(blob_id)?;
            self.workspace().write_file(path, blob.content())?;
        }

        for path in head.snapshot().keys() {
            if target.tracks(path).is_none() && self.workspace().exists(path) {
                self.workspace().remove_file(path)?;
            }
        }

        stage.clear();
        stage.write_updates()
    }
}
