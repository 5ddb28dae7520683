use crate::areas::refs::DEFAULT_BRANCH;
use crate::areas::repository::Repository;
use crate::artifacts::errors::StateError;
use crate::artifacts::objects::commit::Commit;
use anyhow::Context;
use std::fs;

impl Repository {
    /// Create the `.grit` layout, the deterministic root commit, and the
    /// default branch pointing at it. Succeeds silently.
    pub async fn init(&mut self) -> anyhow::Result<()> {
        if self.is_initialized() {
            return Err(StateError::AlreadyInitialized.into());
        }

        fs::create_dir_all(self.object_store().objects_path())
            .context("Failed to create .grit/objects directory")?;
        fs::create_dir_all(self.refs().heads_path())
            .context("Failed to create .grit/refs/heads directory")?;

        // every repository starts from the same root commit, so any two
        // repositories always share history
        let root = Commit::root();
        let root_oid = self.object_store().store(&root)?;

        self.refs().write_branch(DEFAULT_BRANCH, &root_oid)?;
        self.refs().set_head(DEFAULT_BRANCH)?;
        self.history().record_commit(&root_oid, &root)?;

        let stage = self.stage();
        let stage = stage.lock().await;
        stage.write_updates()?;

        Ok(())
    }
}
