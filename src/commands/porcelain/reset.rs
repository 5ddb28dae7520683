use crate::areas::repository::Repository;

impl Repository {
    /// Check out an arbitrary commit's snapshot and move the current branch
    /// to it. HEAD keeps pointing at the same branch.
    pub async fn reset(&mut self, raw_id: &str) -> anyhow::Result<()> {
        self.ensure_initialized()?;

        let (object_id, commit) = self.resolve_commit(raw_id)?;

        let stage = self.stage();
        let mut stage = stage.lock().await;
        stage.rehydrate()?;

        self.switch_snapshot(&mut stage, &commit)?;
        self.refs().advance_head(&object_id)
    }
}
