use crate::areas::repository::Repository;
use crate::artifacts::errors::StateError;

impl Repository {
    /// Unstage a pending addition, or stage a tracked file for removal and
    /// delete it from the working directory. A file that is neither staged
    /// nor tracked gives no reason to act.
    pub async fn rm(&mut self, file_name: &str) -> anyhow::Result<()> {
        self.ensure_initialized()?;

        let stage = self.stage();
        let mut stage = stage.lock().await;
        stage.rehydrate()?;

        if stage.unstage_addition(file_name) {
            return stage.write_updates();
        }

        let (_, head) = self.head_commit()?;
        if head.tracks(file_name).is_none() {
            return Err(StateError::NoReasonToRemove.into());
        }

        stage.stage_removal(file_name);
        if self.workspace().exists(file_name) {
            self.workspace().remove_file(file_name)?;
        }

        stage.write_updates()
    }
}
