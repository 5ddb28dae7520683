use crate::areas::repository::Repository;
use crate::artifacts::errors::StateError;
use crate::artifacts::objects::blob::Blob;

impl Repository {
    /// Stage one file for addition. The blob is stored immediately; the
    /// staged hash is pinned to the content at staging time, not commit time.
    pub async fn add(&mut self, file_name: &str) -> anyhow::Result<()> {
        self.ensure_initialized()?;

        if !self.workspace().exists(file_name) {
            return Err(StateError::MissingWorkingFile.into());
        }

        let stage = self.stage();
        let mut stage = stage.lock().await;
        stage.rehydrate()?;

        let blob = Blob::new(self.workspace().read_file(file_name)?);
        let blob_id = self.object_store().store(&blob)?;

        let (_, head) = self.head_commit()?;
        stage.stage_addition(file_name, blob_id, head.tracks(file_name));

        stage.write_updates()?;

        Ok(())
    }
}
