use crate::areas::repository::Repository;
use crate::artifacts::errors::StateError;

impl Repository {
    pub async fn rm_remote(&mut self, name: &str) -> anyhow::Result<()> {
        self.ensure_initialized()?;

        if !self.remotes().exists(name) {
            return Err(StateError::NoSuchRemote.into());
        }

        self.remotes().remove(name)
    }
}
