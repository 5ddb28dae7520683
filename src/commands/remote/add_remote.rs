use crate::areas::repository::Repository;
use crate::artifacts::errors::StateError;

impl Repository {
    /// Register a remote under a name. The path is stored as given and only
    /// checked when push or fetch actually use it.
    pub async fn add_remote(&mut self, name: &str, path: &str) -> anyhow::Result<()> {
        self.ensure_initialized()?;

        if self.remotes().exists(name) {
            return Err(StateError::RemoteExists.into());
        }

        self.remotes().add(name, path)
    }
}
