use crate::areas::repository::Repository;
use crate::artifacts::errors::StateError;

impl Repository {
    /// Delete a branch ref. The commits it pointed at stay in the object
    /// store.
    pub async fn rm_branch(&mut self, name: &str) -> anyhow::Result<()> {
        self.ensure_initialized()?;

        if !self.refs().branch_exists(name) {
            return Err(StateError::NoSuchBranch.into());
        }
        if name == self.refs().current_branch()? {
            return Err(StateError::RemoveCurrentBranch.into());
        }

        self.refs().delete_branch(name)
    }
}
