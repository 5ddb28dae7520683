use crate::areas::repository::Repository;
use crate::artifacts::errors::StateError;

impl Repository {
    /// Create a branch at the current head. The working directory and HEAD
    /// are left untouched.
    pub async fn branch(&mut self, name: &str) -> anyhow::Result<()> {
        self.ensure_initialized()?;

        if self.refs().branch_exists(name) {
            return Err(StateError::BranchExists.into());
        }

        let (head_oid, _) = self.head_commit()?;
        self.refs().write_branch(name, &head_oid)
    }
}
