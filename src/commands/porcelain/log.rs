use crate::areas::repository::Repository;
use std::io::Write;

impl Repository {
    /// Print the history of the current head: the first-parent chain, newest
    /// entry first. Merge commits show only their first parent's history.
    pub async fn log(&self) -> anyhow::Result<()> {
        self.ensure_initialized()?;

        let (head_oid, _) = self.head_commit()?;
        let log = self.history().read_commit_log(&head_oid)?;

        write!(self.writer(), "{log}")?;

        Ok(())
    }
}
