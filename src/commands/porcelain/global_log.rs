use crate::areas::repository::Repository;
use std::io::Write;

impl Repository {
    /// Print every commit ever made in this repository, newest first,
    /// regardless of branch.
    pub async fn global_log(&self) -> anyhow::Result<()> {
        self.ensure_initialized()?;

        let log = self.history().read_global_log()?;
        write!(self.writer(), "{log}")?;

        Ok(())
    }
}
