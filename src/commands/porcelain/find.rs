use crate::areas::repository::Repository;
use crate::artifacts::errors::StateError;
use std::io::Write;

impl Repository {
    /// Print the hash of every commit whose message matches exactly, one per
    /// line.
    pub async fn find(&self, message: &str) -> anyhow::Result<()> {
        self.ensure_initialized()?;

        let hashes = self.history().find_by_message(message)?;
        if hashes.is_empty() {
            return Err(StateError::MessageNotFound.into());
        }

        for hash in hashes {
            writeln!(self.writer(), "{hash}")?;
        }

        Ok(())
    }
}
