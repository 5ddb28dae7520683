use crate::areas::repository::Repository;

impl Repository {
    /// Fetch a remote branch, then merge its tracking branch into the
    /// current one. Every merge outcome applies, fast-forward and conflicts
    /// included.
    pub async fn pull(&mut self, remote: &str, branch: &str) -> anyhow::Result<()> {
        self.fetch(remote, branch).await?;
        self.merge(&format!("{remote}/{branch}")).await
    }
}
