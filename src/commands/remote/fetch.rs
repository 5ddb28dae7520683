use crate::areas::history::History;
use crate::areas::object_store::ObjectStore;
use crate::areas::refs::Refs;
use crate::areas::repository::Repository;
use crate::artifacts::errors::StateError;
use crate::commands::remote::copy_commit;

impl Repository {
    /// Copy a remote branch's history into the local store and point the
    /// tracking branch `<remote>/<branch>` at its head. The working directory
    /// and current branch are untouched.
    pub async fn fetch(&mut self, remote: &str, branch: &str) -> anyhow::Result<()> {
        self.ensure_initialized()?;

        if !self.remotes().exists(remote) {
            return Err(StateError::NoSuchRemote.into());
        }

        let remote_grit = self.remotes().read(remote)?;
        if !remote_grit.is_dir() {
            return Err(StateError::RemoteDirectoryMissing.into());
        }

        let remote_store = ObjectStore::new(remote_grit.join("objects").into_boxed_path());
        let remote_refs = Refs::new(remote_grit.clone().into_boxed_path());
        let remote_history = History::new(&remote_grit);

        let remote_head = remote_refs
            .read_branch(branch)?
            .ok_or(StateError::NoSuchRemoteBranch)?;
        let remote_commit = remote_store.load_commit(&remote_head)?;

        for object_id in remote_commit
            .ancestors()
            .iter()
            .chain(std::iter::once(&remote_head))
        {
            copy_commit(
                &remote_store,
                &remote_history,
                self.object_store(),
                self.history(),
                object_id,
            )?;
        }

        self.refs()
            .write_branch(&format!("{remote}/{branch}"), &remote_head)
    }
}
