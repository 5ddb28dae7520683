use crate::areas::history::History;
use crate::areas::object_store::ObjectStore;
use crate::areas::refs::Refs;
use crate::areas::repository::Repository;
use crate::artifacts::errors::StateError;
use crate::commands::remote::copy_commit;

impl Repository {
    /// Append the local head's history to a remote branch.
    ///
    /// Only fast-forwards are allowed: when the remote branch exists, its
    /// head must appear in the local head's ancestor list. A branch the
    /// remote does not have yet is simply created.
    pub async fn push(&mut self, remote: &str, branch: &str) -> anyhow::Result<()> {
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

        let (head_oid, head) = self.head_commit()?;

        if let Some(remote_head) = remote_refs.read_branch(branch)?
            && remote_head != head_oid
            && !head.ancestors().contains(&remote_head)
        {
            return Err(StateError::PullBeforePushing.into());
        }

        for object_id in head.ancestors().iter().chain(std::iter::once(&head_oid)) {
            copy_commit(
                self.object_store(),
                self.history(),
                &remote_store,
                &remote_history,
                object_id,
            )?;
        }

        remote_refs.write_branch(branch, &head_oid)
    }
}
