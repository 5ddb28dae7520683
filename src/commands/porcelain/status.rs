use crate::areas::repository::Repository;
use crate::artifacts::objects::blob::Blob;
use crate::artifacts::objects::object::Object;
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::status::ChangeKind;
use std::collections::BTreeMap;
use std::io::Write;

impl Repository {
    /// Print the repository state in five sections: branches (current
    /// starred), staged files, removed files, unstaged modifications, and
    /// untracked files. Every section is sorted and always printed, empty or
    /// not.
    pub async fn status(&self) -> anyhow::Result<()> {
        self.ensure_initialized()?;

        let stage = self.stage();
        let mut stage = stage.lock().await;
        stage.rehydrate()?;

        let (_, head) = self.head_commit()?;
        let current_branch = self.refs().current_branch()?;
        let working_files = self.workspace().list_files()?;

        // working-file hashes, computed once; nothing is stored
        let mut working_hashes: BTreeMap<String, ObjectId> = BTreeMap::new();
        for file in &working_files {
            let blob = Blob::new(self.workspace().read_file(file)?);
            working_hashes.insert(file.clone(), blob.object_id()?);
        }

        writeln!(self.writer(), "=== Branches ===")?;
        for branch in self.refs().list_branches()? {
            if branch == current_branch {
                writeln!(self.writer(), "*{branch}")?;
            } else {
                writeln!(self.writer(), "{branch}")?;
            }
        }
        writeln!(self.writer())?;

        writeln!(self.writer(), "=== Staged Files ===")?;
        for path in stage.additions().keys() {
            writeln!(self.writer(), "{path}")?;
        }
        writeln!(self.writer())?;

        writeln!(self.writer(), "=== Removed Files ===")?;
        for path in stage.removals() {
            writeln!(self.writer(), "{path}")?;
        }
        writeln!(self.writer())?;

        // union of tracked and staged paths, checked against the working copy
        let mut unstaged: BTreeMap<String, ChangeKind> = BTreeMap::new();
        for (path, staged_oid) in stage.additions() {
            match working_hashes.get(path) {
                None => {
                    unstaged.insert(path.clone(), ChangeKind::Deleted);
                }
                Some(working_oid) if working_oid != staged_oid => {
                    unstaged.insert(path.clone(), ChangeKind::Modified);
                }
                Some(_) => {}
            }
        }
        for (path, head_oid) in head.snapshot() {
            if stage.is_staged_for_addition(path) || stage.is_staged_for_removal(path) {
                continue;
            }
            match working_hashes.get(path) {
                None => {
                    unstaged.insert(path.clone(), ChangeKind::Deleted);
                }
                Some(working_oid) if working_oid != head_oid => {
                    unstaged.insert(path.clone(), ChangeKind::Modified);
                }
                Some(_) => {}
            }
        }

        writeln!(self.writer(), "=== Modifications Not Staged For Commit ===")?;
        for (path, reason) in &unstaged {
            writeln!(self.writer(), "{path} ({reason})")?;
        }
        writeln!(self.writer())?;

        writeln!(self.writer(), "=== Untracked Files ===")?;
        for file in &working_files {
            let staged = stage.is_staged_for_addition(file);
            let tracked = head.tracks(file).is_some() && !stage.is_staged_for_removal(file);
            if !staged && !tracked {
                writeln!(self.writer(), "{file}")?;
            }
        }
        writeln!(self.writer())?;

        Ok(())
    }
}
