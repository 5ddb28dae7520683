use crate::areas::repository::Repository;
use crate::artifacts::errors::StateError;
use crate::artifacts::merge::classifier::{MergeOutcome, classify_base_path, classify_other_path};
use crate::artifacts::merge::conflict::render_conflict;
use crate::artifacts::merge::split_point::{FirstParentScan, SplitPointFinder};
use crate::artifacts::objects::blob::Blob;
use crate::artifacts::objects::object_id::ObjectId;
use anyhow::Context;
use std::collections::HashSet;
use std::io::Write;

impl Repository {
    /// Three-way merge of another branch into the current one.
    ///
    /// After the preconditions and the two degenerate fast paths, every path
    /// is classified against the split point and the resulting working-file
    /// and staging mutations are applied, ending in a two-parent commit.
    /// Conflicts are recorded with markers and reported, not failed.
    pub async fn merge(&mut self, branch: &str) -> anyhow::Result<()> {
        self.ensure_initialized()?;

        let stage = self.stage();
        let mut stage = stage.lock().await;
        stage.rehydrate()?;

        if stage.has_pending_changes() {
            return Err(StateError::DirtyStagingArea.into());
        }

        let theirs_oid = self
            .refs()
            .read_branch(branch)?
            .ok_or(StateError::NoSuchBranch)?;

        let current_branch = self.refs().current_branch()?;
        if branch == current_branch {
            return Err(StateError::SelfMerge.into());
        }

        let (ours_oid, ours) = self.head_commit()?;
        let theirs = self.object_store().load_commit(&theirs_oid)?;

        if theirs_oid == ours_oid || ours.ancestors().contains(&theirs_oid) {
            return Err(StateError::AlreadyMerged.into());
        }
        if theirs.ancestors().contains(&ours_oid) {
            // the current branch has no commits of its own; adopt theirs
            self.switch_snapshot(&mut stage, &theirs)?;
            self.refs().advance_head(&theirs_oid)?;
            return Err(StateError::FastForwarded.into());
        }

        let split_oid = FirstParentScan
            .split_point(&ours, &theirs)
            .context("No common ancestor between the branch heads")?;
        let split = self.object_store().load_commit(&split_oid)?;

        let mut decisions: Vec<(String, MergeOutcome)> = Vec::new();
        for (path, base_oid) in split.snapshot() {
            let outcome = classify_base_path(base_oid, ours.tracks(path), theirs.tracks(path));
            decisions.push((path.clone(), outcome));
        }
        for (path, their_oid) in theirs.snapshot() {
            if split.tracks(path).is_none() {
                decisions.push((path.clone(), classify_other_path(ours.tracks(path), their_oid)));
            }
        }

        // untracked working files must not be touched; abort before any mutation
        let untracked: HashSet<String> = self
            .workspace()
            .list_files()?
            .into_iter()
            .filter(|file| ours.tracks(file).is_none())
            .collect();
        for (path, outcome) in &decisions {
            if *outcome != MergeOutcome::Unchanged && untracked.contains(path) {
                return Err(StateError::UntrackedFileInTheWay.into());
            }
        }

        let mut conflicted = false;
        for (path, outcome) in decisions {
            match outcome {
                MergeOutcome::Unchanged => {}
                MergeOutcome::TakeOther => {
                    let blob_id = theirs
                        .tracks(&path)
                        .cloned()
                        .with_context(|| format!("Missing blob for merged path {path}"))?;
                    let blob = self.object_store().load_blob(&blob_id)?;
                    self.workspace().write_file(&path, blob.content())?;
                    stage.stage_addition(&path, blob_id, ours.tracks(&path));
                }
                MergeOutcome::StageRemoval => {
                    if self.workspace().exists(&path) {
                        self.workspace().remove_file(&path)?;
                    }
                    stage.stage_removal(&path);
                }
                MergeOutcome::Conflict => {
                    conflicted = true;
                    let ours_content = self.load_content(ours.tracks(&path))?;
                    let theirs_content = self.load_content(theirs.tracks(&path))?;
                    let merged = render_conflict(ours_content.as_deref(), theirs_content.as_deref());

                    let blob = Blob::new(merged.clone());
                    let blob_id = self.object_store().store(&blob)?;
                    self.workspace().write_file(&path, &merged)?;
                    stage.stage_addition(&path, blob_id, ours.tracks(&path));
                }
            }
        }

        let message = format!("Merged {branch} into {current_branch}.");
        self.write_commit(&mut stage, &message, Some(theirs_oid))?;

        if conflicted {
            writeln!(self.writer(), "Encountered a merge conflict.")?;
        }

        Ok(())
    }

    fn load_content(&self, blob_id: Option<&ObjectId>) -> anyhow::Result<Option<String>> {
        match blob_id {
            Some(blob_id) => {
                let blob = self.object_store().load_blob(blob_id)?;
                Ok(Some(blob.content().to_string()))
            }
            None => Ok(None),
        }
    }
}
