//! Staging area
//!
//! Two sets of pending changes against the HEAD commit:
//! - addition-set: path -> blob hash staged for the next commit
//! - removal-set: paths staged for deletion from the next commit
//!
//! Externalized to `.grit/stage` as one line per entry:
//!
//! ```text
//! add <blob-sha> <path>
//! rm <path>
//! ```
//!
//! Commands rehydrate the whole file up front and rewrite it whole on the way
//! out; the in-memory sets are the only working copy in between.

use crate::artifacts::objects::object_id::ObjectId;
use anyhow::Context;
use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

#[derive(Debug)]
pub struct Stage {
    /// Path to the stage file (typically `.grit/stage`)
    path: Box<Path>,
    additions: BTreeMap<String, ObjectId>,
    removals: BTreeSet<String>,
}

impl Stage {
    pub fn new(path: Box<Path>) -> Self {
        Stage {
            path,
            additions: BTreeMap::new(),
            removals: BTreeSet::new(),
        }
    }

    /// Replace the in-memory sets with the persisted stage file's content.
    pub fn rehydrate(&mut self) -> anyhow::Result<()> {
        self.additions.clear();
        self.removals.clear();

        if !self.path.exists() {
            return Ok(());
        }

        let content = std::fs::read_to_string(&self.path)
            .context(format!("Unable to read stage file {}", self.path.display()))?;

        for line in content.lines() {
            if let Some(entry) = line.strip_prefix("add ") {
                // the path may contain spaces, so the hash comes first
                let (oid, path) = entry
                    .split_once(' ')
                    .context("Invalid stage file: invalid add line")?;
                self.additions
                    .insert(path.to_string(), ObjectId::try_parse(oid.to_string())?);
            } else if let Some(path) = line.strip_prefix("rm ") {
                self.removals.insert(path.to_string());
            } else if !line.is_empty() {
                anyhow::bail!("Invalid stage file: unrecognized line {line:?}");
            }
        }

        Ok(())
    }

    /// Rewrite the stage file from the in-memory sets.
    pub fn write_updates(&self) -> anyhow::Result<()> {
        let mut lines = Vec::with_capacity(self.additions.len() + self.removals.len());

        for (path, oid) in &self.additions {
            lines.push(format!("add {oid} {path}"));
        }
        for path in &self.removals {
            lines.push(format!("rm {path}"));
        }

        let mut content = lines.join("\n");
        if !content.is_empty() {
            content.push('\n');
        }

        std::fs::write(&self.path, content)
            .context(format!("Unable to write stage file {}", self.path.display()))
    }

    /// Stage `path` for addition with the freshly hashed blob `oid`.
    ///
    /// Staging always cancels a pending removal. When the content equals what
    /// HEAD already tracks there is nothing to commit, so any pending addition
    /// is dropped instead of recorded.
    pub fn stage_addition(&mut self, path: &str, oid: ObjectId, head_oid: Option<&ObjectId>) {
        self.removals.remove(path);

        if head_oid == Some(&oid) {
            self.additions.remove(path);
        } else {
            self.additions.insert(path.to_string(), oid);
        }
    }

    pub fn stage_removal(&mut self, path: &str) {
        self.removals.insert(path.to_string());
    }

    /// Drop a pending addition; true if one was present.
    pub fn unstage_addition(&mut self, path: &str) -> bool {
        self.additions.remove(path).is_some()
    }

    pub fn is_staged_for_addition(&self, path: &str) -> bool {
        self.additions.contains_key(path)
    }

    pub fn is_staged_for_removal(&self, path: &str) -> bool {
        self.removals.contains(path)
    }

    pub fn additions(&self) -> &BTreeMap<String, ObjectId> {
        &self.additions
    }

    pub fn removals(&self) -> &BTreeSet<String> {
        &self.removals
    }

    pub fn has_pending_changes(&self) -> bool {
        !self.additions.is_empty() || !self.removals.is_empty()
    }

    pub fn clear(&mut self) {
        self.additions.clear();
        self.removals.clear();
    }
}
