//! Branch references and HEAD
//!
//! Branch heads live as one text file per branch under `.grit/refs/heads/`,
//! each holding a 40-character commit hash. Remote-tracking branches nest one
//! level deeper (`refs/heads/<remote>/<branch>`).
//!
//! `HEAD` is a text file holding the relative ref path of the current branch
//! (`refs/heads/<branch>`). HEAD always points at a branch, never directly at
//! a commit.

use crate::artifacts::objects::object_id::ObjectId;
use anyhow::Context;
use derive_new::new;
use std::path::Path;
use walkdir::WalkDir;

/// Regex pattern extracting the branch name from the HEAD ref path
const HEAD_REF_REGEX: &str = r"^refs/heads/(.+)$";

/// Branch every repository starts on
pub const DEFAULT_BRANCH: &str = "master";

#[derive(Debug, new)]
pub struct Refs {
    /// Path to the repository directory (typically `.grit`)
    path: Box<Path>,
}

impl Refs {
    /// Name of the branch HEAD currently points at.
    pub fn current_branch(&self) -> anyhow::Result<String> {
        let head_path = self.head_path();
        let content = std::fs::read_to_string(&head_path)
            .context(format!("Unable to read HEAD at {}", head_path.display()))?;
        let content = content.trim();

        let captures = regex::Regex::new(HEAD_REF_REGEX)?
            .captures(content)
            .with_context(|| format!("Invalid HEAD ref: {content}"))?;

        Ok(captures[1].to_string())
    }

    /// Repoint HEAD at a branch.
    pub fn set_head(&self, branch: &str) -> anyhow::Result<()> {
        self.write_ref_file(&self.head_path(), &format!("refs/heads/{branch}"))
    }

    /// Hash of the commit HEAD resolves to.
    pub fn read_head(&self) -> anyhow::Result<ObjectId> {
        let branch = self.current_branch()?;
        self.read_branch(&branch)?
            .with_context(|| format!("HEAD points at missing branch {branch}"))
    }

    /// Move the current branch to a new commit.
    pub fn advance_head(&self, oid: &ObjectId) -> anyhow::Result<()> {
        let branch = self.current_branch()?;
        self.write_branch(&branch, oid)
    }

    pub fn read_branch(&self, branch: &str) -> anyhow::Result<Option<ObjectId>> {
        let branch_path = self.heads_path().join(branch);

        if !branch_path.exists() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(&branch_path).context(format!(
            "Unable to read branch file {}",
            branch_path.display()
        ))?;

        Ok(Some(ObjectId::try_parse(content.trim().to_string())?))
    }

    pub fn branch_exists(&self, branch: &str) -> bool {
        self.heads_path().join(branch).exists()
    }

    /// Create or move a branch ref. Tracking branches contain a slash, so the
    /// parent directory is created on demand.
    pub fn write_branch(&self, branch: &str, oid: &ObjectId) -> anyhow::Result<()> {
        let branch_path = self.heads_path().join(branch);
        self.write_ref_file(&branch_path, oid.as_ref())
    }

    pub fn delete_branch(&self, branch: &str) -> anyhow::Result<()> {
        let branch_path = self.heads_path().join(branch);
        std::fs::remove_file(&branch_path).context(format!(
            "Unable to delete branch file {}",
            branch_path.display()
        ))
    }

    /// All branch names, tracking branches included, in lexicographic order.
    pub fn list_branches(&self) -> anyhow::Result<Vec<String>> {
        let heads_path = self.heads_path();

        let mut branches = WalkDir::new(&heads_path)
            .into_iter()
            .filter_map(|entry| entry.ok())
            .filter(|entry| entry.path().is_file())
            .filter_map(|entry| {
                let relative_path = entry.path().strip_prefix(&heads_path).ok()?;
                Some(relative_path.to_string_lossy().replace('\\', "/"))
            })
            .collect::<Vec<_>>();

        branches.sort();
        Ok(branches)
    }

    fn write_ref_file(&self, path: &Path, content: &str) -> anyhow::Result<()> {
        std::fs::create_dir_all(path.parent().with_context(|| {
            format!("Invalid ref file path {}", path.display())
        })?)?;

        std::fs::write(path, content)
            .context(format!("Unable to write ref file {}", path.display()))
    }

    pub fn head_path(&self) -> std::path::PathBuf {
        self.path.join("HEAD")
    }

    pub fn heads_path(&self) -> std::path::PathBuf {
        self.path.join("refs").join("heads")
    }
}
