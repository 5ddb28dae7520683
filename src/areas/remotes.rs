//! Remote registry
//!
//! A "remote" is another repository reachable as a filesystem path. Each one
//! is a text file under `.grit/remotes/` named after the remote and holding
//! the path of the other repository's `.grit` directory.

use anyhow::Context;
use derive_new::new;
use std::path::{Path, PathBuf};

#[derive(Debug, new)]
pub struct Remotes {
    /// Path to the remotes directory (typically `.grit/remotes`)
    path: Box<Path>,
}

impl Remotes {
    pub fn exists(&self, name: &str) -> bool {
        self.path.join(name).exists()
    }

    pub fn add(&self, name: &str, remote_path: &str) -> anyhow::Result<()> {
        std::fs::create_dir_all(&self.path).context(format!(
            "Unable to create remotes directory {}",
            self.path.display()
        ))?;

        let remote_file = self.path.join(name);
        std::fs::write(&remote_file, remote_path).context(format!(
            "Unable to write remote file {}",
            remote_file.display()
        ))
    }

    pub fn remove(&self, name: &str) -> anyhow::Result<()> {
        let remote_file = self.path.join(name);
        std::fs::remove_file(&remote_file).context(format!(
            "Unable to delete remote file {}",
            remote_file.display()
        ))
    }

    /// Path of the remote repository's `.grit` directory.
    pub fn read(&self, name: &str) -> anyhow::Result<PathBuf> {
        let remote_file = self.path.join(name);
        let content = std::fs::read_to_string(&remote_file).context(format!(
            "Unable to read remote file {}",
            remote_file.display()
        ))?;

        Ok(PathBuf::from(content.trim()))
    }
}
