//! Working directory access
//!
//! Tracked files live flat in the repository root; only top-level visible
//! files participate. The repository directory and anything else starting
//! with a dot is never listed, read or touched.

use anyhow::Context;
use derive_new::new;
use std::path::Path;

#[derive(Debug, new)]
pub struct Workspace {
    /// Path to the working directory (the repository root)
    path: Box<Path>,
}

impl Workspace {
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Names of the top-level visible files, sorted.
    pub fn list_files(&self) -> anyhow::Result<Vec<String>> {
        let mut files = std::fs::read_dir(&self.path)?
            .filter_map(|entry| entry.ok())
            .filter(|entry| entry.path().is_file())
            .filter_map(|entry| {
                let name = entry.file_name().to_string_lossy().to_string();
                if name.starts_with('.') { None } else { Some(name) }
            })
            .collect::<Vec<_>>();

        files.sort();
        Ok(files)
    }

    pub fn exists(&self, file_name: &str) -> bool {
        self.path.join(file_name).is_file()
    }

    pub fn read_file(&self, file_name: &str) -> anyhow::Result<String> {
        let file_path = self.path.join(file_name);

        std::fs::read_to_string(&file_path)
            .context(format!("Unable to read file {}", file_path.display()))
    }

    pub fn write_file(&self, file_name: &str, content: &str) -> anyhow::Result<()> {
        let file_path = self.path.join(file_name);

        std::fs::write(&file_path, content)
            .context(format!("Unable to write file {}", file_path.display()))
    }

    pub fn remove_file(&self, file_name: &str) -> anyhow::Result<()> {
        let file_path = self.path.join(file_name);

        std::fs::remove_file(&file_path)
            .context(format!("Unable to remove file {}", file_path.display()))
    }
}
