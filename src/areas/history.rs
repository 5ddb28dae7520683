//! Persisted history: log files and the message index
//!
//! Two derived structures are maintained alongside the object store so `log`,
//! `global-log` and `find` never have to walk the commit graph:
//!
//! - `logs/commits/<hash>`: the full first-parent log of that commit, newest
//!   entry first. Built incrementally: a new commit's log is its own entry
//!   prepended to its first parent's log.
//! - `logs/global`: every commit ever made in this repository, newest first.
//! - `messages`: message text -> commit hashes, in length-prefixed records so
//!   multi-line messages survive:
//!
//! ```text
//! entry <message-byte-len> <hash-count>
//! <message><hash>
//! <hash>
//! ...
//! ```

use crate::artifacts::log::format_log_entry;
use crate::artifacts::objects::OBJECT_ID_LENGTH;
use crate::artifacts::objects::commit::Commit;
use crate::artifacts::objects::object_id::ObjectId;
use anyhow::Context;
use std::path::{Path, PathBuf};

#[derive(Debug)]
pub struct History {
    logs_path: PathBuf,
    messages_path: PathBuf,
}

impl History {
    pub fn new(grit_path: &Path) -> Self {
        History {
            logs_path: grit_path.join("logs"),
            messages_path: grit_path.join("messages"),
        }
    }

    /// Record a freshly created commit: per-commit log, global log, message
    /// index.
    pub fn record_commit(&self, object_id: &ObjectId, commit: &Commit) -> anyhow::Result<()> {
        let entry = format_log_entry(object_id, commit);

        let parent_log = match commit.first_parent() {
            Some(parent) => self.read_commit_log(parent).unwrap_or_default(),
            None => String::new(),
        };
        self.write_commit_log(object_id, &format!("{entry}{parent_log}"))?;

        let global = std::fs::read_to_string(self.global_log_path()).unwrap_or_default();
        std::fs::write(self.global_log_path(), format!("{entry}{global}"))
            .context("Unable to write global log")?;

        self.record_message(commit.message(), object_id)
    }

    pub fn read_commit_log(&self, object_id: &ObjectId) -> anyhow::Result<String> {
        let log_path = self.commit_log_path(object_id);

        std::fs::read_to_string(&log_path)
            .context(format!("Unable to read log file {}", log_path.display()))
    }

    /// Write a per-commit log verbatim. Used both locally and when copying
    /// logs between repositories.
    pub fn write_commit_log(&self, object_id: &ObjectId, content: &str) -> anyhow::Result<()> {
        let commits_path = self.logs_path.join("commits");
        std::fs::create_dir_all(&commits_path).context(format!(
            "Unable to create logs directory {}",
            commits_path.display()
        ))?;

        let log_path = self.commit_log_path(object_id);
        std::fs::write(&log_path, content)
            .context(format!("Unable to write log file {}", log_path.display()))
    }

    pub fn has_commit_log(&self, object_id: &ObjectId) -> bool {
        self.commit_log_path(object_id).exists()
    }

    pub fn read_global_log(&self) -> anyhow::Result<String> {
        Ok(std::fs::read_to_string(self.global_log_path()).unwrap_or_default())
    }

    /// Index `object_id` under `message`; a hash already listed there is not
    /// duplicated.
    pub fn record_message(&self, message: &str, object_id: &ObjectId) -> anyhow::Result<()> {
        let content = std::fs::read_to_string(&self.messages_path).unwrap_or_default();
        let mut records = Self::parse_message_index(&content)?;

        match records.iter_mut().find(|(text, _)| text == message) {
            Some((_, hashes)) => {
                if !hashes.contains(object_id) {
                    hashes.push(object_id.clone());
                }
            }
            None => records.push((message.to_string(), vec![object_id.clone()])),
        }

        std::fs::write(&self.messages_path, Self::serialize_message_index(&records))
            .context("Unable to write message index")
    }

    /// Hashes of every commit carrying exactly `message`.
    pub fn find_by_message(&self, message: &str) -> anyhow::Result<Vec<ObjectId>> {
        let content = std::fs::read_to_string(&self.messages_path).unwrap_or_default();
        let records = Self::parse_message_index(&content)?;

        Ok(records
            .into_iter()
            .find(|(text, _)| text == message)
            .map(|(_, hashes)| hashes)
            .unwrap_or_default())
    }

    fn parse_message_index(content: &str) -> anyhow::Result<Vec<(String, Vec<ObjectId>)>> {
        let mut records = Vec::new();
        let mut rest = content;

        while !rest.is_empty() {
            let header_end = rest
                .find('\n')
                .context("Invalid message index: missing record header")?;
            let header = rest[..header_end]
                .strip_prefix("entry ")
                .context("Invalid message index: invalid record header")?;
            rest = &rest[header_end + 1..];

            let (message_len, hash_count) = header
                .split_once(' ')
                .context("Invalid message index: invalid record header")?;
            let message_len: usize = message_len.parse()?;
            let hash_count: usize = hash_count.parse()?;

            let message = rest
                .get(..message_len)
                .context("Invalid message index: truncated message")?
                .to_string();
            rest = &rest[message_len..];

            let mut hashes = Vec::with_capacity(hash_count);
            for _ in 0..hash_count {
                let hash = rest
                    .get(..OBJECT_ID_LENGTH)
                    .context("Invalid message index: truncated hash")?;
                hashes.push(ObjectId::try_parse(hash.to_string())?);
                rest = rest[OBJECT_ID_LENGTH..]
                    .strip_prefix('\n')
                    .context("Invalid message index: missing hash terminator")?;
            }

            records.push((message, hashes));
        }

        Ok(records)
    }

    fn serialize_message_index(records: &[(String, Vec<ObjectId>)]) -> String {
        let mut content = String::new();

        for (message, hashes) in records {
            content.push_str(&format!("entry {} {}\n", message.len(), hashes.len()));
            content.push_str(message);
            for hash in hashes {
                content.push_str(hash.as_ref());
                content.push('\n');
            }
        }

        content
    }

    fn commit_log_path(&self, object_id: &ObjectId) -> PathBuf {
        self.logs_path.join("commits").join(object_id.as_ref())
    }

    fn global_log_path(&self) -> PathBuf {
        self.logs_path.join("global")
    }
}
