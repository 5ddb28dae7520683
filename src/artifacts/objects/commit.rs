//! Commit object
//!
//! Commits are immutable full-snapshot records. Each one holds:
//! - The commit message and timestamp
//! - 0, 1 or 2 parent commit IDs (root, regular, merge)
//! - A complete path -> blob-hash snapshot (not a diff)
//! - The derived first-parent ancestor list used for merge-base search
//!
//! ## Format
//!
//! On disk:
//! ```text
//! commit <size>\0
//! parent <parent-sha>
//! ancestor <ancestor-sha>
//! entry <blob-sha> <path>
//! date <unix-seconds> <utc-offset>
//!
//! <commit message>
//! ```
//!
//! The snapshot is kept in a `BTreeMap` so serialization (and therefore the
//! content hash) is canonical regardless of insertion order.

use crate::artifacts::objects::object::Unpackable;
use crate::artifacts::objects::object::{Object, ObjectKind, Packable};
use crate::artifacts::objects::object_id::ObjectId;
use anyhow::Context;
use bytes::Bytes;
use std::collections::{BTreeMap, BTreeSet};
use std::io::{BufRead, Read, Write};

/// Message of the commit every repository starts from.
pub const ROOT_COMMIT_MESSAGE: &str = "initial commit";

/// Timestamp rendering used in log output ("Thu Jan 1 00:00:00 1970 +0000").
pub const DATE_DISPLAY_FORMAT: &str = "%a %b %-d %H:%M:%S %Y %z";

#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Commit {
    /// Parent commit IDs: empty for the root commit, two for merge commits
    parents: Vec<ObjectId>,
    /// Complete path -> blob-hash snapshot
    snapshot: BTreeMap<String, ObjectId>,
    /// First-parent ancestor list, oldest first; merge commits also record
    /// their second parent here so the split-point scan can see it
    ancestors: Vec<ObjectId>,
    /// Commit timestamp (epoch for the root commit)
    timestamp: chrono::DateTime<chrono::FixedOffset>,
    /// Commit message
    message: String,
}

impl Commit {
    /// The deterministic root commit: empty snapshot, no parents, epoch
    /// timestamp. Every repository starts from the same root, so any two
    /// repositories always share at least one commit.
    pub fn root() -> Self {
        Commit {
            parents: Vec::new(),
            snapshot: BTreeMap::new(),
            ancestors: Vec::new(),
            timestamp: chrono::DateTime::<chrono::Utc>::UNIX_EPOCH.fixed_offset(),
            message: ROOT_COMMIT_MESSAGE.to_string(),
        }
    }

    /// Build the commit that advances `parent` by the staged changes.
    ///
    /// The snapshot is the parent's snapshot with every addition applied and
    /// THEN every removal deleted; the order matters, a path staged for
    /// removal after being staged for addition ends up removed.
    ///
    /// The ancestor list extends the parent's; a merge commit records its
    /// second parent immediately before the first so history display can keep
    /// following the first-parent chain.
    pub fn advance(
        message: String,
        timestamp: chrono::DateTime<chrono::FixedOffset>,
        parent_id: ObjectId,
        second_parent_id: Option<ObjectId>,
        parent: &Commit,
        additions: &BTreeMap<String, ObjectId>,
        removals: &BTreeSet<String>,
    ) -> Self {
        let mut snapshot = parent.snapshot.clone();
        for (path, oid) in additions {
            snapshot.insert(path.clone(), oid.clone());
        }
        for path in removals {
            snapshot.remove(path);
        }

        let mut ancestors = parent.ancestors.clone();
        let mut parents = Vec::with_capacity(2);
        if let Some(second) = second_parent_id {
            ancestors.push(second.clone());
            parents.push(parent_id.clone());
            parents.push(second);
        } else {
            parents.push(parent_id.clone());
        }
        ancestors.push(parent_id);

        Commit {
            parents,
            snapshot,
            ancestors,
            timestamp,
            message,
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn timestamp(&self) -> chrono::DateTime<chrono::FixedOffset> {
        self.timestamp
    }

    pub fn parents(&self) -> &[ObjectId] {
        &self.parents
    }

    pub fn first_parent(&self) -> Option<&ObjectId> {
        self.parents.first()
    }

    pub fn is_merge(&self) -> bool {
        self.parents.len() == 2
    }

    pub fn snapshot(&self) -> &BTreeMap<String, ObjectId> {
        &self.snapshot
    }

    /// Blob hash recorded for `path`, if the commit tracks it
    pub fn tracks(&self, path: &str) -> Option<&ObjectId> {
        self.snapshot.get(path)
    }

    /// First-parent ancestor list, oldest first
    pub fn ancestors(&self) -> &[ObjectId] {
        &self.ancestors
    }

    pub fn readable_timestamp(&self) -> String {
        self.timestamp.format(DATE_DISPLAY_FORMAT).to_string()
    }
}

fn parse_offset(raw: &str) -> anyhow::Result<chrono::FixedOffset> {
    anyhow::ensure!(raw.len() == 5, "Invalid timezone offset: {raw}");

    let sign = match &raw[..1] {
        "+" => 1,
        "-" => -1,
        _ => anyhow::bail!("Invalid timezone offset: {raw}"),
    };
    let hours: i32 = raw[1..3].parse()?;
    let minutes: i32 = raw[3..5].parse()?;

    chrono::FixedOffset::east_opt(sign * (hours * 3600 + minutes * 60))
        .with_context(|| format!("Invalid timezone offset: {raw}"))
}

impl Packable for Commit {
    fn serialize(&self) -> anyhow::Result<Bytes> {
        let mut object_content = vec![];

        for parent in &self.parents {
            object_content.push(format!("parent {}", parent.as_ref()));
        }
        for ancestor in &self.ancestors {
            object_content.push(format!("ancestor {}", ancestor.as_ref()));
        }
        for (path, oid) in &self.snapshot {
            object_content.push(format!("entry {} {}", oid.as_ref(), path));
        }
        object_content.push(format!(
            "date {} {}",
            self.timestamp.timestamp(),
            self.timestamp.format("%z")
        ));
        object_content.push(String::new());
        object_content.push(self.message.to_string());

        let object_content = object_content.join("\n");

        let content_bytes = object_content.as_bytes();
        let mut commit_bytes = Vec::new();
        let header = format!("{} {}\0", self.object_kind().as_str(), content_bytes.len());
        commit_bytes.write_all(header.as_bytes())?;
        commit_bytes.write_all(content_bytes)?;

        Ok(Bytes::from(commit_bytes))
    }
}

impl Unpackable for Commit {
    fn deserialize(mut reader: impl BufRead) -> anyhow::Result<Self> {
        let mut content = Vec::new();
        reader.read_to_end(&mut content)?;

        let content = String::from_utf8(content)?;
        let mut lines = content.lines();

        let mut parents = Vec::new();
        let mut ancestors = Vec::new();
        let mut snapshot = BTreeMap::new();

        let mut next_line = lines
            .next()
            .context("Invalid commit object: missing date line")?;

        while let Some(parent_oid) = next_line.strip_prefix("parent ") {
            parents.push(ObjectId::try_parse(parent_oid.to_string())?);
            next_line = lines
                .next()
                .context("Invalid commit object: missing date line")?;
        }

        while let Some(ancestor_oid) = next_line.strip_prefix("ancestor ") {
            ancestors.push(ObjectId::try_parse(ancestor_oid.to_string())?);
            next_line = lines
                .next()
                .context("Invalid commit object: missing date line")?;
        }

        while let Some(entry) = next_line.strip_prefix("entry ") {
            // the path may contain spaces, so the hash comes first
            let (oid, path) = entry
                .split_once(' ')
                .context("Invalid commit object: invalid entry line")?;
            snapshot.insert(path.to_string(), ObjectId::try_parse(oid.to_string())?);
            next_line = lines
                .next()
                .context("Invalid commit object: missing date line")?;
        }

        let date = next_line
            .strip_prefix("date ")
            .context("Invalid commit object: invalid date line")?;
        let (seconds, offset) = date
            .split_once(' ')
            .context("Invalid commit object: invalid date line")?;
        let seconds: i64 = seconds
            .parse()
            .context("Invalid commit object: invalid timestamp")?;
        let offset = parse_offset(offset)?;
        let timestamp = chrono::DateTime::from_timestamp(seconds, 0)
            .context("Invalid commit object: invalid timestamp")?
            .with_timezone(&offset);

        // skip the empty line
        lines.next();

        let message = lines.collect::<Vec<&str>>().join("\n");

        Ok(Commit {
            parents,
            snapshot,
            ancestors,
            timestamp,
            message,
        })
    }
}

impl Object for Commit {
    fn object_kind(&self) -> ObjectKind {
        ObjectKind::Commit
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn oid(fill: char) -> ObjectId {
        ObjectId::try_parse(fill.to_string().repeat(40)).unwrap()
    }

    // second precision, matching what serialization keeps
    fn now() -> chrono::DateTime<chrono::FixedOffset> {
        let now = chrono::Local::now().fixed_offset();
        chrono::DateTime::from_timestamp(now.timestamp(), 0)
            .unwrap()
            .with_timezone(now.offset())
    }

    #[test]
    fn root_commit_is_deterministic() {
        let first = Commit::root().object_id().unwrap();
        let second = Commit::root().object_id().unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn snapshot_applies_additions_then_removals() {
        let mut parent_additions = BTreeMap::new();
        parent_additions.insert("kept.txt".to_string(), oid('1'));
        parent_additions.insert("dropped.txt".to_string(), oid('2'));
        let parent = Commit::advance(
            "base".to_string(),
            now(),
            oid('a'),
            None,
            &Commit::root(),
            &parent_additions,
            &BTreeSet::new(),
        );

        // the same path staged for addition and removal ends up removed
        let mut additions = BTreeMap::new();
        additions.insert("dropped.txt".to_string(), oid('3'));
        additions.insert("added.txt".to_string(), oid('4'));
        let mut removals = BTreeSet::new();
        removals.insert("dropped.txt".to_string());

        let commit = Commit::advance(
            "tip".to_string(),
            now(),
            oid('b'),
            None,
            &parent,
            &additions,
            &removals,
        );

        assert_eq!(commit.tracks("kept.txt"), Some(&oid('1')));
        assert_eq!(commit.tracks("added.txt"), Some(&oid('4')));
        assert_eq!(commit.tracks("dropped.txt"), None);
    }

    #[test]
    fn ancestors_extend_the_first_parent_chain() {
        let commit = Commit::advance(
            "one".to_string(),
            now(),
            oid('a'),
            None,
            &Commit::root(),
            &BTreeMap::new(),
            &BTreeSet::new(),
        );

        assert_eq!(commit.ancestors(), &[oid('a')]);
        assert_eq!(commit.parents(), &[oid('a')]);
    }

    #[test]
    fn merge_commit_records_second_parent_before_first() {
        let parent = Commit::advance(
            "one".to_string(),
            now(),
            oid('a'),
            None,
            &Commit::root(),
            &BTreeMap::new(),
            &BTreeSet::new(),
        );

        let merge = Commit::advance(
            "merge".to_string(),
            now(),
            oid('b'),
            Some(oid('c')),
            &parent,
            &BTreeMap::new(),
            &BTreeSet::new(),
        );

        assert!(merge.is_merge());
        assert_eq!(merge.parents(), &[oid('b'), oid('c')]);
        assert_eq!(merge.ancestors(), &[oid('a'), oid('c'), oid('b')]);
    }

    #[test]
    fn serialization_round_trips() {
        let mut additions = BTreeMap::new();
        additions.insert("with space.txt".to_string(), oid('5'));
        additions.insert("plain.txt".to_string(), oid('6'));

        let commit = Commit::advance(
            "subject\n\nbody line".to_string(),
            now(),
            oid('d'),
            Some(oid('e')),
            &Commit::root(),
            &additions,
            &BTreeSet::new(),
        );

        let bytes = commit.serialize().unwrap();
        let mut reader = Cursor::new(bytes);
        let kind = ObjectKind::parse_object_kind(&mut reader).unwrap();
        assert_eq!(kind, ObjectKind::Commit);

        let parsed = Commit::deserialize(reader).unwrap();
        assert_eq!(parsed, commit);
        assert_eq!(parsed.object_id().unwrap(), commit.object_id().unwrap());
    }

    #[test]
    fn structurally_equal_snapshots_hash_identically() {
        let mut forward = BTreeMap::new();
        forward.insert("a.txt".to_string(), oid('1'));
        forward.insert("b.txt".to_string(), oid('2'));

        let mut backward = BTreeMap::new();
        backward.insert("b.txt".to_string(), oid('2'));
        backward.insert("a.txt".to_string(), oid('1'));

        let ts = now();
        let left = Commit::advance(
            "same".to_string(),
            ts,
            oid('a'),
            None,
            &Commit::root(),
            &forward,
            &BTreeSet::new(),
        );
        let right = Commit::advance(
            "same".to_string(),
            ts,
            oid('a'),
            None,
            &Commit::root(),
            &backward,
            &BTreeSet::new(),
        );

        assert_eq!(left.object_id().unwrap(), right.object_id().unwrap());
    }
}
