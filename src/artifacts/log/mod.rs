//! Log entry formatting
//!
//! One rendering shared by `log` and `global-log` and by the persisted log
//! files under `.grit/logs/`:
//!
//! ```text
//! ===
//! commit <40-hex hash>
//! Merge: <parent-1 short> <parent-2 short>
//! Date: <Thu Jan 1 00:00:00 1970 +0000>
//! <message>
//! <blank line>
//! ```
//!
//! The `Merge:` line appears only for two-parent commits and abbreviates both
//! parents to their short form.

use crate::artifacts::objects::commit::Commit;
use crate::artifacts::objects::object_id::ObjectId;

pub fn format_log_entry(object_id: &ObjectId, commit: &Commit) -> String {
    let mut lines = vec!["===".to_string(), format!("commit {object_id}")];

    if let [first, second] = commit.parents() {
        lines.push(format!(
            "Merge: {} {}",
            first.to_short_oid(),
            second.to_short_oid()
        ));
    }

    lines.push(format!("Date: {}", commit.readable_timestamp()));
    lines.push(commit.message().to_string());
    lines.push(String::new());
    lines.push(String::new());

    lines.join("\n")
}
