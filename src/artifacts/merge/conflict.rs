//! Conflict marker rendering
//!
//! A conflicted path is replaced by a merged file carrying both versions
//! between markers. The merged content is itself stored as a blob and staged,
//! so committing the merge records the markers verbatim unless the user edits
//! them away first.

/// Render the marker block for a conflicted path.
///
/// A side deleted by its branch contributes no content line, so the two
/// markers end up adjacent. Present sides are trimmed of surrounding
/// whitespace before insertion, so the block's shape is stable regardless of
/// trailing newlines in the originals.
pub fn render_conflict(ours: Option<&str>, theirs: Option<&str>) -> String {
    let mut block = String::from("<<<<<<< HEAD\n");
    if let Some(ours) = ours {
        block.push_str(ours.trim());
        block.push('\n');
    }
    block.push_str("=======\n");
    if let Some(theirs) = theirs {
        block.push_str(theirs.trim());
        block.push('\n');
    }
    block.push_str(">>>>>>>\n");

    block
}
