//! Three-way merge classification
//!
//! Pure comparison of the blob hashes a path has at the split point (S), the
//! current branch head (C) and the other branch head (O). No I/O happens
//! here; the merge driver maps each outcome onto working-file and
//! staging-area mutations.

use crate::artifacts::objects::object_id::ObjectId;

/// What the merge driver has to do for one path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MergeOutcome {
    /// Keep the current branch's state, whatever it is
    Unchanged,
    /// Check out the other branch's version and stage it for addition
    TakeOther,
    /// Remove the working file and stage the path for removal
    StageRemoval,
    /// Write conflict markers and stage the merged file
    Conflict,
}

/// Classify a path present in the split point's snapshot.
///
/// `ours`/`theirs` are absent when the respective branch deleted the path.
/// The `S≠C and S≠O` case conflicts unconditionally, even when both branches
/// arrived at the same blob.
pub fn classify_base_path(
    base: &ObjectId,
    ours: Option<&ObjectId>,
    theirs: Option<&ObjectId>,
) -> MergeOutcome {
    match (ours, theirs) {
        // deleted on both sides
        (None, None) => MergeOutcome::Unchanged,
        // deleted by us; conflict unless the other side left it alone
        (None, Some(theirs)) if theirs != base => MergeOutcome::Conflict,
        (None, Some(_)) => MergeOutcome::Unchanged,
        // deleted by them; their deletion wins only if we left it alone
        (Some(ours), None) if ours != base => MergeOutcome::Conflict,
        (Some(_), None) => MergeOutcome::StageRemoval,
        (Some(ours), Some(theirs)) => {
            if ours == base && theirs == base {
                MergeOutcome::Unchanged
            } else if ours == base {
                MergeOutcome::TakeOther
            } else if theirs == base {
                MergeOutcome::Unchanged
            } else {
                MergeOutcome::Conflict
            }
        }
    }
}

/// Classify a path absent from the split point but present in the other
/// branch's snapshot.
pub fn classify_other_path(ours: Option<&ObjectId>, theirs: &ObjectId) -> MergeOutcome {
    match ours {
        None => MergeOutcome::TakeOther,
        Some(ours) if ours == theirs => MergeOutcome::Unchanged,
        Some(_) => MergeOutcome::Conflict,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn oid(fill: char) -> ObjectId {
        ObjectId::try_parse(fill.to_string().repeat(40)).unwrap()
    }

    #[test]
    fn untouched_on_both_sides_is_a_no_op() {
        let base = oid('1');
        let outcome = classify_base_path(&base, Some(&oid('1')), Some(&oid('1')));
        assert_eq!(outcome, MergeOutcome::Unchanged);
    }

    #[test]
    fn their_edit_is_taken_when_we_left_it_alone() {
        let base = oid('1');
        let outcome = classify_base_path(&base, Some(&oid('1')), Some(&oid('2')));
        assert_eq!(outcome, MergeOutcome::TakeOther);
    }

    #[test]
    fn our_edit_is_kept_when_they_left_it_alone() {
        let base = oid('1');
        let outcome = classify_base_path(&base, Some(&oid('2')), Some(&oid('1')));
        assert_eq!(outcome, MergeOutcome::Unchanged);
    }

    #[test]
    fn divergent_edits_conflict() {
        let base = oid('1');
        let outcome = classify_base_path(&base, Some(&oid('2')), Some(&oid('3')));
        assert_eq!(outcome, MergeOutcome::Conflict);
    }

    #[test]
    fn identical_independent_edits_still_conflict() {
        // both branches replaced the split-point blob with the same content;
        // the classification stays strict and flags it anyway
        let base = oid('1');
        let outcome = classify_base_path(&base, Some(&oid('2')), Some(&oid('2')));
        assert_eq!(outcome, MergeOutcome::Conflict);
    }

    #[test]
    fn their_untouched_deletion_stages_a_removal() {
        let base = oid('1');
        let outcome = classify_base_path(&base, Some(&oid('1')), None);
        assert_eq!(outcome, MergeOutcome::StageRemoval);
    }

    #[test]
    fn their_deletion_of_our_edit_conflicts() {
        let base = oid('1');
        let outcome = classify_base_path(&base, Some(&oid('2')), None);
        assert_eq!(outcome, MergeOutcome::Conflict);
    }

    #[test]
    fn our_untouched_deletion_is_a_no_op() {
        let base = oid('1');
        let outcome = classify_base_path(&base, None, Some(&oid('1')));
        assert_eq!(outcome, MergeOutcome::Unchanged);
    }

    #[test]
    fn our_deletion_of_their_edit_conflicts() {
        let base = oid('1');
        let outcome = classify_base_path(&base, None, Some(&oid('2')));
        assert_eq!(outcome, MergeOutcome::Conflict);
    }

    #[test]
    fn deleted_on_both_sides_is_a_no_op() {
        let base = oid('1');
        assert_eq!(classify_base_path(&base, None, None), MergeOutcome::Unchanged);
    }

    #[test]
    fn their_new_file_is_taken_when_we_lack_it() {
        assert_eq!(classify_other_path(None, &oid('1')), MergeOutcome::TakeOther);
    }

    #[test]
    fn identical_new_files_are_a_no_op() {
        assert_eq!(
            classify_other_path(Some(&oid('1')), &oid('1')),
            MergeOutcome::Unchanged
        );
    }

    #[test]
    fn differing_new_files_conflict() {
        assert_eq!(
            classify_other_path(Some(&oid('1')), &oid('2')),
            MergeOutcome::Conflict
        );
    }
}
