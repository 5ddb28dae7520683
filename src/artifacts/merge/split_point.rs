//! Split-point (merge-base) search
//!
//! The split point is the three-way merge reference: the nearest commit the
//! two branch heads have in common. The search here is a first-parent
//! heuristic over the ancestor lists commits carry, NOT a true
//! lowest-common-ancestor walk; criss-cross histories can yield a suboptimal
//! split point. The [`SplitPointFinder`] trait isolates the heuristic so a
//! stricter graph algorithm can replace it without touching the merge
//! classification.

use crate::artifacts::objects::commit::Commit;
use crate::artifacts::objects::object_id::ObjectId;
use std::collections::HashSet;

pub trait SplitPointFinder {
    /// Find the merge base of `ours` and `theirs`, the two branch-head
    /// commits. Returns `None` when the histories share no commit; with a
    /// deterministic root commit that never happens in practice.
    fn split_point(&self, ours: &Commit, theirs: &Commit) -> Option<ObjectId>;
}

/// Scans `ours`' ancestor list newest to oldest and picks the first entry
/// that also occurs anywhere in `theirs`' ancestor list.
#[derive(Debug, Clone, Copy, Default)]
pub struct FirstParentScan;

impl SplitPointFinder for FirstParentScan {
    fn split_point(&self, ours: &Commit, theirs: &Commit) -> Option<ObjectId> {
        let their_ancestors: HashSet<&ObjectId> = theirs.ancestors().iter().collect();

        ours.ancestors()
            .iter()
            .rev()
            .find(|ancestor| their_ancestors.contains(ancestor))
            .cloned()
    }
}
