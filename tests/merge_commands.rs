use assert_fs::TempDir;
use predicates::prelude::*;
use pretty_assertions::assert_eq;
use rstest::rstest;

mod common;

use common::command::{
    branch_commit_id, commit_file, committed_repository_dir, head_commit_id, run_grit_command,
};
use common::file::{FileSpec, read_file, write_file};

/// Diverge `feature` from the committed base: the closure edits the feature
/// side, then the current branch is master again.
fn diverge_feature(dir: &TempDir, edit_feature: impl FnOnce(&TempDir)) {
    run_grit_command(dir.path(), &["branch", "feature"]).assert().success();
    run_grit_command(dir.path(), &["checkout", "feature"]).assert().success();
    edit_feature(dir);
    run_grit_command(dir.path(), &["checkout", "master"]).assert().success();
}

#[rstest]
fn merging_with_a_dirty_stage_fails(committed_repository_dir: TempDir) {
    let dir = committed_repository_dir;
    run_grit_command(dir.path(), &["branch", "feature"]).assert().success();
    write_file(FileSpec::new(dir.path().join("f.txt"), "pending\n".to_string()));
    run_grit_command(dir.path(), &["add", "f.txt"]).assert().success();

    run_grit_command(dir.path(), &["merge", "feature"])
        .assert()
        .success()
        .stdout(predicate::str::contains("You have uncommitted changes."));
}

#[rstest]
fn merging_an_unknown_branch_fails(committed_repository_dir: TempDir) {
    run_grit_command(committed_repository_dir.path(), &["merge", "ghost"])
        .assert()
        .success()
        .stdout(predicate::str::contains("A branch with that name does not exist."));
}

#[rstest]
fn merging_the_current_branch_fails(committed_repository_dir: TempDir) {
    run_grit_command(committed_repository_dir.path(), &["merge", "master"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Cannot merge a branch with itself."));
}

#[rstest]
fn merging_an_ancestor_is_a_no_op(committed_repository_dir: TempDir) {
    let dir = committed_repository_dir;
    run_grit_command(dir.path(), &["branch", "behind"]).assert().success();
    commit_file(dir.path(), "f.txt", "f ahead\n", "ahead");

    run_grit_command(dir.path(), &["merge", "behind"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Given branch is an ancestor of the current branch.",
        ));
}

#[rstest]
fn merging_a_descendant_fast_forwards(committed_repository_dir: TempDir) {
    let dir = committed_repository_dir;
    diverge_feature(&dir, |dir| {
        commit_file(dir.path(), "f.txt", "f feature\n", "on feature");
    });

    run_grit_command(dir.path(), &["merge", "feature"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Current branch fast-forwarded."));

    // master now points at feature's head; no merge commit was created
    assert_eq!(
        head_commit_id(dir.path()),
        branch_commit_id(dir.path(), "feature")
    );
    assert_eq!(read_file(&dir.path().join("f.txt")), "f feature\n");
}

#[rstest]
fn merge_combines_changes_from_both_sides(committed_repository_dir: TempDir) {
    let dir = committed_repository_dir;
    diverge_feature(&dir, |dir| {
        commit_file(dir.path(), "g.txt", "g feature\n", "change g");
    });
    commit_file(dir.path(), "f.txt", "f master\n", "change f");

    run_grit_command(dir.path(), &["merge", "feature"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Encountered a merge conflict.").not());

    assert_eq!(read_file(&dir.path().join("f.txt")), "f master\n");
    assert_eq!(read_file(&dir.path().join("g.txt")), "g feature\n");
    run_grit_command(dir.path(), &["log"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Merged feature into master."))
        .stdout(predicate::str::contains("Merge: "));
}

#[rstest]
fn divergent_edits_leave_conflict_markers(committed_repository_dir: TempDir) {
    let dir = committed_repository_dir;
    diverge_feature(&dir, |dir| {
        commit_file(dir.path(), "f.txt", "f feature\n", "feature edit");
    });
    commit_file(dir.path(), "f.txt", "f master\n", "master edit");

    run_grit_command(dir.path(), &["merge", "feature"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Encountered a merge conflict."));

    assert_eq!(
        read_file(&dir.path().join("f.txt")),
        "<<<<<<< HEAD\nf master\n=======\nf feature\n>>>>>>>\n"
    );
    // the conflicted result is committed with both parents
    run_grit_command(dir.path(), &["log"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Merged feature into master."));
}

#[rstest]
fn an_edit_against_a_deletion_conflicts(committed_repository_dir: TempDir) {
    let dir = committed_repository_dir;
    diverge_feature(&dir, |dir| {
        run_grit_command(dir.path(), &["rm", "f.txt"]).assert().success();
        run_grit_command(dir.path(), &["commit", "-m", "drop f"]).assert().success();
    });
    commit_file(dir.path(), "f.txt", "f master\n", "master edit");

    run_grit_command(dir.path(), &["merge", "feature"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Encountered a merge conflict."));

    assert_eq!(
        read_file(&dir.path().join("f.txt")),
        "<<<<<<< HEAD\nf master\n=======\n>>>>>>>\n"
    );
}

#[rstest]
fn an_untouched_file_deleted_on_the_other_side_is_removed(committed_repository_dir: TempDir) {
    let dir = committed_repository_dir;
    diverge_feature(&dir, |dir| {
        run_grit_command(dir.path(), &["rm", "f.txt"]).assert().success();
        run_grit_command(dir.path(), &["commit", "-m", "drop f"]).assert().success();
    });
    commit_file(dir.path(), "g.txt", "g master\n", "change g");

    run_grit_command(dir.path(), &["merge", "feature"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Encountered a merge conflict.").not());

    assert!(!dir.path().join("f.txt").exists());
    assert_eq!(read_file(&dir.path().join("g.txt")), "g master\n");
}

#[rstest]
fn merge_refuses_to_overwrite_an_untracked_file(committed_repository_dir: TempDir) {
    let dir = committed_repository_dir;
    diverge_feature(&dir, |dir| {
        commit_file(dir.path(), "new.txt", "feature version\n", "add new");
    });
    commit_file(dir.path(), "g.txt", "g master\n", "change g");

    // untracked on master, about to be written by the merge
    write_file(FileSpec::new(dir.path().join("new.txt"), "local scribbles\n".to_string()));

    run_grit_command(dir.path(), &["merge", "feature"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "There is an untracked file in the way; delete it, or add and commit it first.",
        ));
    assert_eq!(read_file(&dir.path().join("new.txt")), "local scribbles\n");
}
