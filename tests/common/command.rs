use crate::common::file::{FileSpec, write_file};
use assert_cmd::Command;
use assert_fs::TempDir;
use rstest::fixture;
use std::path::Path;

#[fixture]
pub fn repository_dir() -> TempDir {
    TempDir::new().expect("Failed to create temp dir")
}

#[fixture]
pub fn init_repository_dir(repository_dir: TempDir) -> TempDir {
    run_grit_command(repository_dir.path(), &["init"])
        .assert()
        .success();

    repository_dir
}

/// A repository with one commit tracking `f.txt` and `g.txt`.
#[fixture]
pub fn committed_repository_dir(init_repository_dir: TempDir) -> TempDir {
    let dir = init_repository_dir;

    write_file(FileSpec::new(dir.path().join("f.txt"), "f base\n".to_string()));
    write_file(FileSpec::new(dir.path().join("g.txt"), "g base\n".to_string()));
    run_grit_command(dir.path(), &["add", "f.txt"]).assert().success();
    run_grit_command(dir.path(), &["add", "g.txt"]).assert().success();
    grit_commit(dir.path(), "base").assert().success();

    dir
}

pub fn run_grit_command(dir: &Path, args: &[&str]) -> Command {
    let mut cmd = Command::cargo_bin("grit").expect("Failed to find grit binary");
    cmd.current_dir(dir);
    for arg in args {
        cmd.arg(arg);
    }
    cmd
}

pub fn grit_commit(dir: &Path, message: &str) -> Command {
    run_grit_command(dir, &["commit", "-m", message])
}

/// Stage and commit one file in a single step.
pub fn commit_file(dir: &Path, file_name: &str, content: &str, message: &str) {
    write_file(FileSpec::new(dir.join(file_name), content.to_string()));
    run_grit_command(dir, &["add", file_name]).assert().success();
    grit_commit(dir, message).assert().success();
}

/// Commit hash the given branch points at.
pub fn branch_commit_id(dir: &Path, branch: &str) -> String {
    let ref_path = dir.join(".grit").join("refs").join("heads").join(branch);
    std::fs::read_to_string(ref_path)
        .expect("Failed to read branch ref")
        .trim()
        .to_string()
}

/// Commit hash HEAD resolves to.
pub fn head_commit_id(dir: &Path) -> String {
    let head = std::fs::read_to_string(dir.join(".grit").join("HEAD")).expect("Failed to read HEAD");
    std::fs::read_to_string(dir.join(".grit").join(head.trim()))
        .expect("Failed to read HEAD ref")
        .trim()
        .to_string()
}
