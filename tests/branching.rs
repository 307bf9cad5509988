use assert_fs::TempDir;
use rstest::rstest;

mod common;
use common::*;

#[rstest]
fn branch_points_at_the_current_commit(init_repo: TempDir) {
    commit_file(init_repo.path(), "a.txt", "1\n", "c1");
    let c1 = head_commit_id(init_repo.path());

    gitlet(init_repo.path(), &["branch", "dev"]).assert().success();
    commit_file(init_repo.path(), "a.txt", "2\n", "c2");

    gitlet(init_repo.path(), &["checkout", "dev"]).assert().success();
    assert_eq!(head_commit_id(init_repo.path()), c1);
}

#[rstest]
fn duplicate_branch_names_are_refused(init_repo: TempDir) {
    gitlet(init_repo.path(), &["branch", "dev"]).assert().success();

    gitlet(init_repo.path(), &["branch", "dev"])
        .assert()
        .success()
        .stdout("A branch with that name already exists.\n");
}

#[rstest]
fn deleting_a_missing_branch_is_refused(init_repo: TempDir) {
    gitlet(init_repo.path(), &["rm-branch", "nope"])
        .assert()
        .success()
        .stdout("A branch with that name does not exist.\n");
}

#[rstest]
fn deleting_the_current_branch_is_refused(init_repo: TempDir) {
    gitlet(init_repo.path(), &["rm-branch", "master"])
        .assert()
        .success()
        .stdout("Cannot remove the current branch.\n");
}

#[rstest]
fn deleted_branches_disappear_but_their_commits_stay(init_repo: TempDir) {
    gitlet(init_repo.path(), &["branch", "dev"]).assert().success();
    gitlet(init_repo.path(), &["checkout", "dev"]).assert().success();
    commit_file(init_repo.path(), "a.txt", "1\n", "on dev");
    let dev_tip = head_commit_id(init_repo.path());

    gitlet(init_repo.path(), &["checkout", "master"]).assert().success();
    gitlet(init_repo.path(), &["rm-branch", "dev"]).assert().success();

    let status = stdout_of(init_repo.path(), &["status"]);
    assert!(!status.contains("dev"));

    // the commit is unreachable from any branch but still in the store
    let global = stdout_of(init_repo.path(), &["global-log"]);
    assert!(global.contains(&dev_tip));
}

#[rstest]
fn branches_are_sorted_with_the_current_one_starred(init_repo: TempDir) {
    gitlet(init_repo.path(), &["branch", "zoo"]).assert().success();
    gitlet(init_repo.path(), &["branch", "alpha"]).assert().success();

    let status = stdout_of(init_repo.path(), &["status"]);
    assert!(status.contains("=== Branches ===\nalpha\n*master\nzoo\n"));
}
