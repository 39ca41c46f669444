//! Integration tests for the veneer binary.
//!
//! These tests run the CLI against real Git repos.

mod support;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

use support::TestRepo;

/// Get a command for running veneer inside `repo`.
fn veneer(repo: &TestRepo) -> Command {
    let mut cmd = Command::cargo_bin("veneer").unwrap();
    cmd.current_dir(repo.path()).env_remove("RUST_LOG");
    cmd
}

#[test]
fn version_flag_works() {
    Command::cargo_bin("veneer")
        .unwrap()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("veneer"));
}

#[test]
fn show_prints_commit_and_paths() {
    let repo = TestRepo::new();
    let head = repo.commit_file("notes.txt", "n\n", "Add notes\n\nWith a body.");

    veneer(&repo)
        .arg("show")
        .assert()
        .success()
        .stdout(predicate::str::contains(format!("commit {}", head)))
        .stdout(predicate::str::contains("Author: Test User <test@example.com>"))
        .stdout(predicate::str::contains("    With a body."))
        .stdout(predicate::str::contains("A\tnotes.txt"));
}

#[test]
fn show_quiet_prints_only_the_id() {
    let repo = TestRepo::new();
    let head = repo.rev_parse("HEAD");

    veneer(&repo)
        .args(["show", "--quiet"])
        .assert()
        .success()
        .stdout(format!("commit {}\n", head));
}

#[test]
fn show_unknown_revision_fails() {
    let repo = TestRepo::new();

    veneer(&repo)
        .args(["show", "nope"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("nope"));
}

#[test]
fn status_reports_untracked() {
    let repo = TestRepo::new();
    repo.write("scratch.txt", "?\n");

    veneer(&repo)
        .arg("status")
        .assert()
        .success()
        .stdout(predicate::str::contains("Unstaged:"))
        .stdout(predicate::str::contains("A scratch.txt"));
}

#[test]
fn status_clean() {
    let repo = TestRepo::new();

    veneer(&repo)
        .arg("status")
        .assert()
        .success()
        .stdout(predicate::str::contains("working tree clean"));
}

#[test]
fn tags_as_json() {
    let repo = TestRepo::new();
    repo.run(&["tag", "-a", "v1", "-m", "First release"]);

    let output = veneer(&repo).args(["tags", "--json"]).output().unwrap();
    assert!(output.status.success());

    let parsed: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let tags = parsed.as_array().unwrap();
    assert_eq!(tags.len(), 1);
    assert_eq!(tags[0]["full_name"], "refs/tags/v1");
    assert_eq!(tags[0]["short_message"], "First release");
    assert_eq!(tags[0]["commit"]["id"], repo.rev_parse("HEAD"));
}

#[test]
fn resolve_tag_to_commit() {
    let repo = TestRepo::new();
    repo.run(&["tag", "-a", "v1", "-m", "First release"]);

    veneer(&repo)
        .args(["resolve", "v1", "--as", "commit"])
        .assert()
        .success()
        .stdout(format!("{}\n", repo.rev_parse("HEAD")));

    veneer(&repo)
        .args(["resolve", "refs/tags/v1", "--as", "object-id"])
        .assert()
        .success()
        .stdout(format!("{}\n", repo.rev_parse("refs/tags/v1")));
}

#[test]
fn resolve_missing_branch_prints_null_json() {
    let repo = TestRepo::new();

    veneer(&repo)
        .args(["resolve", "absent", "--as", "branch", "--json"])
        .assert()
        .success()
        .stdout("null\n");
}

#[test]
fn fails_outside_a_repository() {
    let dir = TempDir::new().unwrap();

    Command::cargo_bin("veneer")
        .unwrap()
        .current_dir(dir.path())
        .arg("status")
        .assert()
        .failure()
        .stderr(predicate::str::starts_with("error:"));
}

#[test]
fn completion_script_names_the_binary() {
    Command::cargo_bin("veneer")
        .unwrap()
        .args(["completion", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("veneer"));
}

#[test]
fn config_reports_repo_overrides() {
    let repo = TestRepo::new();
    repo.write(
        ".git/veneer/config.toml",
        "[resolve]\ntracking_depth_limit = 3\n",
    );

    let output = veneer(&repo)
        .env("VENEER_CONFIG", repo.path().join("no-such-global.toml"))
        .args(["config", "--json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let parsed: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(parsed["tracking_depth_limit"], 3);
    assert_eq!(parsed["detect_copies"], true);
    assert!(parsed["repo_file"].as_str().unwrap().ends_with("config.toml"));
}

#[test]
fn branches_verbose_shows_ahead_count() {
    let repo = TestRepo::new();
    repo.fake_origin();
    repo.set_upstream("main", "origin", "refs/heads/main");
    repo.commit_file("ahead.txt", "a\n", "Ahead of origin");

    veneer(&repo)
        .args(["branches", "-v"])
        .assert()
        .success()
        .stdout("main [origin/main: ahead 1]\n");
}

#[test]
fn remotes_fall_back_to_fetch_url_for_push() {
    let repo = TestRepo::new();
    repo.fake_origin();

    veneer(&repo)
        .arg("remotes")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "origin\thttps://example.com/repo.git (fetch)",
        ))
        .stdout(predicate::str::contains(
            "origin\thttps://example.com/repo.git (push)",
        ));
}

#[test]
fn log_prints_abbreviated_ids_and_subjects() {
    let repo = TestRepo::new();
    let head = repo.commit_file("notes.txt", "n\n", "Add notes\n\nWith a body.");

    veneer(&repo)
        .args(["log", "-n", "1"])
        .assert()
        .success()
        .stdout(format!("{} Add notes\n", &head[..7]));
}

#[test]
fn log_path_filter_after_double_dash() {
    let repo = TestRepo::new();
    let first = repo.commit_file("a.txt", "a\n", "Add a");
    repo.commit_file("b.txt", "b\n", "Add b");

    veneer(&repo)
        .args(["log", "--quiet", "--", "a.txt"])
        .assert()
        .success()
        .stdout(format!("{}\n", first));
}

#[test]
fn describe_names_the_nearest_tag() {
    let repo = TestRepo::new();
    repo.run(&["tag", "-a", "v1", "-m", "First release"]);
    let head = repo.commit_file("a.txt", "a\n", "After release");

    veneer(&repo)
        .arg("describe")
        .assert()
        .success()
        .stdout(format!("v1-1-g{}\n", &head[..7]));
}

#[test]
fn describe_without_tags_fails() {
    let repo = TestRepo::new();

    veneer(&repo)
        .arg("describe")
        .assert()
        .failure()
        .stderr(predicate::str::contains("No tags can describe"));
}
