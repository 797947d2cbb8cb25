//! End-to-end tests for the `entity-catalog versions` command.
//!
//! Everything past argument parsing needs the git command line, so those
//! tests only run with the `integration-tests` feature.

mod common;
use common::prelude::*;

#[test]
fn test_versions_help() {
    TestFixture::new()
        .command()
        .args(["versions", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("List the versions of an entity"));
}

#[test]
fn test_versions_requires_repo() {
    TestFixture::new()
        .command()
        .args(["versions", "ds"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--repo"));
}

fn datasets_repo(git: &GitFixture) {
    let repo = git.init("org/datasets");
    git.commit(&repo, &[("images/ds.spec", "dataset:\n  name: ds\n  version: 1\n")], "v1");
    git.tag(&repo, "vision__images__ds__1");
    git.tag(&repo, "vision__images__other__1");
    git.commit(&repo, &[("images/ds.spec", "dataset:\n  name: ds\n  version: 2\n")], "v2");
    git.tag(&repo, "vision__images__ds__2");
    git.tag(&repo, "release-2024");
}

#[test]
#[cfg_attr(not(feature = "integration-tests"), ignore)]
fn test_versions_lists_matching_tags() {
    let git = GitFixture::new();
    datasets_repo(&git);

    TestFixture::new()
        .command()
        .args(["versions", "ds", "--repo", "org/datasets", "--base-url", &git.base_url()])
        .assert()
        .success()
        .stdout(predicate::str::contains("vision__images__ds__1"))
        .stdout(predicate::str::contains("vision__images__ds__2"))
        .stdout(predicate::str::contains("other").not())
        .stdout(predicate::str::contains("release-2024").not());
}

#[test]
#[cfg_attr(not(feature = "integration-tests"), ignore)]
fn test_versions_json_output() {
    let git = GitFixture::new();
    datasets_repo(&git);

    let output = TestFixture::new()
        .command()
        .args(["versions", "ds", "--repo", "org/datasets", "--format", "json"])
        .args(["--base-url", &git.base_url()])
        .output()
        .unwrap();
    assert!(output.status.success());

    let rows: Vec<serde_json::Value> = serde_json::from_slice(&output.stdout).unwrap();
    let mut versions: Vec<u64> = rows.iter().filter_map(|r| r["version"].as_u64()).collect();
    versions.sort_unstable();
    assert_eq!(versions, vec![1, 2]);
}

#[test]
#[cfg_attr(not(feature = "integration-tests"), ignore)]
fn test_versions_unknown_repository() {
    let git = GitFixture::new();
    TestFixture::new()
        .command()
        .args(["versions", "ds", "--repo", "org/nowhere", "--base-url", &git.base_url()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Repository not found: org/nowhere"))
        .stderr(predicate::str::contains("hint:"));
}

#[test]
#[cfg_attr(not(feature = "integration-tests"), ignore)]
fn test_versions_unknown_entity() {
    let git = GitFixture::new();
    datasets_repo(&git);

    TestFixture::new()
        .command()
        .args(["versions", "missing", "--repo", "org/datasets", "--base-url", &git.base_url()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Entity 'missing' not found in org/datasets"));
}
