//! Binary-level tests for exit codes and output streams.

mod common;

use assert_cmd::Command;
use common::Monorepo;
use predicates::prelude::*;

fn tome() -> Command {
    let mut cmd = Command::cargo_bin("tome").unwrap();
    cmd.env("NO_COLOR", "1").env_remove("RUST_LOG");
    cmd
}

#[test]
fn test_build_succeeds() {
    let repo = Monorepo::new();
    repo.write_config_file();

    tome()
        .arg("build")
        .arg("--root")
        .arg(repo.root())
        .assert()
        .success()
        .stderr(predicate::str::contains("Build completed"));

    assert!(repo.out("routes.json").exists());
    assert!(repo.out("component-types.json").exists());
}

#[test]
fn test_validation_error_exits_non_zero() {
    let repo = Monorepo::new();
    repo.write_config_file();
    repo.write(
        "packages/docs/content/broken.mdx",
        "---\ntitle: Broken\nmenu: [Guides]\n---\nBody\n",
    );

    tome()
        .args(["--no-color", "build", "--root"])
        .arg(repo.root())
        .assert()
        .failure()
        .stderr(predicate::str::contains("Content validation failed"))
        .stderr(predicate::str::contains("Missing required field: id"));
}

#[test]
fn test_type_extraction_failure_exits_non_zero() {
    let repo = Monorepo::new();
    repo.write_config_file();
    repo.write("packages/ui/src/button.tsx", "export function Button( {\n");

    tome()
        .args(["build", "--root"])
        .arg(repo.root())
        .assert()
        .failure()
        .stderr(predicate::str::contains("Type extraction failed"))
        .stderr(predicate::str::contains("documentation artifacts were written"));

    assert!(repo.out("docs.json").exists());
    assert!(repo.out("routes.json").exists());
    assert!(!repo.out("component-types.json").exists());
}

#[test]
fn test_missing_content_dir_exits_non_zero() {
    let repo = Monorepo::new();

    tome()
        .args(["build", "--root"])
        .arg(repo.root())
        .assert()
        .failure()
        .stderr(predicate::str::contains("contentDir"));
}

#[test]
fn test_schema_prints_to_stdout() {
    tome()
        .arg("schema")
        .assert()
        .success()
        .stdout(predicate::str::contains("\"contentDir\""))
        .stdout(predicate::str::contains("\"debounceMs\""));
}
