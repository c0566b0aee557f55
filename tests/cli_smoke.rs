use assert_cmd::Command;
use predicates::prelude::*;

#[test]
fn help_describes_the_tool() {
    Command::cargo_bin("ticklist")
        .unwrap()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("single-session todo list"))
        .stdout(predicate::str::contains("show"))
        .stdout(predicate::str::contains("run"));
}

#[test]
fn subcommand_help_works() {
    for sub in ["ui", "show", "run"] {
        Command::cargo_bin("ticklist")
            .unwrap()
            .args([sub, "--help"])
            .assert()
            .success()
            .stdout(predicate::str::contains("Usage"));
    }
}

#[test]
fn unknown_subcommand_fails() {
    Command::cargo_bin("ticklist")
        .unwrap()
        .arg("frobnicate")
        .assert()
        .failure();
}
