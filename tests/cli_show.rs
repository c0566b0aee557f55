mod support;

use predicates::prelude::*;
use serde_json::Value;
use support::Workdir;

fn json_output(output: &std::process::Output) -> Value {
    serde_json::from_slice(&output.stdout).expect("valid json")
}

#[test]
fn show_root_lists_the_default_seed() {
    let wd = Workdir::new();
    wd.cmd()
        .arg("show")
        .assert()
        .success()
        .stdout(predicate::str::starts_with("/\n"))
        .stdout(predicate::str::contains("Things still to do (3)"))
        .stdout(predicate::str::contains("Learn about Angular"))
        .stdout(predicate::str::contains("Things done (0)"))
        .stdout(predicate::str::contains("Nothing done yet."));
}

#[test]
fn show_detail_json_envelope() {
    let wd = Workdir::new();
    let output = wd
        .cmd()
        .args(["--json", "show", "/details/2"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let json = json_output(&output);
    assert_eq!(json["schema_version"], "ticklist.v1");
    assert_eq!(json["command"], "show");
    assert_eq!(json["status"], "success");
    assert_eq!(json["data"]["route"], "/details/2");
    assert_eq!(json["data"]["redirected"], false);
    assert_eq!(json["data"]["view"]["page"], "detail");
    assert_eq!(json["data"]["view"]["item"]["task"], "Use the CLI");
    assert!(json["data"]["view"]["item"]["completed_on"].is_null());
}

#[test]
fn unmatched_path_redirects_to_list_with_warning() {
    let wd = Workdir::new();
    wd.cmd()
        .args(["show", "/nowhere"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("/\n"))
        .stdout(predicate::str::contains("Things still to do"))
        .stdout(predicate::str::contains("no page at '/nowhere'"));
}

#[test]
fn zero_id_redirects() {
    let wd = Workdir::new();
    let output = wd
        .cmd()
        .args(["--json", "show", "/details/0"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let json = json_output(&output);
    assert_eq!(json["data"]["route"], "/");
    assert_eq!(json["data"]["redirected"], true);
    assert_eq!(json["data"]["view"]["page"], "list");
}

#[test]
fn missing_todo_shows_not_found_state() {
    let wd = Workdir::new();
    wd.cmd()
        .args(["show", "/details/42"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Todo 42 not found"))
        .stdout(predicate::str::contains("ticklist show /"));
}

#[test]
fn config_in_working_directory_sets_the_seed() {
    let wd = Workdir::new();
    wd.write_config("seed = [\"Water plants\", \"Call mum\"]\n")
        .unwrap();

    wd.cmd()
        .arg("show")
        .assert()
        .success()
        .stdout(predicate::str::contains("Things still to do (2)"))
        .stdout(predicate::str::contains("Water plants"))
        .stdout(predicate::str::contains("Learn about Angular").not());
}

#[test]
fn explicit_config_must_exist() {
    let wd = Workdir::new();
    let output = wd
        .cmd()
        .args(["--json", "--config", "missing.toml", "show"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(2));

    let json = json_output(&output);
    assert_eq!(json["status"], "error");
    assert_eq!(json["error"]["kind"], "user_error");
    assert_eq!(json["error"]["details"]["path"], "missing.toml");
}

#[test]
fn invalid_config_is_a_user_error() {
    let wd = Workdir::new();
    wd.write_config("seed = [\"ok\", \"\"]\n").unwrap();

    wd.cmd()
        .arg("show")
        .assert()
        .code(2)
        .stderr(predicate::str::contains("seed[1]: task cannot be empty"));
}

#[test]
fn quiet_suppresses_human_output() {
    let wd = Workdir::new();
    wd.cmd()
        .args(["-q", "show"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty());
}
