use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use std::process::{Command, Output};
use tempfile::tempdir;

fn run(home: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_capsteps"))
        .args(args)
        .env("HOME", home)
        .output()
        .expect("run capsteps")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).to_string()
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).to_string()
}

fn assert_ok(output: &Output) {
    assert!(
        output.status.success(),
        "stdout:\n{}\nstderr:\n{}",
        stdout(output),
        stderr(output)
    );
}

fn assert_err_contains(output: &Output, needle: &str) {
    assert!(
        !output.status.success(),
        "expected failure, stdout:\n{}\nstderr:\n{}",
        stdout(output),
        stderr(output)
    );
    let text = format!("{}{}", stdout(output), stderr(output));
    assert!(
        text.contains(needle),
        "expected error to contain `{needle}`, got:\n{text}"
    );
}

fn kv_lines(output: &Output) -> BTreeMap<String, String> {
    stdout(output)
        .lines()
        .filter_map(|line| line.split_once('='))
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

#[test]
fn cli_requires_init_before_catalog_commands() {
    let temp = tempdir().expect("tempdir");
    let output = run(temp.path(), &["catalog", "list"]);
    assert_err_contains(&output, "run `capsteps init` first");

    let output = run(temp.path(), &["frobnicate"]);
    assert_err_contains(&output, "unknown command `frobnicate`");

    let output = run(temp.path(), &[]);
    assert_ok(&output);
    assert!(stdout(&output).contains("Wizard keys"));
}

#[test]
fn cli_init_writes_settings_and_sample_catalog() {
    let temp = tempdir().expect("tempdir");
    let output = run(temp.path(), &["init"]);
    assert_ok(&output);
    let values = kv_lines(&output);
    let state_root = temp.path().join(".capsteps");
    assert_eq!(
        values.get("config").cloned(),
        Some(state_root.join("config.yaml").display().to_string())
    );
    assert!(state_root.join("capabilities.yaml").is_file());
    assert!(state_root.join("projects").is_dir());

    let again = run(temp.path(), &["init", "--catalog", "empty"]);
    assert_ok(&again);
    assert!(stdout(&again).contains("(kept)"));

    let output = run(temp.path(), &["catalog", "list"]);
    assert_ok(&output);
    let listing = stdout(&output);
    assert!(listing.contains("Java Development:"));
    assert!(listing.contains("Other:"));
    assert!(listing.contains("servlets"));

    let output = run(temp.path(), &["catalog", "show", "servlets"]);
    assert_ok(&output);
    let values = kv_lines(&output);
    assert_eq!(
        values.get("nature").map(String::as_str),
        Some("capsteps.nature.servlets")
    );
    assert_eq!(
        values.get("prerequisites").map(String::as_str),
        Some("java,web")
    );
    assert_eq!(values.get("handles").map(String::as_str), Some("web"));
    assert_eq!(
        values.get("category").map(String::as_str),
        Some("Web Development")
    );
}

#[test]
fn cli_validate_reports_blocking_problems() {
    let temp = tempdir().expect("tempdir");
    assert_ok(&run(temp.path(), &["init"]));

    let output = run(temp.path(), &["validate", "java,web"]);
    assert_ok(&output);
    assert!(stdout(&output).contains("valid (2 capabilities)"));

    let output = run(temp.path(), &["validate", "servlets,static-site"]);
    assert_err_contains(&output, "cannot be enabled together");

    let output = run(temp.path(), &["validate", "java-tests"]);
    assert_err_contains(&output, "requires `java`");

    let output = run(temp.path(), &["validate", "java,ghost"]);
    assert_err_contains(&output, "unknown capability <ghost>");
}

#[test]
fn cli_project_lifecycle_creates_plans_and_applies() {
    let temp = tempdir().expect("tempdir");
    assert_ok(&run(temp.path(), &["init"]));

    let output = run(temp.path(), &["project", "create", "demo", "--with", "servlets"]);
    assert_ok(&output);
    let text = stdout(&output);
    assert!(text.contains("selected prerequisite `java` for `servlets`"));
    assert!(text.contains("1. Install Java"));
    assert!(text.contains("2. Install Servlets"));
    assert!(text.contains("completed: Install Java"));
    assert!(text.contains("state=finished"));
    assert!(text.contains("created project `demo`"));

    let output = run(temp.path(), &["project", "show", "demo"]);
    assert_ok(&output);
    let values = kv_lines(&output);
    assert_eq!(
        values.get("natures").map(String::as_str),
        Some("capsteps.nature.java,capsteps.nature.web,capsteps.nature.servlets")
    );
    assert_eq!(
        values.get("capabilities").map(String::as_str),
        Some("java,web,servlets")
    );

    let output = run(temp.path(), &["plan", "demo", "java,web"]);
    assert_ok(&output);
    let text = stdout(&output);
    assert!(text.contains("1. Remove Servlets: Removes natures: `capsteps.nature.servlets`."));
    assert!(text.contains("natures after apply=capsteps.nature.java,capsteps.nature.web"));

    let output = run(temp.path(), &["apply", "demo", "java,web", "--keys", "esc"]);
    assert_ok(&output);
    assert!(stdout(&output).contains("state=canceled"));

    let output = run(temp.path(), &["apply", "demo", "java,web", "--keys", "right"]);
    assert_err_contains(&output, "wizard stopped at review_only");

    let output = run(temp.path(), &["project", "show", "demo"]);
    assert_eq!(
        kv_lines(&output).get("capabilities").map(String::as_str),
        Some("java,web,servlets")
    );

    let output = run(temp.path(), &["apply", "demo", "java,web"]);
    assert_ok(&output);
    assert_eq!(
        kv_lines(&output).get("natures").map(String::as_str),
        Some("capsteps.nature.java,capsteps.nature.web")
    );

    let log = fs::read_to_string(temp.path().join(".capsteps/logs/events.log"))
        .expect("read event log");
    assert!(log.contains("\"event\":\"natures_committed\""));
    assert!(log.contains("\"event\":\"sequence_canceled\""));

    let output = run(temp.path(), &["project", "list"]);
    assert_ok(&output);
    assert_eq!(stdout(&output).trim(), "demo");
}

#[test]
fn cli_project_create_follows_scripted_keys() {
    let temp = tempdir().expect("tempdir");
    assert_ok(&run(temp.path(), &["init"]));

    let output = run(
        temp.path(),
        &[
            "project",
            "create",
            "scripted",
            "--with",
            "java,java-tests",
            "--keys",
            "right,enter,enter",
        ],
    );
    assert_ok(&output);
    let text = stdout(&output);
    assert!(text.contains("note: `Install Java` has no further pages"));
    assert!(text.contains("state=finished"));

    let output = run(temp.path(), &["project", "create", "scripted", "--with", "java"]);
    assert_err_contains(&output, "project `scripted` already exists");

    let output = run(temp.path(), &["project", "create", "bad", "--keys", "up"]);
    assert_err_contains(&output, "invalid key token `up`");
}

#[test]
fn cli_path_var_preferred_picks_enclosing_variable() {
    let temp = tempdir().expect("tempdir");
    let output = run(
        temp.path(),
        &[
            "path-var",
            "preferred",
            "V1=/work,V2=/work/src/app/lib",
            "/work/src/app/a.txt",
            "/work/src/app/b/c.txt",
        ],
    );
    assert_ok(&output);
    let values = kv_lines(&output);
    assert_eq!(
        values.get("common_root").map(String::as_str),
        Some("/work/src/app")
    );
    assert_eq!(values.get("preferred").map(String::as_str), Some("V1"));
}
