use std::{fs, path::PathBuf};

use assert_cmd::{Command, cargo::cargo_bin_cmd};
use uni_results::Plan;
use uuid::Uuid;

fn command() -> Command {
    let mut cmd = cargo_bin_cmd!("uni-results");
    cmd.env("CLICOLOR", "0")
        .env("NO_COLOR", "1")
        .env_remove("UNI_RESULTS_PLAN")
        .env_remove("UNI_RESULTS_TARGETS")
        .env_remove("UNI_RESULTS_TOTAL_CREDITS")
        .env_remove("UNI_RESULTS_LOG");
    cmd
}

fn run(args: &[&str]) -> (bool, String, String) {
    let output = command().args(args).output().expect("failed to run command");
    (
        output.status.success(),
        String::from_utf8_lossy(&output.stdout).to_string(),
        String::from_utf8_lossy(&output.stderr).to_string(),
    )
}

fn temp_plan(json: &str) -> (PathBuf, PathBuf) {
    let root = std::env::temp_dir().join(format!("uni-results-cli-{}", Uuid::new_v4()));
    fs::create_dir_all(&root).expect("create temp root");
    let path = root.join("plan.json");
    fs::write(&path, json).expect("write plan");
    (root, path)
}

#[test]
fn summary_of_default_plan() {
    let (ok, stdout, _) = run(&["summary"]);
    assert!(ok);
    insta::assert_snapshot!("summary_default_stdout", stdout);
}

#[test]
fn summary_with_completed_final_year() {
    // a 75 credit module at the year's existing average leaves the RWA alone
    let (ok, stdout, _) = run(&["summary", "--module", "3:81:75"]);
    assert!(ok);
    assert!(stdout.starts_with("Current Running Weighted Average (RWA): 79.10"));
    assert_eq!(stdout.matches("Already achieved").count(), 2);
    assert!(stdout.contains("      80% |                      - | Impossible"));
}

#[test]
fn summary_targets_can_be_overridden() {
    let (ok, stdout, _) = run(&["summary", "-t", "65", "-t", "72.5"]);
    assert!(ok);
    assert!(stdout.contains("      65% |"));
    assert!(stdout.contains("    72.5% |"));
    assert!(!stdout.contains("      80% |"));
}

#[test]
fn required_prints_a_single_answer() {
    let (ok, stdout, _) = run(&["required", "75"]);
    assert!(ok);
    assert_eq!(stdout.trim(), "75% needs 70.07% on the remaining credits");
}

#[test]
fn required_reports_unreachable_targets() {
    let (ok, stdout, _) = run(&["required", "95"]);
    assert!(ok);
    assert!(stdout.contains("out of reach"));
}

#[test]
fn plan_command_prints_the_default_plan() {
    let (ok, stdout, _) = run(&["plan"]);
    assert!(ok);
    let plan = Plan::from_json(&stdout).expect("parse printed plan");
    assert_eq!(plan, Plan::default());
}

#[test]
fn plan_files_drive_the_reports() {
    let (root, path) = temp_plan(
        r#"{
            "weightings": { "1": 1.0 },
            "total_credits": { "1": 120 },
            "modules": { "1": [ { "grade": 80, "credits": 60 } ] },
            "targets": [85]
        }"#,
    );

    let (ok, stdout, _) = run(&["summary", "--plan", path.to_str().unwrap()]);
    assert!(ok);
    assert!(stdout.contains("Current Running Weighted Average (RWA): 80.00"));
    assert!(stdout.contains("      85% |                 90.00% | Required"));

    let (ok, stdout, _) = run(&["breakdown", "--plan", path.to_str().unwrap()]);
    assert!(ok);
    assert!(stdout.contains("60 / 120"));
    assert!(stdout.contains("First Class"));

    let (ok, stdout, _) = run(&["outlook", "--plan", path.to_str().unwrap()]);
    assert!(ok);
    assert!(stdout.contains("Very Hard"));

    let _ = fs::remove_dir_all(root);
}

#[test]
fn plan_from_environment_is_used() {
    let (root, path) = temp_plan(
        r#"{ "weightings": { "1": 1.0 }, "modules": { "1": [ { "grade": 64 } ] } }"#,
    );

    let output = command()
        .env("UNI_RESULTS_PLAN", &path)
        .env("UNI_RESULTS_TARGETS", "60")
        .arg("summary")
        .output()
        .expect("failed to run command");
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(output.status.success());
    assert!(stdout.contains("RWA): 64.00"));
    assert!(stdout.contains("      60% |"));

    let _ = fs::remove_dir_all(root);
}

#[test]
fn bad_module_is_rejected() {
    let (ok, _, stderr) = run(&["summary", "--module", "3-90"]);
    assert!(!ok);
    assert!(stderr.contains("YEAR:GRADE[:CREDITS]"));
}

#[test]
fn missing_plan_file_fails() {
    let (ok, _, stderr) = run(&["summary", "--plan", "/definitely/not/here.json"]);
    assert!(!ok);
    assert!(stderr.contains("Could not read plan"));
}

#[test]
fn modules_lists_each_year() {
    let (ok, stdout, _) = run(&["modules"]);
    assert!(ok);
    assert!(stdout.contains("Year 2: 7 modules"));
    assert!(stdout.contains("Year 3: 3 modules"));
    assert!(stdout.contains("2:1"));

    let (ok, stdout, _) = run(&["modules", "--year", "3", "--module", "3:55"]);
    assert!(ok);
    assert!(stdout.contains("Year 3: 4 modules"));
    assert!(stdout.contains("2:2"));
    assert!(!stdout.contains("Year 2"));
}

#[test]
fn reports_can_be_printed_as_json() {
    let (ok, stdout, _) = run(&["breakdown", "--json"]);
    assert!(ok);
    let rows: serde_json::Value = serde_json::from_str(&stdout).expect("parse breakdown json");
    assert_eq!(rows[0]["year"], 2);
    assert_eq!(rows[1]["average"], "81.00%");

    let (ok, stdout, _) = run(&["outlook", "--json", "-t", "80"]);
    assert!(ok);
    let rows: serde_json::Value = serde_json::from_str(&stdout).expect("parse outlook json");
    assert_eq!(rows[0]["difficulty"], "hard");

    let (ok, stdout, _) = run(&["modules", "--json", "-y", "3"]);
    assert!(ok);
    let years: serde_json::Value = serde_json::from_str(&stdout).expect("parse modules json");
    assert_eq!(years["3"][1]["grade"], "94%");
    assert_eq!(years["3"][1]["class"], "1st");
}
