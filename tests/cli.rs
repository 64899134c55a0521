//! End-to-end tests for the stimulus_cli binary.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use stimulus_core::persistence::load_table;

fn cli() -> Command {
    let mut cmd = Command::cargo_bin("stimulus_cli").unwrap();
    cmd.env_remove("STIMULUS_CONFIG").env_remove("STIMULUS_FONT").env_remove("RUST_LOG");
    cmd
}

#[test]
fn generate_writes_table() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("letters.json");
    cli()
        .args(["generate", "flanker", "--style", "letter", "--type", "type3", "-o"])
        .arg(&out)
        .assert()
        .success()
        .stdout(predicate::str::contains("Wrote 650 rows"));

    let table = load_table(&out).unwrap();
    assert_eq!(table.columns, ["Title", "Wrong_Option", "Right_Option"]);
    let first = &table.rows[0];
    assert_eq!(first[0].text, "AAAAAA");
    assert_eq!(first[1].text, "AABAA");
    assert_eq!(first[2].text, "BBABB");
}

#[test]
fn generate_with_images_uses_default_folders() {
    let dir = tempfile::tempdir().unwrap();
    cli()
        .current_dir(dir.path())
        .args(["generate", "stroop", "--type", "2", "--render"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Rendered 42 images"));

    assert!(dir
        .path()
        .join("Data-set/Stroop-Letter/stroop_letter_type2_dataset.json")
        .exists());
    let images = dir.path().join("Data-set-Image/Stroop-Letter-image/type2");
    assert_eq!(fs::read_dir(&images).unwrap().count(), 42);
    assert!(images.join("1_Red_Blue_Red.png").exists());
}

#[test]
fn stroop_with_number_style_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    cli()
        .current_dir(dir.path())
        .args(["generate", "stroop", "--style", "number"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid configuration"));
    assert!(!dir.path().join("Data-set").exists());
}

#[test]
fn unknown_task_is_rejected() {
    cli().args(["generate", "simon"]).assert().failure();
}

#[test]
fn render_selected_rows_of_binary_table() {
    let dir = tempfile::tempdir().unwrap();
    let table = dir.path().join("digits.bin");
    let images = dir.path().join("imgs");
    cli()
        .args(["generate", "flanker", "--style", "number", "-o"])
        .arg(&table)
        .assert()
        .success();

    cli()
        .arg("render")
        .arg(&table)
        .arg("--out-dir")
        .arg(&images)
        .args(["--layout", "legacy-square", "--start", "2", "--end", "4"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Rendered 3 images"));

    let mut names: Vec<String> = fs::read_dir(&images)
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    assert_eq!(
        names,
        ["11111_33333_11111.png", "11111_44444_11111.png", "11111_55555_11111.png"]
    );
}

#[test]
fn render_with_missing_column_fails() {
    let dir = tempfile::tempdir().unwrap();
    let table = dir.path().join("set.json");
    cli()
        .args(["generate", "flanker", "--style", "letter", "-o"])
        .arg(&table)
        .assert()
        .success();

    cli()
        .arg("render")
        .arg(&table)
        .arg("--out-dir")
        .arg(dir.path().join("imgs"))
        .args(["--layout", "origin"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Target"));
}

#[test]
fn preview_prints_rows() {
    let dir = tempfile::tempdir().unwrap();
    let table = dir.path().join("set.json");
    cli()
        .args(["generate", "flanker", "--style", "number", "--type", "type1", "-o"])
        .arg(&table)
        .assert()
        .success();

    cli()
        .arg("preview")
        .arg(&table)
        .args(["-n", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("11111\t22222\t11111"))
        .stdout(predicate::str::contains("71 more rows"));
}

#[test]
fn preview_of_missing_table_fails() {
    cli()
        .args(["preview", "/nonexistent/set.json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Missing input"));
}
