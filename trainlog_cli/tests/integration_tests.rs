//! Integration tests for the trainlog binary.
//!
//! Each test feeds a scripted session on stdin and checks stdout:
//! - Draft editing and saving
//! - Listing, deletion and clearing
//! - Favorites, recents and suggestions
//! - Configuration handling

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

/// Helper to create a test config directory
fn setup_test_dir() -> TempDir {
    tempfile::tempdir().expect("Failed to create temp dir")
}

/// Binary pointed at a config path that does not exist, so defaults apply
fn cli(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("trainlog").expect("Failed to find trainlog binary");
    cmd.arg("--config").arg(dir.path().join("config.toml"));
    cmd
}

#[test]
fn test_cli_help() {
    let dir = setup_test_dir();
    cli(&dir)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Workout set logger for a single training session",
        ));
}

#[test]
fn test_save_bench_press() {
    let dir = setup_test_dir();
    cli(&dir)
        .write_stdin("exercise Bench Press\nweight 60\nreps 10\nend +90s\nsave\nrecents\n")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "✓ Set saved: Bench Press  60 kg x 10  1:30",
        ))
        .stdout(predicate::str::contains("  0. Bench Press"));
}

#[test]
fn test_incomplete_draft_not_saved() {
    let dir = setup_test_dir();
    cli(&dir)
        .write_stdin("exercise Plank\nsave\nlist\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Draft incomplete"))
        .stdout(predicate::str::contains("No sets yet"));
}

#[test]
fn test_bodyweight_set_saves_with_zero_weight() {
    let dir = setup_test_dir();
    cli(&dir)
        .write_stdin("exercise Pull-ups\nreps 8\nsave\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Pull-ups  0 kg x 8"));
}

#[test]
fn test_list_is_newest_first_and_json() {
    let dir = setup_test_dir();
    let output = cli(&dir)
        .write_stdin(
            "exercise Squats\nreps 5\nsave\nexercise Deadlift\nreps 3\nsave\nlist --json\n",
        )
        .output()
        .expect("Failed to run trainlog");
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout).unwrap();
    let json_start = stdout.find('[').expect("No JSON array in output");
    let sets: serde_json::Value = serde_json::from_str(&stdout[json_start..]).unwrap();
    let sets = sets.as_array().unwrap();

    assert_eq!(sets.len(), 2);
    assert_eq!(sets[0]["exercise"], "Deadlift");
    assert_eq!(sets[1]["exercise"], "Squats");
    assert_eq!(sets[1]["reps"], 5);
}

#[test]
fn test_delete_against_original_positions() {
    let dir = setup_test_dir();
    cli(&dir)
        .write_stdin(
            "exercise C\nreps 1\nsave\n\
             exercise B\nreps 1\nsave\n\
             exercise A\nreps 1\nsave\n\
             delete 0 2\nlist\n",
        )
        .assert()
        .success()
        .stdout(predicate::str::contains("✓ Deleted 2 set(s)"))
        .stdout(predicate::str::contains("  0. B  0 kg x 1"))
        .stdout(predicate::str::contains("1 set(s), 1 reps"));
}

#[test]
fn test_stale_delete_reports_error() {
    let dir = setup_test_dir();
    cli(&dir)
        .write_stdin("exercise A\nreps 1\nsave\ndelete 0 1\nlist\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("error: Index 1 out of range (length 1)"))
        .stdout(predicate::str::contains("  0. A"));
}

#[test]
fn test_clear() {
    let dir = setup_test_dir();
    cli(&dir)
        .write_stdin("exercise A\nreps 1\nsave\nclear\nlist\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("✓ Session cleared"))
        .stdout(predicate::str::contains("No sets yet"));
}

#[test]
fn test_end_before_start_is_clamped() {
    let dir = setup_test_dir();
    cli(&dir)
        .write_stdin("start 2025-09-06T10:00:00Z\nend 2025-09-06T09:00:00Z\ndraft\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("end time moved up to the start time"))
        .stdout(predicate::str::contains("10:00:00 - 10:00:00 (0:00)"));
}

#[test]
fn test_suggest_filters_case_insensitively() {
    let dir = setup_test_dir();
    cli(&dir)
        .write_stdin("exercise PRESS\nsuggest\n")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "suggestions: Bench Press, Leg Press, Overhead Press",
        ));
}

#[test]
fn test_suggestions_appear_after_pause() {
    let dir = setup_test_dir();
    cli(&dir)
        .arg("--quiet-ms")
        .arg("20")
        .write_stdin("exercise lunge\nwait 100\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("suggestions: Lunges"));
}

#[test]
fn test_favorites_management() {
    let dir = setup_test_dir();
    cli(&dir)
        .write_stdin("fav add Snatch\nfav add snatch\nfav rm 0\nfav rm 42\nfav list\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("✓ Added favorite: Snatch"))
        .stdout(predicate::str::contains("Already a favorite: snatch"))
        .stdout(predicate::str::contains("✓ Removed favorite: Barbell Curl"))
        .stdout(predicate::str::contains("error: Index 42 out of range"))
        .stdout(predicate::str::contains("Snatch"));
}

#[test]
fn test_recents_bounded_to_five() {
    let dir = setup_test_dir();
    let mut script = String::new();
    for name in ["A", "B", "C", "D", "E", "F"] {
        script.push_str(&format!("exercise {}\nreps 1\nsave\n", name));
    }
    script.push_str("recents\n");

    cli(&dir)
        .write_stdin(script)
        .assert()
        .success()
        .stdout(predicate::str::contains("  0. F"))
        .stdout(predicate::str::contains("  4. B"))
        .stdout(predicate::str::contains("  5. ").not());
}

#[test]
fn test_config_file_is_used() {
    let dir = setup_test_dir();
    fs::write(
        dir.path().join("config.toml"),
        "[catalog]\nfavorites = [\"Clean and Jerk\", \"Snatch\"]\n\n[limits]\nweight_max = 100\n",
    )
    .unwrap();

    cli(&dir)
        .write_stdin("fav list\nweight 250\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("  0. Clean and Jerk"))
        .stdout(predicate::str::contains("  1. Snatch"))
        .stdout(predicate::str::contains("weight: 100 kg"));
}

#[test]
fn test_invalid_config_fails() {
    let dir = setup_test_dir();
    fs::write(dir.path().join("config.toml"), "[catalog]\nmax_recents = 0\n").unwrap();

    cli(&dir)
        .write_stdin("list\n")
        .assert()
        .failure();
}

#[test]
fn test_init_config_writes_defaults() {
    let dir = setup_test_dir();
    cli(&dir)
        .arg("--init-config")
        .assert()
        .success()
        .stdout(predicate::str::contains("Wrote default config"));

    let contents = fs::read_to_string(dir.path().join("config.toml")).unwrap();
    assert!(contents.contains("quiet_period_ms = 300"));
    assert!(contents.contains("Bench Press"));
}
