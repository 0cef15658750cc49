//! Integration tests for wp-progress
//!
//! These tests drive the binary end to end through its subcommands.

use assert_cmd::Command;
use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

/// Helper to create a wp-progress Command with a clean environment
fn wp_progress() -> Command {
    let mut cmd = cargo_bin_cmd!("wp-progress");
    cmd.env_remove("PROGRESS_MODE")
        .env_remove("PROGRESS_HOURS_PER_DAY")
        .env_remove("PROGRESS_LOG_FORMAT");
    cmd
}

/// Helper to create a temporary project directory
fn create_temp_project() -> TempDir {
    TempDir::new().unwrap()
}

/// Helper to initialize a project in a temp directory
fn init_project(dir: &TempDir) {
    wp_progress()
        .current_dir(dir.path())
        .arg("init")
        .assert()
        .success();
}

/// Helper to write a JSON input file into the temp directory
fn write_input(dir: &TempDir, name: &str, content: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, content).unwrap();
    path
}

// =============================================================================
// Basic CLI Tests
// =============================================================================

mod cli_basics {
    use super::*;

    #[test]
    fn test_help() {
        wp_progress()
            .arg("--help")
            .assert()
            .success()
            .stdout(predicate::str::contains("percent"))
            .stdout(predicate::str::contains("rollup"));
    }

    #[test]
    fn test_version() {
        wp_progress().arg("--version").assert().success();
    }

    #[test]
    fn test_init_creates_structure() {
        let dir = create_temp_project();

        wp_progress()
            .current_dir(dir.path())
            .arg("init")
            .assert()
            .success()
            .stdout(predicate::str::contains("Initialized progress configuration"));

        assert!(dir.path().join(".progress/progress.toml").is_file());
    }

    #[test]
    fn test_init_twice_reports_existing() {
        let dir = create_temp_project();
        init_project(&dir);

        wp_progress()
            .current_dir(dir.path())
            .arg("init")
            .assert()
            .success()
            .stdout(predicate::str::contains("already initialized"));
    }

    #[test]
    fn test_unknown_subcommand_fails() {
        wp_progress().arg("frobnicate").assert().failure();
    }
}

// =============================================================================
// Single Value Conversions
// =============================================================================

mod conversions {
    use super::*;

    #[test]
    fn test_percent_from_work_and_remaining() {
        wp_progress()
            .args(["percent", "--work", "8", "--remaining", "2"])
            .assert()
            .success()
            .stdout("75%\n");
    }

    #[test]
    fn test_percent_never_rounds_up_to_zero_or_hundred() {
        wp_progress()
            .args(["percent", "--work", "100", "--remaining", "99.6"])
            .assert()
            .success()
            .stdout("1%\n");

        wp_progress()
            .args(["percent", "--work", "100", "--remaining", "0.4"])
            .assert()
            .success()
            .stdout("99%\n");
    }

    #[test]
    fn test_percent_accepts_duration_text() {
        wp_progress()
            .args(["percent", "--work", "1d 4h", "--remaining", "3h"])
            .assert()
            .success()
            .stdout("75%\n");
    }

    #[test]
    fn test_percent_with_zero_work_fails() {
        wp_progress()
            .args(["percent", "--work", "0", "--remaining", "0"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("division by zero"));
    }

    #[test]
    fn test_percent_rejects_invalid_hours() {
        wp_progress()
            .args(["percent", "--work", "lots", "--remaining", "2"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("Invalid hours 'lots'"));
    }

    #[test]
    fn test_remaining_from_work_and_percent() {
        wp_progress()
            .args(["remaining", "--work", "8", "--percent", "75"])
            .assert()
            .success()
            .stdout("2h\n");
    }

    #[test]
    fn test_remaining_rejects_percent_out_of_range() {
        wp_progress()
            .args(["remaining", "--work", "8", "--percent", "-5"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("between 0 and 100"));
    }

    #[test]
    fn test_work_from_remaining_and_percent() {
        wp_progress()
            .args(["work", "--remaining", "2", "--percent", "75"])
            .assert()
            .success()
            .stdout("8h\n");
    }

    #[test]
    fn test_work_with_percent_100_fails() {
        wp_progress()
            .args(["work", "--remaining", "2", "--percent", "100"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("Cannot derive work"));
    }

    #[test]
    fn test_remaining_with_decimal_max_work() {
        wp_progress()
            .args([
                "remaining",
                "--work",
                "79228162514264337593543950335",
                "--percent",
                "0",
            ])
            .assert()
            .success()
            .stdout("79228162514264337593543950335h\n");

        wp_progress()
            .args([
                "remaining",
                "--work",
                "79228162514264337593543950335",
                "--percent",
                "50",
            ])
            .assert()
            .success();
    }

    #[test]
    fn test_work_too_large_fails_cleanly() {
        wp_progress()
            .args([
                "work",
                "--remaining",
                "79228162514264337593543950335",
                "--percent",
                "50",
            ])
            .assert()
            .failure()
            .code(1)
            .stderr(predicate::str::contains("result out of range"));
    }

    #[test]
    fn test_percent_json_output() {
        wp_progress()
            .args(["--json", "percent", "--work", "10", "--remaining", "4"])
            .assert()
            .success()
            .stdout(predicate::str::contains("\"percent_complete\": 60"));
    }
}

// =============================================================================
// Consistency Checks
// =============================================================================

mod check {
    use super::*;

    #[test]
    fn test_check_consistent_values() {
        wp_progress()
            .args(["check", "--work", "10", "--remaining", "4", "--percent", "60"])
            .assert()
            .success()
            .stdout(predicate::str::contains("Mode: work_based"))
            .stdout(predicate::str::contains("consistent"));
    }

    #[test]
    fn test_check_reports_remaining_exceeding_work() {
        wp_progress()
            .args(["check", "--work", "4", "--remaining", "10"])
            .assert()
            .success()
            .stdout(predicate::str::contains("cannot be greater than work"));
    }

    #[test]
    fn test_check_reports_correctable_remaining_work() {
        wp_progress()
            .args(["check", "--work", "10", "--remaining", "3", "--percent", "100"])
            .assert()
            .success()
            .stdout(predicate::str::contains("Remaining work correctable:  yes"))
            .stdout(predicate::str::contains("must be 0 when % complete is 100"));
    }

    #[test]
    fn test_check_json_lists_errors() {
        wp_progress()
            .args(["--json", "check", "--remaining", "3"])
            .assert()
            .success()
            .stdout(predicate::str::contains("\"field\": \"work\""))
            .stdout(predicate::str::contains("\"calculation_applicable\": false"));
    }

    #[test]
    fn test_check_without_values() {
        wp_progress()
            .arg("check")
            .assert()
            .success()
            .stdout(predicate::str::contains("No progress values given."))
            .stdout(predicate::str::contains("consistent"));
    }

    #[test]
    fn test_check_status_based_mode_flag() {
        wp_progress()
            .args(["--mode", "status_based", "check", "--work", "4", "--remaining", "10"])
            .assert()
            .success()
            .stdout(predicate::str::contains("Mode: status_based"));
    }
}

// =============================================================================
// Derivation
// =============================================================================

mod derive {
    use super::*;

    #[test]
    fn test_derive_work_change_shifts_remaining() {
        let dir = create_temp_project();
        let input = write_input(
            &dir,
            "change.json",
            r#"{
  "previous": {"work": 10, "remaining_work": 4, "percent_complete": 60},
  "change": {"work": 12}
}"#,
        );

        wp_progress()
            .current_dir(dir.path())
            .arg("derive")
            .arg(&input)
            .assert()
            .success()
            .stdout(predicate::str::contains("6h"))
            .stdout(predicate::str::contains("50%"))
            .stdout(predicate::str::contains("derived"));
    }

    #[test]
    fn test_derive_json_output() {
        let dir = create_temp_project();
        let input = write_input(
            &dir,
            "change.json",
            r#"{"previous": {}, "change": {"work": 8, "remaining_work": 2}}"#,
        );

        wp_progress()
            .current_dir(dir.path())
            .arg("--json")
            .arg("derive")
            .arg(&input)
            .assert()
            .success()
            .stdout(predicate::str::contains("\"percent_complete\": 75"))
            .stdout(predicate::str::contains("\"errors\": []"));
    }

    #[test]
    fn test_derive_status_based_uses_status_ratio() {
        let dir = create_temp_project();
        let input = write_input(
            &dir,
            "change.json",
            r#"{"previous": {"work": 10}, "change": {}, "status": "In progress"}"#,
        );

        wp_progress()
            .current_dir(dir.path())
            .args(["--mode", "status_based", "--json", "derive"])
            .arg(&input)
            .assert()
            .success()
            .stdout(predicate::str::contains("\"percent_complete\": 50"))
            .stdout(predicate::str::contains("\"remaining_work\": \"5\""));
    }

    #[test]
    fn test_derive_unknown_status_fails() {
        let dir = create_temp_project();
        let input = write_input(
            &dir,
            "change.json",
            r#"{"previous": {"work": 10}, "change": {}, "status": "Blocked"}"#,
        );

        wp_progress()
            .current_dir(dir.path())
            .args(["--mode", "status_based", "derive"])
            .arg(&input)
            .assert()
            .failure()
            .stderr(predicate::str::contains("Unknown status 'Blocked'"));
    }

    #[test]
    fn test_derive_status_based_rejects_percent_edit() {
        let dir = create_temp_project();
        let input = write_input(
            &dir,
            "change.json",
            r#"{"previous": {"work": 10}, "change": {"percent_complete": 30}, "status": "New"}"#,
        );

        wp_progress()
            .current_dir(dir.path())
            .args(["--mode", "status_based", "derive"])
            .arg(&input)
            .assert()
            .failure()
            .stderr(predicate::str::contains("cannot be set in status_based mode"));
    }

    #[test]
    fn test_derive_missing_file_fails() {
        let dir = create_temp_project();

        wp_progress()
            .current_dir(dir.path())
            .args(["derive", "missing.json"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("Failed to read input file"));
    }
}

// =============================================================================
// Hierarchy Totals
// =============================================================================

mod rollup {
    use super::*;

    const HIERARCHY: &str = r#"{
  "id": 1,
  "subject": "Release",
  "work": 10,
  "remaining_work": 5,
  "children": [
    {"id": 2, "subject": "Backend", "work": 6, "remaining_work": 5},
    {"id": 3, "subject": "Dropped", "work": 100, "remaining_work": 100, "status": "Rejected"}
  ]
}"#;

    #[test]
    fn test_rollup_text_output() {
        let dir = create_temp_project();
        let input = write_input(&dir, "tree.json", HIERARCHY);

        wp_progress()
            .current_dir(dir.path())
            .arg("rollup")
            .arg(&input)
            .assert()
            .success()
            .stdout(predicate::str::contains(
                "#1 Release  work 16h  remaining 10h  38%",
            ))
            .stdout(predicate::str::contains("  #2 Backend  work 6h  remaining 5h  17%"));
    }

    #[test]
    fn test_rollup_json_output() {
        let dir = create_temp_project();
        let input = write_input(&dir, "tree.json", HIERARCHY);

        wp_progress()
            .current_dir(dir.path())
            .arg("--json")
            .arg("rollup")
            .arg(&input)
            .assert()
            .success()
            .stdout(predicate::str::contains("\"total_work\": \"16\""))
            .stdout(predicate::str::contains("\"total_percent_complete\": 38"));
    }

    #[test]
    fn test_rollup_remaining_above_work_has_no_percent() {
        let dir = create_temp_project();
        let input = write_input(
            &dir,
            "tree.json",
            r#"{"id": 1, "children": [
                {"id": 2, "work": 10, "remaining_work": 2},
                {"id": 3, "remaining_work": 20}
            ]}"#,
        );

        wp_progress()
            .current_dir(dir.path())
            .arg("--json")
            .arg("rollup")
            .arg(&input)
            .assert()
            .success()
            .stdout(predicate::str::contains("\"total_remaining_work\": \"22\""))
            .stdout(predicate::str::contains("\"total_percent_complete\": null"))
            .stdout(predicate::str::contains("-120").not());
    }

    #[test]
    fn test_rollup_duplicate_id_fails() {
        let dir = create_temp_project();
        let input = write_input(
            &dir,
            "tree.json",
            r#"{"id": 1, "children": [{"id": 1}]}"#,
        );

        wp_progress()
            .current_dir(dir.path())
            .arg("rollup")
            .arg(&input)
            .assert()
            .failure()
            .stderr(predicate::str::contains("appears more than once"));
    }
}

// =============================================================================
// Durations
// =============================================================================

mod duration {
    use super::*;

    #[test]
    fn test_duration_parse() {
        wp_progress()
            .args(["duration", "parse", "1d 4h"])
            .assert()
            .success()
            .stdout("12\n");
    }

    #[test]
    fn test_duration_parse_respects_hours_per_day_env() {
        wp_progress()
            .env("PROGRESS_HOURS_PER_DAY", "6")
            .args(["duration", "parse", "2d"])
            .assert()
            .success()
            .stdout("12\n");
    }

    #[test]
    fn test_duration_parse_unknown_unit_fails() {
        wp_progress()
            .args(["duration", "parse", "3 fortnights"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("Unknown duration unit"));
    }

    #[test]
    fn test_duration_parse_too_large_fails_cleanly() {
        wp_progress()
            .args(["duration", "parse", "79228162514264337593543950335w"])
            .assert()
            .failure()
            .code(1)
            .stderr(predicate::str::contains("is too large"));
    }

    #[test]
    fn test_duration_format_days_and_hours() {
        let dir = create_temp_project();
        init_project(&dir);
        fs::write(
            dir.path().join(".progress/progress.toml"),
            "[duration]\nformat = \"days_and_hours\"\n",
        )
        .unwrap();

        wp_progress()
            .current_dir(dir.path())
            .args(["duration", "format", "10"])
            .assert()
            .success()
            .stdout("1d 2h\n");
    }
}

// =============================================================================
// Configuration Tests
// =============================================================================

mod configuration {
    use super::*;

    #[test]
    fn test_config_show_defaults() {
        let dir = create_temp_project();

        wp_progress()
            .current_dir(dir.path())
            .arg("config")
            .arg("show")
            .assert()
            .success()
            .stdout(predicate::str::contains("Using default configuration"))
            .stdout(predicate::str::contains("Rejected"));
    }

    #[test]
    fn test_config_init_creates_toml() {
        let dir = create_temp_project();

        wp_progress()
            .current_dir(dir.path())
            .arg("config")
            .arg("init")
            .assert()
            .success()
            .stdout(predicate::str::contains("Created"));

        assert!(dir.path().join(".progress/progress.toml").exists());
    }

    #[test]
    fn test_config_validate_no_config() {
        let dir = create_temp_project();

        wp_progress()
            .current_dir(dir.path())
            .arg("config")
            .arg("validate")
            .assert()
            .success()
            .stdout(predicate::str::contains("Using defaults (valid)"));
    }

    #[test]
    fn test_config_validate_after_init() {
        let dir = create_temp_project();
        init_project(&dir);

        wp_progress()
            .current_dir(dir.path())
            .arg("config")
            .arg("validate")
            .assert()
            .success()
            .stdout(predicate::str::contains("Configuration is valid"));
    }

    #[test]
    fn test_config_mode_from_file() {
        let dir = create_temp_project();
        init_project(&dir);
        fs::write(
            dir.path().join(".progress/progress.toml"),
            "[calculation]\nmode = \"status_based\"\n",
        )
        .unwrap();

        wp_progress()
            .current_dir(dir.path())
            .args(["check", "--work", "1"])
            .assert()
            .success()
            .stdout(predicate::str::contains("Mode: status_based"));
    }

    #[test]
    fn test_invalid_config_fails() {
        let dir = create_temp_project();
        init_project(&dir);
        fs::write(
            dir.path().join(".progress/progress.toml"),
            "[calculation]\nmode = \"guesswork\"\n",
        )
        .unwrap();

        wp_progress()
            .current_dir(dir.path())
            .args(["check", "--work", "1"])
            .assert()
            .failure();
    }
}

// =============================================================================
// Global CLI Flag Tests
// =============================================================================

mod global_flags {
    use super::*;

    #[test]
    fn test_project_dir_flag() {
        let dir = create_temp_project();
        let other_dir = create_temp_project();
        init_project(&dir);
        fs::write(
            dir.path().join(".progress/progress.toml"),
            "[calculation]\nmode = \"status_based\"\n",
        )
        .unwrap();

        wp_progress()
            .current_dir(other_dir.path())
            .arg("--project-dir")
            .arg(dir.path())
            .args(["check", "--work", "1"])
            .assert()
            .success()
            .stdout(predicate::str::contains("Mode: status_based"));
    }

    #[test]
    fn test_mode_env_overrides_file() {
        let dir = create_temp_project();

        wp_progress()
            .current_dir(dir.path())
            .env("PROGRESS_MODE", "status")
            .args(["check", "--work", "1"])
            .assert()
            .success()
            .stdout(predicate::str::contains("Mode: status_based"));
    }

    #[test]
    fn test_invalid_mode_flag_fails() {
        wp_progress()
            .args(["--mode", "guesswork", "check"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("Invalid progress mode"));
    }

    #[test]
    fn test_verbose_flag() {
        wp_progress()
            .args(["--verbose", "percent", "--work", "8", "--remaining", "2"])
            .assert()
            .success()
            .stdout("75%\n");
    }
}
