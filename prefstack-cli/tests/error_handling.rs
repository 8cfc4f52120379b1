//! Integration tests for error handling and exit codes.
//!
//! These tests verify that prefstack handles errors correctly and returns
//! appropriate exit codes:
//! - Exit code 0: Success
//! - Exit code 1: Malformed input (parse error, malformed entry, no layers)
//! - Exit code 2: Conflicts detected in strict mode
//! - Exit code 4: Invalid arguments
//! - Exit code 5: I/O error (unreadable layer)
//! - Exit code 7: Configuration error
//!
//! Argument parsing errors are reported by clap, which exits with 2.

mod common;

use common::TestEnv;
use predicates::prelude::*;

// ============================================================================
// Success Cases (Exit Code 0)
// ============================================================================

#[test]
fn test_success_exit_code() {
    let env = TestEnv::new();
    env.standard_layers();

    env.command().args(["resolve", "1.js", "2.js"]).assert().code(0);
    env.command().args(["validate", "1.js", "2.js"]).assert().code(0);
    env.command().args(["explain", "b", "1.js", "2.js"]).assert().code(0);
}

/// Conflicts are only reported unless strict mode is on.
#[test]
fn test_conflicts_without_strict_succeed() {
    let env = TestEnv::new();
    env.standard_layers();

    env.command()
        .args(["resolve", "1.js", "2.js"])
        .assert()
        .code(0)
        .stderr(predicate::str::contains("1 conflict(s):"));
}

// ============================================================================
// Malformed Input (Exit Code 1)
// ============================================================================

#[test]
fn test_parse_error_exit_code() {
    let env = TestEnv::new();
    env.write("bad.js", "user_pref(\"a\", 1);\nuser_pref(\"b\" 2);\n");

    env.command()
        .args(["resolve", "bad.js"])
        .assert()
        .code(1)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("parse error in layer 'bad.js' at line 2"));
}

#[test]
fn test_malformed_entry_exit_code() {
    let env = TestEnv::new();
    env.write("bad.yaml", "entries:\n  - key: a\n    value: 1.5\n");

    env.command()
        .args(["resolve", "bad.yaml"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("malformed entry 'a'"));
}

#[test]
fn test_empty_key_is_malformed() {
    let env = TestEnv::new();
    env.write("bad.json", r#"{"entries": [{"key": "", "value": 1}]}"#);

    env.command()
        .args(["resolve", "bad.json"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("malformed entry"));
}

/// A malformed later layer rejects the whole stack; nothing is printed.
#[test]
fn test_malformed_layer_rejects_whole_stack() {
    let env = TestEnv::new();
    env.write("1.js", common::FIRST);
    env.write("2.yaml", "entries:\n  - key: b\n    value: [1, 2]\n");

    env.command()
        .args(["resolve", "1.js", "2.yaml"])
        .assert()
        .code(1)
        .stdout(predicate::str::is_empty());
}

#[test]
fn test_require_layers_with_no_layers() {
    let env = TestEnv::new();

    env.command()
        .args(["resolve", "--require-layers"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("no preference layers supplied"));
}

#[test]
fn test_require_layers_from_environment() {
    let env = TestEnv::new();

    env.command()
        .env("PREFSTACK_REQUIRE_LAYERS", "true")
        .arg("resolve")
        .assert()
        .code(1);
}

#[test]
fn test_explain_unknown_key_exit_code() {
    let env = TestEnv::new();
    env.standard_layers();

    env.command()
        .args(["explain", "missing", "1.js", "2.js"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Key 'missing' is not set by any layer"));
}

// ============================================================================
// Strict Conflicts (Exit Code 2)
// ============================================================================

#[test]
fn test_strict_conflict_exit_code() {
    let env = TestEnv::new();
    env.standard_layers();

    env.command()
        .args(["resolve", "--strict", "1.js", "2.js"])
        .assert()
        .code(2)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("1 conflicting override(s) detected"))
        // The table still explains what failed
        .stderr(predicate::str::contains("b\t1.js\t2\t2.js\t3"));
}

#[test]
fn test_strict_from_environment() {
    let env = TestEnv::new();
    env.standard_layers();

    env.command()
        .env("PREFSTACK_STRICT", "1")
        .args(["resolve", "1.js", "2.js"])
        .assert()
        .code(2);
}

#[test]
fn test_strict_from_project_config() {
    let env = TestEnv::new();
    env.standard_layers();
    env.write("prefstack.yaml", "strict: true\n");

    env.command()
        .args(["resolve", "1.js", "2.js"])
        .assert()
        .code(2);
}

#[test]
fn test_strict_ignored_conflict_succeeds() {
    let env = TestEnv::new();
    env.standard_layers();

    env.command()
        .args(["resolve", "--strict", "--ignore-conflict", "b", "1.js", "2.js"])
        .assert()
        .code(0)
        .stdout(predicate::str::contains("b = 3"))
        .stderr(predicate::str::contains("ignored"));
}

#[test]
fn test_strict_duplicates_are_not_conflicts() {
    let env = TestEnv::new();
    env.write("1.js", "user_pref(\"a\", 1);\n");
    env.write("2.js", "user_pref(\"a\", 1);\n");

    env.command()
        .args(["resolve", "--strict", "1.js", "2.js"])
        .assert()
        .code(0);
}

#[test]
fn test_strict_revision_parrot_ignored() {
    let env = TestEnv::new();

    env.command()
        .args(["resolve", "--strict", "--ignore-conflict", "_user.js.parrot"])
        .arg(common::revision("01-baseline.js"))
        .arg(common::revision("02-custom.js"))
        .assert()
        .code(2)
        .stderr(predicate::str::contains("3 conflicting override(s) detected"));
}

// ============================================================================
// Invalid Arguments (Exit Code 4, clap errors exit 2)
// ============================================================================

#[test]
fn test_explain_empty_key_exit_code() {
    let env = TestEnv::new();
    env.standard_layers();

    env.command()
        .args(["explain", "", "1.js"])
        .assert()
        .code(4)
        .stderr(predicate::str::contains("Invalid arguments"));
}

#[test]
fn test_unknown_format_rejected_by_parser() {
    let env = TestEnv::new();

    env.command()
        .args(["resolve", "--format", "xml"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("invalid value 'xml'"));
}

#[test]
fn test_validate_requires_layers() {
    let env = TestEnv::new();

    env.command().arg("validate").assert().code(2);
}

// ============================================================================
// I/O Errors (Exit Code 5)
// ============================================================================

#[test]
fn test_missing_layer_exit_code() {
    let env = TestEnv::new();
    env.write("1.js", common::FIRST);

    env.command()
        .args(["resolve", "1.js", "missing.js"])
        .assert()
        .code(5)
        .stderr(predicate::str::contains("cannot read layer missing.js"));
}

#[test]
fn test_validate_missing_layer_exit_code() {
    let env = TestEnv::new();

    env.command()
        .args(["validate", "missing.js"])
        .assert()
        .code(5);
}

// ============================================================================
// Configuration Errors (Exit Code 7)
// ============================================================================

#[test]
fn test_missing_config_file_exit_code() {
    let env = TestEnv::new();

    env.command()
        .args(["--config", "nope.yaml", "resolve"])
        .assert()
        .code(7)
        .stderr(predicate::str::contains("configuration file not found"));
}

#[test]
fn test_invalid_config_file_exit_code() {
    let env = TestEnv::new();
    env.write("custom.yaml", "strict: maybe\n");

    env.command()
        .args(["--config", "custom.yaml", "resolve"])
        .assert()
        .code(7)
        .stderr(predicate::str::contains("Configuration error"));
}

#[test]
fn test_unknown_config_field_exit_code() {
    let env = TestEnv::new();
    env.write("prefstack.yaml", "strictness: true\n");

    env.command().arg("resolve").assert().code(7);
}

#[test]
fn test_invalid_environment_value_exit_code() {
    let env = TestEnv::new();

    env.command()
        .env("PREFSTACK_STRICT", "sometimes")
        .arg("resolve")
        .assert()
        .code(7);
}

#[test]
fn test_config_from_environment_variable() {
    let env = TestEnv::new();
    env.standard_layers();
    env.write("strict.yaml", "strict: true\n");

    env.command()
        .env("PREFSTACK_CONFIG", "strict.yaml")
        .args(["resolve", "1.js", "2.js"])
        .assert()
        .code(2);
}
