//! Integration tests for the cppfmt CLI

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

/// cppfmt running inside `dir`, isolated from the developer's own config
fn cppfmt(dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("cppfmt").unwrap();
    cmd.current_dir(dir)
        .env("HOME", dir)
        .env_remove("RUST_LOG")
        .env_remove("CPPFMT_FORMATTER")
        .env_remove("CPPFMT_EXTENSIONS")
        .env_remove("CPPFMT_JOBS")
        .env_remove("CPPFMT_DRY_RUN");
    cmd
}

fn touch(root: &Path, relative: &str) {
    let path = root.join(relative);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, "int  main( ){return 0;}\n").unwrap();
}

/// `a` holds two sources, `b` holds one
fn source_tree() -> TempDir {
    let temp_dir = TempDir::new().unwrap();
    touch(temp_dir.path(), "a/one.cpp");
    touch(temp_dir.path(), "a/nested/two.hpp");
    touch(temp_dir.path(), "a/CMakeLists.txt");
    touch(temp_dir.path(), "b/three.cpp");
    touch(temp_dir.path(), "b/legacy.h");
    temp_dir
}

fn stdout_lines(output: &std::process::Output) -> Vec<String> {
    String::from_utf8_lossy(&output.stdout)
        .lines()
        .map(str::to_string)
        .collect()
}

/// Test CLI binary exists and responds to --help
#[test]
fn test_cli_help() {
    let temp_dir = TempDir::new().unwrap();
    cppfmt(temp_dir.path())
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("clang-format"))
        .stdout(predicate::str::contains("--dry-run"));
}

/// Test CLI responds to --version
#[test]
fn test_cli_version() {
    let temp_dir = TempDir::new().unwrap();
    cppfmt(temp_dir.path())
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("cppfmt"));
}

#[test]
fn test_directories_are_required() {
    let temp_dir = TempDir::new().unwrap();
    cppfmt(temp_dir.path())
        .arg("--dry-run")
        .assert()
        .code(2)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("DIRECTORY"));
}

#[test]
fn test_dry_run_lists_files_in_directory_order() {
    let temp_dir = source_tree();

    let output = cppfmt(temp_dir.path())
        .args(["--dry-run", "a", "b"])
        .output()
        .unwrap();

    assert!(output.status.success());
    let mut lines = stdout_lines(&output);
    assert_eq!(lines.len(), 3);
    assert_eq!(lines.pop().unwrap(), "Would format: b/three.cpp");
    lines.sort();
    assert_eq!(
        lines,
        vec!["Would format: a/nested/two.hpp", "Would format: a/one.cpp"]
    );
}

#[test]
fn test_dry_run_is_repeatable_and_does_not_modify_files() {
    let temp_dir = source_tree();
    let before = fs::read(temp_dir.path().join("a/one.cpp")).unwrap();

    let first = cppfmt(temp_dir.path())
        .args(["--dry-run", "a", "b"])
        .output()
        .unwrap();
    let second = cppfmt(temp_dir.path())
        .args(["--dry-run", "a", "b"])
        .output()
        .unwrap();

    assert_eq!(first.stdout, second.stdout);
    assert_eq!(fs::read(temp_dir.path().join("a/one.cpp")).unwrap(), before);
}

#[test]
fn test_file_argument_is_skipped_with_warning() {
    let temp_dir = source_tree();

    cppfmt(temp_dir.path())
        .args(["--dry-run", "a/one.cpp", "missing"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("not a directory"));
}

#[test]
fn test_quiet_suppresses_warnings() {
    let temp_dir = source_tree();

    cppfmt(temp_dir.path())
        .args(["-q", "--dry-run", "a/one.cpp", "b"])
        .assert()
        .success()
        .stdout("Would format: b/three.cpp\n")
        .stderr(predicate::str::is_empty());
}

#[test]
fn test_extension_override() {
    let temp_dir = source_tree();

    cppfmt(temp_dir.path())
        .args(["--dry-run", "-e", ".h", "b"])
        .assert()
        .success()
        .stdout("Would format: b/legacy.h\n");
}

#[test]
fn test_repository_config_file() {
    let temp_dir = source_tree();
    touch(temp_dir.path(), "b/widget.cc");
    fs::write(temp_dir.path().join("cppfmt.toml"), "extensions = [\".cc\"]\n").unwrap();

    cppfmt(temp_dir.path())
        .args(["--dry-run", "b"])
        .assert()
        .success()
        .stdout("Would format: b/widget.cc\n");
}

#[test]
fn test_invalid_config_is_fatal() {
    let temp_dir = source_tree();
    fs::write(temp_dir.path().join("cppfmt.toml"), "extensions = []\n").unwrap();

    cppfmt(temp_dir.path())
        .args(["--dry-run", "b"])
        .assert()
        .failure()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("extension"));
}

#[test]
fn test_missing_formatter_fails_without_output() {
    let temp_dir = source_tree();

    cppfmt(temp_dir.path())
        .args(["--formatter", "definitely-not-a-real-formatter-binary", "a", "b"])
        .assert()
        .code(1)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("not found on PATH"));
}

#[test]
fn test_formatter_from_environment() {
    let temp_dir = source_tree();

    cppfmt(temp_dir.path())
        .env("CPPFMT_FORMATTER", "definitely-not-a-real-formatter-binary")
        .args(["a"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("definitely-not-a-real-formatter-binary"));
}

#[cfg(unix)]
mod with_stub_formatter {
    use super::*;
    use std::os::unix::fs::PermissionsExt;

    /// Records every file it is asked to format; fails on `bad.cpp`
    fn install_stub(dir: &Path) -> String {
        let script = dir.join("fake-clang-format");
        let log = dir.join("calls.log");
        let body = format!(
            "#!/bin/sh\n[ \"$1\" = \"-i\" ] || exit 64\n[ \"$3\" = \"--style=file\" ] || exit 64\n\
             echo \"$2\" >> '{}'\ncase \"$2\" in\n  *bad.cpp) echo \"cannot format $2\" >&2; exit 1 ;;\nesac\n",
            log.display()
        );
        fs::write(&script, body).unwrap();
        fs::set_permissions(&script, fs::Permissions::from_mode(0o755)).unwrap();
        script.display().to_string()
    }

    fn calls(dir: &Path) -> Vec<String> {
        let mut calls: Vec<String> = fs::read_to_string(dir.join("calls.log"))
            .unwrap_or_default()
            .lines()
            .map(str::to_string)
            .collect();
        calls.sort();
        calls
    }

    #[test]
    fn test_formats_every_file_once() {
        let temp_dir = source_tree();
        let stub = install_stub(temp_dir.path());

        let output = cppfmt(temp_dir.path())
            .args(["--formatter", &stub, "-j", "2", "a", "b"])
            .output()
            .unwrap();

        assert!(output.status.success());
        let lines = stdout_lines(&output);
        assert_eq!(lines.len(), 3);
        assert!(lines.iter().all(|line| line.starts_with("Formatted: a/") || line == "Formatted: b/three.cpp"));
        assert_eq!(lines[2], "Formatted: b/three.cpp");
        assert_eq!(
            calls(temp_dir.path()),
            vec!["a/nested/two.hpp", "a/one.cpp", "b/three.cpp"]
        );
    }

    #[test]
    fn test_dry_run_never_invokes_formatter() {
        let temp_dir = source_tree();
        let stub = install_stub(temp_dir.path());

        cppfmt(temp_dir.path())
            .args(["--dry-run", "--formatter", &stub, "a", "b"])
            .assert()
            .success();

        assert!(calls(temp_dir.path()).is_empty());
    }

    #[test]
    fn test_failure_in_one_directory_prints_nothing() {
        let temp_dir = source_tree();
        touch(temp_dir.path(), "b/bad.cpp");
        let stub = install_stub(temp_dir.path());

        cppfmt(temp_dir.path())
            .args(["--formatter", &stub, "a", "b"])
            .assert()
            .code(1)
            .stdout(predicate::str::is_empty())
            .stderr(predicate::str::contains("cannot format b/bad.cpp"))
            .stderr(predicate::str::contains("failed on b/bad.cpp"));
    }
}
