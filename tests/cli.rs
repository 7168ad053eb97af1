use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn cmd(dir: &Path) -> Command {
    let mut c = Command::cargo_bin("rawdump").unwrap();
    c.current_dir(dir);
    c
}

fn rule() -> String {
    "=".repeat(60)
}

#[test]
fn test_default_run_skips_node_modules() {
    let root = TempDir::new().unwrap();
    fs::create_dir(root.path().join("src")).unwrap();
    fs::create_dir(root.path().join("node_modules")).unwrap();
    fs::write(root.path().join("src/battle-screen.tsx"), "hello").unwrap();
    fs::write(root.path().join("node_modules/battle-screen.tsx"), "ignored").unwrap();

    cmd(root.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Processed: ./src/battle-screen.tsx"))
        .stdout(predicate::str::contains(
            "File extraction completed. Check raw.txt for results.",
        ))
        .stdout(predicate::str::contains("node_modules").not());

    let output = fs::read_to_string(root.path().join("raw.txt")).unwrap();
    assert_eq!(
        output,
        format!("{r}\nFILE: ./src/battle-screen.tsx\n{r}\n\nhello\n\n", r = rule())
    );
}

#[test]
fn test_unreadable_file_is_recorded_and_run_succeeds() {
    let root = TempDir::new().unwrap();
    fs::create_dir(root.path().join("a")).unwrap();
    fs::write(root.path().join("a/battleManager.js"), [0xff, 0xfe, 0xfd]).unwrap();

    cmd(root.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Error processing ./a/battleManager.js: "));

    let output = fs::read_to_string(root.path().join("raw.txt")).unwrap();
    assert!(output.starts_with(&format!("{r}\nFILE: ./a/battleManager.js\n{r}\n\n", r = rule())));
    assert!(output.contains("ERROR reading file: "));
    assert!(output.ends_with("\n\n"));
}

#[test]
fn test_empty_target_list_writes_empty_file() {
    let root = TempDir::new().unwrap();
    fs::write(root.path().join("battle-results.tsx"), "x").unwrap();
    fs::write(root.path().join("rawdump.toml"), "[extraction]\ntargets = []\n").unwrap();

    cmd(root.path()).assert().success();

    assert_eq!(fs::read_to_string(root.path().join("raw.txt")).unwrap(), "");
}

#[test]
fn test_explicit_root_output_and_targets() {
    let root = TempDir::new().unwrap();
    let out = TempDir::new().unwrap();
    let output_file = out.path().join("dump.txt");
    fs::write(root.path().join("battle-results.tsx"), "x").unwrap();
    fs::write(root.path().join("index.js"), "main").unwrap();

    cmd(out.path())
        .arg(root.path())
        .arg("--targets")
        .arg("index.js")
        .arg("--output")
        .arg(&output_file)
        .arg("--output-format")
        .arg("plain")
        .assert()
        .success()
        .stdout(predicate::str::contains("Processed: "))
        .stdout(predicate::str::contains("index.js"));

    let output = fs::read_to_string(&output_file).unwrap();
    assert!(output.contains("main\n\n"));
    assert!(!output.contains("battle-results.tsx"));
}

#[test]
fn test_missing_root_fails_with_invalid_path() {
    let dir = TempDir::new().unwrap();

    cmd(dir.path())
        .arg("does-not-exist")
        .assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("Invalid path"));

    assert!(!dir.path().join("raw.txt").exists());
}

#[test]
fn test_invalid_target_is_a_config_error() {
    let dir = TempDir::new().unwrap();

    cmd(dir.path())
        .arg("--targets")
        .arg("src/index.js")
        .assert()
        .failure()
        .code(5);
}

#[test]
fn test_json_output_and_report_file() {
    let root = TempDir::new().unwrap();
    fs::write(root.path().join("battle-screen.tsx"), "screen").unwrap();
    fs::create_dir(root.path().join(".next")).unwrap();
    fs::write(root.path().join(".next/battle-screen.tsx"), "built").unwrap();

    cmd(root.path())
        .arg("--output-format")
        .arg("json")
        .arg("--report")
        .arg("report.json")
        .assert()
        .success()
        .stdout(predicate::str::contains("\"status\":\"processed\""))
        .stdout(predicate::str::contains("\"files_processed\": 1"));

    let report = fs::read_to_string(root.path().join("report.json")).unwrap();
    let report: serde_json::Value = serde_json::from_str(&report).unwrap();
    assert_eq!(report["extraction_summary"]["directories_pruned"], 1);
    assert_eq!(report["output_file"], "raw.txt");
}

#[test]
fn test_dry_run_writes_nothing() {
    let root = TempDir::new().unwrap();
    fs::write(root.path().join("battle-screen.tsx"), "screen").unwrap();

    cmd(root.path())
        .arg("--dry-run")
        .assert()
        .success()
        .stdout(predicate::str::contains("battle-screen.tsx"));

    assert!(!root.path().join("raw.txt").exists());
}

#[test]
fn test_quiet_mode_prints_nothing() {
    let root = TempDir::new().unwrap();
    fs::write(root.path().join("battle-screen.tsx"), "screen").unwrap();

    cmd(root.path())
        .arg("--quiet")
        .assert()
        .success()
        .stdout(predicate::str::is_empty());

    assert!(root.path().join("raw.txt").exists());
}

#[test]
fn test_generate_config() {
    let dir = TempDir::new().unwrap();

    cmd(dir.path())
        .arg("--generate-config")
        .assert()
        .success()
        .stdout(predicate::str::contains("rawdump.toml"));

    let content = fs::read_to_string(dir.path().join("rawdump.toml")).unwrap();
    assert!(content.contains("battleManager.js"));
}

#[test]
fn test_repeated_runs_produce_identical_output() {
    let root = TempDir::new().unwrap();
    for dir in ["utils", "components", "app"] {
        fs::create_dir(root.path().join(dir)).unwrap();
        fs::write(root.path().join(dir).join("battleManager.js"), dir).unwrap();
    }

    cmd(root.path()).arg("-o").arg("first.txt").assert().success();
    cmd(root.path()).arg("-o").arg("second.txt").assert().success();

    assert_eq!(
        fs::read_to_string(root.path().join("first.txt")).unwrap(),
        fs::read_to_string(root.path().join("second.txt")).unwrap()
    );
}

#[test]
fn test_quiet_mode_still_reports_file_errors() {
    let root = TempDir::new().unwrap();
    fs::create_dir(root.path().join("a")).unwrap();
    fs::write(root.path().join("a/battleManager.js"), [0xff, 0xfe]).unwrap();

    cmd(root.path())
        .arg("-q")
        .assert()
        .success()
        .stdout(predicate::str::contains("Error processing ./a/battleManager.js: "))
        .stdout(predicate::str::contains("File extraction completed").not());

    let output = fs::read_to_string(root.path().join("raw.txt")).unwrap();
    assert!(output.contains("ERROR reading file: "));
}

#[test]
fn test_dry_run_json_is_a_single_object() {
    let root = TempDir::new().unwrap();

    let assert = cmd(root.path())
        .arg("--dry-run")
        .arg("--output-format")
        .arg("json")
        .arg("--targets")
        .arg("index.js")
        .assert()
        .success();

    let stdout = String::from_utf8(assert.get_output().stdout.clone()).unwrap();
    let plan: serde_json::Value = serde_json::from_str(stdout.trim()).unwrap();
    assert_eq!(plan["type"], "plan");
    assert_eq!(plan["targets"], serde_json::json!(["index.js"]));
    assert_eq!(plan["output_file"], "raw.txt");
    assert_eq!(plan["unreadable_dirs"], "abort");
    assert!(!root.path().join("raw.txt").exists());
}

#[cfg(unix)]
#[test]
fn test_unlistable_directory_exit_codes() {
    use std::os::unix::fs::PermissionsExt;

    let root = TempDir::new().unwrap();
    let locked = root.path().join("locked");
    fs::create_dir(&locked).unwrap();
    fs::write(root.path().join("battle-screen.tsx"), "screen").unwrap();
    fs::set_permissions(&locked, fs::Permissions::from_mode(0o000)).unwrap();

    // Permission bits are not enforced for root
    if fs::read_dir(&locked).is_ok() {
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).unwrap();
        return;
    }

    let fatal = cmd(root.path()).arg("-o").arg("fatal.txt").output().unwrap();
    let skipped = cmd(root.path())
        .arg("-q")
        .arg("--skip-unreadable-dirs")
        .output()
        .unwrap();

    fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).unwrap();

    assert_eq!(fatal.status.code(), Some(3));
    assert_eq!(skipped.status.code(), Some(0));
    let stdout = String::from_utf8_lossy(&skipped.stdout);
    assert!(stdout.contains("Skipped unreadable directory ./locked"));
    let output = fs::read_to_string(root.path().join("raw.txt")).unwrap();
    assert!(output.contains("screen\n\n"));
}
