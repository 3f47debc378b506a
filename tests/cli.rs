use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn capstats() -> Command {
    let mut cmd = Command::cargo_bin("capstats").unwrap();
    cmd.arg("--output-format").arg("plain");
    cmd
}

fn touch(path: &Path) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, b"capture bytes").unwrap();
}

#[test]
fn list_default_stats_prints_catalog() {
    capstats()
        .arg("--list-default-stats")
        .assert()
        .success()
        .stdout(predicate::str::starts_with("afp,srt\n"))
        .stdout(predicate::str::contains("io,phs\n"))
        .stdout(predicate::str::ends_with("wsp,stat\n"));
}

#[test]
fn nothing_to_process() {
    let temp_dir = TempDir::new().unwrap();
    touch(&temp_dir.path().join("a.pcap"));
    fs::write(temp_dir.path().join("a.total-stats.txt"), "done").unwrap();

    capstats()
        .arg("--dir")
        .arg(temp_dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("No pcap or pcapng files need processing."));
}

#[test]
fn refusing_confirmation_writes_nothing() {
    let temp_dir = TempDir::new().unwrap();
    touch(&temp_dir.path().join("one.pcap"));
    touch(&temp_dir.path().join("nested/two.pcapng"));

    capstats()
        .arg("--dir")
        .arg(temp_dir.path())
        .arg("--tool")
        .arg("/nonexistent/tshark")
        .write_stdin("n\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("The following files will be processed:"))
        .stdout(predicate::str::contains("Total 2 files."))
        .stdout(predicate::str::contains("Do you want to proceed? (y/n): "))
        .stdout(predicate::str::contains("Aborted."));

    assert!(!temp_dir.path().join("one.total-stats.txt").exists());
    assert!(!temp_dir.path().join("nested/two.total-stats.txt").exists());
}

#[test]
fn dry_run_writes_nothing() {
    let temp_dir = TempDir::new().unwrap();
    touch(&temp_dir.path().join("trace.pcap"));

    capstats()
        .arg("--dir")
        .arg(temp_dir.path())
        .arg("--stats")
        .arg("io,phs")
        .arg("--dry-run")
        .arg("-v")
        .assert()
        .success()
        .stdout(predicate::str::contains("trace.total-stats.txt"))
        .stdout(predicate::str::contains("-q -z io,phs"));

    assert!(!temp_dir.path().join("trace.total-stats.txt").exists());
}

#[test]
fn missing_root_is_a_discovery_error() {
    let temp_dir = TempDir::new().unwrap();

    capstats()
        .arg("--dir")
        .arg(temp_dir.path().join("does-not-exist"))
        .arg("--yes")
        .assert()
        .code(2);
}

#[test]
fn unreadable_selection_file_is_an_argument_error() {
    let temp_dir = TempDir::new().unwrap();
    touch(&temp_dir.path().join("a.pcap"));
    // A directory resolves as a selection file but cannot be read as one.
    let selection = temp_dir.path().join("selection.d");
    fs::create_dir(&selection).unwrap();

    capstats()
        .arg("--dir")
        .arg(temp_dir.path())
        .arg("--stats")
        .arg(&selection)
        .arg("--yes")
        .assert()
        .code(3);

    assert!(!temp_dir.path().join("a.total-stats.txt").exists());
}

#[test]
fn zero_workers_is_rejected() {
    capstats().arg("--workers").arg("0").assert().failure();
}

#[test]
fn oversized_worker_count_is_rejected() {
    capstats()
        .arg("--workers")
        .arg("18446744073709551615")
        .assert()
        .failure()
        .stderr(predicate::str::contains("--workers"));
}

fn assert_json_lines(stdout: &[u8]) -> Vec<serde_json::Value> {
    String::from_utf8_lossy(stdout)
        .lines()
        .map(|line| {
            serde_json::from_str(line).unwrap_or_else(|e| panic!("not JSON: {line:?}: {e}"))
        })
        .collect()
}

#[test]
fn json_refusal_keeps_stdout_machine_readable() {
    let temp_dir = TempDir::new().unwrap();
    touch(&temp_dir.path().join("one.pcap"));

    let output = Command::cargo_bin("capstats")
        .unwrap()
        .arg("--output-format")
        .arg("json")
        .arg("--dir")
        .arg(temp_dir.path())
        .write_stdin("n\n")
        .assert()
        .success()
        .stderr(predicate::str::contains("Do you want to proceed? (y/n): "))
        .get_output()
        .stdout
        .clone();

    let lines = assert_json_lines(&output);
    assert_eq!(lines[0]["type"], "candidates");
    assert_eq!(lines[0]["total"], 1);
    assert!(lines.iter().any(|line| line["message"] == "Aborted."));
    assert!(!temp_dir.path().join("one.total-stats.txt").exists());
}

#[test]
fn json_startup_error_is_json() {
    let temp_dir = TempDir::new().unwrap();

    let output = Command::cargo_bin("capstats")
        .unwrap()
        .arg("--output-format")
        .arg("json")
        .arg("--config")
        .arg(temp_dir.path().join("missing.toml"))
        .assert()
        .code(1)
        .get_output()
        .stdout
        .clone();

    let lines = assert_json_lines(&output);
    assert!(lines
        .iter()
        .any(|line| line["type"] == "message" && line["level"] == "error"));
}

#[cfg(unix)]
mod with_fake_tool {
    use super::*;
    use std::os::unix::fs::PermissionsExt;

    /// Echoes its arguments; fails on captures named `broken*`.
    fn fake_tool(dir: &Path) -> std::path::PathBuf {
        let path = dir.join("fake-tshark");
        fs::write(
            &path,
            "#!/bin/sh\n\
             case \"$(basename \"$2\")\" in\n  broken*) echo 'cut short' >&2; exit 1 ;;\nesac\n\
             echo \"$@\"\n",
        )
        .unwrap();
        fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
        path
    }

    #[test]
    fn yes_processes_every_candidate() {
        let temp_dir = TempDir::new().unwrap();
        let tool_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        touch(&root.join("a.pcap"));
        touch(&root.join("sub/b.pcapng"));
        fs::write(root.join("stats.txt"), "io,phs\n\nconv,tcp\n").unwrap();

        capstats()
            .arg("--dir")
            .arg(root)
            .arg("--stats")
            .arg(root.join("stats.txt"))
            .arg("--tool")
            .arg(fake_tool(tool_dir.path()))
            .arg("--yes")
            .arg("--workers")
            .arg("2")
            .assert()
            .success()
            .stdout(predicate::str::contains("Processed 2/2 files"));

        let report = fs::read_to_string(root.join("a.total-stats.txt")).unwrap();
        assert_eq!(
            report,
            format!("-r {} -q -z io,phs -z conv,tcp\n", root.join("a.pcap").display())
        );
        assert!(root.join("sub/b.total-stats.txt").exists());
    }

    #[test]
    fn confirmation_with_capital_y_proceeds() {
        let temp_dir = TempDir::new().unwrap();
        let tool_dir = TempDir::new().unwrap();
        touch(&temp_dir.path().join("a.pcap"));

        capstats()
            .arg("--dir")
            .arg(temp_dir.path())
            .arg("--tool")
            .arg(fake_tool(tool_dir.path()))
            .write_stdin("Y\n")
            .assert()
            .success();

        assert!(temp_dir.path().join("a.total-stats.txt").exists());
    }

    #[test]
    fn one_failing_file_does_not_fail_the_run() {
        let temp_dir = TempDir::new().unwrap();
        let tool_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        for name in ["a.pcap", "b.pcap", "broken.pcap", "d.pcapng", "e.pcapng"] {
            touch(&root.join(name));
        }

        capstats()
            .arg("--dir")
            .arg(root)
            .arg("--stats")
            .arg("io,phs")
            .arg("--tool")
            .arg(fake_tool(tool_dir.path()))
            .arg("--yes")
            .assert()
            .code(0)
            .stderr(predicate::str::contains("Error processing"))
            .stderr(predicate::str::contains("broken.pcap"));

        for name in ["a", "b", "d", "e"] {
            assert!(root.join(format!("{name}.total-stats.txt")).exists());
        }
        assert!(!root.join("broken.total-stats.txt").exists());

        let leftovers: Vec<_> = fs::read_dir(root)
            .unwrap()
            .filter_map(|entry| entry.ok())
            .filter(|entry| entry.file_name().to_string_lossy().ends_with(".tmp"))
            .collect();
        assert!(leftovers.is_empty());
    }

    #[test]
    fn existing_reports_are_kept_without_overwrite() {
        let temp_dir = TempDir::new().unwrap();
        let tool_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        touch(&root.join("a.pcap"));
        touch(&root.join("b.pcap"));
        fs::write(root.join("a.total-stats.txt"), "previous run").unwrap();

        capstats()
            .arg("--dir")
            .arg(root)
            .arg("--tool")
            .arg(fake_tool(tool_dir.path()))
            .arg("--yes")
            .assert()
            .success()
            .stdout(predicate::str::contains("Total 1 files."));

        assert_eq!(
            fs::read_to_string(root.join("a.total-stats.txt")).unwrap(),
            "previous run"
        );

        capstats()
            .arg("--dir")
            .arg(root)
            .arg("--tool")
            .arg(fake_tool(tool_dir.path()))
            .arg("--yes")
            .arg("--overwrite")
            .assert()
            .success()
            .stdout(predicate::str::contains("Total 2 files."));

        assert_ne!(
            fs::read_to_string(root.join("a.total-stats.txt")).unwrap(),
            "previous run"
        );
    }
}
