use assert_cmd::Command;
use assert_fs::prelude::*;
use assert_fs::TempDir;
use predicates::prelude::*;
use serde_json::Value;

/// Directory holding `img_001.png` .. `img_00N.png`, skipping `missing`
fn sequence_dir(count: u32, missing: &[u32]) -> TempDir {
    let temp_dir = TempDir::new().unwrap();
    for i in 1..=count {
        if missing.contains(&i) {
            continue;
        }
        temp_dir
            .child(format!("img_{i:03}.png"))
            .write_str("frame")
            .unwrap();
    }
    temp_dir
}

fn sequin() -> Command {
    let mut cmd = Command::cargo_bin("sequin").unwrap();
    cmd.env_remove("RUST_LOG");
    cmd
}

#[test]
fn test_help_command() {
    sequin()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("image sequences"));
}

#[test]
fn test_version_subcommand() {
    sequin()
        .arg("version")
        .assert()
        .success()
        .stdout(predicate::str::contains("sequin 0.1.0"));
}

#[test]
fn test_version_subcommand_json() {
    sequin()
        .args(["version", "--output", "json"])
        .assert()
        .success()
        .stdout(predicate::str::is_match(r#"\{"name":"sequin","version":"0\.1\.0"\}"#).unwrap());
}

#[test]
fn test_inspect_summary() {
    let temp_dir = sequence_dir(5, &[]);

    sequin()
        .current_dir(temp_dir.path())
        .args(["inspect", "img_003.png"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Sequence: img_%03d.png"))
        .stdout(predicate::str::contains("Start number: 1"));
}

#[test]
fn test_inspect_json() {
    let temp_dir = sequence_dir(4, &[]);

    let output = sequin()
        .args(["-C", temp_dir.path().to_str().unwrap()])
        .args(["inspect", "img_002.png", "--output", "json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let json: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["operation"], "inspect");
    assert_eq!(json["kind"], "sequence");
    assert_eq!(json["pattern"], "img_%03d.png");
    assert_eq!(json["start_number"], 1);
    assert_eq!(json["sample_number"], 2);
    assert_eq!(json["file_count"], 4);
}

#[test]
fn test_inspect_single_file() {
    let temp_dir = TempDir::new().unwrap();
    temp_dir.child("poster.jpg").write_str("x").unwrap();

    sequin()
        .current_dir(temp_dir.path())
        .args(["inspect", "poster.jpg", "--output", "json"])
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""kind":"single""#))
        .stdout(predicate::str::contains(r#""start_number":-1"#));
}

#[test]
fn test_inspect_missing_file_exits_2() {
    let temp_dir = TempDir::new().unwrap();

    sequin()
        .current_dir(temp_dir.path())
        .args(["inspect", "nope_001.png"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("does not exist"));
}

#[test]
fn test_inspect_unsupported_extension_exits_2() {
    let temp_dir = TempDir::new().unwrap();
    temp_dir.child("notes_01.txt").write_str("x").unwrap();
    temp_dir.child("notes_02.txt").write_str("x").unwrap();

    sequin()
        .current_dir(temp_dir.path())
        .args(["inspect", "notes_01.txt"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("not a supported file format"));
}

#[test]
fn test_inspect_ambiguous_exits_1() {
    let temp_dir = TempDir::new().unwrap();
    for (a, b) in [(1, 1), (2, 2), (3, 3)] {
        temp_dir
            .child(format!("cam{a}_{b:03}.png"))
            .write_str("x")
            .unwrap();
    }

    sequin()
        .current_dir(temp_dir.path())
        .args(["inspect", "cam1_001.png"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("ambiguous sequence"));

    sequin()
        .current_dir(temp_dir.path())
        .args(["inspect", "cam1_001.png", "--non-strict"])
        .assert()
        .success()
        .stdout(predicate::str::contains("cam1_%03d.png"));
}

#[test]
fn test_gaps_command() {
    let temp_dir = sequence_dir(6, &[3, 5]);

    sequin()
        .current_dir(temp_dir.path())
        .args(["gaps", "img_001.png"])
        .assert()
        .success()
        .stdout(predicate::str::contains("img_003.png"))
        .stdout(predicate::str::contains("img_005.png").not());
}

#[test]
fn test_list_command_json_sorted() {
    let temp_dir = TempDir::new().unwrap();
    for name in ["f_10.png", "f_9.png", "f_8.png", "other.png"] {
        temp_dir.child(name).write_str("x").unwrap();
    }

    let output = sequin()
        .current_dir(temp_dir.path())
        .args(["list", "f_9.png", "--output", "json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let json: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["count"], 3);
    assert_eq!(
        json["files"],
        serde_json::json!(["f_8.png", "f_9.png", "f_10.png"])
    );
}

#[test]
fn test_list_command_table() {
    let temp_dir = sequence_dir(3, &[]);

    sequin()
        .current_dir(temp_dir.path())
        .args(["--no-color", "list", "img_001.png"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Frame"))
        .stdout(predicate::str::contains("img_003.png"));
}

#[test]
fn test_rename_in_place() {
    let temp_dir = TempDir::new().unwrap();
    for i in 1..=3 {
        temp_dir
            .child(format!("render_{i:04}.png"))
            .write_str(&format!("frame {i}"))
            .unwrap();
    }

    sequin()
        .current_dir(temp_dir.path())
        .args(["rename", "render_0002.png", "--start", "10"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Renamed 3 file(s)"));

    temp_dir.child("render10.png").assert("frame 1");
    temp_dir.child("render11.png").assert("frame 2");
    temp_dir.child("render12.png").assert("frame 3");
    temp_dir.child("render_0001.png").assert(predicate::path::missing());
    temp_dir.child(".sequin.lock").assert(predicate::path::missing());
}

#[test]
fn test_rename_to_other_directory_json() {
    let temp_dir = TempDir::new().unwrap();
    for i in 1..=2 {
        temp_dir
            .child(format!("render_{i:03}.png"))
            .write_str("x")
            .unwrap();
    }

    let output = sequin()
        .current_dir(temp_dir.path())
        .args([
            "rename",
            "render_001.png",
            "--to",
            "out",
            "--name",
            "plate.mov",
            "--output",
            "json",
        ])
        .output()
        .unwrap();
    assert!(output.status.success());

    let json: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["operation"], "rename");
    assert_eq!(json["moved"], false);
    assert_eq!(json["output_root"], "plate");
    assert_eq!(json["files"], 2);

    temp_dir.child("out/plate0.png").assert(predicate::path::exists());
    temp_dir.child("out/plate1.png").assert(predicate::path::exists());
    temp_dir.child("render_001.png").assert(predicate::path::exists());
}

#[test]
fn test_rename_blocked_by_lock() {
    let temp_dir = sequence_dir(2, &[]);
    let timestamp = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap()
        .as_secs();
    // The test process itself is alive, so the lock is honoured
    temp_dir
        .child(".sequin.lock")
        .write_str(&format!("{}:{}", std::process::id(), timestamp))
        .unwrap();

    sequin()
        .current_dir(temp_dir.path())
        .args(["rename", "img_001.png"])
        .assert()
        .code(3)
        .stderr(predicate::str::contains("already running"));

    temp_dir.child("img_001.png").assert(predicate::path::exists());
}

#[test]
fn test_config_formats_are_respected() {
    let temp_dir = TempDir::new().unwrap();
    temp_dir
        .child(".sequin/config.toml")
        .write_str("image_formats = [\"dpx\"]\n")
        .unwrap();
    temp_dir.child("scan_01.dpx").write_str("x").unwrap();
    temp_dir.child("scan_02.dpx").write_str("x").unwrap();
    temp_dir.child("still_01.png").write_str("x").unwrap();

    sequin()
        .current_dir(temp_dir.path())
        .args(["inspect", "scan_01.dpx"])
        .assert()
        .success()
        .stdout(predicate::str::contains("scan_%02d.dpx"));

    sequin()
        .current_dir(temp_dir.path())
        .args(["inspect", "still_01.png"])
        .assert()
        .code(2);
}
