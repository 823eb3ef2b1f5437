use std::process::Command;

fn passfit() -> Command {
    Command::new(env!("CARGO_BIN_EXE_passfit"))
}

#[test]
fn test_target_without_extension_aborts_the_process() {
    let dir = tempfile::tempdir().unwrap();

    let output = passfit()
        .args(["--target", "loop", "--run-folder"])
        .arg(dir.path())
        .args(["--passes", "unroll,inline"])
        .env("RUST_LOG", "error")
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(1));
    assert!(output.stdout.is_empty(), "no fitness should be printed");
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("valid extension"), "stderr was: {}", stderr);
}

#[test]
fn test_unknown_argument_is_rejected() {
    let output = passfit().arg("--bogus").output().unwrap();
    assert!(!output.status.success());
}

#[test]
fn test_help_lists_repeatable_flags() {
    let output = passfit().arg("--help").output().unwrap();

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    for flag in ["--source", "--passes", "--no-cache", "--pre-cache", "--run-folder"] {
        assert!(stdout.contains(flag), "{} missing from help: {}", flag, stdout);
    }
}

#[test]
fn test_shared_source_stem_aborts_before_building() {
    let dir = tempfile::tempdir().unwrap();

    let output = passfit()
        .args(["--target", "loop.c", "--source", "loop.cpp", "--run-folder"])
        .arg(dir.path())
        .args(["--passes", "unroll"])
        .env("RUST_LOG", "error")
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(1));
    assert!(output.stdout.is_empty());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("both compile to loop.ll"), "stderr was: {}", stderr);
}
