use std::process::Command;

#[test]
fn cli_smoke_help() {
    let exe = env!("CARGO_BIN_EXE_daybook");
    let output = Command::new(exe)
        .arg("--help")
        .output()
        .expect("failed to run daybook --help");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("today"));
    assert!(stdout.contains("month"));
}

#[test]
fn cli_rejects_unknown_command() {
    let exe = env!("CARGO_BIN_EXE_daybook");
    let output = Command::new(exe)
        .arg("schedule")
        .output()
        .expect("failed to run daybook");

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("ERROR: invalid_input"));
}
