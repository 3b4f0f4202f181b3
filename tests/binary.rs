use std::process::Command;

#[test]
fn test_binary_prints_one_report_line() {
    let output = Command::new(env!("CARGO_BIN_EXE_binary-mlp"))
        .env("RUST_LOG", "info")
        .output()
        .unwrap();
    assert!(output.status.success(), "exit status {:?}", output.status);

    let stdout = String::from_utf8(output.stdout).unwrap();
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines.len(), 1, "stdout: {stdout:?}");

    let value = lines[0].strip_prefix("Test accuracy: ").unwrap();
    let (int, frac) = value.split_once('.').unwrap();
    assert!(!int.is_empty() && int.chars().all(|c| c.is_ascii_digit()));
    assert!(frac.len() == 4 && frac.chars().all(|c| c.is_ascii_digit()));
    let accuracy: f64 = value.parse().unwrap();
    assert!((0.0..=1.0).contains(&accuracy));

    // Per-epoch progress goes through the logger, which writes to stderr.
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("epoch 1/10"), "stderr: {stderr}");
    assert!(stderr.contains("epoch 10/10"), "stderr: {stderr}");
}
