use std::path::Path;
use std::process::{Command, Output};

fn handtrace(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_handtrace"))
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .unwrap()
}

fn empty_config(dir: &Path) -> String {
    let path = dir.join("config.toml");
    std::fs::write(&path, "").unwrap();
    path.to_str().unwrap().to_string()
}

#[test]
fn test_listing_exits_zero() {
    let out = handtrace(&["--list-machines"]);
    assert_eq!(out.status.code(), Some(0));
    assert!(String::from_utf8_lossy(&out.stdout).contains("Available machines"));

    let out = handtrace(&["--list-profiles"]);
    assert_eq!(out.status.code(), Some(0));
    assert!(String::from_utf8_lossy(&out.stdout).contains("calligraphy"));
}

#[test]
fn test_help_and_version_exit_zero() {
    assert_eq!(handtrace(&["--help"]).status.code(), Some(0));
    assert_eq!(handtrace(&["--version"]).status.code(), Some(0));
}

#[test]
fn test_missing_input_exits_one() {
    let dir = tempfile::tempdir().unwrap();
    let config = empty_config(dir.path());
    let missing = dir.path().join("missing.png");

    let out = handtrace(&[missing.to_str().unwrap(), "--config", &config]);
    assert_eq!(out.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("Error:"));
    assert!(stderr.contains("Input image not found"));
}

#[test]
fn test_undecodable_input_exits_one() {
    let dir = tempfile::tempdir().unwrap();
    let config = empty_config(dir.path());
    let input = dir.path().join("broken.png");
    std::fs::write(&input, b"not an image").unwrap();
    let output = dir.path().join("broken.gcode");

    let out = handtrace(&[
        input.to_str().unwrap(),
        "-o",
        output.to_str().unwrap(),
        "--config",
        &config,
    ]);
    assert_eq!(out.status.code(), Some(1));
    assert!(!out.stderr.is_empty());
    assert!(!output.exists());
}

#[test]
fn test_usage_errors_exit_one() {
    let out = handtrace(&[]);
    assert_eq!(out.status.code(), Some(1));
    assert!(!out.stderr.is_empty());

    let out = handtrace(&["a.png", "--plain", "--seed", "3"]);
    assert_eq!(out.status.code(), Some(1));

    let out = handtrace(&["a.png", "--no-such-flag"]);
    assert_eq!(out.status.code(), Some(1));
}

#[test]
fn test_non_finite_tremor_exits_one() {
    let dir = tempfile::tempdir().unwrap();
    let config = empty_config(dir.path());
    let input = dir.path().join("white.png");
    image::GrayImage::from_pixel(40, 40, image::Luma([255]))
        .save(&input)
        .unwrap();
    let output = dir.path().join("white.gcode");

    let out = handtrace(&[
        input.to_str().unwrap(),
        "-o",
        output.to_str().unwrap(),
        "--config",
        &config,
        "--seed",
        "1",
        "--tremor",
        "inf",
    ]);
    assert_eq!(out.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("must be finite"));
    assert!(!stderr.contains("panicked"));
}
