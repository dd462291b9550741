//! Tests for loading game configuration from disk.

use std::io::Write;

use hanoi::{GameConfig, Overrides};
use hanoi_core::PlayMode;
use tempfile::NamedTempFile;

fn write_config(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("Failed to create temp file");
    file.write_all(content.as_bytes()).expect("Write failed");
    file
}

#[test]
fn test_load_from_file() {
    let file = write_config(
        r#"
        disks = 6
        pegs = 4
        target_peg = 2
        mode = "auto"
        animation_ms = 150
        player_name = "Grace"
        scores_path = "/tmp/grace.json"
        "#,
    );

    let config = GameConfig::load(Some(file.path())).expect("Load failed");
    assert_eq!(*config.disks(), 6);
    assert_eq!(*config.pegs(), 4);
    assert_eq!(*config.target_peg(), Some(2));
    assert_eq!(*config.mode(), PlayMode::Auto);
    assert_eq!(config.step_duration().as_millis(), 150);

    let launch = config.launch().expect("Launch failed");
    assert_eq!(*launch.target_peg(), 2);
}

#[test]
fn test_explicit_missing_file_fails() {
    let result = GameConfig::load(Some(std::path::Path::new("/definitely/not/here.toml")));
    let err = result.expect_err("Missing file should fail");
    assert!(err.message.contains("Failed to read"));
}

#[test]
fn test_malformed_file_fails() {
    let file = write_config("disks = \"many\"");
    let err = GameConfig::load(Some(file.path())).expect_err("Bad type should fail");
    assert!(err.message.contains("Failed to parse"));
}

#[test]
fn test_cli_overrides_file() {
    let file = write_config("disks = 6\nmode = \"auto\"");
    let config = GameConfig::load(Some(file.path()))
        .expect("Load failed")
        .with_overrides(Overrides {
            disks: Some(3),
            mode: Some(PlayMode::Manual),
            ..Default::default()
        });
    assert_eq!(*config.disks(), 3);
    assert_eq!(*config.mode(), PlayMode::Manual);
}

#[test]
fn test_invalid_board_rejected_at_launch() {
    let file = write_config("disks = 21");
    let config = GameConfig::load(Some(file.path())).expect("Load failed");
    assert!(config.launch().is_err());
}
