use std::fs;

use chat_shell::config::{load_from_path, ShellConfig, CONFIG_FILE_NAME};
use chat_shell::ShellError;

#[test]
fn missing_file_is_not_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let loaded = load_from_path(&dir.path().join(CONFIG_FILE_NAME)).unwrap();
    assert!(loaded.is_none());
}

#[test]
fn file_overrides_allowlist_and_start_url() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join(CONFIG_FILE_NAME);
    fs::write(
        &path,
        r#"
start_url = "https://chat.example.org/app"
allowlist = ["example.org"]

[window]
title = "Chat"
width = 1024
height = 768
"#,
    )
    .unwrap();

    let cfg = load_from_path(&path).unwrap().unwrap();
    assert_eq!(cfg.window.title, "Chat");
    assert_eq!(cfg.window.width, 1024);
    let gate = cfg.gate();
    assert!(!gate.should_open_externally("https://chat.example.org/app"));
    assert!(gate.should_open_externally("https://chatgpt.com/"));
}

#[test]
fn malformed_toml_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join(CONFIG_FILE_NAME);
    fs::write(&path, "allowlist = [unterminated").unwrap();
    assert!(matches!(load_from_path(&path), Err(ShellError::Toml(_))));
}

#[test]
fn invalid_config_names_the_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join(CONFIG_FILE_NAME);
    fs::write(&path, "allowlist = [\"https://chatgpt.com\"]\n").unwrap();
    match load_from_path(&path) {
        Err(ShellError::Config { path: reported, .. }) => assert_eq!(reported, path),
        other => panic!("expected config error, got {other:?}"),
    }
}

#[test]
fn empty_file_gives_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join(CONFIG_FILE_NAME);
    fs::write(&path, "").unwrap();
    assert_eq!(load_from_path(&path).unwrap(), Some(ShellConfig::default()));
}

#[test]
fn unreadable_path_is_an_error_not_missing() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join(CONFIG_FILE_NAME);
    fs::create_dir(&path).unwrap();
    assert!(matches!(load_from_path(&path), Err(ShellError::Io(_))));
}

#[test]
fn window_size_error_mentions_the_file_once() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join(CONFIG_FILE_NAME);
    fs::write(&path, "[window]\nwidth = 0\n").unwrap();
    let message = load_from_path(&path).unwrap_err().to_string();
    assert!(message.starts_with("config "), "{message}");
    assert!(!message.contains(": config "), "{message}");
    assert!(message.contains("invalid window size 0x800"), "{message}");
}

#[test]
fn single_label_allowlist_entry_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join(CONFIG_FILE_NAME);
    fs::write(&path, "allowlist = [\"chatgpt.com\", \"com\"]\n").unwrap();
    assert!(matches!(load_from_path(&path), Err(ShellError::Config { .. })));
}
