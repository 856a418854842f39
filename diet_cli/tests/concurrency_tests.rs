//! Concurrency tests for dietrack.
//!
//! These tests verify that multiple processes can safely append to the
//! journal and save the profile at the same time (file locking).

use assert_cmd::Command;
use std::fs;
use std::path::{Path, PathBuf};
use std::thread;
use tempfile::TempDir;

fn binary() -> PathBuf {
    assert_cmd::cargo::cargo_bin!("dietrack").to_path_buf()
}

fn setup_test_dir() -> TempDir {
    let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
    fs::write(temp_dir.path().join("config.toml"), "").unwrap();
    temp_dir
}

fn base_args(dir: &Path) -> Vec<String> {
    vec![
        "--data-dir".into(),
        dir.join("data").display().to_string(),
        "--config".into(),
        dir.join("config.toml").display().to_string(),
    ]
}

#[test]
fn test_concurrent_food_logging() {
    let temp_dir = setup_test_dir();
    let dir = temp_dir.path().to_path_buf();

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let dir = dir.clone();
            thread::spawn(move || {
                Command::new(binary())
                    .args(base_args(&dir))
                    .args(["log", "food", "--name", "egg", "--grams", "50", "--date", "2024-05-01"])
                    .assert()
                    .success();
            })
        })
        .collect();

    for handle in handles {
        handle.join().expect("logging thread panicked");
    }

    // Every line must be a complete entry
    let journal = fs::read_to_string(dir.join("data/journal.jsonl")).unwrap();
    let lines: Vec<_> = journal.lines().collect();
    assert_eq!(lines.len(), 8, "Expected 8 entries, got {}", lines.len());
    for line in lines {
        let value: serde_json::Value = serde_json::from_str(line).expect("torn journal line");
        assert_eq!(value["kind"]["name"], "egg");
    }
}

#[test]
fn test_concurrent_profile_updates() {
    let temp_dir = setup_test_dir();
    let dir = temp_dir.path().to_path_buf();

    Command::new(binary())
        .args(base_args(&dir))
        .args([
            "profile", "set", "--gender", "female", "--age", "40", "--height", "160", "--weight",
            "60",
        ])
        .assert()
        .success();

    let handles: Vec<_> = (0..5)
        .map(|i| {
            let dir = dir.clone();
            thread::spawn(move || {
                let weight = format!("{}", 60 + i);
                Command::new(binary())
                    .args(base_args(&dir))
                    .args(["profile", "set", "--weight", weight.as_str()])
                    .assert()
                    .success();
            })
        })
        .collect();

    for handle in handles {
        handle.join().expect("update thread panicked");
    }

    // Last writer wins, but the file is always a whole profile
    let contents = fs::read_to_string(dir.join("data/profile.json")).unwrap();
    let value: serde_json::Value = serde_json::from_str(&contents).expect("corrupt profile");
    let weight = value["weight"].as_f64().unwrap();
    assert!((60.0..65.0).contains(&weight));
    assert_eq!(value["age"], 40);
}

#[test]
fn test_concurrent_partial_updates_keep_every_field() {
    let temp_dir = setup_test_dir();
    let dir = temp_dir.path().to_path_buf();

    Command::new(binary())
        .args(base_args(&dir))
        .args([
            "profile", "set", "--gender", "male", "--age", "30", "--height", "175", "--weight",
            "75",
        ])
        .assert()
        .success();

    let updates: [[&'static str; 2]; 4] = [
        ["--age", "31"],
        ["--height", "176"],
        ["--weight", "74"],
        ["--deficit", "250"],
    ];
    let handles: Vec<_> = updates
        .into_iter()
        .map(|update| {
            let dir = dir.clone();
            thread::spawn(move || {
                Command::new(binary())
                    .args(base_args(&dir))
                    .args(["profile", "set"])
                    .args(update)
                    .assert()
                    .success();
            })
        })
        .collect();

    for handle in handles {
        handle.join().expect("update thread panicked");
    }

    let contents = fs::read_to_string(dir.join("data/profile.json")).unwrap();
    let value: serde_json::Value = serde_json::from_str(&contents).unwrap();
    assert_eq!(value["age"], 31);
    assert_eq!(value["height"], 176.0);
    assert_eq!(value["weight"], 74.0);
    assert_eq!(value["calorie_deficit"], 250.0);
}
