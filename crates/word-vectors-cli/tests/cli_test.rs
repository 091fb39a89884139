//! Runs the `word-vectors` binary with the stub embedder in a scratch directory.

use std::fs;
use std::process::Command;

use tempfile::TempDir;

fn scratch(words: &str) -> TempDir {
    let dir = TempDir::new().expect("tempdir");
    fs::create_dir(dir.path().join("inputs")).unwrap();
    fs::create_dir(dir.path().join("outputs")).unwrap();
    fs::write(dir.path().join("inputs/sample.txt"), words).unwrap();
    dir
}

fn word_vectors(dir: &TempDir) -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_word-vectors"));
    cmd.current_dir(dir.path())
        .env_remove("RUST_LOG")
        .env_remove("WORD_VECTORS_MODEL_ID")
        .env_remove("WORD_VECTORS_MODEL_DIR")
        .env_remove("WORD_VECTORS_INPUT")
        .env_remove("WORD_VECTORS_OUTPUT");
    cmd
}

#[test]
fn test_default_paths_with_stub() {
    let dir = scratch("hello\nworld\n");

    let output = word_vectors(&dir).args(["--stub", "12"]).output().unwrap();

    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));
    assert_eq!(String::from_utf8(output.stdout).unwrap(), "Saved word_vectors.json\n");

    let json: serde_json::Map<String, serde_json::Value> = serde_json::from_str(
        &fs::read_to_string(dir.path().join("outputs/word_vectors.json")).unwrap(),
    )
    .unwrap();
    assert_eq!(json.len(), 2);
    assert_eq!(json["hello"].as_array().unwrap().len(), 12);
}

#[test]
fn test_custom_paths() {
    let dir = scratch("");
    fs::write(dir.path().join("words.txt"), "cat\ncat\n").unwrap();

    let output = word_vectors(&dir)
        .args(["--stub", "4", "--input", "words.txt", "--output", "vectors.json"])
        .output()
        .unwrap();

    assert!(output.status.success());
    assert_eq!(String::from_utf8(output.stdout).unwrap(), "Saved vectors.json\n");
    let text = fs::read_to_string(dir.path().join("vectors.json")).unwrap();
    assert_eq!(text.matches("\"cat\"").count(), 1);
}

#[test]
fn test_missing_input_exits_with_failure() {
    let dir = TempDir::new().unwrap();

    let output = word_vectors(&dir).args(["--stub", "4"]).output().unwrap();

    assert!(!output.status.success());
    assert_eq!(output.status.code(), Some(1));
    assert!(output.stdout.is_empty());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Error:"), "stderr: {}", stderr);
    assert!(stderr.contains("sample.txt"), "stderr: {}", stderr);
}

#[test]
fn test_missing_model_dir_exits_with_failure() {
    let dir = scratch("hello\n");

    let output = word_vectors(&dir)
        .args(["--model-dir", "no-such-model"])
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(1));
    assert!(!dir.path().join("outputs/word_vectors.json").exists());
}
