//! Integration tests for lexiforge
//!
//! These tests drive the binary end to end against temporary projects.

use assert_cmd::Command;
use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

/// Helper to create a lexiforge Command
fn lexiforge() -> Command {
    let mut cmd = cargo_bin_cmd!("lexiforge");
    cmd.env_remove("LEXIFORGE_ENRICHMENT_ENDPOINT")
        .env_remove("LEXIFORGE_SEED")
        .env_remove("RUST_LOG");
    cmd
}

/// Helper to create a temporary project directory
fn create_temp_project() -> TempDir {
    TempDir::new().unwrap()
}

/// Helper to initialize a consonant_shift language in a temp directory
fn init_language(dir: &TempDir) {
    lexiforge()
        .current_dir(dir.path())
        .args(["init", "--name", "Velari", "--style", "consonant_shift"])
        .assert()
        .success();
}

/// Helper to write a word list and run a batch over it
fn run_batch(dir: &TempDir, words: &str) {
    let list = dir.path().join("words.txt");
    fs::write(&list, words).unwrap();
    lexiforge()
        .current_dir(dir.path())
        .args(["batch", "words.txt", "--no-progress"])
        .assert()
        .success();
}

// =============================================================================
// Basic CLI Tests
// =============================================================================

mod cli_basics {
    use super::*;

    #[test]
    fn test_lexiforge_help() {
        lexiforge()
            .arg("--help")
            .assert()
            .success()
            .stdout(predicate::str::contains("batch"));
    }

    #[test]
    fn test_lexiforge_version() {
        lexiforge().arg("--version").assert().success();
    }

    #[test]
    fn test_init_creates_structure() {
        let dir = create_temp_project();

        lexiforge()
            .current_dir(dir.path())
            .args(["init", "--name", "Velari", "--style", "vowel_harmony"])
            .assert()
            .success()
            .stdout(predicate::str::contains("Initialized language 'Velari'"));

        assert!(dir.path().join(".lexiforge/dictionaries").is_dir());
        assert!(dir.path().join(".lexiforge/logs").is_dir());
        let toml = fs::read_to_string(dir.path().join(".lexiforge/lexicon.toml")).unwrap();
        assert!(toml.contains("vowel_harmony"));
    }

    #[test]
    fn test_init_rejects_unknown_style() {
        let dir = create_temp_project();

        lexiforge()
            .current_dir(dir.path())
            .args(["init", "--name", "Velari", "--style", "baroque"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("Invalid style"));
    }

    #[test]
    fn test_second_init_keeps_style() {
        let dir = create_temp_project();
        init_language(&dir);

        lexiforge()
            .current_dir(dir.path())
            .args(["init", "--name", "Other", "--style", "phonetic_logic"])
            .assert()
            .success()
            .stdout(predicate::str::contains("already initialized"));

        let toml = fs::read_to_string(dir.path().join(".lexiforge/lexicon.toml")).unwrap();
        assert!(toml.contains("consonant_shift"));
        assert!(toml.contains("Velari"));
    }

    #[test]
    fn test_project_dir_flag() {
        let dir = create_temp_project();

        lexiforge()
            .arg("--project-dir")
            .arg(dir.path())
            .args(["init", "--name", "Velari"])
            .assert()
            .success();

        assert!(dir.path().join(".lexiforge/lexicon.toml").exists());
    }
}

// =============================================================================
// Uninitialized Project Tests
// =============================================================================

mod uninitialized {
    use super::*;

    #[test]
    fn test_batch_requires_init() {
        let dir = create_temp_project();
        fs::write(dir.path().join("words.txt"), "water\n").unwrap();

        lexiforge()
            .current_dir(dir.path())
            .args(["batch", "words.txt", "--no-progress"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("lexiforge init"));
    }

    #[test]
    fn test_status_requires_init() {
        let dir = create_temp_project();

        lexiforge()
            .current_dir(dir.path())
            .arg("status")
            .assert()
            .failure();
    }
}

// =============================================================================
// Batch Tests
// =============================================================================

mod batch {
    use super::*;

    #[test]
    fn test_batch_builds_vocabulary_and_dictionaries() {
        let dir = create_temp_project();
        init_language(&dir);

        let list = dir.path().join("words.txt");
        fs::write(&list, "# test words\ncomputer\nwater\n\nriver\n").unwrap();

        lexiforge()
            .current_dir(dir.path())
            .args(["batch", "words.txt", "--no-progress"])
            .assert()
            .success()
            .stdout(predicate::str::contains("Batch completed: 3 new words"));

        let lexiforge_dir = dir.path().join(".lexiforge");
        assert!(lexiforge_dir.join("vocabulary.json").exists());
        assert!(!lexiforge_dir.join("checkpoint.json").exists());
        for table in [
            "constructed_to_source.json",
            "constructed_definitions.json",
            "source_to_constructed.json",
            "metadata.json",
        ] {
            assert!(lexiforge_dir.join("dictionaries").join(table).exists());
        }

        let forward =
            fs::read_to_string(lexiforge_dir.join("dictionaries/source_to_constructed.json"))
                .unwrap();
        assert!(forward.contains("combuder"));
    }

    #[test]
    fn test_second_batch_skips_duplicates() {
        let dir = create_temp_project();
        init_language(&dir);
        run_batch(&dir, "computer\nwater\n");

        fs::write(dir.path().join("more.txt"), "water\nstone\n").unwrap();
        lexiforge()
            .current_dir(dir.path())
            .args(["batch", "more.txt", "--no-progress"])
            .assert()
            .success()
            .stdout(predicate::str::contains("1 new words"))
            .stdout(predicate::str::contains("1 duplicates skipped"));
    }

    #[test]
    fn test_batch_reports_bad_words() {
        let dir = create_temp_project();
        init_language(&dir);

        fs::write(dir.path().join("words.txt"), "water\n1234\n").unwrap();
        lexiforge()
            .current_dir(dir.path())
            .args(["batch", "words.txt", "--no-progress"])
            .assert()
            .success()
            .stdout(predicate::str::contains("1 words failed"));
    }

    #[test]
    fn test_batch_missing_wordlist() {
        let dir = create_temp_project();
        init_language(&dir);

        lexiforge()
            .current_dir(dir.path())
            .args(["batch", "absent.txt", "--no-progress"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("Failed to read word list"));
    }
}

// =============================================================================
// Inspection Tests
// =============================================================================

mod inspection {
    use super::*;

    #[test]
    fn test_status_shows_language_and_size() {
        let dir = create_temp_project();
        init_language(&dir);
        run_batch(&dir, "computer\nwater\n");

        lexiforge()
            .current_dir(dir.path())
            .arg("status")
            .assert()
            .success()
            .stdout(predicate::str::contains("Velari"))
            .stdout(predicate::str::contains("consonant_shift"))
            .stdout(predicate::str::contains("2 words"))
            .stdout(predicate::str::contains("Checkpoint:     none"));
    }

    #[test]
    fn test_lookup_both_directions() {
        let dir = create_temp_project();
        init_language(&dir);
        run_batch(&dir, "computer\n");

        lexiforge()
            .current_dir(dir.path())
            .args(["lookup", "Computer"])
            .assert()
            .success()
            .stdout(predicate::str::contains("combuder"));

        lexiforge()
            .current_dir(dir.path())
            .args(["lookup", "combuder"])
            .assert()
            .success()
            .stdout(predicate::str::contains("from 'computer'"));
    }

    #[test]
    fn test_lookup_unknown_word() {
        let dir = create_temp_project();
        init_language(&dir);

        lexiforge()
            .current_dir(dir.path())
            .args(["lookup", "zephyr"])
            .assert()
            .success()
            .stdout(predicate::str::contains("No entry for 'zephyr'"));
    }

    #[test]
    fn test_analyze_json() {
        let dir = create_temp_project();
        init_language(&dir);
        run_batch(&dir, "computer\nwater\nriver\n");

        let output = lexiforge()
            .current_dir(dir.path())
            .args(["analyze", "--json"])
            .output()
            .unwrap();
        assert!(output.status.success());

        let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
        assert_eq!(value["vocabularySize"], 3);
        let score = value["report"]["consistency_score"].as_f64().unwrap();
        assert!((0.0..=100.0).contains(&score));
        assert!(value["advice"]["recommended"].is_boolean());
    }

    #[test]
    fn test_analyze_empty_vocabulary() {
        let dir = create_temp_project();
        init_language(&dir);

        lexiforge()
            .current_dir(dir.path())
            .arg("analyze")
            .assert()
            .success()
            .stdout(predicate::str::contains("Consistency score: 0.0"));
    }

    #[test]
    fn test_reconstruct_reports_scores() {
        let dir = create_temp_project();
        init_language(&dir);
        run_batch(&dir, "computer\nwater\n");

        lexiforge()
            .current_dir(dir.path())
            .args(["reconstruct", "--previous-score", "65"])
            .assert()
            .success()
            .stdout(predicate::str::contains("Reconstructed 2 words"))
            .stdout(predicate::str::contains("Consistency: 65.0"));
    }
}
