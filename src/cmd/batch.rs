//! The `batch` command: run the orchestrator over a word list file.

use anyhow::{Context, Result};
use lexiforge::derive::WordDeriver;
use lexiforge::orchestrator::{
    BatchControl, BatchEvent, BatchOptions, BatchRunner, CheckpointStore, ProjectLock,
};
use lexiforge::ui::BatchUI;
use std::path::Path;
use tokio::sync::mpsc;
use tracing::info;

use super::super::Cli;
use super::load_project;

/// Parse a word list: one word per line, blank lines and `#` comments skipped.
pub fn parse_word_list(content: &str) -> Vec<String> {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(str::to_string)
        .collect()
}

pub async fn cmd_batch(
    cli: &Cli,
    project_dir: &Path,
    wordlist: &Path,
    resume: bool,
    save_interval: Option<usize>,
    no_progress: bool,
) -> Result<()> {
    let config = load_project(project_dir, cli.verbose)?.with_save_interval(save_interval);
    config.ensure_directories()?;

    let content = tokio::fs::read_to_string(wordlist)
        .await
        .with_context(|| format!("Failed to read word list {}", wordlist.display()))?;
    let words = parse_word_list(&content);
    if words.is_empty() {
        println!("No words in {}", wordlist.display());
        return Ok(());
    }

    let _lock = ProjectLock::acquire(&config.lock_file())?;

    let store = config.store();
    let mut vocab = store.load().await?;
    info!(
        language = config.language_name(),
        words = words.len(),
        vocabulary = vocab.len(),
        "Starting batch"
    );

    let options = BatchOptions {
        save_interval: config.toml.batch.save_interval,
        batch_size_hint: config.toml.batch.batch_size_hint,
        pausable: config.toml.batch.pausable,
        resume,
    };
    let control = BatchControl::new();
    let (tx, mut rx) = mpsc::channel::<BatchEvent>(256);
    let runner = BatchRunner::new(
        WordDeriver::new(config.engine()),
        store,
        CheckpointStore::new(config.checkpoint_file()),
        config.analyzer(),
        options,
    )
    .with_enricher(config.enricher())
    .with_control(control.clone())
    .with_event_channel(tx);

    // Ctrl+C finishes the word in flight, checkpoints and exits
    let interrupt = control.clone();
    let ctrl_c = tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            interrupt.request_stop();
        }
    });

    let ui = BatchUI::new(words.len() as u64, cli.verbose, no_progress);
    let render = async {
        while let Some(event) = rx.recv().await {
            ui.handle(&event);
        }
    };

    // The runner owns the only sender; dropping it ends the render loop
    let run = async {
        let report = runner.run(&mut vocab, &words).await;
        drop(runner);
        report
    };
    let (report, ()) = tokio::join!(run, render);
    ctrl_c.abort();

    ui.summary(&report);
    Ok(())
}
