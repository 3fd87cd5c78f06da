//! Project initialization and status commands.

use anyhow::Result;
use console::style;
use lexiforge::orchestrator::CheckpointStore;
use lexiforge_common::{PronunciationMode, Style};
use std::path::Path;

use super::super::Cli;
use super::load_project;

pub fn cmd_init(
    project_dir: &Path,
    name: &str,
    language_style: Style,
    pronunciation: PronunciationMode,
) -> Result<()> {
    use lexiforge::init::{init_project, is_initialized};

    let was_initialized = is_initialized(project_dir);
    let result = init_project(project_dir, name, language_style, pronunciation)?;

    if result.created {
        println!(
            "Initialized language '{}' at {}",
            name.trim(),
            result.lexiforge_dir.display()
        );
        println!();
        println!("Created directory structure:");
        println!("  .lexiforge/");
        println!("  ├── lexicon.toml    # Style: {}", language_style);
        println!("  ├── dictionaries/   # Lookup tables (written by `lexiforge batch`)");
        println!("  └── logs/           # JSON logs");
        println!();
        println!("Next steps:");
        println!("  1. Put one source word per line in a file");
        println!("  2. Run `lexiforge batch <FILE>` to derive the vocabulary");
        println!("  3. Run `lexiforge analyze` to check consistency");
    } else if was_initialized {
        println!(
            "Language already initialized at {}",
            result.lexiforge_dir.display()
        );
        println!("lexicon.toml left unchanged; the style of a language cannot change.");
    }

    Ok(())
}

pub async fn cmd_status(cli: &Cli, project_dir: &Path) -> Result<()> {
    let config = load_project(project_dir, cli.verbose)?;
    let store = config.store();
    let vocab = store.load().await?;
    let checkpoint = CheckpointStore::new(config.checkpoint_file()).load().await?;

    println!();
    println!("Language:       {}", style(config.language_name()).bold());
    println!("Style:          {}", config.toml.language.style);
    println!("Pronunciation:  {}", config.toml.language.pronunciation);
    println!("Vocabulary:     {} words", style(vocab.len()).cyan());
    println!(
        "Enrichment:     {}",
        if config.toml.enrichment.enabled {
            config.toml.enrichment.endpoint.as_str()
        } else {
            "disabled"
        }
    );

    match checkpoint {
        Some(cp) => {
            println!(
                "Checkpoint:     word {} of {} ({} remaining, saved {})",
                cp.current_index,
                cp.total_words,
                style(cp.remaining()).yellow(),
                cp.timestamp.format("%Y-%m-%d %H:%M:%S")
            );
            if cp.language_name != config.language_name() {
                println!(
                    "  {}",
                    style(format!(
                        "checkpoint belongs to '{}' and will be ignored",
                        cp.language_name
                    ))
                    .yellow()
                );
            } else {
                println!("  Resume with `lexiforge batch <FILE> --resume`");
            }
        }
        None => println!("Checkpoint:     none"),
    }
    println!();

    Ok(())
}
