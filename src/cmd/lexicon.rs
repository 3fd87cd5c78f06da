//! Vocabulary inspection commands: lookup, analyze and reconstruct.

use anyhow::Result;
use console::style;
use lexiforge::analysis::TransformTable;
use lexiforge::derive::WordDeriver;
use lexiforge::morphology::normalize_word;
use lexiforge::orchestrator::ProjectLock;
use lexiforge::reconstruct::Reconstructor;
use lexiforge::ui::icons::{BOOK, CHECK, SPARKLE, WARN};
use lexiforge_common::WordEntry;
use std::path::Path;

use super::super::Cli;
use super::load_project;

pub async fn cmd_lookup(cli: &Cli, project_dir: &Path, word: &str) -> Result<()> {
    let config = load_project(project_dir, cli.verbose)?;
    let vocab = config.store().load().await?;
    let key = normalize_word(word).unwrap_or_else(|_| word.trim().to_lowercase());

    let forward = vocab.get(&key);
    let reverse = vocab.find_constructed(&key);

    if forward.is_none() && reverse.is_empty() {
        println!("No entry for '{}'", word.trim());
        return Ok(());
    }

    if let Some(entry) = forward {
        println!();
        println!("{}{} (source)", BOOK, style(&entry.source).bold());
        print_entry(entry);
    }
    for entry in reverse {
        println!();
        println!(
            "{}{} (constructed, from '{}')",
            BOOK,
            style(&entry.constructed).bold(),
            entry.source
        );
        print_entry(entry);
    }
    println!();

    Ok(())
}

fn print_entry(entry: &WordEntry) {
    println!("  Constructed:    {}", style(&entry.constructed).green());
    println!("  Pronunciation:  {}", entry.pronunciation);
    println!(
        "  Part of speech: {} ({} frequency)",
        entry.part_of_speech, entry.frequency_class
    );
    println!("  Definition:     {}", entry.definition.primary);
    match &entry.etymology {
        Some(ety) if ety.is_fallback() => {
            println!("  Origin:         {}", style("unavailable (enrichment failed)").dim());
        }
        Some(ety) => println!("  Origin:         {} (root '{}')", ety.origin, ety.root),
        None => {}
    }
    let morphemes: Vec<String> = entry
        .morphemes
        .iter()
        .map(|m| format!("{}:{}", m.kind.as_str(), m.value))
        .collect();
    println!("  Morphemes:      {}", morphemes.join(" + "));
    if !entry.applied_rules.is_empty() {
        println!(
            "  Rules:          {}",
            style(entry.applied_rules.join(", ")).dim()
        );
    }
}

fn format_table(table: &TransformTable) -> Vec<String> {
    table
        .iter()
        .map(|(source, targets)| {
            let targets: Vec<String> = targets
                .iter()
                .map(|(target, count)| format!("{}×{}", target, count))
                .collect();
            format!("    {} → {}", source, targets.join(" "))
        })
        .collect()
}

pub async fn cmd_analyze(cli: &Cli, project_dir: &Path, json: bool) -> Result<()> {
    let config = load_project(project_dir, cli.verbose)?;
    let vocab = config.store().load().await?;
    let analyzer = config.analyzer();
    let report = analyzer.analyze(&vocab);
    let advice = analyzer.recommend(&report, 0, vocab.len());

    if json {
        let out = serde_json::json!({
            "vocabularySize": vocab.len(),
            "report": report,
            "advice": advice,
        });
        println!("{}", serde_json::to_string_pretty(&out)?);
        return Ok(());
    }

    println!();
    println!(
        "Consistency score: {} ({} words)",
        style(format!("{:.1}", report.consistency_score)).cyan().bold(),
        vocab.len()
    );
    println!("Conflicted letters: {}", report.conflict_count);
    if !report.conflicted.is_empty() {
        let letters: String = report.conflicted.iter().collect();
        println!("  {}", style(letters).yellow());
    }

    if cli.verbose {
        println!();
        println!("  Vowels:");
        for line in format_table(&report.vowel_transforms) {
            println!("{}", line);
        }
        println!("  Consonants:");
        for line in format_table(&report.consonant_transforms) {
            println!("{}", line);
        }
    }

    println!();
    if advice.recommended {
        println!("{}Reconstruction recommended:", SPARKLE);
        for reason in &advice.reasons {
            println!("  - {}", reason);
        }
    } else {
        println!("{}No reconstruction needed", CHECK);
    }
    println!();

    Ok(())
}

pub async fn cmd_reconstruct(
    cli: &Cli,
    project_dir: &Path,
    previous_score: Option<f64>,
) -> Result<()> {
    let config = load_project(project_dir, cli.verbose)?;
    config.ensure_directories()?;
    let _lock = ProjectLock::acquire(&config.lock_file())?;

    let store = config.store();
    let mut vocab = store.load().await?;
    let deriver = WordDeriver::new(config.engine());
    let analyzer = config.analyzer();
    let report = Reconstructor::new(&deriver, &analyzer).run(&mut vocab, previous_score);

    if report.committed {
        store.flush(&vocab).await?;
    }

    println!();
    for diff in &report.changes {
        println!(
            "  {}: {} → {}  {}",
            diff.source,
            style(&diff.old_constructed).dim(),
            style(&diff.new_constructed).green(),
            style(format!("{} → {}", diff.old_pronunciation, diff.new_pronunciation)).dim()
        );
    }
    for failure in &report.failures {
        println!("  {}{}: {}", WARN, style(&failure.word).red(), failure.message);
    }
    println!(
        "{}Reconstructed {} words, {} changed",
        CHECK, report.reprocessed, report.changed
    );
    println!(
        "  Consistency: {:.1} → {:.1} ({:+.1})",
        report.before, report.after, report.delta
    );
    if !report.committed {
        println!("  Vocabulary left unchanged");
    }
    println!();

    Ok(())
}
