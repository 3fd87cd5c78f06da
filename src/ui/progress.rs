use console::style;
use indicatif::{MultiProgress, ProgressBar, ProgressStyle};
use std::time::Duration;

use crate::orchestrator::{BatchEvent, BatchOutcome, BatchReport};
use crate::ui::icons::{CHECK, CROSS, PAUSE, SAVE, SKIP, SPARKLE, STOP, WARN};

/// Terminal UI for a batch run, rendered via `indicatif`.
///
/// Two bars are stacked vertically:
/// - Words bar: how many input words have been handled
/// - Status line: the word just committed, or the pause/stop state
pub struct BatchUI {
    multi: MultiProgress,
    words_bar: ProgressBar,
    status_bar: ProgressBar,
    verbose: bool,
}

impl BatchUI {
    /// Create the UI. A hidden UI swallows all output (`--no-progress`).
    pub fn new(total_words: u64, verbose: bool, hidden: bool) -> Self {
        let multi = MultiProgress::new();

        let (words_bar, status_bar) = if hidden {
            (ProgressBar::hidden(), ProgressBar::hidden())
        } else {
            let words_bar = multi.add(ProgressBar::new(total_words));
            words_bar.set_style(
                ProgressStyle::default_bar()
                    .template("{prefix:.bold.dim} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
                    .unwrap_or_else(|_| ProgressStyle::default_bar())
                    .progress_chars("█▓▒░"),
            );
            words_bar.set_prefix("Words");

            let status_bar = multi.add(ProgressBar::new_spinner());
            status_bar.set_style(
                ProgressStyle::default_spinner()
                    .template("{prefix:.bold.dim} {spinner} {msg}")
                    .unwrap_or_else(|_| ProgressStyle::default_spinner()),
            );
            status_bar.set_prefix("     ");
            status_bar.enable_steady_tick(Duration::from_millis(100));
            (words_bar, status_bar)
        };

        Self {
            multi,
            words_bar,
            status_bar,
            verbose,
        }
    }

    /// Print a line above the bars, falling back to stderr.
    fn print_line(&self, msg: impl AsRef<str>) {
        if self.words_bar.is_hidden() || self.multi.println(msg.as_ref()).is_err() {
            eprintln!("{}", msg.as_ref());
        }
    }

    /// Update the bars for one event.
    pub fn handle(&self, event: &BatchEvent) {
        match event {
            BatchEvent::Started {
                total,
                already_processed,
            } => {
                self.words_bar.set_length(*total as u64);
                if *already_processed > 0 {
                    self.words_bar.set_message(format!(
                        "resuming, {} already done",
                        style(already_processed).cyan()
                    ));
                }
            }
            BatchEvent::Committed {
                index,
                source,
                constructed,
            } => {
                self.words_bar.set_position(*index as u64 + 1);
                self.status_bar.set_message(format!(
                    "{} {} {}",
                    style(source).dim(),
                    style("→").dim(),
                    style(constructed).green()
                ));
                if self.verbose {
                    self.print_line(format!("    {} → {}", source, style(constructed).green()));
                }
            }
            BatchEvent::Skipped { index, word } => {
                self.words_bar.set_position(*index as u64 + 1);
                if self.verbose {
                    self.print_line(format!(
                        "    {}{} already in vocabulary",
                        SKIP,
                        style(word).yellow()
                    ));
                }
            }
            BatchEvent::Failed {
                index,
                word,
                message,
            } => {
                self.words_bar.set_position(*index as u64 + 1);
                self.print_line(format!(
                    "    {}{}: {}",
                    CROSS,
                    style(word).red(),
                    style(message).dim()
                ));
            }
            BatchEvent::Paused { committed } => {
                self.status_bar.set_message(format!(
                    "{}paused after {} words",
                    PAUSE,
                    style(committed).cyan()
                ));
            }
            BatchEvent::Resumed => {
                self.status_bar.set_message("resumed");
            }
            BatchEvent::Checkpointed {
                next_index,
                vocabulary_size,
            } => {
                if self.verbose {
                    self.print_line(format!(
                        "    {}checkpoint at word {} ({} entries)",
                        SAVE, next_index, vocabulary_size
                    ));
                }
            }
            BatchEvent::StopRequested { committed } => {
                self.status_bar.set_message(format!(
                    "{}stopping after {} words...",
                    STOP,
                    style(committed).cyan()
                ));
            }
            BatchEvent::Finished { .. } => {
                self.status_bar.finish_and_clear();
                self.words_bar.finish();
            }
        }
    }

    /// Print the end-of-run summary.
    pub fn summary(&self, report: &BatchReport) {
        let headline = match report.outcome {
            BatchOutcome::Completed => format!(
                "{}Batch completed: {} new words",
                CHECK,
                style(report.words_processed).green().bold()
            ),
            BatchOutcome::Stopped => format!(
                "{}Batch stopped at word {}: {} new words (resume with --resume)",
                STOP,
                report.last_index,
                style(report.words_processed).yellow().bold()
            ),
        };
        println!("{}", headline);

        if !report.skipped.is_empty() {
            println!(
                "  {}{} duplicates skipped",
                SKIP,
                style(report.skipped.len()).yellow()
            );
        }
        if !report.failures.is_empty() {
            println!(
                "  {}{} words failed",
                CROSS,
                style(report.failures.len()).red()
            );
        }
        for warning in &report.checkpoint_warnings {
            println!("  {}{}", WARN, style(warning).yellow());
        }

        println!(
            "  Consistency score: {}",
            style(format!("{:.1}", report.consistency_score)).cyan()
        );
        if report.advice.recommended {
            println!(
                "  {}Reconstruction recommended:",
                SPARKLE
            );
            for reason in &report.advice.reasons {
                println!("    - {}", reason);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::ReconstructionAdvice;

    #[test]
    fn test_hidden_ui_tracks_position() {
        let ui = BatchUI::new(0, false, true);
        ui.handle(&BatchEvent::Started {
            total: 3,
            already_processed: 0,
        });
        ui.handle(&BatchEvent::Committed {
            index: 1,
            source: "water".to_string(),
            constructed: "vader".to_string(),
        });
        assert_eq!(ui.words_bar.length(), Some(3));
        assert_eq!(ui.words_bar.position(), 2);
        ui.handle(&BatchEvent::Finished {
            outcome: BatchOutcome::Completed,
            words_processed: 2,
        });
        assert!(ui.words_bar.is_finished());
    }

    #[test]
    fn test_summary_does_not_panic() {
        let ui = BatchUI::new(1, true, true);
        ui.summary(&BatchReport {
            outcome: BatchOutcome::Stopped,
            words_processed: 0,
            last_index: 0,
            skipped: vec!["sun".to_string()],
            failures: Vec::new(),
            checkpoint_warnings: vec!["disk full".to_string()],
            consistency_score: 0.0,
            advice: ReconstructionAdvice {
                recommended: true,
                reasons: vec!["consistency score 0.0 is below 70.0".to_string()],
            },
        });
    }
}
