//! Sequential, resumable batch processing of a word list.
//!
//! Words are processed strictly one at a time. The only suspension points
//! are enrichment calls and persistence; while a word is suspended no other
//! word starts. Pause and stop are cooperative: both are checked at every
//! word boundary, and a pause raised while a word is in flight is recorded
//! immediately but only takes effect once that word has committed.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use super::control::BatchControl;
use super::state::{BatchCheckpoint, CheckpointStore};
use crate::analysis::{ConsistencyAnalyzer, ReconstructionAdvice};
use crate::derive::WordDeriver;
use crate::enrichment::Enricher;
use crate::errors::{WordError, WordFailure};
use crate::lexicon::{AddOutcome, LexiconStore, Vocabulary};
use crate::morphology::normalize_word;
use lexiforge_common::WordEntry;
use std::collections::BTreeSet;

/// Lifecycle of a batch run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BatchState {
    Running,
    Paused,
    StopRequested,
    Completed,
    Stopped,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BatchOutcome {
    Completed,
    Stopped,
}

impl std::fmt::Display for BatchOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BatchOutcome::Completed => write!(f, "completed"),
            BatchOutcome::Stopped => write!(f, "stopped"),
        }
    }
}

/// Events emitted during a batch run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum BatchEvent {
    Started {
        total: usize,
        /// Words the resume checkpoint already covers
        already_processed: usize,
    },
    Committed {
        index: usize,
        source: String,
        constructed: String,
    },
    /// The source word is already in the vocabulary.
    Skipped {
        index: usize,
        word: String,
    },
    Failed {
        index: usize,
        word: String,
        message: String,
    },
    /// Pause observed; `committed` words of this run are in the vocabulary.
    Paused {
        committed: usize,
    },
    Resumed,
    Checkpointed {
        next_index: usize,
        vocabulary_size: usize,
    },
    StopRequested {
        committed: usize,
    },
    Finished {
        outcome: BatchOutcome,
        words_processed: usize,
    },
}

#[derive(Debug, Clone)]
pub struct BatchOptions {
    /// Committed words between checkpoints; 0 disables periodic saves
    pub save_interval: usize,
    pub batch_size_hint: usize,
    pub pausable: bool,
    /// Continue from the saved checkpoint, if any
    pub resume: bool,
}

impl Default for BatchOptions {
    fn default() -> Self {
        Self {
            save_interval: 25,
            batch_size_hint: 500,
            pausable: true,
            resume: false,
        }
    }
}

/// Result of a batch run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchReport {
    pub outcome: BatchOutcome,
    /// Words committed to the vocabulary by this run
    pub words_processed: usize,
    /// Index of the next unprocessed word in the input list
    pub last_index: usize,
    /// Source words skipped because they were already in the vocabulary
    pub skipped: Vec<String>,
    pub failures: Vec<WordFailure>,
    /// Checkpoint or dictionary writes that failed; the run continued
    pub checkpoint_warnings: Vec<String>,
    pub consistency_score: f64,
    pub advice: ReconstructionAdvice,
}

pub struct BatchRunner {
    deriver: WordDeriver,
    enricher: Enricher,
    store: LexiconStore,
    checkpoints: CheckpointStore,
    analyzer: ConsistencyAnalyzer,
    options: BatchOptions,
    control: BatchControl,
    event_tx: Option<mpsc::Sender<BatchEvent>>,
}

/// Mutable bookkeeping for one run.
struct RunState {
    state: BatchState,
    checkpoint: BatchCheckpoint,
    /// Words the resume checkpoint already covered when the run started
    resumed_words: BTreeSet<String>,
    committed: usize,
    since_save: usize,
    /// A Paused event was emitted and no Resumed has followed yet
    pause_reported: bool,
    skipped: Vec<String>,
    failures: Vec<WordFailure>,
    warnings: Vec<String>,
}

impl RunState {
    fn transition(&mut self, to: BatchState) {
        if self.state != to {
            debug!(from = ?self.state, to = ?to, "Batch state change");
            self.state = to;
        }
    }
}

impl BatchRunner {
    pub fn new(
        deriver: WordDeriver,
        store: LexiconStore,
        checkpoints: CheckpointStore,
        analyzer: ConsistencyAnalyzer,
        options: BatchOptions,
    ) -> Self {
        Self {
            deriver,
            enricher: Enricher::disabled(),
            store,
            checkpoints,
            analyzer,
            options,
            control: BatchControl::new(),
            event_tx: None,
        }
    }

    pub fn with_enricher(mut self, enricher: Enricher) -> Self {
        self.enricher = enricher;
        self
    }

    pub fn with_control(mut self, control: BatchControl) -> Self {
        self.control = control;
        self
    }

    pub fn with_event_channel(mut self, tx: mpsc::Sender<BatchEvent>) -> Self {
        self.event_tx = Some(tx);
        self
    }

    pub fn control(&self) -> &BatchControl {
        &self.control
    }

    /// Process `words` into `vocab`. Never fails: per-word errors and
    /// persistence problems are collected in the report.
    pub async fn run(&self, vocab: &mut Vocabulary, words: &[String]) -> BatchReport {
        let mut warnings = Vec::new();
        let checkpoint = match self.initial_checkpoint(words).await {
            Ok(cp) => cp,
            Err(warning) => {
                warn!("{}", warning);
                warnings.push(warning);
                BatchCheckpoint::new(self.store.language_name(), words.len())
            }
        };
        let mut run = RunState {
            state: BatchState::Running,
            resumed_words: checkpoint.processed_words.clone(),
            checkpoint,
            committed: 0,
            since_save: 0,
            pause_reported: false,
            skipped: Vec::new(),
            failures: Vec::new(),
            warnings,
        };

        if words.len() > self.options.batch_size_hint {
            info!(
                total = words.len(),
                hint = self.options.batch_size_hint,
                "Word list is larger than the batch size hint"
            );
        }

        info!(
            total = words.len(),
            already_processed = run.checkpoint.processed_words.len(),
            "Batch started"
        );
        self.emit(BatchEvent::Started {
            total: words.len(),
            already_processed: run.checkpoint.processed_words.len(),
        })
        .await;

        for (index, raw) in words.iter().enumerate() {
            if !self.at_boundary(&mut run).await {
                break;
            }

            self.process_one(&mut run, vocab, index, raw).await;
            run.checkpoint.current_index = index + 1;

            if self.options.save_interval > 0 && run.since_save >= self.options.save_interval {
                self.persist(&mut run, vocab).await;
            }
        }
        if run.pause_reported && !self.control.is_paused() {
            self.leave_pause(&mut run).await;
        }

        if run.state == BatchState::StopRequested || self.control.is_stop_requested() {
            self.finish_stopped(&mut run, vocab).await
        } else {
            self.finish_completed(&mut run, vocab).await
        }
    }

    async fn initial_checkpoint(&self, words: &[String]) -> Result<BatchCheckpoint, String> {
        let fresh = BatchCheckpoint::new(self.store.language_name(), words.len());
        if !self.options.resume {
            return Ok(fresh);
        }
        match self.checkpoints.load().await {
            Ok(Some(mut cp)) => {
                if cp.language_name != self.store.language_name() {
                    return Err(format!(
                        "Checkpoint belongs to language '{}', starting fresh",
                        cp.language_name
                    ));
                }
                cp.restrict_to(words.iter().filter_map(|w| normalize_word(w).ok()));
                cp.total_words = words.len();
                info!(
                    processed = cp.processed_words.len(),
                    "Resuming from checkpoint"
                );
                Ok(cp)
            }
            Ok(None) => Ok(fresh),
            Err(e) => Err(format!("Could not read checkpoint, starting fresh: {}", e)),
        }
    }

    /// Honor pause and stop between words. Returns false when the run must end.
    async fn at_boundary(&self, run: &mut RunState) -> bool {
        if self.control.is_stop_requested() {
            self.request_stop(run).await;
            return false;
        }
        if !self.options.pausable {
            return true;
        }
        if !self.control.is_paused() {
            // pause raised and cleared while the last word was in flight
            if run.pause_reported {
                self.leave_pause(run).await;
            }
            return true;
        }

        if !run.pause_reported {
            self.enter_pause(run).await;
        }
        info!(committed = run.committed, "Batch paused");

        tokio::select! {
            _ = self.control.stopped() => {
                self.request_stop(run).await;
                false
            }
            _ = self.control.resumed() => {
                self.leave_pause(run).await;
                true
            }
        }
    }

    async fn leave_pause(&self, run: &mut RunState) {
        run.pause_reported = false;
        run.transition(BatchState::Running);
        info!("Batch resumed");
        self.emit(BatchEvent::Resumed).await;
    }

    async fn enter_pause(&self, run: &mut RunState) {
        run.pause_reported = true;
        run.transition(BatchState::Paused);
        self.emit(BatchEvent::Paused {
            committed: run.committed,
        })
        .await;
    }

    async fn request_stop(&self, run: &mut RunState) {
        run.transition(BatchState::StopRequested);
        info!(committed = run.committed, "Stop requested");
        self.emit(BatchEvent::StopRequested {
            committed: run.committed,
        })
        .await;
    }

    async fn process_one(&self, run: &mut RunState, vocab: &mut Vocabulary, index: usize, raw: &str) {
        let word = match normalize_word(raw) {
            Ok(w) => w,
            Err(e) => {
                self.record_failure(run, index, raw, &e).await;
                return;
            }
        };

        if run.resumed_words.contains(&word) {
            debug!(word = %word, index, "Already processed in an earlier run");
            return;
        }

        if vocab.contains(&word) {
            warn!(word = %word, index, "Word already in vocabulary, skipping");
            run.checkpoint.processed_words.insert(word.clone());
            run.skipped.push(word.clone());
            self.emit(BatchEvent::Skipped { index, word }).await;
            return;
        }

        let result = self.observe_pause(run, self.derive(&word)).await;
        match result {
            Ok(entry) => {
                let constructed = entry.constructed.clone();
                if vocab.insert(entry) == AddOutcome::Added {
                    run.committed += 1;
                    run.since_save += 1;
                    run.checkpoint.processed_words.insert(word.clone());
                    debug!(word = %word, constructed = %constructed, index, "Committed");
                    self.emit(BatchEvent::Committed {
                        index,
                        source: word,
                        constructed,
                    })
                    .await;
                }
            }
            Err(e) => self.record_failure(run, index, &word, &e).await,
        }
    }

    async fn derive(&self, word: &str) -> Result<WordEntry, WordError> {
        let etymology = self.enricher.etymology(word).await;
        let definition = self.enricher.definition(word).await;
        self.deriver.derive(word, etymology, definition, Utc::now())
    }

    /// Drive the in-flight word to completion, recording a pause the moment
    /// it is raised.
    async fn observe_pause<F: Future>(&self, run: &mut RunState, work: F) -> F::Output {
        if !self.options.pausable || run.pause_reported {
            return work.await;
        }
        tokio::pin!(work);
        tokio::select! {
            biased;
            out = &mut work => out,
            _ = self.control.paused() => {
                self.enter_pause(run).await;
                work.await
            }
        }
    }

    async fn record_failure(
        &self,
        run: &mut RunState,
        index: usize,
        word: &str,
        error: &impl std::fmt::Display,
    ) {
        let failure = WordFailure::new(word, error);
        warn!(word = %word, index, error = %failure.message, "Word failed, skipping");
        self.emit(BatchEvent::Failed {
            index,
            word: word.to_string(),
            message: failure.message.clone(),
        })
        .await;
        run.failures.push(failure);
    }

    /// Flush the vocabulary and dictionaries, then write the checkpoint.
    ///
    /// The checkpoint is only written once the vocabulary it describes is on
    /// disk; a failed flush leaves the previous resume point in place.
    /// Failures become warnings.
    async fn persist(&self, run: &mut RunState, vocab: &Vocabulary) {
        run.since_save = 0;
        run.checkpoint.timestamp = Utc::now();
        run.checkpoint.vocabulary_size = vocab.len();

        if let Err(e) = self.store.flush(vocab).await {
            warn!(error = %e, "Dictionary flush failed, checkpoint not written");
            run.warnings.push(e.to_string());
            return;
        }
        if let Err(e) = self.checkpoints.save(&run.checkpoint).await {
            warn!(error = %e, "Checkpoint save failed");
            run.warnings.push(e.to_string());
            return;
        }

        self.emit(BatchEvent::Checkpointed {
            next_index: run.checkpoint.current_index,
            vocabulary_size: vocab.len(),
        })
        .await;
    }

    async fn finish_stopped(&self, run: &mut RunState, vocab: &Vocabulary) -> BatchReport {
        if run.state != BatchState::StopRequested {
            self.request_stop(run).await;
        }
        self.persist(run, vocab).await;
        run.transition(BatchState::Stopped);
        self.report(run, vocab, BatchOutcome::Stopped).await
    }

    async fn finish_completed(&self, run: &mut RunState, vocab: &Vocabulary) -> BatchReport {
        if let Err(e) = self.store.flush(vocab).await {
            warn!(error = %e, "Final dictionary flush failed");
            run.warnings.push(e.to_string());
        }
        if let Err(e) = self.checkpoints.discard().await {
            warn!(error = %e, "Could not discard checkpoint");
            run.warnings.push(e.to_string());
        }
        run.transition(BatchState::Completed);
        self.report(run, vocab, BatchOutcome::Completed).await
    }

    async fn report(&self, run: &mut RunState, vocab: &Vocabulary, outcome: BatchOutcome) -> BatchReport {
        let consistency = self.analyzer.analyze(vocab);
        let advice = self
            .analyzer
            .recommend(&consistency, run.committed, vocab.len());
        if advice.recommended {
            info!(reasons = ?advice.reasons, "Reconstruction recommended");
        }

        info!(
            outcome = %outcome,
            words_processed = run.committed,
            skipped = run.skipped.len(),
            failed = run.failures.len(),
            "Batch finished"
        );
        self.emit(BatchEvent::Finished {
            outcome,
            words_processed: run.committed,
        })
        .await;

        BatchReport {
            outcome,
            words_processed: run.committed,
            last_index: run.checkpoint.current_index,
            skipped: std::mem::take(&mut run.skipped),
            failures: std::mem::take(&mut run.failures),
            checkpoint_warnings: std::mem::take(&mut run.warnings),
            consistency_score: consistency.consistency_score,
            advice,
        }
    }

    async fn emit(&self, event: BatchEvent) {
        if let Some(ref tx) = self.event_tx {
            tx.send(event).await.ok();
        }
    }
}
