use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use lexiforge_common::{PronunciationMode, Style};
use std::path::PathBuf;

mod cmd;

#[derive(Parser)]
#[command(name = "lexiforge")]
#[command(version, about = "Derive a consistent constructed-language lexicon from source word lists")]
pub struct Cli {
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[arg(long, global = true)]
    pub project_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Create .lexiforge/lexicon.toml for a new language
    Init {
        /// Language name
        #[arg(short, long)]
        name: String,

        /// Transformation style (fixed for the language's lifetime)
        #[arg(short, long, default_value = "default")]
        style: Style,

        /// Pronunciation rendering: symbolic or plain
        #[arg(short, long, default_value = "symbolic")]
        pronunciation: PronunciationMode,
    },
    /// Process a word list (one word per line, `#` comments ignored)
    Batch {
        wordlist: PathBuf,

        /// Continue from the saved checkpoint
        #[arg(long)]
        resume: bool,

        /// Words committed between checkpoints (overrides lexicon.toml)
        #[arg(long)]
        save_interval: Option<usize>,

        /// Disable the progress bars
        #[arg(long)]
        no_progress: bool,
    },
    /// Show vocabulary size, style and checkpoint state
    Status,
    /// Look a word up in both directions
    Lookup { word: String },
    /// Score the vocabulary's consistency
    Analyze {
        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },
    /// Re-derive every entry with the current rules
    Reconstruct {
        /// Last measured consistency score, reported as "before"
        #[arg(long)]
        previous_score: Option<f64>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let project_dir = match cli.project_dir.clone() {
        Some(dir) => dir,
        None => std::env::current_dir().context("Failed to get current directory")?,
    };

    // File logging only once `init` has created the project directory
    let lexiforge_dir = project_dir.join(lexiforge::config::LEXIFORGE_DIR);
    let log_dir = lexiforge_dir.is_dir().then(|| lexiforge_dir.join("logs"));
    let _log_guard = lexiforge::logging::init(cli.verbose, log_dir.as_deref())?;

    match &cli.command {
        Commands::Init {
            name,
            style,
            pronunciation,
        } => cmd::cmd_init(&project_dir, name, *style, *pronunciation)?,
        Commands::Batch {
            wordlist,
            resume,
            save_interval,
            no_progress,
        } => {
            cmd::cmd_batch(
                &cli,
                &project_dir,
                wordlist,
                *resume,
                *save_interval,
                *no_progress,
            )
            .await?
        }
        Commands::Status => cmd::cmd_status(&cli, &project_dir).await?,
        Commands::Lookup { word } => cmd::cmd_lookup(&cli, &project_dir, word).await?,
        Commands::Analyze { json } => cmd::cmd_analyze(&cli, &project_dir, *json).await?,
        Commands::Reconstruct { previous_score } => {
            cmd::cmd_reconstruct(&cli, &project_dir, *previous_score).await?
        }
    }

    Ok(())
}
