//! CLI command implementations.
//!
//! Each submodule owns one or more related `Commands` variants:
//!
//! | Module     | Commands handled                    |
//! |------------|-------------------------------------|
//! | `project`  | `Init`, `Status`                    |
//! | `batch`    | `Batch`                             |
//! | `lexicon`  | `Lookup`, `Analyze`, `Reconstruct`  |

pub mod batch;
pub mod lexicon;
pub mod project;

pub use batch::cmd_batch;
pub use lexicon::{cmd_analyze, cmd_lookup, cmd_reconstruct};
pub use project::{cmd_init, cmd_status};

use anyhow::Result;
use lexiforge::config::Config;
use std::path::Path;
use tracing::warn;

/// Load the configuration of an initialized project, surfacing config warnings.
pub(crate) fn load_project(project_dir: &Path, verbose: bool) -> Result<Config> {
    let config = Config::load(project_dir, verbose)?;
    if !config.is_initialized() {
        anyhow::bail!(
            "No language found in {}. Run 'lexiforge init --name <NAME>' first.",
            config.project_dir.display()
        );
    }
    for warning in &config.warnings {
        warn!("{}", warning);
    }
    Ok(config)
}
