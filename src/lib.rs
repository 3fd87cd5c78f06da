pub mod analysis;
pub mod config;
pub mod derive;
pub mod enrichment;
pub mod errors;
pub mod init;
pub mod lexicon;
pub mod lexicon_config;
pub mod logging;
pub mod morphology;
pub mod orchestrator;
pub mod persist;
pub mod reconstruct;
pub mod transform;
pub mod ui;
