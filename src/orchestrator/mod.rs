pub mod control;
pub mod lock;
pub mod runner;
pub mod state;

pub use control::BatchControl;
pub use lock::ProjectLock;
pub use runner::{BatchEvent, BatchOptions, BatchOutcome, BatchReport, BatchRunner, BatchState};
pub use state::{BatchCheckpoint, CheckpointStore};
