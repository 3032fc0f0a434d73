//! Progress reporting sink for check milestones

use serde::{Deserialize, Serialize};
use tracing::info;

/// A progress milestone, as a percentage of the whole check
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgressUpdate {
    pub progress: u8,
}

impl ProgressUpdate {
    pub fn percent(progress: u8) -> Self {
        Self { progress }
    }
}

/// Sink for progress milestones emitted at phase boundaries
pub trait ProgressReporter: Send + Sync {
    fn report(&self, update: ProgressUpdate);
}

/// Reporter that logs milestones instead of forwarding them anywhere
#[derive(Debug, Clone, Copy, Default)]
pub struct LogReporter;

impl ProgressReporter for LogReporter {
    fn report(&self, update: ProgressUpdate) {
        info!(progress = update.progress, "Check progress");
    }
}
