//! Launcher errors
//!
//! Failures that can happen between a click on "Run optimization" and the
//! captured output landing in the log label.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum LauncherError {
    /// The interpreter or script could not be started at all
    #[error("{program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    /// The worker thread could not build its async runtime
    #[error("failed to initialize async runtime: {0}")]
    Runtime(#[source] std::io::Error),

    /// The worker thread went away without reporting a result
    #[error("worker thread exited without a result")]
    WorkerLost,
}

impl LauncherError {
    /// Text shown in the log label in place of standard error
    pub fn log_text(&self) -> String {
        match self {
            LauncherError::Spawn { .. } => format!("spawn failed: {}", self),
            _ => format!("run failed: {}", self),
        }
    }
}
