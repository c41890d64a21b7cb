//! Error types for scheduler operations.

use thiserror::Error;

/// Errors produced while starting or joining a run.
#[derive(Debug, Error)]
pub enum SchedulerError {
    /// Configuration failed validation before any thread was started.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    /// The OS refused to create a scheduler or instance thread.
    #[error("failed to spawn thread `{thread}`: {source}")]
    Spawn {
        /// Name of the thread that could not be created.
        thread: String,
        /// Underlying OS error.
        #[source]
        source: std::io::Error,
    },
    /// A joined thread terminated by panicking.
    #[error("thread panicked: {0}")]
    ThreadPanicked(String),
}

/// Application-facing result using anyhow for higher-level contexts.
pub type AppResult<T> = Result<T, anyhow::Error>;
