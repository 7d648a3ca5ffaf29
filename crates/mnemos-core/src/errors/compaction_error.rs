/// Compaction pipeline errors.
#[derive(Debug, thiserror::Error)]
pub enum CompactionError {
    #[error("summary generation for group {group} timed out after {timeout_ms}ms")]
    SummaryTimeout { group: String, timeout_ms: u64 },

    #[error("summary generation for group {group} failed: {reason}")]
    SummaryFailed { group: String, reason: String },

    #[error("compaction already in progress")]
    AlreadyRunning,
}
