use serde::{Deserialize, Serialize};

use super::defaults;

/// Backend façade configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BackendConfig {
    /// Characters kept before the first query match in a snippet.
    pub snippet_before: usize,
    /// Characters kept from the match onwards in a snippet.
    pub snippet_after: usize,
    /// Number of tags reported by `status()`.
    pub top_tags: usize,
    /// Store candidates fetched per requested search hit before ranking.
    pub candidate_multiplier: usize,
    /// Pending sync/compaction jobs before submitters wait.
    pub queue_capacity: usize,
}

impl BackendConfig {
    pub fn snippet_width(&self) -> usize {
        self.snippet_before + self.snippet_after
    }
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            snippet_before: defaults::DEFAULT_SNIPPET_BEFORE,
            snippet_after: defaults::DEFAULT_SNIPPET_AFTER,
            top_tags: defaults::DEFAULT_TOP_TAGS,
            candidate_multiplier: defaults::DEFAULT_CANDIDATE_MULTIPLIER,
            queue_capacity: defaults::DEFAULT_QUEUE_CAPACITY,
        }
    }
}
