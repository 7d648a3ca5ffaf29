use serde::{Deserialize, Serialize};

use super::defaults;

/// Markdown reconciler and watcher configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MarkdownConfig {
    /// Root of the external text tree.
    pub root: String,
    /// Directory under `root` holding memory files (walked recursively).
    pub memory_dir: String,
    /// Top-level notes file under `root`.
    pub notes_file: String,
    /// File extensions picked up under `memory_dir`.
    pub extensions: Vec<String>,
    /// Sections shorter than this (after trimming) are discarded.
    pub min_section_chars: usize,
    /// Word-set Jaccard similarity at which a section counts as an edit.
    pub similarity_threshold: f64,
    /// Quiet period before a detected change triggers reconciliation.
    pub debounce_ms: u64,
    /// How often the watcher fingerprints the tree.
    pub poll_interval_ms: u64,
}

impl Default for MarkdownConfig {
    fn default() -> Self {
        Self {
            root: defaults::DEFAULT_MARKDOWN_ROOT.to_string(),
            memory_dir: defaults::DEFAULT_MEMORY_DIR.to_string(),
            notes_file: defaults::DEFAULT_NOTES_FILE.to_string(),
            extensions: defaults::DEFAULT_EXTENSIONS
                .iter()
                .map(|e| e.to_string())
                .collect(),
            min_section_chars: defaults::DEFAULT_MIN_SECTION_CHARS,
            similarity_threshold: defaults::DEFAULT_SIMILARITY_THRESHOLD,
            debounce_ms: defaults::DEFAULT_DEBOUNCE_MS,
            poll_interval_ms: defaults::DEFAULT_POLL_INTERVAL_MS,
        }
    }
}
