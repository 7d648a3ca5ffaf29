//! # mnemos-markdown
//!
//! Keeps the store consistent with a human-editable Markdown tree: list and
//! read files, split them into sections, diff the sections against stored
//! records by content hash and word-set similarity, and apply
//! add/update/remove. A polling watch loop coalesces edits through a
//! debounce window before asking for a reconciliation pass.

pub mod file_tree;
pub mod parser;
pub mod reconciler;
pub mod similarity;
pub mod watcher;

pub use file_tree::LocalFileTree;
pub use parser::{parse_sections, ParsedSection};
pub use reconciler::Reconciler;
pub use watcher::{spawn_watcher, WatchHandle};
