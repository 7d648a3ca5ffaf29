//! # mnemos-compaction
//!
//! Three-stage, one-directional compaction: weekly summaries over level-0
//! records (sources marked, kept), monthly summaries over level-1 records
//! (sources deleted), and in-place archival of cold level-2 records.
//! Each group is processed independently; failures are counted, never
//! rolled back.

pub mod engine;
pub mod pipeline;
pub mod summarizer;

pub use engine::CompactionEngine;
pub use summarizer::HeuristicSummarizer;
