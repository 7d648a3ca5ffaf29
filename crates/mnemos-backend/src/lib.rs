//! # mnemos-backend
//!
//! The façade over the mnemos engines. `MemoryBackend` owns the store,
//! scorer, compaction pipeline and reconciler, serializes sync and
//! compaction through a single-consumer job queue, and drives the
//! debounced Markdown watcher.

pub mod engine;
mod jobs;
pub mod models;
pub mod snippet;
pub mod tracing_setup;

pub use engine::MemoryBackend;
pub use models::{SearchHit, SearchOptions, StatusReport, SyncReport};
pub use tracing_setup::init_tracing;
