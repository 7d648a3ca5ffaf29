//! Storage integration tests.

mod cascade_test;
mod compaction_queries_test;
mod file_persistence_test;
mod memory_crud_test;
mod search_test;

use chrono::{DateTime, Duration, Utc};
use mnemos_core::memory::{MemoryType, NewMemory};

pub fn make_memory(content: &str, path: &str) -> NewMemory {
    NewMemory::new(content, path)
}

pub fn aged(content: &str, days: i64, now: DateTime<Utc>) -> NewMemory {
    NewMemory::new(content, "memory/log.md").created_at(now - Duration::days(days))
}

pub fn summary_record(content: &str, level: u8, from: Vec<String>) -> NewMemory {
    NewMemory::new(content, "_compaction/weekly/2026-W01")
        .with_type(MemoryType::Summary)
        .with_compression(level, from)
}
