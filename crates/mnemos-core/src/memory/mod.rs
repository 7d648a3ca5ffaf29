pub mod access;
pub mod base;
pub mod importance;
pub mod relationships;
pub mod tag;
pub mod types;

pub use access::{AccessAction, AccessLogEntry};
pub use base::{Memory, MemoryUpdate, NewMemory};
pub use importance::{clamp01, ImportanceLevel};
pub use relationships::{Relation, RelationType};
pub use tag::{normalize_tags, Tag};
pub use types::MemoryType;
