pub mod access_ops;
pub mod aggregation;
pub mod compaction_ops;
pub mod maintenance;
pub mod memory_crud;
pub mod memory_search;
pub mod relationship_ops;
pub mod tag_ops;
