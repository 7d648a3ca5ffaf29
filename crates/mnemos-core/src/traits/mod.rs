pub mod file_tree;
pub mod storage;
pub mod summarizer;

pub use file_tree::{FileEntry, IFileTree};
pub use storage::IMemoryStore;
pub use summarizer::{Granularity, ISummaryGenerator};
