//! # mnemos-core
//!
//! Foundation crate for the mnemos memory store.
//! Defines the memory data model, the store/summarizer/file-tree contracts,
//! the error taxonomy, and the single resolved configuration object.
//! Every other crate in the workspace depends on this.

pub mod config;
pub mod constants;
pub mod errors;
pub mod memory;
pub mod models;
pub mod traits;

// Re-export the most commonly used types at the crate root.
pub use config::MnemosConfig;
pub use errors::{MnemosError, MnemosResult};
pub use memory::{ImportanceLevel, Memory, MemoryType, MemoryUpdate, NewMemory};
