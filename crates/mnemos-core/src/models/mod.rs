pub mod reports;
pub mod search;
pub mod stats;

pub use reports::{CompactionReport, ReconcileReport, RescoreReport};
pub use search::{CompactionCursor, SearchFilter, SearchOrder};
pub use stats::{IntegrityReport, StoreStats};
