/// mnemos version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Compression level of an original, never-compacted record.
pub const LEVEL_ORIGINAL: u8 = 0;

/// Compression level after weekly compaction.
pub const LEVEL_WEEKLY: u8 = 1;

/// Compression level after monthly compaction.
pub const LEVEL_MONTHLY: u8 = 2;

/// Highest compression level a record can reach.
pub const MAX_COMPRESSION_LEVEL: u8 = LEVEL_MONTHLY;

/// Milliseconds per day.
pub const MILLIS_PER_DAY: u64 = 86_400_000;

/// Logical path prefix for records produced by the compaction pipeline.
pub const COMPACTION_PATH_PREFIX: &str = "_compaction";

