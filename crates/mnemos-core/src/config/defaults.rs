//! Default values for every configuration field.

// Storage
pub const DEFAULT_DB_PATH: &str = "mnemos.db";
pub const DEFAULT_READ_POOL_SIZE: usize = 4;
pub const DEFAULT_PAGE_SIZE: usize = 20;

// Scoring
pub const DEFAULT_IMPORTANCE_WEIGHT: f64 = 0.3;
pub const DEFAULT_RECENCY_WEIGHT: f64 = 0.2;
pub const DEFAULT_RECENCY_WINDOW_DAYS: f64 = 30.0;
pub const DEFAULT_DECAY_FACTOR: f64 = 0.98;
pub const DEFAULT_ACCESS_BOOST: f64 = 0.01;
pub const DEFAULT_RECENCY_BOOST: f64 = 0.1;

// Compaction
pub const DEFAULT_WEEKLY_AGE_DAYS: u64 = 7;
pub const DEFAULT_MONTHLY_AGE_DAYS: u64 = 30;
pub const DEFAULT_ARCHIVE_AGE_DAYS: u64 = 90;
pub const DEFAULT_WEEKLY_MIN_GROUP: usize = 5;
pub const DEFAULT_MONTHLY_MIN_GROUP: usize = 2;
pub const DEFAULT_COMPACTION_BATCH_LIMIT: usize = 1000;
pub const DEFAULT_SUMMARY_TIMEOUT_MINUTES: u64 = 1;

// Markdown
pub const DEFAULT_MARKDOWN_ROOT: &str = ".";
pub const DEFAULT_MEMORY_DIR: &str = "memory";
pub const DEFAULT_NOTES_FILE: &str = "MEMORY.md";
pub const DEFAULT_EXTENSIONS: &[&str] = &["md", "markdown", "txt"];
pub const DEFAULT_MIN_SECTION_CHARS: usize = 50;
pub const DEFAULT_SIMILARITY_THRESHOLD: f64 = 0.7;
pub const DEFAULT_DEBOUNCE_MS: u64 = 1500;
pub const DEFAULT_POLL_INTERVAL_MS: u64 = 250;

// Backend
pub const DEFAULT_SNIPPET_BEFORE: usize = 200;
pub const DEFAULT_SNIPPET_AFTER: usize = 500;
pub const DEFAULT_TOP_TAGS: usize = 10;
pub const DEFAULT_CANDIDATE_MULTIPLIER: usize = 3;
pub const DEFAULT_QUEUE_CAPACITY: usize = 16;

// Observability
pub const DEFAULT_LOG_LEVEL: &str = "info";
