//! # mnemos-scoring
//!
//! Two independent computations over a memory:
//! - a query-time relevance score (importance, recency, text match), used to
//!   rank search candidates;
//! - a background recalculation of the stored importance score (decay,
//!   access boost, recency boost), run after every sync.

pub mod engine;
pub mod factors;
pub mod formula;

pub use engine::{ScoredMemory, ScoringEngine};
pub use formula::ScoreBreakdown;
