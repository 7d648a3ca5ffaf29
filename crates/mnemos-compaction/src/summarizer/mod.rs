//! Summary generation: the default heuristic generator and the timeout
//! wrapper every stage calls through.

mod bounded;
mod heuristic;

pub use bounded::generate_bounded;
pub use heuristic::HeuristicSummarizer;
