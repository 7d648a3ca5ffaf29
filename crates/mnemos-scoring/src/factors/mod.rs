//! Individual scoring factors. Each returns a value in [0, 1] unless noted.

pub mod access;
pub mod decay;
pub mod recency;
pub mod text_match;
