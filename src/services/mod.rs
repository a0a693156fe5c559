//! Service layer: orchestrates fetch, compute and persist around the pure
//! progression engines.

pub mod cache;
pub mod stats;
