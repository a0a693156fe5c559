//! This module contains the pure progression engines: leveling, streaks,
//! achievement rules and dream-pattern aggregation. Nothing in here performs I/O.

pub mod achievements;
pub mod leveling;
pub mod patterns;
pub mod streaks;
