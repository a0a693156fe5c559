//! Contains the business logic for pilot level progression.

use serde::Serialize;

// Constants for progression balance.
const BASE_XP_PER_LEVEL: i64 = 100;
const XP_STEP_PER_LEVEL: i64 = 50;

/// XP required to advance *out* of `level`. Not cumulative.
pub fn xp_for_next_level(level: i32) -> i64 {
    BASE_XP_PER_LEVEL + XP_STEP_PER_LEVEL * (i64::from(level) - 1)
}

/// Cumulative XP needed to reach `level` from zero.
pub fn xp_for_level(level: i32) -> i64 {
    (1..level).map(xp_for_next_level).sum()
}

/// Maps a cumulative XP total to a level (always >= 1).
///
/// Accumulates per-level requirements from zero and climbs while the total
/// still covers the next one, so it is monotonic non-decreasing in `xp`.
pub fn calculate_level(xp: i64) -> i32 {
    let mut level = 1;
    let mut cumulative = 0;
    loop {
        let needed = xp_for_next_level(level);
        if xp < cumulative + needed {
            break;
        }
        cumulative += needed;
        level += 1;
    }
    level
}

/// Progress within the current level band.
#[derive(Debug, Clone, Serialize)]
pub struct LevelProgress {
    pub level: i32,
    /// XP earned since reaching the current level.
    pub current: i64,
    /// Size of the current level's requirement.
    pub required: i64,
    pub percentage: f64,
}

/// How far a cumulative XP total is through its current level.
pub fn progress_to_next_level(xp: i64) -> LevelProgress {
    let level = calculate_level(xp);
    let current = xp - xp_for_level(level);
    let required = xp_for_next_level(level);
    let percentage = (current as f64 / required as f64 * 100.0).min(100.0);
    LevelProgress {
        level,
        current,
        required,
        percentage,
    }
}

/// A contiguous band of levels with a display label and color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LevelTier {
    pub min_level: i32,
    pub max_level: i32,
    pub name: &'static str,
    pub color: &'static str,
}

/// Tier bands cover every level >= 1 with no gaps; the last entry's ceiling
/// is the catch-all.
pub const LEVEL_TIERS: &[LevelTier] = &[
    LevelTier {
        min_level: 1,
        max_level: 4,
        name: "Drowsy Novice",
        color: "#9ca3af",
    },
    LevelTier {
        min_level: 5,
        max_level: 9,
        name: "Dream Recaller",
        color: "#22c55e",
    },
    LevelTier {
        min_level: 10,
        max_level: 19,
        name: "Sign Spotter",
        color: "#3b82f6",
    },
    LevelTier {
        min_level: 20,
        max_level: 34,
        name: "Lucid Apprentice",
        color: "#8b5cf6",
    },
    LevelTier {
        min_level: 35,
        max_level: 49,
        name: "Oneironaut",
        color: "#f59e0b",
    },
    LevelTier {
        min_level: 50,
        max_level: i32::MAX,
        name: "Dream Pilot",
        color: "#ef4444",
    },
];

/// Returns the first tier whose range contains `level`, falling back to the
/// last band if nothing matches.
pub fn level_tier(level: i32) -> &'static LevelTier {
    LEVEL_TIERS
        .iter()
        .find(|t| level >= t.min_level && level <= t.max_level)
        .unwrap_or(&LEVEL_TIERS[LEVEL_TIERS.len() - 1])
}
