// Central constants for XP awards, caching and display windows.
pub const XP_PER_DREAM: i64 = 10;
pub const XP_LUCID_BONUS: i64 = 15; // on top of the base award
pub const XP_PER_LESSON: i64 = 50;
pub const STATS_CACHE_TTL_SECS: u64 = 5;
pub const RECENT_UNLOCK_WINDOW_MINUTES: i64 = 5; // celebration window after a save
pub const TOP_PATTERN_COUNT: usize = 5;
