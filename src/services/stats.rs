//! Stats service layer: assembles per-user aggregates with short-lived caching,
//! awards XP for journal writes, and runs achievement checks afterwards.

use chrono::{Local, Utc};
use std::time::Duration;
use tracing::{debug, error, instrument};

use super::cache;
use crate::constants::{STATS_CACHE_TTL_SECS, XP_LUCID_BONUS, XP_PER_DREAM, XP_PER_LESSON};
use crate::database::models::{NewDream, UnlockedAchievement};
use crate::database::{achievements as achievement_store, dreams, lessons, profile};
use crate::model::AppState;
use crate::progression::achievements::{AchievementDef, DreamStats, newly_satisfied};
use crate::progression::leveling::{LevelProgress, LevelTier, level_tier, progress_to_next_level};
use crate::progression::patterns::{DreamPatterns, dream_patterns};
use crate::progression::streaks;

/// Fetch the user's aggregate stats, using a short TTL cache.
#[instrument(level = "debug", skip(app_state))]
pub async fn get_dream_stats(app_state: &AppState, user_id: i64) -> Result<DreamStats, sqlx::Error> {
    let ttl = Duration::from_secs(STATS_CACHE_TTL_SECS);
    if let Some(stats) = cache::get_with_ttl(&app_state.stats_cache, &user_id, ttl).await {
        debug!(target = "cache.stats", hit = true);
        return Ok(stats);
    }
    let (total_dreams, lucid_dreams) = dreams::count_dreams(&app_state.db, user_id).await?;
    let completed_lessons = lessons::count_completions(&app_state.db, user_id).await?;
    let timestamps = dreams::get_dream_timestamps(&app_state.db, user_id).await?;
    let today = Local::now().date_naive();
    let stats = DreamStats {
        total_dreams,
        lucid_dreams,
        current_streak: streaks::calculate_streak(&timestamps, today),
        completed_lessons,
    };
    cache::insert(&app_state.stats_cache, user_id, stats).await;
    Ok(stats)
}

/// Evaluates the static achievement table against `stats` and persists any new
/// unlocks in a single transaction, stamping the evaluation time.
///
/// Persistence failures are logged and surface as an empty result; callers see
/// them as "nothing newly unlocked".
#[instrument(level = "debug", skip(app_state, stats))]
pub async fn check_achievements(
    app_state: &AppState,
    user_id: i64,
    stats: &DreamStats,
) -> Vec<&'static AchievementDef> {
    match try_check_achievements(app_state, user_id, stats).await {
        Ok(new) => new,
        Err(e) => {
            error!(target = "achievements.check", user_id, error = %e, "achievement check failed");
            Vec::new()
        }
    }
}

async fn try_check_achievements(
    app_state: &AppState,
    user_id: i64,
    stats: &DreamStats,
) -> Result<Vec<&'static AchievementDef>, sqlx::Error> {
    let unlocked = achievement_store::get_unlocked_ids(&app_state.db, user_id).await?;
    let new = newly_satisfied(unlocked.iter().map(String::as_str), stats);
    if new.is_empty() {
        // Idempotent no-op: nothing qualifies, nothing is written.
        return Ok(new);
    }
    let now = Utc::now();
    let mut tx = app_state.db.begin().await?;
    for def in &new {
        achievement_store::insert_unlock(&mut tx, user_id, def.id, now).await?;
    }
    profile::set_achievements_checked_at(&mut tx, user_id, now).await?;
    tx.commit().await?;
    debug!(target = "achievements.check", user_id, count = new.len(), "new unlocks persisted");
    Ok(new)
}

/// Outcome of a journal write: the new row id plus anything it unlocked.
#[derive(Debug)]
pub struct RecordedDream {
    pub dream_id: i64,
    pub xp_awarded: i64,
    pub new_achievements: Vec<&'static AchievementDef>,
}

/// Inserts the dream and awards XP in one transaction, then re-checks
/// achievements against the refreshed stats.
#[instrument(level = "debug", skip(app_state, dream), fields(lucid = dream.is_lucid))]
pub async fn record_dream(
    app_state: &AppState,
    user_id: i64,
    dream: &NewDream,
) -> Result<RecordedDream, sqlx::Error> {
    let xp_awarded = XP_PER_DREAM + if dream.is_lucid { XP_LUCID_BONUS } else { 0 };
    let now = Utc::now();
    let mut tx = app_state.db.begin().await?;
    let dream_id = dreams::insert_dream(&mut tx, user_id, dream, now).await?;
    profile::add_xp(&mut tx, user_id, xp_awarded).await?;
    tx.commit().await?;
    app_state.invalidate_user_cache(user_id).await;
    let stats = get_dream_stats(app_state, user_id).await?;
    let new_achievements = check_achievements(app_state, user_id, &stats).await;
    Ok(RecordedDream {
        dream_id,
        xp_awarded,
        new_achievements,
    })
}

/// Marks a lesson complete. XP is awarded only on the first completion; the
/// boolean reports whether this call was the first.
#[instrument(level = "debug", skip(app_state))]
pub async fn complete_lesson(
    app_state: &AppState,
    user_id: i64,
    lesson_id: &str,
) -> Result<(bool, Vec<&'static AchievementDef>), sqlx::Error> {
    let now = Utc::now();
    let mut tx = app_state.db.begin().await?;
    let newly_completed = lessons::record_completion(&mut tx, user_id, lesson_id, now).await?;
    if newly_completed {
        profile::add_xp(&mut tx, user_id, XP_PER_LESSON).await?;
    }
    tx.commit().await?;
    if !newly_completed {
        return Ok((false, Vec::new()));
    }
    app_state.invalidate_user_cache(user_id).await;
    let stats = get_dream_stats(app_state, user_id).await?;
    Ok((true, check_achievements(app_state, user_id, &stats).await))
}

/// A display-ready progression snapshot.
#[derive(Debug, Clone, serde::Serialize)]
pub struct ProgressionSnapshot {
    pub total_xp: i64,
    pub progress: LevelProgress,
    pub tier: &'static LevelTier,
}

/// Level, tier and progress for the user's stored XP total.
pub async fn get_progression(
    app_state: &AppState,
    user_id: i64,
) -> Result<ProgressionSnapshot, sqlx::Error> {
    let user_profile = profile::get_or_create_profile(&app_state.db, user_id).await?;
    let progress = progress_to_next_level(user_profile.total_xp);
    let tier = level_tier(progress.level);
    Ok(ProgressionSnapshot {
        total_xp: user_profile.total_xp,
        progress,
        tier,
    })
}

/// Historical-maximum streak over the whole journal.
pub async fn get_longest_streak(app_state: &AppState, user_id: i64) -> Result<u32, sqlx::Error> {
    let timestamps = dreams::get_dream_timestamps(&app_state.db, user_id).await?;
    Ok(streaks::longest_streak(&timestamps))
}

/// Recurring tags/emotions and the lucid ratio over the user's journal.
pub async fn get_dream_patterns(
    app_state: &AppState,
    user_id: i64,
    top: usize,
) -> Result<DreamPatterns, sqlx::Error> {
    let all_dreams = dreams::get_dreams(&app_state.db, user_id).await?;
    Ok(dream_patterns(&all_dreams, top))
}

/// Every persisted unlock for the user, newest first.
pub async fn unlocked_achievements(
    app_state: &AppState,
    user_id: i64,
) -> Result<Vec<UnlockedAchievement>, sqlx::Error> {
    achievement_store::get_unlocked(&app_state.db, user_id).await
}

/// Unlocks inside the trailing celebration window.
pub async fn recent_achievements(
    app_state: &AppState,
    user_id: i64,
    within_minutes: i64,
) -> Result<Vec<UnlockedAchievement>, sqlx::Error> {
    achievement_store::get_recent_unlocks(&app_state.db, user_id, within_minutes).await
}
