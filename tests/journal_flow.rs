use chrono::{Duration, Utc};
use dreampilot::AppState;
use dreampilot::database::models::NewDream;
use dreampilot::database::{dreams, init};
use dreampilot::services::stats;

async fn test_state() -> AppState {
    let pool = init::connect_in_memory().await.expect("in-memory pool");
    init::run_migrations(&pool).await.expect("schema creation");
    AppState::new(pool)
}

fn dream(title: &str, lucid: bool) -> NewDream {
    NewDream {
        title: title.into(),
        is_lucid: lucid,
        ..Default::default()
    }
}

#[tokio::test]
async fn first_dream_awards_xp_and_unlocks() {
    let state = test_state().await;
    let recorded = stats::record_dream(&state, 1, &dream("flying", false))
        .await
        .expect("record");
    assert_eq!(recorded.xp_awarded, 10);
    assert!(recorded.new_achievements.iter().any(|d| d.id == "first_dream"));

    let progression = stats::get_progression(&state, 1).await.expect("progression");
    assert_eq!(progression.total_xp, 10);
    assert_eq!(progression.progress.level, 1);
}

#[tokio::test]
async fn lucid_dreams_earn_the_bonus() {
    let state = test_state().await;
    let recorded = stats::record_dream(&state, 1, &dream("aware", true))
        .await
        .expect("record");
    assert_eq!(recorded.xp_awarded, 25);
    assert!(recorded.new_achievements.iter().any(|d| d.id == "first_lucid"));
}

#[tokio::test]
async fn repeated_checks_do_not_duplicate_unlocks() {
    let state = test_state().await;
    stats::record_dream(&state, 1, &dream("one", false))
        .await
        .expect("record");

    let snapshot = stats::get_dream_stats(&state, 1).await.expect("stats");
    let second_run = stats::check_achievements(&state, 1, &snapshot).await;
    assert!(second_run.is_empty(), "second check must be a no-op");

    let unlocked = stats::unlocked_achievements(&state, 1).await.expect("list");
    let first_dream_rows = unlocked
        .iter()
        .filter(|u| u.achievement_id == "first_dream")
        .count();
    assert_eq!(first_dream_rows, 1);
}

#[tokio::test]
async fn fresh_unlocks_show_in_the_recent_window() {
    let state = test_state().await;
    stats::record_dream(&state, 1, &dream("one", false))
        .await
        .expect("record");
    let recent = stats::recent_achievements(&state, 1, 5).await.expect("recent");
    assert!(recent.iter().any(|u| u.achievement_id == "first_dream"));

    // Another user's window is empty.
    let none = stats::recent_achievements(&state, 2, 5).await.expect("other user");
    assert!(none.is_empty());
}

#[tokio::test]
async fn lesson_completion_is_idempotent() {
    let state = test_state().await;
    let (first, unlocks) = stats::complete_lesson(&state, 1, "reality-checks-101")
        .await
        .expect("complete");
    assert!(first);
    assert!(unlocks.iter().any(|d| d.id == "first_lesson"));

    let (again, unlocks) = stats::complete_lesson(&state, 1, "reality-checks-101")
        .await
        .expect("complete again");
    assert!(!again);
    assert!(unlocks.is_empty());

    let progression = stats::get_progression(&state, 1).await.expect("progression");
    assert_eq!(progression.total_xp, 50, "XP must be awarded once");
}

#[tokio::test]
async fn stats_reflect_a_two_day_streak() {
    let state = test_state().await;
    let now = Utc::now();
    let mut tx = state.db.begin().await.expect("tx");
    dreams::insert_dream(&mut tx, 1, &dream("today", false), now)
        .await
        .expect("insert");
    dreams::insert_dream(&mut tx, 1, &dream("yesterday", true), now - Duration::days(1))
        .await
        .expect("insert");
    tx.commit().await.expect("commit");
    state.invalidate_user_cache(1).await;

    let snapshot = stats::get_dream_stats(&state, 1).await.expect("stats");
    assert_eq!(snapshot.total_dreams, 2);
    assert_eq!(snapshot.lucid_dreams, 1);
    assert_eq!(snapshot.current_streak, 2);
}

#[tokio::test]
async fn users_are_isolated() {
    let state = test_state().await;
    stats::record_dream(&state, 1, &dream("mine", false))
        .await
        .expect("record");
    let other = stats::get_dream_stats(&state, 2).await.expect("stats");
    assert_eq!(other.total_dreams, 0);
    let other_unlocked = stats::unlocked_achievements(&state, 2).await.expect("list");
    assert!(other_unlocked.is_empty());
}
