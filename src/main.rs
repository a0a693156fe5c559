use std::env;

use anyhow::Context;
use clap::{Parser, Subcommand};

use dreampilot::AppState;
use dreampilot::constants::{RECENT_UNLOCK_WINDOW_MINUTES, TOP_PATTERN_COUNT, XP_PER_LESSON};
use dreampilot::database::init;
use dreampilot::database::models::NewDream;
use dreampilot::progression::achievements::{AchievementDef, get_achievement};
use dreampilot::services::stats;

#[derive(Parser)]
#[command(name = "dreampilot", version, about = "Dream journal progression core")]
struct Cli {
    /// User id to operate on.
    #[arg(long, global = true, default_value_t = 1)]
    user: i64,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Record a dream entry.
    Log {
        title: String,
        /// Full dream narrative.
        #[arg(long, default_value = "")]
        body: String,
        /// Mark the dream as lucid.
        #[arg(long)]
        lucid: bool,
        /// Tag the entry (repeatable).
        #[arg(long = "tag")]
        tags: Vec<String>,
        /// Record a felt emotion (repeatable).
        #[arg(long = "emotion")]
        emotions: Vec<String>,
    },
    /// Show level, streak and dream counts.
    Stats {
        /// Emit the snapshot as JSON instead of text.
        #[arg(long)]
        json: bool,
    },
    /// List unlocked achievements, checking for new ones first.
    Achievements {
        /// Only show unlocks from the recent celebration window.
        #[arg(long)]
        recent: bool,
    },
    /// Mark a guided lesson as completed.
    Lesson { lesson_id: String },
    /// Show recurring tags and emotions across the journal.
    Patterns,
}

fn print_unlocks(new_achievements: &[&'static AchievementDef]) {
    for def in new_achievements {
        println!("Achievement unlocked: {} - {}", def.name, def.description);
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let database_url =
        env::var("DATABASE_URL").unwrap_or_else(|_| "sqlite://dreampilot.db".to_string());
    let pool = init::connect(&database_url)
        .await
        .with_context(|| format!("opening database at {database_url}"))?;
    init::run_migrations(&pool)
        .await
        .context("running schema migrations")?;
    let app_state = AppState::new(pool);

    match cli.command {
        Command::Log {
            title,
            body,
            lucid,
            tags,
            emotions,
        } => {
            let dream = NewDream {
                title,
                body,
                is_lucid: lucid,
                tags,
                emotions,
            };
            let recorded = stats::record_dream(&app_state, cli.user, &dream).await?;
            println!(
                "Recorded dream #{} (+{} XP)",
                recorded.dream_id, recorded.xp_awarded
            );
            print_unlocks(&recorded.new_achievements);
        }
        Command::Stats { json } => {
            let snapshot = stats::get_dream_stats(&app_state, cli.user).await?;
            let progression = stats::get_progression(&app_state, cli.user).await?;
            let longest = stats::get_longest_streak(&app_state, cli.user).await?;
            if json {
                let payload = serde_json::json!({
                    "stats": snapshot,
                    "progression": progression,
                    "longest_streak": longest,
                });
                println!("{}", serde_json::to_string_pretty(&payload)?);
            } else {
                println!(
                    "Level {} ({})",
                    progression.progress.level, progression.tier.name
                );
                println!(
                    "XP: {} total, {}/{} into next level ({:.0}%)",
                    progression.total_xp,
                    progression.progress.current,
                    progression.progress.required,
                    progression.progress.percentage
                );
                println!(
                    "Dreams: {} ({} lucid)",
                    snapshot.total_dreams, snapshot.lucid_dreams
                );
                println!(
                    "Streak: {} day(s), longest {}",
                    snapshot.current_streak, longest
                );
                println!("Lessons completed: {}", snapshot.completed_lessons);
            }
        }
        Command::Achievements { recent } => {
            if recent {
                let unlocks =
                    stats::recent_achievements(&app_state, cli.user, RECENT_UNLOCK_WINDOW_MINUTES)
                        .await?;
                if unlocks.is_empty() {
                    println!("Nothing unlocked recently.");
                }
                for entry in unlocks {
                    let name = get_achievement(&entry.achievement_id)
                        .map(|d| d.name)
                        .unwrap_or(&entry.achievement_id);
                    println!("{} ({})", name, entry.unlocked_at.format("%H:%M:%S"));
                }
            } else {
                let snapshot = stats::get_dream_stats(&app_state, cli.user).await?;
                let new_unlocks = stats::check_achievements(&app_state, cli.user, &snapshot).await;
                print_unlocks(&new_unlocks);
                let unlocked = stats::unlocked_achievements(&app_state, cli.user).await?;
                if unlocked.is_empty() {
                    println!("No achievements unlocked yet.");
                }
                for entry in unlocked {
                    let name = get_achievement(&entry.achievement_id)
                        .map(|d| d.name)
                        .unwrap_or(&entry.achievement_id);
                    println!("[{}] {}", entry.unlocked_at.format("%Y-%m-%d"), name);
                }
            }
        }
        Command::Lesson { lesson_id } => {
            let (newly_completed, new_unlocks) =
                stats::complete_lesson(&app_state, cli.user, &lesson_id).await?;
            if newly_completed {
                println!("Lesson {lesson_id} completed (+{XP_PER_LESSON} XP)");
            } else {
                println!("Lesson {lesson_id} was already completed.");
            }
            print_unlocks(&new_unlocks);
        }
        Command::Patterns => {
            let patterns =
                stats::get_dream_patterns(&app_state, cli.user, TOP_PATTERN_COUNT).await?;
            println!("Top tags:");
            for (tag, count) in &patterns.top_tags {
                println!("  {tag}: {count}");
            }
            println!("Top emotions:");
            for (emotion, count) in &patterns.top_emotions {
                println!("  {emotion}: {count}");
            }
            println!("Lucid ratio: {:.0}%", patterns.lucid_ratio * 100.0);
        }
    }
    Ok(())
}
