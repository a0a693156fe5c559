//! The static achievement table and the rule matching that decides new unlocks.
//!
//! Definitions are compiled in and never mutated at runtime; persistence of
//! the unlocked set lives in `database::achievements`.

use serde::Serialize;
use std::collections::HashSet;

/// Aggregate counters the achievement rules are evaluated against.
/// Assembled by the service layer from dream/lesson counts and the streak engine.
#[derive(Debug, Clone, Copy, Default, Serialize)]
pub struct DreamStats {
    pub total_dreams: i64,
    pub lucid_dreams: i64,
    pub current_streak: u32,
    pub completed_lessons: i64,
}

/// A threshold an aggregate counter must reach.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Requirement {
    Dreams(i64),
    LucidDreams(i64),
    Streak(u32),
    Lessons(i64),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Rarity {
    Common,
    Rare,
    Epic,
    Legendary,
}

/// A single compiled-in achievement definition.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct AchievementDef {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub requirement: Requirement,
    pub rarity: Rarity,
}

/// All available achievements.
pub const ACHIEVEMENTS: &[AchievementDef] = &[
    AchievementDef {
        id: "first_dream",
        name: "First Flight",
        description: "Record your first dream",
        requirement: Requirement::Dreams(1),
        rarity: Rarity::Common,
    },
    AchievementDef {
        id: "dreams_10",
        name: "Frequent Flyer",
        description: "Record 10 dreams",
        requirement: Requirement::Dreams(10),
        rarity: Rarity::Common,
    },
    AchievementDef {
        id: "dreams_50",
        name: "Night Chronicler",
        description: "Record 50 dreams",
        requirement: Requirement::Dreams(50),
        rarity: Rarity::Rare,
    },
    AchievementDef {
        id: "dreams_100",
        name: "Dream Archivist",
        description: "Record 100 dreams",
        requirement: Requirement::Dreams(100),
        rarity: Rarity::Epic,
    },
    AchievementDef {
        id: "dreams_365",
        name: "A Year of Nights",
        description: "Record 365 dreams",
        requirement: Requirement::Dreams(365),
        rarity: Rarity::Legendary,
    },
    AchievementDef {
        id: "first_lucid",
        name: "Awake Inside",
        description: "Record your first lucid dream",
        requirement: Requirement::LucidDreams(1),
        rarity: Rarity::Common,
    },
    AchievementDef {
        id: "lucid_5",
        name: "Taking the Controls",
        description: "Record 5 lucid dreams",
        requirement: Requirement::LucidDreams(5),
        rarity: Rarity::Rare,
    },
    AchievementDef {
        id: "lucid_25",
        name: "Licensed Pilot",
        description: "Record 25 lucid dreams",
        requirement: Requirement::LucidDreams(25),
        rarity: Rarity::Epic,
    },
    AchievementDef {
        id: "lucid_100",
        name: "Master of the Skies",
        description: "Record 100 lucid dreams",
        requirement: Requirement::LucidDreams(100),
        rarity: Rarity::Legendary,
    },
    AchievementDef {
        id: "streak_3",
        name: "Three in a Row",
        description: "Journal 3 days in a row",
        requirement: Requirement::Streak(3),
        rarity: Rarity::Common,
    },
    AchievementDef {
        id: "streak_7",
        name: "Weekly Ritual",
        description: "Journal 7 days in a row",
        requirement: Requirement::Streak(7),
        rarity: Rarity::Rare,
    },
    AchievementDef {
        id: "streak_30",
        name: "Moon Cycle",
        description: "Journal 30 days in a row",
        requirement: Requirement::Streak(30),
        rarity: Rarity::Epic,
    },
    AchievementDef {
        id: "streak_100",
        name: "Century of Nights",
        description: "Journal 100 days in a row",
        requirement: Requirement::Streak(100),
        rarity: Rarity::Legendary,
    },
    AchievementDef {
        id: "first_lesson",
        name: "Ground School",
        description: "Complete your first lesson",
        requirement: Requirement::Lessons(1),
        rarity: Rarity::Common,
    },
    AchievementDef {
        id: "lessons_5",
        name: "Diligent Student",
        description: "Complete 5 lessons",
        requirement: Requirement::Lessons(5),
        rarity: Rarity::Rare,
    },
    AchievementDef {
        id: "lessons_15",
        name: "Course Graduate",
        description: "Complete 15 lessons",
        requirement: Requirement::Lessons(15),
        rarity: Rarity::Epic,
    },
    AchievementDef {
        id: "lessons_30",
        name: "Dream Scholar",
        description: "Complete 30 lessons",
        requirement: Requirement::Lessons(30),
        rarity: Rarity::Legendary,
    },
];

/// Look up a definition by id.
pub fn get_achievement(id: &str) -> Option<&'static AchievementDef> {
    ACHIEVEMENTS.iter().find(|a| a.id == id)
}

fn requirement_met(requirement: Requirement, stats: &DreamStats) -> bool {
    match requirement {
        Requirement::Dreams(n) => stats.total_dreams >= n,
        Requirement::LucidDreams(n) => stats.lucid_dreams >= n,
        Requirement::Streak(n) => stats.current_streak >= n,
        Requirement::Lessons(n) => stats.completed_lessons >= n,
    }
}

/// Definitions not yet in `unlocked` whose requirement `stats` now satisfies.
pub fn newly_satisfied<'a, I>(unlocked: I, stats: &DreamStats) -> Vec<&'static AchievementDef>
where
    I: IntoIterator<Item = &'a str>,
{
    let unlocked: HashSet<&str> = unlocked.into_iter().collect();
    ACHIEVEMENTS
        .iter()
        .filter(|def| !unlocked.contains(def.id) && requirement_met(def.requirement, stats))
        .collect()
}
